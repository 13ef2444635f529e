// Hotel reservation core: room catalog, reservation ledger, pricing and booking workflow

pub mod catalog;
pub mod config;
pub mod error;
pub mod ledger;
pub mod payment;
pub mod pricing;
pub mod workflow;

// Re-export key types for convenience
pub use catalog::{Room, RoomCatalog, RoomType};
pub use config::{BookingPolicy, HotelConfig, RoomLayout};
pub use error::{BookingError, CatalogError, ConfigError};
pub use ledger::{InMemoryLedger, PaymentMethod, PaymentStatus, Reservation, ReservationStore};
pub use payment::{PaymentProcessor, StubPaymentProcessor};
pub use pricing::{PriceBreakdown, PricingCalculator};
pub use workflow::{BookingRequest, BookingWorkflow, Quote, SearchResult};
