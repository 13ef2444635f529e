// Error types shared by the catalog, ledger and booking workflow

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingError {
    #[error("Room not found: {0}")]
    RoomNotFound(String),

    #[error("Invalid date range: check-out {check_out} must be after check-in {check_in}")]
    DateRangeInvalid {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("Room {room_id} is not available from {check_in} to {check_out}")]
    RoomUnavailable {
        room_id: String,
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("Room {room_id} holds at most {max_occupancy} guests, {guests} requested")]
    OccupancyExceeded {
        room_id: String,
        guests: u32,
        max_occupancy: u32,
    },

    #[error("Guest count must be at least 1")]
    InvalidGuestCount,

    #[error("Reservation not found: {0}")]
    ReservationNotFound(String),

    #[error("Reservation {0} is already cancelled")]
    AlreadyCancelled(String),

    #[error("Payment declined: {0}")]
    PaymentDeclined(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("Duplicate room id: {0}")]
    DuplicateRoom(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
