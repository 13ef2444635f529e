// Booking workflow: search -> select -> quote -> confirm -> pay
//
// The workflow owns the catalog, the reservation store and the payment processor
// for the lifetime of the process. Every step re-checks availability against the
// store, so a stale search result or quote never produces a double booking.

use chrono::NaiveDate;

use crate::{
    catalog::{Room, RoomCatalog},
    config::BookingPolicy,
    error::BookingError,
    ledger::{InMemoryLedger, PaymentMethod, Reservation, ReservationStore},
    payment::{PaymentProcessor, StubPaymentProcessor},
    pricing::{nights, PriceBreakdown, PricingCalculator},
};

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub room: Room,
    pub nightly_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub room_id: String,
    pub guest_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
}

// Priced offer for one room, only built by `BookingWorkflow::quote`.
// Dropping it is declining: nothing is recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    request: BookingRequest,
    room: Room,
    price: PriceBreakdown,
}

impl Quote {
    pub fn request(&self) -> &BookingRequest {
        &self.request
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn price(&self) -> &PriceBreakdown {
        &self.price
    }

    pub fn total(&self) -> f64 {
        self.price.total
    }
}

pub struct BookingWorkflow<S = InMemoryLedger, P = StubPaymentProcessor> {
    catalog: RoomCatalog,
    store: S,
    payments: P,
    pricing: PricingCalculator,
    policy: BookingPolicy,
}

impl BookingWorkflow {
    // Workflow over an empty in-memory ledger and the stub payment processor
    pub fn new(catalog: RoomCatalog, policy: BookingPolicy) -> Self {
        let store = InMemoryLedger::new(policy.cancellation_frees_dates);
        Self::with_parts(catalog, store, StubPaymentProcessor::default(), policy)
    }
}

impl<S: ReservationStore, P: PaymentProcessor> BookingWorkflow<S, P> {
    pub fn with_parts(catalog: RoomCatalog, store: S, payments: P, policy: BookingPolicy) -> Self {
        Self {
            catalog,
            store,
            payments,
            pricing: PricingCalculator::new(policy.overage_fee_per_guest_night),
            policy,
        }
    }

    pub fn catalog(&self) -> &RoomCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn payments(&self) -> &P {
        &self.payments
    }

    pub fn policy(&self) -> &BookingPolicy {
        &self.policy
    }

    // Rooms free for the whole range that also fit the party without overage
    pub fn search(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: u32,
    ) -> Result<Vec<SearchResult>, BookingError> {
        validate_stay(check_in, check_out, guests)?;

        let results: Vec<SearchResult> = self
            .catalog
            .list_rooms()
            .iter()
            .filter(|room| room.room_type.max_occupancy() >= guests)
            .filter(|room| self.store.is_available(&room.id, check_in, check_out))
            .map(|room| SearchResult {
                room: room.clone(),
                nightly_rate: room.room_type.base_rate(),
            })
            .collect();

        tracing::debug!(
            %check_in,
            %check_out,
            guests,
            found = results.len(),
            "room search"
        );
        Ok(results)
    }

    // Select + quote: resolve the room, re-check it, and price the stay
    pub fn quote(&self, request: BookingRequest) -> Result<Quote, BookingError> {
        let room = self.catalog.find_room(&request.room_id)?.clone();
        validate_stay(request.check_in, request.check_out, request.guests)?;

        self.ensure_available(&room, request.check_in, request.check_out)?;

        let max_occupancy = room.room_type.max_occupancy();
        if self.policy.strict_occupancy && request.guests > max_occupancy {
            tracing::warn!(room_id = %room.id, guests = request.guests, "occupancy exceeded");
            return Err(BookingError::OccupancyExceeded {
                room_id: room.id,
                guests: request.guests,
                max_occupancy,
            });
        }

        let price = self.pricing.price(
            room.room_type,
            request.check_in,
            request.check_out,
            request.guests,
        )?;

        tracing::debug!(room_id = %room.id, total = price.total, "quote issued");
        Ok(Quote {
            request,
            room,
            price,
        })
    }

    // Accept a quote: create a Pending reservation, charge it, mark it Paid and record it
    pub fn confirm(
        &mut self,
        quote: Quote,
        method: PaymentMethod,
    ) -> Result<Reservation, BookingError> {
        // Re-run every quote check against the current store and re-price;
        // only the request is carried over from the earlier quote
        let Quote {
            request,
            room,
            price,
        } = self.quote(quote.request)?;

        let mut reservation = Reservation::new(
            request.guest_name,
            &room,
            request.check_in,
            request.check_out,
            request.guests,
            price.total,
        );

        if let Err(e) = self.payments.charge(&reservation, method) {
            tracing::warn!(room_id = %room.id, error = %e, "payment failed");
            return Err(e);
        }
        reservation.mark_paid(method);

        tracing::debug!(
            reservation_id = reservation.id(),
            room_id = %room.id,
            total = reservation.total_cost(),
            "reservation confirmed"
        );
        self.store.add(reservation.clone());
        Ok(reservation)
    }

    // Quote and confirm in one call, paying by card
    pub fn book(
        &mut self,
        room_id: &str,
        guest_name: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: u32,
    ) -> Result<Reservation, BookingError> {
        let quote = self.quote(BookingRequest {
            room_id: room_id.to_string(),
            guest_name: guest_name.to_string(),
            check_in,
            check_out,
            guests,
        })?;
        self.confirm(quote, PaymentMethod::CreditCard)
    }

    pub fn list_reservations(&self) -> &[Reservation] {
        self.store.all()
    }

    pub fn cancel(&mut self, reservation_id: &str) -> Result<Reservation, BookingError> {
        let reservation = self.store.cancel(reservation_id)?.clone();
        tracing::debug!(
            reservation_id,
            room_id = reservation.room_id(),
            "reservation cancelled"
        );
        Ok(reservation)
    }

    fn ensure_available(
        &self,
        room: &Room,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<(), BookingError> {
        if self.store.is_available(&room.id, check_in, check_out) {
            return Ok(());
        }
        tracing::warn!(room_id = %room.id, %check_in, %check_out, "room unavailable");
        Err(BookingError::RoomUnavailable {
            room_id: room.id.clone(),
            check_in,
            check_out,
        })
    }
}

fn validate_stay(
    check_in: NaiveDate,
    check_out: NaiveDate,
    guests: u32,
) -> Result<(), BookingError> {
    nights(check_in, check_out)?;
    if guests == 0 {
        return Err(BookingError::InvalidGuestCount);
    }
    Ok(())
}
