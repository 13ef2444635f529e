// Reservation ledger: the append-only record used to answer availability queries

use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{catalog::Room, catalog::RoomType, error::BookingError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
    Cancelled,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Cancelled => "CANCELLED",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Cash,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::Cash,
    ];
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::Cash => "Cash",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    id: String,
    guest_name: String,
    room_id: String,
    room_type: RoomType,
    check_in: NaiveDate,
    check_out: NaiveDate,
    guests: u32,
    total_cost: f64,
    status: PaymentStatus,
    payment_method: Option<PaymentMethod>,
}

impl Reservation {
    // New reservations start Pending; the cost is fixed here and never recomputed
    pub(crate) fn new(
        guest_name: impl Into<String>,
        room: &Room,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: u32,
        total_cost: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            guest_name: guest_name.into(),
            room_id: room.id.clone(),
            room_type: room.room_type,
            check_in,
            check_out,
            guests,
            total_cost,
            status: PaymentStatus::Pending,
            payment_method: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn guest_name(&self) -> &str {
        &self.guest_name
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn guests(&self) -> u32 {
        self.guests
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    // Half-open ranges: [a1, a2) and [b1, b2) overlap iff a1 < b2 && b1 < a2
    pub fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        self.check_in < check_out && check_in < self.check_out
    }

    pub(crate) fn mark_paid(&mut self, method: PaymentMethod) {
        self.status = PaymentStatus::Paid;
        self.payment_method = Some(method);
    }

    pub(crate) fn mark_cancelled(&mut self) {
        self.status = PaymentStatus::Cancelled;
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reservation ID: {}", self.id)?;
        writeln!(f, "Guest: {}", self.guest_name)?;
        writeln!(f, "Room: {} ({})", self.room_id, self.room_type)?;
        writeln!(f, "Check-in: {}", self.check_in)?;
        writeln!(f, "Check-out: {}", self.check_out)?;
        writeln!(f, "Guests: {}", self.guests)?;
        writeln!(f, "Total Cost: ${:.2}", self.total_cost)?;
        write!(f, "Payment Status: {}", self.status)
    }
}

// Storage seam for reservations. Implementations keep insertion order and never
// physically remove entries; cancellation is a status change.
pub trait ReservationStore {
    // True iff no blocking reservation for the room overlaps [check_in, check_out)
    fn is_available(&self, room_id: &str, check_in: NaiveDate, check_out: NaiveDate) -> bool;

    // Append without deduplication
    fn add(&mut self, reservation: Reservation);

    // All reservations in insertion order
    fn all(&self) -> &[Reservation];

    fn find(&self, reservation_id: &str) -> Option<&Reservation>;

    // Flip a reservation to Cancelled and return the updated entry
    fn cancel(&mut self, reservation_id: &str) -> Result<&Reservation, BookingError>;

    fn len(&self) -> usize {
        self.all().len()
    }

    fn is_empty(&self) -> bool {
        self.all().is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryLedger {
    reservations: Vec<Reservation>,
    cancellation_frees_dates: bool,
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new(true)
    }
}

impl InMemoryLedger {
    pub fn new(cancellation_frees_dates: bool) -> Self {
        Self {
            reservations: Vec::new(),
            cancellation_frees_dates,
        }
    }

    fn blocks(&self, reservation: &Reservation) -> bool {
        !(self.cancellation_frees_dates && reservation.status == PaymentStatus::Cancelled)
    }
}

impl ReservationStore for InMemoryLedger {
    fn is_available(&self, room_id: &str, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        !self.reservations.iter().any(|r| {
            r.room_id == room_id && self.blocks(r) && r.overlaps(check_in, check_out)
        })
    }

    fn add(&mut self, reservation: Reservation) {
        self.reservations.push(reservation);
    }

    fn all(&self) -> &[Reservation] {
        &self.reservations
    }

    fn find(&self, reservation_id: &str) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == reservation_id)
    }

    fn cancel(&mut self, reservation_id: &str) -> Result<&Reservation, BookingError> {
        let reservation = self
            .reservations
            .iter_mut()
            .find(|r| r.id == reservation_id)
            .ok_or_else(|| BookingError::ReservationNotFound(reservation_id.to_string()))?;

        if reservation.status == PaymentStatus::Cancelled {
            return Err(BookingError::AlreadyCancelled(reservation_id.to_string()));
        }

        reservation.mark_cancelled();
        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn reservation(room: &Room, check_in: &str, check_out: &str) -> Reservation {
        Reservation::new("Ada", room, date(check_in), date(check_out), 2, 100.0)
    }

    #[test]
    fn test_overlap_is_half_open() {
        let room = Room::new("101", RoomType::Standard);
        let r = reservation(&room, "2024-01-01", "2024-01-04");

        assert!(r.overlaps(date("2024-01-03"), date("2024-01-05")));
        assert!(r.overlaps(date("2023-12-30"), date("2024-01-02")));
        assert!(r.overlaps(date("2024-01-02"), date("2024-01-03")));
        assert!(r.overlaps(date("2023-12-01"), date("2024-02-01")));

        // Check-out day can be the next guest's check-in day
        assert!(!r.overlaps(date("2024-01-04"), date("2024-01-06")));
        assert!(!r.overlaps(date("2023-12-29"), date("2024-01-01")));
    }

    #[test]
    fn test_availability_is_per_room() {
        let room_a = Room::new("101", RoomType::Standard);
        let room_b = Room::new("102", RoomType::Deluxe);
        let mut ledger = InMemoryLedger::default();
        ledger.add(reservation(&room_a, "2024-01-01", "2024-01-04"));

        assert!(!ledger.is_available("101", date("2024-01-02"), date("2024-01-03")));
        assert!(ledger.is_available("102", date("2024-01-02"), date("2024-01-03")));
        assert!(ledger.is_available("101", date("2024-01-04"), date("2024-01-05")));
        assert_eq!(ledger.len(), 1);
        assert!(ledger.all().iter().all(|r| r.room_id() != room_b.id));
    }

    #[test]
    fn test_insertion_order_kept() {
        let room = Room::new("301", RoomType::Suite);
        let mut ledger = InMemoryLedger::default();
        let first = reservation(&room, "2024-02-10", "2024-02-12");
        let second = reservation(&room, "2024-01-01", "2024-01-02");
        let (first_id, second_id) = (first.id().to_string(), second.id().to_string());

        ledger.add(first);
        ledger.add(second);

        let ids: Vec<&str> = ledger.all().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![first_id.as_str(), second_id.as_str()]);
    }

    #[test]
    fn test_cancel_frees_dates_when_enabled() {
        let room = Room::new("101", RoomType::Standard);
        let mut ledger = InMemoryLedger::new(true);
        let r = reservation(&room, "2024-01-01", "2024-01-04");
        let id = r.id().to_string();
        ledger.add(r);

        let cancelled = ledger.cancel(&id).unwrap();
        assert_eq!(cancelled.status(), PaymentStatus::Cancelled);
        assert_eq!(cancelled.total_cost(), 100.0);

        assert!(ledger.is_available("101", date("2024-01-02"), date("2024-01-03")));
        // Still recorded
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_cancel_keeps_dates_blocked_when_disabled() {
        let room = Room::new("101", RoomType::Standard);
        let mut ledger = InMemoryLedger::new(false);
        let r = reservation(&room, "2024-01-01", "2024-01-04");
        let id = r.id().to_string();
        ledger.add(r);

        ledger.cancel(&id).unwrap();
        assert!(!ledger.is_available("101", date("2024-01-02"), date("2024-01-03")));
    }

    #[test]
    fn test_cancel_errors() {
        let room = Room::new("101", RoomType::Standard);
        let mut ledger = InMemoryLedger::default();
        let r = reservation(&room, "2024-01-01", "2024-01-04");
        let id = r.id().to_string();
        ledger.add(r);

        assert_eq!(
            ledger.cancel("missing").unwrap_err(),
            BookingError::ReservationNotFound("missing".to_string())
        );
        ledger.cancel(&id).unwrap();
        assert_eq!(
            ledger.cancel(&id).unwrap_err(),
            BookingError::AlreadyCancelled(id.clone())
        );
    }

    #[test]
    fn test_details_display() {
        let room = Room::new("204", RoomType::Executive);
        let mut r = Reservation::new(
            "Grace",
            &room,
            date("2024-07-01"),
            date("2024-07-03"),
            1,
            1000.0,
        );
        r.mark_paid(PaymentMethod::Cash);

        let details = r.to_string();
        assert!(details.contains("Guest: Grace"));
        assert!(details.contains("Room: 204 (EXECUTIVE)"));
        assert!(details.contains("Check-in: 2024-07-01"));
        assert!(details.contains("Check-out: 2024-07-03"));
        assert!(details.contains("Total Cost: $1000.00"));
        assert!(details.ends_with("Payment Status: PAID"));
        assert_eq!(r.payment_method(), Some(PaymentMethod::Cash));
    }

    #[test]
    fn test_ids_are_unique() {
        let room = Room::new("101", RoomType::Standard);
        let a = reservation(&room, "2024-01-01", "2024-01-02");
        let b = reservation(&room, "2024-01-01", "2024-01-02");
        assert_ne!(a.id(), b.id());
    }
}
