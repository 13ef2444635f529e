// Payment processing seam. Real gateways are out of scope; the stub always succeeds.

use crate::{
    error::BookingError,
    ledger::{PaymentMethod, Reservation},
};

pub trait PaymentProcessor {
    // Charge the reservation's total cost
    fn charge(&mut self, reservation: &Reservation, method: PaymentMethod)
        -> Result<(), BookingError>;
}

#[derive(Debug, Default, Clone)]
pub struct StubPaymentProcessor {
    charges: usize,
    amount_charged: f64,
}

impl StubPaymentProcessor {
    pub fn charges(&self) -> usize {
        self.charges
    }

    pub fn amount_charged(&self) -> f64 {
        self.amount_charged
    }
}

impl PaymentProcessor for StubPaymentProcessor {
    fn charge(
        &mut self,
        reservation: &Reservation,
        method: PaymentMethod,
    ) -> Result<(), BookingError> {
        tracing::debug!(
            reservation_id = reservation.id(),
            amount = reservation.total_cost(),
            %method,
            "payment accepted"
        );
        self.charges += 1;
        self.amount_charged += reservation.total_cost();
        Ok(())
    }
}
