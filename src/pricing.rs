// Pricing: total stay cost from nights, nightly rate and occupancy overage

use chrono::NaiveDate;

use crate::{catalog::RoomType, config::DEFAULT_OVERAGE_FEE_PER_GUEST_NIGHT, error::BookingError};

// Number of billed nights. Check-out day is not billed; at least one night is required.
pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> Result<u32, BookingError> {
    let days = (check_out - check_in).num_days();
    if days < 1 {
        return Err(BookingError::DateRangeInvalid {
            check_in,
            check_out,
        });
    }
    u32::try_from(days).map_err(|_| BookingError::DateRangeInvalid {
        check_in,
        check_out,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    pub nights: u32,
    pub nightly_rate: f64,
    pub base_cost: f64,
    pub extra_guests: u32,
    pub overage_fee: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingCalculator {
    overage_fee_per_guest_night: f64,
}

impl Default for PricingCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_OVERAGE_FEE_PER_GUEST_NIGHT)
    }
}

impl PricingCalculator {
    pub fn new(overage_fee_per_guest_night: f64) -> Self {
        Self {
            overage_fee_per_guest_night,
        }
    }

    pub fn overage_fee_per_guest_night(&self) -> f64 {
        self.overage_fee_per_guest_night
    }

    pub fn price(
        &self,
        room_type: RoomType,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: u32,
    ) -> Result<PriceBreakdown, BookingError> {
        let nights = nights(check_in, check_out)?;
        let nightly_rate = room_type.base_rate();
        let base_cost = nights as f64 * nightly_rate;

        let extra_guests = guests.saturating_sub(room_type.max_occupancy());
        let overage_fee = nights as f64 * self.overage_fee_per_guest_night * extra_guests as f64;

        Ok(PriceBreakdown {
            nights,
            nightly_rate,
            base_cost,
            extra_guests,
            overage_fee,
            total: base_cost + overage_fee,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_standard_three_nights() {
        let calc = PricingCalculator::default();
        let price = calc
            .price(RoomType::Standard, date("2024-01-01"), date("2024-01-04"), 2)
            .unwrap();

        assert_eq!(price.nights, 3);
        assert_eq!(price.extra_guests, 0);
        assert_eq!(price.overage_fee, 0.0);
        assert_eq!(price.total, 300.0);
    }

    #[test]
    fn test_suite_with_extra_guest() {
        let calc = PricingCalculator::default();
        let price = calc
            .price(RoomType::Suite, date("2024-03-10"), date("2024-03-13"), 5)
            .unwrap();

        assert_eq!(price.base_cost, 1050.0);
        assert_eq!(price.extra_guests, 1);
        assert_eq!(price.overage_fee, 150.0);
        assert_eq!(price.total, 1200.0);
    }

    #[test]
    fn test_zero_and_negative_nights_rejected() {
        let calc = PricingCalculator::default();
        let day = date("2024-05-01");

        assert_eq!(
            calc.price(RoomType::Deluxe, day, day, 1),
            Err(BookingError::DateRangeInvalid {
                check_in: day,
                check_out: day
            })
        );
        assert!(calc
            .price(RoomType::Deluxe, day, date("2024-04-28"), 1)
            .is_err());
    }

    #[test]
    fn test_custom_overage_fee() {
        let calc = PricingCalculator::new(80.0);
        let price = calc
            .price(RoomType::Executive, date("2024-02-01"), date("2024-02-03"), 4)
            .unwrap();

        // 2 nights * 500 + 2 nights * 80 * 2 extra guests
        assert_eq!(price.total, 1000.0 + 320.0);
    }

    #[test]
    fn test_price_non_decreasing_in_nights() {
        let calc = PricingCalculator::default();
        let mut rng = StdRng::seed_from_u64(7);
        let start = date("2024-01-01");

        for _ in 0..500 {
            let room_type = RoomType::ALL[rng.gen_range(0..RoomType::ALL.len())];
            let guests = rng.gen_range(1..=8);
            let n = rng.gen_range(1..60);

            let shorter = calc
                .price(room_type, start, start + chrono::Duration::days(n), guests)
                .unwrap();
            let longer = calc
                .price(room_type, start, start + chrono::Duration::days(n + 1), guests)
                .unwrap();

            assert!(
                longer.total >= shorter.total,
                "{} guests in {}: {} nights cost {}, {} nights cost {}",
                guests,
                room_type,
                n,
                shorter.total,
                n + 1,
                longer.total
            );
        }
    }

    #[test]
    fn test_no_overage_at_or_below_limit() {
        let calc = PricingCalculator::default();
        let check_in = date("2024-06-01");
        let check_out = date("2024-06-06");

        for room_type in RoomType::ALL {
            let at_limit = calc
                .price(room_type, check_in, check_out, room_type.max_occupancy())
                .unwrap();
            for guests in 1..=room_type.max_occupancy() {
                let price = calc.price(room_type, check_in, check_out, guests).unwrap();
                assert_eq!(price.total, at_limit.total);
            }
        }
    }
}
