// Booking policy and hotel configuration

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_OVERAGE_FEE_PER_GUEST_NIGHT: f64 = 50.0;

// Policy knobs for the booking workflow
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BookingPolicy {
    // Refuse bookings above the room type's max occupancy instead of charging the overage fee
    pub strict_occupancy: bool,
    // Cancelled reservations no longer block their date range
    pub cancellation_frees_dates: bool,
    pub overage_fee_per_guest_night: f64,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            strict_occupancy: false,
            cancellation_frees_dates: true,
            overage_fee_per_guest_night: DEFAULT_OVERAGE_FEE_PER_GUEST_NIGHT,
        }
    }
}

// How room types are assigned to the room numbers at startup
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoomLayout {
    #[default]
    Fixed,
    Randomized {
        #[serde(default)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct HotelConfig {
    pub policy: BookingPolicy,
    pub layout: RoomLayout,
}

impl HotelConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: HotelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fee = self.policy.overage_fee_per_guest_night;
        if !fee.is_finite() || fee < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "overage_fee_per_guest_night must be a non-negative number, got {}",
                fee
            )));
        }
        Ok(())
    }
}
