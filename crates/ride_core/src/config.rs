use std::time::Duration;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::error::{LifecycleError, LifecycleResult};

/// Timing for one timed leg (GET_TO_PICKUP or HEADING_TO_DROPOFF).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// Wall-clock delay between ticks.
    pub tick_interval: Duration,
    /// Fraction added to the progress percentage per tick.
    pub increment: f32,
    /// Pause after reaching 100% before the automatic advance.
    pub settle_delay: Duration,
}

impl ProgressionConfig {
    pub fn new(tick_interval: Duration, increment: f32, settle_delay: Duration) -> Self {
        Self {
            tick_interval,
            increment,
            settle_delay,
        }
    }

    /// Default pickup leg: +1% every 100 ms.
    pub fn pickup() -> Self {
        Self::new(Duration::from_millis(100), 0.01, Duration::from_millis(500))
    }

    /// Default drop-off leg: +0.5% every 150 ms.
    pub fn dropoff() -> Self {
        Self::new(Duration::from_millis(150), 0.005, Duration::from_millis(500))
    }

    /// Ticks needed to climb from `baseline` to 1.0.
    pub fn ticks_from(&self, baseline: f32) -> u32 {
        let remaining = (1.0 - baseline).max(0.0);
        // Tolerance keeps 0.7 / 0.01 from rounding up to 71.
        ((remaining / self.increment) - 1e-4).ceil().max(0.0) as u32
    }

    fn validate(&self, leg: &str) -> LifecycleResult<()> {
        if self.tick_interval.is_zero() {
            return Err(LifecycleError::Config(format!(
                "{leg} tick_interval must be greater than zero"
            )));
        }
        if !(self.increment > 0.0 && self.increment <= 1.0) {
            return Err(LifecycleError::Config(format!(
                "{leg} increment must be in (0, 1], got {}",
                self.increment
            )));
        }
        Ok(())
    }
}

/// Dwell times used by the full-simulation script.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FullSimulationTiming {
    pub offer_dwell: Duration,
    pub accepted_dwell: Duration,
    pub pickup_confirmation_dwell: Duration,
    pub completed_dwell: Duration,
    /// Pause between reset and the new script in `start_new_trip`.
    pub restart_delay: Duration,
}

impl Default for FullSimulationTiming {
    fn default() -> Self {
        Self {
            offer_dwell: Duration::from_millis(3000),
            accepted_dwell: Duration::from_millis(1000),
            pickup_confirmation_dwell: Duration::from_millis(5000),
            completed_dwell: Duration::from_millis(1000),
            restart_delay: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    /// Seats free when the ride is offered.
    pub initial_available: u32,
    /// No-shows never free seats beyond this.
    pub max_available: u32,
}

impl Default for SeatConfig {
    fn default() -> Self {
        Self {
            initial_available: 2,
            max_available: 4,
        }
    }
}

/// Fixed per-trip amounts; the total is derived, never configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsConfig {
    pub base_amount: f64,
    pub bonus: f64,
    pub commission: f64,
    pub currency: String,
    pub carbon_emission_avoided: f64,
}

impl Default for EarningsConfig {
    fn default() -> Self {
        Self {
            base_amount: 6500.0,
            bonus: 500.0,
            commission: 500.0,
            currency: "₦".to_string(),
            carbon_emission_avoided: 1.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
pub struct LifecycleConfig {
    pub pickup_leg: ProgressionConfig,
    pub dropoff_leg: ProgressionConfig,
    pub full_simulation: FullSimulationTiming,
    pub seats: SeatConfig,
    pub earnings: EarningsConfig,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            pickup_leg: ProgressionConfig::pickup(),
            dropoff_leg: ProgressionConfig::dropoff(),
            full_simulation: FullSimulationTiming::default(),
            seats: SeatConfig::default(),
            earnings: EarningsConfig::default(),
        }
    }
}

impl LifecycleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pickup_leg(mut self, leg: ProgressionConfig) -> Self {
        self.pickup_leg = leg;
        self
    }

    pub fn with_dropoff_leg(mut self, leg: ProgressionConfig) -> Self {
        self.dropoff_leg = leg;
        self
    }

    pub fn with_full_simulation(mut self, timing: FullSimulationTiming) -> Self {
        self.full_simulation = timing;
        self
    }

    pub fn with_seats(mut self, seats: SeatConfig) -> Self {
        self.seats = seats;
        self
    }

    pub fn with_earnings(mut self, earnings: EarningsConfig) -> Self {
        self.earnings = earnings;
        self
    }

    pub fn validate(&self) -> LifecycleResult<()> {
        self.pickup_leg.validate("pickup_leg")?;
        self.dropoff_leg.validate("dropoff_leg")?;
        if self.seats.initial_available > self.seats.max_available {
            return Err(LifecycleError::Config(format!(
                "initial_available seats ({}) exceed max_available ({})",
                self.seats.initial_available, self.seats.max_available
            )));
        }
        Ok(())
    }
}
