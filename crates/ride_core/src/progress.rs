//! Progress baselines per lifecycle event and the linear model for timed legs.

use crate::config::{LifecycleConfig, ProgressionConfig};
use crate::state::{Coordinates, RideEvent, RideProgress, RideState, Route};

pub const TOTAL_STEPS: u32 = 4;

/// Starting point of a timed leg: where its percentage, time and distance begin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegProfile {
    pub step: u32,
    pub baseline: f32,
    pub time_remaining: u32,
    pub distance_remaining: f32,
}

pub const PICKUP_LEG: LegProfile = LegProfile {
    step: 1,
    baseline: 0.3,
    time_remaining: 240,
    distance_remaining: 2.1,
};

pub const DROPOFF_LEG: LegProfile = LegProfile {
    step: 3,
    baseline: 0.75,
    time_remaining: 480,
    distance_remaining: 3.2,
};

impl LegProfile {
    pub fn for_event(event: RideEvent) -> Option<LegProfile> {
        match event {
            RideEvent::GetToPickup => Some(PICKUP_LEG),
            RideEvent::HeadingToDropoff => Some(DROPOFF_LEG),
            _ => None,
        }
    }

    /// Progress at `percentage`, with time and distance scaled over what is left of the leg.
    pub fn at(&self, percentage: f32) -> RideProgress {
        let percentage = percentage.clamp(self.baseline, 1.0);
        let span = 1.0 - self.baseline;
        let left = if span > 0.0 {
            (1.0 - percentage) / span
        } else {
            0.0
        };
        RideProgress {
            current_step: self.step,
            total_steps: TOTAL_STEPS,
            progress_percentage: percentage,
            time_remaining: (self.time_remaining as f32 * left).round() as u32,
            distance_remaining: self.distance_remaining * left,
        }
    }

    /// Percentage after `tick` ticks; lands on exactly 1.0 at the final tick.
    pub fn percentage_at_tick(&self, leg: &ProgressionConfig, tick: u32) -> f32 {
        if tick >= leg.ticks_from(self.baseline) {
            return 1.0;
        }
        (self.baseline + tick as f32 * leg.increment).min(1.0)
    }

    /// Fraction of the leg itself that has been covered, in `[0, 1]`.
    pub fn leg_fraction(&self, percentage: f32) -> f32 {
        let span = 1.0 - self.baseline;
        if span <= 0.0 {
            return 1.0;
        }
        ((percentage - self.baseline) / span).clamp(0.0, 1.0)
    }
}

/// The progress a snapshot carries right after entering `event`.
pub fn baseline_progress(event: RideEvent, route: Option<&Route>) -> RideProgress {
    if let Some(profile) = LegProfile::for_event(event) {
        return profile.at(profile.baseline);
    }
    match event {
        RideEvent::Idle => RideProgress::default(),
        RideEvent::OfferRideAvailable | RideEvent::PassengersAccepted => RideProgress {
            current_step: 0,
            total_steps: TOTAL_STEPS,
            progress_percentage: 0.0,
            time_remaining: route.map_or(0, |r| r.estimated_duration_min * 60),
            distance_remaining: route.map_or(0.0, |r| r.estimated_distance_km),
        },
        RideEvent::PickupConfirmation => RideProgress {
            current_step: 2,
            total_steps: TOTAL_STEPS,
            progress_percentage: 0.5,
            time_remaining: 285,
            distance_remaining: 0.0,
        },
        _ => RideProgress {
            current_step: TOTAL_STEPS,
            total_steps: TOTAL_STEPS,
            progress_percentage: 1.0,
            time_remaining: 0,
            distance_remaining: 0.0,
        },
    }
}

/// Timing for the timed leg `event`, if it is one.
pub fn leg_config(config: &LifecycleConfig, event: RideEvent) -> Option<ProgressionConfig> {
    match event {
        RideEvent::GetToPickup => Some(config.pickup_leg),
        RideEvent::HeadingToDropoff => Some(config.dropoff_leg),
        _ => None,
    }
}

/// Origin and destination of the vehicle while in the timed leg `event`.
pub fn leg_endpoints(state: &RideState, event: RideEvent) -> Option<(Coordinates, Coordinates)> {
    let route = state.route.as_ref()?;
    let pickup = state
        .passengers
        .first()
        .map(|p| p.pickup_location.coordinates)
        .or_else(|| route.waypoints.first().map(|w| w.coordinates))?;
    match event {
        RideEvent::GetToPickup => Some((route.start_location.coordinates, pickup)),
        RideEvent::HeadingToDropoff => Some((pickup, route.end_location.coordinates)),
        _ => None,
    }
}
