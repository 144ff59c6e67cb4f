use bevy_ecs::prelude::{Res, ResMut};

use crate::command::CurrentStep;
use crate::config::LifecycleConfig;
use crate::progress::baseline_progress;
use crate::sample::{sample_driver, sample_passengers, sample_route, sample_vehicle};
use crate::state::{RideEvent, RideState};

/// IDLE -> OFFER_RIDE_AVAILABLE: hands out the sample driver, vehicle, passengers and route.
pub fn offer_ride_system(
    step: Res<CurrentStep>,
    config: Res<LifecycleConfig>,
    mut state: ResMut<RideState>,
) {
    if step.target() != Some(RideEvent::OfferRideAvailable) {
        return;
    }

    let route = sample_route();
    *state = RideState {
        current_event: RideEvent::OfferRideAvailable,
        driver: Some(sample_driver()),
        vehicle: Some(sample_vehicle(config.seats.initial_available)),
        passengers: sample_passengers(),
        progress: baseline_progress(RideEvent::OfferRideAvailable, Some(&route)),
        route: Some(route),
        earnings: None,
        is_simulating: true,
    };
}
