//! Lifecycle runner: routes a single step into the ECS world.
//!
//! Validation happens before this point. Each call inserts the step as [CurrentStep] and runs
//! the schedule once; only the system gated on the step's target event does any work.

use bevy_ecs::prelude::{Res, Schedule, World};
use bevy_ecs::schedule::{ExecutorKind, IntoSystemConfigs};

use crate::command::CurrentStep;
use crate::config::LifecycleConfig;
use crate::state::{RideEvent, RideState};
use crate::systems::{
    get_to_pickup::get_to_pickup_system, heading_to_dropoff::heading_to_dropoff_system,
    offer_ride::offer_ride_system, passengers_accepted::passengers_accepted_system,
    pickup_confirmation::pickup_confirmation_system, progress_tick::progress_tick_system,
    reset::reset_system, trip_completed::trip_completed_system, trip_ended::trip_ended_system,
};
use crate::telemetry::{record_step_system, RideTelemetry};

fn targets(step: &Option<Res<CurrentStep>>, event: RideEvent) -> bool {
    step.as_ref()
        .map(|s| s.target() == Some(event))
        .unwrap_or(false)
}

// Condition functions for each target event
fn is_offer_ride(step: Option<Res<CurrentStep>>) -> bool {
    targets(&step, RideEvent::OfferRideAvailable)
}

fn is_passengers_accepted(step: Option<Res<CurrentStep>>) -> bool {
    targets(&step, RideEvent::PassengersAccepted)
}

fn is_get_to_pickup(step: Option<Res<CurrentStep>>) -> bool {
    targets(&step, RideEvent::GetToPickup)
}

fn is_pickup_confirmation(step: Option<Res<CurrentStep>>) -> bool {
    targets(&step, RideEvent::PickupConfirmation)
}

fn is_heading_to_dropoff(step: Option<Res<CurrentStep>>) -> bool {
    targets(&step, RideEvent::HeadingToDropoff)
}

fn is_trip_completed(step: Option<Res<CurrentStep>>) -> bool {
    targets(&step, RideEvent::TripCompleted)
}

fn is_trip_ended(step: Option<Res<CurrentStep>>) -> bool {
    targets(&step, RideEvent::TripEnded)
}

fn is_reset(step: Option<Res<CurrentStep>>) -> bool {
    targets(&step, RideEvent::Idle)
}

fn is_progress_tick(step: Option<Res<CurrentStep>>) -> bool {
    step.map(|s| matches!(*s, CurrentStep::ProgressTick { .. }))
        .unwrap_or(false)
}

/// Builds the lifecycle schedule. Systems are chained so telemetry always observes the
/// state the lifecycle system produced.
pub fn lifecycle_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);

    schedule.add_systems(
        (
            offer_ride_system.run_if(is_offer_ride),
            passengers_accepted_system.run_if(is_passengers_accepted),
            get_to_pickup_system.run_if(is_get_to_pickup),
            pickup_confirmation_system.run_if(is_pickup_confirmation),
            heading_to_dropoff_system.run_if(is_heading_to_dropoff),
            trip_completed_system.run_if(is_trip_completed),
            trip_ended_system.run_if(is_trip_ended),
            reset_system.run_if(is_reset),
            progress_tick_system.run_if(is_progress_tick),
            record_step_system,
        )
            .chain(),
    );

    schedule
}

/// Creates a world holding an idle session and the resources every system reads.
pub fn lifecycle_world(config: LifecycleConfig) -> World {
    let mut world = World::new();
    world.insert_resource(config);
    world.insert_resource(RideState::idle());
    world.insert_resource(RideTelemetry::default());
    world
}

/// Runs one step and returns the resulting snapshot.
pub fn run_step(world: &mut World, schedule: &mut Schedule, step: CurrentStep) -> RideState {
    world.insert_resource(step);
    schedule.run(world);
    world.resource::<RideState>().clone()
}
