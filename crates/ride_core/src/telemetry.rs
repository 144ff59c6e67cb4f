//! Telemetry: an in-memory log of accepted transitions and completed trips.
//!
//! Lives in the controller's world and survives `reset`, so it spans every session the
//! controller has driven.

use bevy_ecs::prelude::{Res, ResMut, Resource};

use crate::command::{CurrentStep, RideCommand};
use crate::state::{PassengerStatus, RideEvent, RideState};

#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRecord {
    pub from: RideEvent,
    pub to: RideEvent,
    pub command: RideCommand,
}

/// One finished trip, recorded on entering TRIP_COMPLETED.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedTripRecord {
    pub earnings_total: f64,
    pub dropped_off: usize,
    pub no_shows: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Resource)]
pub struct RideTelemetry {
    pub transitions: Vec<TransitionRecord>,
    pub completed_trips: Vec<CompletedTripRecord>,
    pub rejected_commands: u64,
    pub progress_ticks: u64,
}

impl RideTelemetry {
    pub fn record_rejection(&mut self) {
        self.rejected_commands += 1;
    }

    /// Number of times the session entered `event`.
    pub fn entries_into(&self, event: RideEvent) -> usize {
        self.transitions.iter().filter(|t| t.to == event).count()
    }
}

/// Runs after the lifecycle systems so it sees the state they produced.
pub fn record_step_system(
    step: Res<CurrentStep>,
    state: Res<RideState>,
    mut telemetry: ResMut<RideTelemetry>,
) {
    match &*step {
        CurrentStep::ProgressTick { .. } => telemetry.progress_ticks += 1,
        CurrentStep::Transition { command, from, to } => {
            telemetry.transitions.push(TransitionRecord {
                from: *from,
                to: *to,
                command: command.clone(),
            });
            if *to == RideEvent::TripCompleted {
                let earnings_total = state.earnings.as_ref().map_or(0.0, |e| e.total());
                telemetry.completed_trips.push(CompletedTripRecord {
                    earnings_total,
                    dropped_off: state.passengers_with(PassengerStatus::DroppedOff).count(),
                    no_shows: state.passengers_with(PassengerStatus::NoShow).count(),
                });
            }
        }
    }
}
