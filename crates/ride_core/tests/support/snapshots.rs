#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use ride_core::state::{PassengerStatus, RideEvent, RideState};

/// Events in the order they were first entered, with consecutive repeats (ticks) collapsed.
pub fn event_sequence(snapshots: &[Arc<RideState>]) -> Vec<RideEvent> {
    let mut events: Vec<RideEvent> = Vec::new();
    for state in snapshots {
        if events.last() != Some(&state.current_event) {
            events.push(state.current_event);
        }
    }
    events
}

/// Panics if any passenger's status moves backwards within a session. Reset starts a new one.
pub fn assert_statuses_only_move_forward(snapshots: &[Arc<RideState>]) {
    let mut last: HashMap<String, PassengerStatus> = HashMap::new();
    for state in snapshots {
        if !state.is_active() {
            last.clear();
            continue;
        }
        for passenger in &state.passengers {
            if let Some(previous) = last.get(&passenger.id) {
                assert!(
                    previous.can_become(passenger.status),
                    "{} went {:?} -> {:?} in {:?}",
                    passenger.id,
                    previous,
                    passenger.status,
                    state.current_event
                );
            }
            last.insert(passenger.id.clone(), passenger.status);
        }
    }
}

/// Panics unless earnings are present exactly in TRIP_COMPLETED / TRIP_ENDED.
pub fn assert_earnings_only_when_completed(snapshots: &[Arc<RideState>]) {
    for state in snapshots {
        assert_eq!(
            state.earnings.is_some(),
            state.current_event.has_earnings(),
            "earnings presence wrong in {:?}",
            state.current_event
        );
        if let Some(earnings) = &state.earnings {
            assert_eq!(
                earnings.total(),
                earnings.base_amount + earnings.bonus - earnings.commission
            );
        }
    }
}

/// Panics if progress ever drops while the session stays in one timed leg.
pub fn assert_progress_monotonic_within_legs(snapshots: &[Arc<RideState>]) {
    for pair in snapshots.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if a.current_event == b.current_event && a.current_event.is_timed_leg() {
            assert!(
                b.progress.progress_percentage >= a.progress.progress_percentage,
                "{:?} progress fell from {} to {}",
                a.current_event,
                a.progress.progress_percentage,
                b.progress.progress_percentage
            );
        }
    }
}
