//! The transition table. Every command is checked here and nowhere else.

use crate::command::RideCommand;
use crate::state::RideEvent;

/// Returns the event `command` leads to from `from`, or `None` when no edge exists.
///
/// `Reset` aborts any running session; it is only illegal when there is nothing to reset.
pub fn transition(from: RideEvent, command: &RideCommand) -> Option<RideEvent> {
    use RideCommand::*;
    use RideEvent::*;

    match (from, command) {
        (Idle, OfferRide) => Some(OfferRideAvailable),
        (OfferRideAvailable, Advance) => Some(PassengersAccepted),
        (PassengersAccepted, Advance) => Some(GetToPickup),
        (GetToPickup, Advance) => Some(PickupConfirmation),
        (PickupConfirmation, ConfirmPickup) => Some(HeadingToDropoff),
        (PickupConfirmation, ReportNoShow(_)) => Some(HeadingToDropoff),
        (HeadingToDropoff, Advance) => Some(TripCompleted),
        (TripCompleted, Advance) => Some(TripEnded),
        (Idle, Reset) => None,
        (_, Reset) => Some(Idle),
        _ => None,
    }
}
