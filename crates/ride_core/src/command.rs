use std::fmt;

use bevy_ecs::prelude::Resource;

use crate::state::RideEvent;

/// A caller-issued lifecycle command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RideCommand {
    OfferRide,
    Advance,
    ConfirmPickup,
    ReportNoShow(String),
    Reset,
}

impl fmt::Display for RideCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RideCommand::OfferRide => f.write_str("offer_ride"),
            RideCommand::Advance => f.write_str("advance"),
            RideCommand::ConfirmPickup => f.write_str("confirm_pickup"),
            RideCommand::ReportNoShow(id) => write!(f, "report_no_show({id})"),
            RideCommand::Reset => f.write_str("reset"),
        }
    }
}

/// The step the dispatch schedule is reacting to. Inserted by the runner before each run.
#[derive(Debug, Clone, PartialEq, Resource)]
pub enum CurrentStep {
    /// An accepted edge of the transition table.
    Transition {
        command: RideCommand,
        from: RideEvent,
        to: RideEvent,
    },
    /// Tick `tick` (1-based) of the timed leg the state is currently in.
    ProgressTick { tick: u32 },
}

impl CurrentStep {
    pub fn target(&self) -> Option<RideEvent> {
        match self {
            CurrentStep::Transition { to, .. } => Some(*to),
            CurrentStep::ProgressTick { .. } => None,
        }
    }

    pub fn command(&self) -> Option<&RideCommand> {
        match self {
            CurrentStep::Transition { command, .. } => Some(command),
            CurrentStep::ProgressTick { .. } => None,
        }
    }
}
