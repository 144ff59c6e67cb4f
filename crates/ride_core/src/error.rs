use thiserror::Error;

use crate::command::RideCommand;
use crate::state::RideEvent;

/// Every lifecycle error is local: the command is dropped and state is left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifecycleError {
    #[error("no transition for {command} from {from:?}")]
    IllegalTransition { from: RideEvent, command: RideCommand },

    #[error("unknown passenger {0}")]
    UnknownPassenger(String),

    #[error("lifecycle configuration error: {0}")]
    Config(String),
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;
