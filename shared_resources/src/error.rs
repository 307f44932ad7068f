use thiserror::Error;

use crate::elevator_state::ElevatorState;

/// Rejections reported by the dispatch core. None of them change any state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("invalid floor {floor}, choose between 1 and {num_floors}")]
    InvalidFloor { floor: i64, num_floors: u8 },

    #[error("all elevators are busy")]
    NoUnitsAvailable,

    #[error("elevator {elevator} is busy ({state})")]
    UnitBusy { elevator: u8, state: ElevatorState },

    #[error("elevator {elevator} could not start its journey: {reason}")]
    JourneyNotStarted { elevator: u8, reason: String },
}

/// Problems with a typed command. These never reach the dispatch core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("invalid request format ({0}), example: request 5 up")]
    Malformed(String),

    #[error("unknown command '{0}'")]
    UnknownCommand(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
