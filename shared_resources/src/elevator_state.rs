use std::fmt;

use crate::direction::Direction;

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum ElevatorState {
    Idle,
    MovingUp,
    MovingDown,
    DoorsOpen,
}

impl ElevatorState {
    pub fn moving(direction: Direction) -> Self {
        match direction {
            Direction::Up => ElevatorState::MovingUp,
            Direction::Down => ElevatorState::MovingDown,
        }
    }

    pub fn is_idle(self) -> bool {
        self == ElevatorState::Idle
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            ElevatorState::MovingUp => Some(Direction::Up),
            ElevatorState::MovingDown => Some(Direction::Down),
            ElevatorState::Idle | ElevatorState::DoorsOpen => None,
        }
    }

    pub fn as_string(self) -> String {
        match self {
            ElevatorState::Idle => String::from("idle"),
            ElevatorState::MovingUp => String::from("moving_up"),
            ElevatorState::MovingDown => String::from("moving_down"),
            ElevatorState::DoorsOpen => String::from("doors_open"),
        }
    }
}

impl fmt::Display for ElevatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}
