use crate::direction::Direction;

/// Journey progress published by an elevator for whoever is listening.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ElevatorEvent {
    JourneyStarted {
        elevator: u8,
        from: u8,
        to: u8,
        direction: Option<Direction>,
    },
    FloorReached {
        elevator: u8,
        floor: u8,
    },
    DoorsOpening {
        elevator: u8,
        floor: u8,
    },
    DoorsClosing {
        elevator: u8,
        floor: u8,
    },
}

impl ElevatorEvent {
    pub fn elevator(&self) -> u8 {
        match *self {
            ElevatorEvent::JourneyStarted { elevator, .. }
            | ElevatorEvent::FloorReached { elevator, .. }
            | ElevatorEvent::DoorsOpening { elevator, .. }
            | ElevatorEvent::DoorsClosing { elevator, .. } => elevator,
        }
    }
}
