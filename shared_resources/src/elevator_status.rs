use crate::elevator_state::ElevatorState;

/// Point-in-time view of one elevator. Floor and state are always read
/// together, so a status never mixes two steps of a journey.
#[derive(serde::Serialize, serde::Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
pub struct ElevatorStatus {
    pub id: u8,
    pub floor: u8,
    pub state: ElevatorState,
}

impl ElevatorStatus {
    pub fn distance_to(&self, floor: u8) -> u8 {
        self.floor.abs_diff(floor)
    }
}
