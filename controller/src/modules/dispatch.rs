/// ----- DISPATCH MODULE -----
/// Owns the fleet and decides which elevator answers a floor call. The
/// fleet is fixed at construction. A call goes to the nearest idle
/// elevator, lowest id first on ties, and is never queued or retried.

use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::Sender;
use tracing::{debug, info, warn};

use shared_resources::config::{ElevatorConfig, TimingConfig};
use shared_resources::direction::Direction;
use shared_resources::elevator_status::ElevatorStatus;
use shared_resources::error::DispatchError;
use shared_resources::event::ElevatorEvent;

use super::elevator::Elevator;

/// An accepted floor call. Dropping `journey` detaches the journey thread.
#[derive(Debug)]
pub struct Assignment {
    pub elevator: u8,
    pub floor: u8,
    pub direction: Direction,
    pub journey: JoinHandle<()>,
}

pub struct DispatchController {
    elevators: Vec<Arc<Elevator>>,
    num_floors: u8,
}

impl DispatchController {
    pub fn new(config: ElevatorConfig, timing: TimingConfig, event_tx: Sender<ElevatorEvent>) -> Self {
        let elevators = (1..=config.num_elevators)
            .map(|id| Arc::new(Elevator::new(id, config.num_floors, timing, event_tx.clone())))
            .collect();

        DispatchController {
            elevators: elevators,
            num_floors: config.num_floors,
        }
    }

    /// The fleet in ascending id order.
    pub fn elevators(&self) -> &[Arc<Elevator>] {
        &self.elevators
    }

    pub fn validate_floor(&self, floor: i64) -> Result<u8, DispatchError> {
        match u8::try_from(floor) {
            Ok(valid) if (1..=self.num_floors).contains(&valid) => Ok(valid),
            _ => Err(DispatchError::InvalidFloor { floor: floor, num_floors: self.num_floors }),
        }
    }

    /// Sends the nearest idle elevator to `floor` and returns without waiting
    /// for the journey. `direction` is only reported, the elevator derives
    /// its own direction of travel from its position.
    pub fn request(&self, floor: u8, direction: Direction) -> Result<Assignment, DispatchError> {
        let floor = self.validate_floor(i64::from(floor))?;

        let id = match select_nearest(&self.status(), floor) {
            Some(id) => id,
            None => {
                debug!(floor, %direction, "no idle elevator");
                return Err(DispatchError::NoUnitsAvailable);
            },
        };
        let elevator = &self.elevators[usize::from(id - 1)];

        // the elevator may have left idle since the status was read
        match elevator.request_journey(floor) {
            Ok(journey) => {
                info!(elevator = id, floor, %direction, "assigned");
                Ok(Assignment {
                    elevator: id,
                    floor: floor,
                    direction: direction,
                    journey: journey,
                })
            },
            Err(e) => {
                warn!(elevator = id, floor, "request dropped: {}", e);
                Err(e)
            },
        }
    }

    /// Snapshots of every elevator in ascending id order.
    pub fn status(&self) -> Vec<ElevatorStatus> {
        self.elevators.iter().map(|elevator| elevator.snapshot()).collect()
    }
}

/// Id of the idle elevator closest to `floor`, the lowest id among equals.
pub fn select_nearest(statuses: &[ElevatorStatus], floor: u8) -> Option<u8> {
    statuses
        .iter()
        .filter(|status| status.state.is_idle())
        .min_by_key(|status| (status.distance_to(floor), status.id))
        .map(|status| status.id)
}
