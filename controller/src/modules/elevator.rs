/// ----- ELEVATOR MODULE -----
/// One simulated elevator car. It owns its floor and state, accepts at most
/// one journey at a time and runs every accepted journey on its own thread,
/// publishing progress as events. It knows nothing about the other cars.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{after, tick, Sender};
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use shared_resources::config::TimingConfig;
use shared_resources::direction::Direction;
use shared_resources::elevator_state::ElevatorState;
use shared_resources::elevator_status::ElevatorStatus;
use shared_resources::error::DispatchError;
use shared_resources::event::ElevatorEvent;

#[derive(Debug)]
struct Position {
    floor: u8,
    state: ElevatorState,
}

#[derive(Debug)]
pub struct Elevator {
    id: u8,
    num_floors: u8,
    timing: TimingConfig,
    // floor and state only ever change together under this lock
    position: Mutex<Position>,
    event_tx: Sender<ElevatorEvent>,
}

impl Elevator {
    /// A new car rests idle at the ground floor.
    pub fn new(id: u8, num_floors: u8, timing: TimingConfig, event_tx: Sender<ElevatorEvent>) -> Self {
        Elevator {
            id: id,
            num_floors: num_floors,
            timing: timing,
            position: Mutex::new(Position { floor: 1, state: ElevatorState::Idle }),
            event_tx: event_tx,
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn snapshot(&self) -> ElevatorStatus {
        let position = self.position.lock();
        ElevatorStatus {
            id: self.id,
            floor: position.floor,
            state: position.state,
        }
    }

    /// Floors between this car and `floor`. Only used for ranking.
    pub fn distance_to(&self, floor: u8) -> u8 {
        self.snapshot().distance_to(floor)
    }

    /// Accepts a journey to `target` if the car is idle and starts it on a
    /// new thread. The returned handle finishes once the doors have closed.
    ///
    /// `target` must already be a floor of the building.
    pub fn request_journey(self: &Arc<Self>, target: u8) -> Result<JoinHandle<()>, DispatchError> {
        debug_assert!((1..=self.num_floors).contains(&target), "floor {} outside building", target);
        self.accept(target)?;

        let elevator = Arc::clone(self);
        let spawned = thread::Builder::new()
            .name(format!("elevator_{}_journey", self.id))
            .spawn(move || elevator.run_journey(target));

        match spawned {
            Ok(journey) => Ok(journey),
            Err(e) => {
                self.release();
                Err(DispatchError::JourneyNotStarted { elevator: self.id, reason: e.to_string() })
            },
        }
    }

    /// Hands an accepted journey back before any motion happened.
    fn release(&self) {
        let mut position = self.position.lock();
        warn!(elevator = self.id, state = %position.state, floor = position.floor, "journey abandoned");
        position.state = ElevatorState::Idle;
    }

    fn accept(&self, target: u8) -> Result<(), DispatchError> {
        let mut position = self.position.lock();
        if !position.state.is_idle() {
            debug!(elevator = self.id, state = %position.state, to = target, "journey rejected");
            return Err(DispatchError::UnitBusy { elevator: self.id, state: position.state });
        }

        let from = position.floor;
        let direction = Direction::between(from, target);
        position.state = match direction {
            Some(direction) => ElevatorState::moving(direction),
            None => ElevatorState::DoorsOpen,
        };
        drop(position);

        debug!(elevator = self.id, from, to = target, "journey accepted");
        self.emit(ElevatorEvent::JourneyStarted {
            elevator: self.id,
            from: from,
            to: target,
            direction: direction,
        });
        Ok(())
    }

    fn run_journey(&self, target: u8) {
        let timer = tick(self.timing.floor_travel);

        loop {
            let state = self.position.lock().state;
            let direction = match state.direction() {
                Some(direction) => direction,
                None => break,
            };
            let _ = timer.recv();
            let floor = self.step(direction, target);
            self.emit(ElevatorEvent::FloorReached { elevator: self.id, floor: floor });
        }

        self.open_doors();
    }

    fn step(&self, direction: Direction, target: u8) -> u8 {
        let mut position = self.position.lock();
        position.floor = match direction {
            Direction::Up => position.floor + 1,
            Direction::Down => position.floor - 1,
        };
        if position.floor == target {
            position.state = ElevatorState::DoorsOpen;
        }
        position.floor
    }

    fn open_doors(&self) {
        let floor = self.position.lock().floor;
        self.emit(ElevatorEvent::DoorsOpening { elevator: self.id, floor: floor });

        let _ = after(self.timing.door_open).recv();

        // sent under the lock so the next journey's start is always reported after it
        let mut position = self.position.lock();
        position.state = ElevatorState::Idle;
        self.emit(ElevatorEvent::DoorsClosing { elevator: self.id, floor: position.floor });
    }

    fn emit(&self, event: ElevatorEvent) {
        if self.event_tx.send(event).is_err() {
            trace!(elevator = self.id, ?event, "no listener for elevator events");
        }
    }
}
