use std::sync::{Arc, Barrier};
use std::thread;

use crossbeam_channel::{unbounded, Receiver};

use controller::modules::dispatch::DispatchController;
use shared_resources::config::{ElevatorConfig, TimingConfig};
use shared_resources::direction::Direction;
use shared_resources::elevator_state::ElevatorState;
use shared_resources::elevator_status::ElevatorStatus;
use shared_resources::error::DispatchError;
use shared_resources::event::ElevatorEvent;

fn building(num_elevators: u8, timing: TimingConfig) -> (DispatchController, Receiver<ElevatorEvent>) {
    let (event_tx, event_rx) = unbounded();
    let controller = DispatchController::new(
        ElevatorConfig { num_elevators: num_elevators, num_floors: 10 },
        timing,
        event_tx,
    );
    (controller, event_rx)
}

fn fast() -> TimingConfig {
    TimingConfig::from_millis(30, 60)
}

fn events_of(events: &[ElevatorEvent], elevator: u8) -> Vec<ElevatorEvent> {
    events.iter().copied().filter(|event| event.elevator() == elevator).collect()
}

#[test]
fn tie_goes_to_lowest_id_and_journey_completes() {
    let (controller, event_rx) = building(2, fast());

    let assignment = controller.request(5, Direction::Up).unwrap();
    assert_eq!(assignment.elevator, 1);
    assert_eq!(controller.status()[0].state, ElevatorState::MovingUp);
    assignment.journey.join().unwrap();

    assert_eq!(controller.status(), vec![
        ElevatorStatus { id: 1, floor: 5, state: ElevatorState::Idle },
        ElevatorStatus { id: 2, floor: 1, state: ElevatorState::Idle },
    ]);
    let events: Vec<ElevatorEvent> = event_rx.try_iter().collect();
    assert_eq!(events.first(), Some(&ElevatorEvent::JourneyStarted {
        elevator: 1, from: 1, to: 5, direction: Some(Direction::Up),
    }));
    assert_eq!(events.last(), Some(&ElevatorEvent::DoorsClosing { elevator: 1, floor: 5 }));
    assert!(events_of(&events, 2).is_empty());
}

#[test]
fn busy_elevator_is_skipped() {
    let (controller, event_rx) = building(2, fast());

    let first = controller.request(5, Direction::Up).unwrap();
    let second = controller.request(5, Direction::Up).unwrap();
    assert_eq!(first.elevator, 1);
    assert_eq!(second.elevator, 2);

    first.journey.join().unwrap();
    second.journey.join().unwrap();

    let events: Vec<ElevatorEvent> = event_rx.try_iter().collect();
    for elevator in [1, 2] {
        let floors: Vec<u8> = events_of(&events, elevator).iter().filter_map(|event| match event {
            ElevatorEvent::FloorReached { floor, .. } => Some(*floor),
            _ => None,
        }).collect();
        assert_eq!(floors, vec![2, 3, 4, 5]);
    }
    assert!(controller.status().iter().all(|status| status.floor == 5 && status.state.is_idle()));
}

#[test]
fn all_busy_rejects_without_side_effects() {
    let (controller, event_rx) = building(2, TimingConfig::from_millis(200, 200));

    let first = controller.request(5, Direction::Up).unwrap();
    let second = controller.request(7, Direction::Up).unwrap();
    let started = event_rx.try_iter().count();

    assert_eq!(controller.request(3, Direction::Down).unwrap_err(), DispatchError::NoUnitsAvailable);
    let states: Vec<ElevatorState> = controller.status().iter().map(|status| status.state).collect();
    assert_eq!(states, vec![ElevatorState::MovingUp, ElevatorState::MovingUp]);
    assert_eq!(started, 2);
    assert!(event_rx.try_iter().all(|event| !matches!(event, ElevatorEvent::JourneyStarted { .. })));

    first.journey.join().unwrap();
    second.journey.join().unwrap();
}

#[test]
fn call_at_current_floor_only_cycles_doors() {
    let (controller, event_rx) = building(2, fast());

    let assignment = controller.request(1, Direction::Up).unwrap();
    assert_eq!(assignment.elevator, 1);
    assert_eq!(controller.status()[0], ElevatorStatus { id: 1, floor: 1, state: ElevatorState::DoorsOpen });
    assignment.journey.join().unwrap();

    assert_eq!(controller.status()[0], ElevatorStatus { id: 1, floor: 1, state: ElevatorState::Idle });
    let events: Vec<ElevatorEvent> = event_rx.try_iter().collect();
    assert_eq!(events, vec![
        ElevatorEvent::JourneyStarted { elevator: 1, from: 1, to: 1, direction: None },
        ElevatorEvent::DoorsOpening { elevator: 1, floor: 1 },
        ElevatorEvent::DoorsClosing { elevator: 1, floor: 1 },
    ]);
}

#[test]
fn floor_outside_building_is_rejected() {
    let (controller, event_rx) = building(2, fast());
    let before = controller.status();

    assert_eq!(
        controller.request(15, Direction::Up).unwrap_err(),
        DispatchError::InvalidFloor { floor: 15, num_floors: 10 },
    );
    assert_eq!(
        controller.request(0, Direction::Down).unwrap_err(),
        DispatchError::InvalidFloor { floor: 0, num_floors: 10 },
    );
    assert_eq!(controller.status(), before);
    assert_eq!(event_rx.try_iter().count(), 0);
}

#[test]
fn nearest_idle_elevator_answers() {
    let (controller, _event_rx) = building(3, fast());

    // spread the fleet out: 1 at floor 9, 2 at floor 4, 3 stays at floor 1
    controller.elevators()[0].request_journey(9).unwrap().join().unwrap();
    controller.elevators()[1].request_journey(4).unwrap().join().unwrap();

    let assignment = controller.request(6, Direction::Down).unwrap();
    assert_eq!(assignment.elevator, 2);
    assignment.journey.join().unwrap();

    let assignment = controller.request(2, Direction::Up).unwrap();
    assert_eq!(assignment.elevator, 3);
    assignment.journey.join().unwrap();
}

#[test]
fn elevators_travel_independently() {
    let (controller, event_rx) = building(2, TimingConfig::from_millis(50, 50));

    let first = controller.request(5, Direction::Up).unwrap();
    let second = controller.request(5, Direction::Up).unwrap();
    first.journey.join().unwrap();
    second.journey.join().unwrap();

    // the second car is already moving while the first is still on its way
    let events: Vec<ElevatorEvent> = event_rx.try_iter().collect();
    let second_moved = events
        .iter()
        .position(|event| *event == ElevatorEvent::FloorReached { elevator: 2, floor: 2 })
        .unwrap();
    let first_arrived = events
        .iter()
        .position(|event| *event == ElevatorEvent::DoorsOpening { elevator: 1, floor: 5 })
        .unwrap();
    assert!(second_moved < first_arrived, "journeys were serialised: {:?}", events);
}

#[test]
fn open_doors_count_as_busy() {
    let (controller, event_rx) = building(1, TimingConfig::from_millis(10, 300));

    let assignment = controller.request(1, Direction::Up).unwrap();
    let before = controller.status();

    assert_eq!(before, vec![ElevatorStatus { id: 1, floor: 1, state: ElevatorState::DoorsOpen }]);
    assert_eq!(controller.request(3, Direction::Up).unwrap_err(), DispatchError::NoUnitsAvailable);
    assert_eq!(controller.status(), before);
    assignment.journey.join().unwrap();

    let started = event_rx.try_iter().filter(|event| matches!(event, ElevatorEvent::JourneyStarted { .. })).count();
    assert_eq!(started, 1);
}

#[test]
fn racing_requests_for_one_elevator_accept_once() {
    let (controller, _event_rx) = building(1, TimingConfig::from_millis(100, 100));
    let controller = Arc::new(controller);
    let barrier = Arc::new(Barrier::new(2));

    let handles: Vec<_> = (0..2).map(|_| {
        let controller = Arc::clone(&controller);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            controller.request(4, Direction::Up)
        })
    }).collect();
    let results: Vec<_> = handles.into_iter().map(|handle| handle.join().unwrap()).collect();

    let accepted: Vec<_> = results.iter().filter(|result| result.is_ok()).collect();
    assert_eq!(accepted.len(), 1);
    for result in &results {
        if let Err(e) = result {
            assert!(matches!(e, DispatchError::NoUnitsAvailable | DispatchError::UnitBusy { .. }));
        }
    }
    for result in results {
        if let Ok(assignment) = result {
            assignment.journey.join().unwrap();
        }
    }
}

#[test]
fn racing_journeys_on_one_elevator_start_once() {
    let (controller, event_rx) = building(1, TimingConfig::from_millis(100, 100));
    let elevator = Arc::clone(&controller.elevators()[0]);
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (2..10u8).map(|floor| {
        let elevator = Arc::clone(&elevator);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            elevator.request_journey(floor)
        })
    }).collect();

    let mut journeys = Vec::new();
    let mut busy = 0;
    for handle in handles {
        match handle.join().unwrap() {
            Ok(journey) => journeys.push(journey),
            Err(DispatchError::UnitBusy { elevator: 1, .. }) => busy += 1,
            Err(e) => panic!("unexpected rejection: {}", e),
        }
    }
    assert_eq!(journeys.len(), 1);
    assert_eq!(busy, 7);
    for journey in journeys {
        journey.join().unwrap();
    }

    let started = event_rx.try_iter().filter(|event| matches!(event, ElevatorEvent::JourneyStarted { .. })).count();
    assert_eq!(started, 1);
}

#[test]
fn status_is_readable_while_moving() {
    let (controller, _event_rx) = building(2, fast());
    let assignment = controller.request(10, Direction::Up).unwrap();

    while !assignment.journey.is_finished() {
        for status in controller.status() {
            assert!((1..=10).contains(&status.floor));
        }
    }
    assignment.journey.join().unwrap();
    assert_eq!(controller.status(), controller.status());
}
