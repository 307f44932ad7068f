use std::error::Error;
use std::io::{self, BufReader};

use crossbeam_channel::{select, unbounded};
use tracing::{info, trace};

use shared_resources::config::SimulatorConfig;
use shared_resources::direction::Direction;

use crate::utilities::command::Command;
use crate::utilities::debug::Debug;
use crate::utilities::logging;

pub mod dispatch;
pub mod elevator;
pub mod input;

use dispatch::DispatchController;

pub fn run() -> Result<(), Box<dyn Error>> {
    logging::init();

    // READ CONFIGURATION
    let config = SimulatorConfig::get()?
        .fill_missing(&mut io::stdin().lock(), &mut io::stdout())?
        .validate()?;
    info!(
        elevators = config.elevator.num_elevators,
        floors = config.elevator.num_floors,
        "configuration loaded"
    );

    // INITIALIZE FLEET
    let (event_tx, event_rx) = unbounded();
    let controller = DispatchController::new(config.elevator, config.timing, event_tx);

    // INITIALIZE INPUT MODULE
    let command_rx = input::init(BufReader::new(io::stdin()))?;

    let mut debug = Debug::new(io::stdout());
    debug.printbanner()?;

    loop {
        select! {
            recv(event_rx) -> msg => {
                if let Ok(event) = msg {
                    trace!(elevator = event.elevator(), ?event, "elevator event");
                    debug.printevent(&event)?;
                }
            },
            recv(command_rx) -> msg => {
                match msg.unwrap_or(Ok(Command::Quit)) {
                    Ok(Command::Request { floor, direction }) => {
                        handle_request(&controller, &mut debug, floor, direction)?;
                    },
                    Ok(Command::Status) => debug.printstatus(&controller.status())?,
                    Ok(Command::StatusJson) => debug.printjson(&controller.status())?,
                    Ok(Command::Help) => debug.printhelp()?,
                    Ok(Command::Empty) => (),
                    Ok(Command::Quit) => {
                        debug.printline("Shutting down system...")?;
                        return Ok(())
                    },
                    Err(e) => debug.printcommanderror(&e)?,
                }
            },
        }
    }
}

fn handle_request<W: io::Write>(
    controller: &DispatchController,
    debug: &mut Debug<W>,
    floor: i64,
    direction: Direction,
) -> io::Result<()> {
    let result = controller
        .validate_floor(floor)
        .and_then(|floor| controller.request(floor, direction));

    match result {
        // the journey keeps running on its own thread
        Ok(assignment) => debug.printassignment(assignment.elevator, assignment.floor, assignment.direction),
        Err(e) => debug.printdispatcherror(&e),
    }
}
