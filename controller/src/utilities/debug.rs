/// ----- DEBUG MODULE -----
/// Renders everything the operator sees: the status table, journey events
/// and the outcome of each command.

use std::io::Write;

use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::{queue, Result};

use shared_resources::direction::Direction;
use shared_resources::elevator_state::ElevatorState;
use shared_resources::elevator_status::ElevatorStatus;
use shared_resources::error::{CommandError, DispatchError};
use shared_resources::event::ElevatorEvent;

const ROW_SEPARATOR: &str = "+------------+------------+--------------+";

pub struct Debug<W: Write> {
    out: W,
}

impl<W: Write> Debug<W> {
    pub fn new(out: W) -> Self {
        Debug { out: out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn printbanner(&mut self) -> Result<()> {
        writeln!(self.out, "\n=== Elevator Management System - Simulation ===")?;
        self.printhelp()
    }

    pub fn printhelp(&mut self) -> Result<()> {
        writeln!(self.out, "\nCommands:")?;
        writeln!(self.out, "  request <floor> <up/down>  -> Call an elevator to that floor")?;
        writeln!(self.out, "  status [json]              -> Show elevator positions and states")?;
        writeln!(self.out, "  help                       -> Show this list")?;
        writeln!(self.out, "  quit                       -> Exit simulation")?;
        self.out.flush()
    }

    pub fn printstatus(&mut self, statuses: &[ElevatorStatus]) -> Result<()> {
        writeln!(self.out, "{}", ROW_SEPARATOR)?;
        writeln!(self.out, "| {0:<38} |", "ELEVATOR STATUS")?;
        writeln!(self.out, "{}", ROW_SEPARATOR)?;
        writeln!(self.out, "| {0:<10} | {1:<10} | {2:<12} |", "ELEVATOR", "FLOOR", "STATE")?;
        writeln!(self.out, "{}", ROW_SEPARATOR)?;
        for status in statuses {
            write!(self.out, "| {0:<10} | {1:<10} | ", status.id, status.floor)?;
            queue!(
                self.out,
                SetForegroundColor(state_color(status.state)),
                Print(format!("{:<12}", status.state.as_string())),
                ResetColor
            )?;
            writeln!(self.out, " |")?;
        }
        writeln!(self.out, "{}", ROW_SEPARATOR)?;
        self.out.flush()
    }

    pub fn printjson(&mut self, statuses: &[ElevatorStatus]) -> Result<()> {
        let json = serde_json::to_string_pretty(statuses)?;
        writeln!(self.out, "{}", json)?;
        self.out.flush()
    }

    pub fn printevent(&mut self, event: &ElevatorEvent) -> Result<()> {
        let (color, line) = match *event {
            ElevatorEvent::JourneyStarted { elevator, from, to, direction: Some(direction) } => (
                Color::Cyan,
                format!("Elevator {} starting from floor {} to {} {}", elevator, from, to, direction.symbol()),
            ),
            ElevatorEvent::JourneyStarted { elevator, to, direction: None, .. } => (
                Color::Cyan,
                format!("Elevator {} already at floor {}", elevator, to),
            ),
            ElevatorEvent::FloorReached { elevator, floor } => (
                Color::Reset,
                format!("Elevator {} at floor {}...", elevator, floor),
            ),
            ElevatorEvent::DoorsOpening { elevator, floor } => (
                Color::Green,
                format!("Elevator {} doors opening at floor {}", elevator, floor),
            ),
            ElevatorEvent::DoorsClosing { elevator, floor } => (
                Color::Yellow,
                format!("Elevator {} doors closing at floor {}", elevator, floor),
            ),
        };
        self.printcolored(color, &line)
    }

    pub fn printassignment(&mut self, elevator: u8, floor: u8, direction: Direction) -> Result<()> {
        writeln!(self.out, "\n[Controller] Assigning Elevator {} to floor {} ({})", elevator, floor, direction)?;
        self.out.flush()
    }

    pub fn printdispatcherror(&mut self, error: &DispatchError) -> Result<()> {
        let line = match error {
            DispatchError::NoUnitsAvailable => String::from("All elevators are busy. Please wait..."),
            DispatchError::InvalidFloor { num_floors, .. } => {
                format!("Invalid floor number. Choose between 1 and {}.", num_floors)
            },
            DispatchError::UnitBusy { .. } | DispatchError::JourneyNotStarted { .. } => {
                format!("{}, request dropped. Please try again.", capitalized(error))
            },
        };
        self.printcolored(Color::Red, &line)
    }

    pub fn printcommanderror(&mut self, error: &CommandError) -> Result<()> {
        let line = match error {
            CommandError::Malformed(_) => capitalized(error),
            CommandError::UnknownCommand(_) => {
                String::from("Unknown command. Use: request <floor> <up/down>, status, help, quit")
            },
        };
        self.printcolored(Color::Red, &line)
    }

    pub fn printline(&mut self, line: &str) -> Result<()> {
        writeln!(self.out, "{}", line)?;
        self.out.flush()
    }

    fn printcolored(&mut self, color: Color, line: &str) -> Result<()> {
        queue!(self.out, SetForegroundColor(color), Print(line), ResetColor, Print("\n"))?;
        self.out.flush()
    }
}

fn state_color(state: ElevatorState) -> Color {
    match state {
        ElevatorState::Idle => Color::Green,
        ElevatorState::MovingUp | ElevatorState::MovingDown => Color::Cyan,
        ElevatorState::DoorsOpen => Color::Yellow,
    }
}

fn capitalized(error: &dyn std::error::Error) -> String {
    let message = error.to_string();
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => message,
    }
}
