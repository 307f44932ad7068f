use shared_resources::direction::Direction;
use shared_resources::error::CommandError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Request { floor: i64, direction: Direction },
    Status,
    StatusJson,
    Help,
    Quit,
    Empty,
}

impl Command {
    /// Parses one line typed at the prompt. The floor is not range checked
    /// here, that needs the building.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.to_lowercase();
        let words: Vec<&str> = line.split_whitespace().collect();

        match words.as_slice() {
            [] => Ok(Command::Empty),
            ["request", args @ ..] => parse_request(args),
            ["status"] => Ok(Command::Status),
            ["status", "json"] => Ok(Command::StatusJson),
            ["help"] => Ok(Command::Help),
            ["quit"] | ["exit"] => Ok(Command::Quit),
            _ => Err(CommandError::UnknownCommand(line.trim().to_string())),
        }
    }
}

fn parse_request(args: &[&str]) -> Result<Command, CommandError> {
    let (floor, direction) = match args {
        [floor, direction] => (floor, direction),
        _ => return Err(CommandError::Malformed(format!("expected 2 arguments, got {}", args.len()))),
    };
    let floor = floor
        .parse::<i64>()
        .map_err(|_| CommandError::Malformed(format!("'{}' is not a floor number", floor)))?;
    let direction = direction.parse::<Direction>()?;
    Ok(Command::Request { floor: floor, direction: direction })
}
