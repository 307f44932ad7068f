use std::fmt;
use std::str::FromStr;

use crate::error::CommandError;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Direction of travel from `from` to `to`, `None` when no motion is needed.
    pub fn between(from: u8, to: u8) -> Option<Self> {
        if to > from {
            Some(Direction::Up)
        } else if to < from {
            Some(Direction::Down)
        } else {
            None
        }
    }

    pub fn as_string(self) -> String {
        match self {
            Direction::Up => String::from("up"),
            Direction::Down => String::from("down"),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Direction::Up => '↑',
            Direction::Down => '↓',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl FromStr for Direction {
    type Err = CommandError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(CommandError::Malformed(format!("unknown direction '{}'", token))),
        }
    }
}
