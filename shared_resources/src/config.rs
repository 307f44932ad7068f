use std::fs;
use std::collections::HashMap;
use std::env;
use std::io::{BufRead, ErrorKind, Write};
use std::time::Duration;

use crate::error::ConfigError;

const CONFIG_FILE_PATH: &str = "config.json";
const FALLBACK_CONFIG_FILE_PATH: &str = "_config.json";

const DEFAULT_FLOOR_TRAVEL_MS: u64 = 1000;
const DEFAULT_DOOR_OPEN_MS: u64 = 2000;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub elevator: HashMap<String, u8>,
    #[serde(default)]
    pub timing: HashMap<String, u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElevatorConfig {
    pub num_elevators: u8,
    pub num_floors: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    pub floor_travel: Duration,
    pub door_open: Duration,
}

impl TimingConfig {
    pub fn from_millis(floor_travel_ms: u64, door_open_ms: u64) -> Self {
        TimingConfig {
            floor_travel: Duration::from_millis(floor_travel_ms),
            door_open: Duration::from_millis(door_open_ms),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig::from_millis(DEFAULT_FLOOR_TRAVEL_MS, DEFAULT_DOOR_OPEN_MS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatorConfig {
    pub elevator: ElevatorConfig,
    pub timing: TimingConfig,
}

impl SimulatorConfig {
    /// Reads the configuration file and applies command line overrides.
    /// Counts may still be zero afterwards, see [`SimulatorConfig::fill_missing`].
    pub fn get() -> Result<Self, ConfigError> {
        let config_file = read_config_file()?;
        let args: Vec<String> = env::args().collect();
        Ok(SimulatorConfig::from_parts(&config_file, &args))
    }

    pub fn from_parts(config_file: &ConfigFile, args: &[String]) -> Self {
        let from_file = ElevatorConfig {
            num_elevators: config_file.elevator.get("numElevators").copied().unwrap_or(0),
            num_floors: config_file.elevator.get("numFloors").copied().unwrap_or(0),
        };
        let timing = TimingConfig::from_millis(
            config_file.timing.get("floorTravelMs").copied().unwrap_or(DEFAULT_FLOOR_TRAVEL_MS),
            config_file.timing.get("doorOpenMs").copied().unwrap_or(DEFAULT_DOOR_OPEN_MS),
        );

        SimulatorConfig {
            elevator: parse_env_args(args, from_file),
            timing: timing,
        }
    }

    /// Asks for any count that neither the file nor the arguments provided.
    pub fn fill_missing<R: BufRead, W: Write>(mut self, input: &mut R, output: &mut W) -> Result<Self, ConfigError> {
        if self.elevator.num_elevators == 0 {
            self.elevator.num_elevators = prompt_count(input, output, "Enter number of elevators: ")?;
        }
        if self.elevator.num_floors == 0 {
            self.elevator.num_floors = prompt_count(input, output, "Enter number of floors in building: ")?;
        }
        Ok(self)
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.elevator.num_elevators == 0 {
            return Err(ConfigError::Invalid(String::from("number of elevators must be positive")));
        }
        if self.elevator.num_floors == 0 {
            return Err(ConfigError::Invalid(String::from("number of floors must be positive")));
        }
        Ok(self)
    }
}

pub fn parse_config(contents: &str) -> Result<ConfigFile, ConfigError> {
    Ok(serde_json::from_str(contents)?)
}

fn read_config_file() -> Result<ConfigFile, ConfigError> {
    for file_path in [CONFIG_FILE_PATH, FALLBACK_CONFIG_FILE_PATH] {
        match fs::read_to_string(file_path) {
            Ok(contents) => return parse_config(&contents),
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => return Err(e.into()),
        }
    }
    println!("No configuration file provided, using default settings...");
    Ok(ConfigFile::default())
}

fn parse_env_args(args: &[String], defaults: ElevatorConfig) -> ElevatorConfig {
    let mut elevator = defaults;

    for arg_pair in args.rchunks_exact(2) {
        match arg_pair[0].as_str() {
            "--elevators" => {
                elevator.num_elevators = match arg_pair[1].parse::<u8>() {
                    Ok(num) => num,
                    Err(_) => {
                        println!("elevators {} is not a number between 0 and {}, skipping...", arg_pair[1], u8::MAX);
                        elevator.num_elevators
                    },
                };
            },
            "--floors" => {
                elevator.num_floors = match arg_pair[1].parse::<u8>() {
                    Ok(num) => num,
                    Err(_) => {
                        println!("floors {} is not a number between 0 and {}, skipping...", arg_pair[1], u8::MAX);
                        elevator.num_floors
                    },
                };
            },
            _ => {println!("illegal argument {}, skipping...", arg_pair[0]);},
        }
    }
    elevator
}

fn prompt_count<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<u8, ConfigError> {
    loop {
        write!(output, "{}", prompt)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(ConfigError::Invalid(String::from("input closed before configuration was complete")));
        }
        match line.trim().parse::<u8>() {
            Ok(num) if num > 0 => return Ok(num),
            _ => writeln!(output, "Please enter a number between 1 and {}.", u8::MAX)?,
        }
    }
}
