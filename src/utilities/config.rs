use std::fs;
use std::env;
use std::time::Duration;

use log::warn;

use super::error::SimError;

/// Tunables read from the settings file. Every field has a default.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimSettings {
    pub call_probability: f64,
    pub max_passengers: u8,
    pub max_group_size: u8,
    pub generator_period: u64,
    pub floor_travel_time: u64,
    pub door_time: u64,
    pub idle_poll_time: u64,
    pub time_unit_ms: u64,
    pub seed: Option<u64>,
    pub status_board: bool,
}

impl Default for SimSettings {
    fn default() -> Self {
        SimSettings {
            call_probability: 0.15,
            max_passengers: 10,
            max_group_size: 5,
            generator_period: 5,
            floor_travel_time: 5,
            door_time: 2,
            idle_poll_time: 1,
            time_unit_ms: 1000,
            seed: None,
            status_board: false,
        }
    }
}

impl SimSettings {
    pub fn time_unit(&self) -> Duration {
        Duration::from_millis(self.time_unit_ms)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub floors: u16,
    /// Logical request-clock step, advanced once all generators finish a cycle.
    pub call_interval: u64,
    /// Length of the run, in time units.
    pub sim_duration: u64,
    pub settings: SimSettings,
}

impl SimConfig {
    pub fn new(floors: u16, call_interval: u64, sim_duration: u64) -> Self {
        SimConfig {
            floors: floors,
            call_interval: call_interval,
            sim_duration: sim_duration,
            settings: SimSettings::default(),
        }
    }

    pub fn get() -> Result<Self, SimError> {
        let args: Vec<String> = env::args().skip(1).collect();
        let (floors, call_interval, sim_duration) = parse_args(&args)?;
        Ok(SimConfig {
            floors: floors,
            call_interval: call_interval,
            sim_duration: sim_duration,
            settings: read_settings_file()?,
        })
    }
}

fn read_settings_file() -> Result<SimSettings, SimError> {
    let file_path = "config.json";
    let fallback_file_path = "_config.json";
    let contents = match fs::read_to_string(file_path) {
        Ok(content) => content,
        Err(_) => match fs::read_to_string(fallback_file_path) {
            Ok(content) => {
                warn!("No configuration file provided, using default settings file...");
                content
            },
            Err(_) => {
                warn!("No settings file found, using built-in defaults...");
                return Ok(SimSettings::default())
            },
        },
    };
    Ok(serde_json::from_str(&contents)?)
}

/// Parses `floors callInterval simDuration`.
///
/// Values are read permissively: a malformed or negative number becomes 0
/// (with a warning) instead of being rejected.
pub fn parse_args(args: &[String]) -> Result<(u16, u64, u64), SimError> {
    if args.len() != 3 {
        return Err(SimError::Usage)
    }
    let floors = leading_integer(&args[0]);
    let call_interval = leading_integer(&args[1]);
    let sim_duration = leading_integer(&args[2]);
    for (name, raw, value) in [
        ("floors", &args[0], floors),
        ("callInterval", &args[1], call_interval),
        ("simDuration", &args[2], sim_duration),
    ] {
        if value == 0 {
            warn!("{} {:?} reads as 0, the simulation will be degenerate", name, raw);
        }
    }
    let floors = match u16::try_from(floors) {
        Ok(floors) => floors,
        Err(_) => {
            warn!("floors {:?} is more than {}, using {}", args[0], u16::MAX, u16::MAX);
            u16::MAX
        },
    };
    Ok((floors, call_interval, sim_duration))
}

/// Optional whitespace and sign followed by digits; anything else reads as 0.
fn leading_integer(raw: &str) -> u64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    let value = digits[..end]
        .bytes()
        .fold(0u64, |acc, b| acc.saturating_mul(10).saturating_add((b - b'0') as u64));
    if negative { 0 } else { value }
}
