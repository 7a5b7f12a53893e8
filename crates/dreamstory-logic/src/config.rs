//! Game configuration: pacing, decay, situation matching, starting state.
//!
//! Every field has a default matching the standard game, so a config file
//! only needs the values it overrides:
//!
//! ```
//! use dreamstory_logic::config::{GameConfig, SituationMatching};
//!
//! let config = GameConfig::from_json(r#"{ "situation_matching": "exact" }"#).unwrap();
//! assert_eq!(config.situation_matching, SituationMatching::Exact);
//! assert_eq!(config.base_step_minutes, 5);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::content::Catalog;
use crate::constants::{decay, factors, speeds, start, time};
use crate::factors::Factors;

/// How the tick engine decides a situation is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SituationMatching {
    /// Fire any untriggered situation whose timestamp was passed since the
    /// last scan. Nothing is skipped at high speed.
    #[default]
    Elapsed,
    /// Fire only on an exact timestamp match. Situations stepped over at
    /// speed > 1 never fire.
    Exact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Wall-clock milliseconds between ticks.
    pub tick_interval_ms: u64,
    /// Simulated minutes per tick at speed 1.
    pub base_step_minutes: u32,
    /// Selectable speed multipliers.
    pub speed_options: Vec<u32>,
    pub decay_interval_minutes: u32,
    pub energy_decay: f32,
    pub sleep_decay: f32,
    pub night_health_decay: f32,
    pub night_start_hour: u32,
    pub night_end_hour: u32,
    pub situation_matching: SituationMatching,
    pub start_clock: Clock,
    pub start_room: String,
    pub start_factors: Factors,
    pub start_speed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: time::TICK_INTERVAL_MS,
            base_step_minutes: time::BASE_STEP_MINUTES,
            speed_options: speeds::ALL.to_vec(),
            decay_interval_minutes: decay::INTERVAL_MINUTES,
            energy_decay: decay::ENERGY,
            sleep_decay: decay::SLEEP,
            night_health_decay: decay::NIGHT_HEALTH,
            night_start_hour: decay::NIGHT_START_HOUR,
            night_end_hour: decay::NIGHT_END_HOUR,
            situation_matching: SituationMatching::default(),
            start_clock: Clock::new(start::DAY, start::HOUR, start::MINUTE),
            start_room: start::ROOM.to_string(),
            start_factors: Factors {
                health: factors::INITIAL_HEALTH,
                sleep: factors::INITIAL_SLEEP,
                energy: factors::INITIAL_ENERGY,
                productivity: factors::INITIAL_PRODUCTIVITY,
                social: factors::INITIAL_SOCIAL,
            },
            start_speed: speeds::NORMAL,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        let errors = validate_config(&config);
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    /// Simulated minutes advanced by one tick at `speed`.
    pub fn step_minutes(&self, speed: u32) -> u32 {
        self.base_step_minutes.saturating_mul(speed)
    }

    pub fn is_night(&self, hour: u32) -> bool {
        hour >= self.night_start_hour || hour <= self.night_end_hour
    }

    pub fn allows_speed(&self, speed: u32) -> bool {
        self.speed_options.contains(&speed)
    }
}

/// Validate config values. Returns a list of problems (empty = valid).
pub fn validate_config(config: &GameConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if config.tick_interval_ms == 0 {
        errors.push("tick_interval_ms must be positive".into());
    }
    if config.base_step_minutes == 0 {
        errors.push("base_step_minutes must be positive".into());
    }
    if config.speed_options.is_empty() {
        errors.push("speed_options must not be empty".into());
    }
    if config.speed_options.contains(&0) {
        errors.push("speed_options must not contain 0".into());
    }
    if let Some(&fastest) = config.speed_options.iter().max() {
        match config.base_step_minutes.checked_mul(fastest) {
            Some(step) if step <= time::MAX_STEP_MINUTES => {}
            _ => errors.push(format!(
                "base_step_minutes {} at speed {} exceeds {} minutes per tick",
                config.base_step_minutes,
                fastest,
                time::MAX_STEP_MINUTES
            )),
        }
    }
    if !config.allows_speed(config.start_speed) {
        errors.push(format!(
            "start_speed {} is not one of {:?}",
            config.start_speed, config.speed_options
        ));
    }
    if config.decay_interval_minutes == 0 {
        errors.push("decay_interval_minutes must be positive".into());
    }
    if config.energy_decay < 0.0 || config.sleep_decay < 0.0 || config.night_health_decay < 0.0 {
        errors.push("decay amounts must not be negative".into());
    }
    if config.night_start_hour >= time::HOURS_PER_DAY || config.night_end_hour >= time::HOURS_PER_DAY
    {
        errors.push("night window hours must be within 0-23".into());
    }
    if !config.start_clock.is_valid() {
        errors.push(format!("start_clock {:?} is not a valid time", config.start_clock));
    }
    if !config.start_factors.all_in_range() {
        errors.push("start_factors must be within 0-100".into());
    }
    if config.start_room.trim().is_empty() {
        errors.push("start_room must not be empty".into());
    }

    errors
}

/// Check the config against loaded content. Returns a list of problems.
pub fn validate_config_against(config: &GameConfig, catalog: &Catalog) -> Vec<String> {
    let mut errors = Vec::new();
    if catalog.room(&config.start_room).is_none() {
        errors.push(format!("start_room '{}' is not a known room", config.start_room));
    }
    errors
}

/// Errors from loading a config file.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(Vec<String>),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "config parse error: {}", e),
            ConfigError::Invalid(errors) => write!(f, "invalid config: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&GameConfig::default()).is_empty());
    }

    #[test]
    fn test_default_pacing() {
        let c = GameConfig::default();
        assert_eq!(c.tick_interval_ms, 1000);
        assert_eq!(c.step_minutes(1), 5);
        assert_eq!(c.step_minutes(4), 20);
        assert_eq!(c.speed_options, vec![1, 2, 4]);
        assert_eq!(c.start_clock, Clock::new(1, 6, 0));
        assert_eq!(c.start_room, "bedroom");
        assert_eq!(c.start_factors.health, 70.0);
        assert_eq!(c.start_factors.social, 30.0);
    }

    #[test]
    fn test_night_window() {
        let c = GameConfig::default();
        assert!(c.is_night(22));
        assert!(c.is_night(23));
        assert!(c.is_night(0));
        assert!(c.is_night(6));
        assert!(!c.is_night(7));
        assert!(!c.is_night(21));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let c = GameConfig::from_json(r#"{ "base_step_minutes": 10 }"#).unwrap();
        assert_eq!(c.base_step_minutes, 10);
        assert_eq!(c.tick_interval_ms, 1000);
        assert_eq!(c.situation_matching, SituationMatching::Elapsed);
    }

    #[test]
    fn test_invalid_speed_rejected() {
        let err = GameConfig::from_json(r#"{ "speed_options": [2, 4], "start_speed": 1 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let err = GameConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_collects_all_problems() {
        let config = GameConfig {
            tick_interval_ms: 0,
            base_step_minutes: 0,
            start_clock: Clock::new(1, 25, 0),
            ..GameConfig::default()
        };
        assert_eq!(validate_config(&config).len(), 3);
    }

    #[test]
    fn test_step_overflow_rejected() {
        let err = GameConfig::from_json(r#"{ "base_step_minutes": 2000000000 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        // One day per tick at 4x is the limit.
        assert!(GameConfig::from_json(r#"{ "base_step_minutes": 360 }"#).is_ok());
        assert!(GameConfig::from_json(r#"{ "base_step_minutes": 361 }"#).is_err());
    }

    #[test]
    fn test_step_minutes_saturates() {
        let c = GameConfig {
            base_step_minutes: u32::MAX,
            ..GameConfig::default()
        };
        assert_eq!(c.step_minutes(4), u32::MAX);
    }

    #[test]
    fn test_unknown_start_room() {
        let catalog = Catalog::builtin().unwrap();
        assert!(validate_config_against(&GameConfig::default(), &catalog).is_empty());
        let c = GameConfig {
            start_room: "attic".into(),
            ..GameConfig::default()
        };
        let problems = validate_config_against(&c, &catalog);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("attic"));
    }
}
