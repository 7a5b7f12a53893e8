//! State management for the Dream Story client.
//!
//! Contains resource types and Bevy components used throughout the client.

use std::time::Duration;

use bevy::prelude::*;
use dreamstory_logic::config::{GameConfig, SituationMatching};
use dreamstory_logic::session::GameSession;

use crate::theme::Theme;

// ============================================================================
// RESOURCES
// ============================================================================

/// Command-line options.
#[derive(Debug, Default)]
pub struct ClientConfig {
    pub config_path: Option<String>,
    pub speed: Option<u32>,
    pub exact_situations: bool,
    pub light: bool,
}

impl ClientConfig {
    pub fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut config = Self::default();
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" if i + 1 < args.len() => {
                    config.config_path = Some(args[i + 1].clone());
                    i += 2;
                }
                "--speed" if i + 1 < args.len() => {
                    config.speed = args[i + 1].parse().ok();
                    i += 2;
                }
                "--exact-situations" => {
                    config.exact_situations = true;
                    i += 1;
                }
                "--light" => {
                    config.light = true;
                    i += 1;
                }
                _ => i += 1,
            }
        }
        config
    }

    pub fn theme(&self) -> Theme {
        if self.light {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    /// Resolve the game config: file (if any), then command-line overrides.
    /// Unreadable or invalid files fall back to the defaults.
    pub fn game_config(&self) -> GameConfig {
        let mut config = match &self.config_path {
            Some(path) => match std::fs::read_to_string(path) {
                Ok(json) => match GameConfig::from_json(&json) {
                    Ok(c) => {
                        info!("Loaded game config from {}", path);
                        c
                    }
                    Err(e) => {
                        warn!("Config {} rejected ({}), using defaults", path, e);
                        GameConfig::default()
                    }
                },
                Err(e) => {
                    warn!("Cannot read config {} ({}), using defaults", path, e);
                    GameConfig::default()
                }
            },
            None => GameConfig::default(),
        };

        if let Some(speed) = self.speed {
            if config.allows_speed(speed) {
                config.start_speed = speed;
            } else {
                warn!(
                    "Ignoring --speed {}: options are {:?}",
                    speed, config.speed_options
                );
            }
        }
        if self.exact_situations {
            config.situation_matching = SituationMatching::Exact;
        }
        config
    }
}

#[derive(Resource)]
pub struct Session(pub GameSession);

/// Wall-clock driver for simulation ticks.
#[derive(Resource)]
pub struct TickTimer(pub Timer);

impl TickTimer {
    pub fn from_millis(ms: u64) -> Self {
        Self(Timer::new(Duration::from_millis(ms), TimerMode::Repeating))
    }
}

/// Invoked when the player navigates back, right before the app exits.
#[derive(Resource)]
pub struct OnBack(pub Box<dyn Fn() + Send + Sync>);

/// Session revision the current UI tree was built from.
#[derive(Resource, Default)]
pub struct RenderedRevision(pub Option<u64>);

// ============================================================================
// COMPONENTS
// ============================================================================

/// Root node of the screen; despawned and rebuilt on every revision.
#[derive(Component)]
pub struct UiRoot;

#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    Room(String),
    Activity(String),
    Speed(u32),
    TogglePlay,
    Reset,
    Accept,
    Decline,
    Continue,
    ToggleTheme,
    Back,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_override() {
        let client = ClientConfig {
            speed: Some(4),
            ..default()
        };
        assert_eq!(client.game_config().start_speed, 4);
    }

    #[test]
    fn test_invalid_speed_ignored() {
        let client = ClientConfig {
            speed: Some(3),
            ..default()
        };
        assert_eq!(client.game_config().start_speed, 1);
    }

    #[test]
    fn test_exact_flag() {
        let client = ClientConfig {
            exact_situations: true,
            ..default()
        };
        assert_eq!(
            client.game_config().situation_matching,
            SituationMatching::Exact
        );
    }

    #[test]
    fn test_light_flag() {
        assert_eq!(ClientConfig::default().theme(), Theme::Dark);
        let client = ClientConfig {
            light: true,
            ..default()
        };
        assert_eq!(client.theme(), Theme::Light);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let client = ClientConfig {
            config_path: Some("/nonexistent/dreamstory.json".into()),
            ..default()
        };
        assert_eq!(client.game_config(), GameConfig::default());
    }
}
