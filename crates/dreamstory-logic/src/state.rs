//! The game session state, the single aggregate every transition replaces.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::config::GameConfig;
use crate::content::Choice;
use crate::factors::Factors;

/// The activity currently being performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveActivity {
    pub id: String,
    /// Simulated minutes spent so far.
    pub progress: u32,
    pub duration: u32,
}

impl ActiveActivity {
    /// Completion fraction in `[0.0, 1.0]`.
    pub fn fraction(&self) -> f32 {
        if self.duration == 0 {
            1.0
        } else {
            (self.progress as f32 / self.duration as f32).min(1.0)
        }
    }
}

/// Modal dialog awaiting player input. While one is pending the clock is
/// paused and only the matching action is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prompt {
    /// A situation is awaiting an accept/decline choice.
    Situation(String),
    /// The outcome narrative is shown until acknowledged.
    Consequence {
        situation_id: String,
        choice: Choice,
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub clock: Clock,
    pub current_room: String,
    pub factors: Factors,
    pub score: i32,
    pub is_playing: bool,
    pub speed: u32,
    /// Every completion is recorded, duplicates included.
    pub completed_activities: Vec<String>,
    pub current_activity: Option<ActiveActivity>,
    pub prompt: Option<Prompt>,
    /// Situations that already fired. Never shrinks within a session.
    pub triggered: BTreeSet<String>,
    /// Exclusive lower bound (absolute minutes) of the next situation scan.
    pub scan_from: u64,
}

impl GameState {
    /// Fresh state at the configured starting point.
    pub fn initial(config: &GameConfig) -> Self {
        Self {
            clock: config.start_clock,
            current_room: config.start_room.clone(),
            factors: config.start_factors,
            score: 0,
            is_playing: false,
            speed: config.start_speed,
            completed_activities: Vec::new(),
            current_activity: None,
            prompt: None,
            triggered: BTreeSet::new(),
            scan_from: config.start_clock.total_minutes(),
        }
    }

    pub fn has_completed(&self, activity_id: &str) -> bool {
        self.completed_activities.iter().any(|a| a == activity_id)
    }

    pub fn is_busy(&self) -> bool {
        self.current_activity.is_some()
    }

    pub fn pending_situation(&self) -> Option<&str> {
        match &self.prompt {
            Some(Prompt::Situation(id)) => Some(id),
            _ => None,
        }
    }

    pub fn pending_consequence(&self) -> Option<&str> {
        match &self.prompt {
            Some(Prompt::Consequence { text, .. }) => Some(text),
            _ => None,
        }
    }
}
