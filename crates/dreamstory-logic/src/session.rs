//! Game session: main entry point for driving a playthrough.
//!
//! Owns the catalog, the config, and the current [`GameState`]. Every
//! accepted action replaces the state wholesale and bumps [`revision`],
//! which front-ends compare to decide when to re-render.
//!
//! [`revision`]: GameSession::revision

use crate::config::{validate_config_against, GameConfig};
use crate::content::{Catalog, Choice};
use crate::engine::{self, ActionError, GameEvent};
use crate::state::GameState;
use crate::view::{self, Screen};

pub struct GameSession {
    catalog: Catalog,
    config: GameConfig,
    state: GameState,
    revision: u64,
}

impl GameSession {
    /// Build a session. A `start_room` missing from the catalog falls back to
    /// the first room, so the player always stands somewhere real.
    pub fn new(catalog: Catalog, mut config: GameConfig) -> Self {
        for problem in validate_config_against(&config, &catalog) {
            log::warn!("{}", problem);
        }
        if catalog.room(&config.start_room).is_none() {
            if let Some(first) = catalog.rooms.first() {
                log::warn!("Starting in '{}' instead", first.id);
                config.start_room = first.id.clone();
            }
        }
        let state = GameState::initial(&config);
        Self {
            catalog,
            config,
            state,
            revision: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    /// Presentation model for the current state.
    pub fn screen(&self) -> Screen<'_> {
        view::render(&self.state, &self.catalog, &self.config)
    }

    fn replace(&mut self, next: GameState) {
        if next != self.state {
            self.state = next;
            self.revision += 1;
        }
    }

    fn apply(
        &mut self,
        action: &str,
        result: Result<GameState, ActionError>,
    ) -> Result<(), ActionError> {
        match result {
            Ok(next) => {
                self.replace(next);
                Ok(())
            }
            Err(e) => {
                log::warn!("{} rejected: {}", action, e);
                Err(e)
            }
        }
    }

    /// Run one tick and return what happened.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let outcome = engine::tick(&self.state, &self.catalog, &self.config);
        for event in &outcome.events {
            match event {
                GameEvent::SituationTriggered { situation_id } => {
                    log::info!("Situation '{}' triggered at {}", situation_id, outcome.state.clock);
                }
                GameEvent::ActivityCompleted { activity_id } => {
                    log::debug!("Activity '{}' completed at {}", activity_id, outcome.state.clock);
                }
                GameEvent::FactorsDecayed { boundaries, night } => {
                    log::trace!("Decay x{} (night: {})", boundaries, night);
                }
            }
        }
        self.replace(outcome.state);
        outcome.events
    }

    pub fn choose(&mut self, choice: Choice) -> Result<(), ActionError> {
        let result = engine::choose(&self.state, &self.catalog, choice);
        if let Ok(next) = &result {
            log::info!(
                "Choice {:?} for '{}': score {} -> {}, clock {}",
                choice,
                self.state.pending_situation().unwrap_or_default(),
                self.state.score,
                next.score,
                next.clock
            );
        }
        self.apply("choose", result)
    }

    pub fn acknowledge(&mut self) -> Result<(), ActionError> {
        let result = engine::acknowledge(&self.state);
        self.apply("acknowledge", result)
    }

    pub fn start_activity(&mut self, activity_id: &str) -> Result<(), ActionError> {
        let result = engine::start_activity(&self.state, &self.catalog, activity_id);
        self.apply("start_activity", result)
    }

    pub fn change_room(&mut self, room_id: &str) -> Result<(), ActionError> {
        let result = engine::change_room(&self.state, &self.catalog, room_id);
        self.apply("change_room", result)
    }

    pub fn toggle_play(&mut self) -> Result<(), ActionError> {
        let result = engine::toggle_play(&self.state);
        self.apply("toggle_play", result)
    }

    pub fn set_speed(&mut self, speed: u32) -> Result<(), ActionError> {
        let result = engine::set_speed(&self.state, &self.config, speed);
        self.apply("set_speed", result)
    }

    pub fn reset(&mut self) {
        log::info!("Session reset (final score was {})", self.state.score);
        self.replace(engine::reset(&self.config));
    }
}
