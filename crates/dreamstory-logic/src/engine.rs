//! Pure state transitions: the tick engine, situation resolution, and the
//! player's selection actions.
//!
//! Every function takes the current state by reference and returns a new
//! one. A rejected action returns an [`ActionError`] and the caller keeps its
//! old state untouched.

use std::fmt;

use serde::Serialize;

use crate::config::{GameConfig, SituationMatching};
use crate::content::{Catalog, Choice, SituationDef};
use crate::factors::Factor;
use crate::state::{ActiveActivity, GameState, Prompt};

/// Something noteworthy that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// Natural decay was applied `boundaries` times.
    FactorsDecayed { boundaries: u32, night: bool },
    ActivityCompleted { activity_id: String },
    SituationTriggered { situation_id: String },
}

/// Result of one tick.
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

/// Advance the simulation by one tick.
///
/// No-op while paused or while a prompt is pending.
pub fn tick(state: &GameState, catalog: &Catalog, config: &GameConfig) -> TickOutcome {
    if !state.is_playing || state.prompt.is_some() {
        return TickOutcome {
            state: state.clone(),
            events: Vec::new(),
        };
    }

    let mut next = state.clone();
    let mut events = Vec::new();
    let step = config.step_minutes(state.speed);

    let before = state.clock.total_minutes();
    next.clock = state.clock.advanced_by(step);
    let after = next.clock.total_minutes();

    apply_decay(&mut next, config, before, after, &mut events);
    progress_activity(&mut next, catalog, step, &mut events);

    match find_due_situation(&next, catalog, config, after) {
        Some(situation) => {
            next.is_playing = false;
            next.prompt = Some(Prompt::Situation(situation.id.clone()));
            next.triggered.insert(situation.id.clone());
            next.scan_from = situation.at().total_minutes();
            events.push(GameEvent::SituationTriggered {
                situation_id: situation.id.clone(),
            });
        }
        None => next.scan_from = after,
    }

    TickOutcome {
        state: next,
        events,
    }
}

/// Decay once for every decay-interval boundary in `(before, after]`.
fn apply_decay(
    state: &mut GameState,
    config: &GameConfig,
    before: u64,
    after: u64,
    events: &mut Vec<GameEvent>,
) {
    let interval = u64::from(config.decay_interval_minutes.max(1));
    let mut boundary = (before / interval + 1) * interval;
    let mut count = 0;
    let mut any_night = false;

    while boundary <= after {
        let hour = ((boundary / 60) % 24) as u32;
        state.factors.drain(Factor::Energy, config.energy_decay);
        state.factors.drain(Factor::Sleep, config.sleep_decay);
        if config.is_night(hour) {
            state.factors.drain(Factor::Health, config.night_health_decay);
            any_night = true;
        }
        count += 1;
        boundary += interval;
    }

    if count > 0 {
        events.push(GameEvent::FactorsDecayed {
            boundaries: count,
            night: any_night,
        });
    }
}

fn progress_activity(
    state: &mut GameState,
    catalog: &Catalog,
    step: u32,
    events: &mut Vec<GameEvent>,
) {
    let Some(active) = state.current_activity.take() else {
        return;
    };

    let progress = active.progress.saturating_add(step);
    if progress < active.duration {
        state.current_activity = Some(ActiveActivity { progress, ..active });
        return;
    }

    match catalog.activity(&active.id) {
        Some(def) => state.factors.apply(&def.effects),
        None => log::warn!("completed activity '{}' is not in the catalog", active.id),
    }
    state.completed_activities.push(active.id.clone());
    events.push(GameEvent::ActivityCompleted {
        activity_id: active.id,
    });
}

fn find_due_situation<'a>(
    state: &GameState,
    catalog: &'a Catalog,
    config: &GameConfig,
    now: u64,
) -> Option<&'a SituationDef> {
    let mut untriggered = catalog
        .situations
        .iter()
        .filter(|s| !state.triggered.contains(&s.id));

    match config.situation_matching {
        SituationMatching::Exact => untriggered.find(|s| s.at() == state.clock),
        SituationMatching::Elapsed => untriggered
            .filter(|s| {
                let at = s.at().total_minutes();
                at > state.scan_from && at <= now
            })
            .min_by_key(|s| s.at().total_minutes()),
    }
}

/// Apply the chosen outcome of the pending situation and show its narrative.
pub fn choose(
    state: &GameState,
    catalog: &Catalog,
    choice: Choice,
) -> Result<GameState, ActionError> {
    let id = state
        .pending_situation()
        .ok_or(ActionError::NoPendingSituation)?;
    let situation = catalog
        .situation(id)
        .ok_or_else(|| ActionError::UnknownSituation(id.to_string()))?;
    let outcome = situation.outcome(choice);

    let mut next = state.clone();
    next.factors.apply(&outcome.effects);
    next.score += outcome.score;
    if let Some(jump) = &outcome.time_jump {
        next.clock = state.clock.jumped_to(jump);
        next.scan_from = next.clock.total_minutes();
    }
    next.triggered.insert(situation.id.clone());
    next.is_playing = false;
    next.prompt = Some(Prompt::Consequence {
        situation_id: situation.id.clone(),
        choice,
        text: outcome.consequence.clone(),
    });
    Ok(next)
}

/// Dismiss the consequence narrative; play resumes automatically.
pub fn acknowledge(state: &GameState) -> Result<GameState, ActionError> {
    if state.pending_consequence().is_none() {
        return Err(ActionError::NoPendingConsequence);
    }
    let mut next = state.clone();
    next.prompt = None;
    next.is_playing = true;
    Ok(next)
}

pub fn start_activity(
    state: &GameState,
    catalog: &Catalog,
    activity_id: &str,
) -> Result<GameState, ActionError> {
    ensure_no_prompt(state)?;
    if state.is_busy() {
        return Err(ActionError::ActivityInProgress);
    }
    let def = catalog
        .activity(activity_id)
        .ok_or_else(|| ActionError::UnknownActivity(activity_id.to_string()))?;
    if !catalog.room_offers(&state.current_room, activity_id) {
        return Err(ActionError::ActivityNotInRoom {
            activity: activity_id.to_string(),
            room: state.current_room.clone(),
        });
    }

    let mut next = state.clone();
    next.current_activity = Some(ActiveActivity {
        id: def.id.clone(),
        progress: 0,
        duration: def.duration,
    });
    Ok(next)
}

pub fn change_room(
    state: &GameState,
    catalog: &Catalog,
    room_id: &str,
) -> Result<GameState, ActionError> {
    ensure_no_prompt(state)?;
    if state.is_busy() {
        return Err(ActionError::ActivityInProgress);
    }
    let room = catalog
        .room(room_id)
        .ok_or_else(|| ActionError::UnknownRoom(room_id.to_string()))?;

    let mut next = state.clone();
    next.current_room = room.id.clone();
    Ok(next)
}

pub fn toggle_play(state: &GameState) -> Result<GameState, ActionError> {
    ensure_no_prompt(state)?;
    let mut next = state.clone();
    next.is_playing = !state.is_playing;
    Ok(next)
}

pub fn set_speed(
    state: &GameState,
    config: &GameConfig,
    speed: u32,
) -> Result<GameState, ActionError> {
    ensure_no_prompt(state)?;
    if !config.allows_speed(speed) {
        return Err(ActionError::InvalidSpeed(speed));
    }
    let mut next = state.clone();
    next.speed = speed;
    Ok(next)
}

/// Back to the configured starting point, forgetting every triggered situation.
pub fn reset(config: &GameConfig) -> GameState {
    GameState::initial(config)
}

fn ensure_no_prompt(state: &GameState) -> Result<(), ActionError> {
    if state.prompt.is_some() {
        Err(ActionError::PromptPending)
    } else {
        Ok(())
    }
}

/// Why a player action was rejected. State is never changed on rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    PromptPending,
    NoPendingSituation,
    NoPendingConsequence,
    ActivityInProgress,
    UnknownActivity(String),
    UnknownRoom(String),
    UnknownSituation(String),
    ActivityNotInRoom { activity: String, room: String },
    InvalidSpeed(u32),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::PromptPending => write!(f, "a situation or consequence is pending"),
            ActionError::NoPendingSituation => write!(f, "no situation is awaiting a choice"),
            ActionError::NoPendingConsequence => write!(f, "no consequence is being shown"),
            ActionError::ActivityInProgress => write!(f, "an activity is already in progress"),
            ActionError::UnknownActivity(id) => write!(f, "unknown activity '{}'", id),
            ActionError::UnknownRoom(id) => write!(f, "unknown room '{}'", id),
            ActionError::UnknownSituation(id) => write!(f, "unknown situation '{}'", id),
            ActionError::ActivityNotInRoom { activity, room } => {
                write!(f, "activity '{}' is not available in '{}'", activity, room)
            }
            ActionError::InvalidSpeed(speed) => write!(f, "speed {}x is not available", speed),
        }
    }
}

impl std::error::Error for ActionError {}
