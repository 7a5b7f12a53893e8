//! Presentation model: what a front-end shows for a given state.
//!
//! Three mutually exclusive screens: a situation prompt, a consequence
//! narrative, or the dashboard. Pure formatting, no game rules.

use serde::Serialize;

use crate::config::GameConfig;
use crate::content::{Catalog, SituationDef};
use crate::factors::{Factor, FactorTier};
use crate::state::{GameState, Prompt};

pub const ACCEPT_LABEL: &str = "Yes";
pub const DECLINE_LABEL: &str = "No";
pub const CONTINUE_LABEL: &str = "Continue";
pub const CONSEQUENCE_TITLE: &str = "Consequence";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Screen<'a> {
    Situation(&'a SituationDef),
    Consequence { text: &'a str },
    Dashboard(Dashboard),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// `"Sun 06:00 | Score: 0"`
    pub header: String,
    pub is_playing: bool,
    pub factors: Vec<FactorRow>,
    pub active: Option<ActiveRow>,
    pub rooms: Vec<RoomButton>,
    pub activities: Vec<ActivityButton>,
    pub speeds: Vec<SpeedButton>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorRow {
    pub factor: Factor,
    pub label: &'static str,
    /// Rounded to a whole percent.
    pub value: u32,
    pub tier: FactorTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveRow {
    pub icon: String,
    pub name: String,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomButton {
    pub id: String,
    pub name: String,
    pub selected: bool,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityButton {
    pub id: String,
    pub icon: String,
    pub name: String,
    pub duration_minutes: u32,
    /// Done at least once this session.
    pub completed: bool,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedButton {
    pub speed: u32,
    pub selected: bool,
}

impl SpeedButton {
    pub fn label(&self) -> String {
        format!("{}x", self.speed)
    }
}

/// Build the screen for `state`. A pending prompt whose situation is missing
/// from the catalog falls back to the dashboard.
pub fn render<'a>(state: &'a GameState, catalog: &'a Catalog, config: &GameConfig) -> Screen<'a> {
    match &state.prompt {
        Some(Prompt::Situation(id)) => match catalog.situation(id) {
            Some(situation) => Screen::Situation(situation),
            None => Screen::Dashboard(dashboard(state, catalog, config)),
        },
        Some(Prompt::Consequence { text, .. }) => Screen::Consequence {
            text: text.as_str(),
        },
        None => Screen::Dashboard(dashboard(state, catalog, config)),
    }
}

pub fn header(state: &GameState) -> String {
    format!("{} | Score: {}", state.clock, state.score)
}

fn dashboard(state: &GameState, catalog: &Catalog, config: &GameConfig) -> Dashboard {
    let busy = state.is_busy();

    let factors = Factor::ALL
        .iter()
        .map(|&factor| {
            let value = state.factors.get(factor);
            FactorRow {
                factor,
                label: factor.label(),
                value: value.round() as u32,
                tier: FactorTier::from_value(value),
            }
        })
        .collect();

    let active = state.current_activity.as_ref().map(|a| {
        let (icon, name) = catalog
            .activity(&a.id)
            .map(|def| (def.icon.clone(), def.name.clone()))
            .unwrap_or_else(|| (String::new(), a.id.clone()));
        ActiveRow {
            icon,
            name,
            percent: (a.fraction() * 100.0).round() as u32,
        }
    });

    let rooms = catalog
        .rooms
        .iter()
        .map(|r| RoomButton {
            id: r.id.clone(),
            name: r.name.clone(),
            selected: r.id == state.current_room,
            enabled: !busy,
        })
        .collect();

    let activities = catalog
        .room_activities(&state.current_room)
        .into_iter()
        .map(|a| ActivityButton {
            id: a.id.clone(),
            icon: a.icon.clone(),
            name: a.name.clone(),
            duration_minutes: a.duration,
            completed: state.has_completed(&a.id),
            enabled: !busy,
        })
        .collect();

    let speeds = config
        .speed_options
        .iter()
        .map(|&speed| SpeedButton {
            speed,
            selected: speed == state.speed,
        })
        .collect();

    Dashboard {
        header: header(state),
        is_playing: state.is_playing,
        factors,
        active,
        rooms,
        activities,
        speeds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Choice;
    use crate::state::ActiveActivity;

    fn setup() -> (Catalog, GameConfig, GameState) {
        let catalog = Catalog::builtin().unwrap();
        let config = GameConfig::default();
        let state = GameState::initial(&config);
        (catalog, config, state)
    }

    #[test]
    fn test_initial_dashboard() {
        let (catalog, config, state) = setup();
        let Screen::Dashboard(d) = render(&state, &catalog, &config) else {
            panic!("expected dashboard");
        };
        assert_eq!(d.header, "Sun 06:00 | Score: 0");
        assert!(!d.is_playing);
        assert_eq!(d.factors.len(), 5);
        assert_eq!(d.factors[0].label, "Health");
        assert_eq!(d.factors[0].value, 70);
        assert_eq!(d.factors[0].tier, FactorTier::Good);
        assert_eq!(d.factors[2].tier, FactorTier::Fair);
        assert_eq!(d.factors[4].tier, FactorTier::Poor);
        assert!(d.active.is_none());
        assert_eq!(d.rooms.len(), 5);
        assert!(d.rooms[0].selected);
        assert!(d.rooms.iter().all(|r| r.enabled));
        let ids: Vec<_> = d.activities.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["sleep", "computer"]);
        assert_eq!(d.activities[0].duration_minutes, 480);
        assert_eq!(
            d.speeds.iter().map(SpeedButton::label).collect::<Vec<_>>(),
            vec!["1x", "2x", "4x"]
        );
        assert!(d.speeds[0].selected);
    }

    #[test]
    fn test_busy_dashboard_disables_grids() {
        let (catalog, config, mut state) = setup();
        state.current_activity = Some(ActiveActivity {
            id: "sleep".into(),
            progress: 120,
            duration: 480,
        });
        let Screen::Dashboard(d) = render(&state, &catalog, &config) else {
            panic!("expected dashboard");
        };
        let active = d.active.unwrap();
        assert_eq!(active.name, "Sleep");
        assert_eq!(active.percent, 25);
        assert!(d.rooms.iter().all(|r| !r.enabled));
        assert!(d.activities.iter().all(|a| !a.enabled));
    }

    #[test]
    fn test_completed_flag() {
        let (catalog, config, mut state) = setup();
        state.completed_activities.push("computer".into());
        let Screen::Dashboard(d) = render(&state, &catalog, &config) else {
            panic!("expected dashboard");
        };
        assert!(!d.activities[0].completed);
        assert!(d.activities[1].completed);
    }

    #[test]
    fn test_rounded_factor_value() {
        let (catalog, config, mut state) = setup();
        state.factors.sleep = 59.5;
        let Screen::Dashboard(d) = render(&state, &catalog, &config) else {
            panic!("expected dashboard");
        };
        assert_eq!(d.factors[1].value, 60);
    }

    #[test]
    fn test_situation_and_consequence_screens() {
        let (catalog, config, mut state) = setup();
        state.prompt = Some(Prompt::Situation("early_meeting".into()));
        match render(&state, &catalog, &config) {
            Screen::Situation(s) => assert_eq!(s.id, "early_meeting"),
            other => panic!("unexpected {:?}", other),
        }
        state.prompt = Some(Prompt::Consequence {
            situation_id: "early_meeting".into(),
            choice: Choice::Decline,
            text: "late again".into(),
        });
        assert_eq!(
            render(&state, &catalog, &config),
            Screen::Consequence { text: "late again" }
        );
    }
}
