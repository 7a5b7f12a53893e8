//! Static content tables: situations, rooms, activities.
//!
//! The built-in tables live as JSON under `data/` at the workspace root and
//! are embedded at compile time. [`Catalog::builtin`] parses and validates
//! them once; everything downstream looks content up through the catalog.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, TimeJump};
use crate::constants::time::BASE_STEP_MINUTES;
use crate::factors::FactorDeltas;

const SITUATIONS_JSON: &str = include_str!("../../../data/situations.json");
const ROOMS_JSON: &str = include_str!("../../../data/rooms.json");
const ACTIVITIES_JSON: &str = include_str!("../../../data/activities.json");

/// A timed task performed in a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDef {
    pub id: String,
    pub name: String,
    /// Duration in simulated minutes.
    pub duration: u32,
    pub effects: FactorDeltas,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDef {
    pub id: String,
    pub name: String,
    /// Activity ids offered in this room, in display order.
    pub activities: Vec<String>,
}

/// Which of the two outcomes the player picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    Accept,
    Decline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOutcome {
    #[serde(default)]
    pub effects: FactorDeltas,
    pub score: i32,
    #[serde(default)]
    pub time_jump: Option<TimeJump>,
    pub consequence: String,
}

/// A one-time scripted decision point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SituationDef {
    pub id: String,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub title: String,
    pub description: String,
    pub accept: ChoiceOutcome,
    pub decline: ChoiceOutcome,
}

impl SituationDef {
    pub fn at(&self) -> Clock {
        Clock::new(self.day, self.hour, self.minute)
    }

    pub fn outcome(&self, choice: Choice) -> &ChoiceOutcome {
        match choice {
            Choice::Accept => &self.accept,
            Choice::Decline => &self.decline,
        }
    }
}

/// Validated set of content tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    pub situations: Vec<SituationDef>,
    pub rooms: Vec<RoomDef>,
    pub activities: Vec<ActivityDef>,
}

impl Catalog {
    /// The tables shipped with the game.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_json(SITUATIONS_JSON, ROOMS_JSON, ACTIVITIES_JSON)
    }

    /// Parse the three tables from JSON and validate them together.
    pub fn from_json(
        situations: &str,
        rooms: &str,
        activities: &str,
    ) -> Result<Self, ContentError> {
        let catalog = Self {
            situations: parse_table("situations", situations)?,
            rooms: parse_table("rooms", rooms)?,
            activities: parse_table("activities", activities)?,
        };
        let errors = validate_catalog(&catalog);
        if errors.is_empty() {
            Ok(catalog)
        } else {
            Err(ContentError::Invalid(errors))
        }
    }

    pub fn activity(&self, id: &str) -> Option<&ActivityDef> {
        self.activities.iter().find(|a| a.id == id)
    }

    pub fn room(&self, id: &str) -> Option<&RoomDef> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn situation(&self, id: &str) -> Option<&SituationDef> {
        self.situations.iter().find(|s| s.id == id)
    }

    /// Activities offered in `room_id`, in the room's order.
    pub fn room_activities<'a>(&'a self, room_id: &str) -> Vec<&'a ActivityDef> {
        self.room(room_id)
            .map(|room| {
                room.activities
                    .iter()
                    .filter_map(|id| self.activity(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn room_offers(&self, room_id: &str, activity_id: &str) -> bool {
        self.room(room_id)
            .is_some_and(|r| r.activities.iter().any(|a| a == activity_id))
    }
}

fn parse_table<T: for<'de> Deserialize<'de>>(
    table: &'static str,
    json: &str,
) -> Result<Vec<T>, ContentError> {
    serde_json::from_str(json).map_err(|source| ContentError::Parse { table, source })
}

/// Check cross-table references and value ranges.
/// Returns every problem found; empty means the catalog is usable.
pub fn validate_catalog(catalog: &Catalog) -> Vec<String> {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for a in &catalog.activities {
        if !seen.insert(a.id.as_str()) {
            errors.push(format!("duplicate activity id '{}'", a.id));
        }
        if a.duration == 0 {
            errors.push(format!("activity '{}' has zero duration", a.id));
        }
        if a.effects.is_empty() {
            errors.push(format!("activity '{}' has no effects", a.id));
        }
    }

    let mut seen = HashSet::new();
    for r in &catalog.rooms {
        if !seen.insert(r.id.as_str()) {
            errors.push(format!("duplicate room id '{}'", r.id));
        }
        if r.activities.is_empty() {
            errors.push(format!("room '{}' offers no activities", r.id));
        }
        for id in &r.activities {
            if catalog.activity(id).is_none() {
                errors.push(format!("room '{}' lists unknown activity '{}'", r.id, id));
            }
        }
    }
    if catalog.rooms.is_empty() {
        errors.push("no rooms defined".to_string());
    }

    let mut seen = HashSet::new();
    for s in &catalog.situations {
        if !seen.insert(s.id.as_str()) {
            errors.push(format!("duplicate situation id '{}'", s.id));
        }
        if !s.at().is_valid() {
            errors.push(format!(
                "situation '{}' has invalid timestamp day {} {:02}:{:02}",
                s.id, s.day, s.hour, s.minute
            ));
        }
        if s.minute % BASE_STEP_MINUTES != 0 {
            errors.push(format!(
                "situation '{}' is off the {}-minute grid",
                s.id, BASE_STEP_MINUTES
            ));
        }
        for (label, outcome) in [("accept", &s.accept), ("decline", &s.decline)] {
            if let Some(jump) = outcome.time_jump {
                let target = Clock::new(jump.day.unwrap_or(s.day), jump.hour, jump.minute);
                if !target.is_valid() {
                    errors.push(format!(
                        "situation '{}' {} jumps to invalid time",
                        s.id, label
                    ));
                }
            }
            if outcome.consequence.trim().is_empty() {
                errors.push(format!(
                    "situation '{}' {} has no consequence text",
                    s.id, label
                ));
            }
        }
    }

    errors
}

/// Errors from loading content tables.
#[derive(Debug)]
pub enum ContentError {
    Parse {
        table: &'static str,
        source: serde_json::Error,
    },
    Invalid(Vec<String>),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Parse { table, source } => {
                write!(f, "failed to parse {} table: {}", table, source)
            }
            ContentError::Invalid(errors) => {
                write!(f, "invalid content: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ContentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContentError::Parse { source, .. } => Some(source),
            ContentError::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> Catalog {
        Catalog::builtin().expect("builtin content must load")
    }

    #[test]
    fn test_builtin_loads() {
        let c = builtin();
        assert_eq!(c.situations.len(), 14);
        assert_eq!(c.rooms.len(), 5);
        assert_eq!(c.activities.len(), 9);
    }

    #[test]
    fn test_every_activity_reachable() {
        let c = builtin();
        for a in &c.activities {
            assert!(
                c.rooms.iter().any(|r| r.activities.contains(&a.id)),
                "activity {} is not offered anywhere",
                a.id
            );
        }
    }

    #[test]
    fn test_exercise_table_entry() {
        let c = builtin();
        let ex = c.activity("exercise").unwrap();
        assert_eq!(ex.duration, 60);
        assert_eq!(ex.effects.health, Some(25.0));
        assert_eq!(ex.effects.energy, Some(-10.0));
        assert_eq!(ex.effects.sleep, Some(10.0));
        assert_eq!(ex.effects.social, None);
    }

    #[test]
    fn test_early_meeting_entry() {
        let c = builtin();
        let s = c.situation("early_meeting").unwrap();
        assert_eq!(s.at(), Clock::new(1, 7, 0));
        assert_eq!(s.accept.score, 10);
        assert_eq!(
            s.accept.time_jump,
            Some(TimeJump {
                day: None,
                hour: 9,
                minute: 0
            })
        );
        assert_eq!(s.outcome(Choice::Decline).score, -20);
    }

    #[test]
    fn test_room_activities_order() {
        let c = builtin();
        let ids: Vec<_> = c
            .room_activities("bedroom")
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["sleep", "computer"]);
        assert!(c.room_offers("kitchen", "drinkWater"));
        assert!(!c.room_offers("kitchen", "sleep"));
        assert!(c.room_activities("attic").is_empty());
    }

    #[test]
    fn test_unknown_activity_reference_rejected() {
        let rooms = r#"[{ "id": "attic", "name": "Attic", "activities": ["ghost"] }]"#;
        let activities =
            r#"[{ "id": "eat", "name": "Eat", "duration": 30, "effects": { "health": 1 }, "icon": "x" }]"#;
        match Catalog::from_json("[]", rooms, activities) {
            Err(ContentError::Invalid(errors)) => {
                assert!(errors.iter().any(|e| e.contains("ghost")));
            }
            other => panic!("expected invalid content, got {:?}", other),
        }
    }

    #[test]
    fn test_off_grid_situation_rejected() {
        let rooms = r#"[{ "id": "r", "name": "R", "activities": ["a"] }]"#;
        let activities =
            r#"[{ "id": "a", "name": "A", "duration": 5, "effects": { "health": 1 }, "icon": "x" }]"#;
        let situations = r#"[{
            "id": "odd", "day": 1, "hour": 7, "minute": 3,
            "title": "t", "description": "d",
            "accept": { "score": 0, "consequence": "c" },
            "decline": { "score": 0, "consequence": "c" }
        }]"#;
        let err = Catalog::from_json(situations, rooms, activities).unwrap_err();
        assert!(err.to_string().contains("grid"));
    }

    #[test]
    fn test_parse_error_names_table() {
        let err = Catalog::from_json("[]", "not json", "[]").unwrap_err();
        assert!(matches!(err, ContentError::Parse { table: "rooms", .. }));
    }
}
