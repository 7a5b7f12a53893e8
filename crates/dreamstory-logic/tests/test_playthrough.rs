//! Integration tests for full playthroughs.
//!
//! Exercises: Catalog → GameSession → tick / choose / acknowledge → view
//!
//! All tests are pure logic: no rendering, no wall clock.

use dreamstory_logic::clock::Clock;
use dreamstory_logic::config::{GameConfig, SituationMatching};
use dreamstory_logic::content::{Catalog, Choice};
use dreamstory_logic::engine::GameEvent;
use dreamstory_logic::session::GameSession;
use dreamstory_logic::state::GameState;
use dreamstory_logic::view::Screen;

// ── Helpers ────────────────────────────────────────────────────────────

fn session_with(config: GameConfig) -> GameSession {
    GameSession::new(Catalog::builtin().expect("builtin content"), config)
}

/// Play until `last_day` ends, answering every situation with `choice`.
/// Returns the ids in the order they fired.
fn play_through(session: &mut GameSession, choice: Choice, last_day: u32) -> Vec<String> {
    let mut fired = Vec::new();
    session.toggle_play().unwrap();
    let mut guard = 0;
    while session.state().clock.day <= last_day {
        guard += 1;
        assert!(guard < 100_000, "playthrough did not terminate");
        for event in session.tick() {
            if let GameEvent::SituationTriggered { situation_id } = event {
                fired.push(situation_id);
            }
        }
        if session.state().pending_situation().is_some() {
            session.choose(choice).unwrap();
            session.acknowledge().unwrap();
        }
    }
    fired
}

// ── Two-week playthroughs ──────────────────────────────────────────────

#[test]
fn accept_everything_for_two_weeks() {
    let mut session = session_with(GameConfig::default());
    let fired = play_through(&mut session, Choice::Accept, 14);

    // weekend_trip (d14 08:00) jumps to 22:00, stepping over movie_night (20:00).
    assert!(fired.contains(&"early_meeting".to_string()));
    assert!(fired.contains(&"weekend_trip".to_string()));
    assert!(!fired.contains(&"movie_night".to_string()));

    let mut unique = fired.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), fired.len(), "a situation fired twice");
    assert!(session.state().factors.all_in_range());
}

#[test]
fn decline_everything_for_two_weeks() {
    let mut session = session_with(GameConfig::default());
    let fired = play_through(&mut session, Choice::Decline, 14);

    // Declining weekend_trip jumps to 10:00, so movie_night still fires.
    assert!(fired.contains(&"movie_night".to_string()));
    assert_eq!(fired.len(), 14);
    assert!(session.state().factors.all_in_range());
}

#[test]
fn situations_fire_in_calendar_order() {
    let mut session = session_with(GameConfig::default());
    let fired = play_through(&mut session, Choice::Decline, 14);
    let catalog = Catalog::builtin().unwrap();
    let times: Vec<u64> = fired
        .iter()
        .map(|id| catalog.situation(id).unwrap().at().total_minutes())
        .collect();
    assert!(times.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn fastest_speed_still_sees_every_situation_when_elapsed() {
    let config = GameConfig {
        start_speed: 4,
        ..GameConfig::default()
    };
    let mut session = session_with(config);
    let fired = play_through(&mut session, Choice::Decline, 14);
    assert_eq!(fired.len(), 14);
}

#[test]
fn exact_matching_reproduces_the_skip_gap() {
    // Starting at 06:05 with 20-minute steps the clock only ever shows
    // :05, :25 and :45, so no on-the-hour situation can match exactly.
    let config = GameConfig {
        situation_matching: SituationMatching::Exact,
        start_clock: Clock::new(1, 6, 5),
        start_speed: 4,
        ..GameConfig::default()
    };
    let mut session = session_with(config);
    let fired = play_through(&mut session, Choice::Decline, 2);
    assert!(fired.is_empty());

    let elapsed = GameConfig {
        start_clock: Clock::new(1, 6, 5),
        start_speed: 4,
        ..GameConfig::default()
    };
    let mut session = session_with(elapsed);
    let fired = play_through(&mut session, Choice::Decline, 2);
    assert!(fired.contains(&"early_meeting".to_string()));
}

// ── Activities across a day ────────────────────────────────────────────

#[test]
fn sleep_runs_eight_hours_across_situation() {
    let mut session = session_with(GameConfig::default());
    session.start_activity("sleep").unwrap();
    session.toggle_play().unwrap();

    // 06:00 → 07:00 is 12 ticks; the meeting interrupts.
    for _ in 0..12 {
        session.tick();
    }
    assert_eq!(session.state().pending_situation(), Some("early_meeting"));
    assert_eq!(session.state().current_activity.as_ref().unwrap().progress, 60);

    session.choose(Choice::Decline).unwrap();
    session.acknowledge().unwrap();
    // Progress is simulated minutes ticked, not wall time jumped.
    assert_eq!(session.state().current_activity.as_ref().unwrap().progress, 60);

    for _ in 0..84 {
        session.tick();
    }
    assert!(session.state().current_activity.is_none());
    assert!(session.state().has_completed("sleep"));
}

#[test]
fn repeated_activity_is_listed_twice() {
    let mut session = session_with(GameConfig::default());
    session.change_room("kitchen").unwrap();
    session.toggle_play().unwrap();
    for _ in 0..2 {
        session.start_activity("drinkWater").unwrap();
        session.tick();
    }
    assert_eq!(
        session.state().completed_activities,
        vec!["drinkWater".to_string(), "drinkWater".to_string()]
    );
}

// ── Screens ────────────────────────────────────────────────────────────

#[test]
fn screens_follow_the_prompt_cycle() {
    let mut session = session_with(GameConfig::default());
    assert!(matches!(session.screen(), Screen::Dashboard(_)));

    session.toggle_play().unwrap();
    for _ in 0..12 {
        session.tick();
    }
    assert!(matches!(session.screen(), Screen::Situation(s) if s.id == "early_meeting"));

    session.choose(Choice::Accept).unwrap();
    assert!(matches!(session.screen(), Screen::Consequence { .. }));

    session.acknowledge().unwrap();
    match session.screen() {
        Screen::Dashboard(d) => assert_eq!(d.header, "Sun 09:00 | Score: 10"),
        other => panic!("expected dashboard, got {:?}", other),
    }
}

#[test]
fn reset_mid_situation_restores_initial_state() {
    let mut session = session_with(GameConfig::default());
    session.toggle_play().unwrap();
    for _ in 0..12 {
        session.tick();
    }
    assert!(session.state().pending_situation().is_some());
    session.reset();
    assert_eq!(session.state(), &GameState::initial(session.config()));

    // The meeting can fire again in the new session.
    session.toggle_play().unwrap();
    for _ in 0..12 {
        session.tick();
    }
    assert_eq!(session.state().pending_situation(), Some("early_meeting"));
}
