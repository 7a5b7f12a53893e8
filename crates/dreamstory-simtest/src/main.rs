//! Dream Story Headless Simulation Harness
//!
//! Validates the pure game rules and the built-in content without a window.
//! Runs entirely in-process: no rendering, no wall clock.
//!
//! Usage:
//!   cargo run -p dreamstory-simtest
//!   cargo run -p dreamstory-simtest -- --verbose --seed 7 --runs 200
//!   cargo run -p dreamstory-simtest -- --json

use std::collections::HashSet;

use dreamstory_logic::clock::Clock;
use dreamstory_logic::config::{validate_config, GameConfig, SituationMatching};
use dreamstory_logic::constants::time::BASE_STEP_MINUTES;
use dreamstory_logic::content::{validate_catalog, Catalog, Choice};
use dreamstory_logic::engine::GameEvent;
use dreamstory_logic::factors::{Factor, Factors};
use dreamstory_logic::session::GameSession;
use dreamstory_logic::state::GameState;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

#[derive(Serialize)]
struct Report<'a> {
    seed: u64,
    runs: u32,
    passed: usize,
    failed: usize,
    results: &'a [TestResult],
}

struct Options {
    verbose: bool,
    json: bool,
    seed: u64,
    runs: u32,
}

impl Options {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut opts = Options {
            verbose: false,
            json: false,
            seed: 42,
            runs: 100,
        };
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--verbose" | "-v" => {
                    opts.verbose = true;
                    i += 1;
                }
                "--json" => {
                    opts.json = true;
                    i += 1;
                }
                "--seed" if i + 1 < args.len() => {
                    opts.seed = args[i + 1].parse().unwrap_or(opts.seed);
                    i += 2;
                }
                "--runs" if i + 1 < args.len() => {
                    opts.runs = args[i + 1].parse().unwrap_or(opts.runs);
                    i += 2;
                }
                _ => i += 1,
            }
        }
        opts
    }
}

fn main() {
    let opts = Options::from_args();
    let verbose = opts.verbose && !opts.json;
    if !opts.json {
        println!("=== Dream Story Simulation Harness ===\n");
    }

    let catalog = match Catalog::builtin() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Built-in content failed to load: {}", e);
            std::process::exit(1);
        }
    };

    let mut results = Vec::new();

    // 1. Content tables
    results.extend(validate_content(&catalog, verbose));

    // 2. Clock arithmetic
    results.extend(validate_clock(verbose));

    // 3. Factor clamping sweep
    results.extend(validate_clamping(&catalog, verbose));

    // 4. Scripted two-week playthroughs
    results.extend(validate_playthroughs(&catalog, verbose));

    // 5. Random-play sweep
    results.extend(validate_random_play(&catalog, opts.seed, opts.runs, verbose));

    // ── Summary ──
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    if opts.json {
        let report = Report {
            seed: opts.seed,
            runs: opts.runs,
            passed,
            failed,
            results: &results,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize report: {}", e),
        }
    } else {
        println!();
        for r in &results {
            let icon = if r.passed { "✓" } else { "✗" };
            if !r.passed || verbose {
                println!("  {} {}: {}", icon, r.name, r.detail);
            }
        }
        println!(
            "\n=== RESULT: {}/{} passed, {} failed ===",
            passed, total, failed
        );
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

fn section(title: &str, verbose: bool) {
    if verbose {
        println!("--- {} ---", title);
    }
}

fn new_session(catalog: &Catalog, config: GameConfig) -> GameSession {
    GameSession::new(catalog.clone(), config)
}

// ── 1. Content ──────────────────────────────────────────────────────────

fn validate_content(catalog: &Catalog, verbose: bool) -> Vec<TestResult> {
    section("Content Tables", verbose);
    let mut results = Vec::new();

    let problems = validate_catalog(catalog);
    results.push(TestResult {
        name: "content_valid".into(),
        passed: problems.is_empty(),
        detail: if problems.is_empty() {
            format!(
                "{} situations, {} rooms, {} activities",
                catalog.situations.len(),
                catalog.rooms.len(),
                catalog.activities.len()
            )
        } else {
            problems.join("; ")
        },
    });

    let unreachable: Vec<_> = catalog
        .activities
        .iter()
        .filter(|a| !catalog.rooms.iter().any(|r| r.activities.contains(&a.id)))
        .map(|a| a.id.as_str())
        .collect();
    results.push(TestResult {
        name: "content_activities_reachable".into(),
        passed: unreachable.is_empty(),
        detail: if unreachable.is_empty() {
            "every activity is offered in some room".into()
        } else {
            format!("not offered anywhere: {}", unreachable.join(", "))
        },
    });

    // Durations off the step grid finish late by up to one step.
    let off_grid: Vec<_> = catalog
        .activities
        .iter()
        .filter(|a| a.duration % BASE_STEP_MINUTES != 0)
        .map(|a| a.id.as_str())
        .collect();
    results.push(TestResult {
        name: "content_durations_on_grid".into(),
        passed: off_grid.is_empty(),
        detail: if off_grid.is_empty() {
            format!("all durations are multiples of {} min", BASE_STEP_MINUTES)
        } else {
            format!("off grid: {}", off_grid.join(", "))
        },
    });

    let mut stamps = HashSet::new();
    let collisions: Vec<_> = catalog
        .situations
        .iter()
        .filter(|s| !stamps.insert(s.at()))
        .map(|s| s.id.as_str())
        .collect();
    results.push(TestResult {
        name: "content_unique_timestamps".into(),
        passed: collisions.is_empty(),
        detail: if collisions.is_empty() {
            "no two situations share a timestamp".into()
        } else {
            format!("shared timestamps: {}", collisions.join(", "))
        },
    });

    results.push(TestResult {
        name: "config_default_valid".into(),
        passed: validate_config(&GameConfig::default()).is_empty(),
        detail: "default config passes validation".into(),
    });

    if verbose {
        let mut sorted: Vec<_> = catalog.situations.iter().collect();
        sorted.sort_by_key(|s| s.at().total_minutes());
        println!("  Situation calendar:");
        for s in sorted {
            println!(
                "    {:18} day {:2} {} (yes {:+}, no {:+})",
                s.id,
                s.day,
                s.at(),
                s.accept.score,
                s.decline.score
            );
        }
    }

    results
}

// ── 2. Clock ────────────────────────────────────────────────────────────

fn validate_clock(verbose: bool) -> Vec<TestResult> {
    section("Clock", verbose);
    let mut results = Vec::new();

    let rolled = Clock::new(1, 23, 58).advanced_by(5);
    results.push(TestResult {
        name: "clock_day_rollover".into(),
        passed: rolled == Clock::new(2, 0, 3),
        detail: format!("day 1 23:58 + 5min → day {} {}", rolled.day, rolled),
    });

    let mut all_roundtrip = true;
    for total in (0..14 * 1440u64).step_by(7) {
        if Clock::from_total_minutes(total).total_minutes() != total {
            all_roundtrip = false;
            break;
        }
    }
    results.push(TestResult {
        name: "clock_absolute_minutes".into(),
        passed: all_roundtrip,
        detail: "two weeks of minutes convert both ways".into(),
    });

    let week = Clock::new(8, 12, 0);
    results.push(TestResult {
        name: "clock_day_names_wrap".into(),
        passed: week.day_name() == Clock::new(1, 0, 0).day_name(),
        detail: format!("day 8 is {}", week.day_name()),
    });

    results
}

// ── 3. Clamping ─────────────────────────────────────────────────────────

fn validate_clamping(catalog: &Catalog, verbose: bool) -> Vec<TestResult> {
    section("Factor Clamping", verbose);
    let mut results = Vec::new();

    let extremes = [
        Factors {
            health: 0.0,
            sleep: 0.0,
            energy: 0.0,
            productivity: 0.0,
            social: 0.0,
        },
        Factors {
            health: 100.0,
            sleep: 100.0,
            energy: 100.0,
            productivity: 100.0,
            social: 100.0,
        },
        Factors {
            health: 95.0,
            sleep: 3.0,
            energy: 50.0,
            productivity: 99.5,
            social: 0.5,
        },
    ];

    let mut applied = 0;
    let mut violations = 0;
    for start in &extremes {
        for a in &catalog.activities {
            applied += 1;
            if !start.with(&a.effects).all_in_range() {
                violations += 1;
            }
        }
        for s in &catalog.situations {
            for choice in [Choice::Accept, Choice::Decline] {
                applied += 1;
                if !start.with(&s.outcome(choice).effects).all_in_range() {
                    violations += 1;
                }
            }
        }
    }
    results.push(TestResult {
        name: "clamp_all_effects".into(),
        passed: violations == 0,
        detail: format!("{} effect applications, {} out of range", applied, violations),
    });

    let exercise = catalog.activity("exercise");
    let health = exercise.map(|a| {
        Factors {
            health: 95.0,
            ..extremes[1]
        }
        .with(&a.effects)
        .get(Factor::Health)
    });
    results.push(TestResult {
        name: "clamp_exercise_example".into(),
        passed: health == Some(100.0),
        detail: format!("health 95 + exercise → {:?}", health),
    });

    results
}

// ── 4. Scripted playthroughs ────────────────────────────────────────────

struct Playthrough {
    fired: Vec<String>,
    final_state: GameState,
    ticks: u32,
    /// Actions the session refused, with the clock at the time.
    rejections: Vec<String>,
}

impl Playthrough {
    fn actions_result(&self, label: &str) -> TestResult {
        TestResult {
            name: format!("playthrough_{}_actions", label),
            passed: self.rejections.is_empty(),
            detail: if self.rejections.is_empty() {
                format!("all actions accepted over {} ticks", self.ticks)
            } else {
                self.rejections.join("; ")
            },
        }
    }
}

fn play_through(catalog: &Catalog, config: GameConfig, choice: Choice, last_day: u32) -> Playthrough {
    let mut session = new_session(catalog, config);
    let mut fired = Vec::new();
    let mut ticks = 0;
    let mut rejections = Vec::new();
    if let Err(e) = session.toggle_play() {
        rejections.push(format!("toggle_play at start: {}", e));
    }
    while session.state().clock.day <= last_day && ticks < 100_000 && rejections.is_empty() {
        ticks += 1;
        for event in session.tick() {
            if let GameEvent::SituationTriggered { situation_id } = event {
                fired.push(situation_id);
            }
        }
        if let Some(id) = session.state().pending_situation().map(str::to_string) {
            if let Err(e) = session.choose(choice) {
                rejections.push(format!("choose {:?} on '{}': {}", choice, id, e));
            } else if let Err(e) = session.acknowledge() {
                rejections.push(format!("acknowledge '{}': {}", id, e));
            }
        }
    }
    if rejections.is_empty() && session.state().clock.day <= last_day {
        rejections.push(format!("stalled at {}", session.state().clock));
    }
    Playthrough {
        fired,
        final_state: session.state().clone(),
        ticks,
        rejections,
    }
}

fn validate_playthroughs(catalog: &Catalog, verbose: bool) -> Vec<TestResult> {
    section("Scripted Playthroughs", verbose);
    let mut results = Vec::new();
    let total = catalog.situations.len();

    let yes = play_through(catalog, GameConfig::default(), Choice::Accept, 14);
    let no = play_through(catalog, GameConfig::default(), Choice::Decline, 14);

    results.push(TestResult {
        name: "playthrough_decline_sees_all".into(),
        passed: no.fired.len() == total,
        detail: format!("{}/{} situations fired in {} ticks", no.fired.len(), total, no.ticks),
    });

    let skipped: Vec<_> = catalog
        .situations
        .iter()
        .filter(|s| !yes.fired.contains(&s.id))
        .map(|s| s.id.as_str())
        .collect();
    results.push(TestResult {
        name: "playthrough_accept_jump_skips".into(),
        passed: skipped == vec!["movie_night"],
        detail: format!("skipped by forward jumps: {:?}", skipped),
    });

    results.push(TestResult {
        name: "playthrough_scores".into(),
        passed: yes.final_state.factors.all_in_range() && no.final_state.factors.all_in_range(),
        detail: format!(
            "accept-all score {}, decline-all score {}",
            yes.final_state.score, no.final_state.score
        ),
    });

    let fast = play_through(
        catalog,
        GameConfig {
            start_speed: 4,
            ..GameConfig::default()
        },
        Choice::Decline,
        14,
    );
    results.push(TestResult {
        name: "playthrough_fast_elapsed".into(),
        passed: fast.fired.len() == total,
        detail: format!("{}/{} fired at 4x with elapsed matching", fast.fired.len(), total),
    });

    let offset = Clock::new(1, 6, 5);
    let exact = play_through(
        catalog,
        GameConfig {
            situation_matching: SituationMatching::Exact,
            start_clock: offset,
            start_speed: 4,
            ..GameConfig::default()
        },
        Choice::Decline,
        14,
    );
    results.push(TestResult {
        name: "playthrough_fast_exact_gap".into(),
        passed: exact.fired.len() < total,
        detail: format!(
            "{}/{} fired at 4x from {} with exact matching",
            exact.fired.len(),
            total,
            offset
        ),
    });

    for (label, run) in [
        ("accept", &yes),
        ("decline", &no),
        ("fast", &fast),
        ("exact", &exact),
    ] {
        results.push(run.actions_result(label));
    }

    if verbose {
        println!("  Accept-all order: {}", yes.fired.join(" → "));
        println!("  Decline-all order: {}", no.fired.join(" → "));
    }

    results
}

// ── 5. Random play ──────────────────────────────────────────────────────

/// One random action against the session. Returns whether it was accepted.
fn random_action(session: &mut GameSession, rng: &mut StdRng) -> bool {
    if session.state().pending_situation().is_some() {
        let choice = if rng.gen_bool(0.5) {
            Choice::Accept
        } else {
            Choice::Decline
        };
        return session.choose(choice).is_ok();
    }
    if session.state().pending_consequence().is_some() {
        return session.acknowledge().is_ok();
    }

    match rng.gen_range(0..10) {
        0 => {
            let rooms: Vec<String> = session.catalog().rooms.iter().map(|r| r.id.clone()).collect();
            match rooms.choose(rng) {
                Some(id) => session.change_room(id).is_ok(),
                None => false,
            }
        }
        1 | 2 => {
            // Any activity, so out-of-room requests get exercised too.
            let ids: Vec<String> = session
                .catalog()
                .activities
                .iter()
                .map(|a| a.id.clone())
                .collect();
            match ids.choose(rng) {
                Some(id) => session.start_activity(id).is_ok(),
                None => false,
            }
        }
        3 => {
            let speeds = session.config().speed_options.clone();
            let speed = speeds.choose(rng).copied().unwrap_or(1);
            session.set_speed(speed).is_ok()
        }
        4 if !session.is_playing() => session.toggle_play().is_ok(),
        _ => {
            session.tick();
            true
        }
    }
}

fn validate_random_play(catalog: &Catalog, seed: u64, runs: u32, verbose: bool) -> Vec<TestResult> {
    section("Random Play", verbose);
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(seed);

    let mut out_of_range = 0;
    let mut refired = 0;
    let mut rejected_mutated = 0;
    let mut double_activity = 0;
    let mut total_actions = 0u64;
    let mut total_rejected = 0u64;
    let mut best_score = i32::MIN;
    let mut worst_score = i32::MAX;

    for _ in 0..runs {
        let matching = if rng.gen_bool(0.5) {
            SituationMatching::Elapsed
        } else {
            SituationMatching::Exact
        };
        let mut session = new_session(
            catalog,
            GameConfig {
                situation_matching: matching,
                ..GameConfig::default()
            },
        );
        let mut seen = HashSet::new();

        for _ in 0..2000 {
            let before = session.state().clone();
            let busy_before = before.current_activity.clone();
            let accepted = random_action(&mut session, &mut rng);
            total_actions += 1;

            if !accepted {
                total_rejected += 1;
                if session.state() != &before {
                    rejected_mutated += 1;
                }
            }
            if !session.state().factors.all_in_range() {
                out_of_range += 1;
            }
            if let (Some(a), Some(b)) = (&busy_before, &session.state().current_activity) {
                // A running activity can only be continued, never swapped.
                if a.id != b.id {
                    double_activity += 1;
                }
            }
            if let Some(id) = session.state().pending_situation() {
                if before.pending_situation().is_none() && !seen.insert(id.to_string()) {
                    refired += 1;
                }
            }
        }

        best_score = best_score.max(session.state().score);
        worst_score = worst_score.min(session.state().score);
    }

    results.push(TestResult {
        name: "random_factors_in_range".into(),
        passed: out_of_range == 0,
        detail: format!("{} actions, {} out-of-range states", total_actions, out_of_range),
    });
    results.push(TestResult {
        name: "random_situations_fire_once".into(),
        passed: refired == 0,
        detail: format!("{} runs, {} re-fired situations", runs, refired),
    });
    results.push(TestResult {
        name: "random_rejections_keep_state".into(),
        passed: rejected_mutated == 0,
        detail: format!(
            "{} rejected actions, {} changed state",
            total_rejected, rejected_mutated
        ),
    });
    results.push(TestResult {
        name: "random_single_activity".into(),
        passed: double_activity == 0,
        detail: format!("{} activity swaps while busy", double_activity),
    });

    if verbose && runs > 0 {
        println!(
            "  Seed {}: final scores ranged {} to {}",
            seed, worst_score, best_score
        );
    }

    results
}
