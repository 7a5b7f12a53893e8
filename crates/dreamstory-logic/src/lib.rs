//! Pure simulation logic for Dream Story.
//!
//! This crate contains all game rules independent of any engine or
//! renderer. Functions take plain data and return results, so the Bevy
//! client and the headless simtest drive exactly the same code.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`clock`] | Day/hour/minute clock with carry, absolute time jumps |
//! | [`config`] | Pacing, decay, situation matching, starting state |
//! | [`constants`] | Time grid, factor bounds, decay rates, speeds |
//! | [`content`] | Situation, room and activity tables (embedded JSON) |
//! | [`engine`] | Tick engine, situation resolution, player actions |
//! | [`factors`] | The five clamped well-being factors |
//! | [`session`] | Owning wrapper that applies transitions and logs them |
//! | [`state`] | The game session aggregate |
//! | [`view`] | Presentation model: situation, consequence, dashboard |

pub mod clock;
pub mod config;
pub mod constants;
pub mod content;
pub mod engine;
pub mod factors;
pub mod session;
pub mod state;
pub mod view;
