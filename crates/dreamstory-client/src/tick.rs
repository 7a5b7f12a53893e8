//! Drives simulation ticks from wall-clock time.

use bevy::prelude::*;

use crate::state::{Session, TickTimer};

/// Advance the session once per elapsed timer interval while playing.
/// The timer is held at zero while paused so no partial interval carries
/// over into the next play period.
pub fn advance_session(
    time: Res<Time>,
    mut timer: ResMut<TickTimer>,
    mut session: ResMut<Session>,
) {
    if !session.0.is_playing() {
        timer.0.reset();
        return;
    }

    timer.0.tick(time.delta());
    for _ in 0..timer.0.times_finished_this_tick() {
        // A situation pauses play mid-batch.
        if !session.0.is_playing() {
            timer.0.reset();
            break;
        }
        session.0.tick();
    }
}
