//! Game constants: time grid, factor bounds, decay rates, defaults.
//!
//! Plain constants with no engine dependency. `GameConfig::default()` is
//! built from these; the client and the simtest read them directly.

pub mod time {
    pub const MINUTES_PER_HOUR: u32 = 60;
    pub const HOURS_PER_DAY: u32 = 24;
    pub const MINUTES_PER_DAY: u32 = MINUTES_PER_HOUR * HOURS_PER_DAY;
    pub const FIRST_DAY: u32 = 1;

    /// Simulated minutes per tick at speed 1.
    pub const BASE_STEP_MINUTES: u32 = 5;
    /// Wall-clock period between ticks.
    pub const TICK_INTERVAL_MS: u64 = 1000;
    /// Upper bound on simulated minutes per tick at the fastest speed.
    pub const MAX_STEP_MINUTES: u32 = MINUTES_PER_DAY;

    /// Short day names, day 1 is a Sunday.
    pub const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
}

pub mod speeds {
    pub const NORMAL: u32 = 1;
    pub const FAST: u32 = 2;
    pub const FASTEST: u32 = 4;

    pub const ALL: [u32; 3] = [NORMAL, FAST, FASTEST];
}

pub mod factors {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 100.0;

    /// Tier thresholds used by the dashboard bars.
    pub const GOOD_THRESHOLD: f32 = 70.0;
    pub const FAIR_THRESHOLD: f32 = 40.0;

    pub const INITIAL_HEALTH: f32 = 70.0;
    pub const INITIAL_SLEEP: f32 = 60.0;
    pub const INITIAL_ENERGY: f32 = 50.0;
    pub const INITIAL_PRODUCTIVITY: f32 = 40.0;
    pub const INITIAL_SOCIAL: f32 = 30.0;
}

pub mod decay {
    /// Decay is applied once per boundary of this many simulated minutes.
    pub const INTERVAL_MINUTES: u32 = 30;
    pub const ENERGY: f32 = 1.0;
    pub const SLEEP: f32 = 0.5;
    /// Extra health loss at night.
    pub const NIGHT_HEALTH: f32 = 0.5;
    /// Night is `hour >= NIGHT_START_HOUR || hour <= NIGHT_END_HOUR`.
    pub const NIGHT_START_HOUR: u32 = 22;
    pub const NIGHT_END_HOUR: u32 = 6;
}

pub mod start {
    pub const DAY: u32 = 1;
    pub const HOUR: u32 = 6;
    pub const MINUTE: u32 = 0;
    pub const ROOM: &str = "bedroom";
}
