use common::Round;

use crate::viewport::{Camera, RadarLevel};

/// Selectable playback speeds.
pub const SPEEDS: [f64; 5] = [0.5, 1.0, 2.0, 4.0, 8.0];

/// Keyframes per second in the record set.
pub const SAMPLE_RATE: f64 = (common::TICK_RATE / common::SAMPLE_TICKS) as f64;

/// Playback state for one loaded data set. The cursor is a real-valued frame
/// index into the current round, advanced by the embedding surface's
/// animation callback; gestures are plain synchronous methods applied
/// between callbacks.
#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
    round: usize,
    cursor: f64,
    speed_idx: usize,
    running: bool,
    pub camera: Camera,
    pub level_override: Option<RadarLevel>,
    pub stats_open: bool,
}

impl Default for Playback {
    fn default() -> Self {
        Self {
            round: 0,
            cursor: 0.0,
            speed_idx: 1, // 1x
            running: false,
            camera: Camera::default(),
            level_override: None,
            stats_open: false,
        }
    }
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    pub fn speed(&self) -> f64 {
        SPEEDS[self.speed_idx]
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn play(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    pub fn toggle_stats(&mut self) {
        self.stats_open = !self.stats_open;
    }

    /// Accepts only the speeds in [`SPEEDS`]; anything else is refused.
    pub fn set_speed(&mut self, speed: f64) -> bool {
        match SPEEDS.iter().position(|s| *s == speed) {
            Some(idx) => {
                self.speed_idx = idx;
                true
            }
            None => false,
        }
    }

    /// Steps to the next speed, wrapping around.
    pub fn cycle_speed(&mut self) {
        self.speed_idx = (self.speed_idx + 1) % SPEEDS.len();
    }

    /// Advances the cursor by one animation callback's elapsed wall time (in
    /// seconds). Playback pauses itself at the end of the round.
    pub fn advance(&mut self, elapsed: f64, round: &Round) {
        if !self.running || round.frames.is_empty() {
            return;
        }
        let max = (round.frames.len() - 1) as f64;
        self.cursor = (self.cursor + elapsed * self.speed() * SAMPLE_RATE).clamp(0.0, max);
        if self.cursor >= max {
            self.running = false;
        }
    }

    pub fn seek(&mut self, cursor: f64, round: &Round) {
        let max = round.frames.len().saturating_sub(1) as f64;
        self.cursor = cursor.clamp(0.0, max);
    }

    /// Switches the displayed round, rewinding the cursor. Returns whether
    /// the round actually changed (the caller recomputes round-scoped state
    /// such as the stats table on change).
    pub fn set_round(&mut self, round: usize, round_count: usize) -> bool {
        if round >= round_count || round == self.round {
            return false;
        }
        tracing::debug!(from = self.round, to = round, "switching round");
        self.round = round;
        self.cursor = 0.0;
        true
    }
}
