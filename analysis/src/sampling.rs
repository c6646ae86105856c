use common::SAMPLE_TICKS;

/// Decides, per decoded frame boundary, whether a position keyframe should be
/// captured for the open round.
#[derive(Debug, Default)]
pub struct SamplingController {
    freeze_end: Option<u32>,
    last_sampled: u32,
}

impl SamplingController {
    pub fn freeze_ended(&mut self, tick: u32) {
        self.freeze_end = Some(tick);
    }

    pub fn freeze_end(&self) -> Option<u32> {
        self.freeze_end
    }

    pub fn should_capture(&self, tick: u32) -> bool {
        match self.freeze_end {
            // Strictly greater than the last capture: the source reissues
            // full snapshots at an already-seen tick.
            Some(freeze_end) => {
                tick >= freeze_end && tick > self.last_sampled && tick % SAMPLE_TICKS == 0
            }
            None => false,
        }
    }

    pub fn mark_captured(&mut self, tick: u32) {
        self.last_sampled = tick;
    }

    pub fn last_sampled(&self) -> u32 {
        self.last_sampled
    }
}
