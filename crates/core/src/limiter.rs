//! Frame-rate limiting for the render loop.

/// Default minimum frame duration (~60 fps).
pub const DEFAULT_FRAME_MS: u64 = 17;

/// Frame-rate cap for the render loop.
///
/// Only the shortfall against the minimum frame duration is ever waited; a
/// frame that already took longer than the budget is never delayed further.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    min_frame_ms: u64,
    last_frame_ms: u64,
    frames: u64,
}

impl Default for FrameLimiter {
    fn default() -> Self {
        Self {
            min_frame_ms: DEFAULT_FRAME_MS,
            last_frame_ms: 0,
            frames: 0,
        }
    }
}

impl FrameLimiter {
    pub fn new(fps: u32) -> Self {
        let mut limiter = Self::default();
        limiter.set_framerate(fps);
        limiter
    }

    /// Caps the loop at `fps` frames per second.
    ///
    /// Requests above 1000 fps behave like 1000 (no sub-millisecond waits);
    /// `0` removes the cap.
    pub fn set_framerate(&mut self, fps: u32) {
        self.min_frame_ms = match fps {
            0 => 0,
            n => 1000 / u64::from(n.min(1000)),
        };
    }

    pub fn min_frame_ms(&self) -> u64 {
        self.min_frame_ms
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Milliseconds still owed to the current frame at `now_ms`.
    pub fn shortfall(&self, now_ms: u64) -> u64 {
        let elapsed = now_ms.saturating_sub(self.last_frame_ms);
        self.min_frame_ms.saturating_sub(elapsed)
    }

    /// Records the end of a frame at `now_ms`.
    pub fn finish_frame(&mut self, now_ms: u64) {
        self.last_frame_ms = now_ms;
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framerate_maps_to_min_duration() {
        let mut l = FrameLimiter::default();
        assert_eq!(l.min_frame_ms(), DEFAULT_FRAME_MS);
        l.set_framerate(50);
        assert_eq!(l.min_frame_ms(), 20);
        l.set_framerate(1000);
        assert_eq!(l.min_frame_ms(), 1);
        l.set_framerate(5000);
        assert_eq!(l.min_frame_ms(), 1);
        l.set_framerate(0);
        assert_eq!(l.min_frame_ms(), 0);
    }

    #[test]
    fn waits_only_the_shortfall() {
        let mut l = FrameLimiter::new(50);
        l.finish_frame(100);
        assert_eq!(l.shortfall(105), 15);
        assert_eq!(l.shortfall(120), 0);
        assert_eq!(l.shortfall(400), 0);
    }

    #[test]
    fn counts_frames() {
        let mut l = FrameLimiter::default();
        l.finish_frame(1);
        l.finish_frame(2);
        assert_eq!(l.frames(), 2);
    }
}
