use instant::Instant;

/// Frame counter that reports an average rate once per interval.
pub struct FrameStats {
    interval_sec: f32,
    frames: u32,
    window_start: Instant,
}

impl FrameStats {
    pub fn new(now: Instant, interval_sec: f32) -> Self {
        Self {
            interval_sec,
            frames: 0,
            window_start: now,
        }
    }

    /// Count one frame; returns frames per second when an interval closes.
    pub fn record(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        let elapsed = now.duration_since(self.window_start).as_secs_f32();
        if elapsed < self.interval_sec {
            return None;
        }
        let fps = self.frames as f32 / elapsed;
        self.frames = 0;
        self.window_start = now;
        Some(fps)
    }
}
