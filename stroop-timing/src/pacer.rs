use crate::timer::Timer;
use std::time::Duration;

/// Holds the dispatch loop to a fixed frame rate
#[derive(Debug, Clone)]
pub struct FramePacer<T: Timer> {
    timer: T,
    frame: Duration,
    frame_start: u64,
    frames: u64,
}

impl<T: Timer> FramePacer<T> {
    pub fn new(timer: T, fps: u32) -> Self {
        let frame_start = timer.now();
        Self {
            timer,
            frame: Duration::from_nanos(1_000_000_000 / fps.max(1) as u64),
            frame_start,
            frames: 0,
        }
    }

    /// Sleeps out the rest of the current frame, records the frame time and
    /// starts the next one. Returns how long it slept.
    pub fn finish_frame(&mut self) -> Duration {
        let busy = self.timer.elapsed(self.frame_start);
        let remaining = self.frame.saturating_sub(busy);
        self.timer.sleep(remaining);
        let total = self.timer.elapsed(self.frame_start);
        self.timer.record_frame(total);
        self.frame_start = self.timer.now();
        self.frames += 1;
        remaining
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Frames finished since the pacer was created
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualTimer;

    #[test]
    fn sleeps_remainder_of_frame() {
        let timer = ManualTimer::new();
        let mut pacer = FramePacer::new(timer.clone(), 50);
        timer.advance(Duration::from_millis(5));
        assert_eq!(pacer.finish_frame(), Duration::from_millis(15));
        assert_eq!(timer.now(), 20_000_000);
        assert_eq!(pacer.timer().frame_stats().samples, 1);
    }

    #[test]
    fn overrun_frame_does_not_sleep() {
        let timer = ManualTimer::new();
        let mut pacer = FramePacer::new(timer.clone(), 60);
        timer.advance(Duration::from_millis(40));
        assert_eq!(pacer.finish_frame(), Duration::ZERO);
    }

    #[test]
    fn stats_accumulate_across_frames() {
        let timer = ManualTimer::new();
        let mut pacer = FramePacer::new(timer.clone(), 50);
        for busy in [5, 10, 30] {
            timer.advance(Duration::from_millis(busy));
            pacer.finish_frame();
        }
        assert_eq!(pacer.frame_count(), 3);
        let stats = pacer.timer().frame_stats();
        assert_eq!(stats.samples, 3);
        assert_eq!(stats.max_frame_time_ns, 30_000_000.0);
        assert_eq!(stats.min_frame_time_ns, 20_000_000.0);
    }
}
