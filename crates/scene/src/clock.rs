use std::time::{Duration, Instant};

/// Fixed-rate frame pacer.
///
/// The render loop asks [`FrameClock::is_due`] before stepping the scene, so
/// extra redraws from the window system never speed up the animation.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    next: Instant,
}

impl FrameClock {
    pub fn new(fps: u32, now: Instant) -> Self {
        let interval = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
        Self {
            interval,
            next: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the next frame should run.
    pub fn deadline(&self) -> Instant {
        self.next
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next
    }

    /// Record that a frame ran at `now` and schedule the following one.
    /// A loop that fell behind resumes from `now` instead of bursting to catch up.
    pub fn mark_frame(&mut self, now: Instant) {
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_fps_interval() {
        let clock = FrameClock::new(60, Instant::now());
        let ms = clock.interval().as_secs_f64() * 1000.0;
        assert!((ms - 16.666).abs() < 0.01);
    }

    #[test]
    fn first_frame_is_due_immediately() {
        let now = Instant::now();
        let clock = FrameClock::new(60, now);
        assert!(clock.is_due(now));
    }

    #[test]
    fn frames_are_spaced_by_interval() {
        let start = Instant::now();
        let mut clock = FrameClock::new(50, start);
        clock.mark_frame(start);
        assert_eq!(clock.deadline(), start + Duration::from_millis(20));
        assert!(!clock.is_due(start + Duration::from_millis(10)));
        assert!(clock.is_due(start + Duration::from_millis(20)));
    }

    #[test]
    fn late_frame_does_not_burst() {
        let start = Instant::now();
        let mut clock = FrameClock::new(50, start);
        let late = start + Duration::from_millis(500);
        clock.mark_frame(late);
        assert_eq!(clock.deadline(), late + Duration::from_millis(20));
    }

    #[test]
    fn zero_fps_is_treated_as_one() {
        let clock = FrameClock::new(0, Instant::now());
        assert_eq!(clock.interval(), Duration::from_secs(1));
    }
}
