//! Time-based transitions for the pane cross-fade and the toggle slide.
//!
//! A transition only affects how a frame is drawn. The state it animates
//! towards has already changed when the transition starts.

use std::time::{Duration, Instant};

/// Duration of the pane opacity cross-fade.
pub const PANE_FADE: Duration = Duration::from_millis(500);

/// Duration of the toggle indicator slide.
pub const TOGGLE_SLIDE: Duration = Duration::from_millis(250);

/// Interval between frames while a transition is running.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// A running animation with a fixed start and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    started_at: Instant,
    duration: Duration,
}

impl Transition {
    pub const fn new(started_at: Instant, duration: Duration) -> Self {
        Self {
            started_at,
            duration,
        }
    }

    /// Linear progress in `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn is_running(&self, now: Instant) -> bool {
        self.progress(now) < 1.0
    }
}

/// Progress of an optional transition; a missing one is finished.
pub fn progress_of(transition: Option<&Transition>, now: Instant) -> f32 {
    transition.map_or(1.0, |t| t.progress(now))
}

/// Linear interpolation between `from` and `to`.
pub fn lerp(from: f32, to: f32, progress: f32) -> f32 {
    (to - from).mul_add(progress.clamp(0.0, 1.0), from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_progress_starts_at_zero() {
        let start = Instant::now();
        let t = Transition::new(start, PANE_FADE);
        assert!(t.progress(start).abs() < f32::EPSILON);
        assert!(t.is_running(start));
    }

    #[test]
    fn test_progress_halfway() {
        let start = Instant::now();
        let t = Transition::new(start, PANE_FADE);
        let p = t.progress(start + Duration::from_millis(250));
        assert!((p - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_progress_clamps_after_end() {
        let start = Instant::now();
        let t = Transition::new(start, TOGGLE_SLIDE);
        assert!((t.progress(start + Duration::from_secs(5)) - 1.0).abs() < f32::EPSILON);
        assert!(!t.is_running(start + Duration::from_secs(5)));
    }

    #[test]
    fn test_zero_duration_is_finished() {
        let start = Instant::now();
        let t = Transition::new(start, Duration::ZERO);
        assert!((t.progress(start) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_missing_transition_is_finished() {
        assert!((progress_of(None, Instant::now()) - 1.0).abs() < f32::EPSILON);
    }

    proptest! {
        #[test]
        fn lerp_stays_between_endpoints(from in -20.0f32..20.0, to in -20.0f32..20.0, p in -1.0f32..2.0) {
            let v = lerp(from, to, p);
            let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
            prop_assert!(v >= lo - 1e-4 && v <= hi + 1e-4);
        }
    }
}
