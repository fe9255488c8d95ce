use bevy::prelude::*;

use crate::constants::{DOUBLE_CLICK_RADIUS, DOUBLE_CLICK_SECONDS};

/// Remembers the previous primary click to recognise double-clicks
#[derive(Resource, Default, Debug)]
pub struct ClickTracker {
    last: Option<(f64, Vec2)>,
}

impl ClickTracker {
    /// Record a click at `time` (seconds) and screen position.
    ///
    /// Returns true when it completes a double-click. The pair is consumed so
    /// a third click starts over.
    pub fn register(&mut self, time: f64, screen_pos: Vec2) -> bool {
        let is_double = self.last.is_some_and(|(last_time, last_pos)| {
            time - last_time <= DOUBLE_CLICK_SECONDS
                && last_pos.distance(screen_pos) <= DOUBLE_CLICK_RADIUS
        });

        self.last = if is_double {
            None
        } else {
            Some((time, screen_pos))
        };
        is_double
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_click_is_not_double() {
        let mut tracker = ClickTracker::default();
        assert!(!tracker.register(1.0, Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn test_fast_nearby_clicks_are_double() {
        let mut tracker = ClickTracker::default();
        tracker.register(1.0, Vec2::new(10.0, 10.0));
        assert!(tracker.register(1.2, Vec2::new(12.0, 11.0)));
    }

    #[test]
    fn test_slow_clicks_are_not_double() {
        let mut tracker = ClickTracker::default();
        tracker.register(1.0, Vec2::new(10.0, 10.0));
        assert!(!tracker.register(2.0, Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn test_distant_clicks_are_not_double() {
        let mut tracker = ClickTracker::default();
        tracker.register(1.0, Vec2::new(10.0, 10.0));
        assert!(!tracker.register(1.1, Vec2::new(60.0, 10.0)));
    }

    #[test]
    fn test_third_click_starts_over() {
        let mut tracker = ClickTracker::default();
        tracker.register(1.0, Vec2::ZERO);
        assert!(tracker.register(1.1, Vec2::ZERO));
        assert!(!tracker.register(1.2, Vec2::ZERO));
    }

    #[test]
    fn test_reset_forgets_previous_click() {
        let mut tracker = ClickTracker::default();
        tracker.register(1.0, Vec2::ZERO);
        tracker.reset();
        assert!(!tracker.register(1.1, Vec2::ZERO));
    }
}
