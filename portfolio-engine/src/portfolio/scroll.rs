use constants::portfolio::SCROLL_EASE;

/// Wheel scrolling eased toward a target offset. Until the first layout
/// reports a range, the target is only kept non-negative and is clamped once
/// the range arrives.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SmoothScroll {
    current: f32,
    target: f32,
    max: Option<f32>,
}

impl SmoothScroll {
    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Update the scrollable range, keeping both offsets inside it.
    pub fn set_max(&mut self, max: f32) {
        let max = max.max(0.0);
        self.max = Some(max);
        self.current = self.current.clamp(0.0, max);
        self.target = self.target.clamp(0.0, max);
    }

    pub fn scroll_by(&mut self, delta: f32) {
        self.scroll_to(self.target + delta);
    }

    pub fn scroll_to(&mut self, offset: f32) {
        self.target = match self.max {
            Some(max) => offset.clamp(0.0, max),
            None => offset.max(0.0),
        };
    }

    /// Ease one frame toward the target. Returns whether the offset moved.
    pub fn step(&mut self) -> bool {
        self.step_with(SCROLL_EASE)
    }

    pub fn step_with(&mut self, ease: f32) -> bool {
        let remaining = self.target - self.current;
        if remaining == 0.0 {
            return false;
        }
        self.current = if remaining.abs() < 0.5 {
            self.target
        } else {
            self.current + remaining * ease
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eases_toward_target_and_settles() {
        let mut scroll = SmoothScroll::default();
        scroll.set_max(5000.0);
        scroll.scroll_by(480.0);

        assert!(scroll.step());
        assert!(scroll.current() > 0.0 && scroll.current() < 480.0);

        for _ in 0..200 {
            scroll.step();
        }
        assert_eq!(scroll.current(), 480.0);
        assert!(!scroll.step());
    }

    #[test]
    fn target_is_clamped_to_range() {
        let mut scroll = SmoothScroll::default();
        scroll.set_max(1000.0);
        scroll.scroll_by(-300.0);
        assert_eq!(scroll.target(), 0.0);
        scroll.scroll_to(4000.0);
        assert_eq!(scroll.target(), 1000.0);

        scroll.set_max(600.0);
        assert_eq!(scroll.target(), 600.0);
        scroll.set_max(-5.0);
        assert_eq!(scroll.target(), 0.0);
    }

    #[test]
    fn input_before_first_layout_is_kept() {
        let mut scroll = SmoothScroll::default();
        scroll.scroll_by(-50.0);
        assert_eq!(scroll.target(), 0.0);
        scroll.scroll_by(300.0);
        assert_eq!(scroll.target(), 300.0);

        scroll.set_max(2000.0);
        assert_eq!(scroll.target(), 300.0);
        scroll.scroll_by(5000.0);
        assert_eq!(scroll.target(), 2000.0);

        let mut short = SmoothScroll::default();
        short.scroll_by(900.0);
        short.set_max(400.0);
        assert_eq!(short.target(), 400.0);
    }
}
