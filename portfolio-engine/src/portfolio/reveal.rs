use bevy::prelude::*;
use constants::portfolio::{SECTION_REVEAL_OFFSET_PX, SECTION_REVEAL_SECS};

/// One-shot slide-in for a section, started the first time its top edge
/// enters the viewport.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct SectionReveal {
    started: bool,
    elapsed: f32,
}

/// Visual state of a revealing section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealPose {
    pub opacity: f32,
    pub offset_y: f32,
}

impl SectionReveal {
    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_finished(&self) -> bool {
        self.started && self.elapsed >= SECTION_REVEAL_SECS
    }

    /// Start once the section's top is above the viewport bottom. Never resets.
    pub fn observe(&mut self, top: f32, viewport_height: f32) {
        if !self.started && top < viewport_height {
            self.started = true;
        }
    }

    pub fn advance(&mut self, dt: f32) -> RevealPose {
        if self.started {
            self.elapsed = (self.elapsed + dt).min(SECTION_REVEAL_SECS);
        }
        self.pose()
    }

    pub fn pose(&self) -> RevealPose {
        let t = if SECTION_REVEAL_SECS > 0.0 {
            (self.elapsed / SECTION_REVEAL_SECS).clamp(0.0, 1.0)
        } else {
            1.0
        };
        // Ease-out cubic.
        let eased = 1.0 - (1.0 - t).powi(3);
        RevealPose {
            opacity: eased,
            offset_y: (1.0 - eased) * SECTION_REVEAL_OFFSET_PX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_until_observed_in_view() {
        let mut reveal = SectionReveal::default();
        reveal.observe(1200.0, 800.0);
        let pose = reveal.advance(1.0);
        assert_eq!(pose.opacity, 0.0);
        assert_eq!(pose.offset_y, SECTION_REVEAL_OFFSET_PX);

        reveal.observe(700.0, 800.0);
        assert!(reveal.is_started());
        let pose = reveal.advance(SECTION_REVEAL_SECS * 2.0);
        assert_eq!(pose.opacity, 1.0);
        assert_eq!(pose.offset_y, 0.0);
        assert!(reveal.is_finished());
    }

    #[test]
    fn reveal_happens_once() {
        let mut reveal = SectionReveal::default();
        reveal.observe(100.0, 800.0);
        reveal.advance(SECTION_REVEAL_SECS);
        reveal.observe(5000.0, 800.0);
        assert_eq!(reveal.advance(0.1).opacity, 1.0);
    }
}
