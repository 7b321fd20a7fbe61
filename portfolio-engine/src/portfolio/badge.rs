use bevy::prelude::*;
use constants::portfolio::{BADGE_CLICK_SLOP_PX, BADGE_SIZE_PX, BADGE_START_BOTTOM, BADGE_START_X};

use crate::engine::core::subscription::Subscription;

/// How a press on the badge ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeRelease {
    /// Pointer stayed within the click slop: toggles the profile popup.
    Click,
    Drag,
}

#[derive(Debug)]
struct DragGesture {
    offset: Vec2,
    pressed_at: Vec2,
    travelled: f32,
    _capture: Subscription,
}

/// Floating profile badge the visitor can drag anywhere on screen.
///
/// Positions are logical pixels from the top-left corner of the window and
/// always satisfy `0 <= p <= max(0, viewport - size)` on both axes.
#[derive(Resource, Debug)]
pub struct DraggableBadge {
    position: Vec2,
    size: f32,
    gesture: Option<DragGesture>,
}

pub fn clamp_to_viewport(position: Vec2, size: f32, viewport: Vec2) -> Vec2 {
    let max = (viewport - Vec2::splat(size)).max(Vec2::ZERO);
    position.clamp(Vec2::ZERO, max)
}

impl DraggableBadge {
    pub fn new(viewport: Vec2) -> Self {
        let start = Vec2::new(BADGE_START_X, viewport.y - BADGE_START_BOTTOM);
        Self {
            position: clamp_to_viewport(start, BADGE_SIZE_PX, viewport),
            size: BADGE_SIZE_PX,
            gesture: None,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let local = point - self.position;
        local.x >= 0.0 && local.y >= 0.0 && local.x <= self.size && local.y <= self.size
    }

    /// Start a gesture if `pointer` is on the badge. Returns whether it was.
    pub fn press(&mut self, pointer: Vec2, frame: u32) -> bool {
        if !self.contains(pointer) {
            return false;
        }
        self.gesture = Some(DragGesture {
            offset: pointer - self.position,
            pressed_at: pointer,
            travelled: 0.0,
            _capture: Subscription::attach("badge-drag", frame),
        });
        true
    }

    pub fn drag_to(&mut self, pointer: Vec2, viewport: Vec2) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        gesture.travelled = gesture.travelled.max(pointer.distance(gesture.pressed_at));
        self.position = clamp_to_viewport(pointer - gesture.offset, self.size, viewport);
    }

    pub fn release(&mut self) -> Option<BadgeRelease> {
        let gesture = self.gesture.take()?;
        if gesture.travelled < BADGE_CLICK_SLOP_PX {
            Some(BadgeRelease::Click)
        } else {
            Some(BadgeRelease::Drag)
        }
    }

    /// Keep the stored position on screen after a window resize.
    pub fn reclamp(&mut self, viewport: Vec2) {
        self.position = clamp_to_viewport(self.position, self.size, viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_in_bounds(badge: &DraggableBadge, viewport: Vec2) {
        let p = badge.position();
        let max = (viewport - Vec2::splat(badge.size())).max(Vec2::ZERO);
        assert!(p.x >= 0.0 && p.x <= max.x, "x out of bounds: {p:?} in {viewport:?}");
        assert!(p.y >= 0.0 && p.y <= max.y, "y out of bounds: {p:?} in {viewport:?}");
    }

    #[test]
    fn starts_near_bottom_left() {
        let badge = DraggableBadge::new(Vec2::new(1280.0, 800.0));
        assert_eq!(badge.position(), Vec2::new(20.0, 720.0));
    }

    #[test]
    fn drag_keeps_pointer_offset() {
        let viewport = Vec2::new(1000.0, 800.0);
        let mut badge = DraggableBadge::new(viewport);
        assert!(badge.press(Vec2::new(30.0, 730.0), 1));
        badge.drag_to(Vec2::new(330.0, 430.0), viewport);
        assert_eq!(badge.position(), Vec2::new(320.0, 420.0));
        assert_eq!(badge.release(), Some(BadgeRelease::Drag));
        assert!(!badge.is_dragging());
    }

    #[test]
    fn press_outside_does_nothing() {
        let viewport = Vec2::new(1000.0, 800.0);
        let mut badge = DraggableBadge::new(viewport);
        assert!(!badge.press(Vec2::new(500.0, 100.0), 1));
        badge.drag_to(Vec2::new(0.0, 0.0), viewport);
        assert_eq!(badge.position(), Vec2::new(20.0, 720.0));
        assert_eq!(badge.release(), None);
    }

    #[test]
    fn stays_clamped_for_any_drag_and_viewport() {
        let viewports = [
            Vec2::new(1920.0, 1080.0),
            Vec2::new(375.0, 667.0),
            Vec2::new(41.0, 41.0),
            Vec2::new(10.0, 300.0),
        ];
        let deltas = [
            Vec2::new(-10_000.0, -10_000.0),
            Vec2::new(10_000.0, 10_000.0),
            Vec2::new(-5.0, 3000.0),
            Vec2::new(700.0, -1.0),
            Vec2::new(0.5, 0.5),
        ];

        for viewport in viewports {
            for delta in deltas {
                let mut badge = DraggableBadge::new(viewport);
                assert_in_bounds(&badge, viewport);
                let grab = badge.position() + Vec2::splat(1.0);
                badge.press(grab, 0);
                badge.drag_to(grab + delta, viewport);
                assert_in_bounds(&badge, viewport);
                badge.release();
            }
        }
    }

    #[test]
    fn short_press_is_a_click() {
        let viewport = Vec2::new(800.0, 600.0);
        let mut badge = DraggableBadge::new(viewport);
        let grab = badge.position() + Vec2::splat(20.0);
        badge.press(grab, 3);
        badge.drag_to(grab + Vec2::new(2.0, 1.0), viewport);
        assert_eq!(badge.release(), Some(BadgeRelease::Click));
    }

    #[test]
    fn travel_back_to_start_still_counts_as_drag() {
        let viewport = Vec2::new(800.0, 600.0);
        let mut badge = DraggableBadge::new(viewport);
        let grab = badge.position() + Vec2::splat(20.0);
        badge.press(grab, 3);
        badge.drag_to(grab + Vec2::new(200.0, -100.0), viewport);
        badge.drag_to(grab, viewport);
        assert_eq!(badge.release(), Some(BadgeRelease::Drag));
    }

    #[test]
    fn resize_reclamps_stored_position() {
        let mut badge = DraggableBadge::new(Vec2::new(1600.0, 1000.0));
        let grab = badge.position() + Vec2::splat(5.0);
        badge.press(grab, 0);
        badge.drag_to(Vec2::new(1500.0, 900.0), Vec2::new(1600.0, 1000.0));
        badge.release();

        let small = Vec2::new(640.0, 480.0);
        badge.reclamp(small);
        assert_eq!(badge.position(), Vec2::new(600.0, 440.0));
    }
}
