use bevy::prelude::*;
use constants::scene::{
    ROBOT_FULL_RANGE_HALF_EXTENT, ROBOT_HALF_EXTENT_X, ROBOT_HALF_EXTENT_Y,
    ROBOT_RETARGET_MIN_MS, ROBOT_RETARGET_SPREAD_MS, ROBOT_WALK_EASE,
};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverPose {
    pub translation: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl HoverPose {
    pub fn transform(&self, scale: f32) -> Transform {
        Transform::from_translation(self.translation)
            .with_rotation(Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0))
            .with_scale(Vec3::splat(scale))
    }
}

/// Largest offset from centre that keeps a model of `scale` fully visible
/// inside a box of the given half extents.
pub fn visible_half_range(half_extent_x: f32, half_extent_y: f32, scale: f32) -> Vec2 {
    Vec2::new(
        (half_extent_x - scale * 0.6).max(0.0),
        (half_extent_y - scale * 0.8).max(0.0),
    )
}

fn clamp_symmetric(value: Vec2, half: Vec2) -> Vec2 {
    value.clamp(-half, half)
}

fn sway(t: f32) -> (f32, f32) {
    ((t * 0.7).sin() * 0.5, (t * 0.5).cos() * 0.13)
}

/// Gentle figure-of-eight hover used in the contact section.
pub fn gentle_hover(t: f32, scale: f32) -> HoverPose {
    let x = (t * 0.6).sin() * 0.85;
    let y = (t * 0.9).sin() * 0.32 - 0.1 + (t * 1.7).sin() * 0.13;
    let z = (t * 0.5).cos() * 0.45;

    let half = visible_half_range(ROBOT_HALF_EXTENT_X, ROBOT_HALF_EXTENT_Y, scale);
    let xy = clamp_symmetric(Vec2::new(x, y), half);
    let (yaw, pitch) = sway(t);

    HoverPose {
        translation: Vec3::new(xy.x, xy.y, z),
        yaw,
        pitch,
    }
}

/// Wider roaming hover: a slow random walk blended with a small orbit.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct RoamingHover {
    walk: Vec2,
    target: Vec2,
    retarget_in: f32,
}

impl RoamingHover {
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut hover = Self {
            walk: Vec2::ZERO,
            target: Vec2::ZERO,
            retarget_in: 0.0,
        };
        hover.retarget(rng);
        hover
    }

    fn retarget(&mut self, rng: &mut impl Rng) {
        self.target = Vec2::new(
            (rng.random::<f32>() * 2.0 - 1.0) * 1.1,
            (rng.random::<f32>() * 2.0 - 1.0) * 0.65,
        );
        let delay_ms =
            ROBOT_RETARGET_MIN_MS as f32 + rng.random::<f32>() * ROBOT_RETARGET_SPREAD_MS as f32;
        self.retarget_in = delay_ms / 1000.0;
    }

    pub fn step(&mut self, t: f32, dt: f32, scale: f32, rng: &mut impl Rng) -> HoverPose {
        self.retarget_in -= dt;
        if self.retarget_in <= 0.0 {
            self.retarget(rng);
        }

        self.walk += (self.target - self.walk) * ROBOT_WALK_EASE;
        let orbit = Vec2::new((t * 0.18).cos() * 0.45, (t * 0.18).sin() * 0.22);
        let mut xy = self.walk + orbit;
        xy.y += (t * 1.7).sin() * 0.09;

        let half = visible_half_range(
            ROBOT_FULL_RANGE_HALF_EXTENT,
            ROBOT_FULL_RANGE_HALF_EXTENT,
            scale,
        );
        let xy = clamp_symmetric(xy, half);
        let (yaw, pitch) = sway(t);

        HoverPose {
            translation: Vec3::new(xy.x, xy.y, (t * 0.5).cos() * 0.45),
            yaw,
            pitch,
        }
    }
}
