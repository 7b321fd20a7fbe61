use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::gate::{
    CAMERA_FOCUS_DAMPING, CAMERA_FOCUS_LOOK_AT, CAMERA_FOCUS_TARGET, ORBIT_MAX_DISTANCE,
    ORBIT_MIN_DISTANCE, ORBIT_ROTATE_SENSITIVITY, ORBIT_ZOOM_SPEED,
};

use crate::gate::machine::GateMachine;

/// Marker for the camera rendering the gate scene.
#[derive(Component)]
pub struct GateSceneCamera;

/// Spherical orbit around the world origin.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GateCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

const PITCH_LIMIT: f32 = 1.45;

impl GateCamera {
    pub fn from_position(position: Vec3) -> Self {
        let distance = position.length().max(ORBIT_MIN_DISTANCE);
        let pitch = (position.y / distance).clamp(-1.0, 1.0).asin();
        let yaw = position.x.atan2(position.z);
        Self {
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            distance: distance.clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE),
        }
    }

    pub fn position(&self) -> Vec3 {
        let horizontal = self.distance * self.pitch.cos();
        Vec3::new(
            horizontal * self.yaw.sin(),
            self.distance * self.pitch.sin(),
            horizontal * self.yaw.cos(),
        )
    }

    pub fn rotate(&mut self, drag: Vec2) {
        self.yaw -= drag.x * ORBIT_ROTATE_SENSITIVITY;
        self.pitch = (self.pitch + drag.y * ORBIT_ROTATE_SENSITIVITY)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn zoom(&mut self, scroll_lines: f32) {
        self.distance = (self.distance - scroll_lines * ORBIT_ZOOM_SPEED)
            .clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }
}

/// One frame of the focus ease: move a fixed fraction toward the target.
pub fn focus_step(current: Vec3, target: Vec3, damping: f32) -> Vec3 {
    current.lerp(target, damping)
}

/// Orbit while the gate is idle; ease toward the machine while it is focused.
pub fn gate_camera_controller(
    gate: Res<GateMachine>,
    mut orbit: ResMut<GateCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    mut camera_query: Query<&mut Transform, With<GateSceneCamera>>,
    mut was_locked: Local<bool>,
) {
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };

    let drag: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
    let scroll: f32 = scroll_events
        .read()
        .map(|event| match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / 40.0,
        })
        .sum();

    if gate.camera_locked() {
        transform.translation =
            focus_step(transform.translation, CAMERA_FOCUS_TARGET, CAMERA_FOCUS_DAMPING);
        transform.look_at(CAMERA_FOCUS_LOOK_AT, Vec3::Y);
        *was_locked = true;
        return;
    }

    // Resume orbiting from wherever the focus ease left the camera.
    if *was_locked {
        *orbit = GateCamera::from_position(transform.translation);
        *was_locked = false;
    }

    if mouse_button.pressed(MouseButton::Left) {
        orbit.rotate(drag);
    }
    if scroll != 0.0 {
        orbit.zoom(scroll);
    }

    *transform = Transform::from_translation(orbit.position()).looking_at(Vec3::ZERO, Vec3::Y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::gate::CAMERA_START;

    #[test]
    fn orbit_round_trips_its_start_position() {
        let orbit = GateCamera::from_position(CAMERA_START);
        assert!((orbit.position() - CAMERA_START).length() < 1e-4);
    }

    #[test]
    fn focus_converges_on_target() {
        let mut position = CAMERA_START;
        let mut last_gap = position.distance(CAMERA_FOCUS_TARGET);
        for _ in 0..100 {
            position = focus_step(position, CAMERA_FOCUS_TARGET, CAMERA_FOCUS_DAMPING);
            let gap = position.distance(CAMERA_FOCUS_TARGET);
            assert!(gap < last_gap);
            last_gap = gap;
        }
        assert!(last_gap < 1e-3);
    }

    #[test]
    fn zoom_and_pitch_are_clamped() {
        let mut orbit = GateCamera::from_position(CAMERA_START);
        orbit.zoom(1000.0);
        assert_eq!(orbit.distance, ORBIT_MIN_DISTANCE);
        orbit.zoom(-1000.0);
        assert_eq!(orbit.distance, ORBIT_MAX_DISTANCE);

        orbit.rotate(Vec2::new(0.0, 100_000.0));
        assert_eq!(orbit.pitch, PITCH_LIMIT);
        assert!(orbit.position().y < orbit.distance);
    }
}
