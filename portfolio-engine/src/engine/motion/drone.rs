use bevy::prelude::*;
use constants::scene::{
    DRONE_ANGULAR_SPEED, DRONE_AXIS_EASE, DRONE_AXIS_RETARGET_MIN_SECS,
    DRONE_AXIS_RETARGET_SPREAD_SECS, DRONE_BASE_HEIGHT, DRONE_ORBIT_RADIUS, DRONE_POSITION_EASE,
};
use rand::Rng;

/// A drone orbiting the machine around a slowly wandering, mostly vertical axis.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct CirclingDrone {
    t: f32,
    axis: Vec3,
    target_axis: Vec3,
    since_retarget: f32,
    retarget_after: f32,
    position: Vec3,
}

impl CirclingDrone {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            t: 0.0,
            axis: Vec3::Y,
            target_axis: Vec3::Y,
            since_retarget: 0.0,
            retarget_after: retarget_delay(rng),
            position: Vec3::ZERO,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    pub fn step(&mut self, dt: f32, rng: &mut impl Rng) -> Vec3 {
        self.t += dt;
        self.axis += (self.target_axis - self.axis) * DRONE_AXIS_EASE;

        self.since_retarget += dt;
        if self.since_retarget > self.retarget_after {
            self.target_axis = random_tilted_axis(rng);
            self.since_retarget = 0.0;
            self.retarget_after = retarget_delay(rng);
        }

        let orbit = orbit_point(self.axis, self.t * DRONE_ANGULAR_SPEED, DRONE_ORBIT_RADIUS);
        let bob = (self.t * 1.2).sin() * 0.5 + (self.t * 0.7).sin() * 0.2;
        let target = Vec3::new(orbit.x, DRONE_BASE_HEIGHT + orbit.y + bob, orbit.z);

        self.position += (target - self.position) * DRONE_POSITION_EASE;
        self.position
    }
}

/// `(0, 0, radius)` rotated by `angle` around `axis`.
pub fn orbit_point(axis: Vec3, angle: f32, radius: f32) -> Vec3 {
    let axis = axis.normalize_or(Vec3::Y);
    Quat::from_axis_angle(axis, angle) * Vec3::new(0.0, 0.0, radius)
}

fn random_tilted_axis(rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        rng.random::<f32>() - 0.5,
        rng.random::<f32>() * 0.5 + 0.7,
        rng.random::<f32>() - 0.5,
    )
    .normalize_or(Vec3::Y)
}

fn retarget_delay(rng: &mut impl Rng) -> f32 {
    DRONE_AXIS_RETARGET_MIN_SECS + rng.random::<f32>() * DRONE_AXIS_RETARGET_SPREAD_SECS
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn orbit_keeps_its_radius() {
        let axis = Vec3::new(0.2, 0.9, -0.1);
        for i in 0..32 {
            let p = orbit_point(axis, i as f32 * 0.4, 4.0);
            assert!((p.length() - 4.0).abs() < 1e-4);
            // Orbit plane is perpendicular to the axis.
            assert!(p.dot(axis.normalize()).abs() < 1e-4);
        }
    }

    #[test]
    fn vertical_axis_orbits_in_the_ground_plane() {
        let quarter = orbit_point(Vec3::Y, std::f32::consts::FRAC_PI_2, 4.0);
        assert!((quarter - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn drone_stays_near_the_orbit_and_axis_stays_upright() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut drone = CirclingDrone::new(&mut rng);
        for _ in 0..60 * 20 {
            let p = drone.step(1.0 / 60.0, &mut rng);
            let horizontal = Vec2::new(p.x, p.z).length();
            assert!(horizontal <= DRONE_ORBIT_RADIUS + 1e-3);
            assert!(p.y.abs() < DRONE_BASE_HEIGHT + DRONE_ORBIT_RADIUS + 1.0);
            assert!(drone.axis().normalize().y > 0.5);
        }
    }

    #[test]
    fn position_eases_instead_of_jumping() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut drone = CirclingDrone::new(&mut rng);
        let first = drone.step(1.0 / 60.0, &mut rng);
        // One frame covers only 15% of the way out from the origin.
        assert!(first.length() < DRONE_ORBIT_RADIUS * 0.2);
    }
}
