use bevy::prelude::*;
use rand::Rng;

/// One rotating layer of the star background.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct StarShell {
    pub axis: Dir3,
    /// Radians per second.
    pub speed: f32,
}

impl StarShell {
    pub fn spin(&self, rotation: Quat, dt: f32) -> Quat {
        (rotation * Quat::from_axis_angle(*self.axis, self.speed * dt)).normalize()
    }
}

/// Placement rules for one shell of stars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellSpec {
    pub count: usize,
    pub radius_min: f32,
    pub radius_spread: f32,
    /// Minimum distance between any two stars; `None` disables the check.
    pub min_separation: Option<f32>,
    /// Draws allowed per requested star before giving up.
    pub attempt_factor: usize,
}

/// Uniform direction on the unit sphere.
fn random_direction(rng: &mut impl Rng) -> Vec3 {
    let phi = (2.0 * rng.random::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    let theta = std::f32::consts::TAU * rng.random::<f32>();
    Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
}

/// Star positions for a shell. With a separation rule this is rejection
/// sampling and may return fewer than `count` stars.
pub fn sample_shell(spec: &ShellSpec, rng: &mut impl Rng) -> Vec<Vec3> {
    let mut stars: Vec<Vec3> = Vec::with_capacity(spec.count);
    let max_attempts = spec.count.saturating_mul(spec.attempt_factor.max(1));
    let mut attempts = 0;

    while stars.len() < spec.count && attempts < max_attempts {
        attempts += 1;
        let radius = spec.radius_min + rng.random::<f32>() * spec.radius_spread;
        let candidate = random_direction(rng) * radius;

        let far_enough = spec.min_separation.is_none_or(|separation| {
            stars
                .iter()
                .all(|star| star.distance(candidate) > separation)
        });
        if far_enough {
            stars.push(candidate);
        }
    }

    stars
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn stars_lie_within_the_shell() {
        let spec = ShellSpec {
            count: 500,
            radius_min: 60.0,
            radius_spread: 30.0,
            min_separation: None,
            attempt_factor: 1,
        };
        let stars = sample_shell(&spec, &mut SmallRng::seed_from_u64(5));
        assert_eq!(stars.len(), 500);
        for star in stars {
            let r = star.length();
            assert!((60.0 - 1e-3..=90.0 + 1e-3).contains(&r));
        }
    }

    #[test]
    fn separated_shell_respects_minimum_distance() {
        let spec = ShellSpec {
            count: 65,
            radius_min: 30.0,
            radius_spread: 50.0,
            min_separation: Some(7.0),
            attempt_factor: 20,
        };
        let stars = sample_shell(&spec, &mut SmallRng::seed_from_u64(11));
        assert!(!stars.is_empty() && stars.len() <= 65);
        for (i, a) in stars.iter().enumerate() {
            for b in &stars[i + 1..] {
                assert!(a.distance(*b) > 7.0);
            }
        }
    }

    #[test]
    fn impossible_separation_gives_up() {
        let spec = ShellSpec {
            count: 50,
            radius_min: 1.0,
            radius_spread: 0.0,
            min_separation: Some(5.0),
            attempt_factor: 20,
        };
        let stars = sample_shell(&spec, &mut SmallRng::seed_from_u64(2));
        assert_eq!(stars.len(), 1);
    }

    #[test]
    fn spin_rotates_about_the_shell_axis() {
        let shell = StarShell {
            axis: Dir3::X,
            speed: std::f32::consts::FRAC_PI_2,
        };
        let rotation = shell.spin(Quat::IDENTITY, 1.0);
        let moved = rotation * Vec3::Y;
        assert!((moved - Vec3::Z).length() < 1e-5);
        assert!((rotation * Vec3::X - Vec3::X).length() < 1e-5);
    }
}
