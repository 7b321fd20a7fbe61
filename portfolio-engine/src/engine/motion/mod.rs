//! Per-frame motion of the 3D decorations.
//!
//! Everything here is plain state plus a `step` function so the motion can be
//! exercised without a renderer. Systems in `engine::scene` feed these with
//! frame time and copy the result into transforms.

use bevy::prelude::*;
use constants::scene::SCENE_RNG_SEED;
use rand::SeedableRng;
use rand::rngs::SmallRng;

pub mod chatter;
pub mod drone;
pub mod hover;
pub mod stars;

/// Shared randomness for decorations. Seeded, so runs look the same.
#[derive(Resource)]
pub struct DecorRng(pub SmallRng);

impl Default for DecorRng {
    fn default() -> Self {
        Self(SmallRng::seed_from_u64(SCENE_RNG_SEED))
    }
}
