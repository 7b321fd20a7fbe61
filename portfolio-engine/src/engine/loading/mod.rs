//! Asset loading for the site manifest and the gate's 3D models.

use bevy::prelude::*;

/// Loads `site.manifest.json` and publishes it as a resource.
pub mod manifest_loader;

/// Load watchdog for the gate models.
pub mod model_loader;

/// Shared load phase bookkeeping.
pub mod progress;

use manifest_loader::{ManifestLoader, load_manifest_system, start_loading};
use progress::LoadingProgress;

pub struct LoadingPlugin;

impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoadingProgress>()
            .init_resource::<ManifestLoader>()
            .add_systems(Startup, start_loading)
            .add_systems(Update, load_manifest_system);
    }
}
