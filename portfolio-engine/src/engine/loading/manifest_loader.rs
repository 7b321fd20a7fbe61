use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::portfolio::SITE_MANIFEST_PATH;

use crate::engine::loading::progress::{LoadPhase, LoadingProgress};
use crate::portfolio::content::SiteManifest;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<SiteManifest>>,
}

// Start loading while the boot intro plays.
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    manifest_loader.handle = Some(asset_server.load(SITE_MANIFEST_PATH));
}

/// Publish the manifest as a resource once it arrives, or record the failure.
pub fn load_manifest_system(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    manifests: Res<Assets<SiteManifest>>,
) {
    if loading_progress.manifest.is_settled() {
        return;
    }
    let Some(handle) = manifest_loader.handle.as_ref() else {
        return;
    };

    if let Some(manifest) = manifests.get(handle) {
        info!(
            "✓ Site manifest loaded: {} skills, {} projects, {} extracurriculars",
            manifest.skills.len(),
            manifest.projects.len(),
            manifest.extracurriculars.len()
        );
        commands.insert_resource(manifest.clone());
        loading_progress.manifest = LoadPhase::Ready;
        return;
    }

    if let Some(LoadState::Failed(error)) = asset_server.get_load_state(handle) {
        error!("Failed to load {}: {}", SITE_MANIFEST_PATH, error);
        loading_progress.manifest = LoadPhase::Failed;
    }
}
