use std::time::Duration;

use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use constants::gate::MODEL_LOAD_TIMEOUT_MS;

use crate::engine::loading::progress::{LoadPhase, LoadingProgress};

/// Watches the gate's model files. Any failure, or not everything loaded
/// within the timeout, is terminal: there is no retry.
#[derive(Resource, Debug)]
pub struct ModelLoadWatchdog {
    handles: Vec<Handle<Gltf>>,
    elapsed: Duration,
    timeout: Duration,
}

impl ModelLoadWatchdog {
    pub fn new(handles: Vec<Handle<Gltf>>) -> Self {
        Self {
            handles,
            elapsed: Duration::ZERO,
            timeout: Duration::from_millis(MODEL_LOAD_TIMEOUT_MS),
        }
    }
}

/// Outcome after `elapsed` given how many of `total` files are loaded.
pub fn load_verdict(
    loaded: usize,
    total: usize,
    any_failed: bool,
    elapsed: Duration,
    timeout: Duration,
) -> LoadPhase {
    if any_failed {
        LoadPhase::Failed
    } else if loaded >= total {
        LoadPhase::Ready
    } else if elapsed >= timeout {
        LoadPhase::Failed
    } else {
        LoadPhase::Pending
    }
}

pub fn watch_model_loading(
    mut watchdog: ResMut<ModelLoadWatchdog>,
    mut loading_progress: ResMut<LoadingProgress>,
    asset_server: Res<AssetServer>,
    time: Res<Time>,
) {
    if loading_progress.gate_models.is_settled() {
        return;
    }
    watchdog.elapsed += time.delta();

    let loaded = watchdog
        .handles
        .iter()
        .filter(|handle| asset_server.is_loaded_with_dependencies(*handle))
        .count();
    let any_failed = watchdog.handles.iter().any(|handle| {
        matches!(
            asset_server.get_load_state(handle),
            Some(LoadState::Failed(_))
        )
    });

    let verdict = load_verdict(
        loaded,
        watchdog.handles.len(),
        any_failed,
        watchdog.elapsed,
        watchdog.timeout,
    );
    match verdict {
        LoadPhase::Ready => info!("✓ Gate models loaded"),
        LoadPhase::Failed if any_failed => error!("Gate model failed to load"),
        LoadPhase::Failed => error!(
            "Gate models not loaded after {} ms",
            watchdog.timeout.as_millis()
        ),
        LoadPhase::Pending => {}
    }
    loading_progress.gate_models = verdict;
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(30);

    #[test]
    fn pending_until_everything_loads() {
        let early = Duration::from_secs(1);
        assert_eq!(load_verdict(0, 2, false, early, TIMEOUT), LoadPhase::Pending);
        assert_eq!(load_verdict(1, 2, false, early, TIMEOUT), LoadPhase::Pending);
        assert_eq!(load_verdict(2, 2, false, early, TIMEOUT), LoadPhase::Ready);
    }

    #[test]
    fn failure_or_timeout_is_terminal() {
        let early = Duration::from_secs(1);
        assert_eq!(load_verdict(1, 2, true, early, TIMEOUT), LoadPhase::Failed);
        assert_eq!(load_verdict(1, 2, false, TIMEOUT, TIMEOUT), LoadPhase::Failed);
        // Loaded just in time still counts.
        assert_eq!(load_verdict(2, 2, false, TIMEOUT, TIMEOUT), LoadPhase::Ready);
    }
}
