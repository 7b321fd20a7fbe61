use bevy::prelude::*;
use bevy::window::PresentMode;

const WINDOW_TITLE: &str = "Portfolio";

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            title: WINDOW_TITLE.into(),
            canvas: Some("#bevy".into()),
            fit_canvas_to_parent: true,
            // Keys typed into text fields must not scroll the host page.
            prevent_default_event_handling: true,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: WINDOW_TITLE.into(),
            resolution: (1280., 800.).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
