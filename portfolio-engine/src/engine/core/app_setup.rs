use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::core::app_state::{AppState, notify_stage_changes};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::LoadingPlugin;
use crate::engine::motion::DecorRng;
use crate::engine::ui::text_field::TextFieldPlugin;
use crate::gate::SceneGatePlugin;
use crate::intro::BootIntroPlugin;
use crate::portfolio::PortfolioPlugin;
use crate::portfolio::content::SiteManifest;
use crate::rpc::web_rpc::WebRpcPlugin;

/// Marker for the camera that draws every stage's UI on top of its 3D views.
#[derive(Component)]
pub struct OverlayUiCamera;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .insert_resource(ClearColor(Color::BLACK))
        .init_state::<AppState>()
        .init_resource::<DecorRng>()
        .enable_state_scoped_entities::<AppState>()
        // Registers SiteManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<SiteManifest>::new(&["manifest.json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(LoadingPlugin)
        .add_plugins(TextFieldPlugin);

    // One plugin per stage, each scoping its entities to its own state.
    app.add_plugins(BootIntroPlugin)
        .add_plugins(SceneGatePlugin)
        .add_plugins(PortfolioPlugin);

    app.add_systems(Startup, spawn_overlay_ui_camera)
        .add_systems(Update, notify_stage_changes);

    app
}

/// Persistent 2D camera that renders all UI after the stage's 3D cameras.
fn spawn_overlay_ui_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Camera {
            order: 10,
            clear_color: ClearColorConfig::None,
            ..default()
        },
        IsDefaultUiCamera,
        OverlayUiCamera,
    ));
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
