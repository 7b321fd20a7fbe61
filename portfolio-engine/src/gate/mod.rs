//! Scene gate: an orbitable 3D scene whose machine must be clicked and
//! unlocked with a code before the portfolio is revealed.
//!
//! ```text
//!  click machine      next frame        code ok          2100 ms
//! idle ─────────▶ focused ─────────▶ code-entry ─────▶ transitioning ─────▶ revealed
//!   ▲                │                  │  ▲  wrong code
//!   └── miss / Back ─┴──────────────────┘  └──────┘
//! ```
//!
//! [`machine::GateMachine`] owns the progression; every system here either
//! feeds it input or draws what it reports.

use bevy::diagnostic::FrameCount;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::gate::CAMERA_START;

use crate::engine::camera::{GateCamera, GateSceneCamera, gate_camera_controller};
use crate::engine::core::app_state::{AppState, advance_stage};
use crate::engine::loading::model_loader::{ModelLoadWatchdog, watch_model_loading};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::gate_scene::{PickBox, animate_drone, pick_under_cursor, spawn_gate_scene};
use crate::engine::scene::scene_tags::spin_rotors;
use crate::engine::ui::widgets::{paint_button_interactions, pointer_over_ui};

pub mod machine;
pub mod overlays;
pub mod panel;
pub mod timeline;

use machine::{GateEvent, GateMachine, GateState};
use overlays::{
    animate_scanlines, spawn_gate_overlays, update_status_overlays, update_transition_overlays,
};
use panel::{expire_hint, handle_panel_buttons, submit_code_on_enter, sync_control_panel};

/// Everything the machine reported in one call, in order.
#[derive(Event, Debug, Clone)]
pub struct GateEvents(pub Vec<GateEvent>);

pub struct SceneGatePlugin;

impl Plugin for SceneGatePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<GateEvents>()
            .init_resource::<GateMachine>()
            .insert_resource(GateCamera::from_position(CAMERA_START))
            .add_systems(
                OnEnter(AppState::Gate),
                (reset_gate, spawn_gate_scene, spawn_gate_overlays),
            )
            .add_systems(
                Update,
                (
                    pick_machine,
                    open_panel_next_frame,
                    handle_panel_buttons,
                    submit_code_on_enter,
                    advance_transition,
                    react_to_gate_events,
                    sync_control_panel,
                )
                    .chain()
                    .run_if(in_state(AppState::Gate)),
            )
            .add_systems(
                Update,
                (
                    gate_camera_controller,
                    animate_drone,
                    spin_rotors,
                    expire_hint,
                    paint_button_interactions,
                    animate_scanlines,
                    update_status_overlays,
                    update_transition_overlays,
                    watch_model_loading.run_if(resource_exists::<ModelLoadWatchdog>),
                )
                    .run_if(in_state(AppState::Gate)),
            )
            .add_systems(OnExit(AppState::Gate), tear_down_gate);
    }
}

fn reset_gate(mut commands: Commands) {
    commands.insert_resource(GateMachine::default());
    commands.insert_resource(GateCamera::from_position(CAMERA_START));
}

fn tear_down_gate(mut commands: Commands) {
    commands.remove_resource::<ModelLoadWatchdog>();
    info!("Gate torn down");
}

fn pointer_pressed(
    windows: &Query<&Window, With<PrimaryWindow>>,
    mouse: &ButtonInput<MouseButton>,
    touches: &Touches,
) -> Option<Vec2> {
    if mouse.just_pressed(MouseButton::Left) {
        return windows.single().ok()?.cursor_position();
    }
    touches.iter_just_pressed().next().map(|touch| touch.position())
}

/// A press on the machine focuses it; a press on empty space unfocuses.
/// Nothing is pickable until the models have loaded.
#[allow(clippy::too_many_arguments)]
pub fn pick_machine(
    windows: Query<&Window, With<PrimaryWindow>>,
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    interactions: Query<&Interaction>,
    cameras: Query<(&Camera, &GlobalTransform), With<GateSceneCamera>>,
    targets: Query<(Entity, &GlobalTransform, &PickBox)>,
    progress: Res<LoadingProgress>,
    mut machine: ResMut<GateMachine>,
    mut gate_events: EventWriter<GateEvents>,
) {
    if !progress.gate_ready() {
        return;
    }
    let Some(cursor) = pointer_pressed(&windows, &mouse, &touches) else {
        return;
    };
    if pointer_over_ui(&interactions) {
        return;
    }
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };

    let hit = pick_under_cursor(camera, camera_transform, cursor, &targets);
    let event = match hit {
        Some(_) => machine.focus(),
        None => machine.unfocus(),
    };
    if let Some(event) = event {
        gate_events.write(GateEvents(vec![event]));
    }
}

/// The panel opens on the frame after focus, so the focusing click never
/// lands on it.
fn open_panel_next_frame(
    frame: Res<FrameCount>,
    mut focused_on: Local<Option<u32>>,
    mut machine: ResMut<GateMachine>,
    mut gate_events: EventWriter<GateEvents>,
) {
    if machine.state() != GateState::Focused {
        *focused_on = None;
        return;
    }

    match *focused_on {
        None => *focused_on = Some(frame.0),
        Some(at) if frame.0 > at => {
            if let Some(event) = machine.open_panel() {
                gate_events.write(GateEvents(vec![event]));
            }
            *focused_on = None;
        }
        Some(_) => {}
    }
}

fn advance_transition(
    time: Res<Time>,
    mut machine: ResMut<GateMachine>,
    mut gate_events: EventWriter<GateEvents>,
) {
    let events = machine.advance(time.delta());
    if !events.is_empty() {
        gate_events.write(GateEvents(events));
    }
}

fn react_to_gate_events(
    mut gate_events: EventReader<GateEvents>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for event in gate_events.read().flat_map(|batch| batch.0.iter()) {
        match event {
            GateEvent::Focused => info!("Machine focused"),
            GateEvent::Unfocused => info!("Machine unfocused"),
            GateEvent::PanelOpened => debug!("Code entry open"),
            GateEvent::CodeRejected => debug!("Code rejected"),
            GateEvent::TransitionStarted => info!("✓ Code accepted, starting transition"),
            GateEvent::Cue(cue) => debug!("Transition cue {:?}", cue),
            GateEvent::Revealed => {
                advance_stage(*state.get(), AppState::Portfolio, &mut next_state);
            }
        }
    }
}
