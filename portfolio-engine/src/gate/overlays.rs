use std::time::Duration;

use bevy::prelude::*;
use constants::gate::{
    SCANLINE_PERIOD_SECS, SCANLINE_SPACING_PX, STRIP_BLINK_PERIOD_MS, STRIP_COUNT,
    STRIP_MAX_DELAY_MS,
};
use rand::Rng;

use crate::engine::core::app_state::AppState;
use crate::engine::loading::progress::{LoadPhase, LoadingProgress};
use crate::engine::motion::DecorRng;
use crate::engine::ui::widgets::{TEXT_PRIMARY, text_bundle};
use crate::gate::machine::{GateMachine, GateState};

// Stacking order for everything the gate draws over its 3D view.
const Z_SCANLINE: i32 = 2;
pub(crate) const Z_PANEL: i32 = 5;
const Z_LOADING: i32 = 100;
const Z_STRIPS: i32 = 101;
const Z_FLICKER: i32 = 102;
const Z_BLACKOUT: i32 = 103;
const Z_MODEL_ERROR: i32 = 1000;

const OVERLAY_BLACK: Color = Color::srgb(0.067, 0.067, 0.067);
const STRIP_BRIGHT: Color = Color::srgb(0.114, 0.114, 0.114);

const MSG_LOADING_MODELS: &str = "Loading 3D Models...";
const MSG_MODELS_FAILED: &str = "Error loading 3D models. Please refresh the page.";
const BANNER_TEXT: &str = "Click the reactor to activate Portfolio";

#[derive(Component)]
pub struct FocusBanner;

#[derive(Component)]
pub struct ModelStatusText;

/// Covers the whole gate once the models have failed to load.
#[derive(Component)]
pub struct ModelErrorOverlay;

#[derive(Component)]
pub struct Scanlines;

#[derive(Component)]
pub struct LoadingDots;

#[derive(Component)]
pub struct LoadingDot {
    delay: f32,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct BlackStrip {
    delay: Duration,
}

#[derive(Component)]
pub struct FlickerOverlay;

#[derive(Component)]
pub struct BlackoutOverlay;

/// Opacity keyframes of the flicker layer over its 2 s loop.
const FLICKER_STEPS: [f32; 10] = [0.0, 0.7, 0.0, 0.8, 0.0, 0.9, 0.0, 0.7, 0.0, 1.0];

pub fn flicker_alpha(t: f32) -> f32 {
    let phase = t.rem_euclid(2.0) / 2.0;
    let step = ((phase * FLICKER_STEPS.len() as f32) as usize).min(FLICKER_STEPS.len() - 1);
    FLICKER_STEPS[step]
}

/// One of the three loading dots: dims to 0.2 at 40% of a 1 s cycle.
pub fn dot_alpha(t: f32, delay: f32) -> f32 {
    let phase = (t - delay).rem_euclid(1.0);
    if phase < 0.4 {
        0.7 - 0.5 * (phase / 0.4)
    } else if phase < 0.8 {
        0.2 + 0.5 * ((phase - 0.4) / 0.4)
    } else {
        0.7
    }
}

/// A strip is shown once its delay has passed, and alternates brightness
/// every half blink period.
pub fn strip_color(elapsed: Duration, delay: Duration) -> Option<Color> {
    let since = elapsed.checked_sub(delay)?;
    let half_period = (STRIP_BLINK_PERIOD_MS / 2).max(1) as u128;
    if (since.as_millis() / half_period) % 2 == 0 {
        Some(OVERLAY_BLACK)
    } else {
        Some(STRIP_BRIGHT)
    }
}

fn full_screen() -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(0.0),
        top: Val::Px(0.0),
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        ..default()
    }
}

pub fn spawn_gate_overlays(mut commands: Commands, mut rng: ResMut<DecorRng>) {
    commands.spawn((
        Name::new("Focus Banner"),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(28.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        GlobalZIndex(Z_PANEL),
        FocusBanner,
        StateScoped(AppState::Gate),
        children![text_bundle(BANNER_TEXT, 22.0, TEXT_PRIMARY)],
    ));

    commands.spawn((
        Name::new("Model Status"),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(32.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        GlobalZIndex(Z_PANEL),
        StateScoped(AppState::Gate),
        children![(text_bundle(MSG_LOADING_MODELS, 16.0, TEXT_PRIMARY), ModelStatusText)],
    ));

    commands.spawn((
        Name::new("Model Error"),
        Node {
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
            padding: UiRect::all(Val::Px(24.0)),
            ..full_screen()
        },
        BackgroundColor(OVERLAY_BLACK),
        // Swallows presses so nothing underneath reacts.
        Interaction::default(),
        Visibility::Hidden,
        GlobalZIndex(Z_MODEL_ERROR),
        ModelErrorOverlay,
        StateScoped(AppState::Gate),
        children![text_bundle(MSG_MODELS_FAILED, 20.0, TEXT_PRIMARY)],
    ));

    // Green scanlines drifting down one spacing per period.
    commands
        .spawn((
            Name::new("Scanlines"),
            full_screen(),
            GlobalZIndex(Z_SCANLINE),
            StateScoped(AppState::Gate),
        ))
        .with_children(|layer| {
            layer
                .spawn((
                    Node {
                        position_type: PositionType::Absolute,
                        width: Val::Percent(100.0),
                        flex_direction: FlexDirection::Column,
                        ..default()
                    },
                    Scanlines,
                ))
                .with_children(|lines| {
                    for _ in 0..200 {
                        lines.spawn((
                            Node {
                                width: Val::Percent(100.0),
                                height: Val::Px(SCANLINE_SPACING_PX),
                                padding: UiRect::top(Val::Px(7.0)),
                                ..default()
                            },
                            children![(
                                Node {
                                    width: Val::Percent(100.0),
                                    height: Val::Px(2.0),
                                    ..default()
                                },
                                BackgroundColor(Color::srgba(0.0, 1.0, 0.0, 0.18)),
                            )],
                        ));
                    }
                });
        });

    commands
        .spawn((
            Name::new("Loading Dots"),
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(8.0),
                ..default()
            },
            Visibility::Hidden,
            GlobalZIndex(Z_LOADING),
            LoadingDots,
            StateScoped(AppState::Gate),
        ))
        .with_children(|container| {
            container
                .spawn(Node {
                    column_gap: Val::Px(8.0),
                    ..default()
                })
                .with_children(|row| {
                    for delay in [0.0, 0.2, 0.4] {
                        row.spawn((
                            Node {
                                width: Val::Px(11.0),
                                height: Val::Px(11.0),
                                ..default()
                            },
                            BorderRadius::MAX,
                            BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.7)),
                            LoadingDot { delay },
                        ));
                    }
                });
            container.spawn(text_bundle("loading...", 18.0, TEXT_PRIMARY));
        });

    commands
        .spawn((
            Name::new("Black Strips"),
            full_screen(),
            GlobalZIndex(Z_STRIPS),
            StateScoped(AppState::Gate),
        ))
        .with_children(|layer| {
            for _ in 0..STRIP_COUNT {
                let delay =
                    Duration::from_millis(rng.0.random_range(0..=STRIP_MAX_DELAY_MS));
                let height = 2.0 + rng.0.random::<f32>() * 5.0;
                let top = rng.0.random::<f32>() * (100.0 - height);
                layer.spawn((
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Px(0.0),
                        width: Val::Percent(100.0),
                        top: Val::Vh(top),
                        height: Val::Vh(height),
                        ..default()
                    },
                    BackgroundColor(OVERLAY_BLACK),
                    Visibility::Hidden,
                    BlackStrip { delay },
                ));
            }
        });

    commands.spawn((
        Name::new("Flicker"),
        full_screen(),
        BackgroundColor(OVERLAY_BLACK.with_alpha(0.0)),
        Visibility::Hidden,
        GlobalZIndex(Z_FLICKER),
        FlickerOverlay,
        StateScoped(AppState::Gate),
    ));
    commands.spawn((
        Name::new("Blackout"),
        full_screen(),
        BackgroundColor(OVERLAY_BLACK),
        Visibility::Hidden,
        GlobalZIndex(Z_BLACKOUT),
        BlackoutOverlay,
        StateScoped(AppState::Gate),
    ));
}

fn show(visibility: &mut Visibility, visible: bool) {
    let wanted = if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    if *visibility != wanted {
        *visibility = wanted;
    }
}

#[allow(clippy::type_complexity)]
pub fn update_status_overlays(
    machine: Res<GateMachine>,
    progress: Res<LoadingProgress>,
    mut banner: Query<
        &mut Visibility,
        (With<FocusBanner>, Without<ModelStatusText>, Without<ModelErrorOverlay>),
    >,
    mut status: Query<&mut Visibility, (With<ModelStatusText>, Without<ModelErrorOverlay>)>,
    mut error: Query<&mut Visibility, With<ModelErrorOverlay>>,
) {
    let phase = progress.gate_models;
    for mut visibility in &mut banner {
        show(
            &mut visibility,
            phase == LoadPhase::Ready && machine.state() == GateState::Idle,
        );
    }
    for mut visibility in &mut status {
        show(&mut visibility, phase == LoadPhase::Pending);
    }
    for mut visibility in &mut error {
        show(&mut visibility, phase == LoadPhase::Failed);
    }
}

pub fn animate_scanlines(time: Res<Time>, mut scanlines: Query<&mut Node, With<Scanlines>>) {
    let phase = time.elapsed_secs().rem_euclid(SCANLINE_PERIOD_SECS) / SCANLINE_PERIOD_SECS;
    for mut node in &mut scanlines {
        node.top = Val::Px((phase - 1.0) * SCANLINE_SPACING_PX);
    }
}

/// Draw the transition overlays from the machine's derived flags.
#[allow(clippy::type_complexity)]
pub fn update_transition_overlays(
    time: Res<Time>,
    machine: Res<GateMachine>,
    mut dots: Query<&mut Visibility, With<LoadingDots>>,
    mut dot_colors: Query<(&LoadingDot, &mut BackgroundColor)>,
    mut strips: Query<
        (&BlackStrip, &mut BackgroundColor, &mut Visibility),
        (Without<LoadingDots>, Without<LoadingDot>),
    >,
    mut flicker: Query<
        (&mut BackgroundColor, &mut Visibility),
        (
            With<FlickerOverlay>,
            Without<BlackStrip>,
            Without<LoadingDot>,
            Without<LoadingDots>,
        ),
    >,
    mut blackout: Query<
        &mut Visibility,
        (
            With<BlackoutOverlay>,
            Without<FlickerOverlay>,
            Without<BlackStrip>,
            Without<LoadingDots>,
        ),
    >,
) {
    let flags = machine.overlay_flags();
    let elapsed = match machine.state() {
        GateState::Transitioning { elapsed } => elapsed,
        _ => Duration::ZERO,
    };
    let t = elapsed.as_secs_f32();

    for mut visibility in &mut dots {
        show(&mut visibility, flags.loading);
    }
    if flags.loading {
        for (dot, mut color) in &mut dot_colors {
            color.0 = Color::srgba(1.0, 1.0, 1.0, dot_alpha(time.elapsed_secs(), dot.delay));
        }
    }

    for (strip, mut color, mut visibility) in &mut strips {
        let shade = flags.strips.then(|| strip_color(elapsed, strip.delay)).flatten();
        show(&mut visibility, shade.is_some());
        if let Some(shade) = shade {
            color.0 = shade;
        }
    }

    for (mut color, mut visibility) in &mut flicker {
        show(&mut visibility, flags.flicker);
        if flags.flicker {
            color.0 = OVERLAY_BLACK.with_alpha(flicker_alpha(t));
        }
    }

    for mut visibility in &mut blackout {
        show(&mut visibility, flags.blackout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flicker_steps_through_its_keyframes() {
        assert_eq!(flicker_alpha(0.0), 0.0);
        assert_eq!(flicker_alpha(0.25), 0.7);
        assert_eq!(flicker_alpha(1.9), 1.0);
        assert_eq!(flicker_alpha(2.25), 0.7);
    }

    #[test]
    fn dots_dip_and_recover() {
        assert!((dot_alpha(0.0, 0.0) - 0.7).abs() < 1e-6);
        assert!((dot_alpha(0.4, 0.0) - 0.2).abs() < 1e-6);
        assert!((dot_alpha(0.9, 0.0) - 0.7).abs() < 1e-6);
        // Delayed dots lag the first one.
        assert!(dot_alpha(0.4, 0.2) > dot_alpha(0.4, 0.0));
    }

    #[test]
    fn strips_appear_after_their_delay_and_blink() {
        let delay = Duration::from_millis(500);
        assert_eq!(strip_color(Duration::from_millis(499), delay), None);
        assert_eq!(strip_color(Duration::from_millis(500), delay), Some(OVERLAY_BLACK));
        assert_eq!(strip_color(Duration::from_millis(600), delay), Some(STRIP_BRIGHT));
        assert_eq!(strip_color(Duration::from_millis(700), delay), Some(OVERLAY_BLACK));
    }
}
