//! Boot intro: a terminal that prints a fixed script and then hands off to
//! the scene gate.

use std::time::Duration;

use bevy::prelude::*;
use constants::boot::{BOOT_FONT_SIZE, BOOT_SCRIPT, BOOT_TOTAL_DURATION_MS, BOOT_TRAILING_PAUSE_MS};

use crate::engine::core::app_state::{AppState, advance_stage};
use crate::engine::ui::widgets::{TERMINAL_GREEN, text_bundle};

pub mod boot;

use boot::{BootEvent, BootSequencer};

#[derive(Resource)]
struct BootPlayback(BootSequencer);

#[derive(Component)]
struct BootLog;

#[derive(Component)]
struct BootCursor(Timer);

pub struct BootIntroPlugin;

impl Plugin for BootIntroPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Boot), spawn_boot_terminal)
            .add_systems(
                Update,
                (play_boot_script, blink_cursor).run_if(in_state(AppState::Boot)),
            )
            .add_systems(OnExit(AppState::Boot), finish_boot);
    }
}

fn spawn_boot_terminal(mut commands: Commands) {
    commands.insert_resource(BootPlayback(BootSequencer::new(
        BOOT_SCRIPT.iter().copied(),
        Duration::from_millis(BOOT_TOTAL_DURATION_MS),
        Duration::from_millis(BOOT_TRAILING_PAUSE_MS),
    )));

    commands
        .spawn((
            Name::new("Boot Terminal"),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(24.0)),
                row_gap: Val::Px(4.0),
                overflow: Overflow::clip(),
                ..default()
            },
            BackgroundColor(Color::BLACK),
            StateScoped(AppState::Boot),
        ))
        .with_children(|terminal| {
            terminal.spawn((
                Node {
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(4.0),
                    ..default()
                },
                BootLog,
            ));
            terminal.spawn((
                text_bundle("_", BOOT_FONT_SIZE, TERMINAL_GREEN),
                BootCursor(Timer::from_seconds(0.5, TimerMode::Repeating)),
            ));
        });
}

fn play_boot_script(
    time: Res<Time>,
    mut playback: ResMut<BootPlayback>,
    log: Query<Entity, With<BootLog>>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut commands: Commands,
) {
    let Ok(log) = log.single() else {
        return;
    };

    for event in playback.0.advance(time.delta()) {
        match event {
            BootEvent::LineRevealed(index) => {
                let Some(line) = playback.0.revealed_lines().get(index).cloned() else {
                    continue;
                };
                commands.entity(log).with_children(|log| {
                    log.spawn(text_bundle(line, BOOT_FONT_SIZE, TERMINAL_GREEN));
                });
            }
            BootEvent::Complete => {
                advance_stage(*state.get(), AppState::Gate, &mut next_state);
            }
        }
    }
}

fn blink_cursor(time: Res<Time>, mut cursors: Query<(&mut BootCursor, &mut Visibility)>) {
    for (mut cursor, mut visibility) in &mut cursors {
        if cursor.0.tick(time.delta()).just_finished() {
            visibility.toggle_visible_hidden();
        }
    }
}

fn finish_boot(mut commands: Commands) {
    commands.remove_resource::<BootPlayback>();
    debug!("Boot intro torn down");
}
