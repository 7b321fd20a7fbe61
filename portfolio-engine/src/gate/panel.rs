use bevy::prelude::*;
use constants::gate::{GATE_CODE_MAX_LEN, HINT_TEXT, HINT_VISIBLE_MS};

use crate::engine::core::app_state::AppState;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::ui::text_field::{TextField, TextFieldDisplay, TextFieldSubmitted};
use crate::engine::ui::widgets::{
    ACCENT_RED, ButtonPalette, PANEL_BACKGROUND, TEXT_MUTED, TEXT_PRIMARY, text_bundle,
};
use crate::gate::GateEvents;
use crate::gate::machine::GateMachine;
use crate::gate::overlays::Z_PANEL;

#[derive(Component)]
pub struct ControlPanel;

#[derive(Component)]
pub struct HintButton;

#[derive(Component)]
pub struct HintPopup(Timer);

#[derive(Component)]
pub struct BackButton;

#[derive(Component)]
pub struct CodeField;

#[derive(Component)]
pub struct EnterButton;

const FIELD_BACKGROUND: Color = Color::srgba(1.0, 1.0, 1.0, 0.08);

fn small_button(label: &str, base: Color) -> impl Bundle + use<> {
    (
        Button,
        Node {
            padding: UiRect::axes(Val::Px(14.0), Val::Px(6.0)),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        BorderRadius::all(Val::Px(4.0)),
        BackgroundColor(base),
        ButtonPalette::from_base(base),
        children![text_bundle(label, 15.0, TEXT_PRIMARY)],
    )
}

fn digit(value: &str, color: Color) -> impl Bundle + use<> {
    text_bundle(value, 22.0, color)
}

fn spawn_control_panel(commands: &mut Commands) {
    let indicator = |color: Color| {
        (
            Node {
                width: Val::Px(10.0),
                height: Val::Px(10.0),
                ..default()
            },
            BorderRadius::MAX,
            BackgroundColor(color),
        )
    };

    commands
        .spawn((
            Name::new("Control Panel"),
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(32.0),
                top: Val::Percent(30.0),
                width: Val::Px(420.0),
                padding: UiRect::all(Val::Px(20.0)),
                column_gap: Val::Px(20.0),
                ..default()
            },
            BorderRadius::all(Val::Px(10.0)),
            BackgroundColor(PANEL_BACKGROUND),
            // Presses on the panel body must not count as clicks on empty space.
            Interaction::default(),
            GlobalZIndex(Z_PANEL),
            ControlPanel,
            StateScoped(AppState::Gate),
        ))
        .with_children(|panel| {
            panel
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    flex_grow: 1.0,
                    row_gap: Val::Px(6.0),
                    ..default()
                })
                .with_children(|left| {
                    left.spawn((small_button("?", Color::srgba(1.0, 1.0, 1.0, 0.12)), HintButton));
                    left.spawn((
                        text_bundle(HINT_TEXT, 14.0, ACCENT_RED),
                        Visibility::Hidden,
                        HintPopup(Timer::from_seconds(
                            HINT_VISIBLE_MS as f32 / 1000.0,
                            TimerMode::Once,
                        )),
                    ));
                    left.spawn(Node {
                        column_gap: Val::Px(6.0),
                        ..default()
                    })
                    .with_children(|row| {
                        row.spawn(indicator(Color::srgb_u8(0x00, 0xff, 0xb4)));
                        row.spawn(indicator(Color::srgb_u8(0xff, 0xb3, 0x00)));
                        row.spawn(indicator(Color::srgb_u8(0xff, 0x3b, 0x3b)));
                    });
                    left.spawn(text_bundle("Hey! Use some brains", 18.0, TEXT_PRIMARY));
                    left.spawn(Node {
                        column_gap: Val::Px(8.0),
                        ..default()
                    })
                    .with_children(|digits| {
                        digits.spawn(digit("9", Color::srgb(0.0, 0.5, 0.0)));
                        digits.spawn(digit("6", Color::srgb(1.0, 0.0, 0.0)));
                        digits.spawn(digit("9", Color::srgb_u8(0x21, 0x96, 0xf3)));
                    });
                    left.spawn(text_bundle(
                        "These are coloured. enter in order to reach my profile",
                        14.0,
                        TEXT_MUTED,
                    ));
                    left.spawn((small_button("Back", Color::srgba(1.0, 1.0, 1.0, 0.12)), BackButton));
                });

            panel
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    justify_content: JustifyContent::Center,
                    row_gap: Val::Px(10.0),
                    width: Val::Px(130.0),
                    ..default()
                })
                .with_children(|right| {
                    right.spawn((
                        Button,
                        Node {
                            padding: UiRect::all(Val::Px(8.0)),
                            min_height: Val::Px(36.0),
                            ..default()
                        },
                        BorderRadius::all(Val::Px(4.0)),
                        BackgroundColor(FIELD_BACKGROUND),
                        TextField::new("code", GATE_CODE_MAX_LEN),
                        CodeField,
                        children![(text_bundle("", 18.0, TEXT_PRIMARY), TextFieldDisplay)],
                    ));
                    right.spawn((small_button("Enter", ACCENT_RED), EnterButton));
                });
        });

    info!("Control panel opened");
}

/// Keep the panel in step with the machine: present while it is visible,
/// inputs disabled once the code has been accepted.
pub fn sync_control_panel(
    machine: Res<GateMachine>,
    panels: Query<Entity, With<ControlPanel>>,
    mut code_fields: Query<&mut TextField, With<CodeField>>,
    mut enter_buttons: Query<(&mut ButtonPalette, &mut BackgroundColor), With<EnterButton>>,
    mut commands: Commands,
) {
    let visible = machine.panel_visible();
    match (visible, panels.single()) {
        (true, Err(_)) => spawn_control_panel(&mut commands),
        (false, Ok(panel)) => commands.entity(panel).despawn(),
        _ => {}
    }

    let enabled = machine.accepts_code_input();
    for mut field in &mut code_fields {
        if field.enabled != enabled {
            field.enabled = enabled;
        }
    }
    for (mut palette, mut background) in &mut enter_buttons {
        let base = if enabled {
            ACCENT_RED
        } else {
            ACCENT_RED.with_alpha(0.35)
        };
        if palette.idle != base {
            *palette = ButtonPalette::from_base(base);
            background.0 = base;
        }
    }
}

#[allow(clippy::type_complexity)]
pub fn handle_panel_buttons(
    buttons: Query<
        (&Interaction, Has<HintButton>, Has<BackButton>, Has<EnterButton>),
        Changed<Interaction>,
    >,
    code_fields: Query<&TextField, With<CodeField>>,
    mut hints: Query<(&mut HintPopup, &mut Visibility)>,
    progress: Res<LoadingProgress>,
    mut machine: ResMut<GateMachine>,
    mut gate_events: EventWriter<GateEvents>,
) {
    if !progress.gate_ready() {
        return;
    }

    for (interaction, is_hint, is_back, is_enter) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }

        if is_hint {
            for (mut hint, mut visibility) in &mut hints {
                hint.0.reset();
                *visibility = Visibility::Inherited;
            }
        }
        if is_back {
            if let Some(event) = machine.unfocus() {
                gate_events.write(GateEvents(vec![event]));
            }
        }
        if is_enter {
            let entered = code_fields
                .single()
                .map(|field| field.value.clone())
                .unwrap_or_default();
            gate_events.write(GateEvents(machine.submit(&entered)));
        }
    }
}

pub fn submit_code_on_enter(
    mut submitted: EventReader<TextFieldSubmitted>,
    code_fields: Query<&TextField, With<CodeField>>,
    progress: Res<LoadingProgress>,
    mut machine: ResMut<GateMachine>,
    mut gate_events: EventWriter<GateEvents>,
) {
    if !progress.gate_ready() {
        submitted.clear();
        return;
    }

    for event in submitted.read() {
        let Ok(field) = code_fields.get(event.field) else {
            continue;
        };
        gate_events.write(GateEvents(machine.submit(&field.value)));
    }
}

pub fn expire_hint(time: Res<Time>, mut hints: Query<(&mut HintPopup, &mut Visibility)>) {
    for (mut hint, mut visibility) in &mut hints {
        if *visibility == Visibility::Hidden {
            continue;
        }
        if hint.0.tick(time.delta()).just_finished() {
            *visibility = Visibility::Hidden;
        }
    }
}
