use bevy::prelude::*;

pub const ACCENT_RED: Color = Color::srgb(1.0, 0.09, 0.27);
pub const TERMINAL_GREEN: Color = Color::srgb(0.0, 1.0, 0.25);
pub const PAGE_BACKGROUND: Color = Color::srgb(0.027, 0.035, 0.051);
pub const PANEL_BACKGROUND: Color = Color::srgba(0.08, 0.08, 0.12, 0.82);
pub const TEXT_PRIMARY: Color = Color::srgb(0.95, 0.95, 0.97);
pub const TEXT_MUTED: Color = Color::srgba(0.85, 0.85, 0.9, 0.6);

/// Background colours a button cycles through as the pointer interacts.
#[derive(Component, Debug, Clone, Copy)]
pub struct ButtonPalette {
    pub idle: Color,
    pub hovered: Color,
    pub pressed: Color,
}

impl ButtonPalette {
    pub fn from_base(base: Color) -> Self {
        Self {
            idle: base,
            hovered: base.lighter(0.08),
            pressed: base.darker(0.06),
        }
    }
}

pub fn paint_button_interactions(
    mut q: Query<(&Interaction, &ButtonPalette, &mut BackgroundColor), Changed<Interaction>>,
) {
    for (interaction, palette, mut bg) in &mut q {
        *bg = BackgroundColor(match *interaction {
            Interaction::Pressed => palette.pressed,
            Interaction::Hovered => palette.hovered,
            Interaction::None => palette.idle,
        });
    }
}

pub fn text_bundle(text: impl Into<String>, font_size: f32, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
    )
}

/// A node's on-screen rectangle in logical pixels, origin top-left.
pub fn node_rect(computed: &ComputedNode, transform: &GlobalTransform) -> Rect {
    let scale = computed.inverse_scale_factor();
    Rect::from_center_size(
        transform.translation().truncate() * scale,
        computed.size() * scale,
    )
}

/// Whether the pointer is over any interactive UI this frame.
pub fn pointer_over_ui<'a>(interactions: impl IntoIterator<Item = &'a Interaction>) -> bool {
    interactions
        .into_iter()
        .any(|interaction| *interaction != Interaction::None)
}
