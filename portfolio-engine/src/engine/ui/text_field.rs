use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;

use crate::engine::ui::widgets::{TEXT_MUTED, TEXT_PRIMARY};

/// Single editable text box. Spawn it on a `Button` node with one
/// [`TextFieldDisplay`] text child; the plugin takes care of focus, typing
/// and drawing.
#[derive(Component, Debug, Clone)]
pub struct TextField {
    pub value: String,
    pub placeholder: String,
    /// Maximum length in chars.
    pub max_len: usize,
    /// Enter inserts a newline instead of submitting.
    pub multiline: bool,
    pub enabled: bool,
}

impl TextField {
    pub fn new(placeholder: impl Into<String>, max_len: usize) -> Self {
        Self {
            value: String::new(),
            placeholder: placeholder.into(),
            max_len,
            multiline: false,
            enabled: true,
        }
    }

    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    fn rendered(&self, focused: bool) -> (String, bool) {
        let caret = if focused { "|" } else { "" };
        if self.value.is_empty() && !focused {
            (self.placeholder.clone(), true)
        } else {
            (format!("{}{}", self.value, caret), false)
        }
    }
}

#[derive(Component)]
pub struct TextFieldDisplay;

/// The field receiving keyboard input, if any.
#[derive(Resource, Default, Debug)]
pub struct FocusedField(pub Option<Entity>);

/// Enter pressed in a single-line field.
#[derive(Event, Debug, Clone, Copy)]
pub struct TextFieldSubmitted {
    pub field: Entity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Edited,
    Submit,
    Ignored,
}

/// Apply one logical key press to `field`.
pub fn apply_key(field: &mut TextField, key: &Key) -> KeyOutcome {
    if !field.enabled {
        return KeyOutcome::Ignored;
    }

    match key {
        Key::Backspace => {
            if field.value.pop().is_some() {
                KeyOutcome::Edited
            } else {
                KeyOutcome::Ignored
            }
        }
        Key::Enter if field.multiline => push_chars(field, "\n"),
        Key::Enter => KeyOutcome::Submit,
        Key::Space => push_chars(field, " "),
        Key::Character(text) => push_chars(field, text.as_str()),
        _ => KeyOutcome::Ignored,
    }
}

fn push_chars(field: &mut TextField, text: &str) -> KeyOutcome {
    let mut len = field.value.chars().count();
    let mut edited = false;
    for c in text.chars() {
        if len >= field.max_len {
            break;
        }
        if c.is_control() && c != '\n' {
            continue;
        }
        field.value.push(c);
        len += 1;
        edited = true;
    }

    if edited {
        KeyOutcome::Edited
    } else {
        KeyOutcome::Ignored
    }
}

pub struct TextFieldPlugin;

impl Plugin for TextFieldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FocusedField>()
            .add_event::<TextFieldSubmitted>()
            .add_systems(
                Update,
                (focus_text_fields, type_into_focused_field, render_text_fields).chain(),
            );
    }
}

/// Pressing a field focuses it; pressing anywhere else drops focus.
fn focus_text_fields(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    fields: Query<(Entity, &Interaction, &TextField)>,
    mut focused: ResMut<FocusedField>,
) {
    let pressed_now = mouse.just_pressed(MouseButton::Left) || touches.any_just_pressed();
    if !pressed_now {
        // A field can be disabled or despawned while it holds focus.
        if let Some(entity) = focused.0 {
            if fields.get(entity).map_or(true, |(_, _, field)| !field.enabled) {
                focused.0 = None;
            }
        }
        return;
    }

    let target = fields
        .iter()
        .find(|(_, interaction, field)| **interaction == Interaction::Pressed && field.enabled)
        .map(|(entity, _, _)| entity);
    if focused.0 != target {
        focused.0 = target;
    }
}

fn type_into_focused_field(
    mut keyboard_events: EventReader<KeyboardInput>,
    focused: Res<FocusedField>,
    mut fields: Query<&mut TextField>,
    mut submitted: EventWriter<TextFieldSubmitted>,
) {
    let Some(entity) = focused.0 else {
        keyboard_events.clear();
        return;
    };
    let Ok(mut field) = fields.get_mut(entity) else {
        keyboard_events.clear();
        return;
    };

    for event in keyboard_events.read() {
        if event.state != ButtonState::Pressed {
            continue;
        }
        // Only mutate through DerefMut when something changes.
        let mut scratch = field.clone();
        match apply_key(&mut scratch, &event.logical_key) {
            KeyOutcome::Edited => field.value = scratch.value,
            KeyOutcome::Submit => {
                submitted.write(TextFieldSubmitted { field: entity });
            }
            KeyOutcome::Ignored => {}
        }
    }
}

fn render_text_fields(
    focused: Res<FocusedField>,
    fields: Query<(Entity, &TextField, &Children)>,
    mut displays: Query<(&mut Text, &mut TextColor), With<TextFieldDisplay>>,
) {
    for (entity, field, children) in &fields {
        let (content, is_placeholder) = field.rendered(focused.0 == Some(entity));
        let color = if is_placeholder || !field.enabled {
            TEXT_MUTED
        } else {
            TEXT_PRIMARY
        };

        for child in children.iter() {
            let Ok((mut text, mut text_color)) = displays.get_mut(child) else {
                continue;
            };
            if text.0 != content {
                text.0 = content.clone();
            }
            if text_color.0 != color {
                text_color.0 = color;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(text: &str) -> Key {
        Key::Character(text.into())
    }

    #[test]
    fn typing_appends_and_backspace_removes_chars() {
        let mut field = TextField::new("Code", 8);
        assert_eq!(apply_key(&mut field, &chars("6")), KeyOutcome::Edited);
        apply_key(&mut field, &chars("é"));
        apply_key(&mut field, &Key::Space);
        assert_eq!(field.value, "6é ");

        assert_eq!(apply_key(&mut field, &Key::Backspace), KeyOutcome::Edited);
        assert_eq!(apply_key(&mut field, &Key::Backspace), KeyOutcome::Edited);
        assert_eq!(field.value, "6");
        apply_key(&mut field, &Key::Backspace);
        assert_eq!(apply_key(&mut field, &Key::Backspace), KeyOutcome::Ignored);
    }

    #[test]
    fn length_is_capped_in_chars() {
        let mut field = TextField::new("", 3);
        apply_key(&mut field, &chars("ab"));
        assert_eq!(apply_key(&mut field, &chars("✓✓")), KeyOutcome::Edited);
        assert_eq!(field.value, "ab✓");
        assert_eq!(apply_key(&mut field, &chars("x")), KeyOutcome::Ignored);
    }

    #[test]
    fn enter_submits_single_line_and_breaks_multiline() {
        let mut code = TextField::new("", 8);
        code.value = "699".into();
        assert_eq!(apply_key(&mut code, &Key::Enter), KeyOutcome::Submit);
        assert_eq!(code.value, "699");

        let mut message = TextField::new("Your Message", 100).multiline();
        apply_key(&mut message, &chars("hi"));
        assert_eq!(apply_key(&mut message, &Key::Enter), KeyOutcome::Edited);
        assert_eq!(message.value, "hi\n");
    }

    #[test]
    fn disabled_field_ignores_everything() {
        let mut field = TextField::new("", 8);
        field.value = "69".into();
        field.enabled = false;
        for key in [chars("9"), Key::Backspace, Key::Enter, Key::Space] {
            assert_eq!(apply_key(&mut field, &key), KeyOutcome::Ignored);
        }
        assert_eq!(field.value, "69");
    }

    #[test]
    fn control_chars_and_other_keys_are_dropped() {
        let mut field = TextField::new("", 8);
        assert_eq!(apply_key(&mut field, &chars("\u{8}")), KeyOutcome::Ignored);
        assert_eq!(apply_key(&mut field, &Key::Tab), KeyOutcome::Ignored);
        assert_eq!(apply_key(&mut field, &Key::ArrowLeft), KeyOutcome::Ignored);
        assert!(field.value.is_empty());
    }

    #[test]
    fn placeholder_only_when_empty_and_unfocused() {
        let mut field = TextField::new("Your Name", 8);
        assert_eq!(field.rendered(false), ("Your Name".to_string(), true));
        assert_eq!(field.rendered(true), ("|".to_string(), false));
        field.value = "Ada".into();
        assert_eq!(field.rendered(false), ("Ada".to_string(), false));
    }
}
