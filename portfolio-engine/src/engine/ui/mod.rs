/// Keyboard-editable text fields drawn with bevy_ui.
pub mod text_field;

/// Shared colours, button hover feedback and node geometry helpers.
pub mod widgets;
