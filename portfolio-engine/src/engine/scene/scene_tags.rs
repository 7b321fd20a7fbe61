use bevy::prelude::*;
use bevy::render::view::RenderLayers;
use bevy::scene::SceneInstanceReady;
use constants::scene::ROTOR_SPIN_PER_FRAME;

/// A node of a loaded model that spins in place every frame.
#[derive(Component)]
pub struct Rotor;

fn is_rotor_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("propeller") || lower.contains("rotor")
}

/// Tag propeller nodes of a freshly spawned glTF scene.
pub fn tag_rotors(
    trigger: Trigger<SceneInstanceReady>,
    children: Query<&Children>,
    names: Query<&Name>,
    mut commands: Commands,
) {
    let mut tagged = 0;
    for entity in children.iter_descendants(trigger.target()) {
        if names.get(entity).is_ok_and(|name| is_rotor_name(name.as_str())) {
            commands.entity(entity).insert(Rotor);
            tagged += 1;
        }
    }
    debug!("Tagged {} rotor nodes", tagged);
}

/// glTF scenes spawn their meshes as children, which do not inherit the
/// root's render layers. Copy them down once the scene is in the world.
pub fn propagate_render_layers(
    trigger: Trigger<SceneInstanceReady>,
    roots: Query<&RenderLayers>,
    children: Query<&Children>,
    mut commands: Commands,
) {
    let root = trigger.target();
    let Ok(layers) = roots.get(root) else {
        return;
    };
    for entity in children.iter_descendants(root) {
        commands.entity(entity).insert(layers.clone());
    }
}

/// Rotors turn a fixed angle per frame, not per second.
pub fn spin_rotors(mut rotors: Query<&mut Transform, With<Rotor>>) {
    for mut transform in &mut rotors {
        transform.rotate_local_y(ROTOR_SPIN_PER_FRAME);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotor_names_match_case_insensitively() {
        assert!(is_rotor_name("Propeller_FL"));
        assert!(is_rotor_name("rear ROTOR.001"));
        assert!(!is_rotor_name("Body"));
    }
}
