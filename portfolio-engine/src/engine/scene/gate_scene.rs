use std::f32::consts::FRAC_PI_2;

use bevy::gltf::Gltf;
use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use constants::gate::{
    CAMERA_FOV_DEGREES, CAMERA_START, MACHINE_MODEL_PATH, MACHINE_PICK_SIZE, MACHINE_SCALE,
};
use constants::scene::{DRONE_MODEL_PATH, DRONE_SCALE};

use crate::engine::camera::GateSceneCamera;
use crate::engine::core::app_state::AppState;
use crate::engine::loading::model_loader::ModelLoadWatchdog;
use crate::engine::motion::DecorRng;
use crate::engine::motion::drone::CirclingDrone;
use crate::engine::scene::ray::ray_hits_obb;
use crate::engine::scene::scene_tags::tag_rotors;

/// Box in the entity's local space that counts as "the machine" for clicks.
#[derive(Component, Debug, Clone, Copy)]
pub struct PickBox {
    pub size: Vec3,
}

#[derive(Component)]
pub struct MachineModel;

const GATE_BACKDROP: Color = Color::srgb(0.035, 0.035, 0.055);

pub fn spawn_gate_scene(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rng: ResMut<DecorRng>,
) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 350.0,
        ..default()
    });

    commands.spawn((
        Name::new("Gate Camera"),
        Camera3d::default(),
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(GATE_BACKDROP),
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        Transform::from_translation(CAMERA_START).looking_at(Vec3::ZERO, Vec3::Y),
        GateSceneCamera,
        StateScoped(AppState::Gate),
    ));

    commands.spawn((
        Name::new("Gate Sun"),
        DirectionalLight {
            illuminance: 9_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        StateScoped(AppState::Gate),
    ));
    commands.spawn((
        Name::new("Machine Fill Light"),
        PointLight {
            intensity: 400_000.0,
            ..default()
        },
        Transform::from_xyz(0.0, 2.0, 2.0),
        StateScoped(AppState::Gate),
    ));

    // Platform disk with a translucent inner ring.
    let flat = Quat::from_rotation_x(-FRAC_PI_2);
    commands.spawn((
        Name::new("Platform"),
        Mesh3d(meshes.add(Circle::new(2.5))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(0xe6, 0xe6, 0xef),
            ..default()
        })),
        Transform::from_xyz(0.0, -1.2, 0.0).with_rotation(flat),
        StateScoped(AppState::Gate),
    ));
    commands.spawn((
        Name::new("Platform Ring"),
        Mesh3d(meshes.add(Circle::new(2.1))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba_u8(0xb0, 0xb0, 0xc0, 56),
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::from_xyz(0.0, -1.19, 0.0).with_rotation(flat),
        StateScoped(AppState::Gate),
    ));

    let machine_gltf: Handle<Gltf> = asset_server.load(MACHINE_MODEL_PATH);
    let drone_gltf: Handle<Gltf> = asset_server.load(DRONE_MODEL_PATH);

    commands.spawn((
        Name::new("Machine"),
        SceneRoot(asset_server.load(GltfAssetLabel::Scene(0).from_asset(MACHINE_MODEL_PATH))),
        Transform::from_scale(Vec3::splat(MACHINE_SCALE)),
        PickBox {
            size: MACHINE_PICK_SIZE,
        },
        MachineModel,
        StateScoped(AppState::Gate),
    ));

    commands
        .spawn((
            Name::new("Drone"),
            SceneRoot(asset_server.load(GltfAssetLabel::Scene(0).from_asset(DRONE_MODEL_PATH))),
            Transform::from_scale(Vec3::splat(DRONE_SCALE)),
            CirclingDrone::new(&mut rng.0),
            StateScoped(AppState::Gate),
        ))
        .observe(tag_rotors);

    commands.insert_resource(ModelLoadWatchdog::new(vec![machine_gltf, drone_gltf]));
    info!("Gate scene spawned");
}

pub fn animate_drone(
    time: Res<Time>,
    mut rng: ResMut<DecorRng>,
    mut drones: Query<(&mut CirclingDrone, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (mut drone, mut transform) in &mut drones {
        transform.translation = drone.step(dt, &mut rng.0);
    }
}

/// Nearest pickable entity under `cursor`, if any.
pub fn pick_under_cursor<'a>(
    camera: &Camera,
    camera_transform: &GlobalTransform,
    cursor: Vec2,
    targets: impl IntoIterator<Item = (Entity, &'a GlobalTransform, &'a PickBox)>,
) -> Option<Entity> {
    let ray = camera.viewport_to_world(camera_transform, cursor).ok()?;
    targets
        .into_iter()
        .filter_map(|(entity, transform, pick)| {
            ray_hits_obb(ray.origin, *ray.direction, transform, pick.size)
                .map(|distance| (entity, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, _)| entity)
}
