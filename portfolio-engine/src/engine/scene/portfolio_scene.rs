use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use bevy::render::view::RenderLayers;
use constants::scene::{
    CHATTER_LINES, FAR_STAR_COUNT, FAR_STAR_RADIUS, FAR_STAR_SPIN, MEDIUM_STAR_COUNT,
    MEDIUM_STAR_RADIUS, MEDIUM_STAR_SEPARATION, MEDIUM_STAR_SPIN, NEAR_STAR_COUNT,
    NEAR_STAR_RADIUS, NEAR_STAR_SEPARATION, NEAR_STAR_SPIN, ROBOT_FULL_RANGE_SCALE, ROBOT_SCALE,
    SECTION_CAMERA_POSITION, SPACE_ROBOT_MODEL_PATH, STAR_ATTEMPT_FACTOR,
    STARSHIP_CAMERA_POSITION, STARSHIP_MODEL_PATH, STARSHIP_SCALE, STARSHIP_YAW_PER_FRAME,
};

use crate::engine::core::app_state::AppState;
use crate::engine::motion::DecorRng;
use crate::engine::motion::chatter::{ChatterChange, ChatterSchedule};
use crate::engine::motion::hover::{RoamingHover, gentle_hover};
use crate::engine::motion::stars::{ShellSpec, StarShell, sample_shell};
use crate::engine::scene::scene_tags::propagate_render_layers;
use crate::engine::scene::section_viewport::{DecorCamera, DecorSlot};
use crate::engine::ui::widgets::PAGE_BACKGROUND;

const STARSHIP_LAYER: usize = 1;
const ROBOT_LAYER: usize = 2;
const COMPANION_LAYER: usize = 3;

#[derive(Component)]
pub struct Starship;

#[derive(Debug, Clone, PartialEq)]
pub enum HoverMode {
    Gentle,
    Roaming(RoamingHover),
}

#[derive(Component, Debug, Clone)]
pub struct HoveringRobot {
    mode: HoverMode,
    scale: f32,
    t: f32,
}

/// Companion robot's speech bubble schedule.
#[derive(Component, Debug)]
pub struct RobotChatter(pub ChatterSchedule);

/// UI text node showing the companion robot's current line.
#[derive(Component)]
pub struct ChatterBubble;

pub fn spawn_star_background(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rng: ResMut<DecorRng>,
) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 220.0,
        ..default()
    });

    commands.spawn((
        Name::new("Star Camera"),
        Camera3d::default(),
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(PAGE_BACKGROUND),
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: 75f32.to_radians(),
            far: 200.0,
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, 1.0),
        StateScoped(AppState::Portfolio),
    ));

    let star_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });

    let shells = [
        (
            "Far Stars",
            ShellSpec {
                count: FAR_STAR_COUNT,
                radius_min: FAR_STAR_RADIUS.0,
                radius_spread: FAR_STAR_RADIUS.1,
                min_separation: None,
                attempt_factor: 1,
            },
            Vec3::new(1.0, -1.0, 0.0),
            FAR_STAR_SPIN,
            0.16,
        ),
        (
            "Medium Stars",
            ShellSpec {
                count: MEDIUM_STAR_COUNT,
                radius_min: MEDIUM_STAR_RADIUS.0,
                radius_spread: MEDIUM_STAR_RADIUS.1,
                min_separation: Some(MEDIUM_STAR_SEPARATION),
                attempt_factor: STAR_ATTEMPT_FACTOR,
            },
            Vec3::X,
            MEDIUM_STAR_SPIN,
            0.04,
        ),
        (
            "Near Stars",
            ShellSpec {
                count: NEAR_STAR_COUNT,
                radius_min: NEAR_STAR_RADIUS.0,
                radius_spread: NEAR_STAR_RADIUS.1,
                min_separation: Some(NEAR_STAR_SEPARATION),
                attempt_factor: STAR_ATTEMPT_FACTOR,
            },
            Vec3::new(-1.0, 1.0, 0.0),
            NEAR_STAR_SPIN,
            0.065,
        ),
    ];

    for (name, spec, axis, speed, star_radius) in shells {
        let positions = sample_shell(&spec, &mut rng.0);
        let mesh = meshes.add(Sphere::new(star_radius));
        debug!("{}: {} of {} placed", name, positions.len(), spec.count);

        commands
            .spawn((
                Name::new(name),
                StarShell {
                    axis: Dir3::new(axis).unwrap_or(Dir3::Y),
                    speed,
                },
                Transform::default(),
                Visibility::default(),
                StateScoped(AppState::Portfolio),
            ))
            .with_children(|shell| {
                for position in positions {
                    shell.spawn((
                        Mesh3d(mesh.clone()),
                        MeshMaterial3d(star_material.clone()),
                        Transform::from_translation(position),
                    ));
                }
            });
    }
}

fn decor_camera(
    name: &'static str,
    slot: DecorSlot,
    order: isize,
    layer: usize,
    fov_degrees: f32,
    position: Vec3,
) -> impl Bundle {
    (
        Name::new(name),
        Camera3d::default(),
        Camera {
            order,
            clear_color: ClearColorConfig::None,
            is_active: false,
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: fov_degrees.to_radians(),
            ..default()
        }),
        Transform::from_translation(position),
        RenderLayers::layer(layer),
        DecorCamera::new(slot),
        StateScoped(AppState::Portfolio),
    )
}

fn layer_light(layer: usize, illuminance: f32, from: Vec3) -> impl Bundle {
    (
        DirectionalLight {
            illuminance,
            ..default()
        },
        Transform::from_translation(from).looking_at(Vec3::ZERO, Vec3::Y),
        RenderLayers::layer(layer),
        StateScoped(AppState::Portfolio),
    )
}

pub fn spawn_section_decorations(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut rng: ResMut<DecorRng>,
) {
    commands.spawn(decor_camera(
        "Starship Camera",
        DecorSlot::Starship,
        1,
        STARSHIP_LAYER,
        40.0,
        STARSHIP_CAMERA_POSITION,
    ));
    commands.spawn(layer_light(STARSHIP_LAYER, 8_000.0, Vec3::new(2.0, 4.0, 4.0)));
    commands
        .spawn((
            Name::new("Starship"),
            SceneRoot(asset_server.load(GltfAssetLabel::Scene(0).from_asset(STARSHIP_MODEL_PATH))),
            Transform::from_scale(Vec3::splat(STARSHIP_SCALE)),
            Starship,
            RenderLayers::layer(STARSHIP_LAYER),
            StateScoped(AppState::Portfolio),
        ))
        .observe(propagate_render_layers);

    let robot_scene: Handle<Scene> =
        asset_server.load(GltfAssetLabel::Scene(0).from_asset(SPACE_ROBOT_MODEL_PATH));

    commands.spawn(decor_camera(
        "Robot Camera",
        DecorSlot::Robot,
        2,
        ROBOT_LAYER,
        45.0,
        SECTION_CAMERA_POSITION,
    ));
    commands.spawn(layer_light(ROBOT_LAYER, 4_000.0, Vec3::new(2.0, 4.0, 2.0)));
    commands
        .spawn((
            Name::new("Space Robot"),
            SceneRoot(robot_scene.clone()),
            Transform::from_scale(Vec3::splat(ROBOT_SCALE)),
            HoveringRobot {
                mode: HoverMode::Gentle,
                scale: ROBOT_SCALE,
                t: 0.0,
            },
            RenderLayers::layer(ROBOT_LAYER),
            StateScoped(AppState::Portfolio),
        ))
        .observe(propagate_render_layers);

    commands.spawn(decor_camera(
        "Companion Camera",
        DecorSlot::Companion,
        3,
        COMPANION_LAYER,
        45.0,
        SECTION_CAMERA_POSITION,
    ));
    commands.spawn(layer_light(COMPANION_LAYER, 4_000.0, Vec3::new(2.0, 4.0, 2.0)));
    let schedule = ChatterSchedule::new(CHATTER_LINES.len(), &mut rng.0);
    commands
        .spawn((
            Name::new("Companion Robot"),
            SceneRoot(robot_scene),
            Transform::from_scale(Vec3::splat(ROBOT_FULL_RANGE_SCALE)),
            HoveringRobot {
                mode: HoverMode::Roaming(RoamingHover::new(&mut rng.0)),
                scale: ROBOT_FULL_RANGE_SCALE,
                t: 0.0,
            },
            RobotChatter(schedule),
            RenderLayers::layer(COMPANION_LAYER),
            StateScoped(AppState::Portfolio),
        ))
        .observe(propagate_render_layers);
}

pub fn spin_star_shells(time: Res<Time>, mut shells: Query<(&StarShell, &mut Transform)>) {
    let dt = time.delta_secs();
    for (shell, mut transform) in &mut shells {
        transform.rotation = shell.spin(transform.rotation, dt);
    }
}

pub fn spin_starship(mut starships: Query<&mut Transform, With<Starship>>) {
    for mut transform in &mut starships {
        transform.rotate_y(STARSHIP_YAW_PER_FRAME);
    }
}

pub fn hover_robots(
    time: Res<Time>,
    mut rng: ResMut<DecorRng>,
    mut robots: Query<(&mut HoveringRobot, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (mut robot, mut transform) in &mut robots {
        robot.t += dt;
        let t = robot.t;
        let scale = robot.scale;
        let pose = match &mut robot.mode {
            HoverMode::Gentle => gentle_hover(t, scale),
            HoverMode::Roaming(roaming) => roaming.step(t, dt, scale, &mut rng.0),
        };
        *transform = pose.transform(scale);
    }
}

pub fn update_chatter_bubble(
    time: Res<Time>,
    mut rng: ResMut<DecorRng>,
    mut chatter: Query<&mut RobotChatter>,
    mut bubbles: Query<(&mut Text, &mut Visibility), With<ChatterBubble>>,
) {
    let dt = time.delta_secs();
    for mut schedule in &mut chatter {
        for change in schedule.0.step(dt, &mut rng.0) {
            for (mut text, mut visibility) in &mut bubbles {
                match change {
                    ChatterChange::Show(line) => {
                        text.0 = CHATTER_LINES.get(line).copied().unwrap_or_default().to_string();
                        *visibility = Visibility::Inherited;
                    }
                    ChatterChange::Hide => *visibility = Visibility::Hidden,
                }
            }
        }
    }
}
