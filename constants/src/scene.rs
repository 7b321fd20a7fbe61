use bevy::math::Vec3;

pub const DRONE_MODEL_PATH: &str = "drone.glb";
pub const DRONE_SCALE: f32 = 0.7;
pub const DRONE_ORBIT_RADIUS: f32 = 4.0;
pub const DRONE_ANGULAR_SPEED: f32 = 0.6;
pub const DRONE_AXIS_EASE: f32 = 0.04;
pub const DRONE_POSITION_EASE: f32 = 0.15;
pub const DRONE_BASE_HEIGHT: f32 = 1.2;
/// Seconds between axis retargets is drawn from `[MIN, MIN + SPREAD)`.
pub const DRONE_AXIS_RETARGET_MIN_SECS: f32 = 2.0;
pub const DRONE_AXIS_RETARGET_SPREAD_SECS: f32 = 2.0;
pub const ROTOR_SPIN_PER_FRAME: f32 = 0.3;

pub const STARSHIP_MODEL_PATH: &str = "starship.glb";
pub const STARSHIP_SCALE: f32 = 3.2;
pub const STARSHIP_YAW_PER_FRAME: f32 = 0.003;

pub const SPACE_ROBOT_MODEL_PATH: &str = "spacerobot.glb";
pub const ROBOT_SCALE: f32 = 1.6;
pub const ROBOT_FULL_RANGE_SCALE: f32 = 0.55;

/// Half extents of the region the hovering robot must stay inside.
pub const ROBOT_HALF_EXTENT_X: f32 = 1.25;
pub const ROBOT_HALF_EXTENT_Y: f32 = 1.1;
pub const ROBOT_FULL_RANGE_HALF_EXTENT: f32 = 1.25;
pub const ROBOT_WALK_EASE: f32 = 0.012;
pub const ROBOT_RETARGET_MIN_MS: u64 = 2600;
pub const ROBOT_RETARGET_SPREAD_MS: u64 = 1200;

pub const CHATTER_MIN_GAP_MS: u64 = 3000;
pub const CHATTER_GAP_SPREAD_MS: u64 = 4000;
pub const CHATTER_VISIBLE_MS: u64 = 2500;
pub const CHATTER_LINES: &[&str] = &[
    "Get in touch!",
    "Go on!",
    "Say hi!",
    "Ping me!",
    "Let's connect!",
    "Drop a message!",
    "Contact me!",
    "Reach out!",
];

pub const SECTION_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 1.2, 4.5);
pub const STARSHIP_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 8.0);

// Star background shells: (count, min radius, radius spread, min separation).
pub const FAR_STAR_COUNT: usize = 900;
pub const FAR_STAR_RADIUS: (f32, f32) = (60.0, 30.0);
pub const MEDIUM_STAR_COUNT: usize = 30;
pub const MEDIUM_STAR_RADIUS: (f32, f32) = (20.0, 40.0);
pub const MEDIUM_STAR_SEPARATION: f32 = 4.0;
pub const NEAR_STAR_COUNT: usize = 65;
pub const NEAR_STAR_RADIUS: (f32, f32) = (30.0, 50.0);
pub const NEAR_STAR_SEPARATION: f32 = 7.0;
/// Rejection sampling gives up after `count * STAR_ATTEMPT_FACTOR` draws.
pub const STAR_ATTEMPT_FACTOR: usize = 20;

pub const FAR_STAR_SPIN: f32 = 0.09;
pub const MEDIUM_STAR_SPIN: f32 = 0.13;
pub const NEAR_STAR_SPIN: f32 = 0.09;

/// Seed for decorative randomness. Decorations do not need OS entropy.
pub const SCENE_RNG_SEED: u64 = 0x5eed_0699;
