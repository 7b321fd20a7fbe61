use bevy::math::Vec3;

/// The only code that opens the gate. Red 6, green 9, blue 9.
pub const GATE_CODE: &str = "699";

pub const GATE_CODE_MAX_LEN: usize = 8;

/// Orbit camera start position.
pub const CAMERA_START: Vec3 = Vec3::new(-3.0, 1.5, 7.0);

/// Focus target the camera is eased toward after the machine is clicked.
pub const CAMERA_FOCUS_TARGET: Vec3 = Vec3::new(0.0, 1.2, 6.5);
pub const CAMERA_FOCUS_LOOK_AT: Vec3 = Vec3::new(0.0, 1.2, 0.0);

/// Fraction of the remaining distance covered per frame while focused.
pub const CAMERA_FOCUS_DAMPING: f32 = 0.08;

pub const CAMERA_FOV_DEGREES: f32 = 55.0;
pub const ORBIT_ROTATE_SENSITIVITY: f32 = 0.005;
pub const ORBIT_ZOOM_SPEED: f32 = 0.4;
pub const ORBIT_MIN_DISTANCE: f32 = 2.5;
pub const ORBIT_MAX_DISTANCE: f32 = 20.0;

pub const MACHINE_MODEL_PATH: &str = "machine.glb";
pub const MACHINE_SCALE: f32 = 1.2;

/// Pick volume around the machine model, in model space before scaling.
pub const MACHINE_PICK_SIZE: Vec3 = Vec3::new(2.4, 2.6, 2.4);

/// Without a successful load after this long the gate shows the error state.
pub const MODEL_LOAD_TIMEOUT_MS: u64 = 30_000;

pub const HINT_VISIBLE_MS: u64 = 4000;
pub const HINT_TEXT: &str = "Remember RGB?!";

// Transition timeline, offsets from the moment the code is accepted.
pub const FLICKER_SCHEDULE_MS: &[(u64, bool)] = &[
    (500, true),
    (800, false),
    (1000, true),
    (1300, false),
    (1500, true),
    (1800, false),
];
pub const STRIPS_ON_MS: u64 = 0;
pub const BLACKOUT_ON_MS: u64 = 1700;
pub const REVEAL_AT_MS: u64 = 2100;

pub const STRIP_COUNT: usize = 38;
/// Strips appear at a random delay in `[0, STRIP_MAX_DELAY_MS)`.
pub const STRIP_MAX_DELAY_MS: u64 = 1700;
pub const STRIP_BLINK_PERIOD_MS: u64 = 180;

/// Scanline filter scroll period.
pub const SCANLINE_PERIOD_SECS: f32 = 0.25;
pub const SCANLINE_SPACING_PX: f32 = 16.0;
