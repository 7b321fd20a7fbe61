/// Orbit/focus camera for the scene gate.
pub mod gate_camera;

pub use gate_camera::{GateCamera, GateSceneCamera, gate_camera_controller};
