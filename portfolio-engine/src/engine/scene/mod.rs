//! 3D content for the gate and portfolio stages.
//!
//! Entities spawned here are scoped to their stage, so leaving a stage
//! despawns its cameras, lights and models together.

pub mod gate_scene;
pub mod portfolio_scene;
pub mod ray;
pub mod scene_tags;
pub mod section_viewport;
