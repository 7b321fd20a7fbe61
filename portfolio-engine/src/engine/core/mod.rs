//! Core application setup and stage management.
//!
//! Handles application lifecycle, window configuration, stage transitions,
//! and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the stage plugins, the persistent UI camera
/// and platform-specific configurations.
pub mod app_setup;

/// Stage state machine: boot intro, scene gate, portfolio.
pub mod app_state;

/// Scoped listener registrations that detach when dropped.
pub mod subscription;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
