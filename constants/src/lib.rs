//! Shared tunables for the portfolio engine.
//!
//! Values are grouped by the stage that consumes them. Timings are in
//! milliseconds unless the name says otherwise.

/// Boot intro script and cadence.
pub mod boot;

/// Scene gate: code, camera focus, overlay timeline, load watchdog.
pub mod gate;

/// Procedural motion of the 3D decorations.
pub mod scene;

/// Portfolio page: navigation, badge, typewriter, contact form.
pub mod portfolio;
