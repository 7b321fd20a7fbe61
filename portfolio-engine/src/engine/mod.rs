pub mod camera;
pub mod core;
pub mod loading;
pub mod motion;
pub mod scene;
pub mod ui;
