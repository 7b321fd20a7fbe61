use bevy::prelude::*;
use bevy::render::camera::{SubCameraView, Viewport};
use bevy::window::PrimaryWindow;

use crate::engine::ui::widgets::node_rect;

/// The page slots that show a live 3D view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecorSlot {
    Starship,
    Robot,
    Companion,
}

/// UI node whose on-screen rectangle a decoration camera renders into.
#[derive(Component, Debug, Clone, Copy)]
pub struct DecorAnchor(pub DecorSlot);

#[derive(Component, Debug)]
pub struct DecorCamera {
    pub slot: DecorSlot,
    applied: Option<ViewportClip>,
}

impl DecorCamera {
    pub fn new(slot: DecorSlot) -> Self {
        Self {
            slot,
            applied: None,
        }
    }
}

/// Physical-pixel viewport for the visible part of an anchor, plus the
/// sub-view that keeps the projection of the whole anchor when it is only
/// partly on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportClip {
    pub position: UVec2,
    pub size: UVec2,
    pub full_size: UVec2,
    pub offset: Vec2,
}

/// `rect` and `window` are logical pixels, origin top-left. Returns `None`
/// when less than a pixel of the anchor is visible.
pub fn viewport_clip(rect: Rect, window: Vec2, scale_factor: f32) -> Option<ViewportClip> {
    let physical_window = (window * scale_factor).floor().as_uvec2();
    if physical_window.x == 0 || physical_window.y == 0 {
        return None;
    }

    let visible = rect.intersect(Rect::from_corners(Vec2::ZERO, window));
    if visible.width() < 1.0 || visible.height() < 1.0 {
        return None;
    }

    let position = (visible.min * scale_factor)
        .floor()
        .as_uvec2()
        .min(physical_window - UVec2::ONE);
    let size = (visible.size() * scale_factor)
        .round()
        .as_uvec2()
        .max(UVec2::ONE)
        .min(physical_window - position);

    Some(ViewportClip {
        position,
        size,
        full_size: (rect.size() * scale_factor).round().as_uvec2().max(UVec2::ONE),
        offset: (visible.min - rect.min) * scale_factor,
    })
}

/// Follow each anchor's layout every frame; a camera whose anchor is off
/// screen, hidden or missing stops rendering.
pub fn track_decor_viewports(
    windows: Query<&Window, With<PrimaryWindow>>,
    anchors: Query<(&DecorAnchor, &ComputedNode, &GlobalTransform, &InheritedVisibility)>,
    mut cameras: Query<(&mut DecorCamera, &mut Camera)>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    for (mut decor, mut camera) in &mut cameras {
        let clip = anchors
            .iter()
            .find(|(anchor, _, _, visibility)| anchor.0 == decor.slot && visibility.get())
            .and_then(|(_, node, transform, _)| {
                viewport_clip(node_rect(node, transform), window.size(), window.scale_factor())
            });

        if decor.applied == clip && camera.is_active == clip.is_some() {
            continue;
        }

        match clip {
            Some(clip) => {
                camera.viewport = Some(Viewport {
                    physical_position: clip.position,
                    physical_size: clip.size,
                    ..default()
                });
                camera.sub_camera_view = Some(SubCameraView {
                    full_size: clip.full_size,
                    offset: clip.offset,
                    size: clip.size,
                });
                camera.is_active = true;
            }
            None => camera.is_active = false,
        }
        decor.applied = clip;
    }
}
