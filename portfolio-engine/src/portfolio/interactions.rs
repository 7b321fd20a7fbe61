use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::portfolio::SCROLL_LINE_PX;

use crate::engine::loading::progress::{LoadPhase, LoadingProgress};
use crate::engine::ui::widgets::{ACCENT_RED, PAGE_BACKGROUND, node_rect};
use crate::net::deep_link::open_in_new_tab;
use crate::portfolio::badge::DraggableBadge;
use crate::portfolio::cards::{ExpandedCard, TagChip, tag_layout};
use crate::portfolio::content::SiteManifest;
use crate::portfolio::navigator::{
    ActiveSection, NavEntry, NavigateToSection, SectionId, active_section,
};
use crate::portfolio::page::{
    LinkButton, NavBullet, PagePopulated, PageScroller, RevealVeil, SectionAnchor, TagRow,
    TagToggle, TypewriterText, populate_sections, tag_chip, tag_toggle_chip,
};
use crate::portfolio::reveal::SectionReveal;
use crate::portfolio::{ContentDelay, PageScroll};
use crate::rpc::web_rpc::WebRpcInterface;

const NAV_HOVER: Color = Color::srgba(1.0, 1.0, 1.0, 0.12);

/// Build the sections as soon as the manifest settles either way.
pub fn build_page_when_ready(
    mut commands: Commands,
    scrollers: Query<Entity, (With<PageScroller>, Without<PagePopulated>)>,
    manifest: Option<Res<SiteManifest>>,
    progress: Res<LoadingProgress>,
    asset_server: Res<AssetServer>,
) {
    let Ok(scroller) = scrollers.single() else {
        return;
    };

    match manifest {
        Some(manifest) => {
            populate_sections(&mut commands, scroller, Some(&*manifest), &asset_server);
            info!("✓ Portfolio page built for {}", manifest.owner.name);
        }
        None if progress.manifest == LoadPhase::Failed => {
            populate_sections(&mut commands, scroller, None, &asset_server);
            warn!("Portfolio page built without content");
        }
        None => {}
    }
}

pub fn content_revealed(delay: Res<ContentDelay>) -> bool {
    delay.0.finished()
}

pub fn reveal_content_after_delay(
    time: Res<Time>,
    mut delay: ResMut<ContentDelay>,
    mut scrollers: Query<&mut Visibility, With<PageScroller>>,
) {
    if delay.0.finished() {
        return;
    }
    if delay.0.tick(time.delta()).just_finished() {
        for mut visibility in &mut scrollers {
            *visibility = Visibility::Inherited;
        }
    }
}

pub fn scroll_with_wheel(mut wheel: EventReader<MouseWheel>, mut scroll: ResMut<PageScroll>) {
    for event in wheel.read() {
        let delta = match event.unit {
            MouseScrollUnit::Line => event.y * SCROLL_LINE_PX,
            MouseScrollUnit::Pixel => event.y,
        };
        scroll.0.scroll_by(-delta);
    }
}

pub fn scroll_with_touch(
    touches: Res<Touches>,
    badge: Res<DraggableBadge>,
    mut scroll: ResMut<PageScroll>,
) {
    if badge.is_dragging() {
        return;
    }
    for touch in touches.iter() {
        let dy = touch.delta().y;
        if dy != 0.0 {
            scroll.0.scroll_by(-dy);
        }
    }
}

/// Ease the scroller toward its target; the range follows the laid out
/// content height every frame.
pub fn apply_page_scroll(
    mut scroll: ResMut<PageScroll>,
    mut scrollers: Query<(&ComputedNode, &Children, &mut ScrollPosition), With<PageScroller>>,
    nodes: Query<&ComputedNode, Without<PageScroller>>,
) {
    let Ok((container, children, mut position)) = scrollers.single_mut() else {
        return;
    };

    let scale = container.inverse_scale_factor();
    let content_height: f32 = children
        .iter()
        .filter_map(|child| nodes.get(child).ok())
        .map(|node| node.size().y * scale)
        .sum();
    // Nothing is laid out yet on the first frames.
    if content_height > 0.0 {
        scroll.0.set_max(content_height - container.size().y * scale);
    }
    scroll.0.step();

    let offset = scroll.0.current();
    if position.offset_y != offset {
        position.offset_y = offset;
    }
}

fn section_tops<'a>(
    anchors: impl IntoIterator<Item = (&'a SectionAnchor, &'a ComputedNode, &'a GlobalTransform)>,
) -> Vec<(SectionId, f32)> {
    anchors
        .into_iter()
        .filter(|(_, node, _)| node.size().y > 0.0)
        .map(|(anchor, node, transform)| (anchor.0, node_rect(node, transform).min.y))
        .collect()
}

pub fn scroll_to_requested_section(
    mut requests: EventReader<NavigateToSection>,
    anchors: Query<(&SectionAnchor, &ComputedNode, &GlobalTransform)>,
    mut scroll: ResMut<PageScroll>,
) {
    for request in requests.read() {
        let top = section_tops(&anchors)
            .into_iter()
            .find(|(section, _)| *section == request.section)
            .map(|(_, top)| top);
        match top {
            Some(top) => {
                let current = scroll.0.current();
                scroll.0.scroll_to(current + top);
                debug!("Scrolling to {}", request.section.as_str());
            }
            None => warn!("Section {} is not on the page", request.section.as_str()),
        }
    }
}

pub fn track_active_section(
    windows: Query<&Window, With<PrimaryWindow>>,
    anchors: Query<(&SectionAnchor, &ComputedNode, &GlobalTransform)>,
    mut active: ResMut<ActiveSection>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let tops = section_tops(&anchors);
    if tops.is_empty() {
        return;
    }

    let current = active_section(&tops, window.height());
    if active.current != current {
        active.current = current;
        debug!("Active section: {}", current.as_str());
        rpc_interface.send_notification(
            "active_section_changed",
            serde_json::json!({ "section": current.as_str() }),
        );
    }
}

pub fn handle_nav_bullets(
    bullets: Query<(&Interaction, &NavBullet), Changed<Interaction>>,
    manifest: Option<Res<SiteManifest>>,
    mut navigate: EventWriter<NavigateToSection>,
) {
    for (interaction, bullet) in &bullets {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match bullet.0 {
            NavEntry::Section(section) => {
                navigate.write(NavigateToSection { section });
            }
            NavEntry::Resume => {
                let Some(url) = manifest
                    .as_ref()
                    .and_then(|manifest| manifest.links.resume_url.as_deref())
                else {
                    warn!("No resume configured");
                    continue;
                };
                if let Err(e) = open_in_new_tab(url) {
                    warn!("Could not open resume: {}", e);
                }
            }
        }
    }
}

pub fn paint_nav_bullets(
    active: Res<ActiveSection>,
    mut bullets: Query<(&NavBullet, &Interaction, &mut BackgroundColor)>,
) {
    for (bullet, interaction, mut background) in &mut bullets {
        let color = match (bullet.0, interaction) {
            (NavEntry::Section(section), _) if section == active.current => ACCENT_RED,
            (_, Interaction::Hovered | Interaction::Pressed) => NAV_HOVER,
            _ => Color::NONE,
        };
        if background.0 != color {
            background.0 = color;
        }
    }
}

pub fn open_link_buttons(links: Query<(&Interaction, &LinkButton), Changed<Interaction>>) {
    for (interaction, link) in &links {
        if *interaction != Interaction::Pressed {
            continue;
        }
        if let Err(e) = open_in_new_tab(&link.0) {
            warn!("Could not open {}: {}", link.0, e);
        }
    }
}

pub fn animate_typewriter(time: Res<Time>, mut texts: Query<(&mut TypewriterText, &mut Text)>) {
    for (mut typewriter, mut text) in &mut texts {
        if typewriter.0.advance(time.delta()) {
            text.0 = typewriter.0.text();
        }
    }
}

/// Start each section's slide-in the first time its top enters the
/// viewport, then drive its offset and veil until done.
#[allow(clippy::type_complexity)]
pub fn reveal_sections(
    time: Res<Time>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut sections: Query<(
        &mut SectionReveal,
        &ComputedNode,
        &GlobalTransform,
        &Children,
        &mut Node,
        &mut Visibility,
    )>,
    mut veils: Query<(&mut BackgroundColor, &mut Node), (With<RevealVeil>, Without<SectionReveal>)>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let dt = time.delta_secs();

    for (mut reveal, computed, transform, children, mut node, mut visibility) in &mut sections {
        if reveal.is_finished() || computed.size().y <= 0.0 {
            continue;
        }

        let pose = reveal.pose();
        // Measure from the resting position, not the slid-down one.
        let top = node_rect(computed, transform).min.y - pose.offset_y;
        reveal.observe(top, window.height());
        if !reveal.is_started() {
            continue;
        }

        let pose = reveal.advance(dt);
        node.top = Val::Px(pose.offset_y);
        if *visibility == Visibility::Hidden {
            *visibility = Visibility::Inherited;
        }

        for child in children.iter() {
            let Ok((mut veil, mut veil_node)) = veils.get_mut(child) else {
                continue;
            };
            veil.0 = PAGE_BACKGROUND.with_alpha(1.0 - pose.opacity);
            if reveal.is_finished() {
                veil_node.display = Display::None;
            }
        }
    }
}

pub fn toggle_tag_chips(
    toggles: Query<(&Interaction, &TagToggle), Changed<Interaction>>,
    mut expanded: ResMut<ExpandedCard>,
) {
    for (interaction, toggle) in &toggles {
        if *interaction == Interaction::Pressed {
            expanded.toggle(toggle.0);
        }
    }
}

/// Rebuild every tag row when the expanded card changes or rows appear.
pub fn render_tag_rows(
    expanded: Res<ExpandedCard>,
    rows: Query<(Entity, &TagRow)>,
    added: Query<(), Added<TagRow>>,
    mut commands: Commands,
) {
    if !expanded.is_changed() && added.is_empty() {
        return;
    }

    for (entity, row) in &rows {
        let (visible, chip) = tag_layout(row.tags.len(), expanded.is_expanded(row.card));
        let card = row.card;
        let tags = row.tags[..visible].to_vec();

        commands
            .entity(entity)
            .despawn_related::<Children>()
            .with_children(|chips| {
                for tag in &tags {
                    chips.spawn(tag_chip(tag));
                }
                match chip {
                    TagChip::None => {}
                    TagChip::More(hidden) => {
                        chips.spawn(tag_toggle_chip(&format!("+{hidden}"), card));
                    }
                    TagChip::ShowLess => {
                        chips.spawn(tag_toggle_chip("Show less", card));
                    }
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_count(app: &App, entity: Entity) -> usize {
        app.world().get::<Children>(entity).map_or(0, |children| children.len())
    }

    #[test]
    fn tag_rows_follow_the_expanded_card() {
        let mut app = App::new();
        app.init_resource::<ExpandedCard>()
            .add_systems(Update, render_tag_rows);

        let tags: Vec<String> = (0..8).map(|i| format!("tag {i}")).collect();
        let long = app
            .world_mut()
            .spawn(TagRow { card: 0, tags: tags.clone() })
            .id();
        let short = app
            .world_mut()
            .spawn(TagRow { card: 1, tags: tags[..3].to_vec() })
            .id();

        app.update();
        assert_eq!(child_count(&app, long), 6, "five tags and a +3 chip");
        assert_eq!(child_count(&app, short), 3);

        app.world_mut().resource_mut::<ExpandedCard>().toggle(0);
        app.update();
        assert_eq!(child_count(&app, long), 9, "all tags and show less");

        app.world_mut().resource_mut::<ExpandedCard>().toggle(0);
        app.update();
        assert_eq!(child_count(&app, long), 6);
    }

    #[test]
    fn active_bullet_is_highlighted() {
        let mut app = App::new();
        app.insert_resource(ActiveSection {
            current: SectionId::Projects,
        })
        .add_systems(Update, paint_nav_bullets);

        let bullets: Vec<(NavEntry, Entity)> = NavEntry::ORDER
            .into_iter()
            .map(|entry| {
                let id = app
                    .world_mut()
                    .spawn((NavBullet(entry), Interaction::None, BackgroundColor(Color::NONE)))
                    .id();
                (entry, id)
            })
            .collect();

        app.update();
        for (entry, id) in bullets {
            let color = app.world().get::<BackgroundColor>(id).map(|bg| bg.0);
            let expected = if entry == NavEntry::Section(SectionId::Projects) {
                ACCENT_RED
            } else {
                Color::NONE
            };
            assert_eq!(color, Some(expected), "{entry:?}");
        }
    }
}
