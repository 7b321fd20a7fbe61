//! Portfolio page: the scrolling sections, their 3D decorations, the side
//! navigation, the floating profile badge and the contact form.

use std::time::Duration;

use bevy::prelude::*;
use constants::portfolio::CONTENT_REVEAL_DELAY_MS;

use crate::engine::core::app_state::AppState;
use crate::engine::scene::portfolio_scene::{
    hover_robots, spawn_section_decorations, spawn_star_background, spin_star_shells,
    spin_starship, update_chatter_bubble,
};
use crate::engine::scene::section_viewport::track_decor_viewports;
use crate::engine::ui::widgets::paint_button_interactions;

pub mod badge;
pub mod cards;
pub mod contact;
pub mod content;
pub mod navigator;
pub mod profile;
pub mod reveal;
pub mod scroll;
pub mod typewriter;

mod interactions;
mod page;
mod remote;

use cards::ExpandedCard;
use contact::ContactSubmission;
use interactions::{
    animate_typewriter, apply_page_scroll, build_page_when_ready, content_revealed,
    handle_nav_bullets, open_link_buttons, paint_nav_bullets, render_tag_rows,
    reveal_content_after_delay, reveal_sections, scroll_to_requested_section, scroll_with_touch,
    scroll_with_wheel, toggle_tag_chips, track_active_section,
};
use navigator::{ActiveSection, NavigateToSection};
use page::spawn_page_shell;
use profile::ProfilePopup;
use remote::{
    close_popup_on_outside_press, drag_badge, place_badge_and_popup, poll_email_deliveries,
    poll_profile_fetches, reclamp_badge, render_contact_status, render_profile_popup,
    send_contact_message, sync_contact_fields,
};
use scroll::SmoothScroll;

/// Eased scroll offset of the page container.
#[derive(Resource, Debug, Default)]
pub struct PageScroll(pub SmoothScroll);

/// Holds the page hidden for a moment after the gate hands over.
#[derive(Resource, Debug)]
pub struct ContentDelay(pub Timer);

impl Default for ContentDelay {
    fn default() -> Self {
        Self(Timer::new(
            Duration::from_millis(CONTENT_REVEAL_DELAY_MS),
            TimerMode::Once,
        ))
    }
}

pub struct PortfolioPlugin;

impl Plugin for PortfolioPlugin {
    fn build(&self, app: &mut App) {
        // The host bridge reads and writes these in every stage.
        app.init_resource::<ActiveSection>()
            .add_event::<NavigateToSection>()
            .add_systems(
                OnEnter(AppState::Portfolio),
                (
                    reset_portfolio,
                    spawn_page_shell,
                    spawn_star_background,
                    spawn_section_decorations,
                ),
            )
            .add_systems(
                Update,
                (
                    build_page_when_ready,
                    reveal_content_after_delay,
                    (scroll_with_wheel, scroll_with_touch, scroll_to_requested_section),
                    apply_page_scroll,
                    track_active_section,
                    reveal_sections.run_if(content_revealed),
                )
                    .chain()
                    .run_if(in_state(AppState::Portfolio)),
            )
            .add_systems(
                Update,
                (
                    drag_badge,
                    close_popup_on_outside_press,
                    reclamp_badge,
                    poll_profile_fetches,
                    place_badge_and_popup,
                    render_profile_popup,
                )
                    .chain()
                    .run_if(in_state(AppState::Portfolio)),
            )
            .add_systems(
                Update,
                (
                    sync_contact_fields,
                    send_contact_message,
                    poll_email_deliveries,
                    render_contact_status,
                )
                    .chain()
                    .run_if(in_state(AppState::Portfolio)),
            )
            .add_systems(
                Update,
                (
                    handle_nav_bullets,
                    paint_nav_bullets,
                    open_link_buttons,
                    animate_typewriter,
                    (toggle_tag_chips, render_tag_rows).chain(),
                    paint_button_interactions,
                    track_decor_viewports,
                    spin_star_shells,
                    spin_starship,
                    hover_robots,
                    update_chatter_bubble,
                )
                    .run_if(in_state(AppState::Portfolio)),
            )
            .add_systems(OnExit(AppState::Portfolio), tear_down_portfolio);
    }
}

fn reset_portfolio(mut commands: Commands) {
    commands.insert_resource(ActiveSection::default());
    commands.insert_resource(ExpandedCard::default());
    commands.insert_resource(ContactSubmission::default());
    commands.insert_resource(ProfilePopup::default());
    commands.insert_resource(PageScroll::default());
    commands.insert_resource(ContentDelay::default());
    info!("Entering portfolio");
}

fn tear_down_portfolio(mut commands: Commands) {
    commands.remove_resource::<ExpandedCard>();
    commands.remove_resource::<ContactSubmission>();
    commands.remove_resource::<ProfilePopup>();
    commands.remove_resource::<PageScroll>();
    commands.remove_resource::<ContentDelay>();
    commands.remove_resource::<badge::DraggableBadge>();
}
