//! Systems behind the floating profile badge and the contact form: pointer
//! handling, the outbound requests they start, and drawing their results.

use bevy::diagnostic::FrameCount;
use bevy::prelude::*;
use bevy::tasks::futures_lite::future;
use bevy::tasks::{IoTaskPool, Task, block_on};
use bevy::window::{PrimaryWindow, WindowResized};
use constants::portfolio::{CHAT_LINK_BASE, EMAIL_ENDPOINT, PROFILE_ENDPOINT_BASE};

use crate::engine::core::app_state::AppState;
use crate::engine::ui::text_field::{TextField, TextFieldSubmitted};
use crate::engine::ui::widgets::{
    ACCENT_RED, ButtonPalette, TEXT_MUTED, TEXT_PRIMARY, node_rect, text_bundle,
};
use crate::net::deep_link::{chat_link, open_in_new_tab};
use crate::net::error::NetError;
use crate::net::http::{EmailRequest, fetch_json, post_json};
use crate::portfolio::badge::{BadgeRelease, DraggableBadge};
use crate::portfolio::contact::{ContactForm, ContactSubmission, SubmitRefusal};
use crate::portfolio::content::SiteManifest;
use crate::portfolio::page::{
    BadgeNode, ContactInput, ContactStatusText, PingButton, PingLabel, ProfilePopupBody,
    ProfilePopupNode, link_button,
};
use crate::portfolio::profile::{ProfileFetchState, ProfilePopup, ProfileSummary};
use crate::rpc::web_rpc::WebRpcInterface;

const POPUP_GAP_PX: f32 = 8.0;

/// In-flight profile request, tagged with the popup generation it serves.
#[derive(Component)]
pub struct ProfileFetch {
    generation: u64,
    task: Task<Result<ProfileSummary, NetError>>,
}

#[derive(Component)]
pub struct EmailDelivery {
    form: ContactForm,
    task: Task<Result<(), NetError>>,
}

/// Where a mouse or touch press landed this frame.
fn press_position(
    window: &Window,
    mouse: &ButtonInput<MouseButton>,
    touches: &Touches,
) -> Option<Vec2> {
    if mouse.just_pressed(MouseButton::Left) {
        return window.cursor_position();
    }
    touches.iter_just_pressed().next().map(|touch| touch.position())
}

fn spawn_profile_fetch(commands: &mut Commands, generation: u64, manifest: &SiteManifest) {
    let url = manifest.profile_url(PROFILE_ENDPOINT_BASE);
    debug!("Fetching profile summary from {}", url);
    let task = IoTaskPool::get().spawn(fetch_json::<ProfileSummary>(url));
    commands.spawn((
        Name::new("Profile Fetch"),
        ProfileFetch { generation, task },
        StateScoped(AppState::Portfolio),
    ));
}

/// Press, drag and release of the badge. A release that never left the
/// click slop toggles the popup.
#[allow(clippy::too_many_arguments)]
pub fn drag_badge(
    windows: Query<&Window, With<PrimaryWindow>>,
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    frame: Res<FrameCount>,
    manifest: Option<Res<SiteManifest>>,
    mut badge: ResMut<DraggableBadge>,
    mut popup: ResMut<ProfilePopup>,
    mut commands: Commands,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    if let Some(pointer) = press_position(window, &mouse, &touches) {
        badge.press(pointer, frame.0);
    }

    if badge.is_dragging() {
        let pointer = window
            .cursor_position()
            .or_else(|| touches.iter().next().map(|touch| touch.position()));
        if let Some(pointer) = pointer {
            badge.drag_to(pointer, window.size());
        }
    }

    let released = mouse.just_released(MouseButton::Left) || touches.any_just_released();
    if !released || !badge.is_dragging() {
        return;
    }
    if badge.release() != Some(BadgeRelease::Click) {
        return;
    }

    let Some(generation) = popup.toggle(frame.0) else {
        debug!("Profile popup closed");
        return;
    };
    match manifest {
        Some(manifest) => spawn_profile_fetch(&mut commands, generation, &manifest),
        None => {
            popup.resolve(
                generation,
                Err(NetError::Unsupported("site manifest not loaded".to_string())),
            );
        }
    }
}

pub fn close_popup_on_outside_press(
    windows: Query<&Window, With<PrimaryWindow>>,
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    frame: Res<FrameCount>,
    badge: Res<DraggableBadge>,
    popups: Query<(&ComputedNode, &GlobalTransform), With<ProfilePopupNode>>,
    mut popup: ResMut<ProfilePopup>,
) {
    if !popup.is_open() {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(pointer) = press_position(window, &mouse, &touches) else {
        return;
    };
    // Presses on the badge are settled on release.
    if badge.contains(pointer) {
        return;
    }

    let inside = popups
        .iter()
        .any(|(node, transform)| node_rect(node, transform).contains(pointer));
    if popup.closes_on_press(frame.0, inside) {
        popup.close();
        debug!("Profile popup dismissed");
    }
}

pub fn reclamp_badge(mut resized: EventReader<WindowResized>, mut badge: ResMut<DraggableBadge>) {
    for event in resized.read() {
        badge.reclamp(Vec2::new(event.width, event.height));
    }
}

pub fn poll_profile_fetches(
    mut commands: Commands,
    mut fetches: Query<(Entity, &mut ProfileFetch)>,
    mut popup: ResMut<ProfilePopup>,
) {
    for (entity, mut fetch) in &mut fetches {
        let Some(result) = block_on(future::poll_once(&mut fetch.task)) else {
            continue;
        };
        commands.entity(entity).despawn();

        match &result {
            Ok(summary) => info!("✓ Profile summary loaded for {}", summary.login),
            Err(e) => warn!("Profile fetch failed: {}", e),
        }
        if !popup.resolve(fetch.generation, result) {
            debug!("Discarded stale profile response {}", fetch.generation);
        }
    }
}

/// Badge follows its stored position; the popup sits above it, or below
/// when there is no room.
#[allow(clippy::type_complexity)]
pub fn place_badge_and_popup(
    windows: Query<&Window, With<PrimaryWindow>>,
    badge: Res<DraggableBadge>,
    popup: Res<ProfilePopup>,
    mut badges: Query<&mut Node, With<BadgeNode>>,
    mut popups: Query<
        (&mut Node, &mut Visibility, &ComputedNode),
        (With<ProfilePopupNode>, Without<BadgeNode>),
    >,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let position = badge.position();

    for mut node in &mut badges {
        let (left, top) = (Val::Px(position.x), Val::Px(position.y));
        if node.left != left || node.top != top {
            node.left = left;
            node.top = top;
        }
    }

    for (mut node, mut visibility, computed) in &mut popups {
        let wanted = if popup.is_open() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
        if !popup.is_open() {
            continue;
        }

        let size = computed.size() * computed.inverse_scale_factor();
        let left = position.x.clamp(0.0, (window.width() - size.x).max(0.0));
        let above = position.y - size.y - POPUP_GAP_PX;
        let top = if above >= 0.0 {
            above
        } else {
            position.y + badge.size() + POPUP_GAP_PX
        };
        let (left, top) = (Val::Px(left), Val::Px(top));
        if node.left != left || node.top != top {
            node.left = left;
            node.top = top;
        }
    }
}

pub fn render_profile_popup(
    popup: Res<ProfilePopup>,
    bodies: Query<Entity, With<ProfilePopupBody>>,
    mut commands: Commands,
) {
    if !popup.is_changed() {
        return;
    }

    for body in &bodies {
        commands
            .entity(body)
            .despawn_related::<Children>()
            .with_children(|body| match popup.state() {
                ProfileFetchState::NotRequested => {}
                ProfileFetchState::Loading => {
                    body.spawn(text_bundle("Loading...", 14.0, TEXT_MUTED));
                }
                ProfileFetchState::Loaded(summary) => {
                    let title = summary.name.as_deref().unwrap_or(&summary.login);
                    body.spawn(text_bundle(title, 18.0, TEXT_PRIMARY));
                    body.spawn(text_bundle(format!("@{}", summary.login), 13.0, TEXT_MUTED));
                    if let Some(bio) = &summary.bio {
                        body.spawn(text_bundle(bio.as_str(), 13.0, TEXT_PRIMARY));
                    }
                    body.spawn(text_bundle(
                        format!("Public repos: {}", summary.public_repos),
                        13.0,
                        TEXT_PRIMARY,
                    ));
                    body.spawn(link_button("View profile", &summary.html_url));
                }
                ProfileFetchState::Error(message) => {
                    body.spawn(text_bundle(message.as_str(), 14.0, ACCENT_RED));
                }
            });
    }
}

pub fn sync_contact_fields(
    fields: Query<(&TextField, &ContactInput), Changed<TextField>>,
    mut submission: ResMut<ContactSubmission>,
) {
    for (field, input) in &fields {
        if submission.form().field(input.0) != field.value {
            submission.set_field(input.0, &field.value);
        }
    }
}

/// Ping button, or Enter in a single-line contact field.
pub fn send_contact_message(
    pings: Query<&Interaction, (Changed<Interaction>, With<PingButton>)>,
    mut submitted: EventReader<TextFieldSubmitted>,
    inputs: Query<(), With<ContactInput>>,
    manifest: Option<Res<SiteManifest>>,
    mut submission: ResMut<ContactSubmission>,
    mut commands: Commands,
) {
    let pressed = pings.iter().any(|interaction| *interaction == Interaction::Pressed);
    let entered = submitted
        .read()
        .fold(false, |any, event| any | inputs.contains(event.field));
    if !pressed && !entered {
        return;
    }
    let Some(manifest) = manifest else {
        warn!("Contact form used without a site manifest");
        return;
    };

    match submission.submit() {
        Ok(form) => {
            info!("Sending contact message from {}", form.name);
            let request = EmailRequest::new(&manifest.integrations, &form);
            let task = IoTaskPool::get().spawn(post_json(EMAIL_ENDPOINT.to_string(), request));
            commands.spawn((
                Name::new("Email Delivery"),
                EmailDelivery { form, task },
                StateScoped(AppState::Portfolio),
            ));
        }
        Err(SubmitRefusal::AlreadySending) => debug!("Contact message already in flight"),
        Err(SubmitRefusal::MissingFields) => debug!("Contact form incomplete"),
    }
}

/// Settle finished deliveries. Success opens the chat link and clears the
/// form; failure keeps what was typed.
pub fn poll_email_deliveries(
    mut commands: Commands,
    mut deliveries: Query<(Entity, &mut EmailDelivery)>,
    manifest: Option<Res<SiteManifest>>,
    mut submission: ResMut<ContactSubmission>,
    mut fields: Query<&mut TextField, With<ContactInput>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for (entity, mut delivery) in &mut deliveries {
        let Some(result) = block_on(future::poll_once(&mut delivery.task)) else {
            continue;
        };
        commands.entity(entity).despawn();

        let delivered = match result {
            Ok(()) => {
                info!("✓ Contact message delivered");
                true
            }
            Err(e) => {
                warn!("Contact message failed: {}", e);
                false
            }
        };

        if delivered {
            if let Some(manifest) = manifest.as_ref() {
                let number = &manifest.integrations.chat_number;
                match chat_link(CHAT_LINK_BASE, number, &delivery.form) {
                    Ok(url) => {
                        if let Err(e) = open_in_new_tab(url.as_str()) {
                            warn!("Could not open chat link: {}", e);
                        }
                    }
                    Err(e) => warn!("Could not build chat link: {}", e),
                }
            }
            for mut field in &mut fields {
                field.value.clear();
            }
        }

        if submission.finish(delivered) {
            rpc_interface.send_notification(
                "contact_result",
                serde_json::json!({
                    "ok": delivered,
                    "message": submission.status_message().unwrap_or_default(),
                }),
            );
        }
    }
}

#[allow(clippy::type_complexity)]
pub fn render_contact_status(
    submission: Res<ContactSubmission>,
    mut labels: Query<&mut Text, With<PingLabel>>,
    mut statuses: Query<&mut Text, (With<ContactStatusText>, Without<PingLabel>)>,
    mut pings: Query<(&mut ButtonPalette, &mut BackgroundColor), With<PingButton>>,
) {
    if !submission.is_changed() {
        return;
    }

    for mut label in &mut labels {
        if label.0 != submission.button_label() {
            label.0 = submission.button_label().to_string();
        }
    }
    let message = submission.status_message().unwrap_or_default();
    for mut status in &mut statuses {
        if status.0 != message {
            status.0 = message.to_string();
        }
    }

    let base = if submission.is_sending() {
        ACCENT_RED.with_alpha(0.45)
    } else {
        ACCENT_RED
    };
    for (mut palette, mut background) in &mut pings {
        if palette.idle != base {
            *palette = ButtonPalette::from_base(base);
            background.0 = base;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::contact::ContactField;

    #[test]
    fn contact_status_tracks_submission() {
        let mut app = App::new();
        app.init_resource::<ContactSubmission>()
            .add_systems(Update, render_contact_status);

        let label = app.world_mut().spawn((Text::new("Ping"), PingLabel)).id();
        let status = app.world_mut().spawn((Text::new(""), ContactStatusText)).id();
        let text_of = |app: &App, entity: Entity| {
            app.world()
                .get::<Text>(entity)
                .map(|text| text.0.clone())
                .unwrap_or_default()
        };

        {
            let mut submission = app.world_mut().resource_mut::<ContactSubmission>();
            submission.set_field(ContactField::Name, "Ada");
            assert!(submission.submit().is_err());
        }
        app.update();
        assert_eq!(text_of(&app, status), "Please fill in every field.");

        {
            let mut submission = app.world_mut().resource_mut::<ContactSubmission>();
            submission.set_field(ContactField::Email, "ada@example.com");
            submission.set_field(ContactField::Message, "Hello");
            assert!(submission.submit().is_ok());
        }
        app.update();
        assert_eq!(text_of(&app, label), "Sending...");
        assert_eq!(text_of(&app, status), "");

        app.world_mut().resource_mut::<ContactSubmission>().finish(true);
        app.update();
        assert_eq!(text_of(&app, label), "Ping");
        assert_eq!(text_of(&app, status), "Message sent via email!");
    }
}
