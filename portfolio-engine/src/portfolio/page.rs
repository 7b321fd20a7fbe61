use bevy::prelude::*;
use constants::portfolio::{BADGE_SIZE_PX, MSG_CONTENT_UNAVAILABLE};

use crate::engine::core::app_state::AppState;
use crate::engine::scene::portfolio_scene::ChatterBubble;
use crate::engine::scene::section_viewport::{DecorAnchor, DecorSlot};
use crate::engine::ui::text_field::{TextField, TextFieldDisplay};
use crate::engine::ui::widgets::{
    ACCENT_RED, ButtonPalette, PAGE_BACKGROUND, PANEL_BACKGROUND, TEXT_MUTED, TEXT_PRIMARY,
    text_bundle,
};
use crate::portfolio::contact::ContactField;
use crate::portfolio::content::{ExtracurricularEntry, ProjectEntry, SiteManifest};
use crate::portfolio::navigator::{NavEntry, SectionId};
use crate::portfolio::reveal::SectionReveal;
use crate::portfolio::typewriter::Typewriter;

#[derive(Component)]
pub struct PageScroller;

/// Set on the scroller once its sections have been built.
#[derive(Component)]
pub struct PagePopulated;

#[derive(Component, Debug, Clone, Copy)]
pub struct SectionAnchor(pub SectionId);

/// Page-coloured cover over a section that fades out as the section
/// reveals. UI nodes have no group opacity, so the fade is drawn on top.
#[derive(Component)]
pub struct RevealVeil;

#[derive(Component, Debug, Clone, Copy)]
pub struct NavBullet(pub NavEntry);

/// Opens its URL in a new tab when pressed.
#[derive(Component, Debug, Clone)]
pub struct LinkButton(pub String);

#[derive(Component)]
pub struct TypewriterText(pub Typewriter);

/// Tag chips of one extracurricular card; rebuilt whenever the expanded
/// card changes.
#[derive(Component, Debug, Clone)]
pub struct TagRow {
    pub card: usize,
    pub tags: Vec<String>,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct TagToggle(pub usize);

#[derive(Component, Debug, Clone, Copy)]
pub struct ContactInput(pub ContactField);

#[derive(Component)]
pub struct PingButton;

#[derive(Component)]
pub struct PingLabel;

#[derive(Component)]
pub struct ContactStatusText;

#[derive(Component)]
pub struct BadgeNode;

#[derive(Component)]
pub struct ProfilePopupNode;

/// Column inside the popup whose children are rebuilt on every state change.
#[derive(Component)]
pub struct ProfilePopupBody;

const Z_BADGE: i32 = 50;
const Z_POPUP: i32 = 51;
const Z_NAV: i32 = 40;

const CARD_RADIUS: f32 = 10.0;
const CHIP_BACKGROUND: Color = Color::srgba(1.0, 0.09, 0.27, 0.18);

fn heading(text: &str) -> (Text, TextFont, TextColor) {
    text_bundle(text, 34.0, TEXT_PRIMARY)
}

fn body_text(text: &str) -> (Text, TextFont, TextColor) {
    text_bundle(text, 16.0, TEXT_MUTED)
}

fn card_node() -> Node {
    Node {
        flex_direction: FlexDirection::Column,
        padding: UiRect::all(Val::Px(18.0)),
        row_gap: Val::Px(8.0),
        ..default()
    }
}

pub fn link_button(label: &str, url: &str) -> impl Bundle + use<> {
    (
        Button,
        Node {
            padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
            align_self: AlignSelf::FlexStart,
            ..default()
        },
        BorderRadius::all(Val::Px(4.0)),
        BackgroundColor(ACCENT_RED),
        ButtonPalette::from_base(ACCENT_RED),
        LinkButton(url.to_string()),
        children![text_bundle(label, 14.0, TEXT_PRIMARY)],
    )
}

pub fn tag_chip(label: &str) -> impl Bundle + use<> {
    (
        Node {
            padding: UiRect::axes(Val::Px(8.0), Val::Px(3.0)),
            ..default()
        },
        BorderRadius::all(Val::Px(10.0)),
        BackgroundColor(CHIP_BACKGROUND),
        children![text_bundle(label, 12.0, TEXT_PRIMARY)],
    )
}

pub fn tag_toggle_chip(label: &str, card: usize) -> impl Bundle + use<> {
    let base = CHIP_BACKGROUND.with_alpha(0.4);
    (
        Button,
        Node {
            padding: UiRect::axes(Val::Px(8.0), Val::Px(3.0)),
            ..default()
        },
        BorderRadius::all(Val::Px(10.0)),
        BackgroundColor(base),
        ButtonPalette::from_base(base),
        TagToggle(card),
        children![text_bundle(label, 12.0, TEXT_PRIMARY)],
    )
}

fn section_node(section: SectionId) -> impl Bundle {
    (
        Name::new(format!("Section {}", section.label())),
        Node {
            position_type: PositionType::Relative,
            width: Val::Percent(100.0),
            min_height: Val::Vh(100.0),
            flex_direction: FlexDirection::Column,
            padding: UiRect::new(Val::Px(80.0), Val::Px(160.0), Val::Px(72.0), Val::Px(72.0)),
            row_gap: Val::Px(20.0),
            flex_shrink: 0.0,
            ..default()
        },
        Visibility::Hidden,
        SectionAnchor(section),
        SectionReveal::default(),
        children![(
            Node {
                position_type: PositionType::Absolute,
                left: Val::ZERO,
                right: Val::ZERO,
                top: Val::ZERO,
                bottom: Val::ZERO,
                ..default()
            },
            BackgroundColor(PAGE_BACKGROUND),
            ZIndex(10),
            RevealVeil,
        )],
    )
}

/// Page frame that exists before content arrives: the scroll container,
/// side navigation, the floating badge and its popup.
pub fn spawn_page_shell(mut commands: Commands, windows: Query<&Window>) {
    let viewport = windows
        .iter()
        .next()
        .map(Window::size)
        .unwrap_or(Vec2::new(1280.0, 800.0));
    let badge = crate::portfolio::badge::DraggableBadge::new(viewport);
    let badge_position = badge.position();
    commands.insert_resource(badge);

    commands.spawn((
        Name::new("Page Scroller"),
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            overflow: Overflow::scroll_y(),
            ..default()
        },
        ScrollPosition::default(),
        Visibility::Hidden,
        PageScroller,
        StateScoped(AppState::Portfolio),
    ));

    commands
        .spawn((
            Name::new("Section Nav"),
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(24.0),
                top: Val::Percent(30.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::FlexEnd,
                row_gap: Val::Px(10.0),
                ..default()
            },
            GlobalZIndex(Z_NAV),
            StateScoped(AppState::Portfolio),
        ))
        .with_children(|nav| {
            for entry in NavEntry::ORDER {
                nav.spawn((
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(10.0), Val::Px(4.0)),
                        ..default()
                    },
                    BorderRadius::all(Val::Px(12.0)),
                    BackgroundColor(Color::NONE),
                    NavBullet(entry),
                    children![text_bundle(entry.label(), 13.0, TEXT_PRIMARY)],
                ));
            }
        });

    commands.spawn((
        Name::new("Profile Badge"),
        Button,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(badge_position.x),
            top: Val::Px(badge_position.y),
            width: Val::Px(BADGE_SIZE_PX),
            height: Val::Px(BADGE_SIZE_PX),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        BorderRadius::MAX,
        BackgroundColor(Color::srgb(0.13, 0.13, 0.16)),
        GlobalZIndex(Z_BADGE),
        BadgeNode,
        StateScoped(AppState::Portfolio),
        children![text_bundle("GH", 14.0, TEXT_PRIMARY)],
    ));

    commands.spawn((
        Name::new("Profile Popup"),
        Node {
            position_type: PositionType::Absolute,
            width: Val::Px(260.0),
            padding: UiRect::all(Val::Px(14.0)),
            ..default()
        },
        BorderRadius::all(Val::Px(CARD_RADIUS)),
        BackgroundColor(PANEL_BACKGROUND),
        Interaction::default(),
        Visibility::Hidden,
        GlobalZIndex(Z_POPUP),
        ProfilePopupNode,
        StateScoped(AppState::Portfolio),
        children![(
            Node {
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                ..default()
            },
            ProfilePopupBody,
        )],
    ));
}

/// Fill the scroller from the manifest, or with a single notice when the
/// manifest could not be loaded.
pub fn populate_sections(
    commands: &mut Commands,
    scroller: Entity,
    manifest: Option<&SiteManifest>,
    asset_server: &AssetServer,
) {
    commands.entity(scroller).insert(PagePopulated);

    let Some(manifest) = manifest else {
        commands.entity(scroller).with_children(|page| {
            page.spawn((
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Vh(100.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                children![text_bundle(MSG_CONTENT_UNAVAILABLE, 20.0, TEXT_PRIMARY)],
            ));
        });
        return;
    };

    commands.entity(scroller).with_children(|page| {
        spawn_home(page, manifest);
        spawn_about(page, manifest);
        spawn_skills(page, manifest, asset_server);
        spawn_projects(page, &manifest.projects, asset_server);
        spawn_extracurriculars(page, &manifest.extracurriculars, asset_server);
        spawn_contact(page);
    });
}

fn spawn_home(page: &mut ChildSpawnerCommands, manifest: &SiteManifest) {
    page.spawn(section_node(SectionId::Home)).with_children(|home| {
        home.spawn((
            Text::new(format!("{} ", manifest.owner.headline)),
            TextFont {
                font_size: 52.0,
                ..default()
            },
            TextColor(TEXT_PRIMARY),
            children![(
                TextSpan::new(manifest.owner.name.clone()),
                TextFont {
                    font_size: 52.0,
                    ..default()
                },
                TextColor(ACCENT_RED),
            )],
        ));
        home.spawn(text_bundle("I do:", 22.0, TEXT_MUTED));
        home.spawn((
            text_bundle("", 26.0, ACCENT_RED),
            TypewriterText(Typewriter::new(&manifest.typewriter)),
        ));
        home.spawn((
            Node {
                width: Val::Px(800.0),
                max_width: Val::Percent(100.0),
                height: Val::Px(420.0),
                align_self: AlignSelf::Center,
                ..default()
            },
            DecorAnchor(DecorSlot::Starship),
        ));
    });
}

fn spawn_about(page: &mut ChildSpawnerCommands, manifest: &SiteManifest) {
    page.spawn(section_node(SectionId::About)).with_children(|about| {
        about.spawn(heading("About"));
        about.spawn((Node { max_width: Val::Px(760.0), ..default() },))
            .with_children(|column| {
                column.spawn(body_text(&manifest.owner.introduction));
            });
        if let Some(url) = &manifest.links.photography_url {
            about.spawn(link_button("Photography", url));
        }
    });
}

fn spawn_skills(page: &mut ChildSpawnerCommands, manifest: &SiteManifest, asset_server: &AssetServer) {
    page.spawn(section_node(SectionId::Skills)).with_children(|skills| {
        skills.spawn(heading("Skills"));
        skills
            .spawn(Node {
                flex_wrap: FlexWrap::Wrap,
                column_gap: Val::Px(14.0),
                row_gap: Val::Px(14.0),
                ..default()
            })
            .with_children(|grid| {
                for skill in &manifest.skills {
                    grid.spawn((
                        Node {
                            width: Val::Px(120.0),
                            flex_direction: FlexDirection::Column,
                            align_items: AlignItems::Center,
                            padding: UiRect::all(Val::Px(12.0)),
                            row_gap: Val::Px(8.0),
                            ..default()
                        },
                        BorderRadius::all(Val::Px(CARD_RADIUS)),
                        BackgroundColor(PANEL_BACKGROUND),
                    ))
                    .with_children(|card| {
                        card.spawn((
                            ImageNode::new(asset_server.load(skill.icon.clone())),
                            Node {
                                width: Val::Px(48.0),
                                height: Val::Px(48.0),
                                ..default()
                            },
                        ));
                        card.spawn(text_bundle(skill.name.as_str(), 14.0, TEXT_PRIMARY));
                    });
                }
            });
    });
}

fn spawn_projects(
    page: &mut ChildSpawnerCommands,
    projects: &[ProjectEntry],
    asset_server: &AssetServer,
) {
    page.spawn(section_node(SectionId::Projects)).with_children(|section| {
        section.spawn(heading("Projects"));
        section
            .spawn(Node {
                flex_wrap: FlexWrap::Wrap,
                column_gap: Val::Px(18.0),
                row_gap: Val::Px(18.0),
                ..default()
            })
            .with_children(|grid| {
                for project in projects {
                    grid.spawn((
                        Node {
                            width: Val::Px(320.0),
                            ..card_node()
                        },
                        BorderRadius::all(Val::Px(CARD_RADIUS)),
                        BackgroundColor(PANEL_BACKGROUND),
                    ))
                    .with_children(|card| {
                        card.spawn((
                            ImageNode::new(asset_server.load(project.image.clone())),
                            Node {
                                width: Val::Percent(100.0),
                                height: Val::Px(160.0),
                                ..default()
                            },
                        ));
                        card.spawn(text_bundle(project.title.as_str(), 20.0, TEXT_PRIMARY));
                        card.spawn(body_text(&project.description));
                        card.spawn(Node {
                            flex_wrap: FlexWrap::Wrap,
                            column_gap: Val::Px(6.0),
                            row_gap: Val::Px(6.0),
                            ..default()
                        })
                        .with_children(|tags| {
                            for tag in &project.tags {
                                tags.spawn(tag_chip(tag));
                            }
                        });
                        if let Some(url) = &project.live_demo_url {
                            card.spawn(link_button("Live demo", url));
                        }
                    });
                }
            });
    });
}

fn spawn_extracurriculars(
    page: &mut ChildSpawnerCommands,
    entries: &[ExtracurricularEntry],
    asset_server: &AssetServer,
) {
    page.spawn(section_node(SectionId::Extracurricular))
        .with_children(|section| {
            section.spawn(heading("Extracurricular"));
            for (index, entry) in entries.iter().enumerate() {
                section
                    .spawn((
                        Node {
                            max_width: Val::Px(760.0),
                            ..card_node()
                        },
                        BorderRadius::all(Val::Px(CARD_RADIUS)),
                        BackgroundColor(PANEL_BACKGROUND),
                    ))
                    .with_children(|card| {
                        card.spawn(Node {
                            column_gap: Val::Px(12.0),
                            align_items: AlignItems::Center,
                            ..default()
                        })
                        .with_children(|header| {
                            header.spawn((
                                ImageNode::new(asset_server.load(entry.logo.clone())),
                                Node {
                                    width: Val::Px(44.0),
                                    height: Val::Px(44.0),
                                    ..default()
                                },
                            ));
                            header.spawn(text_bundle(entry.title.as_str(), 20.0, TEXT_PRIMARY));
                            header.spawn((
                                Node {
                                    padding: UiRect::axes(Val::Px(8.0), Val::Px(2.0)),
                                    ..default()
                                },
                                BorderRadius::all(Val::Px(8.0)),
                                BackgroundColor(ACCENT_RED),
                                children![text_bundle(entry.badge.as_str(), 12.0, TEXT_PRIMARY)],
                            ));
                        });

                        match &entry.org.url {
                            Some(url) => {
                                card.spawn(link_button(&entry.org.name, url));
                            }
                            None => {
                                card.spawn(text_bundle(entry.org.name.as_str(), 15.0, TEXT_PRIMARY));
                            }
                        }
                        card.spawn(text_bundle(entry.date.as_str(), 13.0, TEXT_MUTED));
                        card.spawn(body_text(&entry.description));
                        card.spawn((
                            Node {
                                flex_wrap: FlexWrap::Wrap,
                                column_gap: Val::Px(6.0),
                                row_gap: Val::Px(6.0),
                                ..default()
                            },
                            TagRow {
                                card: index,
                                tags: entry.tags.clone(),
                            },
                        ));
                    });
            }
        });
}

fn spawn_contact(page: &mut ChildSpawnerCommands) {
    page.spawn(section_node(SectionId::Contact)).with_children(|section| {
        section.spawn(heading("Contact"));
        section
            .spawn(Node {
                width: Val::Percent(100.0),
                column_gap: Val::Px(24.0),
                flex_wrap: FlexWrap::Wrap,
                ..default()
            })
            .with_children(|row| {
                row.spawn((
                    Node {
                        width: Val::Px(380.0),
                        ..card_node()
                    },
                    BorderRadius::all(Val::Px(CARD_RADIUS)),
                    BackgroundColor(PANEL_BACKGROUND),
                ))
                .with_children(|form| {
                    for field in ContactField::ALL {
                        let mut text_field = TextField::new(field.placeholder(), field.max_len());
                        if field.multiline() {
                            text_field = text_field.multiline();
                        }
                        form.spawn((
                            Button,
                            Node {
                                padding: UiRect::all(Val::Px(10.0)),
                                min_height: Val::Px(if field.multiline() { 120.0 } else { 40.0 }),
                                ..default()
                            },
                            BorderRadius::all(Val::Px(6.0)),
                            BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.06)),
                            text_field,
                            ContactInput(field),
                            children![(text_bundle("", 15.0, TEXT_PRIMARY), TextFieldDisplay)],
                        ));
                    }
                    form.spawn((
                        Button,
                        Node {
                            padding: UiRect::axes(Val::Px(18.0), Val::Px(8.0)),
                            align_self: AlignSelf::FlexStart,
                            ..default()
                        },
                        BorderRadius::all(Val::Px(6.0)),
                        BackgroundColor(ACCENT_RED),
                        ButtonPalette::from_base(ACCENT_RED),
                        PingButton,
                        children![(text_bundle("Ping", 16.0, TEXT_PRIMARY), PingLabel)],
                    ));
                    form.spawn((text_bundle("", 14.0, TEXT_MUTED), ContactStatusText));
                });

                row.spawn((
                    Node {
                        flex_grow: 1.0,
                        min_width: Val::Px(320.0),
                        min_height: Val::Px(400.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    DecorAnchor(DecorSlot::Robot),
                ))
                .with_children(|stage| {
                    stage
                        .spawn((
                            Node {
                                position_type: PositionType::Absolute,
                                left: Val::Percent(55.0),
                                top: Val::Percent(50.0),
                                width: Val::Px(420.0),
                                height: Val::Px(420.0),
                                margin: UiRect::new(
                                    Val::Px(-210.0),
                                    Val::ZERO,
                                    Val::Px(-210.0),
                                    Val::ZERO,
                                ),
                                justify_content: JustifyContent::Center,
                                ..default()
                            },
                            DecorAnchor(DecorSlot::Companion),
                        ))
                        .with_children(|companion| {
                            companion.spawn((
                                text_bundle("", 14.0, Color::BLACK),
                                Node {
                                    position_type: PositionType::Absolute,
                                    top: Val::Px(24.0),
                                    padding: UiRect::axes(Val::Px(10.0), Val::Px(4.0)),
                                    ..default()
                                },
                                BorderRadius::all(Val::Px(10.0)),
                                BackgroundColor(Color::WHITE),
                                Visibility::Hidden,
                                ChatterBubble,
                            ));
                        });
                });
            });
    });
}
