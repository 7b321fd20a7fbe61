pub const SITE_MANIFEST_PATH: &str = "site.manifest.json";

/// A section becomes active once its top passes this fraction of the viewport.
pub const ACTIVE_SECTION_THRESHOLD: f32 = 0.33;

/// Per-frame easing toward the wheel scroll target.
pub const SCROLL_EASE: f32 = 0.12;
pub const SCROLL_LINE_PX: f32 = 48.0;

pub const CONTENT_REVEAL_DELAY_MS: u64 = 300;
pub const SECTION_REVEAL_SECS: f32 = 0.8;
pub const SECTION_REVEAL_OFFSET_PX: f32 = 40.0;

pub const BADGE_SIZE_PX: f32 = 40.0;
pub const BADGE_START_X: f32 = 20.0;
/// Initial badge y is `viewport_height - BADGE_START_BOTTOM`.
pub const BADGE_START_BOTTOM: f32 = 80.0;
/// Pointer travel below this counts as a click rather than a drag.
pub const BADGE_CLICK_SLOP_PX: f32 = 4.0;

pub const TYPE_INTERVAL_MS: u64 = 70;
pub const DELETE_INTERVAL_MS: u64 = 30;
pub const HOLD_FULL_MS: u64 = 1200;
pub const HOLD_EMPTY_MS: u64 = 400;

pub const VISIBLE_TAG_COUNT: usize = 5;

pub const CONTACT_NAME_MAX_LEN: usize = 80;
pub const CONTACT_EMAIL_MAX_LEN: usize = 120;
pub const CONTACT_MESSAGE_MAX_LEN: usize = 2000;

pub const MSG_SENT: &str = "Message sent via email!";
pub const MSG_SEND_FAILED: &str = "Failed to send. Try again!";
pub const MSG_MISSING_FIELDS: &str = "Please fill in every field.";
pub const MSG_STATS_FAILED: &str = "Could not load stats.";
pub const MSG_CONTENT_UNAVAILABLE: &str = "Portfolio content unavailable.";

pub const PROFILE_ENDPOINT_BASE: &str = "https://api.github.com/users";
pub const EMAIL_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";
pub const CHAT_LINK_BASE: &str = "https://wa.me";

/// Outbound request timeout for native builds.
pub const HTTP_TIMEOUT_SECS: u64 = 10;
