//! Outbound calls: the profile summary fetch, email delivery and the chat
//! deep link. Requests run on Bevy's `IoTaskPool`; callers keep the returned
//! task and poll it each frame.

pub mod deep_link;
pub mod error;
pub mod http;
