//! JSON-RPC 2.0 bridge to the page hosting the portfolio canvas.
//!
//! When the app is embedded in an iframe the parent page can query and steer
//! it over `postMessage`. The protocol is plain JSON-RPC 2.0:
//! - **Requests** carry an `id` and receive exactly one response
//! - **Notifications** are one-way and carry no `id`
//! - **Responses** echo the request `id` with either `result` or `error`
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Portfolio (iframe)
//!        │                                            │
//!        ├─ Request (with ID) ──────────────────────> │
//!        │                                            ├─ Dispatch on method
//!        │ <───────────────────── Response (with ID) ─┤
//!        │                                            │
//!        │ <────────────── Notification (no ID) ──────┤
//! ```
//!
//! ## Methods
//!
//! | method | params | result |
//! |---|---|---|
//! | `get_stage` | none | `{"stage": "boot" \| "gate" \| "portfolio"}` |
//! | `get_active_section` | none | `{"section": "home" \| …}` |
//! | `navigate_to_section` | `{"section": "projects"}` | `{"success": true, "section": …}` |
//!
//! `navigate_to_section` is only valid once the portfolio is showing; earlier
//! it answers with `-32600`.
//!
//! ## Notifications
//!
//! - `stage_changed {stage}` whenever a stage is entered
//! - `active_section_changed {section}` when scrolling changes the highlighted section
//! - `contact_result {ok, message}` when a contact submission settles
//!
//! ## Error Codes
//!
//! | code | meaning |
//! |---|---|
//! | -32600 | invalid request (bad envelope, or not allowed in this stage) |
//! | -32601 | method not found |
//! | -32602 | invalid params |
//! | -32603 | internal error |
//!
//! On native builds there is no parent window: outgoing messages are dropped
//! and no listener is installed.

pub mod web_rpc;
