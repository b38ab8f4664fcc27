//! Embedded static pages.
//!
//! Two variants of the admin page are compiled in: the full page with the
//! mutating controls, and a read-only one for clients outside the
//! allowlist. Which one `GET /` serves is decided per request by client IP.
//! Assets are embedded rather than read from disk so the binary is
//! self-contained.

/// Read-only page for clients outside the allowlist.
pub const VIEWER_HTML: &str = include_str!("../../static/index.html");

/// Full admin page with save/shutdown/command controls.
pub const ADMIN_HTML: &str = include_str!("../../static/admin.html");

pub const APP_JS: &str = include_str!("../../static/app.js");
pub const STYLE_CSS: &str = include_str!("../../static/style.css");

/// Look up an embedded asset by filename, returning its media type and
/// contents. HTML is deliberately absent: pages are only reachable through
/// `GET /`, where the allowlist picks the variant.
pub fn asset(filename: &str) -> Option<(&'static str, &'static str)> {
    match filename {
        "app.js" => Some(("application/javascript", APP_JS)),
        "style.css" => Some(("text/css", STYLE_CSS)),
        _ => None,
    }
}
