//! Greeting and header badge
//!
//! The summary greeting depends only on the wall-clock hour; the display
//! name and header badge fall back to the guest identity when there is no
//! session.

use crate::storage::config::HeaderStyle;
use crate::storage::session::CurrentUser;

pub const GUEST_NAME: &str = "Guest";
const GUEST_BADGE: &str = "G";

/// 5-11 morning, 12-17 afternoon, 18-21 evening, otherwise night.
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning,",
        12..=17 => "Good afternoon,",
        18..=21 => "Good evening,",
        _ => "Good night,",
    }
}

/// "First Last", "First", or "Guest".
pub fn display_name(session: Option<&CurrentUser>) -> String {
    let Some(session) = session else {
        return GUEST_NAME.to_string();
    };

    let parts: Vec<&str> = [session.first_name.as_deref(), session.last_name.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if parts.is_empty() {
        GUEST_NAME.to_string()
    } else {
        parts.join(" ")
    }
}

/// Header user badge
pub fn header_badge(session: Option<&CurrentUser>, style: HeaderStyle) -> String {
    let badge = session.and_then(|s| match style {
        HeaderStyle::Username => s.username.as_deref().and_then(first_upper),
        HeaderStyle::Initials => {
            let first = s.first_name.as_deref().and_then(first_upper);
            let last = s.last_name.as_deref().and_then(first_upper);
            match (first, last) {
                (None, None) => None,
                (first, last) => Some(format!(
                    "{}{}",
                    first.unwrap_or_default(),
                    last.unwrap_or_default()
                )),
            }
        }
    });
    badge.unwrap_or_else(|| GUEST_BADGE.to_string())
}

fn first_upper(s: &str) -> Option<String> {
    s.trim().chars().next().map(|c| c.to_uppercase().collect())
}
