//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is in a slug path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Path of the route-based detail page
///
/// # Examples
/// ```ignore
/// post_path("hello-world") // -> "/blog/hello-world"
/// ```
pub fn post_path(slug: &str) -> String {
    format!("/blog/{}", encode_segment(slug))
}

/// Path of the listing with a post opened in the overlay
pub fn overlay_path(slug: &str) -> String {
    format!("/blog?post={}", encode_segment(slug))
}

/// Encode a single path segment or query value
pub fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

/// Whether a menu path points at the current page
pub fn is_current(menu_path: &str, current: &str) -> bool {
    if menu_path == "/" {
        current == "/"
    } else {
        let prefix = format!("{}/", menu_path.trim_end_matches('/'));
        current == menu_path || current.starts_with(&prefix)
    }
}
