//! URL and query reconciliation.
//!
//! A HAR request may carry its query both inline in `url` and as the
//! `queryString` list. Reconciliation merges the two into one mapping and
//! rebuilds the URL so the query appears exactly once.

mod query;
mod uri;

use indexmap::IndexMap;
use url::{ParseError, Url};

use crate::error::{Result, SnippetError};
use crate::har::Pair;

pub use query::{encode_uri_component, parse_query, serialize_query};
pub use uri::UriObj;

/// Output of `reconcile`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// Input URL with the inline query removed.
    pub url: String,
    pub query_obj: IndexMap<String, String>,
    pub uri_obj: UriObj,
    /// URL with the merged query reattached.
    pub full_url: String,
}

/// Merges `url`'s inline query with `explicit`.
///
/// Inline parameters are inserted first, then the explicit list in order;
/// the last assignment to a name wins and keeps the name's first position.
/// A string that is not an absolute URL is split opaquely instead of
/// rejected. Other parse failures (empty host, bad port) are `MalformedUrl`.
pub fn reconcile(url: &str, explicit: &[Pair]) -> Result<Reconciled> {
    let (base, inline) = match Url::parse(url) {
        Ok(parsed) => {
            let inline: Vec<(String, String)> = parsed
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            (UriObj::from_url(&parsed), inline)
        }
        Err(ParseError::RelativeUrlWithoutBase) => {
            let (uri, query) = UriObj::opaque(url);
            let inline = query.as_deref().map(parse_query).unwrap_or_default();
            (uri, inline)
        }
        Err(e) => {
            return Err(SnippetError::MalformedUrl {
                url: url.to_string(),
                reason: e.to_string(),
            })
        }
    };

    let mut query_obj = IndexMap::new();
    for (name, value) in inline {
        query_obj.insert(name, value);
    }
    for pair in explicit {
        query_obj.insert(pair.name.clone(), pair.value.clone());
    }

    let clean_url = base.format_without_query();
    let search = serialize_query(&query_obj);
    let uri_obj = base.with_query(query_obj.clone(), search);
    let full_url = uri_obj.format();

    Ok(Reconciled {
        url: clean_url,
        query_obj,
        uri_obj,
        full_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(pairs: &[(&str, &str)]) -> Vec<Pair> {
        pairs.iter().map(|(k, v)| Pair::new(*k, *v)).collect()
    }

    #[test]
    fn inline_and_explicit_union() {
        let r = reconcile("http://x.com/a?x=1", &q(&[("y", "2")])).unwrap();
        assert_eq!(r.query_obj.get("x").map(String::as_str), Some("1"));
        assert_eq!(r.query_obj.get("y").map(String::as_str), Some("2"));
        assert_eq!(r.query_obj.len(), 2);
        assert_eq!(r.full_url, "http://x.com/a?x=1&y=2");
        assert_eq!(r.url, "http://x.com/a");
        assert_eq!(r.uri_obj.path, "/a?x=1&y=2");
        assert_eq!(r.uri_obj.search, "x=1&y=2");
    }

    #[test]
    fn explicit_overwrites_inline() {
        let r = reconcile("http://x.com/?a=inline&b=keep", &q(&[("a", "explicit")])).unwrap();
        assert_eq!(r.query_obj.get("a").map(String::as_str), Some("explicit"));
        assert_eq!(r.full_url, "http://x.com/?a=explicit&b=keep");
    }

    #[test]
    fn har_style_duplicate_listing_collapses() {
        let r = reconcile("http://x.com/?a=1&b=2", &q(&[("a", "1"), ("b", "2")])).unwrap();
        assert_eq!(r.full_url, "http://x.com/?a=1&b=2");
    }

    #[test]
    fn last_explicit_duplicate_wins() {
        let r = reconcile("http://x.com/", &q(&[("a", "1"), ("a", "2")])).unwrap();
        assert_eq!(r.query_obj.get("a").map(String::as_str), Some("2"));
        assert_eq!(r.full_url, "http://x.com/?a=2");
    }

    #[test]
    fn no_query_means_no_question_mark() {
        let r = reconcile("http://x.com/a?", &[]).unwrap();
        assert!(r.query_obj.is_empty());
        assert_eq!(r.full_url, "http://x.com/a");
        assert_eq!(r.uri_obj.path, "/a");
    }

    #[test]
    fn full_url_has_single_separator() {
        let r = reconcile("http://x.com/a?x=1?2", &q(&[("y", "a?b")])).unwrap();
        assert_eq!(r.full_url.matches('?').count(), 1);
        assert_eq!(r.full_url, "http://x.com/a?x=1%3F2&y=a%3Fb");
    }

    #[test]
    fn hash_survives_after_query() {
        let r = reconcile("http://x.com/a?x=1#top", &q(&[("y", "2")])).unwrap();
        assert_eq!(r.url, "http://x.com/a#top");
        assert_eq!(r.full_url, "http://x.com/a?x=1&y=2#top");
    }

    #[test]
    fn reconciliation_is_idempotent() {
        let first = reconcile(
            "https://x.com/s?q=a+b&e=%26",
            &q(&[("sp ace", "x y"), ("u", "é")]),
        )
        .unwrap();
        let second = reconcile(&first.full_url, &[]).unwrap();
        assert_eq!(first.query_obj, second.query_obj);
        assert_eq!(first.full_url, second.full_url);
    }

    #[test]
    fn schemeless_url_is_opaque() {
        let r = reconcile("x.com/a?x=1", &q(&[("y", "2")])).unwrap();
        assert!(r.uri_obj.protocol.is_none());
        assert_eq!(r.url, "x.com/a");
        assert_eq!(r.full_url, "x.com/a?x=1&y=2");
    }

    #[test]
    fn empty_host_is_malformed() {
        let err = reconcile("http://", &[]).unwrap_err();
        assert!(matches!(err, SnippetError::MalformedUrl { .. }));
    }

    #[test]
    fn bad_port_is_malformed() {
        let err = reconcile("http://x.com:99999/", &[]).unwrap_err();
        assert!(matches!(err, SnippetError::MalformedUrl { .. }));
    }
}
