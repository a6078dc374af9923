//! Structured URL decomposition that renderers can read piecewise.

use indexmap::IndexMap;
use serde::Serialize;
use url::Url;

/// Decomposed URL. `search` and `hash` are stored without their `?` / `#`.
/// `path` is `pathname` plus `?search` when the search is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UriObj {
    /// Scheme with trailing colon, e.g. `https:`. `None` for opaque input.
    pub protocol: Option<String>,
    pub slashes: bool,
    pub auth: Option<String>,
    /// `hostname[:port]`.
    pub host: Option<String>,
    pub hostname: Option<String>,
    pub port: Option<u16>,
    pub pathname: String,
    pub search: String,
    pub query: IndexMap<String, String>,
    pub path: String,
    pub hash: Option<String>,
}

impl UriObj {
    pub(crate) fn from_url(url: &Url) -> Self {
        let auth = match (url.username(), url.password()) {
            ("", None) => None,
            (user, None) => Some(user.to_string()),
            (user, Some(pass)) => Some(format!("{}:{}", user, pass)),
        };
        let hostname = url.host_str().map(str::to_string);
        let host = hostname.as_ref().map(|h| match url.port() {
            Some(port) => format!("{}:{}", h, port),
            None => h.clone(),
        });
        Self {
            protocol: Some(format!("{}:", url.scheme())),
            slashes: !url.cannot_be_a_base(),
            auth,
            host,
            hostname,
            port: url.port(),
            pathname: url.path().to_string(),
            path: url.path().to_string(),
            hash: url.fragment().map(str::to_string),
            ..Self::default()
        }
    }

    /// Splits a string that is not an absolute URL: `pathname[?search][#hash]`.
    pub(crate) fn opaque(raw: &str) -> (Self, Option<String>) {
        let (rest, hash) = match raw.split_once('#') {
            Some((rest, hash)) => (rest, Some(hash.to_string())),
            None => (raw, None),
        };
        let (pathname, query) = match rest.split_once('?') {
            Some((p, q)) => (p, Some(q.to_string())),
            None => (rest, None),
        };
        let uri = Self {
            pathname: pathname.to_string(),
            path: pathname.to_string(),
            hash,
            ..Self::default()
        };
        (uri, query)
    }

    /// Installs the reconciled query and its serialized form.
    pub(crate) fn with_query(mut self, query: IndexMap<String, String>, search: String) -> Self {
        self.path = if search.is_empty() {
            self.pathname.clone()
        } else {
            format!("{}?{}", self.pathname, search)
        };
        self.query = query;
        self.search = search;
        self
    }

    fn format_base(&self) -> String {
        let mut out = String::new();
        if let Some(protocol) = &self.protocol {
            out.push_str(protocol);
        }
        if self.slashes {
            out.push_str("//");
        }
        if let Some(auth) = &self.auth {
            out.push_str(auth);
            out.push('@');
        }
        if let Some(host) = &self.host {
            out.push_str(host);
        }
        out.push_str(&self.pathname);
        out
    }

    fn push_hash(&self, out: &mut String) {
        if let Some(hash) = &self.hash {
            out.push('#');
            out.push_str(hash);
        }
    }

    /// The URL without any query string.
    pub fn format_without_query(&self) -> String {
        let mut out = self.format_base();
        self.push_hash(&mut out);
        out
    }

    /// The URL with `search` attached exactly once.
    pub fn format(&self) -> String {
        let mut out = self.format_base();
        if !self.search.is_empty() {
            out.push('?');
            out.push_str(&self.search);
        }
        self.push_hash(&mut out);
        out
    }
}
