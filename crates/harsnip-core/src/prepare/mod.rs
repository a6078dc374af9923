//! Request normalizer: one raw request in, one immutable `PreparedRequest` out.

use indexmap::IndexMap;
use serde::Serialize;

use crate::body::{normalize_body, PostData};
use crate::error::Result;
use crate::har::{Pair, RawRequest};
use crate::headers::{canonicalize_cookies, canonicalize_headers};
use crate::url_model::{reconcile, UriObj};

const CONTENT_TYPE: &str = "content-type";
const COOKIE: &str = "cookie";

/// The canonical form of a request that every renderer consumes.
///
/// Built only by `prepare`; renderers receive it by shared reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct PreparedRequest {
    pub method: String,
    /// The request URL with its inline query string removed.
    pub url: String,
    /// The URL exactly as supplied.
    pub original_url: String,
    pub http_version: String,
    pub headers: Vec<Pair>,
    pub cookies: Vec<Pair>,
    pub query_string: Vec<Pair>,
    pub query_obj: IndexMap<String, String>,
    pub headers_obj: IndexMap<String, String>,
    pub cookies_obj: IndexMap<String, String>,
    pub all_headers: IndexMap<String, String>,
    pub post_data: PostData,
    pub uri_obj: UriObj,
    pub full_url: String,
}

impl PreparedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.all_headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// Normalizes one request. Fails only when the URL is malformed.
pub fn prepare(request: &RawRequest) -> Result<PreparedRequest> {
    let mut headers_obj = canonicalize_headers(&request.headers);
    let jar = canonicalize_cookies(&request.cookies);

    let raw_body = &request.post_data;
    let post_data = normalize_body(
        &raw_body.mime_type,
        raw_body.text.as_deref(),
        raw_body.params.as_deref(),
    );

    // A caller content-type follows the MIME type normalization settled on.
    if post_data.mime_type != raw_body.mime_type {
        if let Some(content_type) = headers_obj.get_mut(CONTENT_TYPE) {
            content_type.clone_from(&post_data.mime_type);
        }
    }

    // Multipart with params always carries a content-type; the caller's wins.
    if post_data.needs_boundary() && post_data.params.is_some() {
        let content_type = headers_obj
            .get(CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| post_data.mime_type.clone());
        headers_obj.insert(CONTENT_TYPE.to_string(), content_type);
    }

    let reconciled = reconcile(&request.url, &request.query_string)?;

    let mut all_headers = IndexMap::with_capacity(headers_obj.len() + 1);
    if let Some(cookie) = jar.header_value {
        all_headers.insert(COOKIE.to_string(), cookie);
    }
    all_headers.extend(headers_obj.iter().map(|(k, v)| (k.clone(), v.clone())));

    tracing::debug!(
        method = %request.method,
        url = %reconciled.full_url,
        mime_type = %post_data.mime_type,
        "prepared request"
    );

    Ok(PreparedRequest {
        method: request.method.clone(),
        url: reconciled.url,
        original_url: request.url.clone(),
        http_version: request.http_version.clone(),
        headers: request.headers.clone(),
        cookies: request.cookies.clone(),
        query_string: request.query_string.clone(),
        query_obj: reconciled.query_obj,
        headers_obj,
        cookies_obj: jar.cookies_obj,
        all_headers,
        post_data,
        uri_obj: reconciled.uri_obj,
        full_url: reconciled.full_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyDiagnostic;
    use crate::error::SnippetError;
    use crate::har::RawParam;

    fn get(map: &IndexMap<String, String>, key: &str) -> Option<String> {
        map.get(key).cloned()
    }

    #[test]
    fn query_scenario() {
        let mut raw = RawRequest::new("GET", "http://x.com/a?x=1");
        raw.query_string = vec![Pair::new("y", "2")];
        let req = prepare(&raw).unwrap();
        assert_eq!(get(&req.query_obj, "x").as_deref(), Some("1"));
        assert_eq!(get(&req.query_obj, "y").as_deref(), Some("2"));
        assert_eq!(req.full_url, "http://x.com/a?x=1&y=2");
        assert_eq!(req.url, "http://x.com/a");
        assert_eq!(req.original_url, "http://x.com/a?x=1");
    }

    #[test]
    fn cookie_scenario() {
        let mut raw = RawRequest::new("GET", "http://x.com/");
        raw.cookies = vec![Pair::new("a", "1"), Pair::new("a", "2")];
        let req = prepare(&raw).unwrap();
        assert_eq!(get(&req.cookies_obj, "a").as_deref(), Some("1"));
        assert_eq!(get(&req.all_headers, "cookie").as_deref(), Some("a=1; a=2"));
    }

    #[test]
    fn explicit_cookie_header_overrides_synthesized() {
        let mut raw = RawRequest::new("GET", "http://x.com/");
        raw.cookies = vec![Pair::new("a", "1")];
        raw.headers = vec![Pair::new("Cookie", "manual=1"), Pair::new("Accept", "*/*")];
        let req = prepare(&raw).unwrap();
        assert_eq!(get(&req.all_headers, "cookie").as_deref(), Some("manual=1"));
        assert_eq!(get(&req.all_headers, "accept").as_deref(), Some("*/*"));
        assert_eq!(req.all_headers.len(), 2);
        assert_eq!(req.all_headers.get_index(0).map(|(k, _)| k.as_str()), Some("cookie"));
    }

    #[test]
    fn no_cookies_no_cookie_header() {
        let req = prepare(&RawRequest::new("GET", "http://x.com/")).unwrap();
        assert!(req.all_headers.is_empty());
        assert!(req.header("Cookie").is_none());
    }

    #[test]
    fn multipart_adds_content_type_from_mime() {
        let mut raw = RawRequest::new("POST", "http://x.com/upload");
        raw.post_data.mime_type = "multipart/form-data".into();
        raw.post_data.params = Some(vec![RawParam::value("foo", "bar")]);
        let req = prepare(&raw).unwrap();
        assert_eq!(req.header("Content-Type"), Some("multipart/form-data"));
        assert_eq!(req.post_data.text, "");
    }

    #[test]
    fn multipart_keeps_caller_content_type() {
        let mut raw = RawRequest::new("POST", "http://x.com/upload");
        raw.headers = vec![Pair::new(
            "Content-Type",
            "multipart/form-data; boundary=abc",
        )];
        raw.post_data.mime_type = "multipart/form-data".into();
        raw.post_data.params = Some(vec![RawParam::file("f", "a.bin")]);
        let req = prepare(&raw).unwrap();
        assert_eq!(
            req.header("content-type"),
            Some("multipart/form-data; boundary=abc")
        );
        assert_eq!(req.all_headers.len(), 1);
    }

    #[test]
    fn multipart_without_params_adds_nothing() {
        let mut raw = RawRequest::new("POST", "http://x.com/upload");
        raw.post_data.mime_type = "multipart/form-data".into();
        let req = prepare(&raw).unwrap();
        assert!(req.header("content-type").is_none());
    }

    #[test]
    fn json_fallback_rewrites_caller_content_type() {
        let mut raw = RawRequest::new("POST", "http://x.com/");
        raw.headers = vec![Pair::new("Content-Type", "application/json")];
        raw.post_data.mime_type = "application/json".into();
        raw.post_data.text = Some("{oops".into());
        let req = prepare(&raw).unwrap();
        assert_eq!(req.post_data.mime_type, "text/plain");
        assert!(req.post_data.json_obj.is_none());
        assert!(matches!(
            req.post_data.diagnostic,
            Some(BodyDiagnostic::JsonParseFallback { .. })
        ));
        assert_eq!(req.header("content-type"), Some("text/plain"));
        assert_eq!(req.headers_obj.get("content-type").map(String::as_str), Some("text/plain"));
        assert_eq!(req.headers[0].value, "application/json");
    }

    #[test]
    fn canonical_json_mime_rewrites_caller_content_type() {
        let mut raw = RawRequest::new("POST", "http://x.com/");
        raw.headers = vec![Pair::new("Content-Type", "text/json")];
        raw.post_data.mime_type = "text/json".into();
        raw.post_data.text = Some(r#"{"a":1}"#.into());
        let req = prepare(&raw).unwrap();
        assert_eq!(req.post_data.mime_type, "application/json");
        assert_eq!(req.header("content-type"), Some(req.post_data.mime_type.as_str()));
    }

    #[test]
    fn unchanged_mime_leaves_caller_content_type() {
        let mut raw = RawRequest::new("POST", "http://x.com/");
        raw.headers = vec![Pair::new("Content-Type", "text/xml; charset=utf-8")];
        raw.post_data.mime_type = "text/xml".into();
        raw.post_data.text = Some("<a/>".into());
        let req = prepare(&raw).unwrap();
        assert_eq!(req.header("content-type"), Some("text/xml; charset=utf-8"));
    }

    #[test]
    fn json_fallback_without_caller_header_adds_none() {
        let mut raw = RawRequest::new("POST", "http://x.com/");
        raw.post_data.mime_type = "application/json".into();
        raw.post_data.text = Some("{oops".into());
        let req = prepare(&raw).unwrap();
        assert!(req.header("content-type").is_none());
    }

    #[test]
    fn form_body_without_params() {
        let mut raw = RawRequest::new("POST", "http://x.com/");
        raw.post_data.mime_type = "application/x-www-form-urlencoded".into();
        let req = prepare(&raw).unwrap();
        assert_eq!(req.post_data.text, "");
    }

    #[test]
    fn input_is_not_mutated() {
        let mut raw = RawRequest::new("GET", "http://x.com/a?x=1");
        raw.headers = vec![Pair::new("X-A", "1")];
        let before = raw.clone();
        let _ = prepare(&raw).unwrap();
        assert_eq!(raw, before);
    }

    #[test]
    fn malformed_url_propagates() {
        let err = prepare(&RawRequest::new("GET", "http://:80/")).unwrap_err();
        assert!(matches!(err, SnippetError::MalformedUrl { .. }));
    }

    #[test]
    fn serializes_with_har_field_names() {
        let req = prepare(&RawRequest::new("GET", "http://x.com/")).unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["fullUrl"], "http://x.com/");
        assert_eq!(json["postData"]["mimeType"], "application/octet-stream");
        assert_eq!(json["postData"]["jsonObj"], false);
        assert_eq!(json["uriObj"]["protocol"], "http:");
    }
}
