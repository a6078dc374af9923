//! HAR 1.2 request structures, as much of them as snippet generation needs.
//!
//! Every optional field defaults to empty on deserialization; `with_defaults`
//! then fills in the values the validation gate expects.

use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_HTTP_VERSION: &str = "HTTP/1.1";
pub(crate) const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Root HAR document (top-level wrapper).
#[derive(Debug, Clone, Deserialize)]
pub struct HarLog {
    pub log: HarRoot,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HarRoot {
    #[serde(default)]
    pub entries: Vec<HarEntry>,
}

/// One HAR entry. The response side is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct HarEntry {
    pub request: RawRequest,
}

/// A request as supplied by the caller, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRequest {
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub http_version: String,
    #[serde(default)]
    pub headers: Vec<Pair>,
    #[serde(default)]
    pub cookies: Vec<Pair>,
    #[serde(default)]
    pub query_string: Vec<Pair>,
    #[serde(default)]
    pub post_data: RawPostData,
}

/// Name/value pair used for headers, cookies and query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl Pair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPostData {
    #[serde(default)]
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<RawParam>>,
}

/// A posted parameter: a plain value or a file reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawParam {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl RawParam {
    pub fn value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn file(name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_name: Some(file_name.into()),
            ..Self::default()
        }
    }
}

impl RawRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            ..Self::default()
        }
        .with_defaults()
    }

    /// Fills absent optional fields: `HTTP/1.1` and an octet-stream body type.
    pub fn with_defaults(mut self) -> Self {
        if self.http_version.is_empty() {
            self.http_version = DEFAULT_HTTP_VERSION.to_string();
        }
        if self.post_data.mime_type.is_empty() {
            self.post_data.mime_type = DEFAULT_MIME_TYPE.to_string();
        }
        self
    }
}
