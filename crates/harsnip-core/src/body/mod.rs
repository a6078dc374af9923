//! Body normalization keyed by MIME type family.
//!
//! - multipart: structural parts, empty text, needs a boundary
//! - form-urlencoded: `paramsObj` plus its encoded text
//! - JSON: parsed `jsonObj`, or a `text/plain` fallback with a diagnostic
//! - anything else: opaque text

mod boundary;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::har::RawParam;
use crate::url_model::serialize_query;

pub use boundary::{generate_boundary, BOUNDARY_PREFIX};

pub const JSON_MIME_TYPE: &str = "application/json";
pub const TEXT_MIME_TYPE: &str = "text/plain";
pub const FORM_MIME_TYPE: &str = "application/x-www-form-urlencoded";

/// MIME families the normalizer treats differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFamily {
    Multipart,
    FormUrlEncoded,
    Json,
    Other,
}

impl BodyFamily {
    /// Classifies by essence: parameters after `;` and case are ignored.
    pub fn of(mime_type: &str) -> Self {
        let essence = mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "multipart/mixed" | "multipart/related" | "multipart/form-data"
            | "multipart/alternative" => BodyFamily::Multipart,
            FORM_MIME_TYPE => BodyFamily::FormUrlEncoded,
            "text/json" | "text/x-json" | "application/json" | "application/x-json" => {
                BodyFamily::Json
            }
            _ => BodyFamily::Other,
        }
    }
}

/// One multipart part. File parts only name the file; nothing is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MultipartPart {
    Value {
        name: String,
        value: String,
    },
    File {
        name: String,
        #[serde(rename = "fileName")]
        file_name: String,
        #[serde(rename = "contentType", skip_serializing_if = "Option::is_none")]
        content_type: Option<String>,
    },
}

/// Non-fatal findings recorded while normalizing a body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BodyDiagnostic {
    /// The body was declared JSON but did not parse; it is now `text/plain`.
    JsonParseFallback { error: String },
}

/// Canonical body of a prepared request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    pub mime_type: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<RawParam>>,
    /// Form-encoded bodies only. Serialized as `false` when absent.
    #[serde(serialize_with = "false_if_none")]
    pub params_obj: Option<IndexMap<String, String>>,
    /// Parsed JSON body. Serialized as `false` when absent or unparseable.
    #[serde(serialize_with = "false_if_none")]
    pub json_obj: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<MultipartPart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<BodyDiagnostic>,
}

impl PostData {
    pub fn family(&self) -> BodyFamily {
        BodyFamily::of(&self.mime_type)
    }

    /// True for multipart bodies, whose snippets describe boundary framing.
    pub fn needs_boundary(&self) -> bool {
        self.family() == BodyFamily::Multipart
    }
}

fn false_if_none<T: Serialize, S: Serializer>(
    value: &Option<T>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => v.serialize(serializer),
        None => serializer.serialize_bool(false),
    }
}

/// Normalizes a raw body. Never fails: malformed JSON degrades to text.
pub fn normalize_body(mime_type: &str, text: Option<&str>, params: Option<&[RawParam]>) -> PostData {
    let mut out = PostData {
        mime_type: mime_type.to_string(),
        text: text.unwrap_or_default().to_string(),
        params: params.map(<[RawParam]>::to_vec),
        params_obj: None,
        json_obj: None,
        parts: Vec::new(),
        diagnostic: None,
    };

    match BodyFamily::of(mime_type) {
        BodyFamily::Multipart => {
            out.text.clear();
            out.parts = params
                .unwrap_or_default()
                .iter()
                .map(|p| match &p.file_name {
                    Some(file_name) => MultipartPart::File {
                        name: p.name.clone(),
                        file_name: file_name.clone(),
                        content_type: p.content_type.clone(),
                    },
                    None => MultipartPart::Value {
                        name: p.name.clone(),
                        value: p.value.clone().unwrap_or_default(),
                    },
                })
                .collect();
        }
        BodyFamily::FormUrlEncoded => match params {
            None => out.text.clear(),
            Some(params) => {
                let mut obj = IndexMap::with_capacity(params.len());
                for p in params {
                    obj.insert(p.name.clone(), p.value.clone().unwrap_or_default());
                }
                out.text = serialize_query(&obj);
                out.params_obj = Some(obj);
            }
        },
        BodyFamily::Json => {
            out.mime_type = JSON_MIME_TYPE.to_string();
            if !out.text.is_empty() {
                match serde_json::from_str::<Value>(&out.text) {
                    Ok(value) => out.json_obj = Some(value),
                    Err(e) => {
                        tracing::debug!("JSON body did not parse, treating as {TEXT_MIME_TYPE}: {e}");
                        out.mime_type = TEXT_MIME_TYPE.to_string();
                        out.diagnostic = Some(BodyDiagnostic::JsonParseFallback {
                            error: e.to_string(),
                        });
                    }
                }
            }
        }
        BodyFamily::Other => {}
    }

    out
}
