//! HAR (HTTP Archive) input: a single request object or a full HAR log.
//!
//! Loading injects defaults into every request; validation is a separate
//! step (`validate_request`) so callers can run it per entry.

mod parse;
mod validate;

use std::path::Path;

use serde_json::Value;

use crate::error::{Result, SnippetError};

pub use parse::{HarEntry, HarLog, HarRoot, Pair, RawParam, RawPostData, RawRequest};
pub use validate::{validate_request, ValidationError, Violation};

/// What the caller handed us, already split into request entries.
#[derive(Debug, Clone, PartialEq)]
pub struct HarInput {
    pub requests: Vec<RawRequest>,
}

impl HarInput {
    pub fn single(request: RawRequest) -> Self {
        Self {
            requests: vec![request.with_defaults()],
        }
    }

    /// Accepts `{ "log": { "entries": [...] } }` or a bare request object.
    pub fn from_value(value: Value) -> Result<Self> {
        let is_log = value
            .get("log")
            .and_then(|log| log.get("entries"))
            .is_some();
        let requests = if is_log {
            let har: HarLog = serde_json::from_value(value)?;
            har.log.entries.into_iter().map(|e| e.request).collect()
        } else {
            vec![serde_json::from_value::<RawRequest>(value)?]
        };
        Ok(Self {
            requests: requests.into_iter().map(RawRequest::with_defaults).collect(),
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| SnippetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_value(serde_json::from_slice(&bytes)?)
    }
}
