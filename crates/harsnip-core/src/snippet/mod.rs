//! Conversion session: validated, prepared requests plus dispatch.

use std::borrow::Cow;
use std::path::Path;
use std::sync::OnceLock;

use crate::body::generate_boundary;
use crate::error::Result;
use crate::har::{validate_request, HarInput};
use crate::prepare::{prepare, PreparedRequest};
use crate::targets::{RenderOptions, TargetRegistry};

/// Snippets produced by `convert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// Exactly one request was converted.
    Single(String),
    /// Zero or several requests, in input order.
    Many(Vec<String>),
}

impl Conversion {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Conversion::Single(s) => vec![s],
            Conversion::Many(v) => v,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Conversion::Single(_) => 1,
            Conversion::Many(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A batch of prepared requests. Construction validates and prepares every
/// entry; one bad entry fails the whole batch.
#[derive(Debug)]
pub struct HttpSnippet {
    requests: Vec<PreparedRequest>,
    boundary: OnceLock<String>,
}

impl HttpSnippet {
    pub fn new(input: HarInput) -> Result<Self> {
        for (i, raw) in input.requests.iter().enumerate() {
            validate_request(raw).map_err(|e| e.at_entry(i))?;
        }
        let requests = input
            .requests
            .iter()
            .map(prepare)
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(count = requests.len(), "prepared HAR requests");
        Ok(Self {
            requests,
            boundary: OnceLock::new(),
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::new(HarInput::from_json_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::new(HarInput::from_path(path)?)
    }

    pub fn requests(&self) -> &[PreparedRequest] {
        &self.requests
    }

    /// Session-wide multipart boundary, generated on first use.
    pub fn boundary(&self) -> &str {
        self.boundary.get_or_init(generate_boundary)
    }

    /// Renders every request with the client resolved from `registry`.
    /// `None` when `target_key` is not registered.
    pub fn convert(
        &self,
        registry: &TargetRegistry,
        target_key: &str,
        client_key: Option<&str>,
        options: &RenderOptions,
    ) -> Option<Conversion> {
        let client = registry.resolve(target_key, client_key)?;
        tracing::debug!(target_key, client_key = %client.info.key, "converting");

        let needs_boundary = self.requests.iter().any(|r| r.post_data.needs_boundary());
        let options = if needs_boundary && options.boundary.is_none() {
            let mut with_boundary = options.clone();
            with_boundary.boundary = Some(self.boundary().to_string());
            Cow::Owned(with_boundary)
        } else {
            Cow::Borrowed(options)
        };

        let mut snippets: Vec<String> = self
            .requests
            .iter()
            .map(|request| client.render(request, &options))
            .collect();

        Some(if snippets.len() == 1 {
            Conversion::Single(snippets.remove(0))
        } else {
            Conversion::Many(snippets)
        })
    }
}
