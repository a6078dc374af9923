//! Snippet targets: renderer interface, metadata, and the registry.
//!
//! A target is a language family (`java`), a client is one library within it
//! (`okhttp`). Renderers see only a `PreparedRequest` and `RenderOptions`.

mod builtin;
mod code_builder;
mod registry;

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::prepare::PreparedRequest;

pub use builtin::{builtin_targets, OkHttp, RapidQl};
pub use code_builder::{quote, CodeBuilder};
pub use registry::{AvailableTarget, TargetRegistry};

pub const DEFAULT_INDENT: &str = "  ";

macro_rules! string_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(key: &str) -> Self {
                Self(key.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_key!(
    /// Identifies a target, e.g. `java`.
    TargetKey
);
string_key!(
    /// Identifies a client within a target, e.g. `okhttp`.
    ClientKey
);

/// Options handed to every renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Indentation unit; renderers default to two spaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent: Option<String>,
    /// Multipart boundary shared across a session. Filled by the dispatcher
    /// when any request needs one and the caller left it unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary: Option<String>,
    /// Free-form values for custom renderers. The built-in clients read only
    /// `indent` and `boundary`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RenderOptions {
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = Some(indent.into());
        self
    }

    pub fn indent(&self) -> &str {
        self.indent.as_deref().unwrap_or(DEFAULT_INDENT)
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// Turns a prepared request into snippet text. Pure.
pub trait Renderer: Send + Sync {
    fn render(&self, request: &PreparedRequest, options: &RenderOptions) -> String;
}

impl<F> Renderer for F
where
    F: Fn(&PreparedRequest, &RenderOptions) -> String + Send + Sync,
{
    fn render(&self, request: &PreparedRequest, options: &RenderOptions) -> String {
        self(request, options)
    }
}

/// Target metadata. All four required fields must be non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetInfo {
    #[serde(default)]
    pub key: TargetKey,
    #[serde(default)]
    pub title: String,
    /// File extension including the dot, e.g. `.java`.
    #[serde(default)]
    pub extname: String,
    /// Client used when none (or an unknown one) is requested.
    #[serde(default)]
    pub default: ClientKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TargetInfo {
    pub fn new(key: &str, title: &str, extname: &str, default: &str) -> Self {
        Self {
            key: key.into(),
            title: title.to_string(),
            extname: extname.to_string(),
            default: default.into(),
            description: None,
        }
    }

    pub(crate) fn is_complete(&self) -> bool {
        !(self.key.is_empty()
            || self.title.is_empty()
            || self.extname.is_empty()
            || self.default.is_empty())
    }
}

/// Client metadata. `key` and `title` must be non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    #[serde(default)]
    pub key: ClientKey,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ClientInfo {
    pub fn new(key: &str, title: &str) -> Self {
        Self {
            key: key.into(),
            title: title.to_string(),
            link: None,
            description: None,
        }
    }

    pub fn with_link(mut self, link: &str) -> Self {
        self.link = Some(link.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub(crate) fn is_complete(&self) -> bool {
        !(self.key.is_empty() || self.title.is_empty())
    }
}

/// A client: metadata plus its renderer.
#[derive(Clone)]
pub struct Client {
    pub info: ClientInfo,
    renderer: Arc<dyn Renderer>,
}

impl Client {
    pub fn new(info: ClientInfo, renderer: impl Renderer + 'static) -> Self {
        Self {
            info,
            renderer: Arc::new(renderer),
        }
    }

    pub fn render(&self, request: &PreparedRequest, options: &RenderOptions) -> String {
        self.renderer.render(request, options)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").field("info", &self.info).finish_non_exhaustive()
    }
}

/// A target and the clients registered under it, in registration order.
#[derive(Debug, Clone)]
pub struct Target {
    pub info: TargetInfo,
    clients: indexmap::IndexMap<ClientKey, Client>,
}

impl Target {
    pub fn new(info: TargetInfo) -> Self {
        Self {
            info,
            clients: indexmap::IndexMap::new(),
        }
    }

    /// Builder-style client attachment; a repeated key replaces the earlier client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.clients.insert(client.info.key.clone(), client);
        self
    }

    pub fn client(&self, key: &str) -> Option<&Client> {
        self.clients.get(key)
    }

    pub fn clients(&self) -> impl Iterator<Item = &Client> {
        self.clients.values()
    }

    pub(crate) fn insert_client(&mut self, client: Client) {
        self.clients.insert(client.info.key.clone(), client);
    }

    pub(crate) fn has_clients(&self) -> bool {
        !self.clients.is_empty()
    }
}
