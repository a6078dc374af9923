pub mod config;
pub mod error;
pub mod logging;

// Normalization pipeline, leaves first.
pub mod body;
pub mod har;
pub mod headers;
pub mod prepare;
pub mod url_model;

// Dispatch.
pub mod snippet;
pub mod targets;

pub use error::{Result, SnippetError};
pub use har::HarInput;
pub use prepare::{prepare, PreparedRequest};
pub use snippet::{Conversion, HttpSnippet};
pub use targets::{Client, ClientInfo, RenderOptions, Renderer, Target, TargetInfo, TargetRegistry};
