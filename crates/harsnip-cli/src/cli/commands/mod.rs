//! CLI command handlers, one per file.

mod convert;
mod input;
mod prepare;
mod targets;

pub use convert::{run_convert, ConvertArgs};
pub use prepare::run_prepare;
pub use targets::run_targets;
