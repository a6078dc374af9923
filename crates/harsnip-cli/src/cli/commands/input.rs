//! Loads the HAR / request JSON named on the command line.

use anyhow::{Context, Result};
use harsnip_core::HttpSnippet;
use std::io::Read;
use std::path::Path;

/// Reads `path` (or stdin for `-`) and builds a validated session.
pub fn load_snippet(path: &Path) -> Result<HttpSnippet> {
    if path == Path::new("-") {
        let mut json = String::new();
        std::io::stdin()
            .read_to_string(&mut json)
            .context("read HAR from stdin")?;
        return HttpSnippet::from_json_str(&json).context("load HAR from stdin");
    }
    HttpSnippet::from_path(path).with_context(|| format!("load HAR: {}", path.display()))
}
