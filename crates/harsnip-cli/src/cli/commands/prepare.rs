//! `harsnip prepare <input>` – dump normalized requests.

use anyhow::Result;
use std::path::Path;

use super::input::load_snippet;

pub fn run_prepare(input: &Path) -> Result<()> {
    let snippet = load_snippet(input)?;
    println!("{}", serde_json::to_string_pretty(snippet.requests())?);
    Ok(())
}
