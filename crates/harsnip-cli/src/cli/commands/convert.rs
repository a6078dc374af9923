//! `harsnip convert <input>` – render snippets for every request.

use anyhow::{anyhow, Context, Result};
use harsnip_core::config::HarsnipConfig;
use harsnip_core::TargetRegistry;
use std::fs;
use std::path::{Path, PathBuf};

use super::input::load_snippet;

#[derive(Debug)]
pub struct ConvertArgs {
    pub input: PathBuf,
    pub target: Option<String>,
    pub client: Option<String>,
    pub indent: Option<String>,
    pub output: Option<PathBuf>,
}

pub fn run_convert(cfg: &HarsnipConfig, args: ConvertArgs) -> Result<()> {
    let snippet = load_snippet(&args.input)?;
    let registry = TargetRegistry::with_builtins();

    let target = args.target.unwrap_or_else(|| cfg.default_target.clone());
    let client = args.client.or_else(|| cfg.default_client.clone());
    let mut options = cfg.render_options();
    if let Some(indent) = args.indent {
        options.indent = Some(indent);
    }

    let snippets = snippet
        .convert(&registry, &target, client.as_deref(), &options)
        .ok_or_else(|| anyhow!("unknown target {target:?}; see `harsnip targets`"))?
        .into_vec();

    match args.output {
        Some(dir) => {
            let written = write_snippets(&dir, registry.extname_for(&target), &snippets)?;
            for path in written {
                println!("Wrote {}", path.display());
            }
        }
        None => println!("{}", snippets.join("\n\n")),
    }
    Ok(())
}

/// Writes `request-<n><extname>` files (1-based) into `dir`.
pub(crate) fn write_snippets(dir: &Path, extname: &str, snippets: &[String]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("create output dir: {}", dir.display()))?;
    let mut written = Vec::with_capacity(snippets.len());
    for (i, code) in snippets.iter().enumerate() {
        let path = dir.join(format!("request-{}{}", i + 1, extname));
        fs::write(&path, code).with_context(|| format!("write snippet: {}", path.display()))?;
        written.push(path);
    }
    tracing::info!("wrote {} snippet(s) to {}", written.len(), dir.display());
    Ok(written)
}
