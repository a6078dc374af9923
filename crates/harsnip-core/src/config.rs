use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::targets::{RenderOptions, DEFAULT_INDENT};

/// Global configuration loaded from `~/.config/harsnip/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarsnipConfig {
    /// Target used when `--target` is not given.
    pub default_target: String,
    /// Client used when `--client` is not given; the target's default otherwise.
    #[serde(default)]
    pub default_client: Option<String>,
    /// Indentation unit handed to renderers.
    #[serde(default = "default_indent")]
    pub indent: String,
}

fn default_indent() -> String {
    DEFAULT_INDENT.to_string()
}

impl Default for HarsnipConfig {
    fn default() -> Self {
        Self {
            default_target: "java".to_string(),
            default_client: None,
            indent: default_indent(),
        }
    }
}

impl HarsnipConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::default().with_indent(self.indent.clone())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("harsnip")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HarsnipConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<HarsnipConfig> {
    if !path.exists() {
        let default_cfg = HarsnipConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: HarsnipConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_values() {
        let cfg = HarsnipConfig::default();
        assert_eq!(cfg.default_target, "java");
        assert!(cfg.default_client.is_none());
        assert_eq!(cfg.indent, "  ");
        assert_eq!(cfg.render_options().indent(), "  ");
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = HarsnipConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: HarsnipConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            default_target = "rapidql"
            default_client = "rapidql"
            indent = "    "
        "#;
        let cfg: HarsnipConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.default_target, "rapidql");
        assert_eq!(cfg.default_client.as_deref(), Some("rapidql"));
        assert_eq!(cfg.render_options().indent(), "    ");
    }

    #[test]
    fn config_toml_optional_fields_default() {
        let cfg: HarsnipConfig = toml::from_str(r#"default_target = "java""#).unwrap();
        assert!(cfg.default_client.is_none());
        assert_eq!(cfg.indent, "  ");
    }

    #[test]
    fn load_or_init_creates_then_reads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let created = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        fs::write(&path, "default_target = \"rapidql\"\n").unwrap();
        let loaded = load_or_init_at(&path).unwrap();
        assert_eq!(created, HarsnipConfig::default());
        assert_eq!(loaded.default_target, "rapidql");
    }
}
