//! Target registry: append-only `{target -> {client -> renderer}}`.

use indexmap::IndexMap;
use serde::Serialize;

use super::builtin::builtin_targets;
use super::{Client, ClientInfo, Target, TargetInfo, TargetKey};
use crate::error::{Result, SnippetError};

/// Scoped registry. Build one per session or per test; keys are never replaced.
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    targets: IndexMap<TargetKey, Target>,
}

/// Introspection view of one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableTarget {
    #[serde(flatten)]
    pub info: TargetInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clients: Option<Vec<ClientInfo>>,
}

impl TargetRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the built-in targets.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for target in builtin_targets() {
            registry.targets.insert(target.info.key.clone(), target);
        }
        registry
    }

    /// Registers a custom target. Rejects incomplete metadata, a taken key,
    /// a target without clients, or a default naming none of them; the
    /// registry is unchanged on error.
    pub fn add_target(&mut self, target: Target) -> Result<()> {
        if !target.info.is_complete() {
            return Err(SnippetError::InvalidTarget(
                "target info must have a key, title, extname and default".to_string(),
            ));
        }
        if self.targets.contains_key(&target.info.key) {
            return Err(SnippetError::InvalidTarget(format!(
                "target {} already exists",
                target.info.key
            )));
        }
        if !target.has_clients() {
            return Err(SnippetError::InvalidTarget(format!(
                "target {} must define at least one client",
                target.info.key
            )));
        }
        if target.client(target.info.default.as_str()).is_none() {
            return Err(SnippetError::InvalidTarget(format!(
                "target {} default client {} is not defined",
                target.info.key, target.info.default
            )));
        }
        tracing::debug!(target_key = %target.info.key, "registered target");
        self.targets.insert(target.info.key.clone(), target);
        Ok(())
    }

    /// Adds a client under an existing target.
    pub fn add_target_client(&mut self, target_key: &str, client: Client) -> Result<()> {
        let target = self
            .targets
            .get_mut(target_key)
            .ok_or_else(|| SnippetError::UnknownTarget(target_key.to_string()))?;
        if !client.info.is_complete() {
            return Err(SnippetError::InvalidClient(
                "client info must have a key and title".to_string(),
            ));
        }
        if target.client(client.info.key.as_str()).is_some() {
            return Err(SnippetError::InvalidClient(format!(
                "client {} already exists under target {}",
                client.info.key, target_key
            )));
        }
        tracing::debug!(target_key, client_key = %client.info.key, "registered client");
        target.insert_client(client);
        Ok(())
    }

    pub fn target(&self, target_key: &str) -> Option<&Target> {
        self.targets.get(target_key)
    }

    /// Picks the renderer for `target_key`. A client key naming a registered
    /// client selects it; anything else falls back to the target's default.
    /// Unknown targets give `None`.
    pub fn resolve(&self, target_key: &str, client_key: Option<&str>) -> Option<&Client> {
        let target = self.targets.get(target_key)?;
        client_key
            .and_then(|key| target.client(key))
            .or_else(|| target.client(target.info.default.as_str()))
    }

    pub fn available_targets(&self) -> Vec<AvailableTarget> {
        self.targets
            .values()
            .map(|target| {
                let clients: Vec<ClientInfo> = target.clients().map(|c| c.info.clone()).collect();
                AvailableTarget {
                    info: target.info.clone(),
                    clients: if clients.is_empty() { None } else { Some(clients) },
                }
            })
            .collect()
    }

    /// File extension for `target_key`, or `""` when unknown.
    pub fn extname_for(&self, target_key: &str) -> &str {
        self.targets
            .get(target_key)
            .map(|t| t.info.extname.as_str())
            .unwrap_or("")
    }
}
