//! In-memory registry of runnable plugins.
//!
//! A plugin is `Unregistered` until `register` accepts it, then
//! `Registered(enabled)` until `unregister`. Bodies are scanned by the
//! sandbox gate first; a rejected body is logged and never stored. The map
//! is a `DashMap`, so `&PluginRegistry` can be shared across invocations.

pub mod sandbox;

use std::collections::BTreeMap;

use dashmap::DashMap;
use serde::Serialize;
use tracing::Span;

use crate::error::CompilerError;
use crate::parse::node_config::TriggerKind;
use crate::plugin::CompiledPlugin;
pub use sandbox::{SandboxGate, SandboxViolation};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryStats {
    pub total: usize,
    pub enabled: usize,
    pub disabled: usize,
    pub by_trigger_kind: BTreeMap<TriggerKind, usize>,
}

pub struct PluginRegistry {
    plugins: DashMap<String, CompiledPlugin>,
    gate: SandboxGate,
    span: Span,
}

impl PluginRegistry {
    pub fn new() -> Self {
        PluginRegistry {
            plugins: DashMap::new(),
            gate: SandboxGate::new(),
            span: Span::none(),
        }
    }

    /// Log registry events under `span`.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Scan and store `plugin`, replacing any plugin with the same id. The
    /// stored enabled flag is the plugin's own.
    pub fn try_register(&self, plugin: CompiledPlugin) -> Result<(), CompilerError> {
        if let Err(violation) = self.gate.scan(&plugin.body) {
            tracing::warn!(
                parent: &self.span,
                plugin = %plugin.id,
                %violation,
                "rejected plugin body"
            );
            return Err(CompilerError::register(
                "R001",
                format!("Plugin body rejected: {}", violation),
                None,
            ));
        }

        tracing::info!(
            parent: &self.span,
            plugin = %plugin.id,
            kind = %plugin.trigger.kind,
            trigger = %plugin.trigger.value,
            enabled = plugin.enabled,
            "registered plugin"
        );
        self.plugins.insert(plugin.id.clone(), plugin);
        Ok(())
    }

    /// `true` when the plugin was accepted. Rejections never raise.
    pub fn register(&self, plugin: CompiledPlugin) -> bool {
        self.try_register(plugin).is_ok()
    }

    /// Enabled plugins whose trigger matches `kind` and `value`, by id.
    pub fn find_by_trigger(&self, value: &str, kind: TriggerKind) -> Vec<CompiledPlugin> {
        let mut found: Vec<CompiledPlugin> = self
            .plugins
            .iter()
            .filter(|p| p.enabled && p.trigger.kind == kind && p.trigger.value == value)
            .map(|p| p.value().clone())
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        found
    }

    pub fn get(&self, id: &str) -> Option<CompiledPlugin> {
        self.plugins.get(id).map(|p| p.value().clone())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.plugins.contains_key(id)
    }

    /// Returns whether `id` is registered. Enabling twice is a no-op.
    pub fn enable(&self, id: &str) -> bool {
        self.set_enabled(id, true)
    }

    /// Returns whether `id` is registered. Disabling twice is a no-op.
    pub fn disable(&self, id: &str) -> bool {
        self.set_enabled(id, false)
    }

    fn set_enabled(&self, id: &str, enabled: bool) -> bool {
        match self.plugins.get_mut(id) {
            Some(mut plugin) => {
                if plugin.enabled != enabled {
                    plugin.enabled = enabled;
                    tracing::info!(parent: &self.span, plugin = id, enabled, "plugin toggled");
                }
                true
            }
            None => false,
        }
    }

    /// Returns whether `id` was registered.
    pub fn unregister(&self, id: &str) -> bool {
        let removed = self.plugins.remove(id).is_some();
        if removed {
            tracing::info!(parent: &self.span, plugin = id, "unregistered plugin");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn statistics(&self) -> RegistryStats {
        let mut stats = RegistryStats::default();
        for plugin in self.plugins.iter() {
            stats.total += 1;
            if plugin.enabled {
                stats.enabled += 1;
            } else {
                stats.disabled += 1;
            }
            *stats.by_trigger_kind.entry(plugin.trigger.kind).or_insert(0) += 1;
        }
        stats
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::TriggerDescriptor;

    fn plugin(id: &str, kind: TriggerKind, value: &str, body: &str) -> CompiledPlugin {
        CompiledPlugin {
            id: id.into(),
            nodes: vec![],
            edges: vec![],
            body: body.into(),
            trigger: TriggerDescriptor {
                kind,
                value: value.into(),
            },
            enabled: true,
            options: vec![],
        }
    }

    #[test]
    fn rejected_body_is_not_stored() {
        let registry = PluginRegistry::new();
        let err = registry
            .try_register(plugin("bad", TriggerKind::Command, "x", "eval('1')"))
            .unwrap_err();
        assert_eq!(err.code, "R001");
        assert_eq!(err.phase, crate::error::Phase::Register);
        assert!(!registry.contains("bad"));
    }

    #[test]
    fn disabled_plugins_are_not_found() {
        let registry = PluginRegistry::new();
        assert!(registry.register(plugin("a", TriggerKind::Command, "ping", "x;")));
        assert!(registry.register(plugin("b", TriggerKind::Command, "ping", "y;")));
        assert!(registry.register(plugin("c", TriggerKind::Event, "ping", "z;")));

        let ids = |found: Vec<CompiledPlugin>| found.into_iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(ids(registry.find_by_trigger("ping", TriggerKind::Command)), vec!["a", "b"]);

        assert!(registry.disable("a"));
        assert_eq!(ids(registry.find_by_trigger("ping", TriggerKind::Command)), vec!["b"]);
        assert!(!registry.disable("missing"));
    }

    #[test]
    fn statistics_by_kind() {
        let registry = PluginRegistry::new();
        registry.register(plugin("a", TriggerKind::Command, "a", "x;"));
        registry.register(plugin("b", TriggerKind::Message, "hi", "x;"));
        registry.register(plugin("c", TriggerKind::Message, "yo", "x;"));
        registry.disable("c");

        let stats = registry.statistics();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.enabled, 2);
        assert_eq!(stats.disabled, 1);
        assert_eq!(stats.by_trigger_kind.get(&TriggerKind::Message), Some(&2));
        assert_eq!(stats.by_trigger_kind.get(&TriggerKind::Event), None);
    }
}
