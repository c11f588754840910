//! Plugin registry mapping type names to component constructors
//!
//! Type names are matched case-insensitively. Each entry is tagged with the
//! capability it provides, so resolving `csv` as a filter fails cleanly
//! instead of producing the wrong kind of component.

use crate::analytics::{ChannelPerformanceAnalytics, FraudDetectorAnalytics, TopMerchantsAnalytics};
use crate::core::traits::{Analytics, Filter, Reader, Writer};
use crate::filters::{AmountFilter, DateRangeFilter, StatusFilter};
use crate::io::{CsvReader, JsonReader};
use crate::types::ComponentKind;
use crate::writers::{ApiWriter, ConsoleWriter, FileWriter};
use std::collections::HashMap;
use tracing::debug;

/// Constructor for a default (uninitialized) component instance
#[derive(Clone, Copy)]
pub enum ComponentConstructor {
    Reader(fn() -> Box<dyn Reader>),
    Filter(fn() -> Box<dyn Filter>),
    Analytics(fn() -> Box<dyn Analytics>),
    Writer(fn() -> Box<dyn Writer>),
}

impl ComponentConstructor {
    /// Capability this constructor produces
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentConstructor::Reader(_) => ComponentKind::Reader,
            ComponentConstructor::Filter(_) => ComponentKind::Filter,
            ComponentConstructor::Analytics(_) => ComponentKind::Analytics,
            ComponentConstructor::Writer(_) => ComponentKind::Writer,
        }
    }
}

impl std::fmt::Debug for ComponentConstructor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ComponentConstructor::{}", self.kind())
    }
}

/// Static name -> constructor table
///
/// Fixed at process start by [`PluginRegistry::new`] and open for extension
/// through [`PluginRegistry::register`].
#[derive(Debug, Clone)]
pub struct PluginRegistry {
    entries: HashMap<String, ComponentConstructor>,
}

impl PluginRegistry {
    /// Create a registry holding every built-in component
    pub fn new() -> Self {
        let mut registry = Self::empty();

        // readers
        registry.register(
            "csv",
            ComponentConstructor::Reader(|| Box::new(CsvReader::default())),
        );
        registry.register(
            "json",
            ComponentConstructor::Reader(|| Box::new(JsonReader::default())),
        );

        // filters
        registry.register(
            "status_filter",
            ComponentConstructor::Filter(|| Box::new(StatusFilter::default())),
        );
        registry.register(
            "amount_filter",
            ComponentConstructor::Filter(|| Box::new(AmountFilter::default())),
        );
        registry.register(
            "date_range_filter",
            ComponentConstructor::Filter(|| Box::new(DateRangeFilter::default())),
        );

        // analytics
        registry.register(
            "top_merchants",
            ComponentConstructor::Analytics(|| Box::new(TopMerchantsAnalytics::default())),
        );
        registry.register(
            "channel_performance",
            ComponentConstructor::Analytics(|| Box::new(ChannelPerformanceAnalytics::default())),
        );
        registry.register(
            "fraud_detection",
            ComponentConstructor::Analytics(|| Box::new(FraudDetectorAnalytics::default())),
        );

        // writers
        registry.register(
            "console",
            ComponentConstructor::Writer(|| Box::new(ConsoleWriter::default())),
        );
        registry.register(
            "file",
            ComponentConstructor::Writer(|| Box::new(FileWriter::default())),
        );
        registry.register(
            "api",
            ComponentConstructor::Writer(|| Box::new(ApiWriter::default())),
        );

        registry
    }

    /// Create a registry with no entries
    pub fn empty() -> Self {
        PluginRegistry {
            entries: HashMap::new(),
        }
    }

    /// Register (or replace) a type name
    pub fn register(&mut self, type_name: &str, constructor: ComponentConstructor) {
        let key = type_name.trim().to_lowercase();
        debug!(type_name = %key, kind = %constructor.kind(), "Registering component");
        self.entries.insert(key, constructor);
    }

    /// Look up a type name, ignoring case and surrounding whitespace
    pub fn resolve(&self, type_name: &str) -> Option<ComponentConstructor> {
        self.entries.get(&type_name.trim().to_lowercase()).copied()
    }

    /// Registered type names, sorted
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
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
    use rstest::rstest;

    #[rstest]
    #[case("csv", ComponentKind::Reader)]
    #[case("JSON", ComponentKind::Reader)]
    #[case("status_filter", ComponentKind::Filter)]
    #[case("Amount_Filter", ComponentKind::Filter)]
    #[case("date_range_filter", ComponentKind::Filter)]
    #[case("top_merchants", ComponentKind::Analytics)]
    #[case("channel_performance", ComponentKind::Analytics)]
    #[case("FRAUD_DETECTION", ComponentKind::Analytics)]
    #[case("console", ComponentKind::Writer)]
    #[case("file", ComponentKind::Writer)]
    #[case(" api ", ComponentKind::Writer)]
    fn test_default_registrations(#[case] type_name: &str, #[case] expected: ComponentKind) {
        let registry = PluginRegistry::new();
        let constructor = registry
            .resolve(type_name)
            .expect("type should be registered");
        assert_eq!(constructor.kind(), expected);
    }

    #[test]
    fn test_resolve_unknown_returns_none() {
        let registry = PluginRegistry::new();
        assert!(registry.resolve("parquet").is_none());
        assert!(registry.resolve("").is_none());
    }

    #[test]
    fn test_register_is_case_insensitive_and_replaces() {
        let mut registry = PluginRegistry::empty();
        registry.register(
            "Custom",
            ComponentConstructor::Reader(|| Box::new(CsvReader::default())),
        );
        assert_eq!(
            registry.resolve("custom").unwrap().kind(),
            ComponentKind::Reader
        );

        registry.register(
            "CUSTOM",
            ComponentConstructor::Writer(|| Box::new(FileWriter::default())),
        );
        assert_eq!(
            registry.resolve("Custom").unwrap().kind(),
            ComponentKind::Writer
        );
        assert_eq!(registry.type_names(), vec!["custom"]);
    }

    #[test]
    fn test_default_registry_size() {
        assert_eq!(PluginRegistry::new().type_names().len(), 11);
    }
}
