//! Component factory
//!
//! Resolves type names through the [`PluginRegistry`], instantiates the
//! matching component and initializes it with its options. Every failure is
//! returned as a [`PipelineError`] so the caller can treat the component as
//! absent and keep going.

use crate::core::registry::{ComponentConstructor, PluginRegistry};
use crate::core::traits::{Analytics, Component, Filter, Reader, Writer};
use crate::types::{ComponentKind, Options, PipelineError};
use tracing::{debug, error};

/// Creates initialized components from `{type, options}` pairs
#[derive(Debug, Clone, Default)]
pub struct ComponentFactory {
    registry: PluginRegistry,
}

impl ComponentFactory {
    /// Create a factory backed by the given registry
    pub fn new(registry: PluginRegistry) -> Self {
        ComponentFactory { registry }
    }

    /// Registry used for resolution
    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Create and initialize a reader
    ///
    /// # Errors
    ///
    /// - `ComponentResolution` if `type_name` is not registered as a reader
    /// - `ComponentInit` if the reader rejects its options
    pub fn create_reader(
        &self,
        type_name: &str,
        options: &Options,
    ) -> Result<Box<dyn Reader>, PipelineError> {
        let instance = match self.registry.resolve(type_name) {
            Some(ComponentConstructor::Reader(construct)) => construct(),
            _ => return Err(self.unresolved(ComponentKind::Reader, type_name)),
        };
        Self::initialize(ComponentKind::Reader, type_name, instance, options)
    }

    /// Create and initialize a filter
    ///
    /// # Errors
    ///
    /// - `ComponentResolution` if `type_name` is not registered as a filter
    /// - `ComponentInit` if the filter rejects its options
    pub fn create_filter(
        &self,
        type_name: &str,
        options: &Options,
    ) -> Result<Box<dyn Filter>, PipelineError> {
        let instance = match self.registry.resolve(type_name) {
            Some(ComponentConstructor::Filter(construct)) => construct(),
            _ => return Err(self.unresolved(ComponentKind::Filter, type_name)),
        };
        Self::initialize(ComponentKind::Filter, type_name, instance, options)
    }

    /// Create and initialize an analytics module
    ///
    /// # Errors
    ///
    /// - `ComponentResolution` if `type_name` is not registered as analytics
    /// - `ComponentInit` if the module rejects its options
    pub fn create_analytics(
        &self,
        type_name: &str,
        options: &Options,
    ) -> Result<Box<dyn Analytics>, PipelineError> {
        let instance = match self.registry.resolve(type_name) {
            Some(ComponentConstructor::Analytics(construct)) => construct(),
            _ => return Err(self.unresolved(ComponentKind::Analytics, type_name)),
        };
        Self::initialize(ComponentKind::Analytics, type_name, instance, options)
    }

    /// Create and initialize a writer
    ///
    /// # Errors
    ///
    /// - `ComponentResolution` if `type_name` is not registered as a writer
    /// - `ComponentInit` if the writer rejects its options
    pub fn create_writer(
        &self,
        type_name: &str,
        options: &Options,
    ) -> Result<Box<dyn Writer>, PipelineError> {
        let instance = match self.registry.resolve(type_name) {
            Some(ComponentConstructor::Writer(construct)) => construct(),
            _ => return Err(self.unresolved(ComponentKind::Writer, type_name)),
        };
        Self::initialize(ComponentKind::Writer, type_name, instance, options)
    }

    fn unresolved(&self, kind: ComponentKind, type_name: &str) -> PipelineError {
        match self.registry.resolve(type_name) {
            Some(other) => error!(
                %kind,
                type_name,
                registered_as = %other.kind(),
                "Component is registered for a different capability"
            ),
            None => error!(%kind, type_name, "Unknown component type"),
        }
        PipelineError::component_resolution(kind, type_name)
    }

    fn initialize<T: Component + ?Sized>(
        kind: ComponentKind,
        type_name: &str,
        mut instance: Box<T>,
        options: &Options,
    ) -> Result<Box<T>, PipelineError> {
        match instance.init(options) {
            Ok(()) => {
                debug!(%kind, type_name, component = instance.name(), "Component initialized");
                Ok(instance)
            }
            Err(cause) => {
                error!(%kind, type_name, error = %cause, "Failed to initialize component");
                Err(PipelineError::component_init(kind, type_name, &cause))
            }
        }
    }
}
