//! The toolbox component registry.
//!
//! Component types are resolved through an explicit registry object instead
//! of a global table, so hosts can assemble different palettes for different
//! form surfaces and tests can register throwaway components in isolation.

use crate::error::ValidationIssue;
use crate::migration::Migrator;
use crate::model::{ComponentModel, FormMarkup};
use crate::resolve::ResolvedModel;
use ahash::AHashMap;
use itertools::Itertools;
use serde_json::Value as JsonValue;
use tracing::debug;

/// Well-known data type names a form field can bind to.
pub mod data_types {
    pub const STRING: &str = "string";
    pub const NUMBER: &str = "number";
    pub const BOOLEAN: &str = "boolean";
    pub const DATE: &str = "date";
    pub const TIME: &str = "time";
    pub const REFERENCE_LIST: &str = "reference-list-item";
}

/// Format refinements of the `string` data type.
pub mod string_formats {
    pub const SINGLELINE: &str = "singleline";
    pub const MULTILINE: &str = "multiline";
    pub const PASSWORD: &str = "password";
    pub const EMAIL: &str = "email";
    pub const URL: &str = "url";
}

/// A bound property's type, used to recommend a matching editor component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTypeRef {
    pub data_type: String,
    pub data_format: Option<String>,
}

impl DataTypeRef {
    pub fn new(data_type: impl Into<String>) -> Self {
        Self {
            data_type: data_type.into(),
            data_format: None,
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.data_format = Some(format.into());
        self
    }
}

/// The host-facing output of rendering one component.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedComponent {
    pub id: String,
    /// Widget kind the host UI maps to an actual control.
    pub widget: String,
    pub props: JsonValue,
}

/// Defines the contract a component type fulfils to participate in the
/// toolbox: identity, migration, validation, defaulting and rendering.
pub trait ToolboxComponent: Send + Sync {
    /// Stable type discriminator stored in markup.
    fn component_type(&self) -> &'static str;

    /// Human-readable toolbox name.
    fn name(&self) -> &'static str;

    /// The migration chain for this type's persisted settings.
    fn migrator(&self) -> Migrator {
        Migrator::empty()
    }

    /// Markup of the settings editor shown for this component type.
    fn settings_form(&self) -> FormMarkup {
        FormMarkup::default()
    }

    /// Settings findings for a model of this type.
    fn validate(&self, _model: &ComponentModel) -> Vec<ValidationIssue> {
        Vec::new()
    }

    /// Fills defaults into a freshly dropped model.
    fn init_model(&self, model: ComponentModel) -> ComponentModel {
        model
    }

    /// Whether this component can edit a property of the given type.
    fn data_type_supported(&self, _data_type: &DataTypeRef) -> bool {
        false
    }

    /// Components like password inputs keep their editor active even when
    /// the surrounding form is readonly. The decision may depend on the
    /// concrete model settings.
    fn retains_edit_on_readonly(&self, _model: &ComponentModel) -> bool {
        false
    }

    /// Produces the host-facing rendition of a resolved model.
    fn render(&self, resolved: &ResolvedModel) -> RenderedComponent;
}

/// An explicit, instance-scoped collection of toolbox components.
#[derive(Default)]
pub struct ComponentRegistry {
    entries: AHashMap<String, Box<dyn ToolboxComponent>>,
}

impl ComponentRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the built-in components.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        crate::components::register_default_components(&mut registry);
        registry
    }

    /// Registers a component under its type. Registering the same type
    /// again replaces the previous entry.
    pub fn register(&mut self, component: Box<dyn ToolboxComponent>) {
        let key = component.component_type().to_string();
        if self.entries.insert(key.clone(), component).is_some() {
            debug!(component_type = %key, "replaced previously registered component");
        }
    }

    pub fn resolve(&self, component_type: &str) -> Option<&dyn ToolboxComponent> {
        self.entries.get(component_type).map(Box::as_ref)
    }

    pub fn contains(&self, component_type: &str) -> bool {
        self.entries.contains_key(component_type)
    }

    /// Lists every component able to edit a property of the given type,
    /// ordered by type name so the result is stable across runs.
    pub fn recommend(&self, data_type: &DataTypeRef) -> Vec<&dyn ToolboxComponent> {
        self.entries
            .values()
            .filter(|c| c.data_type_supported(data_type))
            .sorted_by_key(|c| c.component_type())
            .map(Box::as_ref)
            .collect()
    }

    pub fn component_types(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
