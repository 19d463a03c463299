//! # Keisei - Dynamic Form Configuration and Evaluation Engine
//!
//! **Keisei** is a model-driven form engine: persisted markup describes the
//! components of a UI, and the engine migrates old markup forward, resolves
//! scripted visibility/enablement against runtime data, and produces
//! headless widget descriptions a host renderer can draw.
//!
//! ## Core Workflow
//!
//! The engine is UI-framework agnostic. It operates on a canonical internal
//! model of form markup. The primary workflow is:
//!
//! 1.  **Load Your Markup**: Parse persisted form JSON into a [`model::FormMarkup`].
//! 2.  **Assemble a Registry**: Register the toolbox components the form may
//!     use in a [`registry::ComponentRegistry`] (the built-ins, your own, or both).
//! 3.  **Migrate**: Replay each component's migration chain so markup saved
//!     by any earlier version loads into the current settings shape.
//! 4.  **Resolve and Render**: Evaluate each model against a
//!     [`model::FormContext`] and hand the rendered widget descriptions to
//!     your UI layer.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use keisei::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     // 1. Load persisted markup.
//!     let raw = std::fs::read_to_string("path/to/form.json")?;
//!     let markup = FormMarkup::from_json(&raw)?;
//!
//!     // 2. Assemble the component palette.
//!     let registry = ComponentRegistry::with_defaults();
//!
//!     // 3. + 4. Migrate, resolve and render against runtime data.
//!     let ctx = FormContext::new(json!({ "customer": { "age": 42 } }))
//!         .with_mode(FormMode::Edit);
//!     let mut cache = ResolveCache::new();
//!     let output = render_form(&registry, &mut cache, markup, &ctx);
//!
//!     for failure in &output.migration_failures {
//!         eprintln!("component {} failed to migrate: {}", failure.component_id, failure.error);
//!     }
//!     for component in &output.components {
//!         println!("{} -> {}", component.id, component.widget);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod action;
pub mod components;
pub mod error;
pub mod expression;
pub mod migration;
pub mod model;
pub mod notifications;
pub mod prelude;
pub mod registry;
pub mod resolve;
pub mod tree;
pub mod wizard;
