//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and functions so typical hosts
//! need a single `use`.
//!
//! # Example
//!
//! ```rust,no_run
//! use keisei::prelude::*;
//! use serde_json::json;
//!
//! # fn run_example() -> Result<()> {
//! let markup = FormMarkup::from_json(&std::fs::read_to_string("form.json")?)?;
//! let registry = ComponentRegistry::with_defaults();
//! let ctx = FormContext::new(json!({}));
//!
//! let mut cache = ResolveCache::new();
//! let output = render_form(&registry, &mut cache, markup, &ctx);
//! println!("{} components rendered", output.components.len());
//! # Ok(())
//! # }
//! ```

// Form model and context
pub use crate::model::{ComponentModel, CompiledForm, FormContext, FormMarkup, FormMode};

// Registry and resolution
pub use crate::registry::{ComponentRegistry, DataTypeRef, RenderedComponent, ToolboxComponent};
pub use crate::resolve::{ModelResolver, RenderOutput, ResolveCache, ResolvedModel, render_form};

// Migration
pub use crate::migration::{MigrationReport, Migrator, migrate_markup};

// Actions and wizard
pub use crate::action::{ActionConfiguration, ActionDispatcher};
pub use crate::wizard::{Wizard, WizardModel, WizardStep};

// Error types
pub use crate::error::{ConfigItemError, ExpressionError, MigrationError, WizardError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
