//! The persisted form model: component settings, markup, render context and
//! the frozen distribution artifact.

mod artifact;
mod component;
mod context;
mod markup;

pub use artifact::CompiledForm;
pub use component::ComponentModel;
pub use context::{FormContext, FormMode};
pub use markup::FormMarkup;
