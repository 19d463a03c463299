//! Built-in toolbox components.

mod checkbox;
mod dropdown;
mod number_field;
mod text_field;

pub use checkbox::Checkbox;
pub use dropdown::Dropdown;
pub use number_field::NumberField;
pub use text_field::TextField;

use crate::registry::ComponentRegistry;

/// Registers every built-in component.
pub fn register_default_components(registry: &mut ComponentRegistry) {
    registry.register(Box::new(TextField));
    registry.register(Box::new(NumberField));
    registry.register(Box::new(Checkbox));
    registry.register(Box::new(Dropdown));
}
