use crate::migration::common::{migrate_custom_functions, migrate_property_name, migrate_read_only};
use crate::migration::Migrator;
use crate::registry::{DataTypeRef, RenderedComponent, ToolboxComponent, data_types};
use crate::resolve::ResolvedModel;
use serde_json::json;

/// Boolean toggle.
pub struct Checkbox;

impl ToolboxComponent for Checkbox {
    fn component_type(&self) -> &'static str {
        "checkbox"
    }

    fn name(&self) -> &'static str {
        "Checkbox"
    }

    fn migrator(&self) -> Migrator {
        Migrator::builder()
            .add(0, |model| {
                Ok(migrate_property_name(migrate_custom_functions(model)))
            })
            .add(1, |model| Ok(migrate_read_only(model)))
            .build()
    }

    fn data_type_supported(&self, data_type: &DataTypeRef) -> bool {
        data_type.data_type == data_types::BOOLEAN
    }

    fn render(&self, resolved: &ResolvedModel) -> RenderedComponent {
        let model = &resolved.model;
        RenderedComponent {
            id: model.id.clone(),
            widget: "checkbox".to_string(),
            props: json!({
                "label": model.label,
                "propertyName": model.property_name,
                "disabled": resolved.disabled,
                "readOnly": resolved.read_only,
                "style": resolved.style,
            }),
        }
    }
}
