use crate::error::ValidationIssue;
use crate::migration::common::{
    migrate_custom_functions, migrate_property_name, migrate_visibility,
};
use crate::migration::Migrator;
use crate::model::ComponentModel;
use crate::registry::{DataTypeRef, RenderedComponent, ToolboxComponent, data_types};
use crate::resolve::ResolvedModel;
use serde_json::json;

/// Select input fed by inline values or a reference list.
pub struct Dropdown;

impl ToolboxComponent for Dropdown {
    fn component_type(&self) -> &'static str {
        "dropdown"
    }

    fn name(&self) -> &'static str {
        "Dropdown"
    }

    fn migrator(&self) -> Migrator {
        Migrator::builder()
            .add(0, |mut model| {
                if model.property("dataSourceType").is_none() {
                    model.set_property("dataSourceType", json!("values"));
                }
                Ok(model)
            })
            .add(1, |model| {
                Ok(migrate_property_name(migrate_custom_functions(model)))
            })
            .add(2, |model| Ok(migrate_visibility(model)))
            .build()
    }

    fn validate(&self, model: &ComponentModel) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if model.property_str("dataSourceType") == Some("values") {
            let has_items = model
                .property("values")
                .and_then(|v| v.as_array())
                .map(|a| !a.is_empty())
                .unwrap_or(false);
            if !has_items {
                issues.push(ValidationIssue::for_member(
                    "At least one value is required",
                    "values",
                ));
            }
        }
        issues
    }

    fn init_model(&self, mut model: ComponentModel) -> ComponentModel {
        if model.property("dataSourceType").is_none() {
            model.set_property("dataSourceType", json!("values"));
        }
        model
    }

    fn data_type_supported(&self, data_type: &DataTypeRef) -> bool {
        data_type.data_type == data_types::REFERENCE_LIST
            || data_type.data_type == data_types::STRING
    }

    fn render(&self, resolved: &ResolvedModel) -> RenderedComponent {
        let model = &resolved.model;
        RenderedComponent {
            id: model.id.clone(),
            widget: "select".to_string(),
            props: json!({
                "label": model.label,
                "propertyName": model.property_name,
                "dataSourceType": model.property_str("dataSourceType").unwrap_or("values"),
                "values": model.property("values"),
                "disabled": resolved.disabled,
                "readOnly": resolved.read_only,
                "style": resolved.style,
            }),
        }
    }
}
