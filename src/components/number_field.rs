use crate::error::ValidationIssue;
use crate::migration::common::migrate_property_name;
use crate::migration::Migrator;
use crate::model::ComponentModel;
use crate::registry::{DataTypeRef, RenderedComponent, ToolboxComponent, data_types};
use crate::resolve::ResolvedModel;
use serde_json::json;

/// Numeric input with optional range bounds.
pub struct NumberField;

impl ToolboxComponent for NumberField {
    fn component_type(&self) -> &'static str {
        "numberField"
    }

    fn name(&self) -> &'static str {
        "Number field"
    }

    fn migrator(&self) -> Migrator {
        Migrator::builder()
            .add(0, |model| Ok(migrate_property_name(model)))
            .build()
    }

    fn validate(&self, model: &ComponentModel) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if model.property_name.as_deref().unwrap_or("").is_empty() {
            issues.push(ValidationIssue::for_member(
                "Property name is required",
                "propertyName",
            ));
        }
        let min = model.property("min").and_then(|v| v.as_f64());
        let max = model.property("max").and_then(|v| v.as_f64());
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                issues.push(ValidationIssue::new("Min must not exceed max"));
            }
        }
        issues
    }

    fn data_type_supported(&self, data_type: &DataTypeRef) -> bool {
        data_type.data_type == data_types::NUMBER
    }

    fn render(&self, resolved: &ResolvedModel) -> RenderedComponent {
        let model = &resolved.model;
        RenderedComponent {
            id: model.id.clone(),
            widget: "number-input".to_string(),
            props: json!({
                "label": model.label,
                "propertyName": model.property_name,
                "min": model.property("min"),
                "max": model.property("max"),
                "disabled": resolved.disabled,
                "readOnly": resolved.read_only,
                "style": resolved.style,
            }),
        }
    }
}
