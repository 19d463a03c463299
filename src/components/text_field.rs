use crate::error::ValidationIssue;
use crate::migration::common::{migrate_custom_functions, migrate_property_name};
use crate::migration::Migrator;
use crate::model::ComponentModel;
use crate::registry::{DataTypeRef, RenderedComponent, ToolboxComponent, data_types, string_formats};
use crate::resolve::ResolvedModel;
use serde_json::json;

/// Single-line text input, including the password rendition.
pub struct TextField;

impl ToolboxComponent for TextField {
    fn component_type(&self) -> &'static str {
        "textField"
    }

    fn name(&self) -> &'static str {
        "Text field"
    }

    fn migrator(&self) -> Migrator {
        Migrator::builder()
            .add(0, |mut model| {
                if model.property("textType").is_none() {
                    model.set_property("textType", json!("text"));
                }
                Ok(model)
            })
            .add(1, |model| {
                Ok(migrate_property_name(migrate_custom_functions(model)))
            })
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
        issues
    }

    fn init_model(&self, mut model: ComponentModel) -> ComponentModel {
        if model.property("textType").is_none() {
            model.set_property("textType", json!("text"));
        }
        model
    }

    fn data_type_supported(&self, data_type: &DataTypeRef) -> bool {
        data_type.data_type == data_types::STRING
            && !matches!(
                data_type.data_format.as_deref(),
                Some(string_formats::MULTILINE)
            )
    }

    fn retains_edit_on_readonly(&self, model: &ComponentModel) -> bool {
        // Password inputs stay editable so a stored secret is never echoed
        // into a readonly view.
        model.property_str("textType") == Some("password")
    }

    fn render(&self, resolved: &ResolvedModel) -> RenderedComponent {
        let model = &resolved.model;
        RenderedComponent {
            id: model.id.clone(),
            widget: "text-input".to_string(),
            props: json!({
                "label": model.label,
                "propertyName": model.property_name,
                "textType": model.property_str("textType").unwrap_or("text"),
                "placeholder": model.property_str("placeholder"),
                "disabled": resolved.disabled,
                "readOnly": resolved.read_only,
                "style": resolved.style,
            }),
        }
    }
}
