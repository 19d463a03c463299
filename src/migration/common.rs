//! Transformers shared across component migration chains.
//!
//! Each helper moves one legacy settings shape forward and is composed into
//! per-component chains, so the same cleanup is never written twice.

use crate::model::ComponentModel;
use serde_json::Value as JsonValue;

/// Moves the legacy `name` extra property into `property_name`.
pub fn migrate_property_name(mut model: ComponentModel) -> ComponentModel {
    if model.property_name.is_none() {
        if let Some(JsonValue::String(name)) = model.take_property("name") {
            model.property_name = Some(name);
        }
    }
    model
}

/// Rewrites the legacy `customDisabled` script into `custom_enabled`.
///
/// The old field answered "is it disabled?", the new one answers "is it
/// enabled?", so the body is wrapped in a negation.
pub fn migrate_custom_functions(mut model: ComponentModel) -> ComponentModel {
    if model.custom_enabled.is_none() {
        if let Some(JsonValue::String(script)) = model.take_property("customDisabled") {
            let body = strip_return(&script);
            if !body.is_empty() {
                model.custom_enabled = Some(format!("!({body})"));
            }
        }
    }
    model
}

/// Collapses the legacy three-state `visibility` property into `hidden`.
pub fn migrate_visibility(mut model: ComponentModel) -> ComponentModel {
    if let Some(JsonValue::String(visibility)) = model.take_property("visibility") {
        if visibility == "No" || visibility == "Removed" {
            model.hidden = true;
        }
    }
    model
}

/// Folds the legacy `editMode` property into the `read_only` flag.
pub fn migrate_read_only(mut model: ComponentModel) -> ComponentModel {
    if let Some(JsonValue::String(edit_mode)) = model.take_property("editMode") {
        if edit_mode == "readOnly" {
            model.read_only = true;
        }
    }
    model
}

fn strip_return(script: &str) -> String {
    let mut body = script.trim();
    if let Some(stripped) = body.strip_prefix("return") {
        body = stripped.trim_start();
    }
    body.trim_end_matches(';').trim().to_string()
}
