//! Common test utilities for building form markup, contexts and managers.
use keisei::notifications::{
    DefaultChannelTiers, InMemoryRepository, ModuleRef, NotificationChannelConfig,
    NotificationManager, NotificationTypeConfig, NotificationTypeRevision,
    StaticNotificationSettings, UserNotificationPreference,
};
use keisei::prelude::*;
use serde_json::json;

/// Creates a text field model already settled at the latest migration
/// version.
#[allow(dead_code)]
pub fn text_field(id: &str, property_name: &str) -> ComponentModel {
    let mut model = ComponentModel::new(id, "textField");
    model.property_name = Some(property_name.to_string());
    model.version = Some(1);
    model.set_property("textType", json!("text"));
    model
}

/// Creates a text field model in its oldest persisted shape: unversioned,
/// with the legacy `name` and `customDisabled` extra properties.
#[allow(dead_code)]
pub fn legacy_text_field(id: &str, property_name: &str) -> ComponentModel {
    let mut model = ComponentModel::new(id, "textField");
    model.set_property("name", json!(property_name));
    model.set_property("customDisabled", json!("return data.archived;"));
    model
}

/// Markup JSON in the persisted wire shape, mixing versions.
#[allow(dead_code)]
pub fn sample_markup_json() -> &'static str {
    r#"[
        {
            "id": "first-name",
            "type": "textField",
            "name": "firstName",
            "label": "First name"
        },
        {
            "id": "age",
            "type": "numberField",
            "propertyName": "age",
            "version": 0,
            "min": 0,
            "max": 150
        },
        {
            "id": "newsletter",
            "type": "checkbox",
            "propertyName": "newsletter",
            "version": 1,
            "customVisibility": "data.age >= 18"
        }
    ]"#
}

/// A context over a small customer record.
#[allow(dead_code)]
pub fn customer_context(age: i64) -> FormContext {
    FormContext::new(json!({
        "age": age,
        "customer": { "name": "Ada", "archived": false }
    }))
}

/// Creates a three step wizard. The middle step requires a permission, the
/// last one carries a visibility script over `data.age`.
#[allow(dead_code)]
pub fn three_step_wizard() -> WizardModel {
    let mut intro = WizardStep::new("intro", "Introduction");
    intro.sort_order = 10;
    intro.key = Some("intro".to_string());

    let mut details = WizardStep::new("details", "Details");
    details.sort_order = 20;
    details.key = Some("details".to_string());
    details.permissions = vec!["forms:edit".to_string()];

    let mut review = WizardStep::new("review", "Review");
    review.sort_order = 30;
    review.key = Some("review".to_string());
    review.custom_visibility = Some("data.age >= 18".to_string());

    WizardModel {
        id: "wizard-1".to_string(),
        steps: vec![intro, details, review],
        ..Default::default()
    }
}

/// Assembles a notification manager over in-memory stores.
#[allow(dead_code)]
pub fn notification_manager(
    types: Vec<NotificationTypeConfig>,
    channels: Vec<NotificationChannelConfig>,
    preferences: Vec<UserNotificationPreference>,
    tiers: DefaultChannelTiers,
) -> NotificationManager {
    NotificationManager::new(
        Box::new(InMemoryRepository::with_items(types)),
        Box::new(InMemoryRepository::with_items(channels)),
        Box::new(InMemoryRepository::with_items(preferences)),
        Box::new(StaticNotificationSettings::new(tiers)),
    )
}

/// Creates a notification type in the given module.
#[allow(dead_code)]
pub fn notification_type(name: &str, module: &ModuleRef) -> NotificationTypeConfig {
    let id = uuid::Uuid::new_v4();
    NotificationTypeConfig {
        id,
        origin_id: id,
        module: Some(module.clone()),
        name: name.to_string(),
        folder: None,
        order_index: 0,
        revision: NotificationTypeRevision::new(),
    }
}
