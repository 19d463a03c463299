use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// The persisted settings of a single form component.
///
/// The well-known fields every component shares are first-class; everything
/// a specific component type adds on top lives in the flattened `properties`
/// map and survives serialization untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentModel {
    pub id: String,

    #[serde(rename = "type")]
    pub component_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Highest migration version already applied. `None` marks a model that
    /// predates versioning and must replay the full chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    #[serde(default)]
    pub hidden: bool,

    #[serde(default)]
    pub disabled: bool,

    #[serde(default)]
    pub read_only: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_visibility: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_enabled: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    #[serde(flatten)]
    pub properties: Map<String, JsonValue>,
}

impl ComponentModel {
    pub fn new(id: impl Into<String>, component_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            component_type: component_type.into(),
            property_name: None,
            label: None,
            version: None,
            hidden: false,
            disabled: false,
            read_only: false,
            custom_visibility: None,
            custom_enabled: None,
            style: None,
            properties: Map::new(),
        }
    }

    pub fn property(&self, key: &str) -> Option<&JsonValue> {
        self.properties.get(key)
    }

    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(JsonValue::as_str)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: JsonValue) {
        self.properties.insert(key.into(), value);
    }

    /// Removes and returns an extra property, used by migrations that move a
    /// legacy field into a first-class one.
    pub fn take_property(&mut self, key: &str) -> Option<JsonValue> {
        self.properties.remove(key)
    }
}
