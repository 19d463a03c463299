use super::component::ComponentModel;
use serde::{Deserialize, Serialize};

/// A flat list of component models making up one form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormMarkup {
    pub components: Vec<ComponentModel>,
}

impl FormMarkup {
    pub fn new(components: Vec<ComponentModel>) -> Self {
        Self { components }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentModel> {
        self.components.iter()
    }
}

impl IntoIterator for FormMarkup {
    type Item = ComponentModel;
    type IntoIter = std::vec::IntoIter<ComponentModel>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.into_iter()
    }
}
