use crate::expression::Scope;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// The mode a form is currently rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    /// Designer canvas. Components stay visible and interactive so the
    /// author can always select what they are configuring.
    Designer,
    #[default]
    Edit,
    Readonly,
}

impl FormMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormMode::Designer => "designer",
            FormMode::Edit => "edit",
            FormMode::Readonly => "readonly",
        }
    }
}

/// Everything ambient a form evaluates against: the record being edited,
/// cross-form global state, the selected row of a parent table, the render
/// mode and the caller's permission grants.
#[derive(Debug, Clone, Default)]
pub struct FormContext {
    pub data: JsonValue,
    pub global_state: JsonValue,
    pub selected_row: JsonValue,
    pub form_mode: FormMode,
    pub granted_permissions: Vec<String>,
}

impl FormContext {
    pub fn new(data: JsonValue) -> Self {
        Self {
            data,
            ..Default::default()
        }
    }

    pub fn with_mode(mut self, mode: FormMode) -> Self {
        self.form_mode = mode;
        self
    }

    pub fn with_global_state(mut self, global_state: JsonValue) -> Self {
        self.global_state = global_state;
        self
    }

    pub fn with_permissions(mut self, permissions: Vec<String>) -> Self {
        self.granted_permissions = permissions;
        self
    }

    /// Builds the expression scope over this context.
    pub fn scope(&self) -> Scope<'_> {
        Scope::new(
            &self.data,
            &self.global_state,
            &self.selected_row,
            self.form_mode.as_str(),
        )
    }

    /// Checks a permission requirement. An empty requirement grants access;
    /// otherwise any single granted permission suffices.
    pub fn any_granted(&self, required: &[String]) -> bool {
        required.is_empty()
            || required
                .iter()
                .any(|p| self.granted_permissions.iter().any(|g| g == p))
    }
}
