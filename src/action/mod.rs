//! Configurable actions.
//!
//! Markup can attach named actions to lifecycle events (wizard transitions,
//! button clicks). Hosts register executable descriptors in an
//! [`ActionDispatcher`]; configurations reference them by owner and name.

use crate::error::ActionError;
use crate::model::FormContext;
use ahash::AHashMap;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A persisted reference to an action, as stored in markup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_owner: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<JsonValue>,
}

impl ActionConfiguration {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            action_owner: Some(owner.into()),
            action_name: Some(name.into()),
            arguments: None,
        }
    }

    pub fn with_arguments(mut self, arguments: JsonValue) -> Self {
        self.arguments = Some(arguments);
        self
    }

    /// A configuration missing its owner or name is treated as absent.
    pub fn is_configured(&self) -> bool {
        self.action_owner.as_deref().map(|s| !s.is_empty()).unwrap_or(false)
            && self.action_name.as_deref().map(|s| !s.is_empty()).unwrap_or(false)
    }
}

/// Executable body of an action.
#[async_trait]
pub trait ActionExecuter: Send + Sync {
    async fn execute(
        &self,
        arguments: Option<&JsonValue>,
        ctx: &FormContext,
    ) -> Result<JsonValue, ActionError>;
}

/// A registered action: identity plus its executer.
pub struct ActionDescriptor {
    pub owner: String,
    pub name: String,
    pub owner_uid: String,
    pub has_arguments: bool,
    pub executer: Box<dyn ActionExecuter>,
}

impl ActionDescriptor {
    fn key(&self) -> String {
        dispatch_key(&self.owner, &self.name)
    }
}

fn dispatch_key(owner: &str, name: &str) -> String {
    format!("{owner}:{name}")
}

/// Registry and entry point for action execution, keyed by `owner:name`.
#[derive(Default)]
pub struct ActionDispatcher {
    actions: AHashMap<String, ActionDescriptor>,
}

impl ActionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor. Re-registering the same `owner:name`
    /// replaces the previous entry.
    pub fn register(&mut self, descriptor: ActionDescriptor) {
        self.actions.insert(descriptor.key(), descriptor);
    }

    pub fn resolve(&self, owner: &str, name: &str) -> Option<&ActionDescriptor> {
        self.actions.get(&dispatch_key(owner, name))
    }

    /// Executes a configured action against the context.
    ///
    /// An unconfigured configuration and an unknown `owner:name` both
    /// surface as [`ActionError::NotFound`].
    pub async fn execute(
        &self,
        config: &ActionConfiguration,
        ctx: &FormContext,
    ) -> Result<JsonValue, ActionError> {
        let (owner, name) = match (&config.action_owner, &config.action_name) {
            (Some(owner), Some(name)) if config.is_configured() => (owner, name),
            _ => {
                return Err(ActionError::NotFound {
                    owner: config.action_owner.clone().unwrap_or_default(),
                    name: config.action_name.clone().unwrap_or_default(),
                });
            }
        };

        let descriptor = self.resolve(owner, name).ok_or_else(|| ActionError::NotFound {
            owner: owner.clone(),
            name: name.clone(),
        })?;

        descriptor
            .executer
            .execute(config.arguments.as_ref(), ctx)
            .await
    }
}

/// Adapts a plain closure into an [`ActionExecuter`].
pub struct FnExecuter<F>(pub F);

#[async_trait]
impl<F> ActionExecuter for FnExecuter<F>
where
    F: Fn(Option<&JsonValue>, &FormContext) -> Result<JsonValue, ActionError> + Send + Sync,
{
    async fn execute(
        &self,
        arguments: Option<&JsonValue>,
        ctx: &FormContext,
    ) -> Result<JsonValue, ActionError> {
        (self.0)(arguments, ctx)
    }
}
