use crate::error::ConfigItemError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to the module a configuration item belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRef {
    pub id: Uuid,
    pub name: String,
}

impl ModuleRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Portable reference to a channel by name and module, never a direct key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelIdentifier {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

impl ChannelIdentifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: None,
        }
    }

    pub fn in_module(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: Some(module.into()),
        }
    }
}

/// A configured delivery channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationChannelConfig {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

impl NotificationChannelConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            module: None,
        }
    }

    pub fn in_module(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            module: Some(module.into()),
        }
    }
}

/// The versioned payload of a notification type. Descriptive fields change
/// per revision; the notification-specific ones are copied forward when a
/// new version is cut.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationTypeRevision {
    pub id: Uuid,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub override_channels: Vec<ChannelIdentifier>,

    #[serde(default)]
    pub allow_attachments: bool,

    #[serde(default)]
    pub disable: bool,

    #[serde(default)]
    pub can_opt_out: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl NotificationTypeRevision {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            ..Default::default()
        }
    }

    /// Copies the notification-specific fields from another revision,
    /// leaving the descriptive ones alone.
    pub fn copy_notification_props_from(&mut self, other: &NotificationTypeRevision) {
        self.override_channels = other.override_channels.clone();
        self.allow_attachments = other.allow_attachments;
        self.disable = other.disable;
        self.can_opt_out = other.can_opt_out;
        self.category = other.category.clone();
    }
}

/// A notification type configuration item.
///
/// `origin_id` ties all versions of one logical item together; the first
/// version points at itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationTypeConfig {
    pub id: Uuid,
    pub origin_id: Uuid,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<ModuleRef>,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,

    #[serde(default)]
    pub order_index: i32,

    pub revision: NotificationTypeRevision,
}

/// A user's recorded channel preference for one notification type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNotificationPreference {
    pub id: Uuid,
    pub user_id: Uuid,
    pub notification_type_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_channel: Option<NotificationChannelConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: Uuid,
    pub name: String,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Anything a notification can be addressed to. Non-person receivers (raw
/// email addresses, phone numbers) have no recorded preferences.
pub trait MessageReceiver: Send + Sync {
    fn person(&self) -> Option<&Person>;
}

pub struct PersonReceiver(pub Person);

impl MessageReceiver for PersonReceiver {
    fn person(&self) -> Option<&Person> {
        Some(&self.0)
    }
}

/// Receiver known only by an external address.
pub struct AnonymousReceiver;

impl MessageReceiver for AnonymousReceiver {
    fn person(&self) -> Option<&Person> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationPriority {
    Low,
    Medium,
    High,
}

impl NotificationPriority {
    /// Maps a stored reference-list value onto the enum. Unrecognized raw
    /// values are a configuration error, caught at the boundary.
    pub fn from_ref_value(value: i64) -> Result<Self, ConfigItemError> {
        match value {
            1 => Ok(NotificationPriority::Low),
            2 => Ok(NotificationPriority::Medium),
            3 => Ok(NotificationPriority::High),
            other => Err(ConfigItemError::Configuration(format!(
                "Unknown priority value: {other}"
            ))),
        }
    }
}

/// Input for creating a new notification type.
#[derive(Debug, Clone, Default)]
pub struct CreateItemInput {
    pub module: Option<ModuleRef>,
    pub name: String,
    pub folder: Option<String>,
    pub order_index: i32,
    pub description: Option<String>,
    pub label: Option<String>,
}

/// Input for copying an existing notification type.
#[derive(Debug, Clone, Default)]
pub struct CopyItemInput {
    pub module: Option<ModuleRef>,
    pub name: String,
    pub description: Option<String>,
    pub label: Option<String>,
}
