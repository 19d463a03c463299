//! Notification type configuration items.
//!
//! Notification types are versioned configuration items with per-revision
//! payloads. The manager validates mutations, cuts versions and resolves
//! the delivery channels for an outgoing notification.

mod domain;
mod manager;
mod repository;
mod settings;

pub use domain::{
    AnonymousReceiver, ChannelIdentifier, CopyItemInput, CreateItemInput, MessageReceiver,
    ModuleRef, NotificationChannelConfig, NotificationPriority, NotificationTypeConfig,
    NotificationTypeRevision, Person, PersonReceiver, UserNotificationPreference,
};
pub use manager::NotificationManager;
pub use repository::{ByNameAndModule, InMemoryRepository, Repository, Specification};
pub use settings::{DefaultChannelTiers, NotificationSettingsSource, StaticNotificationSettings};
