use super::domain::{
    CopyItemInput, CreateItemInput, MessageReceiver, NotificationChannelConfig,
    NotificationPriority, NotificationTypeConfig, NotificationTypeRevision,
    UserNotificationPreference,
};
use super::repository::{ByNameAndModule, Repository, Specification};
use super::settings::NotificationSettingsSource;
use crate::error::{ConfigItemError, ValidationIssue, ValidationResults};
use tracing::warn;
use uuid::Uuid;

/// Manages notification type configuration items: creation, copying,
/// versioning and delivery channel resolution.
pub struct NotificationManager {
    types: Box<dyn Repository<NotificationTypeConfig>>,
    channels: Box<dyn Repository<NotificationChannelConfig>>,
    preferences: Box<dyn Repository<UserNotificationPreference>>,
    settings: Box<dyn NotificationSettingsSource>,
}

impl NotificationManager {
    pub fn new(
        types: Box<dyn Repository<NotificationTypeConfig>>,
        channels: Box<dyn Repository<NotificationChannelConfig>>,
        preferences: Box<dyn Repository<UserNotificationPreference>>,
        settings: Box<dyn NotificationSettingsSource>,
    ) -> Self {
        Self {
            types,
            channels,
            preferences,
            settings,
        }
    }

    /// Creates a new notification type.
    ///
    /// Validation is aggregated: every violated rule contributes its own
    /// finding before the operation is rejected. The uniqueness check reads
    /// before the insert writes, so two concurrent creates of the same name
    /// can both pass; an adapter-level constraint closes that window.
    pub async fn create_item(
        &self,
        input: CreateItemInput,
    ) -> Result<NotificationTypeConfig, ConfigItemError> {
        let mut validation = ValidationResults::new();

        if input.module.is_none() {
            validation.add(ValidationIssue::for_member("Module is mandatory", "module"));
        }
        if input.name.trim().is_empty() {
            validation.add(ValidationIssue::for_member("Name is mandatory", "name"));
        }
        if let Some(module) = &input.module {
            if !input.name.trim().is_empty() {
                let spec = ByNameAndModule::new(input.name.clone(), Some(module.name.clone()));
                if self.types.any(&|t| spec.is_satisfied_by(t)).await {
                    validation.add_message(format!(
                        "Notification type `{}` already exists in module `{}`",
                        input.name, module.name
                    ));
                }
            }
        }
        validation.into_result()?;

        let Some(module) = input.module else {
            return Err(ConfigItemError::Configuration(
                "Module is required".to_string(),
            ));
        };

        let id = Uuid::new_v4();
        let mut revision = NotificationTypeRevision::new();
        revision.description = input.description;
        revision.label = input.label;

        let config = NotificationTypeConfig {
            id,
            origin_id: id,
            module: Some(module),
            name: input.name,
            folder: input.folder,
            order_index: input.order_index,
            revision,
        };

        self.types.insert(config.clone()).await?;
        Ok(config)
    }

    /// Copies a notification type into a new item with its own origin.
    ///
    /// Descriptive fields come from the input, the notification-specific
    /// ones from the source's current revision. Template propagation is not
    /// implemented and fails loudly after the item insert, matching the
    /// incomplete original behavior rather than hiding it.
    pub async fn copy(
        &self,
        source_id: Uuid,
        input: CopyItemInput,
    ) -> Result<NotificationTypeConfig, ConfigItemError> {
        let source = self.types.first_or_default(&|t| t.id == source_id).await;

        let mut validation = ValidationResults::new();
        if source.is_none() {
            validation.add_message("Please select notification type to copy");
        }
        if input.module.is_none() {
            validation.add(ValidationIssue::for_member("Module is mandatory", "module"));
        }
        if input.name.trim().is_empty() {
            validation.add(ValidationIssue::for_member("Name is mandatory", "name"));
        }
        if let Some(module) = &input.module {
            if !input.name.trim().is_empty() {
                let spec = ByNameAndModule::new(input.name.clone(), Some(module.name.clone()));
                if self.types.any(&|t| spec.is_satisfied_by(t)).await {
                    validation.add_message(format!(
                        "Notification type `{}` already exists in module `{}`",
                        input.name, module.name
                    ));
                }
            }
        }
        validation.into_result()?;

        let (Some(source), Some(module)) = (source, input.module) else {
            return Err(ConfigItemError::Configuration(
                "Source and module are required".to_string(),
            ));
        };

        let id = Uuid::new_v4();
        let mut revision = NotificationTypeRevision::new();
        revision.description = input.description.or_else(|| source.revision.description.clone());
        revision.label = input.label.or_else(|| source.revision.label.clone());
        revision.copy_notification_props_from(&source.revision);

        let config = NotificationTypeConfig {
            id,
            origin_id: id,
            module: Some(module),
            name: input.name,
            folder: source.folder.clone(),
            order_index: source.order_index,
            revision,
        };

        self.types.insert(config).await?;
        Err(ConfigItemError::Unimplemented("copy_templates"))
    }

    /// Cuts a new version of an item, carrying every revision field
    /// forward. Shares the template-propagation gap with [`copy`](Self::copy).
    pub async fn create_new_version(
        &self,
        source_id: Uuid,
    ) -> Result<NotificationTypeConfig, ConfigItemError> {
        self.insert_new_version(source_id).await?;
        Err(ConfigItemError::Unimplemented("copy_templates"))
    }

    /// Cuts a new version without touching templates. The new item shares
    /// the source's origin.
    pub async fn create_new_version_without_details(
        &self,
        source_id: Uuid,
    ) -> Result<NotificationTypeConfig, ConfigItemError> {
        self.insert_new_version(source_id).await
    }

    async fn insert_new_version(
        &self,
        source_id: Uuid,
    ) -> Result<NotificationTypeConfig, ConfigItemError> {
        let source = self
            .types
            .first_or_default(&|t| t.id == source_id)
            .await
            .ok_or_else(|| {
                ConfigItemError::Configuration("Notification type not found".to_string())
            })?;

        let mut revision = NotificationTypeRevision::new();
        revision.description = source.revision.description.clone();
        revision.label = source.revision.label.clone();
        revision.copy_notification_props_from(&source.revision);

        let config = NotificationTypeConfig {
            id: Uuid::new_v4(),
            origin_id: source.origin_id,
            module: source.module.clone(),
            name: source.name.clone(),
            folder: source.folder.clone(),
            order_index: source.order_index,
            revision,
        };

        self.types.insert(config.clone()).await?;
        Ok(config)
    }

    pub async fn expose(&self, _source_id: Uuid) -> Result<(), ConfigItemError> {
        Err(ConfigItemError::Unimplemented("expose"))
    }

    pub async fn duplicate(&self, _source_id: Uuid) -> Result<(), ConfigItemError> {
        Err(ConfigItemError::Unimplemented("duplicate"))
    }

    /// Resolves the delivery channels for one notification.
    ///
    /// 1. A receiver with recorded per-type preferences short-circuits
    ///    everything else.
    /// 2. Otherwise the revision's override channels, resolved by
    ///    name+module; unresolved identifiers are skipped and logged.
    /// 3. Otherwise the settings tier for the priority; a missing tier
    ///    yields no channels. Order and duplicates of the configured
    ///    identifiers are preserved.
    pub async fn get_channels(
        &self,
        notification_type: &NotificationTypeConfig,
        receiver: &dyn MessageReceiver,
        priority: NotificationPriority,
    ) -> Vec<NotificationChannelConfig> {
        if let Some(person) = receiver.person() {
            let preferred: Vec<NotificationChannelConfig> = self
                .preferences
                .get_all()
                .await
                .into_iter()
                .filter(|p| {
                    p.user_id == person.id
                        && p.notification_type_id == notification_type.id
                })
                .filter_map(|p| p.default_channel)
                .collect();
            if !preferred.is_empty() {
                return preferred;
            }
        }

        let overrides = &notification_type.revision.override_channels;
        if !overrides.is_empty() {
            return self.resolve_channels(overrides).await;
        }

        let tiers = self.settings.default_channels().await;
        match tiers.tier(priority) {
            Some(identifiers) => self.resolve_channels(identifiers).await,
            None => Vec::new(),
        }
    }

    async fn resolve_channels(
        &self,
        identifiers: &[super::domain::ChannelIdentifier],
    ) -> Vec<NotificationChannelConfig> {
        let mut resolved = Vec::with_capacity(identifiers.len());
        for identifier in identifiers {
            let spec = ByNameAndModule::new(identifier.name.clone(), identifier.module.clone());
            match self
                .channels
                .first_or_default(&|c| spec.is_satisfied_by(c))
                .await
            {
                Some(channel) => resolved.push(channel),
                None => {
                    warn!(
                        channel = %identifier.name,
                        module = identifier.module.as_deref().unwrap_or("-"),
                        "configured channel could not be resolved"
                    );
                }
            }
        }
        resolved
    }
}
