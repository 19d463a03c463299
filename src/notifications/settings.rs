use super::domain::{ChannelIdentifier, NotificationPriority};
use async_trait::async_trait;

/// Default channel identifiers per priority tier. A missing tier means no
/// defaults are configured for that priority.
#[derive(Debug, Clone, Default)]
pub struct DefaultChannelTiers {
    pub low: Option<Vec<ChannelIdentifier>>,
    pub medium: Option<Vec<ChannelIdentifier>>,
    pub high: Option<Vec<ChannelIdentifier>>,
}

impl DefaultChannelTiers {
    pub fn tier(&self, priority: NotificationPriority) -> Option<&[ChannelIdentifier]> {
        match priority {
            NotificationPriority::Low => self.low.as_deref(),
            NotificationPriority::Medium => self.medium.as_deref(),
            NotificationPriority::High => self.high.as_deref(),
        }
    }
}

/// Source of the tenant-wide notification settings.
#[async_trait]
pub trait NotificationSettingsSource: Send + Sync {
    async fn default_channels(&self) -> DefaultChannelTiers;
}

/// Fixed settings, handed over at construction.
#[derive(Debug, Clone, Default)]
pub struct StaticNotificationSettings {
    pub tiers: DefaultChannelTiers,
}

impl StaticNotificationSettings {
    pub fn new(tiers: DefaultChannelTiers) -> Self {
        Self { tiers }
    }
}

#[async_trait]
impl NotificationSettingsSource for StaticNotificationSettings {
    async fn default_channels(&self) -> DefaultChannelTiers {
        self.tiers.clone()
    }
}
