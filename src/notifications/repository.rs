use super::domain::{NotificationChannelConfig, NotificationTypeConfig};
use crate::error::RepositoryError;
use async_trait::async_trait;
use std::sync::RwLock;

/// Storage seam for configuration items. Adapters wrap whatever store the
/// host uses; the crate ships an in-memory reference implementation.
#[async_trait]
pub trait Repository<T: Clone + Send + Sync>: Send + Sync {
    async fn get_all(&self) -> Vec<T>;

    async fn first_or_default(
        &self,
        predicate: &(dyn for<'a> Fn(&'a T) -> bool + Send + Sync),
    ) -> Option<T>;

    /// Inserting MAY enforce adapter-level constraints and report them as
    /// [`RepositoryError::Conflict`].
    async fn insert(&self, entity: T) -> Result<(), RepositoryError>;

    async fn any(&self, predicate: &(dyn for<'a> Fn(&'a T) -> bool + Send + Sync)) -> bool;
}

/// A reusable query predicate.
pub trait Specification<T>: Send + Sync {
    fn is_satisfied_by(&self, candidate: &T) -> bool;
}

/// Matches an item by its name and the name of its module.
pub struct ByNameAndModule {
    pub name: String,
    pub module: Option<String>,
}

impl ByNameAndModule {
    pub fn new(name: impl Into<String>, module: Option<String>) -> Self {
        Self {
            name: name.into(),
            module,
        }
    }
}

impl Specification<NotificationTypeConfig> for ByNameAndModule {
    fn is_satisfied_by(&self, candidate: &NotificationTypeConfig) -> bool {
        candidate.name == self.name
            && candidate.module.as_ref().map(|m| m.name.as_str())
                == self.module.as_deref()
    }
}

impl Specification<NotificationChannelConfig> for ByNameAndModule {
    fn is_satisfied_by(&self, candidate: &NotificationChannelConfig) -> bool {
        candidate.name == self.name && candidate.module.as_deref() == self.module.as_deref()
    }
}

/// In-memory reference store backed by a `Vec`.
///
/// Does not enforce uniqueness; callers that need a unique constraint use
/// an adapter whose `insert` surfaces conflicts.
#[derive(Default)]
pub struct InMemoryRepository<T> {
    items: RwLock<Vec<T>>,
}

impl<T: Clone> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }
}

#[async_trait]
impl<T: Clone + Send + Sync> Repository<T> for InMemoryRepository<T> {
    async fn get_all(&self) -> Vec<T> {
        self.items.read().expect("repository lock poisoned").clone()
    }

    async fn first_or_default(
        &self,
        predicate: &(dyn for<'a> Fn(&'a T) -> bool + Send + Sync),
    ) -> Option<T> {
        self.items
            .read()
            .expect("repository lock poisoned")
            .iter()
            .find(|item| predicate(item))
            .cloned()
    }

    async fn insert(&self, entity: T) -> Result<(), RepositoryError> {
        self.items
            .write()
            .expect("repository lock poisoned")
            .push(entity);
        Ok(())
    }

    async fn any(&self, predicate: &(dyn for<'a> Fn(&'a T) -> bool + Send + Sync)) -> bool {
        self.items
            .read()
            .expect("repository lock poisoned")
            .iter()
            .any(|item| predicate(item))
    }
}
