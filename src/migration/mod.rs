//! Versioned settings migration.
//!
//! Every component type owns a chain of numbered migration steps. Replaying
//! the chain brings a persisted model forward from whatever version it was
//! saved at to the latest one, so old markup keeps loading after a component
//! evolves its settings shape.

pub mod common;

use crate::error::MigrationError;
use crate::model::{ComponentModel, FormMarkup};
use crate::registry::ComponentRegistry;
use tracing::{debug, warn};

type MigrationFn = Box<dyn Fn(ComponentModel) -> Result<ComponentModel, MigrationError> + Send + Sync>;

struct MigrationStep {
    version: u32,
    transform: MigrationFn,
}

/// An ordered chain of migration steps for one component type.
pub struct Migrator {
    steps: Vec<MigrationStep>,
}

impl Migrator {
    pub fn builder() -> MigratorBuilder {
        MigratorBuilder { steps: Vec::new() }
    }

    /// An empty chain. Models pass through unchanged.
    pub fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    /// The version a freshly migrated model ends up at, `None` when the
    /// chain is empty.
    pub fn latest_version(&self) -> Option<u32> {
        self.steps.last().map(|s| s.version)
    }

    /// Replays the outstanding steps on a model.
    ///
    /// A model persisted at version `v` has already seen every step up to
    /// and including `v`, so only steps above it run. An unversioned model
    /// replays the whole chain. On success the model carries the latest
    /// chain version; an already up-to-date model passes through unchanged.
    pub fn apply(&self, mut model: ComponentModel) -> Result<ComponentModel, MigrationError> {
        let next = match model.version {
            Some(v) => v + 1,
            None => 0,
        };

        for step in self.steps.iter().filter(|s| s.version >= next) {
            debug!(
                component = %model.id,
                version = step.version,
                "applying migration step"
            );
            model = (step.transform)(model).map_err(|e| match e {
                MigrationError::StepFailed { message, .. } => MigrationError::StepFailed {
                    version: step.version,
                    message,
                },
            })?;
            model.version = Some(step.version);
        }

        if let Some(latest) = self.latest_version() {
            if model.version.map(|v| v < latest).unwrap_or(true) {
                model.version = Some(latest);
            }
        }

        Ok(model)
    }
}

/// Fluent builder for a [`Migrator`] chain.
pub struct MigratorBuilder {
    steps: Vec<MigrationStep>,
}

impl MigratorBuilder {
    /// Registers the step for `version`. Versions must be added in strictly
    /// ascending order.
    pub fn add<F>(mut self, version: u32, transform: F) -> Self
    where
        F: Fn(ComponentModel) -> Result<ComponentModel, MigrationError> + Send + Sync + 'static,
    {
        if let Some(last) = self.steps.last() {
            assert!(
                version > last.version,
                "migration versions must be strictly ascending: {} after {}",
                version,
                last.version
            );
        }
        self.steps.push(MigrationStep {
            version,
            transform: Box::new(transform),
        });
        self
    }

    pub fn build(self) -> Migrator {
        Migrator { steps: self.steps }
    }
}

/// A component that could not be migrated, kept with the untouched model so
/// the caller can inspect or repair it.
#[derive(Debug, Clone)]
pub struct MigrationFailure {
    pub component_id: String,
    pub component_type: String,
    pub model: ComponentModel,
    pub error: MigrationError,
}

/// The outcome of migrating a whole markup.
#[derive(Debug, Clone, Default)]
pub struct MigrationReport {
    pub markup: FormMarkup,
    pub failures: Vec<MigrationFailure>,
}

impl MigrationReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Migrates every component of a markup through its type's chain.
///
/// Failures are isolated per component: a faulting model is pulled out of
/// the markup and reported, the rest keep going. Components whose type is
/// not registered pass through untouched.
pub fn migrate_markup(registry: &ComponentRegistry, markup: FormMarkup) -> MigrationReport {
    let mut report = MigrationReport::default();

    for model in markup {
        let Some(component) = registry.resolve(&model.component_type) else {
            report.markup.components.push(model);
            continue;
        };

        let component_id = model.id.clone();
        let component_type = model.component_type.clone();
        let snapshot = model.clone();

        match component.migrator().apply(model) {
            Ok(migrated) => report.markup.components.push(migrated),
            Err(error) => {
                warn!(
                    component = %component_id,
                    component_type = %component_type,
                    error = %error,
                    "component migration failed, excluding from markup"
                );
                report.failures.push(MigrationFailure {
                    component_id,
                    component_type,
                    model: snapshot,
                    error,
                });
            }
        }
    }

    report
}
