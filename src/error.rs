use crate::expression::Value;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while parsing or evaluating a scripted expression.
#[derive(Error, Debug, Clone)]
pub enum ExpressionError {
    #[error("Failed to parse expression at position {position}: {message}")]
    ParseError { position: usize, message: String },

    #[error(
        "Type mismatch during operation '{operation}': expected {expected}, but found value '{found}'"
    )]
    TypeMismatch {
        operation: String,
        expected: String,
        found: Value,
    },
}

/// Errors that can occur while replaying a component's migration chain.
#[derive(Error, Debug, Clone)]
pub enum MigrationError {
    #[error("Migration step {version} failed: {message}")]
    StepFailed { version: u32, message: String },
}

/// A single validation finding, optionally tied to the offending fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub message: String,
    pub members: Vec<String>,
}

impl ValidationIssue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            members: Vec::new(),
        }
    }

    pub fn for_member(message: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            members: vec![member.into()],
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Accumulates validation findings so an operation can report every problem
/// at once instead of stopping at the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResults {
    issues: Vec<ValidationIssue>,
}

impl ValidationResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn add_message(&mut self, message: impl Into<String>) {
        self.issues.push(ValidationIssue::new(message));
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Returns `Ok(())` when no findings were recorded, otherwise the
    /// accumulated set as a [`ConfigItemError::Validation`].
    pub fn into_result(self) -> Result<(), ConfigItemError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ConfigItemError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .issues
            .iter()
            .map(|i| i.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{joined}")
    }
}

/// Errors surfaced by a configuration item storage adapter.
#[derive(Error, Debug, Clone)]
pub enum RepositoryError {
    #[error("Conflicting item already stored: {0}")]
    Conflict(String),

    #[error("Storage failure: {0}")]
    Storage(String),
}

/// Errors that can occur while managing configuration items.
#[derive(Error, Debug, Clone)]
pub enum ConfigItemError {
    #[error("Validation failed: {0}")]
    Validation(ValidationResults),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Operation '{0}' is not implemented")]
    Unimplemented(&'static str),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors that can occur while dispatching a configurable action.
#[derive(Error, Debug, Clone)]
pub enum ActionError {
    #[error("No action '{name}' is registered for owner '{owner}'")]
    NotFound { owner: String, name: String },

    #[error("Action '{owner}:{name}' failed: {message}")]
    Failed {
        owner: String,
        name: String,
        message: String,
    },
}

/// Errors that can occur while driving wizard navigation.
#[derive(Error, Debug, Clone)]
pub enum WizardError {
    #[error(transparent)]
    Action(#[from] ActionError),
}

/// Errors that can occur when saving or loading a compiled form artifact.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Artifact error: {0}")]
    Generic(String),
}
