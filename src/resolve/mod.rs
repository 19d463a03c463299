//! The dynamic model evaluator.
//!
//! A persisted [`ComponentModel`] carries static flags plus scripted
//! overrides. Resolution folds both against the ambient [`FormContext`] into
//! a [`ResolvedModel`] the renderer can consume directly. Expression faults
//! never escape this module; they degrade to safe defaults and are logged.

mod cache;

pub use cache::ResolveCache;

use crate::expression::{evaluate_guard, evaluate_str, interpolate};
use crate::migration::{MigrationFailure, migrate_markup};
use crate::model::{ComponentModel, FormContext, FormMarkup, FormMode};
use crate::registry::{ComponentRegistry, RenderedComponent};
use serde_json::Value as JsonValue;
use tracing::warn;

/// A component model with every dynamic input folded in.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedModel {
    /// The model after placeholder interpolation.
    pub model: ComponentModel,
    pub hidden: bool,
    pub disabled: bool,
    pub read_only: bool,
    pub style: String,
}

/// Resolves component models against a form context, consulting the
/// registry for per-type behavior.
pub struct ModelResolver<'r> {
    registry: &'r ComponentRegistry,
}

impl<'r> ModelResolver<'r> {
    pub fn new(registry: &'r ComponentRegistry) -> Self {
        Self { registry }
    }

    /// Resolves one model. The ordering is load-bearing: interpolation
    /// first, then visibility, enablement, the readonly override and
    /// finally the style expression.
    pub fn resolve(&self, model: &ComponentModel, ctx: &FormContext) -> ResolvedModel {
        let scope = ctx.scope();

        let mut interpolated = model.clone();
        if let Some(label) = &model.label {
            interpolated.label = Some(interpolate(label, &scope));
        }
        for value in interpolated.properties.values_mut() {
            if let JsonValue::String(s) = value {
                *value = JsonValue::String(interpolate(s, &scope));
            }
        }

        // The designer canvas always shows the component, whatever the
        // static flag or the visibility script say.
        let hidden = if ctx.form_mode == FormMode::Designer {
            false
        } else {
            model.hidden || !evaluate_guard(model.custom_visibility.as_deref(), &scope, true)
        };

        let disabled =
            model.disabled || !evaluate_guard(model.custom_enabled.as_deref(), &scope, true);

        let retains_edit = self
            .registry
            .resolve(&model.component_type)
            .map(|c| c.retains_edit_on_readonly(model))
            .unwrap_or(false);
        let read_only = if ctx.form_mode == FormMode::Readonly && !retains_edit {
            true
        } else {
            model.read_only
        };

        let style = match &model.style {
            Some(source) if !source.trim().is_empty() => match evaluate_str(source, &scope) {
                Ok(value) => value.to_text(),
                Err(e) => {
                    warn!(component = %model.id, error = %e, "style expression faulted");
                    String::new()
                }
            },
            _ => String::new(),
        };

        ResolvedModel {
            model: interpolated,
            hidden,
            disabled,
            read_only,
            style,
        }
    }

    /// Cache-aware rendition of [`resolve`](Self::resolve). Recomputes only
    /// when the model or any ambient input changed by equality.
    pub fn resolve_cached(
        &self,
        cache: &mut ResolveCache,
        model: &ComponentModel,
        ctx: &FormContext,
    ) -> ResolvedModel {
        if let Some(cached) = cache.lookup(model, ctx) {
            return cached;
        }
        let resolved = self.resolve(model, ctx);
        cache.store(model, ctx, resolved.clone());
        resolved
    }
}

/// The host-facing result of rendering a whole markup.
#[derive(Debug, Clone, Default)]
pub struct RenderOutput {
    pub components: Vec<RenderedComponent>,
    pub migration_failures: Vec<MigrationFailure>,
}

/// Runs the full pipeline on a markup: migrate, resolve, render.
///
/// Components with an unregistered type and components resolved hidden are
/// skipped. Migration failures are reported alongside the rendered output.
pub fn render_form(
    registry: &ComponentRegistry,
    cache: &mut ResolveCache,
    markup: FormMarkup,
    ctx: &FormContext,
) -> RenderOutput {
    let report = migrate_markup(registry, markup);
    let resolver = ModelResolver::new(registry);

    let mut output = RenderOutput {
        migration_failures: report.failures,
        ..Default::default()
    };

    for model in report.markup.iter() {
        let Some(component) = registry.resolve(&model.component_type) else {
            continue;
        };
        let resolved = resolver.resolve_cached(cache, model, ctx);
        if resolved.hidden {
            continue;
        }
        output.components.push(component.render(&resolved));
    }

    output
}
