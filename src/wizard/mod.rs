//! Wizard navigation.
//!
//! A wizard renders one step at a time and moves between the steps that are
//! currently visible for the caller. Transitions can be wrapped in
//! configured actions: a failing before-hook vetoes the transition, a
//! failing after-hook is logged and never rolls the wizard back.

use crate::action::{ActionConfiguration, ActionDispatcher};
use crate::error::WizardError;
use crate::expression::{evaluate_guard, evaluate_str};
use crate::model::{FormContext, FormMarkup, FormMode};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One step of a wizard, as persisted in markup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardStep {
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Stable sequence key, matched by the default-step value expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default)]
    pub sort_order: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_visibility: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,

    #[serde(default)]
    pub components: FormMarkup,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_next_action: Option<ActionConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_next_action: Option<ActionConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_back_action: Option<ActionConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_back_action: Option<ActionConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_cancel_action: Option<ActionConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_cancel_action: Option<ActionConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_done_action: Option<ActionConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_done_action: Option<ActionConfiguration>,
}

impl WizardStep {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }
}

/// The persisted wizard configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardModel {
    pub id: String,

    /// Owner name the wizard's own dispatchable actions are registered
    /// under by hosts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_name: Option<String>,

    #[serde(default)]
    pub steps: Vec<WizardStep>,

    /// Explicit id of the step to open on. Wins over the value expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_active_step: Option<String>,

    /// Expression whose result is matched against step keys and
    /// descriptions to pick the opening step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_active_value: Option<String>,
}

/// The wizard state machine over the visible step list.
pub struct Wizard {
    model: WizardModel,
    visible: Vec<WizardStep>,
    current: usize,
}

impl Wizard {
    /// Builds the wizard and positions it on its default step.
    pub fn new(model: WizardModel, ctx: &FormContext) -> Self {
        let visible = compute_visible(&model, ctx);
        let current = default_step_index(&model, &visible, ctx);
        Self {
            model,
            visible,
            current,
        }
    }

    pub fn visible_steps(&self) -> &[WizardStep] {
        &self.visible
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> Option<&WizardStep> {
        self.visible.get(self.current)
    }

    /// Recomputes the visible list against a changed context.
    ///
    /// The current step is preserved by id when it is still visible;
    /// otherwise the wizard falls back to its default-step resolution.
    pub fn refresh(&mut self, ctx: &FormContext) {
        let current_id = self.current_step().map(|s| s.id.clone());
        self.visible = compute_visible(&self.model, ctx);
        self.current = current_id
            .and_then(|id| self.visible.iter().position(|s| s.id == id))
            .unwrap_or_else(|| default_step_index(&self.model, &self.visible, ctx));
    }

    /// Advances to the next visible step.
    ///
    /// Returns `Ok(false)` when already on the last step. A failing
    /// before-hook vetoes the move; a failing after-hook does not.
    pub async fn next(
        &mut self,
        dispatcher: &ActionDispatcher,
        ctx: &FormContext,
    ) -> Result<bool, WizardError> {
        if self.visible.is_empty() || self.current + 1 >= self.visible.len() {
            return Ok(false);
        }

        let step = self.visible[self.current].clone();
        run_before(dispatcher, step.before_next_action.as_ref(), ctx).await?;
        self.current += 1;
        run_after(dispatcher, step.after_next_action.as_ref(), ctx, "next").await;
        Ok(true)
    }

    /// Moves back to the previous visible step. Symmetric to
    /// [`next`](Self::next), guarded at the first step.
    pub async fn back(
        &mut self,
        dispatcher: &ActionDispatcher,
        ctx: &FormContext,
    ) -> Result<bool, WizardError> {
        if self.current == 0 || self.visible.is_empty() {
            return Ok(false);
        }

        let step = self.visible[self.current].clone();
        run_before(dispatcher, step.before_back_action.as_ref(), ctx).await?;
        self.current -= 1;
        run_after(dispatcher, step.after_back_action.as_ref(), ctx, "back").await;
        Ok(true)
    }

    /// Runs the current step's cancel hooks. The position never changes.
    pub async fn cancel(
        &mut self,
        dispatcher: &ActionDispatcher,
        ctx: &FormContext,
    ) -> Result<(), WizardError> {
        let Some(step) = self.current_step().cloned() else {
            return Ok(());
        };
        run_before(dispatcher, step.before_cancel_action.as_ref(), ctx).await?;
        run_after(dispatcher, step.after_cancel_action.as_ref(), ctx, "cancel").await;
        Ok(())
    }

    /// Runs the current step's done hooks. The position never changes.
    pub async fn done(
        &mut self,
        dispatcher: &ActionDispatcher,
        ctx: &FormContext,
    ) -> Result<(), WizardError> {
        let Some(step) = self.current_step().cloned() else {
            return Ok(());
        };
        run_before(dispatcher, step.before_done_action.as_ref(), ctx).await?;
        run_after(dispatcher, step.after_done_action.as_ref(), ctx, "done").await;
        Ok(())
    }
}

async fn run_before(
    dispatcher: &ActionDispatcher,
    config: Option<&ActionConfiguration>,
    ctx: &FormContext,
) -> Result<(), WizardError> {
    match config {
        Some(config) if config.is_configured() => {
            dispatcher.execute(config, ctx).await?;
            Ok(())
        }
        _ => Ok(()),
    }
}

async fn run_after(
    dispatcher: &ActionDispatcher,
    config: Option<&ActionConfiguration>,
    ctx: &FormContext,
    transition: &str,
) {
    if let Some(config) = config {
        if config.is_configured() {
            if let Err(e) = dispatcher.execute(config, ctx).await {
                warn!(transition, error = %e, "after-transition action failed");
            }
        }
    }
}

/// Steps ordered by `sort_order` and filtered by permission grants and the
/// visibility expression. The designer canvas filters nothing.
fn compute_visible(model: &WizardModel, ctx: &FormContext) -> Vec<WizardStep> {
    let scope = ctx.scope();
    model
        .steps
        .iter()
        .sorted_by_key(|s| s.sort_order)
        .filter(|s| {
            ctx.form_mode == FormMode::Designer
                || (ctx.any_granted(&s.permissions)
                    && evaluate_guard(s.custom_visibility.as_deref(), &scope, true))
        })
        .cloned()
        .collect()
}

fn default_step_index(model: &WizardModel, visible: &[WizardStep], ctx: &FormContext) -> usize {
    if let Some(step_id) = &model.default_active_step {
        if let Some(index) = visible.iter().position(|s| &s.id == step_id) {
            return index;
        }
    }

    if let Some(source) = &model.default_active_value {
        match evaluate_str(source, &ctx.scope()) {
            Ok(value) => {
                let text = value.to_text();
                if let Some(index) = visible.iter().position(|s| {
                    s.key.as_deref() == Some(text.as_str())
                        || s.description.as_deref() == Some(text.as_str())
                }) {
                    return index;
                }
            }
            Err(e) => {
                warn!(error = %e, "default step expression faulted");
            }
        }
    }

    0
}
