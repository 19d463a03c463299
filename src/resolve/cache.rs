use super::ResolvedModel;
use crate::model::{ComponentModel, FormContext, FormMode};
use ahash::AHashMap;
use serde_json::Value as JsonValue;

struct CacheEntry {
    model: ComponentModel,
    data: JsonValue,
    global_state: JsonValue,
    selected_row: JsonValue,
    form_mode: FormMode,
    resolved: ResolvedModel,
}

/// Equality-keyed memoization of resolved models, one slot per component id.
///
/// A slot is reused only when the model and every ambient input compare
/// equal to the run that produced it; any difference recomputes and
/// overwrites the slot.
#[derive(Default)]
pub struct ResolveCache {
    entries: AHashMap<String, CacheEntry>,
}

impl ResolveCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached resolution when all inputs still match.
    pub fn lookup(&self, model: &ComponentModel, ctx: &FormContext) -> Option<ResolvedModel> {
        let entry = self.entries.get(&model.id)?;
        let fresh = entry.model == *model
            && entry.form_mode == ctx.form_mode
            && entry.data == ctx.data
            && entry.global_state == ctx.global_state
            && entry.selected_row == ctx.selected_row;
        fresh.then(|| entry.resolved.clone())
    }

    pub fn store(&mut self, model: &ComponentModel, ctx: &FormContext, resolved: ResolvedModel) {
        self.entries.insert(
            model.id.clone(),
            CacheEntry {
                model: model.clone(),
                data: ctx.data.clone(),
                global_state: ctx.global_state.clone(),
                selected_row: ctx.selected_row.clone(),
                form_mode: ctx.form_mode,
                resolved,
            },
        );
    }

    pub fn invalidate(&mut self, component_id: &str) {
        self.entries.remove(component_id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
