//! Group card commands
//!
//! The form boundary: required-field checks and the delete confirmation live
//! here, never in `GroupStore`.

use tracing::info;

use crate::models::{CategoryCount, CategoryFilter, GroupForm, GroupRecord};
use crate::AppState;

pub const DELETE_CONFIRMATION: &str = "Remove this group card?";

/// Blocking yes/no prompt supplied by the presentation layer
pub trait ConfirmPrompt {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

fn validate(form: &GroupForm) -> Result<(), String> {
    if form.name.is_empty() {
        return Err("Group name is required".to_string());
    }
    Ok(())
}

/// Groups for display under `category` ("all" or a category name) and `search`
pub fn list_groups(category: &str, search: &str, state: &AppState) -> Vec<GroupRecord> {
    state.groups.view(&CategoryFilter::parse(category), search)
}

pub fn get_category_counts(state: &AppState) -> Vec<CategoryCount> {
    state.groups.category_counts()
}

pub fn create_group(form: GroupForm, state: &mut AppState) -> Result<GroupRecord, String> {
    validate(&form)?;
    Ok(state.groups.create(form))
}

/// Returns `Ok(None)` when no group has `id`
pub fn update_group(
    id: i64,
    form: GroupForm,
    state: &mut AppState,
) -> Result<Option<GroupRecord>, String> {
    validate(&form)?;
    Ok(state.groups.update(id, form))
}

/// Delete after the user confirms; returns whether a group was removed
pub fn delete_group(id: i64, prompt: &dyn ConfirmPrompt, state: &mut AppState) -> bool {
    if !prompt.confirm(DELETE_CONFIRMATION) {
        info!("Delete of group {} cancelled", id);
        return false;
    }
    state.groups.delete(id)
}

pub fn toggle_pin(id: i64, state: &mut AppState) -> Option<bool> {
    state.groups.toggle_pin(id)
}
