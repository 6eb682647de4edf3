use crate::AppState;

pub fn get_dark_mode(state: &AppState) -> bool {
    state.theme.is_dark()
}

/// Returns the new value
pub fn toggle_dark_mode(state: &mut AppState) -> bool {
    state.theme.toggle()
}
