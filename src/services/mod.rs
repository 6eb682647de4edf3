//! Services module for application state
//!
//! This module contains the stateful components that sit between the
//! storage layer and the commands.

pub mod group_store;
pub mod theme;

pub use group_store::{load_groups, GroupStore};
pub use theme::ThemePreference;
