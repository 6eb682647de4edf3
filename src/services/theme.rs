use std::rc::Rc;
use tracing::{info, warn};

use crate::storage::{KeyValueStore, DARK_MODE_KEY};

/// Dark/light mode flag, persisted on every change
pub struct ThemePreference {
    dark_mode: bool,
    store: Rc<dyn KeyValueStore>,
}

impl ThemePreference {
    /// Read the saved flag; anything missing or unreadable means light mode
    pub fn load(store: Rc<dyn KeyValueStore>) -> Self {
        let dark_mode = match store.get(DARK_MODE_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Option<bool>>(&raw)
                .unwrap_or_else(|e| {
                    warn!("Ignoring unparsable dark mode flag {:?}: {}", raw, e);
                    None
                })
                .unwrap_or(false),
            Ok(None) => false,
            Err(e) => {
                warn!("Failed to read dark mode flag: {}", e);
                false
            }
        };

        Self { dark_mode, store }
    }

    pub fn is_dark(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark(&mut self, dark_mode: bool) {
        self.dark_mode = dark_mode;
        info!("Dark mode: {}", dark_mode);

        let value = if dark_mode { "true" } else { "false" };
        if let Err(e) = self.store.set(DARK_MODE_KEY, value) {
            warn!("Failed to save dark mode flag: {}", e);
        }
    }

    /// Flip the flag; returns the new value
    pub fn toggle(&mut self) -> bool {
        self.set_dark(!self.dark_mode);
        self.dark_mode
    }
}
