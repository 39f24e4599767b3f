//! Stub implementations for non-macOS platforms.
//!
//! These provide the same API as the macOS implementations but return errors
//! or no-ops, allowing the crate to compile on all platforms.
use crate::reconcile::Outcome;
use crate::{MenuError, Settings};

use icy_menubar_core::MenuForest;

/// Stub macOS main menu for non-macOS platforms.
#[derive(Debug)]
pub struct MacMenu {
    _private: (),
}

impl MacMenu {
    /// Create a new menu (stub - always returns UnsupportedPlatform).
    pub fn new() -> Result<Self, MenuError> {
        Err(MenuError::UnsupportedPlatform)
    }

    /// Create a new menu (stub - always returns UnsupportedPlatform).
    pub fn with_settings(_settings: Settings) -> Result<Self, MenuError> {
        Err(MenuError::UnsupportedPlatform)
    }

    /// Reconcile the menu (stub - always skipped).
    pub fn reconcile(&self, _forest: &MenuForest) -> Outcome {
        Outcome::Skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menus_are_unsupported() {
        assert_eq!(MacMenu::new().unwrap_err(), MenuError::UnsupportedPlatform);
        assert!(MacMenu::with_settings(Settings::default()).is_err());
    }
}
