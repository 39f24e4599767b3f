//! Native macOS application menu bar.
//!
//! This module installs a [`MenuForest`] as the `NSApplication` main menu and
//! keeps it up to date as new forests come in.
use crate::appkit::AppKitBridge;
use crate::reconcile::{Outcome, Reconciler};
use crate::registry::ActionRegistry;
use crate::{MenuError, Settings};

use icy_menubar_core::MenuForest;

/// A native macOS application menu.
///
/// Activations of its items are routed through [`ActionRegistry::global`].
#[derive(Debug)]
pub struct MacMenu {
    reconciler: Reconciler<AppKitBridge>,
}

impl MacMenu {
    /// Creates a new [`MacMenu`] with default [`Settings`].
    pub fn new() -> Result<Self, MenuError> {
        Self::with_settings(Settings::default())
    }

    /// Creates a new [`MacMenu`] with the given [`Settings`].
    pub fn with_settings(settings: Settings) -> Result<Self, MenuError> {
        Ok(Self {
            reconciler: Reconciler::new(AppKitBridge::new(), ActionRegistry::global(), settings),
        })
    }

    /// Installs the forest as the application menu bar.
    ///
    /// The menu bar is only rebuilt when the shape of the forest changed.
    /// This can be called from any thread.
    pub fn reconcile(&self, forest: &MenuForest) -> Outcome {
        self.reconciler.reconcile(forest)
    }

    /// Returns the underlying [`Reconciler`].
    pub fn reconciler(&self) -> &Reconciler<AppKitBridge> {
        &self.reconciler
    }
}
