//! Keep a native menu bar in sync with a declarative menu forest.
use crate::MenuError;
use crate::bridge::{Bridge, Handle};
use crate::builder::Builder;
use crate::patch::patch;
use crate::registry::ActionRegistry;
use crate::settings::Settings;

use icy_menubar_core::{Fingerprint, MenuForest};

use parking_lot::Mutex;

use std::sync::Arc;

/// The result of a reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A new native menu bar was built and installed.
    Rebuilt,
    /// The installed native menu bar was updated in place.
    Patched,
    /// No native menu bar could be built; the previous one, if any, stays
    /// installed.
    Skipped,
}

#[derive(Debug)]
struct Installed {
    menubar: Handle,
    fingerprint: Fingerprint,
}

/// Reconciles menu forests with the native menu bar of a [`Bridge`].
///
/// The first forest builds and installs a native menu bar. Every following
/// forest either patches it in place, when it has the same [`Fingerprint`],
/// or replaces it with a new one.
#[derive(Debug)]
pub struct Reconciler<B> {
    bridge: B,
    registry: Arc<ActionRegistry>,
    settings: Settings,
    installed: Mutex<Option<Installed>>,
}

impl<B: Bridge> Reconciler<B> {
    /// Creates a new [`Reconciler`] with nothing installed yet.
    pub fn new(bridge: B, registry: Arc<ActionRegistry>, settings: Settings) -> Self {
        Self {
            bridge,
            registry,
            settings,
            installed: Mutex::new(None),
        }
    }

    /// Brings the native menu bar in line with the given forest.
    ///
    /// This can be called from any thread: the work always happens on the UI
    /// thread, and this call blocks until it is done.
    pub fn reconcile(&self, forest: &MenuForest) -> Outcome {
        let fingerprint = Fingerprint::of(forest);
        let mut outcome = Outcome::Skipped;

        self.bridge.run_on_ui_thread(&mut || {
            outcome = self.step(forest, &fingerprint);
        });

        outcome
    }

    fn step(&self, forest: &MenuForest, fingerprint: &Fingerprint) -> Outcome {
        let mut installed = self.installed.lock();

        if let Some(current) = installed.as_ref()
            && current.fingerprint == *fingerprint
        {
            log::debug!("Menu bar shape unchanged, patching in place");

            patch(&self.bridge, &self.registry, current.menubar, forest);

            return Outcome::Patched;
        }

        log::debug!(
            "Building menu bar ({} structural tokens)",
            fingerprint.len()
        );

        let menubar = Builder::new(&self.bridge, &self.registry, &self.settings).build(forest);

        if menubar.is_null() {
            log::warn!("{}", MenuError::BridgeCallFailed { call: "build" });
            return Outcome::Skipped;
        }

        self.bridge.set_main_menu(menubar);

        let previous = installed.replace(Installed {
            menubar,
            fingerprint: fingerprint.clone(),
        });

        if let Some(previous) = previous {
            self.bridge.release(previous.menubar);
        }

        Outcome::Rebuilt
    }

    /// Returns the fingerprint of the installed menu bar.
    pub fn fingerprint(&self) -> Option<Fingerprint> {
        self.installed
            .lock()
            .as_ref()
            .map(|installed| installed.fingerprint.clone())
    }

    /// Returns the installed native menu bar.
    pub fn installed_menu_bar(&self) -> Option<Handle> {
        self.installed
            .lock()
            .as_ref()
            .map(|installed| installed.menubar)
    }

    /// Returns the [`ActionRegistry`] callbacks are registered in.
    pub fn registry(&self) -> &Arc<ActionRegistry> {
        &self.registry
    }

    /// Returns the [`Bridge`] native objects are created with.
    pub fn bridge(&self) -> &B {
        &self.bridge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HeadlessBridge;

    use icy_menubar_core::menu::{MenuElement, StandardAction, TopMenu};

    fn reconciler() -> Reconciler<HeadlessBridge> {
        Reconciler::new(
            HeadlessBridge::new(),
            Arc::new(ActionRegistry::new()),
            Settings::default(),
        )
    }

    fn forest(open_enabled: bool, wrap: bool) -> MenuForest {
        MenuForest::new(vec![
            TopMenu::application(vec![MenuElement::standard(StandardAction::Quit)]),
            TopMenu::file(
                "File",
                vec![
                    MenuElement::action("Open", || {}).enabled(open_enabled),
                    MenuElement::submenu(
                        "Options",
                        vec![MenuElement::toggle("Word Wrap", wrap, |_| {})],
                    ),
                ],
            ),
        ])
    }

    #[test]
    fn first_forest_rebuilds() {
        let reconciler = reconciler();

        assert_eq!(reconciler.installed_menu_bar(), None);
        assert_eq!(reconciler.reconcile(&forest(true, false)), Outcome::Rebuilt);

        let menubar = reconciler.installed_menu_bar().unwrap();

        assert_eq!(reconciler.bridge().main_menu(), menubar);
        assert_eq!(
            reconciler.fingerprint(),
            Some(Fingerprint::of(&forest(true, false)))
        );
    }

    #[test]
    fn same_shape_is_patched_without_allocations() {
        let reconciler = reconciler();
        let bridge = reconciler.bridge();

        let _ = reconciler.reconcile(&forest(true, false));

        let menubar = reconciler.installed_menu_bar().unwrap();
        let allocations = bridge.allocations();

        assert_eq!(reconciler.reconcile(&forest(false, true)), Outcome::Patched);
        assert_eq!(bridge.allocations(), allocations);
        assert_eq!(reconciler.installed_menu_bar(), Some(menubar));

        let file = bridge.submenu(bridge.item_at(menubar, 1));
        let open = bridge.item_at(file, 0);
        let wrap = bridge.item_at(bridge.submenu(bridge.item_at(file, 1)), 0);

        assert!(!bridge.object(open).unwrap().enabled);
        assert!(bridge.object(wrap).unwrap().checked);
        assert_eq!(reconciler.registry().toggle_state(wrap), Some(true));
    }

    #[test]
    fn new_shape_replaces_the_menu_bar() {
        let reconciler = reconciler();
        let bridge = reconciler.bridge();

        let _ = reconciler.reconcile(&forest(true, false));
        let first = reconciler.installed_menu_bar().unwrap();

        let grown = forest(true, false).with(TopMenu::help("Help", vec![]));

        assert_eq!(reconciler.reconcile(&grown), Outcome::Rebuilt);

        let second = reconciler.installed_menu_bar().unwrap();

        assert_ne!(first, second);
        assert_eq!(bridge.main_menu(), second);
        assert_eq!(bridge.object(first).unwrap().references, 0);
        assert_eq!(bridge.item_count(second), 3);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let reconciler = reconciler();
        let bridge = reconciler.bridge();

        assert_eq!(reconciler.reconcile(&forest(true, false)), Outcome::Rebuilt);

        let menubar = reconciler.installed_menu_bar().unwrap();
        let items = bridge.items(bridge.submenu(bridge.item_at(menubar, 1)));

        assert_eq!(reconciler.reconcile(&forest(true, false)), Outcome::Patched);
        assert_eq!(bridge.item_count(menubar), 2);
        assert_eq!(
            bridge.items(bridge.submenu(bridge.item_at(menubar, 1))),
            items
        );
    }
}
