//! Route native item activations back to owned callbacks.
use crate::bridge::{Bridge, Handle, Selector};

use icy_menubar_core::menu::{Callback, ToggleCallback};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{self, AtomicBool};
use std::sync::{Arc, OnceLock};

/// A concurrent map from native items to the callbacks they trigger.
///
/// Entries are only ever added. Native items are replaced wholesale on every
/// structural rebuild, so the callbacks of replaced items stay around until
/// the process exits.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    entries: RwLock<FxHashMap<Handle, Arc<Entry>>>,
    target: OnceLock<ActionTarget>,
}

#[derive(Debug)]
struct ActionTarget {
    handle: Handle,
    class_name: String,
}

#[derive(Debug)]
enum Entry {
    Activate(Callback),
    Toggle {
        checked: AtomicBool,
        on_toggle: ToggleCallback,
    },
}

impl ActionRegistry {
    /// Creates an empty [`ActionRegistry`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide [`ActionRegistry`].
    ///
    /// It is created on first use and never torn down. The native action
    /// target forwards every activation to it.
    pub fn global() -> Arc<Self> {
        static GLOBAL: OnceLock<Arc<ActionRegistry>> = OnceLock::new();

        Arc::clone(GLOBAL.get_or_init(|| Arc::new(ActionRegistry::new())))
    }

    /// Binds a callback to a native item.
    ///
    /// A previous binding of the same item is replaced.
    pub fn register(&self, item: Handle, callback: Callback) {
        self.insert(item, Entry::Activate(callback));
    }

    /// Binds a toggle callback to a native item, caching its check state.
    ///
    /// A previous binding of the same item is replaced.
    pub fn register_toggle(&self, item: Handle, checked: bool, on_toggle: ToggleCallback) {
        self.insert(
            item,
            Entry::Toggle {
                checked: AtomicBool::new(checked),
                on_toggle,
            },
        );
    }

    fn insert(&self, item: Handle, entry: Entry) {
        if item.is_null() {
            return;
        }

        log::trace!("Registering action for {item:?}");

        let _ = self.entries.write().insert(item, Arc::new(entry));
    }

    /// Invokes the callback bound to a native item.
    ///
    /// A toggle flips its cached state, pushes the new state to the native
    /// item and then calls its callback with it.
    ///
    /// Returns false if no callback is bound to the item.
    pub fn invoke(&self, item: Handle, bridge: &dyn Bridge) -> bool {
        // The lock is released before calling back, so callbacks may reconcile
        let Some(entry) = self.entries.read().get(&item).cloned() else {
            log::trace!("No action registered for {item:?}");
            return false;
        };

        let result = panic::catch_unwind(AssertUnwindSafe(|| match entry.as_ref() {
            Entry::Activate(callback) => callback.call(),
            Entry::Toggle { checked, on_toggle } => {
                let now = !checked.load(atomic::Ordering::Acquire);

                checked.store(now, atomic::Ordering::Release);
                bridge.set_state(item, now);
                on_toggle.call(now);
            }
        }));

        if result.is_err() {
            log::error!("Menu action for {item:?} panicked");
        }

        true
    }

    /// Updates the cached state of a toggle.
    ///
    /// Returns false if the item is not a registered toggle.
    pub fn set_toggle_state(&self, item: Handle, checked: bool) -> bool {
        match self.entries.read().get(&item).map(Arc::as_ref) {
            Some(Entry::Toggle { checked: state, .. }) => {
                state.store(checked, atomic::Ordering::Release);
                true
            }
            _ => false,
        }
    }

    /// Returns the cached state of a toggle.
    pub fn toggle_state(&self, item: Handle) -> Option<bool> {
        match self.entries.read().get(&item).map(Arc::as_ref) {
            Some(Entry::Toggle { checked, .. }) => Some(checked.load(atomic::Ordering::Acquire)),
            _ => None,
        }
    }

    /// Returns true if a callback is bound to the item.
    pub fn contains(&self, item: Handle) -> bool {
        self.entries.read().contains_key(&item)
    }

    /// Returns the amount of bound items.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if no item is bound.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns the action target, creating it on first use.
    ///
    /// Native items with a registered callback send their action to it.
    /// Returns a null handle if the target could not be created; the next
    /// call tries again.
    ///
    /// Only the first successful call creates a target, so the class name
    /// of later calls is ignored.
    pub fn ensure_trampoline(&self, bridge: &dyn Bridge, class_name: &str) -> Handle {
        if let Some(target) = self.target.get() {
            if target.class_name != class_name {
                log::debug!(
                    "Menu action target is already a {}, ignoring class {class_name}",
                    target.class_name
                );
            }

            return target.handle;
        }

        let target = bridge.new_action_target(class_name, Selector::TRAMPOLINE);

        if target.is_null() {
            log::warn!(
                "{}",
                crate::MenuError::BridgeCallFailed {
                    call: "new_action_target"
                }
            );
            return Handle::NULL;
        }

        let created = ActionTarget {
            handle: target,
            class_name: class_name.to_owned(),
        };

        match self.target.set(created) {
            Ok(()) => {
                log::debug!("Created menu action target {target:?}");
                target
            }
            Err(_) => {
                bridge.release(target);
                self.trampoline().unwrap_or_default()
            }
        }
    }

    /// Returns the action target, if it was already created.
    pub fn trampoline(&self) -> Option<Handle> {
        self.target.get().map(|target| target.handle)
    }
}
