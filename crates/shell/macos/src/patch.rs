//! Update the mutable attributes of an installed menu bar in place.
//!
//! Patching relies on the installed menu bar having the same shape as the
//! new forest, which is guaranteed by equal fingerprints. Native items are
//! found by position: the n-th built element of a menu is its n-th item.
use crate::builder::{arrange, is_built};
use crate::bridge::{Bridge, Handle};
use crate::registry::ActionRegistry;

use icy_menubar_core::menu::{ActionCategory, Handler, MenuElement, MenuForest};

/// Pushes the enabled and checked flags of a forest into the native menu bar
/// built from a forest with the same fingerprint.
///
/// This never creates a native object.
pub(crate) fn patch(
    bridge: &dyn Bridge,
    registry: &ActionRegistry,
    menubar: Handle,
    forest: &MenuForest,
) {
    let (application, named) = arrange(forest);

    if let Some(application) = application {
        let menu = bridge.submenu(bridge.item_at(menubar, 0));

        patch_menu(
            bridge,
            registry,
            menu,
            application.elements(),
            application.category(),
        );
    }

    for (index, top) in named.into_iter().enumerate() {
        let menu = bridge.submenu(bridge.item_at(menubar, index + 1));

        patch_menu(bridge, registry, menu, top.elements(), top.category());
    }
}

fn patch_menu(
    bridge: &dyn Bridge,
    registry: &ActionRegistry,
    menu: Handle,
    elements: &[MenuElement],
    category: Option<ActionCategory>,
) {
    let built = elements
        .iter()
        .filter(|element| is_built(category, element));

    for (index, element) in built.enumerate() {
        let item = bridge.item_at(menu, index);

        if item.is_null() {
            log::warn!("Installed menu is missing item {index}, stopping patch");
            return;
        }

        if let Some(enabled) = element.is_enabled() {
            bridge.set_enabled(item, enabled);
        }

        match element {
            MenuElement::Toggle(toggle) => {
                bridge.set_state(item, toggle.checked);
                let _ = registry.set_toggle_state(item, toggle.checked);
            }
            MenuElement::Standard(standard) if standard.is_toggle() => {
                bridge.set_state(item, standard.checked);

                if let Some(Handler::Toggle(_)) = standard.handler {
                    let _ = registry.set_toggle_state(item, standard.checked);
                }
            }
            MenuElement::Submenu(submenu) => {
                patch_menu(
                    bridge,
                    registry,
                    bridge.submenu(item),
                    &submenu.children,
                    category,
                );
            }
            _ => {}
        }
    }
}
