//! Build a native menu bar from a menu forest.
use crate::MenuError;
use crate::binding::{self, Target};
use crate::bridge::{Bridge, Handle, Selector};
use crate::registry::ActionRegistry;
use crate::settings::Settings;

use icy_menubar_core::menu::{
    ActionCategory, Callback, Handler, MenuElement, MenuForest, MenuIcon, MenuKind,
    MenuShortcut, StandardItem, ToggleCallback, TopMenu,
};

/// Splits the honored menus of a forest into the application menu and the
/// rest, in the order they are laid out in the native menu bar.
///
/// The application menu always comes first, followed by the named menus in
/// declaration order.
pub(crate) fn arrange(forest: &MenuForest) -> (Option<&TopMenu>, Vec<&TopMenu>) {
    let (application, named): (Vec<&TopMenu>, Vec<&TopMenu>) = forest
        .honored()
        .into_iter()
        .partition(|menu| matches!(menu, TopMenu::Application { .. }));

    (application.into_iter().next(), named)
}

/// Returns true if the element produces a native item inside a menu hosting
/// standard actions of the given category.
///
/// Standard actions are only built in menus of their own category.
pub(crate) fn is_built(category: Option<ActionCategory>, element: &MenuElement) -> bool {
    match element {
        MenuElement::Standard(item) => category == Some(item.action.category()),
        _ => true,
    }
}

/// Builds native menus and registers their callbacks.
pub(crate) struct Builder<'a> {
    bridge: &'a dyn Bridge,
    registry: &'a ActionRegistry,
    settings: &'a Settings,
}

impl<'a> Builder<'a> {
    pub(crate) fn new(
        bridge: &'a dyn Bridge,
        registry: &'a ActionRegistry,
        settings: &'a Settings,
    ) -> Self {
        Self {
            bridge,
            registry,
            settings,
        }
    }

    /// Builds the native menu bar of a forest.
    ///
    /// Returns an owned reference to the menu bar, or a null handle if it
    /// could not be created.
    pub(crate) fn build(&self, forest: &MenuForest) -> Handle {
        let menubar = self.bridge.new_menu("");

        if menubar.is_null() {
            log::warn!("{}", MenuError::BridgeCallFailed { call: "new_menu" });
            return Handle::NULL;
        }

        for duplicate in forest.duplicates() {
            log::warn!(
                "{}",
                MenuError::DuplicateTopMenu {
                    kind: duplicate.kind_name()
                }
            );
        }

        // The previous menu bar may have registered any of these
        self.bridge.set_services_menu(Handle::NULL);
        self.bridge.set_windows_menu(Handle::NULL);
        self.bridge.set_help_menu(Handle::NULL);

        let (application, named) = arrange(forest);

        match application {
            Some(application) => self.build_top(menubar, application),
            None => {
                log::debug!("No application menu declared, inserting an empty one");

                self.build_top(menubar, &TopMenu::application(Vec::new()));
            }
        }

        for menu in named {
            self.build_top(menubar, menu);
        }

        menubar
    }

    fn build_top(&self, menubar: Handle, menu: &TopMenu) {
        let title = self.title(menu.title());

        let item = self.bridge.new_item(&title);
        let submenu = self.new_menu(&title);

        if item.is_null() || submenu.is_null() {
            log::warn!(
                "{}",
                MenuError::BridgeCallFailed {
                    call: "new_top_menu"
                }
            );
            self.bridge.release(item);
            self.bridge.release(submenu);
            return;
        }

        for element in menu.elements() {
            self.build_element(submenu, element, menu.category());
        }

        if let TopMenu::Named { kind, .. } = menu {
            match kind {
                MenuKind::Window {
                    suppress_auto_window_list: false,
                } => self.bridge.set_windows_menu(submenu),
                MenuKind::Help => self.bridge.set_help_menu(submenu),
                _ => {}
            }
        }

        self.bridge.set_submenu(item, submenu);
        self.bridge.add_item(menubar, item);

        self.bridge.release(submenu);
        self.bridge.release(item);
    }

    fn build_element(&self, menu: Handle, element: &MenuElement, category: Option<ActionCategory>) {
        if !is_built(category, element) {
            if let MenuElement::Standard(item) = element {
                log::warn!(
                    "Standard action {} cannot be placed in this menu, skipping it",
                    item.action.name()
                );
            }

            return;
        }

        let item = match element {
            MenuElement::Separator => self.bridge.new_separator(),
            MenuElement::SectionHeader { title } => {
                let item = self.bridge.new_item(&self.title(title));
                self.bridge.set_enabled(item, false);
                item
            }
            MenuElement::Label(label) => {
                let item = self.bridge.new_item(&self.title(&label.title));
                self.bridge.set_enabled(item, label.enabled);
                self.apply_icon(item, label.icon.as_ref());
                item
            }
            MenuElement::Action(action) => {
                let item = self.bridge.new_item(&self.title(&action.title));
                self.bridge.set_enabled(item, action.enabled);
                self.apply_shortcut(item, action.shortcut.as_ref());
                self.apply_icon(item, action.icon.as_ref());

                if let Some(subtitle) = &action.subtitle {
                    self.bridge.set_subtitle(item, subtitle);
                }

                if let Some(tooltip) = &action.tooltip {
                    self.bridge.set_tooltip(item, tooltip);
                }

                if let Some(badge) = &action.badge {
                    self.bridge.set_badge(item, badge);
                }

                self.bind(item, &action.on_activate);
                item
            }
            MenuElement::Toggle(toggle) => {
                let item = self.bridge.new_item(&self.title(&toggle.title));
                self.bridge.set_enabled(item, toggle.enabled);
                self.bridge.set_state(item, toggle.checked);
                self.apply_shortcut(item, toggle.shortcut.as_ref());
                self.apply_icon(item, toggle.icon.as_ref());
                self.bind_toggle(item, toggle.checked, &toggle.on_toggle);
                item
            }
            MenuElement::Submenu(submenu) => {
                let title = self.title(&submenu.title);
                let item = self.bridge.new_item(&title);
                self.bridge.set_enabled(item, submenu.enabled);
                self.apply_icon(item, submenu.icon.as_ref());

                let children = self.new_menu(&title);

                for child in &submenu.children {
                    self.build_element(children, child, category);
                }

                self.bridge.set_submenu(item, children);
                self.bridge.release(children);
                item
            }
            MenuElement::Standard(standard) => self.build_standard(standard),
        };

        if item.is_null() {
            log::warn!("{}", MenuError::BridgeCallFailed { call: "new_item" });
            return;
        }

        self.bridge.add_item(menu, item);
        self.bridge.release(item);
    }

    fn build_standard(&self, standard: &StandardItem) -> Handle {
        let item = self.bridge.new_item(&self.title(&standard.title));

        self.bridge.set_enabled(item, standard.enabled);
        self.apply_icon(item, standard.icon.as_ref());

        if standard.is_toggle() {
            self.bridge.set_state(item, standard.checked);
        }

        let Some(binding) = binding::binding(standard.action) else {
            // The system fills the services menu on its own
            let services = self.new_menu(&standard.title);

            self.bridge.set_submenu(item, services);
            self.bridge.set_services_menu(services);
            self.bridge.release(services);
            return item;
        };

        if !binding.key.is_empty() {
            self.bridge.set_key_equivalent(item, binding.key);
            self.bridge.set_modifier_mask(item, binding.modifier_mask);
        }

        match &standard.handler {
            None => {
                self.bridge.set_action(item, binding.selector);

                if let Some(tag) = binding.tag {
                    self.bridge.set_tag(item, tag);
                }

                let target = match binding.target {
                    Target::Application => self.bridge.application(),
                    Target::ResponderChain => Handle::NULL,
                };

                self.bridge.set_target(item, target);
            }
            Some(Handler::Activate(callback)) => self.bind(item, callback),
            Some(Handler::Toggle(on_toggle)) => {
                self.bind_toggle(item, standard.checked, on_toggle);
            }
        }

        item
    }

    fn new_menu(&self, title: &str) -> Handle {
        let menu = self.bridge.new_menu(title);

        self.bridge
            .set_auto_enables_items(menu, self.settings.auto_enables_items);

        menu
    }

    fn bind(&self, item: Handle, callback: &Callback) {
        if self.wire_trampoline(item) {
            self.registry.register(item, callback.clone());
        }
    }

    fn bind_toggle(&self, item: Handle, checked: bool, on_toggle: &ToggleCallback) {
        if self.wire_trampoline(item) {
            self.registry
                .register_toggle(item, checked, on_toggle.clone());
        }
    }

    fn wire_trampoline(&self, item: Handle) -> bool {
        if item.is_null() {
            return false;
        }

        let target = self
            .registry
            .ensure_trampoline(self.bridge, &self.settings.target_class_name);

        if target.is_null() {
            return false;
        }

        self.bridge.set_action(item, Selector::TRAMPOLINE);
        self.bridge.set_target(item, target);

        true
    }

    fn apply_shortcut(&self, item: Handle, shortcut: Option<&MenuShortcut>) {
        let Some(shortcut) = shortcut else {
            return;
        };

        let Some(equivalent) = shortcut.key_equivalent() else {
            log::debug!("Unsupported menu shortcut {shortcut:?}");
            return;
        };

        self.bridge.set_key_equivalent(item, &equivalent.key);
        self.bridge
            .set_modifier_mask(item, equivalent.modifier_mask);
    }

    fn apply_icon(&self, item: Handle, icon: Option<&MenuIcon>) {
        let Some(icon) = icon else {
            return;
        };

        let image = match icon {
            MenuIcon::Symbol { name, .. } => self.bridge.new_symbol_image(name),
            MenuIcon::Png { bytes, .. } => self.bridge.new_png_image(bytes),
            MenuIcon::File { path, .. } => self.bridge.new_file_image(path),
        };

        if image.is_null() {
            log::warn!("{}", MenuError::BridgeCallFailed { call: "new_image" });
            return;
        }

        self.bridge.set_template(image, icon.is_template());
        self.bridge.set_image(item, image);
        self.bridge.release(image);
    }

    fn title(&self, title: &str) -> String {
        if self.settings.strip_mnemonics {
            strip_mnemonic(title)
        } else {
            title.to_owned()
        }
    }
}

/// Strips mnemonic markers ('&') from a label for display on macOS.
///
/// On Windows/Linux, '&' is used to mark keyboard mnemonics (e.g., "&File" shows as "File"
/// with 'F' underlined). macOS doesn't use this convention, so we strip the markers.
fn strip_mnemonic(label: &str) -> String {
    let mut result = String::with_capacity(label.len());
    let mut chars = label.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '&' {
            // '&&' becomes a single '&'
            if chars.peek() == Some(&'&') {
                result.push('&');
                let _ = chars.next();
            }
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HeadlessBridge;

    use icy_menubar_core::menu::{MenuBadge, StandardAction, modifier_mask};

    fn build(forest: &MenuForest) -> (HeadlessBridge, ActionRegistry, Handle) {
        let bridge = HeadlessBridge::new();
        let registry = ActionRegistry::new();
        let menubar = Builder::new(&bridge, &registry, &Settings::default()).build(forest);

        (bridge, registry, menubar)
    }

    fn top_menu(bridge: &HeadlessBridge, menubar: Handle, index: usize) -> Handle {
        bridge.submenu(bridge.item_at(menubar, index))
    }

    #[test]
    fn strips_mnemonics() {
        assert_eq!(strip_mnemonic("&File"), "File");
        assert_eq!(strip_mnemonic("Save && Quit"), "Save & Quit");
        assert_eq!(strip_mnemonic("Plain"), "Plain");
    }

    #[test]
    fn fallback_application_menu() {
        let (bridge, _, menubar) = build(&MenuForest::new(vec![TopMenu::file(
            "File",
            vec![],
        )]));

        assert_eq!(bridge.titles(menubar), ["", "File"]);
        assert_eq!(bridge.item_count(top_menu(&bridge, menubar, 0)), 0);
    }

    #[test]
    fn application_menu_comes_first() {
        let (bridge, _, menubar) = build(&MenuForest::new(vec![
            TopMenu::edit("Edit", vec![]),
            TopMenu::application(vec![MenuElement::standard(StandardAction::Quit)]),
        ]));

        assert_eq!(bridge.titles(menubar), ["", "Edit"]);
        assert_eq!(bridge.titles(top_menu(&bridge, menubar, 0)), ["Quit"]);
    }

    #[test]
    fn default_standard_actions_are_wired_natively() {
        let (bridge, registry, menubar) = build(&MenuForest::new(vec![
            TopMenu::application(vec![MenuElement::standard(StandardAction::Quit)]),
            TopMenu::edit("Edit", vec![MenuElement::standard(StandardAction::Find)]),
        ]));

        let quit = bridge.object(bridge.item_at(top_menu(&bridge, menubar, 0), 0)).unwrap();

        assert_eq!(quit.action.map(Selector::as_str), Some("terminate:"));
        assert_eq!(quit.target, bridge.application());
        assert_eq!(quit.key_equivalent, "q");
        assert_eq!(quit.modifier_mask, modifier_mask::COMMAND);

        let find = bridge.object(bridge.item_at(top_menu(&bridge, menubar, 1), 0)).unwrap();

        assert_eq!(find.action.map(Selector::as_str), Some("performFindPanelAction:"));
        assert_eq!(find.target, Handle::NULL);
        assert_eq!(find.tag, 1);

        assert!(registry.is_empty());
        assert_eq!(registry.trampoline(), None);
        assert_eq!(bridge.class_syntheses(), 0);
    }

    #[test]
    fn overridden_standard_actions_use_the_trampoline() {
        let (bridge, registry, menubar) = build(&MenuForest::new(vec![TopMenu::application(
            vec![MenuElement::standard(StandardAction::Quit).on_activate(|| {})],
        )]));

        let item = bridge.item_at(top_menu(&bridge, menubar, 0), 0);
        let quit = bridge.object(item).unwrap();

        assert_eq!(quit.action, Some(Selector::TRAMPOLINE));
        assert_eq!(Some(quit.target), registry.trampoline());
        assert_eq!(quit.key_equivalent, "q");
        assert!(registry.contains(item));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn system_menus_are_registered() {
        let (bridge, _, menubar) = build(&MenuForest::new(vec![
            TopMenu::application(vec![MenuElement::standard(StandardAction::Services)]),
            TopMenu::window("Window", vec![]),
            TopMenu::help("Help", vec![]),
        ]));

        let services_item = bridge.item_at(top_menu(&bridge, menubar, 0), 0);

        assert_eq!(bridge.services_menu(), bridge.submenu(services_item));
        assert_eq!(bridge.windows_menu(), top_menu(&bridge, menubar, 1));
        assert_eq!(bridge.help_menu(), top_menu(&bridge, menubar, 2));
    }

    #[test]
    fn rebuilds_clear_dropped_system_menus() {
        let bridge = HeadlessBridge::new();
        let registry = ActionRegistry::new();
        let settings = Settings::default();
        let builder = Builder::new(&bridge, &registry, &settings);

        let _ = builder.build(&MenuForest::new(vec![
            TopMenu::application(vec![MenuElement::standard(StandardAction::Services)]),
            TopMenu::window("Window", vec![]),
            TopMenu::help("Help", vec![]),
        ]));

        assert!(!bridge.help_menu().is_null());

        let _ = builder.build(&MenuForest::new(vec![
            TopMenu::window("Window", vec![]).suppress_auto_window_list(true),
        ]));

        assert_eq!(bridge.services_menu(), Handle::NULL);
        assert_eq!(bridge.windows_menu(), Handle::NULL);
        assert_eq!(bridge.help_menu(), Handle::NULL);
    }

    #[test]
    fn suppressed_window_list() {
        let (bridge, _, _) = build(&MenuForest::new(vec![
            TopMenu::window("Window", vec![]).suppress_auto_window_list(true),
        ]));

        assert_eq!(bridge.windows_menu(), Handle::NULL);
    }

    #[test]
    fn misplaced_standard_actions_are_skipped() {
        let (bridge, _, menubar) = build(&MenuForest::new(vec![
            TopMenu::file(
                "File",
                vec![
                    MenuElement::standard(StandardAction::Copy),
                    MenuElement::submenu(
                        "Export",
                        vec![
                            MenuElement::standard(StandardAction::Print),
                            MenuElement::standard(StandardAction::Quit),
                        ],
                    ),
                ],
            ),
            TopMenu::custom("Tools", vec![MenuElement::standard(StandardAction::Undo)]),
        ]));

        let file = top_menu(&bridge, menubar, 1);
        assert_eq!(bridge.titles(file), ["Export"]);
        assert_eq!(bridge.titles(bridge.submenu(bridge.item_at(file, 0))), ["Print…"]);
        assert_eq!(bridge.item_count(top_menu(&bridge, menubar, 2)), 0);
    }

    #[test]
    fn failed_icons_are_skipped() {
        let (bridge, registry, menubar) = build(&MenuForest::new(vec![TopMenu::file(
            "File",
            vec![
                MenuElement::action("Open", || {})
                    .icon(MenuIcon::png(&b"not a png"[..]))
                    .subtitle("Recent")
                    .tooltip("Open a file")
                    .badge(MenuBadge::Count(3)),
            ],
        )]));

        let item = bridge.item_at(top_menu(&bridge, menubar, 1), 0);
        let open = bridge.object(item).unwrap();

        assert_eq!(open.title, "Open");
        assert_eq!(open.image, Handle::NULL);
        assert_eq!(open.subtitle.as_deref(), Some("Recent"));
        assert_eq!(open.tooltip.as_deref(), Some("Open a file"));
        assert_eq!(open.badge, Some(MenuBadge::Count(3)));
        assert!(registry.contains(item));
    }

    #[test]
    fn items_are_owned_by_their_menus() {
        let (bridge, _, menubar) = build(&MenuForest::new(vec![TopMenu::file(
            "File",
            vec![MenuElement::action("Open", || {}), MenuElement::separator()],
        )]));

        let file = top_menu(&bridge, menubar, 1);

        for item in bridge.items(file) {
            assert_eq!(bridge.object(item).unwrap().references, 1);
        }

        assert_eq!(bridge.object(file).unwrap().references, 1);
        assert_eq!(bridge.object(menubar).unwrap().references, 1);
    }
}
