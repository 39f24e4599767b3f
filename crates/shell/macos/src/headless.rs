//! An in-memory native menu object system.
//!
//! The [`HeadlessBridge`] behaves like AppKit for every operation of the
//! [`Bridge`] trait, but keeps its objects in an arena that can be inspected.
//! It is available on every platform, which makes it useful to test menu
//! bars or to look at what would be built without touching the screen.
use crate::bridge::{Bridge, Handle, Selector};

use icy_menubar_core::menu::MenuBadge;

use parking_lot::{Mutex, ReentrantMutex};

use std::path::Path;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// The kind of an [`Object`] of a [`HeadlessBridge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectKind {
    /// The shared application object.
    Application,
    /// A menu.
    Menu,
    /// A menu item.
    Item,
    /// A separator item.
    Separator,
    /// An image.
    Image,
    /// An instance of a synthesized action target class.
    ActionTarget {
        /// The name of the class.
        class_name: String,
        /// The single method of the class.
        selector: Selector,
    },
}

/// A snapshot of an object of a [`HeadlessBridge`].
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    /// The kind of object.
    pub kind: ObjectKind,
    /// The title of a menu or item.
    pub title: String,
    /// The items of a menu.
    pub items: Vec<Handle>,
    /// The submenu of an item.
    pub submenu: Handle,
    /// The action of an item.
    pub action: Option<Selector>,
    /// The target of an item; null for the responder chain.
    pub target: Handle,
    /// The key equivalent of an item.
    pub key_equivalent: String,
    /// The key equivalent modifier mask of an item.
    pub modifier_mask: u64,
    /// Whether an item is enabled.
    pub enabled: bool,
    /// Whether an item shows a checkmark.
    pub checked: bool,
    /// The tag of an item.
    pub tag: isize,
    /// The image of an item.
    pub image: Handle,
    /// Whether an image is a template.
    pub template: bool,
    /// The subtitle of an item.
    pub subtitle: Option<String>,
    /// The help tag of an item.
    pub tooltip: Option<String>,
    /// The badge of an item.
    pub badge: Option<MenuBadge>,
    /// Whether a menu validates its own items.
    pub auto_enables_items: bool,
    /// The amount of owned references to the object.
    pub references: usize,
}

impl Object {
    fn new(kind: ObjectKind, title: &str) -> Self {
        Self {
            kind,
            title: title.to_owned(),
            items: Vec::new(),
            submenu: Handle::NULL,
            action: None,
            target: Handle::NULL,
            key_equivalent: String::new(),
            modifier_mask: 0,
            enabled: true,
            checked: false,
            tag: 0,
            image: Handle::NULL,
            template: false,
            subtitle: None,
            tooltip: None,
            badge: None,
            auto_enables_items: true,
            references: 1,
        }
    }

    fn is_item(&self) -> bool {
        matches!(self.kind, ObjectKind::Item | ObjectKind::Separator)
    }
}

#[derive(Debug, Default)]
struct State {
    objects: Vec<Object>,
    classes: Vec<String>,
    class_syntheses: usize,
    allocations: usize,
    main_menu: Handle,
    services_menu: Handle,
    windows_menu: Handle,
    help_menu: Handle,
}

impl State {
    fn get(&self, handle: Handle) -> Option<&Object> {
        handle
            .0
            .checked_sub(1)
            .and_then(|index| self.objects.get(index))
    }

    fn get_mut(&mut self, handle: Handle) -> Option<&mut Object> {
        handle
            .0
            .checked_sub(1)
            .and_then(|index| self.objects.get_mut(index))
    }

    fn allocate(&mut self, object: Object) -> Handle {
        self.objects.push(object);
        self.allocations += 1;

        Handle(self.objects.len())
    }

    fn item_mut(&mut self, handle: Handle) -> Option<&mut Object> {
        self.get_mut(handle).filter(|object| object.is_item())
    }

    fn menu(&self, handle: Handle) -> Option<&Object> {
        self.get(handle)
            .filter(|object| object.kind == ObjectKind::Menu)
    }

    fn retain(&mut self, handle: Handle) {
        if let Some(object) = self.get_mut(handle) {
            object.references += 1;
        }
    }

    fn release(&mut self, handle: Handle) {
        if let Some(object) = self.get_mut(handle) {
            object.references = object.references.saturating_sub(1);
        }
    }

    fn replace_menu(&mut self, slot: fn(&mut State) -> &mut Handle, menu: Handle) {
        if !menu.is_null() && self.menu(menu).is_none() {
            return;
        }

        self.retain(menu);

        let previous = std::mem::replace(slot(self), menu);
        self.release(previous);
    }
}

/// A [`Bridge`] keeping its objects in memory.
///
/// Handles are never reused, and objects are never freed: releasing an
/// object only decrements its reference count.
#[derive(Debug)]
pub struct HeadlessBridge {
    state: Mutex<State>,
    ui: ReentrantMutex<()>,
    application: Handle,
}

impl HeadlessBridge {
    /// Creates a new [`HeadlessBridge`] with an empty application.
    #[must_use]
    pub fn new() -> Self {
        let mut state = State::default();
        state.objects.push(Object::new(ObjectKind::Application, ""));

        Self {
            state: Mutex::new(state),
            ui: ReentrantMutex::new(()),
            application: Handle(1),
        }
    }

    /// Returns a snapshot of an object.
    pub fn object(&self, handle: Handle) -> Option<Object> {
        self.state.lock().get(handle).cloned()
    }

    /// Returns the items of a menu.
    pub fn items(&self, menu: Handle) -> Vec<Handle> {
        self.state
            .lock()
            .menu(menu)
            .map(|menu| menu.items.clone())
            .unwrap_or_default()
    }

    /// Returns the titles of the items of a menu.
    pub fn titles(&self, menu: Handle) -> Vec<String> {
        let state = self.state.lock();

        state
            .menu(menu)
            .map(|menu| {
                menu.items
                    .iter()
                    .filter_map(|item| state.get(*item))
                    .map(|item| item.title.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the amount of objects created so far, excluding the
    /// application.
    pub fn allocations(&self) -> usize {
        self.state.lock().allocations
    }

    /// Returns the amount of action target classes synthesized so far.
    pub fn class_syntheses(&self) -> usize {
        self.state.lock().class_syntheses
    }

    /// Returns the menu registered as services menu.
    pub fn services_menu(&self) -> Handle {
        self.state.lock().services_menu
    }

    /// Returns the menu registered as windows menu.
    pub fn windows_menu(&self) -> Handle {
        self.state.lock().windows_menu
    }

    /// Returns the menu registered as help menu.
    pub fn help_menu(&self) -> Handle {
        self.state.lock().help_menu
    }

    fn update(&self, handle: Handle, f: impl FnOnce(&mut Object)) {
        if let Some(item) = self.state.lock().item_mut(handle) {
            f(item);
        }
    }
}

impl Default for HeadlessBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl Bridge for HeadlessBridge {
    fn new_menu(&self, title: &str) -> Handle {
        self.state
            .lock()
            .allocate(Object::new(ObjectKind::Menu, title))
    }

    fn new_item(&self, title: &str) -> Handle {
        self.state
            .lock()
            .allocate(Object::new(ObjectKind::Item, title))
    }

    fn new_separator(&self) -> Handle {
        let mut separator = Object::new(ObjectKind::Separator, "");
        separator.enabled = false;

        self.state.lock().allocate(separator)
    }

    fn new_symbol_image(&self, name: &str) -> Handle {
        if name.trim().is_empty() {
            return Handle::NULL;
        }

        self.state
            .lock()
            .allocate(Object::new(ObjectKind::Image, name))
    }

    fn new_png_image(&self, bytes: &[u8]) -> Handle {
        if !bytes.starts_with(PNG_SIGNATURE) {
            return Handle::NULL;
        }

        self.state
            .lock()
            .allocate(Object::new(ObjectKind::Image, ""))
    }

    fn new_file_image(&self, path: &Path) -> Handle {
        if !path.is_file() {
            return Handle::NULL;
        }

        self.state
            .lock()
            .allocate(Object::new(ObjectKind::Image, &path.to_string_lossy()))
    }

    fn new_action_target(&self, class_name: &str, selector: Selector) -> Handle {
        if class_name.is_empty() {
            return Handle::NULL;
        }

        let mut state = self.state.lock();

        if !state.classes.iter().any(|class| class == class_name) {
            state.classes.push(class_name.to_owned());
            state.class_syntheses += 1;
        }

        state.allocate(Object::new(
            ObjectKind::ActionTarget {
                class_name: class_name.to_owned(),
                selector,
            },
            "",
        ))
    }

    fn add_item(&self, menu: Handle, item: Handle) {
        let mut state = self.state.lock();

        if state.get(item).is_none_or(|item| !item.is_item()) {
            return;
        }

        if let Some(menu) = state
            .get_mut(menu)
            .filter(|menu| menu.kind == ObjectKind::Menu)
        {
            menu.items.push(item);
            state.retain(item);
        }
    }

    fn item_count(&self, menu: Handle) -> usize {
        self.state
            .lock()
            .menu(menu)
            .map_or(0, |menu| menu.items.len())
    }

    fn item_at(&self, menu: Handle, index: usize) -> Handle {
        self.state
            .lock()
            .menu(menu)
            .and_then(|menu| menu.items.get(index).copied())
            .unwrap_or_default()
    }

    fn submenu(&self, item: Handle) -> Handle {
        self.state
            .lock()
            .get(item)
            .map(|item| item.submenu)
            .unwrap_or_default()
    }

    fn set_submenu(&self, item: Handle, menu: Handle) {
        let mut state = self.state.lock();

        if state.menu(menu).is_none() {
            return;
        }

        let Some(object) = state.item_mut(item) else {
            return;
        };

        let previous = std::mem::replace(&mut object.submenu, menu);

        state.retain(menu);
        state.release(previous);
    }

    fn set_auto_enables_items(&self, menu: Handle, auto_enables_items: bool) {
        if let Some(menu) = self
            .state
            .lock()
            .get_mut(menu)
            .filter(|menu| menu.kind == ObjectKind::Menu)
        {
            menu.auto_enables_items = auto_enables_items;
        }
    }

    fn set_title(&self, item: Handle, title: &str) {
        self.update(item, |item| item.title = title.to_owned());
    }

    fn set_action(&self, item: Handle, selector: Selector) {
        self.update(item, |item| item.action = Some(selector));
    }

    fn set_target(&self, item: Handle, target: Handle) {
        self.update(item, |item| item.target = target);
    }

    fn set_key_equivalent(&self, item: Handle, key: &str) {
        self.update(item, |item| item.key_equivalent = key.to_owned());
    }

    fn set_modifier_mask(&self, item: Handle, mask: u64) {
        self.update(item, |item| item.modifier_mask = mask);
    }

    fn set_enabled(&self, item: Handle, enabled: bool) {
        self.update(item, |item| item.enabled = enabled);
    }

    fn set_state(&self, item: Handle, checked: bool) {
        self.update(item, |item| item.checked = checked);
    }

    fn set_tag(&self, item: Handle, tag: isize) {
        self.update(item, |item| item.tag = tag);
    }

    fn set_image(&self, item: Handle, image: Handle) {
        let mut state = self.state.lock();

        if state
            .get(image)
            .is_none_or(|image| image.kind != ObjectKind::Image)
        {
            return;
        }

        if let Some(object) = state.item_mut(item) {
            object.image = image;
            state.retain(image);
        }
    }

    fn set_template(&self, image: Handle, template: bool) {
        if let Some(image) = self
            .state
            .lock()
            .get_mut(image)
            .filter(|image| image.kind == ObjectKind::Image)
        {
            image.template = template;
        }
    }

    fn set_subtitle(&self, item: Handle, subtitle: &str) {
        self.update(item, |item| item.subtitle = Some(subtitle.to_owned()));
    }

    fn set_tooltip(&self, item: Handle, tooltip: &str) {
        self.update(item, |item| item.tooltip = Some(tooltip.to_owned()));
    }

    fn set_badge(&self, item: Handle, badge: &MenuBadge) {
        self.update(item, |item| item.badge = Some(badge.clone()));
    }

    fn application(&self) -> Handle {
        self.application
    }

    fn main_menu(&self) -> Handle {
        self.state.lock().main_menu
    }

    fn set_main_menu(&self, menu: Handle) {
        self.state
            .lock()
            .replace_menu(|state| &mut state.main_menu, menu);
    }

    fn set_services_menu(&self, menu: Handle) {
        self.state
            .lock()
            .replace_menu(|state| &mut state.services_menu, menu);
    }

    fn set_windows_menu(&self, menu: Handle) {
        self.state
            .lock()
            .replace_menu(|state| &mut state.windows_menu, menu);
    }

    fn set_help_menu(&self, menu: Handle) {
        self.state
            .lock()
            .replace_menu(|state| &mut state.help_menu, menu);
    }

    fn release(&self, object: Handle) {
        self.state.lock().release(object);
    }

    fn run_on_ui_thread(&self, f: &mut (dyn FnMut() + Send)) {
        let _ui = self.ui.lock();

        f();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_handles_are_ignored() {
        let bridge = HeadlessBridge::new();

        bridge.set_title(Handle::NULL, "Ignored");
        bridge.add_item(Handle::NULL, Handle::NULL);

        assert_eq!(bridge.item_at(Handle::NULL, 0), Handle::NULL);
        assert_eq!(bridge.submenu(Handle::NULL), Handle::NULL);
        assert_eq!(bridge.item_count(Handle::NULL), 0);
        assert_eq!(bridge.allocations(), 0);
    }

    #[test]
    fn invalid_images_are_null() {
        let bridge = HeadlessBridge::new();

        assert_eq!(bridge.new_png_image(b"GIF89a"), Handle::NULL);
        assert_eq!(bridge.new_symbol_image(" "), Handle::NULL);
        assert_eq!(
            bridge.new_file_image(Path::new("/definitely/not/an/image.png")),
            Handle::NULL
        );

        let image = bridge.new_png_image(PNG_SIGNATURE);
        assert!(!image.is_null());
    }

    #[test]
    fn menus_retain_their_items() {
        let bridge = HeadlessBridge::new();
        let menu = bridge.new_menu("File");
        let item = bridge.new_item("Open");

        bridge.add_item(menu, item);
        bridge.release(item);

        assert_eq!(bridge.items(menu), [item]);
        assert_eq!(bridge.titles(menu), ["Open"]);
        assert_eq!(bridge.object(item).unwrap().references, 1);

        // Menus cannot be added as items
        bridge.add_item(menu, bridge.new_menu("Nested"));
        assert_eq!(bridge.item_count(menu), 1);
    }

    #[test]
    fn replacing_the_main_menu_releases_the_previous_one() {
        let bridge = HeadlessBridge::new();
        let first = bridge.new_menu("");
        let second = bridge.new_menu("");

        bridge.set_main_menu(first);
        assert_eq!(bridge.object(first).unwrap().references, 2);

        bridge.set_main_menu(second);
        assert_eq!(bridge.main_menu(), second);
        assert_eq!(bridge.object(first).unwrap().references, 1);
    }
}
