//! Declarative menu bar model.
//!
//! This module defines an immutable, platform-agnostic description of an
//! application's menu bar. A [`MenuForest`] is produced fresh by the
//! application on every logical update and handed to a platform backend,
//! which either rebuilds its native menus or patches them in place.
//!
//! ```ignore
//! use icy_menubar_core::menu::{MenuElement, MenuForest, StandardAction, TopMenu};
//!
//! let forest = MenuForest::new(vec![
//!     TopMenu::application(vec![MenuElement::standard(StandardAction::Quit)]),
//!     TopMenu::file("File", vec![MenuElement::action("New", || println!("new"))]),
//!     TopMenu::edit("Edit", vec![MenuElement::standard(StandardAction::Undo)]),
//! ]);
//! ```
mod standard;

pub use standard::{ActionCategory, StandardAction};

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;

use crate::keyboard::{self, Key, key::Named};

/// Native key equivalent modifier mask bits.
pub mod modifier_mask {
    /// No modifiers.
    pub const NONE: u64 = 0;
    /// The shift key (`NSEventModifierFlagShift`).
    pub const SHIFT: u64 = 1 << 17;
    /// The control key (`NSEventModifierFlagControl`).
    pub const CONTROL: u64 = 1 << 18;
    /// The option key (`NSEventModifierFlagOption`).
    pub const OPTION: u64 = 1 << 19;
    /// The command key (`NSEventModifierFlagCommand`).
    pub const COMMAND: u64 = 1 << 20;
}

/// A keyboard shortcut displayed in menus and bound by the native backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MenuShortcut {
    /// Modifier keys.
    pub modifiers: keyboard::Modifiers,
    /// Trigger key.
    pub key: Key,
}

impl MenuShortcut {
    /// Creates a new [`MenuShortcut`].
    #[must_use]
    pub fn new(modifiers: keyboard::Modifiers, key: impl Into<Key>) -> Self {
        Self {
            modifiers,
            key: key.into(),
        }
    }

    /// Creates a shortcut with Command + the given key.
    #[must_use]
    pub fn cmd(key: impl Into<Key>) -> Self {
        Self::new(keyboard::Modifiers::COMMAND, key)
    }

    /// Creates a shortcut with Command + Shift + the given key.
    #[must_use]
    pub fn cmd_shift(key: impl Into<Key>) -> Self {
        Self::new(
            keyboard::Modifiers::COMMAND.union(keyboard::Modifiers::SHIFT),
            key,
        )
    }

    /// Creates a shortcut with Command + Option + the given key.
    #[must_use]
    pub fn cmd_alt(key: impl Into<Key>) -> Self {
        Self::new(
            keyboard::Modifiers::COMMAND.union(keyboard::Modifiers::ALT),
            key,
        )
    }

    /// Creates a shortcut with Command + Control + the given key.
    #[must_use]
    pub fn cmd_ctrl(key: impl Into<Key>) -> Self {
        Self::new(
            keyboard::Modifiers::COMMAND.union(keyboard::Modifiers::CTRL),
            key,
        )
    }

    /// Creates a shortcut with Shift + the given key.
    #[must_use]
    pub fn shift(key: impl Into<Key>) -> Self {
        Self::new(keyboard::Modifiers::SHIFT, key)
    }

    /// Creates a shortcut with Option + the given key.
    #[must_use]
    pub fn alt(key: impl Into<Key>) -> Self {
        Self::new(keyboard::Modifiers::ALT, key)
    }

    /// Creates a shortcut with just the given key (no modifiers).
    #[must_use]
    pub fn key_only(key: impl Into<Key>) -> Self {
        Self::new(keyboard::Modifiers::empty(), key)
    }

    /// Converts the shortcut into a native [`KeyEquivalent`].
    ///
    /// Returns `None` if the key cannot be bound by a native menu.
    #[must_use]
    pub fn key_equivalent(&self) -> Option<KeyEquivalent> {
        let key = match self.key.as_ref() {
            Key::Character(c) if !c.is_empty() => c.to_lowercase(),
            Key::Named(named) => named_key_equivalent(named)?.to_owned(),
            Key::Character(_) | Key::Unidentified => return None,
        };

        let mut mask = modifier_mask::NONE;

        if self.modifiers.command() {
            mask |= modifier_mask::COMMAND;
        }
        if self.modifiers.shift() {
            mask |= modifier_mask::SHIFT;
        }
        if self.modifiers.alt() {
            mask |= modifier_mask::OPTION;
        }
        if self.modifiers.control() {
            mask |= modifier_mask::CONTROL;
        }

        Some(KeyEquivalent::new(key, mask))
    }
}

fn named_key_equivalent(named: Named) -> Option<&'static str> {
    Some(match named {
        Named::Space => " ",
        Named::Enter => "\r",
        Named::Tab => "\t",
        Named::Escape => "\u{1b}",
        Named::Backspace => "\u{08}",
        Named::Delete => "\u{7f}",
        Named::ArrowUp => "\u{f700}",
        Named::ArrowDown => "\u{f701}",
        Named::ArrowLeft => "\u{f702}",
        Named::ArrowRight => "\u{f703}",
        Named::Home => "\u{f729}",
        Named::End => "\u{f72b}",
        Named::PageUp => "\u{f72c}",
        Named::PageDown => "\u{f72d}",
        Named::F1 => "\u{f704}",
        Named::F2 => "\u{f705}",
        Named::F3 => "\u{f706}",
        Named::F4 => "\u{f707}",
        Named::F5 => "\u{f708}",
        Named::F6 => "\u{f709}",
        Named::F7 => "\u{f70a}",
        Named::F8 => "\u{f70b}",
        Named::F9 => "\u{f70c}",
        Named::F10 => "\u{f70d}",
        Named::F11 => "\u{f70e}",
        Named::F12 => "\u{f70f}",
    })
}

/// A native key binding: the key equivalent string and its modifier mask.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeyEquivalent {
    /// The key equivalent, as a native menu expects it.
    pub key: String,
    /// The modifier mask, made of [`modifier_mask`] bits.
    pub modifier_mask: u64,
}

impl KeyEquivalent {
    /// Creates a new [`KeyEquivalent`].
    #[must_use]
    pub fn new(key: impl Into<String>, modifier_mask: u64) -> Self {
        Self {
            key: key.into(),
            modifier_mask,
        }
    }
}

/// An action callback owned by a menu element.
///
/// Callbacks never take part in equality: two elements that only differ in
/// their callbacks compare equal.
#[derive(Clone)]
pub struct Callback(Arc<dyn Fn() + Send + Sync>);

impl Callback {
    /// Creates a new [`Callback`].
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Invokes the callback.
    pub fn call(&self) {
        (self.0)();
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

impl PartialEq for Callback {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

/// A callback receiving the new state of a toggle.
#[derive(Clone)]
pub struct ToggleCallback(Arc<dyn Fn(bool) + Send + Sync>);

impl ToggleCallback {
    /// Creates a new [`ToggleCallback`].
    pub fn new(f: impl Fn(bool) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Invokes the callback with the new toggle state.
    pub fn call(&self, checked: bool) {
        (self.0)(checked);
    }
}

impl fmt::Debug for ToggleCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ToggleCallback(..)")
    }
}

impl PartialEq for ToggleCallback {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

/// An application-supplied override for a [`StandardAction`].
#[derive(Debug, Clone, PartialEq)]
pub enum Handler {
    /// Invoked on every activation.
    Activate(Callback),
    /// Invoked with the flipped state on every activation.
    Toggle(ToggleCallback),
}

/// An icon shown next to a menu item title.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MenuIcon {
    /// A named system symbol (an SF Symbol on macOS).
    Symbol {
        /// The symbol name.
        name: String,
        /// Whether the image is a template tinted by the system.
        template: bool,
    },
    /// A PNG encoded image.
    Png {
        /// The encoded bytes.
        bytes: Bytes,
        /// Whether the image is a template tinted by the system.
        template: bool,
    },
    /// An image file on disk.
    File {
        /// The path of the image.
        path: PathBuf,
        /// Whether the image is a template tinted by the system.
        template: bool,
    },
}

impl MenuIcon {
    /// Creates a template icon from a system symbol name.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol {
            name: name.into(),
            template: true,
        }
    }

    /// Creates a template icon from PNG encoded bytes.
    pub fn png(bytes: impl Into<Bytes>) -> Self {
        Self::Png {
            bytes: bytes.into(),
            template: true,
        }
    }

    /// Creates a template icon from an image file.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File {
            path: path.into(),
            template: true,
        }
    }

    /// Sets whether the icon is a template image.
    #[must_use]
    pub fn template(mut self, is_template: bool) -> Self {
        match &mut self {
            Self::Symbol { template, .. }
            | Self::Png { template, .. }
            | Self::File { template, .. } => *template = is_template,
        }
        self
    }

    /// Returns whether the icon is a template image.
    #[must_use]
    pub fn is_template(&self) -> bool {
        match self {
            Self::Symbol { template, .. }
            | Self::Png { template, .. }
            | Self::File { template, .. } => *template,
        }
    }
}

/// A badge displayed at the trailing edge of a menu item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MenuBadge {
    /// A numeric badge.
    Count(usize),
    /// A textual badge.
    Text(String),
}

/// A clickable menu item.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionItem {
    /// Title.
    pub title: String,
    /// Optional keyboard shortcut.
    pub shortcut: Option<MenuShortcut>,
    /// Whether the item is enabled.
    pub enabled: bool,
    /// Optional icon.
    pub icon: Option<MenuIcon>,
    /// Optional secondary line of text.
    pub subtitle: Option<String>,
    /// Optional help tag.
    pub tooltip: Option<String>,
    /// Optional badge.
    pub badge: Option<MenuBadge>,
    /// Invoked when the item is activated.
    pub on_activate: Callback,
}

/// A menu item with a checkmark.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleItem {
    /// Title.
    pub title: String,
    /// Whether the item is checked.
    pub checked: bool,
    /// Optional keyboard shortcut.
    pub shortcut: Option<MenuShortcut>,
    /// Whether the item is enabled.
    pub enabled: bool,
    /// Optional icon.
    pub icon: Option<MenuIcon>,
    /// Invoked with the new state when the item is toggled.
    pub on_toggle: ToggleCallback,
}

/// A nested menu.
#[derive(Debug, Clone, PartialEq)]
pub struct Submenu {
    /// Title.
    pub title: String,
    /// Whether the submenu can be opened.
    pub enabled: bool,
    /// Optional icon.
    pub icon: Option<MenuIcon>,
    /// Child elements, in display order.
    pub children: Vec<MenuElement>,
}

/// A plain text item without an action.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Title.
    pub title: String,
    /// Whether the label is drawn as enabled.
    pub enabled: bool,
    /// Optional icon.
    pub icon: Option<MenuIcon>,
}

/// A menu item representing a native behavior of the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardItem {
    /// The native behavior.
    pub action: StandardAction,
    /// Title.
    pub title: String,
    /// Whether the item is enabled.
    pub enabled: bool,
    /// Initial check state; only shown by toggles.
    pub checked: bool,
    /// Optional icon.
    pub icon: Option<MenuIcon>,
    /// Replaces the native behavior when present.
    pub handler: Option<Handler>,
}

impl StandardItem {
    /// Returns true if the item shows a check state.
    ///
    /// This is the case for toggle-flavored actions and for any action
    /// overridden with a toggle handler.
    #[must_use]
    pub fn is_toggle(&self) -> bool {
        self.action.is_toggle() || matches!(self.handler, Some(Handler::Toggle(_)))
    }
}

/// An element of a menu.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuElement {
    /// A separator line.
    Separator,
    /// A disabled title used to group the following items.
    SectionHeader {
        /// Title.
        title: String,
    },
    /// A plain text item.
    Label(Label),
    /// A clickable item.
    Action(ActionItem),
    /// A checkable item.
    Toggle(ToggleItem),
    /// A nested menu.
    Submenu(Submenu),
    /// A native behavior with an optional override.
    Standard(StandardItem),
}

impl MenuElement {
    /// Creates a separator.
    #[must_use]
    pub fn separator() -> Self {
        Self::Separator
    }

    /// Creates a section header.
    pub fn section(title: impl Into<String>) -> Self {
        Self::SectionHeader {
            title: title.into(),
        }
    }

    /// Creates a disabled text label.
    pub fn label(title: impl Into<String>) -> Self {
        Self::Label(Label {
            title: title.into(),
            enabled: false,
            icon: None,
        })
    }

    /// Creates a clickable item.
    pub fn action(title: impl Into<String>, on_activate: impl Fn() + Send + Sync + 'static) -> Self {
        Self::Action(ActionItem {
            title: title.into(),
            shortcut: None,
            enabled: true,
            icon: None,
            subtitle: None,
            tooltip: None,
            badge: None,
            on_activate: Callback::new(on_activate),
        })
    }

    /// Creates a checkable item.
    pub fn toggle(
        title: impl Into<String>,
        checked: bool,
        on_toggle: impl Fn(bool) + Send + Sync + 'static,
    ) -> Self {
        Self::Toggle(ToggleItem {
            title: title.into(),
            checked,
            shortcut: None,
            enabled: true,
            icon: None,
            on_toggle: ToggleCallback::new(on_toggle),
        })
    }

    /// Creates a submenu.
    pub fn submenu(title: impl Into<String>, children: Vec<MenuElement>) -> Self {
        Self::Submenu(Submenu {
            title: title.into(),
            enabled: true,
            icon: None,
            children,
        })
    }

    /// Creates a standard item wired to its native behavior.
    #[must_use]
    pub fn standard(action: StandardAction) -> Self {
        Self::Standard(StandardItem {
            action,
            title: action.default_title().to_owned(),
            enabled: true,
            checked: false,
            icon: None,
            handler: None,
        })
    }

    /// Sets the title of this element.
    ///
    /// This has no effect on separators.
    #[must_use]
    pub fn title(mut self, new_title: impl Into<String>) -> Self {
        match &mut self {
            Self::Separator => {}
            Self::SectionHeader { title }
            | Self::Label(Label { title, .. })
            | Self::Action(ActionItem { title, .. })
            | Self::Toggle(ToggleItem { title, .. })
            | Self::Submenu(Submenu { title, .. })
            | Self::Standard(StandardItem { title, .. }) => *title = new_title.into(),
        }
        self
    }

    /// Sets a keyboard shortcut.
    ///
    /// This only has an effect on action and toggle items; standard items
    /// always use their native key equivalent.
    #[must_use]
    pub fn shortcut(mut self, shortcut: MenuShortcut) -> Self {
        match &mut self {
            Self::Action(item) => item.shortcut = Some(shortcut),
            Self::Toggle(item) => item.shortcut = Some(shortcut),
            _ => {}
        }
        self
    }

    /// Sets whether this element is enabled.
    ///
    /// This has no effect on separators and section headers.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        match &mut self {
            Self::Label(item) => item.enabled = enabled,
            Self::Action(item) => item.enabled = enabled,
            Self::Toggle(item) => item.enabled = enabled,
            Self::Submenu(item) => item.enabled = enabled,
            Self::Standard(item) => item.enabled = enabled,
            Self::Separator | Self::SectionHeader { .. } => {}
        }
        self
    }

    /// Sets the check state of a toggle or standard item.
    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        match &mut self {
            Self::Toggle(item) => item.checked = checked,
            Self::Standard(item) => item.checked = checked,
            _ => {}
        }
        self
    }

    /// Sets the icon of this element.
    #[must_use]
    pub fn icon(mut self, icon: MenuIcon) -> Self {
        match &mut self {
            Self::Label(item) => item.icon = Some(icon),
            Self::Action(item) => item.icon = Some(icon),
            Self::Toggle(item) => item.icon = Some(icon),
            Self::Submenu(item) => item.icon = Some(icon),
            Self::Standard(item) => item.icon = Some(icon),
            Self::Separator | Self::SectionHeader { .. } => {}
        }
        self
    }

    /// Sets the subtitle of an action item.
    #[must_use]
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        if let Self::Action(item) = &mut self {
            item.subtitle = Some(subtitle.into());
        }
        self
    }

    /// Sets the tooltip of an action item.
    #[must_use]
    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        if let Self::Action(item) = &mut self {
            item.tooltip = Some(tooltip.into());
        }
        self
    }

    /// Sets the badge of an action item.
    #[must_use]
    pub fn badge(mut self, badge: MenuBadge) -> Self {
        if let Self::Action(item) = &mut self {
            item.badge = Some(badge);
        }
        self
    }

    /// Overrides the native behavior of a standard item.
    #[must_use]
    pub fn on_activate(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        if let Self::Standard(item) = &mut self {
            item.handler = Some(Handler::Activate(Callback::new(f)));
        }
        self
    }

    /// Overrides the native behavior of a standard item with a toggle.
    #[must_use]
    pub fn on_toggle(mut self, f: impl Fn(bool) + Send + Sync + 'static) -> Self {
        if let Self::Standard(item) = &mut self {
            item.handler = Some(Handler::Toggle(ToggleCallback::new(f)));
        }
        self
    }

    /// Returns the title of this element; empty for separators.
    #[must_use]
    pub fn title_str(&self) -> &str {
        match self {
            Self::Separator => "",
            Self::SectionHeader { title }
            | Self::Label(Label { title, .. })
            | Self::Action(ActionItem { title, .. })
            | Self::Toggle(ToggleItem { title, .. })
            | Self::Submenu(Submenu { title, .. })
            | Self::Standard(StandardItem { title, .. }) => title,
        }
    }

    /// Returns the enabled flag, if this element has one.
    #[must_use]
    pub fn is_enabled(&self) -> Option<bool> {
        match self {
            Self::Label(item) => Some(item.enabled),
            Self::Action(item) => Some(item.enabled),
            Self::Toggle(item) => Some(item.enabled),
            Self::Submenu(item) => Some(item.enabled),
            Self::Standard(item) => Some(item.enabled),
            Self::Separator | Self::SectionHeader { .. } => None,
        }
    }

    /// Returns the children of a submenu.
    #[must_use]
    pub fn children(&self) -> Option<&[MenuElement]> {
        match self {
            Self::Submenu(submenu) => Some(&submenu.children),
            _ => None,
        }
    }
}

/// The kind of a named top-level menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuKind {
    /// The "File" menu.
    File,
    /// The "Edit" menu.
    Edit,
    /// The "Format" menu.
    Format,
    /// The "View" menu.
    View,
    /// The "Window" menu.
    Window {
        /// Keeps the system from appending the list of open windows.
        suppress_auto_window_list: bool,
    },
    /// The "Help" menu.
    Help,
    /// Any other menu. A forest may contain many of them.
    Custom,
}

impl MenuKind {
    /// Returns the name of the kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Edit => "Edit",
            Self::Format => "Format",
            Self::View => "View",
            Self::Window { .. } => "Window",
            Self::Help => "Help",
            Self::Custom => "Custom",
        }
    }

    /// Returns the category of standard actions this kind of menu hosts.
    #[must_use]
    pub fn category(self) -> Option<ActionCategory> {
        match self {
            Self::File => Some(ActionCategory::File),
            Self::Edit => Some(ActionCategory::Edit),
            Self::Format => Some(ActionCategory::Format),
            Self::View => Some(ActionCategory::View),
            Self::Window { .. } => Some(ActionCategory::Window),
            Self::Help => Some(ActionCategory::Help),
            Self::Custom => None,
        }
    }
}

/// A top-level menu.
#[derive(Debug, Clone, PartialEq)]
pub enum TopMenu {
    /// The application menu, shown leftmost under the application name.
    Application {
        /// Elements of the menu.
        elements: Vec<MenuElement>,
    },
    /// Any other top-level menu.
    Named {
        /// The kind of menu.
        kind: MenuKind,
        /// Title.
        title: String,
        /// Elements of the menu.
        elements: Vec<MenuElement>,
    },
}

impl TopMenu {
    /// Creates the application menu.
    #[must_use]
    pub fn application(elements: Vec<MenuElement>) -> Self {
        Self::Application { elements }
    }

    /// Creates a named menu of the given kind.
    pub fn named(kind: MenuKind, title: impl Into<String>, elements: Vec<MenuElement>) -> Self {
        Self::Named {
            kind,
            title: title.into(),
            elements,
        }
    }

    /// Creates the "File" menu.
    pub fn file(title: impl Into<String>, elements: Vec<MenuElement>) -> Self {
        Self::named(MenuKind::File, title, elements)
    }

    /// Creates the "Edit" menu.
    pub fn edit(title: impl Into<String>, elements: Vec<MenuElement>) -> Self {
        Self::named(MenuKind::Edit, title, elements)
    }

    /// Creates the "Format" menu.
    pub fn format(title: impl Into<String>, elements: Vec<MenuElement>) -> Self {
        Self::named(MenuKind::Format, title, elements)
    }

    /// Creates the "View" menu.
    pub fn view(title: impl Into<String>, elements: Vec<MenuElement>) -> Self {
        Self::named(MenuKind::View, title, elements)
    }

    /// Creates the "Window" menu.
    pub fn window(title: impl Into<String>, elements: Vec<MenuElement>) -> Self {
        Self::named(
            MenuKind::Window {
                suppress_auto_window_list: false,
            },
            title,
            elements,
        )
    }

    /// Creates the "Help" menu.
    pub fn help(title: impl Into<String>, elements: Vec<MenuElement>) -> Self {
        Self::named(MenuKind::Help, title, elements)
    }

    /// Creates a custom menu.
    pub fn custom(title: impl Into<String>, elements: Vec<MenuElement>) -> Self {
        Self::named(MenuKind::Custom, title, elements)
    }

    /// Keeps the system from appending open windows to a "Window" menu.
    ///
    /// This has no effect on other menus.
    #[must_use]
    pub fn suppress_auto_window_list(mut self, suppress: bool) -> Self {
        if let Self::Named {
            kind: MenuKind::Window {
                suppress_auto_window_list,
            },
            ..
        } = &mut self
        {
            *suppress_auto_window_list = suppress;
        }
        self
    }

    /// Returns the name of the kind of this menu.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Application { .. } => "Application",
            Self::Named { kind, .. } => kind.name(),
        }
    }

    /// Returns the title of this menu; empty for the application menu.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Application { .. } => "",
            Self::Named { title, .. } => title,
        }
    }

    /// Returns the elements of this menu.
    #[must_use]
    pub fn elements(&self) -> &[MenuElement] {
        match self {
            Self::Application { elements } | Self::Named { elements, .. } => elements,
        }
    }

    /// Returns the category of standard actions this menu hosts.
    #[must_use]
    pub fn category(&self) -> Option<ActionCategory> {
        match self {
            Self::Application { .. } => Some(ActionCategory::System),
            Self::Named { kind, .. } => kind.category(),
        }
    }

    /// Returns true if at most one menu like this one may exist in a forest.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        !matches!(
            self,
            Self::Named {
                kind: MenuKind::Custom,
                ..
            }
        )
    }
}

/// The full, ordered collection of top-level menus of a menu bar.
///
/// This is the unit of reconciliation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MenuForest {
    /// Top-level menus, in the order they were declared.
    pub menus: Vec<TopMenu>,
}

impl MenuForest {
    /// Creates a new [`MenuForest`].
    #[must_use]
    pub fn new(menus: Vec<TopMenu>) -> Self {
        Self { menus }
    }

    /// Appends a top-level menu.
    #[must_use]
    pub fn with(mut self, menu: TopMenu) -> Self {
        self.menus.push(menu);
        self
    }

    /// Returns the application menu, if any.
    #[must_use]
    pub fn application(&self) -> Option<&TopMenu> {
        self.honored()
            .into_iter()
            .find(|menu| matches!(menu, TopMenu::Application { .. }))
    }

    /// Returns the top-level menus that are honored, in declaration order.
    ///
    /// Only the first application menu and the first menu of each non-custom
    /// kind are honored; later duplicates are ignored.
    #[must_use]
    pub fn honored(&self) -> Vec<&TopMenu> {
        self.partition().0
    }

    /// Returns the top-level menus that are ignored as duplicates.
    #[must_use]
    pub fn duplicates(&self) -> Vec<&TopMenu> {
        self.partition().1
    }

    fn partition(&self) -> (Vec<&TopMenu>, Vec<&TopMenu>) {
        let mut seen: Vec<&'static str> = Vec::new();
        let mut honored = Vec::with_capacity(self.menus.len());
        let mut duplicates = Vec::new();

        for menu in &self.menus {
            if menu.is_unique() {
                let name = menu.kind_name();

                if seen.contains(&name) {
                    duplicates.push(menu);
                    continue;
                }

                seen.push(name);
            }

            honored.push(menu);
        }

        (honored, duplicates)
    }
}
