//! Talk to a native menu object system through opaque handles.
//!
//! A [`Bridge`] is the only place where native objects are dereferenced. The
//! rest of the crate deals in [`Handle`]s, which are plain integers that can
//! be copied, compared and hashed, but never followed.
//!
//! # Ownership
//! Every `new_*` method returns an owned reference that the caller must
//! [`release`] once the object has been attached to its parent. Every
//! lookup method returns a borrowed reference that must not be released.
//!
//! # Null handles
//! A failed native call produces [`Handle::NULL`]. Every operation that
//! receives a null handle does nothing and returns a null handle or a
//! neutral value.
//!
//! [`release`]: Bridge::release
use icy_menubar_core::menu::MenuBadge;

use std::ffi::CStr;
use std::fmt;
use std::path::Path;

/// An opaque reference to a native object.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Handle(pub usize);

impl Handle {
    /// The null handle.
    pub const NULL: Self = Self(0);

    /// Returns true if the handle is null.
    #[must_use]
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("Handle(null)")
        } else {
            write!(f, "Handle({:#x})", self.0)
        }
    }
}

/// The name of a native message, like `copy:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selector(&'static CStr);

impl Selector {
    /// The entry point of the action target.
    pub const TRAMPOLINE: Self = Self::new(c"menuItemActivated:");

    /// Creates a new [`Selector`].
    #[must_use]
    pub const fn new(name: &'static CStr) -> Self {
        Self(name)
    }

    /// Returns the name of the selector.
    #[must_use]
    pub fn name(self) -> &'static CStr {
        self.0
    }

    /// Returns the name of the selector as a string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.0.to_str().unwrap_or_default()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The surface of a native menu object system.
///
/// Every method must only be called on the UI thread, with the exception of
/// [`Bridge::run_on_ui_thread`].
pub trait Bridge: Send + Sync {
    /// Creates an empty menu.
    fn new_menu(&self, title: &str) -> Handle;

    /// Creates a menu item without action.
    fn new_item(&self, title: &str) -> Handle;

    /// Creates a separator item.
    fn new_separator(&self) -> Handle;

    /// Creates an image from a named system symbol.
    fn new_symbol_image(&self, name: &str) -> Handle;

    /// Creates an image from PNG encoded bytes.
    fn new_png_image(&self, bytes: &[u8]) -> Handle;

    /// Creates an image from a file on disk.
    fn new_file_image(&self, path: &Path) -> Handle;

    /// Creates an instance of a synthesized class whose single method,
    /// `selector`, forwards its sender to the global action registry.
    ///
    /// If the class already exists, it is reused.
    fn new_action_target(&self, class_name: &str, selector: Selector) -> Handle;

    /// Appends an item to a menu.
    fn add_item(&self, menu: Handle, item: Handle);

    /// Returns the amount of items of a menu.
    fn item_count(&self, menu: Handle) -> usize;

    /// Returns the item of a menu at the given index.
    fn item_at(&self, menu: Handle, index: usize) -> Handle;

    /// Returns the submenu of an item.
    fn submenu(&self, item: Handle) -> Handle;

    /// Attaches a submenu to an item.
    fn set_submenu(&self, item: Handle, menu: Handle);

    /// Sets whether a menu validates its own items.
    fn set_auto_enables_items(&self, menu: Handle, auto_enables_items: bool);

    /// Sets the title of an item.
    fn set_title(&self, item: Handle, title: &str);

    /// Sets the action message of an item.
    fn set_action(&self, item: Handle, selector: Selector);

    /// Sets the receiver of the action of an item.
    ///
    /// A null target sends the action through the responder chain.
    fn set_target(&self, item: Handle, target: Handle);

    /// Sets the key equivalent of an item.
    fn set_key_equivalent(&self, item: Handle, key: &str);

    /// Sets the key equivalent modifier mask of an item.
    fn set_modifier_mask(&self, item: Handle, mask: u64);

    /// Sets whether an item is enabled.
    fn set_enabled(&self, item: Handle, enabled: bool);

    /// Sets whether an item shows a checkmark.
    fn set_state(&self, item: Handle, checked: bool);

    /// Sets the tag of an item.
    fn set_tag(&self, item: Handle, tag: isize);

    /// Sets the image of an item.
    fn set_image(&self, item: Handle, image: Handle);

    /// Sets whether an image is a template tinted by the system.
    fn set_template(&self, image: Handle, template: bool);

    /// Sets the subtitle of an item.
    fn set_subtitle(&self, item: Handle, subtitle: &str);

    /// Sets the help tag of an item.
    fn set_tooltip(&self, item: Handle, tooltip: &str);

    /// Sets the badge of an item.
    fn set_badge(&self, item: Handle, badge: &MenuBadge);

    /// Returns the shared application object.
    fn application(&self) -> Handle;

    /// Returns the menu bar currently installed in the application.
    fn main_menu(&self) -> Handle;

    /// Installs a menu bar in the application.
    fn set_main_menu(&self, menu: Handle);

    /// Registers the menu the system fills with services.
    fn set_services_menu(&self, menu: Handle);

    /// Registers the menu the system fills with open windows.
    fn set_windows_menu(&self, menu: Handle);

    /// Registers the menu the system extends with a help search field.
    fn set_help_menu(&self, menu: Handle);

    /// Gives up an owned reference.
    fn release(&self, object: Handle);

    /// Runs `f` on the UI thread, blocking until it returns.
    ///
    /// If the current thread is the UI thread, `f` runs inline.
    fn run_on_ui_thread(&self, f: &mut (dyn FnMut() + Send));
}
