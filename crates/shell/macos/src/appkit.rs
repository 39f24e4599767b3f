//! Drive AppKit menus through the [`Bridge`] trait.
//!
//! Handles are raw object pointers. Owned handles come from
//! [`Retained::into_raw`] and are given back with [`Bridge::release`];
//! borrowed handles are taken from objects kept alive by their parents.
use crate::bridge::{Bridge, Handle, Selector};
use crate::registry::ActionRegistry;

use icy_menubar_core::menu::MenuBadge;

use objc2::rc::{Allocated, Retained};
use objc2::runtime::{AnyClass, AnyObject, ClassBuilder, Sel};
use objc2::{AnyThread, ClassType, MainThreadMarker, Message, msg_send, sel};
use objc2_app_kit::{NSApplication, NSImage, NSMenu, NSMenuItem};
use objc2_foundation::{NSData, NSString};

use std::ffi::CString;
use std::path::Path;

/// A [`Bridge`] to the AppKit menus of the running application.
///
/// Every operation must happen on the main thread; off the main thread,
/// operations do nothing and return null handles.
///
/// The action target synthesized by this bridge forwards activations to
/// [`ActionRegistry::global`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AppKitBridge;

impl AppKitBridge {
    /// Creates a new [`AppKitBridge`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn main_thread() -> Option<MainThreadMarker> {
    let mtm = MainThreadMarker::new();

    if mtm.is_none() {
        log::warn!("AppKit menu call outside of the main thread ignored");
    }

    mtm
}

fn owned<T: Message>(object: Option<Retained<T>>) -> Handle {
    object.map_or(Handle::NULL, |object| {
        Handle(Retained::into_raw(object) as usize)
    })
}

fn borrowed<T: Message>(object: Option<Retained<T>>) -> Handle {
    object.map_or(Handle::NULL, |object| {
        Handle(Retained::as_ptr(&object) as usize)
    })
}

/// Resolves a handle into an object.
#[allow(unsafe_code)]
fn object<'a>(handle: Handle) -> Option<&'a AnyObject> {
    let _mtm = MainThreadMarker::new()?;

    // SAFETY: non-null handles given out by this bridge point to objects
    // kept alive by an owned reference or by their parent.
    unsafe { (handle.0 as *const AnyObject).as_ref() }
}

/// Resolves a handle into an object of class `T`.
#[allow(unsafe_code)]
fn cast<'a, T: ClassType>(handle: Handle) -> Option<&'a T> {
    let object = object(handle)?;

    // SAFETY: every object responds to `isKindOfClass:`.
    let is_kind: bool = unsafe { msg_send![object, isKindOfClass: T::class()] };

    // SAFETY: the object is an instance of `T` or of one of its subclasses.
    is_kind.then(|| unsafe { &*(object as *const AnyObject).cast::<T>() })
}

fn responds_to(object: &AnyObject, selector: Sel) -> bool {
    // SAFETY: every object responds to `respondsToSelector:`.
    #[allow(unsafe_code)]
    unsafe {
        msg_send![object, respondsToSelector: selector]
    }
}

/// The single method of the synthesized action target.
#[allow(unsafe_code)]
unsafe extern "C" fn menu_item_activated(
    _this: *const AnyObject,
    _cmd: Sel,
    sender: *const AnyObject,
) {
    if sender.is_null() {
        return;
    }

    if !ActionRegistry::global().invoke(Handle(sender as usize), &AppKitBridge) {
        log::debug!("Menu item {sender:?} activated without a registered action");
    }
}

impl Bridge for AppKitBridge {
    fn new_menu(&self, title: &str) -> Handle {
        let Some(mtm) = main_thread() else {
            return Handle::NULL;
        };

        let menu = NSMenu::new(mtm);
        menu.setTitle(&NSString::from_str(title));

        owned(Some(menu))
    }

    fn new_item(&self, title: &str) -> Handle {
        let Some(mtm) = main_thread() else {
            return Handle::NULL;
        };

        let item = NSMenuItem::new(mtm);
        item.setTitle(&NSString::from_str(title));

        owned(Some(item))
    }

    fn new_separator(&self) -> Handle {
        let Some(mtm) = main_thread() else {
            return Handle::NULL;
        };

        owned(Some(NSMenuItem::separatorItem(mtm)))
    }

    fn new_symbol_image(&self, name: &str) -> Handle {
        if main_thread().is_none() || name.is_empty() {
            return Handle::NULL;
        }

        owned(NSImage::imageWithSystemSymbolName_accessibilityDescription(
            &NSString::from_str(name),
            None,
        ))
    }

    fn new_png_image(&self, bytes: &[u8]) -> Handle {
        if main_thread().is_none() {
            return Handle::NULL;
        }

        let data = NSData::with_bytes(bytes);

        owned(NSImage::initWithData(NSImage::alloc(), &data))
    }

    fn new_file_image(&self, path: &Path) -> Handle {
        let Some(path) = path.to_str() else {
            return Handle::NULL;
        };

        if main_thread().is_none() {
            return Handle::NULL;
        }

        owned(NSImage::initWithContentsOfFile(
            NSImage::alloc(),
            &NSString::from_str(path),
        ))
    }

    #[allow(unsafe_code)]
    fn new_action_target(&self, class_name: &str, selector: Selector) -> Handle {
        if main_thread().is_none() {
            return Handle::NULL;
        }

        let Ok(name) = CString::new(class_name) else {
            return Handle::NULL;
        };

        let class = match AnyClass::get(&name) {
            Some(class) => class,
            None => {
                let Some(mut builder) = AnyClass::get(c"NSObject")
                    .and_then(|superclass| ClassBuilder::new(&name, superclass))
                else {
                    return Handle::NULL;
                };

                // SAFETY: the function has the signature of an action
                // message, which takes the sender as its only argument.
                unsafe {
                    builder.add_method(
                        Sel::register(selector.name()),
                        menu_item_activated
                            as unsafe extern "C" fn(*const AnyObject, Sel, *const AnyObject),
                    );
                }

                log::debug!("Synthesized action target class {class_name}");

                builder.register()
            }
        };

        // SAFETY: `new` returns an owned instance of an `NSObject` subclass.
        let target: Option<Retained<AnyObject>> = unsafe { msg_send![class, new] };

        owned(target)
    }

    fn add_item(&self, menu: Handle, item: Handle) {
        if let (Some(menu), Some(item)) = (cast::<NSMenu>(menu), cast::<NSMenuItem>(item)) {
            menu.addItem(item);
        }
    }

    fn item_count(&self, menu: Handle) -> usize {
        cast::<NSMenu>(menu).map_or(0, |menu| menu.numberOfItems().max(0) as usize)
    }

    fn item_at(&self, menu: Handle, index: usize) -> Handle {
        let Some(menu) = cast::<NSMenu>(menu) else {
            return Handle::NULL;
        };

        let Ok(index) = isize::try_from(index) else {
            return Handle::NULL;
        };

        if index >= menu.numberOfItems() {
            return Handle::NULL;
        }

        borrowed(menu.itemAtIndex(index))
    }

    fn submenu(&self, item: Handle) -> Handle {
        cast::<NSMenuItem>(item).map_or(Handle::NULL, |item| borrowed(item.submenu()))
    }

    fn set_submenu(&self, item: Handle, menu: Handle) {
        if let (Some(item), Some(menu)) = (cast::<NSMenuItem>(item), cast::<NSMenu>(menu)) {
            item.setSubmenu(Some(menu));
        }
    }

    fn set_auto_enables_items(&self, menu: Handle, auto_enables_items: bool) {
        if let Some(menu) = cast::<NSMenu>(menu) {
            menu.setAutoenablesItems(auto_enables_items);
        }
    }

    fn set_title(&self, item: Handle, title: &str) {
        if let Some(item) = cast::<NSMenuItem>(item) {
            item.setTitle(&NSString::from_str(title));
        }
    }

    #[allow(unsafe_code)]
    fn set_action(&self, item: Handle, selector: Selector) {
        if let Some(item) = cast::<NSMenuItem>(item) {
            // SAFETY: the receiver of the action implements the selector, or
            // the responder chain skips it.
            unsafe { item.setAction(Some(Sel::register(selector.name()))) };
        }
    }

    #[allow(unsafe_code)]
    fn set_target(&self, item: Handle, target: Handle) {
        let Some(item) = cast::<NSMenuItem>(item) else {
            return;
        };

        // SAFETY: the target is the shared application or an action target
        // that lives for the rest of the process.
        unsafe {
            match object(target) {
                Some(target) => item.setTarget(Some(target)),
                None => item.setTarget(None),
            }
        }
    }

    fn set_key_equivalent(&self, item: Handle, key: &str) {
        if let Some(item) = cast::<NSMenuItem>(item) {
            item.setKeyEquivalent(&NSString::from_str(key));
        }
    }

    #[allow(unsafe_code)]
    fn set_modifier_mask(&self, item: Handle, mask: u64) {
        if let Some(item) = cast::<NSMenuItem>(item) {
            // SAFETY: Objective-C message send.
            unsafe {
                let _: () = msg_send![item, setKeyEquivalentModifierMask: mask as usize];
            }
        }
    }

    fn set_enabled(&self, item: Handle, enabled: bool) {
        if let Some(item) = cast::<NSMenuItem>(item) {
            item.setEnabled(enabled);
        }
    }

    #[allow(unsafe_code)]
    fn set_state(&self, item: Handle, checked: bool) {
        if let Some(item) = cast::<NSMenuItem>(item) {
            // NSControlStateValueOn = 1, NSControlStateValueOff = 0
            let state: isize = if checked { 1 } else { 0 };

            // SAFETY: Objective-C message send.
            unsafe {
                let _: () = msg_send![item, setState: state];
            }
        }
    }

    #[allow(unsafe_code)]
    fn set_tag(&self, item: Handle, tag: isize) {
        if let Some(item) = cast::<NSMenuItem>(item) {
            // SAFETY: Objective-C message send.
            unsafe {
                let _: () = msg_send![item, setTag: tag];
            }
        }
    }

    fn set_image(&self, item: Handle, image: Handle) {
        if let (Some(item), Some(image)) = (cast::<NSMenuItem>(item), cast::<NSImage>(image)) {
            item.setImage(Some(image));
        }
    }

    fn set_template(&self, image: Handle, template: bool) {
        if let Some(image) = cast::<NSImage>(image) {
            image.setTemplate(template);
        }
    }

    #[allow(unsafe_code)]
    fn set_subtitle(&self, item: Handle, subtitle: &str) {
        let Some(item) = cast::<NSMenuItem>(item) else {
            return;
        };

        // Subtitles need macOS 14.4
        if !responds_to(item, sel!(setSubtitle:)) {
            return;
        }

        let subtitle = NSString::from_str(subtitle);

        // SAFETY: the item responds to `setSubtitle:`, which takes a string.
        unsafe {
            let _: () = msg_send![item, setSubtitle: &*subtitle];
        }
    }

    fn set_tooltip(&self, item: Handle, tooltip: &str) {
        if let Some(item) = cast::<NSMenuItem>(item) {
            item.setToolTip(Some(&NSString::from_str(tooltip)));
        }
    }

    #[allow(unsafe_code)]
    fn set_badge(&self, item: Handle, badge: &MenuBadge) {
        let Some(item) = cast::<NSMenuItem>(item) else {
            return;
        };

        // Badges need macOS 14
        let Some(class) = AnyClass::get(c"NSMenuItemBadge") else {
            return;
        };

        if !responds_to(item, sel!(setBadge:)) {
            return;
        }

        // SAFETY: `NSMenuItemBadge` provides both initializers, and the item
        // responds to `setBadge:`.
        unsafe {
            let allocated: Allocated<AnyObject> = msg_send![class, alloc];

            let badge: Option<Retained<AnyObject>> = match badge {
                MenuBadge::Count(count) => {
                    msg_send![allocated, initWithCount: (*count).min(isize::MAX as usize) as isize]
                }
                MenuBadge::Text(text) => {
                    msg_send![allocated, initWithString: &*NSString::from_str(text)]
                }
            };

            if let Some(badge) = badge {
                let _: () = msg_send![item, setBadge: &*badge];
            }
        }
    }

    fn application(&self) -> Handle {
        let Some(mtm) = main_thread() else {
            return Handle::NULL;
        };

        borrowed(Some(NSApplication::sharedApplication(mtm)))
    }

    fn main_menu(&self) -> Handle {
        let Some(mtm) = main_thread() else {
            return Handle::NULL;
        };

        borrowed(NSApplication::sharedApplication(mtm).mainMenu())
    }

    fn set_main_menu(&self, menu: Handle) {
        let Some(mtm) = main_thread() else {
            return;
        };

        NSApplication::sharedApplication(mtm).setMainMenu(cast::<NSMenu>(menu));
    }

    fn set_services_menu(&self, menu: Handle) {
        let Some(mtm) = main_thread() else {
            return;
        };

        NSApplication::sharedApplication(mtm).setServicesMenu(cast::<NSMenu>(menu));
    }

    fn set_windows_menu(&self, menu: Handle) {
        let Some(mtm) = main_thread() else {
            return;
        };

        NSApplication::sharedApplication(mtm).setWindowsMenu(cast::<NSMenu>(menu));
    }

    fn set_help_menu(&self, menu: Handle) {
        let Some(mtm) = main_thread() else {
            return;
        };

        NSApplication::sharedApplication(mtm).setHelpMenu(cast::<NSMenu>(menu));
    }

    #[allow(unsafe_code)]
    fn release(&self, object: Handle) {
        if object.is_null() {
            return;
        }

        // SAFETY: owned handles come from `Retained::into_raw`, and each of
        // them is released exactly once.
        drop(unsafe { Retained::from_raw(object.0 as *mut AnyObject) });
    }

    fn run_on_ui_thread(&self, f: &mut (dyn FnMut() + Send)) {
        dispatch2::run_on_main(|_mtm| f());
    }
}
