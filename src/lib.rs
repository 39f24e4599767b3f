//! icy_menubar keeps a native application menu bar in sync with a
//! declarative description of it.
//!
//! An application describes its menu bar as a [`MenuForest`] and hands it
//! over on every logical update. The installed native menu bar is only
//! rebuilt when the structure of the forest changes; otherwise, titles stay
//! put and only enabled and checked states are refreshed.
//!
//! ```rust,ignore
//! use icy_menubar::menu::{MenuElement, MenuShortcut, StandardAction, TopMenu};
//! use icy_menubar::{MacMenu, MenuForest};
//!
//! let forest = MenuForest::new(vec![
//!     TopMenu::application(vec![MenuElement::standard(StandardAction::Quit)]),
//!     TopMenu::file(
//!         "File",
//!         vec![MenuElement::action("New", || println!("New!")).shortcut(MenuShortcut::cmd('n'))],
//!     ),
//!     TopMenu::edit("Edit", vec![MenuElement::standard(StandardAction::Undo)]),
//! ]);
//!
//! let menu = MacMenu::new()?;
//! let _ = menu.reconcile(&forest);
//! ```
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/iced-rs/iced/9ab6923e943f784985e9ef9ca28b10278297225d/docs/logo.svg"
)]
#![cfg_attr(docsrs, feature(doc_cfg))]
pub use icy_menubar_core as core;
pub use icy_menubar_macos as macos;

pub use icy_menubar_core::{fingerprint, keyboard, menu};

pub use icy_menubar_core::{Fingerprint, MenuForest};
pub use icy_menubar_macos::{ActionRegistry, MacMenu, MenuError, Outcome, Reconciler, Settings};
