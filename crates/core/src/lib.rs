//! The declarative menu bar model of icy_menubar.
//!
//! This crate describes what an application menu bar looks like, without any
//! native code. A [`MenuForest`] is the unit of reconciliation: a platform
//! shell compares its [`Fingerprint`] against the one of the installed menu
//! bar to decide between a full rebuild and an in-place patch.
//!
//! [`MenuForest`]: menu::MenuForest
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/iced-rs/iced/9ab6923e943f784985e9ef9ca28b10278297225d/docs/logo.svg"
)]
#![cfg_attr(docsrs, feature(doc_cfg))]
pub mod fingerprint;
pub mod keyboard;
pub mod menu;

pub use fingerprint::Fingerprint;
pub use keyboard::Key;
pub use menu::{
    ActionCategory, Handler, MenuElement, MenuForest, MenuIcon, MenuKind, MenuShortcut,
    StandardAction, TopMenu,
};
