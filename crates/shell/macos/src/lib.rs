//! Native macOS menu bar reconciliation for icy_menubar.
//!
//! This crate materializes a declarative [`MenuForest`] into a native menu
//! bar and keeps it synchronized:
//!
//! - **Reconciliation**: a new forest either patches the installed menu bar in
//!   place or replaces it, depending on its [`Fingerprint`]
//! - **Actions**: native items route their activations back to the callbacks
//!   of the forest through an [`ActionRegistry`]
//! - **Standard actions**: native behaviors like Copy or Quit are wired to
//!   AppKit directly unless the application overrides them
//!
//! # Usage
//!
//! ```rust,ignore
//! use icy_menubar_macos::MacMenu;
//!
//! // Create the menu (call once at app startup)
//! let menu = MacMenu::new()?;
//!
//! // Reconcile on every logical update
//! let _ = menu.reconcile(&forest);
//! ```
//!
//! # Platform Support
//!
//! The AppKit bridge only compiles on macOS. On other platforms, [`MacMenu`]
//! exists but cannot be created. The [`HeadlessBridge`] is available
//! everywhere.
//!
//! [`MenuForest`]: icy_menubar_core::MenuForest
//! [`Fingerprint`]: icy_menubar_core::Fingerprint
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/iced-rs/iced/9ab6923e943f784985e9ef9ca28b10278297225d/docs/logo.svg"
)]
#![cfg_attr(docsrs, feature(doc_cfg))]
pub mod binding;
pub mod bridge;
pub mod headless;
pub mod registry;

mod builder;
mod error;
mod patch;
mod reconcile;
mod settings;

#[cfg(target_os = "macos")]
pub mod appkit;

#[cfg(target_os = "macos")]
mod menu;

// Provide stub implementations for non-macOS platforms
#[cfg(not(target_os = "macos"))]
mod stubs;

pub use bridge::{Bridge, Handle, Selector};
pub use error::MenuError;
pub use headless::HeadlessBridge;
pub use reconcile::{Outcome, Reconciler};
pub use registry::ActionRegistry;
pub use settings::Settings;

#[cfg(target_os = "macos")]
pub use appkit::AppKitBridge;

#[cfg(target_os = "macos")]
pub use menu::MacMenu;

#[cfg(not(target_os = "macos"))]
pub use stubs::MacMenu;
