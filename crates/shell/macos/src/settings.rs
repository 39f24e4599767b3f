//! Configure how native menus are built.

/// The settings of a [`Reconciler`].
///
/// [`Reconciler`]: crate::Reconciler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The name of the Objective-C class synthesized for the action target.
    ///
    /// By default, it is `IcyMenubarActionTarget`.
    ///
    /// A registry creates a single action target, so this only applies to
    /// the first menu bar built with a given registry.
    pub target_class_name: String,

    /// Whether `&` mnemonic markers are stripped from titles.
    ///
    /// By default, it is enabled.
    pub strip_mnemonics: bool,

    /// Whether native menus validate their items on their own.
    ///
    /// When disabled, the declared enabled flags are authoritative.
    ///
    /// By default, it is disabled.
    pub auto_enables_items: bool,
}

impl Settings {
    /// Sets the name of the synthesized action target class.
    #[must_use]
    pub fn with_target_class_name(mut self, name: impl Into<String>) -> Self {
        self.target_class_name = name.into();
        self
    }

    /// Sets whether mnemonic markers are stripped from titles.
    #[must_use]
    pub fn with_strip_mnemonics(mut self, strip_mnemonics: bool) -> Self {
        self.strip_mnemonics = strip_mnemonics;
        self
    }

    /// Sets whether native menus validate their items on their own.
    #[must_use]
    pub fn with_auto_enables_items(mut self, auto_enables_items: bool) -> Self {
        self.auto_enables_items = auto_enables_items;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_class_name: String::from("IcyMenubarActionTarget"),
            strip_mnemonics: true,
            auto_enables_items: false,
        }
    }
}
