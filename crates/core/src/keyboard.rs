//! Listen to keyboard shortcuts.
pub mod key;

pub use key::Key;

use bitflags::bitflags;

bitflags! {
    /// The current state of the keyboard modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u32 {
        /// The "shift" key.
        const SHIFT = 0b100;
        /// The "control" key.
        const CTRL = 0b100 << 3;
        /// The "alt" key, "option" on macOS.
        const ALT = 0b100 << 6;
        /// The "windows" key on Windows, "command" on macOS, and
        /// "super" on Linux.
        const LOGO = 0b100 << 9;
    }
}

impl Modifiers {
    /// The "command" key.
    ///
    /// Menu bars only exist natively on macOS, where this is the
    /// [`Modifiers::LOGO`] key.
    pub const COMMAND: Self = Self::LOGO;

    /// Returns true if the [`SHIFT`] key is pressed in the [`Modifiers`].
    ///
    /// [`SHIFT`]: Self::SHIFT
    #[must_use]
    pub fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }

    /// Returns true if the [`CTRL`] key is pressed in the [`Modifiers`].
    ///
    /// [`CTRL`]: Self::CTRL
    #[must_use]
    pub fn control(self) -> bool {
        self.contains(Self::CTRL)
    }

    /// Returns true if the [`ALT`] key is pressed in the [`Modifiers`].
    ///
    /// [`ALT`]: Self::ALT
    #[must_use]
    pub fn alt(self) -> bool {
        self.contains(Self::ALT)
    }

    /// Returns true if the [`LOGO`] key is pressed in the [`Modifiers`].
    ///
    /// [`LOGO`]: Self::LOGO
    #[must_use]
    pub fn logo(self) -> bool {
        self.contains(Self::LOGO)
    }

    /// Returns true if the "command key" is pressed in the [`Modifiers`].
    #[must_use]
    pub fn command(self) -> bool {
        self.logo()
    }
}
