//! Identify keyboard keys.
use smol_str::SmolStr;

/// A key on the keyboard.
///
/// Only the keys a native menu can bind as a key equivalent are named.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key<C = SmolStr> {
    /// A key with an established name.
    Named(Named),

    /// A key string that corresponds to the character typed by the user,
    /// taking into account the user’s current locale setting, and any
    /// system-level keyboard mapping overrides that are in effect.
    Character(C),

    /// An unidentified key.
    Unidentified,
}

impl Key {
    /// Convert `Key::<SmolStr>` to `Key::<&str>`.
    pub fn as_ref(&self) -> Key<&str> {
        match self {
            Self::Named(named) => Key::Named(*named),
            Self::Character(c) => Key::Character(c.as_str()),
            Self::Unidentified => Key::Unidentified,
        }
    }
}

impl From<Named> for Key {
    fn from(named: Named) -> Self {
        Self::Named(named)
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        let mut buffer = [0; 4];
        Self::Character(SmolStr::new(c.encode_utf8(&mut buffer)))
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Character(SmolStr::new(s))
    }
}

/// A named key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Named {
    Space,
    Enter,
    Tab,
    Escape,
    Backspace,
    Delete,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}
