//! Report what went wrong while reconciling a menu bar.

/// Errors that can occur while installing or updating a native menu bar.
///
/// Only [`MenuError::UnsupportedPlatform`] is ever returned. The other
/// variants describe failures that are recovered where they happen and
/// reported through the log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    /// The native menu system is not available on this platform.
    #[error("native menu bars are not supported on this platform")]
    UnsupportedPlatform,
    /// A native call returned a null object and its step was skipped.
    #[error("native call `{call}` failed")]
    BridgeCallFailed {
        /// The native call that failed.
        call: &'static str,
    },
    /// A top-level menu of the same kind was already declared.
    #[error("duplicate top-level {kind} menu ignored")]
    DuplicateTopMenu {
        /// The kind of the ignored menu.
        kind: &'static str,
    },
}
