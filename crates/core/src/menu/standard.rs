//! Native behaviors that menu items can stand for.

/// The group of menus a [`StandardAction`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionCategory {
    /// Application menu actions.
    System,
    /// "File" menu actions.
    File,
    /// "Edit" menu actions.
    Edit,
    /// "Format" menu actions.
    Format,
    /// "View" menu actions.
    View,
    /// "Window" menu actions.
    Window,
    /// "Help" menu actions.
    Help,
}

macro_rules! standard_actions {
    (@toggle toggle) => { true };
    (@toggle) => { false };
    ($(
        $category:ident {
            $($(#[$toggle:ident])? $action:ident => $title:literal,)*
        }
    )*) => {
        /// A native behavior provided by the platform.
        ///
        /// A standard action is only built in a menu of its
        /// [`ActionCategory`], or in a submenu nested inside one.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[allow(missing_docs)]
        pub enum StandardAction {
            $($($action,)*)*
        }

        impl StandardAction {
            /// Every standard action, grouped by category.
            pub const ALL: &'static [StandardAction] = &[
                $($(StandardAction::$action,)*)*
            ];

            /// Returns the name of the action.
            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    $($(Self::$action => stringify!($action),)*)*
                }
            }

            /// Returns the category of the action.
            #[must_use]
            pub fn category(self) -> ActionCategory {
                match self {
                    $($(Self::$action => ActionCategory::$category,)*)*
                }
            }

            /// Returns the title used when none is given.
            #[must_use]
            pub fn default_title(self) -> &'static str {
                match self {
                    $($(Self::$action => $title,)*)*
                }
            }

            /// Returns true if the action shows a check state.
            #[must_use]
            pub fn is_toggle(self) -> bool {
                match self {
                    $($(Self::$action => standard_actions!(@toggle $($toggle)?),)*)*
                }
            }
        }
    };
}

standard_actions! {
    System {
        About => "About",
        Settings => "Settings…",
        Services => "Services",
        Hide => "Hide",
        HideOthers => "Hide Others",
        ShowAll => "Show All",
        Quit => "Quit",
    }
    File {
        New => "New",
        Open => "Open…",
        ClearRecent => "Clear Menu",
        Close => "Close",
        CloseAll => "Close All",
        Save => "Save…",
        SaveAs => "Save As…",
        Duplicate => "Duplicate",
        Rename => "Rename…",
        MoveTo => "Move To…",
        Revert => "Revert to Saved",
        PageSetup => "Page Setup…",
        Print => "Print…",
    }
    Edit {
        Undo => "Undo",
        Redo => "Redo",
        Cut => "Cut",
        Copy => "Copy",
        Paste => "Paste",
        PasteAndMatchStyle => "Paste and Match Style",
        Delete => "Delete",
        SelectAll => "Select All",
        Find => "Find…",
        FindNext => "Find Next",
        FindPrevious => "Find Previous",
        UseSelectionForFind => "Use Selection for Find",
        JumpToSelection => "Jump to Selection",
        Replace => "Find and Replace…",
        ReplaceAndFind => "Replace and Find",
        ReplaceAll => "Replace All",
        #[toggle] ToggleSmartQuotes => "Smart Quotes",
        #[toggle] ToggleSmartDashes => "Smart Dashes",
        #[toggle] ToggleLinkDetection => "Smart Links",
        #[toggle] ToggleTextReplacement => "Text Replacement",
        #[toggle] ToggleSpellingCorrection => "Correct Spelling Automatically",
        MakeUpperCase => "Make Upper Case",
        MakeLowerCase => "Make Lower Case",
        Capitalize => "Capitalize",
        StartSpeaking => "Start Speaking",
        StopSpeaking => "Stop Speaking",
    }
    Format {
        ShowFonts => "Show Fonts",
        ShowColors => "Show Colors",
        Bold => "Bold",
        Italic => "Italic",
        Underline => "Underline",
        Bigger => "Bigger",
        Smaller => "Smaller",
        KerningStandard => "Use Default",
        KerningNone => "Use None",
        KerningTighten => "Tighten",
        KerningLoosen => "Loosen",
        LigaturesNone => "Use None",
        LigaturesStandard => "Use Default",
        LigaturesAll => "Use All",
        RaiseBaseline => "Raise",
        LowerBaseline => "Lower",
        Superscript => "Superscript",
        Subscript => "Subscript",
        AlignLeft => "Align Left",
        AlignCenter => "Center",
        AlignRight => "Align Right",
        AlignJustified => "Justify",
    }
    View {
        ShowToolbar => "Show Toolbar",
        CustomizeToolbar => "Customize Toolbar…",
        ToggleFullScreen => "Enter Full Screen",
        ToggleSidebar => "Show Sidebar",
        ToggleTabBar => "Show Tab Bar",
    }
    Window {
        CloseWindow => "Close Window",
        Minimize => "Minimize",
        MinimizeAll => "Minimize All",
        Zoom => "Zoom",
        BringAllToFront => "Bring All to Front",
        ShowNextTab => "Show Next Tab",
        ShowPreviousTab => "Show Previous Tab",
        MergeAllWindows => "Merge All Windows",
        MoveTabToNewWindow => "Move Tab to New Window",
    }
    Help {
        AppHelp => "Help",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_and_toggles() {
        assert_eq!(StandardAction::Quit.category(), ActionCategory::System);
        assert_eq!(StandardAction::Print.category(), ActionCategory::File);
        assert_eq!(StandardAction::Bold.category(), ActionCategory::Format);
        assert_eq!(StandardAction::AppHelp.category(), ActionCategory::Help);

        let toggles: Vec<_> = StandardAction::ALL
            .iter()
            .filter(|action| action.is_toggle())
            .map(|action| action.name())
            .collect();

        assert_eq!(
            toggles,
            [
                "ToggleSmartQuotes",
                "ToggleSmartDashes",
                "ToggleLinkDetection",
                "ToggleTextReplacement",
                "ToggleSpellingCorrection",
            ]
        );
    }

    #[test]
    fn every_action_has_a_title() {
        assert!(
            StandardAction::ALL
                .iter()
                .all(|action| !action.default_title().is_empty())
        );
    }
}
