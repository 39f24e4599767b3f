//! Map standard actions to their native behavior.
use crate::bridge::Selector;

use icy_menubar_core::menu::StandardAction;
use icy_menubar_core::menu::modifier_mask::{COMMAND, CONTROL, NONE, OPTION, SHIFT};

use std::ffi::CStr;

/// The receiver of the action of a standard item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The shared application object.
    Application,
    /// The first responder that implements the action.
    ResponderChain,
}

/// The native wiring of a [`StandardAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    /// The action message.
    pub selector: Selector,
    /// The default key equivalent; empty if none.
    pub key: &'static str,
    /// The default key equivalent modifier mask.
    pub modifier_mask: u64,
    /// The tag the action reads from its sender, if any.
    pub tag: Option<isize>,
    /// The receiver of the action.
    pub target: Target,
}

impl Binding {
    const fn new(selector: &'static CStr) -> Self {
        Self {
            selector: Selector::new(selector),
            key: "",
            modifier_mask: NONE,
            tag: None,
            target: Target::ResponderChain,
        }
    }

    const fn key(self, key: &'static str, modifier_mask: u64) -> Self {
        Self {
            key,
            modifier_mask,
            ..self
        }
    }

    const fn tag(self, tag: isize) -> Self {
        Self {
            tag: Some(tag),
            ..self
        }
    }

    const fn application(self) -> Self {
        Self {
            target: Target::Application,
            ..self
        }
    }
}

/// Returns the native wiring of a [`StandardAction`].
///
/// [`StandardAction::Services`] has none: it is a submenu filled by the
/// system.
#[must_use]
pub fn binding(action: StandardAction) -> Option<Binding> {
    use StandardAction::*;

    let binding = match action {
        Services => return None,

        // Application
        About => Binding::new(c"orderFrontStandardAboutPanel:").application(),
        Settings => Binding::new(c"showPreferences:")
            .key(",", COMMAND)
            .application(),
        Hide => Binding::new(c"hide:").key("h", COMMAND).application(),
        HideOthers => Binding::new(c"hideOtherApplications:")
            .key("h", COMMAND | OPTION)
            .application(),
        ShowAll => Binding::new(c"unhideAllApplications:").application(),
        Quit => Binding::new(c"terminate:").key("q", COMMAND).application(),

        // File
        New => Binding::new(c"newDocument:").key("n", COMMAND),
        Open => Binding::new(c"openDocument:").key("o", COMMAND),
        ClearRecent => Binding::new(c"clearRecentDocuments:"),
        Close => Binding::new(c"performClose:").key("w", COMMAND),
        CloseAll => Binding::new(c"closeAll:").key("w", COMMAND | OPTION),
        Save => Binding::new(c"saveDocument:").key("s", COMMAND),
        SaveAs => Binding::new(c"saveDocumentAs:").key("S", COMMAND | OPTION | SHIFT),
        Duplicate => Binding::new(c"duplicateDocument:").key("S", COMMAND | SHIFT),
        Rename => Binding::new(c"renameDocument:"),
        MoveTo => Binding::new(c"moveDocument:"),
        Revert => Binding::new(c"revertDocumentToSaved:"),
        PageSetup => Binding::new(c"runPageLayout:").key("P", COMMAND | SHIFT),
        Print => Binding::new(c"print:").key("p", COMMAND),

        // Edit
        Undo => Binding::new(c"undo:").key("z", COMMAND),
        Redo => Binding::new(c"redo:").key("Z", COMMAND | SHIFT),
        Cut => Binding::new(c"cut:").key("x", COMMAND),
        Copy => Binding::new(c"copy:").key("c", COMMAND),
        Paste => Binding::new(c"paste:").key("v", COMMAND),
        PasteAndMatchStyle => {
            Binding::new(c"pasteAsPlainText:").key("V", COMMAND | OPTION)
        }
        Delete => Binding::new(c"delete:").key("\u{8}", NONE),
        SelectAll => Binding::new(c"selectAll:").key("a", COMMAND),
        Find => Binding::new(c"performFindPanelAction:")
            .key("f", COMMAND)
            .tag(1),
        FindNext => Binding::new(c"performFindPanelAction:")
            .key("g", COMMAND)
            .tag(2),
        FindPrevious => Binding::new(c"performFindPanelAction:")
            .key("G", COMMAND | SHIFT)
            .tag(3),
        UseSelectionForFind => Binding::new(c"performFindPanelAction:")
            .key("e", COMMAND)
            .tag(7),
        JumpToSelection => Binding::new(c"centerSelectionInVisibleArea:").key("j", COMMAND),
        Replace => Binding::new(c"performFindPanelAction:")
            .key("f", COMMAND | OPTION)
            .tag(5),
        ReplaceAndFind => Binding::new(c"performFindPanelAction:").tag(6),
        ReplaceAll => Binding::new(c"performFindPanelAction:").tag(4),
        ToggleSmartQuotes => Binding::new(c"toggleAutomaticQuoteSubstitution:"),
        ToggleSmartDashes => Binding::new(c"toggleAutomaticDashSubstitution:"),
        ToggleLinkDetection => Binding::new(c"toggleAutomaticLinkDetection:"),
        ToggleTextReplacement => Binding::new(c"toggleAutomaticTextReplacement:"),
        ToggleSpellingCorrection => Binding::new(c"toggleAutomaticSpellingCorrection:"),
        MakeUpperCase => Binding::new(c"uppercaseWord:"),
        MakeLowerCase => Binding::new(c"lowercaseWord:"),
        Capitalize => Binding::new(c"capitalizeWord:"),
        StartSpeaking => Binding::new(c"startSpeaking:"),
        StopSpeaking => Binding::new(c"stopSpeaking:"),

        // Format
        ShowFonts => Binding::new(c"orderFrontFontPanel:").key("t", COMMAND),
        ShowColors => Binding::new(c"orderFrontColorPanel:").key("C", COMMAND | SHIFT),
        Bold => Binding::new(c"addFontTrait:").key("b", COMMAND).tag(2),
        Italic => Binding::new(c"addFontTrait:").key("i", COMMAND).tag(1),
        Underline => Binding::new(c"underline:").key("u", COMMAND),
        Bigger => Binding::new(c"modifyFont:").key("+", COMMAND).tag(3),
        Smaller => Binding::new(c"modifyFont:").key("-", COMMAND).tag(4),
        KerningStandard => Binding::new(c"useStandardKerning:"),
        KerningNone => Binding::new(c"turnOffKerning:"),
        KerningTighten => Binding::new(c"tightenKerning:"),
        KerningLoosen => Binding::new(c"loosenKerning:"),
        LigaturesNone => Binding::new(c"turnOffLigatures:"),
        LigaturesStandard => Binding::new(c"useStandardLigatures:"),
        LigaturesAll => Binding::new(c"useAllLigatures:"),
        RaiseBaseline => Binding::new(c"raiseBaseline:"),
        LowerBaseline => Binding::new(c"lowerBaseline:"),
        Superscript => Binding::new(c"superscript:"),
        Subscript => Binding::new(c"subscript:"),
        AlignLeft => Binding::new(c"alignLeft:").key("{", COMMAND),
        AlignCenter => Binding::new(c"alignCenter:").key("|", COMMAND),
        AlignRight => Binding::new(c"alignRight:").key("}", COMMAND),
        AlignJustified => Binding::new(c"alignJustified:"),

        // View
        ShowToolbar => Binding::new(c"toggleToolbarShown:").key("t", COMMAND | OPTION),
        CustomizeToolbar => Binding::new(c"runToolbarCustomizationPalette:"),
        ToggleFullScreen => Binding::new(c"toggleFullScreen:").key("f", COMMAND | CONTROL),
        ToggleSidebar => Binding::new(c"toggleSidebar:").key("s", COMMAND | CONTROL),
        ToggleTabBar => Binding::new(c"toggleTabBar:"),

        // Window
        CloseWindow => Binding::new(c"performClose:").key("w", COMMAND),
        Minimize => Binding::new(c"performMiniaturize:").key("m", COMMAND),
        MinimizeAll => Binding::new(c"miniaturizeAll:")
            .key("m", COMMAND | OPTION)
            .application(),
        Zoom => Binding::new(c"performZoom:"),
        BringAllToFront => Binding::new(c"arrangeInFront:").application(),
        ShowNextTab => Binding::new(c"selectNextTab:"),
        ShowPreviousTab => Binding::new(c"selectPreviousTab:"),
        MergeAllWindows => Binding::new(c"mergeAllWindows:"),
        MoveTabToNewWindow => Binding::new(c"moveTabToNewWindow:"),

        // Help
        AppHelp => Binding::new(c"showHelp:")
            .key("?", COMMAND | SHIFT)
            .application(),
    };

    Some(binding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_but_services_is_bound() {
        let unbound: Vec<_> = StandardAction::ALL
            .iter()
            .copied()
            .filter(|action| binding(*action).is_none())
            .collect();

        assert_eq!(unbound, [StandardAction::Services]);
    }

    #[test]
    fn application_actions_target_the_application() {
        let quit = binding(StandardAction::Quit).unwrap();

        assert_eq!(quit.selector.as_str(), "terminate:");
        assert_eq!(quit.key, "q");
        assert_eq!(quit.modifier_mask, COMMAND);
        assert_eq!(quit.target, Target::Application);

        let copy = binding(StandardAction::Copy).unwrap();
        assert_eq!(copy.target, Target::ResponderChain);
    }

    #[test]
    fn find_panel_actions_carry_tags() {
        let tags: Vec<_> = [
            StandardAction::Find,
            StandardAction::FindNext,
            StandardAction::FindPrevious,
            StandardAction::ReplaceAll,
            StandardAction::Replace,
            StandardAction::ReplaceAndFind,
            StandardAction::UseSelectionForFind,
        ]
        .into_iter()
        .filter_map(binding)
        .map(|binding| binding.tag)
        .collect();

        assert_eq!(
            tags,
            [Some(1), Some(2), Some(3), Some(4), Some(5), Some(6), Some(7)]
        );
    }
}
