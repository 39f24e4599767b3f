//! Compute the structural identity of a menu forest.
use crate::menu::{Handler, MenuElement, MenuForest, MenuKind, MenuShortcut, TopMenu};

use std::fmt::Write;

/// The structural identity of a [`MenuForest`].
///
/// Two forests with equal fingerprints have the same shape: the same menus,
/// the same elements in the same order, the same titles and shortcuts. Only
/// the enabled and checked flags may differ between them, which allows a
/// native menu bar to be patched in place instead of rebuilt.
///
/// Callbacks never contribute to the fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Fingerprint {
    tokens: Vec<String>,
}

impl Fingerprint {
    /// Computes the [`Fingerprint`] of the given [`MenuForest`].
    ///
    /// Menus ignored as duplicates do not contribute.
    #[must_use]
    pub fn of(forest: &MenuForest) -> Self {
        let mut tokens = Vec::new();

        for menu in forest.honored() {
            tokens.push(top_token(menu));

            for element in menu.elements() {
                push_element(&mut tokens, element);
            }
        }

        Self { tokens }
    }

    /// Returns the tokens of the fingerprint, in pre-order.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Returns the amount of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the fingerprint describes an empty forest.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

fn top_token(menu: &TopMenu) -> String {
    let flags = match menu {
        TopMenu::Named {
            kind: MenuKind::Window {
                suppress_auto_window_list: true,
            },
            ..
        } => "suppress-window-list",
        _ => "",
    };

    format!(
        "T|{}|{}|{flags}",
        menu.kind_name(),
        escape(menu.title())
    )
}

fn push_element(tokens: &mut Vec<String>, element: &MenuElement) {
    let mut token = String::from("E|");

    match element {
        MenuElement::Standard(item) => {
            token.push_str("Standard.");
            token.push_str(item.action.name());
        }
        _ => token.push_str(variant(element)),
    }

    let child_count = element
        .children()
        .map_or(-1, |children| children.len() as isize);

    let _ = write!(token, "|{}|{child_count}", escape(element.title_str()));

    match element {
        MenuElement::Action(item) => push_shortcut(&mut token, item.shortcut.as_ref()),
        MenuElement::Toggle(item) => push_shortcut(&mut token, item.shortcut.as_ref()),
        MenuElement::Standard(item) => {
            // An override rewires the native item to the action trampoline
            token.push_str(match item.handler {
                None => "|native",
                Some(Handler::Activate(_)) => "|activate",
                Some(Handler::Toggle(_)) => "|toggle",
            });
        }
        _ => {}
    }

    tokens.push(token);

    for child in element.children().unwrap_or_default() {
        push_element(tokens, child);
    }
}

fn push_shortcut(token: &mut String, shortcut: Option<&MenuShortcut>) {
    let equivalent = shortcut
        .and_then(MenuShortcut::key_equivalent)
        .unwrap_or_default();

    let _ = write!(
        token,
        "|{}|{}",
        escape(&equivalent.key),
        equivalent.modifier_mask
    );
}

fn variant(element: &MenuElement) -> &'static str {
    match element {
        MenuElement::Separator => "Separator",
        MenuElement::SectionHeader { .. } => "SectionHeader",
        MenuElement::Label(_) => "Label",
        MenuElement::Action(_) => "Action",
        MenuElement::Toggle(_) => "Toggle",
        MenuElement::Submenu(_) => "Submenu",
        MenuElement::Standard(_) => "Standard",
    }
}

fn escape(field: &str) -> String {
    if !field.contains(['|', '\\']) {
        return field.to_owned();
    }

    let mut escaped = String::with_capacity(field.len() + 2);

    for c in field.chars() {
        if c == '|' || c == '\\' {
            escaped.push('\\');
        }

        escaped.push(c);
    }

    escaped
}
