//! Integration tests for the menu reconciler.

use icy_menubar_core::MenuForest;
use icy_menubar_core::menu::{MenuElement, MenuShortcut, StandardAction, TopMenu, modifier_mask};
use icy_menubar_macos::{
    ActionRegistry, Bridge, Handle, HeadlessBridge, Outcome, Reconciler, Selector, Settings,
};

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn reconciler() -> Reconciler<HeadlessBridge> {
    Reconciler::new(
        HeadlessBridge::new(),
        Arc::new(ActionRegistry::new()),
        Settings::default(),
    )
}

fn top_item(reconciler: &Reconciler<HeadlessBridge>, index: usize) -> Handle {
    let bridge = reconciler.bridge();
    let menubar = reconciler.installed_menu_bar().unwrap();

    bridge.submenu(bridge.item_at(menubar, index))
}

#[test]
fn application_file_and_edit_menus() {
    let reconciler = reconciler();
    let bridge = reconciler.bridge();
    let news = Arc::new(AtomicUsize::new(0));

    let forest = MenuForest::new(vec![
        TopMenu::application(vec![MenuElement::standard(StandardAction::Quit)]),
        TopMenu::file("File", {
            let news = news.clone();

            vec![
                MenuElement::action("New", move || {
                    let _ = news.fetch_add(1, Ordering::SeqCst);
                })
                .shortcut(MenuShortcut::cmd('n')),
            ]
        }),
        TopMenu::edit("Edit", vec![MenuElement::standard(StandardAction::Undo)]),
    ]);

    assert_eq!(reconciler.reconcile(&forest), Outcome::Rebuilt);

    let menubar = reconciler.installed_menu_bar().unwrap();

    assert_eq!(bridge.main_menu(), menubar);
    assert_eq!(bridge.item_count(menubar), 3);
    assert_eq!(bridge.titles(menubar)[1..], ["File", "Edit"]);

    let new = bridge.item_at(top_item(&reconciler, 1), 0);
    let object = bridge.object(new).unwrap();

    assert_eq!(object.title, "New");
    assert_eq!(object.key_equivalent, "n");
    assert_eq!(object.modifier_mask, modifier_mask::COMMAND);
    assert_eq!(object.action, Some(Selector::TRAMPOLINE));
    assert!(reconciler.registry().contains(new));

    assert!(reconciler.registry().invoke(new, bridge));
    assert_eq!(news.load(Ordering::SeqCst), 1);

    let undo = bridge.item_at(top_item(&reconciler, 2), 0);
    let object = bridge.object(undo).unwrap();

    assert_eq!(object.title, "Undo");
    assert_eq!(object.action.map(|selector| selector.as_str()), Some("undo:"));
    assert_eq!(object.target, Handle::NULL);
    assert!(!reconciler.registry().contains(undo));
    assert_eq!(reconciler.registry().len(), 1);
}

#[test]
fn standard_quit_is_native_unless_overridden() {
    let native = reconciler();
    let forest = MenuForest::new(vec![TopMenu::application(vec![MenuElement::standard(
        StandardAction::Quit,
    )])]);

    let _ = native.reconcile(&forest);

    let bridge = native.bridge();
    let quit = bridge.object(bridge.item_at(top_item(&native, 0), 0)).unwrap();

    assert_eq!(quit.action.map(|selector| selector.as_str()), Some("terminate:"));
    assert_eq!(quit.target, bridge.application());
    assert_eq!(quit.key_equivalent, "q");
    assert_eq!(bridge.class_syntheses(), 0);
    assert!(native.registry().is_empty());

    let overridden = reconciler();
    let quits = Arc::new(AtomicBool::new(false));

    let forest = MenuForest::new(vec![TopMenu::application(vec![
        MenuElement::standard(StandardAction::Quit).on_activate({
            let quits = quits.clone();
            move || quits.store(true, Ordering::SeqCst)
        }),
    ])]);

    let _ = overridden.reconcile(&forest);

    let bridge = overridden.bridge();
    let item = bridge.item_at(top_item(&overridden, 0), 0);
    let quit = bridge.object(item).unwrap();

    assert_eq!(quit.action, Some(Selector::TRAMPOLINE));
    assert_eq!(Some(quit.target), overridden.registry().trampoline());
    assert_eq!(quit.key_equivalent, "q");
    assert_eq!(bridge.class_syntheses(), 1);

    assert!(overridden.registry().invoke(item, bridge));
    assert!(quits.load(Ordering::SeqCst));
}

#[test]
fn toggles_flip_their_native_state() {
    let reconciler = reconciler();
    let bridge = reconciler.bridge();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let forest = MenuForest::new(vec![TopMenu::view("View", {
        let seen = seen.clone();

        vec![MenuElement::toggle("Show Sidebar", false, move |checked| {
            seen.lock().unwrap().push(checked);
        })]
    })]);

    let _ = reconciler.reconcile(&forest);

    let sidebar = bridge.item_at(top_item(&reconciler, 1), 0);

    assert!(!bridge.object(sidebar).unwrap().checked);

    assert!(reconciler.registry().invoke(sidebar, bridge));
    assert!(bridge.object(sidebar).unwrap().checked);

    assert!(reconciler.registry().invoke(sidebar, bridge));
    assert!(!bridge.object(sidebar).unwrap().checked);

    assert_eq!(*seen.lock().unwrap(), [true, false]);
}

#[test]
fn attributes_are_patched_in_place() {
    let reconciler = reconciler();
    let bridge = reconciler.bridge();

    let forest = |enabled: bool, checked: bool, title: &str| {
        MenuForest::new(vec![TopMenu::file(
            "File",
            vec![
                MenuElement::action(title, || {}).enabled(enabled),
                MenuElement::separator(),
                MenuElement::toggle("Autosave", checked, |_| {}),
            ],
        )])
    };

    assert_eq!(reconciler.reconcile(&forest(true, false, "Save")), Outcome::Rebuilt);

    let file = top_item(&reconciler, 1);
    let items = bridge.items(file);
    let allocations = bridge.allocations();

    assert_eq!(
        reconciler.reconcile(&forest(false, true, "Save")),
        Outcome::Patched
    );

    assert_eq!(bridge.items(file), items);
    assert_eq!(bridge.allocations(), allocations);
    assert!(!bridge.object(items[0]).unwrap().enabled);
    assert!(bridge.object(items[2]).unwrap().checked);
    assert_eq!(reconciler.registry().toggle_state(items[2]), Some(true));

    assert_eq!(
        reconciler.reconcile(&forest(false, true, "Save As")),
        Outcome::Rebuilt
    );
    assert_eq!(bridge.titles(top_item(&reconciler, 1))[0], "Save As");
}

#[test]
fn reconciling_twice_changes_nothing() {
    let reconciler = reconciler();
    let bridge = reconciler.bridge();

    let forest = MenuForest::new(vec![
        TopMenu::application(vec![
            MenuElement::standard(StandardAction::About),
            MenuElement::separator(),
            MenuElement::standard(StandardAction::Quit),
        ]),
        TopMenu::window("Window", vec![MenuElement::standard(StandardAction::Minimize)]),
    ]);

    assert_eq!(reconciler.reconcile(&forest), Outcome::Rebuilt);

    let menubar = reconciler.installed_menu_bar();
    let fingerprint = reconciler.fingerprint();
    let allocations = bridge.allocations();

    assert_eq!(reconciler.reconcile(&forest), Outcome::Patched);
    assert_eq!(reconciler.installed_menu_bar(), menubar);
    assert_eq!(reconciler.fingerprint(), fingerprint);
    assert_eq!(bridge.allocations(), allocations);
    assert_eq!(bridge.windows_menu(), top_item(&reconciler, 1));
}

#[test]
fn reconcile_from_another_thread() {
    let reconciler = reconciler();

    let forest = MenuForest::new(vec![TopMenu::help(
        "Help",
        vec![MenuElement::standard(StandardAction::AppHelp)],
    )]);

    let outcome = std::thread::scope(|scope| {
        scope
            .spawn(|| reconciler.reconcile(&forest))
            .join()
            .unwrap()
    });

    assert_eq!(outcome, Outcome::Rebuilt);
    assert_eq!(reconciler.bridge().help_menu(), top_item(&reconciler, 1));
}

#[test]
fn callbacks_can_reconcile() {
    let reconciler = Arc::new(reconciler());
    let enabled = Arc::new(AtomicBool::new(true));

    fn forest(reconciler: &Arc<Reconciler<HeadlessBridge>>, enabled: &Arc<AtomicBool>) -> MenuForest {
        let reconciler = reconciler.clone();
        let enabled = enabled.clone();
        let is_enabled = enabled.load(Ordering::SeqCst);

        MenuForest::new(vec![TopMenu::file(
            "File",
            vec![
                MenuElement::action("Lock", move || {
                    enabled.store(false, Ordering::SeqCst);

                    let outcome = reconciler.reconcile(&forest(&reconciler, &enabled));
                    assert_eq!(outcome, Outcome::Patched);
                })
                .enabled(is_enabled),
            ],
        )])
    }

    assert_eq!(
        reconciler.reconcile(&forest(&reconciler, &enabled)),
        Outcome::Rebuilt
    );

    let bridge = reconciler.bridge();
    let lock = bridge.item_at(top_item(&reconciler, 1), 0);

    assert!(reconciler.registry().invoke(lock, bridge));
    assert!(!enabled.load(Ordering::SeqCst));
    assert!(!bridge.object(lock).unwrap().enabled);
}

#[test]
fn standard_toggles_show_and_patch_their_state() {
    let reconciler = reconciler();
    let bridge = reconciler.bridge();

    let forest = |checked: bool| {
        MenuForest::new(vec![TopMenu::edit(
            "Edit",
            vec![MenuElement::standard(StandardAction::ToggleSmartQuotes).checked(checked)],
        )])
    };

    assert_eq!(reconciler.reconcile(&forest(true)), Outcome::Rebuilt);

    let quotes = bridge.item_at(top_item(&reconciler, 1), 0);

    assert!(bridge.object(quotes).unwrap().checked);
    assert!(!reconciler.registry().contains(quotes));

    assert_eq!(reconciler.reconcile(&forest(false)), Outcome::Patched);
    assert!(!bridge.object(quotes).unwrap().checked);
}

#[test]
fn standard_items_overridden_with_toggles() {
    let reconciler = reconciler();
    let bridge = reconciler.bridge();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let forest = |checked: bool| {
        let seen = seen.clone();

        MenuForest::new(vec![TopMenu::view(
            "View",
            vec![
                MenuElement::standard(StandardAction::ToggleSidebar)
                    .checked(checked)
                    .on_toggle(move |checked| seen.lock().unwrap().push(checked)),
            ],
        )])
    };

    assert_eq!(reconciler.reconcile(&forest(true)), Outcome::Rebuilt);

    let sidebar = bridge.item_at(top_item(&reconciler, 1), 0);

    assert!(bridge.object(sidebar).unwrap().checked);
    assert_eq!(reconciler.registry().toggle_state(sidebar), Some(true));

    assert_eq!(reconciler.reconcile(&forest(false)), Outcome::Patched);
    assert!(!bridge.object(sidebar).unwrap().checked);
    assert_eq!(reconciler.registry().toggle_state(sidebar), Some(false));

    assert!(reconciler.registry().invoke(sidebar, bridge));
    assert!(bridge.object(sidebar).unwrap().checked);
    assert_eq!(*seen.lock().unwrap(), [true]);
}

#[test]
fn duplicate_top_menus_are_ignored() {
    let reconciler = reconciler();
    let bridge = reconciler.bridge();

    let forest = |duplicate: &str| {
        MenuForest::new(vec![
            TopMenu::application(vec![MenuElement::standard(StandardAction::Quit)]),
            TopMenu::file("A", vec![MenuElement::action("Open", || {})]),
            TopMenu::file(duplicate, vec![MenuElement::action("Close", || {})]),
        ])
    };

    assert_eq!(reconciler.reconcile(&forest("B")), Outcome::Rebuilt);

    let menubar = reconciler.installed_menu_bar().unwrap();
    let titles = bridge.titles(menubar);

    assert_eq!(titles.len(), 2);
    assert_eq!(titles[1], "A");
    assert!(!titles.iter().any(|title| title == "B"));
    assert_eq!(bridge.titles(top_item(&reconciler, 1)), ["Open"]);

    assert_eq!(reconciler.reconcile(&forest("C")), Outcome::Patched);
    assert_eq!(reconciler.installed_menu_bar(), Some(menubar));
}
