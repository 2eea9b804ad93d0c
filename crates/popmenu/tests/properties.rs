//! End-to-end behaviour of a hosted menu, driven through the mock backend.

use popmenu::{events, Direction, ItemSpec, Menu, MenuError, MenuItem, Observable};
use popmenu_core::{slugify, Event, Key, Point, Scope};
use popmenu_test::{MockBackend, MockViewport};
use proptest::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct Host {
    menu: Menu,
    backend: MockBackend,
}

impl Host {
    fn new() -> Self {
        let backend = MockBackend::new();
        let menu = Menu::new(backend.clone(), MockViewport::desktop());
        Self { menu, backend }
    }

    fn with_items(labels: &[&str]) -> Self {
        let mut host = Self::new();
        for label in labels {
            host.menu.add(*label);
        }
        host
    }

    /// Open the menu and let the input turn finish.
    fn open(&mut self) {
        self.menu.show();
        self.menu.tick();
    }

    fn key(&mut self, key: Key) {
        self.backend
            .dispatch(&mut self.menu, Scope::Document, &Event::key_down(key));
    }

    fn click_item(&mut self, slug: &str) {
        let sid = self.menu.get(slug).and_then(MenuItem::surface_id).unwrap();
        let target = Scope::Surface(sid);
        self.backend
            .dispatch(&mut self.menu, target, &Event::pointer_down(Point::ORIGIN));
        self.backend
            .dispatch(&mut self.menu, target, &Event::pointer_up(Point::ORIGIN));
    }

    fn selected_slug(&self) -> Option<String> {
        self.menu.selected_item().map(|i| i.slug().to_string())
    }
}

// =============================================================================
// Slugs
// =============================================================================

#[test]
fn test_slug_examples() {
    assert_eq!(slugify("Add Item!"), "add-item");
    assert_eq!(slugify("  multi   space "), "multi-space");
}

// =============================================================================
// Navigation
// =============================================================================

#[test]
fn test_first_move_seeds_from_edges() {
    let mut host = Host::with_items(&["One", "Two", "Three"]);
    host.menu.move_selection(Direction::Next);
    assert_eq!(host.selected_slug().as_deref(), Some("three"));

    host.menu.deselect();
    host.menu.move_selection(Direction::Prev);
    assert_eq!(host.selected_slug().as_deref(), Some("one"));
}

#[test]
fn test_hidden_items_never_selected() {
    let mut host = Host::with_items(&["One", "Two", "Three", "Four"]);
    host.menu.filter(|item| item.slug() != "two" && item.slug() != "four");

    for _ in 0..8 {
        host.menu.move_selection(Direction::Next);
        let slug = host.selected_slug().unwrap();
        assert!(slug == "one" || slug == "three", "landed on {slug}");
    }
}

proptest! {
    #[test]
    fn prop_n_moves_return_to_start(n in 1usize..20, start in 0usize..20, steps_back in any::<bool>()) {
        let labels: Vec<String> = (0..n).map(|i| format!("Entry {i}")).collect();
        let mut host = Host::new();
        let ids: Vec<_> = labels.iter().map(|l| host.menu.push(l.as_str())).collect();

        let origin = ids[start % n];
        host.menu.select(origin);
        let direction = if steps_back { Direction::Prev } else { Direction::Next };
        for _ in 0..n {
            host.menu.move_selection(direction);
        }
        prop_assert_eq!(host.menu.selected(), Some(origin));
    }

    #[test]
    fn prop_filter_twice_same_partition(mask in prop::collection::vec(any::<bool>(), 1..30)) {
        let mut host = Host::new();
        let ids: Vec<_> = (0..mask.len())
            .map(|i| host.menu.push(format!("Row {i}")))
            .collect();
        let accept = |item: &MenuItem| {
            ids.iter().position(|&id| id == item.id()).is_some_and(|i| mask[i])
        };

        host.menu.filter(accept);
        let first: Vec<bool> = host.menu.items().iter().map(MenuItem::is_hidden).collect();
        host.menu.filter(accept);
        let second: Vec<bool> = host.menu.items().iter().map(MenuItem::is_hidden).collect();
        prop_assert_eq!(first, second);
    }
}

// =============================================================================
// Registry
// =============================================================================

#[test]
fn test_slug_collision_newest_wins() {
    let mut host = Host::new();
    let old = host.menu.push("Hello");
    let new = host.menu.push("Hello");

    assert!(host.menu.item(old).unwrap().is_hidden());
    assert!(!host.menu.item(new).unwrap().is_hidden());
    assert_eq!(host.menu.get("hello").map(MenuItem::id), Some(old));

    host.menu.move_selection(Direction::Prev);
    assert_eq!(host.menu.selected(), Some(new));
}

#[test]
fn test_failed_remove_changes_nothing() {
    let mut host = Host::with_items(&["Alpha", "Beta"]);
    let before: Vec<_> = host.menu.items().iter().map(MenuItem::id).collect();
    let removed = Rc::new(Cell::new(0));
    let count = Rc::clone(&removed);
    host.menu.on(events::REMOVE, move |_| count.set(count.get() + 1));

    let err = host.menu.remove("gamma").unwrap_err();

    assert!(matches!(err, MenuError::NotFound { ref slug } if slug == "gamma"));
    let after: Vec<_> = host.menu.items().iter().map(MenuItem::id).collect();
    assert_eq!(before, after);
    assert_eq!(removed.get(), 0);
}

#[test]
fn test_failed_change_changes_nothing() {
    let mut host = Host::with_items(&["Alpha"]);
    let surfaces = host.backend.surface_count();
    let listeners = host.backend.listener_count();

    assert!(host.menu.change("omega", "Omega").is_err());

    assert_eq!(host.menu.len(), 1);
    assert_eq!(host.backend.surface_count(), surfaces);
    assert_eq!(host.backend.listener_count(), listeners);
}

#[test]
fn test_change_keeps_position_in_navigation() {
    let mut host = Host::with_items(&["Cut", "Copy", "Paste"]);
    host.menu.change("copy", ItemSpec::new("Copy Link")).unwrap();
    assert_eq!(host.selected_slug().as_deref(), Some("copy-link"));

    host.menu.move_selection(Direction::Next);
    assert_eq!(host.selected_slug().as_deref(), Some("paste"));
    host.menu.move_selection(Direction::Prev);
    host.menu.move_selection(Direction::Prev);
    assert_eq!(host.selected_slug().as_deref(), Some("cut"));
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_show_hide_leaves_no_listeners_behind() {
    let mut host = Host::with_items(&["A", "B", "C"]);
    let before = host.backend.listener_count();

    host.menu.show();
    host.menu.hide();
    assert_eq!(host.backend.listener_count(), before);

    for _ in 0..5 {
        host.open();
        host.key(Key::Down);
        host.menu.hide();
    }
    host.menu.tick();
    assert_eq!(host.backend.listener_count(), before);
}

#[test]
fn test_double_show_is_single_show() {
    let mut host = Host::with_items(&["A"]);
    let shows = Rc::new(Cell::new(0));
    let count = Rc::clone(&shows);
    host.menu.on(events::SHOW, move |_| count.set(count.get() + 1));

    host.menu.show();
    let listeners = host.backend.listener_count();
    host.menu.show();

    assert!(host.menu.is_open());
    assert_eq!(shows.get(), 1);
    assert_eq!(host.backend.listener_count(), listeners);
}

#[test]
fn test_opening_release_does_not_close() {
    let mut host = Host::with_items(&["A"]);

    host.menu.show();
    host.backend.dispatch(
        &mut host.menu,
        Scope::Document,
        &Event::pointer_up(Point::new(400.0, 300.0)),
    );
    assert!(host.menu.is_open());

    host.menu.tick();
    host.backend.dispatch(
        &mut host.menu,
        Scope::Document,
        &Event::pointer_up(Point::new(400.0, 300.0)),
    );
    assert!(!host.menu.is_open());
}

// =============================================================================
// Full interaction
// =============================================================================

#[test]
fn test_collision_then_keyboard_confirm() {
    let mut host = Host::new();
    let calls = Rc::new(Cell::new(0));
    let handle = Rc::clone(&calls);
    let selected = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&selected);

    host.menu.add("Hello");
    let second = host
        .menu
        .push(ItemSpec::new("Hello").callback(move || handle.set(handle.get() + 1)));
    host.menu.on(events::SELECT, move |payload| {
        if let Some(item) = payload.item() {
            sink.borrow_mut().push(item.id());
        }
    });

    host.open();
    host.key(Key::Down);
    assert_eq!(host.menu.selected(), Some(second));

    host.key(Key::Enter);
    assert_eq!(calls.get(), 1);
    assert_eq!(*selected.borrow(), vec![second]);
    assert!(!host.menu.is_open());
}

#[test]
fn test_pointer_selection_fires_every_granularity() {
    let mut host = Host::with_items(&["Zoom In", "Zoom Out"]);
    let seen = Rc::new(RefCell::new(Vec::new()));
    for name in [events::SELECT, "zoom-out", "Zoom Out", events::HIDE] {
        let seen = Rc::clone(&seen);
        host.menu.on(name, move |_| seen.borrow_mut().push(name));
    }

    host.open();
    host.click_item("zoom-out");

    assert_eq!(
        *seen.borrow(),
        vec![events::SELECT, "zoom-out", "Zoom Out", events::HIDE]
    );
    assert!(!host.menu.is_selecting());
}

#[test]
fn test_escape_drops_selection() {
    let mut host = Host::with_items(&["A", "B"]);
    host.open();
    host.key(Key::Down);
    host.key(Key::Escape);

    assert_eq!(host.menu.selected(), None);
    assert!(!host.menu.is_open());
}

#[test]
fn test_positioned_then_opened_stays_in_view() {
    let mut host = Host::with_items(&["A", "B"]);
    host.menu.move_to_center(795.0, 5.0);
    host.open();

    let origin = host.menu.position();
    assert!(origin.x + 100.0 <= 800.0);
    assert!(origin.y >= 0.0);
    let node = host.backend.node(host.menu.surface_id()).unwrap();
    assert_eq!(node.position, origin);
    assert!(node.visible);
}
