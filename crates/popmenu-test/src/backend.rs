//! In-memory surface tree with a listener registry and bubbling dispatch.

use popmenu_core::{
    Backend, Event, EventKind, EventSink, ListenerId, Outcome, Point, Scope, Size, Surface,
    SurfaceId,
};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

/// Measured size reported for menu surfaces unless overridden.
pub const DEFAULT_MENU_SIZE: Size = Size::new(100.0, 50.0);

/// Measured size reported for item surfaces.
pub const ITEM_SIZE: Size = Size::new(100.0, 20.0);

/// Copy of one node's state, for assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSnapshot {
    /// Surface identifier
    pub id: SurfaceId,
    /// Containing surface, if attached to one
    pub parent: Option<SurfaceId>,
    /// Child surfaces in document order
    pub children: Vec<SurfaceId>,
    /// Label for item surfaces
    pub text: Option<String>,
    /// Whether the node is shown
    pub visible: bool,
    /// Applied presentation classes
    pub classes: BTreeSet<String>,
    /// Last position set
    pub position: Point,
    /// Measured size without margin
    pub size: Size,
    /// Margin on each side
    pub margin: f32,
}

#[derive(Debug)]
struct Registration {
    id: ListenerId,
    scope: Scope,
    kind: EventKind,
}

#[derive(Debug)]
struct Tree {
    next_surface: u64,
    next_listener: u64,
    nodes: BTreeMap<SurfaceId, NodeSnapshot>,
    listeners: Vec<Registration>,
    focused: Option<SurfaceId>,
    menu_size: Size,
    menu_margin: f32,
    destroyed: usize,
}

impl Tree {
    fn new(menu_size: Size, menu_margin: f32) -> Self {
        Self {
            next_surface: 0,
            next_listener: 0,
            nodes: BTreeMap::new(),
            listeners: Vec::new(),
            focused: None,
            menu_size,
            menu_margin,
            destroyed: 0,
        }
    }

    fn alloc(&mut self, parent: Option<SurfaceId>, text: Option<&str>, size: Size, margin: f32) -> SurfaceId {
        let id = SurfaceId(self.next_surface);
        self.next_surface += 1;

        self.nodes.insert(
            id,
            NodeSnapshot {
                id,
                parent,
                children: Vec::new(),
                text: text.map(str::to_string),
                visible: true,
                classes: BTreeSet::new(),
                position: Point::ORIGIN,
                size,
                margin,
            },
        );

        if let Some(parent_id) = parent {
            if let Some(node) = self.nodes.get_mut(&parent_id) {
                node.children.push(id);
            }
        }

        id
    }

    fn detach(&mut self, id: SurfaceId) {
        let parent = self.nodes.get(&id).and_then(|n| n.parent);
        if let Some(parent_id) = parent {
            if let Some(node) = self.nodes.get_mut(&parent_id) {
                node.children.retain(|&c| c != id);
            }
        }
    }
}

/// Shared-handle backend. Clones observe and mutate the same tree, so a test
/// can keep one clone for probing while the menu owns another.
#[derive(Debug, Clone)]
pub struct MockBackend {
    tree: Rc<RefCell<Tree>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a backend reporting [`DEFAULT_MENU_SIZE`] for menus.
    pub fn new() -> Self {
        Self::with_menu_size(DEFAULT_MENU_SIZE, 0.0)
    }

    /// Create a backend whose menu surfaces measure `size` plus `margin`.
    pub fn with_menu_size(size: Size, margin: f32) -> Self {
        Self {
            tree: Rc::new(RefCell::new(Tree::new(size, margin))),
        }
    }

    /// Number of active listener registrations.
    pub fn listener_count(&self) -> usize {
        self.tree.borrow().listeners.len()
    }

    /// Number of active registrations attached at `scope`.
    pub fn listener_count_at(&self, scope: Scope) -> usize {
        self.tree
            .borrow()
            .listeners
            .iter()
            .filter(|r| r.scope == scope)
            .count()
    }

    /// Number of active registrations at `scope` for `kind`.
    pub fn listener_count_for(&self, scope: Scope, kind: EventKind) -> usize {
        self.tree
            .borrow()
            .listeners
            .iter()
            .filter(|r| r.scope == scope && r.kind == kind)
            .count()
    }

    /// Whether `id` is still registered.
    pub fn is_listening(&self, id: ListenerId) -> bool {
        self.tree.borrow().listeners.iter().any(|r| r.id == id)
    }

    /// Snapshot of a live node.
    pub fn node(&self, id: SurfaceId) -> Option<NodeSnapshot> {
        self.tree.borrow().nodes.get(&id).cloned()
    }

    /// Whether a surface exists (has not been destroyed).
    pub fn is_alive(&self, id: SurfaceId) -> bool {
        self.tree.borrow().nodes.contains_key(&id)
    }

    /// Children of `parent` in document order.
    pub fn children(&self, parent: SurfaceId) -> Vec<SurfaceId> {
        self.tree
            .borrow()
            .nodes
            .get(&parent)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Labels of the children of `parent` in document order.
    pub fn child_texts(&self, parent: SurfaceId) -> Vec<String> {
        let tree = self.tree.borrow();
        tree.nodes
            .get(&parent)
            .map(|n| {
                n.children
                    .iter()
                    .filter_map(|c| tree.nodes.get(c).and_then(|child| child.text.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Surface currently holding focus.
    pub fn focused(&self) -> Option<SurfaceId> {
        self.tree.borrow().focused
    }

    /// Number of live surfaces.
    pub fn surface_count(&self) -> usize {
        self.tree.borrow().nodes.len()
    }

    /// Number of surfaces destroyed so far.
    pub fn destroyed_count(&self) -> usize {
        self.tree.borrow().destroyed
    }

    /// Override the measured size of a surface.
    pub fn set_size(&self, id: SurfaceId, size: Size, margin: f32) {
        if let Some(node) = self.tree.borrow_mut().nodes.get_mut(&id) {
            node.size = size;
            node.margin = margin;
        }
    }

    /// Registrations an event of `kind` aimed at `target` reaches, in
    /// bubbling order: the target, its ancestors, then the document.
    pub fn route(&self, target: Scope, kind: EventKind) -> Vec<ListenerId> {
        let tree = self.tree.borrow();

        let mut path = Vec::new();
        if let Scope::Surface(start) = target {
            let mut current = Some(start);
            while let Some(id) = current {
                match tree.nodes.get(&id) {
                    Some(node) => {
                        path.push(Scope::Surface(id));
                        current = node.parent;
                    }
                    None => break,
                }
            }
        }
        path.push(Scope::Document);

        let mut route = Vec::new();
        for scope in path {
            route.extend(
                tree.listeners
                    .iter()
                    .filter(|r| r.scope == scope && r.kind == kind)
                    .map(|r| r.id),
            );
        }
        route
    }

    /// Deliver `event` to `sink` along the bubbling path.
    ///
    /// Registrations removed by an earlier handler in the same dispatch are
    /// skipped. Delivery stops when a handler stops propagation.
    pub fn dispatch(&self, sink: &mut impl EventSink, target: Scope, event: &Event) -> Outcome {
        let mut total = Outcome::IGNORED;

        for id in self.route(target, event.kind()) {
            if !self.is_listening(id) {
                continue;
            }
            log::trace!("dispatch {:?} via {:?}", event.kind(), id);
            let outcome = sink.handle_event(id, event);
            total = total.merge(outcome);
            if outcome.stop_propagation {
                break;
            }
        }

        total
    }
}

impl Backend for MockBackend {
    fn create_menu_surface(&mut self) -> Box<dyn Surface> {
        let mut tree = self.tree.borrow_mut();
        let (size, margin) = (tree.menu_size, tree.menu_margin);
        let id = tree.alloc(None, None, size, margin);
        Box::new(MockSurface {
            id,
            tree: Rc::clone(&self.tree),
        })
    }

    fn create_item_surface(&mut self, parent: SurfaceId, text: &str) -> Box<dyn Surface> {
        let id = self
            .tree
            .borrow_mut()
            .alloc(Some(parent), Some(text), ITEM_SIZE, 0.0);
        Box::new(MockSurface {
            id,
            tree: Rc::clone(&self.tree),
        })
    }

    fn insert_before(&mut self, node: SurfaceId, sibling: SurfaceId) {
        let mut tree = self.tree.borrow_mut();
        let Some(parent_id) = tree.nodes.get(&sibling).and_then(|n| n.parent) else {
            return;
        };

        tree.detach(node);
        if let Some(parent) = tree.nodes.get_mut(&parent_id) {
            let at = parent
                .children
                .iter()
                .position(|&c| c == sibling)
                .unwrap_or(parent.children.len());
            parent.children.insert(at, node);
        }
        if let Some(moved) = tree.nodes.get_mut(&node) {
            moved.parent = Some(parent_id);
        }
    }

    fn listen(&mut self, scope: Scope, kind: EventKind) -> ListenerId {
        let mut tree = self.tree.borrow_mut();
        let id = ListenerId(tree.next_listener);
        tree.next_listener += 1;
        tree.listeners.push(Registration { id, scope, kind });
        id
    }

    fn unlisten(&mut self, id: ListenerId) -> bool {
        let mut tree = self.tree.borrow_mut();
        let before = tree.listeners.len();
        tree.listeners.retain(|r| r.id != id);
        tree.listeners.len() != before
    }
}

/// Handle to one node of a [`MockBackend`] tree.
#[derive(Debug)]
pub struct MockSurface {
    id: SurfaceId,
    tree: Rc<RefCell<Tree>>,
}

impl MockSurface {
    fn with_node<R>(&self, f: impl FnOnce(&NodeSnapshot) -> R) -> Option<R> {
        self.tree.borrow().nodes.get(&self.id).map(f)
    }

    fn with_node_mut(&self, f: impl FnOnce(&mut NodeSnapshot)) {
        if let Some(node) = self.tree.borrow_mut().nodes.get_mut(&self.id) {
            f(node);
        }
    }
}

impl Surface for MockSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn set_visible(&mut self, visible: bool) {
        self.with_node_mut(|n| n.visible = visible);
    }

    fn is_visible(&self) -> bool {
        self.with_node(|n| n.visible).unwrap_or(false)
    }

    fn set_class(&mut self, class: &str, enabled: bool) {
        self.with_node_mut(|n| {
            if enabled {
                n.classes.insert(class.to_string());
            } else {
                n.classes.remove(class);
            }
        });
    }

    fn has_class(&self, class: &str) -> bool {
        self.with_node(|n| n.classes.contains(class))
            .unwrap_or(false)
    }

    fn outer_size(&self, include_margin: bool) -> Size {
        self.with_node(|n| {
            if include_margin {
                n.size.expand(n.margin)
            } else {
                n.size
            }
        })
        .unwrap_or(Size::ZERO)
    }

    fn set_position(&mut self, origin: Point) {
        self.with_node_mut(|n| n.position = origin);
    }

    fn focus(&mut self) {
        self.tree.borrow_mut().focused = Some(self.id);
    }

    fn destroy(self: Box<Self>) {
        let mut tree = self.tree.borrow_mut();
        tree.detach(self.id);
        if tree.nodes.remove(&self.id).is_some() {
            tree.destroyed += 1;
        }
        if tree.focused == Some(self.id) {
            tree.focused = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Counter {
        seen: Vec<ListenerId>,
        stop_at: Option<ListenerId>,
    }

    impl EventSink for Counter {
        fn handle_event(&mut self, listener: ListenerId, _event: &Event) -> Outcome {
            self.seen.push(listener);
            if Some(listener) == self.stop_at {
                Outcome::CONSUMED
            } else {
                Outcome::HANDLED
            }
        }
    }

    #[test]
    fn test_item_surfaces_append_in_order() {
        let mut backend = MockBackend::new();
        let menu = backend.create_menu_surface();
        let a = backend.create_item_surface(menu.id(), "A");
        let b = backend.create_item_surface(menu.id(), "B");
        assert_eq!(backend.children(menu.id()), vec![a.id(), b.id()]);
        assert_eq!(backend.child_texts(menu.id()), vec!["A", "B"]);
    }

    #[test]
    fn test_insert_before_moves_node() {
        let mut backend = MockBackend::new();
        let menu = backend.create_menu_surface();
        let a = backend.create_item_surface(menu.id(), "A");
        let b = backend.create_item_surface(menu.id(), "B");
        let c = backend.create_item_surface(menu.id(), "C");
        backend.insert_before(c.id(), a.id());
        assert_eq!(backend.children(menu.id()), vec![c.id(), a.id(), b.id()]);
    }

    #[test]
    fn test_destroy_detaches_and_clears_focus() {
        let mut backend = MockBackend::new();
        let menu = backend.create_menu_surface();
        let mut a = backend.create_item_surface(menu.id(), "A");
        let id = a.id();
        a.focus();
        assert_eq!(backend.focused(), Some(id));
        a.destroy();
        assert!(!backend.is_alive(id));
        assert!(backend.children(menu.id()).is_empty());
        assert_eq!(backend.focused(), None);
        assert_eq!(backend.destroyed_count(), 1);
    }

    #[test]
    fn test_outer_size_margin() {
        let mut backend = MockBackend::with_menu_size(Size::new(100.0, 50.0), 5.0);
        let menu = backend.create_menu_surface();
        assert_eq!(menu.outer_size(false), Size::new(100.0, 50.0));
        assert_eq!(menu.outer_size(true), Size::new(110.0, 60.0));
    }

    #[test]
    fn test_classes_and_visibility() {
        let mut backend = MockBackend::new();
        let mut menu = backend.create_menu_surface();
        menu.set_class("menu", true);
        menu.set_visible(false);
        assert!(menu.has_class("menu"));
        assert!(!menu.is_visible());
        menu.set_class("menu", false);
        assert!(!menu.has_class("menu"));
    }

    #[test]
    fn test_listen_unlisten() {
        let mut backend = MockBackend::new();
        let id = backend.listen(Scope::Document, EventKind::KeyDown);
        assert_eq!(backend.listener_count(), 1);
        assert!(backend.is_listening(id));
        assert!(backend.unlisten(id));
        assert!(!backend.unlisten(id));
        assert_eq!(backend.listener_count(), 0);
    }

    #[test]
    fn test_route_bubbles_target_then_ancestors_then_document() {
        let mut backend = MockBackend::new();
        let menu = backend.create_menu_surface();
        let item = backend.create_item_surface(menu.id(), "A");

        let doc = backend.listen(Scope::Document, EventKind::PointerUp);
        let on_menu = backend.listen(Scope::Surface(menu.id()), EventKind::PointerUp);
        let on_item = backend.listen(Scope::Surface(item.id()), EventKind::PointerUp);
        let _other_kind = backend.listen(Scope::Surface(item.id()), EventKind::PointerDown);

        let route = backend.route(Scope::Surface(item.id()), EventKind::PointerUp);
        assert_eq!(route, vec![on_item, on_menu, doc]);

        let outside = backend.route(Scope::Document, EventKind::PointerUp);
        assert_eq!(outside, vec![doc]);
    }

    #[test]
    fn test_dispatch_stops_propagation() {
        let mut backend = MockBackend::new();
        let menu = backend.create_menu_surface();
        let item = backend.create_item_surface(menu.id(), "A");
        let doc = backend.listen(Scope::Document, EventKind::PointerUp);
        let on_item = backend.listen(Scope::Surface(item.id()), EventKind::PointerUp);

        let mut sink = Counter {
            seen: Vec::new(),
            stop_at: Some(on_item),
        };
        let outcome = backend.dispatch(
            &mut sink,
            Scope::Surface(item.id()),
            &Event::pointer_up(Point::ORIGIN),
        );
        assert_eq!(sink.seen, vec![on_item]);
        assert!(outcome.stop_propagation);

        sink.stop_at = None;
        sink.seen.clear();
        backend.dispatch(
            &mut sink,
            Scope::Surface(item.id()),
            &Event::pointer_up(Point::ORIGIN),
        );
        assert_eq!(sink.seen, vec![on_item, doc]);
    }

    proptest! {
        #[test]
        fn prop_insert_before_permutes_children(
            n in 2usize..10,
            moves in prop::collection::vec((0usize..10, 0usize..10), 0..20),
        ) {
            let mut backend = MockBackend::new();
            let menu = backend.create_menu_surface();
            let items: Vec<SurfaceId> = (0..n)
                .map(|i| backend.create_item_surface(menu.id(), &i.to_string()).id())
                .collect();

            for (node, sibling) in moves {
                let (node, sibling) = (items[node % n], items[sibling % n]);
                if node != sibling {
                    backend.insert_before(node, sibling);
                }
            }

            let mut children = backend.children(menu.id());
            children.sort();
            prop_assert_eq!(children, items);
        }
    }
}
