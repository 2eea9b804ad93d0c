//! Menu items and the spec used to create them.

use popmenu_core::{slugify, ListenerId, Surface, SurfaceId};
use serde_json::Value;
use std::fmt;

/// Action invoked when an item's selection is confirmed.
pub type Callback = Box<dyn FnMut()>;

/// Stable handle of an item within one menu.
///
/// Handles are never reused, so a handle kept after its item was removed or
/// replaced simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub(crate) u64);

impl ItemId {
    /// Raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Everything needed to add an item.
///
/// ```
/// use popmenu::ItemSpec;
///
/// let spec = ItemSpec::new("Open Recent…")
///     .slug("recent")
///     .meta(serde_json::json!({ "count": 4 }))
///     .callback(|| println!("open recent"));
/// assert_eq!(spec.resolved_slug(), "recent");
/// ```
pub struct ItemSpec {
    pub(crate) text: String,
    pub(crate) slug: Option<String>,
    pub(crate) meta: Option<Value>,
    pub(crate) callback: Option<Callback>,
}

impl ItemSpec {
    /// Spec for an item labelled `text`, slug derived from the label.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            slug: None,
            meta: None,
            callback: None,
        }
    }

    /// Use an explicit slug instead of deriving one from the label. The
    /// value is normalized like any other slug.
    #[must_use]
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Attach an opaque payload carried through to event subscribers.
    #[must_use]
    pub fn meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Action to run when the item is confirmed.
    #[must_use]
    pub fn callback(mut self, callback: impl FnMut() + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Label text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The slug the item will be registered under.
    #[must_use]
    pub fn resolved_slug(&self) -> String {
        slugify(self.slug.as_deref().unwrap_or(&self.text))
    }
}

impl fmt::Debug for ItemSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemSpec")
            .field("text", &self.text)
            .field("slug", &self.slug)
            .field("meta", &self.meta)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl From<&str> for ItemSpec {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for ItemSpec {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// A selectable entry owned by a [`Menu`](crate::Menu).
///
/// The slug never changes after creation. Label, payload and callback only
/// change by replacing the whole item through
/// [`Menu::change`](crate::Menu::change).
pub struct MenuItem {
    id: ItemId,
    slug: String,
    text: String,
    meta: Option<Value>,
    pub(crate) callback: Option<Callback>,
    hidden: bool,
    surface: Option<Box<dyn Surface>>,
    pub(crate) listeners: Vec<ListenerId>,
}

impl MenuItem {
    pub(crate) fn new(id: ItemId, spec: ItemSpec, surface: Box<dyn Surface>) -> Self {
        let slug = spec.resolved_slug();
        Self {
            id,
            slug,
            text: spec.text,
            meta: spec.meta,
            callback: spec.callback,
            hidden: false,
            surface: Some(surface),
            listeners: Vec::new(),
        }
    }

    /// Handle of this item.
    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    /// Normalized identifier.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Display label.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Opaque payload, if any.
    #[must_use]
    pub const fn meta(&self) -> Option<&Value> {
        self.meta.as_ref()
    }

    /// Whether a confirm action is attached.
    #[must_use]
    pub const fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Hidden items are skipped by keyboard navigation.
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Rendered surface, while the item is alive.
    #[must_use]
    pub fn surface_id(&self) -> Option<SurfaceId> {
        self.surface.as_ref().map(|s| s.id())
    }

    pub(crate) fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
        if let Some(surface) = self.surface.as_mut() {
            surface.set_visible(!hidden);
        }
    }

    pub(crate) fn set_class(&mut self, class: &str, enabled: bool) {
        if let Some(surface) = self.surface.as_mut() {
            surface.set_class(class, enabled);
        }
    }

    pub(crate) fn focus(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.focus();
        }
    }

    /// Release the surface. Safe to call more than once.
    pub(crate) fn destroy_surface(&mut self) {
        if let Some(surface) = self.surface.take() {
            surface.destroy();
        }
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("id", &self.id)
            .field("slug", &self.slug)
            .field("text", &self.text)
            .field("meta", &self.meta)
            .field("callback", &self.callback.is_some())
            .field("hidden", &self.hidden)
            .field("surface", &self.surface_id())
            .finish_non_exhaustive()
    }
}
