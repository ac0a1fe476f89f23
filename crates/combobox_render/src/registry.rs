//! Element reference table
//!
//! Effects such as "focus the input" or "scroll item 3 into view" act on
//! real elements. The registry maps each combobox element to its DOM id and,
//! once the host has mounted it, an opaque platform handle.
//!
//! Menu and item entries are rebuilt on every render; the input entry
//! survives until the combobox is unmounted.

use indexmap::IndexMap;

/// Imperative operations on a mounted element
///
/// Every method defaults to a no-op so hosts only implement what their
/// platform supports.
pub trait ElementHandle {
    fn focus(&self) {}

    fn blur(&self) {}

    fn click(&self) {}

    /// Select all text (inputs only)
    fn select(&self) {}

    /// Set the selection range in characters (inputs only)
    fn set_selection_range(&self, _start: usize, _end: usize) {}

    /// Replace a range of text (inputs only)
    fn set_range_text(&self, _replacement: &str, _start: usize, _end: usize) {}

    /// Run constraint validation (inputs only)
    fn check_validity(&self) -> bool {
        true
    }

    /// Set a custom validation message (inputs only)
    fn set_custom_validity(&self, _message: &str) {}

    /// Scroll this element into view within `container`, only if needed
    fn scroll_into_view(&self, _container: &Self)
    where
        Self: Sized,
    {
    }
}

/// Stable key of a combobox element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKey {
    Input,
    Menu,
    /// Row at a filtered position
    Item(usize),
}

impl ElementKey {
    /// Render key (`"input"`, `"menu"`, `"item-3"`)
    pub fn render_key(&self) -> String {
        match self {
            ElementKey::Input => "input".to_string(),
            ElementKey::Menu => "menu".to_string(),
            ElementKey::Item(index) => format!("item-{}", index),
        }
    }
}

/// A registered element
#[derive(Clone, Debug, PartialEq)]
pub struct ElementEntry<H> {
    /// DOM id, if the element has one
    pub dom_id: Option<String>,
    /// Platform handle, once mounted
    pub handle: Option<H>,
}

/// Registry mapping combobox elements to DOM ids and platform handles
#[derive(Clone, Debug)]
pub struct ElementRegistry<H> {
    entries: IndexMap<ElementKey, ElementEntry<H>>,
}

impl<H> Default for ElementRegistry<H> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<H> ElementRegistry<H> {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element
    ///
    /// Re-registering during the same render replaces the entry (last wins)
    /// and keeps any attached handle.
    pub fn register(&mut self, key: ElementKey, dom_id: Option<String>) {
        match self.entries.get_mut(&key) {
            Some(entry) => {
                tracing::warn!("Duplicate element registered: {:?}", key);
                entry.dom_id = dom_id;
            }
            None => {
                self.entries.insert(
                    key,
                    ElementEntry {
                        dom_id,
                        handle: None,
                    },
                );
            }
        }
    }

    /// Attach the mounted platform handle for `key`
    ///
    /// Returns `false` if `key` was not rendered.
    pub fn attach(&mut self, key: ElementKey, handle: H) -> bool {
        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.handle = Some(handle);
                true
            }
            None => {
                tracing::debug!("Handle attached to unrendered element {:?}", key);
                false
            }
        }
    }

    /// Look up an entry
    pub fn get(&self, key: ElementKey) -> Option<&ElementEntry<H>> {
        self.entries.get(&key)
    }

    /// Look up a mounted handle
    pub fn handle(&self, key: ElementKey) -> Option<&H> {
        self.entries.get(&key)?.handle.as_ref()
    }

    /// Look up a DOM id
    pub fn dom_id(&self, key: ElementKey) -> Option<&str> {
        self.entries.get(&key)?.dom_id.as_deref()
    }

    /// Check if an element is registered
    pub fn contains(&self, key: ElementKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Number of registered elements
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered keys in registration order
    pub fn keys(&self) -> impl Iterator<Item = ElementKey> + '_ {
        self.entries.keys().copied()
    }

    /// Drop menu and item entries ahead of a new render
    pub fn begin_render(&mut self) {
        self.entries.retain(|key, _| *key == ElementKey::Input);
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
