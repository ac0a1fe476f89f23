//! Caller-supplied item accessors
//!
//! The engine treats items as opaque. Everything it needs to know about an
//! item goes through these functions.

use std::cmp::Ordering;
use std::fmt;

type ValueFn<T> = Box<dyn Fn(&T) -> String + Send>;
type RenderFn<T> = Box<dyn Fn(&T, &str) -> bool + Send>;
type SortFn<T> = Box<dyn Fn(&T, &T, &str) -> Ordering + Send>;
type SelectableFn<T> = Box<dyn Fn(&T) -> bool + Send>;

/// Functions that give the engine a view into caller items
///
/// # Example
///
/// ```ignore
/// let accessors = ItemAccessors::new(|fruit: &Fruit| fruit.name.clone())
///     .should_item_render(|fruit, value| fruit.name.contains(value))
///     .is_item_selectable(|fruit| !fruit.is_header);
/// ```
pub struct ItemAccessors<T> {
    get_item_value: ValueFn<T>,
    should_item_render: Option<RenderFn<T>>,
    sort_items: Option<SortFn<T>>,
    is_item_selectable: Option<SelectableFn<T>>,
}

impl<T> ItemAccessors<T> {
    /// Create accessors with the required display-value function
    pub fn new<F>(get_item_value: F) -> Self
    where
        F: Fn(&T) -> String + Send + 'static,
    {
        Self {
            get_item_value: Box::new(get_item_value),
            should_item_render: None,
            sort_items: None,
            is_item_selectable: None,
        }
    }

    /// Keep only items for which `predicate(item, value)` holds
    pub fn should_item_render<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T, &str) -> bool + Send + 'static,
    {
        self.should_item_render = Some(Box::new(predicate));
        self
    }

    /// Stably sort the visible items with `comparator(a, b, value)`
    pub fn sort_items<F>(mut self, comparator: F) -> Self
    where
        F: Fn(&T, &T, &str) -> Ordering + Send + 'static,
    {
        self.sort_items = Some(Box::new(comparator));
        self
    }

    /// Mark items that navigation and selection may land on
    pub fn is_item_selectable<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + 'static,
    {
        self.is_item_selectable = Some(Box::new(predicate));
        self
    }

    /// Display value of `item`
    pub fn item_value(&self, item: &T) -> String {
        (self.get_item_value)(item)
    }

    /// Whether `item` survives filtering for `value`
    pub fn renders(&self, item: &T, value: &str) -> bool {
        self.should_item_render
            .as_ref()
            .map_or(true, |predicate| predicate(item, value))
    }

    /// Order two items for `value`. Without a comparator every pair is equal.
    pub fn compare(&self, a: &T, b: &T, value: &str) -> Ordering {
        self.sort_items
            .as_ref()
            .map_or(Ordering::Equal, |comparator| comparator(a, b, value))
    }

    /// Whether `item` can be highlighted and selected
    pub fn is_selectable(&self, item: &T) -> bool {
        self.is_item_selectable
            .as_ref()
            .map_or(true, |predicate| predicate(item))
    }

    pub fn has_filter(&self) -> bool {
        self.should_item_render.is_some()
    }

    pub fn has_sort(&self) -> bool {
        self.sort_items.is_some()
    }
}

impl<T> fmt::Debug for ItemAccessors<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemAccessors")
            .field("should_item_render", &self.should_item_render.is_some())
            .field("sort_items", &self.sort_items.is_some())
            .field("is_item_selectable", &self.is_item_selectable.is_some())
            .finish()
    }
}
