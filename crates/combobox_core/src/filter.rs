//! Filter/sort pipeline with a single-entry cache
//!
//! The visible item set is a function of `(items, value)`. Within one render
//! cycle it is asked for many times (navigation, auto-highlight, rendering),
//! so the most recent result is kept and reused while the pair is unchanged.

use crate::accessors::ItemAccessors;
use std::sync::Arc;

/// Indices of the items that survive filtering for `value`, in display order
///
/// Survivors keep their relative order unless a comparator is supplied, in
/// which case they are stably sorted.
pub fn filter_items<T>(items: &[T], value: &str, accessors: &ItemAccessors<T>) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..items.len())
        .filter(|&i| accessors.renders(&items[i], value))
        .collect();

    if accessors.has_sort() {
        // `sort_by` is stable
        indices.sort_by(|&a, &b| accessors.compare(&items[a], &items[b], value));
    }

    indices
}

/// The visible items for one `(items, value)` pair
///
/// Cheap to clone: both the source items and the index list are shared.
pub struct FilteredItems<T> {
    items: Arc<[T]>,
    indices: Arc<[usize]>,
}

impl<T> Clone for FilteredItems<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            indices: Arc::clone(&self.indices),
        }
    }
}

impl<T> FilteredItems<T> {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Item at a filtered position
    pub fn get(&self, index: usize) -> Option<&T> {
        self.indices.get(index).map(|&source| &self.items[source])
    }

    /// Position of a filtered item within the unfiltered items
    pub fn source_index(&self, index: usize) -> Option<usize> {
        self.indices.get(index).copied()
    }

    /// Iterate visible items in display order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.indices.iter().map(move |&source| &self.items[source])
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for FilteredItems<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

struct CacheEntry<T> {
    last_items: Arc<[T]>,
    last_value: String,
    last_result: Arc<[usize]>,
}

/// Memoizes the most recent filter result
///
/// Items are compared by identity (the shared slice pointer), the value by
/// string equality. Replacing the items with a new `Arc` always recomputes,
/// even if the contents are equal.
pub struct FilterCache<T> {
    entry: Option<CacheEntry<T>>,
    hits: u64,
    misses: u64,
}

impl<T> Default for FilterCache<T> {
    fn default() -> Self {
        Self {
            entry: None,
            hits: 0,
            misses: 0,
        }
    }
}

impl<T> FilterCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible items for `(items, value)`, reusing the cached result when
    /// the pair matches the last one seen
    pub fn get(
        &mut self,
        items: &Arc<[T]>,
        value: &str,
        accessors: &ItemAccessors<T>,
    ) -> FilteredItems<T> {
        if let Some(entry) = &self.entry {
            if Arc::ptr_eq(&entry.last_items, items) && entry.last_value == value {
                self.hits += 1;
                tracing::trace!("filter cache hit for {:?}", value);
                return FilteredItems {
                    items: Arc::clone(items),
                    indices: Arc::clone(&entry.last_result),
                };
            }
        }

        self.misses += 1;
        let result: Arc<[usize]> = filter_items(items, value, accessors).into();
        tracing::trace!(
            "filter cache miss for {:?}: {} of {} items visible",
            value,
            result.len(),
            items.len()
        );
        self.entry = Some(CacheEntry {
            last_items: Arc::clone(items),
            last_value: value.to_string(),
            last_result: Arc::clone(&result),
        });

        FilteredItems {
            items: Arc::clone(items),
            indices: result,
        }
    }

    /// Drop the cached entry
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
