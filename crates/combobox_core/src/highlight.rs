//! Highlight navigation
//!
//! Navigation only ever lands on selectable candidates, so non-selectable
//! rows such as group headers can sit inline with normal rows.

/// The rows navigation runs over
pub trait Candidates {
    /// Number of visible rows
    fn len(&self) -> usize;

    /// Whether the row at `index` may be highlighted
    fn is_selectable(&self, index: usize) -> bool;

    /// Display value of the row at `index`
    fn display_value(&self, index: usize) -> String;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Tracks the highlighted row
///
/// Invariant: the index is `None` or within the candidate list it was last
/// checked against. Callers re-check with [`HighlightNavigator::guard_range`]
/// whenever the list changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HighlightNavigator {
    highlighted: Option<usize>,
}

impl HighlightNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn clear(&mut self) {
        self.highlighted = None;
    }

    /// Highlight `index` if it names a selectable row
    pub fn set(&mut self, candidates: &impl Candidates, index: usize) -> bool {
        if index < candidates.len() && candidates.is_selectable(index) {
            self.highlighted = Some(index);
            true
        } else {
            false
        }
    }

    /// Move to the next selectable row, wrapping at the end
    ///
    /// Returns the new index, or `None` if no row is selectable (in which
    /// case nothing changes).
    pub fn move_next(&mut self, candidates: &impl Candidates) -> Option<usize> {
        let len = candidates.len();
        if len == 0 {
            return None;
        }
        // Scanning from just after the current row; none means "before 0"
        let start = self.highlighted.map_or(0, |current| (current + 1) % len);
        let found = (0..len)
            .map(|offset| (start + offset) % len)
            .find(|&index| candidates.is_selectable(index))?;
        self.highlighted = Some(found);
        Some(found)
    }

    /// Move to the previous selectable row, wrapping at the start
    pub fn move_prev(&mut self, candidates: &impl Candidates) -> Option<usize> {
        let len = candidates.len();
        if len == 0 {
            return None;
        }
        let anchor = self.highlighted.unwrap_or(len);
        let found = (1..=len)
            .map(|offset| (anchor + len - offset) % len)
            .find(|&index| candidates.is_selectable(index))?;
        self.highlighted = Some(found);
        Some(found)
    }

    /// Propose the first selectable row whose display value starts with
    /// `value`, ignoring case
    ///
    /// The scan starts at the current highlight (or the first row) and
    /// wraps, so a highlight that still matches is kept. An empty value or
    /// no match clears the highlight.
    pub fn auto_highlight(&mut self, candidates: &impl Candidates, value: &str) -> Option<usize> {
        let len = candidates.len();
        if value.is_empty() || len == 0 {
            self.highlighted = None;
            return None;
        }

        let needle = value.to_lowercase();
        let start = self.highlighted.filter(|&i| i < len).unwrap_or(0);
        self.highlighted = (0..len).map(|offset| (start + offset) % len).find(|&index| {
            candidates.is_selectable(index)
                && candidates
                    .display_value(index)
                    .to_lowercase()
                    .starts_with(&needle)
        });
        self.highlighted
    }

    /// Reset the highlight if it no longer fits in `len` rows
    ///
    /// Returns `true` if the highlight was reset.
    pub fn guard_range(&mut self, len: usize) -> bool {
        match self.highlighted {
            Some(index) if index >= len => {
                tracing::debug!("highlight {} out of range for {} items, reset", index, len);
                self.highlighted = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rows as `(display value, selectable)`
    struct Rows(Vec<(&'static str, bool)>);

    impl Candidates for Rows {
        fn len(&self) -> usize {
            self.0.len()
        }

        fn is_selectable(&self, index: usize) -> bool {
            self.0[index].1
        }

        fn display_value(&self, index: usize) -> String {
            self.0[index].0.to_string()
        }
    }

    fn all_selectable(names: &[&'static str]) -> Rows {
        Rows(names.iter().map(|&name| (name, true)).collect())
    }

    #[test]
    fn test_move_next_cycles() {
        let rows = all_selectable(&["a", "b", "c"]);
        let mut nav = HighlightNavigator::new();
        let seen: Vec<_> = (0..7).filter_map(|_| nav.move_next(&rows)).collect();
        assert_eq!(seen, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_move_prev_cycles() {
        let rows = all_selectable(&["a", "b", "c"]);
        let mut nav = HighlightNavigator::new();
        let seen: Vec<_> = (0..4).filter_map(|_| nav.move_prev(&rows)).collect();
        assert_eq!(seen, vec![2, 1, 0, 2]);
    }

    #[test]
    fn test_navigation_skips_unselectable() {
        let rows = Rows(vec![("West", false), ("Nevada", true), ("East", false), ("Maine", true)]);
        let mut nav = HighlightNavigator::new();
        assert_eq!(nav.move_next(&rows), Some(1));
        assert_eq!(nav.move_next(&rows), Some(3));
        assert_eq!(nav.move_next(&rows), Some(1));
        assert_eq!(nav.move_prev(&rows), Some(3));
    }

    #[test]
    fn test_navigation_without_selectable_rows() {
        let rows = Rows(vec![("West", false), ("East", false)]);
        let mut nav = HighlightNavigator::new();
        assert_eq!(nav.move_next(&rows), None);
        assert_eq!(nav.move_prev(&rows), None);
        assert_eq!(nav.highlighted(), None);

        assert_eq!(nav.move_next(&all_selectable(&[])), None);
    }

    #[test]
    fn test_single_selectable_row_stays_put() {
        let rows = Rows(vec![("Only", true), ("Header", false)]);
        let mut nav = HighlightNavigator::new();
        assert_eq!(nav.move_next(&rows), Some(0));
        assert_eq!(nav.move_next(&rows), Some(0));
        assert_eq!(nav.move_prev(&rows), Some(0));
    }

    #[test]
    fn test_auto_highlight_prefix() {
        let rows = all_selectable(&["Alabama", "Arizona", "Arkansas"]);
        let mut nav = HighlightNavigator::new();
        assert_eq!(nav.auto_highlight(&rows, "ar"), Some(1));
        assert_eq!(nav.auto_highlight(&rows, "Ark"), Some(2));
        assert_eq!(nav.auto_highlight(&rows, "x"), None);
    }

    #[test]
    fn test_auto_highlight_keeps_matching_highlight() {
        let rows = all_selectable(&["Arizona", "Arkansas"]);
        let mut nav = HighlightNavigator::new();
        nav.set(&rows, 1);
        assert_eq!(nav.auto_highlight(&rows, "ar"), Some(1));
    }

    #[test]
    fn test_auto_highlight_empty_value_clears() {
        let rows = all_selectable(&["Arizona"]);
        let mut nav = HighlightNavigator::new();
        nav.set(&rows, 0);
        assert_eq!(nav.auto_highlight(&rows, ""), None);
        assert_eq!(nav.highlighted(), None);
    }

    #[test]
    fn test_auto_highlight_skips_headers() {
        let rows = Rows(vec![("Ne header", false), ("Nevada", true)]);
        let mut nav = HighlightNavigator::new();
        assert_eq!(nav.auto_highlight(&rows, "ne"), Some(1));
    }

    #[test]
    fn test_guard_range() {
        let rows = all_selectable(&["a", "b", "c"]);
        let mut nav = HighlightNavigator::new();
        nav.set(&rows, 2);
        assert!(!nav.guard_range(3));
        assert!(nav.guard_range(2));
        assert_eq!(nav.highlighted(), None);
    }

    #[test]
    fn test_set_rejects_unselectable_and_out_of_range() {
        let rows = Rows(vec![("Header", false), ("Item", true)]);
        let mut nav = HighlightNavigator::new();
        assert!(!nav.set(&rows, 0));
        assert!(!nav.set(&rows, 5));
        assert!(nav.set(&rows, 1));
        assert_eq!(nav.highlighted(), Some(1));
    }
}
