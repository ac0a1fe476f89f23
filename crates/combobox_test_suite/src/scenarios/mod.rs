//! Scenario suites organized by interaction

pub mod focus;
pub mod keyboard;
pub mod pointer;
pub mod visibility;

use crate::fixtures::{
    categorized_states, entry_accessors, render_entry, state_entries, Entry,
};
use crate::harness::TestHarness;
use crate::runner::TestSuite;
use anyhow::Result;
use combobox_core::ComboboxConfig;

/// Create all scenario suites
pub fn all_suites() -> Vec<TestSuite> {
    vec![
        keyboard::suite(),
        pointer::suite(),
        focus::suite(),
        visibility::suite(),
    ]
}

/// Harness over the 50 states
pub fn states_harness(config: ComboboxConfig) -> Result<TestHarness<Entry>> {
    TestHarness::new(config, entry_accessors(), state_entries(), render_entry)
}

/// Harness over the states grouped by region
pub fn categorized_harness(config: ComboboxConfig) -> Result<TestHarness<Entry>> {
    TestHarness::new(config, entry_accessors(), categorized_states(), render_entry)
}

/// Label of the filtered row at `index`
pub fn label_at(harness: &TestHarness<Entry>, index: usize) -> Option<&'static str> {
    harness
        .combobox()
        .filtered_items()
        .get(index)
        .map(Entry::label)
}
