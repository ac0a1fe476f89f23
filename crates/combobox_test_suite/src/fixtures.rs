//! US state fixtures
//!
//! The plain list holds the 50 states in alphabetical order. The
//! categorized list groups them by region under non-selectable headers.

use combobox_core::ItemAccessors;
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;

/// A US state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct State {
    pub name: &'static str,
    pub abbr: &'static str,
}

const fn state(abbr: &'static str, name: &'static str) -> State {
    State { name, abbr }
}

pub const STATES: [State; 50] = [
    state("AL", "Alabama"),
    state("AK", "Alaska"),
    state("AZ", "Arizona"),
    state("AR", "Arkansas"),
    state("CA", "California"),
    state("CO", "Colorado"),
    state("CT", "Connecticut"),
    state("DE", "Delaware"),
    state("FL", "Florida"),
    state("GA", "Georgia"),
    state("HI", "Hawaii"),
    state("ID", "Idaho"),
    state("IL", "Illinois"),
    state("IN", "Indiana"),
    state("IA", "Iowa"),
    state("KS", "Kansas"),
    state("KY", "Kentucky"),
    state("LA", "Louisiana"),
    state("ME", "Maine"),
    state("MD", "Maryland"),
    state("MA", "Massachusetts"),
    state("MI", "Michigan"),
    state("MN", "Minnesota"),
    state("MS", "Mississippi"),
    state("MO", "Missouri"),
    state("MT", "Montana"),
    state("NE", "Nebraska"),
    state("NV", "Nevada"),
    state("NH", "New Hampshire"),
    state("NJ", "New Jersey"),
    state("NM", "New Mexico"),
    state("NY", "New York"),
    state("NC", "North Carolina"),
    state("ND", "North Dakota"),
    state("OH", "Ohio"),
    state("OK", "Oklahoma"),
    state("OR", "Oregon"),
    state("PA", "Pennsylvania"),
    state("RI", "Rhode Island"),
    state("SC", "South Carolina"),
    state("SD", "South Dakota"),
    state("TN", "Tennessee"),
    state("TX", "Texas"),
    state("UT", "Utah"),
    state("VT", "Vermont"),
    state("VA", "Virginia"),
    state("WA", "Washington"),
    state("WV", "West Virginia"),
    state("WI", "Wisconsin"),
    state("WY", "Wyoming"),
];

/// Regions in display order, with member abbreviations
pub const REGIONS: [(&str, &[&str]); 5] = [
    (
        "West",
        &["AK", "CA", "CO", "HI", "ID", "MT", "NV", "OR", "UT", "WA", "WY"],
    ),
    ("Southwest", &["AZ", "NM", "OK", "TX"]),
    (
        "Midwest",
        &["IL", "IN", "IA", "KS", "MI", "MN", "MO", "NE", "ND", "OH", "SD", "WI"],
    ),
    (
        "Northeast",
        &["CT", "ME", "MA", "NH", "NJ", "NY", "PA", "RI", "VT"],
    ),
    (
        "Southeast",
        &[
            "AL", "AR", "DE", "FL", "GA", "KY", "LA", "MD", "MS", "NC", "SC", "TN", "VA", "WV",
        ],
    ),
];

/// A row of the categorized list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    Header { region: &'static str },
    State(State),
}

impl Entry {
    pub fn is_header(&self) -> bool {
        matches!(self, Entry::Header { .. })
    }

    /// Display value: the state name, or the region for headers
    pub fn label(&self) -> &'static str {
        match self {
            Entry::Header { region } => *region,
            Entry::State(state) => state.name,
        }
    }

    pub fn state(&self) -> Option<&State> {
        match self {
            Entry::Header { .. } => None,
            Entry::State(state) => Some(state),
        }
    }
}

/// The 50 states in alphabetical order
pub fn states() -> Arc<[State]> {
    Arc::from(STATES.as_slice())
}

/// The 50 states as plain entries, without headers
pub fn state_entries() -> Arc<[Entry]> {
    STATES.iter().copied().map(Entry::State).collect::<Vec<_>>().into()
}

/// The 50 states grouped under region headers
pub fn categorized_states() -> Arc<[Entry]> {
    let mut entries = Vec::with_capacity(STATES.len() + REGIONS.len());
    for (region, members) in REGIONS {
        entries.push(Entry::Header { region });
        entries.extend(
            STATES
                .iter()
                .filter(|state| members.contains(&state.abbr))
                .copied()
                .map(Entry::State),
        );
    }
    entries.into()
}

/// Case-insensitive substring match on the name or abbreviation
pub fn match_state_to_term(state: &State, value: &str) -> bool {
    let value = value.to_lowercase();
    state.name.to_lowercase().contains(&value) || state.abbr.to_lowercase().contains(&value)
}

/// Like [`match_state_to_term`], but headers always render
pub fn match_entry_to_term(entry: &Entry, value: &str) -> bool {
    match entry {
        Entry::Header { .. } => true,
        Entry::State(state) => match_state_to_term(state, value),
    }
}

/// Order by where the term appears in the name, then by name
pub fn sort_states(a: &State, b: &State, value: &str) -> Ordering {
    let value = value.to_lowercase();
    let a_name = a.name.to_lowercase();
    let b_name = b.name.to_lowercase();
    let position = |name: &str| name.find(&value).unwrap_or(usize::MAX);
    position(&a_name)
        .cmp(&position(&b_name))
        .then_with(|| a_name.cmp(&b_name))
}

pub fn state_accessors() -> ItemAccessors<State> {
    ItemAccessors::new(|state: &State| state.name.to_string()).should_item_render(match_state_to_term)
}

pub fn entry_accessors() -> ItemAccessors<Entry> {
    ItemAccessors::new(|entry: &Entry| entry.label().to_string())
        .should_item_render(match_entry_to_term)
        .is_item_selectable(|entry| !entry.is_header())
}

/// Render a row as text, bracketing the highlighted one
pub fn render_entry(entry: &Entry, highlighted: bool) -> String {
    match entry {
        Entry::Header { region } => format!("## {}", region),
        Entry::State(state) if highlighted => format!("[{}]", state.name),
        Entry::State(state) => state.name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combobox_core::filter_items;

    #[test]
    fn test_every_state_has_one_region() {
        for state in STATES {
            let regions = REGIONS
                .iter()
                .filter(|(_, members)| members.contains(&state.abbr))
                .count();
            assert_eq!(regions, 1, "{} is in {} regions", state.name, regions);
        }
        assert_eq!(categorized_states().len(), 55);
    }

    #[test]
    fn test_match_name_or_abbr() {
        let texas = STATES[42];
        assert_eq!(texas.name, "Texas");
        assert!(match_state_to_term(&texas, "tx"));
        assert!(match_state_to_term(&texas, "EXA"));
        assert!(!match_state_to_term(&texas, "ohio"));
    }

    #[test]
    fn test_massachusetts_is_fourth_for_ma() {
        let visible = filter_items(&states(), "ma", &state_accessors());
        let names: Vec<_> = visible.iter().map(|i| STATES[*i].name).collect();
        assert_eq!(&names[..4], ["Alabama", "Maine", "Maryland", "Massachusetts"]);
        assert_eq!(visible[3], 20);
    }

    #[test]
    fn test_sort_by_match_position() {
        let accessors = state_accessors().sort_items(sort_states);
        let visible = filter_items(&states(), "ne", &accessors);
        let names: Vec<_> = visible.iter().map(|i| STATES[*i].name).collect();
        assert_eq!(names[0], "Nebraska");
        assert_eq!(names[1], "Nevada");
    }

    #[test]
    fn test_categorized_filter_keeps_headers() {
        let entries = categorized_states();
        let visible = filter_items(&entries, "new h", &entry_accessors());
        let labels: Vec<_> = visible.iter().map(|i| entries[*i].label()).collect();
        assert_eq!(
            labels,
            vec!["West", "Southwest", "Midwest", "Northeast", "New Hampshire", "Southeast"]
        );
    }

    #[test]
    fn test_render_entry() {
        assert_eq!(render_entry(&Entry::Header { region: "West" }, false), "## West");
        assert_eq!(render_entry(&Entry::State(STATES[0]), true), "[Alabama]");
        assert_eq!(render_entry(&Entry::State(STATES[0]), false), "Alabama");
    }
}
