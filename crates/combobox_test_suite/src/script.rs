//! Scripted event replay
//!
//! A script is a JSON document listing host steps to replay against the
//! state fixtures:
//!
//! ```json
//! {
//!   "items": "categorized",
//!   "steps": [
//!     { "step": "focus" },
//!     { "step": "type", "text": "new h" },
//!     { "step": "expect", "highlighted": 4, "open": true },
//!     { "step": "press", "key": "Enter" },
//!     { "step": "expect", "value": "New Hampshire", "selections": ["New Hampshire"] }
//!   ]
//! }
//! ```
//!
//! Replaying produces a [`Transcript`] with the engine state and the
//! callbacks observed after every step.

use crate::fixtures::{categorized_states, entry_accessors, render_entry, state_entries, Entry};
use crate::harness::{Observed, TestHarness};
use anyhow::{Context, Result};
use combobox_core::{ComboboxConfig, ComboboxState};
use combobox_platform::ScrollOffset;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Fixture a script runs against
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSet {
    /// The 50 states
    #[default]
    States,
    /// The 50 states under region headers
    Categorized,
}

/// One host action
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Focus,
    Blur,
    ClickInput,
    Type { text: String },
    Press { key: String },
    MenuEnter,
    MenuLeave,
    TouchMenu,
    Hover { index: usize },
    Click { index: usize },
    RunTimers,
    SetOpen { open: Option<bool> },
    Highlight { index: Option<usize> },
    Scroll { x: f32, y: f32 },
    Unmount,
    Expect(Expectation),
}

/// Assertions checked by an `expect` step. Absent fields are not checked.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Expectation {
    pub open: Option<bool>,
    pub value: Option<String>,
    pub highlighted: Option<usize>,
    pub selections: Option<Vec<String>>,
}

/// A replayable script
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub items: ItemSet,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_json_str(&content).with_context(|| format!("In {}", path.display()))
    }
}

/// State after one step
#[derive(Clone, Debug, Serialize)]
pub struct Frame {
    pub index: usize,
    pub step: Step,
    pub state: ComboboxState,
    /// Callbacks observed during the step
    pub observed: Vec<Observed>,
    /// Failed expectations, for `expect` steps
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<String>,
}

/// Everything a replay observed
#[derive(Clone, Debug, Default, Serialize)]
pub struct Transcript {
    pub frames: Vec<Frame>,
}

impl Transcript {
    /// Failed expectations across all frames, prefixed with the step index
    pub fn failures(&self) -> Vec<String> {
        self.frames
            .iter()
            .flat_map(|frame| {
                frame
                    .failures
                    .iter()
                    .map(move |failure| format!("step {}: {}", frame.index, failure))
            })
            .collect()
    }

    pub fn passed(&self) -> bool {
        self.frames.iter().all(|frame| frame.failures.is_empty())
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize transcript")
    }
}

/// Replay `script` against a fresh combobox built from `config`
pub fn replay(config: ComboboxConfig, script: &Script) -> Result<Transcript> {
    let items = match script.items {
        ItemSet::States => state_entries(),
        ItemSet::Categorized => categorized_states(),
    };
    let mut harness = TestHarness::new(config, entry_accessors(), items, render_entry)?;
    let mut transcript = Transcript::default();

    for (index, step) in script.steps.iter().enumerate() {
        let seen = harness.observed().len();
        tracing::debug!("step {}: {:?}", index, step);
        let failures = apply(&mut harness, step);
        transcript.frames.push(Frame {
            index,
            step: step.clone(),
            state: harness.combobox().state(),
            observed: harness.observed().split_off(seen),
            failures,
        });
    }

    Ok(transcript)
}

fn apply(harness: &mut TestHarness<Entry>, step: &Step) -> Vec<String> {
    match step {
        Step::Focus => harness.focus(),
        Step::Blur => harness.blur(),
        Step::ClickInput => harness.click_input(),
        Step::Type { text } => harness.type_text(text),
        Step::Press { key } => harness.press(key),
        Step::MenuEnter => harness.menu_enter(),
        Step::MenuLeave => harness.menu_leave(),
        Step::TouchMenu => harness.touch_menu(),
        Step::Hover { index } => harness.hover_item(*index),
        Step::Click { index } => harness.click_item(*index),
        Step::RunTimers => {
            harness.run_timers();
        }
        Step::SetOpen { open } => harness.set_open(*open),
        Step::Highlight { index } => harness.set_highlighted_index(*index),
        Step::Scroll { x, y } => harness.scroll_page(ScrollOffset::new(*x, *y)),
        Step::Unmount => harness.unmount(),
        Step::Expect(expectation) => return check(harness, expectation),
    }
    Vec::new()
}

fn check(harness: &TestHarness<Entry>, expected: &Expectation) -> Vec<String> {
    let mut failures = Vec::new();
    if let Some(open) = expected.open {
        if harness.is_open() != open {
            failures.push(format!("expected open={}, got {}", open, harness.is_open()));
        }
    }
    if let Some(value) = &expected.value {
        if harness.value() != value.as_str() {
            failures.push(format!("expected value {:?}, got {:?}", value, harness.value()));
        }
    }
    if let Some(index) = expected.highlighted {
        if harness.highlighted() != Some(index) {
            failures.push(format!(
                "expected highlight {}, got {:?}",
                index,
                harness.highlighted()
            ));
        }
    }
    if let Some(selections) = &expected.selections {
        let actual = harness.selections();
        if &actual != selections {
            failures.push(format!("expected selections {:?}, got {:?}", selections, actual));
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        let script = Script::from_json_str(
            r#"{
                "steps": [
                    { "step": "focus" },
                    { "step": "type", "text": "ar" },
                    { "step": "set_open", "open": null },
                    { "step": "expect", "open": true }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(script.items, ItemSet::States);
        assert_eq!(script.steps[1], Step::Type { text: "ar".to_string() });
        assert_eq!(script.steps[2], Step::SetOpen { open: None });
        assert_eq!(
            script.steps[3],
            Step::Expect(Expectation {
                open: Some(true),
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_unknown_step_rejected() {
        let err = Script::from_json_str(r#"{ "steps": [{ "step": "dance" }] }"#).unwrap_err();
        assert!(format!("{:#}", err).contains("dance"));
    }

    #[test]
    fn test_replay_records_frames() {
        let script = Script {
            items: ItemSet::States,
            steps: vec![
                Step::Type {
                    text: "Ar".to_string(),
                },
                Step::Press {
                    key: "Enter".to_string(),
                },
                Step::Expect(Expectation {
                    value: Some("Arizona".to_string()),
                    open: Some(false),
                    ..Default::default()
                }),
                Step::Expect(Expectation {
                    open: Some(true),
                    ..Default::default()
                }),
            ],
        };

        let transcript = replay(ComboboxConfig::new("states-menu"), &script).unwrap();
        assert_eq!(transcript.frames.len(), 4);
        assert_eq!(
            transcript.frames[1].observed,
            vec![
                Observed::MenuVisibility(false),
                Observed::Select("Arizona".to_string())
            ]
        );
        assert_eq!(transcript.failures(), vec!["step 3: expected open=true, got false"]);
        assert!(transcript.to_json().unwrap().contains("\"callback\": \"select\""));
    }
}
