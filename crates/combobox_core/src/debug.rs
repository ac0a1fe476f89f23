//! Rolling window of state snapshots
//!
//! With `debug` enabled the engine records its state after every update.
//! Only the most recent entries are kept; older ones are dropped.

use crate::combobox::ComboboxState;
use crate::error::Result;
use serde::Serialize;
use std::collections::VecDeque;

/// One recorded state
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DebugSnapshot {
    /// Monotonic snapshot id, starting at 0
    pub id: u64,
    /// What triggered the update
    pub cause: &'static str,
    pub state: ComboboxState,
}

/// Ring buffer of [`DebugSnapshot`]s
#[derive(Clone, Debug)]
pub struct DebugHistory {
    snapshots: VecDeque<DebugSnapshot>,
    capacity: usize,
    next_id: u64,
    dropped: u64,
}

impl DebugHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 0,
            dropped: 0,
        }
    }

    pub fn record(&mut self, cause: &'static str, state: ComboboxState) {
        if self.capacity == 0 {
            return;
        }
        if self.snapshots.len() >= self.capacity {
            self.snapshots.pop_front();
            self.dropped += 1;
        }
        self.snapshots.push_back(DebugSnapshot {
            id: self.next_id,
            cause,
            state,
        });
        self.next_id += 1;
    }

    /// Snapshots, oldest first
    pub fn snapshots(&self) -> impl Iterator<Item = &DebugSnapshot> {
        self.snapshots.iter()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshots evicted so far
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Pretty-printed JSON array of the retained snapshots
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshots)?)
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(highlighted_index: Option<usize>) -> ComboboxState {
        ComboboxState {
            is_open: true,
            highlighted_index,
            ..Default::default()
        }
    }

    #[test]
    fn test_keeps_last_five() {
        let mut history = DebugHistory::new(5);
        for i in 0..8 {
            history.record("change", state(Some(i)));
        }

        assert_eq!(history.len(), 5);
        assert_eq!(history.dropped(), 3);
        let ids: Vec<_> = history.snapshots().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_json_output() {
        let mut history = DebugHistory::new(5);
        history.record("focus", state(None));

        let json = history.to_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["id"], 0);
        assert_eq!(parsed[0]["cause"], "focus");
        assert_eq!(parsed[0]["state"]["is_open"], true);
        assert!(parsed[0]["state"]["highlighted_index"].is_null());
    }
}
