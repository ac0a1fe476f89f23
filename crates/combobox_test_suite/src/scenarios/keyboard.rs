//! Keyboard scenarios
//!
//! Typing, arrow navigation, Enter and Escape against the state lists.

use super::{categorized_harness, label_at, states_harness};
use crate::harness::Observed;
use crate::runner::TestSuite;
use anyhow::ensure;
use combobox_core::ComboboxConfig;
use combobox_platform::{key_codes, Key, KeyboardEvent};

/// Create the keyboard suite
pub fn suite() -> TestSuite {
    let mut suite = TestSuite::new("keyboard");

    suite.add("type_opens_clear_closes", || {
        let mut h = states_harness(ComboboxConfig::new("states-menu"))?;
        h.type_text("a");
        ensure!(h.is_open(), "typing should open the menu");
        h.type_text("");
        ensure!(!h.is_open(), "clearing should close the menu");
        ensure!(
            h.count(&Observed::MenuVisibility(true)) == 1
                && h.count(&Observed::MenuVisibility(false)) == 1,
            "expected one open and one close notification, got {:?}",
            h.observed()
        );
        Ok(())
    });

    suite.add("auto_highlight_prefix", || {
        let mut h = states_harness(ComboboxConfig::new("states-menu"))?;
        h.type_text("Ar");
        let index = h.highlighted();
        ensure!(
            index.and_then(|i| label_at(&h, i)) == Some("Arizona"),
            "expected Arizona, got {:?}",
            index
        );
        Ok(())
    });

    suite.add("enter_selects_highlight", || {
        let mut h = states_harness(ComboboxConfig::new("states-menu"))?;
        h.type_text("Ar");
        h.press("Enter");
        ensure!(h.selections() == ["Arizona"], "selections {:?}", h.selections());
        ensure!(h.value() == "Arizona", "value {:?}", h.value());
        ensure!(!h.is_open(), "menu should close on Enter");
        ensure!(
            h.element_calls().contains(&"input.set_selection_range 7 7".to_string()),
            "caret not moved to the end: {:?}",
            h.element_calls()
        );
        Ok(())
    });

    suite.add("ime_enter_ignored", || {
        let mut h = states_harness(ComboboxConfig::new("states-menu"))?;
        h.type_text("Ar");
        h.press_event(KeyboardEvent::pressed(Key::Enter).with_key_code(key_codes::IME_PROCESS));
        ensure!(h.selections().is_empty(), "IME Enter must not select");
        ensure!(h.is_open(), "IME Enter must not close");
        Ok(())
    });

    suite.add("arrow_navigation_wraps", || {
        let mut h = states_harness(ComboboxConfig::new("states-menu").auto_highlight(false))?;
        h.type_text("ar");
        let len = h.combobox().filtered_items().len();
        for step in 0..len + 1 {
            h.press("ArrowDown");
            ensure!(
                h.highlighted() == Some(step % len),
                "step {} highlighted {:?}",
                step,
                h.highlighted()
            );
        }
        ensure!(h.prevented() >= len + 1, "arrows must prevent default");
        Ok(())
    });

    suite.add("headers_skipped", || {
        let mut h = categorized_harness(ComboboxConfig::new("states-menu").auto_highlight(false))?;
        h.type_text("new h");
        ensure!(h.combobox().filtered_items().len() == 6, "expected 6 rows");
        h.press("ArrowDown");
        ensure!(h.highlighted() == Some(4), "got {:?}", h.highlighted());
        h.press("ArrowDown");
        ensure!(h.highlighted() == Some(4), "single choice should stay put");
        Ok(())
    });

    suite.add("escape_closes_and_clears", || {
        let mut h = states_harness(ComboboxConfig::new("states-menu"))?;
        h.type_text("Ar");
        h.press("Escape");
        let once = h.combobox().state();
        h.press("Escape");
        ensure!(h.combobox().state() == once, "second Escape changed state");
        ensure!(!once.is_open && once.highlighted_index.is_none(), "{:?}", once);
        Ok(())
    });

    suite
}
