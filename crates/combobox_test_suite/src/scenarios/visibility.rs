//! Menu visibility scenarios
//!
//! Managed visibility, open-on-focus, the live region and debug output.

use super::states_harness;
use crate::harness::Observed;
use crate::runner::TestSuite;
use anyhow::ensure;
use combobox_core::ComboboxConfig;

/// Create the visibility suite
pub fn suite() -> TestSuite {
    let mut suite = TestSuite::new("visibility");

    suite.add("managed_menu_reports_only", || {
        let mut h = states_harness(ComboboxConfig::new("states-menu").open(Some(false)))?;
        h.type_text("a");
        ensure!(!h.is_open(), "managed menu opened on its own");
        ensure!(h.count(&Observed::MenuVisibility(true)) == 1, "open request missing");

        h.set_open(Some(true));
        ensure!(h.is_open(), "caller opened the menu");
        ensure!(h.count(&Observed::MenuVisibility(true)) == 1, "open reported twice");

        h.press("Escape");
        ensure!(h.is_open(), "Escape closed a managed menu");
        ensure!(h.count(&Observed::MenuVisibility(false)) == 1, "close request missing");

        h.set_open(Some(false));
        ensure!(!h.is_open(), "caller closed the menu");
        ensure!(h.count(&Observed::MenuVisibility(false)) == 1, "close reported twice");
        Ok(())
    });

    suite.add("open_on_focus", || {
        let mut h = states_harness(ComboboxConfig::new("states-menu").open_on_focus(true))?;
        h.focus();
        ensure!(h.is_open(), "focus should open");
        h.type_text("");
        ensure!(h.is_open(), "empty text should not close with open_on_focus");
        Ok(())
    });

    suite.add("live_region_counts_results", || {
        let mut h = states_harness(ComboboxConfig::new("states-menu"))?;
        ensure!(h.view().live_region.text.is_empty(), "closed menu announced");
        h.type_text("new");
        ensure!(
            h.view().live_region.text == "4 Autocomplete results are available below.",
            "live region {:?}",
            h.view().live_region.text
        );
        ensure!(h.view().wrapper.expanded, "wrapper not expanded");
        Ok(())
    });

    suite.add("debug_snapshots_rendered", || {
        let mut h = states_harness(ComboboxConfig::new("states-menu").debug(true))?;
        h.type_text("a");
        h.press("ArrowDown");
        h.press("ArrowDown");
        let json = h.view().debug.clone().unwrap_or_default();
        ensure!(json.contains("\"highlighted_index\""), "debug output {:?}", json);
        let history = h.combobox().debug_history().map(|history| history.len());
        ensure!(history == Some(5), "history length {:?}", history);
        Ok(())
    });

    suite
}
