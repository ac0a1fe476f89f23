//! Focus scenarios
//!
//! Select-on-blur, forwarded focus/blur and scroll restoration around a
//! suppressed blur.

use super::states_harness;
use crate::harness::Observed;
use crate::runner::TestSuite;
use anyhow::ensure;
use combobox_core::ComboboxConfig;
use combobox_platform::ScrollOffset;

/// Create the focus suite
pub fn suite() -> TestSuite {
    let mut suite = TestSuite::new("focus");

    suite.add("select_on_blur_commits_first", || {
        let mut h = states_harness(ComboboxConfig::new("states-menu").select_on_blur(true))?;
        h.focus();
        h.type_text("ma");
        h.set_highlighted_index(Some(3));
        h.clear_log();
        h.blur();

        ensure!(
            h.observed()
                == [
                    Observed::Select("Massachusetts".to_string()),
                    Observed::Blur,
                    Observed::MenuVisibility(false),
                ],
            "observed {:?}",
            h.observed()
        );
        ensure!(h.value() == "Massachusetts", "value {:?}", h.value());
        Ok(())
    });

    suite.add("no_select_on_blur_by_default", || {
        let mut h = states_harness(ComboboxConfig::new("states-menu"))?;
        h.focus();
        h.type_text("ma");
        h.set_highlighted_index(Some(3));
        h.blur();
        ensure!(h.selections().is_empty(), "selected {:?}", h.selections());
        ensure!(h.value() == "ma", "value {:?}", h.value());
        Ok(())
    });

    suite.add("scroll_restored_twice", || {
        let mut h = states_harness(ComboboxConfig::new("states-menu"))?
            .with_focus_scroll(ScrollOffset::new(0.0, 800.0));
        h.scroll_page(ScrollOffset::new(0.0, 300.0));
        h.focus();
        h.type_text("a");
        h.menu_enter();
        h.blur();

        ensure!(
            h.scroll_offset() == ScrollOffset::new(0.0, 300.0),
            "restore on focus missed: {:?}",
            h.scroll_offset()
        );
        ensure!(h.scheduler().pending().len() == 1, "restore timer not scheduled");

        h.scroll_page(ScrollOffset::new(0.0, 800.0));
        ensure!(h.run_timers() == 1, "expected one timer");
        ensure!(
            h.scroll_offset() == ScrollOffset::new(0.0, 300.0),
            "deferred restore missed: {:?}",
            h.scroll_offset()
        );
        Ok(())
    });

    suite.add("unmount_clears_timer", || {
        let mut h = states_harness(ComboboxConfig::new("states-menu"))?;
        h.focus();
        h.type_text("a");
        h.menu_enter();
        h.blur();
        ensure!(!h.scheduler().is_idle(), "restore timer not scheduled");

        h.unmount();
        ensure!(h.scheduler().is_idle(), "timer outlived the combobox");
        ensure!(h.scheduler().cancelled_count() == 1, "timer not cancelled");
        ensure!(h.registry().is_empty(), "element references survived");
        Ok(())
    });

    suite.add("focus_and_blur_forwarded", || {
        let mut h = states_harness(ComboboxConfig::new("states-menu"))?;
        h.focus();
        h.blur();
        ensure!(
            h.observed() == [Observed::Focus, Observed::Blur],
            "observed {:?}",
            h.observed()
        );
        Ok(())
    });

    suite
}
