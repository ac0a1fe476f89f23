//! Pointer scenarios
//!
//! Hovering and clicking menu rows, including the blur that a press on the
//! menu causes before its click lands.

use super::{categorized_harness, label_at, states_harness};
use crate::harness::Observed;
use crate::runner::TestSuite;
use anyhow::ensure;
use combobox_core::ComboboxConfig;

/// Create the pointer suite
pub fn suite() -> TestSuite {
    let mut suite = TestSuite::new("pointer");

    suite.add("blur_suppressed_before_click", || {
        let mut h = states_harness(ComboboxConfig::new("states-menu").open_on_focus(true))?;
        h.focus();
        h.menu_enter();
        h.blur();
        h.click_item(3);

        ensure!(h.selections() == ["Arkansas"], "selections {:?}", h.selections());
        ensure!(h.count(&Observed::Blur) == 0, "blur leaked: {:?}", h.observed());
        ensure!(h.count(&Observed::Focus) == 1, "focus re-forwarded: {:?}", h.observed());
        ensure!(!h.is_open(), "menu should close after the click");
        ensure!(
            h.element_calls().iter().any(|call| call == "input.focus"),
            "input was not re-focused"
        );
        Ok(())
    });

    suite.add("hover_highlights", || {
        let mut h = states_harness(ComboboxConfig::new("states-menu"))?;
        h.focus();
        h.click_input();
        ensure!(h.is_open(), "click on a focused input should open");
        h.hover_item(2);
        ensure!(h.highlighted() == Some(2), "got {:?}", h.highlighted());
        ensure!(
            h.view().input.aria.active_descendant.as_deref() == Some("states-menu-item-2"),
            "active descendant {:?}",
            h.view().input.aria.active_descendant
        );
        Ok(())
    });

    suite.add("click_selects_item", || {
        let mut h = states_harness(ComboboxConfig::new("states-menu"))?;
        h.focus();
        h.click_input();
        h.click_item(3);
        ensure!(h.selections() == ["Arkansas"], "selections {:?}", h.selections());
        ensure!(h.value() == "Arkansas", "value {:?}", h.value());
        Ok(())
    });

    suite.add("headers_ignore_pointer", || {
        let mut h = categorized_harness(ComboboxConfig::new("states-menu"))?;
        h.type_text("new h");
        ensure!(label_at(&h, 4) == Some("New Hampshire"), "row 4 {:?}", label_at(&h, 4));
        ensure!(h.highlighted() == Some(4), "got {:?}", h.highlighted());

        h.hover_item(0);
        h.click_item(0);
        ensure!(h.highlighted() == Some(4), "header took the highlight");
        ensure!(h.selections().is_empty(), "header was selected");
        ensure!(
            h.view().items()[0].handlers.is_empty(),
            "headers should carry no handlers"
        );
        Ok(())
    });

    suite.add("touch_holds_blur", || {
        let mut h = states_harness(ComboboxConfig::new("states-menu"))?;
        h.focus();
        h.type_text("a");
        h.touch_menu();
        h.blur();
        ensure!(h.is_open(), "touching the menu should keep it open");
        ensure!(h.count(&Observed::Blur) == 0, "blur leaked");
        h.press("Tab");
        h.blur();
        ensure!(!h.is_open(), "Tab then blur should close");
        ensure!(h.count(&Observed::Blur) == 1, "expected one blur");
        Ok(())
    });

    suite
}
