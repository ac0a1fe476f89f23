use combobox_core::ComboboxConfig;
use combobox_render::MenuContent;
use combobox_test_suite::fixtures::{entry_accessors, render_entry, state_entries};
use combobox_test_suite::scenarios::{self, states_harness};
use combobox_test_suite::{Observed, TestHarness, TestRunner};

#[test]
fn all_scenarios_pass() {
    let mut runner = TestRunner::new();
    for suite in scenarios::all_suites() {
        runner.add_suite(suite);
    }
    let result = runner.run();
    let failures: Vec<_> = result
        .results
        .iter()
        .filter(|run| !run.is_passed())
        .map(|run| format!("{}/{}: {:?}", run.category, run.name, run.result))
        .collect();
    assert!(failures.is_empty(), "{:#?}", failures);
    assert_eq!(result.total(), 21);
}

#[test]
fn filter_narrows_the_run() {
    let mut runner = TestRunner::new();
    for suite in scenarios::all_suites() {
        runner.add_suite(suite);
    }
    runner.filter("escape");
    let result = runner.run();
    assert_eq!(result.total(), 1);
    assert!(result.all_passed());
}

#[test]
fn custom_menu_wraps_rendered_rows() {
    let mut harness = TestHarness::new(
        ComboboxConfig::new("states-menu"),
        entry_accessors(),
        state_entries(),
        render_entry,
    )
    .unwrap()
    .with_render_menu(|rows, menu_id, value| {
        format!("{}: {} of {}", menu_id, rows.len(), value)
    });

    harness.type_text("new");
    let menu = harness.view().menu.as_ref().expect("menu should render");
    match &menu.content {
        MenuContent::Custom(text) => assert_eq!(text, "states-menu: 4 of new"),
        MenuContent::Listbox { .. } => panic!("expected the custom menu"),
    }
}

#[test]
fn change_precedes_visibility() {
    let mut harness = states_harness(ComboboxConfig::new("states-menu")).unwrap();
    harness.type_text("ohio");
    assert_eq!(
        harness.observed(),
        vec![
            Observed::Change("ohio".to_string()),
            Observed::MenuVisibility(true),
        ]
    );
}
