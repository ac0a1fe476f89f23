//! Combobox Scenario Suite
//!
//! Headless end-to-end testing for the combobox engine. A [`TestHarness`]
//! hosts a combobox the way a UI toolkit would: it renders the view,
//! routes element events through the rendered handler tables and applies
//! the returned effects against recording elements.
//!
//! # Scenario Categories
//!
//! - **Keyboard**: typing, arrow navigation, Enter and Escape
//! - **Pointer**: hover, click and the blur a menu press causes
//! - **Focus**: select-on-blur and scroll restoration
//! - **Visibility**: managed menus, open-on-focus and the live region
//!
//! Scripts in the JSON format described in [`script`] can be replayed with
//! the `combobox-replay` binary.

pub mod fixtures;
pub mod harness;
pub mod runner;
pub mod scenarios;
pub mod script;

pub use harness::{Observed, Target, TestHarness};
pub use runner::{RunResult, TestResult, TestRunner};
pub use script::{replay, Script, Step, Transcript};
