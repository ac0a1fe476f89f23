//! Combobox Engine
//!
//! A headless implementation of the ARIA 1.1 combobox interaction pattern.
//! The engine owns the interaction state of one combobox (which item is
//! highlighted, whether the menu is open, how focus races resolve) and
//! leaves rendering to the caller.
//!
//! # Architecture
//!
//! - [`FilterCache`] - derives the visible items from `(items, value)`
//! - [`HighlightNavigator`] - arrow-key navigation and auto-highlight
//! - [`MenuState`] - open/close machine with an optional managed mode
//! - [`FocusArbiter`] - resolves blur-before-click races
//!
//! Every call into [`Combobox`] settles the new state first and then
//! returns an ordered list of [`Effect`]s for the host to apply.
//!
//! # Example
//!
//! ```ignore
//! use combobox_core::prelude::*;
//!
//! let accessors = ItemAccessors::new(|state: &State| state.name.clone())
//!     .should_item_render(|state, value| matches_state(state, value));
//! let mut combobox = Combobox::new(ComboboxConfig::new("states-menu"), accessors)?;
//! combobox.set_items(states.into());
//!
//! for effect in combobox.handle(ComboboxEvent::Change("ar".into())) {
//!     host.apply(effect);
//! }
//! ```

mod accessors;
mod combobox;
mod config;
mod debug;
mod effect;
mod error;
mod event;
mod filter;
mod focus;
mod highlight;
mod menu;

pub use accessors::ItemAccessors;
pub use combobox::{Combobox, ComboboxState};
pub use config::{ComboboxConfig, DEFAULT_DEBUG_HISTORY, DEFAULT_RESULTS_COPY};
pub use debug::{DebugHistory, DebugSnapshot};
pub use effect::{Effect, Effects, SCROLL_RESTORE_DELAY};
pub use error::{ComboboxError, Result};
pub use event::ComboboxEvent;
pub use filter::{filter_items, FilterCache, FilteredItems};
pub use focus::{BlurOutcome, FocusArbiter, FocusOutcome};
pub use highlight::{Candidates, HighlightNavigator};
pub use menu::MenuState;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::accessors::ItemAccessors;
    pub use crate::combobox::{Combobox, ComboboxState};
    pub use crate::config::ComboboxConfig;
    pub use crate::effect::{Effect, Effects};
    pub use crate::error::{ComboboxError, Result};
    pub use crate::event::ComboboxEvent;
    pub use crate::filter::FilteredItems;
    pub use combobox_platform::{Key, KeyboardEvent, ScrollOffset, TimerToken, Viewport};
}
