//! Combobox Render Wiring
//!
//! Connects a [`combobox_core::Combobox`] to whatever draws it. The caller
//! supplies render functions for items and (optionally) the menu; this crate
//! augments their output with event bindings, element ids and ARIA
//! attributes, keeps the table of element references the engine's effects
//! act on, and applies those effects.
//!
//! # Render cycle
//!
//! ```text
//! host event ──► EventHandlers::dispatch ──► Combobox::handle ──► Effects
//!                                                                   │
//!  render_view ──► ComboboxView (+ ElementRegistry rebuilt) ◄───────┘
//!                                                                   │
//!  EffectDispatcher::apply (handles, callbacks, scheduler) ◄────────┘
//! ```
//!
//! Effects are applied after the view is rebuilt so item references point
//! at the rows that are actually displayed.

mod aria;
mod dispatch;
mod event_handler;
mod imperative;
mod registry;
mod render;
mod view;

pub use aria::{Attributes, InputAria, LiveRegion, WrapperAria};
pub use dispatch::{Callbacks, DispatchOutcome, EffectDispatcher};
pub use event_handler::{EventCallback, EventContext, EventHandlers, EventType};
pub use imperative::InputControl;
pub use registry::{ElementEntry, ElementHandle, ElementKey, ElementRegistry};
pub use render::{MenuContent, RenderFns, RenderedItem, RenderedMenu};
pub use view::{render_view, ComboboxView, RenderedInput};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dispatch::{Callbacks, EffectDispatcher};
    pub use crate::event_handler::{EventContext, EventHandlers, EventType};
    pub use crate::registry::{ElementHandle, ElementKey, ElementRegistry};
    pub use crate::render::{MenuContent, RenderFns};
    pub use crate::view::{render_view, ComboboxView};
}
