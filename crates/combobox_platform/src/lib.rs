//! Combobox Platform Abstraction
//!
//! Platform-agnostic types the combobox engine needs from its host:
//!
//! - [`KeyboardEvent`] / [`Key`] - key presses with their legacy key codes
//! - [`Viewport`] - read and write the page scroll offset
//! - [`Scheduler`] - schedule and cancel deferred callbacks
//!
//! Hosts backed by a real window system implement [`Viewport`] and
//! [`Scheduler`] on top of it. [`MemoryViewport`] and [`ManualScheduler`]
//! let the engine run headless in tests.

mod input;
mod timer;
mod viewport;

pub use input::{key_codes, Key, KeyState, KeyboardEvent, Modifiers};
pub use timer::{ManualScheduler, ScheduledTimer, Scheduler, TimerToken};
pub use viewport::{MemoryViewport, ScrollOffset, Viewport};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::input::{key_codes, Key, KeyState, KeyboardEvent, Modifiers};
    pub use crate::timer::{ManualScheduler, Scheduler, TimerToken};
    pub use crate::viewport::{MemoryViewport, ScrollOffset, Viewport};
}
