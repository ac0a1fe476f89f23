//! Events the host feeds into the engine

use combobox_platform::{KeyboardEvent, TimerToken};

/// Input to [`crate::Combobox::handle`]
///
/// Item indices are positions in the filtered list that was last rendered.
#[derive(Clone, Debug, PartialEq)]
pub enum ComboboxEvent {
    /// Key pressed in the input
    KeyDown(KeyboardEvent),
    /// The input's text changed to the given value
    Change(String),
    /// The input gained focus
    Focus,
    /// The input lost focus
    Blur,
    /// The input was clicked
    InputClick,
    /// Pointer entered the menu
    MenuPointerEnter,
    /// Pointer left the menu
    MenuPointerLeave,
    /// A touch started on the menu
    MenuTouchStart,
    /// Pointer entered a menu item
    ItemPointerEnter(usize),
    /// A menu item was clicked
    ItemClick(usize),
    /// A timer requested through [`crate::Effect::ScheduleTimer`] elapsed
    TimerElapsed(TimerToken),
}

impl ComboboxEvent {
    /// Short name for logs and debug snapshots
    pub fn name(&self) -> &'static str {
        match self {
            ComboboxEvent::KeyDown(_) => "key_down",
            ComboboxEvent::Change(_) => "change",
            ComboboxEvent::Focus => "focus",
            ComboboxEvent::Blur => "blur",
            ComboboxEvent::InputClick => "input_click",
            ComboboxEvent::MenuPointerEnter => "menu_pointer_enter",
            ComboboxEvent::MenuPointerLeave => "menu_pointer_leave",
            ComboboxEvent::MenuTouchStart => "menu_touch_start",
            ComboboxEvent::ItemPointerEnter(_) => "item_pointer_enter",
            ComboboxEvent::ItemClick(_) => "item_click",
            ComboboxEvent::TimerElapsed(_) => "timer_elapsed",
        }
    }
}
