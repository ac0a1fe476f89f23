//! Event bindings for rendered combobox elements
//!
//! Every element the combobox renders (input, menu, item rows) carries an
//! [`EventHandlers`] table. The host forwards raw element events into it and
//! gets back the [`ComboboxEvent`]s to feed the engine.
//!
//! # Example
//!
//! ```ignore
//! let view = render_view(&combobox, &render_fns, &mut registry);
//! let ctx = EventContext::new(EventType::PointerEnter);
//! for event in view.items()[3].handlers.dispatch(&ctx) {
//!     let effects = combobox.handle(event);
//!     // re-render, then apply effects
//! }
//! ```

use std::rc::Rc;

use combobox_core::ComboboxEvent;
use combobox_platform::KeyboardEvent;
use rustc_hash::FxHashMap;

/// Element events the combobox listens to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    PointerEnter,
    PointerLeave,
    TouchStart,
    Click,
    Focus,
    Blur,
    KeyDown,
    /// The input's text changed
    Input,
}

/// Callback for handling element events
///
/// Returns the engine event to dispatch, if any. Caller-supplied handlers
/// that only observe return `None`. Uses Rc since UI is single-threaded.
pub type EventCallback = Rc<dyn Fn(&EventContext) -> Option<ComboboxEvent>>;

/// Context passed to event handlers
#[derive(Clone, Debug, PartialEq)]
pub struct EventContext {
    /// The type of event that occurred
    pub event_type: EventType,
    /// Key details for KEY_DOWN events
    pub key: Option<KeyboardEvent>,
    /// New input text for INPUT events
    pub value: Option<String>,
}

impl EventContext {
    /// Create a new event context
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            key: None,
            value: None,
        }
    }

    /// Key-down context
    pub fn key_down(key: KeyboardEvent) -> Self {
        Self::new(EventType::KeyDown).with_key(key)
    }

    /// Input context carrying the new text
    pub fn input(value: impl Into<String>) -> Self {
        Self::new(EventType::Input).with_value(value)
    }

    /// Set the key (for KEY_DOWN events)
    pub fn with_key(mut self, key: KeyboardEvent) -> Self {
        self.key = Some(key);
        self
    }

    /// Set the text (for INPUT events)
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Storage for event handlers on an element
#[derive(Default, Clone)]
pub struct EventHandlers {
    /// Handlers keyed by event type
    handlers: FxHashMap<EventType, Vec<EventCallback>>,
}

impl std::fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<_> = self.handlers.keys().collect();
        types.sort_by_key(|t| format!("{:?}", t));
        f.debug_struct("EventHandlers").field("types", &types).finish()
    }
}

impl EventHandlers {
    /// Create a new empty event handlers storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if there are any handlers registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Check if a handler is registered for a specific event type
    pub fn has_handler(&self, event_type: EventType) -> bool {
        self.handlers.contains_key(&event_type)
    }

    /// Register a handler for an event type
    pub fn on<F>(&mut self, event_type: EventType, handler: F)
    where
        F: Fn(&EventContext) -> Option<ComboboxEvent> + 'static,
    {
        self.handlers
            .entry(event_type)
            .or_default()
            .push(Rc::new(handler));
    }

    /// Register a handler that always yields `event`
    pub fn emit(&mut self, event_type: EventType, event: ComboboxEvent) {
        self.on(event_type, move |_| Some(event.clone()));
    }

    /// Get handlers for an event type
    pub fn get(&self, event_type: EventType) -> Option<&[EventCallback]> {
        self.handlers.get(&event_type).map(|v| v.as_slice())
    }

    /// Run every handler for the context's event type, in registration
    /// order, and collect the engine events they produce
    pub fn dispatch(&self, ctx: &EventContext) -> Vec<ComboboxEvent> {
        self.handlers
            .get(&ctx.event_type)
            .map(|handlers| handlers.iter().filter_map(|handler| handler(ctx)).collect())
            .unwrap_or_default()
    }

    /// Merge another set of handlers into this one
    ///
    /// Handlers from `other` run after the existing ones.
    pub fn merge(&mut self, other: EventHandlers) {
        for (event_type, handlers) in other.handlers {
            self.handlers
                .entry(event_type)
                .or_default()
                .extend(handlers);
        }
    }

    // =========================================================================
    // Convenience registration methods
    // =========================================================================

    /// Register a key down handler
    pub fn on_key_down<F>(&mut self, handler: F)
    where
        F: Fn(&EventContext) -> Option<ComboboxEvent> + 'static,
    {
        self.on(EventType::KeyDown, handler);
    }

    /// Register a text input handler
    pub fn on_input<F>(&mut self, handler: F)
    where
        F: Fn(&EventContext) -> Option<ComboboxEvent> + 'static,
    {
        self.on(EventType::Input, handler);
    }

    // =========================================================================
    // Combobox bindings
    // =========================================================================

    /// Bindings for the text input
    pub fn for_input() -> Self {
        let mut handlers = Self::new();
        handlers.emit(EventType::Focus, ComboboxEvent::Focus);
        handlers.emit(EventType::Blur, ComboboxEvent::Blur);
        handlers.emit(EventType::Click, ComboboxEvent::InputClick);
        handlers.on_key_down(|ctx| ctx.key.clone().map(ComboboxEvent::KeyDown));
        handlers.on_input(|ctx| ctx.value.clone().map(ComboboxEvent::Change));
        handlers
    }

    /// Bindings for the menu container
    pub fn for_menu() -> Self {
        let mut handlers = Self::new();
        handlers.emit(EventType::PointerEnter, ComboboxEvent::MenuPointerEnter);
        handlers.emit(EventType::PointerLeave, ComboboxEvent::MenuPointerLeave);
        handlers.emit(EventType::TouchStart, ComboboxEvent::MenuTouchStart);
        handlers
    }

    /// Bindings for a selectable item row
    pub fn for_item(index: usize) -> Self {
        let mut handlers = Self::new();
        handlers.emit(EventType::PointerEnter, ComboboxEvent::ItemPointerEnter(index));
        handlers.emit(EventType::Click, ComboboxEvent::ItemClick(index));
        handlers
    }
}
