//! The combobox engine
//!
//! [`Combobox`] ties the filter pipeline, highlight navigator, menu state
//! machine and focus arbiter into one control loop. The host drives it with
//! [`ComboboxEvent`]s and property updates; each call returns the effects of
//! the resulting transition, ordered as:
//!
//! 1. effects of the event itself (default prevention, change reports,
//!    re-focusing, forwarded focus/blur, timers)
//! 2. the menu visibility notification, if visibility changed
//! 3. scrolling the highlighted item into view
//! 4. continuations that run once the new state is in place (selection
//!    commits, caret placement)

use crate::accessors::ItemAccessors;
use crate::config::ComboboxConfig;
use crate::debug::DebugHistory;
use crate::effect::{Effect, Effects, SCROLL_RESTORE_DELAY};
use crate::error::Result;
use crate::event::ComboboxEvent;
use crate::filter::{FilterCache, FilteredItems};
use crate::focus::{BlurOutcome, FocusArbiter, FocusOutcome};
use crate::highlight::{Candidates, HighlightNavigator};
use crate::menu::MenuState;
use combobox_platform::{key_codes, Key, KeyboardEvent, MemoryViewport, Viewport};
use serde::Serialize;
use std::cell::RefCell;
use std::sync::Arc;

/// Observable engine state, as recorded in debug snapshots
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ComboboxState {
    pub value: String,
    /// Whether the menu is displayed
    pub is_open: bool,
    pub highlighted_index: Option<usize>,
    pub ignore_blur: bool,
    pub ignore_focus: bool,
    pub focused: bool,
}

/// Rows of the filtered list as seen by the navigator
struct VisibleItems<'a, T> {
    filtered: &'a FilteredItems<T>,
    accessors: &'a ItemAccessors<T>,
}

impl<T> Candidates for VisibleItems<'_, T> {
    fn len(&self) -> usize {
        self.filtered.len()
    }

    fn is_selectable(&self, index: usize) -> bool {
        self.filtered
            .get(index)
            .is_some_and(|item| self.accessors.is_selectable(item))
    }

    fn display_value(&self, index: usize) -> String {
        self.filtered
            .get(index)
            .map(|item| self.accessors.item_value(item))
            .unwrap_or_default()
    }
}

/// State observed before a transition, used to derive notifications
struct Before {
    open_intent: bool,
    visible: bool,
    highlighted: Option<usize>,
}

/// Headless ARIA combobox
///
/// The value is controlled by the caller: the engine reports desired changes
/// through [`Effect::Change`] and [`Effect::Select`] and only adopts a new
/// value through [`Combobox::set_value`].
pub struct Combobox<T> {
    config: ComboboxConfig,
    accessors: ItemAccessors<T>,
    items: Arc<[T]>,
    value: String,
    cache: RefCell<FilterCache<T>>,
    highlight: HighlightNavigator,
    /// The highlight was cleared on purpose and must not be re-proposed
    /// until the value changes or the menu is shown again
    dismissed: bool,
    menu: MenuState,
    focus: FocusArbiter,
    focused: bool,
    viewport: Box<dyn Viewport>,
    history: Option<DebugHistory>,
}

impl<T: Clone> Combobox<T> {
    /// Create an engine with no items and an empty value
    pub fn new(config: ComboboxConfig, accessors: ItemAccessors<T>) -> Result<Self> {
        config.validate()?;
        let history = config
            .debug
            .then(|| DebugHistory::new(config.debug_history));
        Ok(Self {
            menu: MenuState::new(config.open),
            config,
            accessors,
            items: Arc::from(Vec::new()),
            value: String::new(),
            cache: RefCell::new(FilterCache::new()),
            highlight: HighlightNavigator::new(),
            dismissed: false,
            focus: FocusArbiter::new(),
            focused: false,
            viewport: Box::new(MemoryViewport::new()),
            history,
        })
    }

    /// Use `viewport` for scroll save/restore around suppressed blurs
    pub fn with_viewport(mut self, viewport: impl Viewport + 'static) -> Self {
        self.viewport = Box::new(viewport);
        self
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn config(&self) -> &ComboboxConfig {
        &self.config
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn items(&self) -> &Arc<[T]> {
        &self.items
    }

    /// Whether the menu is displayed
    pub fn is_open(&self) -> bool {
        self.menu.is_visible()
    }

    pub fn menu_state(&self) -> MenuState {
        self.menu
    }

    /// Highlighted position in the filtered list
    pub fn highlighted_index(&self) -> Option<usize> {
        self.highlight.highlighted()
    }

    /// Highlighted position, only while the menu is displayed
    pub fn visible_highlight(&self) -> Option<usize> {
        self.highlight.highlighted().filter(|_| self.is_open())
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus_arbiter(&self) -> &FocusArbiter {
        &self.focus
    }

    pub fn viewport(&self) -> &dyn Viewport {
        self.viewport.as_ref()
    }

    /// Visible items for the current `(items, value)` pair
    pub fn filtered_items(&self) -> FilteredItems<T> {
        self.cache
            .borrow_mut()
            .get(&self.items, &self.value, &self.accessors)
    }

    /// `(hits, misses)` of the filter cache
    pub fn filter_cache_stats(&self) -> (u64, u64) {
        let cache = self.cache.borrow();
        (cache.hits(), cache.misses())
    }

    /// Display value of `item`
    pub fn item_value(&self, item: &T) -> String {
        self.accessors.item_value(item)
    }

    /// Whether `item` can be highlighted and selected
    pub fn is_item_selectable(&self, item: &T) -> bool {
        self.accessors.is_selectable(item)
    }

    /// DOM id of the filtered item at `index`
    pub fn item_id(&self, index: usize) -> String {
        format!("{}-item-{}", self.config.menu_id, index)
    }

    /// Live-region text: the result count while the menu is open and the
    /// value is non-empty
    pub fn announcement(&self) -> Option<String> {
        if self.is_open() && !self.value.is_empty() {
            Some(format!(
                "{} {}",
                self.filtered_items().len(),
                self.config.results_available_copy
            ))
        } else {
            None
        }
    }

    pub fn state(&self) -> ComboboxState {
        ComboboxState {
            value: self.value.clone(),
            is_open: self.is_open(),
            highlighted_index: self.highlight.highlighted(),
            ignore_blur: self.focus.ignore_blur(),
            ignore_focus: self.focus.ignore_focus(),
            focused: self.focused,
        }
    }

    pub fn debug_history(&self) -> Option<&DebugHistory> {
        self.history.as_ref()
    }

    /// Debug snapshots as pretty JSON, when `debug` is on
    pub fn debug_json(&self) -> Option<Result<String>> {
        self.history.as_ref().map(DebugHistory::to_json)
    }

    // ========================================================================
    // Property updates
    // ========================================================================

    /// Replace the candidate items
    pub fn set_items(&mut self, items: Arc<[T]>) -> Effects<T> {
        let before = self.before();
        self.items = items;
        self.settle_props(before, false, "set_items")
    }

    /// Adopt a new controlled value
    pub fn set_value(&mut self, value: impl Into<String>) -> Effects<T> {
        let before = self.before();
        let value = value.into();
        let changed = value != self.value;
        self.value = value;
        self.settle_props(before, changed, "set_value")
    }

    /// Manage menu visibility externally, or hand it back with `None`
    pub fn set_open(&mut self, open: Option<bool>) -> Effects<T> {
        let before = self.before();
        self.config.open = open;
        self.menu.set_managed(open);
        self.settle_props(before, false, "set_open")
    }

    /// Replace the configuration
    pub fn set_config(&mut self, config: ComboboxConfig) -> Result<Effects<T>> {
        config.validate()?;
        let before = self.before();
        self.menu.set_managed(config.open);
        self.history = match (config.debug, self.history.take()) {
            (false, _) => None,
            (true, Some(history)) if config.debug_history == self.config.debug_history => {
                Some(history)
            }
            (true, _) => Some(DebugHistory::new(config.debug_history)),
        };
        self.config = config;
        Ok(self.settle_props(before, false, "set_config"))
    }

    /// Highlight a filtered item directly, or clear the highlight
    ///
    /// Out-of-range and non-selectable indices clear the highlight.
    pub fn set_highlighted_index(&mut self, index: Option<usize>) -> Effects<T> {
        let before = self.before();
        let filtered = self.filtered_items();
        let visible = VisibleItems {
            filtered: &filtered,
            accessors: &self.accessors,
        };
        match index {
            Some(index) if self.highlight.set(&visible, index) => {}
            _ => self.dismiss_highlight(),
        }
        self.settle(before, false, "set_highlighted_index", Effects::new(), Effects::new())
    }

    /// Tear down transient state before the host drops the combobox
    ///
    /// Cancels any pending scroll-restore timer. The returned effects must be
    /// applied so no timer outlives the component.
    pub fn unmount(&mut self) -> Effects<T> {
        let mut effects = Effects::new();
        if let Some(token) = self.focus.teardown() {
            effects.push(Effect::CancelTimer(token));
        }
        self.focused = false;
        self.highlight.clear();
        self.menu.close();
        self.cache.borrow_mut().invalidate();
        tracing::debug!("combobox {} unmounted", self.config.menu_id);
        effects
    }

    // ========================================================================
    // Event handling
    // ========================================================================

    /// Apply one event and return its effects
    pub fn handle(&mut self, event: ComboboxEvent) -> Effects<T> {
        let before = self.before();
        let cause = event.name();
        let mut immediate = Effects::new();
        let mut deferred = Effects::new();

        match event {
            ComboboxEvent::KeyDown(key) => self.on_key_down(&key, &mut immediate, &mut deferred),
            ComboboxEvent::Change(value) => {
                if !self.config.open_on_focus {
                    self.menu.set_open(!value.is_empty());
                }
                immediate.push(Effect::Change(value));
            }
            ComboboxEvent::Focus => self.on_focus(&mut immediate),
            ComboboxEvent::Blur => self.on_blur(&mut immediate),
            ComboboxEvent::InputClick => {
                if self.focused && !self.menu.is_open() {
                    self.menu.open();
                }
            }
            ComboboxEvent::MenuPointerEnter | ComboboxEvent::MenuTouchStart => self.focus.hold(),
            ComboboxEvent::MenuPointerLeave => self.focus.release(),
            ComboboxEvent::ItemPointerEnter(index) => self.on_item_pointer_enter(index),
            ComboboxEvent::ItemClick(index) => self.on_item_click(index, &mut deferred),
            ComboboxEvent::TimerElapsed(token) => {
                if !self.focus.on_timer(token, self.viewport.as_mut()) {
                    tracing::trace!("ignoring unknown timer {:?}", token);
                }
            }
        }

        self.settle(before, false, cause, immediate, deferred)
    }

    fn on_key_down(
        &mut self,
        event: &KeyboardEvent,
        immediate: &mut Effects<T>,
        deferred: &mut Effects<T>,
    ) {
        if !event.is_press() {
            return;
        }

        match event.key {
            Key::Down | Key::Up => {
                immediate.push(Effect::PreventDefault);
                let filtered = self.filtered_items();
                let visible = VisibleItems {
                    filtered: &filtered,
                    accessors: &self.accessors,
                };
                let moved = if event.key == Key::Down {
                    self.highlight.move_next(&visible)
                } else {
                    self.highlight.move_prev(&visible)
                };
                if moved.is_some() {
                    self.menu.open();
                }
            }
            Key::Enter => {
                // Only a plain Enter commits. IME composition reports the same
                // key with a different code and must not select.
                if event.key_code != key_codes::ENTER {
                    tracing::trace!("ignoring Enter with key code {}", event.key_code);
                    return;
                }
                self.focus.release();
                if !self.menu.is_visible() {
                    return;
                }
                let filtered = self.filtered_items();
                let highlighted = self
                    .highlight
                    .highlighted()
                    .and_then(|index| filtered.get(index));
                match highlighted {
                    None => {
                        self.menu.close();
                        deferred.push(Effect::SelectInputText);
                    }
                    Some(item) => {
                        immediate.push(Effect::PreventDefault);
                        let item = item.clone();
                        let value = self.accessors.item_value(&item);
                        let end = value.chars().count();
                        tracing::debug!("selected {:?} with Enter", value);
                        self.menu.close();
                        self.dismiss_highlight();
                        deferred.push(Effect::SetSelectionRange { start: end, end });
                        deferred.push(Effect::Select { value, item });
                    }
                }
            }
            Key::Escape => {
                self.focus.release();
                self.dismiss_highlight();
                self.menu.close();
            }
            Key::Tab => self.focus.release(),
            _ => {
                if !self.menu.is_open() {
                    self.menu.open();
                }
            }
        }
    }

    fn on_focus(&mut self, immediate: &mut Effects<T>) {
        self.focused = true;
        match self.focus.on_focus(self.viewport.as_mut()) {
            FocusOutcome::Restored { cancel, schedule } => {
                if let Some(token) = cancel {
                    immediate.push(Effect::CancelTimer(token));
                }
                immediate.push(Effect::ScheduleTimer {
                    token: schedule,
                    delay: SCROLL_RESTORE_DELAY,
                });
            }
            FocusOutcome::Proceed => {
                if self.config.open_on_focus {
                    self.menu.open();
                }
                immediate.push(Effect::ForwardFocus);
            }
        }
    }

    fn on_blur(&mut self, immediate: &mut Effects<T>) {
        match self.focus.on_blur(self.viewport.as_ref()) {
            BlurOutcome::Suppressed { cancel } => {
                if let Some(token) = cancel {
                    immediate.push(Effect::CancelTimer(token));
                }
                immediate.push(Effect::FocusInput);
            }
            BlurOutcome::Proceed => {
                self.focused = false;
                if self.config.select_on_blur {
                    let filtered = self.filtered_items();
                    if let Some(item) = self
                        .highlight
                        .highlighted()
                        .and_then(|index| filtered.get(index))
                    {
                        let value = self.accessors.item_value(item);
                        tracing::debug!("selected {:?} on blur", value);
                        immediate.push(Effect::Select {
                            value,
                            item: item.clone(),
                        });
                    }
                }
                self.menu.close();
                self.dismiss_highlight();
                immediate.push(Effect::ForwardBlur);
            }
        }
    }

    fn on_item_pointer_enter(&mut self, index: usize) {
        if !self.menu.is_visible() {
            tracing::trace!("ignoring pointer over item {} while menu is hidden", index);
            return;
        }
        let filtered = self.filtered_items();
        let visible = VisibleItems {
            filtered: &filtered,
            accessors: &self.accessors,
        };
        if !self.highlight.set(&visible, index) {
            tracing::trace!("ignoring pointer over non-selectable item {}", index);
        }
    }

    fn on_item_click(&mut self, index: usize, deferred: &mut Effects<T>) {
        if !self.menu.is_visible() {
            tracing::trace!("ignoring click on item {} while menu is hidden", index);
            return;
        }
        let filtered = self.filtered_items();
        let Some(item) = filtered.get(index) else {
            tracing::warn!("click on item {} outside {} visible items", index, filtered.len());
            return;
        };
        if !self.accessors.is_selectable(item) {
            tracing::trace!("ignoring click on non-selectable item {}", index);
            return;
        }

        let value = self.accessors.item_value(item);
        tracing::debug!("selected {:?} with pointer", value);
        // The menu goes away before a pointer-leave could arrive
        self.focus.release();
        self.menu.close();
        self.dismiss_highlight();
        deferred.push(Effect::Select {
            value,
            item: item.clone(),
        });
    }

    // ========================================================================
    // Settling
    // ========================================================================

    fn dismiss_highlight(&mut self) {
        self.highlight.clear();
        self.dismissed = true;
    }

    fn before(&self) -> Before {
        Before {
            open_intent: self.menu.is_open(),
            visible: self.menu.is_visible(),
            highlighted: self.highlight.highlighted(),
        }
    }

    fn settle_props(&mut self, before: Before, value_changed: bool, cause: &'static str) -> Effects<T> {
        let len = self.filtered_items().len();
        self.highlight.guard_range(len);
        self.settle(before, value_changed, cause, Effects::new(), Effects::new())
    }

    fn settle(
        &mut self,
        before: Before,
        value_changed: bool,
        cause: &'static str,
        immediate: Effects<T>,
        deferred: Effects<T>,
    ) -> Effects<T> {
        let visible = self.menu.is_visible();

        if value_changed
            || (visible && !before.visible)
            || self.highlight.highlighted().is_some()
        {
            self.dismissed = false;
        }

        // A dismissed highlight stays cleared even while a managed menu
        // remains visible.
        let wants_proposal = value_changed
            || (visible && !self.dismissed && self.highlight.highlighted().is_none());
        if self.config.auto_highlight && wants_proposal {
            let filtered = self.filtered_items();
            let candidates = VisibleItems {
                filtered: &filtered,
                accessors: &self.accessors,
            };
            self.highlight.auto_highlight(&candidates, &self.value);
        }

        let mut effects = immediate;

        let open_intent = self.menu.is_open();
        if open_intent != before.open_intent {
            effects.push(Effect::MenuVisibilityChange(open_intent));
        } else if !self.menu.is_managed() && visible != before.visible {
            // Handing visibility back to the engine shows or hides the menu
            // without the intent moving
            effects.push(Effect::MenuVisibilityChange(visible));
        }

        if let Some(index) = self.highlight.highlighted() {
            if visible && (before.highlighted != Some(index) || !before.visible) {
                effects.push(Effect::ScrollItemIntoView { index });
            }
        }

        if self.history.is_some() {
            let state = self.state();
            if let Some(history) = self.history.as_mut() {
                history.record(cause, state);
            }
        }

        effects.extend(deferred);
        effects
    }
}

impl<T> std::fmt::Debug for Combobox<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Combobox")
            .field("menu_id", &self.config.menu_id)
            .field("value", &self.value)
            .field("items", &self.items.len())
            .field("menu", &self.menu)
            .field("highlighted", &self.highlight.highlighted())
            .field("focused", &self.focused)
            .finish()
    }
}
