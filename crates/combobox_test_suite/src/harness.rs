//! Headless host for combobox scenarios
//!
//! [`TestHarness`] plays the part of a UI host: it renders the view,
//! mounts recording element handles, routes element events through the
//! rendered handler tables, applies effects and adopts value changes the
//! way a controlled text input would. Timers only elapse when
//! [`TestHarness::run_timers`] is called.

use anyhow::{Context, Result};
use combobox_core::{Combobox, ComboboxConfig, ComboboxEvent, Effects, ItemAccessors};
use combobox_platform::{KeyboardEvent, ManualScheduler, MemoryViewport, ScrollOffset, Viewport};
use combobox_render::{
    render_view, Callbacks, ComboboxView, EffectDispatcher, ElementHandle, ElementKey,
    ElementRegistry, EventContext, EventType, RenderFns,
};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

/// Something the host observed through a callback
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "callback", content = "value", rename_all = "snake_case")]
pub enum Observed {
    Change(String),
    Select(String),
    MenuVisibility(bool),
    Focus,
    Blur,
}

/// Element a harness event is aimed at
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Input,
    Menu,
    Item(usize),
}

type Shared<T> = Rc<RefCell<T>>;

/// Element handle that journals every imperative call
///
/// Focusing the input queues a focus event, like a real platform firing
/// `focus` after a programmatic `focus()`.
#[derive(Clone)]
pub struct RecordingElement {
    name: String,
    journal: Shared<Vec<String>>,
    focus_events: Option<Shared<VecDeque<ComboboxEvent>>>,
}

impl RecordingElement {
    fn record(&self, call: String) {
        self.journal.borrow_mut().push(call);
    }
}

impl ElementHandle for RecordingElement {
    fn focus(&self) {
        self.record(format!("{}.focus", self.name));
        if let Some(queue) = &self.focus_events {
            queue.borrow_mut().push_back(ComboboxEvent::Focus);
        }
    }

    fn blur(&self) {
        self.record(format!("{}.blur", self.name));
    }

    fn select(&self) {
        self.record(format!("{}.select", self.name));
    }

    fn set_selection_range(&self, start: usize, end: usize) {
        self.record(format!("{}.set_selection_range {} {}", self.name, start, end));
    }

    fn scroll_into_view(&self, container: &Self) {
        self.record(format!("{}.scroll_into_view {}", self.name, container.name));
    }
}

/// A combobox wired to a headless host
pub struct TestHarness<T> {
    combobox: Combobox<T>,
    fns: RenderFns<T, String>,
    view: ComboboxView<String>,
    registry: ElementRegistry<RecordingElement>,
    callbacks: Callbacks<T>,
    scheduler: ManualScheduler,
    viewport: Shared<MemoryViewport>,
    observed: Shared<Vec<Observed>>,
    journal: Shared<Vec<String>>,
    queue: Shared<VecDeque<ComboboxEvent>>,
    adopt: Shared<Option<String>>,
    focus_scroll: Option<ScrollOffset>,
    prevented: usize,
}

impl<T: Clone + 'static> TestHarness<T> {
    /// Mount a combobox over `items`
    pub fn new<F>(
        config: ComboboxConfig,
        accessors: ItemAccessors<T>,
        items: Arc<[T]>,
        render_item: F,
    ) -> Result<Self>
    where
        F: Fn(&T, bool) -> String + 'static,
    {
        let viewport: Shared<MemoryViewport> = Rc::default();
        let mut combobox = Combobox::new(config, accessors)
            .context("Invalid combobox configuration")?
            .with_viewport(Rc::clone(&viewport));
        let initial = combobox.set_items(items);

        let observed: Shared<Vec<Observed>> = Rc::default();
        let adopt: Shared<Option<String>> = Rc::default();
        let callbacks = recording_callbacks(&observed, &adopt);

        let fns = RenderFns::new(render_item);
        let mut registry = ElementRegistry::new();
        let view = render_view(&combobox, &fns, &mut registry);

        let mut harness = Self {
            combobox,
            fns,
            view,
            registry,
            callbacks,
            scheduler: ManualScheduler::new(),
            viewport,
            observed,
            journal: Rc::default(),
            queue: Rc::default(),
            adopt,
            focus_scroll: None,
            prevented: 0,
        };
        harness.settle(initial);
        Ok(harness)
    }

    /// Render the menu with `render_menu(items, menu_id, value)`
    pub fn with_render_menu<F>(mut self, render_menu: F) -> Self
    where
        F: Fn(Vec<combobox_render::RenderedItem<String>>, &str, &str) -> String + 'static,
    {
        self.fns = self.fns.render_menu(render_menu);
        self.render();
        self
    }

    /// Scroll the page to `offset` whenever the input is focused
    /// programmatically, as browsers do to reveal it
    pub fn with_focus_scroll(mut self, offset: ScrollOffset) -> Self {
        self.focus_scroll = Some(offset);
        self
    }

    // ========================================================================
    // Element events
    // ========================================================================

    /// Fire a raw element event through the rendered handler tables
    pub fn fire(&mut self, target: Target, ctx: EventContext) {
        let handlers = match target {
            Target::Input => Some(&self.view.input.handlers),
            Target::Menu => self.view.menu.as_ref().map(|menu| &menu.handlers),
            Target::Item(index) => self.view.items().get(index).map(|item| &item.handlers),
        };
        let events = match handlers {
            Some(handlers) => handlers.dispatch(&ctx),
            None => {
                tracing::debug!("{:?} is not rendered, {:?} dropped", target, ctx.event_type);
                return;
            }
        };
        for event in events {
            self.dispatch(event);
        }
    }

    /// Feed an engine event directly, bypassing the rendered handlers
    pub fn dispatch(&mut self, event: ComboboxEvent) {
        let effects = self.combobox.handle(event);
        self.settle(effects);
    }

    pub fn focus(&mut self) {
        self.fire(Target::Input, EventContext::new(EventType::Focus));
    }

    pub fn blur(&mut self) {
        self.fire(Target::Input, EventContext::new(EventType::Blur));
    }

    pub fn click_input(&mut self) {
        self.fire(Target::Input, EventContext::new(EventType::Click));
    }

    /// Replace the input text, as if the user typed or pasted it
    pub fn type_text(&mut self, value: &str) {
        self.fire(Target::Input, EventContext::input(value));
    }

    /// Press a key by its platform name (`"ArrowDown"`, `"Enter"`, `"a"`)
    pub fn press(&mut self, key: &str) {
        self.press_event(KeyboardEvent::from_name(key));
    }

    pub fn press_event(&mut self, key: KeyboardEvent) {
        self.fire(Target::Input, EventContext::key_down(key));
    }

    pub fn menu_enter(&mut self) {
        self.fire(Target::Menu, EventContext::new(EventType::PointerEnter));
    }

    pub fn menu_leave(&mut self) {
        self.fire(Target::Menu, EventContext::new(EventType::PointerLeave));
    }

    pub fn touch_menu(&mut self) {
        self.fire(Target::Menu, EventContext::new(EventType::TouchStart));
    }

    pub fn hover_item(&mut self, index: usize) {
        self.fire(Target::Item(index), EventContext::new(EventType::PointerEnter));
    }

    pub fn click_item(&mut self, index: usize) {
        self.fire(Target::Item(index), EventContext::new(EventType::Click));
    }

    // ========================================================================
    // Host-side updates
    // ========================================================================

    pub fn set_items(&mut self, items: Arc<[T]>) {
        let effects = self.combobox.set_items(items);
        self.settle(effects);
    }

    pub fn set_value(&mut self, value: &str) {
        let effects = self.combobox.set_value(value);
        self.settle(effects);
    }

    pub fn set_open(&mut self, open: Option<bool>) {
        let effects = self.combobox.set_open(open);
        self.settle(effects);
    }

    pub fn set_highlighted_index(&mut self, index: Option<usize>) {
        let effects = self.combobox.set_highlighted_index(index);
        self.settle(effects);
    }

    /// Move the page without the engine's involvement
    pub fn scroll_page(&mut self, offset: ScrollOffset) {
        self.viewport.borrow_mut().scroll_externally(offset);
    }

    /// Elapse every pending timer, shortest delay first
    pub fn run_timers(&mut self) -> usize {
        let due = self.scheduler.take_due();
        let count = due.len();
        for token in due {
            self.dispatch(ComboboxEvent::TimerElapsed(token));
        }
        count
    }

    /// Tear the combobox down
    pub fn unmount(&mut self) {
        let effects = self.combobox.unmount();
        EffectDispatcher::apply(effects, &self.registry, &mut self.callbacks, &mut self.scheduler);
        self.registry.clear();
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    pub fn combobox(&self) -> &Combobox<T> {
        &self.combobox
    }

    pub fn view(&self) -> &ComboboxView<String> {
        &self.view
    }

    pub fn registry(&self) -> &ElementRegistry<RecordingElement> {
        &self.registry
    }

    pub fn scheduler(&self) -> &ManualScheduler {
        &self.scheduler
    }

    pub fn value(&self) -> &str {
        self.combobox.value()
    }

    pub fn is_open(&self) -> bool {
        self.combobox.is_open()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.combobox.highlighted_index()
    }

    pub fn scroll_offset(&self) -> ScrollOffset {
        self.viewport.borrow().scroll_offset()
    }

    /// Every callback observed so far
    pub fn observed(&self) -> Vec<Observed> {
        self.observed.borrow().clone()
    }

    /// Values passed to `on_select`, in order
    pub fn selections(&self) -> Vec<String> {
        self.observed
            .borrow()
            .iter()
            .filter_map(|o| match o {
                Observed::Select(value) => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of observed callbacks equal to `expected`
    pub fn count(&self, expected: &Observed) -> usize {
        self.observed.borrow().iter().filter(|o| *o == expected).count()
    }

    /// Imperative calls made on mounted elements
    pub fn element_calls(&self) -> Vec<String> {
        self.journal.borrow().clone()
    }

    /// Number of dispatched batches that prevented the default action
    pub fn prevented(&self) -> usize {
        self.prevented
    }

    /// Forget observed callbacks and element calls
    pub fn clear_log(&mut self) {
        self.observed.borrow_mut().clear();
        self.journal.borrow_mut().clear();
    }

    // ========================================================================
    // Render loop
    // ========================================================================

    fn render(&mut self) {
        self.view = render_view(&self.combobox, &self.fns, &mut self.registry);
        let unmounted: Vec<ElementKey> = self
            .registry
            .keys()
            .filter(|key| self.registry.handle(*key).is_none())
            .collect();
        for key in unmounted {
            let element = RecordingElement {
                name: key.render_key(),
                journal: Rc::clone(&self.journal),
                focus_events: (key == ElementKey::Input).then(|| Rc::clone(&self.queue)),
            };
            self.registry.attach(key, element);
        }
    }

    /// Re-render, apply effects, then follow up on adopted values and
    /// platform events until the host is quiet
    fn settle(&mut self, effects: Effects<T>) {
        let mut batch = effects;
        loop {
            self.render();
            let outcome = EffectDispatcher::apply(
                batch,
                &self.registry,
                &mut self.callbacks,
                &mut self.scheduler,
            );
            if outcome.default_prevented {
                self.prevented += 1;
            }

            let adopted = self.adopt.borrow_mut().take();
            if let Some(value) = adopted {
                batch = self.combobox.set_value(value);
                continue;
            }

            let queued = self.queue.borrow_mut().pop_front();
            match queued {
                Some(event) => {
                    if let (ComboboxEvent::Focus, Some(offset)) = (&event, self.focus_scroll) {
                        self.viewport.borrow_mut().scroll_externally(offset);
                    }
                    batch = self.combobox.handle(event);
                }
                None => break,
            }
        }
    }
}

fn recording_callbacks<T>(observed: &Shared<Vec<Observed>>, adopt: &Shared<Option<String>>) -> Callbacks<T> {
    let on_change = (Rc::clone(observed), Rc::clone(adopt));
    let on_select = (Rc::clone(observed), Rc::clone(adopt));
    let on_visibility = Rc::clone(observed);
    let on_focus = Rc::clone(observed);
    let on_blur = Rc::clone(observed);

    Callbacks::new()
        .on_change(move |value| {
            on_change.0.borrow_mut().push(Observed::Change(value.to_string()));
            *on_change.1.borrow_mut() = Some(value.to_string());
        })
        .on_select(move |value, _| {
            on_select.0.borrow_mut().push(Observed::Select(value.to_string()));
            *on_select.1.borrow_mut() = Some(value.to_string());
        })
        .on_menu_visibility_change(move |open| {
            on_visibility.borrow_mut().push(Observed::MenuVisibility(open));
        })
        .on_focus(move || on_focus.borrow_mut().push(Observed::Focus))
        .on_blur(move || on_blur.borrow_mut().push(Observed::Blur))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{entry_accessors, render_entry, state_entries, Entry};

    fn harness() -> TestHarness<Entry> {
        TestHarness::new(
            ComboboxConfig::new("states-menu"),
            entry_accessors(),
            state_entries(),
            render_entry,
        )
        .unwrap()
    }

    #[test]
    fn test_typing_adopts_value() {
        let mut harness = harness();
        harness.type_text("ar");
        assert_eq!(harness.value(), "ar");
        assert!(harness.is_open());
        assert_eq!(
            harness.observed(),
            vec![Observed::Change("ar".to_string()), Observed::MenuVisibility(true)]
        );
    }

    #[test]
    fn test_elements_mounted_after_render() {
        let mut harness = harness();
        assert!(harness.registry().handle(ElementKey::Input).is_some());
        assert!(!harness.registry().contains(ElementKey::Menu));

        harness.type_text("new");
        assert!(harness.registry().handle(ElementKey::Menu).is_some());
        assert_eq!(harness.view().items().len(), 4);
        assert!(harness.registry().handle(ElementKey::Item(3)).is_some());
    }

    #[test]
    fn test_events_on_unrendered_targets_dropped() {
        let mut harness = harness();
        harness.click_item(2);
        harness.menu_enter();
        assert!(harness.observed().is_empty());
        assert!(!harness.combobox().focus_arbiter().ignore_blur());
    }
}
