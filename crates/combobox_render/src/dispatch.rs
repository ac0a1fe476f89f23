//! Effect dispatch
//!
//! Applies the [`Effects`] returned by the engine in order: caller
//! callbacks, imperative calls on mounted elements, and timer requests.
//! Effects aimed at elements that are not mounted are dropped.

use crate::registry::{ElementHandle, ElementKey, ElementRegistry};
use combobox_core::{Effect, Effects};
use combobox_platform::Scheduler;

type ChangeFn = Box<dyn FnMut(&str)>;
type SelectFn<T> = Box<dyn FnMut(&str, &T)>;
type VisibilityFn = Box<dyn FnMut(bool)>;
type NotifyFn = Box<dyn FnMut()>;

/// Caller callbacks
///
/// Every callback is optional; effects with no callback are dropped.
pub struct Callbacks<T> {
    on_change: Option<ChangeFn>,
    on_select: Option<SelectFn<T>>,
    on_menu_visibility_change: Option<VisibilityFn>,
    on_focus: Option<NotifyFn>,
    on_blur: Option<NotifyFn>,
}

impl<T> Default for Callbacks<T> {
    fn default() -> Self {
        Self {
            on_change: None,
            on_select: None,
            on_menu_visibility_change: None,
            on_focus: None,
            on_blur: None,
        }
    }
}

impl<T> Callbacks<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the raw input text on every change
    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Called with the display value and item of every selection
    pub fn on_select<F>(mut self, f: F) -> Self
    where
        F: FnMut(&str, &T) + 'static,
    {
        self.on_select = Some(Box::new(f));
        self
    }

    /// Called when the menu's open intent changes
    pub fn on_menu_visibility_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(bool) + 'static,
    {
        self.on_menu_visibility_change = Some(Box::new(f));
        self
    }

    /// Called when the input gains focus, except focus restored after a
    /// suppressed blur
    pub fn on_focus<F>(mut self, f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_focus = Some(Box::new(f));
        self
    }

    /// Called when the input loses focus, except suppressed blurs
    pub fn on_blur<F>(mut self, f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_blur = Some(Box::new(f));
        self
    }
}

impl<T> std::fmt::Debug for Callbacks<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_change", &self.on_change.is_some())
            .field("on_select", &self.on_select.is_some())
            .field(
                "on_menu_visibility_change",
                &self.on_menu_visibility_change.is_some(),
            )
            .field("on_focus", &self.on_focus.is_some())
            .field("on_blur", &self.on_blur.is_some())
            .finish()
    }
}

/// Result of applying one batch of effects
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// The host must suppress the triggering event's default action
    pub default_prevented: bool,
    /// Effects that reached a callback, element or scheduler
    pub applied: usize,
}

/// Applies effects against the element registry
pub struct EffectDispatcher;

impl EffectDispatcher {
    /// Apply `effects` in order
    ///
    /// Call after re-rendering so item handles belong to the displayed rows.
    pub fn apply<T, H, S>(
        effects: Effects<T>,
        registry: &ElementRegistry<H>,
        callbacks: &mut Callbacks<T>,
        scheduler: &mut S,
    ) -> DispatchOutcome
    where
        H: ElementHandle,
        S: Scheduler + ?Sized,
    {
        let mut outcome = DispatchOutcome::default();
        for effect in effects {
            let applied = match effect {
                Effect::PreventDefault => {
                    outcome.default_prevented = true;
                    true
                }
                Effect::Change(value) => call(&mut callbacks.on_change, |f| f(value.as_str())),
                Effect::Select { value, item } => {
                    call(&mut callbacks.on_select, |f| f(value.as_str(), &item))
                }
                Effect::MenuVisibilityChange(open) => {
                    call(&mut callbacks.on_menu_visibility_change, |f| f(open))
                }
                Effect::ForwardFocus => call(&mut callbacks.on_focus, |f| f()),
                Effect::ForwardBlur => call(&mut callbacks.on_blur, |f| f()),
                Effect::FocusInput => with_input(registry, "focus", |input| input.focus()),
                Effect::SelectInputText => with_input(registry, "select", |input| input.select()),
                Effect::SetSelectionRange { start, end } => {
                    with_input(registry, "set_selection_range", |input| {
                        input.set_selection_range(start, end)
                    })
                }
                Effect::ScrollItemIntoView { index } => scroll_item(registry, index),
                Effect::ScheduleTimer { token, delay } => {
                    scheduler.schedule(token, delay);
                    true
                }
                Effect::CancelTimer(token) => {
                    scheduler.cancel(token);
                    true
                }
            };
            if applied {
                outcome.applied += 1;
            }
        }
        outcome
    }
}

fn call<F: ?Sized>(slot: &mut Option<Box<F>>, f: impl FnOnce(&mut F)) -> bool {
    match slot.as_deref_mut() {
        Some(callback) => {
            f(callback);
            true
        }
        None => false,
    }
}

fn with_input<H: ElementHandle>(
    registry: &ElementRegistry<H>,
    op: &str,
    f: impl FnOnce(&H),
) -> bool {
    match registry.handle(ElementKey::Input) {
        Some(input) => {
            f(input);
            true
        }
        None => {
            tracing::trace!("{} on unmounted input dropped", op);
            false
        }
    }
}

fn scroll_item<H: ElementHandle>(registry: &ElementRegistry<H>, index: usize) -> bool {
    match (
        registry.handle(ElementKey::Item(index)),
        registry.handle(ElementKey::Menu),
    ) {
        (Some(item), Some(menu)) => {
            item.scroll_into_view(menu);
            true
        }
        _ => {
            tracing::trace!("item {} not mounted, scroll dropped", index);
            false
        }
    }
}
