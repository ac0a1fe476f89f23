//! Imperative control of the combobox input
//!
//! Mirrors the handful of text-input methods a host may want to call on the
//! combobox directly. Calls made before the input is mounted are silent
//! no-ops.

use crate::registry::{ElementHandle, ElementKey, ElementRegistry};

/// Imperative access to the mounted input
pub struct InputControl<'a, H> {
    registry: &'a ElementRegistry<H>,
}

impl<'a, H: ElementHandle> InputControl<'a, H> {
    pub fn new(registry: &'a ElementRegistry<H>) -> Self {
        Self { registry }
    }

    fn with_input<R>(&self, op: &str, f: impl FnOnce(&H) -> R) -> Option<R> {
        match self.registry.handle(ElementKey::Input) {
            Some(handle) => Some(f(handle)),
            None => {
                tracing::trace!("{} on unmounted input ignored", op);
                None
            }
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.registry.handle(ElementKey::Input).is_some()
    }

    pub fn focus(&self) {
        self.with_input("focus", |input| input.focus());
    }

    pub fn blur(&self) {
        self.with_input("blur", |input| input.blur());
    }

    pub fn click(&self) {
        self.with_input("click", |input| input.click());
    }

    /// Select all text
    pub fn select(&self) {
        self.with_input("select", |input| input.select());
    }

    pub fn set_selection_range(&self, start: usize, end: usize) {
        self.with_input("set_selection_range", |input| {
            input.set_selection_range(start, end)
        });
    }

    pub fn set_range_text(&self, replacement: &str, start: usize, end: usize) {
        self.with_input("set_range_text", |input| {
            input.set_range_text(replacement, start, end)
        });
    }

    /// Validity of the input, or `None` when it is not mounted
    pub fn check_validity(&self) -> Option<bool> {
        self.with_input("check_validity", |input| input.check_validity())
    }

    pub fn set_custom_validity(&self, message: &str) {
        self.with_input("set_custom_validity", |input| {
            input.set_custom_validity(message)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Probe {
        calls: RefCell<Vec<String>>,
    }

    impl ElementHandle for &Probe {
        fn focus(&self) {
            self.calls.borrow_mut().push("focus".to_string());
        }

        fn set_range_text(&self, replacement: &str, start: usize, end: usize) {
            self.calls
                .borrow_mut()
                .push(format!("range_text {} {}..{}", replacement, start, end));
        }

        fn check_validity(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_missing_input_is_noop() {
        let registry: ElementRegistry<&Probe> = ElementRegistry::new();
        let control = InputControl::new(&registry);
        control.focus();
        control.select();
        assert!(!control.is_mounted());
        assert_eq!(control.check_validity(), None);
    }

    #[test]
    fn test_calls_reach_mounted_input() {
        let probe = Probe::default();
        let mut registry = ElementRegistry::new();
        registry.register(ElementKey::Input, None);
        registry.attach(ElementKey::Input, &probe);

        let control = InputControl::new(&registry);
        control.focus();
        control.set_range_text("Ohio", 0, 2);
        control.blur();

        assert_eq!(control.check_validity(), Some(false));
        assert_eq!(
            *probe.calls.borrow(),
            vec!["focus".to_string(), "range_text Ohio 0..2".to_string()]
        );
    }
}
