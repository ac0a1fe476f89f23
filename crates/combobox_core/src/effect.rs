//! Effects returned by the engine
//!
//! Every engine call settles its state first and then hands back the side
//! effects in the order the host must apply them.

use combobox_platform::TimerToken;
use smallvec::SmallVec;
use std::time::Duration;

/// Delay of the second scroll restore after a suppressed blur
pub const SCROLL_RESTORE_DELAY: Duration = Duration::ZERO;

/// A side effect for the host to perform
#[derive(Clone, Debug, PartialEq)]
pub enum Effect<T> {
    /// Cancel the default action of the current key event
    PreventDefault,
    /// Report a new input value (`on_change`)
    Change(String),
    /// Report a committed selection (`on_select`)
    Select { value: String, item: T },
    /// Report a menu visibility change (`on_menu_visibility_change`)
    MenuVisibilityChange(bool),
    /// Forward a focus event to the caller's `on_focus`
    ForwardFocus,
    /// Forward a blur event to the caller's `on_blur`
    ForwardBlur,
    /// Move keyboard focus back to the input
    FocusInput,
    /// Select all text in the input
    SelectInputText,
    /// Place the input's selection (or caret when `start == end`)
    SetSelectionRange { start: usize, end: usize },
    /// Scroll the filtered item at `index` into view within the menu
    ScrollItemIntoView { index: usize },
    /// Start a timer and report it back through `TimerElapsed`
    ScheduleTimer { token: TimerToken, delay: Duration },
    /// Stop a previously scheduled timer
    CancelTimer(TimerToken),
}

/// Ordered effects from one engine call
#[derive(Clone, Debug, PartialEq)]
pub struct Effects<T>(SmallVec<[Effect<T>; 4]>);

impl<T> Default for Effects<T> {
    fn default() -> Self {
        Self(SmallVec::new())
    }
}

impl<T> Effects<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect<T>) {
        self.0.push(effect);
    }

    pub fn extend(&mut self, other: Effects<T>) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Effect<T>> {
        self.0.iter()
    }

    /// Values and items of every `Select` effect, in order
    pub fn selections(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.0.iter().filter_map(|effect| match effect {
            Effect::Select { value, item } => Some((value.as_str(), item)),
            _ => None,
        })
    }

    /// Every visibility notification, in order
    pub fn visibility_changes(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().filter_map(|effect| match effect {
            Effect::MenuVisibilityChange(open) => Some(*open),
            _ => None,
        })
    }
}

impl<T: PartialEq> Effects<T> {
    pub fn contains(&self, effect: &Effect<T>) -> bool {
        self.0.contains(effect)
    }
}

impl<T> IntoIterator for Effects<T> {
    type Item = Effect<T>;
    type IntoIter = smallvec::IntoIter<[Effect<T>; 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Effects<T> {
    type Item = &'a Effect<T>;
    type IntoIter = std::slice::Iter<'a, Effect<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T> FromIterator<Effect<T>> for Effects<T> {
    fn from_iter<I: IntoIterator<Item = Effect<T>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effects_preserve_order() {
        let mut effects: Effects<&str> = Effects::new();
        effects.push(Effect::MenuVisibilityChange(false));
        effects.push(Effect::Select {
            value: "Arizona".to_string(),
            item: "AZ",
        });
        effects.push(Effect::MenuVisibilityChange(true));

        assert_eq!(effects.len(), 3);
        assert_eq!(effects.visibility_changes().collect::<Vec<_>>(), vec![false, true]);
        assert_eq!(effects.selections().collect::<Vec<_>>(), vec![("Arizona", &"AZ")]);
        assert!(matches!(
            effects.into_iter().next(),
            Some(Effect::MenuVisibilityChange(false))
        ));
    }
}
