//! Focus/blur arbitration
//!
//! The suggestion menu is not part of the input, so pressing a menu item
//! blurs the input before the item's click arrives. While the pointer is
//! over the menu, blurs are treated as spurious: the input is re-focused and
//! the page scroll offset is put back where it was, once immediately and
//! once more on the next scheduler tick.

use combobox_platform::{ScrollOffset, TimerToken, Viewport};

/// What the engine should do with a blur
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BlurOutcome {
    /// Spurious blur: re-focus the input and skip normal blur handling
    Suppressed {
        /// Restore timer from an earlier cycle that must be cancelled
        cancel: Option<TimerToken>,
    },
    /// Real blur: close the menu and forward the blur
    Proceed,
}

/// What the engine should do with a focus
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FocusOutcome {
    /// Focus that follows a suppressed blur
    Restored {
        /// Restore timer from an earlier cycle that must be cancelled
        cancel: Option<TimerToken>,
        /// Timer that restores the offset again on the next tick
        schedule: TimerToken,
    },
    /// Ordinary focus
    Proceed,
}

/// Resolves blur-before-click races between the input and the menu
///
/// A saved scroll offset doubles as the "ignore the next focus" flag: the
/// focus that follows a suppressed blur consumes it.
#[derive(Clone, Debug, Default)]
pub struct FocusArbiter {
    ignore_blur: bool,
    pending_scroll: Option<ScrollOffset>,
    scroll_timer: Option<(TimerToken, ScrollOffset)>,
}

impl FocusArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore_blur(&self) -> bool {
        self.ignore_blur
    }

    pub fn ignore_focus(&self) -> bool {
        self.pending_scroll.is_some()
    }

    /// Offset captured by the last suppressed blur, not yet restored
    pub fn pending_scroll(&self) -> Option<ScrollOffset> {
        self.pending_scroll
    }

    /// Restore timer still waiting to fire
    pub fn scroll_timer(&self) -> Option<TimerToken> {
        self.scroll_timer.map(|(token, _)| token)
    }

    /// Pointer entered (or touch started on) the menu
    pub fn hold(&mut self) {
        self.ignore_blur = true;
    }

    /// Pointer left the menu, or the interaction it guarded is finished
    pub fn release(&mut self) {
        self.ignore_blur = false;
    }

    pub fn on_blur(&mut self, viewport: &dyn Viewport) -> BlurOutcome {
        if !self.ignore_blur {
            return BlurOutcome::Proceed;
        }

        let offset = viewport.scroll_offset();
        tracing::debug!(
            "suppressing blur while pointer is over menu, saved scroll ({}, {})",
            offset.x,
            offset.y
        );
        self.pending_scroll = Some(offset);
        BlurOutcome::Suppressed {
            cancel: self.scroll_timer.take().map(|(token, _)| token),
        }
    }

    pub fn on_focus(&mut self, viewport: &mut dyn Viewport) -> FocusOutcome {
        let Some(offset) = self.pending_scroll.take() else {
            return FocusOutcome::Proceed;
        };

        viewport.set_scroll_offset(offset);
        let cancel = self.scroll_timer.take().map(|(token, _)| token);
        let schedule = TimerToken::next();
        self.scroll_timer = Some((schedule, offset));
        FocusOutcome::Restored { cancel, schedule }
    }

    /// A timer elapsed. Returns `true` if it was this arbiter's restore.
    pub fn on_timer(&mut self, token: TimerToken, viewport: &mut dyn Viewport) -> bool {
        match self.scroll_timer {
            Some((pending, offset)) if pending == token => {
                self.scroll_timer = None;
                viewport.set_scroll_offset(offset);
                tracing::trace!("deferred scroll restore to ({}, {})", offset.x, offset.y);
                true
            }
            _ => false,
        }
    }

    /// Drop all transient state. Returns a timer that must be cancelled.
    pub fn teardown(&mut self) -> Option<TimerToken> {
        self.ignore_blur = false;
        self.pending_scroll = None;
        self.scroll_timer.take().map(|(token, _)| token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combobox_platform::MemoryViewport;

    #[test]
    fn test_blur_proceeds_without_hold() {
        let mut arbiter = FocusArbiter::new();
        let viewport = MemoryViewport::new();
        assert_eq!(arbiter.on_blur(&viewport), BlurOutcome::Proceed);
        assert!(!arbiter.ignore_focus());
    }

    #[test]
    fn test_hold_and_release() {
        let mut arbiter = FocusArbiter::new();
        arbiter.hold();
        assert!(arbiter.ignore_blur());
        arbiter.release();
        assert!(!arbiter.ignore_blur());
    }

    #[test]
    fn test_suppressed_cycle_restores_scroll_twice() {
        let mut arbiter = FocusArbiter::new();
        let mut viewport = MemoryViewport::at(ScrollOffset::new(0.0, 250.0));

        arbiter.hold();
        assert_eq!(
            arbiter.on_blur(&viewport),
            BlurOutcome::Suppressed { cancel: None }
        );
        assert!(arbiter.ignore_focus());
        assert_eq!(arbiter.pending_scroll(), Some(ScrollOffset::new(0.0, 250.0)));

        // Focusing scrolls the page on its own
        viewport.scroll_externally(ScrollOffset::new(0.0, 900.0));

        let token = match arbiter.on_focus(&mut viewport) {
            FocusOutcome::Restored { cancel, schedule } => {
                assert_eq!(cancel, None);
                schedule
            }
            FocusOutcome::Proceed => panic!("expected restore"),
        };
        assert_eq!(viewport.scroll_offset(), ScrollOffset::new(0.0, 250.0));
        assert!(!arbiter.ignore_focus());
        assert_eq!(arbiter.pending_scroll(), None);

        viewport.scroll_externally(ScrollOffset::new(0.0, 900.0));
        assert!(arbiter.on_timer(token, &mut viewport));
        assert_eq!(viewport.scroll_offset(), ScrollOffset::new(0.0, 250.0));
        assert_eq!(viewport.writes().len(), 2);
        assert_eq!(arbiter.scroll_timer(), None);
    }

    #[test]
    fn test_new_cycle_cancels_pending_restore() {
        let mut arbiter = FocusArbiter::new();
        let mut viewport = MemoryViewport::new();

        arbiter.hold();
        arbiter.on_blur(&viewport);
        let first = arbiter.on_focus(&mut viewport);
        let first_token = match first {
            FocusOutcome::Restored { schedule, .. } => schedule,
            FocusOutcome::Proceed => panic!("expected restore"),
        };

        assert_eq!(
            arbiter.on_blur(&viewport),
            BlurOutcome::Suppressed {
                cancel: Some(first_token)
            }
        );
        assert!(!arbiter.on_timer(first_token, &mut viewport));
    }

    #[test]
    fn test_unrelated_timer_ignored() {
        let mut arbiter = FocusArbiter::new();
        let mut viewport = MemoryViewport::new();
        assert!(!arbiter.on_timer(TimerToken(u64::MAX), &mut viewport));
        assert!(viewport.writes().is_empty());
    }

    #[test]
    fn test_teardown_returns_pending_timer() {
        let mut arbiter = FocusArbiter::new();
        let mut viewport = MemoryViewport::new();
        arbiter.hold();
        arbiter.on_blur(&viewport);
        arbiter.on_focus(&mut viewport);

        let token = arbiter.scroll_timer();
        assert!(token.is_some());
        assert_eq!(arbiter.teardown(), token);
        assert_eq!(arbiter.teardown(), None);
        assert!(!arbiter.ignore_blur());
    }
}
