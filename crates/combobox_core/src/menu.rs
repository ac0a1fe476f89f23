//! Menu open/close state machine
//!
//! The engine keeps its own open intent. When the caller manages visibility
//! through an external flag, the flag wins for display purposes and the
//! intent only feeds visibility-change notifications.

/// Menu visibility state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    /// The engine's own open/closed decision
    is_open: bool,
    /// Caller-managed visibility, if any
    managed: Option<bool>,
}

impl MenuState {
    pub fn new(managed: Option<bool>) -> Self {
        Self {
            is_open: managed.unwrap_or(false),
            managed,
        }
    }

    /// Whether the menu is displayed
    pub fn is_visible(&self) -> bool {
        self.managed.unwrap_or(self.is_open)
    }

    /// The engine's own decision, ignoring any managed flag
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Whether the caller manages visibility
    pub fn is_managed(&self) -> bool {
        self.managed.is_some()
    }

    pub fn managed(&self) -> Option<bool> {
        self.managed
    }

    pub fn open(&mut self) {
        self.set_open(true);
    }

    pub fn close(&mut self) {
        self.set_open(false);
    }

    pub fn set_open(&mut self, open: bool) {
        if self.is_open != open {
            tracing::debug!(
                "menu {} (managed: {:?})",
                if open { "opened" } else { "closed" },
                self.managed
            );
        }
        self.is_open = open;
    }

    /// Apply a new external flag
    ///
    /// A changed flag also becomes the engine's own decision, so a caller
    /// driven change is reported exactly like a self driven one and is not
    /// reported again when the caller echoes it back.
    pub fn set_managed(&mut self, managed: Option<bool>) {
        if managed == self.managed {
            return;
        }
        self.managed = managed;
        if let Some(open) = managed {
            self.set_open(open);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmanaged_follows_intent() {
        let mut menu = MenuState::default();
        assert!(!menu.is_visible());
        menu.open();
        assert!(menu.is_visible());
        menu.close();
        assert!(!menu.is_visible());
    }

    #[test]
    fn test_managed_flag_wins() {
        let mut menu = MenuState::new(Some(false));
        menu.open();
        assert!(menu.is_open());
        assert!(!menu.is_visible());
    }

    #[test]
    fn test_external_change_syncs_intent() {
        let mut menu = MenuState::new(Some(false));
        menu.set_managed(Some(true));
        assert!(menu.is_open());
        assert!(menu.is_visible());

        // Echoing the same flag is a no-op
        menu.close();
        menu.set_managed(Some(true));
        assert!(!menu.is_open());
        assert!(menu.is_visible());
    }

    #[test]
    fn test_leaving_managed_mode() {
        let mut menu = MenuState::new(Some(true));
        menu.set_managed(None);
        assert!(!menu.is_managed());
        assert!(menu.is_visible());
    }
}
