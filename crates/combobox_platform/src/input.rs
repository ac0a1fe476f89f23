//! Keyboard input types
//!
//! Keys carry both a symbolic [`Key`] and the legacy numeric key code the
//! host reported. Most handling matches on the symbolic key, but commit
//! handling also checks the numeric code so that IME composition keystrokes
//! (reported with code 229) never commit a selection.

// ============================================================================
// Key Codes
// ============================================================================

/// Legacy numeric key codes
pub mod key_codes {
    pub const BACKSPACE: u32 = 8;
    pub const TAB: u32 = 9;
    pub const ENTER: u32 = 13;
    pub const ESCAPE: u32 = 27;
    pub const SPACE: u32 = 32;
    pub const PAGE_UP: u32 = 33;
    pub const PAGE_DOWN: u32 = 34;
    pub const END: u32 = 35;
    pub const HOME: u32 = 36;
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
    pub const DELETE: u32 = 46;
    /// Reported by browsers while an IME composition is in progress
    pub const IME_PROCESS: u32 = 229;
    /// No code reported
    pub const UNKNOWN: u32 = 0;
}

// ============================================================================
// Keyboard Events
// ============================================================================

/// Keyboard event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// The key that was pressed or released
    pub key: Key,
    /// Legacy numeric key code as reported by the host
    pub key_code: u32,
    /// Whether the key was pressed or released
    pub state: KeyState,
    /// Modifier keys held during this event
    pub modifiers: Modifiers,
}

impl KeyboardEvent {
    /// Create a key press with the standard code for `key`
    pub fn pressed(key: Key) -> Self {
        let key_code = key.standard_code();
        Self {
            key,
            key_code,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
        }
    }

    /// Create a key press from a DOM-style key name (`"ArrowDown"`, `"a"`)
    pub fn from_name(name: &str) -> Self {
        Self::pressed(Key::from_name(name))
    }

    /// Override the numeric key code
    pub fn with_key_code(mut self, key_code: u32) -> Self {
        self.key_code = key_code;
        self
    }

    /// Set the held modifiers
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether this is a key press (as opposed to a release)
    pub fn is_press(&self) -> bool {
        self.state == KeyState::Pressed
    }
}

/// Key press/release state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyState {
    /// Key was pressed
    Pressed,
    /// Key was released
    Released,
}

/// Modifier key state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Shift key is held
    pub shift: bool,
    /// Control key is held
    pub ctrl: bool,
    /// Alt key is held (Option on macOS)
    pub alt: bool,
    /// Meta key is held (Command on macOS, Windows key on Windows)
    pub meta: bool,
}

impl Modifiers {
    /// Check if no modifiers are held
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }

    /// Check if only shift is held
    pub fn shift_only(&self) -> bool {
        self.shift && !self.ctrl && !self.alt && !self.meta
    }
}

/// Keys the combobox distinguishes
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    // Navigation
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    // Editing and control
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Space,

    // Modifier keys (for tracking state)
    Shift,
    Ctrl,
    Alt,
    Meta,

    /// A printable character
    Char(char),

    /// Any key not listed above, by its DOM name
    Named(String),
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` name
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowUp" | "Up" => Key::Up,
            "ArrowDown" | "Down" => Key::Down,
            "ArrowLeft" | "Left" => Key::Left,
            "ArrowRight" | "Right" => Key::Right,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            "Tab" => Key::Tab,
            "Backspace" => Key::Backspace,
            "Delete" | "Del" => Key::Delete,
            " " | "Spacebar" => Key::Space,
            "Shift" => Key::Shift,
            "Control" => Key::Ctrl,
            "Alt" => Key::Alt,
            "Meta" | "OS" => Key::Meta,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Named(other.to_string()),
                }
            }
        }
    }

    /// The legacy key code a browser reports for this key
    pub fn standard_code(&self) -> u32 {
        match self {
            Key::Up => key_codes::UP,
            Key::Down => key_codes::DOWN,
            Key::Left => key_codes::LEFT,
            Key::Right => key_codes::RIGHT,
            Key::Home => key_codes::HOME,
            Key::End => key_codes::END,
            Key::PageUp => key_codes::PAGE_UP,
            Key::PageDown => key_codes::PAGE_DOWN,
            Key::Enter => key_codes::ENTER,
            Key::Escape => key_codes::ESCAPE,
            Key::Tab => key_codes::TAB,
            Key::Backspace => key_codes::BACKSPACE,
            Key::Delete => key_codes::DELETE,
            Key::Space => key_codes::SPACE,
            Key::Shift => 16,
            Key::Ctrl => 17,
            Key::Alt => 18,
            Key::Meta => 91,
            Key::Char(c) if c.is_ascii_alphanumeric() => c.to_ascii_uppercase() as u32,
            Key::Char(_) | Key::Named(_) => key_codes::UNKNOWN,
        }
    }

    /// Whether this key is a modifier
    pub fn is_modifier(&self) -> bool {
        matches!(self, Key::Shift | Key::Ctrl | Key::Alt | Key::Meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_dom_names() {
        assert_eq!(Key::from_name("ArrowDown"), Key::Down);
        assert_eq!(Key::from_name("ArrowUp"), Key::Up);
        assert_eq!(Key::from_name("Escape"), Key::Escape);
        assert_eq!(Key::from_name("a"), Key::Char('a'));
        assert_eq!(Key::from_name("F5"), Key::Named("F5".to_string()));
    }

    #[test]
    fn test_pressed_fills_standard_code() {
        assert_eq!(KeyboardEvent::pressed(Key::Enter).key_code, key_codes::ENTER);
        assert_eq!(KeyboardEvent::pressed(Key::Down).key_code, key_codes::DOWN);
        assert_eq!(KeyboardEvent::from_name("a").key_code, 65);
    }

    #[test]
    fn test_ime_enter_keeps_symbolic_key() {
        let event = KeyboardEvent::pressed(Key::Enter).with_key_code(key_codes::IME_PROCESS);
        assert_eq!(event.key, Key::Enter);
        assert_eq!(event.key_code, 229);
        assert!(event.is_press());
    }

    #[test]
    fn test_modifiers() {
        assert!(Modifiers::default().is_empty());
        let shift = Modifiers {
            shift: true,
            ..Default::default()
        };
        assert!(shift.shift_only());
        assert!(!shift.is_empty());
        assert!(Key::Shift.is_modifier());
    }
}
