//! ARIA attribute models
//!
//! Attribute names and values here are part of the accessibility contract
//! with assistive technology and must stay exactly as written.

/// Ordered `(name, value)` attribute list
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(&'static str, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.0.iter().map(|(name, value)| (*name, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Attributes of the element wrapping input and menu
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrapperAria {
    pub expanded: bool,
    /// Id of the menu the combobox owns
    pub owns: String,
}

impl WrapperAria {
    pub fn attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.set("role", "combobox");
        attrs.set("aria-expanded", self.expanded.to_string());
        attrs.set("aria-owns", self.owns.clone());
        attrs.set("aria-haspopup", "listbox");
        attrs
    }
}

/// Attributes of the text input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputAria {
    /// Id of the menu the input controls
    pub controls: String,
    /// Id of the highlighted item, while one is displayed
    pub active_descendant: Option<String>,
}

impl InputAria {
    pub fn attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.set("aria-autocomplete", "list");
        attrs.set("aria-controls", self.controls.clone());
        if let Some(id) = &self.active_descendant {
            attrs.set("aria-activedescendant", id.clone());
        }
        attrs
    }
}

/// Visually hidden live region announcing the result count
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiveRegion {
    /// Announcement text, empty when nothing should be announced
    pub text: String,
}

impl LiveRegion {
    pub fn attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.set("role", "status");
        attrs.set("aria-live", "assertive");
        attrs.set("aria-atomic", "true");
        attrs.set("aria-relevant", "additions text");
        attrs
    }

    /// Inline style that hides the region visually but not from readers
    pub fn visually_hidden_style() -> &'static str {
        "clip: rect(1px, 1px, 1px, 1px); position: absolute; padding: 0; \
         border: 0; height: 1px; width: 1px; overflow: hidden;"
    }
}
