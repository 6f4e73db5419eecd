//! Keyboard bindings for album page navigation.
//!
//! Keys are matched on the DOM `KeyboardEvent.key` value. Arrow keys and
//! Space are always bound; Home/End and Escape can be switched off through
//! the configuration, since not every album template renders those targets.

use serde::{Deserialize, Serialize};

use crate::constants::attribute::NAVIGATION_PREFIX;

/// Where a key press asks to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavIntent {
    /// Parent listing
    Up,
    /// Previous page
    Left,
    /// Next page
    Right,
    /// First page of the album
    Home,
    /// Last page of the album
    End,
    /// Leave the album (parent URL)
    Escape,
}

impl NavIntent {
    /// Name used in the `data-<name>` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            NavIntent::Up => "up",
            NavIntent::Left => "left",
            NavIntent::Right => "right",
            NavIntent::Home => "home",
            NavIntent::End => "end",
            NavIntent::Escape => "escape",
        }
    }

    /// Attribute on the navigation target holding this intent's URL.
    pub fn attribute(&self) -> String {
        format!("{}{}", NAVIGATION_PREFIX, self.name())
    }

    pub fn all() -> &'static [NavIntent] {
        &[
            NavIntent::Up,
            NavIntent::Left,
            NavIntent::Right,
            NavIntent::Home,
            NavIntent::End,
            NavIntent::Escape,
        ]
    }
}

/// Keybinding configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    /// Bind Home and End to the first and last page
    #[serde(default = "enabled")]
    pub home_end: bool,
    /// Bind Escape to the parent URL
    #[serde(default = "enabled")]
    pub escape: bool,
}

fn enabled() -> bool {
    true
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            home_end: enabled(),
            escape: enabled(),
        }
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings of the later page templates: arrows and Space only.
    pub fn arrows_only() -> Self {
        Self {
            home_end: false,
            escape: false,
        }
    }

    /// Get the navigation intent for a `KeyboardEvent.key` value, if any.
    pub fn intent_for_key(&self, key: &str) -> Option<NavIntent> {
        match key {
            "ArrowUp" => Some(NavIntent::Up),
            "ArrowLeft" => Some(NavIntent::Left),
            "ArrowRight" | " " => Some(NavIntent::Right),
            "Home" if self.home_end => Some(NavIntent::Home),
            "End" if self.home_end => Some(NavIntent::End),
            "Escape" if self.escape => Some(NavIntent::Escape),
            _ => None,
        }
    }
}

/// Convert a `KeyboardEvent.key` value to a display string.
pub fn key_label(key: &str) -> &str {
    match key {
        " " => "Space",
        "ArrowUp" => "Up",
        "ArrowLeft" => "Left",
        "ArrowRight" => "Right",
        "ArrowDown" => "Down",
        "Escape" => "Esc",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_arrow_and_space_share_intent() {
        let bindings = KeyBindings::new();
        assert_eq!(bindings.intent_for_key("ArrowRight"), Some(NavIntent::Right));
        assert_eq!(bindings.intent_for_key(" "), Some(NavIntent::Right));
    }

    #[test]
    fn test_arrow_keys() {
        let bindings = KeyBindings::new();
        assert_eq!(bindings.intent_for_key("ArrowUp"), Some(NavIntent::Up));
        assert_eq!(bindings.intent_for_key("ArrowLeft"), Some(NavIntent::Left));
        assert_eq!(bindings.intent_for_key("ArrowDown"), None);
    }

    #[test]
    fn test_optional_keys_follow_configuration() {
        let full = KeyBindings::new();
        assert_eq!(full.intent_for_key("Home"), Some(NavIntent::Home));
        assert_eq!(full.intent_for_key("End"), Some(NavIntent::End));
        assert_eq!(full.intent_for_key("Escape"), Some(NavIntent::Escape));

        let arrows = KeyBindings::arrows_only();
        assert_eq!(arrows.intent_for_key("Home"), None);
        assert_eq!(arrows.intent_for_key("End"), None);
        assert_eq!(arrows.intent_for_key("Escape"), None);
        assert_eq!(arrows.intent_for_key(" "), Some(NavIntent::Right));
    }

    #[test]
    fn test_unrelated_keys_are_unmapped() {
        let bindings = KeyBindings::new();
        for key in ["a", "Enter", "PageDown", "Spacebar", ""] {
            assert_eq!(bindings.intent_for_key(key), None, "{key:?}");
        }
    }

    #[test]
    fn test_intent_attributes() {
        let attributes: Vec<String> = NavIntent::all().iter().map(NavIntent::attribute).collect();
        assert_eq!(
            attributes,
            ["data-up", "data-left", "data-right", "data-home", "data-end", "data-escape"]
        );
    }

    #[test]
    fn test_key_labels() {
        assert_eq!(key_label(" "), "Space");
        assert_eq!(key_label("ArrowRight"), "Right");
        assert_eq!(key_label("Home"), "Home");
    }
}
