//! Keyboard navigation between album pages.

use std::collections::HashMap;

use crate::error::ViewerError;
use crate::keybindings::{KeyBindings, NavIntent};

/// Source of the destination URL for each navigation intent.
pub trait NavigationTargets {
    /// URL for `intent`, or `None` when the page has no such target.
    fn target(&self, intent: NavIntent) -> Option<String>;

    /// Intents this page has a target for, in [`NavIntent::all`] order.
    fn available(&self) -> Vec<NavIntent> {
        NavIntent::all()
            .iter()
            .copied()
            .filter(|intent| self.target(*intent).is_some())
            .collect()
    }
}

impl NavigationTargets for HashMap<NavIntent, String> {
    fn target(&self, intent: NavIntent) -> Option<String> {
        self.get(&intent).cloned()
    }
}

/// Moves the browsing context to another URL.
pub trait Navigator {
    fn navigate(&mut self, url: &str) -> Result<(), ViewerError>;
}

/// Navigator that only records where it was sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryNavigator {
    visited: Vec<String>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> &[String] {
        &self.visited
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&mut self, url: &str) -> Result<(), ViewerError> {
        self.visited.push(url.to_string());
        Ok(())
    }
}

/// Result of a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Key has no binding
    Unmapped,
    /// Key is bound but the page has no target for it
    NoTarget(NavIntent),
    /// Browsing context was sent to `url`
    Navigated { intent: NavIntent, url: String },
}

/// Maps key presses to page navigation.
pub struct PageNavigator<T, N> {
    bindings: KeyBindings,
    targets: Option<T>,
    navigator: N,
}

impl<T: NavigationTargets, N: Navigator> PageNavigator<T, N> {
    /// `targets` is `None` when the page carries no navigation element;
    /// every key press is then a no-op.
    pub fn new(bindings: KeyBindings, targets: Option<T>, navigator: N) -> Self {
        Self {
            bindings,
            targets,
            navigator,
        }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Handle a `KeyboardEvent.key` value.
    pub fn key_down(&mut self, key: &str) -> Result<KeyOutcome, ViewerError> {
        let Some(intent) = self.bindings.intent_for_key(key) else {
            return Ok(KeyOutcome::Unmapped);
        };

        let Some(url) = self.targets.as_ref().and_then(|t| t.target(intent)) else {
            log::debug!("No {} target on this page", intent.attribute());
            return Ok(KeyOutcome::NoTarget(intent));
        };

        log::info!("Navigating {} to {}", intent.name(), url);
        self.navigator.navigate(&url)?;
        Ok(KeyOutcome::Navigated { intent, url })
    }
}
