//! The `/` shortcut that jumps to the search box.

use serde::{Deserialize, Serialize};

/// Key that focuses the search box.
pub const SEARCH_KEY: &str = "/";

/// Which element currently holds keyboard focus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Focus {
    #[default]
    Elsewhere,
    Search,
}

/// A keydown as delivered by the page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Move focus to the search box and suppress the key's default action.
    FocusSearch,
    /// Leave the event alone; the browser handles it normally.
    Ignored,
}

impl KeyOutcome {
    pub fn prevents_default(self) -> bool {
        matches!(self, Self::FocusSearch)
    }
}

/// Decide what a keydown does given the current focus. A `/` typed into the
/// search box itself is left alone, so it is inserted as text.
pub fn handle_keydown(event: &KeyEvent, focus: Focus) -> KeyOutcome {
    if event.key != SEARCH_KEY {
        return KeyOutcome::Ignored;
    }
    match focus {
        Focus::Elsewhere => KeyOutcome::FocusSearch,
        Focus::Search => KeyOutcome::Ignored,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn slash_outside_search_focuses_it() {
        let outcome = handle_keydown(&KeyEvent::new("/"), Focus::Elsewhere);
        assert_eq!(outcome, KeyOutcome::FocusSearch);
        assert!(outcome.prevents_default());
    }

    #[test]
    fn slash_inside_search_is_typed() {
        let outcome = handle_keydown(&KeyEvent::new("/"), Focus::Search);
        assert_eq!(outcome, KeyOutcome::Ignored);
        assert!(!outcome.prevents_default());
    }

    #[test]
    fn other_keys_are_ignored() {
        for key in ["a", "?", "Enter", "Slash"] {
            assert_eq!(
                handle_keydown(&KeyEvent::new(key), Focus::Elsewhere),
                KeyOutcome::Ignored
            );
        }
    }
}
