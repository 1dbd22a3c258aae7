//! History integration.
//!
//! The [`crate::service::NavigationService`] relies on a [`HistoryProvider`] to
//! store the current location, and possibly a history (i.e. a browsers back
//! button) and future (i.e. a browsers forward button).
//!
//! Providers store full route paths, including the base prefix under
//! [`HistoryMode::Path`]. Platform providers (hash fragment, browser path) live
//! in the UI crate; [`MemoryHistory`] is used for tests and non-web targets.

use std::rc::Rc;

/// The mechanism by which the platform location is interpreted as a route.
///
/// Chosen once at startup, depending on the deployment target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryMode {
    /// Routes live in the hash fragment of the URL. Works on hosts without
    /// server rewrite support.
    Hash,
    /// Routes are real paths below a fixed base prefix. Requires the server to
    /// rewrite all paths below the prefix to the app's entry point.
    Path {
        /// The prefix below which all routes live, e.g. `/Blog`. Must start
        /// with `/` and must not end with one.
        base: &'static str,
    },
}

impl HistoryMode {
    /// The base prefix paths are expected to carry, if any.
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            Self::Hash => None,
            Self::Path { base } => Some(base),
        }
    }
}

/// An integration with some kind of navigation history.
///
/// Paths handed to and returned from a provider always start with `/` and
/// include the base prefix when the app is deployed under one.
pub trait HistoryProvider {
    /// Get the path of the current location.
    #[must_use]
    fn current_path(&self) -> String;

    /// Check whether there is a previous page to navigate back to.
    ///
    /// If a provider cannot know this, it should return [`true`].
    #[must_use]
    fn can_go_back(&self) -> bool {
        true
    }

    /// Check whether there is a future page to navigate forward to.
    ///
    /// If a provider cannot know this, it should return [`true`].
    #[must_use]
    fn can_go_forward(&self) -> bool {
        true
    }

    /// Go back to a previous page.
    ///
    /// If there is no previous page, this does nothing. It might be called
    /// even if `can_go_back` returns [`false`].
    fn go_back(&mut self);

    /// Go forward to a future page.
    ///
    /// If there is no future page, this does nothing. It might be called even
    /// if `can_go_forward` returns [`false`].
    fn go_forward(&mut self);

    /// Push a new location onto the history.
    fn push(&mut self, path: String);

    /// Replace the current location.
    fn replace(&mut self, path: String);

    /// Register a callback to invoke when the platform changes the location
    /// outside the router, e.g. via the browser back button.
    ///
    /// Providers without foreign navigation can keep the default no-op.
    fn updater(&mut self, callback: Rc<dyn Fn()>) {
        let _ = callback;
    }
}

/// A [`HistoryProvider`] that stores all navigation information in memory.
pub struct MemoryHistory {
    current: String,
    past: Vec<String>,
    future: Vec<String>,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::with_initial_path("/")
    }
}

impl MemoryHistory {
    /// Create a [`MemoryHistory`] starting at `path`.
    ///
    /// ```rust
    /// # use blog_router::history::{HistoryProvider, MemoryHistory};
    /// let history = MemoryHistory::with_initial_path("/about");
    /// assert_eq!(history.current_path(), "/about");
    /// assert!(!history.can_go_back());
    /// ```
    pub fn with_initial_path(path: impl Into<String>) -> Self {
        Self {
            current: path.into(),
            past: Vec::new(),
            future: Vec::new(),
        }
    }
}

impl HistoryProvider for MemoryHistory {
    fn current_path(&self) -> String {
        self.current.clone()
    }

    fn can_go_back(&self) -> bool {
        !self.past.is_empty()
    }

    fn can_go_forward(&self) -> bool {
        !self.future.is_empty()
    }

    fn go_back(&mut self) {
        if let Some(last) = self.past.pop() {
            let old = std::mem::replace(&mut self.current, last);
            self.future.push(old);
        }
    }

    fn go_forward(&mut self) {
        if let Some(next) = self.future.pop() {
            let old = std::mem::replace(&mut self.current, next);
            self.past.push(old);
        }
    }

    fn push(&mut self, path: String) {
        // don't push the same location twice
        if self.current == path {
            return;
        }
        let old = std::mem::replace(&mut self.current, path);
        self.past.push(old);
        self.future.clear();
    }

    fn replace(&mut self, path: String) {
        self.current = path;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_and_forward() {
        let mut history = MemoryHistory::default();
        history.push(String::from("/006"));
        history.push(String::from("/about"));

        assert!(history.can_go_back());
        history.go_back();
        assert_eq!(history.current_path(), "/006");

        assert!(history.can_go_forward());
        history.go_forward();
        assert_eq!(history.current_path(), "/about");
        assert!(!history.can_go_forward());
    }

    #[test]
    fn push_current_is_ignored() {
        let mut history = MemoryHistory::default();
        history.push(String::from("/"));
        assert!(!history.can_go_back());
    }

    #[test]
    fn push_clears_future() {
        let mut history = MemoryHistory::default();
        history.push(String::from("/006"));
        history.go_back();
        history.push(String::from("/about"));
        assert!(!history.can_go_forward());
        assert_eq!(history.current_path(), "/about");
    }

    #[test]
    fn replace_keeps_past() {
        let mut history = MemoryHistory::default();
        history.push(String::from("/006"));
        history.replace(String::from("/042"));
        assert_eq!(history.current_path(), "/042");
        assert!(history.can_go_back());
    }
}
