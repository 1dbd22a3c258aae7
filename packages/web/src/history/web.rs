//! Browser-backed [`HistoryProvider`]s.

use std::rc::Rc;

use blog_router::history::HistoryProvider;
use gloo::history::{BrowserHistory, HashHistory, History, HistoryListener};

fn non_empty_path(path: String) -> String {
    if path.is_empty() {
        String::from("/")
    } else {
        path
    }
}

/// A [`HistoryProvider`] that keeps the route in the hash fragment of the URL.
pub struct WebHashHistory {
    history: HashHistory,
    listener: Option<HistoryListener>,
}

impl WebHashHistory {
    /// Create a provider reading the initial route from the current location.
    pub fn new() -> Self {
        Self {
            history: HashHistory::new(),
            listener: None,
        }
    }
}

impl HistoryProvider for WebHashHistory {
    fn current_path(&self) -> String {
        non_empty_path(self.history.location().path().to_string())
    }

    fn go_back(&mut self) {
        self.history.back();
    }

    fn go_forward(&mut self) {
        self.history.forward();
    }

    fn push(&mut self, path: String) {
        self.history.push(path);
    }

    fn replace(&mut self, path: String) {
        self.history.replace(path);
    }

    fn updater(&mut self, callback: Rc<dyn Fn()>) {
        self.listener = Some(self.history.listen(move || callback()));
    }
}

/// A [`HistoryProvider`] that uses real paths via the browser's History API.
///
/// Paths include the base prefix; the server must rewrite everything below
/// the prefix to the app's entry point.
pub struct WebPathHistory {
    history: BrowserHistory,
    listener: Option<HistoryListener>,
}

impl WebPathHistory {
    /// Create a provider reading the initial route from the current location.
    pub fn new() -> Self {
        Self {
            history: BrowserHistory::new(),
            listener: None,
        }
    }
}

impl HistoryProvider for WebPathHistory {
    fn current_path(&self) -> String {
        non_empty_path(self.history.location().path().to_string())
    }

    fn go_back(&mut self) {
        self.history.back();
    }

    fn go_forward(&mut self) {
        self.history.forward();
    }

    fn push(&mut self, path: String) {
        self.history.push(path);
    }

    fn replace(&mut self, path: String) {
        self.history.replace(path);
    }

    fn updater(&mut self, callback: Rc<dyn Fn()>) {
        self.listener = Some(self.history.listen(move || callback()));
    }
}
