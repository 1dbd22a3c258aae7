use std::collections::HashMap;

use crate::lazy::LoadError;

/// What the UI should currently render.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T: Clone> {
    /// The content of the current route.
    Ready(T),
    /// The current route's deferred content is still loading.
    Loading,
    /// The current route's deferred content failed to load.
    ///
    /// Recoverable: navigating again retries the load from scratch.
    Failed(LoadError),
    /// No route matched and the table has no fallback route.
    NotFound,
}

/// A snapshot of the currently resolved route.
///
/// There is a single writer, the [`crate::service::NavigationService`]; view
/// components only ever read snapshots.
#[derive(Clone, Debug)]
pub struct RouterState<T: Clone> {
    /// Whether there is a previous page to navigate back to.
    ///
    /// Even if this is [`true`], there might not be a previous page. However,
    /// it is nonetheless safe to tell the router to go back.
    pub can_go_back: bool,
    /// Whether there is a future page to navigate forward to.
    ///
    /// Even if this is [`true`], there might not be a future page. However, it
    /// is nonetheless safe to tell the router to go forward.
    pub can_go_forward: bool,

    /// The current location, including the base prefix if there is one.
    pub path: String,
    /// The name of the currently resolved route.
    pub name: &'static str,
    /// The current path parameters.
    pub parameters: HashMap<&'static str, String>,

    /// What to render for the current route.
    pub view: ViewState<T>,
}

impl<T: Clone> RouterState<T> {
    /// Get a path parameter of the current route.
    ///
    /// ```rust
    /// # use blog_router::{RouterState, ViewState};
    /// let mut state = RouterState::<&'static str>::default();
    /// assert_eq!(state.parameter("index"), None);
    ///
    /// state.parameters.insert("index", String::from("042"));
    /// assert_eq!(state.parameter("index"), Some("042"));
    /// ```
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }
}

// manual impl required because derive macro requires default for T unnecessarily
impl<T: Clone> Default for RouterState<T> {
    fn default() -> Self {
        Self {
            can_go_back: false,
            can_go_forward: false,
            path: String::from("/"),
            name: "",
            parameters: HashMap::new(),
            view: ViewState::NotFound,
        }
    }
}
