//! The navigation subsystem.
//!
//! The [`NavigationService`] combines a [`RouteTable`] with a
//! [`HistoryProvider`] and owns the shared "currently resolved route" state.
//! It is the single writer of that state; view components observe snapshots.
//!
//! Route resolution itself is synchronous. The one suspending operation is a
//! deferred content load, which the service hands back as a [`PendingLoad`]
//! for the caller's executor, so resolution of other routes is never blocked.
//! Every navigation bumps a generation counter and a finished load is only
//! committed if no newer navigation has happened in the meantime, giving a
//! last-navigation-wins ordering guarantee.

use std::rc::Rc;

use crate::{
    history::HistoryProvider,
    lazy::{LazyContent, LoadError},
    navigation::NavigationTarget,
    routes::{Resolution, RouteContent, RouteTable},
    state::{RouterState, ViewState},
};

/// A deferred content load for the current navigation.
///
/// Returned by the navigation methods of [`NavigationService`]. The caller is
/// responsible for driving it on its executor and handing the result back via
/// [`NavigationService::commit`].
#[must_use]
pub struct PendingLoad<T: Clone> {
    generation: u64,
    content: LazyContent<T>,
}

impl<T: Clone + 'static> PendingLoad<T> {
    /// Drive the load to completion.
    pub async fn load(self) -> FinishedLoad<T> {
        FinishedLoad {
            generation: self.generation,
            result: self.content.get().await,
        }
    }
}

/// The result of a [`PendingLoad`], ready to be committed.
pub struct FinishedLoad<T: Clone> {
    generation: u64,
    result: Result<T, LoadError>,
}

/// The core of the router.
///
/// Combines the route table and a history provider to decide what the UI
/// should currently render.
pub struct NavigationService<T: Clone> {
    table: RouteTable<T>,
    history: Box<dyn HistoryProvider>,
    state: RouterState<T>,
    generation: u64,
}

impl<T: Clone + 'static> NavigationService<T> {
    /// Create a new [`NavigationService`] and resolve the initial location.
    ///
    /// If the initial route carries deferred content, the corresponding
    /// [`PendingLoad`] is returned alongside the service.
    pub fn new(
        table: RouteTable<T>,
        history: Box<dyn HistoryProvider>,
    ) -> (Self, Option<PendingLoad<T>>) {
        let mut service = Self {
            table,
            history,
            state: RouterState::default(),
            generation: 0,
        };
        let pending = service.update_routing();
        (service, pending)
    }

    /// The current router state.
    pub fn state(&self) -> &RouterState<T> {
        &self.state
    }

    /// The history mode the route table was built for.
    pub fn mode(&self) -> crate::history::HistoryMode {
        self.table.mode()
    }

    /// Get the full href for a navigation target, including the base prefix.
    pub fn href(&self, target: &NavigationTarget) -> Option<String> {
        self.table.href(target)
    }

    /// Push a new location onto the history and re-resolve.
    pub fn push(&mut self, target: NavigationTarget) -> Option<PendingLoad<T>> {
        let Some(href) = self.table.href(&target) else {
            tracing::error!("navigation target could not be resolved, staying put");
            return None;
        };
        self.history.push(href);
        self.update_routing()
    }

    /// Replace the current location and re-resolve.
    pub fn replace(&mut self, target: NavigationTarget) -> Option<PendingLoad<T>> {
        let Some(href) = self.table.href(&target) else {
            tracing::error!("navigation target could not be resolved, staying put");
            return None;
        };
        self.history.replace(href);
        self.update_routing()
    }

    /// Go back to the previous location.
    pub fn go_back(&mut self) -> Option<PendingLoad<T>> {
        self.history.go_back();
        self.update_routing()
    }

    /// Go forward to the next location.
    pub fn go_forward(&mut self) -> Option<PendingLoad<T>> {
        self.history.go_forward();
        self.update_routing()
    }

    /// Re-resolve after the platform changed the location outside the router.
    pub fn sync(&mut self) -> Option<PendingLoad<T>> {
        self.update_routing()
    }

    /// Register a callback to invoke when the platform changes the location
    /// outside the router. The callback should schedule a call to
    /// [`NavigationService::sync`].
    pub fn on_external_change(&mut self, callback: Rc<dyn Fn()>) {
        self.history.updater(callback);
    }

    /// Commit the result of a finished deferred load.
    ///
    /// Returns `false` and leaves the state untouched if a newer navigation
    /// has happened since the load started.
    pub fn commit(&mut self, finished: FinishedLoad<T>) -> bool {
        if finished.generation != self.generation {
            tracing::debug!("discarding stale deferred load result");
            return false;
        }
        self.state.view = match finished.result {
            Ok(content) => ViewState::Ready(content),
            Err(err) => ViewState::Failed(err),
        };
        true
    }

    /// Update the current state of the router.
    fn update_routing(&mut self) -> Option<PendingLoad<T>> {
        self.generation += 1;

        let pending = loop {
            let path = self.history.current_path();
            match self.table.resolve(&path) {
                Resolution::Page(matched) => {
                    self.state.path = path;
                    self.state.name = matched.name;
                    self.state.parameters = matched.parameters;
                    break self.apply_content(matched.content);
                }
                Resolution::Redirect(target) => match self.table.href(&target) {
                    Some(href) => {
                        tracing::debug!("redirecting {path} to {href}");
                        self.history.replace(href);
                    }
                    None => {
                        break self.apply_not_found(path);
                    }
                },
                Resolution::NotFound => {
                    break self.apply_not_found(path);
                }
            }
        };

        self.state.can_go_back = self.history.can_go_back();
        self.state.can_go_forward = self.history.can_go_forward();
        pending
    }

    fn apply_content(&mut self, content: RouteContent<T>) -> Option<PendingLoad<T>> {
        match content {
            RouteContent::Static(content) => {
                self.state.view = ViewState::Ready(content);
                None
            }
            RouteContent::Deferred(lazy) => match lazy.peek() {
                Some(content) => {
                    self.state.view = ViewState::Ready(content);
                    None
                }
                None => {
                    self.state.view = ViewState::Loading;
                    Some(PendingLoad {
                        generation: self.generation,
                        content: lazy,
                    })
                }
            },
        }
    }

    fn apply_not_found(&mut self, path: String) -> Option<PendingLoad<T>> {
        tracing::debug!("no route matches {path}");
        self.state.path = path;
        self.state.parameters.clear();
        match self.table.fallback_route() {
            Some(route) => {
                self.state.name = route.name();
                let content = route.content.clone();
                self.apply_content(content)
            }
            None => {
                self.state.name = "";
                self.state.view = ViewState::NotFound;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::executor::block_on;

    use crate::{
        blog::{blog_routes, names, PATH_BASE},
        history::{HistoryMode, MemoryHistory},
    };

    use super::*;

    fn about_content(counter: Rc<Cell<usize>>) -> LazyContent<&'static str> {
        LazyContent::new(move || {
            counter.set(counter.get() + 1);
            async { Ok("about page") }
        })
    }

    fn hash_service(
        counter: Rc<Cell<usize>>,
    ) -> (NavigationService<&'static str>, Option<PendingLoad<&'static str>>) {
        NavigationService::new(
            blog_routes(
                HistoryMode::Hash,
                "home page",
                about_content(counter),
                "not found",
            ),
            Box::new(MemoryHistory::default()),
        )
    }

    #[test]
    fn initial_location_lands_on_default_post() {
        let (service, pending) = hash_service(Rc::new(Cell::new(0)));
        assert!(pending.is_none());

        let state = service.state();
        assert_eq!(state.path, "/006");
        assert_eq!(state.name, names::HOME);
        assert_eq!(state.parameter("index"), Some("006"));
        assert_eq!(state.view, ViewState::Ready("home page"));
    }

    #[test]
    fn path_mode_initial_location_lands_on_default_post() {
        let counter = Rc::new(Cell::new(0));
        let (service, pending) = NavigationService::new(
            blog_routes(
                HistoryMode::Path { base: PATH_BASE },
                "home page",
                about_content(counter),
                "not found",
            ),
            Box::new(MemoryHistory::with_initial_path(PATH_BASE)),
        );
        assert!(pending.is_none());

        let state = service.state();
        assert_eq!(state.path, "/Blog/006");
        assert_eq!(state.name, names::HOME);
        assert_eq!(state.parameter("index"), Some("006"));
    }

    #[test]
    fn pushing_an_index_shows_that_post() {
        let (mut service, _) = hash_service(Rc::new(Cell::new(0)));
        let pending = service.push("/042".into());
        assert!(pending.is_none());

        let state = service.state();
        assert_eq!(state.name, names::HOME);
        assert_eq!(state.parameter("index"), Some("042"));
    }

    #[test]
    fn about_content_loads_on_first_navigation_only() {
        let counter = Rc::new(Cell::new(0));
        let (mut service, _) = hash_service(counter.clone());
        assert_eq!(counter.get(), 0, "startup must not load deferred content");

        let pending = service.push(NavigationTarget::named(names::ABOUT));
        assert_eq!(service.state().view, ViewState::Loading);
        let finished = block_on(pending.expect("about load should be pending").load());
        assert!(service.commit(finished));
        assert_eq!(service.state().view, ViewState::Ready("about page"));

        // leaving and coming back must not trigger another load
        let pending = service.push("/006".into());
        assert!(pending.is_none());
        let pending = service.push(NavigationTarget::named(names::ABOUT));
        assert!(pending.is_none());
        assert_eq!(service.state().view, ViewState::Ready("about page"));
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn stale_load_does_not_overwrite_newer_navigation() {
        let (mut service, _) = hash_service(Rc::new(Cell::new(0)));

        let pending = service
            .push(NavigationTarget::named(names::ABOUT))
            .expect("about load should be pending");
        let _ = service.push("/042".into());

        let finished = block_on(pending.load());
        assert!(!service.commit(finished));

        let state = service.state();
        assert_eq!(state.name, names::HOME);
        assert_eq!(state.parameter("index"), Some("042"));
        assert_eq!(state.view, ViewState::Ready("home page"));
    }

    #[test]
    fn failed_load_is_recoverable() {
        let attempts = Rc::new(Cell::new(0));
        let counting = attempts.clone();
        let about = LazyContent::new(move || {
            counting.set(counting.get() + 1);
            let attempt = counting.get();
            async move {
                if attempt == 1 {
                    Err(LoadError::new("network down"))
                } else {
                    Ok("about page")
                }
            }
        });
        let (mut service, _) = NavigationService::new(
            blog_routes(HistoryMode::Hash, "home page", about, "not found"),
            Box::new(MemoryHistory::default()),
        );

        let pending = service.push(NavigationTarget::named(names::ABOUT));
        let finished = block_on(pending.expect("about load should be pending").load());
        assert!(service.commit(finished));
        assert!(matches!(service.state().view, ViewState::Failed(_)));

        // re-navigation retries from scratch
        let pending = service.push(NavigationTarget::named(names::ABOUT));
        let finished = block_on(pending.expect("retry should be pending").load());
        assert!(service.commit(finished));
        assert_eq!(service.state().view, ViewState::Ready("about page"));
        assert_eq!(attempts.get(), 2);
    }

    #[test]
    fn unmatched_paths_show_the_fallback() {
        let (mut service, _) = hash_service(Rc::new(Cell::new(0)));
        let pending = service.push("/006/comments".into());
        assert!(pending.is_none());

        let state = service.state();
        assert_eq!(state.name, names::NOT_FOUND);
        assert_eq!(state.view, ViewState::Ready("not found"));
    }

    #[test]
    fn back_and_forward_re_resolve() {
        let (mut service, _) = hash_service(Rc::new(Cell::new(0)));
        let _ = service.push("/042".into());
        let pending = service.push(NavigationTarget::named(names::ABOUT));
        let finished = block_on(pending.expect("about load should be pending").load());
        assert!(service.commit(finished));

        let pending = service.go_back();
        assert!(pending.is_none());
        assert_eq!(service.state().parameter("index"), Some("042"));
        assert!(service.state().can_go_forward);

        let pending = service.go_forward();
        assert!(pending.is_none(), "about content is already memoized");
        assert_eq!(service.state().name, names::ABOUT);
    }
}
