//! Deferred content loading.
//!
//! Some views are not needed at startup; their content is fetched when they
//! are first navigated to. [`LazyContent`] wraps such a fetch in a memoized,
//! shared future: the first request triggers the load, concurrent requests
//! observe the same in-flight operation, and the result is kept for the rest
//! of the session once the load succeeds.

use std::{cell::RefCell, fmt, future::Future, rc::Rc};

use futures_util::{
    future::{LocalBoxFuture, Shared},
    FutureExt,
};

/// Error describing a failed content load.
///
/// Deferred-load failure is recoverable: the failed attempt is not memoized,
/// so a later navigation retries from scratch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadError {
    message: String,
}

impl LoadError {
    /// Create a new [`LoadError`] with a human readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load deferred content: {}", self.message)
    }
}

impl std::error::Error for LoadError {}

type LoadFuture<T> = Shared<LocalBoxFuture<'static, Result<T, LoadError>>>;

enum LoadState<T: Clone> {
    Idle,
    Loading(LoadFuture<T>),
    Ready(T),
}

struct Inner<T: Clone> {
    load: Box<dyn Fn() -> LocalBoxFuture<'static, Result<T, LoadError>>>,
    state: RefCell<LoadState<T>>,
}

/// Content that is fetched on first navigation and memoized afterwards.
///
/// Cloning is cheap and clones share the memoized state.
pub struct LazyContent<T: Clone> {
    inner: Rc<Inner<T>>,
}

impl<T: Clone> Clone for LazyContent<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone> fmt::Debug for LazyContent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*self.inner.state.borrow() {
            LoadState::Idle => "idle",
            LoadState::Loading(_) => "loading",
            LoadState::Ready(_) => "ready",
        };
        f.debug_struct("LazyContent").field("state", &state).finish()
    }
}

impl<T: Clone + 'static> LazyContent<T> {
    /// Create a new [`LazyContent`] from a load operation.
    ///
    /// The operation is not invoked until the content is first requested.
    ///
    /// ```rust
    /// # use blog_router::lazy::LazyContent;
    /// let content = LazyContent::new(|| async { Ok(String::from("about page")) });
    /// assert!(!content.is_loaded());
    /// ```
    pub fn new<F, Fut>(load: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, LoadError>> + 'static,
    {
        Self {
            inner: Rc::new(Inner {
                load: Box::new(move || load().boxed_local()),
                state: RefCell::new(LoadState::Idle),
            }),
        }
    }

    /// Whether the content has already been loaded successfully.
    pub fn is_loaded(&self) -> bool {
        matches!(&*self.inner.state.borrow(), LoadState::Ready(_))
    }

    /// Get the content if it has already been loaded successfully.
    pub fn peek(&self) -> Option<T> {
        match &*self.inner.state.borrow() {
            LoadState::Ready(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// Get the content, triggering the load on first call.
    ///
    /// Concurrent callers share a single underlying load operation. On failure
    /// the state is reset, so the next call starts a fresh attempt.
    pub async fn get(&self) -> Result<T, LoadError> {
        let future = {
            // the borrow must not be held across the await below
            let mut state = self.inner.state.borrow_mut();
            match &*state {
                LoadState::Ready(value) => return Ok(value.clone()),
                LoadState::Loading(future) => future.clone(),
                LoadState::Idle => {
                    let future = (self.inner.load)().shared();
                    *state = LoadState::Loading(future.clone());
                    future
                }
            }
        };

        let result = future.clone().await;
        let mut state = self.inner.state.borrow_mut();
        match &result {
            Ok(value) => {
                *state = LoadState::Ready(value.clone());
            }
            Err(err) => {
                tracing::error!("deferred content failed to load: {err}");
                // only reset if no newer attempt has been started meanwhile
                if matches!(&*state, LoadState::Loading(current) if current.ptr_eq(&future)) {
                    *state = LoadState::Idle;
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::executor::block_on;

    use super::*;

    fn counting(
        counter: Rc<Cell<usize>>,
        result: Result<&'static str, LoadError>,
    ) -> LazyContent<&'static str> {
        LazyContent::new(move || {
            counter.set(counter.get() + 1);
            let result = result.clone();
            async move { result }
        })
    }

    #[test]
    fn loads_once() {
        let counter = Rc::new(Cell::new(0));
        let content = counting(counter.clone(), Ok("about"));

        assert_eq!(block_on(content.get()), Ok("about"));
        assert_eq!(block_on(content.get()), Ok("about"));
        assert_eq!(counter.get(), 1);
        assert!(content.is_loaded());
        assert_eq!(content.peek(), Some("about"));
    }

    #[test]
    fn concurrent_requests_coalesce() {
        let counter = Rc::new(Cell::new(0));
        let content = counting(counter.clone(), Ok("about"));

        let (a, b) = block_on(futures::future::join(content.get(), content.get()));
        assert_eq!(a, Ok("about"));
        assert_eq!(b, Ok("about"));
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn failure_is_not_memoized() {
        let counter = Rc::new(Cell::new(0));
        let attempts = counter.clone();
        let content = LazyContent::new(move || {
            attempts.set(attempts.get() + 1);
            let attempt = attempts.get();
            async move {
                if attempt == 1 {
                    Err(LoadError::new("network down"))
                } else {
                    Ok("about")
                }
            }
        });

        assert!(block_on(content.get()).is_err());
        assert!(!content.is_loaded());
        assert_eq!(block_on(content.get()), Ok("about"));
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn clones_share_state() {
        let counter = Rc::new(Cell::new(0));
        let content = counting(counter.clone(), Ok("about"));
        let clone = content.clone();

        assert_eq!(block_on(content.get()), Ok("about"));
        assert!(clone.is_loaded());
        assert_eq!(counter.get(), 1);
    }
}
