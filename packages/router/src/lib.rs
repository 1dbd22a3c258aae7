#![doc = include_str!("../README.md")]
// cannot use forbid, because tests use unwrap liberally
#![deny(missing_docs)]

pub mod blog;
pub mod history;
pub mod lazy;
pub mod navigation;
pub mod routes;
pub mod service;

mod state;
pub use state::{RouterState, ViewState};

/// A collection of useful items most applications might need.
pub mod prelude {
    pub use crate::blog::{blog_routes, names, DEFAULT_INDEX, PATH_BASE};
    pub use crate::history::{HistoryMode, HistoryProvider, MemoryHistory};
    pub use crate::lazy::{LazyContent, LoadError};
    pub use crate::navigation::NavigationTarget;
    pub use crate::routes::{Resolution, Route, RouteMatch, RouteTable};
    pub use crate::service::{FinishedLoad, NavigationService, PendingLoad};
    pub use crate::{RouterState, ViewState};
}
