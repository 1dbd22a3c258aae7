//! Platform history integration.
//!
//! The deployment variant is fixed at build time: hash-fragment routing by
//! default, real-path routing below [`PATH_BASE`] with the `path-history`
//! feature. On web targets the matching browser provider is used; everywhere
//! else (tests, host builds) navigation is kept in memory.

use blog_router::prelude::*;

#[cfg(target_family = "wasm")]
mod web;
#[cfg(target_family = "wasm")]
pub use web::{WebHashHistory, WebPathHistory};

/// The history mode this build was configured for.
pub fn history_mode() -> HistoryMode {
    if cfg!(feature = "path-history") {
        HistoryMode::Path { base: PATH_BASE }
    } else {
        HistoryMode::Hash
    }
}

/// Create the history provider for the current platform.
#[cfg(target_family = "wasm")]
pub fn platform_history(mode: HistoryMode) -> Box<dyn HistoryProvider> {
    match mode {
        HistoryMode::Hash => Box::new(WebHashHistory::new()),
        HistoryMode::Path { .. } => Box::new(WebPathHistory::new()),
    }
}

/// Create the history provider for the current platform.
#[cfg(not(target_family = "wasm"))]
pub fn platform_history(mode: HistoryMode) -> Box<dyn HistoryProvider> {
    Box::new(MemoryHistory::with_initial_path(
        mode.prefix().unwrap_or("/"),
    ))
}
