//! The route table of the blog.
//!
//! Both deployment variants (hash-fragment hosting and real-path hosting
//! below `/Blog`) share this one logical table; the [`HistoryMode`] passed to
//! [`blog_routes`] is the only thing that differs between them.

use crate::{
    history::HistoryMode,
    lazy::LazyContent,
    navigation::NavigationTarget,
    routes::{Route, RouteTable},
};

/// The post shown when the root path is requested without an explicit index.
///
/// Must correspond to a post that exists among the published content; the
/// router does not validate this.
pub const DEFAULT_INDEX: &str = "006";

/// The base prefix the app lives under when deployed with real-path routing.
pub const PATH_BASE: &str = "/Blog";

/// The unique names of the blog's routes.
pub mod names {
    /// The home view, showing the post named by the `index` parameter.
    pub const HOME: &str = "home";
    /// The about view. Its content is loaded on first navigation.
    pub const ABOUT: &str = "about";
    /// The explicit not-found view shown for unmatched paths.
    pub const NOT_FOUND: &str = "not_found";
}

/// Build the blog's route table for the given [`HistoryMode`].
///
/// * the root path redirects to the default post: directly to
///   `/{DEFAULT_INDEX}` under hash routing, via the named home route under
///   path routing
/// * `/:index` shows the home view with the index bound, unvalidated
/// * `/about` shows the about view, whose content is deferred
/// * everything else falls back to the not-found view
pub fn blog_routes<T: Clone>(
    mode: HistoryMode,
    home: T,
    about: LazyContent<T>,
    not_found: T,
) -> RouteTable<T> {
    let root: NavigationTarget = match mode {
        HistoryMode::Hash => format!("/{DEFAULT_INDEX}").into(),
        HistoryMode::Path { .. } => NavigationTarget::named(names::HOME),
    };
    RouteTable::new(mode)
        .redirect_root(root)
        .fixed("about", Route::deferred(names::ABOUT, about))
        .parameter(
            "index",
            Route::content(names::HOME, home),
            Some(DEFAULT_INDEX),
        )
        .fallback(Route::content(names::NOT_FOUND, not_found))
}

#[cfg(test)]
mod tests {
    use crate::routes::Resolution;

    use super::*;

    fn table(mode: HistoryMode) -> RouteTable<&'static str> {
        let about = LazyContent::new(|| async { Ok("about page") });
        blog_routes(mode, "home page", about, "not found")
    }

    #[test]
    fn hash_root_redirects_to_default_post() {
        match table(HistoryMode::Hash).resolve("/") {
            Resolution::Redirect(NavigationTarget::Internal(target)) => {
                assert_eq!(target, format!("/{DEFAULT_INDEX}"))
            }
            _ => panic!("expected redirect to the default post"),
        }
    }

    #[test]
    fn path_root_redirects_to_named_home() {
        match table(HistoryMode::Path { base: PATH_BASE }).resolve(PATH_BASE) {
            Resolution::Redirect(target) => {
                // no index forced by the router itself
                assert_eq!(target, NavigationTarget::named(names::HOME));
            }
            _ => panic!("expected redirect to the named home route"),
        }
    }

    #[test]
    fn index_resolves_to_home() {
        match table(HistoryMode::Hash).resolve("/042") {
            Resolution::Page(m) => {
                assert_eq!(m.name, names::HOME);
                assert_eq!(m.parameters["index"], "042");
            }
            _ => panic!("expected the home view"),
        }
    }

    #[test]
    fn about_resolves_in_both_modes() {
        for (mode, path) in [
            (HistoryMode::Hash, "/about"),
            (HistoryMode::Path { base: PATH_BASE }, "/Blog/about"),
        ] {
            match table(mode).resolve(path) {
                Resolution::Page(m) => assert_eq!(m.name, names::ABOUT),
                _ => panic!("expected the about view for {path}"),
            }
        }
    }
}
