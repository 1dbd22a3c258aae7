//! The views of the blog, keyed by route name.

use blog_router::prelude::*;
use dioxus::prelude::*;

use crate::app::Nav;

mod about;
mod home;
mod not_found;

pub use about::{About, AboutContent};
pub use home::Home;
pub use not_found::NotFound;

/// What a resolved route renders.
#[derive(Clone, Debug, PartialEq)]
pub enum Page {
    /// The home view; the post index comes from the route parameters.
    Home,
    /// The about view with its deferred content.
    About(AboutContent),
    /// The explicit not-found view.
    NotFound,
}

/// The deferred loader for the about page.
///
/// The router never asks for this before the first navigation to `/about`;
/// the load is memoized and concurrent requests are coalesced.
pub fn about_loader() -> LazyContent<Page> {
    LazyContent::new(|| async { Ok(Page::About(AboutContent::bundled())) })
}

/// An anchor that routes internally instead of reloading the page.
#[component]
pub fn NavLink(target: NavigationTarget, children: Element) -> Element {
    let nav = use_context::<Nav>();
    let href = nav.href(&target);
    rsx! {
        a {
            class: "nav-link",
            href: "{href}",
            onclick: move |evt: MouseEvent| {
                evt.prevent_default();
                nav.navigate(target.clone());
            },
            {children}
        }
    }
}

/// Shown while deferred content is on its way.
#[component]
pub fn Loading() -> Element {
    rsx! {
        p { class: "route-loading", "Loading…" }
    }
}

/// Shown when deferred content could not be loaded. Navigating again retries.
#[component]
pub fn LoadFailed(message: String) -> Element {
    rsx! {
        div { class: "route-error",
            p { "This page could not be loaded." }
            p { class: "route-error-detail", "{message}" }
        }
    }
}
