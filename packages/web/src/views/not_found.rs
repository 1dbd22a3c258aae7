use blog_router::prelude::*;
use dioxus::prelude::*;

use super::NavLink;

/// Shown for locations no route matches.
#[component]
pub fn NotFound(path: String) -> Element {
    rsx! {
        div { class: "not-found",
            h1 { "Page not found" }
            p { "Nothing lives at {path}." }
            NavLink { target: NavigationTarget::named(names::HOME), "Back to the latest post" }
        }
    }
}
