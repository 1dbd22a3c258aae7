use dioxus::prelude::*;

/// The home view, showing the post named by the `index` route parameter.
///
/// The router binds the index without validating it; whether a post with this
/// index exists is decided by the content published alongside the app.
#[component]
pub fn Home(index: String) -> Element {
    rsx! {
        article { class: "post",
            h1 { class: "post-title", "Post {index}" }
            // the content pipeline renders the post's markdown into this node
            section { id: "post-body", class: "post-body", "data-index": "{index}" }
        }
    }
}
