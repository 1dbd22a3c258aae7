use dioxus::prelude::*;

/// The content of the about page.
///
/// In the deployed site this ships in its own chunk and is only fetched when
/// the route is first visited; see [`super::about_loader`].
#[derive(Clone, Debug, PartialEq)]
pub struct AboutContent {
    /// The page heading.
    pub title: String,
    /// The body, one string per paragraph.
    pub paragraphs: Vec<String>,
}

impl AboutContent {
    /// The content bundled with this build.
    pub fn bundled() -> Self {
        Self {
            title: String::from("About this blog"),
            paragraphs: vec![
                String::from(
                    "Notes on things I build and break, published as numbered posts. \
                     The landing page always shows the most recent one.",
                ),
                String::from(
                    "Everything here is static: posts are plain markdown files served \
                     next to the app, and the page you are reading was fetched the \
                     first time you navigated to it.",
                ),
            ],
        }
    }
}

/// The about view.
#[component]
pub fn About(content: AboutContent) -> Element {
    rsx! {
        article { class: "about",
            h1 { "{content.title}" }
            for paragraph in content.paragraphs.iter() {
                p { "{paragraph}" }
            }
        }
    }
}
