//! Application root: builds the route table, owns the navigation service and
//! renders whichever view the current route names.

use std::rc::Rc;

use blog_router::prelude::*;
use dioxus::prelude::*;

use crate::{
    history::{history_mode, platform_history},
    views::{about_loader, About, Home, LoadFailed, Loading, NavLink, NotFound, Page},
};

const MAIN_CSS: Asset = asset!("/assets/main.css");
const HIGHLIGHT_CSS: Asset = asset!("/assets/highlight.css");

pub(crate) type Service = NavigationService<Page>;

/// Handle through which views ask for navigation. Cheap to copy; provided to
/// the component tree as a context.
#[derive(Clone, Copy)]
pub(crate) struct Nav(Signal<Service>);

impl Nav {
    pub(crate) fn navigate(&self, target: NavigationTarget) {
        let mut service = self.0;
        let pending = service.write().push(target);
        drive(service, pending);
    }

    /// The href to put on an anchor for `target`. Cosmetic only; clicks are
    /// routed internally.
    pub(crate) fn href(&self, target: &NavigationTarget) -> String {
        let service = self.0.read();
        let href = service.href(target).unwrap_or_else(|| String::from("/"));
        match service.mode() {
            HistoryMode::Hash => format!("#{href}"),
            HistoryMode::Path { .. } => href,
        }
    }
}

/// Drive a deferred load from within the component runtime.
fn drive(mut service: Signal<Service>, pending: Option<PendingLoad<Page>>) {
    let Some(pending) = pending else { return };
    spawn(async move {
        let finished = pending.load().await;
        service.write().commit(finished);
    });
}

/// Drive a deferred load from outside the component runtime, e.g. from a
/// browser history listener.
#[allow(unused_variables, unused_mut)]
fn drive_detached(mut service: Signal<Service>, pending: Option<PendingLoad<Page>>) {
    let Some(pending) = pending else { return };
    #[cfg(target_family = "wasm")]
    wasm_bindgen_futures::spawn_local(async move {
        let finished = pending.load().await;
        service.write().commit(finished);
    });
    // foreign navigation only exists on web targets
}

#[component]
pub fn App() -> Element {
    let service = use_hook(|| {
        let mode = history_mode();
        let table = blog_routes(mode, Page::Home, about_loader(), Page::NotFound);
        let (service, pending) = NavigationService::new(table, platform_history(mode));

        let mut signal = Signal::new(service);
        drive(signal, pending);

        // back/forward buttons and manual location edits re-enter through here
        let listener = signal;
        signal.write().on_external_change(Rc::new(move || {
            let mut listener = listener;
            let pending = listener.write().sync();
            drive_detached(listener, pending);
        }));
        signal
    });

    use_context_provider(|| Nav(service));

    let state = service.read().state().clone();

    rsx! {
        document::Stylesheet { href: MAIN_CSS }
        document::Stylesheet { href: HIGHLIGHT_CSS }

        header { class: "site-header",
            nav { class: "site-nav",
                NavLink { target: NavigationTarget::named(names::HOME), "Home" }
                NavLink { target: NavigationTarget::named(names::ABOUT), "About" }
            }
        }

        main { class: "content",
            {
                match &state.view {
                    ViewState::Ready(Page::Home) => {
                        let index = state
                            .parameter("index")
                            .unwrap_or(DEFAULT_INDEX)
                            .to_string();
                        rsx! { Home { index } }
                    }
                    ViewState::Ready(Page::About(content)) => rsx! {
                        About { content: content.clone() }
                    },
                    ViewState::Ready(Page::NotFound) | ViewState::NotFound => rsx! {
                        NotFound { path: state.path.clone() }
                    },
                    ViewState::Loading => rsx! { Loading {} },
                    ViewState::Failed(err) => rsx! { LoadFailed { message: err.to_string() } },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blog_router::history::MemoryHistory;
    use futures::executor::block_on;

    use super::*;

    fn test_service() -> (Service, Option<PendingLoad<Page>>) {
        let mode = history_mode();
        NavigationService::new(
            blog_routes(mode, Page::Home, about_loader(), Page::NotFound),
            Box::new(MemoryHistory::with_initial_path(
                mode.prefix().unwrap_or("/"),
            )),
        )
    }

    #[test]
    #[cfg(not(feature = "path-history"))]
    fn hash_mode_is_the_default_deployment() {
        assert_eq!(history_mode(), HistoryMode::Hash);
    }

    #[test]
    fn startup_lands_on_the_default_post() {
        let (service, pending) = test_service();
        assert!(pending.is_none());
        assert_eq!(service.state().name, names::HOME);
        assert_eq!(service.state().parameter("index"), Some(DEFAULT_INDEX));
        assert_eq!(service.state().view, ViewState::Ready(Page::Home));
    }

    #[test]
    fn about_navigation_loads_the_about_page() {
        let (mut service, _) = test_service();
        let pending = service
            .push(NavigationTarget::named(names::ABOUT))
            .expect("about content should load on demand");
        assert_eq!(service.state().view, ViewState::Loading);

        let finished = block_on(pending.load());
        assert!(service.commit(finished));
        assert!(matches!(
            service.state().view,
            ViewState::Ready(Page::About(_))
        ));
    }
}
