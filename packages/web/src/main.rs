#![allow(non_snake_case)]

mod app;
mod history;
mod views;

use app::App;

fn main() {
    dioxus::logger::initialize_default();
    tracing::info!("starting the blog app");

    dioxus::launch(App);
}
