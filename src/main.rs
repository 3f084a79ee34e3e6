mod app;
mod client;
mod components;
mod config;
mod geometry;
mod map;
mod mock;
mod model;
mod session;
mod severity;

use app::App;

fn main() {
    leptos::mount::mount_to_body(App);
}
