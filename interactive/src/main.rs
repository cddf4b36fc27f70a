mod api;
mod app;
mod comments;
mod components;
mod config;
mod logging;
mod pages;
mod session;
mod supersede;

use leptos::prelude::*;
use wasm_bindgen::JsCast;

fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    tracing::info!(api = %config::api_base(), "showroom starting");

    let mount_point = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("showroom-app"));

    // Mount into the dedicated element when the page has one, else the body.
    match mount_point {
        Some(el) => {
            let html_el: web_sys::HtmlElement = el.unchecked_into();
            leptos::mount::mount_to(html_el, || view! { <app::App /> }).forget();
        }
        None => leptos::mount::mount_to_body(|| view! { <app::App /> }),
    }
}
