use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use showroom_shared::routes::AppRoute;
use wasm_bindgen_futures::spawn_local;

use crate::session::use_session;

/// Top navigation with the greeting and login / logout controls.
#[component]
pub fn Header() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let logging_out = RwSignal::new(false);

    let on_logout = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        if logging_out.get_untracked() {
            return;
        }
        logging_out.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            session.logout().await;
            logging_out.set(false);
            navigate(
                &AppRoute::Inventory.path(),
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        });
    };

    view! {
        <nav class="navbar navbar-expand-lg navbar-dark primary-nav sticky-top">
            <div class="container-fluid">
                <A href="/" attr:class="navbar-brand fw-bold">"Dealerships CM"</A>
                <ul class="navbar-nav me-auto mb-2 mb-lg-0 gap-lg-2">
                    <li class="nav-item">
                        <A href="/" exact=true attr:class="nav-link">"Inventory"</A>
                    </li>
                    <li class="nav-item">
                        <A href="/dealers" attr:class="nav-link">"Discover"</A>
                    </li>
                    <Show when=move || session.is_logged_in()>
                        <li class="nav-item">
                            <A href="/profile" attr:class="nav-link">"My Profile"</A>
                        </li>
                    </Show>
                </ul>
                <div class="d-flex align-items-center gap-2">
                    {move || match session.user() {
                        Some(user) => view! {
                            <span class="text-white-50">
                                "Hello, " <strong>{user.display_name().to_string()}</strong>
                            </span>
                            <button
                                class="btn btn-outline-light btn-sm"
                                on:click=on_logout.clone()
                                disabled=move || logging_out.get()
                            >
                                {move || if logging_out.get() { "Logging out..." } else { "Logout" }}
                            </button>
                        }
                        .into_any(),
                        None => view! {
                            <A href="/login" attr:class="btn btn-outline-light btn-sm">"Login"</A>
                            <A href="/register" attr:class="btn btn-light btn-sm">"Register"</A>
                        }
                        .into_any(),
                    }}
                </div>
            </div>
        </nav>
    }
}
