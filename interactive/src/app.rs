use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::{path, NavigateOptions};
use wasm_bindgen_futures::spawn_local;

use crate::components::FullPageSpinner;
use crate::pages::{CarDetailPage, InventoryPage, LoginPage, ProfilePage, RegisterPage};
use crate::session::provide_session;

/// Root component: owns the session and holds the routes back until the
/// first profile check has settled.
#[component]
pub fn App() -> impl IntoView {
    let session = provide_session();
    spawn_local(async move {
        if session.refresh().await.into_profile().is_none() {
            tracing::debug!("starting signed out");
        }
    });

    view! {
        <Show when=move || !session.is_initializing() fallback=|| view! { <FullPageSpinner /> }>
            <Router>
                <Routes fallback=|| {
                    view! {
                        <Redirect
                            path="/"
                            options=NavigateOptions {
                                replace: true,
                                ..Default::default()
                            }
                        />
                    }
                }>
                    <Route path=path!("/") view=InventoryPage />
                    <Route path=path!("/dealers") view=InventoryPage />
                    <Route path=path!("/cars/:car_id") view=CarDetailPage />
                    <Route path=path!("/profile") view=ProfilePage />
                    <Route path=path!("/login") view=LoginPage />
                    <Route path=path!("/register") view=RegisterPage />
                </Routes>
            </Router>
        </Show>
    }
}
