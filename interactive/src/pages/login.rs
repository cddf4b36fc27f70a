use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use showroom_shared::routes::AppRoute;
use showroom_shared::{ApiError, LoginRequest};
use wasm_bindgen_futures::spawn_local;

use super::use_route_guard;
use crate::api;
use crate::components::{Alert, AlertKind, Header};
use crate::session::use_session;

const REJECTED: &str = "Invalid username or password.";
const UNREACHABLE: &str = "Unable to sign in at the moment. Please try again later.";

#[component]
pub fn LoginPage() -> impl IntoView {
    use_route_guard(AppRoute::Login);
    let session = use_session();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        submitting.set(true);
        error.set(None);

        let payload = LoginRequest {
            username: username.get_untracked(),
            password: password.get_untracked(),
        };
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::login(&payload).await {
                Ok(user) => {
                    session.sign_in(user).await;
                    navigate(
                        &AppRoute::Inventory.path(),
                        NavigateOptions {
                            replace: true,
                            ..Default::default()
                        },
                    );
                }
                Err(err @ ApiError::Network(_)) => {
                    tracing::warn!(error = %err, "login unreachable");
                    error.set(Some(UNREACHABLE.to_string()));
                }
                Err(err) => error.set(Some(err.user_message(REJECTED))),
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="login-page">
            <Header />
            <div class="login-wrapper">
                <div class="login-card">
                    <h1 class="login-title">"Welcome back"</h1>
                    <p class="login-subtitle">
                        "Sign in to comment on vehicles, like discussions and manage your favourites."
                    </p>
                    <Alert kind=AlertKind::Danger message=error />
                    <form class="login-form" on:submit=on_submit>
                        <div class="mb-3">
                            <label for="username" class="form-label">"Username"</label>
                            <input
                                id="username"
                                name="username"
                                class="form-control"
                                placeholder="Your username"
                                required=true
                                prop:value=move || username.get()
                                on:input=move |ev| username.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="mb-3">
                            <label for="password" class="form-label">"Password"</label>
                            <input
                                id="password"
                                name="password"
                                type="password"
                                class="form-control"
                                placeholder="Enter your password"
                                required=true
                                minlength="8"
                                prop:value=move || password.get()
                                on:input=move |ev| password.set(event_target_value(&ev))
                            />
                        </div>
                        <button
                            class="btn btn-accent w-100"
                            type="submit"
                            disabled=move || submitting.get()
                        >
                            {move || if submitting.get() { "Signing in..." } else { "Sign In" }}
                        </button>
                    </form>
                    <p class="login-footer">
                        "Don't have an account? "
                        <A href="/register">"Create one now"</A>
                        "."
                    </p>
                </div>
            </div>
        </div>
    }
}
