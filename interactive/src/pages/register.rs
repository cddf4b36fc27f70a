use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use showroom_shared::routes::AppRoute;
use showroom_shared::{ApiError, RegisterRequest, ValidationError};
use wasm_bindgen_futures::spawn_local;

use super::use_route_guard;
use crate::api;
use crate::components::{Alert, AlertKind, Header};
use crate::session::use_session;

const REJECTED: &str = "Unable to create your account. Please try again.";
const UNREACHABLE: &str = "Unexpected error while communicating with the server.";

#[derive(Clone, Copy)]
struct RegisterForm {
    username: RwSignal<String>,
    email: RwSignal<String>,
    first_name: RwSignal<String>,
    last_name: RwSignal<String>,
    password: RwSignal<String>,
    confirm: RwSignal<String>,
}

impl RegisterForm {
    fn new() -> Self {
        Self {
            username: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            first_name: RwSignal::new(String::new()),
            last_name: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            confirm: RwSignal::new(String::new()),
        }
    }

    /// Builds the request, refusing mismatched passwords before anything is sent.
    fn request(&self) -> Result<RegisterRequest, ValidationError> {
        let password = self.password.get_untracked();
        if password != self.confirm.get_untracked() {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(RegisterRequest {
            username: self.username.get_untracked(),
            first_name: self.first_name.get_untracked(),
            last_name: self.last_name.get_untracked(),
            email: self.email.get_untracked(),
            password,
        })
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    use_route_guard(AppRoute::Register);
    let session = use_session();
    let navigate = use_navigate();

    let form = RegisterForm::new();
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        error.set(None);

        let payload = match form.request() {
            Ok(payload) => payload,
            Err(invalid) => {
                error.set(Some(invalid.to_string()));
                return;
            }
        };

        submitting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::register(&payload).await {
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
                    tracing::warn!(error = %err, "register unreachable");
                    error.set(Some(UNREACHABLE.to_string()));
                }
                Err(err) => error.set(Some(err.user_message(REJECTED))),
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="register-page">
            <Header />
            <div class="register-wrapper">
                <div class="register-card">
                    <h1 class="register-title">"Create your account"</h1>
                    <p class="register-subtitle">
                        "Save favourite cars, manage your comments and enjoy a tailored experience."
                    </p>
                    <Alert kind=AlertKind::Danger message=error />
                    <form class="register-form" on:submit=on_submit>
                        <div class="row g-3">
                            <Field id="registerUsername" label="Username" kind="text"
                                placeholder="Choose a unique username" value=form.username />
                            <Field id="registerEmail" label="Email" kind="email"
                                placeholder="you@example.com" value=form.email />
                            <Field id="registerFirstName" label="First name" kind="text"
                                placeholder="Your first name" value=form.first_name />
                            <Field id="registerLastName" label="Last name" kind="text"
                                placeholder="Your last name" value=form.last_name />
                            <Field id="registerPassword" label="Password" kind="password"
                                placeholder="Create a strong password" value=form.password />
                            <Field id="registerConfirmPassword" label="Confirm password" kind="password"
                                placeholder="Repeat your password" value=form.confirm />
                        </div>
                        <button
                            class="btn btn-accent w-100 mt-4"
                            type="submit"
                            disabled=move || submitting.get()
                        >
                            {move || if submitting.get() { "Creating account..." } else { "Create Account" }}
                        </button>
                    </form>
                    <p class="register-footer">
                        "Already have an account? "
                        <A href="/login">"Sign in here"</A>
                        "."
                    </p>
                </div>
            </div>
        </div>
    }
}

/// Required half-width input bound to `value`. Password inputs need 8 characters.
#[component]
fn Field(
    id: &'static str,
    label: &'static str,
    kind: &'static str,
    placeholder: &'static str,
    value: RwSignal<String>,
) -> impl IntoView {
    let minlength = (kind == "password").then_some("8");
    view! {
        <div class="col-md-6">
            <label for=id class="form-label">{label}</label>
            <input
                id=id
                type=kind
                class="form-control"
                placeholder=placeholder
                required=true
                minlength=minlength
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}
