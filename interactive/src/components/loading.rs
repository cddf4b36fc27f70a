use leptos::prelude::*;

/// Centered spinner covering the viewport, used while a page has nothing to show.
#[component]
pub fn FullPageSpinner() -> impl IntoView {
    view! {
        <div class="app-loading d-flex align-items-center justify-content-center min-vh-100">
            <div class="spinner-border text-primary" role="status">
                <span class="visually-hidden">"Loading..."</span>
            </div>
        </div>
    }
}

#[component]
pub fn Spinner(#[prop(optional, into)] caption: Option<String>) -> impl IntoView {
    view! {
        <div class="text-center py-4">
            <div class="spinner-border text-primary" role="status" />
            {caption.map(|text| view! { <p class="mt-3 text-muted">{text}</p> })}
        </div>
    }
}
