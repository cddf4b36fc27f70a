use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Danger,
    Info,
}

impl AlertKind {
    fn class(self) -> &'static str {
        match self {
            AlertKind::Danger => "alert alert-danger",
            AlertKind::Info => "alert alert-info",
        }
    }
}

/// Banner bound to an optional message; renders nothing while it is `None`.
#[component]
pub fn Alert(kind: AlertKind, #[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message.get().map(|text| {
            view! {
                <div class=kind.class() role="alert">
                    {text}
                </div>
            }
        })
    }
}
