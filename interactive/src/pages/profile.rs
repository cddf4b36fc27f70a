use leptos::prelude::*;
use leptos_router::components::A;
use showroom_shared::format::{format_date, format_timestamp};
use showroom_shared::routes::AppRoute;
use showroom_shared::session::Refresh;
use showroom_shared::{FavoriteCar, ProfileComment, ProfilePayload};
use wasm_bindgen_futures::spawn_local;

use super::use_route_guard;
use crate::components::{Alert, AlertKind, FullPageSpinner, Header};
use crate::session::use_session;

const PROFILE_FAILED: &str = "Não foi possível carregar os dados do perfil.";

/// Signed-in user's page: identity, favourites and comment history.
#[component]
pub fn ProfilePage() -> impl IntoView {
    use_route_guard(AppRoute::Profile);
    let session = use_session();

    let profile: RwSignal<Option<ProfilePayload>> = RwSignal::new(None);
    let loading = RwSignal::new(true);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    if session.is_logged_in_untracked() {
        spawn_local(async move {
            match session.refresh().await {
                Refresh::Loaded(payload) => profile.set(Some(payload)),
                Refresh::Failed => error.set(Some(PROFILE_FAILED.to_string())),
                // A newer sign-in or sign-out owns the session; the guard
                // handles the latter.
                Refresh::Stale => {}
            }
            loading.set(false);
        });
    } else {
        loading.set(false);
    }

    move || {
        if !session.is_logged_in() {
            return ().into_any();
        }
        if loading.get() {
            return view! { <FullPageSpinner /> }.into_any();
        }

        // Without a loaded profile the header falls back to the session user.
        let (user, favorites, comments) = match profile.get() {
            Some(payload) => (Some(payload.user), payload.favorites, payload.comments),
            None => (session.user(), Vec::new(), Vec::new()),
        };
        let (full_name, email, username) = user
            .map(|u| (u.full_name, u.email, u.username))
            .unwrap_or_default();

        view! {
            <div class="profile-page">
                <Header />
                <div class="container py-5">
                    <Alert kind=AlertKind::Danger message=error />
                    <section class="profile-header card shadow-sm">
                        <div class="card-body d-flex justify-content-between align-items-center">
                            <div>
                                <h1 class="h3 fw-semibold mb-2">{full_name}</h1>
                                <p class="text-muted mb-0">{email}</p>
                                <p class="text-muted mb-0">{format!("@{username}")}</p>
                            </div>
                            <div class="d-flex gap-3">
                                <div class="stat-card">
                                    <span class="stat-value">{favorites.len()}</span>
                                    <span class="stat-label">"Favoritos"</span>
                                </div>
                                <div class="stat-card">
                                    <span class="stat-value">{comments.len()}</span>
                                    <span class="stat-label">"Comentários"</span>
                                </div>
                            </div>
                        </div>
                    </section>
                    <div class="row g-4 mt-4">
                        <div class="col-lg-6">
                            <FavoritesCard favorites=favorites />
                        </div>
                        <div class="col-lg-6">
                            <HistoryCard comments=comments />
                        </div>
                    </div>
                </div>
            </div>
        }
        .into_any()
    }
}

#[component]
fn FavoritesCard(favorites: Vec<FavoriteCar>) -> impl IntoView {
    let body = if favorites.is_empty() {
        view! {
            <p class="text-muted">"Você ainda não adicionou carros à lista de favoritos."</p>
        }
        .into_any()
    } else {
        let items = favorites
            .into_iter()
            .map(|item| {
                let since = format_date(&item.favorite_since);
                view! {
                    <div class="list-group-item px-0">
                        <div class="d-flex justify-content-between align-items-start">
                            <div>
                                <h3 class="h6 mb-1">{format!("{} {}", item.car.brand, item.car.name)}</h3>
                                <p class="text-muted mb-1">{format!("Ano {}", item.car.year)}</p>
                                <small class="text-muted">{format!("Adicionado em {since}")}</small>
                            </div>
                            <A href=AppRoute::CarDetail(item.car.id).path() attr:class="btn btn-outline-primary btn-sm">
                                "Ver detalhes"
                            </A>
                        </div>
                    </div>
                }
            })
            .collect_view();
        view! { <div class="list-group list-group-flush">{items}</div> }.into_any()
    };

    view! {
        <section class="card shadow-sm h-100">
            <div class="card-body">
                <h2 class="h5 fw-semibold mb-3">"Carros favoritados"</h2>
                {body}
            </div>
        </section>
    }
}

#[component]
fn HistoryCard(comments: Vec<ProfileComment>) -> impl IntoView {
    let body = if comments.is_empty() {
        view! { <p class="text-muted">"Você ainda não comentou nenhum veículo."</p> }.into_any()
    } else {
        let items = comments
            .into_iter()
            .map(|item| {
                view! {
                    <div class="list-group-item px-0">
                        <div class="d-flex justify-content-between align-items-start">
                            <div>
                                <h3 class="h6 mb-1">{format!("{} {}", item.car.brand, item.car.name)}</h3>
                                <p class="mb-1 comment-preview">{item.content}</p>
                                <small class="text-muted">{format_timestamp(&item.created_at)}</small>
                            </div>
                            <A href=AppRoute::CarDetail(item.car.id).path() attr:class="btn btn-outline-primary btn-sm">
                                "Ver carro"
                            </A>
                        </div>
                    </div>
                }
            })
            .collect_view();
        view! { <div class="list-group list-group-flush">{items}</div> }.into_any()
    };

    view! {
        <section class="card shadow-sm h-100">
            <div class="card-body">
                <h2 class="h5 fw-semibold mb-3">"Histórico de comentários"</h2>
                {body}
            </div>
        </section>
    }
}
