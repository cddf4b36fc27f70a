use leptos::prelude::*;
use leptos_router::components::A;
use showroom_shared::error::GuardedAction;
use showroom_shared::format::format_price;
use showroom_shared::inventory::{
    apply_favorite_in, favorite_label, favorite_status, InventoryQuery,
};
use showroom_shared::routes::AppRoute;
use showroom_shared::{Car, FilterSet};
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::components::{Alert, AlertKind, Header, Spinner};
use crate::session::use_session;
use crate::supersede::Superseding;

const LOAD_FAILED: &str = "Unable to load cars.";
const FAVORITE_FAILED: &str = "Não foi possível atualizar o favorito.";

/// Catalogue with server-side filters, mounted on `/` and `/dealers`.
#[component]
pub fn InventoryPage() -> impl IntoView {
    let session = use_session();
    let query = RwSignal::new(InventoryQuery::default());
    let cars: RwSignal<Vec<Car>> = RwSignal::new(Vec::new());
    let filters = RwSignal::new(FilterSet::default());
    let loading = RwSignal::new(true);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let status: RwSignal<Option<String>> = RwSignal::new(None);

    // Every filter change supersedes the request before it.
    let requests = Superseding::scoped();
    Effect::new(move |_| {
        let query = query.get();
        let token = requests.begin();
        loading.set(true);
        error.set(None);
        status.set(None);
        spawn_local(async move {
            let Some(result) = token.settle(api::fetch_cars(&query, &token).await) else {
                return;
            };
            match result {
                Ok(listing) => {
                    tracing::debug!(count = listing.cars.len(), "inventory loaded");
                    cars.set(listing.cars);
                    filters.set(listing.filters);
                }
                Err(err) => {
                    cars.set(Vec::new());
                    error.set(Some(err.user_message(LOAD_FAILED)));
                }
            }
            loading.set(false);
        });
    });

    let on_favorite = Callback::new(move |car_id: i64| {
        if !session.is_logged_in_untracked() {
            status.set(Some(GuardedAction::FavoriteFromListing.prompt().to_string()));
            return;
        }
        spawn_local(async move {
            match api::toggle_favorite(car_id).await {
                Ok(toggle) => {
                    cars.update(|list| {
                        apply_favorite_in(list, car_id, toggle);
                    });
                    status.set(Some(favorite_status(toggle, true).to_string()));
                }
                Err(err) => status.set(Some(err.user_message(FAVORITE_FAILED))),
            }
        });
    });

    // Only show the info banner when there is no error to show.
    let info = Signal::derive(move || {
        if error.with(Option::is_some) {
            None
        } else {
            status.get()
        }
    });

    view! {
        <div class="inventory-page">
            <Header />
            <div class="inventory-hero text-center text-white py-5">
                <div class="container">
                    <h1 class="display-5 fw-semibold">"Coleção exclusiva de carros de luxo"</h1>
                    <p class="lead text-white-50">
                        "Filtre por marca, ano ou faixa de preço para encontrar o veículo perfeito e acompanhe comentários da comunidade."
                    </p>
                </div>
            </div>
            <div class="container inventory-container">
                <div class="row g-4">
                    <div class="col-lg-3">
                        <FilterPanel query=query filters=filters />
                    </div>
                    <div class="col-lg-9">
                        <Alert kind=AlertKind::Danger message=error />
                        <Alert kind=AlertKind::Info message=info />
                        {move || {
                            if loading.get() {
                                view! { <Spinner caption="Carregando catálogo..." /> }.into_any()
                            } else if cars.with(Vec::is_empty) {
                                view! {
                                    <div class="empty-state">
                                        <h3>"Nenhum veículo encontrado"</h3>
                                        <p class="text-muted">
                                            "Ajuste os filtros de busca ou limpe os campos para visualizar toda a coleção de carros de luxo."
                                        </p>
                                    </div>
                                }
                                .into_any()
                            } else {
                                view! {
                                    <div class="row g-4">
                                        <For
                                            each=move || cars.get()
                                            key=|car| (car.id, car.is_favorite, car.favorite_count)
                                            let:car
                                        >
                                            <CarCard car=car on_favorite=on_favorite />
                                        </For>
                                    </div>
                                }
                                .into_any()
                            }
                        }}
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
fn FilterPanel(query: RwSignal<InventoryQuery>, filters: RwSignal<FilterSet>) -> impl IntoView {
    let price_hint = move || {
        let range = filters.with(|f| f.price.clone());
        match (range.min, range.max) {
            (Some(min), Some(max)) => Some(view! {
                <small class="text-muted">
                    {format!("Faixa disponível: ${} - ${}", format_price(min), format_price(max))}
                </small>
            }),
            _ => None,
        }
    };

    let year_options = move || {
        filters
            .with(|f| f.years.clone())
            .into_iter()
            .map(|year| view! { <option value=year.to_string()>{year}</option> })
            .collect_view()
    };

    view! {
        <div class="filters-card">
            <h2 class="h5 fw-semibold mb-3">"Filtros"</h2>
            <div class="mb-3">
                <label class="form-label">"Buscar"</label>
                <input
                    type="text"
                    class="form-control"
                    placeholder="Busque por modelo ou marca"
                    prop:value=move || query.with(|q| q.search.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        query.update(|q| q.search = value);
                    }
                />
            </div>
            <div class="mb-3">
                <label class="form-label">"Marca"</label>
                <select
                    class="form-select"
                    prop:value=move || query.with(|q| q.brand.clone())
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        query.update(|q| q.brand = value);
                    }
                >
                    <option value="">"Todas as marcas"</option>
                    {move || {
                        filters
                            .with(|f| f.brands.clone())
                            .into_iter()
                            .map(|brand| {
                                let value = brand.clone();
                                view! { <option value=value>{brand}</option> }
                            })
                            .collect_view()
                    }}
                </select>
            </div>
            <div class="mb-3">
                <label class="form-label">"Faixa de preço (USD)"</label>
                <div class="d-flex gap-2">
                    <input
                        type="number"
                        min="0"
                        class="form-control"
                        placeholder="mínimo"
                        prop:value=move || query.with(|q| q.price_min.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            query.update(|q| q.price_min = value);
                        }
                    />
                    <input
                        type="number"
                        min="0"
                        class="form-control"
                        placeholder="máximo"
                        prop:value=move || query.with(|q| q.price_max.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            query.update(|q| q.price_max = value);
                        }
                    />
                </div>
                {price_hint}
            </div>
            <div class="mb-3">
                <label class="form-label">"Ano"</label>
                <div class="d-flex gap-2">
                    <select
                        class="form-select"
                        prop:value=move || query.with(|q| q.year_min.clone())
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            query.update(|q| q.year_min = value);
                        }
                    >
                        <option value="">"De"</option>
                        {year_options}
                    </select>
                    <select
                        class="form-select"
                        prop:value=move || query.with(|q| q.year_max.clone())
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            query.update(|q| q.year_max = value);
                        }
                    >
                        <option value="">"Até"</option>
                        {year_options}
                    </select>
                </div>
            </div>
            <button
                class="btn btn-outline-secondary w-100"
                on:click=move |_| query.set(InventoryQuery::default())
            >
                "Limpar filtros"
            </button>
        </div>
    }
}

#[component]
fn CarCard(car: Car, on_favorite: Callback<i64>) -> impl IntoView {
    let car_id = car.id;
    let favorite_class = if car.is_favorite {
        "btn btn-sm btn-primary"
    } else {
        "btn btn-sm btn-outline-primary"
    };

    view! {
        <div class="col-md-6 col-xl-4">
            <div class="car-card h-100 d-flex flex-column">
                <div
                    class="car-card-image"
                    style=format!("background-image: url({})", car.image_url)
                />
                <div class="car-card-body flex-grow-1 d-flex flex-column">
                    <div class="d-flex justify-content-between align-items-start mb-2">
                        <span class="badge bg-dark text-uppercase">{car.brand.clone()}</span>
                        <span class="badge bg-secondary badge-pill">{car.year}</span>
                    </div>
                    <h3 class="h5 fw-semibold mb-1">{car.name.clone()}</h3>
                    <p class="text-muted mb-3">{format!("${}", format_price(car.price))}</p>
                    <div class="mt-auto d-flex justify-content-between align-items-center">
                        <A href=AppRoute::CarDetail(car_id).path() attr:class="btn btn-outline-primary btn-sm">
                            "Ver detalhes"
                        </A>
                        <button class=favorite_class on:click=move |_| on_favorite.run(car_id)>
                            {favorite_label(&car, true)}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
