use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use showroom_shared::discussion::{self, Mutation, Reload, ThreadBackend};
use showroom_shared::error::GuardedAction;
use showroom_shared::format::{format_price, humanize_type};
use showroom_shared::inventory::{apply_favorite, favorite_label, favorite_status};
use showroom_shared::supersede::CancelToken;
use showroom_shared::thread::{project, ThreadCommand};
use showroom_shared::{ApiError, Car, Comment, ValidationError};
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::comments::CommentThread;
use crate::components::{Alert, AlertKind, FullPageSpinner, Header, Spinner};
use crate::session::{use_session, SessionContext};
use crate::supersede::Superseding;

const CAR_MISSING: &str = "Carro não encontrado.";
const FAVORITE_FAILED: &str = "Não foi possível atualizar os favoritos.";

/// The live API as a thread backend.
struct ApiThread;

impl ThreadBackend for ApiThread {
    async fn run(&self, car_id: i64, command: &ThreadCommand) -> Result<(), ApiError> {
        api::run_command(car_id, command).await
    }

    async fn fetch(&self, car_id: i64, token: &CancelToken) -> Result<Vec<Comment>, ApiError> {
        api::fetch_comments(car_id, token).await
    }
}

/// The car's comment thread plus the bits of the car it keeps in sync.
#[derive(Clone)]
struct ThreadModel {
    session: SessionContext,
    car: RwSignal<Option<Car>>,
    comments: RwSignal<Vec<Comment>>,
    loading: RwSignal<bool>,
    status: RwSignal<Option<String>>,
    requests: Superseding,
}

impl ThreadModel {
    fn begin_reload(&self) -> CancelToken {
        self.loading.set(true);
        self.status.set(None);
        self.requests.begin()
    }

    async fn reload(self, car_id: i64) {
        let token = self.begin_reload();
        let outcome = discussion::reload(&ApiThread, car_id, token).await;
        self.show(outcome);
    }

    fn show(&self, outcome: Reload) {
        match outcome {
            Reload::Superseded => return,
            Reload::Loaded { .. } => {
                self.car.update(|car| {
                    if let Some(car) = car {
                        outcome.sync_count(car);
                    }
                });
                if let Reload::Loaded { comments, .. } = outcome {
                    self.comments.set(comments);
                }
            }
            Reload::Failed(message) => {
                self.comments.set(Vec::new());
                self.status.set(Some(message));
            }
        }
        self.loading.set(false);
    }

    /// Sends one mutation and reloads on success. Returns whether the server
    /// accepted it.
    async fn dispatch(self, car_id: i64, command: ThreadCommand) -> bool {
        let signed_in = self.session.is_logged_in_untracked();
        let model = self.clone();
        let outcome =
            discussion::mutate(&ApiThread, car_id, &command, signed_in, move || model.begin_reload())
                .await;
        match outcome {
            Mutation::Refused(message) | Mutation::Failed(message) => {
                self.status.set(Some(message));
                false
            }
            Mutation::Applied(reloaded) => {
                self.show(reloaded);
                true
            }
        }
    }

    fn report(&self, invalid: ValidationError) {
        self.status.set(Some(invalid.to_string()));
    }
}

#[component]
pub fn CarDetailPage() -> impl IntoView {
    let params = use_params_map();
    let session = use_session();

    let car_id = Memo::new(move |_| {
        params
            .with(|p| p.get("car_id"))
            .and_then(|id| id.parse::<i64>().ok())
    });

    let car: RwSignal<Option<Car>> = RwSignal::new(None);
    let loading = RwSignal::new(true);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    let thread = ThreadModel {
        session,
        car,
        comments: RwSignal::new(Vec::new()),
        loading: RwSignal::new(true),
        status: RwSignal::new(None),
        requests: Superseding::scoped(),
    };
    let status = thread.status;

    // Car fetch: superseded when the id changes, cancelled on unmount.
    let car_requests = Superseding::scoped();
    Effect::new(move |_| {
        let token = car_requests.begin();
        let Some(id) = car_id.get() else {
            car.set(None);
            error.set(Some(CAR_MISSING.to_string()));
            loading.set(false);
            return;
        };
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            let Some(result) = token.settle(api::fetch_car(id, &token).await) else {
                return;
            };
            match result {
                Ok(found) => car.set(Some(found)),
                Err(err) => {
                    car.set(None);
                    error.set(Some(err.user_message(CAR_MISSING)));
                }
            }
            loading.set(false);
        });
    });

    Effect::new({
        let thread = thread.clone();
        move |_| {
            if let Some(id) = car_id.get() {
                spawn_local(thread.clone().reload(id));
            }
        }
    });

    let on_command = Callback::new({
        let thread = thread.clone();
        move |command: ThreadCommand| {
            if let Some(id) = car_id.get_untracked() {
                let thread = thread.clone();
                spawn_local(async move {
                    thread.dispatch(id, command).await;
                });
            }
        }
    });

    let on_invalid = Callback::new({
        let thread = thread.clone();
        move |invalid: ValidationError| thread.report(invalid)
    });

    let on_favorite = move |_| {
        let Some(id) = car_id.get_untracked() else {
            return;
        };
        if !session.is_logged_in_untracked() {
            status.set(Some(GuardedAction::Favorite.prompt().to_string()));
            return;
        }
        spawn_local(async move {
            match api::toggle_favorite(id).await {
                Ok(toggle) => {
                    car.update(|car| {
                        if let Some(car) = car {
                            apply_favorite(car, toggle);
                        }
                    });
                    status.set(Some(favorite_status(toggle, false).to_string()));
                }
                Err(err) => status.set(Some(err.user_message(FAVORITE_FAILED))),
            }
        });
    };

    // Only presence is tracked here; field updates re-render their own nodes.
    let has_car = Memo::new(move |_| car.with(Option::is_some));

    move || {
        if loading.get() {
            return view! { <FullPageSpinner /> }.into_any();
        }
        if !has_car.get() {
            let message = error.get().unwrap_or_else(|| CAR_MISSING.to_string());
            return view! {
                <div class="car-detail-page">
                    <Header />
                    <div class="container py-5">
                        <div class="alert alert-danger" role="alert">{message}</div>
                    </div>
                </div>
            }
            .into_any();
        }
        let Some(current) = car.get_untracked() else {
            return ().into_any();
        };

        let favorite_class = move || {
            if car.with(|c| c.as_ref().is_some_and(|c| c.is_favorite)) {
                "btn btn-light"
            } else {
                "btn btn-outline-light"
            }
        };
        let favorite_text = move || car.with(|c| c.as_ref().map(|c| favorite_label(c, false)));
        let comment_total = move || car.with(|c| c.as_ref().map_or(0, |c| c.comment_count));
        let favorite_total = move || car.with(|c| c.as_ref().map_or(0, |c| c.favorite_count));

        let car_type = humanize_type(&current.car_type);
        let description = if current.description.trim().is_empty() {
            "Sem descrição cadastrada.".to_string()
        } else {
            current.description.clone()
        };

        view! {
            <div class="car-detail-page">
                <Header />
                <div
                    class="car-hero"
                    style=format!("background-image: url({})", current.image_url)
                >
                    <div class="container">
                        <span class="badge bg-dark text-uppercase mb-3">{current.brand.clone()}</span>
                        <h1 class="display-4 fw-semibold text-white">{current.name.clone()}</h1>
                        <div class="text-white-50">
                            {format!("Ano {} • {}", current.year, car_type)}
                        </div>
                        <div class="d-flex align-items-center gap-3 mt-4">
                            <div class="price-tag">{format!("${}", format_price(current.price))}</div>
                            <button class=favorite_class on:click=on_favorite>
                                {favorite_text}
                            </button>
                        </div>
                    </div>
                </div>
                <div class="container car-detail-content">
                    <Alert kind=AlertKind::Info message=status />
                    <div class="row g-4">
                        <div class="col-lg-8">
                            <section class="car-description card shadow-sm">
                                <div class="card-body">
                                    <h2 class="h4 fw-semibold mb-3">"Descrição"</h2>
                                    <p class="text-muted">{description}</p>
                                </div>
                            </section>
                            <section class="car-comments card shadow-sm mt-4">
                                <div class="card-body">
                                    <div class="d-flex justify-content-between align-items-center mb-4">
                                        <h2 class="h4 fw-semibold mb-0">"Comentários"</h2>
                                        <span class="badge bg-primary badge-pill">
                                            {move || format!("{} no total", comment_total())}
                                        </span>
                                    </div>
                                    <CommentForm thread=thread.clone() car_id=current.id />
                                    <ThreadView thread=thread.clone() on_command=on_command on_invalid=on_invalid />
                                </div>
                            </section>
                        </div>
                        <div class="col-lg-4">
                            <section class="card shadow-sm">
                                <div class="card-body">
                                    <h2 class="h5 fw-semibold mb-3">"Ficha técnica"</h2>
                                    <ul class="list-unstyled detail-list">
                                        <li><span class="label">"Marca"</span><span>{current.brand.clone()}</span></li>
                                        <li><span class="label">"Modelo"</span><span>{current.name.clone()}</span></li>
                                        <li><span class="label">"Ano"</span><span>{current.year}</span></li>
                                        <li><span class="label">"Categoria"</span><span>{car_type.clone()}</span></li>
                                        <li><span class="label">"Favoritos"</span><span>{favorite_total}</span></li>
                                    </ul>
                                </div>
                            </section>
                        </div>
                    </div>
                </div>
            </div>
        }
        .into_any()
    }
}

/// Form for a new top-level comment.
#[component]
fn CommentForm(thread: ThreadModel, car_id: i64) -> impl IntoView {
    let session = thread.session;
    let status = thread.status;
    let text = RwSignal::new(String::new());
    let posting = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !session.is_logged_in_untracked() {
            status.set(Some(GuardedAction::Comment.prompt().to_string()));
            return;
        }
        let command = match ThreadCommand::post(&text.get_untracked()) {
            Ok(command) => command,
            Err(invalid) => {
                thread.report(invalid);
                return;
            }
        };
        posting.set(true);
        let thread = thread.clone();
        spawn_local(async move {
            if thread.dispatch(car_id, command).await {
                text.set(String::new());
            }
            posting.set(false);
        });
    };

    move || {
        if session.is_logged_in() {
            view! {
                <form class="mb-4" on:submit=on_submit.clone()>
                    <label for="comment" class="form-label fw-semibold">
                        "Compartilhe sua opinião sobre este modelo"
                    </label>
                    <textarea
                        id="comment"
                        class="form-control"
                        rows="3"
                        placeholder="Escreva seu comentário"
                        prop:value=move || text.get()
                        on:input=move |ev| text.set(event_target_value(&ev))
                    />
                    <button class="btn btn-accent mt-3" type="submit" disabled=move || posting.get()>
                        {move || if posting.get() { "Enviando..." } else { "Publicar comentário" }}
                    </button>
                </form>
            }
            .into_any()
        } else {
            view! {
                <div class="alert alert-warning" role="alert">
                    "Faça login para participar da discussão e deixar seus comentários."
                </div>
            }
            .into_any()
        }
    }
}

#[component]
fn ThreadView(
    thread: ThreadModel,
    on_command: Callback<ThreadCommand>,
    on_invalid: Callback<ValidationError>,
) -> impl IntoView {
    let ThreadModel {
        session,
        comments,
        loading,
        ..
    } = thread;

    move || {
        if loading.get() {
            return view! { <Spinner /> }.into_any();
        }
        if comments.with(Vec::is_empty) {
            return view! {
                <p class="text-muted">
                    "Ainda não há comentários. Seja o primeiro a compartilhar sua experiência!"
                </p>
            }
            .into_any();
        }
        let viewer = session.user();
        let nodes = comments.with(|list| project(list, viewer.as_ref()));
        view! { <CommentThread nodes=nodes on_command=on_command on_invalid=on_invalid /> }
            .into_any()
    }
}
