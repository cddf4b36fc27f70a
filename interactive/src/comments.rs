use leptos::prelude::*;
use showroom_shared::thread::{Compose, NodeUi, ThreadCommand, ThreadNode};
use showroom_shared::ValidationError;

/// Renders a projected thread. Interactions leave as commands through
/// `on_command`; blank submissions go to `on_invalid` instead.
#[component]
pub fn CommentThread(
    nodes: Vec<ThreadNode>,
    on_command: Callback<ThreadCommand>,
    on_invalid: Callback<ValidationError>,
) -> impl IntoView {
    comment_thread(nodes, on_command, on_invalid)
}

// Concrete return type so the recursion through CommentItem type-checks.
fn comment_thread(
    nodes: Vec<ThreadNode>,
    on_command: Callback<ThreadCommand>,
    on_invalid: Callback<ValidationError>,
) -> AnyView {
    view! {
        <div class="comment-thread">
            {nodes
                .into_iter()
                .map(|node| {
                    view! { <CommentItem node=node on_command=on_command on_invalid=on_invalid /> }
                })
                .collect_view()}
        </div>
    }
    .into_any()
}

/// Single comment with its actions, compose box and replies.
#[component]
fn CommentItem(
    node: ThreadNode,
    on_command: Callback<ThreadCommand>,
    on_invalid: Callback<ValidationError>,
) -> impl IntoView {
    let ui = RwSignal::new(NodeUi::default());
    let item_class = format!("comment-item {}", node.indent_class());
    let ThreadNode {
        id,
        author,
        content,
        posted_at,
        likes,
        liked,
        actions,
        replies,
        ..
    } = node;

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match ui.try_update(|ui| ui.submit(id)).flatten() {
            Some(Ok(command)) => on_command.run(command),
            Some(Err(invalid)) => on_invalid.run(invalid),
            None => {}
        }
    };

    let draft_input = move |ev: leptos::ev::Event| {
        let text = event_target_value(&ev);
        ui.update(|ui| ui.draft = text);
    };

    let compose_is = move |mode: Compose| ui.with(|ui| ui.compose == mode);

    let like_class = if liked {
        "btn btn-sm btn-primary"
    } else {
        "btn btn-sm btn-outline-primary"
    };

    let body = {
        let content = content.clone();
        move || {
            if compose_is(Compose::Edit) {
                view! {
                    <form class="comment-form" on:submit=on_submit>
                        <textarea
                            class="form-control"
                            rows="3"
                            prop:value=move || ui.with(|ui| ui.draft.clone())
                            on:input=draft_input
                        />
                        <div class="d-flex gap-2 mt-2">
                            <button class="btn btn-accent btn-sm" type="submit">"Salvar"</button>
                            <button
                                class="btn btn-outline-secondary btn-sm"
                                type="button"
                                on:click=move |_| ui.update(NodeUi::close)
                            >
                                "Cancelar"
                            </button>
                        </div>
                    </form>
                }
                .into_any()
            } else {
                view! { <p class="comment-content">{content.clone()}</p> }.into_any()
            }
        }
    };

    let reply_box = move || {
        compose_is(Compose::Reply).then(|| {
            view! {
                <form class="comment-form" on:submit=on_submit>
                    <textarea
                        class="form-control"
                        rows="2"
                        placeholder="Escreva sua resposta"
                        prop:value=move || ui.with(|ui| ui.draft.clone())
                        on:input=draft_input
                    />
                    <div class="d-flex gap-2 mt-2">
                        <button class="btn btn-accent btn-sm" type="submit">"Responder"</button>
                        <button
                            class="btn btn-outline-secondary btn-sm"
                            type="button"
                            on:click=move |_| ui.update(NodeUi::close)
                        >
                            "Cancelar"
                        </button>
                    </div>
                </form>
            }
        })
    };

    let like_button = actions.like.then(|| {
        view! {
            <button
                type="button"
                class=like_class
                on:click=move |_| on_command.run(ThreadCommand::like(id))
            >
                {format!("Curtir ({likes})")}
            </button>
        }
    });

    let reply_button = actions.reply.then(|| {
        view! {
            <button
                type="button"
                class="btn btn-sm btn-outline-secondary"
                on:click=move |_| ui.update(NodeUi::toggle_reply)
            >
                "Responder"
            </button>
        }
    });

    let edit_button = actions.edit.then(|| {
        let content = content.clone();
        view! {
            <button
                type="button"
                class="btn btn-sm btn-outline-secondary"
                on:click=move |_| ui.update(|ui| ui.toggle_edit(&content))
            >
                "Editar"
            </button>
        }
    });

    let delete_button = actions.delete.then(|| {
        view! {
            <button
                type="button"
                class="btn btn-sm btn-outline-danger"
                on:click=move |_| on_command.run(ThreadCommand::delete(id))
            >
                "Excluir"
            </button>
        }
    });

    let children = (!replies.is_empty()).then(|| {
        view! {
            <div class="comment-replies">
                {comment_thread(replies, on_command, on_invalid)}
            </div>
        }
    });

    view! {
        <div class=item_class>
            <div class="comment-header">
                <div>
                    <strong>{author}</strong>
                    <span class="comment-meta">{format!(" • {posted_at}")}</span>
                </div>
                <div class="comment-actions">
                    {like_button}
                    {reply_button}
                    {edit_button}
                    {delete_button}
                </div>
            </div>
            {body}
            {reply_box}
            {children}
        </div>
    }
}
