//! Comment mutations and the reload that follows each one.
//!
//! The thread is never patched locally: every accepted mutation is followed
//! by a full fetch, and what the view shows is exactly that fetch.

use std::future::Future;

use crate::error::ApiError;
use crate::supersede::CancelToken;
use crate::thread::{count_comments, ThreadCommand};
use crate::{Car, Comment};

pub const COMMENTS_FAILED: &str = "Não foi possível carregar os comentários.";

/// Where a car's thread lives.
pub trait ThreadBackend {
    fn run(
        &self,
        car_id: i64,
        command: &ThreadCommand,
    ) -> impl Future<Output = Result<(), ApiError>>;

    fn fetch(
        &self,
        car_id: i64,
        token: &CancelToken,
    ) -> impl Future<Output = Result<Vec<Comment>, ApiError>>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reload {
    /// The server's thread, with its total node count.
    Loaded { comments: Vec<Comment>, total: usize },
    /// The fetch failed; the view shows this message and no comments.
    Failed(String),
    /// A newer reload (or unmount) took over; nothing may be written.
    Superseded,
}

impl Reload {
    /// Brings the car's comment count in line with a loaded thread.
    pub fn sync_count(&self, car: &mut Car) {
        if let Reload::Loaded { total, .. } = self {
            car.comment_count = *total as i64;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Not sent: the action needs a signed-in user.
    Refused(String),
    /// Sent and rejected; the thread is left as it was.
    Failed(String),
    /// Accepted, and the thread was reloaded.
    Applied(Reload),
}

impl Mutation {
    pub fn accepted(&self) -> bool {
        matches!(self, Mutation::Applied(_))
    }
}

pub async fn reload(backend: &impl ThreadBackend, car_id: i64, token: CancelToken) -> Reload {
    let result = backend.fetch(car_id, &token).await;
    match token.settle(result) {
        None => Reload::Superseded,
        Some(Ok(comments)) => {
            let total = count_comments(&comments);
            Reload::Loaded { comments, total }
        }
        Some(Err(err)) => {
            tracing::warn!(car_id, error = %err, "comment reload failed");
            Reload::Failed(err.user_message(COMMENTS_FAILED))
        }
    }
}

/// Sends `command`, then reloads the whole thread. `begin_reload` is only
/// called once the server has accepted the command.
pub async fn mutate(
    backend: &impl ThreadBackend,
    car_id: i64,
    command: &ThreadCommand,
    signed_in: bool,
    begin_reload: impl FnOnce() -> CancelToken,
) -> Mutation {
    if let Some(action) = command.requires_login() {
        if !signed_in {
            return Mutation::Refused(action.prompt().to_string());
        }
    }

    if let Err(err) = backend.run(car_id, command).await {
        tracing::warn!(?command, error = %err, "comment mutation failed");
        return Mutation::Failed(err.user_message(command.failure_message()));
    }

    Mutation::Applied(reload(backend, car_id, begin_reload()).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GuardedAction;
    use crate::supersede::LatestRequest;
    use crate::CommentAuthor;
    use std::cell::RefCell;

    fn comment(id: i64, replies: Vec<Comment>) -> Comment {
        Comment {
            id,
            car_id: Some(7),
            parent_id: None,
            content: format!("comment {id}"),
            created_at: "2024-05-01T10:30:00+00:00".into(),
            updated_at: None,
            user: CommentAuthor {
                id: Some(1),
                username: "ana".into(),
                full_name: "Ana Souza".into(),
            },
            likes: 0,
            liked: false,
            can_edit: true,
            replies,
        }
    }

    fn car() -> Car {
        Car {
            id: 7,
            name: "Model S".into(),
            brand: "Tesla".into(),
            year: 2022,
            car_type: "sedan".into(),
            price: 80_000.0,
            image_url: String::new(),
            description: String::new(),
            is_favorite: false,
            favorite_count: 0,
            comment_count: 1,
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Hit {
        Run(ThreadCommand),
        Fetch,
    }

    /// Records calls; `fetch` returns the server's current thread.
    struct FakeServer {
        hits: RefCell<Vec<Hit>>,
        run_result: Result<(), ApiError>,
        thread: Result<Vec<Comment>, ApiError>,
        newer_reload: Option<RefCell<LatestRequest>>,
    }

    impl FakeServer {
        fn new(thread: Vec<Comment>) -> Self {
            Self {
                hits: RefCell::new(Vec::new()),
                run_result: Ok(()),
                thread: Ok(thread),
                newer_reload: None,
            }
        }

        fn hits(&self) -> Vec<Hit> {
            self.hits.borrow().clone()
        }
    }

    impl ThreadBackend for FakeServer {
        async fn run(&self, _car_id: i64, command: &ThreadCommand) -> Result<(), ApiError> {
            self.hits.borrow_mut().push(Hit::Run(command.clone()));
            self.run_result.clone()
        }

        async fn fetch(&self, _car_id: i64, _token: &CancelToken) -> Result<Vec<Comment>, ApiError> {
            self.hits.borrow_mut().push(Hit::Fetch);
            // Another reload starts while this one is in flight.
            if let Some(latest) = &self.newer_reload {
                latest.borrow_mut().begin();
            }
            self.thread.clone()
        }
    }

    #[tokio::test]
    async fn accepted_command_is_followed_by_a_full_fetch() {
        let fresh = vec![comment(1, vec![comment(2, vec![])]), comment(3, vec![])];
        let server = FakeServer::new(fresh.clone());
        let command = ThreadCommand::reply(1, "concordo").unwrap();

        let outcome = mutate(&server, 7, &command, true, CancelToken::new).await;

        assert_eq!(server.hits(), vec![Hit::Run(command), Hit::Fetch]);
        assert!(outcome.accepted());
        assert_eq!(
            outcome,
            Mutation::Applied(Reload::Loaded {
                comments: fresh,
                total: 3
            })
        );
    }

    #[tokio::test]
    async fn reload_sets_comment_count_to_every_node() {
        let server = FakeServer::new(vec![comment(1, vec![comment(2, vec![comment(4, vec![])])])]);
        let mut shown = car();

        let Mutation::Applied(reloaded) =
            mutate(&server, 7, &ThreadCommand::like(1), true, CancelToken::new).await
        else {
            panic!("like should be applied");
        };
        reloaded.sync_count(&mut shown);

        assert_eq!(shown.comment_count, 3);
    }

    #[tokio::test]
    async fn rejected_command_does_not_reload() {
        let mut server = FakeServer::new(vec![comment(1, vec![])]);
        server.run_result = Err(ApiError::Server {
            status: 403,
            message: "Você não pode editar este comentário.".into(),
        });
        let command = ThreadCommand::edit(1, "novo texto").unwrap();

        let outcome = mutate(&server, 7, &command, true, || {
            panic!("no reload after a rejected command")
        })
        .await;

        assert_eq!(server.hits(), vec![Hit::Run(command)]);
        assert_eq!(
            outcome,
            Mutation::Failed("Você não pode editar este comentário.".into())
        );
    }

    #[tokio::test]
    async fn rejected_command_without_message_uses_its_fallback() {
        let mut server = FakeServer::new(Vec::new());
        server.run_result = Err(ApiError::Status(500));
        let command = ThreadCommand::delete(9);

        let outcome = mutate(&server, 7, &command, true, CancelToken::new).await;

        assert_eq!(outcome, Mutation::Failed(command.failure_message().to_string()));
    }

    #[tokio::test]
    async fn signed_out_viewer_is_refused_before_any_request() {
        let server = FakeServer::new(Vec::new());

        let outcome = mutate(&server, 7, &ThreadCommand::like(1), false, CancelToken::new).await;

        assert!(server.hits().is_empty());
        assert_eq!(outcome, Mutation::Refused(GuardedAction::Like.prompt().to_string()));
    }

    #[tokio::test]
    async fn superseded_reload_writes_nothing() {
        let mut server = FakeServer::new(vec![comment(1, vec![])]);
        let latest = RefCell::new(LatestRequest::new());
        let token = latest.borrow_mut().begin().0;
        server.newer_reload = Some(latest);
        let mut shown = car();
        shown.comment_count = 5;

        let outcome = reload(&server, 7, token).await;
        outcome.sync_count(&mut shown);

        assert_eq!(outcome, Reload::Superseded);
        assert_eq!(shown.comment_count, 5);
    }

    #[tokio::test]
    async fn failed_reload_reports_fallback() {
        let mut server = FakeServer::new(Vec::new());
        server.thread = Err(ApiError::Network("offline".into()));

        let outcome = reload(&server, 7, CancelToken::new()).await;

        assert_eq!(outcome, Reload::Failed(COMMENTS_FAILED.to_string()));
    }
}
