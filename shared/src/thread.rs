//! Comment threads as seen by one viewer.
//!
//! The server hands back a tree that is already nested through `replies`.
//! [`project`] turns that snapshot into [`ThreadNode`]s carrying the actions
//! the viewer may take, and every interaction leaves the tree as a
//! [`ThreadCommand`]. Nothing here edits the snapshot: after a command
//! succeeds the caller reloads the whole thread from the server.

use crate::endpoints::{self, Call};
use crate::error::{require_text, GuardedAction, ValidationError};
use crate::format::format_timestamp;
use crate::{Comment, CreateComment, EditComment, UserSummary};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actions {
    pub reply: bool,
    pub like: bool,
    pub edit: bool,
    pub delete: bool,
}

/// Reply and like need a signed-in viewer; edit and delete follow the
/// server's `can_edit` flag alone.
pub fn actions_for(comment: &Comment, viewer: Option<&UserSummary>) -> Actions {
    let signed_in = viewer.is_some();
    Actions {
        reply: signed_in,
        like: signed_in,
        edit: comment.can_edit,
        delete: comment.can_edit,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThreadNode {
    pub id: i64,
    pub author: String,
    pub content: String,
    pub posted_at: String,
    pub likes: i64,
    pub liked: bool,
    pub depth: usize,
    pub actions: Actions,
    pub replies: Vec<ThreadNode>,
}

/// Deepest indentation step; replies nested further stay at this level.
pub const MAX_INDENT: usize = 4;

impl ThreadNode {
    /// CSS class for the node's indentation.
    pub fn indent_class(&self) -> String {
        format!("comment-depth-{}", self.depth.min(MAX_INDENT))
    }
}

pub fn project(comments: &[Comment], viewer: Option<&UserSummary>) -> Vec<ThreadNode> {
    project_at(comments, viewer, 0)
}

fn project_at(comments: &[Comment], viewer: Option<&UserSummary>, depth: usize) -> Vec<ThreadNode> {
    comments
        .iter()
        .map(|comment| ThreadNode {
            id: comment.id,
            author: comment.user.full_name.clone(),
            content: comment.content.clone(),
            posted_at: format_timestamp(&comment.created_at),
            likes: comment.likes,
            liked: comment.liked,
            depth,
            actions: actions_for(comment, viewer),
            replies: project_at(&comment.replies, viewer, depth + 1),
        })
        .collect()
}

/// Total number of comments in the tree, replies included.
pub fn count_comments(comments: &[Comment]) -> usize {
    comments
        .iter()
        .map(|c| 1 + count_comments(&c.replies))
        .sum()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadCommand {
    Post { content: String },
    Reply { parent_id: i64, content: String },
    Edit { comment_id: i64, content: String },
    Delete { comment_id: i64 },
    Like { comment_id: i64 },
}

impl ThreadCommand {
    pub fn post(text: &str) -> Result<Self, ValidationError> {
        let content = require_text(text, ValidationError::EmptyComment)?;
        Ok(ThreadCommand::Post { content })
    }

    pub fn reply(parent_id: i64, text: &str) -> Result<Self, ValidationError> {
        let content = require_text(text, ValidationError::EmptyReply)?;
        Ok(ThreadCommand::Reply { parent_id, content })
    }

    pub fn edit(comment_id: i64, text: &str) -> Result<Self, ValidationError> {
        let content = require_text(text, ValidationError::EmptyEdit)?;
        Ok(ThreadCommand::Edit { comment_id, content })
    }

    pub fn delete(comment_id: i64) -> Self {
        ThreadCommand::Delete { comment_id }
    }

    pub fn like(comment_id: i64) -> Self {
        ThreadCommand::Like { comment_id }
    }

    /// The sign-in requirement checked before dispatch. Edit and delete are
    /// gated by `can_edit` instead and the server enforces authorship.
    pub fn requires_login(&self) -> Option<GuardedAction> {
        match self {
            ThreadCommand::Post { .. } => Some(GuardedAction::Comment),
            ThreadCommand::Reply { .. } => Some(GuardedAction::Reply),
            ThreadCommand::Like { .. } => Some(GuardedAction::Like),
            ThreadCommand::Edit { .. } | ThreadCommand::Delete { .. } => None,
        }
    }

    pub fn call(&self, car_id: i64) -> Call {
        match self {
            ThreadCommand::Post { content } => Call::post_json(
                endpoints::comments(car_id),
                &CreateComment {
                    content: content.clone(),
                    parent_id: None,
                },
            ),
            ThreadCommand::Reply { parent_id, content } => Call::post_json(
                endpoints::comments(car_id),
                &CreateComment {
                    content: content.clone(),
                    parent_id: Some(*parent_id),
                },
            ),
            ThreadCommand::Edit {
                comment_id,
                content,
            } => Call::put_json(
                endpoints::comment(car_id, *comment_id),
                &EditComment {
                    content: content.clone(),
                },
            ),
            ThreadCommand::Delete { comment_id } => {
                Call::delete(endpoints::comment(car_id, *comment_id))
            }
            ThreadCommand::Like { comment_id } => Call::post(endpoints::like(*comment_id)),
        }
    }

    /// Fallback banner text when the server gives no message of its own.
    pub fn failure_message(&self) -> &'static str {
        match self {
            ThreadCommand::Post { .. } => "Não foi possível enviar o comentário.",
            ThreadCommand::Reply { .. } => "Não foi possível responder.",
            ThreadCommand::Edit { .. } => "Não foi possível editar o comentário.",
            ThreadCommand::Delete { .. } => "Não foi possível remover o comentário.",
            ThreadCommand::Like { .. } => "Não foi possível atualizar a curtida.",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compose {
    #[default]
    Closed,
    Reply,
    Edit,
}

/// Transient per-node state: which box is open and what is being typed.
/// Rebuilt from scratch whenever the thread reloads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeUi {
    pub compose: Compose,
    pub draft: String,
}

impl NodeUi {
    pub fn toggle_reply(&mut self) {
        if self.compose == Compose::Reply {
            self.close();
        } else {
            self.compose = Compose::Reply;
            self.draft.clear();
        }
    }

    /// Opening the editor seeds the draft with the current content.
    pub fn toggle_edit(&mut self, current: &str) {
        if self.compose == Compose::Edit {
            self.close();
        } else {
            self.compose = Compose::Edit;
            self.draft = current.to_string();
        }
    }

    pub fn close(&mut self) {
        self.compose = Compose::Closed;
        self.draft.clear();
    }

    /// Builds the command for the open box. On success the box closes; on a
    /// validation failure it stays open with the draft intact.
    pub fn submit(&mut self, comment_id: i64) -> Option<Result<ThreadCommand, ValidationError>> {
        let command = match self.compose {
            Compose::Closed => return None,
            Compose::Reply => ThreadCommand::reply(comment_id, &self.draft),
            Compose::Edit => ThreadCommand::edit(comment_id, &self.draft),
        };
        if command.is_ok() {
            self.close();
        }
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::Method;
    use crate::CommentAuthor;
    use serde_json::json;

    fn comment(id: i64, can_edit: bool, replies: Vec<Comment>) -> Comment {
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
            likes: id,
            liked: false,
            can_edit,
            replies,
        }
    }

    fn viewer() -> UserSummary {
        UserSummary {
            id: Some(2),
            username: "bruno".into(),
            first_name: "Bruno".into(),
            last_name: String::new(),
            full_name: "Bruno".into(),
            email: String::new(),
        }
    }

    #[test]
    fn projection_follows_server_nesting() {
        let tree = vec![
            comment(1, false, vec![comment(2, true, vec![comment(3, false, vec![])])]),
            comment(4, false, vec![]),
        ];
        let user = viewer();
        let nodes = project(&tree, Some(&user));
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].replies[0].replies[0].id, 3);
        assert_eq!(nodes[0].replies[0].replies[0].depth, 2);
        assert_eq!(nodes[1].depth, 0);
        assert_eq!(nodes[0].posted_at, "01/05/2024 10:30");
    }

    #[test]
    fn indentation_is_capped() {
        let mut deep = comment(9, false, vec![]);
        for id in (1..9).rev() {
            deep = comment(id, false, vec![deep]);
        }
        let nodes = project(&[deep], None);
        assert_eq!(nodes[0].indent_class(), "comment-depth-0");

        let mut node = &nodes[0];
        while let Some(reply) = node.replies.first() {
            node = reply;
        }
        assert_eq!(node.depth, 8);
        assert_eq!(node.indent_class(), "comment-depth-4");
    }

    #[test]
    fn edit_and_delete_hidden_without_can_edit_even_when_signed_in() {
        let user = viewer();
        let actions = actions_for(&comment(1, false, vec![]), Some(&user));
        assert!(actions.reply && actions.like);
        assert!(!actions.edit && !actions.delete);
    }

    #[test]
    fn anonymous_viewer_gets_no_reply_or_like() {
        let actions = actions_for(&comment(1, true, vec![]), None);
        assert_eq!(
            actions,
            Actions {
                reply: false,
                like: false,
                edit: true,
                delete: true,
            }
        );
    }

    #[test]
    fn counts_every_node() {
        let tree = vec![
            comment(1, false, vec![comment(2, false, vec![comment(3, false, vec![])])]),
            comment(4, false, vec![]),
        ];
        assert_eq!(count_comments(&tree), 4);
        assert_eq!(count_comments(&[]), 0);
    }

    #[test]
    fn blank_reply_never_becomes_a_command() {
        assert_eq!(ThreadCommand::reply(1, "   "), Err(ValidationError::EmptyReply));
        assert_eq!(ThreadCommand::edit(1, ""), Err(ValidationError::EmptyEdit));
        assert_eq!(ThreadCommand::post("\n"), Err(ValidationError::EmptyComment));
    }

    #[test]
    fn commands_map_to_endpoints() {
        let reply = ThreadCommand::reply(5, "agreed").unwrap().call(7);
        assert_eq!(reply.method, Method::Post);
        assert_eq!(reply.path, "/api/cars/7/comments/");
        assert_eq!(reply.body, Some(json!({"content": "agreed", "parent_id": 5})));

        let edit = ThreadCommand::edit(5, "fixed").unwrap().call(7);
        assert_eq!(edit.method, Method::Put);
        assert_eq!(edit.path, "/api/cars/7/comments/5/");
        assert_eq!(edit.body, Some(json!({"content": "fixed"})));

        let delete = ThreadCommand::delete(5).call(7);
        assert_eq!(delete.method, Method::Delete);
        assert_eq!(delete.body, None);

        let like = ThreadCommand::like(5).call(7);
        assert_eq!(like.path, "/api/comments/5/like/");
    }

    #[test]
    fn only_post_reply_and_like_require_login() {
        assert_eq!(ThreadCommand::like(1).requires_login(), Some(GuardedAction::Like));
        assert_eq!(ThreadCommand::delete(1).requires_login(), None);
    }

    #[test]
    fn reply_and_edit_boxes_are_exclusive() {
        let mut ui = NodeUi::default();
        ui.toggle_reply();
        ui.draft = "half typed".into();
        ui.toggle_edit("original");
        assert_eq!(ui.compose, Compose::Edit);
        assert_eq!(ui.draft, "original");
        ui.toggle_reply();
        assert_eq!(ui.compose, Compose::Reply);
        assert!(ui.draft.is_empty());
        ui.toggle_reply();
        assert_eq!(ui, NodeUi::default());
    }

    #[test]
    fn blank_submit_keeps_box_open() {
        let mut ui = NodeUi::default();
        ui.toggle_reply();
        ui.draft = "  ".into();
        assert_eq!(ui.submit(3), Some(Err(ValidationError::EmptyReply)));
        assert_eq!(ui.compose, Compose::Reply);
    }

    #[test]
    fn successful_submit_closes_and_clears() {
        let mut ui = NodeUi::default();
        ui.toggle_edit("old");
        ui.draft = "new".into();
        assert_eq!(
            ui.submit(3),
            Some(Ok(ThreadCommand::Edit {
                comment_id: 3,
                content: "new".into()
            }))
        );
        assert_eq!(ui, NodeUi::default());
        assert_eq!(ui.submit(3), None);
    }
}
