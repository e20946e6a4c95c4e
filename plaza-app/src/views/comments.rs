use crate::dispatch::{Dispatch, Outcome, Request, Response};
use plaza_common::{
    load::{Resource, Settled, TokenSource},
    model::{
        Id,
        comment::{Comment, CommentMarker, CreateComment},
        post::PostMarker,
    },
    session::Identity,
};
use tracing::{error, info, warn};

/// The comment thread of one post. The viewer's identity is captured when the thread is opened
/// and replaced by every later login. A logout leaves it in place until the thread is closed.
#[derive(Clone, Debug)]
pub struct CommentsView {
    post_id: Id<PostMarker>,
    viewer: Option<Identity>,
    comments: Resource<Comment>,
}

impl CommentsView {
    pub fn mount(
        post_id: Id<PostMarker>,
        viewer: Option<Identity>,
        tokens: &mut TokenSource,
    ) -> (Self, Dispatch) {
        let mut comments = Resource::new("comments");
        let token = comments.begin(tokens);

        let view = Self {
            post_id,
            viewer,
            comments,
        };
        (
            view,
            Dispatch {
                token,
                request: Request::PostComments(post_id),
            },
        )
    }

    #[must_use]
    pub fn post_id(&self) -> Id<PostMarker> {
        self.post_id
    }

    #[must_use]
    pub fn viewer(&self) -> Option<&Identity> {
        self.viewer.as_ref()
    }

    #[must_use]
    pub fn resource(&self) -> &Resource<Comment> {
        &self.comments
    }

    #[must_use]
    pub fn may_delete(&self, comment: &Comment) -> bool {
        self.viewer
            .as_ref()
            .is_some_and(|viewer| viewer.may_delete_comment(comment))
    }

    pub fn sign_in(&mut self, identity: Identity) {
        info!(post_id = %self.post_id, user_id = %identity.user_id(), "Thread viewer changed");
        self.viewer = Some(identity);
    }

    pub fn add(
        &mut self,
        header: String,
        body: String,
        tokens: &mut TokenSource,
    ) -> Option<Dispatch> {
        let Some(viewer) = &self.viewer else {
            warn!("Log in to comment");
            return None;
        };

        let email = viewer.email().to_owned();
        let draft = match CreateComment::new(self.post_id, header, body, email) {
            Ok(draft) => draft,
            Err(err) => {
                warn!(%err, "Not adding comment");
                return None;
            }
        };

        Some(Dispatch {
            token: self.comments.begin_mutation(tokens),
            request: Request::CreateComment(draft),
        })
    }

    pub fn delete(
        &mut self,
        comment_id: Id<CommentMarker>,
        tokens: &mut TokenSource,
    ) -> Option<Dispatch> {
        let Some(comment) = self.comments.find(|comment| comment.id == comment_id) else {
            warn!(%comment_id, "No such comment");
            return None;
        };
        if !self.may_delete(comment) {
            info!(%comment_id, "You can only delete your own comments.");
            return None;
        }

        Some(Dispatch {
            token: self.comments.begin_mutation(tokens),
            request: Request::DeleteComment(comment_id),
        })
    }

    #[must_use]
    pub fn owns(&self, outcome: &Outcome) -> bool {
        self.comments.owns(outcome.token)
    }

    pub fn apply(&mut self, outcome: Outcome) -> bool {
        match outcome.response {
            Response::Comments(result) => {
                self.comments.settle(outcome.token, result) != Settled::Stale
            }
            Response::CommentCreated(result) => {
                if !self.comments.finish_mutation(outcome.token) {
                    return false;
                }
                match result {
                    Ok(comment) => {
                        info!(comment_id = %comment.id, post_id = %self.post_id, "Comment added");
                        self.comments.prepend(comment);
                        true
                    }
                    Err(err) => {
                        error!(error = %err, "Error adding a new comment");
                        false
                    }
                }
            }
            Response::CommentDeleted(comment_id, result) => {
                if !self.comments.finish_mutation(outcome.token) {
                    return false;
                }
                match result {
                    Ok(()) => self
                        .comments
                        .remove_first(|comment| comment.id == comment_id)
                        .is_some(),
                    Err(err) => {
                        error!(error = %err, %comment_id, "Error deleting the comment");
                        false
                    }
                }
            }
            _ => false,
        }
    }
}
