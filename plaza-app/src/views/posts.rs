use crate::{
    dispatch::{Dispatch, Outcome, Request, Response},
    views::comments::CommentsView,
};
use plaza_common::{
    load::{Resource, Settled, TokenSource},
    model::{
        Id,
        post::{CreatePost, Post, PostMarker},
    },
    session::{Identity, Session},
};
use tracing::{error, info, warn};

/// The post grid with session-gated authoring and an optional open comment thread.
#[derive(Clone, Debug)]
pub struct PostsView {
    posts: Resource<Post>,
    comments: Option<CommentsView>,
}

impl PostsView {
    pub fn mount(tokens: &mut TokenSource) -> (Self, Dispatch) {
        let mut posts = Resource::new("posts");
        let token = posts.begin(tokens);

        let view = Self {
            posts,
            comments: None,
        };
        (
            view,
            Dispatch {
                token,
                request: Request::Posts,
            },
        )
    }

    #[must_use]
    pub fn resource(&self) -> &Resource<Post> {
        &self.posts
    }

    #[must_use]
    pub fn comments(&self) -> Option<&CommentsView> {
        self.comments.as_ref()
    }

    pub fn comments_mut(&mut self) -> Option<&mut CommentsView> {
        self.comments.as_mut()
    }

    pub fn create(
        &mut self,
        session: &Session,
        title: String,
        body: String,
        tokens: &mut TokenSource,
    ) -> Option<Dispatch> {
        let Some(identity) = session.identity() else {
            warn!("Log in to publish posts");
            return None;
        };

        let draft = match CreatePost::new(identity.user_id(), title, body) {
            Ok(draft) => draft,
            Err(err) => {
                warn!(%err, "Not publishing post");
                return None;
            }
        };

        Some(Dispatch {
            token: self.posts.begin_mutation(tokens),
            request: Request::CreatePost(draft),
        })
    }

    pub fn delete(
        &mut self,
        session: &Session,
        post_id: Id<PostMarker>,
        tokens: &mut TokenSource,
    ) -> Option<Dispatch> {
        let Some(post) = self.posts.find(|post| post.id == post_id) else {
            warn!(%post_id, "No such post");
            return None;
        };
        if !session
            .identity()
            .is_some_and(|identity| identity.may_delete_post(post))
        {
            info!(%post_id, "You can only delete your own posts.");
            return None;
        }

        Some(Dispatch {
            token: self.posts.begin_mutation(tokens),
            request: Request::DeletePost(post_id),
        })
    }

    /// Opens the comment thread of a post, replacing any open thread.
    pub fn open_comments(
        &mut self,
        session: &Session,
        post_id: Id<PostMarker>,
        tokens: &mut TokenSource,
    ) -> Dispatch {
        let (comments, dispatch) =
            CommentsView::mount(post_id, session.identity().cloned(), tokens);
        self.comments = Some(comments);
        dispatch
    }

    /// Hands a fresh login to the open comment thread.
    pub fn sign_in(&mut self, identity: &Identity) {
        if let Some(comments) = &mut self.comments {
            comments.sign_in(identity.clone());
        }
    }

    pub fn close_comments(&mut self) -> bool {
        self.comments.take().is_some()
    }

    #[must_use]
    pub fn owns(&self, outcome: &Outcome) -> bool {
        self.posts.owns(outcome.token)
            || self
                .comments
                .as_ref()
                .is_some_and(|comments| comments.owns(outcome))
    }

    pub fn apply(&mut self, outcome: Outcome) -> bool {
        if let Some(comments) = &mut self.comments
            && comments.owns(&outcome)
        {
            return comments.apply(outcome);
        }

        match outcome.response {
            Response::Posts(result) => self.posts.settle(outcome.token, result) != Settled::Stale,
            Response::PostCreated(result) => {
                if !self.posts.finish_mutation(outcome.token) {
                    return false;
                }
                match result {
                    Ok(post) => {
                        info!(post_id = %post.id, "New post published");
                        self.posts.prepend(post);
                        true
                    }
                    Err(err) => {
                        error!(error = %err, "Error creating a new post");
                        false
                    }
                }
            }
            Response::PostDeleted(post_id, result) => {
                if !self.posts.finish_mutation(outcome.token) {
                    return false;
                }
                match result {
                    Ok(()) => self.posts.remove_first(|post| post.id == post_id).is_some(),
                    Err(err) => {
                        error!(error = %err, %post_id, "Error deleting the post");
                        false
                    }
                }
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::test_support::{api_error, loaded, post, user};

    fn posts_view(tokens: &mut TokenSource, posts: Vec<Post>) -> PostsView {
        let (mut view, dispatch) = PostsView::mount(tokens);
        assert_eq!(dispatch.request, Request::Posts);
        assert!(view.apply(loaded(dispatch.token, Response::Posts(Ok(posts)))));
        view
    }

    fn logged_in(user_id: u64) -> Session {
        let mut session = Session::default();
        session.login(user(user_id, "Someone", "someone@example.com"));
        session
    }

    fn ids(view: &PostsView) -> Vec<u64> {
        view.resource().items().iter().map(|post| post.id.get()).collect()
    }

    #[test]
    fn only_the_owner_may_delete() {
        let mut tokens = TokenSource::default();
        let mut view = posts_view(&mut tokens, vec![post(1, 5), post(2, 7)]);
        let session = logged_in(5);

        assert!(view.delete(&session, Id::new(2), &mut tokens).is_none());
        assert_eq!(ids(&view), [1, 2]);

        let dispatch = view.delete(&session, Id::new(1), &mut tokens).unwrap();
        assert_eq!(dispatch.request, Request::DeletePost(Id::new(1)));
        assert!(view.apply(loaded(
            dispatch.token,
            Response::PostDeleted(Id::new(1), Ok(()))
        )));

        assert_eq!(ids(&view), [2]);
    }

    #[test]
    fn anonymous_delete_is_a_no_op() {
        let mut tokens = TokenSource::default();
        let mut view = posts_view(&mut tokens, vec![post(1, 5)]);

        assert!(view.delete(&Session::default(), Id::new(1), &mut tokens).is_none());
        assert_eq!(ids(&view), [1]);
    }

    #[test]
    fn failed_delete_keeps_local_state() {
        let mut tokens = TokenSource::default();
        let mut view = posts_view(&mut tokens, vec![post(1, 5), post(2, 5)]);
        let dispatch = view.delete(&logged_in(5), Id::new(2), &mut tokens).unwrap();

        assert!(!view.apply(loaded(
            dispatch.token,
            Response::PostDeleted(Id::new(2), Err(api_error()))
        )));
        assert_eq!(ids(&view), [1, 2]);
    }

    #[test]
    fn delete_removes_exactly_one_entry() {
        let mut tokens = TokenSource::default();
        let mut view = posts_view(&mut tokens, vec![post(101, 9), post(1, 9), post(101, 9)]);
        let dispatch = view.delete(&logged_in(9), Id::new(101), &mut tokens).unwrap();

        view.apply(loaded(
            dispatch.token,
            Response::PostDeleted(Id::new(101), Ok(())),
        ));

        assert_eq!(ids(&view), [1, 101]);
    }

    #[test]
    fn created_post_goes_first_with_session_user() {
        let mut tokens = TokenSource::default();
        let mut view = posts_view(&mut tokens, vec![post(1, 5), post(2, 7)]);

        let dispatch = view
            .create(&logged_in(9), "T".to_owned(), "B".to_owned(), &mut tokens)
            .unwrap();
        let Request::CreatePost(draft) = &dispatch.request else {
            panic!("expected a create request, got {:?}", dispatch.request);
        };
        assert_eq!(draft.user_id(), Id::new(9));

        let echoed = Post {
            id: Id::new(101),
            user_id: draft.user_id(),
            title: draft.title().to_owned(),
            body: draft.body().to_owned(),
        };
        assert!(view.apply(loaded(dispatch.token, Response::PostCreated(Ok(echoed)))));

        let first = &view.resource().items()[0];
        assert_eq!(first.user_id, Id::new(9));
        assert_eq!(first.title, "T");
        assert_eq!(ids(&view), [101, 1, 2]);
    }

    #[test]
    fn create_needs_login_and_text() {
        let mut tokens = TokenSource::default();
        let mut view = posts_view(&mut tokens, vec![]);

        assert!(
            view.create(&Session::default(), "T".to_owned(), "B".to_owned(), &mut tokens)
                .is_none()
        );
        assert!(
            view.create(&logged_in(1), String::new(), "B".to_owned(), &mut tokens)
                .is_none()
        );
    }

    #[test]
    fn comment_thread_keeps_identity_after_logout() {
        let mut tokens = TokenSource::default();
        let mut view = posts_view(&mut tokens, vec![post(1, 5)]);
        let mut session = logged_in(5);

        let dispatch = view.open_comments(&session, Id::new(1), &mut tokens);
        assert_eq!(dispatch.request, Request::PostComments(Id::new(1)));
        session.logout();

        let thread = view.comments().unwrap();
        assert_eq!(thread.viewer().map(|viewer| viewer.user_id()), Some(Id::new(5)));

        assert!(view.owns(&loaded(dispatch.token, Response::Comments(Ok(vec![])))));
        assert!(view.close_comments());
        assert!(view.comments().is_none());
    }
}
