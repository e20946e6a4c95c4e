//! The in-memory "logged in" identity and the ownership rules that gate deletes.
//!
//! Login is an unauthenticated lookup by name, so these checks only decide what the local user
//! interface offers. They are not a security boundary.

use crate::model::{
    Id,
    comment::Comment,
    post::Post,
    user::{User, UserMarker},
};

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Identity {
    user: User,
}

impl Identity {
    #[must_use]
    pub fn new(user: User) -> Self {
        Self { user }
    }

    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    #[must_use]
    pub fn user_id(&self) -> Id<UserMarker> {
        self.user.id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.user.email
    }

    #[must_use]
    pub fn may_delete_post(&self, post: &Post) -> bool {
        self.user.id == post.user_id
    }

    #[must_use]
    pub fn may_delete_comment(&self, comment: &Comment) -> bool {
        self.user.email == comment.email
    }
}

/// Holds at most one identity for the lifetime of the process.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct Session {
    identity: Option<Identity>,
}

impl Session {
    pub fn login(&mut self, user: User) -> &Identity {
        self.identity.insert(Identity::new(user))
    }

    pub fn logout(&mut self) -> Option<Identity> {
        self.identity.take()
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64, email: &str) -> User {
        User {
            id: Id::new(id),
            email: email.to_owned(),
            ..User::default()
        }
    }

    #[test]
    fn post_ownership_is_by_user_id() {
        let identity = Identity::new(user(5, "five@example.com"));
        let own = Post {
            id: Id::new(1),
            user_id: Id::new(5),
            ..Post::default()
        };
        let foreign = Post {
            id: Id::new(2),
            user_id: Id::new(7),
            ..Post::default()
        };

        assert!(identity.may_delete_post(&own));
        assert!(!identity.may_delete_post(&foreign));
    }

    #[test]
    fn comment_ownership_is_by_email() {
        let identity = Identity::new(user(5, "Sincere@april.biz"));
        let own = Comment {
            email: "Sincere@april.biz".to_owned(),
            ..Comment::default()
        };
        let foreign = Comment {
            email: "Eliseo@gardner.biz".to_owned(),
            ..Comment::default()
        };

        assert!(identity.may_delete_comment(&own));
        assert!(!identity.may_delete_comment(&foreign));
    }

    #[test]
    fn login_replaces_and_logout_clears() {
        let mut session = Session::default();
        assert!(session.identity().is_none());

        session.login(user(1, "a@example.com"));
        session.login(user(2, "b@example.com"));
        assert_eq!(session.identity().map(Identity::user_id), Some(Id::new(2)));

        let previous = session.logout();
        assert_eq!(previous.map(|identity| identity.user_id()), Some(Id::new(2)));
        assert!(session.identity().is_none());
    }
}
