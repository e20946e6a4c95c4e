use crate::model::{Id, ModelValidationError, require_text, user::UserMarker};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Id<PostMarker>,
    pub user_id: Id<UserMarker>,
    pub title: String,
    pub body: String,
}

/// Body of a `POST /posts` request.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    title: String,
    body: String,
    user_id: Id<UserMarker>,
}

impl CreatePost {
    pub fn new(
        user_id: Id<UserMarker>,
        title: String,
        body: String,
    ) -> Result<Self, ModelValidationError> {
        Ok(Self {
            title: require_text("title", title)?,
            body: require_text("body", body)?,
            user_id,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub fn user_id(&self) -> Id<UserMarker> {
        self.user_id
    }
}
