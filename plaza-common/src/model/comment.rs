use crate::model::{Id, ModelValidationError, post::PostMarker, require_text};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct CommentMarker;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Id<CommentMarker>,
    pub post_id: Id<PostMarker>,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// Body of a `POST /comments` request. The author email is taken from the session identity.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment {
    post_id: Id<PostMarker>,
    name: String,
    body: String,
    email: String,
}

impl CreateComment {
    pub fn new(
        post_id: Id<PostMarker>,
        name: String,
        body: String,
        email: String,
    ) -> Result<Self, ModelValidationError> {
        Ok(Self {
            post_id,
            name,
            body: require_text("body", body)?,
            email,
        })
    }

    #[must_use]
    pub fn post_id(&self) -> Id<PostMarker> {
        self.post_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_comment_body_shape() {
        let draft = CreateComment::new(
            Id::new(3),
            "Header".to_owned(),
            "Nice post".to_owned(),
            "Sincere@april.biz".to_owned(),
        )
        .unwrap();

        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            serde_json::json!({
                "postId": 3,
                "name": "Header",
                "body": "Nice post",
                "email": "Sincere@april.biz",
            })
        );
    }

    #[test]
    fn header_may_be_empty_but_body_may_not() {
        assert!(
            CreateComment::new(Id::new(1), String::new(), "b".to_owned(), String::new()).is_ok()
        );
        assert_eq!(
            CreateComment::new(Id::new(1), "h".to_owned(), String::new(), String::new()),
            Err(ModelValidationError::BlankField("body"))
        );
    }
}
