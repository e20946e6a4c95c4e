use crate::endpoint::{Endpoint, normalize_base};
use async_trait::async_trait;
use plaza_common::model::{
    Id,
    album::{Album, AlbumMarker},
    comment::{Comment, CommentMarker, CreateComment},
    photo::Photo,
    post::{CreatePost, Post, PostMarker},
    user::{User, UserMarker},
};
use reqwest::{
    Client, Method, StatusCode,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Could not build url for {endpoint}: {source}")]
    Url {
        endpoint: Endpoint,
        source: url::ParseError,
    },
    #[error("Could not encode request body: {0}")]
    Encode(serde_json::Error),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("{method} {url} failed with status {status}")]
    Status {
        method: Method,
        url: Url,
        status: StatusCode,
    },
    #[error("Could not decode response of {url}: {source}")]
    Decode {
        url: Url,
        source: serde_json::Error,
    },
}

/// Everything the views need from the remote API.
#[async_trait]
pub trait PlaceholderApi: Send + Sync {
    async fn fetch_users(&self) -> Result<Vec<User>>;

    /// Server-side exact match on the display name.
    async fn fetch_users_by_name(&self, name: &str) -> Result<Vec<User>>;

    async fn fetch_user_albums(&self, user_id: Id<UserMarker>) -> Result<Vec<Album>>;

    async fn fetch_albums(&self) -> Result<Vec<Album>>;

    async fn fetch_photos(&self, album_id: Option<Id<AlbumMarker>>) -> Result<Vec<Photo>>;

    async fn fetch_posts(&self) -> Result<Vec<Post>>;

    async fn create_post(&self, post: &CreatePost) -> Result<Post>;

    async fn delete_post(&self, post_id: Id<PostMarker>) -> Result<()>;

    async fn fetch_post_comments(&self, post_id: Id<PostMarker>) -> Result<Vec<Comment>>;

    async fn create_comment(&self, comment: &CreateComment) -> Result<Comment>;

    async fn delete_comment(&self, comment_id: Id<CommentMarker>) -> Result<()>;
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: Url, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base: normalize_base(base),
        })
    }

    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    async fn send(
        &self,
        method: Method,
        endpoint: Endpoint,
        body: Option<Vec<u8>>,
    ) -> Result<(Url, Vec<u8>)> {
        let url = endpoint
            .url(&self.base)
            .map_err(|source| ApiError::Url { endpoint, source })?;

        debug!(%method, %url, "Sending request");

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                method,
                url,
                status,
            });
        }

        let body = response.bytes().await?;
        debug!(%method, %url, %status, bytes = body.len(), "Received response");

        Ok((url, body.to_vec()))
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T> {
        let (url, body) = self.send(Method::GET, endpoint, None).await?;
        decode(url, &body)
    }

    async fn post<B, T>(&self, endpoint: Endpoint, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let body = serde_json::to_vec(body).map_err(ApiError::Encode)?;
        let (url, body) = self.send(Method::POST, endpoint, Some(body)).await?;
        decode(url, &body)
    }

    async fn delete(&self, endpoint: Endpoint) -> Result<()> {
        self.send(Method::DELETE, endpoint, None).await?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(url: Url, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| ApiError::Decode { url, source })
}

#[async_trait]
impl PlaceholderApi for ApiClient {
    async fn fetch_users(&self) -> Result<Vec<User>> {
        self.get(Endpoint::Users).await
    }

    async fn fetch_users_by_name(&self, name: &str) -> Result<Vec<User>> {
        self.get(Endpoint::UsersByName(name.to_owned())).await
    }

    async fn fetch_user_albums(&self, user_id: Id<UserMarker>) -> Result<Vec<Album>> {
        self.get(Endpoint::UserAlbums(user_id)).await
    }

    async fn fetch_albums(&self) -> Result<Vec<Album>> {
        self.get(Endpoint::Albums).await
    }

    async fn fetch_photos(&self, album_id: Option<Id<AlbumMarker>>) -> Result<Vec<Photo>> {
        self.get(Endpoint::Photos(album_id)).await
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        self.get(Endpoint::Posts).await
    }

    async fn create_post(&self, post: &CreatePost) -> Result<Post> {
        self.post(Endpoint::Posts, post).await
    }

    async fn delete_post(&self, post_id: Id<PostMarker>) -> Result<()> {
        self.delete(Endpoint::Post(post_id)).await
    }

    async fn fetch_post_comments(&self, post_id: Id<PostMarker>) -> Result<Vec<Comment>> {
        self.get(Endpoint::PostComments(post_id)).await
    }

    async fn create_comment(&self, comment: &CreateComment) -> Result<Comment> {
        self.post(Endpoint::Comments, comment).await
    }

    async fn delete_comment(&self, comment_id: Id<CommentMarker>) -> Result<()> {
        self.delete(Endpoint::Comment(comment_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_normalizes_base() {
        let base = Url::parse("http://localhost:3000/api").unwrap();
        let client = ApiClient::new(base, None).unwrap();
        assert_eq!(client.base().as_str(), "http://localhost:3000/api/");
    }

    #[test]
    fn decode_errors_carry_the_url() {
        let url = Url::parse("https://jsonplaceholder.typicode.com/posts").unwrap();

        let error = decode::<Vec<Post>>(url.clone(), b"{\"not\": \"a list\"}").unwrap_err();

        match error {
            ApiError::Decode { url: failed, .. } => assert_eq!(failed, url),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn decodes_comment_list() {
        let url = Url::parse("https://jsonplaceholder.typicode.com/posts/1/comments").unwrap();
        let body = br#"[
            {"postId": 1, "id": 1, "name": "id labore ex et quam laborum",
             "email": "Eliseo@gardner.biz", "body": "laudantium enim quasi"},
            {"postId": 1, "id": 2, "name": "quo vero reiciendis",
             "email": "Jayne_Kuhic@sydney.com", "body": "est natus enim"}
        ]"#;

        let comments: Vec<Comment> = decode(url, body).unwrap();

        assert_eq!(comments.len(), 2);
        assert_eq!(comments[1].email, "Jayne_Kuhic@sydney.com");
    }
}
