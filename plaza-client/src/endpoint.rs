use plaza_common::model::{
    Id, album::AlbumMarker, comment::CommentMarker, post::PostMarker, user::UserMarker,
};
use std::fmt::{Display, Formatter};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com/";

/// Every resource path the client talks to, relative to the API base url.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum Endpoint {
    Users,
    UsersByName(String),
    UserAlbums(Id<UserMarker>),
    Albums,
    Photos(Option<Id<AlbumMarker>>),
    Posts,
    Post(Id<PostMarker>),
    PostComments(Id<PostMarker>),
    Comments,
    Comment(Id<CommentMarker>),
}

impl Endpoint {
    fn path(&self) -> String {
        match self {
            Endpoint::Users | Endpoint::UsersByName(_) => "users".to_owned(),
            Endpoint::UserAlbums(id) => format!("users/{id}/albums"),
            Endpoint::Albums => "albums".to_owned(),
            Endpoint::Photos(_) => "photos".to_owned(),
            Endpoint::Posts => "posts".to_owned(),
            Endpoint::Post(id) => format!("posts/{id}"),
            Endpoint::PostComments(id) => format!("posts/{id}/comments"),
            Endpoint::Comments => "comments".to_owned(),
            Endpoint::Comment(id) => format!("comments/{id}"),
        }
    }

    pub fn url(&self, base: &Url) -> Result<Url, url::ParseError> {
        let mut url = base.join(&self.path())?;

        match self {
            Endpoint::UsersByName(name) => {
                url.query_pairs_mut().append_pair("name", name);
            }
            Endpoint::Photos(Some(album_id)) => {
                url.query_pairs_mut()
                    .append_pair("albumId", &album_id.to_string());
            }
            _ => {}
        }

        Ok(url)
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::UsersByName(name) => write!(f, "/users?name={name}"),
            Endpoint::Photos(Some(album_id)) => write!(f, "/photos?albumId={album_id}"),
            _ => write!(f, "/{}", self.path()),
        }
    }
}

/// Makes sure relative endpoint paths are appended to the base path instead of replacing its
/// last segment.
#[must_use]
pub fn normalize_base(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}
