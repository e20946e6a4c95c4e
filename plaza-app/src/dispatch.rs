use plaza_client::{ApiError, PlaceholderApi};
use plaza_common::{
    load::LoadToken,
    model::{
        Id,
        album::{Album, AlbumMarker},
        comment::{Comment, CommentMarker, CreateComment},
        photo::Photo,
        post::{CreatePost, Post, PostMarker},
        user::{User, UserMarker},
    },
};

type ApiResult<T> = Result<T, ApiError>;

/// A request a view wants performed in the background.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Request {
    Users,
    UsersByName(String),
    UserAlbums(Id<UserMarker>),
    Albums,
    Photos(Option<Id<AlbumMarker>>),
    Posts,
    CreatePost(CreatePost),
    DeletePost(Id<PostMarker>),
    PostComments(Id<PostMarker>),
    CreateComment(CreateComment),
    DeleteComment(Id<CommentMarker>),
}

#[derive(Debug)]
pub enum Response {
    Users(ApiResult<Vec<User>>),
    Albums(ApiResult<Vec<Album>>),
    Photos(ApiResult<Vec<Photo>>),
    Posts(ApiResult<Vec<Post>>),
    PostCreated(ApiResult<Post>),
    PostDeleted(Id<PostMarker>, ApiResult<()>),
    Comments(ApiResult<Vec<Comment>>),
    CommentCreated(ApiResult<Comment>),
    CommentDeleted(Id<CommentMarker>, ApiResult<()>),
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Dispatch {
    pub token: LoadToken,
    pub request: Request,
}

#[derive(Debug)]
pub struct Outcome {
    pub token: LoadToken,
    pub response: Response,
}

pub async fn execute(api: &dyn PlaceholderApi, request: Request) -> Response {
    match request {
        Request::Users => Response::Users(api.fetch_users().await),
        Request::UsersByName(name) => Response::Users(api.fetch_users_by_name(&name).await),
        Request::UserAlbums(user_id) => Response::Albums(api.fetch_user_albums(user_id).await),
        Request::Albums => Response::Albums(api.fetch_albums().await),
        Request::Photos(album_id) => Response::Photos(api.fetch_photos(album_id).await),
        Request::Posts => Response::Posts(api.fetch_posts().await),
        Request::CreatePost(post) => Response::PostCreated(api.create_post(&post).await),
        Request::DeletePost(post_id) => {
            Response::PostDeleted(post_id, api.delete_post(post_id).await)
        }
        Request::PostComments(post_id) => {
            Response::Comments(api.fetch_post_comments(post_id).await)
        }
        Request::CreateComment(comment) => {
            Response::CommentCreated(api.create_comment(&comment).await)
        }
        Request::DeleteComment(comment_id) => {
            Response::CommentDeleted(comment_id, api.delete_comment(comment_id).await)
        }
    }
}
