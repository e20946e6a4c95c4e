pub mod albums;
pub mod comments;
pub mod header;
pub mod photos;
pub mod posts;
pub mod users;

use crate::{
    dispatch::{Dispatch, Outcome},
    routes::Route,
};
use albums::AlbumsView;
use photos::PhotosView;
use plaza_common::load::TokenSource;
use posts::PostsView;
use users::UsersView;

/// The view mounted for the current route. Navigating away drops the view together with
/// everything it loaded.
#[derive(Clone, Debug)]
pub enum ActiveView {
    Users(UsersView),
    Albums(AlbumsView),
    Photos(PhotosView),
    Posts(PostsView),
}

impl ActiveView {
    pub fn mount(route: Route, tokens: &mut TokenSource) -> (Self, Dispatch) {
        match route {
            Route::Users => {
                let (view, dispatch) = UsersView::mount(tokens);
                (ActiveView::Users(view), dispatch)
            }
            Route::Albums => {
                let (view, dispatch) = AlbumsView::mount(None, tokens);
                (ActiveView::Albums(view), dispatch)
            }
            Route::UserAlbums(user_id) => {
                let (view, dispatch) = AlbumsView::mount(Some(user_id), tokens);
                (ActiveView::Albums(view), dispatch)
            }
            Route::Photos => {
                let (view, dispatch) = PhotosView::mount(None, tokens);
                (ActiveView::Photos(view), dispatch)
            }
            Route::AlbumPhotos(album_id) => {
                let (view, dispatch) = PhotosView::mount(Some(album_id), tokens);
                (ActiveView::Photos(view), dispatch)
            }
            Route::Posts => {
                let (view, dispatch) = PostsView::mount(tokens);
                (ActiveView::Posts(view), dispatch)
            }
        }
    }

    #[must_use]
    pub fn route(&self) -> Route {
        match self {
            ActiveView::Users(_) => Route::Users,
            ActiveView::Albums(view) => view.owner().map_or(Route::Albums, Route::UserAlbums),
            ActiveView::Photos(view) => view.album().map_or(Route::Photos, Route::AlbumPhotos),
            ActiveView::Posts(_) => Route::Posts,
        }
    }

    #[must_use]
    pub fn owns(&self, outcome: &Outcome) -> bool {
        match self {
            ActiveView::Users(view) => view.owns(outcome),
            ActiveView::Albums(view) => view.owns(outcome),
            ActiveView::Photos(view) => view.owns(outcome),
            ActiveView::Posts(view) => view.owns(outcome),
        }
    }

    /// Returns whether the view changed.
    pub fn apply(&mut self, outcome: Outcome) -> bool {
        match self {
            ActiveView::Users(view) => view.apply(outcome),
            ActiveView::Albums(view) => view.apply(outcome),
            ActiveView::Photos(view) => view.apply(outcome),
            ActiveView::Posts(view) => view.apply(outcome),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::dispatch::{Outcome, Response};
    use plaza_client::{ApiError, endpoint::Endpoint};
    use plaza_common::{
        load::LoadToken,
        model::{
            Id,
            album::Album,
            comment::Comment,
            photo::Photo,
            post::Post,
            user::User,
        },
    };

    pub fn loaded(token: LoadToken, response: Response) -> Outcome {
        Outcome { token, response }
    }

    pub fn api_error() -> ApiError {
        ApiError::Url {
            endpoint: Endpoint::Users,
            source: url::ParseError::EmptyHost,
        }
    }

    pub fn user(id: u64, name: &str, email: &str) -> User {
        User {
            id: Id::new(id),
            name: name.to_owned(),
            email: email.to_owned(),
            ..User::default()
        }
    }

    pub fn album(id: u64, user_id: u64) -> Album {
        Album {
            id: Id::new(id),
            user_id: Id::new(user_id),
            title: format!("album {id}"),
        }
    }

    pub fn photo(id: u64, album_id: u64) -> Photo {
        Photo {
            id: Id::new(id),
            album_id: Id::new(album_id),
            title: format!("photo {id}"),
            url: format!("https://via.placeholder.com/600/{id}"),
            thumbnail_url: format!("https://via.placeholder.com/150/{id}"),
        }
    }

    pub fn post(id: u64, user_id: u64) -> Post {
        Post {
            id: Id::new(id),
            user_id: Id::new(user_id),
            title: format!("post {id}"),
            body: format!("body of post {id}"),
        }
    }

    pub fn comment(id: u64, post_id: u64, email: &str) -> Comment {
        Comment {
            id: Id::new(id),
            post_id: Id::new(post_id),
            name: format!("comment {id}"),
            email: email.to_owned(),
            body: format!("body of comment {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaza_common::model::Id;

    #[test]
    fn mounted_view_reports_its_route() {
        let mut tokens = TokenSource::default();
        for route in [
            Route::Users,
            Route::Albums,
            Route::UserAlbums(Id::new(2)),
            Route::Photos,
            Route::AlbumPhotos(Id::new(3)),
            Route::Posts,
        ] {
            let (view, dispatch) = ActiveView::mount(route, &mut tokens);
            assert_eq!(view.route(), route);
            assert!(view.owns(&test_support::loaded(
                dispatch.token,
                crate::dispatch::Response::Users(Ok(vec![]))
            )));
        }
    }
}
