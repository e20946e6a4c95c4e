use plaza_common::model::{Id, album::AlbumMarker, user::UserMarker};
use std::{
    fmt::{Display, Formatter},
    num::ParseIntError,
    str::FromStr,
};
use thiserror::Error;

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum RouteError {
    #[error("No view is routed at {0}")]
    Unknown(String),
    #[error("Invalid id in route {route}: {source}")]
    InvalidId {
        route: String,
        source: ParseIntError,
    },
}

/// Navigable client-side locations.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Route {
    Users,
    Albums,
    AlbumPhotos(Id<AlbumMarker>),
    UserAlbums(Id<UserMarker>),
    Photos,
    Posts,
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s
            .trim()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] | ["users"] => Ok(Route::Users),
            ["albums"] => Ok(Route::Albums),
            ["albums", album_id] => Ok(Route::AlbumPhotos(parse_id(s, album_id)?)),
            ["users", user_id, "albums"] => Ok(Route::UserAlbums(parse_id(s, user_id)?)),
            ["photos"] => Ok(Route::Photos),
            ["posts"] => Ok(Route::Posts),
            _ => Err(RouteError::Unknown(s.to_owned())),
        }
    }
}

fn parse_id<Marker>(route: &str, segment: &str) -> Result<Id<Marker>, RouteError> {
    segment.parse().map_err(|source| RouteError::InvalidId {
        route: route.to_owned(),
        source,
    })
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Users => write!(f, "/users"),
            Route::Albums => write!(f, "/albums"),
            Route::AlbumPhotos(album_id) => write!(f, "/albums/{album_id}"),
            Route::UserAlbums(user_id) => write!(f, "/users/{user_id}/albums"),
            Route::Photos => write!(f, "/photos"),
            Route::Posts => write!(f, "/posts"),
        }
    }
}
