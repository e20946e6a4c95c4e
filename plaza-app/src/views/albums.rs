use crate::dispatch::{Dispatch, Outcome, Request, Response};
use plaza_common::{
    load::{Resource, Settled, TokenSource},
    model::{
        Id,
        album::Album,
        user::UserMarker,
    },
    page::{ALBUMS_PAGE_SIZE, Paginator},
};
use tracing::warn;

/// The album grid, either of every album or scoped to one user.
#[derive(Clone, Debug)]
pub struct AlbumsView {
    owner: Option<Id<UserMarker>>,
    albums: Resource<Album>,
    paginator: Paginator,
}

impl AlbumsView {
    pub fn mount(owner: Option<Id<UserMarker>>, tokens: &mut TokenSource) -> (Self, Dispatch) {
        let (label, request, paginator) = match owner {
            None => ("albums", Request::Albums, Paginator::new(ALBUMS_PAGE_SIZE)),
            Some(user_id) => (
                "user albums",
                Request::UserAlbums(user_id),
                Paginator::unbounded(),
            ),
        };

        let mut albums = Resource::new(label);
        let token = albums.begin(tokens);

        let view = Self {
            owner,
            albums,
            paginator,
        };
        (view, Dispatch { token, request })
    }

    #[must_use]
    pub fn owner(&self) -> Option<Id<UserMarker>> {
        self.owner
    }

    #[must_use]
    pub fn resource(&self) -> &Resource<Album> {
        &self.albums
    }

    #[must_use]
    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    #[must_use]
    pub fn visible(&self) -> &[Album] {
        self.paginator.slice(self.albums.items())
    }

    pub fn select_page(&mut self, page: usize) -> bool {
        match self.paginator.select(page, self.albums.items().len()) {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, "Ignoring page selection");
                false
            }
        }
    }

    #[must_use]
    pub fn owns(&self, outcome: &Outcome) -> bool {
        self.albums.owns(outcome.token)
    }

    pub fn apply(&mut self, outcome: Outcome) -> bool {
        let Response::Albums(result) = outcome.response else {
            return false;
        };

        match self.albums.settle(outcome.token, result) {
            Settled::Replaced => {
                self.paginator.clamp(self.albums.items().len());
                true
            }
            Settled::Failed => true,
            Settled::Stale => false,
        }
    }
}
