use crate::dispatch::{Dispatch, Outcome, Request, Response};
use plaza_common::{
    filter::{Filter, PhotoFilter},
    load::{Resource, Settled, TokenSource},
    model::{
        Id,
        album::AlbumMarker,
        photo::{Photo, PhotoMarker},
    },
};
use tracing::debug;

/// Photo list with id search, either of every photo or of one album.
#[derive(Clone, Debug)]
pub struct PhotosView {
    album: Option<Id<AlbumMarker>>,
    photos: Resource<Photo>,
    filter: PhotoFilter,
    enlarged: Option<Photo>,
}

impl PhotosView {
    pub fn mount(album: Option<Id<AlbumMarker>>, tokens: &mut TokenSource) -> (Self, Dispatch) {
        let mut photos = Resource::new("photos");
        let token = photos.begin(tokens);

        let view = Self {
            album,
            photos,
            filter: PhotoFilter::default(),
            enlarged: None,
        };
        (
            view,
            Dispatch {
                token,
                request: Request::Photos(album),
            },
        )
    }

    #[must_use]
    pub fn album(&self) -> Option<Id<AlbumMarker>> {
        self.album
    }

    #[must_use]
    pub fn resource(&self) -> &Resource<Photo> {
        &self.photos
    }

    #[must_use]
    pub fn filter(&self) -> &PhotoFilter {
        &self.filter
    }

    #[must_use]
    pub fn visible(&self) -> Vec<&Photo> {
        self.filter.apply(self.photos.items())
    }

    pub fn search_photo_id(&mut self, text: &str) {
        text.clone_into(&mut self.filter.photo_id);
    }

    pub fn search_album_id(&mut self, text: &str) {
        text.clone_into(&mut self.filter.album_id);
    }

    #[must_use]
    pub fn enlarged(&self) -> Option<&Photo> {
        self.enlarged.as_ref()
    }

    pub fn enlarge(&mut self, photo_id: Id<PhotoMarker>) -> bool {
        let Some(photo) = self.photos.find(|photo| photo.id == photo_id) else {
            debug!(%photo_id, "No such photo to enlarge");
            return false;
        };
        self.enlarged = Some(photo.clone());
        true
    }

    pub fn close(&mut self) -> bool {
        self.enlarged.take().is_some()
    }

    #[must_use]
    pub fn owns(&self, outcome: &Outcome) -> bool {
        self.photos.owns(outcome.token)
    }

    pub fn apply(&mut self, outcome: Outcome) -> bool {
        match outcome.response {
            Response::Photos(result) => {
                self.photos.settle(outcome.token, result) != Settled::Stale
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::test_support::{loaded, photo};

    fn view(album: Option<u64>) -> PhotosView {
        let mut tokens = TokenSource::default();
        let (mut view, dispatch) = PhotosView::mount(album.map(Id::new), &mut tokens);
        assert_eq!(dispatch.request, Request::Photos(album.map(Id::new)));

        let photos = vec![photo(1, 1), photo(12, 1), photo(51, 2), photo(100, 2)];
        view.apply(loaded(dispatch.token, Response::Photos(Ok(photos))));
        view
    }

    fn visible_ids(view: &PhotosView) -> Vec<u64> {
        view.visible().iter().map(|photo| photo.id.get()).collect()
    }

    #[test]
    fn searches_compose() {
        let mut view = view(None);

        view.search_photo_id("1");
        assert_eq!(visible_ids(&view), [1, 12, 51, 100]);

        view.search_album_id("2");
        assert_eq!(visible_ids(&view), [51, 100]);

        view.search_photo_id("");
        view.search_album_id("");
        assert_eq!(visible_ids(&view), [1, 12, 51, 100]);
    }

    #[test]
    fn enlarge_and_close() {
        let mut view = view(Some(2));

        assert!(!view.enlarge(Id::new(7)));
        assert!(view.enlarge(Id::new(51)));
        assert_eq!(view.enlarged().map(|photo| photo.id), Some(Id::new(51)));

        assert!(view.close());
        assert!(!view.close());
        assert!(view.enlarged().is_none());
    }
}
