use crate::model::{Id, album::AlbumMarker};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PhotoMarker;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: Id<PhotoMarker>,
    pub album_id: Id<AlbumMarker>,
    #[serde(default)]
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_camel_case_urls() {
        let photo: Photo = serde_json::from_str(
            r#"{
                "albumId": 1,
                "id": 2,
                "title": "reprehenderit est deserunt velit ipsam",
                "url": "https://via.placeholder.com/600/771796",
                "thumbnailUrl": "https://via.placeholder.com/150/771796"
            }"#,
        )
        .unwrap();

        assert_eq!(photo.album_id, Id::new(1));
        assert_eq!(photo.thumbnail_url, "https://via.placeholder.com/150/771796");
    }
}
