pub mod album;
pub mod comment;
pub mod photo;
pub mod post;
pub mod user;

use derive_where::derive_where;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, marker::PhantomData, num::ParseIntError, str::FromStr};
use thiserror::Error;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum ModelValidationError {
    #[error("The {0} must not be blank")]
    BlankField(&'static str),
}

/// Numeric identifier of a remote resource, tagged with the kind of resource it points at.
#[derive_where(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<Marker>(u64, #[serde(skip)] PhantomData<Marker>);

impl<Marker> Id<Marker> {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id, PhantomData)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl<Marker> Display for Id<Marker> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<Marker> FromStr for Id<Marker> {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u64::from_str(s.trim()).map(Self::new)
    }
}

impl<Marker> From<u64> for Id<Marker> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<Marker> From<Id<Marker>> for u64 {
    fn from(value: Id<Marker>) -> Self {
        value.get()
    }
}

pub(crate) fn require_text(
    field: &'static str,
    value: String,
) -> Result<String, ModelValidationError> {
    if value.trim().is_empty() {
        Err(ModelValidationError::BlankField(field))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{post::PostMarker, user::UserMarker};

    #[test]
    fn id_is_a_bare_json_number() {
        let id: Id<UserMarker> = 7.into();
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");

        let parsed: Id<PostMarker> = serde_json::from_str("101").unwrap();
        assert_eq!(parsed.get(), 101);
    }

    #[test]
    fn id_from_str() {
        assert_eq!(" 42 ".parse::<Id<UserMarker>>(), Ok(Id::new(42)));
        assert!("forty-two".parse::<Id<UserMarker>>().is_err());
        assert!("-1".parse::<Id<UserMarker>>().is_err());
    }

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(
            require_text("title", "  \n".to_owned()),
            Err(ModelValidationError::BlankField("title"))
        );
        assert_eq!(require_text("title", "T".to_owned()), Ok("T".to_owned()));
    }
}
