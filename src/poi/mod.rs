//! Points of interest
//!
//! A point of interest is a fixed geotagged location carrying a trivia
//! question. Points are created once from a feed and never mutated.

pub mod feed;

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Stable unique label of a point of interest
///
/// Always non-empty and free of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlaceId(String);

impl PlaceId {
    /// Create a place id, trimming whitespace and rejecting empty labels
    pub fn new(id: impl AsRef<str>) -> Result<Self> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            return Err(Error::InvalidInput("Place id must not be empty".to_string()));
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PlaceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlaceId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PlaceId> for String {
    fn from(id: PlaceId) -> Self {
        id.0
    }
}

/// A geotagged trivia location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointOfInterest {
    pub id: PlaceId,
    pub coords: Coordinates,
    pub name: String,
    pub question: String,

    /// Expected answer, compared case-insensitively; never serialized
    #[serde(skip_serializing)]
    pub answer: Option<String>,
}

impl PointOfInterest {
    /// Create a point without an expected answer
    pub fn new(
        id: PlaceId,
        coords: Coordinates,
        name: impl Into<String>,
        question: impl Into<String>,
    ) -> Self {
        Self {
            id,
            coords,
            name: name.into(),
            question: question.into(),
            answer: None,
        }
    }

    /// Set the expected answer
    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = Some(answer.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_id_trims() {
        let id = PlaceId::new("  schlossplatz ").unwrap();
        assert_eq!(id.as_str(), "schlossplatz");
        assert_eq!(id.to_string(), "schlossplatz");
    }

    #[test]
    fn test_place_id_rejects_empty() {
        assert!(matches!(PlaceId::new(""), Err(Error::InvalidInput(_))));
        assert!(matches!(PlaceId::new("   "), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_place_id_deserialize_validates() {
        let id: PlaceId = serde_json::from_str("\"p1\"").unwrap();
        assert_eq!(id.as_str(), "p1");
        assert!(serde_json::from_str::<PlaceId>("\"\"").is_err());
    }

    #[test]
    fn test_answer_is_not_serialized() {
        let point = PointOfInterest::new(
            PlaceId::new("p1").unwrap(),
            Coordinates::new(48.7758, 9.1829),
            "Schlossplatz",
            "Which duke commissioned the New Palace?",
        )
        .with_answer("Karl Eugen");

        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["id"], "p1");
        assert_eq!(json["name"], "Schlossplatz");
        assert!(json.get("answer").is_none());
    }
}
