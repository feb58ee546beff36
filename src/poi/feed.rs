//! Point-of-interest feed loading
//!
//! Parses GeoJSON features into validated [`PointOfInterest`] values. Feeds
//! have drifted in shape over time (property casing, `name` vs `place`,
//! numeric vs string ids), so property keys are matched case-insensitively
//! and every record is checked before anything is admitted. A single
//! malformed record rejects the whole feed.

use crate::constants::http::USER_AGENT;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::poi::{PlaceId, PointOfInterest};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

const ID_KEYS: &[&str] = &["placeId", "place_id", "id"];
const NAME_KEYS: &[&str] = &["name", "place"];
const QUESTION_KEYS: &[&str] = &["question"];
const ANSWER_KEYS: &[&str] = &["answer"];

/// Where a feed is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    /// Local GeoJSON file
    File(PathBuf),
    /// HTTP(S) endpoint returning GeoJSON
    Url(String),
}

impl FromStr for FeedSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::Config("Feed source must not be empty".to_string()));
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Self::Url(s.to_string()))
        } else {
            Ok(Self::File(PathBuf::from(s)))
        }
    }
}

impl std::fmt::Display for FeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

/// GeoJSON feature as it appears on the wire
#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    geometry: Option<RawGeometry>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    coordinates: Option<Vec<f64>>,
}

/// Load and validate a feed from its source
pub async fn load(source: &FeedSource) -> Result<Vec<PointOfInterest>> {
    let body = match source {
        FeedSource::File(path) => tokio::fs::read_to_string(path).await?,
        FeedSource::Url(url) => fetch(url).await?,
    };

    let points = parse_feed(&body)?;
    info!("Loaded {} points of interest from {}", points.len(), source);
    Ok(points)
}

/// Fetch a feed body over HTTP
async fn fetch(url: &str) -> Result<String> {
    let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

    debug!("Fetching feed from {}", url);
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(Error::InvalidFeed(format!(
            "Feed endpoint returned status: {}",
            response.status()
        )));
    }

    Ok(response.text().await?)
}

/// Parse a feed from JSON text
pub fn parse_feed(json: &str) -> Result<Vec<PointOfInterest>> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| Error::InvalidFeed(format!("Feed is not valid JSON: {}", e)))?;
    parse_feed_value(value)
}

/// Parse a feed from an already decoded JSON value
///
/// Accepts a GeoJSON `FeatureCollection` or a bare array of features.
pub fn parse_feed_value(value: Value) -> Result<Vec<PointOfInterest>> {
    let features = match value {
        Value::Array(features) => features,
        Value::Object(mut collection) => match collection.remove("features") {
            Some(Value::Array(features)) => features,
            _ => {
                return Err(Error::InvalidFeed(
                    "Feature collection has no `features` array".to_string(),
                ))
            }
        },
        _ => {
            return Err(Error::InvalidFeed(
                "Feed must be a feature collection or an array of features".to_string(),
            ))
        }
    };

    let mut seen = HashSet::new();
    let mut points = Vec::with_capacity(features.len());

    for (index, feature) in features.into_iter().enumerate() {
        let point = parse_feature(feature)
            .map_err(|reason| Error::InvalidFeed(format!("record {}: {}", index, reason)))?;

        if !seen.insert(point.id.clone()) {
            return Err(Error::InvalidFeed(format!(
                "record {}: duplicate place id `{}`",
                index, point.id
            )));
        }
        points.push(point);
    }

    Ok(points)
}

/// Validate one feature, returning a human-readable rejection reason
fn parse_feature(feature: Value) -> std::result::Result<PointOfInterest, String> {
    let raw: RawFeature = serde_json::from_value(feature).map_err(|e| e.to_string())?;
    let properties = raw.properties.unwrap_or_default();

    let id = raw
        .id
        .as_ref()
        .and_then(value_to_string)
        .or_else(|| lookup(&properties, ID_KEYS))
        .ok_or_else(|| "missing place id".to_string())?;
    let id = PlaceId::new(id).map_err(|_| "empty place id".to_string())?;

    let coords = parse_geometry(raw.geometry)?;

    let name = lookup(&properties, NAME_KEYS)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| id.to_string());
    let question = lookup(&properties, QUESTION_KEYS).unwrap_or_default();
    let answer = lookup(&properties, ANSWER_KEYS);

    Ok(PointOfInterest {
        id,
        coords,
        name,
        question,
        answer,
    })
}

/// GeoJSON points are `[lng, lat]`
fn parse_geometry(geometry: Option<RawGeometry>) -> std::result::Result<Coordinates, String> {
    let geometry = geometry.ok_or_else(|| "missing geometry".to_string())?;

    if let Some(kind) = &geometry.kind {
        if !kind.eq_ignore_ascii_case("Point") {
            return Err(format!("unsupported geometry type `{}`", kind));
        }
    }

    match geometry.coordinates.as_deref() {
        Some([lng, lat, ..]) => {
            Coordinates::try_new(*lat, *lng).map_err(|e| e.to_string())
        }
        _ => Err("missing coordinates".to_string()),
    }
}

/// First property matching any of `keys`, ignoring ASCII case
fn lookup(properties: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        properties
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .and_then(|(_, v)| value_to_string(v))
    })
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
