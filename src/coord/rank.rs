//! Proximity ranking
//!
//! Annotates points of interest with their distance from an origin and
//! orders them nearest first. Ranking never filters; solved-state filtering
//! is done by the session on top of a ranked list.

use crate::coord::distance::distance_meters;
use crate::coord::Coordinates;
use crate::poi::PointOfInterest;
use serde::Serialize;

/// A point of interest paired with its distance from the ranking origin
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RankedPoint<'a> {
    #[serde(flatten)]
    pub point: &'a PointOfInterest,

    /// Great-circle distance from the origin, in meters
    pub distance_meters: f64,
}

impl<'a> RankedPoint<'a> {
    /// Measure `point` from `origin`
    pub fn measure(origin: Coordinates, point: &'a PointOfInterest) -> Self {
        Self {
            point,
            distance_meters: distance_meters(origin, point.coords),
        }
    }
}

/// Rank points by ascending distance from `origin`
///
/// Produces exactly one entry per input point. The sort is stable, so points
/// at equal distance keep their input order.
pub fn rank<'a, I>(origin: Coordinates, points: I) -> Vec<RankedPoint<'a>>
where
    I: IntoIterator<Item = &'a PointOfInterest>,
{
    let mut ranked: Vec<RankedPoint<'a>> = points
        .into_iter()
        .map(|point| RankedPoint::measure(origin, point))
        .collect();

    ranked.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
    ranked
}

/// Find the point closest to `origin`
///
/// On ties the earliest point in input order wins. Returns `None` for an
/// empty input.
pub fn nearest<'a, I>(origin: Coordinates, points: I) -> Option<RankedPoint<'a>>
where
    I: IntoIterator<Item = &'a PointOfInterest>,
{
    points
        .into_iter()
        .map(|point| RankedPoint::measure(origin, point))
        .min_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters))
}

/// The prefix of an already ranked list that lies within `radius_meters`
pub fn within_radius<'r, 'a>(ranked: &'r [RankedPoint<'a>], radius_meters: f64) -> &'r [RankedPoint<'a>] {
    let end = ranked.partition_point(|r| r.distance_meters <= radius_meters);
    &ranked[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::geo::EARTH_RADIUS_METERS;
    use crate::poi::PlaceId;
    use approx::assert_relative_eq;

    const ORIGIN: Coordinates = Coordinates {
        lat: 48.7758,
        lng: 9.1829,
    };

    /// A coordinate `meters` due north of `origin`
    fn north_of(origin: Coordinates, meters: f64) -> Coordinates {
        Coordinates::new(origin.lat + (meters / EARTH_RADIUS_METERS).to_degrees(), origin.lng)
    }

    fn poi(id: &str, coords: Coordinates) -> PointOfInterest {
        PointOfInterest::new(PlaceId::new(id).unwrap(), coords, id, "?")
    }

    fn ids(ranked: &[RankedPoint<'_>]) -> Vec<String> {
        ranked.iter().map(|r| r.point.id.to_string()).collect()
    }

    #[test]
    fn test_rank_orders_by_distance() {
        let points = vec![
            poi("P1", north_of(ORIGIN, 10.0)),
            poi("P2", north_of(ORIGIN, 5.0)),
            poi("P3", north_of(ORIGIN, 20.0)),
        ];

        let ranked = rank(ORIGIN, &points);

        assert_eq!(ids(&ranked), vec!["P2", "P1", "P3"]);
        assert_relative_eq!(ranked[0].distance_meters, 5.0, epsilon = 1e-6);
        assert_relative_eq!(ranked[1].distance_meters, 10.0, epsilon = 1e-6);
        assert_relative_eq!(ranked[2].distance_meters, 20.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rank_preserves_cardinality() {
        let empty: Vec<PointOfInterest> = Vec::new();
        assert!(rank(ORIGIN, &empty).is_empty());

        let points: Vec<PointOfInterest> = (0..25)
            .map(|i| poi(&format!("p{}", i), north_of(ORIGIN, (i * 37 % 11) as f64 * 100.0)))
            .collect();
        let ranked = rank(ORIGIN, &points);

        assert_eq!(ranked.len(), points.len());
        assert!(ranked
            .windows(2)
            .all(|w| w[0].distance_meters <= w[1].distance_meters));
    }

    #[test]
    fn test_rank_is_stable_for_equal_distances() {
        let same = north_of(ORIGIN, 50.0);
        let points = vec![
            poi("far", north_of(ORIGIN, 500.0)),
            poi("b", same),
            poi("a", same),
            poi("c", same),
        ];

        let ranked = rank(ORIGIN, &points);

        assert_eq!(ids(&ranked), vec!["b", "a", "c", "far"]);
    }

    #[test]
    fn test_nearest() {
        let points = vec![
            poi("P1", north_of(ORIGIN, 10.0)),
            poi("P2", north_of(ORIGIN, 5.0)),
            poi("P2b", north_of(ORIGIN, 5.0)),
        ];

        let nearest = nearest(ORIGIN, &points).unwrap();
        assert_eq!(nearest.point.id.as_str(), "P2");

        let empty: Vec<PointOfInterest> = Vec::new();
        assert!(super::nearest(ORIGIN, &empty).is_none());
    }

    #[test]
    fn test_within_radius() {
        let points = vec![
            poi("P1", north_of(ORIGIN, 10.0)),
            poi("P2", north_of(ORIGIN, 500.0)),
            poi("P3", north_of(ORIGIN, 2_000.0)),
        ];
        let ranked = rank(ORIGIN, &points);

        assert_eq!(ids(within_radius(&ranked, 1_000.0)), vec!["P1", "P2"]);
        assert!(within_radius(&ranked, 1.0).is_empty());
        assert_eq!(within_radius(&ranked, 10_000.0).len(), 3);
    }
}
