//! Nearest-stop lookup.
//!
//! Filters a stop collection by great-circle distance from a point and
//! orders stops by how far they are from it. All distances are in meters.

use crate::domain::{Coordinate, Stop, distance_meters};

/// Return the stops within `radius_meters` of `center`, in input order.
///
/// A stop exactly on the boundary is included.
pub fn find_within_radius(center: Coordinate, radius_meters: f64, candidates: &[Stop]) -> Vec<Stop> {
    candidates
        .iter()
        .filter(|stop| distance_meters(center, stop.location) <= radius_meters)
        .cloned()
        .collect()
}

/// Sort stops in place by ascending distance from `origin`.
///
/// The sort is stable: stops at equal distance keep their relative order.
pub fn sort_by_distance(origin: Coordinate, stops: &mut [Stop]) {
    stops.sort_by_cached_key(|stop| OrderedMeters(distance_meters(origin, stop.location)));
}

/// The `limit` closest stops within `radius_meters` of `origin`, closest first.
pub fn nearest(origin: Coordinate, radius_meters: f64, candidates: &[Stop], limit: usize) -> Vec<Stop> {
    let mut stops = find_within_radius(origin, radius_meters, candidates);
    sort_by_distance(origin, &mut stops);
    stops.truncate(limit);
    stops
}

/// Total ordering wrapper for distances.
///
/// Distances from `distance_meters` are never NaN, so `total_cmp` agrees
/// with the usual numeric order.
#[derive(PartialEq)]
struct OrderedMeters(f64);

impl Eq for OrderedMeters {}

impl PartialOrd for OrderedMeters {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedMeters {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}
