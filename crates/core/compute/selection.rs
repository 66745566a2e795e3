//! Nearest-to-center selection and in-bounds counting.
//!
//! Both functions are pure: the same inputs always give the same output, and
//! nothing is cached between calls.

use debox_types::{Bounds, LatLng, PointRecord};
use std::cmp::Ordering;

/// A record paired with its planar distance to the query center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearby<'a> {
    pub record: &'a PointRecord,
    /// Distance in degrees, see [`LatLng::planar_distance`]
    pub distance: f64,
}

/// Sort key: distance first, dataset position second.
///
/// The position makes every key unique, so any sort over these keys gives the
/// same order a stable sort by distance alone would.
#[inline]
fn by_distance_then_index(a: &(f64, usize), b: &(f64, usize)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}

/// The `limit` records closest to `center`, closest first, with distances.
///
/// Distance is planar Euclidean over raw degrees:
/// `sqrt((lat - center.lat)^2 + (lng - center.lng)^2)`.
/// Records at equal distance keep their dataset order.
///
/// # Behavior
///
/// - If `limit == 0` or `records` is empty, returns an empty vector
/// - If `limit > records.len()`, returns every record
///
/// Only the kept prefix is fully sorted: the `limit` smallest keys are
/// partitioned out first, so the cost is O(n + k log k).
///
/// # Examples
///
/// ```
/// use debox::compute::rank_nearest;
/// use debox_types::{LatLng, PointRecord};
///
/// let records = vec![
///     PointRecord::new("far", "far", "d", 5.0, 0.0),
///     PointRecord::new("near", "near", "d", 1.0, 0.0),
///     PointRecord::new("mid", "mid", "d", 3.0, 0.0),
/// ];
///
/// let nearest = rank_nearest(&LatLng::new(0.0, 0.0), &records, 2);
/// assert_eq!(nearest[0].record.id, "near");
/// assert_eq!(nearest[1].distance, 3.0);
/// ```
pub fn rank_nearest<'a>(center: &LatLng, records: &'a [PointRecord], limit: usize) -> Vec<Nearby<'a>> {
    if limit == 0 || records.is_empty() {
        return Vec::new();
    }

    let mut keyed: Vec<(f64, usize)> = records
        .iter()
        .enumerate()
        .map(|(index, record)| (center.planar_distance(&record.position()), index))
        .collect();

    if limit < keyed.len() {
        keyed.select_nth_unstable_by(limit - 1, by_distance_then_index);
        keyed.truncate(limit);
    }
    keyed.sort_unstable_by(by_distance_then_index);

    keyed
        .into_iter()
        .map(|(distance, index)| Nearby {
            record: &records[index],
            distance,
        })
        .collect()
}

/// The `limit` records closest to `center`, closest first.
///
/// See [`rank_nearest`] for ordering and tie rules.
pub fn select_nearest<'a>(
    center: &LatLng,
    records: &'a [PointRecord],
    limit: usize,
) -> Vec<&'a PointRecord> {
    rank_nearest(center, records, limit)
        .into_iter()
        .map(|nearby| nearby.record)
        .collect()
}

/// Number of records inside `bounds`, edges included.
///
/// ```
/// use debox::compute::count_within;
/// use debox_types::{Bounds, PointRecord};
///
/// let bounds = Bounds::new(37.0, 126.0, 38.0, 127.0);
/// let records = vec![
///     PointRecord::new("in", "in", "d", 37.5, 126.5),
///     PointRecord::new("out", "out", "d", 38.5, 126.5),
/// ];
/// assert_eq!(count_within(&bounds, &records), 1);
/// ```
pub fn count_within(bounds: &Bounds, records: &[PointRecord]) -> usize {
    records
        .iter()
        .filter(|record| bounds.contains_lat_lng(record.lat, record.lng))
        .count()
}
