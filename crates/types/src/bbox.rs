use crate::geo::LatLng;
use geo::Rect;
use serde::{Deserialize, Serialize};

/// The visible rectangle of a map viewport.
///
/// Addressed the way map widgets report it: a south-west and a north-east
/// corner, or the four edges south/west/north/east. Stored as a `geo::Rect`
/// with `x = lng` and `y = lat`.
///
/// All edges are inclusive: a point lying exactly on an edge is inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// The underlying geometric rectangle
    pub rect: Rect,
}

impl Bounds {
    /// Create bounds from the four edges.
    ///
    /// Edges given in the wrong order are swapped, so `south`/`north` and
    /// `west`/`east` always end up as min/max. Use [`Bounds::try_new`] to
    /// reject inverted input instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use debox_types::Bounds;
    ///
    /// let seoul = Bounds::new(37.0, 126.0, 38.0, 127.0);
    /// assert_eq!(seoul.south(), 37.0);
    /// assert_eq!(seoul.east(), 127.0);
    /// ```
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            rect: Rect::new(
                geo::coord! { x: west, y: south },
                geo::coord! { x: east, y: north },
            ),
        }
    }

    /// Create bounds from the four edges, returning `None` if any edge is
    /// non-finite or if `south > north` or `west > east`.
    pub fn try_new(south: f64, west: f64, north: f64, east: f64) -> Option<Self> {
        let finite = [south, west, north, east].iter().all(|v| v.is_finite());
        if !finite || south > north || west > east {
            return None;
        }
        Some(Self::new(south, west, north, east))
    }

    /// Create bounds from the south-west and north-east corners.
    pub fn from_corners(south_west: LatLng, north_east: LatLng) -> Self {
        Self::new(
            south_west.lat(),
            south_west.lng(),
            north_east.lat(),
            north_east.lng(),
        )
    }

    /// Create bounds from a `geo::Rect`.
    pub fn from_rect(rect: Rect) -> Self {
        Self { rect }
    }

    /// Minimum latitude.
    pub fn south(&self) -> f64 {
        self.rect.min().y
    }

    /// Minimum longitude.
    pub fn west(&self) -> f64 {
        self.rect.min().x
    }

    /// Maximum latitude.
    pub fn north(&self) -> f64 {
        self.rect.max().y
    }

    /// Maximum longitude.
    pub fn east(&self) -> f64 {
        self.rect.max().x
    }

    pub fn south_west(&self) -> LatLng {
        LatLng::new(self.south(), self.west())
    }

    pub fn north_east(&self) -> LatLng {
        LatLng::new(self.north(), self.east())
    }

    /// Get the center point of the bounds.
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south() + self.north()) / 2.0,
            (self.west() + self.east()) / 2.0,
        )
    }

    /// Check if a coordinate lies inside, edges included.
    pub fn contains(&self, point: &LatLng) -> bool {
        self.contains_lat_lng(point.lat(), point.lng())
    }

    /// Same as [`Bounds::contains`] for raw degrees.
    #[inline]
    pub fn contains_lat_lng(&self, lat: f64, lng: f64) -> bool {
        lat >= self.south() && lat <= self.north() && lng >= self.west() && lng <= self.east()
    }

    /// Check if these bounds fully enclose another.
    pub fn encloses(&self, other: &Bounds) -> bool {
        self.south() <= other.south()
            && self.west() <= other.west()
            && self.north() >= other.north()
            && self.east() >= other.east()
    }

    /// Expand the bounds by a given amount of degrees in all directions.
    pub fn expand(&self, amount: f64) -> Self {
        Self::new(
            self.south() - amount,
            self.west() - amount,
            self.north() + amount,
            self.east() + amount,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_edges() {
        let bounds = Bounds::new(37.0, 126.0, 38.0, 127.0);
        assert_eq!(bounds.south(), 37.0);
        assert_eq!(bounds.west(), 126.0);
        assert_eq!(bounds.north(), 38.0);
        assert_eq!(bounds.east(), 127.0);
        assert_eq!(bounds.south_west(), LatLng::new(37.0, 126.0));
        assert_eq!(bounds.north_east(), LatLng::new(38.0, 127.0));
    }

    #[test]
    fn test_bounds_center() {
        let bounds = Bounds::new(0.0, 0.0, 10.0, 20.0);
        let center = bounds.center();
        assert_eq!(center.lat(), 5.0);
        assert_eq!(center.lng(), 10.0);
    }

    #[test]
    fn test_bounds_contains_is_inclusive() {
        let bounds = Bounds::new(37.0, 126.0, 38.0, 127.0);
        assert!(bounds.contains(&LatLng::new(37.5, 126.5)));
        assert!(bounds.contains(&LatLng::new(38.0, 126.5)));
        assert!(bounds.contains(&LatLng::new(37.0, 126.0)));
        assert!(bounds.contains(&LatLng::new(38.0, 127.0)));
        assert!(!bounds.contains(&LatLng::new(38.5, 126.5)));
        assert!(!bounds.contains(&LatLng::new(37.5, 125.9)));
    }

    #[test]
    fn test_bounds_swaps_inverted_edges() {
        let bounds = Bounds::new(38.0, 127.0, 37.0, 126.0);
        assert_eq!(bounds.south(), 37.0);
        assert_eq!(bounds.east(), 127.0);
    }

    #[test]
    fn test_try_new_rejects_inverted_and_nan() {
        assert!(Bounds::try_new(37.0, 126.0, 38.0, 127.0).is_some());
        assert!(Bounds::try_new(38.0, 126.0, 37.0, 127.0).is_none());
        assert!(Bounds::try_new(37.0, 127.0, 38.0, 126.0).is_none());
        assert!(Bounds::try_new(f64::NAN, 126.0, 38.0, 127.0).is_none());
        // Degenerate single-point bounds are allowed.
        assert!(Bounds::try_new(37.0, 126.0, 37.0, 126.0).is_some());
    }

    #[test]
    fn test_bounds_expand_encloses() {
        let bounds = Bounds::new(37.0, 126.0, 38.0, 127.0);
        let expanded = bounds.expand(0.5);
        assert_eq!(expanded.south(), 36.5);
        assert_eq!(expanded.east(), 127.5);
        assert!(expanded.encloses(&bounds));
        assert!(!bounds.encloses(&expanded));
    }
}
