//! Latitude/longitude coordinates wrapped around `geo::Point`.

use serde::{Deserialize, Serialize};

/// A map coordinate.
///
/// Stored as a `geo::Point` with `x = lng` and `y = lat`, but constructed and
/// read in the latitude-first order map widgets use.
///
/// # Examples
///
/// ```
/// use debox_types::LatLng;
///
/// let gwanghwamun = LatLng::new(37.5759, 126.9768);
/// assert_eq!(gwanghwamun.lat(), 37.5759);
/// assert_eq!(gwanghwamun.lng(), 126.9768);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "LatLngRepr", into = "LatLngRepr")]
pub struct LatLng {
    inner: geo::Point<f64>,
}

#[derive(Serialize, Deserialize)]
struct LatLngRepr {
    lat: f64,
    lng: f64,
}

impl From<LatLngRepr> for LatLng {
    fn from(repr: LatLngRepr) -> Self {
        Self::new(repr.lat, repr.lng)
    }
}

impl From<LatLng> for LatLngRepr {
    fn from(point: LatLng) -> Self {
        Self {
            lat: point.lat(),
            lng: point.lng(),
        }
    }
}

impl LatLng {
    /// Create a coordinate from latitude and longitude in degrees.
    #[inline]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            inner: geo::Point::new(lng, lat),
        }
    }

    /// Latitude in degrees.
    #[inline]
    pub fn lat(&self) -> f64 {
        self.inner.y()
    }

    /// Longitude in degrees.
    #[inline]
    pub fn lng(&self) -> f64 {
        self.inner.x()
    }

    /// Access the inner `geo::Point` (x = lng, y = lat).
    #[inline]
    pub fn inner(&self) -> &geo::Point<f64> {
        &self.inner
    }

    /// Straight-line distance to another coordinate, in degrees.
    ///
    /// Treats latitude and longitude as a flat plane. Good enough to rank
    /// points inside one city, wrong for anything geodesic: a degree of
    /// longitude is shorter than a degree of latitude away from the equator.
    ///
    /// ```
    /// use debox_types::LatLng;
    ///
    /// let a = LatLng::new(0.0, 0.0);
    /// let b = LatLng::new(3.0, 4.0);
    /// assert_eq!(a.planar_distance(&b), 5.0);
    /// ```
    #[inline]
    pub fn planar_distance(&self, other: &LatLng) -> f64 {
        use geo::Distance;
        geo::Euclidean.distance(self.inner, other.inner)
    }

    /// True when both components are finite and inside the WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        let (lat, lng) = (self.lat(), self.lng());
        lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng)
    }
}

impl From<geo::Point<f64>> for LatLng {
    fn from(point: geo::Point<f64>) -> Self {
        Self { inner: point }
    }
}

impl From<LatLng> for geo::Point<f64> {
    fn from(point: LatLng) -> Self {
        point.inner
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat(), self.lng())
    }
}
