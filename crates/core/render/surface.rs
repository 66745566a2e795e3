//! The narrow interface the core uses to talk to a map widget.
//!
//! A real widget (a JavaScript map SDK, a native map view) sits behind
//! [`MapSurface`] and [`StatusDisplay`]. Its idle/settled callback calls
//! back into [`crate::Viewer`] instead of the core registering closures.

use super::marker::Marker;
use debox_types::{Bounds, LatLng};
use serde::{Deserialize, Serialize};

/// Center and visible rectangle of a map at rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: LatLng,
    pub bounds: Bounds,
}

impl Viewport {
    pub fn new(center: LatLng, bounds: Bounds) -> Self {
        Self { center, bounds }
    }
}

pub trait MapSurface {
    fn center(&self) -> LatLng;

    fn bounds(&self) -> Bounds;

    /// Remove every marker placed so far.
    fn clear_markers(&mut self);

    fn place_marker(&mut self, marker: Marker);

    fn set_center(&mut self, center: LatLng);

    /// Set the zoom level (lower is closer).
    fn set_level(&mut self, level: u8);

    fn viewport(&self) -> Viewport {
        Viewport::new(self.center(), self.bounds())
    }
}

/// Text outputs next to the map.
pub trait StatusDisplay {
    fn set_visible_count(&mut self, count: usize);

    fn set_category_label(&mut self, label: &str);
}

/// A map surface that only keeps state in memory.
///
/// Used by the HTTP API to collect markers for a response, and anywhere a
/// viewer runs without a widget. Recentering moves the bounds with the
/// center; each zoom level doubles or halves the span.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessMap {
    center: LatLng,
    bounds: Bounds,
    level: u8,
    markers: Vec<Marker>,
}

impl HeadlessMap {
    pub fn new(viewport: Viewport, level: u8) -> Self {
        Self {
            center: viewport.center,
            bounds: viewport.bounds,
            level,
            markers: Vec::new(),
        }
    }

    /// A map centered on `center` showing `half_span` degrees each way.
    pub fn around(center: LatLng, half_span: f64, level: u8) -> Self {
        let bounds = Bounds::new(
            center.lat() - half_span,
            center.lng() - half_span,
            center.lat() + half_span,
            center.lng() + half_span,
        );
        Self::new(Viewport::new(center, bounds), level)
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn into_markers(self) -> Vec<Marker> {
        self.markers
    }
}

impl MapSurface for HeadlessMap {
    fn center(&self) -> LatLng {
        self.center
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
    }

    fn place_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    fn set_center(&mut self, center: LatLng) {
        let d_lat = center.lat() - self.center.lat();
        let d_lng = center.lng() - self.center.lng();
        self.bounds = Bounds::new(
            self.bounds.south() + d_lat,
            self.bounds.west() + d_lng,
            self.bounds.north() + d_lat,
            self.bounds.east() + d_lng,
        );
        self.center = center;
    }

    fn set_level(&mut self, level: u8) {
        let scale = 2f64.powi(i32::from(level) - i32::from(self.level));
        let half_lat = (self.bounds.north() - self.bounds.south()) / 2.0 * scale;
        let half_lng = (self.bounds.east() - self.bounds.west()) / 2.0 * scale;
        self.bounds = Bounds::new(
            self.center.lat() - half_lat,
            self.center.lng() - half_lng,
            self.center.lat() + half_lat,
            self.center.lng() + half_lng,
        );
        self.level = level;
    }
}

/// The last values written to the status outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    pub visible_count: usize,
    pub label: String,
}

impl StatusDisplay for StatusLine {
    fn set_visible_count(&mut self, count: usize) {
        self.visible_count = count;
    }

    fn set_category_label(&mut self, label: &str) {
        self.label.clear();
        self.label.push_str(label);
    }
}
