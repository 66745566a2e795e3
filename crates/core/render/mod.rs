//! Turning a dataset and a viewport into markers and a visible count.

pub mod marker;
pub mod surface;

pub use marker::{DetailPayload, InfoWindow, Marker, MarkerImage};
pub use surface::{HeadlessMap, MapSurface, StatusDisplay, StatusLine, Viewport};

use crate::compute::{count_within, select_nearest};
use crate::config::Config;
use debox_types::{Bounds, Category, LatLng, PointRecord};

/// What one refresh did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct RefreshSummary {
    /// Markers placed, at most the renderer's cap
    pub placed: usize,
    /// Records inside the viewport bounds, placed or not
    pub visible: usize,
}

/// Selects and places the markers for a viewport.
///
/// Every refresh clears the surface and places the whole selection again;
/// the previous marker set is never patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportRenderer {
    max_markers: usize,
}

impl Default for ViewportRenderer {
    fn default() -> Self {
        Self::new(Config::MAX_MARKERS)
    }
}

impl ViewportRenderer {
    pub fn new(max_markers: usize) -> Self {
        Self { max_markers }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_markers)
    }

    pub fn max_markers(&self) -> usize {
        self.max_markers
    }

    /// Closest records to `center`, capped at `max_markers`.
    pub fn select_nearest<'a>(&self, center: &LatLng, dataset: &'a [PointRecord]) -> Vec<&'a PointRecord> {
        select_nearest(center, dataset, self.max_markers)
    }

    pub fn count_within(&self, bounds: &Bounds, dataset: &[PointRecord]) -> usize {
        count_within(bounds, dataset)
    }

    /// Redraw `map` for `viewport` and report the visible count.
    ///
    /// `category` is the dataset's category: it picks the marker image and
    /// the label written to `display`.
    pub fn refresh<M, D>(
        &self,
        viewport: &Viewport,
        dataset: &[PointRecord],
        category: Category,
        map: &mut M,
        display: &mut D,
    ) -> RefreshSummary
    where
        M: MapSurface + ?Sized,
        D: StatusDisplay + ?Sized,
    {
        let selection = self.select_nearest(&viewport.center, dataset);

        map.clear_markers();
        for record in &selection {
            map.place_marker(Marker::for_record(record, category));
        }

        let visible = self.count_within(&viewport.bounds, dataset);
        display.set_visible_count(visible);
        display.set_category_label(category.label());

        log::debug!(
            "refresh {} at {}: placed {} of {}, {} visible",
            category,
            viewport.center,
            selection.len(),
            dataset.len(),
            visible
        );

        RefreshSummary {
            placed: selection.len(),
            visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Surface that records every call in order.
    #[derive(Default)]
    struct CallLog {
        calls: Vec<String>,
        center: Option<LatLng>,
    }

    impl MapSurface for CallLog {
        fn center(&self) -> LatLng {
            self.center.unwrap_or(LatLng::new(0.0, 0.0))
        }

        fn bounds(&self) -> Bounds {
            Bounds::new(-1.0, -1.0, 1.0, 1.0)
        }

        fn clear_markers(&mut self) {
            self.calls.push("clear".to_string());
        }

        fn place_marker(&mut self, marker: Marker) {
            self.calls.push(format!("place {}", marker.id()));
        }

        fn set_center(&mut self, center: LatLng) {
            self.center = Some(center);
        }

        fn set_level(&mut self, _level: u8) {}
    }

    fn records(n: usize) -> Vec<PointRecord> {
        (0..n)
            .map(|i| PointRecord::new(format!("r{i}"), "t", "d", i as f64 * 0.01, 0.0))
            .collect()
    }

    #[test]
    fn test_refresh_clears_then_places_nearest() {
        let renderer = ViewportRenderer::new(3);
        let mut map = CallLog::default();
        let mut status = StatusLine::default();
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), Bounds::new(-1.0, -1.0, 0.045, 1.0));

        let summary = renderer.refresh(&viewport, &records(10), Category::Snow, &mut map, &mut status);

        assert_eq!(map.calls, vec!["clear", "place r0", "place r1", "place r2"]);
        assert_eq!(summary, RefreshSummary { placed: 3, visible: 5 });
        assert_eq!(status.visible_count, 5);
        assert_eq!(status.label, "제설함");
    }

    #[test]
    fn test_refresh_replaces_previous_markers() {
        let renderer = ViewportRenderer::default();
        let mut map = HeadlessMap::around(LatLng::new(0.0, 0.0), 1.0, 5);
        let mut status = StatusLine::default();
        let data = records(250);

        renderer.refresh(&map.viewport(), &data, Category::Snow, &mut map, &mut status);
        assert_eq!(map.markers().len(), 200);

        renderer.refresh(&map.viewport(), &data[..5], Category::Calcium, &mut map, &mut status);
        assert_eq!(map.markers().len(), 5);
        assert!(map.markers().iter().all(|m| m.image != MarkerImage::Default));
        assert_eq!(status.label, "염화칼슘보관함");
    }

    #[test]
    fn test_refresh_empty_dataset() {
        let renderer = ViewportRenderer::default();
        let mut map = HeadlessMap::around(LatLng::new(37.5, 127.0), 0.1, 5);
        let mut status = StatusLine::default();

        let summary = renderer.refresh(&map.viewport(), &[], Category::Calcium, &mut map, &mut status);
        assert_eq!(summary, RefreshSummary { placed: 0, visible: 0 });
        assert!(map.markers().is_empty());
        assert_eq!(status.label, "염화칼슘보관함");
    }
}
