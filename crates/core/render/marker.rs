//! Marker descriptions handed to the map surface.

use debox_types::{Category, LatLng, PointRecord};
use serde::Serialize;

const STAR_MARKER_SRC: &str =
    "https://t1.daumcdn.net/localimg/localimages/07/mapapidoc/markerStar.png";

/// Which image the map should draw for a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerImage {
    /// The map widget's built-in pin
    Default,
    Sprite {
        src: &'static str,
        width: u32,
        height: u32,
    },
}

impl MarkerImage {
    /// Calcium boxes get the star sprite so the two categories look different.
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Snow => Self::Default,
            Category::Calcium => Self::Sprite {
                src: STAR_MARKER_SRC,
                width: 24,
                height: 35,
            },
        }
    }
}

/// What the detail popup shows for a marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailPayload {
    pub title: String,
    pub dept: String,
    pub id: String,
    pub kind_label: &'static str,
}

/// One marker to place on the map.
///
/// Carries only the payload of its popup. The popup itself is built by
/// [`Marker::open`] when the user interacts with the marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub position: LatLng,
    pub title: String,
    pub image: MarkerImage,
    pub detail: DetailPayload,
}

impl Marker {
    /// Describe the marker for `record` shown under `category`.
    ///
    /// The popup label follows the record's own `type` tag when it names a
    /// known category, and the displayed category otherwise.
    pub fn for_record(record: &PointRecord, category: Category) -> Self {
        let kind = record.tagged_category().unwrap_or(category);
        Self {
            position: record.position(),
            title: record.title.clone(),
            image: MarkerImage::for_category(category),
            detail: DetailPayload {
                title: record.title.clone(),
                dept: record.dept.clone(),
                id: record.id.clone(),
                kind_label: kind.label(),
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.detail.id
    }

    /// Build the popup for this marker.
    pub fn open(&self) -> InfoWindow {
        InfoWindow::for_detail(&self.detail)
    }
}

/// Rendered popup content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoWindow {
    pub content: String,
    pub removable: bool,
}

impl InfoWindow {
    pub fn for_detail(detail: &DetailPayload) -> Self {
        let content = format!(
            concat!(
                r#"<div style="padding:10px; min-width:200px;">"#,
                r#"<h3 style="margin:0 0 8px 0; font-size:14px; font-weight:bold; color:#333;">{title}</h3>"#,
                r#"<p style="margin:0; font-size:12px; color:#666;"><strong>종류:</strong> {kind}</p>"#,
                r#"<p style="margin:4px 0 0 0; font-size:12px; color:#666;"><strong>관리:</strong> {dept}</p>"#,
                r#"<p style="margin:4px 0 0 0; font-size:11px; color:#999;">ID: {id}</p>"#,
                "</div>"
            ),
            title = escape_html(&detail.title),
            kind = escape_html(detail.kind_label),
            dept = escape_html(&detail.dept),
            id = escape_html(&detail.id),
        );
        Self {
            content,
            removable: true,
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_image_per_category() {
        assert_eq!(MarkerImage::for_category(Category::Snow), MarkerImage::Default);
        assert!(matches!(
            MarkerImage::for_category(Category::Calcium),
            MarkerImage::Sprite {
                width: 24,
                height: 35,
                ..
            }
        ));
    }

    #[test]
    fn test_kind_label_prefers_record_tag() {
        let tagged = PointRecord::new("c1", "t", "d", 37.0, 127.0).with_kind("calcium");
        let marker = Marker::for_record(&tagged, Category::Snow);
        assert_eq!(marker.detail.kind_label, "염화칼슘보관함");
        assert_eq!(marker.image, MarkerImage::Default);

        let untagged = PointRecord::new("s1", "t", "d", 37.0, 127.0);
        let marker = Marker::for_record(&untagged, Category::Calcium);
        assert_eq!(marker.detail.kind_label, "염화칼슘보관함");

        let marker = Marker::for_record(&untagged, Category::Snow);
        assert_eq!(marker.detail.kind_label, "제설함");
        assert_eq!(marker.id(), "s1");
    }

    #[test]
    fn test_marker_json_has_no_popup_content() {
        let record = PointRecord::new("s1", "t", "d", 37.0, 127.0);
        let json = serde_json::to_value(Marker::for_record(&record, Category::Snow)).unwrap();
        assert!(json.get("content").is_none());
        assert_eq!(json["detail"]["id"], "s1");
        assert_eq!(json["image"]["kind"], "default");
    }

    #[test]
    fn test_open_escapes_fields() {
        let record = PointRecord::new("x\"1", "<b>Box</b>", "A & B", 37.0, 127.0);
        let window = Marker::for_record(&record, Category::Snow).open();
        assert!(window.removable);
        assert!(window.content.contains("&lt;b&gt;Box&lt;/b&gt;"));
        assert!(window.content.contains("A &amp; B"));
        assert!(window.content.contains("ID: x&quot;1"));
        assert!(window.content.contains("제설함"));
        assert!(!window.content.contains("<b>"));
    }
}
