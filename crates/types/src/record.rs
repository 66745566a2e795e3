//! Point-of-interest records and the categories they are grouped in.

use crate::geo::LatLng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The dataset a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Snow-removal equipment boxes
    #[default]
    Snow,
    /// Calcium-chloride storage boxes
    Calcium,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Snow, Category::Calcium];

    /// Wire name, as used in JSON `type` tags and query strings.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Snow => "snow",
            Self::Calcium => "calcium",
        }
    }

    /// Human-readable label shown next to the visible count.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Snow => "제설함",
            Self::Calcium => "염화칼슘보관함",
        }
    }

    /// Look up a category by its wire name.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == tag)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}', expected 'snow' or 'calcium'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s.trim()).ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// One box entry as published in the `items` array of a dataset document.
///
/// ```
/// use debox_types::PointRecord;
///
/// let json = r#"{"id":"S-001","title":"세종로 제설함","dept":"종로구청","lat":37.57,"lng":126.97}"#;
/// let record: PointRecord = serde_json::from_str(json).unwrap();
/// assert_eq!(record.kind, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    /// Identifier, unique within its dataset
    pub id: String,
    /// Display title
    pub title: String,
    /// Owning department
    pub dept: String,
    pub lat: f64,
    pub lng: f64,
    /// Category tag, only present in datasets that tag their records
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl PointRecord {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        dept: impl Into<String>,
        lat: f64,
        lng: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            dept: dept.into(),
            lat,
            lng,
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[inline]
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// The category named by the record's own `type` tag, if it names one.
    pub fn tagged_category(&self) -> Option<Category> {
        self.kind.as_deref().and_then(Category::from_tag)
    }

    /// Convert to a GeoJSON feature with the record fields as properties.
    ///
    /// ```
    /// # #[cfg(feature = "geojson")]
    /// # {
    /// use debox_types::PointRecord;
    ///
    /// let feature = PointRecord::new("S-1", "box", "dept", 37.5, 126.9).to_feature();
    /// let json = serde_json::to_string(&feature).unwrap();
    /// assert!(json.contains("\"coordinates\":[126.9,37.5]"));
    /// # }
    /// ```
    #[cfg(feature = "geojson")]
    pub fn to_feature(&self) -> geojson::Feature {
        use geojson::{Feature, Geometry, JsonObject, Value, feature::Id};

        let mut properties = JsonObject::new();
        properties.insert("title".to_string(), self.title.clone().into());
        properties.insert("dept".to_string(), self.dept.clone().into());
        if let Some(kind) = &self.kind {
            properties.insert("type".to_string(), kind.clone().into());
        }

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![self.lng, self.lat]))),
            id: Some(Id::String(self.id.clone())),
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

/// Collect records into a GeoJSON feature collection, preserving order.
#[cfg(feature = "geojson")]
pub fn to_feature_collection<'a, I>(records: I) -> geojson::FeatureCollection
where
    I: IntoIterator<Item = &'a PointRecord>,
{
    geojson::FeatureCollection {
        bbox: None,
        features: records.into_iter().map(PointRecord::to_feature).collect(),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names_and_labels() {
        assert_eq!(Category::Snow.as_str(), "snow");
        assert_eq!(Category::Calcium.as_str(), "calcium");
        assert_eq!(Category::Snow.label(), "제설함");
        assert_eq!(Category::Calcium.label(), "염화칼슘보관함");
        assert_eq!(Category::default(), Category::Snow);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("calcium".parse::<Category>(), Ok(Category::Calcium));
        assert_eq!(" snow ".parse::<Category>(), Ok(Category::Snow));
        assert!("salt".parse::<Category>().is_err());
    }

    #[test]
    fn test_record_type_tag() {
        let json = r#"{"id":"C-9","title":"t","dept":"d","lat":37.1,"lng":127.2,"type":"calcium"}"#;
        let record: PointRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind.as_deref(), Some("calcium"));
        assert_eq!(record.tagged_category(), Some(Category::Calcium));
        assert_eq!(record.position(), LatLng::new(37.1, 127.2));

        let untagged = PointRecord::new("S-1", "t", "d", 0.0, 0.0);
        assert_eq!(untagged.tagged_category(), None);
        assert_eq!(untagged.with_kind("gravel").tagged_category(), None);
    }

    #[test]
    fn test_record_serializes_without_empty_tag() {
        let record = PointRecord::new("S-1", "t", "d", 1.0, 2.0);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("type").is_none());
    }

    #[cfg(feature = "geojson")]
    #[test]
    fn test_feature_collection_keeps_order() {
        let records = vec![
            PointRecord::new("a", "A", "d", 1.0, 2.0),
            PointRecord::new("b", "B", "d", 3.0, 4.0).with_kind("snow"),
        ];
        let collection = to_feature_collection(&records);
        assert_eq!(collection.features.len(), 2);
        assert_eq!(
            collection.features[0].id,
            Some(geojson::feature::Id::String("a".into()))
        );
        let props = collection.features[1].properties.as_ref().unwrap();
        assert_eq!(props["type"], "snow");
    }
}
