//! # debox-types
//!
//! Core data types for the debox map viewer.
//!
//! - **Coordinates**: [`LatLng`], a latitude/longitude pair on top of `geo::Point`
//! - **Bounds**: [`Bounds`], the visible south/west/north/east rectangle of a map
//! - **Records**: [`PointRecord`], one box entry, and [`Category`], the dataset it belongs to
//!
//! All types are serializable with Serde and built on top of the `geo` crate's
//! geometric primitives.
//!
//! ## Examples
//!
//! ```rust
//! use debox_types::{Bounds, LatLng};
//!
//! let gwanghwamun = LatLng::new(37.5759, 126.9768);
//! let downtown = Bounds::from_corners(LatLng::new(37.55, 126.95), LatLng::new(37.60, 127.00));
//! assert!(downtown.contains(&gwanghwamun));
//! ```

pub mod bbox;
pub mod geo;
pub mod record;

pub use bbox::Bounds;
pub use self::geo::LatLng;
pub use record::{Category, PointRecord};
