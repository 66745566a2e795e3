//! Pure viewport computations and record validation.

pub mod selection;
pub mod validation;

pub use selection::{Nearby, count_within, rank_nearest, select_nearest};
pub use validation::{sanitize_records, validate_record};
