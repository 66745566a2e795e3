//! Validation for loaded records.

use crate::error::RecordError;
use debox_types::PointRecord;
use std::collections::HashSet;

/// Validates a record has an id and usable coordinates.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
///
/// # Examples
///
/// ```
/// use debox::compute::validation::validate_record;
/// use debox_types::PointRecord;
///
/// assert!(validate_record(&PointRecord::new("S-1", "t", "d", 37.57, 126.97)).is_ok());
/// assert!(validate_record(&PointRecord::new("S-2", "t", "d", 126.97, 37.57)).is_err());
/// ```
pub fn validate_record(record: &PointRecord) -> Result<(), RecordError> {
    if record.id.trim().is_empty() {
        return Err(RecordError::EmptyId);
    }

    let (lat, lng) = (record.lat, record.lng);

    if !lat.is_finite() || !lng.is_finite() {
        return Err(RecordError::NonFinite {
            id: record.id.clone(),
            lat,
            lng,
        });
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(RecordError::LatitudeOutOfRange {
            id: record.id.clone(),
            lat,
        });
    }

    if !(-180.0..=180.0).contains(&lng) {
        return Err(RecordError::LongitudeOutOfRange {
            id: record.id.clone(),
            lng,
        });
    }

    Ok(())
}

/// Drops invalid records, keeping the order of the rest.
///
/// Each dropped record is logged at `warn` with `origin`. Duplicate ids are
/// kept but logged, since the first occurrence is not necessarily the right one.
pub fn sanitize_records(origin: &str, records: Vec<PointRecord>) -> Vec<PointRecord> {
    let total = records.len();
    let mut seen = HashSet::with_capacity(total);

    let kept: Vec<PointRecord> = records
        .into_iter()
        .filter(|record| match validate_record(record) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("{}: dropping record: {}", origin, e);
                false
            }
        })
        .inspect(|record| {
            if !seen.insert(record.id.clone()) {
                log::warn!("{}: duplicate record id {}", origin, record.id);
            }
        })
        .collect();

    if kept.len() < total {
        log::warn!(
            "{}: kept {} of {} records after validation",
            origin,
            kept.len(),
            total
        );
    }

    kept
}
