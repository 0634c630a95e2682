//! JSON serialization for measurement records.

use crate::session::MeasurementRecord;

/// Serialize a record to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for
/// `MeasurementRecord`).
pub fn record_to_json(record: &MeasurementRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string(record)
}

/// Serialize a record to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for
/// `MeasurementRecord`).
pub fn record_to_json_pretty(record: &MeasurementRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(record)
}
