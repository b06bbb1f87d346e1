//! Shared primitive types used across the entire pipeline.

/// A stable, unique identifier for any generated entity
/// (`C-<uuid>`, `P-<uuid>`, `CL-<uuid>`).
pub type EntityId = String;

/// Calendar date used throughout the datasets. No time component:
/// everything is serialized as ISO-8601 `YYYY-MM-DD`.
pub type Date = chrono::NaiveDate;

/// Round to 2 decimal places — the precision used for risk scores and
/// for numeric imputation.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
