//! Column-level dataset cleaning.
//!
//! RULE: the cleaner never rejects a row. Missing and malformed values
//! are treated identically — converted to the declared missing
//! representation for the column type and then imputed. Cleaning always
//! succeeds and is idempotent.
//!
//! Order per table: exact-duplicate removal first, then the per-column
//! transforms for each declared categorical, numerical and date column.

use crate::dataset::{RawDatasets, Table};
use crate::types::round2;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

/// Token substituted for missing categorical values.
pub const UNKNOWN_MARKER: &str = "unknown";

/// Fallback substituted for missing or unparseable dates. Fixed across
/// the whole dataset and across runs so cleaned outputs are comparable.
pub const SENTINEL_DATE: &str = "2020-01-01";

/// Which columns of an entity are categorical, numerical and date-typed.
/// The classification is a static contract — it is never derived from
/// the data, and changing it changes the meaning of the cleaned output.
pub struct TableSpec {
    pub table: &'static str,
    pub categorical: &'static [&'static str],
    pub numerical: &'static [&'static str],
    pub date: &'static [&'static str],
}

impl TableSpec {
    /// All declared columns, in persistence order.
    pub fn columns(&self) -> Vec<&'static str> {
        self.categorical
            .iter()
            .chain(self.numerical)
            .chain(self.date)
            .copied()
            .collect()
    }
}

pub const CUSTOMERS_SPEC: TableSpec = TableSpec {
    table: "customers",
    categorical: &[
        "customer_name",
        "job",
        "customer_id",
        "phone_number",
        "email",
        "street_address",
        "state",
        "post_code",
        "iban",
    ],
    numerical: &[],
    date: &["date_of_birth"],
};

pub const POLICIES_SPEC: TableSpec = TableSpec {
    table: "policies",
    categorical: &["policy_id", "customer_id", "policy_type"],
    numerical: &[],
    date: &["created_at"],
};

pub const CLAIMS_SPEC: TableSpec = TableSpec {
    table: "claims",
    categorical: &["claim_id", "customer_id", "policy_id"],
    numerical: &[],
    date: &["claim_date"],
};

pub const RISK_INDICATORS_SPEC: TableSpec = TableSpec {
    table: "risk_indicators",
    categorical: &["customer_id"],
    numerical: &[
        "driving_violations",
        "property_risk_score",
        "health_risk_score",
    ],
    date: &[],
};

pub const ALL_SPECS: [&TableSpec; 4] = [
    &CUSTOMERS_SPEC,
    &POLICIES_SPEC,
    &CLAIMS_SPEC,
    &RISK_INDICATORS_SPEC,
];

/// The four cleaned datasets, ready for the persistence sink.
pub struct CleanDatasets {
    pub customers: Table,
    pub policies: Table,
    pub claims: Table,
    pub risk_indicators: Table,
}

/// Clean all four datasets with their fixed column classifications.
pub fn clean_all(raw: &RawDatasets) -> CleanDatasets {
    CleanDatasets {
        customers: clean_table(&raw.customers, &CUSTOMERS_SPEC),
        policies: clean_table(&raw.policies, &POLICIES_SPEC),
        claims: clean_table(&raw.claims, &CLAIMS_SPEC),
        risk_indicators: clean_table(&raw.risk_indicators, &RISK_INDICATORS_SPEC),
    }
}

/// Normalize a single table. The input is left untouched; a cleaned copy
/// is returned.
pub fn clean_table(rows: &Table, spec: &TableSpec) -> Table {
    let mut rows = dedup_rows(rows);
    for &col in spec.categorical {
        clean_categorical(&mut rows, col);
    }
    for &col in spec.numerical {
        clean_numerical(&mut rows, col);
    }
    for &col in spec.date {
        clean_date(&mut rows, col);
    }
    rows
}

/// Remove exact whole-row duplicates, keeping first occurrences.
fn dedup_rows(rows: &Table) -> Table {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        // Key on sorted column names so the comparison is insensitive to
        // object key order in the source JSON.
        let canonical: BTreeMap<&String, &Value> = row.iter().collect();
        let key = serde_json::to_string(&canonical).unwrap_or_default();
        if seen.insert(key) {
            out.push(row.clone());
        }
    }
    out
}

/// Missing → "unknown"; present values trimmed and lowercased.
fn clean_categorical(rows: &mut Table, col: &str) {
    for row in rows.iter_mut() {
        let cleaned = match row.get(col) {
            Some(Value::String(s)) => s.trim().to_lowercase(),
            Some(Value::Null) | None => UNKNOWN_MARKER.to_string(),
            // Non-string scalars (a bare numeric postcode, say) are kept
            // as their canonical text form.
            Some(other) => other.to_string().trim().to_lowercase(),
        };
        row.insert(col.to_string(), Value::String(cleaned));
    }
}

/// Coerce every cell first, then compute the column mean over the valid
/// values only, then impute. The order matters: imputed values must not
/// influence the mean.
fn clean_numerical(rows: &mut Table, col: &str) {
    let coerced: Vec<Option<f64>> = rows
        .iter()
        .map(|row| row.get(col).and_then(coerce_numeric))
        .collect();

    let valid: Vec<f64> = coerced.iter().flatten().copied().collect();
    let fill = if valid.is_empty() {
        // A column with nothing coercible has no mean; fill with 0.0 so
        // the cleaned output still has no nulls in declared columns.
        0.0
    } else {
        round2(valid.iter().sum::<f64>() / valid.len() as f64)
    };

    for (row, value) in rows.iter_mut().zip(coerced) {
        row.insert(col.to_string(), json_number(value.unwrap_or(fill)));
    }
}

/// Unparseable or missing dates resolve to the fixed sentinel.
fn clean_date(rows: &mut Table, col: &str) {
    for row in rows.iter_mut() {
        let cleaned = row
            .get(col)
            .and_then(parse_date)
            .unwrap_or_else(|| SENTINEL_DATE.to_string());
        row.insert(col.to_string(), Value::String(cleaned));
    }
}

fn coerce_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        // Strings like "NaN" or "inf" parse, but a non-finite value would
        // poison the column mean; treat them as missing instead.
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Accepts ISO dates and ISO datetimes (date part kept); returns the
/// normalized `YYYY-MM-DD` form.
fn parse_date(value: &Value) -> Option<String> {
    let s = value.as_str()?.trim();
    if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.to_string());
    }
    if let Ok(datetime) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(datetime.date().to_string());
    }
    None
}

fn json_number(v: f64) -> Value {
    // Coercion only yields finite values, so from_f64 cannot fail here.
    serde_json::Number::from_f64(v)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerce_accepts_numbers_and_numeric_strings() {
        assert_eq!(coerce_numeric(&json!(3)), Some(3.0));
        assert_eq!(coerce_numeric(&json!(" 2.5 ")), Some(2.5));
        assert_eq!(coerce_numeric(&json!("seven")), None);
        assert_eq!(coerce_numeric(&Value::Null), None);
    }

    #[test]
    fn coerce_rejects_non_finite_strings() {
        assert_eq!(coerce_numeric(&json!("NaN")), None);
        assert_eq!(coerce_numeric(&json!("inf")), None);
        assert_eq!(coerce_numeric(&json!("-inf")), None);
        assert_eq!(coerce_numeric(&json!("Infinity")), None);
    }

    #[test]
    fn parse_date_normalizes_datetimes() {
        assert_eq!(
            parse_date(&json!("2021-05-04T13:45:00")).as_deref(),
            Some("2021-05-04")
        );
        assert_eq!(parse_date(&json!("04/05/2021")), None);
    }

    #[test]
    fn round2_matches_imputation_precision() {
        assert_eq!(round2(7.0 / 3.0), 2.33);
    }
}
