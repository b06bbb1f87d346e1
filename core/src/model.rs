//! Flat record types for the four generated datasets.
//!
//! Records are created once in bulk by the generator and never mutated in
//! place; the cleaner works on a generic tabular copy (see `dataset.rs`),
//! not on these structs.

use crate::types::{Date, EntityId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: EntityId,
    pub customer_name: String,
    pub date_of_birth: Date,
    pub phone_number: String,
    pub email: String,
    pub street_address: String,
    pub state: String,
    pub post_code: String,
    pub iban: Option<String>,
    pub job: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyType {
    House,
    Car,
    Health,
    Pet,
}

impl PolicyType {
    pub const ALL: [PolicyType; 4] = [
        PolicyType::House,
        PolicyType::Car,
        PolicyType::Health,
        PolicyType::Pet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::House => "house",
            Self::Car => "car",
            Self::Health => "health",
            Self::Pet => "pet",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub policy_id: EntityId,
    pub customer_id: EntityId,
    pub policy_type: Option<PolicyType>,
    pub created_at: Option<Date>,
}

/// Per-policy tuple handed from the policy stage to the claim stage.
/// Carries the raw creation date even when the emitted `created_at` field
/// was nulled, so claim dates can still honor the ordering invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicySpan {
    pub customer_id: EntityId,
    pub policy_id: EntityId,
    pub created_at: Date,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub claim_id: EntityId,
    pub customer_id: EntityId,
    pub policy_id: EntityId,
    pub claim_date: Option<Date>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskIndicator {
    pub customer_id: EntityId,
    pub driving_violations: Option<i64>,
    pub property_risk_score: f64,
    pub health_risk_score: Option<f64>,
}
