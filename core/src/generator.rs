//! Synthetic dataset generation.
//!
//! Referential consistency is enforced structurally: policies are derived
//! from the generated customer id list and claims from the generated
//! policy spans, so a foreign-key field can never reference a missing
//! record. Likewise, claim dates are drawn from [policy creation date,
//! today], which keeps the date-ordering invariant by construction even
//! when the policy's own `created_at` was nulled in the output.
//!
//! Each stage draws from its own RNG stream (see `rng.rs`); "today" is
//! injected rather than read from the wall clock, so a fixed master seed
//! reproduces the datasets byte for byte.

use crate::{
    config::GeneratorConfig,
    faker::SpanishFaker,
    model::{Claim, Customer, Policy, PolicySpan, PolicyType, RiskIndicator},
    rng::StageRng,
    types::{round2, Date, EntityId},
};

pub struct DatasetGenerator {
    config: GeneratorConfig,
    today: Date,
}

impl DatasetGenerator {
    pub fn new(config: GeneratorConfig, today: Date) -> Self {
        Self { config, today }
    }

    /// Generate N unique customers plus their identifier list for the
    /// downstream stages. Fields are independent per record.
    pub fn generate_customers(&self, rng: &mut StageRng) -> (Vec<Customer>, Vec<EntityId>) {
        let n = self.config.customer_count;
        let mut customers = Vec::with_capacity(n);
        let mut customer_ids = Vec::with_capacity(n);

        for _ in 0..n {
            let customer_id = prefixed_uuid(rng, "C");
            customer_ids.push(customer_id.clone());

            let customer_name = SpanishFaker::full_name(rng);
            let email = SpanishFaker::email(rng, &customer_name);
            customers.push(Customer {
                customer_id,
                customer_name,
                date_of_birth: SpanishFaker::date_of_birth(rng, self.today),
                phone_number: SpanishFaker::phone_number(rng),
                email,
                street_address: SpanishFaker::street_address(rng),
                state: SpanishFaker::state(rng).to_string(),
                post_code: SpanishFaker::post_code(rng),
                iban: self.nullable(rng, |rng| SpanishFaker::iban(rng)),
                job: SpanishFaker::job(rng).to_string(),
            });
        }
        (customers, customer_ids)
    }

    /// Generate policies for each customer: a uniform count in
    /// [min, max], each with a nullable type and a creation date drawn
    /// uniformly from the lookback window. Returns the policy list plus
    /// the per-policy spans consumed by the claim stage.
    pub fn generate_policies(
        &self,
        rng: &mut StageRng,
        customer_ids: &[EntityId],
    ) -> (Vec<Policy>, Vec<PolicySpan>) {
        let window_start = self.lookback_start();
        let mut policies = Vec::new();
        let mut spans = Vec::new();

        for customer_id in customer_ids {
            let count = rng.range_i64(
                self.config.min_policies_per_customer as i64,
                self.config.max_policies_per_customer as i64,
            );
            for _ in 0..count {
                let policy_id = prefixed_uuid(rng, "P");
                let created_at = date_between(rng, window_start, self.today);

                spans.push(PolicySpan {
                    customer_id: customer_id.clone(),
                    policy_id: policy_id.clone(),
                    created_at,
                });
                policies.push(Policy {
                    policy_id,
                    customer_id: customer_id.clone(),
                    policy_type: self.nullable(rng, pick_policy_type),
                    created_at: self.nullable(rng, |_| created_at),
                });
            }
        }
        (policies, spans)
    }

    /// Generate claims for each policy span. The claim count follows the
    /// configured weighted distribution (heavily skewed toward zero); the
    /// claim date is drawn from [policy creation date, today].
    pub fn generate_claims(&self, rng: &mut StageRng, spans: &[PolicySpan]) -> Vec<Claim> {
        let mut claims = Vec::new();

        for span in spans {
            let count = rng.weighted_index(&self.config.claim_count_weights);
            for _ in 0..count {
                let claim_date = date_between(rng, span.created_at, self.today);
                claims.push(Claim {
                    claim_id: prefixed_uuid(rng, "CL"),
                    customer_id: span.customer_id.clone(),
                    policy_id: span.policy_id.clone(),
                    claim_date: self.nullable(rng, |_| claim_date),
                });
            }
        }
        claims
    }

    /// Generate exactly one risk indicator per customer, fields sampled
    /// independently with their own null-injection draws.
    pub fn generate_risk_indicators(
        &self,
        rng: &mut StageRng,
        customer_ids: &[EntityId],
    ) -> Vec<RiskIndicator> {
        customer_ids
            .iter()
            .map(|customer_id| RiskIndicator {
                customer_id: customer_id.clone(),
                driving_violations: self.nullable(rng, |rng| rng.range_i64(0, 10)),
                property_risk_score: round2(rng.next_f64() * 10.0),
                health_risk_score: self.nullable(rng, |rng| round2(rng.next_f64() * 10.0)),
            })
            .collect()
    }

    /// Earliest allowed policy creation date.
    fn lookback_start(&self) -> Date {
        self.today
            .checked_sub_months(chrono::Months::new(12 * self.config.policy_lookback_years))
            .unwrap_or(self.today)
    }

    /// Null-injection: produce the value, then drop it with probability
    /// `null_rate`. The value is generated first so the RNG stream stays
    /// identical regardless of the null draw's outcome.
    fn nullable<T>(&self, rng: &mut StageRng, produce: impl FnOnce(&mut StageRng) -> T) -> Option<T> {
        let value = produce(rng);
        if rng.chance(self.config.null_rate) {
            None
        } else {
            Some(value)
        }
    }
}

fn pick_policy_type(rng: &mut StageRng) -> PolicyType {
    PolicyType::ALL[rng.next_u64_below(PolicyType::ALL.len() as u64) as usize]
}

/// A date drawn uniformly from [start, end], both ends inclusive.
fn date_between(rng: &mut StageRng, start: Date, end: Date) -> Date {
    let span_days = (end - start).num_days().max(0);
    start + chrono::Duration::days(rng.range_i64(0, span_days))
}

/// A prefixed id such as `C-9f1c...`. The UUID bytes come from the stage
/// RNG stream (never the platform RNG), with version/variant bits set so
/// ids look like ordinary v4 UUIDs while staying reproducible.
fn prefixed_uuid(rng: &mut StageRng, prefix: &str) -> String {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    let id = uuid::Builder::from_random_bytes(bytes).into_uuid();
    format!("{prefix}-{id}")
}
