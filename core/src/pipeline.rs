//! Batch pipeline entry points.
//!
//! Two independent jobs compose the system:
//!   generate — synthesize the four datasets and save them as JSON;
//!   load     — ingest the JSON, clean it, and persist it to the sink.
//!
//! Both are single-pass, single-threaded, whole-dataset batch jobs: no
//! retries, no resume, no streaming.

use crate::{
    clean::{clean_all, CLAIMS_SPEC, CUSTOMERS_SPEC, POLICIES_SPEC, RISK_INDICATORS_SPEC},
    config::GeneratorConfig,
    dataset::{
        ingest, save_json, CLAIMS_FILE, CUSTOMERS_FILE, POLICIES_FILE, RISK_INDICATORS_FILE,
    },
    error::PipelineResult,
    generator::DatasetGenerator,
    rng::{RngBank, StageSlot},
    store::{ProvisionOutcome, SinkStore},
    types::Date,
};
use log::info;

/// Row counts of one generation run, per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateSummary {
    pub customers: usize,
    pub policies: usize,
    pub claims: usize,
    pub risk_indicators: usize,
}

/// What the load job did: provisioning outcome plus rows per table after
/// cleaning.
#[derive(Debug, Clone)]
pub struct LoadSummary {
    pub outcome: ProvisionOutcome,
    pub tables: Vec<(&'static str, usize)>,
}

/// Generate all four datasets from `seed` and save them under `data_dir`.
pub fn run_generate(
    config: &GeneratorConfig,
    seed: u64,
    today: Date,
    data_dir: &str,
) -> PipelineResult<GenerateSummary> {
    let bank = RngBank::new(seed);
    let generator = DatasetGenerator::new(config.clone(), today);

    let mut rng = bank.for_stage(StageSlot::Customer);
    let (customers, customer_ids) = generator.generate_customers(&mut rng);

    let mut rng = bank.for_stage(StageSlot::Policy);
    let (policies, spans) = generator.generate_policies(&mut rng, &customer_ids);

    let mut rng = bank.for_stage(StageSlot::Claim);
    let claims = generator.generate_claims(&mut rng, &spans);

    let mut rng = bank.for_stage(StageSlot::RiskIndicator);
    let risk_indicators = generator.generate_risk_indicators(&mut rng, &customer_ids);

    info!(
        "generated {} customers, {} policies, {} claims, {} risk indicators (seed {seed})",
        customers.len(),
        policies.len(),
        claims.len(),
        risk_indicators.len()
    );

    save_json(&customers, data_dir, CUSTOMERS_FILE)?;
    save_json(&policies, data_dir, POLICIES_FILE)?;
    save_json(&claims, data_dir, CLAIMS_FILE)?;
    save_json(&risk_indicators, data_dir, RISK_INDICATORS_FILE)?;
    info!("saved datasets under {data_dir}/");

    Ok(GenerateSummary {
        customers: customers.len(),
        policies: policies.len(),
        claims: claims.len(),
        risk_indicators: risk_indicators.len(),
    })
}

/// Ingest the four JSON datasets from `data_dir`, clean them, and load
/// them into the SQLite database at `db_path`.
pub fn run_load(data_dir: &str, db_path: &str) -> PipelineResult<LoadSummary> {
    info!("ingesting datasets from {data_dir}/");
    let raw = ingest(data_dir)?;
    info!(
        "raw rows: {} customers, {} policies, {} claims, {} risk indicators",
        raw.customers.len(),
        raw.policies.len(),
        raw.claims.len(),
        raw.risk_indicators.len()
    );

    info!("cleaning datasets");
    let clean = clean_all(&raw);

    let (store, outcome) = SinkStore::provision(db_path)?;
    match outcome {
        ProvisionOutcome::Created => info!("created database '{db_path}'"),
        ProvisionOutcome::AlreadyExists => info!("database '{db_path}' already exists"),
    }

    store.replace_table(&CUSTOMERS_SPEC, &clean.customers)?;
    store.replace_table(&POLICIES_SPEC, &clean.policies)?;
    store.replace_table(&CLAIMS_SPEC, &clean.claims)?;
    store.replace_table(&RISK_INDICATORS_SPEC, &clean.risk_indicators)?;
    info!("loaded all tables into '{db_path}'");

    Ok(LoadSummary {
        outcome,
        tables: vec![
            (CUSTOMERS_SPEC.table, clean.customers.len()),
            (POLICIES_SPEC.table, clean.policies.len()),
            (CLAIMS_SPEC.table, clean.claims.len()),
            (RISK_INDICATORS_SPEC.table, clean.risk_indicators.len()),
        ],
    })
}
