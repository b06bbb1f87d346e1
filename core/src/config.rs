use serde::{Deserialize, Serialize};

/// Tunables for the synthetic-data generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of customer records to generate.
    pub customer_count: usize,
    /// Inclusive bounds on policies per customer.
    pub min_policies_per_customer: u32,
    pub max_policies_per_customer: u32,
    /// How far back policy creation dates may reach, in years.
    pub policy_lookback_years: u32,
    /// Probability that any single nullable field is emitted as null.
    /// Applied independently per field.
    pub null_rate: f64,
    /// Weights for the per-policy claim count distribution:
    /// index i is the weight of drawing exactly i claims.
    pub claim_count_weights: Vec<f64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            customer_count: 50,
            min_policies_per_customer: 1,
            max_policies_per_customer: 3,
            policy_lookback_years: 10,
            null_rate: 0.10,
            claim_count_weights: vec![0.55, 0.25, 0.12, 0.06, 0.02],
        }
    }
}

/// Where the cleaned datasets end up. The sink is a SQLite database file
/// named after `db_name`; the raw JSON datasets live under `data_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    pub db_name: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl SinkConfig {
    /// Path of the SQLite database file for this sink.
    pub fn db_path(&self) -> String {
        format!("{}.db", self.db_name)
    }
}

fn default_data_dir() -> String {
    "data".into()
}

/// Internal file shape for config.json.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    sink: SinkConfig,
    #[serde(default)]
    generator: GeneratorConfig,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub sink: SinkConfig,
    pub generator: GeneratorConfig,
}

impl PipelineConfig {
    /// Load from a JSON config file.
    /// In tests, use PipelineConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let file: ConfigFile = serde_json::from_str(&content)?;
        Ok(Self {
            sink: file.sink,
            generator: file.generator,
        })
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        Self {
            sink: SinkConfig {
                db_name: "insurance_test".into(),
                data_dir: "data".into(),
            },
            generator: GeneratorConfig {
                customer_count: 10,
                ..GeneratorConfig::default()
            },
        }
    }
}
