use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

/// One row of the cleaned grant-cancellation CSV.
///
/// The file comes out of a pandas cleaning pipeline, so boolean cells are
/// `True`/`False` and budgets are decimal dollars. Budgets are stored as
/// integer cents so aggregate sums stay exact.
#[derive(Debug, Clone, Deserialize)]
pub struct GrantRecord {
    pub grant_id: String,
    pub org_name: String,
    pub org_state: Option<String>,
    #[serde(rename = "budget_preferred", deserialize_with = "de_dollars_to_cents")]
    pub budget_cents: u64,
    #[serde(deserialize_with = "de_python_bool")]
    pub terminated: bool,
    #[serde(deserialize_with = "de_python_bool")]
    pub reinstated: bool,
    #[serde(deserialize_with = "de_python_bool")]
    pub has_flagged_words: bool,
    #[serde(deserialize_with = "de_python_bool")]
    pub in_cruz_list: bool,
}

/// The loaded record set. Built once at startup and read-only afterwards;
/// every aggregate is derived fresh from `records`.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<GrantRecord>,
    pub source: PathBuf,
    pub loaded_at: chrono::DateTime<chrono::Local>,
}

/// Accept `True`/`False` (pandas), `true`/`false`, and `1`/`0`.
fn de_python_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.as_str() {
        "True" | "true" | "TRUE" | "1" => Ok(true),
        "False" | "false" | "FALSE" | "0" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid boolean value {:?}",
            other
        ))),
    }
}

/// Decimal dollars -> integer cents, rounded to the nearest cent.
/// Negative or non-finite amounts are malformed input.
fn de_dollars_to_cents<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let dollars = f64::deserialize(deserializer)?;
    if !dollars.is_finite() {
        return Err(serde::de::Error::custom("budget is not a finite number"));
    }
    if dollars < 0.0 {
        return Err(serde::de::Error::custom(format!(
            "budget must be non-negative, got {}",
            dollars
        )));
    }
    Ok((dollars * 100.0).round() as u64)
}
