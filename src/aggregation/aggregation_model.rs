use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Payment cadence attached to a raw income record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Lenient parse used for free-form provider data. Unknown or empty
    /// cadence text falls back to monthly (the unitary case).
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "weekly" | "week" => Frequency::Weekly,
            "biweekly" | "bi-weekly" | "fortnightly" => Frequency::Biweekly,
            "yearly" | "annual" | "annually" | "year" => Frequency::Yearly,
            _ => Frequency::Monthly,
        }
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Frequency::Monthly
    }
}

/// A single raw money record as returned by a data provider, before any
/// normalization. Used for incomes, expenses and other periodic amounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMoneyRecord {
    pub amount: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub frequency: Option<Frequency>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl RawMoneyRecord {
    pub fn new(amount: f64) -> Self {
        RawMoneyRecord {
            amount,
            category: None,
            frequency: None,
            is_active: true,
        }
    }

    pub fn with_category(amount: f64, category: &str) -> Self {
        RawMoneyRecord {
            amount,
            category: Some(category.to_string()),
            frequency: None,
            is_active: true,
        }
    }
}

/// Result of aggregating a set of raw records: the monthly-equivalent total
/// plus a per-category breakdown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateTotals {
    pub total: f64,
    pub by_category: HashMap<String, f64>,
}
