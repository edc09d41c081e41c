use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::aggregation::RawMoneyRecord;
use crate::errors::{Result, ValidationError};

/// Debt row from the dedicated consolidated storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedDebtRow {
    #[serde(default)]
    pub id: Option<String>,
    pub creditor: String,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub monthly_payment: f64,
    #[serde(default)]
    pub interest_rate: Option<f64>,
}

/// Goal row from the persisted goals store (explicit target and current).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredGoalRow {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
}

/// Bucket 1: the dedicated consolidated tables. Authoritative for any fact
/// kind where it holds at least one record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedRecords {
    #[serde(default)]
    pub incomes: Vec<RawMoneyRecord>,
    #[serde(default)]
    pub expenses: Vec<RawMoneyRecord>,
    #[serde(default)]
    pub debts: Vec<ConsolidatedDebtRow>,
    #[serde(default)]
    pub goals: Vec<StoredGoalRow>,
}

/// Debt entry inside the legacy onboarding blob. Every field is optional;
/// malformed entries default to safe zeros rather than failing reconciliation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingDebtEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub monthly_payment: Option<f64>,
    #[serde(default)]
    pub interest_rate: Option<f64>,
}

/// Bucket 2: the legacy free-form onboarding object. Used only for facts
/// absent from the consolidated tables, except its list-valued fields which
/// always union in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingBlob {
    #[serde(default)]
    pub monthly_income: Option<f64>,
    #[serde(default)]
    pub extra_income: Option<f64>,
    #[serde(default)]
    pub monthly_expenses: Option<f64>,
    #[serde(default)]
    pub current_savings: Option<f64>,
    #[serde(default)]
    pub monthly_savings_capacity: Option<f64>,
    #[serde(default)]
    pub expense_categories: HashMap<String, f64>,
    #[serde(default)]
    pub debts: Vec<OnboardingDebtEntry>,
    #[serde(default)]
    pub financial_goals: Vec<String>,
}

impl OnboardingBlob {
    /// Parses the blob from its stored JSON form. Unknown keys are ignored
    /// and missing keys default, matching how the legacy object accreted
    /// fields over time.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| {
            ValidationError::InvalidInput(format!("Malformed onboarding blob: {e}")).into()
        })
    }

    pub fn is_empty(&self) -> bool {
        self.monthly_income.is_none()
            && self.extra_income.is_none()
            && self.monthly_expenses.is_none()
            && self.current_savings.is_none()
            && self.monthly_savings_capacity.is_none()
            && self.expense_categories.is_empty()
            && self.debts.is_empty()
            && self.financial_goals.is_empty()
    }
}

/// Bucket 3: itemized onboarding expenses. Rows whose category text matches
/// the debt classifier are reclassified as debt-payment facts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingExpenseRow {
    pub amount: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
}

impl OnboardingExpenseRow {
    /// Category and subcategory text joined for classification.
    pub fn classification_text(&self) -> String {
        let mut text = String::new();
        if let Some(category) = &self.category {
            text.push_str(category);
        }
        if let Some(subcategory) = &self.subcategory {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(subcategory);
        }
        text
    }
}

/// Bucket 4: the special-cased external recurring loan. Always additively
/// unioned into the debt list; never competes by priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalLoanRecord {
    pub lender: String,
    #[serde(default)]
    pub balance: f64,
    pub biweekly_payment_amount: f64,
    #[serde(default)]
    pub interest_rate: Option<f64>,
}

/// All raw buckets for one user, as fetched by the caller. A provider that
/// was unavailable contributes `None`, treated as an empty bucket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSources {
    #[serde(default)]
    pub consolidated: Option<ConsolidatedRecords>,
    #[serde(default)]
    pub onboarding: Option<OnboardingBlob>,
    #[serde(default)]
    pub onboarding_expenses: Vec<OnboardingExpenseRow>,
    #[serde(default)]
    pub external_loan: Option<ExternalLoanRecord>,
}
