use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Tag identifying which raw bucket produced a fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactSource {
    #[serde(rename = "consolidated-table")]
    ConsolidatedTable,
    #[serde(rename = "legacy-onboarding-blob")]
    LegacyOnboardingBlob,
    #[serde(rename = "onboarding-expense-row")]
    OnboardingExpenseRow,
    #[serde(rename = "external-loan-record")]
    ExternalLoanRecord,
}

/// A single scalar quantity attributed to a source. Facts of the same
/// logical kind compete; exactly one is selected per reconciliation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonetaryFact {
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    pub source: FactSource,
}

impl MonetaryFact {
    pub fn new(amount: f64, source: FactSource) -> Self {
        MonetaryFact {
            amount,
            currency: None,
            source,
        }
    }
}

/// Provenance label for the snapshot as a whole, reflecting which scalar-fact
/// bucket won. `Mock` is reserved for demo data injected by embedders; the
/// resolver itself never produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Consolidated,
    Onboarding,
    Mock,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DebtSource {
    Consolidated,
    Onboarding,
    ExternalLoan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GoalSource {
    Consolidated,
    Onboarding,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtRecord {
    pub id: String,
    pub creditor: String,
    pub balance: f64,
    pub monthly_payment: f64,
    /// Nominal annual rate in percent; 0 when the source did not provide one.
    #[serde(default)]
    pub interest_rate: f64,
    pub source: DebtSource,
    pub is_special_loan: bool,
}

impl DebtRecord {
    /// Key used to de-duplicate debts across buckets: normalized creditor
    /// name plus source tag. The same creditor reported by two different
    /// buckets stays as two records; within one bucket the first wins.
    pub fn merge_key(&self) -> (String, DebtSource) {
        (normalize_creditor(&self.creditor), self.source)
    }
}

pub fn normalize_creditor(creditor: &str) -> String {
    creditor.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRecord {
    pub id: String,
    pub title: String,
    pub target_amount: f64,
    pub current_amount: f64,
    /// Always recomputed from the amounts, never stored independently.
    pub progress: f64,
    pub source: GoalSource,
}

impl GoalRecord {
    pub fn new(
        id: String,
        title: String,
        target_amount: f64,
        current_amount: f64,
        source: GoalSource,
    ) -> Self {
        let mut goal = GoalRecord {
            id,
            title,
            target_amount,
            current_amount,
            progress: 0.0,
            source,
        };
        goal.recompute_progress();
        goal
    }

    /// Progress in percent, clamped to [0, 100]. Zero target yields zero
    /// progress rather than a division by zero.
    pub fn recompute_progress(&mut self) {
        self.progress = if self.target_amount > 0.0 {
            (self.current_amount / self.target_amount * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
    }
}

/// The canonical reconciled financial state for a user. Recomputed on every
/// read from the underlying source records; never mutated directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub current_savings: f64,
    /// max(0, income - expenses - debt payments); derived at construction.
    pub savings_capacity: f64,
    pub total_debt_balance: f64,
    pub total_monthly_debt_payments: f64,
    pub expense_categories: HashMap<String, f64>,
    pub debts: Vec<DebtRecord>,
    pub goals: Vec<GoalRecord>,
    pub has_real_data: bool,
    pub data_source: DataSource,
}

impl Snapshot {
    pub fn empty() -> Self {
        Snapshot {
            monthly_income: 0.0,
            monthly_expenses: 0.0,
            current_savings: 0.0,
            savings_capacity: 0.0,
            total_debt_balance: 0.0,
            total_monthly_debt_payments: 0.0,
            expense_categories: HashMap::new(),
            debts: Vec::new(),
            goals: Vec::new(),
            has_real_data: false,
            data_source: DataSource::Empty,
        }
    }
}
