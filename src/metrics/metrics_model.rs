use serde::{Deserialize, Serialize};

/// Derived health figures for a reconciled snapshot. Every ratio is guarded
/// against a zero denominator and yields 0 rather than NaN or infinity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetrics {
    /// Income minus expenses; may be negative.
    pub monthly_balance: f64,
    /// max(0, income - expenses - debt payments).
    pub savings_capacity: f64,
    /// Monthly debt payments as a percentage of income.
    pub debt_to_income_ratio: f64,
    /// Savings capacity as a percentage of income.
    pub savings_rate: f64,
    /// How many months of expenses current savings would cover.
    pub emergency_fund_months: f64,
    /// Positive balance and debt-to-income below 40%.
    pub is_healthy: bool,
    /// 0-100 additive score: 30 income, 30 expenses, 20 debts, 20 goals.
    pub data_completeness: u8,
}
