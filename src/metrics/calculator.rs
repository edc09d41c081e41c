use crate::metrics::metrics_model::SnapshotMetrics;
use crate::reconciliation::Snapshot;

const HEALTHY_DEBT_TO_INCOME_LIMIT: f64 = 40.0;

/// Computes the derived health figures for a snapshot. Pure function; the
/// snapshot itself is never annotated in place.
pub fn derive_metrics(snapshot: &Snapshot) -> SnapshotMetrics {
    let monthly_balance = snapshot.monthly_income - snapshot.monthly_expenses;
    let savings_capacity = (snapshot.monthly_income
        - snapshot.monthly_expenses
        - snapshot.total_monthly_debt_payments)
        .max(0.0);
    let debt_to_income_ratio = percent_of(
        snapshot.total_monthly_debt_payments,
        snapshot.monthly_income,
    );
    let savings_rate = percent_of(savings_capacity, snapshot.monthly_income);
    let emergency_fund_months = ratio_or_zero(snapshot.current_savings, snapshot.monthly_expenses);

    SnapshotMetrics {
        monthly_balance,
        savings_capacity,
        debt_to_income_ratio,
        savings_rate,
        emergency_fund_months,
        is_healthy: monthly_balance > 0.0 && debt_to_income_ratio < HEALTHY_DEBT_TO_INCOME_LIMIT,
        data_completeness: data_completeness(snapshot),
    }
}

/// numerator / denominator, or 0 when the denominator is 0.
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

fn percent_of(part: f64, whole: f64) -> f64 {
    ratio_or_zero(part, whole) * 100.0
}

/// Additive completeness flags, not a proportional score. The snapshot has
/// already collapsed record provenance, so a positive income/expense total
/// stands in for "at least one record exists"; debts and goals keep their
/// lists and are checked for presence directly.
fn data_completeness(snapshot: &Snapshot) -> u8 {
    let mut score = 0;
    if snapshot.monthly_income > 0.0 {
        score += 30;
    }
    if snapshot.monthly_expenses > 0.0 {
        score += 30;
    }
    if !snapshot.debts.is_empty() {
        score += 20;
    }
    if !snapshot.goals.is_empty() {
        score += 20;
    }
    score
}
