use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::aggregation::aggregator::aggregate_records;
use crate::aggregation::RawMoneyRecord;
use crate::reconciliation::classifier::{DebtClassifier, KeywordDebtClassifier};
use crate::reconciliation::snapshot_model::{
    normalize_creditor, DataSource, DebtRecord, DebtSource, FactSource, GoalRecord, GoalSource,
    MonetaryFact, Snapshot,
};
use crate::reconciliation::sources_model::{
    ConsolidatedRecords, OnboardingBlob, OnboardingExpenseRow, RawSources,
};

/// Target assigned to goals that arrive as onboarding text with no amount.
pub const DEFAULT_GOAL_TARGET: f64 = 10_000.0;

const UNKNOWN_CREDITOR: &str = "Unknown creditor";

/// Reconciles the raw source buckets into one canonical snapshot using the
/// default keyword-based debt classifier.
pub fn reconcile(sources: &RawSources) -> Snapshot {
    reconcile_with_classifier(sources, &KeywordDebtClassifier)
}

/// Reconciliation with an explicit classifier. Pure over its inputs: no
/// caches, no shared state, identical output for identical sources.
pub fn reconcile_with_classifier(
    sources: &RawSources,
    classifier: &dyn DebtClassifier,
) -> Snapshot {
    let empty_consolidated = ConsolidatedRecords::default();
    let empty_blob = OnboardingBlob::default();
    let consolidated = sources.consolidated.as_ref().unwrap_or(&empty_consolidated);
    let blob = sources.onboarding.as_ref().unwrap_or(&empty_blob);

    // Expense rows split once: debt-like rows become debt-payment facts and
    // must not also count as living expenses.
    let (debt_rows, living_rows): (Vec<&OnboardingExpenseRow>, Vec<&OnboardingExpenseRow>) =
        sources
            .onboarding_expenses
            .iter()
            .partition(|row| classifier.is_debt_payment(&row.classification_text()));

    // Scalar fact: monthly income. Consolidated income records carry a
    // cadence and are normalized to monthly equivalents.
    let consolidated_income = aggregate_records(&consolidated.incomes, true);
    let blob_income = blob.monthly_income.unwrap_or(0.0) + blob.extra_income.unwrap_or(0.0);
    let income_fact = prefer_first_non_empty(vec![
        MonetaryFact::new(consolidated_income.total, FactSource::ConsolidatedTable),
        MonetaryFact::new(blob_income, FactSource::LegacyOnboardingBlob),
    ]);

    // Scalar fact: monthly expenses, with the category map following the
    // winning bucket.
    let consolidated_expenses = aggregate_records(&consolidated.expenses, false);
    let row_records: Vec<RawMoneyRecord> = living_rows
        .iter()
        .map(|row| RawMoneyRecord {
            amount: row.amount,
            category: row.category.clone(),
            frequency: None,
            is_active: true,
        })
        .collect();
    let row_expenses = aggregate_records(&row_records, false);
    let expense_fact = prefer_first_non_empty(vec![
        MonetaryFact::new(consolidated_expenses.total, FactSource::ConsolidatedTable),
        MonetaryFact::new(
            blob.monthly_expenses.unwrap_or(0.0),
            FactSource::LegacyOnboardingBlob,
        ),
        MonetaryFact::new(row_expenses.total, FactSource::OnboardingExpenseRow),
    ]);
    let expense_categories: HashMap<String, f64> = match expense_fact.as_ref().map(|f| f.source) {
        Some(FactSource::ConsolidatedTable) => consolidated_expenses.by_category,
        Some(FactSource::LegacyOnboardingBlob) => blob.expense_categories.clone(),
        Some(FactSource::OnboardingExpenseRow) => row_expenses.by_category,
        _ => HashMap::new(),
    };

    // Scalar fact: current savings. Only the onboarding blob carries one.
    let savings_fact = prefer_first_non_empty(vec![MonetaryFact::new(
        blob.current_savings.unwrap_or(0.0),
        FactSource::LegacyOnboardingBlob,
    )]);

    if let Some(fact) = &income_fact {
        debug!("income fact won by {:?}: {}", fact.source, fact.amount);
    }
    if let Some(fact) = &expense_fact {
        debug!("expense fact won by {:?}: {}", fact.source, fact.amount);
    }

    // List fact: debts. Union across every bucket that produced any, plus
    // the external loan which is always additive.
    let debts = union_debts(vec![
        consolidated_debts(consolidated),
        onboarding_blob_debts(blob),
        reclassified_row_debts(&debt_rows),
        external_loan_debts(sources),
    ]);

    // List fact: goals. Stored goals keep their amounts; onboarding text
    // goals get the default target.
    let goals = union_goals(vec![consolidated_goals(consolidated), onboarding_goals(blob)]);

    let monthly_income = income_fact.as_ref().map_or(0.0, |f| f.amount);
    let monthly_expenses = expense_fact.as_ref().map_or(0.0, |f| f.amount);
    let current_savings = savings_fact.as_ref().map_or(0.0, |f| f.amount);
    let total_debt_balance: f64 = debts.iter().map(|d| d.balance).sum();
    let total_monthly_debt_payments: f64 = debts.iter().map(|d| d.monthly_payment).sum();

    let has_real_data =
        monthly_income > 0.0 || monthly_expenses > 0.0 || !debts.is_empty() || !goals.is_empty();

    let consolidated_has_records = !consolidated.incomes.is_empty()
        || !consolidated.expenses.is_empty()
        || !consolidated.debts.is_empty()
        || !consolidated.goals.is_empty();
    let data_source = if consolidated_has_records {
        DataSource::Consolidated
    } else if has_real_data {
        DataSource::Onboarding
    } else {
        DataSource::Empty
    };

    Snapshot {
        monthly_income,
        monthly_expenses,
        current_savings,
        savings_capacity: (monthly_income - monthly_expenses - total_monthly_debt_payments)
            .max(0.0),
        total_debt_balance,
        total_monthly_debt_payments,
        expense_categories,
        debts,
        goals,
        has_real_data,
        data_source,
    }
}

/// Scalar merge strategy: the first non-zero candidate wins outright and
/// fully shadows later buckets. Kept distinct from the list-union strategy
/// so the asymmetry between scalar and list facts stays visible.
fn prefer_first_non_empty(candidates: Vec<MonetaryFact>) -> Option<MonetaryFact> {
    candidates.into_iter().find(|fact| fact.amount > 0.0)
}

/// List merge strategy: union across buckets, de-duplicated by merge key
/// (normalized creditor + source). The first occurrence wins; later
/// duplicates are dropped with a warning.
fn union_debts(buckets: Vec<Vec<DebtRecord>>) -> Vec<DebtRecord> {
    let mut seen: HashSet<(String, DebtSource)> = HashSet::new();
    let mut merged = Vec::new();
    for bucket in buckets {
        for debt in bucket {
            if seen.insert(debt.merge_key()) {
                merged.push(debt);
            } else {
                warn!(
                    "dropping duplicate debt record for creditor '{}' ({:?})",
                    debt.creditor, debt.source
                );
            }
        }
    }
    merged
}

fn union_goals(buckets: Vec<Vec<GoalRecord>>) -> Vec<GoalRecord> {
    let mut seen: HashSet<(String, GoalSource)> = HashSet::new();
    let mut merged = Vec::new();
    for bucket in buckets {
        for goal in bucket {
            let key = (goal.title.trim().to_lowercase(), goal.source);
            if seen.insert(key) {
                merged.push(goal);
            } else {
                warn!("dropping duplicate goal '{}' ({:?})", goal.title, goal.source);
            }
        }
    }
    merged
}

fn consolidated_debts(consolidated: &ConsolidatedRecords) -> Vec<DebtRecord> {
    consolidated
        .debts
        .iter()
        .map(|row| DebtRecord {
            id: row.id.clone().unwrap_or_else(|| {
                format!("consolidated-debt-{}", normalize_creditor(&row.creditor))
            }),
            creditor: row.creditor.clone(),
            balance: row.balance,
            monthly_payment: row.monthly_payment,
            interest_rate: row.interest_rate.unwrap_or(0.0),
            source: DebtSource::Consolidated,
            is_special_loan: false,
        })
        .collect()
}

fn onboarding_blob_debts(blob: &OnboardingBlob) -> Vec<DebtRecord> {
    blob.debts
        .iter()
        .map(|entry| {
            let creditor = entry
                .name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_CREDITOR.to_string());
            DebtRecord {
                id: format!("onboarding-debt-{}", normalize_creditor(&creditor)),
                creditor,
                balance: entry.balance.unwrap_or(0.0),
                monthly_payment: entry.monthly_payment.unwrap_or(0.0),
                interest_rate: entry.interest_rate.unwrap_or(0.0),
                source: DebtSource::Onboarding,
                is_special_loan: false,
            }
        })
        .collect()
}

/// Expense rows matched by the classifier become debt-payment facts. Their
/// balance is unknown at this point, which leaves the payoff schedule's
/// months at the 0 sentinel until a balance arrives from another bucket.
fn reclassified_row_debts(rows: &[&OnboardingExpenseRow]) -> Vec<DebtRecord> {
    rows.iter()
        .map(|row| {
            let text = row.classification_text();
            let creditor = if text.trim().is_empty() {
                UNKNOWN_CREDITOR.to_string()
            } else {
                text
            };
            DebtRecord {
                id: format!("onboarding-expense-{}", normalize_creditor(&creditor)),
                creditor,
                balance: 0.0,
                monthly_payment: row.amount,
                interest_rate: 0.0,
                source: DebtSource::Onboarding,
                is_special_loan: false,
            }
        })
        .collect()
}

fn external_loan_debts(sources: &RawSources) -> Vec<DebtRecord> {
    sources
        .external_loan
        .iter()
        .map(|loan| DebtRecord {
            id: format!("external-loan-{}", normalize_creditor(&loan.lender)),
            creditor: loan.lender.clone(),
            balance: loan.balance,
            // The featured lender bills biweekly; its cadence is folded to a
            // monthly figure with the flat x2 rule used system-wide.
            monthly_payment: loan.biweekly_payment_amount * 2.0,
            interest_rate: loan.interest_rate.unwrap_or(0.0),
            source: DebtSource::ExternalLoan,
            is_special_loan: true,
        })
        .collect()
}

fn consolidated_goals(consolidated: &ConsolidatedRecords) -> Vec<GoalRecord> {
    consolidated
        .goals
        .iter()
        .map(|row| {
            GoalRecord::new(
                row.id.clone().unwrap_or_else(|| {
                    format!("consolidated-goal-{}", row.title.trim().to_lowercase())
                }),
                row.title.clone(),
                row.target_amount,
                row.current_amount,
                GoalSource::Consolidated,
            )
        })
        .collect()
}

fn onboarding_goals(blob: &OnboardingBlob) -> Vec<GoalRecord> {
    blob.financial_goals
        .iter()
        .map(|title| {
            GoalRecord::new(
                format!("onboarding-goal-{}", title.trim().to_lowercase()),
                title.clone(),
                DEFAULT_GOAL_TARGET,
                0.0,
                GoalSource::Onboarding,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::RawMoneyRecord;
    use crate::reconciliation::sources_model::OnboardingDebtEntry;

    #[test]
    fn scalar_facts_prefer_the_first_non_zero_bucket() {
        let facts = vec![
            MonetaryFact::new(0.0, FactSource::ConsolidatedTable),
            MonetaryFact::new(2500.0, FactSource::LegacyOnboardingBlob),
        ];
        let winner = prefer_first_non_empty(facts).unwrap();
        assert_eq!(winner.amount, 2500.0);
        assert_eq!(winner.source, FactSource::LegacyOnboardingBlob);
    }

    #[test]
    fn empty_buckets_yield_an_empty_snapshot_not_an_error() {
        let snapshot = reconcile(&RawSources::default());
        assert!(!snapshot.has_real_data);
        assert_eq!(snapshot.data_source, DataSource::Empty);
        assert_eq!(snapshot.monthly_income, 0.0);
        assert!(snapshot.debts.is_empty());
    }

    #[test]
    fn blob_income_combines_base_and_extra() {
        let sources = RawSources {
            onboarding: Some(OnboardingBlob {
                monthly_income: Some(20000.0),
                extra_income: Some(3000.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let snapshot = reconcile(&sources);
        assert_eq!(snapshot.monthly_income, 23000.0);
        assert_eq!(snapshot.data_source, DataSource::Onboarding);
    }

    #[test]
    fn consolidated_income_shadows_blob_income() {
        let sources = RawSources {
            consolidated: Some(ConsolidatedRecords {
                incomes: vec![RawMoneyRecord::new(40000.0)],
                ..Default::default()
            }),
            onboarding: Some(OnboardingBlob {
                monthly_income: Some(99999.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let snapshot = reconcile(&sources);
        assert_eq!(snapshot.monthly_income, 40000.0);
        assert_eq!(snapshot.data_source, DataSource::Consolidated);
    }

    #[test]
    fn duplicate_debts_within_a_bucket_keep_the_first() {
        let sources = RawSources {
            onboarding: Some(OnboardingBlob {
                debts: vec![
                    OnboardingDebtEntry {
                        name: Some("Banco Norte".into()),
                        balance: Some(5000.0),
                        monthly_payment: Some(500.0),
                        ..Default::default()
                    },
                    OnboardingDebtEntry {
                        name: Some(" banco norte ".into()),
                        balance: Some(7000.0),
                        monthly_payment: Some(700.0),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            }),
            ..Default::default()
        };
        let snapshot = reconcile(&sources);
        assert_eq!(snapshot.debts.len(), 1);
        assert_eq!(snapshot.total_debt_balance, 5000.0);
    }

    #[test]
    fn malformed_blob_debt_defaults_to_zeroes() {
        let sources = RawSources {
            onboarding: Some(OnboardingBlob {
                debts: vec![OnboardingDebtEntry::default()],
                ..Default::default()
            }),
            ..Default::default()
        };
        let snapshot = reconcile(&sources);
        assert_eq!(snapshot.debts.len(), 1);
        assert_eq!(snapshot.debts[0].creditor, "Unknown creditor");
        assert_eq!(snapshot.debts[0].balance, 0.0);
        assert_eq!(snapshot.debts[0].monthly_payment, 0.0);
    }
}
