/// Tests for multi-source reconciliation: priority override for scalar
/// facts, union for list facts, keyword reclassification, and the external
/// loan special case.
use finplan_core::aggregation::RawMoneyRecord;
use finplan_core::reconciliation::{
    reconcile, ConsolidatedDebtRow, ConsolidatedRecords, DataSource, DebtSource,
    ExternalLoanRecord, OnboardingBlob, OnboardingDebtEntry, OnboardingExpenseRow, RawSources,
    DEFAULT_GOAL_TARGET,
};

fn blob_debt(name: &str, balance: f64, payment: f64) -> OnboardingDebtEntry {
    OnboardingDebtEntry {
        name: Some(name.to_string()),
        balance: Some(balance),
        monthly_payment: Some(payment),
        interest_rate: None,
    }
}

#[test]
fn scalar_facts_override_while_list_facts_union() {
    // Bucket 1 has one debt and an income; bucket 2 has two different debts
    // and a conflicting income. Expected: 3 debts (union), bucket-1 income
    // (override).
    let sources = RawSources {
        consolidated: Some(ConsolidatedRecords {
            incomes: vec![RawMoneyRecord::new(45000.0)],
            debts: vec![ConsolidatedDebtRow {
                id: Some("debt-1".into()),
                creditor: "Banco Central".into(),
                balance: 20000.0,
                monthly_payment: 2000.0,
                interest_rate: Some(18.0),
            }],
            ..Default::default()
        }),
        onboarding: Some(OnboardingBlob {
            monthly_income: Some(30000.0),
            debts: vec![
                blob_debt("Tarjeta Oro", 8000.0, 800.0),
                blob_debt("Préstamo Personal", 5000.0, 500.0),
            ],
            ..Default::default()
        }),
        ..Default::default()
    };

    let snapshot = reconcile(&sources);
    assert_eq!(snapshot.monthly_income, 45000.0, "bucket-1 income wins");
    assert_eq!(snapshot.debts.len(), 3, "debts union across buckets");
    assert_eq!(snapshot.total_debt_balance, 33000.0);
    assert_eq!(snapshot.total_monthly_debt_payments, 3300.0);
    assert_eq!(snapshot.data_source, DataSource::Consolidated);
}

#[test]
fn reconcile_is_idempotent_over_unchanged_inputs() {
    let sources = RawSources {
        onboarding: Some(OnboardingBlob {
            monthly_income: Some(25000.0),
            monthly_expenses: Some(15000.0),
            current_savings: Some(4000.0),
            debts: vec![blob_debt("Banco Sur", 10000.0, 1000.0)],
            financial_goals: vec!["Buy a house".into()],
            ..Default::default()
        }),
        external_loan: Some(ExternalLoanRecord {
            lender: "QuickLoan".into(),
            balance: 6000.0,
            biweekly_payment_amount: 400.0,
            interest_rate: Some(30.0),
        }),
        ..Default::default()
    };

    let first = reconcile(&sources);
    let second = reconcile(&sources);
    assert_eq!(first, second);
}

#[test]
fn debt_keyword_rows_are_reclassified_out_of_expenses() {
    let sources = RawSources {
        onboarding_expenses: vec![
            OnboardingExpenseRow {
                amount: 3000.0,
                category: Some("Alimentos".into()),
                subcategory: None,
            },
            OnboardingExpenseRow {
                amount: 1200.0,
                category: Some("Tarjeta de crédito".into()),
                subcategory: None,
            },
            OnboardingExpenseRow {
                amount: 900.0,
                category: Some("Transporte".into()),
                subcategory: Some("Pago de auto".into()),
            },
        ],
        ..Default::default()
    };

    let snapshot = reconcile(&sources);
    // Only the groceries row stays an expense; the card and car-payment rows
    // become debt-payment facts instead of double-counting.
    assert_eq!(snapshot.monthly_expenses, 3000.0);
    assert_eq!(snapshot.debts.len(), 2);
    assert_eq!(snapshot.total_monthly_debt_payments, 2100.0);
    assert!(snapshot.debts.iter().all(|d| d.balance == 0.0));
    assert_eq!(snapshot.expense_categories.get("Alimentos"), Some(&3000.0));
    assert!(!snapshot.expense_categories.contains_key("Tarjeta de crédito"));
}

#[test]
fn external_loan_is_additive_with_biweekly_cadence_doubled() {
    let sources = RawSources {
        consolidated: Some(ConsolidatedRecords {
            debts: vec![ConsolidatedDebtRow {
                id: None,
                creditor: "Banco Central".into(),
                balance: 10000.0,
                monthly_payment: 1000.0,
                interest_rate: None,
            }],
            ..Default::default()
        }),
        external_loan: Some(ExternalLoanRecord {
            lender: "QuickLoan".into(),
            balance: 5000.0,
            biweekly_payment_amount: 350.0,
            interest_rate: None,
        }),
        ..Default::default()
    };

    let snapshot = reconcile(&sources);
    assert_eq!(snapshot.debts.len(), 2);
    let loan = snapshot
        .debts
        .iter()
        .find(|d| d.source == DebtSource::ExternalLoan)
        .expect("external loan must union in even when bucket 1 has debts");
    assert!(loan.is_special_loan);
    assert_eq!(loan.monthly_payment, 700.0);
}

#[test]
fn onboarding_text_goals_get_the_default_target() {
    let sources = RawSources {
        onboarding: Some(OnboardingBlob {
            financial_goals: vec!["Emergency fund".into(), "Vacation".into()],
            ..Default::default()
        }),
        ..Default::default()
    };

    let snapshot = reconcile(&sources);
    assert_eq!(snapshot.goals.len(), 2);
    for goal in &snapshot.goals {
        assert_eq!(goal.target_amount, DEFAULT_GOAL_TARGET);
        assert_eq!(goal.current_amount, 0.0);
        assert_eq!(goal.progress, 0.0);
    }
    assert!(snapshot.has_real_data, "goals alone count as real data");
}

#[test]
fn savings_capacity_is_never_negative() {
    let sources = RawSources {
        onboarding: Some(OnboardingBlob {
            monthly_income: Some(10000.0),
            monthly_expenses: Some(9000.0),
            debts: vec![blob_debt("Banco Sur", 30000.0, 3000.0)],
            ..Default::default()
        }),
        ..Default::default()
    };

    let snapshot = reconcile(&sources);
    // 10000 - 9000 - 3000 would be negative; clamped to 0.
    assert_eq!(snapshot.savings_capacity, 0.0);
}

#[test]
fn legacy_blob_parses_from_stored_json() {
    let value = serde_json::json!({
        "monthlyIncome": 20000.0,
        "extraIncome": 2000.0,
        "monthlyExpenses": 12000.0,
        "expenseCategories": { "Renta": 7000.0, "Alimentos": 5000.0 },
        "financialGoals": ["Pay off card"],
        "someFieldAddedLater": true
    });

    let blob = OnboardingBlob::from_json(value).expect("unknown keys are tolerated");
    let sources = RawSources {
        onboarding: Some(blob),
        ..Default::default()
    };
    let snapshot = reconcile(&sources);
    assert_eq!(snapshot.monthly_income, 22000.0);
    assert_eq!(snapshot.monthly_expenses, 12000.0);
    assert_eq!(snapshot.expense_categories.get("Renta"), Some(&7000.0));
    assert_eq!(snapshot.goals.len(), 1);
}
