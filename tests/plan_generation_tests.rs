/// End-to-end tests for metric derivation, plan generation, and the plan
/// lifecycle over the in-memory repository.
use std::sync::Arc;

use finplan_core::errors::Error;
use finplan_core::metrics::derive_metrics;
use finplan_core::plan::{
    generate_plan, MemoryPlanRepository, MilestoneStatus, PlanService, PlanServiceTrait,
};
use finplan_core::reconciliation::{reconcile, OnboardingBlob, RawSources, Snapshot};

fn onboarding_snapshot(income: f64, expenses: f64, savings: f64) -> Snapshot {
    let sources = RawSources {
        onboarding: Some(OnboardingBlob {
            monthly_income: Some(income),
            monthly_expenses: Some(expenses),
            current_savings: Some(savings),
            ..Default::default()
        }),
        ..Default::default()
    };
    reconcile(&sources)
}

#[test]
fn healthy_household_metrics() {
    // income=50000, expenses=30000, debtPayments=5000
    let mut snapshot = onboarding_snapshot(50000.0, 30000.0, 0.0);
    snapshot.total_monthly_debt_payments = 5000.0;

    let metrics = derive_metrics(&snapshot);
    assert_eq!(metrics.savings_capacity, 15000.0);
    assert_eq!(metrics.debt_to_income_ratio, 10.0);
    assert!(metrics.is_healthy);
}

#[test]
fn zero_income_snapshot_cannot_produce_a_plan() {
    let snapshot = onboarding_snapshot(0.0, 8000.0, 1000.0);
    match generate_plan(&snapshot) {
        Err(Error::InsufficientData(_)) => {}
        other => panic!("expected InsufficientData, got {other:?}"),
    }
}

#[test]
fn emergency_fund_milestone_matches_six_months_of_expenses() {
    // expenses=3000 -> target 18000; savings=9000 -> progress 50, in progress
    let snapshot = onboarding_snapshot(20000.0, 3000.0, 9000.0);
    let plan = generate_plan(&snapshot).unwrap();

    let emergency = &plan.milestones[0];
    assert_eq!(emergency.target, 18000.0);
    assert_eq!(emergency.progress, 50.0);
    assert_eq!(emergency.status, MilestoneStatus::InProgress);
}

#[test]
fn budget_distribution_splits_surplus_eighty_twenty() {
    let snapshot = onboarding_snapshot(10000.0, 6000.0, 0.0);
    let plan = generate_plan(&snapshot).unwrap();

    // surplus = 4000
    assert_eq!(plan.budget_distribution.essentials, 6000.0);
    assert_eq!(plan.budget_distribution.flexible, 3200.0);
    assert_eq!(plan.budget_distribution.debt_and_savings, 800.0);
    assert_eq!(plan.budget_distribution.debt_and_savings_percentage, 20.0);

    // No surplus: the percentage drops to 0 too.
    let tight = onboarding_snapshot(6000.0, 6000.0, 0.0);
    let plan = generate_plan(&tight).unwrap();
    assert_eq!(plan.budget_distribution.debt_and_savings_percentage, 0.0);
}

#[test]
fn twelve_month_outlook_caps_debt_reduction_at_the_balance() {
    let mut snapshot = onboarding_snapshot(10000.0, 6000.0, 2000.0);
    snapshot.total_debt_balance = 5000.0;
    let plan = generate_plan(&snapshot).unwrap();

    // surplus=4000; 0.7*12*4000=33600 exceeds the 5000 balance.
    assert_eq!(plan.twelve_month_outlook.projected_debt_reduction, 5000.0);
    assert_eq!(plan.twelve_month_outlook.projected_savings, 2000.0 + 14400.0);
    assert!(plan
        .twelve_month_outlook
        .narrative
        .contains("debt-free"));
}

#[test]
fn investment_milestone_stays_pending() {
    let snapshot = onboarding_snapshot(12000.0, 5000.0, 100000.0);
    let plan = generate_plan(&snapshot).unwrap();
    let investment = &plan.milestones[2];
    assert_eq!(investment.target, 36000.0);
    assert_eq!(investment.status, MilestoneStatus::Pending);
}

#[tokio::test]
async fn regeneration_keeps_at_most_one_active_plan() {
    let repo = Arc::new(MemoryPlanRepository::new());
    let service = PlanService::new(repo.clone());
    let snapshot = onboarding_snapshot(20000.0, 12000.0, 3000.0);

    let first = service.generate_and_persist("user-1", &snapshot).await.unwrap();
    let second = service.regenerate("user-1", &snapshot).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(repo.plan_count("user-1").await, 2, "old plans are kept, inactive");
    let active = service.active_plan("user-1").await.unwrap().unwrap();
    assert_eq!(active.id, second.id);
}

#[tokio::test]
async fn progress_updates_persist_without_regenerating() {
    let repo = Arc::new(MemoryPlanRepository::new());
    let service = PlanService::new(repo);
    let snapshot = onboarding_snapshot(20000.0, 3000.0, 0.0);

    let plan = service.generate_and_persist("user-1", &snapshot).await.unwrap();
    let emergency_id = plan.milestones[0].id.clone();

    let updated = service
        .record_progress("user-1", &emergency_id, 4500.0)
        .await
        .unwrap();
    assert_eq!(updated.id, plan.id, "same plan, not a regeneration");
    assert_eq!(updated.milestones[0].current, 4500.0);
    assert_eq!(updated.milestones[0].progress, 25.0);

    let reloaded = service.active_plan("user-1").await.unwrap().unwrap();
    assert_eq!(reloaded.milestones[0].current, 4500.0);
}

#[tokio::test]
async fn progress_update_without_an_active_plan_is_rejected() {
    let service = PlanService::new(Arc::new(MemoryPlanRepository::new()));
    let result = service.record_progress("nobody", "m1", 10.0).await;
    assert!(matches!(result, Err(Error::Validation(_))));
}
