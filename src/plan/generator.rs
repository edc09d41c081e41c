use log::debug;
use uuid::Uuid;

use crate::errors::{Error, Result, ValidationError};
use crate::metrics::derive_metrics;
use crate::plan::plan_model::{
    BudgetDistribution, DebtPayoffEntry, Milestone, MilestoneKind, MilestoneStatus, Plan,
    QuarterStatus, QuarterlyTarget, TwelveMonthOutlook, WealthProjection,
};
use crate::reconciliation::Snapshot;

const EMERGENCY_FUND_MONTHS: f64 = 6.0;
const FLEXIBLE_SHARE: f64 = 0.8;
const DEBT_AND_SAVINGS_SHARE: f64 = 0.2;
const DEBT_REDUCTION_SHARE: f64 = 0.7;
const INVESTMENT_SHARE: f64 = 0.3;
/// Flat bonuses applied on top of the year-1 contribution; deliberately not
/// compound interest.
const YEAR3_BONUS: f64 = 0.15;
const YEAR5_BONUS: f64 = 0.40;
const QUARTER_FRACTIONS: [f64; 4] = [0.25, 0.5, 0.75, 1.0];

/// Derives a plan from a reconciled snapshot. Deterministic apart from the
/// generated ids and timestamp; no external calls.
///
/// Fails with `Error::InsufficientData` when the snapshot has no income,
/// rather than producing degenerate zero-filled milestones.
pub fn generate_plan(snapshot: &Snapshot) -> Result<Plan> {
    if snapshot.monthly_income <= 0.0 {
        return Err(Error::InsufficientData(
            "monthly income is required to generate a plan".to_string(),
        ));
    }

    let metrics = derive_metrics(snapshot);
    let monthly_surplus = metrics.savings_capacity;
    debug!(
        "generating plan: surplus={}, debt={}, completeness={}",
        monthly_surplus, snapshot.total_debt_balance, metrics.data_completeness
    );

    let emergency_fund_target = snapshot.monthly_expenses * EMERGENCY_FUND_MONTHS;
    let schedule = payoff_schedule(snapshot);
    let total_interest_saved: f64 = schedule.iter().map(|e| e.interest_saved).sum();

    Ok(Plan {
        id: Uuid::new_v4().to_string(),
        created_at: chrono::Utc::now(),
        is_active: true,
        milestones: milestones(snapshot, emergency_fund_target),
        budget_distribution: budget_distribution(snapshot, monthly_surplus),
        debt_payoff_schedule: schedule,
        total_interest_saved,
        twelve_month_outlook: twelve_month_outlook(snapshot, monthly_surplus),
        wealth_projection: wealth_projection(monthly_surplus),
        quarterly_targets: quarterly_targets(emergency_fund_target, snapshot.total_debt_balance),
        motivational_message: motivational_message(snapshot, monthly_surplus),
        recommendations: recommendations(snapshot, &metrics),
    })
}

/// Recomputes the touched milestone's progress and status for a new current
/// amount, leaving every other derived field of the plan untouched. Pure and
/// idempotent for the same target value; full regeneration is a distinct,
/// explicit operation.
pub fn apply_progress_update(mut plan: Plan, milestone_id: &str, new_current: f64) -> Result<Plan> {
    let milestone = plan
        .milestones
        .iter_mut()
        .find(|m| m.id == milestone_id)
        .ok_or_else(|| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "Milestone '{milestone_id}' not found in plan"
            )))
        })?;

    milestone.current = new_current;
    milestone.recompute_derived();
    Ok(plan)
}

fn milestones(snapshot: &Snapshot, emergency_fund_target: f64) -> Vec<Milestone> {
    let mut emergency = Milestone {
        id: Uuid::new_v4().to_string(),
        kind: MilestoneKind::EmergencyFund,
        title: "Build your emergency fund".to_string(),
        target: emergency_fund_target,
        current: snapshot.current_savings,
        progress: 0.0,
        timeframe_label: "12 months".to_string(),
        status: MilestoneStatus::Pending,
    };
    emergency.recompute_derived();

    // The debt milestone tracks elimination, not accumulation: current stays
    // at 0 and the kind-aware recompute keeps it pending until the balance
    // is fully cleared.
    let mut debt = Milestone {
        id: Uuid::new_v4().to_string(),
        kind: MilestoneKind::DebtElimination,
        title: "Eliminate your debt".to_string(),
        target: snapshot.total_debt_balance,
        current: 0.0,
        progress: 0.0,
        timeframe_label: "24 months".to_string(),
        status: MilestoneStatus::Pending,
    };
    debt.recompute_derived();

    // Always pending until the engine is extended to track contributions; a
    // documented limitation rather than a bug.
    let investment = Milestone {
        id: Uuid::new_v4().to_string(),
        kind: MilestoneKind::Investment,
        title: "Start investing".to_string(),
        target: snapshot.monthly_income * 3.0,
        current: 0.0,
        progress: 0.0,
        timeframe_label: "36 months".to_string(),
        status: MilestoneStatus::Pending,
    };

    vec![emergency, debt, investment]
}

fn budget_distribution(snapshot: &Snapshot, monthly_surplus: f64) -> BudgetDistribution {
    BudgetDistribution {
        essentials: snapshot.monthly_expenses,
        flexible: (monthly_surplus * FLEXIBLE_SHARE).max(0.0),
        debt_and_savings: (monthly_surplus * DEBT_AND_SAVINGS_SHARE).max(0.0),
        debt_and_savings_percentage: if monthly_surplus > 0.0 { 20.0 } else { 0.0 },
    }
}

fn payoff_schedule(snapshot: &Snapshot) -> Vec<DebtPayoffEntry> {
    snapshot
        .debts
        .iter()
        .map(|debt| DebtPayoffEntry {
            creditor: debt.creditor.clone(),
            balance: debt.balance,
            months_to_payoff: if debt.monthly_payment > 0.0 {
                (debt.balance / debt.monthly_payment).ceil() as u32
            } else {
                0
            },
            interest_saved: (debt.balance * (debt.interest_rate / 100.0) * 0.5).round(),
        })
        .collect()
}

fn twelve_month_outlook(snapshot: &Snapshot, monthly_surplus: f64) -> TwelveMonthOutlook {
    let projected_debt_reduction = (monthly_surplus * DEBT_REDUCTION_SHARE * 12.0)
        .min(snapshot.total_debt_balance);
    let projected_savings = snapshot.current_savings + monthly_surplus * INVESTMENT_SHARE * 12.0;
    let narrative = if snapshot.total_debt_balance > projected_debt_reduction {
        format!(
            "In 12 months you can reduce your debt by {projected_debt_reduction:.0} and grow \
             your savings to {projected_savings:.0}."
        )
    } else {
        format!(
            "In 12 months you can be debt-free, with the freed-up surplus rolling into savings \
             of {projected_savings:.0}."
        )
    };
    TwelveMonthOutlook {
        projected_debt_reduction,
        projected_savings,
        narrative,
    }
}

fn wealth_projection(monthly_surplus: f64) -> WealthProjection {
    let monthly_investment = monthly_surplus * INVESTMENT_SHARE;
    let year1 = monthly_investment * 12.0;
    WealthProjection {
        year1,
        year3: year1 * 3.0 + year1 * YEAR3_BONUS,
        year5: year1 * 5.0 + year1 * YEAR5_BONUS,
    }
}

fn quarterly_targets(emergency_fund_target: f64, total_debt: f64) -> Vec<QuarterlyTarget> {
    QUARTER_FRACTIONS
        .iter()
        .enumerate()
        .map(|(index, fraction)| QuarterlyTarget {
            quarter: format!("Q{}", index + 1),
            emergency_fund_target: emergency_fund_target * fraction,
            debt_target: total_debt * fraction,
            status: if index == 0 {
                QuarterStatus::Current
            } else {
                QuarterStatus::Upcoming
            },
            progress_percentage: 0.0,
        })
        .collect()
}

/// Deterministic template; an external copy generator may overwrite this
/// with tailored text.
fn motivational_message(snapshot: &Snapshot, monthly_surplus: f64) -> String {
    if snapshot.total_debt_balance > 0.0 {
        format!(
            "You have {:.0} available every month to work toward a debt-free life. Stay \
             consistent and the plan will follow.",
            monthly_surplus
        )
    } else {
        format!(
            "With no debt and {:.0} free every month, you are in a strong position to build \
             wealth. Keep the momentum.",
            monthly_surplus
        )
    }
}

fn recommendations(
    snapshot: &Snapshot,
    metrics: &crate::metrics::SnapshotMetrics,
) -> Vec<String> {
    let mut items = Vec::new();
    if metrics.debt_to_income_ratio >= 40.0 {
        items.push(
            "Your debt payments take a large share of your income; prioritize paying down the \
             smallest balance first."
                .to_string(),
        );
    }
    if metrics.emergency_fund_months < 3.0 {
        items.push(
            "Build your emergency fund toward three months of expenses before increasing other \
             goals."
                .to_string(),
        );
    }
    if metrics.savings_rate < 10.0 {
        items.push(
            "Try to free at least 10% of your income each month by trimming flexible spending."
                .to_string(),
        );
    }
    if snapshot.goals.is_empty() {
        items.push("Define a concrete financial goal to keep your plan on track.".to_string());
    }
    if items.is_empty() {
        items.push(
            "Your finances look balanced; consider directing more of your surplus into \
             investments."
                .to_string(),
        );
    }
    items
}
