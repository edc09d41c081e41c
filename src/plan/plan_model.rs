use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    Pending,
    InProgress,
    Completed,
}

impl MilestoneStatus {
    /// Status is a pure function of (current, target), never set
    /// independently: completed at or past the target, in progress once any
    /// amount has accumulated, pending otherwise.
    pub fn for_amounts(current: f64, target: f64) -> Self {
        if current >= target {
            MilestoneStatus::Completed
        } else if current > 0.0 {
            MilestoneStatus::InProgress
        } else {
            MilestoneStatus::Pending
        }
    }
}

/// Which of the fixed milestone slots this is. Drives how derived fields
/// recompute: debt elimination has no partial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneKind {
    EmergencyFund,
    DebtElimination,
    Investment,
}

/// A system-generated target with a derived status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub kind: MilestoneKind,
    pub title: String,
    pub target: f64,
    pub current: f64,
    /// Percent toward the target, clamped to 100.
    pub progress: f64,
    pub timeframe_label: String,
    pub status: MilestoneStatus,
}

impl Milestone {
    /// Recomputes progress and status from the amounts. The debt-elimination
    /// milestone only flips once the balance is fully cleared, so it never
    /// reports an in-progress state; the other kinds follow the generic
    /// pending/in-progress/completed rule. A zero target yields a consistent
    /// pending pair rather than an instantly-completed milestone.
    pub fn recompute_derived(&mut self) {
        match self.kind {
            MilestoneKind::DebtElimination => {
                let cleared = self.target == 0.0 || self.current >= self.target;
                self.progress = if cleared { 100.0 } else { 0.0 };
                self.status = if cleared {
                    MilestoneStatus::Completed
                } else {
                    MilestoneStatus::Pending
                };
            }
            MilestoneKind::EmergencyFund | MilestoneKind::Investment => {
                if self.target > 0.0 {
                    self.progress = (self.current / self.target * 100.0).min(100.0);
                    self.status = MilestoneStatus::for_amounts(self.current, self.target);
                } else {
                    self.progress = 0.0;
                    self.status = MilestoneStatus::Pending;
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDistribution {
    pub essentials: f64,
    pub flexible: f64,
    pub debt_and_savings: f64,
    pub debt_and_savings_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPayoffEntry {
    pub creditor: String,
    pub balance: f64,
    /// ceil(balance / monthly payment); 0 is the "needs a payment amount"
    /// sentinel, not an instant payoff.
    pub months_to_payoff: u32,
    /// Heuristic: half the nominal annual interest, rounded. Not an
    /// amortization figure.
    pub interest_saved: f64,
}

/// First-year outlook splitting the monthly surplus 70/30 between debt
/// reduction and savings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwelveMonthOutlook {
    pub projected_debt_reduction: f64,
    pub projected_savings: f64,
    pub narrative: String,
}

/// Fixed-bonus growth figures. year3 and year5 add flat 15% / 40% bonuses on
/// the year-1 contribution rather than compounding; downstream expectations
/// are pegged to these numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WealthProjection {
    pub year1: f64,
    pub year3: f64,
    pub year5: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuarterStatus {
    Current,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlyTarget {
    pub quarter: String,
    pub emergency_fund_target: f64,
    pub debt_target: f64,
    pub status: QuarterStatus,
    /// Always 0 at generation time; not retroactively computed from history.
    pub progress_percentage: f64,
}

/// The generated plan artifact. Generated fresh from a snapshot on demand;
/// progress updates mutate specific milestones without regenerating the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
    pub milestones: Vec<Milestone>,
    pub budget_distribution: BudgetDistribution,
    pub debt_payoff_schedule: Vec<DebtPayoffEntry>,
    pub total_interest_saved: f64,
    pub twelve_month_outlook: TwelveMonthOutlook,
    pub wealth_projection: WealthProjection,
    pub quarterly_targets: Vec<QuarterlyTarget>,
    pub motivational_message: String,
    pub recommendations: Vec<String>,
}
