pub mod generator;
pub mod memory_repository;
pub mod plan_model;
pub mod plan_service;
pub mod plan_traits;

pub use generator::{apply_progress_update, generate_plan};
pub use memory_repository::MemoryPlanRepository;
pub use plan_model::{
    BudgetDistribution, DebtPayoffEntry, Milestone, MilestoneKind, MilestoneStatus, Plan,
    QuarterStatus, QuarterlyTarget, TwelveMonthOutlook, WealthProjection,
};
pub use plan_service::PlanService;
pub use plan_traits::{PlanRepositoryTrait, PlanServiceTrait};
