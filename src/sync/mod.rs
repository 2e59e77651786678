mod execute;
mod plan;

pub use execute::{execute_sync, ExecuteError, ExecuteOptions, SyncReport};
pub use plan::{build_sync_plan, PlanError, SyncPlan};
