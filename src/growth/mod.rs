//! SIP growth projection with step-up contributions and inflation

mod step_up;
mod projector;
pub mod irr;

pub use step_up::{ContributionStep, StepUpPlan, StepUpRule};
pub use projector::{project_growth, GrowthInputs, GrowthProjection, GrowthRow, GrowthSummary, MAX_PROJECTION_YEARS};
pub use irr::{annualized_return, calculate_irr};
