pub mod analyze;
pub mod cycles;
pub mod eligibility;
