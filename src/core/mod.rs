mod engine;
mod format;
pub mod normalize;
mod types;
mod withdrawal;

pub use engine::{
    DEFAULT_TABLE_YEARS, build_net_worth_table, compound_with_escalation, discount_for_inflation,
    monthly_rate, project_contribution_stream, project_net_worth, project_retirement_stream,
};
pub use format::{
    PLACEHOLDER, format_cell, format_currency, format_optional_cell, format_summary, format_unit,
    format_unit_plain, format_unit_styled,
};
pub use types::{
    ContributionStream, NetWorthInputs, NetWorthRow, NetWorthSummary, Projection,
    RetirementStream, WithdrawalMode, WithdrawalPlan, WithdrawalYear,
};
pub use withdrawal::{pull_into_withdrawal, simulate_withdrawal_plan, withdrawal_rate_estimate};
