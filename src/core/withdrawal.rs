use super::engine::{MONTHS_PER_YEAR, deflate, inflation_factor};
use super::types::{WithdrawalMode, WithdrawalPlan, WithdrawalYear};
use crate::error::FinanceError;

impl WithdrawalPlan {
    pub fn initial_monthly_withdrawal(&self) -> f64 {
        match self.mode {
            WithdrawalMode::WithdrawalRate(rate_pct) => {
                self.total_portfolio * (rate_pct / 100.0) / 12.0
            }
            WithdrawalMode::FixedIncome(amount) => amount,
        }
    }
}

/// Year-by-year drawdown of the portfolio. The year in which the portfolio
/// runs dry is the last row.
pub fn simulate_withdrawal_plan(plan: &WithdrawalPlan) -> Vec<WithdrawalYear> {
    let mut portfolio = plan.total_portfolio;
    let mut monthly_withdrawal = plan.initial_monthly_withdrawal();
    let mut rows = Vec::new();

    for year in 1..=plan.horizon_years {
        if year > 1 {
            monthly_withdrawal *= 1.0 + plan.inflation_pct / 100.0;
        }

        for _ in 0..MONTHS_PER_YEAR {
            if portfolio > 0.0 {
                portfolio = portfolio * (1.0 + plan.monthly_rate) - monthly_withdrawal;
            }
            if portfolio < 0.0 {
                portfolio = 0.0;
            }
        }

        let depleted = portfolio <= 0.0;
        rows.push(WithdrawalYear {
            year,
            monthly_withdrawal,
            portfolio,
            portfolio_real: deflate(portfolio, inflation_factor(plan.inflation_pct, year)),
            depleted,
        });

        if depleted {
            break;
        }
    }

    rows
}

/// Monthly income implied by a withdrawal rate, shown next to the inputs
/// while they are being edited. Only meaningful when both are positive.
pub fn withdrawal_rate_estimate(total_portfolio: f64, rate_pct: f64) -> Option<f64> {
    (total_portfolio > 0.0 && rate_pct > 0.0).then(|| total_portfolio * (rate_pct / 100.0) / 12.0)
}

/// Carries a previously computed inflation-adjusted worth into the plan's
/// starting portfolio.
pub fn pull_into_withdrawal(inflation_adjusted: Option<f64>) -> Result<f64, FinanceError> {
    match inflation_adjusted {
        Some(value) if value > 0.0 && value.is_finite() => Ok(value.round()),
        _ => Err(FinanceError::MissingInflationValue),
    }
}
