use super::types::{
    ContributionStream, NetWorthInputs, NetWorthRow, NetWorthSummary, Projection,
    RetirementStream,
};

pub const MONTHS_PER_YEAR: u32 = 12;
/// Table length used when every stream has a zero horizon.
pub const DEFAULT_TABLE_YEARS: u32 = 15;

/// Converts an annual percent return into the monthly decimal rate used by the
/// compounding loops.
pub fn monthly_rate(annual_pct: f64) -> f64 {
    annual_pct / 12.0 / 100.0
}

/// Month-by-month compounding with an annual escalation of `base`.
///
/// `contribution` maps the current escalated base onto the amount paid in each
/// month of that year. Negative contributions are clamped to zero.
pub fn compound_with_escalation<F>(
    base: f64,
    escalation_pct: f64,
    monthly_rate: f64,
    horizon_years: u32,
    contribution: F,
) -> Projection
where
    F: Fn(f64) -> f64,
{
    let mut corpus = 0.0;
    let mut value = 0.0;
    let mut current = base;

    for _ in 0..horizon_years {
        let monthly = contribution(current).max(0.0);
        for _ in 0..MONTHS_PER_YEAR {
            corpus += monthly;
            value = (value + monthly) * (1.0 + monthly_rate);
        }
        current *= 1.0 + escalation_pct / 100.0;
    }

    Projection::new(corpus, value)
}

pub fn project_contribution_stream(stream: &ContributionStream) -> Projection {
    compound_with_escalation(
        stream.monthly_amount,
        stream.step_up_pct,
        stream.monthly_rate,
        stream.horizon_years,
        |amount| amount,
    )
}

pub fn project_retirement_stream(stream: &RetirementStream) -> Projection {
    compound_with_escalation(
        stream.monthly_salary,
        stream.hike_pct,
        stream.monthly_rate,
        stream.horizon_years,
        |salary| stream.monthly_contribution(salary),
    )
}

pub fn project_net_worth(inputs: &NetWorthInputs) -> NetWorthSummary {
    let sip = project_contribution_stream(&inputs.sip);
    let savings = project_contribution_stream(&inputs.savings);
    let retirement = project_retirement_stream(&inputs.retirement);
    let total = Projection::new(
        sip.corpus + savings.corpus + retirement.corpus,
        sip.value + savings.value + retirement.value,
    );

    NetWorthSummary {
        sip,
        savings,
        retirement,
        total,
    }
}

impl NetWorthSummary {
    /// Total accumulated value rounded for reuse as the inflation calculator's
    /// corpus. `None` until something has accumulated.
    pub fn pull_into_inflation(&self) -> Option<f64> {
        (self.total.value > 0.0).then(|| self.total.value.round())
    }
}

/// Purchasing-power equivalent of `corpus` after `years` of inflation.
///
/// A rate at or below -100% has no meaningful discount factor; the result
/// saturates to an infinity carrying the sign of `corpus` (zero stays zero).
pub fn discount_for_inflation(corpus: f64, rate_pct: f64, years: u32) -> f64 {
    deflate(corpus, inflation_factor(rate_pct, years))
}

pub(crate) fn inflation_factor(rate_pct: f64, years: u32) -> Option<f64> {
    if years == 0 {
        return Some(1.0);
    }
    let base = 1.0 + rate_pct / 100.0;
    if base <= 0.0 {
        return None;
    }
    // Bases just above zero underflow over long horizons.
    let factor = base.powi(i32::try_from(years).unwrap_or(i32::MAX));
    (factor > 0.0).then_some(factor)
}

pub(crate) fn deflate(amount: f64, factor: Option<f64>) -> f64 {
    match factor {
        Some(factor) => amount / factor,
        None if amount == 0.0 => 0.0,
        None => f64::INFINITY.copysign(amount),
    }
}

pub fn build_net_worth_table(inputs: &NetWorthInputs) -> Vec<NetWorthRow> {
    let sip = &inputs.sip;
    let savings = &inputs.savings;
    let retirement = &inputs.retirement;

    let mut table_years = sip
        .horizon_years
        .max(savings.horizon_years)
        .max(retirement.horizon_years);
    if table_years == 0 {
        table_years = DEFAULT_TABLE_YEARS;
    }

    let mut sip_amount = sip.monthly_amount;
    let mut savings_amount = savings.monthly_amount;
    let mut salary = retirement.monthly_salary;
    let mut portfolio = 0.0;
    let mut rows = Vec::with_capacity(table_years as usize);

    for year in 1..=table_years {
        let sip_active = year <= sip.horizon_years;
        let savings_active = year <= savings.horizon_years;
        let retirement_active = year <= retirement.horizon_years;

        // Keeps compounding after contributions stop.
        let contribution = if sip_active { sip_amount.max(0.0) } else { 0.0 };
        for _ in 0..MONTHS_PER_YEAR {
            portfolio = (portfolio + contribution) * (1.0 + sip.monthly_rate);
        }

        let factor = inflation_factor(inputs.sip_inflation_pct, year);
        let salary_shown = shown_amount(retirement_active, salary);
        let sip_shown = shown_amount(sip_active, sip_amount);
        let savings_shown = shown_amount(savings_active, savings_amount);

        rows.push(NetWorthRow {
            year,
            salary: salary_shown,
            salary_real: salary_shown.map(|v| deflate(v, factor)),
            sip_amount: sip_shown,
            sip_amount_real: sip_shown.map(|v| deflate(v, factor)),
            savings_amount: savings_shown,
            savings_amount_real: savings_shown.map(|v| deflate(v, factor)),
            portfolio_value: portfolio,
            portfolio_value_real: deflate(portfolio, factor),
        });

        if sip_active {
            sip_amount *= 1.0 + sip.step_up_pct / 100.0;
        }
        if savings_active {
            savings_amount *= 1.0 + savings.step_up_pct / 100.0;
        }
        if retirement_active {
            salary *= 1.0 + retirement.hike_pct / 100.0;
        }
    }

    rows
}

fn shown_amount(active: bool, amount: f64) -> Option<f64> {
    (active && amount > 0.0).then_some(amount)
}
