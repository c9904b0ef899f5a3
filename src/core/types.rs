use serde::Serialize;

/// A recurring monthly contribution that steps up once a year.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContributionStream {
    pub monthly_amount: f64,
    pub step_up_pct: f64,
    pub monthly_rate: f64,
    pub horizon_years: u32,
}

/// Provident-fund style stream: the monthly contribution is a share of basic
/// pay, which is itself a share of the gross salary.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RetirementStream {
    pub monthly_salary: f64,
    pub basic_pay_pct: f64,
    pub hike_pct: f64,
    pub monthly_rate: f64,
    pub employee_pct: f64,
    pub employer_pct: f64,
    pub horizon_years: u32,
}

impl RetirementStream {
    pub fn monthly_contribution(&self, salary: f64) -> f64 {
        let basic_pay = salary * (self.basic_pay_pct / 100.0);
        basic_pay * ((self.employee_pct + self.employer_pct) / 100.0)
    }
}

/// Amount paid in, accumulated value, and the gains between them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub corpus: f64,
    pub value: f64,
    pub gains: f64,
}

impl Projection {
    pub fn new(corpus: f64, value: f64) -> Self {
        Self {
            corpus,
            value,
            gains: value - corpus,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NetWorthInputs {
    pub sip: ContributionStream,
    /// Annual inflation percent used to discount every table column.
    pub sip_inflation_pct: f64,
    pub savings: ContributionStream,
    pub retirement: RetirementStream,
}

/// Per-stream projections and their sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthSummary {
    pub sip: Projection,
    pub savings: Projection,
    pub retirement: Projection,
    pub total: Projection,
}

/// One year of the net-worth table; `None` marks a stream that is not contributing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthRow {
    pub year: u32,
    pub salary: Option<f64>,
    pub salary_real: Option<f64>,
    pub sip_amount: Option<f64>,
    pub sip_amount_real: Option<f64>,
    pub savings_amount: Option<f64>,
    pub savings_amount_real: Option<f64>,
    pub portfolio_value: f64,
    pub portfolio_value_real: f64,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum WithdrawalMode {
    /// Annual percent of the starting portfolio, spread over twelve months.
    WithdrawalRate(f64),
    /// Monthly amount supplied directly.
    FixedIncome(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WithdrawalPlan {
    pub total_portfolio: f64,
    pub monthly_rate: f64,
    pub inflation_pct: f64,
    pub horizon_years: u32,
    pub mode: WithdrawalMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalYear {
    pub year: u32,
    pub monthly_withdrawal: f64,
    pub portfolio: f64,
    pub portfolio_real: f64,
    pub depleted: bool,
}
