use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;

use crate::core::normalize::{FormValue, amount, number, years};
use crate::core::{
    ContributionStream, NetWorthInputs, NetWorthRow, NetWorthSummary, Projection,
    RetirementStream, WithdrawalMode, WithdrawalPlan, WithdrawalYear, build_net_worth_table,
    discount_for_inflation, format_cell, format_currency, format_optional_cell, format_summary,
    format_unit, format_unit_plain, format_unit_styled, monthly_rate, project_net_worth,
    pull_into_withdrawal, simulate_withdrawal_plan, withdrawal_rate_estimate,
};
use crate::error::FinanceResult;

/// The calculators reachable from both the HTTP API and the `calc` command.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Calculation {
    NetWorth,
    Inflation,
    Swp,
    Format,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum ApiWithdrawalMethod {
    Swr,
    Income,
}

impl ApiWithdrawalMethod {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some("swr") | Some("withdrawal-rate") => ApiWithdrawalMethod::Swr,
            Some(_) => ApiWithdrawalMethod::Income,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct NetWorthPayload {
    sip_amount: Option<FormValue>,
    sip_step_up: Option<FormValue>,
    sip_return: Option<FormValue>,
    sip_inflation: Option<FormValue>,
    sip_horizon: Option<FormValue>,

    sav_amount: Option<FormValue>,
    sav_step_up: Option<FormValue>,
    sav_return: Option<FormValue>,
    sav_horizon: Option<FormValue>,

    epf_salary: Option<FormValue>,
    epf_basic_percent: Option<FormValue>,
    epf_hike: Option<FormValue>,
    epf_rate: Option<FormValue>,
    epf_emp: Option<FormValue>,
    epf_empr: Option<FormValue>,
    epf_horizon: Option<FormValue>,
}

impl NetWorthPayload {
    fn to_inputs(&self) -> NetWorthInputs {
        NetWorthInputs {
            sip: ContributionStream {
                monthly_amount: amount(&self.sip_amount),
                step_up_pct: number(&self.sip_step_up),
                monthly_rate: monthly_rate(number(&self.sip_return)),
                horizon_years: years(&self.sip_horizon),
            },
            sip_inflation_pct: number(&self.sip_inflation),
            savings: ContributionStream {
                monthly_amount: amount(&self.sav_amount),
                step_up_pct: number(&self.sav_step_up),
                monthly_rate: monthly_rate(number(&self.sav_return)),
                horizon_years: years(&self.sav_horizon),
            },
            retirement: RetirementStream {
                monthly_salary: amount(&self.epf_salary),
                basic_pay_pct: number(&self.epf_basic_percent),
                hike_pct: number(&self.epf_hike),
                monthly_rate: monthly_rate(number(&self.epf_rate)),
                employee_pct: number(&self.epf_emp),
                employer_pct: number(&self.epf_empr),
                horizon_years: years(&self.epf_horizon),
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct InflationPayload {
    inf_corpus: Option<FormValue>,
    inf_rate: Option<FormValue>,
    inf_horizon: Option<FormValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SwpPayload {
    swp_total: Option<FormValue>,
    swp_return: Option<FormValue>,
    swp_inflation: Option<FormValue>,
    swp_horizon: Option<FormValue>,
    swp_method: Option<String>,
    #[serde(alias = "swpSWR")]
    swp_swr: Option<FormValue>,
    swp_income: Option<FormValue>,
    /// Result of an earlier inflation calculation, used as the starting
    /// portfolio when `use_inflation_adjusted` is set.
    inflation_adjusted_worth: Option<FormValue>,
    use_inflation_adjusted: bool,
}

impl SwpPayload {
    fn to_plan(&self) -> FinanceResult<WithdrawalPlan> {
        let total_portfolio = if self.use_inflation_adjusted {
            let previous = self.inflation_adjusted_worth.as_ref().map(FormValue::to_f64);
            pull_into_withdrawal(previous)?
        } else {
            amount(&self.swp_total)
        };

        let mode = match ApiWithdrawalMethod::parse(self.swp_method.as_deref()) {
            ApiWithdrawalMethod::Swr => WithdrawalMode::WithdrawalRate(number(&self.swp_swr)),
            ApiWithdrawalMethod::Income => WithdrawalMode::FixedIncome(amount(&self.swp_income)),
        };

        Ok(WithdrawalPlan {
            total_portfolio,
            monthly_rate: monthly_rate(number(&self.swp_return)),
            inflation_pct: number(&self.swp_inflation),
            horizon_years: years(&self.swp_horizon),
            mode,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FormatPayload {
    amount: Option<FormValue>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionDisplay {
    corpus: String,
    gains: String,
    value: String,
}

impl From<Projection> for ProjectionDisplay {
    fn from(value: Projection) -> Self {
        ProjectionDisplay {
            corpus: format_summary(value.corpus),
            gains: format_summary(value.gains),
            value: format_summary(value.value),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AmountDisplay {
    currency: String,
    unit: String,
}

impl AmountDisplay {
    fn new(value: f64) -> Self {
        AmountDisplay {
            currency: format_currency(value),
            unit: format_unit(value),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TotalDisplay {
    corpus: AmountDisplay,
    gains: AmountDisplay,
    value: AmountDisplay,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NetWorthDisplay {
    sip: ProjectionDisplay,
    savings: ProjectionDisplay,
    retirement: ProjectionDisplay,
    total: TotalDisplay,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NetWorthRowResponse {
    #[serde(flatten)]
    row: NetWorthRow,
    cells: Vec<String>,
}

impl From<NetWorthRow> for NetWorthRowResponse {
    fn from(row: NetWorthRow) -> Self {
        let cells = vec![
            row.year.to_string(),
            format_optional_cell(row.salary),
            format_optional_cell(row.salary_real),
            format_optional_cell(row.sip_amount),
            format_optional_cell(row.sip_amount_real),
            format_optional_cell(row.savings_amount),
            format_optional_cell(row.savings_amount_real),
            format_cell(row.portfolio_value),
            format_cell(row.portfolio_value_real),
        ];
        NetWorthRowResponse { row, cells }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NetWorthResponse {
    summary: NetWorthSummary,
    display: NetWorthDisplay,
    pull_to_inflation: Option<f64>,
    rows: Vec<NetWorthRowResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InflationResponse {
    adjusted_value: f64,
    display: String,
    pull_to_withdrawal: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WithdrawalRowResponse {
    #[serde(flatten)]
    row: WithdrawalYear,
    cells: Vec<String>,
}

impl From<WithdrawalYear> for WithdrawalRowResponse {
    fn from(row: WithdrawalYear) -> Self {
        let cells = vec![
            row.year.to_string(),
            format_cell(row.monthly_withdrawal),
            format_cell(row.portfolio),
            format_cell(row.portfolio_real),
        ];
        WithdrawalRowResponse { row, cells }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SwpResponse {
    total_portfolio: f64,
    initial_monthly_withdrawal: f64,
    readout: Option<String>,
    depleted_in_year: Option<u32>,
    rows: Vec<WithdrawalRowResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FormatResponse {
    amount: f64,
    currency: String,
    unit: String,
    unit_plain: String,
    unit_styled: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_net_worth_response(payload: &NetWorthPayload) -> NetWorthResponse {
    let inputs = payload.to_inputs();
    let summary = project_net_worth(&inputs);
    let rows = build_net_worth_table(&inputs);

    NetWorthResponse {
        display: NetWorthDisplay {
            sip: summary.sip.into(),
            savings: summary.savings.into(),
            retirement: summary.retirement.into(),
            total: TotalDisplay {
                corpus: AmountDisplay::new(summary.total.corpus),
                gains: AmountDisplay::new(summary.total.gains),
                value: AmountDisplay::new(summary.total.value),
            },
        },
        pull_to_inflation: summary.pull_into_inflation(),
        summary,
        rows: rows.into_iter().map(NetWorthRowResponse::from).collect(),
    }
}

fn build_inflation_response(payload: &InflationPayload) -> InflationResponse {
    let adjusted_value = discount_for_inflation(
        amount(&payload.inf_corpus),
        number(&payload.inf_rate),
        years(&payload.inf_horizon),
    );

    InflationResponse {
        adjusted_value,
        display: format_summary(adjusted_value),
        pull_to_withdrawal: pull_into_withdrawal(Some(adjusted_value)).ok(),
    }
}

fn build_swp_response(payload: &SwpPayload) -> FinanceResult<SwpResponse> {
    let plan = payload.to_plan()?;
    let rows = simulate_withdrawal_plan(&plan);
    let readout = match plan.mode {
        WithdrawalMode::WithdrawalRate(rate_pct) => {
            withdrawal_rate_estimate(plan.total_portfolio, rate_pct)
                .map(|monthly| format!("≈ {} / month", format_currency(monthly)))
        }
        WithdrawalMode::FixedIncome(_) => None,
    };

    Ok(SwpResponse {
        total_portfolio: plan.total_portfolio,
        initial_monthly_withdrawal: plan.initial_monthly_withdrawal(),
        readout,
        depleted_in_year: rows.iter().find(|row| row.depleted).map(|row| row.year),
        rows: rows.into_iter().map(WithdrawalRowResponse::from).collect(),
    })
}

fn build_format_response(payload: &FormatPayload) -> FormatResponse {
    let value = number(&payload.amount);
    FormatResponse {
        amount: value,
        currency: format_currency(value),
        unit: format_unit(value),
        unit_plain: format_unit_plain(value),
        unit_styled: format_unit_styled(value),
    }
}

/// Runs one calculator over a JSON payload, as the HTTP handlers would.
pub fn evaluate(calculation: Calculation, json: &str) -> FinanceResult<serde_json::Value> {
    let value = match calculation {
        Calculation::NetWorth => {
            let payload: NetWorthPayload = serde_json::from_str(json)?;
            serde_json::to_value(build_net_worth_response(&payload))?
        }
        Calculation::Inflation => {
            let payload: InflationPayload = serde_json::from_str(json)?;
            serde_json::to_value(build_inflation_response(&payload))?
        }
        Calculation::Swp => {
            let payload: SwpPayload = serde_json::from_str(json)?;
            serde_json::to_value(build_swp_response(&payload)?)?
        }
        Calculation::Format => {
            let payload: FormatPayload = serde_json::from_str(json)?;
            serde_json::to_value(build_format_response(&payload))?
        }
    };
    Ok(value)
}

pub fn router() -> Router {
    Router::new()
        .route(
            "/api/net-worth",
            get(net_worth_get_handler).post(net_worth_post_handler),
        )
        .route(
            "/api/inflation",
            get(inflation_get_handler).post(inflation_post_handler),
        )
        .route("/api/swp", get(swp_get_handler).post(swp_post_handler))
        .route(
            "/api/format",
            get(format_get_handler).post(format_post_handler),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(bind: IpAddr, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::new(bind, port);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("fincalc HTTP API listening on http://{addr}");

    axum::serve(listener, router()).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn net_worth_get_handler(query: Result<Query<NetWorthPayload>, QueryRejection>) -> Response {
    match query {
        Ok(Query(payload)) => net_worth_handler_impl(payload),
        Err(rejection) => reject_payload(rejection.body_text()),
    }
}

async fn net_worth_post_handler(body: Result<Json<NetWorthPayload>, JsonRejection>) -> Response {
    match body {
        Ok(Json(payload)) => net_worth_handler_impl(payload),
        Err(rejection) => reject_payload(rejection.body_text()),
    }
}

fn net_worth_handler_impl(payload: NetWorthPayload) -> Response {
    tracing::debug!(?payload, "net worth request");
    json_response(StatusCode::OK, build_net_worth_response(&payload))
}

async fn inflation_get_handler(query: Result<Query<InflationPayload>, QueryRejection>) -> Response {
    match query {
        Ok(Query(payload)) => inflation_handler_impl(payload),
        Err(rejection) => reject_payload(rejection.body_text()),
    }
}

async fn inflation_post_handler(body: Result<Json<InflationPayload>, JsonRejection>) -> Response {
    match body {
        Ok(Json(payload)) => inflation_handler_impl(payload),
        Err(rejection) => reject_payload(rejection.body_text()),
    }
}

fn inflation_handler_impl(payload: InflationPayload) -> Response {
    tracing::debug!(?payload, "inflation request");
    json_response(StatusCode::OK, build_inflation_response(&payload))
}

async fn swp_get_handler(query: Result<Query<SwpPayload>, QueryRejection>) -> Response {
    match query {
        Ok(Query(payload)) => swp_handler_impl(payload),
        Err(rejection) => reject_payload(rejection.body_text()),
    }
}

async fn swp_post_handler(body: Result<Json<SwpPayload>, JsonRejection>) -> Response {
    match body {
        Ok(Json(payload)) => swp_handler_impl(payload),
        Err(rejection) => reject_payload(rejection.body_text()),
    }
}

fn swp_handler_impl(payload: SwpPayload) -> Response {
    tracing::debug!(?payload, "withdrawal plan request");
    match build_swp_response(&payload) {
        Ok(response) => json_response(StatusCode::OK, response),
        Err(e) => {
            tracing::warn!("rejected withdrawal plan request: {e}");
            error_response(StatusCode::BAD_REQUEST, &e.to_string())
        }
    }
}

async fn format_get_handler(query: Result<Query<FormatPayload>, QueryRejection>) -> Response {
    match query {
        Ok(Query(payload)) => json_response(StatusCode::OK, build_format_response(&payload)),
        Err(rejection) => reject_payload(rejection.body_text()),
    }
}

async fn format_post_handler(body: Result<Json<FormatPayload>, JsonRejection>) -> Response {
    match body {
        Ok(Json(payload)) => json_response(StatusCode::OK, build_format_response(&payload)),
        Err(rejection) => reject_payload(rejection.body_text()),
    }
}

fn reject_payload(msg: String) -> Response {
    tracing::warn!("rejected request payload: {msg}");
    error_response(StatusCode::BAD_REQUEST, &msg)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinanceError;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, Uri};
    use tower::ServiceExt;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_net_worth_json() -> &'static str {
        r#"{
          "sipAmount": 10000,
          "sipStepUp": "10",
          "sipReturn": 12,
          "sipInflation": 6,
          "sipHorizon": "15",
          "savAmount": 5000,
          "savStepUp": 5,
          "savReturn": "7",
          "savHorizon": 10,
          "epfSalary": 100000,
          "epfBasicPercent": 50,
          "epfHike": 8,
          "epfRate": 8.25,
          "epfEmp": 12,
          "epfEmpr": 12,
          "epfHorizon": 25
        }"#
    }

    #[test]
    fn net_worth_payload_maps_form_keys() {
        let payload: NetWorthPayload =
            serde_json::from_str(sample_net_worth_json()).expect("json should parse");
        let inputs = payload.to_inputs();

        assert_approx(inputs.sip.monthly_amount, 10_000.0);
        assert_approx(inputs.sip.step_up_pct, 10.0);
        assert_approx(inputs.sip.monthly_rate, 0.01);
        assert_eq!(inputs.sip.horizon_years, 15);
        assert_approx(inputs.sip_inflation_pct, 6.0);
        assert_approx(inputs.savings.monthly_rate, 7.0 / 12.0 / 100.0);
        assert_approx(inputs.retirement.basic_pay_pct, 50.0);
        assert_approx(inputs.retirement.employer_pct, 12.0);
        assert_eq!(inputs.retirement.horizon_years, 25);
    }

    #[test]
    fn net_worth_payload_defaults_missing_and_bad_fields_to_zero() {
        let payload: NetWorthPayload =
            serde_json::from_str(r#"{"sipAmount": "abc", "sipHorizon": "-4"}"#)
                .expect("json should parse");
        let inputs = payload.to_inputs();
        assert_eq!(inputs, NetWorthInputs::default());
    }

    #[test]
    fn net_worth_response_contains_summary_and_table() {
        let value = evaluate(Calculation::NetWorth, sample_net_worth_json()).expect("valid");

        let rows = value["rows"].as_array().expect("rows array");
        assert_eq!(rows.len(), 25);
        assert_eq!(rows[0]["year"], 1);
        assert_eq!(rows[0]["cells"].as_array().map(Vec::len), Some(9));
        assert_eq!(rows[20]["cells"][3], "-");
        assert_eq!(rows[20]["cells"][5], "-");
        assert!(rows[20]["sipAmount"].is_null());

        let total = value["summary"]["total"]["value"].as_f64().expect("total");
        let pulled = value["pullToInflation"].as_f64().expect("pulled");
        assert_approx(pulled, total.round());
        assert!(
            value["display"]["total"]["currency"]
                .as_str()
                .is_some_and(|s| s.starts_with('₹'))
        );
    }

    #[test]
    fn empty_net_worth_payload_still_builds_default_table() {
        let value = evaluate(Calculation::NetWorth, "{}").expect("valid");
        assert_eq!(value["rows"].as_array().map(Vec::len), Some(15));
        assert!(value["pullToInflation"].is_null());
    }

    #[test]
    fn inflation_response_discounts_and_offers_pull_through() {
        let json = r#"{"infCorpus": "1000000", "infRate": 6, "infHorizon": 10}"#;
        let value = evaluate(Calculation::Inflation, json).expect("valid");

        let adjusted = value["adjustedValue"].as_f64().expect("adjusted");
        assert!((adjusted - 558_394.78).abs() < 0.01);
        assert_eq!(value["pullToWithdrawal"].as_f64(), Some(558_395.0));
        assert!(
            value["display"]
                .as_str()
                .is_some_and(|s| s.starts_with("₹5,58,395 <span"))
        );

        let empty = evaluate(Calculation::Inflation, "{}").expect("valid");
        assert_eq!(empty["adjustedValue"].as_f64(), Some(0.0));
        assert!(empty["pullToWithdrawal"].is_null());
    }

    #[test]
    fn swp_withdrawal_rate_mode_reports_readout() {
        let json = r#"{
          "swpTotal": 10000000,
          "swpReturn": 6,
          "swpInflation": 6,
          "swpHorizon": 30,
          "swpMethod": "swr",
          "swpSWR": 4
        }"#;
        let value = evaluate(Calculation::Swp, json).expect("valid");

        assert_approx(
            value["initialMonthlyWithdrawal"].as_f64().expect("initial"),
            10_000_000.0 * 0.04 / 12.0,
        );
        assert_eq!(value["readout"], "≈ ₹33,333 / month");
        let rows = value["rows"].as_array().expect("rows");
        assert!(!rows.is_empty() && rows.len() <= 30);
        match value["depletedInYear"].as_u64() {
            Some(year) => assert_eq!(year as usize, rows.len()),
            None => assert_eq!(rows.len(), 30),
        }
    }

    #[test]
    fn swp_fixed_income_mode_depletes_early() {
        let json = r#"{
          "swpTotal": 240000,
          "swpHorizon": 5,
          "swpMethod": "income",
          "swpIncome": 10000
        }"#;
        let value = evaluate(Calculation::Swp, json).expect("valid");

        assert!(value["readout"].is_null());
        assert_eq!(value["depletedInYear"], 2);
        assert_eq!(value["rows"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn swp_pulls_previous_inflation_adjusted_worth() {
        let json = r#"{
          "swpTotal": 1,
          "useInflationAdjusted": true,
          "inflationAdjustedWorth": 558394.78,
          "swpHorizon": 1,
          "swpMethod": "swr",
          "swpSwr": 4
        }"#;
        let value = evaluate(Calculation::Swp, json).expect("valid");
        assert_eq!(value["totalPortfolio"].as_f64(), Some(558_395.0));
    }

    #[test]
    fn swp_pull_without_inflation_value_is_rejected() {
        let json = r#"{"useInflationAdjusted": true}"#;
        let err = evaluate(Calculation::Swp, json).expect_err("must require inflation value");
        assert!(matches!(err, FinanceError::MissingInflationValue));
        assert_eq!(err.to_string(), "Please calculate Inflation Value first.");
    }

    #[test]
    fn invalid_json_is_reported_as_payload_error() {
        let err = evaluate(Calculation::Format, "{not json").expect_err("must reject");
        assert!(matches!(err, FinanceError::InvalidPayload(_)));
    }

    #[test]
    fn format_response_contains_every_variant() {
        let value = evaluate(Calculation::Format, r#"{"amount": "12345678"}"#).expect("valid");
        assert_eq!(value["currency"], "₹1,23,45,678");
        assert_eq!(value["unit"], "(1.23 Cr)");
        assert_eq!(value["unitPlain"], "1.23 Cr");
        assert!(
            value["unitStyled"]
                .as_str()
                .is_some_and(|s| s.contains("(1.23 Cr)"))
        );
    }

    #[test]
    fn withdrawal_method_defaults_to_rate() {
        assert_eq!(ApiWithdrawalMethod::parse(None), ApiWithdrawalMethod::Swr);
        assert_eq!(ApiWithdrawalMethod::parse(Some("swr")), ApiWithdrawalMethod::Swr);
        assert_eq!(
            ApiWithdrawalMethod::parse(Some("income")),
            ApiWithdrawalMethod::Income
        );
        assert_eq!(
            ApiWithdrawalMethod::parse(Some("fixed")),
            ApiWithdrawalMethod::Income
        );
    }

    #[test]
    fn query_string_fields_are_normalized() {
        let uri: Uri = "http://localhost/api/swp?swpTotal=1000000&swpMethod=income&swpIncome=5000abc&swpHorizon=10.5"
            .parse()
            .expect("valid uri");
        let Query(payload) = Query::<SwpPayload>::try_from_uri(&uri).expect("query should parse");
        let plan = payload.to_plan().expect("valid plan");

        assert_approx(plan.total_portfolio, 1_000_000.0);
        assert_eq!(plan.horizon_years, 10);
        assert_eq!(plan.mode, WithdrawalMode::FixedIncome(5_000.0));
    }

    async fn send(request: Request<Body>) -> (StatusCode, Option<String>, serde_json::Value) {
        let response = router().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let cache_control = response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let body = serde_json::from_slice(&bytes).expect("body should be JSON");
        (status, cache_control, body)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("valid request")
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).expect("valid request")
    }

    #[tokio::test]
    async fn unknown_route_returns_json_not_found() {
        let (status, cache_control, body) = send(get_request("/api/unknown")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert_eq!(body["error"], "Not found");
    }

    #[tokio::test]
    async fn inflation_get_reads_query_string() {
        let (status, cache_control, body) =
            send(get_request("/api/inflation?infCorpus=1000000&infRate=6&infHorizon=10")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert_eq!(body["pullToWithdrawal"].as_f64(), Some(558_395.0));
    }

    #[tokio::test]
    async fn net_worth_post_reads_json_body() {
        let (status, cache_control, body) =
            send(post_json("/api/net-worth", sample_net_worth_json())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert_eq!(body["rows"].as_array().map(Vec::len), Some(25));
    }

    #[tokio::test]
    async fn format_get_and_post_agree() {
        let (_, _, from_query) = send(get_request("/api/format?amount=12345678")).await;
        let (_, _, from_body) = send(post_json("/api/format", r#"{"amount": 12345678}"#)).await;
        assert_eq!(from_query["currency"], "₹1,23,45,678");
        assert_eq!(from_query, from_body);
    }

    #[tokio::test]
    async fn missing_inflation_value_is_bad_request() {
        let (status, cache_control, body) =
            send(post_json("/api/swp", r#"{"useInflationAdjusted": true}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert_eq!(body["error"], "Please calculate Inflation Value first.");
    }

    #[tokio::test]
    async fn malformed_json_body_is_json_bad_request() {
        let (status, cache_control, body) = send(post_json("/api/swp", "{bad")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()));
    }

    #[tokio::test]
    async fn malformed_query_is_json_bad_request() {
        let (status, cache_control, body) =
            send(get_request("/api/swp?useInflationAdjusted=maybe")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert!(body["error"].is_string());
    }
}
