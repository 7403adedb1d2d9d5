//! AWS Lambda handler for deal evaluation
//!
//! Accepts a residential or commercial deal as JSON and returns the calculated
//! result together with its amortization schedule.
//!
//! Supports Lambda Function URLs for direct HTTP access. Reads PROPERTY_RATES_PATH
//! and SCHEDULE_ROWS from the environment at cold start.

use aws_lambda_events::event::lambda_function_urls::{LambdaFunctionUrlRequest, LambdaFunctionUrlResponse};
use aws_lambda_events::http::{HeaderMap, HeaderValue};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use property_investment::amortization::AmortizationRow;
use property_investment::calculator::{CalculatorConfig, DealResult, InvestmentCalculator};
use property_investment::{Deal, RateTables};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Input for one evaluation
#[derive(Debug, Deserialize)]
pub struct CalculationRequest {
    pub deal: Deal,

    /// Overrides the configured schedule length for this request
    #[serde(default)]
    pub schedule_rows: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    pub deal: Deal,
    pub result: DealResult,
    pub schedule: Vec<AmortizationRow>,
    pub execution_time_ms: u64,
}

fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    headers.insert("Access-Control-Allow-Methods", HeaderValue::from_static("POST, OPTIONS"));
    headers.insert("Access-Control-Allow-Headers", HeaderValue::from_static("Content-Type"));
    headers
}

fn response(status: i64, body: Option<String>) -> LambdaFunctionUrlResponse {
    let mut headers = cors_headers();
    if body.is_some() {
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
    }

    LambdaFunctionUrlResponse {
        status_code: status,
        headers,
        body,
        is_base64_encoded: false,
        cookies: Vec::new(),
    }
}

fn error_response(status: i64, message: &str) -> LambdaFunctionUrlResponse {
    let body = serde_json::json!({ "error": message }).to_string();
    response(status, Some(body))
}

/// Lambda handler function
async fn handler(
    calculator: &InvestmentCalculator,
    event: LambdaEvent<LambdaFunctionUrlRequest>,
) -> Result<LambdaFunctionUrlResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;

    // Handle CORS preflight
    if request.request_context.http.method.as_deref() == Some("OPTIONS") {
        return Ok(response(200, None));
    }

    if request.is_base64_encoded {
        return Ok(error_response(400, "Binary request bodies are not supported"));
    }

    let body = request.body.unwrap_or_else(|| "{}".to_string());
    let request: CalculationRequest = match serde_json::from_str(&body) {
        Ok(r) => r,
        Err(e) => {
            return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
        }
    };

    let result = match calculator.evaluate(&request.deal) {
        Ok(result) => result,
        Err(e) => {
            log::warn!("Rejected {} deal: {}", request.deal.state(), e);
            return Ok(error_response(400, &e.to_string()));
        }
    };

    let schedule: Vec<AmortizationRow> = match request.schedule_rows {
        Some(rows) => result.loan().schedule(rows).collect(),
        None => calculator.schedule(&result).collect(),
    };

    let response_body = CalculationResponse {
        deal: request.deal,
        result,
        schedule,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    Ok(response(200, Some(serde_json::to_string(&response_body)?)))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let rates = match env::var("PROPERTY_RATES_PATH") {
        Ok(path) => RateTables::from_csv_path(Path::new(&path))?,
        Err(_) => RateTables::default(),
    };
    let calculator = InvestmentCalculator::new(rates, CalculatorConfig::from_env());
    let calculator = &calculator;

    run(service_fn(move |event: LambdaEvent<LambdaFunctionUrlRequest>| async move {
        handler(calculator, event).await
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_runtime::Context;
    use serde_json::Value;

    fn event(method: &str, body: Option<&str>) -> LambdaEvent<LambdaFunctionUrlRequest> {
        let mut request = LambdaFunctionUrlRequest::default();
        request.request_context.http.method = Some(method.to_string());
        request.body = body.map(str::to_string);
        LambdaEvent::new(request, Context::default())
    }

    fn body_json(response: &LambdaFunctionUrlResponse) -> Value {
        serde_json::from_str(response.body.as_deref().unwrap()).unwrap()
    }

    const RESIDENTIAL_DEAL: &str = r#"{
        "property_type": "residential",
        "purchase_price": 650000,
        "down_payment_pct": 20,
        "interest_rate_pct": 2.0,
        "loan_years": 15,
        "monthly_rent": 5000,
        "state": "TX"
    }"#;

    #[tokio::test]
    async fn test_preflight_has_no_body() {
        let calculator = InvestmentCalculator::default();
        let response = handler(&calculator, event("OPTIONS", None)).await.unwrap();

        assert_eq!(response.status_code, 200);
        assert!(response.body.is_none());
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let calculator = InvestmentCalculator::default();
        let response = handler(&calculator, event("POST", Some("{not json"))).await.unwrap();

        assert_eq!(response.status_code, 400);
        let body = body_json(&response);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn test_base64_body_is_rejected() {
        let calculator = InvestmentCalculator::default();
        let mut event = event("POST", Some("e30="));
        event.payload.is_base64_encoded = true;
        let response = handler(&calculator, event).await.unwrap();

        assert_eq!(response.status_code, 400);
        assert!(body_json(&response)["error"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_deal_is_bad_request() {
        let calculator = InvestmentCalculator::default();
        let deal = RESIDENTIAL_DEAL.replace("\"down_payment_pct\": 20", "\"down_payment_pct\": 120");
        let body = format!(r#"{{"deal": {}}}"#, deal);
        let response = handler(&calculator, event("POST", Some(&body))).await.unwrap();

        assert_eq!(response.status_code, 400);
        let error = body_json(&response)["error"].as_str().unwrap().to_string();
        assert!(error.contains("down_payment_pct"), "{}", error);
    }

    #[tokio::test]
    async fn test_evaluates_deal_with_configured_schedule() {
        let calculator = InvestmentCalculator::default();
        let body = format!(r#"{{"deal": {}}}"#, RESIDENTIAL_DEAL);
        let response = handler(&calculator, event("POST", Some(&body))).await.unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers["Content-Type"], "application/json");

        let body = body_json(&response);
        assert_eq!(body["result"]["property_type"], "residential");
        assert_eq!(body["result"]["status"], "high_risk");
        assert_eq!(body["schedule"].as_array().unwrap().len(), 12);
        assert_eq!(body["deal"]["state"], "TX");
    }

    #[tokio::test]
    async fn test_schedule_rows_override() {
        let calculator = InvestmentCalculator::default();
        let body = format!(r#"{{"deal": {}, "schedule_rows": 3}}"#, RESIDENTIAL_DEAL);
        let response = handler(&calculator, event("POST", Some(&body))).await.unwrap();

        assert_eq!(response.status_code, 200);
        let schedule = body_json(&response)["schedule"].as_array().unwrap().clone();
        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule[2]["payment_index"], 3);

        // Full term stops at payoff
        let body = format!(r#"{{"deal": {}, "schedule_rows": 500}}"#, RESIDENTIAL_DEAL);
        let response = handler(&calculator, event("POST", Some(&body))).await.unwrap();
        assert_eq!(body_json(&response)["schedule"].as_array().unwrap().len(), 180);
    }
}
