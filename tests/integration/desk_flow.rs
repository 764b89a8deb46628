//! End-to-end desk scenarios over the HTTP router.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use golddesk::dashboard::{build_router, DeskState};
use golddesk::types::FetchError;

use crate::mock_price::ScriptedPriceSource;

fn desk(outcomes: Vec<Result<f64, FetchError>>) -> (Router, Arc<ScriptedPriceSource>) {
    let source = Arc::new(ScriptedPriceSource::new(outcomes));
    let state = Arc::new(DeskState::new(source.clone(), 50));
    (build_router(state), source)
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1_000_000).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn new_session(app: &Router) -> String {
    let (status, json) = call(app, "POST", "/api/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_str().unwrap().to_string()
}

fn trade(zone: &str, entry: f64, sl: f64, tp: f64) -> Value {
    json!({
        "zone": zone,
        "zone_high": 4205.0,
        "zone_low": 4185.0,
        "entry": entry,
        "stop_loss": sl,
        "take_profit": tp,
    })
}

#[tokio::test]
async fn fetch_then_defaults_follow_price() {
    let (app, source) = desk(vec![Ok(4195.0)]);
    let id = new_session(&app).await;

    let (_, view) = call(&app, "GET", &format!("/api/sessions/{id}"), None).await;
    assert!(view["quote"].is_null());
    assert_eq!(view["defaults"]["entry"].as_f64(), Some(0.0));

    let (status, notice) = call(&app, "POST", &format!("/api/sessions/{id}/price"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(notice["ok"], true);
    assert_eq!(source.calls(), 1);

    let (_, view) = call(&app, "GET", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(view["quote"]["price"].as_f64(), Some(4195.0));
    assert_eq!(view["defaults"]["entry"].as_f64(), Some(4195.0));
    assert_eq!(view["defaults"]["zone_high"].as_f64(), Some(4195.0));
}

#[tokio::test]
async fn failed_fetch_keeps_previous_quote() {
    let (app, source) = desk(vec![
        Ok(2400.0),
        Err(FetchError::RequestException("connection reset".into())),
        Err(FetchError::InvalidResponse("missing field `price`".into())),
    ]);
    let id = new_session(&app).await;
    let price_uri = format!("/api/sessions/{id}/price");

    call(&app, "POST", &price_uri, None).await;
    let (_, notice) = call(&app, "POST", &price_uri, None).await;
    assert_eq!(notice["ok"], false);
    assert_eq!(
        notice["message"],
        FetchError::RequestException(String::new()).user_message()
    );
    let (_, notice) = call(&app, "POST", &price_uri, None).await;
    assert_eq!(notice["ok"], false);

    let (_, view) = call(&app, "GET", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(view["quote"]["price"].as_f64(), Some(2400.0));
    assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn no_api_key_leaves_session_without_quote() {
    let (app, _) = desk(vec![Err(FetchError::NoApiKey)]);
    let id = new_session(&app).await;

    let (_, notice) = call(&app, "POST", &format!("/api/sessions/{id}/price"), None).await;
    assert_eq!(notice["ok"], false);
    assert_eq!(notice["message"], FetchError::NoApiKey.user_message());

    let (_, view) = call(&app, "GET", &format!("/api/sessions/{id}"), None).await;
    assert!(view["quote"].is_null());
}

#[tokio::test]
async fn saved_plans_keep_call_order() {
    let (app, _) = desk(Vec::new());
    let id = new_session(&app).await;
    let plans_uri = format!("/api/sessions/{id}/plans");

    let setups = [
        trade("Demand Zone", 4195.0, 4183.55, 4213.45),
        trade("Supply Zone", 4200.0, 4205.0, 4180.0),
        trade("Liquidity Pool", 4190.0, 4190.0, 4230.0),
        trade("Fair Value Gap", 4188.0, 4182.0, 4203.0),
    ];
    for setup in &setups {
        let (status, _) = call(&app, "POST", &plans_uri, Some(setup.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, plans) = call(&app, "GET", &plans_uri, None).await;
    let plans = plans.as_array().unwrap();
    assert_eq!(plans.len(), setups.len());
    let labels: Vec<&str> = plans.iter().map(|p| p["zone_label"].as_str().unwrap()).collect();
    assert_eq!(
        labels,
        vec!["Demand Zone", "Supply Zone", "Liquidity Pool", "Fair Value Gap"]
    );

    // Zero-risk setup is stored with RR 0
    assert_eq!(plans[2]["rr"].as_f64(), Some(0.0));
    assert_eq!(plans[1]["zone"], "Premium");
    assert_eq!(plans[0]["zone"], "Discount");

    let (_, summary) = call(&app, "GET", &format!("{plans_uri}/summary"), None).await;
    assert_eq!(summary["count"], 4);
    assert_eq!(summary["strong"], 1);
    assert_eq!(summary["moderate"], 1);
    assert_eq!(summary["weak"], 2);
}

#[tokio::test]
async fn evaluate_does_not_store_anything() {
    let (app, _) = desk(Vec::new());
    let id = new_session(&app).await;

    let (status, eval) = call(
        &app,
        "POST",
        &format!("/api/sessions/{id}/evaluate"),
        Some(trade("Bullish Order Block", 4195.0, 4183.55, 4213.45)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!((eval["rr"].as_f64().unwrap() - 1.611).abs() < 1e-3);

    let (_, plans) = call(&app, "GET", &format!("/api/sessions/{id}/plans"), None).await;
    assert!(plans.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn sessions_do_not_share_state() {
    let (app, _) = desk(vec![Ok(2500.0)]);
    let alice = new_session(&app).await;
    let bob = new_session(&app).await;

    call(&app, "POST", &format!("/api/sessions/{alice}/price"), None).await;
    call(
        &app,
        "POST",
        &format!("/api/sessions/{alice}/plans"),
        Some(trade("Demand Zone", 4195.0, 4183.55, 4213.45)),
    )
    .await;

    let (_, view) = call(&app, "GET", &format!("/api/sessions/{bob}"), None).await;
    assert!(view["quote"].is_null());
    assert!(view["plans"].as_array().unwrap().is_empty());

    let (_, view) = call(&app, "GET", &format!("/api/sessions/{alice}"), None).await;
    assert_eq!(view["plans"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn ended_session_is_gone() {
    let (app, source) = desk(vec![Ok(2500.0)]);
    let id = new_session(&app).await;

    let (status, _) = call(&app, "DELETE", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = call(&app, "POST", &format!("/api/sessions/{id}/price"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
    assert_eq!(source.calls(), 0);
}
