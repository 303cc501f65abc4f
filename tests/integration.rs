//! Integration tests for the duration calculator.
//!
//! This test suite drives the HTTP API end to end and covers:
//! - Full-time calculations with and without shortening
//! - Part-time extension and the 1.5x ceiling
//! - The negligible-difference rule
//! - Shortening cap and the unfinished training buckets
//! - Hours input mode
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use teilzeit_engine::api::{AppState, create_router};
use teilzeit_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/bbig").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

async fn post_calculate(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn create_request(base: i64, teilzeit: Value, eingabetyp: &str, gruende: Value) -> Value {
    json!({
        "basis_dauer_monate": base,
        "vollzeit_stunden": 40,
        "teilzeit_eingabe": teilzeit,
        "eingabetyp": eingabetyp,
        "verkuerzungsgruende": gruende
    })
}

async fn calculate_ok(body: Value) -> Value {
    let (status, json) = post_calculate(create_router_for_test(), body).await;
    assert_eq!(status, StatusCode::OK, "unexpected response: {}", json);
    json["result"].clone()
}

// =============================================================================
// Full-time scenarios
// =============================================================================

#[tokio::test]
async fn test_full_time_without_reasons() {
    let result = calculate_ok(create_request(36, json!(100), "prozent", json!({}))).await;

    assert_eq!(result["finale_dauer_monate"], 36);
    assert_eq!(result["verlaengerung_durch_teilzeit_monate"], 0);
    assert_eq!(result["verkuerzung_gesamt_monate"], 0);
    assert_eq!(result["regel_8_abs_3_angewendet"], false);
    assert_eq!(result["gesamt_wochen"], 156);
}

#[tokio::test]
async fn test_full_time_with_abitur() {
    let result = calculate_ok(create_request(
        36,
        json!(100),
        "prozent",
        json!({"abitur": true}),
    ))
    .await;

    assert_eq!(result["verkuerzung_gesamt_monate"], 12);
    assert_eq!(result["verkuerzte_dauer_monate"], 24);
    assert_eq!(result["finale_dauer_monate"], 24);
}

// =============================================================================
// Part-time extension and ceiling
// =============================================================================

#[tokio::test]
async fn test_half_time_shortest_base_is_capped() {
    let result = calculate_ok(create_request(24, json!(50), "prozent", json!({}))).await;

    assert_eq!(result["obergrenze_monate"], 36);
    assert_eq!(result["finale_dauer_monate"], 36);
    assert_eq!(result["nach_schritt1_monate"].as_f64(), Some(48.0));
    assert_eq!(result["nach_schritt2_monate"].as_f64(), Some(36.0));
}

#[tokio::test]
async fn test_half_time_longest_base_is_capped() {
    let result = calculate_ok(create_request(42, json!(50), "prozent", json!({}))).await;

    assert_eq!(result["obergrenze_monate"], 63);
    assert_eq!(result["finale_dauer_monate"], 63);
    assert_eq!(result["verlaengerung_durch_teilzeit_monate"], 21);
}

#[tokio::test]
async fn test_abitur_at_three_quarter_time() {
    let result = calculate_ok(create_request(
        36,
        json!(75),
        "prozent",
        json!({"abitur": true}),
    ))
    .await;

    assert_eq!(result["finale_dauer_monate"], 32);
    assert_eq!(result["verlaengerung_durch_teilzeit_monate"], 8);
    assert_eq!(result["wochenstunden"].as_f64(), Some(30.0));
    assert_eq!(result["finale_dauer_jahre"].as_f64(), Some(2.7));
}

// =============================================================================
// Negligible-difference rule
// =============================================================================

#[tokio::test]
async fn test_small_extension_reverts_to_base() {
    let result = calculate_ok(create_request(36, json!(95), "prozent", json!({}))).await;

    assert_eq!(result["verlaengerte_dauer_monate"], 37);
    assert_eq!(result["finale_dauer_monate"], 36);
    assert_eq!(result["regel_8_abs_3_angewendet"], true);

    let steps = result["audit_trace"]["steps"].as_array().unwrap();
    let tolerance = steps
        .iter()
        .find(|step| step["rule_id"] == "negligible_difference")
        .unwrap();
    assert_eq!(tolerance["clause_ref"], "§ 8 Abs. 3 BBiG");
    assert_eq!(tolerance["output"]["applied"], true);
}

#[tokio::test]
async fn test_extension_beyond_band_stands() {
    // 36 / 0.8 = 45, more than 6 months over the base
    let result = calculate_ok(create_request(36, json!(80), "prozent", json!({}))).await;

    assert_eq!(result["finale_dauer_monate"], 45);
    assert_eq!(result["regel_8_abs_3_angewendet"], false);
}

// =============================================================================
// Shortening
// =============================================================================

#[tokio::test]
async fn test_all_reasons_at_half_time() {
    let gruende = json!({
        "abitur": true,
        "realschule": true,
        "alter_ueber_21": true,
        "familien_pflegeverantwortung": true,
        "familien_kinderbetreuung": true,
        "vorkenntnisse_monate": 12,
        "beruf_q1": true,
        "beruf_q2": true,
        "beruf_q2_dauer_monate": 12
    });
    let result = calculate_ok(create_request(36, json!(50), "prozent", gruende)).await;

    assert_eq!(result["verkuerzung_gesamt_monate"], 12);
    assert_eq!(result["verkuerzte_dauer_monate"], 24);
    assert_eq!(result["finale_dauer_monate"], 48);
    assert_eq!(result["verlaengerung_durch_teilzeit_monate"], 24);

    let warnings = result["audit_trace"]["warnings"].as_array().unwrap();
    assert!(warnings.iter().any(|w| w["code"] == "SHORTENING_CAPPED"));
}

#[tokio::test]
async fn test_unfinished_training_buckets() {
    for (completed, expected) in [(5, 0), (6, 6), (11, 6), (12, 12)] {
        let gruende = json!({"beruf_q2": true, "beruf_q2_dauer_monate": completed});
        let result = calculate_ok(create_request(36, json!(100), "prozent", gruende)).await;
        assert_eq!(
            result["verkuerzung_gesamt_monate"], expected,
            "completed {} months",
            completed
        );
    }
}

#[tokio::test]
async fn test_age_from_alter_field() {
    let mut body = create_request(36, json!(100), "prozent", json!({}));
    body["alter"] = json!(24);
    let result = calculate_ok(body).await;

    assert_eq!(result["verkuerzung_gesamt_monate"], 12);
}

#[tokio::test]
async fn test_realschule_shortens_by_six() {
    let result = calculate_ok(create_request(
        36,
        json!(100),
        "prozent",
        json!({"realschule": true}),
    ))
    .await;

    assert_eq!(result["verkuerzung_gesamt_monate"], 6);
    assert_eq!(result["finale_dauer_monate"], 30);
    assert_eq!(result["finale_dauer_jahre"].as_f64(), Some(2.5));
}

// =============================================================================
// Hours input mode
// =============================================================================

#[tokio::test]
async fn test_hours_mode_matches_percent_mode() {
    let by_hours = calculate_ok(create_request(36, json!(30), "stunden", json!({}))).await;
    let by_percent = calculate_ok(create_request(36, json!(75), "prozent", json!({}))).await;

    assert_eq!(by_hours["finale_dauer_monate"], by_percent["finale_dauer_monate"]);
    assert_eq!(by_hours["teilzeit_prozent"].as_f64(), Some(75.0));
}

#[tokio::test]
async fn test_hours_below_half_of_full_time_rejected() {
    let (status, json) = post_calculate(
        create_router_for_test(),
        create_request(36, json!(19.5), "stunden", json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["details"]["field"], "teilzeit_eingabe");
}

#[tokio::test]
async fn test_huge_hours_value_rejected() {
    let (status, json) = post_calculate(
        create_router_for_test(),
        create_request(36, json!(7e28), "stunden", json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert!(json.get("result").is_none());
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_base_duration_out_of_range() {
    for base in [23, 43, -1] {
        let (status, json) = post_calculate(
            create_router_for_test(),
            create_request(base, json!(75), "prozent", json!({})),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"]["details"]["field"], "basis_dauer_monate");
        assert!(json.get("result").is_none());
    }
}

#[tokio::test]
async fn test_percent_below_minimum() {
    let (status, json) = post_calculate(
        create_router_for_test(),
        create_request(36, json!(49), "prozent", json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["error"]["message"].as_str().unwrap().contains("50"));
}

#[tokio::test]
async fn test_unfinished_training_without_duration() {
    let (status, json) = post_calculate(
        create_router_for_test(),
        create_request(36, json!(75), "prozent", json!({"beruf_q2": true})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["details"]["field"], "beruf_q2_dauer_monate");
}

#[tokio::test]
async fn test_unknown_input_type() {
    let (status, json) = post_calculate(
        create_router_for_test(),
        create_request(36, json!(75), "wochen", json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_wrong_type_for_flag() {
    let (status, json) = post_calculate(
        create_router_for_test(),
        create_request(36, json!(75), "prozent", json!({"abitur": "ja"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_missing_reasons_object() {
    let body = json!({
        "basis_dauer_monate": 36,
        "vollzeit_stunden": 40,
        "teilzeit_eingabe": 75,
        "eingabetyp": "prozent"
    });
    let (status, json) = post_calculate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "MISSING_FIELDS");
    assert_eq!(json["error"]["details"]["missing"][0], "verkuerzungsgruende");
}

#[tokio::test]
async fn test_identical_requests_give_identical_results() {
    let body = create_request(33, json!(67.5), "prozent", json!({"realschule": true}));
    let first = calculate_ok(body.clone()).await;
    let second = calculate_ok(body).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_meta_is_present() {
    let (status, json) = post_calculate(
        create_router_for_test(),
        create_request(36, json!(75), "prozent", json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["meta"]["calculation_id"].is_string());
    assert!(json["meta"]["timestamp"].is_string());
    assert_eq!(json["meta"]["engine_version"], env!("CARGO_PKG_VERSION"));
}
