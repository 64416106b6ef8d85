use std::io::Write;

use chrono::{TimeZone, Utc};
use dao_cross::{
    FixedClock,
    cli::{handle_generate, handle_rank, load_orders},
};
use serde_json::Value;
use tempfile::NamedTempFile;

fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2022, 11, 20, 9, 30, 0).unwrap())
}

fn input(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn rank_prints_orders_in_precedence_order() {
    let file = input(
        r#"[
        {"base_token":"ETH","quote_token":"BTC","action":"sell","quantity":3,"deposit_address":-1,"wallet_address":-1},
        {"base_token":"ETH","quote_token":"BTC","action":"buy","quantity":7,"limit_price":2.5,"deposit_address":1,"wallet_address":"w1"},
        {"base_token":"ETH","quote_token":"BTC","action":"buy","quantity":5,"timestamp":"2022-11-20T10:00:00Z","deposit_address":2,"wallet_address":2}
    ]"#,
    );
    let mut out = Vec::new();
    handle_rank(&mut out, file.path(), false, &clock()).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("quantity=7 limit_price=2.5"));
    assert!(lines[1].contains("quantity=5 limit_price=inf timestamp=2022-11-20 10:00:00+00:00"));
    assert!(lines[2].contains("action=sell quantity=3 limit_price=-inf"));
}

#[test]
fn rank_json_output() {
    let file = input(
        r#"[{"base_token":"ETH","quote_token":"BTC","action":"buy","quantity":1,"deposit_address":1,"wallet_address":1}]"#,
    );
    let mut out = Vec::new();
    handle_rank(&mut out, file.path(), true, &clock()).unwrap();
    let v: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v[0]["base_token"], "ETH");
    assert!(v[0]["limit_price"].is_null());
}

#[test]
fn rank_fails_fast_on_invalid_order() {
    let file = input(
        r#"[
        {"base_token":"ETH","quote_token":"BTC","action":"buy","quantity":1,"deposit_address":1,"wallet_address":1},
        {"base_token":"ETH","quote_token":"BTC","action":"hold","quantity":1,"deposit_address":1,"wallet_address":1}
    ]"#,
    );
    let err = load_orders(file.path(), &clock()).unwrap_err();
    assert!(format!("{err:#}").contains("order #1"));
    assert!(format!("{err:#}").contains("hold"));
}

#[test]
fn rank_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    assert!(load_orders(&missing, &clock()).is_err());
}

#[test]
fn generate_is_reproducible() {
    let mut a = Vec::new();
    let mut b = Vec::new();
    handle_generate(&mut a, 15, 3, false, &clock()).unwrap();
    handle_generate(&mut b, 15, 3, false, &clock()).unwrap();
    assert_eq!(a, b);
    assert_eq!(String::from_utf8(a).unwrap().lines().count(), 15);
}
