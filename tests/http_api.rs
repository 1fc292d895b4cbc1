//! End-to-end HTTP tests against a server on an ephemeral port, backed by
//! the in-memory round store.

#![allow(clippy::panic, missing_docs)]

use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::{Value, json};

use round_ledger::api;
use round_ledger::app_state::AppState;
use round_ledger::config::LedgerConfig;
use round_ledger::messages::Locale;
use round_ledger::persistence::MemoryRoundStore;
use round_ledger::service::RoundService;

async fn spawn_server(locale: Locale) -> SocketAddr {
    let service = Arc::new(RoundService::new(Arc::new(MemoryRoundStore::new())));
    let state = AppState::new(service, locale);
    let Ok(app) = api::build_app(state, &LedgerConfig::default()) else {
        panic!("app must build");
    };

    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind ephemeral port");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("local addr");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

async fn get_json(client: &reqwest::Client, url: String) -> (u16, Value) {
    let Ok(response) = client.get(url).send().await else {
        panic!("request failed");
    };
    let status = response.status().as_u16();
    let body = response.json::<Value>().await.unwrap_or_default();
    (status, body)
}

async fn post_round(client: &reqwest::Client, base: &str, body: &Value) -> (u16, Value) {
    let Ok(response) = client.post(format!("{base}/round")).json(body).send().await else {
        panic!("request failed");
    };
    let status = response.status().as_u16();
    let body = response.json::<Value>().await.unwrap_or_default();
    (status, body)
}

#[tokio::test]
async fn full_scoreboard_flow() {
    let addr = spawn_server(Locale::English).await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();

    let (status, body) = post_round(
        &client,
        &base,
        &json!({"round": 1, "mainresults": {"A": 10, "B": 5}, "Legion": {"X": 3}}),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(body["message"], "Round 1 added successfully");

    let (status, _) = post_round(
        &client,
        &base,
        &json!({"round": 2, "mainresults": {"A": 7, "B": 8}, "Legion": {"X": 1, "Y": 2}}),
    )
    .await;
    assert_eq!(status, 201);

    let (status, rounds) = get_json(&client, format!("{base}/rounds")).await;
    assert_eq!(status, 200);
    let rounds: BTreeSet<i64> = rounds
        .as_array()
        .map(|a| a.iter().filter_map(Value::as_i64).collect())
        .unwrap_or_default();
    assert_eq!(rounds, BTreeSet::from([1, 2]));

    let (status, totals) = get_json(&client, format!("{base}/totals")).await;
    assert_eq!(status, 200);
    assert_eq!(
        totals,
        json!({
            "main": [
                {"rank": 1, "team": "A", "score": 17.0},
                {"rank": 2, "team": "B", "score": 13.0}
            ],
            "legion": [
                {"rank": 1, "team": "X", "score": 4.0},
                {"rank": 2, "team": "Y", "score": 2.0}
            ]
        })
    );
}

#[tokio::test]
async fn update_replaces_round_contribution() {
    let addr = spawn_server(Locale::Georgian).await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();

    let _ = post_round(
        &client,
        &base,
        &json!({"round": 3, "mainresults": {"Gone": 100}, "Legion": {"L": 1}}),
    )
    .await;
    let (status, body) = post_round(
        &client,
        &base,
        &json!({"round": 3, "mainresults": {"Stays": 4}, "Legion": {}}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "ტური 3 წარმატებით განახლდა");

    let (_, round) = get_json(&client, format!("{base}/round/3")).await;
    assert_eq!(round["mainresults"], json!({"Stays": 4.0}));
    assert_eq!(round["Legion"], json!({}));

    let (_, totals) = get_json(&client, format!("{base}/totals")).await;
    assert_eq!(
        totals["main"],
        json!([{"rank": 1, "team": "Stays", "score": 4.0}])
    );
    assert_eq!(totals["legion"], json!([]));
}

#[tokio::test]
async fn unknown_and_malformed_rounds() {
    let addr = spawn_server(Locale::Georgian).await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, format!("{base}/round/77")).await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({"message": "Round not found"}));

    let (status, _) = get_json(&client, format!("{base}/round/7x")).await;
    assert_eq!(status, 400);

    let (status, body) = post_round(&client, &base, &json!({"round": 1, "mainresults": {}})).await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "შეცდომა");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn health_reports_store() {
    let addr = spawn_server(Locale::Georgian).await;
    let client = reqwest::Client::new();
    let (status, body) = get_json(&client, format!("http://{addr}/health")).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "ok");
}
