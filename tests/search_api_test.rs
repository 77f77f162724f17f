mod common;

use axum::http::StatusCode;
use candidate_portal::models::candidate::NewCandidate;
use chrono::{Duration, Utc};
use common::{candidate, get_request, spawn_app, TestApp};
use serde_json::Value as JsonValue;
use uuid::Uuid;

async fn search(app: &TestApp, token: &str, query: &str) -> Vec<String> {
    let (status, body) = app
        .send(get_request(
            &format!("/api/recruiter/search{}", query),
            Some(token),
        ))
        .await;
    assert_eq!(status, StatusCode::OK, "search failed: {}", body);
    assert_eq!(
        body["total"].as_u64().unwrap() as usize,
        body["items"].as_array().unwrap().len()
    );
    names(&body["items"])
}

fn names(items: &JsonValue) -> Vec<String> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect()
}

async fn touch(app: &TestApp, id: Uuid, minutes_ago: i64) {
    sqlx::query("UPDATE candidates SET updated_at = ? WHERE id = ?")
        .bind(Utc::now() - Duration::minutes(minutes_ago))
        .bind(id)
        .execute(&app.state.pool)
        .await
        .expect("touch candidate");
}

#[tokio::test]
async fn experience_buckets_use_fixed_ranges() {
    let app = spawn_app().await;
    let token = app.login_as("rec@example.com", "recruiter").await;
    for (name, years) in [("Two", 2), ("Three", 3), ("Nine", 9), ("Ten", 10)] {
        app.seed_candidate(candidate(name, &format!("{}@example.com", name), years))
            .await;
    }

    assert_eq!(search(&app, &token, "?experience=0-2").await, vec!["Two"]);
    assert_eq!(search(&app, &token, "?experience=3-5").await, vec!["Three"]);
    assert_eq!(search(&app, &token, "?experience=6-10").await, vec!["Nine"]);
    assert_eq!(search(&app, &token, "?experience=10%2B").await, vec!["Ten"]);

    // Unknown buckets do not filter.
    assert_eq!(search(&app, &token, "?experience=lots").await.len(), 4);
}

#[tokio::test]
async fn text_query_is_case_sensitive_and_covers_company() {
    let app = spawn_app().await;
    let token = app.login_as("rec@example.com", "recruiter").await;
    app.seed_candidate(NewCandidate {
        current_company: "Acme Corp".into(),
        ..candidate("Alice", "alice@example.com", 4)
    })
    .await;
    app.seed_candidate(NewCandidate {
        skills: vec!["Rust".into(), "SQL".into()],
        location: "Pune".into(),
        ..candidate("Bob", "bob@example.com", 7)
    })
    .await;

    assert_eq!(search(&app, &token, "?q=Acme").await, vec!["Alice"]);
    assert!(search(&app, &token, "?q=acme").await.is_empty());
    assert_eq!(search(&app, &token, "?q=Rust").await, vec!["Bob"]);
    assert_eq!(search(&app, &token, "?location=Pun").await, vec!["Bob"]);
    assert!(search(&app, &token, "?q=Rust&location=Mumbai").await.is_empty());
}

#[tokio::test]
async fn results_are_ordered_by_last_update() {
    let app = spawn_app().await;
    let token = app.login_as("rec@example.com", "recruiter").await;
    let old = app.seed_candidate(candidate("Old", "old@example.com", 1)).await;
    let new = app.seed_candidate(candidate("New", "new@example.com", 1)).await;
    let mid = app.seed_candidate(candidate("Mid", "mid@example.com", 1)).await;
    touch(&app, old, 30).await;
    touch(&app, mid, 20).await;
    touch(&app, new, 10).await;

    assert_eq!(search(&app, &token, "").await, vec!["New", "Mid", "Old"]);
    assert_eq!(
        search(&app, &token, "?q=&location=&experience=").await,
        vec!["New", "Mid", "Old"]
    );
}

#[tokio::test]
async fn search_echoes_filters() {
    let app = spawn_app().await;
    let token = app.login_as("rec@example.com", "recruiter").await;
    let (_, body) = app
        .send(get_request(
            "/api/recruiter/search?q=Python&experience=3-5",
            Some(&token),
        ))
        .await;
    assert_eq!(body["filters"]["q"], "Python");
    assert_eq!(body["filters"]["experience"], "3-5");
    assert!(body["filters"]["location"].is_null());
}

#[tokio::test]
async fn detail_and_dashboard() {
    let app = spawn_app().await;
    let token = app.login_as("rec@example.com", "recruiter").await;
    let mut ids = Vec::new();
    for i in 0..7 {
        let id = app
            .seed_candidate(candidate(&format!("C{}", i), &format!("c{}@example.com", i), i))
            .await;
        ids.push(id);
    }

    let (status, body) = app
        .send(get_request(
            &format!("/api/recruiter/candidates/{}", ids[3]),
            Some(&token),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "C3");
    assert_eq!(body["experience_years"], 3);

    let (status, body) = app
        .send(get_request(
            &format!("/api/recruiter/candidates/{}", Uuid::new_v4()),
            Some(&token),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Candidate not found");

    let (status, body) = app
        .send(get_request("/api/recruiter/dashboard", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_candidates"], 7);
    assert_eq!(body["recent_candidates"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn text_query_covers_role_and_education() {
    let app = spawn_app().await;
    let token = app.login_as("rec@example.com", "recruiter").await;
    app.seed_candidate(NewCandidate {
        current_role: "Data Engineer".into(),
        ..candidate("Dana", "dana@example.com", 5)
    })
    .await;
    app.seed_candidate(NewCandidate {
        education: "M.Sc Statistics".into(),
        ..candidate("Eli", "eli@example.com", 2)
    })
    .await;

    assert_eq!(search(&app, &token, "?q=Engineer").await, vec!["Dana"]);
    assert!(search(&app, &token, "?q=engineer").await.is_empty());
    assert_eq!(search(&app, &token, "?q=Statistics").await, vec!["Eli"]);
    assert!(search(&app, &token, "?q=statistics").await.is_empty());
}
