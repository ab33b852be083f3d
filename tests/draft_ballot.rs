//! A standards-track draft taken through IESG evaluation over HTTP.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{event_types, TestApp};

const DRAFT: &str = "draft-ietf-foo-bar";

async fn register(app: &TestApp) {
    let (status, body) = app
        .post(
            app.secretary,
            "/api/docs",
            json!({
                "name": DRAFT,
                "title": "The Foo Protocol",
                "group": "foo",
                "intended_std_level": "ps",
                "ad": app.ads[0],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["document"]["rev"], "00");
}

async fn set_state(app: &TestApp, state: &str) -> Value {
    let (status, body) = app
        .post(
            app.ads[0],
            &format!("/api/docs/{}/state", DRAFT),
            json!({ "state": state }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "moving to {}: {}", state, body);
    body
}

async fn position(app: &TestApp, balloter_index: usize, body: Value) -> (StatusCode, Value) {
    app.post(
        app.ads[balloter_index],
        &format!("/api/docs/{}/position", DRAFT),
        body,
    )
    .await
}

async fn outcome(app: &TestApp) -> Value {
    let (status, body) = app.get(&format!("/api/docs/{}/ballot", DRAFT)).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body["outcome"].clone()
}

/// Registers the draft, publishes -01 and moves it into IESG evaluation.
async fn in_evaluation(app: &TestApp) -> i64 {
    register(app).await;
    let (status, body) = app
        .post(
            app.secretary,
            &format!("/api/docs/{}/revisions", DRAFT),
            json!({ "rev": "01" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["document"]["rev"], "01");

    set_state(app, "pub-req").await;
    set_state(app, "ad-eval").await;
    let body = set_state(app, "iesg-eva").await;
    assert!(event_types(&body).contains(&"created_ballot".to_string()));

    let (status, body) = app
        .post(
            app.ads[0],
            &format!("/api/docs/{}/ballots", DRAFT),
            json!({ "ballot_type": "approve", "auto_yes": true }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let types = event_types(&body);
    assert!(!types.contains(&"created_ballot".to_string()));
    assert!(types.contains(&"sent_ballot_announcement".to_string()));
    assert!(types.contains(&"changed_ballot_position".to_string()));
    body["ballot"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn discuss_blocks_until_cleared() {
    let app = TestApp::new().await;
    in_evaluation(&app).await;

    let issued = app.mailer.sent_matching(&format!("Ballot issued: {}", DRAFT)).await;
    assert_eq!(issued.len(), 1);
    assert!(issued[0].to.iter().any(|a| a.contains("iesg@ietf.org")));

    let outcome_after_yes = outcome(&app).await;
    assert_eq!(outcome_after_yes["passes"], false);

    let (status, _) = position(
        &app,
        1,
        json!({ "position": "discuss", "discuss": "Section 3 contradicts Section 5." }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let blocked = outcome(&app).await;
    assert_eq!(blocked["passes"], false);
    assert!(blocked["text"].as_str().unwrap().contains("Has a DISCUSS."));

    let (status, message) = app
        .post(
            app.ads[1],
            &format!("/api/docs/{}/position/email", DRAFT),
            json!({ "extra_cc": ["foo-chairs@ietf.org"] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", message);
    assert_eq!(
        message["subject"],
        format!("Area Director 1's Discuss on {}-01: (with DISCUSS)", DRAFT)
    );
    assert!(message["cc"]
        .as_array()
        .unwrap()
        .iter()
        .any(|a| a == "foo-chairs@ietf.org"));

    let (status, body) = position(&app, 1, json!({ "position": "noobj" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changed"], true);
    assert_eq!(outcome(&app).await["passes"], true);
}

#[tokio::test]
async fn resubmitting_the_same_position_records_nothing() {
    let app = TestApp::new().await;
    in_evaluation(&app).await;

    let (_, first) = position(&app, 2, json!({ "position": "noobj", "comment": "Nits only." })).await;
    assert_eq!(first["changed"], true);
    let (status, again) = position(&app, 2, json!({ "position": "noobj", "comment": "Nits only." })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["changed"], false);
    assert!(again.get("event").is_none());
}

#[tokio::test]
async fn non_members_cannot_ballot() {
    let app = TestApp::new().await;
    in_evaluation(&app).await;

    let (status, body) = app
        .post(
            app.chair,
            &format!("/api/docs/{}/position", DRAFT),
            json!({ "position": "yes" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn announcement_closes_the_ballot() {
    let app = TestApp::new().await;
    let ballot_id = in_evaluation(&app).await;
    position(&app, 1, json!({ "position": "yes" })).await;

    set_state(&app, "approved").await;
    let body = set_state(&app, "ann").await;
    assert!(event_types(&body).contains(&"closed_ballot".to_string()));

    let (status, body) = position(
        &app,
        2,
        json!({ "ballot_id": ballot_id, "position": "yes" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT, "{}", body);

    let (status, history) = app.get(&format!("/api/docs/{}/history", DRAFT)).await;
    assert_eq!(status, StatusCode::OK);
    let kinds: Vec<&str> = history["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["kind"]["type"].as_str().unwrap())
        .collect();
    assert_eq!(kinds.first(), Some(&"new_revision"));
    assert_eq!(kinds.last(), Some(&"closed_ballot"));
    assert!(app
        .mailer
        .sent_matching(&format!("ID Tracker State Update Notice: {}-01", DRAFT))
        .await
        .len()
        >= 5);
}

#[tokio::test]
async fn independent_stream_drafts_are_not_balloted() {
    let app = TestApp::new().await;
    let (status, _) = app
        .post(
            app.secretary,
            "/api/docs",
            json!({ "name": "draft-smith-foo-independent", "title": "Foo", "stream": "ise" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    for ballot_type in ["approve", "rsab-approve"] {
        let (status, body) = app
            .post(
                app.ads[0],
                "/api/docs/draft-smith-foo-independent/ballots",
                json!({ "ballot_type": ballot_type }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
        assert_eq!(body["code"], "WRONG_DOCUMENT_TYPE");
    }
}

#[tokio::test]
async fn comments_and_lookup() {
    let app = TestApp::new().await;
    register(&app).await;

    let (status, event) = app
        .post(
            app.ads[0],
            &format!("/api/docs/{}/comments", DRAFT),
            json!({ "comment": "Shepherd assigned." }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(event["kind"]["type"], "added_comment");
    assert_eq!(event["desc"], "Shepherd assigned.");

    let (status, view) = app.get(&format!("/api/docs/{}", DRAFT)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["document"]["state"]["state"], "idexists");
    assert!(view["open_ballots"].as_array().unwrap().is_empty());

    let (status, body) = app.get("/api/docs/draft-ietf-foo-missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "DOCUMENT_NOT_FOUND");
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = TestApp::new().await;
    register(&app).await;

    let (status, _) = app
        .post(
            app.secretary,
            "/api/docs",
            json!({ "name": DRAFT, "title": "Again" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn health_check() {
    let app = TestApp::new().await;
    let (status, _) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
}
