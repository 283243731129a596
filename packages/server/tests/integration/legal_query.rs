use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn anonymous_query_has_no_user() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            routes::LEGAL_QUERIES,
            &json!({"content": "My landlord kept my deposit."}),
        )
        .await;

    assert_eq!(res.status, 201);
    assert_eq!(res.body["content"], "My landlord kept my deposit.");
    assert!(res.body["user_id"].is_null());
}

#[tokio::test]
async fn authenticated_query_is_attributed_to_the_user() {
    let app = TestApp::spawn().await;
    let token = app
        .create_authenticated_user("client@example.com", "securepass")
        .await;

    let res = app
        .post_with_token(
            routes::LEGAL_QUERIES,
            &json!({"content": "Inheritance dispute with my siblings."}),
            &token,
        )
        .await;

    assert_eq!(res.status, 201);
    assert!(res.body["user_id"].is_number());
}

#[tokio::test]
async fn invalid_token_does_not_fall_back_to_anonymous() {
    let app = TestApp::spawn().await;

    let res = app
        .post_with_token(
            routes::LEGAL_QUERIES,
            &json!({"content": "A question."}),
            "expired.or.garbage",
        )
        .await;

    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_INVALID");
}

#[tokio::test]
async fn list_returns_newest_first() {
    let app = TestApp::spawn().await;
    let first = app.create_query("First question").await;
    let second = app.create_query("Second question").await;

    let res = app.get(routes::LEGAL_QUERIES).await;

    assert_eq!(res.status, 200);
    let ids: Vec<i64> = res.body.as_array().unwrap().iter().map(|q| q["id"].as_i64().unwrap()).collect();
    let first_pos = ids.iter().position(|&id| id == first as i64).unwrap();
    let second_pos = ids.iter().position(|&id| id == second as i64).unwrap();
    assert!(second_pos < first_pos, "newer query should come first");
}

#[tokio::test]
async fn empty_content_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app.post(routes::LEGAL_QUERIES, &json!({"content": "   "})).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}
