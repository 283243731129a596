use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn consultation_is_disabled_without_an_api_key() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            routes::CONSULTATION,
            &json!({"message": "What are my tenant rights?"}),
        )
        .await;

    assert_eq!(res.status, 503);
    assert_eq!(res.body["code"], "ADVICE_DISABLED");
}

#[tokio::test]
async fn empty_message_is_rejected_before_the_provider_is_consulted() {
    let app = TestApp::spawn().await;

    let res = app.post(routes::CONSULTATION, &json!({"message": "  "})).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}
