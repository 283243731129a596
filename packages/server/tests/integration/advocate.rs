use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn directory_is_seeded_and_sorted_by_name() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::ADVOCATES).await;

    assert_eq!(res.status, 200);
    let advocates = res.body.as_array().unwrap();
    assert!(advocates.len() >= 4, "expected seeded advocates");

    let names: Vec<&str> = advocates.iter().map(|a| a["name"].as_str().unwrap()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[tokio::test]
async fn advocate_can_be_added_to_the_directory() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            routes::ADVOCATES,
            &json!({
                "name": "Zara Siddiqui",
                "specialty": "Tax Law",
                "contact_info": "zara@example.com",
            }),
        )
        .await;

    assert_eq!(res.status, 201);
    assert_eq!(res.body["name"], "Zara Siddiqui");
    assert_eq!(res.body["specialty"], "Tax Law");

    let list = app.get(routes::ADVOCATES).await;
    assert!(
        list.body
            .as_array()
            .unwrap()
            .iter()
            .any(|a| a["name"] == "Zara Siddiqui")
    );
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app.post(routes::ADVOCATES, &json!({"name": "  "})).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}
