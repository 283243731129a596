use serde_json::json;

use crate::common::{TestApp, routes};

mod document_crud {
    use super::*;

    #[tokio::test]
    async fn record_without_file_gets_the_placeholder() {
        let app = TestApp::spawn().await;
        let query_id = app.create_query("A question").await;
        let case_id = app.create_case(query_id).await;

        let res = app
            .post(
                routes::DOCUMENTS,
                &json!({"case_id": case_id, "title": "Affidavit", "document_type": "Affidavit"}),
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["starred"], false);
        let file_path = res.body["file_path"].as_str().unwrap();
        assert!(file_path.starts_with("https://"), "expected placeholder URL");
    }

    #[tokio::test]
    async fn record_on_missing_case_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::DOCUMENTS, &json!({"case_id": 999999, "title": "X"}))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn update_can_clear_the_description() {
        let app = TestApp::spawn().await;
        let query_id = app.create_query("A question").await;
        let case_id = app.create_case(query_id).await;

        let created = app
            .post(
                routes::DOCUMENTS,
                &json!({"case_id": case_id, "title": "Notes", "description": "Draft"}),
            )
            .await;
        let doc_id = created.id();

        let res = app
            .put(&routes::document(doc_id), &json!({"description": null}))
            .await;

        assert_eq!(res.status, 200);
        assert!(res.body["description"].is_null());
        // Fields left out of the body are untouched.
        assert_eq!(res.body["title"], "Notes");
    }

    #[tokio::test]
    async fn delete_then_fetch_is_not_found() {
        let app = TestApp::spawn().await;
        let query_id = app.create_query("A question").await;
        let case_id = app.create_case(query_id).await;
        let doc_id = app.create_document(case_id, "Evidence").await;

        let del = app.delete(&routes::document(doc_id)).await;
        assert_eq!(del.status, 204);

        let res = app.get(&routes::document(doc_id)).await;
        assert_eq!(res.status, 404);
    }
}

mod starring {
    use super::*;

    #[tokio::test]
    async fn toggle_flips_the_flag_both_ways() {
        let app = TestApp::spawn().await;
        let query_id = app.create_query("A question").await;
        let case_id = app.create_case(query_id).await;
        let doc_id = app.create_document(case_id, "Key evidence").await;

        let starred = app.put_empty(&routes::document_toggle_star(doc_id)).await;
        assert_eq!(starred.status, 200);
        assert_eq!(starred.body["starred"], true);

        let unstarred = app.put_empty(&routes::document_toggle_star(doc_id)).await;
        assert_eq!(unstarred.status, 200);
        assert_eq!(unstarred.body["starred"], false);
    }

    #[tokio::test]
    async fn toggle_on_missing_document_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.put_empty(&routes::document_toggle_star(999999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod downloads {
    use super::*;

    #[tokio::test]
    async fn uploaded_file_round_trips_through_download() {
        let app = TestApp::spawn().await;
        let query_id = app.create_query("A question").await;

        let content = b"%PDF-1.4 fake affidavit content".to_vec();
        let created = app
            .post_case_form(
                &[("query_id", &query_id.to_string())],
                Some(("affidavit.pdf", content.clone())),
            )
            .await;
        assert_eq!(created.status, 201);
        let case_id = created.id();

        let docs = app
            .get(&format!("{}?case_id={case_id}", routes::DOCUMENTS))
            .await;
        let doc_id = docs.body.as_array().unwrap()[0]["id"].as_i64().unwrap() as i32;

        let (status, bytes, headers) = app.get_raw(&routes::document_download(doc_id)).await;

        assert_eq!(status, 200);
        assert_eq!(bytes, content);
        assert_eq!(
            headers.get("content-type").unwrap().to_str().unwrap(),
            "application/pdf"
        );
        let disposition = headers
            .get("content-disposition")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(disposition.contains("affidavit.pdf"), "got {disposition}");
    }

    #[tokio::test]
    async fn placeholder_documents_have_nothing_to_download() {
        let app = TestApp::spawn().await;
        let query_id = app.create_query("A question").await;
        let case_id = app.create_case(query_id).await;
        let doc_id = app.create_document(case_id, "Record only").await;

        let res = app.get(&routes::document_download(doc_id)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}
