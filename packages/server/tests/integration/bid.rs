use serde_json::json;

use crate::common::{TestApp, routes};

mod bid_crud {
    use super::*;

    #[tokio::test]
    async fn new_bid_starts_pending() {
        let app = TestApp::spawn().await;
        let query_id = app.create_query("Need help with a property dispute").await;

        let res = app
            .post(
                routes::BIDS,
                &json!({
                    "query_id": query_id,
                    "advocate_name": "Ayesha Khan",
                    "bid_amount": 25000.0,
                    "experience": "8 years",
                    "timeline": "3 months",
                    "rating": 4.5,
                    "specialization": "Property Law",
                }),
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["status"], "Pending");
        assert_eq!(res.body["advocate_name"], "Ayesha Khan");
        assert_eq!(res.body["query_id"], query_id);
    }

    #[tokio::test]
    async fn bid_on_missing_query_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::BIDS,
                &json!({"query_id": 999999, "advocate_name": "Ayesha Khan", "bid_amount": 100.0}),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn zero_amount_is_rejected() {
        let app = TestApp::spawn().await;
        let query_id = app.create_query("A question").await;

        let res = app
            .post(
                routes::BIDS,
                &json!({"query_id": query_id, "advocate_name": "Ayesha Khan", "bid_amount": 0.0}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn update_changes_details_but_never_status() {
        let app = TestApp::spawn().await;
        let query_id = app.create_query("A question").await;
        let bid_id = app.create_bid(query_id, "Ayesha Khan", 25000.0).await;

        let res = app
            .put(
                &routes::bid(bid_id),
                &json!({"bid_amount": 20000.0, "timeline": "6 weeks", "status": "Accepted"}),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["bid_amount"], 20000.0);
        assert_eq!(res.body["timeline"], "6 weeks");
        // Unknown fields like "status" are ignored.
        assert_eq!(res.body["status"], "Pending");
    }

    #[tokio::test]
    async fn update_can_clear_a_nullable_field() {
        let app = TestApp::spawn().await;
        let query_id = app.create_query("A question").await;

        let created = app
            .post(
                routes::BIDS,
                &json!({
                    "query_id": query_id,
                    "advocate_name": "Ayesha Khan",
                    "bid_amount": 1000.0,
                    "rating": 4.0,
                }),
            )
            .await;
        let bid_id = created.id();

        let res = app.put(&routes::bid(bid_id), &json!({"rating": null})).await;

        assert_eq!(res.status, 200);
        assert!(res.body["rating"].is_null());
    }

    #[tokio::test]
    async fn delete_then_fetch_is_not_found() {
        let app = TestApp::spawn().await;
        let query_id = app.create_query("A question").await;
        let bid_id = app.create_bid(query_id, "Ayesha Khan", 1000.0).await;

        let del = app.delete(&routes::bid(bid_id)).await;
        assert_eq!(del.status, 204);

        let res = app.get(&routes::bid(bid_id)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod bid_listing {
    use super::*;

    #[tokio::test]
    async fn filters_by_query() {
        let app = TestApp::spawn().await;
        let q1 = app.create_query("First question").await;
        let q2 = app.create_query("Second question").await;
        app.create_bid(q1, "Ayesha Khan", 1000.0).await;
        app.create_bid(q1, "Bilal Ahmed", 2000.0).await;
        app.create_bid(q2, "Sana Malik", 3000.0).await;

        let res = app.get(&format!("{}?query_id={q1}", routes::BIDS)).await;

        assert_eq!(res.status, 200);
        let bids = res.body.as_array().unwrap();
        assert_eq!(bids.len(), 2);
        assert!(bids.iter().all(|b| b["query_id"] == q1));
    }

    #[tokio::test]
    async fn filters_by_specialization_and_status() {
        let app = TestApp::spawn().await;
        let query_id = app.create_query("A question").await;
        app.post(
            routes::BIDS,
            &json!({
                "query_id": query_id,
                "advocate_name": "Ayesha Khan",
                "bid_amount": 1000.0,
                "specialization": "Family Law",
            }),
        )
        .await;
        app.post(
            routes::BIDS,
            &json!({
                "query_id": query_id,
                "advocate_name": "Bilal Ahmed",
                "bid_amount": 2000.0,
                "specialization": "Criminal Law",
            }),
        )
        .await;

        let res = app
            .get(&format!(
                "{}?specialization=Family%20Law&status=Pending",
                routes::BIDS
            ))
            .await;

        assert_eq!(res.status, 200);
        let bids = res.body.as_array().unwrap();
        assert_eq!(bids.len(), 1);
        assert_eq!(bids[0]["advocate_name"], "Ayesha Khan");
    }

    #[tokio::test]
    async fn sorts_by_amount_ascending() {
        let app = TestApp::spawn().await;
        let query_id = app.create_query("A question").await;
        app.create_bid(query_id, "Ayesha Khan", 3000.0).await;
        app.create_bid(query_id, "Bilal Ahmed", 1000.0).await;
        app.create_bid(query_id, "Sana Malik", 2000.0).await;

        let res = app
            .get(&format!(
                "{}?query_id={query_id}&sort_by=bid_amount&sort_order=asc",
                routes::BIDS
            ))
            .await;

        assert_eq!(res.status, 200);
        let amounts: Vec<f64> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["bid_amount"].as_f64().unwrap())
            .collect();
        assert_eq!(amounts, vec![1000.0, 2000.0, 3000.0]);
    }
}

mod bid_acceptance {
    use super::*;

    #[tokio::test]
    async fn accepting_rejects_all_sibling_pending_bids() {
        let app = TestApp::spawn().await;
        let query_id = app.create_query("A question").await;
        let winner = app.create_bid(query_id, "Ayesha Khan", 1000.0).await;
        let loser_a = app.create_bid(query_id, "Bilal Ahmed", 2000.0).await;
        let loser_b = app.create_bid(query_id, "Sana Malik", 3000.0).await;

        let res = app.post(&routes::bid_accept(winner), &json!({})).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["status"], "Accepted");

        for loser in [loser_a, loser_b] {
            let bid = app.get(&routes::bid(loser)).await;
            assert_eq!(bid.body["status"], "Rejected");
        }
    }

    #[tokio::test]
    async fn accepting_a_missing_bid_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.post(&routes::bid_accept(999999), &json!({})).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn accepting_an_accepted_bid_is_idempotent() {
        let app = TestApp::spawn().await;
        let query_id = app.create_query("A question").await;
        let bid_id = app.create_bid(query_id, "Ayesha Khan", 1000.0).await;

        let first = app.post(&routes::bid_accept(bid_id), &json!({})).await;
        assert_eq!(first.status, 200);

        let second = app.post(&routes::bid_accept(bid_id), &json!({})).await;
        assert_eq!(second.status, 200);
        assert_eq!(second.body["status"], "Accepted");
    }

    #[tokio::test]
    async fn accepting_a_rejected_bid_is_a_conflict() {
        let app = TestApp::spawn().await;
        let query_id = app.create_query("A question").await;
        let winner = app.create_bid(query_id, "Ayesha Khan", 1000.0).await;
        let loser = app.create_bid(query_id, "Bilal Ahmed", 2000.0).await;

        app.post(&routes::bid_accept(winner), &json!({})).await;

        let res = app.post(&routes::bid_accept(loser), &json!({})).await;
        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn bids_on_other_queries_are_untouched() {
        let app = TestApp::spawn().await;
        let q1 = app.create_query("First question").await;
        let q2 = app.create_query("Second question").await;
        let winner = app.create_bid(q1, "Ayesha Khan", 1000.0).await;
        let unrelated = app.create_bid(q2, "Bilal Ahmed", 2000.0).await;

        app.post(&routes::bid_accept(winner), &json!({})).await;

        let bid = app.get(&routes::bid(unrelated)).await;
        assert_eq!(bid.body["status"], "Pending");
    }

    #[tokio::test]
    async fn acceptance_notifies_the_case_when_one_exists() {
        let app = TestApp::spawn().await;
        let query_id = app.create_query("A question").await;
        let case_id = app.create_case(query_id).await;
        let bid_id = app.create_bid(query_id, "Ayesha Khan", 1000.0).await;

        let res = app.post(&routes::bid_accept(bid_id), &json!({})).await;
        assert_eq!(res.status, 200);

        let notifications = app.get(&routes::case_notifications(case_id)).await;
        assert_eq!(notifications.status, 200);
        let items = notifications.body.as_array().unwrap();
        assert!(
            items
                .iter()
                .any(|n| n["notification_type"] == "BidAccepted"
                    && n["content"].as_str().unwrap().contains("Ayesha Khan"))
        );
    }

    #[tokio::test]
    async fn concurrent_accepts_settle_exactly_one_winner() {
        let app = TestApp::spawn().await;
        let query_id = app.create_query("A question").await;
        let bid_a = app.create_bid(query_id, "Ayesha Khan", 1000.0).await;
        let bid_b = app.create_bid(query_id, "Bilal Ahmed", 2000.0).await;

        let url_a = routes::bid_accept(bid_a);
        let url_b = routes::bid_accept(bid_b);
        let body_a = json!({});
        let body_b = json!({});
        let (res_a, res_b) = tokio::join!(
            app.post(&url_a, &body_a),
            app.post(&url_b, &body_b),
        );

        let outcomes = [res_a.status, res_b.status];
        assert!(
            outcomes.contains(&200) && outcomes.contains(&409),
            "expected one success and one conflict, got {outcomes:?}"
        );

        let a = app.get(&routes::bid(bid_a)).await;
        let b = app.get(&routes::bid(bid_b)).await;
        let statuses = [a.body["status"].as_str().unwrap().to_string(),
            b.body["status"].as_str().unwrap().to_string()];
        assert!(statuses.contains(&"Accepted".to_string()));
        assert!(statuses.contains(&"Rejected".to_string()));
    }
}
