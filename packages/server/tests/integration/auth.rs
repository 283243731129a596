use serde_json::json;

use crate::common::{TestApp, routes};

mod registration {
    use super::*;

    #[tokio::test]
    async fn new_user_can_register_with_valid_credentials() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::REGISTER,
                &json!({"name": "Alice Rehman", "email": "alice@example.com", "password": "securepass"}),
            )
            .await;

        assert_eq!(res.status, 201);
        assert!(res.body["id"].is_number());
        assert_eq!(res.body["email"], "alice@example.com");
        assert_eq!(res.body["name"], "Alice Rehman");
        assert_eq!(res.body["role"], "client");
    }

    #[tokio::test]
    async fn cannot_register_with_an_already_taken_email() {
        let app = TestApp::spawn().await;
        let body = json!({"email": "alice@example.com", "password": "securepass"});

        let first = app.post(routes::REGISTER, &body).await;
        assert_eq!(first.status, 201, "First registration failed: {}", first.text);

        let res = app.post(routes::REGISTER, &body).await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "EMAIL_TAKEN");
    }

    #[tokio::test]
    async fn email_comparison_is_case_insensitive() {
        let app = TestApp::spawn().await;

        let first = app
            .post(
                routes::REGISTER,
                &json!({"email": "Alice@Example.com", "password": "securepass"}),
            )
            .await;
        assert_eq!(first.status, 201);

        let res = app
            .post(
                routes::REGISTER,
                &json!({"email": "alice@example.com", "password": "securepass"}),
            )
            .await;
        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "EMAIL_TAKEN");
    }

    #[tokio::test]
    async fn rejects_malformed_email() {
        let app = TestApp::spawn().await;

        for email in ["", "not-an-email", "@example.com", "alice@localhost"] {
            let res = app
                .post(
                    routes::REGISTER,
                    &json!({"email": email, "password": "securepass"}),
                )
                .await;
            assert_eq!(res.status, 400, "expected 400 for email {email:?}");
            assert_eq!(res.body["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn rejects_short_password() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::REGISTER,
                &json!({"email": "alice@example.com", "password": "short"}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn registered_user_can_log_in() {
        let app = TestApp::spawn().await;
        let body = json!({"email": "alice@example.com", "password": "securepass"});
        app.post(routes::REGISTER, &body).await;

        let res = app.post(routes::LOGIN, &body).await;

        assert_eq!(res.status, 200);
        assert!(res.body["token"].is_string());
        assert_eq!(res.body["email"], "alice@example.com");
        assert_eq!(res.body["role"], "client");
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let app = TestApp::spawn().await;
        app.post(
            routes::REGISTER,
            &json!({"email": "alice@example.com", "password": "securepass"}),
        )
        .await;

        let res = app
            .post(
                routes::LOGIN,
                &json!({"email": "alice@example.com", "password": "wrongpass"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn unknown_email_is_rejected_identically_to_wrong_password() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::LOGIN,
                &json!({"email": "nobody@example.com", "password": "securepass"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }
}

mod authenticated_access {
    use super::*;

    #[tokio::test]
    async fn me_returns_the_token_owner() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("alice@example.com", "securepass")
            .await;

        let res = app.get_with_token(routes::ME, &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["email"], "alice@example.com");
        assert_eq!(res.body["role"], "client");
    }

    #[tokio::test]
    async fn me_without_token_is_unauthorized() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::ME).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn me_with_garbage_token_is_unauthorized() {
        let app = TestApp::spawn().await;

        let res = app.get_with_token(routes::ME, "not.a.valid.token").await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }
}
