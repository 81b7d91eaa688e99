//! Firebase Authentication client against a mock identity service

mod common;

use assert_matches::assert_matches;
use common::*;
use contact_book::egui_app::auth::FirebaseAuthClient;
use contact_book::egui_app::session_store::SessionStore;
use contact_book::egui_app::{IdentityProvider, TokenSource};
use contact_book::shared::AppError;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_create_account_starts_persisted_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signUp"))
        .and(query_param("key", TEST_API_KEY))
        .and(body_json(json!({
            "email": TEST_EMAIL,
            "password": TEST_PASSWORD,
            "returnSecureToken": true
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(password_response("uid-ana", TEST_EMAIL, "id-token-1")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");
    let client = FirebaseAuthClient::new(firebase_config(&server), SessionStore::open(&session_file));

    let session = client.create_account(TEST_EMAIL, TEST_PASSWORD).await.unwrap();
    assert_eq!(session.uid, "uid-ana");
    assert_eq!(session.email.as_deref(), Some(TEST_EMAIL));
    assert_eq!(client.current_session(), Some(session.clone()));

    // A second launch finds the session on disk
    let reopened = SessionStore::open(&session_file);
    let stored = reopened.get().expect("session persisted");
    assert_eq!(stored.uid, "uid-ana");
    assert_eq!(stored.id_token, "id-token-1");
}

#[tokio::test]
async fn test_sign_in_failure_passes_provider_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signInWithPassword"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(identity_error("INVALID_LOGIN_CREDENTIALS")),
        )
        .mount(&server)
        .await;

    let client = FirebaseAuthClient::new(firebase_config(&server), SessionStore::in_memory());
    let err = client.sign_in(TEST_EMAIL, "wrong-password").await.unwrap_err();

    assert_matches!(err, AppError::Provider { ref message } if message == "INVALID_LOGIN_CREDENTIALS");
    assert!(client.current_session().is_none());
}

#[tokio::test]
async fn test_create_account_duplicate_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signUp"))
        .respond_with(ResponseTemplate::new(400).set_body_json(identity_error("EMAIL_EXISTS")))
        .mount(&server)
        .await;

    let client = FirebaseAuthClient::new(firebase_config(&server), SessionStore::in_memory());
    let err = client.create_account(TEST_EMAIL, TEST_PASSWORD).await.unwrap_err();
    assert_eq!(err.user_message(), "EMAIL_EXISTS");
}

#[tokio::test]
async fn test_unstructured_error_body_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:signInWithPassword"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = FirebaseAuthClient::new(firebase_config(&server), SessionStore::in_memory());
    let err = client.sign_in(TEST_EMAIL, TEST_PASSWORD).await.unwrap_err();
    assert_eq!(err.to_string(), "500 Internal Server Error: boom");
}

#[tokio::test]
async fn test_expired_token_is_refreshed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/token"))
        .and(query_param("key", TEST_API_KEY))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=refresh-token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": "uid-ana",
            "id_token": "id-token-2",
            "refresh_token": "refresh-token-2",
            "expires_in": "3600"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sessions = SessionStore::in_memory();
    sessions.set(expired_session());
    let client = FirebaseAuthClient::new(firebase_config(&server), sessions.clone());

    assert_eq!(client.id_token().await.unwrap().as_deref(), Some("id-token-2"));
    let stored = sessions.get().unwrap();
    assert_eq!(stored.refresh_token, "refresh-token-2");
    assert_eq!(stored.email.as_deref(), Some(TEST_EMAIL));

    // Fresh now, no second refresh
    assert_eq!(client.id_token().await.unwrap().as_deref(), Some("id-token-2"));
}

#[tokio::test]
async fn test_fresh_token_is_used_as_is() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/token"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let sessions = SessionStore::in_memory();
    sessions.set(fresh_session());
    let client = FirebaseAuthClient::new(firebase_config(&server), sessions);
    assert_eq!(client.id_token().await.unwrap().as_deref(), Some("id-token-1"));
}

#[tokio::test]
async fn test_no_session_no_token() {
    let server = MockServer::start().await;
    let client = FirebaseAuthClient::new(firebase_config(&server), SessionStore::in_memory());
    assert!(client.id_token().await.unwrap().is_none());
}

#[tokio::test]
async fn test_sign_out_removes_session_file() {
    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");
    let sessions = SessionStore::open(&session_file);
    sessions.set(fresh_session());
    assert!(session_file.exists());

    let server = MockServer::start().await;
    let client = FirebaseAuthClient::new(firebase_config(&server), sessions);
    client.sign_out();

    assert!(!session_file.exists());
    assert!(client.current_session().is_none());
}

#[tokio::test]
async fn test_transport_errors_do_not_reveal_api_key() {
    let client = FirebaseAuthClient::new(unreachable_config(), SessionStore::in_memory());

    let err = client.sign_in(TEST_EMAIL, TEST_PASSWORD).await.unwrap_err();
    assert_matches!(err, AppError::Provider { .. });
    assert!(!err.user_message().contains(TEST_API_KEY), "{}", err);

    let err = client.create_account(TEST_EMAIL, TEST_PASSWORD).await.unwrap_err();
    assert!(!err.user_message().contains(TEST_API_KEY), "{}", err);
}
