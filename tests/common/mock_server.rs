//! Mock Firebase endpoints
//!
//! One wiremock server plays the identity service, the token service and the
//! database at once; the paths do not overlap.

use contact_book::egui_app::Config;
use contact_book::shared::AppConfig;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";

/// Config pointing every Firebase endpoint at `server`
pub fn firebase_config(server: &MockServer) -> Config {
    Config::with_builder(
        AppConfig::builder()
            .api_key(TEST_API_KEY)
            .database_url(server.uri())
            .identity_url(server.uri())
            .secure_token_url(server.uri()),
    )
    .expect("valid test config")
}

/// Nothing listens here; requests fail before any response
pub const CLOSED_ENDPOINT: &str = "http://127.0.0.1:9";

/// Config pointing every Firebase endpoint at a closed port
pub fn unreachable_config() -> Config {
    Config::with_builder(
        AppConfig::builder()
            .api_key(TEST_API_KEY)
            .database_url(CLOSED_ENDPOINT)
            .identity_url(CLOSED_ENDPOINT)
            .secure_token_url(CLOSED_ENDPOINT),
    )
    .expect("valid test config")
}

/// Successful password sign-in/sign-up body
pub fn password_response(uid: &str, email: &str, id_token: &str) -> Value {
    json!({
        "kind": "identitytoolkit#VerifyPasswordResponse",
        "localId": uid,
        "email": email,
        "idToken": id_token,
        "refreshToken": format!("refresh-{}", uid),
        "expiresIn": "3600"
    })
}

/// Identity service error body
pub fn identity_error(message: &str) -> Value {
    json!({
        "error": {
            "code": 400,
            "message": message,
            "errors": [{ "message": message, "domain": "global", "reason": "invalid" }]
        }
    })
}

/// Stored record value as the database returns it
pub fn stored_record(name: &str, email: &str, message: &str, created_at: i64) -> Value {
    json!({ "nombre": name, "email": email, "mensaje": message, "createdAt": created_at })
}
