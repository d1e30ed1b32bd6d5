//! Service-account fixtures for tests that go through `SheetConnector`.

use std::path::{Path, PathBuf};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_PRIVATE_KEY: &str = include_str!("../tests/fixtures/test_service_account.pem");

/// Write a key file whose token endpoint is the mock server.
pub fn write_key_file(dir: &Path, server: &MockServer) -> PathBuf {
    let key = serde_json::json!({
        "type": "service_account",
        "client_email": "factsift@test-project.iam.gserviceaccount.com",
        "private_key": TEST_PRIVATE_KEY,
        "private_key_id": "test-key",
        "token_uri": format!("{}/token", server.uri()),
    });
    let file = dir.join("service_account.json");
    std::fs::write(&file, key.to_string()).unwrap();
    file
}

pub async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .mount(server)
        .await;
}
