//! Mapping of pipeline errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use factsift_core::Error;
use tracing::{error, warn};

#[derive(Debug)]
pub enum ApiError {
    Core(Error),
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Core(e) if e.is_user_input() => StatusCode::BAD_REQUEST,
            ApiError::Core(Error::SheetAccess(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Core(e) => e.to_string(),
            ApiError::BadRequest(msg) => msg.clone(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError::Core(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            error!(status = %status, "{}", message);
        } else {
            warn!(status = %status, "{}", message);
        }
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let missing = ApiError::from(Error::MissingColumn {
            column: "Company".into(),
            available: vec!["Name".into()],
        });
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

        let template = ApiError::from(Error::InvalidTemplate("no placeholder".into()));
        assert_eq!(template.status(), StatusCode::BAD_REQUEST);

        let sheet = ApiError::from(Error::SheetAccess("403".into()));
        assert_eq!(sheet.status(), StatusCode::BAD_GATEWAY);

        let search = ApiError::from(Error::SearchUnavailable("down".into()));
        assert_eq!(search.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bad = ApiError::BadRequest("No file uploaded".into());
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    }
}
