use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug)]
pub enum Error {
    // Auth Errors
    AuthFailNoToken,
    AuthFailTokenWrongFormat,
    AuthFailUnknownSession,
    AuthFailCtxNotInRequestExt,

    // Request Errors
    MissingParams,

    // Provider Errors
    Provider(String),
}

pub type Result<T> = core::result::Result<T, Error>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // All auth failures collapse to one caller-visible message;
            // the variant distinction is for operator logs only.
            Error::AuthFailNoToken
            | Error::AuthFailTokenWrongFormat
            | Error::AuthFailUnknownSession => {
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            Error::AuthFailCtxNotInRequestExt => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Auth context missing".to_string(),
            ),
            Error::MissingParams => (StatusCode::BAD_REQUEST, "Missing parameters".to_string()),
            Error::Provider(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({ "error": error_message }));

        (status, body).into_response()
    }
}
