use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Debug, Display};

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn is_empty_quote_set_error(&self) -> bool {
        self.code == 106
    }

    pub fn is_invalid_quote_error(&self) -> bool {
        self.code == 107
    }
}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        database_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<oso::OsoError> for Error {
    fn from(err: oso::OsoError) -> Self {
        authorization_error(err)
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(_: jsonwebtoken::errors::Error) -> Self {
        unauthorized_error()
    }
}

impl From<bcrypt::BcryptError> for Error {
    fn from(err: bcrypt::BcryptError) -> Self {
        hashing_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        serialization_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            103 => (StatusCode::UNAUTHORIZED, self.message.as_str()),
            104 | 106 => (StatusCode::NOT_FOUND, self.message.as_str()),
            105 => (StatusCode::CONFLICT, self.message.as_str()),
            107 => (StatusCode::BAD_GATEWAY, self.message.as_str()),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn unauthorized_error() -> Error {
    Error {
        code: 103,
        message: "unauthorized".into(),
    }
}

pub fn not_found_error() -> Error {
    Error {
        code: 104,
        message: "not found".into(),
    }
}

pub fn conflict_error() -> Error {
    Error {
        code: 105,
        message: "already exists".into(),
    }
}

pub fn empty_quote_set_error() -> Error {
    Error {
        code: 106,
        message: "no quotes available".into(),
    }
}

pub fn invalid_quote_error(platform: &str, reason: &str) -> Error {
    Error {
        code: 107,
        message: format!("invalid quote from {}: {}", platform, reason),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn database_error<T: Debug>(_: T) -> Error {
    Error {
        code: 2,
        message: "database error".into(),
    }
}

pub fn reqwest_error(_: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: "reqwest error".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "upstream error".into(),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 5,
        message: "unexpected error".into(),
    }
}

pub fn authorization_error<T: Debug>(_: T) -> Error {
    Error {
        code: 6,
        message: "authorization error".into(),
    }
}

pub fn serialization_error<T: Debug>(_: T) -> Error {
    Error {
        code: 7,
        message: "serialization error".into(),
    }
}

pub fn config_error(key: &str) -> Error {
    Error {
        code: 8,
        message: format!("invalid configuration value for {}", key),
    }
}

pub fn hashing_error<T: Debug>(_: T) -> Error {
    Error {
        code: 9,
        message: "password hashing error".into(),
    }
}

#[test]
fn internal_errors_hide_message_test() {
    let response = database_error("connection refused").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn quote_errors_status_test() {
    let response = empty_quote_set_error().into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = invalid_quote_error("Wolt", "delivery_fee is negative").into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[test]
fn invalid_quote_message_test() {
    let err = invalid_quote_error("Bolt", "tax is missing");
    assert!(err.is_invalid_quote_error());
    assert_eq!(err.message, "invalid quote from Bolt: tax is missing");
}
