use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error as ThisError;

use crate::response::Notification;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("missing information: {0}")]
    MissingInformation(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("question does not carry options")]
    NotMultipleChoice,

    #[error("{0} not found")]
    NotFound(String),

    #[error("bussiness error: {0}")]
    BusinessError(String),

    #[error("summarizer error: {0}")]
    Summarizer(String),

    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("server error: {0}")]
    ServerError(String),
}

impl Error {
    // Title shown in the client notification, the body carries the detail.
    fn title(&self) -> &'static str {
        match self {
            Error::MissingInformation(_) => "Missing Information",
            Error::InvalidJson(_) => "Invalid JSON",
            Error::IndexOutOfBounds { .. } | Error::NotMultipleChoice => "Invalid Operation",
            Error::NotFound(_) => "Not Found",
            Error::BusinessError(_) => "Request Rejected",
            Error::Summarizer(_) | Error::HttpClient(_) => "Error Generating Summary",
            Error::ServerError(_) => "Server Error",
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingInformation(_) | Error::InvalidJson(_) | Error::BusinessError(_) => StatusCode::BAD_REQUEST,
            Error::IndexOutOfBounds { .. } | Error::NotMultipleChoice => StatusCode::UNPROCESSABLE_ENTITY,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Summarizer(_) | Error::HttpClient(_) => StatusCode::BAD_GATEWAY,
            Error::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(Notification::new(self.title(), self.to_string()))
    }
}
