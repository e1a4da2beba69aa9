//! Error type shared by every Pagewright crate.
//!
//! Only layout resolution errors are expected to terminate a render call.
//! Widget-level failures are contained by the composer and never surface
//! through this type to the HTTP layer.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::fmt;

pub type PwResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// Unknown site, or no published layout for the requested kind
	NotFound,
	DbError,
	/// A collaborator did not answer in time
	Timeout,
	ValidationError(String),
	ConfigError(String),
	Parse(String),
	Internal(String),

	// externals
	Io(std::io::Error),
	Json(serde_json::Error),
}

impl Error {
	fn status(&self) -> StatusCode {
		match self {
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::Timeout => StatusCode::GATEWAY_TIMEOUT,
			Error::ValidationError(_) | Error::Parse(_) => StatusCode::BAD_REQUEST,
			Error::DbError
			| Error::ConfigError(_)
			| Error::Internal(_)
			| Error::Io(_)
			| Error::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn code(&self) -> &'static str {
		match self {
			Error::NotFound => "E-NOTFOUND",
			Error::DbError => "E-DB",
			Error::Timeout => "E-TIMEOUT",
			Error::ValidationError(_) => "E-VALIDATION",
			Error::ConfigError(_) => "E-CONFIG",
			Error::Parse(_) => "E-PARSE",
			Error::Internal(_) | Error::Io(_) | Error::Json(_) => "E-INTERNAL",
		}
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::DbError => write!(f, "database error"),
			Error::Timeout => write!(f, "timeout"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Parse(msg) => write!(f, "parse error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "I/O error: {}", err),
			Error::Json(err) => write!(f, "JSON error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			Error::Json(err) => Some(err),
			_ => None,
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Json(err)
	}
}

#[derive(Serialize)]
struct ErrorBody<'a> {
	code: &'a str,
	message: String,
}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let status = self.status();
		// Internal details stay in the log
		let message = if status.is_server_error() {
			tracing::warn!(error = %self, "request failed");
			status.canonical_reason().unwrap_or("error").to_string()
		} else {
			self.to_string()
		};
		(status, Json(ErrorBody { code: self.code(), message })).into_response()
	}
}


// vim: ts=4
