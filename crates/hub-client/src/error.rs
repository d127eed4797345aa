//! Error type for `hub-client`.

use hub_core::store::{FailureKind, StoreFailure};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("{operation} → {status}: {message}")]
  Status {
    operation: &'static str,
    status:    StatusCode,
    message:   String,
  },

  #[error("decoding {what}: {source}")]
  Decode {
    what:   &'static str,
    #[source]
    source: serde_json::Error,
  },

  #[error("not signed in")]
  NotSignedIn,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
  pub fn status(&self) -> Option<StatusCode> {
    match self {
      Self::Status { status, .. } => Some(*status),
      Self::Http(err) => err.status(),
      _ => None,
    }
  }
}

impl StoreFailure for Error {
  fn failure_kind(&self) -> FailureKind {
    match self {
      Self::Status { status, .. } => classify(*status),
      Self::Http(err) => err.status().map_or(FailureKind::Unavailable, classify),
      Self::Decode { .. } => FailureKind::Unavailable,
      Self::NotSignedIn => FailureKind::Validation,
    }
  }
}

/// Rejections the caller can act on are validation failures; timeouts,
/// throttling and server faults are worth retrying.
pub fn classify(status: StatusCode) -> FailureKind {
  if status.is_server_error()
    || status == StatusCode::REQUEST_TIMEOUT
    || status == StatusCode::TOO_MANY_REQUESTS
  {
    FailureKind::Unavailable
  } else {
    FailureKind::Validation
  }
}

/// Error bodies from the REST and auth services use different field names.
#[derive(Deserialize)]
struct ErrorBody {
  message:           Option<String>,
  msg:               Option<String>,
  error_description: Option<String>,
  error:             Option<String>,
}

/// The human-readable message in an error response body, falling back to the
/// raw body.
pub(crate) fn error_message(body: &str) -> String {
  serde_json::from_str::<ErrorBody>(body)
    .ok()
    .and_then(|b| b.message.or(b.msg).or(b.error_description).or(b.error))
    .unwrap_or_else(|| body.trim().to_owned())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_classification() {
    for code in [400, 401, 403, 404, 409, 422] {
      let status = StatusCode::from_u16(code).unwrap();
      assert_eq!(classify(status), FailureKind::Validation, "{code}");
    }
    for code in [408, 429, 500, 502, 503] {
      let status = StatusCode::from_u16(code).unwrap();
      assert_eq!(classify(status), FailureKind::Unavailable, "{code}");
    }
  }

  #[test]
  fn messages_from_either_service() {
    let rest = r#"{"code":"23502","message":"null value in column \"name\"","details":null}"#;
    assert_eq!(error_message(rest), "null value in column \"name\"");

    let auth = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
    assert_eq!(error_message(auth), "Invalid login credentials");

    assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
  }

  #[test]
  fn not_signed_in_is_a_validation_failure() {
    assert_eq!(Error::NotSignedIn.failure_kind(), FailureKind::Validation);
    let err = Error::Status {
      operation: "POST /rest/v1/resources",
      status:    StatusCode::SERVICE_UNAVAILABLE,
      message:   "down".into(),
    };
    assert_eq!(err.failure_kind(), FailureKind::Unavailable);
    assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
  }
}
