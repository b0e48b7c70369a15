//! Errors returned by the remote client.

use thiserror::Error;

/// Classification of failed requests, with the codes callers see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpCode {
  Unauthorized,
  NotFound,
  ServerError,
  UnknownError,
  /// Connection refused; the caller may retry
  RetryToConnect,
}

impl HttpCode {
  /// Classify an HTTP status. Anything unlisted is `UnknownError`.
  pub fn from_status(status: u16) -> Self {
    match status {
      401 => Self::Unauthorized,
      404 => Self::NotFound,
      500 => Self::ServerError,
      _ => Self::UnknownError,
    }
  }

  pub fn code(self) -> u16 {
    match self {
      Self::Unauthorized => 401,
      Self::NotFound => 404,
      Self::ServerError => 500,
      Self::UnknownError => 501,
      Self::RetryToConnect => 1006,
    }
  }

  /// User-facing message.
  pub fn message(self) -> &'static str {
    match self {
      Self::Unauthorized => "Unauthorized",
      Self::NotFound => "Not found",
      Self::ServerError => "Server error",
      Self::UnknownError => "Unknown error",
      Self::RetryToConnect => "Unable to connect, please retry",
    }
  }
}

/// Failure of a remote call.
#[derive(Debug, Error)]
pub enum RemoteError {
  /// The server answered with a non-success status.
  #[error("{reason} ({status})")]
  Status { status: u16, reason: String },

  /// The server answered successfully but sent no payload.
  #[error("Empty response body")]
  EmptyBody { status: u16 },

  /// The request never completed.
  #[error("{message}")]
  Transport { message: String, refused: bool },

  /// The payload could not be decoded.
  #[error("Failed to decode response: {0}")]
  Decode(String),
}

impl RemoteError {
  /// Build a transport error from a reqwest failure, walking its source chain
  /// to find out whether the connection was refused.
  pub fn from_transport(err: reqwest::Error) -> Self {
    let mut message = err.to_string();
    let mut refused = false;

    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
      if let Some(io) = cause.downcast_ref::<std::io::Error>() {
        refused |= io.kind() == std::io::ErrorKind::ConnectionRefused;
      }
      message = format!("{}: {}", message, cause);
      source = cause.source();
    }

    refused |= message.to_lowercase().contains("connection refused");

    Self::Transport { message, refused }
  }
}
