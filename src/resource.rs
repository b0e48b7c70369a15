//! Tri-state results handed to callers of the repository.

use crate::api::error::{HttpCode, RemoteError};

/// What went wrong, as far as a caller needs to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// Server answered with a non-success status
  Http(HttpCode),
  /// Server answered successfully with no payload
  EmptyBody,
  /// Connection refused
  RetryToConnect,
  /// Any other transport or decode failure
  Connectivity,
  /// Local store query failed
  Storage,
}

/// State of a request as seen by a presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
  Initial,
  Loading,
  Success {
    data: T,
    from_cache: bool,
  },
  Error {
    kind: ErrorKind,
    code: u16,
    message: String,
  },
}

impl<T> Resource<T> {
  pub fn network(data: T) -> Self {
    Self::Success {
      data,
      from_cache: false,
    }
  }

  pub fn cached(data: T) -> Self {
    Self::Success {
      data,
      from_cache: true,
    }
  }

  pub fn storage_error(message: impl Into<String>) -> Self {
    Self::Error {
      kind: ErrorKind::Storage,
      code: HttpCode::UnknownError.code(),
      message: message.into(),
    }
  }

  /// Borrow the payload of a success.
  pub fn data(&self) -> Option<&T> {
    match self {
      Self::Success { data, .. } => Some(data),
      _ => None,
    }
  }

  pub fn is_from_cache(&self) -> bool {
    matches!(self, Self::Success { from_cache: true, .. })
  }

  /// Error code, if this is an error.
  pub fn code(&self) -> Option<u16> {
    match self {
      Self::Error { code, .. } => Some(*code),
      _ => None,
    }
  }
}

impl<T> From<&RemoteError> for Resource<T> {
  fn from(err: &RemoteError) -> Self {
    let (kind, code, message) = match err {
      RemoteError::Status { status, reason } => {
        let http = HttpCode::from_status(*status);
        let message = match http {
          HttpCode::UnknownError => format!("{}: {} ({})", http.message(), reason, status),
          _ => http.message().to_string(),
        };
        (ErrorKind::Http(http), http.code(), message)
      }
      RemoteError::EmptyBody { status } => (ErrorKind::EmptyBody, *status, err.to_string()),
      RemoteError::Transport { refused: true, .. } => (
        ErrorKind::RetryToConnect,
        HttpCode::RetryToConnect.code(),
        err.to_string(),
      ),
      RemoteError::Transport { .. } | RemoteError::Decode(_) => (
        ErrorKind::Connectivity,
        HttpCode::UnknownError.code(),
        err.to_string(),
      ),
    };

    Self::Error {
      kind,
      code,
      message,
    }
  }
}
