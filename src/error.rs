//! The default error type carried by the `error` signal.
//!
//! Every observable is generic over its error type; [`RxError`] is what you
//! get when you don't name one. Operators never inspect the error, they only
//! route it downstream, so any `Send + 'static` type works as well.

use std::error::Error;

use thiserror::Error;

/// Error delivered through [`Observer::error`](crate::observer::Observer::error)
/// when a pipeline uses the default error type.
#[derive(Debug, Error)]
pub enum RxError {
  /// A failure described only by a message.
  #[error("{0}")]
  Message(String),

  /// Any other error raised by a producer or an operator closure.
  #[error(transparent)]
  Other(#[from] Box<dyn Error + Send + Sync>),
}

impl RxError {
  pub fn msg(msg: impl Into<String>) -> Self { RxError::Message(msg.into()) }

  /// Wraps any error type, so `?` can be used on foreign results inside a
  /// subscription procedure with `.map_err(RxError::other)`.
  pub fn other<E>(err: E) -> Self
  where
    E: Error + Send + Sync + 'static,
  {
    RxError::Other(Box::new(err))
  }
}

impl From<String> for RxError {
  fn from(msg: String) -> Self { RxError::Message(msg) }
}

impl From<&str> for RxError {
  fn from(msg: &str) -> Self { RxError::Message(msg.to_owned()) }
}

impl From<std::io::Error> for RxError {
  fn from(err: std::io::Error) -> Self { RxError::other(err) }
}
