//! Error types and result handling for roudoku operations.
//!
//! The estimator itself never fails: degenerate inputs (empty text, zero
//! durations, zero word counts) degrade to safe defaults instead of raising
//! errors, and the worst case is visibly drifted highlighting that corrects
//! itself at the next paragraph boundary. Errors only exist at the session
//! boundary, where a host can misconfigure the tuning profile or talk to a
//! session whose task has already ended.
//!
//! All fallible public APIs return a [`Result<T>`] which is a type alias for
//! `std::result::Result<T, Error>`.
//!
//! # Examples
//!
//! ```rust
//! use roudoku::prelude::*;
//! use roudoku::error::Error;
//!
//! let result = TimingConfigBuilder::default()
//!     .default_wpm(0.0f32)
//!     .build();
//!
//! match result.map_err(Error::from) {
//!     Ok(config) => println!("WPM: {}", config.default_wpm),
//!     Err(Error::Config(msg)) => println!("Bad tuning: {}", msg),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```

use thiserror::Error;

/// Type alias for Results with roudoku errors.
///
/// This is a convenience type alias that represents the standard Result type
/// with roudoku's [`enum@Error`] as the error type. All fallible public APIs
/// return this Result type.
///
/// # Examples
///
/// ```rust
/// use roudoku::{Result, Error};
///
/// fn example_operation() -> Result<String> {
///     Ok("Success".to_string())
/// }
///
/// fn example_with_error() -> Result<()> {
///     Err(Error::config("poll interval must be non-zero"))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all fallible roudoku operations.
///
/// # Variants
///
/// * [`Config`](Error::Config) - Invalid tuning values in a [`TimingConfig`](crate::TimingConfig)
/// * [`SessionClosed`](Error::SessionClosed) - Signal sent to a finished session task
/// * [`Join`](Error::Join) - The session task panicked or was cancelled during shutdown
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid timing configuration.
    ///
    /// Produced when a [`TimingConfigBuilder`](crate::TimingConfigBuilder)
    /// is given values the estimator cannot work with, such as a zero or
    /// negative words-per-minute rate, or a zero poll interval.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use roudoku::Error;
    ///
    /// let error = Error::config("default_wpm must be positive");
    /// ```
    #[error("Config error: {0}")]
    Config(String),

    /// The session task is no longer running.
    ///
    /// Returned when a [`HighlightSession`](crate::HighlightSession) handle
    /// sends a signal after the background task has already shut down. Hosts
    /// usually treat this as "playback already over" rather than a hard
    /// failure.
    #[error("Highlight session is closed")]
    SessionClosed,

    /// Session task join errors.
    ///
    /// This variant wraps errors from awaiting the tokio task during
    /// [`HighlightSession::shutdown`](crate::HighlightSession::shutdown).
    #[error("Join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl Error {
    /// Creates a config error with the given message.
    ///
    /// This is a convenience method for creating [`Error::Config`] variants
    /// with a descriptive message about which tuning value was rejected.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use roudoku::Error;
    ///
    /// let error = Error::config("poll_interval_ms must be non-zero");
    /// let error = Error::config(format!("lead factor {} out of range", 0.0));
    /// ```
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}

impl From<crate::timing::TimingConfigBuilderError> for Error {
    fn from(err: crate::timing::TimingConfigBuilderError) -> Self {
        Error::Config(err.to_string())
    }
}
