//! Error types for chamberlib.
//!
//! All fallible operations across the library return [`Result<T>`], which
//! uses [`Error`] as the error type. Transport-layer, protocol-layer, and
//! controller-layer errors are all captured here.

/// The error type for all chamberlib operations.
///
/// Variants cover the full range of failure modes encountered when talking
/// to a chamber controller: socket establishment failures, broken
/// connections, response timeouts, and unparsable replies.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A transport-level error (TCP socket setup, address resolution).
    #[error("transport error: {0}")]
    Transport(String),

    /// A protocol-level error: the controller replied, but the reply could
    /// not be decoded into the expected type (e.g. non-numeric text where
    /// a temperature reading was expected, or a token outside a known
    /// enumeration).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Timed out waiting for a response line from the controller.
    ///
    /// The framing layer discards any partial line accumulated before the
    /// deadline, so a timed-out exchange is lost, not resumed. Many call
    /// sites treat this as "no data available" and simply issue a fresh
    /// query.
    #[error("timeout waiting for response")]
    Timeout,

    /// The requested operation is not available in the controller's
    /// current configuration (e.g. a cascade-only command on a controller
    /// constructed without the cascade option).
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// An invalid parameter was passed to a controller command.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// No connection to the controller has been established.
    #[error("not connected")]
    NotConnected,

    /// The connection to the controller was lost unexpectedly.
    #[error("connection lost")]
    ConnectionLost,

    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;
