//! # Error Types
//!
//! This module defines the error type shared by the encoder, the job
//! assembler and the transport layer.

use thiserror::Error;

use crate::transport::ConnectionError;

/// Main error type for thermoline operations
#[derive(Debug, Error)]
pub enum ThermolineError {
    /// Source image bytes could not be decoded
    ///
    /// Fatal to the one print job being built. Driver state is untouched.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Image processing error (preview encoding, resize)
    #[error("Image error: {0}")]
    Image(String),

    /// A value cannot be expressed in the command dialect
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// The transport reported a failed chunk write
    ///
    /// The active session is left stalled; begin a new one to retry.
    #[error("Transport write failed: {0}")]
    TransportWrite(String),

    /// Printing was requested before the link reported a connection
    #[error("Printer is not connected")]
    NotConnected,

    /// Connection-level failure reported by the link
    #[error("Connection error: {0}")]
    Connection(ConnectionError),

    /// Malformed JSON print job
    #[error("Invalid job: {0}")]
    InvalidJob(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
