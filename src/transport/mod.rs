//! # Printer Transport Layer
//!
//! Moves a finished print stream to the printer in link-sized chunks, one
//! chunk per acknowledgement.
//!
//! ## Pieces
//!
//! - [`PrinterLink`]: the capability a concrete link (BLE, RFCOMM, file)
//!   provides: scan, connect, disconnect, write one chunk, and report what
//!   happened as [`TransportEvent`]s
//! - [`driver`]: the chunking state machine (`Idle → Sending → Done`)
//! - [`session`]: owns one link and one driver, tracks [`ConnectionState`]
//! - [`file`]: a synchronous link writing to a device node or file
//!
//! ## Flow
//!
//! ```text
//! session.print(bytes)
//!   └─► driver.begin ─► link.write_chunk(0)
//! link event WriteSucceeded
//!   └─► driver.acknowledge_and_send_next ─► link.write_chunk(1)
//! ...
//! WriteSucceeded for the last chunk ─► Done, on_complete()
//! ```

pub mod driver;
pub mod file;
pub mod session;

pub use driver::{ChunkedDriver, DriverState, DriverStep, split_chunks};
pub use file::{DEFAULT_DEVICE, FileLink};
pub use session::PrinterSession;

use thiserror::Error;

use crate::error::ThermolineError;

/// Notifications a link raises toward the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// A printer was found while scanning
    Discovered(String),
    Connected,
    Disconnected,
    /// The last chunk handed to `write_chunk` was accepted
    WriteSucceeded,
    /// The last chunk handed to `write_chunk` was rejected
    WriteFailed(String),
    /// The link negotiated a transport unit (bytes per write)
    UnitNegotiated(usize),
}

/// Link-level failure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConnectionError {
    #[error("bluetooth is disabled")]
    BluetoothDisabled,
    #[error("permission denied")]
    PermissionDenied,
    #[error("not supported on this platform")]
    NotSupported,
    #[error("print failed")]
    PrintFailed,
    #[error("device not found")]
    DeviceNotFound,
}

/// Observable connection status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionState {
    pub device_name: Option<String>,
    pub discovered_printer: Option<String>,
    pub can_print: bool,
    pub is_connected: bool,
    pub error: Option<ConnectionError>,
    pub is_printing: bool,
    pub is_scanning: bool,
}

/// A printer connection
///
/// `write_chunk` is fire-and-forget: whether the chunk was accepted arrives
/// later as [`TransportEvent::WriteSucceeded`] or
/// [`TransportEvent::WriteFailed`] from `poll_event`. An `Err` from
/// `write_chunk` means the chunk could not even be handed to the link.
pub trait PrinterLink {
    /// Look for a printer, returning its name if one was found
    fn scan(&mut self) -> Result<Option<String>, ThermolineError>;

    fn connect(&mut self) -> Result<(), ThermolineError>;

    fn disconnect(&mut self) -> Result<(), ThermolineError>;

    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), ThermolineError>;

    /// Next pending notification, if any
    fn poll_event(&mut self) -> Option<TransportEvent>;
}

impl<L: PrinterLink + ?Sized> PrinterLink for Box<L> {
    fn scan(&mut self) -> Result<Option<String>, ThermolineError> {
        (**self).scan()
    }

    fn connect(&mut self) -> Result<(), ThermolineError> {
        (**self).connect()
    }

    fn disconnect(&mut self) -> Result<(), ThermolineError> {
        (**self).disconnect()
    }

    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), ThermolineError> {
        (**self).write_chunk(chunk)
    }

    fn poll_event(&mut self) -> Option<TransportEvent> {
        (**self).poll_event()
    }
}
