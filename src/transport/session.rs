//! # Printer Session
//!
//! Owns one link and one [`ChunkedDriver`] for the lifetime of a
//! connection, and turns link events into driver calls and
//! [`ConnectionState`] updates.
//!
//! | Event | Effect |
//! |-------|--------|
//! | `Discovered(name)` | remember the printer name |
//! | `Connected` | `is_connected`, `can_print` |
//! | `Disconnected` | clears connection and printing flags |
//! | `WriteSucceeded` | driver sends the next chunk, or completes |
//! | `WriteFailed(reason)` | stalls the session, `error = PrintFailed` |
//! | `UnitNegotiated(n)` | chunk size for the next print |
//!
//! ## Example
//!
//! ```no_run
//! use thermoline::transport::{FileLink, PrinterSession};
//! use thermoline::printer::PrinterConfig;
//!
//! let mut session = PrinterSession::new(FileLink::new("/dev/rfcomm0"), &PrinterConfig::default());
//! session.on_complete(|| println!("printed"));
//! session.connect()?;
//! session.print(b"hello\n")?;
//! session.pump()?;
//! # Ok::<(), thermoline::ThermolineError>(())
//! ```

use super::driver::{ChunkedDriver, DriverState, DriverStep};
use super::{ConnectionError, ConnectionState, PrinterLink, TransportEvent};
use crate::error::ThermolineError;
use crate::printer::PrinterConfig;

/// A link, its driver and the observable connection state
#[derive(Debug)]
pub struct PrinterSession<L: PrinterLink> {
    link: L,
    driver: ChunkedDriver,
    state: ConnectionState,
}

impl<L: PrinterLink> PrinterSession<L> {
    pub fn new(link: L, config: &PrinterConfig) -> Self {
        Self {
            link,
            driver: ChunkedDriver::new(config.transport_unit),
            state: ConnectionState::default(),
        }
    }

    /// Register the callback fired once per completed print
    pub fn on_complete<F>(&mut self, callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.driver.on_complete(callback);
    }

    /// Scan for a printer
    ///
    /// ## Errors
    ///
    /// `Connection(DeviceNotFound)` when the scan finds nothing.
    pub fn scan(&mut self) -> Result<String, ThermolineError> {
        self.state.is_scanning = true;
        let result = self.link.scan();
        self.state.is_scanning = false;

        match result? {
            Some(name) => {
                self.handle_event(TransportEvent::Discovered(name.clone()))?;
                Ok(name)
            }
            None => {
                self.state.error = Some(ConnectionError::DeviceNotFound);
                Err(ThermolineError::Connection(ConnectionError::DeviceNotFound))
            }
        }
    }

    /// Connect the link and process whatever it reports
    pub fn connect(&mut self) -> Result<(), ThermolineError> {
        if let Err(e) = self.link.connect() {
            if let ThermolineError::Connection(kind) = &e {
                self.state.error = Some(*kind);
            }
            return Err(e);
        }
        self.pump()
    }

    pub fn disconnect(&mut self) -> Result<(), ThermolineError> {
        self.link.disconnect()?;
        self.pump()
    }

    /// Start printing `bytes`, replacing any print in progress
    ///
    /// ## Errors
    ///
    /// - `NotConnected` unless the link has reported `Connected`
    /// - the link's error when the first chunk cannot be written
    pub fn print(&mut self, bytes: &[u8]) -> Result<DriverStep, ThermolineError> {
        if !self.state.is_connected {
            return Err(ThermolineError::NotConnected);
        }
        self.state.error = None;
        self.state.is_printing = true;

        match self.driver.begin(bytes, &mut self.link) {
            Ok(step) => Ok(step),
            Err(e) => {
                self.state.is_printing = false;
                self.state.error = Some(ConnectionError::PrintFailed);
                Err(e)
            }
        }
    }

    /// Apply one link event
    ///
    /// ## Errors
    ///
    /// `TransportWrite` for `WriteFailed` during a print, or the link's
    /// error when the next chunk cannot be written.
    pub fn handle_event(&mut self, event: TransportEvent) -> Result<(), ThermolineError> {
        log::trace!("link event {:?}", event);
        match event {
            TransportEvent::Discovered(name) => {
                self.state.device_name = Some(name.clone());
                self.state.discovered_printer = Some(name);
            }
            TransportEvent::Connected => {
                self.state.is_connected = true;
                self.state.can_print = true;
                self.state.error = None;
            }
            TransportEvent::Disconnected => {
                self.state.is_connected = false;
                self.state.can_print = false;
                self.state.is_printing = false;
            }
            TransportEvent::WriteSucceeded => {
                match self.driver.acknowledge_and_send_next(&mut self.link) {
                    Ok(DriverStep::Complete) => self.state.is_printing = false,
                    Ok(_) => {}
                    Err(e) => {
                        self.state.is_printing = false;
                        self.state.error = Some(ConnectionError::PrintFailed);
                        return Err(e);
                    }
                }
            }
            TransportEvent::WriteFailed(reason) => {
                if self.driver.state() == DriverState::Sending {
                    self.state.is_printing = false;
                    self.state.error = Some(ConnectionError::PrintFailed);
                }
                self.driver.chunk_failed(&reason)?;
            }
            TransportEvent::UnitNegotiated(unit) => self.driver.set_unit(unit),
        }
        Ok(())
    }

    /// Drain and apply every event the link has queued
    pub fn pump(&mut self) -> Result<(), ThermolineError> {
        while let Some(event) = self.link.poll_event() {
            self.handle_event(event)?;
        }
        Ok(())
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub fn driver(&self) -> &ChunkedDriver {
        &self.driver
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    pub fn into_link(self) -> L {
        self.link
    }
}
