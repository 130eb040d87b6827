//! # File / Device Node Link
//!
//! A synchronous [`PrinterLink`] that writes each chunk to a path: an
//! RFCOMM serial node such as `/dev/rfcomm0`, a USB printer node, or a
//! plain file for capturing the stream.
//!
//! [`FileLink::new`] only opens a path that already exists, so an unbound
//! device node fails with `DeviceNotFound`. [`FileLink::capture`] creates
//! (or truncates) its target.
//!
//! Every chunk is written in full and flushed before the link queues
//! `WriteSucceeded`, so the ack-paced driver sees the same event sequence
//! it would get from a BLE characteristic write.
//!
//! ## Bluetooth Setup (Linux)
//!
//! ```bash
//! $ bluetoothctl
//! [bluetooth]# pair 00:11:62:XX:XX:XX
//! $ sudo rfcomm bind 0 00:11:62:XX:XX:XX
//! # creates /dev/rfcomm0
//! ```
//!
//! ## TTY Configuration
//!
//! When the path is a terminal device it is switched to raw mode: 8-bit
//! characters, no output post-processing, no echo, and no XON/XOFF flow
//! control, since 0x11 and 0x13 appear in raster data.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{ConnectionError, PrinterLink, TransportEvent};
use crate::error::ThermolineError;

/// Default RFCOMM device path
pub const DEFAULT_DEVICE: &str = "/dev/rfcomm0";

/// Chunk sink backed by a file handle
#[derive(Debug)]
pub struct FileLink {
    path: PathBuf,
    file: Option<File>,
    unit: Option<usize>,
    create: bool,
    events: VecDeque<TransportEvent>,
}

impl FileLink {
    /// Link to an existing device node
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: None,
            unit: None,
            create: false,
            events: VecDeque::new(),
        }
    }

    /// Link that captures the stream into a file, created on connect
    pub fn capture<P: AsRef<Path>>(path: P) -> Self {
        Self {
            create: true,
            ..Self::new(path)
        }
    }

    /// Report `unit` as the negotiated transport unit on connect
    pub fn with_unit(mut self, unit: usize) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn device_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl PrinterLink for FileLink {
    fn scan(&mut self) -> Result<Option<String>, ThermolineError> {
        if self.path.exists() {
            let name = self.device_name();
            log::debug!("found {} at {}", name, self.path.display());
            Ok(Some(name))
        } else {
            Ok(None)
        }
    }

    fn connect(&mut self) -> Result<(), ThermolineError> {
        let file = OpenOptions::new()
            .write(true)
            .create(self.create)
            .truncate(self.create)
            .open(&self.path)
            .map_err(|e| open_error(&self.path, e))?;
        configure_tty_raw(&file)?;
        log::info!("connected to {}", self.path.display());

        self.file = Some(file);
        self.events.push_back(TransportEvent::Connected);
        if let Some(unit) = self.unit {
            self.events.push_back(TransportEvent::UnitNegotiated(unit));
        }
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), ThermolineError> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
            self.events.push_back(TransportEvent::Disconnected);
        }
        Ok(())
    }

    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), ThermolineError> {
        let file = self.file.as_mut().ok_or(ThermolineError::NotConnected)?;
        let event = match file.write_all(chunk).and_then(|()| file.flush()) {
            Ok(()) => TransportEvent::WriteSucceeded,
            Err(e) => TransportEvent::WriteFailed(e.to_string()),
        };
        self.events.push_back(event);
        Ok(())
    }

    fn poll_event(&mut self) -> Option<TransportEvent> {
        self.events.pop_front()
    }
}

fn open_error(path: &Path, e: io::Error) -> ThermolineError {
    match e.kind() {
        io::ErrorKind::NotFound => ThermolineError::Connection(ConnectionError::DeviceNotFound),
        io::ErrorKind::PermissionDenied => {
            log::warn!(
                "permission denied opening {} (dialout group or root needed)",
                path.display()
            );
            ThermolineError::Connection(ConnectionError::PermissionDenied)
        }
        _ => ThermolineError::Io(e),
    }
}

#[cfg(unix)]
fn configure_tty_raw(file: &File) -> Result<(), ThermolineError> {
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();
    if unsafe { libc::isatty(fd) } != 1 {
        return Ok(());
    }

    let mut termios = MaybeUninit::uninit();
    if unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) } != 0 {
        return Err(ThermolineError::Io(io::Error::last_os_error()));
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);
    termios.c_oflag &= !libc::OPOST;
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) } != 0 {
        return Err(ThermolineError::Io(io::Error::last_os_error()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_file: &File) -> Result<(), ThermolineError> {
    Ok(())
}
