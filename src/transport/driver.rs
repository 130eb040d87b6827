//! # Chunked Transport Driver
//!
//! Sends a print stream one chunk at a time, advancing only when the link
//! acknowledges the previous chunk.
//!
//! ## State Machine
//!
//! ```text
//!          begin(buf)                 ack of last chunk
//!   Idle ─────────────► Sending ───────────────────────► Done
//!     ▲                  │  ▲ ack k: send chunk k           │
//!     │                  └──┘                               │
//!     └──────────── begin(buf) discards any session ◄───────┘
//! ```
//!
//! - `begin` prefixes the stream with `ESC @`, splits it at the current
//!   unit size and sends chunk 0 at once.
//! - Each acknowledgement sends the next chunk. The acknowledgement of the
//!   final chunk moves to `Done` and fires the completion callback, once.
//! - Acknowledgements while `Idle`, `Done` or after a write failure are
//!   ignored.
//! - A unit size reported mid-session is held until the next `begin`.
//!
//! The driver does no locking. Callers serialize `begin` and
//! `acknowledge_and_send_next`.

use std::fmt;

use super::PrinterLink;
use crate::error::ThermolineError;
use crate::printer::DEFAULT_TRANSPORT_UNIT;
use crate::protocol::commands;

/// Driver lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    #[default]
    Idle,
    Sending,
    Done,
}

/// What a driver call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverStep {
    /// Chunk with this index was handed to the link
    Sent(usize),
    /// The final chunk was acknowledged
    Complete,
    /// Nothing happened (out-of-state or stalled session)
    Ignored,
}

/// Split `buffer` into `unit`-sized chunks, the last one possibly shorter
///
/// ```
/// use thermoline::transport::split_chunks;
///
/// let chunks = split_chunks(&[0u8; 45], 20);
/// let sizes: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
/// assert_eq!(sizes, vec![20, 20, 5]);
/// ```
pub fn split_chunks(buffer: &[u8], unit: usize) -> Vec<Vec<u8>> {
    buffer.chunks(unit.max(1)).map(<[u8]>::to_vec).collect()
}

type CompletionCallback = Box<dyn FnMut() + Send>;

/// One-session-at-a-time chunk pump
pub struct ChunkedDriver {
    state: DriverState,
    chunks: Vec<Vec<u8>>,
    next: usize,
    chunk_size: usize,
    pending_unit: Option<usize>,
    stalled: bool,
    on_complete: Option<CompletionCallback>,
}

impl fmt::Debug for ChunkedDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkedDriver")
            .field("state", &self.state)
            .field("chunks", &self.chunks.len())
            .field("next", &self.next)
            .field("chunk_size", &self.chunk_size)
            .field("pending_unit", &self.pending_unit)
            .field("stalled", &self.stalled)
            .finish_non_exhaustive()
    }
}

impl Default for ChunkedDriver {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSPORT_UNIT)
    }
}

impl ChunkedDriver {
    /// Idle driver with an initial unit size (raised to the 20-byte minimum)
    pub fn new(unit: usize) -> Self {
        Self {
            state: DriverState::Idle,
            chunks: Vec::new(),
            next: 0,
            chunk_size: unit.max(DEFAULT_TRANSPORT_UNIT),
            pending_unit: None,
            stalled: false,
            on_complete: None,
        }
    }

    /// Register the completion callback, replacing any previous one
    pub fn on_complete<F>(&mut self, callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.on_complete = Some(Box::new(callback));
    }

    /// Record a negotiated unit size for the next session
    ///
    /// Sizes below the 20-byte default are ignored.
    pub fn set_unit(&mut self, unit: usize) {
        if unit < DEFAULT_TRANSPORT_UNIT {
            log::debug!("ignoring transport unit {} (minimum {})", unit, DEFAULT_TRANSPORT_UNIT);
            return;
        }
        log::debug!("transport unit {} will apply to the next session", unit);
        self.pending_unit = Some(unit);
    }

    /// Start a new session, discarding any session in progress
    ///
    /// Sends chunk 0 before returning.
    ///
    /// ## Errors
    ///
    /// `TransportWrite` (or whatever the link returns) when chunk 0 cannot
    /// be handed to the link. The session is left stalled in `Sending`.
    pub fn begin<L>(&mut self, buffer: &[u8], link: &mut L) -> Result<DriverStep, ThermolineError>
    where
        L: PrinterLink + ?Sized,
    {
        if self.state == DriverState::Sending {
            log::debug!(
                "discarding session at chunk {}/{}",
                self.next,
                self.chunks.len()
            );
        }
        if let Some(unit) = self.pending_unit.take() {
            self.chunk_size = unit;
        }

        let mut stream = commands::reset();
        stream.extend_from_slice(buffer);
        self.chunks = split_chunks(&stream, self.chunk_size);
        self.next = 0;
        self.stalled = false;
        self.state = DriverState::Sending;
        log::info!(
            "print session: {} bytes in {} chunks of {}",
            stream.len(),
            self.chunks.len(),
            self.chunk_size
        );

        self.send_next(link)
    }

    /// Called by the link owner when the previous chunk was accepted
    pub fn acknowledge_and_send_next<L>(&mut self, link: &mut L) -> Result<DriverStep, ThermolineError>
    where
        L: PrinterLink + ?Sized,
    {
        if self.state != DriverState::Sending || self.stalled {
            log::debug!("acknowledgement ignored in state {:?}", self.state);
            return Ok(DriverStep::Ignored);
        }
        self.send_next(link)
    }

    /// Called by the link owner when a chunk write failed
    ///
    /// Stalls the session. No retry happens; call `begin` again to reprint.
    pub fn chunk_failed(&mut self, reason: &str) -> Result<(), ThermolineError> {
        if self.state != DriverState::Sending || self.stalled {
            log::debug!("write failure ignored in state {:?}: {}", self.state, reason);
            return Ok(());
        }
        log::warn!(
            "chunk {} of {} failed: {}",
            self.next.saturating_sub(1),
            self.chunks.len(),
            reason
        );
        self.stalled = true;
        Err(ThermolineError::TransportWrite(reason.to_string()))
    }

    fn send_next<L>(&mut self, link: &mut L) -> Result<DriverStep, ThermolineError>
    where
        L: PrinterLink + ?Sized,
    {
        let Some(chunk) = self.chunks.get(self.next) else {
            self.finish();
            return Ok(DriverStep::Complete);
        };

        let index = self.next;
        if let Err(e) = link.write_chunk(chunk) {
            log::warn!("chunk {} could not be written: {}", index, e);
            self.stalled = true;
            return Err(e);
        }
        self.next += 1;
        log::trace!("sent chunk {}/{} ({} bytes)", self.next, self.chunks.len(), chunk.len());
        Ok(DriverStep::Sent(index))
    }

    fn finish(&mut self) {
        self.state = DriverState::Done;
        log::info!("print session complete ({} chunks)", self.chunks.len());
        if let Some(callback) = self.on_complete.as_mut() {
            callback();
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Unit size of the current (or next, if none pending) session
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn pending_unit(&self) -> Option<usize> {
        self.pending_unit
    }

    /// Chunks in the current session
    pub fn chunks(&self) -> &[Vec<u8>] {
        &self.chunks
    }

    /// Chunks handed to the link so far in the current session
    pub fn sent(&self) -> usize {
        self.next
    }

    /// Whether the current session stopped on a write failure
    pub fn is_stalled(&self) -> bool {
        self.stalled
    }
}
