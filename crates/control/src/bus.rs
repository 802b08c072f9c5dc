//! Arbitration for the shared synchronous serial bus.
//!
//! The digital potentiometer and the display controller share one bus
//! with hardware-selected channels. Several tasks want it (UI gain
//! writes, console register dumps, display refresh), so ownership goes
//! through an async mutex: a task acquires, performs its transfers, and
//! releases by dropping the guard. The guard is the only way to reach
//! the port, so transfers without ownership cannot be written at all.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard, TryLockError};
use embassy_time::{with_timeout, Duration};
use thiserror_no_std::Error;

use platform::bus::BusPort;

/// Default time limit for acquiring bus ownership.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Default time limit for one transfer to complete.
pub const TRANSFER_TIMEOUT: Duration = Duration::from_millis(1000);

/// Hardware channel-select values on the shared bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BusChannel {
    /// The dual digital potentiometer.
    Pot = 0,
    /// The character display controller.
    Display = 1,
}

impl BusChannel {
    /// Build a transfer request word: 16-bit payload in the low half,
    /// channel select in bits 16..=19, and the last-transfer marker so
    /// the chip select releases after the word.
    #[must_use]
    pub const fn request(self, payload: u16) -> u32 {
        (payload as u32) | ((self as u32) << 16) | (1 << 24)
    }
}

/// Bus acquisition and transfer failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Ownership was not granted within the caller's timeout.
    #[error("timed out waiting for bus ownership")]
    AcquireTimeout,
    /// A transfer did not complete in time. `stale` is whatever the
    /// receive register held, which is NOT a response to this request.
    #[error("bus transfer timed out (stale response word {stale:#010x})")]
    TransferTimeout {
        /// Receive-register contents at the time of the timeout.
        stale: u32,
    },
}

/// Owns the bus port and grants exclusive access to one task at a time.
pub struct BusArbiter<P: BusPort> {
    port: Mutex<CriticalSectionRawMutex, P>,
    transfer_timeout: Duration,
}

impl<P: BusPort> BusArbiter<P> {
    /// Wrap a port with the default transfer timeout.
    pub const fn new(port: P) -> Self {
        Self::with_transfer_timeout(port, TRANSFER_TIMEOUT)
    }

    /// Wrap a port with an explicit per-transfer timeout.
    pub const fn with_transfer_timeout(port: P, transfer_timeout: Duration) -> Self {
        Self {
            port: Mutex::new(port),
            transfer_timeout,
        }
    }

    /// Dissolve the arbiter and hand the port back.
    pub fn into_port(self) -> P {
        self.port.into_inner()
    }

    /// Acquire exclusive bus ownership, waiting up to `timeout`.
    ///
    /// A zero timeout is a polling acquire: it succeeds only if the bus
    /// is free right now. Ownership is released by dropping the
    /// returned guard.
    ///
    /// # Errors
    ///
    /// [`BusError::AcquireTimeout`] if the bus stayed busy for the full
    /// timeout.
    pub async fn acquire(&self, timeout: Duration) -> Result<BusGuard<'_, P>, BusError> {
        let port = if timeout.as_ticks() == 0 {
            self.port
                .try_lock()
                .map_err(|TryLockError| BusError::AcquireTimeout)?
        } else {
            with_timeout(timeout, self.port.lock())
                .await
                .map_err(|_| BusError::AcquireTimeout)?
        };
        Ok(BusGuard {
            port,
            transfer_timeout: self.transfer_timeout,
        })
    }
}

/// Exclusive bus ownership. Transfers go through here; dropping the
/// guard releases the bus to the next waiter.
pub struct BusGuard<'a, P: BusPort> {
    port: MutexGuard<'a, CriticalSectionRawMutex, P>,
    transfer_timeout: Duration,
}

impl<P: BusPort> BusGuard<'_, P> {
    /// Perform one full-duplex transfer: send `request`, wait for the
    /// completion signal, read the response word.
    ///
    /// # Errors
    ///
    /// [`BusError::TransferTimeout`] if the hardware never signalled
    /// completion; the stale receive-register contents ride along for
    /// diagnostics.
    pub async fn transceive(&mut self, request: u32) -> Result<u32, BusError> {
        self.port.start_transfer(request);
        match with_timeout(self.transfer_timeout, self.port.wait_ready()).await {
            Ok(()) => Ok(self.port.read_response()),
            Err(_) => Err(BusError::TransferTimeout {
                stale: self.port.read_response(),
            }),
        }
    }
}
