//! Shared synchronous serial bus seam.
//!
//! The controller runs one full-duplex transfer at a time: a 32-bit
//! request word goes out (device select in bits 16–19, payload in bits
//! 0–15) and a response word comes back when the transfer completes.
//! The [`BusPort`] trait covers exactly that one-transfer surface;
//! arbitration between tasks lives above it in the control crate.

/// One request/response transfer on the shared serial bus.
///
/// Implementations map onto a hardware transmit register, a
/// receive-ready interrupt, and a receive register. `read_response`
/// after a transfer that never completed returns whatever the receive
/// register last held — the arbiter reports that staleness to callers.
pub trait BusPort {
    /// Start transmitting `request`. Returns immediately; completion is
    /// observed through [`wait_ready`](Self::wait_ready).
    fn start_transfer(&mut self, request: u32);

    /// Resolve when the response to the last transfer has arrived.
    ///
    /// Hardware implementations wire this to the receive-ready
    /// interrupt; the arbiter races it against a timeout.
    async fn wait_ready(&mut self);

    /// Read the receive register (possibly stale — see trait docs).
    fn read_response(&mut self) -> u32;
}
