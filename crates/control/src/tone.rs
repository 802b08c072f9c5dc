//! Reference-tone generation.
//!
//! The tone is a hardware square wave: a timer channel toggles its
//! compare output, the sample engine reads that line back as the phase
//! bit. Setting a frequency means picking the fastest prescaler tap
//! whose compare value still fits 16 bits, which keeps frequency
//! resolution as fine as the hardware allows.

use thiserror_no_std::Error;

use platform::tone::{ClockDivisor, ToneTimer};

/// Timer input clock before the prescaler.
pub const TIMER_CLOCK_HZ: u32 = 84_000_000;

/// Frequencies the divisor ladder cannot realize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToneError {
    /// The compare value would overflow 16 bits even on the slowest
    /// tap.
    #[error("{hz} Hz is below the range of the divisor ladder")]
    TooLow {
        /// The requested frequency.
        hz: u32,
    },
    /// The compare value would be zero even on the fastest tap.
    #[error("{hz} Hz is above the range of the divisor ladder")]
    TooHigh {
        /// The requested frequency.
        hz: u32,
    },
}

/// Pick the fastest prescaler tap that can realize `hz`, and the
/// compare value for it, rounded to nearest.
///
/// The output toggles on each compare match, so the realized frequency
/// is `clock_hz / factor / (2 * compare)`.
///
/// # Errors
///
/// [`ToneError::TooHigh`] or [`ToneError::TooLow`] when no tap fits.
pub fn pick_divisor(hz: u32, clock_hz: u32) -> Result<(ClockDivisor, u16), ToneError> {
    let toggle_rate = u64::from(hz) * 2;
    if toggle_rate == 0 {
        return Err(ToneError::TooLow { hz });
    }
    for divisor in ClockDivisor::LADDER {
        let counter_hz = u64::from(clock_hz / divisor.factor());
        let compare = (counter_hz + toggle_rate / 2) / toggle_rate;
        if compare == 0 {
            // Slower taps only make this worse.
            return Err(ToneError::TooHigh { hz });
        }
        if compare <= u64::from(u16::MAX) {
            #[allow(clippy::cast_possible_truncation)] // bounded above
            return Ok((divisor, compare as u16));
        }
    }
    Err(ToneError::TooLow { hz })
}

/// Drives the tone timer, tracking the currently sounding frequency.
pub struct ToneGenerator<T: ToneTimer> {
    timer: T,
    frequency_hz: u32,
}

impl<T: ToneTimer> ToneGenerator<T> {
    /// Take ownership of the timer, stopping it for a known state.
    pub fn new(mut timer: T) -> Self {
        timer.stop();
        Self {
            timer,
            frequency_hz: 0,
        }
    }

    /// The frequency currently sounding, 0 when silent.
    #[must_use]
    pub fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    /// Borrow the underlying timer, for diagnostics.
    #[must_use]
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Stop the tone. Idempotent.
    pub fn silence(&mut self) {
        if self.frequency_hz != 0 {
            self.timer.stop();
            self.frequency_hz = 0;
        }
    }

    /// Sound `hz`, or stop for `hz == 0`.
    ///
    /// Requesting the frequency that is already sounding leaves the
    /// timer untouched, so repeated UI events cannot glitch the phase.
    /// Any actual change stops the timer, reprograms it, and restarts
    /// from zero for a known phase.
    ///
    /// # Errors
    ///
    /// [`ToneError`] when the divisor ladder cannot realize `hz`; the
    /// timer is left stopped and silent.
    pub fn set_frequency(&mut self, hz: u32) -> Result<(), ToneError> {
        if hz == self.frequency_hz {
            return Ok(());
        }
        if hz == 0 {
            self.silence();
            return Ok(());
        }
        self.timer.stop();
        self.frequency_hz = 0;
        let (divisor, compare) = pick_divisor(hz, TIMER_CLOCK_HZ)?;
        self.timer.configure(divisor, compare);
        self.timer.start();
        self.frequency_hz = hz;
        Ok(())
    }
}
