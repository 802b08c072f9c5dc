//! Reference-tone timer seam.
//!
//! The tone generator configures a free-running timer channel whose
//! compare-match output toggles, producing a symmetric square wave. The
//! audio sample engine never touches the timer itself — it only samples
//! the output line through [`crate::audio::TonePhase`].

/// Prescaler taps available between the system clock and the timer
/// counter. The values are the division factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockDivisor {
    /// System clock / 2.
    Div2,
    /// System clock / 8.
    Div8,
    /// System clock / 32.
    Div32,
    /// System clock / 128.
    Div128,
}

impl ClockDivisor {
    /// All taps, fastest first. The tone generator walks this ladder
    /// looking for the first tap whose compare value fits 16 bits.
    pub const LADDER: [Self; 4] = [Self::Div2, Self::Div8, Self::Div32, Self::Div128];

    /// The division factor.
    #[must_use]
    pub const fn factor(self) -> u32 {
        match self {
            Self::Div2 => 2,
            Self::Div8 => 8,
            Self::Div32 => 32,
            Self::Div128 => 128,
        }
    }
}

/// A timer channel in waveform mode with a toggling compare output.
///
/// The realized output frequency is
/// `system_clock / divisor / (2 * compare)` — the factor of two because
/// the output toggles once per compare match.
pub trait ToneTimer {
    /// Stop the timer; the output line parks low.
    fn stop(&mut self);

    /// Program the prescaler tap and 16-bit compare value. Only valid
    /// while stopped.
    fn configure(&mut self, divisor: ClockDivisor, compare: u16);

    /// Start counting from zero (known phase).
    fn start(&mut self);
}
