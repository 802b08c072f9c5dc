//! Audio hardware seams used by the fixed-rate sample interrupt.
//!
//! All methods here are synchronous and must stay cheap: the sample
//! engine calls them from an interrupt that fires roughly every 2000
//! CPU cycles. Nothing in this module may block, allocate, or loop
//! without bound.

use crate::audio_types::{CarrierDuty, DacCode};

/// The two analog input channels combined in passthrough mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcChannel {
    /// Channel 0 (left/line input).
    Ch0,
    /// Channel 1 (right/line input).
    Ch1,
}

/// Free-running analog-to-digital converter inputs.
pub trait AdcInputs {
    /// Read the latest conversion for `channel` (12-bit).
    fn read(&mut self, channel: AdcChannel) -> u16;
}

/// The digital-to-analog output channel.
pub trait DacOutput {
    /// Write one conversion code to the output.
    fn write(&mut self, code: DacCode);
}

/// The ultrasonic PWM carrier channel.
///
/// Duty updates come from the sample interrupt; enable/disable comes
/// from task context on mode changes.
pub trait CarrierPwm {
    /// Latch a new duty value for the next PWM period.
    fn set_duty(&mut self, duty: CarrierDuty);

    /// Enable the carrier output channel.
    fn enable(&mut self);

    /// Disable the carrier output channel.
    fn disable(&mut self);

    /// Whether the carrier output channel is currently enabled.
    fn is_enabled(&self) -> bool;
}

/// The reference-tone phase bit, sampled from the tone timer's
/// compare-match output line.
pub trait TonePhase {
    /// `true` while the tone output line is in its high half-cycle.
    fn phase_high(&self) -> bool;
}
