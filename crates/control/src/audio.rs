//! The fixed-rate audio sample engine.
//!
//! [`AudioEngine::on_sample_tick`] runs from the carrier PWM update
//! interrupt at the carrier rate (~40 kHz), computing the next DAC code
//! and carrier duty from whichever source the current mode selects.
//! Mode, volume, and tone value live in atomics: the interrupt only
//! ever reads them, task context only ever writes them, and each field
//! is independent, so no lock is needed and none may be taken at this
//! priority.

use core::sync::atomic::{AtomicU16, AtomicU8, Ordering};

use platform::audio::{AdcChannel, AdcInputs, CarrierPwm, DacOutput, TonePhase};
use platform::audio_types::{CarrierDuty, DacCode, CARRIER_PERIOD};
use platform::fault::Fault;
use platform::tone::ToneTimer;

use crate::tone::ToneGenerator;

/// Sample rate of the engine, tied to the carrier PWM period.
pub const SAMPLE_RATE_HZ: u32 = 40_000;

/// The one pending-event mask the sample interrupt is wired to
/// deliver (compare channel 2 of the carrier timer).
pub const SAMPLE_EVENT_MASK: u32 = 1 << 2;

/// Largest DAC offset from midpoint: full swing without clipping.
const DAC_SWING: u16 = DacCode::MIDPOINT - 1;

/// Largest duty offset from midpoint that keeps the carrier switching.
const DUTY_SWING: u16 = CarrierDuty::MIDPOINT - 1;

/// What the sample engine drives to the outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AudioMode {
    /// Outputs idle, carrier disabled.
    Off = 0,
    /// Sum of the two ADC inputs (live audio path). Output level is
    /// set in the analog domain by the gain pot, not by `volume`.
    AdcPassthrough = 1,
    /// Square wave at the tone timer's rate, amplitude from the
    /// directly-set tone value.
    ToneValue = 2,
    /// Square wave at the tone timer's rate, amplitude from `volume`.
    ToneFrequency = 3,
}

impl AudioMode {
    fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::AdcPassthrough,
            2 => Self::ToneValue,
            3 => Self::ToneFrequency,
            _ => Self::Off,
        }
    }
}

/// Shared state of the sample engine.
///
/// Placed in a `static`; the interrupt borrows it through
/// [`on_sample_tick`](Self::on_sample_tick) while tasks call the
/// setters.
pub struct AudioEngine {
    mode: AtomicU8,
    volume: AtomicU8,
    tone_value: AtomicU16,
}

impl AudioEngine {
    /// Create an engine in [`AudioMode::Off`] with zero volume.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: AtomicU8::new(AudioMode::Off as u8),
            volume: AtomicU8::new(0),
            tone_value: AtomicU16::new(0),
        }
    }

    /// The currently active mode.
    #[must_use]
    pub fn mode(&self) -> AudioMode {
        AudioMode::from_raw(self.mode.load(Ordering::Acquire))
    }

    /// The current volume byte (tone modes only).
    #[must_use]
    pub fn volume(&self) -> u8 {
        self.volume.load(Ordering::Acquire)
    }

    /// Set the volume for [`AudioMode::ToneFrequency`]. Takes effect on
    /// the next sample.
    pub fn set_volume(&self, volume: u8) {
        self.volume.store(volume, Ordering::Release);
    }

    /// Set the direct amplitude for [`AudioMode::ToneValue`], clamped
    /// to the largest offset that cannot clip the DAC.
    pub fn set_tone_value(&self, value: u16) {
        self.tone_value.store(value.min(DAC_SWING), Ordering::Release);
    }

    /// Switch modes.
    ///
    /// Ordering matters: the tone generator is silenced first so a
    /// stale frequency can never sound in the new mode, then the mode
    /// takes effect, then the carrier hardware is gated to match. A
    /// same-mode request does nothing at all.
    pub fn set_mode<T: ToneTimer, C: CarrierPwm>(
        &self,
        new_mode: AudioMode,
        tone: &mut ToneGenerator<T>,
        carrier: &mut C,
    ) {
        if new_mode == self.mode() {
            return;
        }
        tone.silence();
        self.mode.store(new_mode as u8, Ordering::Release);
        if new_mode == AudioMode::Off {
            carrier.disable();
        } else {
            carrier.enable();
        }
    }

    /// Produce one sample. Called from the sample interrupt with the
    /// pending-event mask the hardware reported.
    ///
    /// # Errors
    ///
    /// [`Fault::UnexpectedSampleInterrupt`] when `pending` is anything
    /// but [`SAMPLE_EVENT_MASK`]: a wrong source at this priority means
    /// the carrier timing can no longer be trusted, and the caller must
    /// halt rather than keep driving the ultrasonic stage.
    pub fn on_sample_tick<IO>(&self, pending: u32, io: &mut IO) -> Result<(), Fault>
    where
        IO: AdcInputs + DacOutput + CarrierPwm + TonePhase,
    {
        if pending != SAMPLE_EVENT_MASK {
            return Err(Fault::UnexpectedSampleInterrupt { pending });
        }

        match self.mode() {
            AudioMode::Off => {
                // Carrier already disabled at the mode switch.
            }
            AudioMode::AdcPassthrough => {
                let sum = u32::from(io.read(AdcChannel::Ch0)) + u32::from(io.read(AdcChannel::Ch1));
                #[allow(clippy::cast_possible_truncation)] // sum of two 12-bit readings
                io.write(DacCode::new((sum / 2) as u16));
                // Map the 13-bit sum onto the duty range, offset by one
                // count to stay off the rail.
                let duty = u32::from(CARRIER_PERIOD - 2) * sum / 8192 + 1;
                #[allow(clippy::cast_possible_truncation)] // bounded by CARRIER_PERIOD
                io.set_duty(CarrierDuty::new(duty as u16));
            }
            mode @ (AudioMode::ToneValue | AudioMode::ToneFrequency) => {
                let offset = match mode {
                    AudioMode::ToneValue => self.tone_value.load(Ordering::Acquire),
                    _ => {
                        #[allow(clippy::cast_possible_truncation)] // scaled into 0..=DAC_SWING
                        let scaled =
                            (u32::from(DAC_SWING) * u32::from(self.volume()) / 255) as u16;
                        scaled
                    }
                };
                let phase_high = io.phase_high();
                let dac = if phase_high {
                    DacCode::MIDPOINT + offset
                } else {
                    DacCode::MIDPOINT - offset
                };
                io.write(DacCode::new(dac));

                #[allow(clippy::cast_possible_truncation)] // bounded by DUTY_SWING
                let duty_offset =
                    (u32::from(offset) * u32::from(DUTY_SWING) / u32::from(DAC_SWING)) as u16;
                let duty = if phase_high {
                    CarrierDuty::MIDPOINT + duty_offset
                } else {
                    CarrierDuty::MIDPOINT - duty_offset
                };
                io.set_duty(CarrierDuty::new(duty));
            }
        }
        Ok(())
    }
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new()
    }
}
