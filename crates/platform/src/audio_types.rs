//! Audio domain newtypes for compile-time safety.
//!
//! These zero-cost abstractions prevent common errors:
//! - `DacCode`: clamps to the 12-bit converter range
//! - `CarrierDuty`: keeps the ultrasonic PWM duty strictly inside the
//!   open interval (0, period) — the carrier must never pin high or low
//! - `GainCode`: 9-bit digital-potentiometer wiper value (0..=0x1ff)

/// Ultrasonic carrier PWM period in counts: 84 MHz / 40 kHz.
pub const CARRIER_PERIOD: u16 = 2100;

/// Full-scale value of the 12-bit DAC.
pub const DAC_FULL_SCALE: u16 = 0x0fff;

/// Maximum 9-bit potentiometer wiper value.
pub const GAIN_MAX: u16 = 0x1ff;

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

// ── DacCode ──────────────────────────────────────────────────────────────────

/// A 12-bit digital-to-analog conversion code.
///
/// Construct with [`DacCode::new`] (clamping) or [`DacCode::try_new`]
/// (fallible, strict).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct DacCode(u16);

impl DacCode {
    /// Converter midpoint (zero signal).
    pub const MIDPOINT: u16 = 0x0800;

    /// Create a `DacCode`, clamping values above full scale.
    #[must_use]
    pub fn new(value: u16) -> Self {
        Self(value.min(DAC_FULL_SCALE))
    }

    /// Create a `DacCode`, returning an error if `value` exceeds 12 bits.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `value > 0x0fff`.
    pub fn try_new(value: u16) -> Result<Self, OutOfRangeError> {
        if value > DAC_FULL_SCALE {
            Err(OutOfRangeError {
                value: u32::from(value),
                min: 0,
                max: u32::from(DAC_FULL_SCALE),
            })
        } else {
            Ok(Self(value))
        }
    }

    /// Return the raw conversion code.
    #[must_use]
    pub fn get(self) -> u16 {
        self.0
    }
}

// ── CarrierDuty ──────────────────────────────────────────────────────────────

/// Ultrasonic carrier duty-cycle value, strictly inside (0, [`CARRIER_PERIOD`]).
///
/// A duty of 0 or `CARRIER_PERIOD` would stop the carrier switching and
/// leave the output stage pinned, so the constructor clamps to the open
/// interval `1 ..= CARRIER_PERIOD - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct CarrierDuty(u16);

impl CarrierDuty {
    /// 50% duty: carrier idling at half amplitude.
    pub const MIDPOINT: u16 = CARRIER_PERIOD / 2;

    /// Create a `CarrierDuty`, clamping into `1 ..= CARRIER_PERIOD - 1`.
    #[must_use]
    pub fn new(value: u16) -> Self {
        Self(value.clamp(1, CARRIER_PERIOD - 1))
    }

    /// Return the raw duty counts.
    #[must_use]
    pub fn get(self) -> u16 {
        self.0
    }
}

// ── GainCode ─────────────────────────────────────────────────────────────────

/// A 9-bit digital-potentiometer wiper value (0..=0x1ff).
///
/// The potentiometer's volatile wiper registers take 9-bit values where
/// 0x100 is full scale and 0x1ff is reserved headroom on some parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct GainCode(u16);

impl GainCode {
    /// Create a `GainCode`, clamping values above 0x1ff.
    #[must_use]
    pub fn new(value: u16) -> Self {
        Self(value.min(GAIN_MAX))
    }

    /// Create a `GainCode`, returning an error if `value` exceeds 9 bits.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `value > 0x1ff`.
    pub fn try_new(value: u16) -> Result<Self, OutOfRangeError> {
        if value > GAIN_MAX {
            Err(OutOfRangeError {
                value: u32::from(value),
                min: 0,
                max: u32::from(GAIN_MAX),
            })
        } else {
            Ok(Self(value))
        }
    }

    /// Return the raw 9-bit wiper value.
    #[must_use]
    pub fn get(self) -> u16 {
        self.0
    }
}
