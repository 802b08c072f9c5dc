//! Master gain model driven by the gain encoder.
//!
//! The UI tracks both potentiometer wipers but moves them together:
//! each detent of the master encoder steps the level by four counts,
//! clamped to `0..=0x100`. The upper half of the 9-bit wiper range is
//! deliberately unused as output-stage headroom.

use platform::audio_types::GainCode;
use platform::input::{Direction, EncoderMove};

/// The encoder assigned to master gain.
pub const MASTER_ENCODER: u8 = 3;

/// Gain counts per encoder detent.
pub const GAIN_STEP: i32 = 4;

/// Largest level the UI will command, half the wiper range.
pub const GAIN_CEILING: u16 = 0x100;

/// The UI's view of the two wiper levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GainModel {
    gain0: u16,
    gain1: u16,
}

impl GainModel {
    /// Start from silence.
    #[must_use]
    pub const fn new() -> Self {
        Self { gain0: 0, gain1: 0 }
    }

    /// Adopt levels read back from the potentiometer at startup, so
    /// the encoder steps from wherever the hardware was left.
    #[must_use]
    pub fn from_wipers(gain0: GainCode, gain1: GainCode) -> Self {
        Self {
            gain0: gain0.get().min(GAIN_CEILING),
            gain1: gain1.get().min(GAIN_CEILING),
        }
    }

    /// The level shown as master gain.
    #[must_use]
    pub fn level(&self) -> u16 {
        self.gain0
    }

    /// Apply one encoder movement.
    ///
    /// Returns the wiper code to write to both channels, or `None`
    /// when the movement belongs to a different encoder.
    pub fn on_encoder(&mut self, movement: &EncoderMove) -> Option<GainCode> {
        if movement.encoder != MASTER_ENCODER {
            return None;
        }
        let delta = match movement.direction {
            Direction::Clockwise => GAIN_STEP,
            Direction::CounterClockwise => -GAIN_STEP,
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped above
        let level = (i32::from(self.gain0) + delta).clamp(0, i32::from(GAIN_CEILING)) as u16;
        self.gain0 = level;
        self.gain1 = level;
        Some(GainCode::new(level))
    }
}

impl Default for GainModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use embassy_time::Instant;

    use super::*;

    fn detent(encoder: u8, direction: Direction) -> EncoderMove {
        EncoderMove {
            encoder,
            at: Instant::from_ticks(0),
            direction,
        }
    }

    #[test]
    fn steps_by_four_counts() {
        let mut gain = GainModel::new();
        let code = gain.on_encoder(&detent(MASTER_ENCODER, Direction::Clockwise)).unwrap();
        assert_eq!(code.get(), 4);
        gain.on_encoder(&detent(MASTER_ENCODER, Direction::Clockwise)).unwrap();
        assert_eq!(gain.level(), 8);
        let code = gain
            .on_encoder(&detent(MASTER_ENCODER, Direction::CounterClockwise))
            .unwrap();
        assert_eq!(code.get(), 4);
    }

    #[test]
    fn other_encoders_are_ignored() {
        let mut gain = GainModel::new();
        for encoder in 0..MASTER_ENCODER {
            assert!(gain.on_encoder(&detent(encoder, Direction::Clockwise)).is_none());
        }
        assert_eq!(gain.level(), 0);
    }

    #[test]
    fn clamps_at_silence() {
        let mut gain = GainModel::new();
        let code = gain
            .on_encoder(&detent(MASTER_ENCODER, Direction::CounterClockwise))
            .unwrap();
        assert_eq!(code.get(), 0, "already silent, stays silent");
    }

    #[test]
    fn climbs_monotonically_to_the_ceiling() {
        let mut gain = GainModel::new();
        let mut previous = 0;
        for _ in 0..100 {
            let code = gain.on_encoder(&detent(MASTER_ENCODER, Direction::Clockwise)).unwrap();
            assert!(code.get() >= previous);
            previous = code.get();
        }
        assert_eq!(previous, GAIN_CEILING, "64 detents reach the ceiling and stay");
    }

    #[test]
    fn adopts_wiper_readback_with_headroom_clamp() {
        let gain = GainModel::from_wipers(GainCode::new(0x80), GainCode::new(0x1ff));
        assert_eq!(gain.level(), 0x80);
        let mut gain = gain;
        gain.on_encoder(&detent(MASTER_ENCODER, Direction::Clockwise)).unwrap();
        assert_eq!(gain.level(), 0x84);
    }
}
