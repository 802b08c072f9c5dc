//! Input events produced by the encoder interrupt and consumed by the
//! UI and diagnostic tasks.

use embassy_time::Instant;

/// Rotation direction sensed by a quadrature encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise detent.
    Clockwise,
    /// Counter-clockwise detent.
    CounterClockwise,
}

/// One sensed movement of one encoder.
///
/// Created in the encoder interrupt, sent by value through queues,
/// never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderMove {
    /// Which encoder moved (0..=3).
    pub encoder: u8,
    /// When the movement completed.
    pub at: Instant,
    /// Which way it went.
    pub direction: Direction,
}

/// UI pages reachable through page-change requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Page {
    /// Live input metering and gain.
    Input,
    /// Signal-generation controls.
    Generate,
}

/// Generation sub-modes selectable from the Generate page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GenerateKind {
    /// Generation off.
    Off,
    /// Reference tone.
    Tone,
    /// First tuning tone.
    Tune1,
    /// Second tuning tone.
    Tune2,
}

/// Events carried on the primary UI queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiEvent {
    /// An encoder produced a movement.
    Encoder(EncoderMove),
    /// Periodic UI refresh tick.
    Tick,
    /// Request to switch to a page.
    GotoPage(Page),
    /// Request to change the generation sub-mode.
    Generate(GenerateKind),
}
