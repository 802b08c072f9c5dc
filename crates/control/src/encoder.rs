//! Quadrature decoding for the four front-panel rotary encoders.
//!
//! An encoder reports no absolute position, only two switch lines whose
//! four combinations (00, 01, 10, 11) step through a Gray sequence as
//! the shaft turns. A detent is only trustworthy after the full
//! intermediate sequence has been observed; tracking that requires a
//! per-encoder state machine (after Ben Buxton's treatment of the
//! problem, <http://www.buxtronix.net/2011/10/rotary-encoders-done-properly.html>).
//!
//! Two switch profiles exist on the board:
//!
//! - [`Profile::FullStep`] parts signal a detent at both 00 and 11, so
//!   four sequences complete a movement:
//!   `00→01→11` CW, `00→10→11` CCW, `11→01→00` CCW, `11→10→00` CW.
//! - [`Profile::QuarterStep`] parts only rest at 00, so a movement is
//!   `00→01→11→10→00` CW or `00→10→11→01→00` CCW, with backtracking
//!   through intermediate positions allowed.
//!
//! Decoding runs in the pin-change interrupt; everything here is
//! constant-time and never blocks.

use embassy_time::{Duration, Instant};

use platform::input::{Direction, EncoderMove};

/// Number of encoders wired to consecutive pin pairs.
pub const NUM_ENCODERS: usize = 4;

/// Depth of the per-encoder diagnostic history ring.
pub const HISTORY_DEPTH: usize = 10;

/// The encoder chosen as master gain control.
pub const MASTER_GAIN_ENCODER: u8 = 3;

/// The two switch lines of one encoder, packed into bits 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderSignals(u8);

impl EncoderSignals {
    /// Pack the two switch lines from the low two bits of `bits`.
    #[must_use]
    pub const fn new(bits: u8) -> Self {
        Self(bits & 0b11)
    }

    /// The packed switch value (0..=3).
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// One transition-table cell: the state to move to, and the movement to
/// report, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    next: u8,
    emit: Option<Direction>,
}

const fn go(next: u8) -> Step {
    Step { next, emit: None }
}

const fn cw(next: u8) -> Step {
    Step {
        next,
        emit: Some(Direction::Clockwise),
    }
}

const fn ccw(next: u8) -> Step {
    Step {
        next,
        emit: Some(Direction::CounterClockwise),
    }
}

// Full-step transitions. Rows are states, columns are indexed by the
// packed switch value. State meanings:
//   0 lost, 1 at 00, 2 00→01, 3 00→10, 4 at 11, 5 11→01, 6 11→10.
static FULL_STEP: [[Step; 4]; 7] = [
    [go(1), go(0), go(0), go(4)],
    [go(1), go(2), go(3), go(4)],
    [go(1), go(2), go(0), cw(4)],
    [go(1), go(0), go(3), ccw(4)],
    [go(1), go(5), go(6), go(4)],
    [ccw(1), go(5), go(0), go(4)],
    [cw(1), go(0), go(6), go(4)],
];

// Quarter-step transitions. State meanings:
//   0 lost, 1 at 00, 2 00→01, 3 00→01→11, 4 00→01→11→10,
//   5 00→10, 6 00→10→11, 7 00→10→11→01.
static QUARTER_STEP: [[Step; 4]; 8] = [
    [go(1), go(0), go(0), go(0)],
    [go(1), go(2), go(5), go(0)],
    [go(1), go(2), go(0), go(3)],
    [go(1), go(2), go(4), go(3)],
    [cw(1), go(0), go(4), go(3)],
    [go(1), go(0), go(5), go(6)],
    [go(1), go(7), go(5), go(6)],
    [ccw(1), go(7), go(0), go(6)],
];

/// Which transition table an encoder runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Profile {
    /// Detents at both 00 and 11.
    FullStep,
    /// Detents at 00 only, backtracking allowed.
    QuarterStep,
}

impl Profile {
    fn table(self) -> &'static [[Step; 4]] {
        match self {
            Self::FullStep => &FULL_STEP,
            Self::QuarterStep => &QUARTER_STEP,
        }
    }
}

/// One recorded decode transition, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HistoryEntry {
    /// State after the transition.
    pub state: u8,
    /// Switch lines that caused it.
    pub signals: EncoderSignals,
    /// Movement reported, if any.
    pub emitted: Option<Direction>,
    /// Time since the previous recorded transition.
    pub since: Duration,
}

impl Default for HistoryEntry {
    fn default() -> Self {
        Self {
            state: 0,
            signals: EncoderSignals::default(),
            emitted: None,
            since: Duration::from_ticks(0),
        }
    }
}

/// Point-in-time copy of one encoder's decoder state and history,
/// newest entry first. Taken by the console task; the decoder itself is
/// only ever touched from the interrupt.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderSnapshot {
    /// Transition profile this encoder runs.
    pub profile: Profile,
    /// Current state-machine state.
    pub state: u8,
    /// The last [`HISTORY_DEPTH`] transitions, newest first.
    pub history: [HistoryEntry; HISTORY_DEPTH],
}

/// Decoder state machine for a single encoder.
pub struct Encoder {
    profile: Profile,
    state: u8,
    last_change: Instant,
    history: [HistoryEntry; HISTORY_DEPTH],
}

impl Encoder {
    /// Create a decoder in the lost state.
    #[must_use]
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            state: 0,
            last_change: Instant::from_ticks(0),
            history: [HistoryEntry::default(); HISTORY_DEPTH],
        }
    }

    /// Advance the state machine with freshly sampled switch lines.
    ///
    /// Returns the completed movement, if this sample completes one.
    /// A history entry is recorded only when the signals differ from
    /// the previously recorded ones, so a noisy line resting near a
    /// transition does not flood the ring.
    pub fn decode(&mut self, signals: EncoderSignals, now: Instant) -> Option<Direction> {
        let step = self.profile.table()[usize::from(self.state)][usize::from(signals.get())];
        self.state = step.next;

        if self.history[0].signals != signals {
            self.history.copy_within(0..HISTORY_DEPTH - 1, 1);
            self.history[0] = HistoryEntry {
                state: self.state,
                signals,
                emitted: step.emit,
                since: now
                    .checked_duration_since(self.last_change)
                    .unwrap_or(Duration::from_ticks(0)),
            };
            self.last_change = now;
        }

        step.emit
    }

    /// The transition profile this decoder runs.
    #[must_use]
    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Copy out the decoder state for diagnostics.
    #[must_use]
    pub fn snapshot(&self) -> EncoderSnapshot {
        EncoderSnapshot {
            profile: self.profile,
            state: self.state,
            history: self.history,
        }
    }
}

/// All four encoders, decoded together from one pin-change sample.
pub struct EncoderBank {
    encoders: [Encoder; NUM_ENCODERS],
}

impl EncoderBank {
    /// Create the bank with the board's switch profiles: encoders 0 and
    /// 1 are quarter-step parts, 2 and 3 full-step.
    #[must_use]
    pub fn new() -> Self {
        Self {
            encoders: [
                Encoder::new(Profile::QuarterStep),
                Encoder::new(Profile::QuarterStep),
                Encoder::new(Profile::FullStep),
                Encoder::new(Profile::FullStep),
            ],
        }
    }

    /// Decode one sample of the pin bank.
    ///
    /// `pins` carries the eight switch lines, two bits per encoder with
    /// encoder 0 in bits 0..=1. Completed movements are returned through
    /// `emit`, one call per movement, in encoder order.
    pub fn on_pin_change(&mut self, pins: u32, now: Instant, mut emit: impl FnMut(EncoderMove)) {
        let mut pins = pins;
        for (num, encoder) in self.encoders.iter_mut().enumerate() {
            #[allow(clippy::cast_possible_truncation)] // masked to two bits
            let signals = EncoderSignals::new((pins & 0b11) as u8);
            if let Some(direction) = encoder.decode(signals, now) {
                emit(EncoderMove {
                    encoder: num as u8,
                    at: now,
                    direction,
                });
            }
            pins >>= 2;
        }
    }

    /// Copy out one encoder's state for diagnostics.
    #[must_use]
    pub fn snapshot(&self, index: usize) -> Option<EncoderSnapshot> {
        self.encoders.get(index).map(Encoder::snapshot)
    }
}

impl Default for EncoderBank {
    fn default() -> Self {
        Self::new()
    }
}
