//! Fatal fault codes and their diagnostic blink patterns.
//!
//! Once the system has halted there is no console to report through;
//! the only channel left is the board LED. Each fatal condition maps to
//! a distinguishable pattern of long and short blinks. The core never
//! halts by itself — it returns a [`Fault`] and the hardware layer
//! masks interrupts and blinks forever.

use thiserror_no_std::Error;

/// A pattern of long and short blinks identifying a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkPattern {
    /// Number of long blinks.
    pub long: u8,
    /// Number of short blinks.
    pub short: u8,
}

/// Programming invariant violations. All fatal, none recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// The sample interrupt fired with an unexpected pending-event mask
    /// (wrong source, or a duplicate/lost event). Continuing would risk
    /// driving the ultrasonic stage outside safe parameters.
    #[error("unexpected sample interrupt source (pending mask {pending:#x})")]
    UnexpectedSampleInterrupt {
        /// The pending-event mask that was actually read.
        pending: u32,
    },
    /// A consumer task pulled an event tag it has no handler for.
    #[error("unknown event tag in UI queue")]
    UnknownUiEvent,
    /// A mandatory resource could not be created during startup.
    #[error("startup resource creation failed")]
    StartupResource,
}

impl Fault {
    /// The blink pattern the hardware layer emits for this fault.
    #[must_use]
    pub fn blink(self) -> BlinkPattern {
        match self {
            Self::UnexpectedSampleInterrupt { .. } => BlinkPattern { long: 6, short: 1 },
            Self::UnknownUiEvent => BlinkPattern { long: 1, short: 3 },
            Self::StartupResource => BlinkPattern { long: 4, short: 1 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fault_has_a_distinct_pattern() {
        let patterns = [
            Fault::UnexpectedSampleInterrupt { pending: 0 }.blink(),
            Fault::UnknownUiEvent.blink(),
            Fault::StartupResource.blink(),
        ];
        for (i, a) in patterns.iter().enumerate() {
            for b in patterns.iter().skip(i + 1) {
                assert_ne!(a, b, "blink patterns must be distinguishable");
            }
        }
    }
}
