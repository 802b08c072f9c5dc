//! Front-panel policy for the directional-speaker control unit.
//!
//! Pure state machines with no hardware access: the page machine
//! decides what is on screen and what the audio side should be doing,
//! and the gain model turns encoder detents into potentiometer wiper
//! codes. The coordinator task owns both and wires their outputs to
//! the `control` crate.

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::must_use_candidate)]

pub mod gain;
pub mod pages;

pub use gain::GainModel;
pub use pages::{AudioRequest, PageState, UiPage};
