//! Real-time core of the directional-speaker control unit.
//!
//! Everything here is hardware-independent: the modules speak to the
//! board only through the trait seams in the `platform` crate, which
//! is what lets the whole core run under `cargo test` on the host.
//!
//! # Modules
//!
//! - [`encoder`]: quadrature decoding for the four front-panel encoders
//! - [`events`]: non-blocking interrupt-to-task event bridge
//! - [`bus`]: mutex arbitration for the shared serial bus
//! - [`pot`]: digital-potentiometer register protocol
//! - [`display_port`]: display-controller register access
//! - [`audio`]: the ~40 kHz sample engine
//! - [`tone`]: reference-tone timer control
//! - [`note`]: musical note codes for the tuning tones

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
#![allow(clippy::doc_markdown)] // hex values and register names in doc comments
#![allow(clippy::must_use_candidate)]

pub mod audio;
pub mod bus;
pub mod display_port;
pub mod encoder;
pub mod events;
pub mod note;
pub mod pot;
pub mod tone;

pub use audio::{AudioEngine, AudioMode};
pub use bus::{BusArbiter, BusChannel, BusError, BusGuard};
pub use encoder::{Encoder, EncoderBank, EncoderSignals, EncoderSnapshot, Profile};
pub use events::{EventBridge, TraceChannel, UiChannel};
pub use tone::{ToneError, ToneGenerator};
