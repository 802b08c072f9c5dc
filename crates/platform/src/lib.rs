//! Hardware abstraction layer for the directional-speaker control unit.
//!
//! This crate provides trait-based abstractions for the hardware the
//! real-time core touches, enabling development and testing without
//! physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Collaborator layer (ui crate, console)
//!         ↓
//! Real-time core (control crate)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Hardware layer (vendor HAL + PAC)
//! ```
//!
//! # Abstraction Levels
//!
//! - [`bus::BusPort`] - one transfer on the shared synchronous serial bus
//! - [`audio`] - ADC inputs, DAC output, ultrasonic PWM carrier, tone phase
//! - [`tone::ToneTimer`] - free-running reference-tone timer
//! - [`input`] - encoder moves and UI events
//! - [`fault`] - fatal diagnostic codes and their blink patterns
//!
//! # Features
//!
//! - `std`: enable standard library support (mocks outside `cfg(test)`)
//! - `hardware`: physical hardware target marker
//! - `defmt`: enable defmt logging derives

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
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(async_fn_in_trait)] // Embassy no_std: single-threaded, Send bounds not needed

pub mod audio;
pub mod audio_types;
pub mod bus;
pub mod fault;
pub mod input;
pub mod mocks;
pub mod tone;

// Re-export main traits
pub use audio::{AdcChannel, AdcInputs, CarrierPwm, DacOutput, TonePhase};
pub use bus::BusPort;
pub use tone::{ClockDivisor, ToneTimer};

// Re-export domain types
pub use audio_types::{CarrierDuty, DacCode, GainCode, OutOfRangeError};
pub use fault::{BlinkPattern, Fault};
pub use input::{Direction, EncoderMove, GenerateKind, Page, UiEvent};
