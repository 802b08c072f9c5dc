//! Decoder behaviour over the canonical quadrature sequences.

#![allow(clippy::unwrap_used)]

use control::encoder::{Encoder, EncoderBank, EncoderSignals, Profile};
use embassy_time::{Duration, Instant};
use platform::input::Direction;

/// Feed a sequence of packed switch values, collecting every emission.
fn feed(encoder: &mut Encoder, sequence: &[u8]) -> Vec<Direction> {
    sequence
        .iter()
        .enumerate()
        .filter_map(|(i, &signals)| {
            encoder.decode(EncoderSignals::new(signals), Instant::from_ticks(i as u64))
        })
        .collect()
}

#[test]
fn full_step_clockwise_emits_at_11() {
    let mut encoder = Encoder::new(Profile::FullStep);
    assert_eq!(
        feed(&mut encoder, &[0b00, 0b01, 0b11]),
        vec![Direction::Clockwise]
    );
}

#[test]
fn full_step_counter_clockwise_emits_at_11() {
    let mut encoder = Encoder::new(Profile::FullStep);
    assert_eq!(
        feed(&mut encoder, &[0b00, 0b10, 0b11]),
        vec![Direction::CounterClockwise]
    );
}

#[test]
fn full_step_emits_at_00_coming_down() {
    let mut encoder = Encoder::new(Profile::FullStep);
    // Reach the 11 detent clockwise, then walk back down both ways.
    assert_eq!(
        feed(&mut encoder, &[0b00, 0b01, 0b11, 0b01, 0b00]),
        vec![Direction::Clockwise, Direction::CounterClockwise]
    );
    assert_eq!(
        feed(&mut encoder, &[0b01, 0b11, 0b10, 0b00]),
        vec![Direction::Clockwise, Direction::Clockwise]
    );
}

#[test]
fn full_step_chatter_near_a_transition_is_silent() {
    let mut encoder = Encoder::new(Profile::FullStep);
    feed(&mut encoder, &[0b00, 0b01, 0b11]);
    // Resting between 11 and 01: no movement completes.
    assert!(feed(&mut encoder, &[0b01, 0b11, 0b01, 0b11]).is_empty());
}

#[test]
fn quarter_step_emits_only_at_00() {
    let mut encoder = Encoder::new(Profile::QuarterStep);
    assert_eq!(
        feed(&mut encoder, &[0b00, 0b01, 0b11, 0b10, 0b00]),
        vec![Direction::Clockwise]
    );
    assert_eq!(
        feed(&mut encoder, &[0b10, 0b11, 0b01, 0b00]),
        vec![Direction::CounterClockwise]
    );
}

#[test]
fn quarter_step_tolerates_backtracking() {
    let mut encoder = Encoder::new(Profile::QuarterStep);
    // Wanders back and forth through the intermediates but still
    // completes one clockwise movement.
    assert_eq!(
        feed(
            &mut encoder,
            &[0b00, 0b01, 0b11, 0b01, 0b11, 0b10, 0b11, 0b10, 0b00]
        ),
        vec![Direction::Clockwise]
    );
}

#[test]
fn quarter_step_incomplete_sequence_is_silent() {
    let mut encoder = Encoder::new(Profile::QuarterStep);
    // Half a detent forward and back again.
    assert!(feed(&mut encoder, &[0b00, 0b01, 0b11, 0b01, 0b00]).is_empty());
}

#[test]
fn lost_state_resynchronizes_without_emitting() {
    let mut encoder = Encoder::new(Profile::QuarterStep);
    // Power-up mid-detent: nothing until a clean sequence from 00.
    assert!(feed(&mut encoder, &[0b11, 0b10, 0b11]).is_empty());
    assert_eq!(
        feed(&mut encoder, &[0b00, 0b01, 0b11, 0b10, 0b00]),
        vec![Direction::Clockwise]
    );
}

#[test]
fn history_records_only_signal_changes() {
    let mut encoder = Encoder::new(Profile::FullStep);
    let now = Instant::from_ticks(100);
    encoder.decode(EncoderSignals::new(0b01), now);
    encoder.decode(EncoderSignals::new(0b01), Instant::from_ticks(101));
    encoder.decode(EncoderSignals::new(0b01), Instant::from_ticks(102));
    let snapshot = encoder.snapshot();
    assert_eq!(snapshot.history[0].signals, EncoderSignals::new(0b01));
    // Only one change was recorded; the rest of the ring is pristine.
    assert_eq!(snapshot.history[1].signals, EncoderSignals::new(0));
    assert_eq!(snapshot.history[1].since, Duration::from_ticks(0));
}

#[test]
fn history_is_newest_first_with_elapsed_times() {
    let mut encoder = Encoder::new(Profile::FullStep);
    encoder.decode(EncoderSignals::new(0b01), Instant::from_ticks(10));
    encoder.decode(EncoderSignals::new(0b11), Instant::from_ticks(17));
    encoder.decode(EncoderSignals::new(0b10), Instant::from_ticks(20));
    let snapshot = encoder.snapshot();
    assert_eq!(snapshot.history[0].signals, EncoderSignals::new(0b10));
    assert_eq!(snapshot.history[0].since, Duration::from_ticks(3));
    assert_eq!(snapshot.history[1].signals, EncoderSignals::new(0b11));
    assert_eq!(snapshot.history[1].since, Duration::from_ticks(7));
    assert_eq!(snapshot.history[2].signals, EncoderSignals::new(0b01));
}

#[test]
fn history_ring_drops_the_oldest() {
    let mut encoder = Encoder::new(Profile::FullStep);
    // Alternate 01/10 for 14 distinct changes.
    for i in 0..14u64 {
        let signals = if i % 2 == 0 { 0b01 } else { 0b10 };
        encoder.decode(EncoderSignals::new(signals), Instant::from_ticks(i));
    }
    let snapshot = encoder.snapshot();
    assert_eq!(snapshot.history[0].signals, EncoderSignals::new(0b10));
    assert_eq!(snapshot.history[9].signals, EncoderSignals::new(0b01));
}

#[test]
fn bank_assigns_board_profiles() {
    let bank = EncoderBank::new();
    assert_eq!(bank.snapshot(0).unwrap().profile, Profile::QuarterStep);
    assert_eq!(bank.snapshot(1).unwrap().profile, Profile::QuarterStep);
    assert_eq!(bank.snapshot(2).unwrap().profile, Profile::FullStep);
    assert_eq!(bank.snapshot(3).unwrap().profile, Profile::FullStep);
    assert!(bank.snapshot(4).is_none());
}

#[test]
fn bank_unpacks_two_bits_per_encoder() {
    let mut bank = EncoderBank::new();
    let mut moves = Vec::new();
    // Walk encoder 2 (a full-step part, bits 4..=5) through one
    // clockwise detent while every other encoder sits at 00.
    for (tick, pins) in [0b00u32, 0b01, 0b11].iter().enumerate() {
        bank.on_pin_change(pins << 4, Instant::from_ticks(tick as u64), |m| {
            moves.push(m);
        });
    }
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].encoder, 2);
    assert_eq!(moves[0].direction, Direction::Clockwise);
    assert_eq!(moves[0].at, Instant::from_ticks(2));
}

#[test]
fn bank_reports_simultaneous_movements_in_encoder_order() {
    let mut bank = EncoderBank::new();
    let mut moves = Vec::new();
    // Encoders 2 and 3 complete a detent on the same sample.
    let steps = [0b00u32, 0b01, 0b11];
    for (tick, step) in steps.iter().enumerate() {
        let pins = (step << 4) | (step << 6);
        bank.on_pin_change(pins, Instant::from_ticks(tick as u64), |m| moves.push(m));
    }
    assert_eq!(
        moves.iter().map(|m| m.encoder).collect::<Vec<_>>(),
        vec![2, 3]
    );
}
