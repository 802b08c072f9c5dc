//! Sample engine: per-mode output math and mode-switch sequencing.

#![allow(clippy::unwrap_used)]

use control::audio::{AudioEngine, AudioMode, SAMPLE_EVENT_MASK};
use control::tone::ToneGenerator;
use platform::audio::CarrierPwm;
use platform::fault::Fault;
use platform::mocks::{MockSampleHw, MockToneTimer};

fn engine_in(mode: AudioMode, hw: &mut MockSampleHw) -> (AudioEngine, ToneGenerator<MockToneTimer>) {
    let engine = AudioEngine::new();
    let mut tone = ToneGenerator::new(MockToneTimer::new());
    engine.set_mode(mode, &mut tone, hw);
    (engine, tone)
}

#[test]
fn unexpected_pending_mask_is_fatal() {
    let mut hw = MockSampleHw::new();
    let (engine, _tone) = engine_in(AudioMode::AdcPassthrough, &mut hw);
    let result = engine.on_sample_tick(SAMPLE_EVENT_MASK | 1, &mut hw);
    assert_eq!(
        result,
        Err(Fault::UnexpectedSampleInterrupt {
            pending: SAMPLE_EVENT_MASK | 1
        })
    );
    assert_eq!(hw.last_dac(), None, "no output after a fatal mask");
}

#[test]
fn off_mode_produces_no_output() {
    let mut hw = MockSampleHw::new();
    let engine = AudioEngine::new();
    hw.set_adc(1000, 1000);
    engine.on_sample_tick(SAMPLE_EVENT_MASK, &mut hw).unwrap();
    assert_eq!(hw.last_dac(), None);
    assert_eq!(hw.last_duty(), None);
}

#[test]
fn passthrough_averages_the_inputs() {
    let mut hw = MockSampleHw::new();
    let (engine, _tone) = engine_in(AudioMode::AdcPassthrough, &mut hw);
    assert!(hw.is_enabled());

    hw.set_adc(1000, 2000);
    engine.on_sample_tick(SAMPLE_EVENT_MASK, &mut hw).unwrap();
    assert_eq!(hw.last_dac(), Some(1500));
    // duty = 2098 * 3000 / 8192 + 1
    assert_eq!(hw.last_duty(), Some(769));
}

#[test]
fn passthrough_extremes_stay_off_the_rails() {
    let mut hw = MockSampleHw::new();
    let (engine, _tone) = engine_in(AudioMode::AdcPassthrough, &mut hw);

    hw.set_adc(0x0fff, 0x0fff);
    engine.on_sample_tick(SAMPLE_EVENT_MASK, &mut hw).unwrap();
    assert_eq!(hw.last_dac(), Some(0x0fff));
    let duty = hw.last_duty().unwrap();
    assert!(duty > 0 && duty < 2100, "full-scale duty {duty} must keep switching");

    hw.set_adc(0, 0);
    engine.on_sample_tick(SAMPLE_EVENT_MASK, &mut hw).unwrap();
    assert_eq!(hw.last_dac(), Some(0));
    assert_eq!(hw.last_duty(), Some(1));
}

#[test]
fn tone_value_mode_is_a_square_wave_around_midpoint() {
    let mut hw = MockSampleHw::new();
    let (engine, _tone) = engine_in(AudioMode::ToneValue, &mut hw);
    engine.set_tone_value(1000);

    hw.set_phase(true);
    engine.on_sample_tick(SAMPLE_EVENT_MASK, &mut hw).unwrap();
    assert_eq!(hw.last_dac(), Some(2048 + 1000));
    let duty_high = hw.last_duty().unwrap();

    hw.set_phase(false);
    engine.on_sample_tick(SAMPLE_EVENT_MASK, &mut hw).unwrap();
    assert_eq!(hw.last_dac(), Some(2048 - 1000));
    let duty_low = hw.last_duty().unwrap();

    // Symmetric about the 50% duty point.
    assert_eq!(duty_high - 1050, 1050 - duty_low);
}

#[test]
fn tone_value_is_clamped_against_clipping() {
    let mut hw = MockSampleHw::new();
    let (engine, _tone) = engine_in(AudioMode::ToneValue, &mut hw);
    engine.set_tone_value(u16::MAX);

    hw.set_phase(true);
    engine.on_sample_tick(SAMPLE_EVENT_MASK, &mut hw).unwrap();
    assert_eq!(hw.last_dac(), Some(4095));
    hw.set_phase(false);
    engine.on_sample_tick(SAMPLE_EVENT_MASK, &mut hw).unwrap();
    assert_eq!(hw.last_dac(), Some(1));
}

#[test]
fn tone_frequency_mode_scales_with_volume() {
    let mut hw = MockSampleHw::new();
    let (engine, _tone) = engine_in(AudioMode::ToneFrequency, &mut hw);

    engine.set_volume(0);
    hw.set_phase(true);
    engine.on_sample_tick(SAMPLE_EVENT_MASK, &mut hw).unwrap();
    assert_eq!(hw.last_dac(), Some(2048), "zero volume idles at midpoint");
    assert_eq!(hw.last_duty(), Some(1050));

    engine.set_volume(255);
    engine.on_sample_tick(SAMPLE_EVENT_MASK, &mut hw).unwrap();
    assert_eq!(hw.last_dac(), Some(4095), "full volume swings to full scale");
    assert_eq!(hw.last_duty(), Some(2099));
    hw.set_phase(false);
    engine.on_sample_tick(SAMPLE_EVENT_MASK, &mut hw).unwrap();
    assert_eq!(hw.last_dac(), Some(1));
    assert_eq!(hw.last_duty(), Some(1));
}

#[test]
fn mode_switch_gates_the_carrier() {
    let mut hw = MockSampleHw::new();
    let engine = AudioEngine::new();
    let mut tone = ToneGenerator::new(MockToneTimer::new());

    assert!(!hw.is_enabled());
    engine.set_mode(AudioMode::AdcPassthrough, &mut tone, &mut hw);
    assert!(hw.is_enabled());
    engine.set_mode(AudioMode::Off, &mut tone, &mut hw);
    assert!(!hw.is_enabled());
}

#[test]
fn mode_switch_always_silences_the_tone_first() {
    let mut hw = MockSampleHw::new();
    let engine = AudioEngine::new();
    let mut tone = ToneGenerator::new(MockToneTimer::new());

    engine.set_mode(AudioMode::ToneValue, &mut tone, &mut hw);
    tone.set_frequency(440).unwrap();
    assert_eq!(tone.frequency_hz(), 440);

    engine.set_mode(AudioMode::AdcPassthrough, &mut tone, &mut hw);
    assert_eq!(tone.frequency_hz(), 0, "stale frequency must not survive");
    assert!(!tone.timer().is_running());
    assert_eq!(engine.mode(), AudioMode::AdcPassthrough);

    // And in the other direction: entering a tone mode starts silent,
    // so a racing frequency request always lands on a clean generator.
    tone.set_frequency(880).unwrap();
    engine.set_mode(AudioMode::ToneFrequency, &mut tone, &mut hw);
    assert_eq!(tone.frequency_hz(), 0);
    tone.set_frequency(440).unwrap();
    assert_eq!(tone.frequency_hz(), 440);
}

#[test]
fn same_mode_request_is_a_no_op() {
    let mut hw = MockSampleHw::new();
    let engine = AudioEngine::new();
    let mut tone = ToneGenerator::new(MockToneTimer::new());

    engine.set_mode(AudioMode::ToneValue, &mut tone, &mut hw);
    tone.set_frequency(440).unwrap();
    engine.set_mode(AudioMode::ToneValue, &mut tone, &mut hw);
    assert_eq!(tone.frequency_hz(), 440, "re-selecting the mode must not cut the tone");
    assert!(hw.is_enabled());
}
