//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests.

#![cfg(any(test, feature = "std"))]
#![allow(clippy::unwrap_used)]

use embassy_time::{Duration, Timer};
use heapless::{Deque, Vec};

use crate::audio::{AdcChannel, AdcInputs, CarrierPwm, DacOutput, TonePhase};
use crate::audio_types::{CarrierDuty, DacCode};
use crate::bus::BusPort;
use crate::tone::{ClockDivisor, ToneTimer};

/// Mock serial bus port.
///
/// Responses come either from an explicit queue
/// ([`push_response`](Self::push_response)) or, when the queue is
/// empty, from an optional responder function applied to the request
/// word. The receive register retains its last value, so a stalled
/// transfer reads back stale data exactly like the hardware.
pub struct MockBusPort {
    requests: Vec<u32, 64>,
    responses: Deque<u32, 64>,
    responder: Option<fn(u32) -> u32>,
    ready_delay: Duration,
    stalled: bool,
    rdr: u32,
}

impl MockBusPort {
    /// Create a mock port that answers every request with 0.
    pub fn new() -> Self {
        Self {
            requests: Vec::new(),
            responses: Deque::new(),
            responder: None,
            ready_delay: Duration::from_ticks(0),
            stalled: false,
            rdr: 0,
        }
    }

    /// Create a mock port answering each request through `f`.
    pub fn with_responder(f: fn(u32) -> u32) -> Self {
        let mut port = Self::new();
        port.responder = Some(f);
        port
    }

    /// Queue an explicit response word (takes priority over the responder).
    pub fn push_response(&mut self, response: u32) {
        self.responses.push_back(response).unwrap();
    }

    /// Delay completion of each transfer by `delay`.
    pub fn set_ready_delay(&mut self, delay: Duration) {
        self.ready_delay = delay;
    }

    /// Make transfers never complete (for timeout tests).
    pub fn stall(&mut self) {
        self.stalled = true;
    }

    /// Every request word written so far, in order.
    pub fn requests(&self) -> &[u32] {
        &self.requests
    }
}

impl Default for MockBusPort {
    fn default() -> Self {
        Self::new()
    }
}

impl BusPort for MockBusPort {
    fn start_transfer(&mut self, request: u32) {
        let _ = self.requests.push(request);
        if self.stalled {
            // Response register keeps its old contents.
            return;
        }
        self.rdr = match self.responses.pop_front() {
            Some(r) => r,
            None => self.responder.map_or(0, |f| f(request)),
        };
    }

    async fn wait_ready(&mut self) {
        if self.stalled {
            core::future::pending::<()>().await;
        }
        if self.ready_delay.as_ticks() > 0 {
            Timer::after(self.ready_delay).await;
        }
    }

    fn read_response(&mut self) -> u32 {
        self.rdr
    }
}

/// Mock audio sample hardware: ADC inputs, DAC output, PWM carrier,
/// and the tone phase line, all in one struct.
pub struct MockSampleHw {
    adc: [u16; 2],
    phase_high: bool,
    enabled: bool,
    dac_writes: Vec<u16, 64>,
    duty_writes: Vec<u16, 64>,
}

impl MockSampleHw {
    /// Create mock hardware with zeroed inputs and the carrier disabled.
    pub fn new() -> Self {
        Self {
            adc: [0; 2],
            phase_high: false,
            enabled: false,
            dac_writes: Vec::new(),
            duty_writes: Vec::new(),
        }
    }

    /// Set the values the two ADC channels will read.
    pub fn set_adc(&mut self, ch0: u16, ch1: u16) {
        self.adc = [ch0, ch1];
    }

    /// Set the tone phase line level.
    pub fn set_phase(&mut self, high: bool) {
        self.phase_high = high;
    }

    /// The last DAC code written, if any.
    pub fn last_dac(&self) -> Option<u16> {
        self.dac_writes.last().copied()
    }

    /// The last carrier duty written, if any.
    pub fn last_duty(&self) -> Option<u16> {
        self.duty_writes.last().copied()
    }

    /// Number of DAC writes so far.
    pub fn dac_write_count(&self) -> usize {
        self.dac_writes.len()
    }
}

impl Default for MockSampleHw {
    fn default() -> Self {
        Self::new()
    }
}

impl AdcInputs for MockSampleHw {
    fn read(&mut self, channel: AdcChannel) -> u16 {
        match channel {
            AdcChannel::Ch0 => self.adc[0],
            AdcChannel::Ch1 => self.adc[1],
        }
    }
}

impl DacOutput for MockSampleHw {
    fn write(&mut self, code: DacCode) {
        let _ = self.dac_writes.push(code.get());
    }
}

impl CarrierPwm for MockSampleHw {
    fn set_duty(&mut self, duty: CarrierDuty) {
        let _ = self.duty_writes.push(duty.get());
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl TonePhase for MockSampleHw {
    fn phase_high(&self) -> bool {
        self.phase_high
    }
}

/// Mock tone timer recording configuration calls.
pub struct MockToneTimer {
    running: bool,
    configured: Option<(ClockDivisor, u16)>,
    configure_calls: usize,
    start_calls: usize,
}

impl MockToneTimer {
    /// Create a stopped, unconfigured mock timer.
    pub fn new() -> Self {
        Self {
            running: false,
            configured: None,
            configure_calls: 0,
            start_calls: 0,
        }
    }

    /// Whether the timer is currently running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The last (divisor, compare) pair programmed, if any.
    pub fn configured(&self) -> Option<(ClockDivisor, u16)> {
        self.configured
    }

    /// How many times `configure` has been called.
    pub fn configure_calls(&self) -> usize {
        self.configure_calls
    }

    /// How many times `start` has been called.
    pub fn start_calls(&self) -> usize {
        self.start_calls
    }
}

impl Default for MockToneTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl ToneTimer for MockToneTimer {
    fn stop(&mut self) {
        self.running = false;
    }

    fn configure(&mut self, divisor: ClockDivisor, compare: u16) {
        self.configured = Some((divisor, compare));
        self.configure_calls += 1;
    }

    fn start(&mut self) {
        self.running = true;
        self.start_calls += 1;
    }
}
