//! Interrupt-to-task event bridge.
//!
//! Two queues leave the encoder interrupt: the primary UI queue, whose
//! loss matters and is therefore tracked with a sticky overflow flag,
//! and a small diagnostic trace queue that drops silently when the
//! console is not draining it. Both sends are non-blocking; the
//! interrupt can never wait on a consumer.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

use platform::input::{EncoderMove, UiEvent};

/// Capacity of the primary UI event queue.
pub const UI_QUEUE_DEPTH: usize = 10;

/// Capacity of the diagnostic trace queue.
pub const TRACE_QUEUE_DEPTH: usize = 5;

/// The primary UI event queue.
pub type UiChannel = Channel<CriticalSectionRawMutex, UiEvent, UI_QUEUE_DEPTH>;
/// Receive side of the primary UI event queue.
pub type UiReceiver<'a> = Receiver<'a, CriticalSectionRawMutex, UiEvent, UI_QUEUE_DEPTH>;
/// Send side of the primary UI event queue.
pub type UiSender<'a> = Sender<'a, CriticalSectionRawMutex, UiEvent, UI_QUEUE_DEPTH>;

/// The diagnostic trace queue of raw encoder movements.
pub type TraceChannel = Channel<CriticalSectionRawMutex, EncoderMove, TRACE_QUEUE_DEPTH>;
/// Receive side of the diagnostic trace queue.
pub type TraceReceiver<'a> = Receiver<'a, CriticalSectionRawMutex, EncoderMove, TRACE_QUEUE_DEPTH>;

/// Publishes events from interrupt context without ever blocking.
///
/// Cheap to copy; each producer context can hold its own.
#[derive(Clone, Copy)]
pub struct EventBridge<'a> {
    ui: UiSender<'a>,
    trace: Sender<'a, CriticalSectionRawMutex, EncoderMove, TRACE_QUEUE_DEPTH>,
    ui_overflow: &'a AtomicBool,
}

impl<'a> EventBridge<'a> {
    /// Bind the bridge to its queues and overflow flag.
    #[must_use]
    pub fn new(ui: &'a UiChannel, trace: &'a TraceChannel, ui_overflow: &'a AtomicBool) -> Self {
        Self {
            ui: ui.sender(),
            trace: trace.sender(),
            ui_overflow,
        }
    }

    /// Publish one encoder movement to both queues.
    ///
    /// A full UI queue latches the overflow flag; a full trace queue
    /// drops the movement without any record.
    pub fn publish_move(&self, movement: EncoderMove) {
        self.send_ui_event(UiEvent::Encoder(movement));
        let _ = self.trace.try_send(movement);
    }

    /// Publish one event to the UI queue, latching the overflow flag on
    /// a full queue instead of erroring.
    pub fn send_ui_event(&self, event: UiEvent) {
        if self.ui.try_send(event).is_err() {
            self.ui_overflow.store(true, Ordering::Relaxed);
        }
    }

    /// Whether the UI queue has ever overflowed. The flag stays set
    /// until [`clear_overflow`](Self::clear_overflow).
    #[must_use]
    pub fn overflowed(&self) -> bool {
        self.ui_overflow.load(Ordering::Relaxed)
    }

    /// Reset the overflow flag, typically after reporting it.
    pub fn clear_overflow(&self) {
        self.ui_overflow.store(false, Ordering::Relaxed);
    }
}
