//! Page state machine for the front panel.
//!
//! Three pages: a splash screen held for a moment at power-up, the
//! Input page (live metering, audio passing through), and the Generate
//! page with its sub-modes. Page switches are rate-limited: after each
//! switch the machine ignores further switch requests for a lockout
//! period, so a bouncing button cannot thrash the display and the
//! audio path behind it.
//!
//! The machine itself never touches audio hardware; it returns an
//! [`AudioRequest`] describing what the coordinator task should ask the
//! sample engine and tone generator to do.

use embassy_time::{Duration, Instant};

use platform::input::{GenerateKind, Page};

/// How long the splash page holds before the Input page takes over.
pub const SPLASH_HOLD: Duration = Duration::from_millis(700);

/// Lockout applied after every page switch.
pub const MODE_LOCK: Duration = Duration::from_millis(250);

/// Period of the UI refresh tick.
pub const TICK_PERIOD: Duration = Duration::from_millis(20);

/// Packed note code for the first tuning tone (A4, 440 Hz).
pub const TUNE1_NOTE: u8 = 0x49;

/// Packed note code for the second tuning tone (middle C).
pub const TUNE2_NOTE: u8 = 0x40;

/// The visible page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiPage {
    /// Power-up splash.
    Splash,
    /// Live input metering and gain.
    Input,
    /// Signal generation controls.
    Generate,
}

/// What the coordinator should ask the audio side to do after a page
/// or sub-mode change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AudioRequest {
    /// Everything off.
    Off,
    /// Live ADC-to-output path.
    Passthrough,
    /// Direct-amplitude reference tone.
    ToneValue,
    /// Tuning tone at the packed note code's frequency.
    TuningNote(u8),
}

/// The page machine.
pub struct PageState {
    page: UiPage,
    generate: GenerateKind,
    locked_until: Instant,
}

impl PageState {
    /// Start on the splash page, locked for [`SPLASH_HOLD`].
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self {
            page: UiPage::Splash,
            generate: GenerateKind::Off,
            locked_until: now + SPLASH_HOLD,
        }
    }

    /// The currently visible page.
    #[must_use]
    pub fn page(&self) -> UiPage {
        self.page
    }

    /// The selected generation sub-mode.
    #[must_use]
    pub fn generate_kind(&self) -> GenerateKind {
        self.generate
    }

    /// Advance time-based behaviour on the periodic tick: the splash
    /// page gives way to the Input page once its hold expires.
    pub fn on_tick(&mut self, now: Instant) -> Option<AudioRequest> {
        if self.page == UiPage::Splash && now >= self.locked_until {
            self.page = UiPage::Input;
            return Some(AudioRequest::Passthrough);
        }
        None
    }

    /// Handle a page-switch request.
    ///
    /// Ignored while the lockout from the previous switch is still
    /// running. A granted switch starts a fresh lockout, and entering
    /// the Generate page always resets its sub-mode to off.
    pub fn goto_page(&mut self, target: Page, now: Instant) -> Option<AudioRequest> {
        if now <= self.locked_until {
            return None;
        }
        self.locked_until = now + MODE_LOCK;
        match target {
            Page::Input => {
                self.page = UiPage::Input;
                Some(AudioRequest::Passthrough)
            }
            Page::Generate => {
                self.page = UiPage::Generate;
                self.generate = GenerateKind::Off;
                Some(AudioRequest::Off)
            }
        }
    }

    /// Handle a generation sub-mode request. Only meaningful on the
    /// Generate page; elsewhere the request is dropped.
    pub fn set_generate(&mut self, kind: GenerateKind) -> Option<AudioRequest> {
        if self.page != UiPage::Generate {
            return None;
        }
        self.generate = kind;
        Some(match kind {
            GenerateKind::Off => AudioRequest::Off,
            GenerateKind::Tone => AudioRequest::ToneValue,
            GenerateKind::Tune1 => AudioRequest::TuningNote(TUNE1_NOTE),
            GenerateKind::Tune2 => AudioRequest::TuningNote(TUNE2_NOTE),
        })
    }
}
