//! Musical note codes for the tuning tones.
//!
//! A note packs into one byte: octave in the high nibble, note number
//! in the low nibble (0 = C through 11 = B). `0x40` is middle C and
//! `0x49` is A4 at 440 Hz. The frequency table holds the tenth octave,
//! which is beyond hearing but makes every lower octave an exact right
//! shift.

use core::fmt::Write as _;

use heapless::String;

/// Middle C, the default tuning note.
pub const NOTE_C4: u8 = 0x40;

/// Concert pitch A4, 440 Hz.
pub const NOTE_A4: u8 = 0x49;

// Tenth-octave equal-temperament frequencies in Hz, from
//   440 * 2**6 * 2**((i - 9) / 12)
static TENTH_OCTAVE_HZ: [u32; 12] = [
    16744, 17740, 18795, 19912, 21096, 22350, 23679, 25087, 26580, 28160, 29834, 31609,
];

static NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// The frequency of a packed note code, or `None` for a note number
/// above 11 or an octave above 10.
#[must_use]
pub fn frequency_hz(note: u8) -> Option<u32> {
    let index = usize::from(note & 0x0f);
    let octave = u32::from(note >> 4);
    if index >= TENTH_OCTAVE_HZ.len() || octave > 10 {
        return None;
    }
    TENTH_OCTAVE_HZ.get(index).map(|hz| hz >> (10 - octave))
}

/// Display name of a packed note code, e.g. `"A4"`, or `None` when the
/// code is out of range.
#[must_use]
pub fn name(note: u8) -> Option<String<4>> {
    let index = usize::from(note & 0x0f);
    let octave = note >> 4;
    if octave > 10 {
        return None;
    }
    let stem = NOTE_NAMES.get(index)?;
    let mut out = String::new();
    write!(out, "{stem}{octave}").ok()?;
    Some(out)
}
