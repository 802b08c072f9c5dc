//! Register protocol for the dual digital potentiometer.
//!
//! One 16-bit frame per operation on [`BusChannel::Pot`]: the register
//! address rides in bits 12..=15, a read is marked by `0b11` in bits
//! 10..=11, and data occupies the low nine bits. The chip echoes reads
//! back with bit 9 set when the address was valid; a clear bit 9 means
//! the response carries no data.
//!
//! Callers hold a [`BusGuard`] across every function here, so a
//! read-modify-write or a paired wiper update cannot be interleaved
//! with another task's traffic.

use heapless::Vec;

use platform::audio_types::GainCode;
use platform::bus::BusPort;

use crate::bus::{BusChannel, BusError, BusGuard};

/// Volatile wiper 0 register address.
pub const WIPER0: u8 = 0x0;
/// Volatile wiper 1 register address.
pub const WIPER1: u8 = 0x1;
/// Non-volatile wiper 0 register address.
pub const NV_WIPER0: u8 = 0x2;
/// Non-volatile wiper 1 register address.
pub const NV_WIPER1: u8 = 0x3;
/// Terminal-control register address.
pub const TCON: u8 = 0x4;
/// Status register address.
pub const STATUS: u8 = 0x5;

/// Number of addressable register slots (many are unimplemented).
pub const REGISTER_COUNT: u8 = 0x10;

/// Read marker, `0b11` in bits 10..=11 of the frame.
const READ_MARKER: u16 = 0b11 << 10;
/// Echoed validity bit in a read response.
const VALID_BIT: u32 = 0x200;
/// Data mask for frames and responses.
const DATA_MASK: u32 = 0x1ff;

fn write_frame(addr: u8, value: u16) -> u32 {
    BusChannel::Pot.request((u16::from(addr) << 12) | (value & 0x1ff))
}

fn read_frame(addr: u8) -> u32 {
    BusChannel::Pot.request((u16::from(addr) << 12) | READ_MARKER)
}

/// Write a 9-bit value to one register.
///
/// Returns the raw response word, which is only meaningful for
/// diagnostics.
///
/// # Errors
///
/// Propagates transfer failures from the bus.
pub async fn write_register<P: BusPort>(
    bus: &mut BusGuard<'_, P>,
    addr: u8,
    value: u16,
) -> Result<u32, BusError> {
    bus.transceive(write_frame(addr, value)).await
}

/// Read one register.
///
/// Returns `None` when the chip did not flag the response as valid
/// (unimplemented address).
///
/// # Errors
///
/// Propagates transfer failures from the bus.
pub async fn read_register<P: BusPort>(
    bus: &mut BusGuard<'_, P>,
    addr: u8,
) -> Result<Option<u16>, BusError> {
    let response = bus.transceive(read_frame(addr)).await?;
    #[allow(clippy::cast_possible_truncation)] // masked to nine bits
    Ok((response & VALID_BIT != 0).then_some((response & DATA_MASK) as u16))
}

/// Set both volatile wipers to the same gain, as one uninterrupted
/// sequence.
///
/// # Errors
///
/// Propagates transfer failures from the bus.
pub async fn set_gain<P: BusPort>(
    bus: &mut BusGuard<'_, P>,
    gain: GainCode,
) -> Result<(), BusError> {
    bus.transceive(write_frame(WIPER0, gain.get())).await?;
    bus.transceive(write_frame(WIPER1, gain.get())).await?;
    Ok(())
}

/// Read both volatile wipers.
///
/// # Errors
///
/// Propagates transfer failures from the bus.
pub async fn read_gains<P: BusPort>(
    bus: &mut BusGuard<'_, P>,
) -> Result<(GainCode, GainCode), BusError> {
    let g0 = read_register(bus, WIPER0).await?.unwrap_or(0);
    let g1 = read_register(bus, WIPER1).await?.unwrap_or(0);
    Ok((GainCode::new(g0), GainCode::new(g1)))
}

/// One line of a register dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DumpEntry {
    /// Register address.
    pub addr: u8,
    /// Decoded 9-bit value, or `None` when the chip flagged the
    /// address invalid.
    pub value: Option<u16>,
    /// Raw response word.
    pub raw: u32,
}

/// Read every addressable register slot for the console `pot` command.
///
/// # Errors
///
/// Propagates transfer failures from the bus; a partial dump is never
/// returned.
pub async fn dump<P: BusPort>(
    bus: &mut BusGuard<'_, P>,
) -> Result<Vec<DumpEntry, { REGISTER_COUNT as usize }>, BusError> {
    let mut entries = Vec::new();
    for addr in 0..REGISTER_COUNT {
        let raw = bus.transceive(read_frame(addr)).await?;
        #[allow(clippy::cast_possible_truncation)] // masked to nine bits
        let value = (raw & VALID_BIT != 0).then_some((raw & DATA_MASK) as u16);
        // Capacity equals the loop count.
        let _ = entries.push(DumpEntry { addr, value, raw });
    }
    Ok(entries)
}

/// Human name for the documented registers.
#[must_use]
pub fn register_name(addr: u8) -> Option<&'static str> {
    match addr {
        WIPER0 => Some("R0"),
        WIPER1 => Some("R1"),
        NV_WIPER0 => Some("NVR0"),
        NV_WIPER1 => Some("NVR1"),
        TCON => Some("TCON"),
        STATUS => Some("STATUS"),
        _ => None,
    }
}

/// Decoded terminal-control register: whether each resistor network
/// has all four terminal bits connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TconDecode {
    /// Resistor network 0 fully connected (low nibble all set).
    pub r0_connected: bool,
    /// Resistor network 1 fully connected (high nibble all set).
    pub r1_connected: bool,
}

/// Decode a TCON register value.
#[must_use]
pub fn decode_tcon(value: u16) -> TconDecode {
    TconDecode {
        r0_connected: value & 0x0f == 0x0f,
        r1_connected: value & 0xf0 == 0xf0,
    }
}

/// Decoded status register flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusDecode {
    /// EEPROM write active.
    pub eeprom_write_active: bool,
    /// Wiper 1 locked.
    pub wiper1_locked: bool,
    /// Wiper 0 locked.
    pub wiper0_locked: bool,
    /// Hardware shutdown asserted.
    pub shutdown: bool,
    /// Write protect asserted.
    pub write_protected: bool,
}

/// Decode a STATUS register value.
#[must_use]
pub fn decode_status(value: u16) -> StatusDecode {
    StatusDecode {
        eeprom_write_active: value & 0x10 != 0,
        wiper1_locked: value & 0x08 != 0,
        wiper0_locked: value & 0x04 != 0,
        shutdown: value & 0x02 != 0,
        write_protected: value & 0x01 != 0,
    }
}
