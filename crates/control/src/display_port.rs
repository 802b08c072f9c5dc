//! Register access to the display controller over the shared bus.
//!
//! The controller multiplexes four cycle types onto one 16-bit frame
//! using the top two bits: command write selects a register, data
//! write/read move a byte through the selected register, and status
//! read returns the controller status byte directly. Setting a register
//! therefore takes two frames; the guard held by the caller keeps them
//! adjacent on the bus.

use platform::bus::BusPort;

use crate::bus::{BusChannel, BusError, BusGuard};

const CMD_WRITE: u16 = 0x8000;
const DATA_WRITE: u16 = 0x0000;
const DATA_READ: u16 = 0x4000;
const STATUS_READ: u16 = 0xc000;

/// Status bits that indicate the controller cannot take new work:
/// memory busy (bit 7) plus the serial-interface busy bits.
pub const BUSY_MASK: u8 = 0xc1;

/// Read the controller status byte.
///
/// # Errors
///
/// Propagates transfer failures from the bus.
pub async fn read_status<P: BusPort>(bus: &mut BusGuard<'_, P>) -> Result<u8, BusError> {
    let response = bus.transceive(BusChannel::Display.request(STATUS_READ)).await?;
    #[allow(clippy::cast_possible_truncation)] // status is the low byte
    Ok(response as u8)
}

/// Whether the controller is currently busy per [`BUSY_MASK`].
///
/// # Errors
///
/// Propagates transfer failures from the bus.
pub async fn is_busy<P: BusPort>(bus: &mut BusGuard<'_, P>) -> Result<bool, BusError> {
    Ok(read_status(bus).await? & BUSY_MASK != 0)
}

/// Set one controller register to a byte value.
///
/// # Errors
///
/// Propagates transfer failures from the bus.
pub async fn set_register<P: BusPort>(
    bus: &mut BusGuard<'_, P>,
    register: u8,
    value: u8,
) -> Result<(), BusError> {
    bus.transceive(BusChannel::Display.request(CMD_WRITE | u16::from(register)))
        .await?;
    bus.transceive(BusChannel::Display.request(DATA_WRITE | u16::from(value)))
        .await?;
    Ok(())
}

/// Set a little-endian register pair: `register` takes the low byte,
/// `register + 1` the high byte.
///
/// # Errors
///
/// Propagates transfer failures from the bus.
pub async fn set_register_pair<P: BusPort>(
    bus: &mut BusGuard<'_, P>,
    register: u8,
    value: u16,
) -> Result<(), BusError> {
    #[allow(clippy::cast_possible_truncation)]
    let (low, high) = (value as u8, (value >> 8) as u8);
    set_register(bus, register, low).await?;
    set_register(bus, register.wrapping_add(1), high).await?;
    Ok(())
}

/// Read one controller register.
///
/// # Errors
///
/// Propagates transfer failures from the bus.
pub async fn read_register<P: BusPort>(
    bus: &mut BusGuard<'_, P>,
    register: u8,
) -> Result<u8, BusError> {
    bus.transceive(BusChannel::Display.request(CMD_WRITE | u16::from(register)))
        .await?;
    let response = bus.transceive(BusChannel::Display.request(DATA_READ)).await?;
    #[allow(clippy::cast_possible_truncation)] // data is the low byte
    Ok(response as u8)
}
