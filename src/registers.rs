//! Register map definitions for the ADXL345/ADXL346 accelerometers.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{FifoMode, Orientation2d, OutputDataRate, Range, WakeUpFrequency};

/// Register address of `DEVID`.
pub const REG_DEVID: u8 = 0x00;
/// Register address of `THRESH_TAP`.
pub const REG_THRESH_TAP: u8 = 0x1D;
/// Register address of `OFSX`.
pub const REG_OFSX: u8 = 0x1E;
/// Register address of `OFSY`.
pub const REG_OFSY: u8 = 0x1F;
/// Register address of `OFSZ`.
pub const REG_OFSZ: u8 = 0x20;
/// Register address of `DUR`.
pub const REG_DUR: u8 = 0x21;
/// Register address of `LATENT`.
pub const REG_LATENT: u8 = 0x22;
/// Register address of `WINDOW`.
pub const REG_WINDOW: u8 = 0x23;
/// Register address of `THRESH_ACT`.
pub const REG_THRESH_ACT: u8 = 0x24;
/// Register address of `THRESH_INACT`.
pub const REG_THRESH_INACT: u8 = 0x25;
/// Register address of `TIME_INACT`.
pub const REG_TIME_INACT: u8 = 0x26;
/// Register address of `ACT_INACT_CTL`.
pub const REG_ACT_INACT_CTL: u8 = 0x27;
/// Register address of `THRESH_FF`.
pub const REG_THRESH_FF: u8 = 0x28;
/// Register address of `TIME_FF`.
pub const REG_TIME_FF: u8 = 0x29;
/// Register address of `TAP_AXES`.
pub const REG_TAP_AXES: u8 = 0x2A;
/// Register address of `ACT_TAP_STATUS`.
pub const REG_ACT_TAP_STATUS: u8 = 0x2B;
/// Register address of `BW_RATE`.
pub const REG_BW_RATE: u8 = 0x2C;
/// Register address of `POWER_CTL`.
pub const REG_POWER_CTL: u8 = 0x2D;
/// Register address of `INT_ENABLE`.
pub const REG_INT_ENABLE: u8 = 0x2E;
/// Register address of `INT_MAP`.
pub const REG_INT_MAP: u8 = 0x2F;
/// Register address of `INT_SOURCE`.
pub const REG_INT_SOURCE: u8 = 0x30;
/// Register address of `DATA_FORMAT`.
pub const REG_DATA_FORMAT: u8 = 0x31;
/// Register address of `DATAX0`.
pub const REG_DATAX0: u8 = 0x32;
/// Register address of `DATAX1`.
pub const REG_DATAX1: u8 = 0x33;
/// Register address of `DATAY0`.
pub const REG_DATAY0: u8 = 0x34;
/// Register address of `DATAY1`.
pub const REG_DATAY1: u8 = 0x35;
/// Register address of `DATAZ0`.
pub const REG_DATAZ0: u8 = 0x36;
/// Register address of `DATAZ1`.
pub const REG_DATAZ1: u8 = 0x37;
/// Register address of `FIFO_CTL`.
pub const REG_FIFO_CTL: u8 = 0x38;
/// Register address of `FIFO_STATUS`.
pub const REG_FIFO_STATUS: u8 = 0x39;
/// Register address of `TAP_SIGN`.
pub const REG_TAP_SIGN: u8 = 0x3A;
/// Register address of `ORIENT_CONF` (ADXL346 only).
pub const REG_ORIENT_CONF: u8 = 0x3B;
/// Register address of `ORIENT` (ADXL346 only).
pub const REG_ORIENT: u8 = 0x3C;

/// `DEVID` value reported by the ADXL345.
pub const ID_ADXL345: u8 = 0xE5;
/// `DEVID` value reported by the ADXL346.
pub const ID_ADXL346: u8 = 0xE6;

/// Access permissions encoded for each register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAccess {
    /// Read-only register.
    ReadOnly,
    /// Read/write register.
    ReadWrite,
}

/// Static description of one addressable register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterInfo {
    /// Datasheet mnemonic.
    pub name: &'static str,
    /// Register address.
    pub address: u8,
    /// Access permission classification.
    pub access: RegisterAccess,
    /// Present only on the ADXL346.
    pub extended_only: bool,
}

const fn reg(name: &'static str, address: u8, access: RegisterAccess) -> RegisterInfo {
    RegisterInfo {
        name,
        address,
        access,
        extended_only: false,
    }
}

const fn ext(name: &'static str, address: u8, access: RegisterAccess) -> RegisterInfo {
    RegisterInfo {
        name,
        address,
        access,
        extended_only: true,
    }
}

/// Every register known to the driver, in address order.
pub const REGISTER_MAP: [RegisterInfo; 33] = {
    use RegisterAccess::{ReadOnly as R, ReadWrite as RW};
    [
        reg("DEVID", REG_DEVID, R),
        reg("THRESH_TAP", REG_THRESH_TAP, RW),
        reg("OFSX", REG_OFSX, RW),
        reg("OFSY", REG_OFSY, RW),
        reg("OFSZ", REG_OFSZ, RW),
        reg("DUR", REG_DUR, RW),
        reg("LATENT", REG_LATENT, RW),
        reg("WINDOW", REG_WINDOW, RW),
        reg("THRESH_ACT", REG_THRESH_ACT, RW),
        reg("THRESH_INACT", REG_THRESH_INACT, RW),
        reg("TIME_INACT", REG_TIME_INACT, RW),
        reg("ACT_INACT_CTL", REG_ACT_INACT_CTL, RW),
        reg("THRESH_FF", REG_THRESH_FF, RW),
        reg("TIME_FF", REG_TIME_FF, RW),
        reg("TAP_AXES", REG_TAP_AXES, RW),
        reg("ACT_TAP_STATUS", REG_ACT_TAP_STATUS, R),
        reg("BW_RATE", REG_BW_RATE, RW),
        reg("POWER_CTL", REG_POWER_CTL, RW),
        reg("INT_ENABLE", REG_INT_ENABLE, RW),
        reg("INT_MAP", REG_INT_MAP, RW),
        reg("INT_SOURCE", REG_INT_SOURCE, R),
        reg("DATA_FORMAT", REG_DATA_FORMAT, RW),
        reg("DATAX0", REG_DATAX0, R),
        reg("DATAX1", REG_DATAX1, R),
        reg("DATAY0", REG_DATAY0, R),
        reg("DATAY1", REG_DATAY1, R),
        reg("DATAZ0", REG_DATAZ0, R),
        reg("DATAZ1", REG_DATAZ1, R),
        reg("FIFO_CTL", REG_FIFO_CTL, RW),
        reg("FIFO_STATUS", REG_FIFO_STATUS, R),
        reg("TAP_SIGN", REG_TAP_SIGN, R),
        ext("ORIENT_CONF", REG_ORIENT_CONF, RW),
        ext("ORIENT", REG_ORIENT, R),
    ]
};

const fn strictly_ascending(map: &[RegisterInfo]) -> bool {
    let mut i = 1;
    while i < map.len() {
        if map[i].address <= map[i - 1].address {
            return false;
        }
        i += 1;
    }
    true
}

// Duplicate or out-of-order addresses fail the build.
const _: () = assert!(strictly_ascending(&REGISTER_MAP));

static REGISTERS: [RegisterInfo; REGISTER_MAP.len()] = REGISTER_MAP;

/// Looks up the static description of `address`.
pub fn lookup(address: u8) -> Option<&'static RegisterInfo> {
    REGISTERS.iter().find(|info| info.address == address)
}

/// Returns `true` when `address` only exists on the ADXL346.
pub fn is_extended_only(address: u8) -> bool {
    lookup(address).is_some_and(|info| info.extended_only)
}

/// Minimal metadata exposed by every register value type.
pub trait Register {
    /// Raw storage backing the register payload.
    type Raw: Copy;
    /// Register address as documented in the datasheet.
    const ADDRESS: u8;
    /// Access permission classification.
    const ACCESS: RegisterAccess;
    /// Optional reset/default value defined by the datasheet.
    const RESET_VALUE: Option<Self::Raw>;
}

macro_rules! byte_register {
    ($ty:ty, $address:expr, $access:ident, $reset:expr) => {
        impl From<u8> for $ty {
            fn from(value: u8) -> Self {
                Self::from_bytes([value])
            }
        }

        impl From<$ty> for u8 {
            fn from(value: $ty) -> Self {
                value.into_bytes()[0]
            }
        }

        impl Register for $ty {
            type Raw = u8;
            const ADDRESS: u8 = $address;
            const ACCESS: RegisterAccess = RegisterAccess::$access;
            const RESET_VALUE: Option<Self::Raw> = Some($reset);
        }
    };
}

/// Bitfield representation of the `ACT_INACT_CTL` register (address `0x27`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActInactControl {
    // Inactivity Z enable (bit 0).
    pub inact_z: bool,
    // Inactivity Y enable (bit 1).
    pub inact_y: bool,
    // Inactivity X enable (bit 2).
    pub inact_x: bool,
    // Inactivity AC-coupled operation (bit 3).
    pub inact_ac: bool,
    // Activity Z enable (bit 4).
    pub act_z: bool,
    // Activity Y enable (bit 5).
    pub act_y: bool,
    // Activity X enable (bit 6).
    pub act_x: bool,
    // Activity AC-coupled operation (bit 7).
    pub act_ac: bool,
}

byte_register!(ActInactControl, REG_ACT_INACT_CTL, ReadWrite, 0x00);

/// Bitfield representation of the `TAP_AXES` register (address `0x2A`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapAxes {
    // Tap detection on Z (bit 0).
    pub tap_z: bool,
    // Tap detection on Y (bit 1).
    pub tap_y: bool,
    // Tap detection on X (bit 2).
    pub tap_x: bool,
    // Suppress double tap when acceleration exceeds threshold between taps (bit 3).
    pub suppress: bool,
    #[skip]
    __: B4,
}

byte_register!(TapAxes, REG_TAP_AXES, ReadWrite, 0x00);

/// Bitfield representation of the `BW_RATE` register (address `0x2C`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BwRate {
    // Output data rate code (bits 3:0).
    pub rate: OutputDataRate,
    // Reduced power operation (bit 4).
    pub low_power: bool,
    #[skip]
    __: B3,
}

byte_register!(BwRate, REG_BW_RATE, ReadWrite, 0x0A);

/// Bitfield representation of the `POWER_CTL` register (address `0x2D`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerControl {
    // Sleep-mode sampling frequency (bits 1:0).
    pub wakeup: WakeUpFrequency,
    // Sleep mode (bit 2).
    pub sleep: bool,
    // Measurement enable (bit 3).
    pub measure: bool,
    // Automatic sleep on inactivity (bit 4).
    pub auto_sleep: bool,
    // Serial link of activity and inactivity detection (bit 5).
    pub link: bool,
    #[skip]
    __: B2,
}

byte_register!(PowerControl, REG_POWER_CTL, ReadWrite, 0x00);

/// Bitfield representation of the `DATA_FORMAT` register (address `0x31`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataFormat {
    // g-range selection (bits 1:0).
    pub range: Range,
    // Left-justified (MSB) output (bit 2).
    pub justify: bool,
    // Full resolution, 4 mg/LSB on every range (bit 3).
    pub full_res: bool,
    #[skip]
    __: B1,
    // Interrupts active low (bit 5).
    pub int_invert: bool,
    // 3-wire SPI mode (bit 6).
    pub spi_3wire: bool,
    // Self-test force (bit 7).
    pub self_test: bool,
}

byte_register!(DataFormat, REG_DATA_FORMAT, ReadWrite, 0x00);

/// Bitfield representation of the `FIFO_CTL` register (address `0x38`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FifoControl {
    // Watermark / trigger sample count (bits 4:0).
    pub samples: B5,
    // Trigger event routed to INT2 (bit 5).
    pub trigger_int2: bool,
    // FIFO operating mode (bits 7:6).
    pub mode: FifoMode,
}

byte_register!(FifoControl, REG_FIFO_CTL, ReadWrite, 0x00);

/// Bitfield representation of the `FIFO_STATUS` register (address `0x39`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FifoStatus {
    // Samples currently stored (bits 5:0).
    pub entries: B6,
    #[skip]
    __: B1,
    // Trigger event occurred (bit 7).
    pub triggered: bool,
}

byte_register!(FifoStatus, REG_FIFO_STATUS, ReadOnly, 0x00);

/// Bitfield representation of the `ORIENT_CONF` register (address `0x3B`, ADXL346 only).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientConfig {
    // Averaging divisor for the orientation filter (bits 2:0).
    pub divisor: B3,
    // Interrupt on 3D rather than 2D orientation changes (bit 3).
    pub int_3d: bool,
    // Dead zone angle code (bits 6:4).
    pub dead_zone: B3,
    // Orientation interrupt enable (bit 7).
    pub int_orient: bool,
}

byte_register!(OrientConfig, REG_ORIENT_CONF, ReadWrite, 0x25);

/// Bitfield representation of the `ORIENT` register (address `0x3C`, ADXL346 only).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientStatus {
    // 3D orientation code (bits 2:0).
    pub orient_3d: B3,
    // 3D orientation valid (bit 3).
    pub valid_3d: bool,
    // 2D orientation (bits 5:4).
    pub orient_2d: Orientation2d,
    // 2D orientation valid (bit 6).
    pub valid_2d: bool,
    #[skip]
    __: B1,
}

byte_register!(OrientStatus, REG_ORIENT, ReadOnly, 0x00);
