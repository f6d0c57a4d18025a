//! Strongly typed parameter enumerations for the ADXL34x driver.
//!
//! These enums map directly to datasheet field encodings and are used across
//! [`Config`](crate::config::Config) and the register bitfields. Prefer these
//! types over raw integers to keep configuration values valid and explicit.
//!
//! # Examples
//!
//! ```rust
//! use adxl34x::params::{AxisSet, OutputDataRate, Range};
//!
//! let odr = OutputDataRate::Od100Hz;
//! let range = Range::G8;
//! let axes = AxisSet::X | AxisSet::Z;
//! assert!(axes.contains(AxisSet::Z));
//! let _ = (odr, range);
//! ```

use modular_bitfield::prelude::Specifier;

use crate::registers::{ID_ADXL345, ID_ADXL346};

/// Silicon variants recognised from the `DEVID` register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Model {
    /// ADXL345, the base register set.
    Adxl345,
    /// ADXL346, a superset adding orientation detection.
    Adxl346,
}

impl Model {
    /// Matches an identity byte against the known device IDs.
    pub const fn from_device_id(id: u8) -> Option<Self> {
        match id {
            ID_ADXL345 => Some(Self::Adxl345),
            ID_ADXL346 => Some(Self::Adxl346),
            _ => None,
        }
    }

    /// Identity byte reported by this model.
    pub const fn device_id(self) -> u8 {
        match self {
            Self::Adxl345 => ID_ADXL345,
            Self::Adxl346 => ID_ADXL346,
        }
    }

    /// Returns `true` for the model carrying the orientation registers.
    pub const fn is_extended(self) -> bool {
        matches!(self, Self::Adxl346)
    }
}

/// Output data rate selections encoded in `BW_RATE[3:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 4]
pub enum OutputDataRate {
    /// 0.10 Hz.
    Od0_10Hz = 0x0,
    /// 0.20 Hz.
    Od0_20Hz = 0x1,
    /// 0.39 Hz.
    Od0_39Hz = 0x2,
    /// 0.78 Hz.
    Od0_78Hz = 0x3,
    /// 1.56 Hz.
    Od1_56Hz = 0x4,
    /// 3.13 Hz.
    Od3_13Hz = 0x5,
    /// 6.25 Hz.
    Od6_25Hz = 0x6,
    /// 12.5 Hz.
    Od12_5Hz = 0x7,
    /// 25 Hz.
    Od25Hz = 0x8,
    /// 50 Hz.
    Od50Hz = 0x9,
    /// 100 Hz (power-on default).
    Od100Hz = 0xA,
    /// 200 Hz.
    Od200Hz = 0xB,
    /// 400 Hz.
    Od400Hz = 0xC,
    /// 800 Hz.
    Od800Hz = 0xD,
    /// 1600 Hz.
    Od1600Hz = 0xE,
    /// 3200 Hz.
    Od3200Hz = 0xF,
}

impl OutputDataRate {
    /// Returns the ODR in millihertz.
    pub const fn millihertz(self) -> u32 {
        match self {
            Self::Od0_10Hz => 100,
            Self::Od0_20Hz => 200,
            Self::Od0_39Hz => 390,
            Self::Od0_78Hz => 780,
            Self::Od1_56Hz => 1_560,
            Self::Od3_13Hz => 3_130,
            Self::Od6_25Hz => 6_250,
            Self::Od12_5Hz => 12_500,
            Self::Od25Hz => 25_000,
            Self::Od50Hz => 50_000,
            Self::Od100Hz => 100_000,
            Self::Od200Hz => 200_000,
            Self::Od400Hz => 400_000,
            Self::Od800Hz => 800_000,
            Self::Od1600Hz => 1_600_000,
            Self::Od3200Hz => 3_200_000,
        }
    }
}

/// Measurement range selections encoded in `DATA_FORMAT[1:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum Range {
    /// ±2 g.
    G2 = 0b00,
    /// ±4 g.
    G4 = 0b01,
    /// ±8 g.
    G8 = 0b10,
    /// ±16 g.
    G16 = 0b11,
}

impl Range {
    /// Full-scale value in g.
    pub const fn g(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }

    /// Number of significant output bits for the given resolution mode.
    ///
    /// Fixed 10-bit mode keeps 10 bits on every range; full resolution adds
    /// one bit per range step (10, 11, 12, 13).
    pub const fn resolution_bits(self, full_resolution: bool) -> u8 {
        if full_resolution {
            10 + self as u8
        } else {
            10
        }
    }

    /// Sensitivity in micro-g per LSB for the given resolution mode.
    pub const fn micro_g_per_lsb(self, full_resolution: bool) -> i32 {
        if full_resolution {
            3_900
        } else {
            3_900 << (self as u8)
        }
    }
}

/// Sleep-mode sampling frequency encoded in `POWER_CTL[1:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum WakeUpFrequency {
    /// 8 readings per second while asleep.
    Hz8 = 0b00,
    /// 4 readings per second.
    Hz4 = 0b01,
    /// 2 readings per second.
    Hz2 = 0b10,
    /// 1 reading per second.
    Hz1 = 0b11,
}

impl WakeUpFrequency {
    /// Returns the sleep sampling frequency in hertz.
    pub const fn hz(self) -> u8 {
        match self {
            Self::Hz8 => 8,
            Self::Hz4 => 4,
            Self::Hz2 => 2,
            Self::Hz1 => 1,
        }
    }
}

/// FIFO operating modes encoded in `FIFO_CTL[7:6]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum FifoMode {
    /// FIFO bypassed.
    Bypass = 0b00,
    /// Collects up to 32 samples then stops.
    Fifo = 0b01,
    /// Keeps the newest 32 samples.
    Stream = 0b10,
    /// Holds samples around a trigger event.
    Trigger = 0b11,
}

/// Two-dimensional orientation codes reported in `ORIENT[5:4]` (ADXL346 only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum Orientation2d {
    /// Portrait, +X up.
    PortraitPositive = 0b00,
    /// Portrait, -X up.
    PortraitNegative = 0b01,
    /// Landscape, +Y up.
    LandscapePositive = 0b10,
    /// Landscape, -Y up.
    LandscapeNegative = 0b11,
}

/// Three-dimensional orientation codes reported in `ORIENT[2:0]` (ADXL346 only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation3d {
    /// +Z up.
    Top,
    /// +Y up.
    Right,
    /// +X up.
    Front,
    /// -X up.
    Back,
    /// -Y up.
    Left,
    /// -Z up.
    Bottom,
}

impl Orientation3d {
    /// Decodes the 3-bit orientation code; `0` and `7` are not assigned.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Top),
            2 => Some(Self::Right),
            3 => Some(Self::Front),
            4 => Some(Self::Back),
            5 => Some(Self::Left),
            6 => Some(Self::Bottom),
            _ => None,
        }
    }
}

/// A single sensing axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}

/// Set of enabled axes.
///
/// Bits follow the hardware order used by `TAP_AXES` and both nibbles of
/// `ACT_INACT_CTL`: X is bit 2, Y bit 1, Z bit 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisSet(u8);

impl AxisSet {
    /// No axis enabled.
    pub const NONE: Self = Self(0b000);
    /// X axis only.
    pub const X: Self = Self(0b100);
    /// Y axis only.
    pub const Y: Self = Self(0b010);
    /// Z axis only.
    pub const Z: Self = Self(0b001);
    /// All three axes.
    pub const ALL: Self = Self(0b111);

    /// Builds a set from the low three bits of `bits`.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & 0b111)
    }

    /// Builds a set from individual axis flags.
    pub const fn from_flags(x: bool, y: bool, z: bool) -> Self {
        Self(((x as u8) << 2) | ((y as u8) << 1) | (z as u8))
    }

    /// Raw 3-bit representation.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` when every axis of `other` is in this set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` when `axis` is enabled.
    pub const fn has(self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.contains(Self::X),
            Axis::Y => self.contains(Self::Y),
            Axis::Z => self.contains(Self::Z),
        }
    }

    /// Returns `true` when no axis is enabled.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<Axis> for AxisSet {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::X,
            Axis::Y => Self::Y,
            Axis::Z => Self::Z,
        }
    }
}

impl core::ops::BitOr for AxisSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl core::ops::BitOrAssign for AxisSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
