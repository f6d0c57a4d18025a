//! Orientation sensing available on the ADXL346.

use crate::params::{Orientation2d, Orientation3d};
use crate::registers::{OrientConfig, OrientStatus};

/// Orientation filter settings written to `ORIENT_CONF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OrientationSettings {
    /// Dead zone angle code (0..=7); higher values widen the hysteresis band.
    pub dead_zone: u8,
    /// Averaging divisor code (0..=7).
    pub divisor: u8,
    /// Route orientation changes to an interrupt.
    pub interrupt: bool,
    /// Interrupt on 3D orientation changes instead of 2D ones.
    pub interrupt_3d: bool,
}

impl OrientationSettings {
    /// Encodes the settings; codes wider than three bits are truncated.
    pub fn to_register(self) -> OrientConfig {
        OrientConfig::new()
            .with_dead_zone(self.dead_zone & 0x07)
            .with_divisor(self.divisor & 0x07)
            .with_int_3d(self.interrupt_3d)
            .with_int_orient(self.interrupt)
    }
}

impl From<OrientConfig> for OrientationSettings {
    fn from(conf: OrientConfig) -> Self {
        Self {
            dead_zone: conf.dead_zone(),
            divisor: conf.divisor(),
            interrupt: conf.int_orient(),
            interrupt_3d: conf.int_3d(),
        }
    }
}

impl Default for OrientationSettings {
    fn default() -> Self {
        Self::from(OrientConfig::from(0x25))
    }
}

/// Decoded `ORIENT` register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Orientation {
    /// 2D orientation, when the device reports it valid.
    pub planar: Option<Orientation2d>,
    /// 3D orientation, when valid and assigned.
    pub spatial: Option<Orientation3d>,
}

impl From<OrientStatus> for Orientation {
    fn from(status: OrientStatus) -> Self {
        Self {
            planar: status.valid_2d().then(|| status.orient_2d()),
            spatial: if status.valid_3d() {
                Orientation3d::from_code(status.orient_3d())
            } else {
                None
            },
        }
    }
}
