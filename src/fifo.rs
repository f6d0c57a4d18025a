//! FIFO and axis sample decoding utilities.

use crate::config::Config;
use crate::error::Result;
use crate::interface::Adxl34xInterface;
use crate::registers::{FifoStatus, REG_DATAX0, REG_FIFO_STATUS};

/// Number of consecutive bytes spanning X, Y, Z axis samples.
pub const SAMPLE_BYTES: usize = 6;

/// A raw three-axis sample as stored in `DATAX0..DATAZ1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// X-axis reading.
    pub x: i16,
    /// Y-axis reading.
    pub y: i16,
    /// Z-axis reading.
    pub z: i16,
}

impl Sample {
    /// Decodes the little-endian axis registers.
    pub const fn from_le_bytes(raw: [u8; SAMPLE_BYTES]) -> Self {
        Self {
            x: i16::from_le_bytes([raw[0], raw[1]]),
            y: i16::from_le_bytes([raw[2], raw[3]]),
            z: i16::from_le_bytes([raw[4], raw[5]]),
        }
    }

    /// Returns the readings as `[x, y, z]`.
    pub const fn to_array(self) -> [i16; 3] {
        [self.x, self.y, self.z]
    }

    /// Converts the readings to milli-g using the data format in `config`.
    pub fn to_mg(self, config: &Config) -> [i32; 3] {
        let bits = config.range.resolution_bits(config.full_resolution);
        let micro_g = config.range.micro_g_per_lsb(config.full_resolution);
        self.to_array().map(|raw| {
            // Left-justified samples carry the value in the top bits.
            let value = if config.justify_left {
                i32::from(raw) >> (16 - u32::from(bits))
            } else {
                i32::from(raw)
            };
            value * micro_g / 1_000
        })
    }
}

/// Reads and decodes `FIFO_STATUS`.
pub fn read_fifo_status<IFACE>(interface: &mut IFACE) -> Result<FifoStatus, IFACE::Error>
where
    IFACE: Adxl34xInterface,
{
    let raw = interface.read_register(REG_FIFO_STATUS)?;
    Ok(FifoStatus::from(raw))
}

/// Reads one sample from the output registers with a single block read.
pub fn read_sample<IFACE>(interface: &mut IFACE) -> Result<Sample, IFACE::Error>
where
    IFACE: Adxl34xInterface,
{
    let mut raw = [0u8; SAMPLE_BYTES];
    interface.read_many(REG_DATAX0, &mut raw)?;
    Ok(Sample::from_le_bytes(raw))
}

/// Drains buffered samples into `samples`, returning how many were read.
///
/// Reads at most `FIFO_STATUS.ENTRIES` samples; each block read of the
/// output registers pops one entry from the FIFO.
pub fn read_fifo_samples<IFACE>(
    interface: &mut IFACE,
    samples: &mut [Sample],
) -> Result<usize, IFACE::Error>
where
    IFACE: Adxl34xInterface,
{
    let available = usize::from(read_fifo_status(interface)?.entries());
    let count = available.min(samples.len());

    for sample in samples.iter_mut().take(count) {
        *sample = read_sample(interface)?;
    }

    Ok(count)
}
