//! SPI interface implementation built on top of `embedded-hal` `SpiDevice`.
//!
//! The ADXL34x expects SPI mode 3 (CPOL = 1, CPHA = 1) in 4-wire operation.

use embedded_hal::spi::{Operation, SpiDevice};

use super::Adxl34xInterface;

// Command byte flags (bits 7 and 6 ahead of the 6-bit address).
const READ_FLAG: u8 = 0x80;
const MULTI_BYTE_FLAG: u8 = 0x40;
const ADDRESS_MASK: u8 = 0x3F;

/// SPI-based interface implementation for the ADXL34x driver.
///
/// Supports burst reads, so axis and FIFO samples are fetched in a single
/// transaction.
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Creates a new interface from the provided SPI device abstraction.
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Builds the command byte used to address registers over SPI.
    fn command_byte(register: u8, is_read: bool, multi_byte: bool) -> u8 {
        let mut command = register & ADDRESS_MASK;
        if is_read {
            command |= READ_FLAG;
        }
        if multi_byte {
            command |= MULTI_BYTE_FLAG;
        }
        command
    }

    /// Provides mutable access to the wrapped SPI device.
    pub fn spi_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }

    /// Consumes the interface and returns the owned SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> Adxl34xInterface for SpiInterface<SPI>
where
    SPI: SpiDevice,
{
    type Error = SPI::Error;

    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.read_many(register, &mut value)?;
        Ok(value[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        let command = [Self::command_byte(register, false, false)];
        let payload = [value];
        let mut operations = [Operation::Write(&command), Operation::Write(&payload)];
        self.spi.transaction(&mut operations)
    }

    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        if buf.is_empty() {
            return Ok(());
        }

        let command = [Self::command_byte(register, true, buf.len() > 1)];
        let mut operations = [Operation::Write(&command), Operation::Read(buf)];
        self.spi.transaction(&mut operations)
    }
}
