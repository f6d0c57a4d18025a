//! I2C interface implementation built on top of `embedded-hal` `I2c`.

use embedded_hal::i2c::I2c;

use super::Adxl34xInterface;

/// Device address with the ALT ADDRESS pin tied low.
pub const I2C_ADDRESS_ALT_LOW: u8 = 0x53;
/// Device address with the ALT ADDRESS pin tied high.
pub const I2C_ADDRESS_ALT_HIGH: u8 = 0x1D;

/// I2C-based interface implementation for the ADXL34x driver.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new interface talking to `address`.
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Creates a new interface at [`I2C_ADDRESS_ALT_LOW`], the common breakout wiring.
    pub const fn alt_low(i2c: I2C) -> Self {
        Self::new(i2c, I2C_ADDRESS_ALT_LOW)
    }

    /// Creates a new interface at [`I2C_ADDRESS_ALT_HIGH`].
    pub const fn alt_high(i2c: I2C) -> Self {
        Self::new(i2c, I2C_ADDRESS_ALT_HIGH)
    }

    /// Returns the 7-bit device address.
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consumes the interface and returns the owned I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Adxl34xInterface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.i2c.write_read(self.address, &[register], &mut value)?;
        Ok(value[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        self.i2c.write(self.address, &[register, value])
    }

    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        if buf.is_empty() {
            return Ok(());
        }

        // The device auto-increments the register pointer across a repeated-start read.
        self.i2c.write_read(self.address, &[register], buf)
    }
}

#[cfg(test)]
mod tests {
    use std::vec;

    use super::{I2cInterface, I2C_ADDRESS_ALT_HIGH, I2C_ADDRESS_ALT_LOW};
    use crate::interface::Adxl34xInterface;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    #[test]
    fn read_register_uses_write_read() {
        let expectations = [I2cTransaction::write_read(
            I2C_ADDRESS_ALT_LOW,
            vec![0x00],
            vec![0xE6],
        )];
        let mut i2c = I2cMock::new(&expectations);
        let mut interface = I2cInterface::alt_low(i2c.clone());

        assert_eq!(interface.read_register(0x00).unwrap(), 0xE6);

        i2c.done();
    }

    #[test]
    fn write_register_sends_address_and_value() {
        let expectations = [I2cTransaction::write(
            I2C_ADDRESS_ALT_HIGH,
            vec![0x2D, 0x38],
        )];
        let mut i2c = I2cMock::new(&expectations);
        let mut interface = I2cInterface::alt_high(i2c.clone());

        interface.write_register(0x2D, 0x38).unwrap();

        i2c.done();
    }

    #[test]
    fn read_many_is_one_burst_transaction() {
        let expectations = [I2cTransaction::write_read(
            I2C_ADDRESS_ALT_LOW,
            vec![0x32],
            vec![0x10, 0x00, 0xF0, 0xFF, 0x00, 0x01],
        )];
        let mut i2c = I2cMock::new(&expectations);
        let mut interface = I2cInterface::alt_low(i2c.clone());

        let mut buffer = [0u8; 6];
        interface.read_many(0x32, &mut buffer).unwrap();
        assert_eq!(buffer, [0x10, 0x00, 0xF0, 0xFF, 0x00, 0x01]);

        i2c.done();
    }

    #[test]
    fn bus_errors_are_not_reported_as_zero() {
        let expectations = [I2cTransaction::write_read(
            I2C_ADDRESS_ALT_LOW,
            vec![0x00],
            vec![0x00],
        )
        .with_error(ErrorKind::Other)];
        let mut i2c = I2cMock::new(&expectations);
        let mut interface = I2cInterface::alt_low(i2c.clone());

        assert_eq!(interface.read_register(0x00), Err(ErrorKind::Other));

        i2c.done();
    }
}
