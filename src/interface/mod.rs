//! Bus interface abstraction for the ADXL34x driver.

#[cfg(test)]
pub(crate) mod fake;
pub mod i2c;
pub mod spi;

/// Abstraction over the low-level bus access required by the driver.
///
/// Each call is one complete bus transaction. A failed call reports the
/// bus error and never a placeholder register value.
pub trait Adxl34xInterface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Reads a single register.
    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error>;

    /// Writes a single register.
    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error>;

    /// Reads consecutive registers starting at `register` into `buf`.
    ///
    /// The provided implementation falls back to one `read_register` per
    /// byte for transports without burst support.
    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        for (offset, byte) in buf.iter_mut().enumerate() {
            *byte = self.read_register(register.wrapping_add(offset as u8))?;
        }
        Ok(())
    }
}

impl<T> Adxl34xInterface for &mut T
where
    T: Adxl34xInterface + ?Sized,
{
    type Error = T::Error;

    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        (**self).read_register(register)
    }

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        (**self).write_register(register, value)
    }

    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        (**self).read_many(register, buf)
    }
}
