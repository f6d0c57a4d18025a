//! Error handling primitives for the ADXL34x driver.

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
///
/// Attach failures stay distinguishable by kind so a caller can decide
/// between retrying on another transport, retrying with another
/// descriptor, or giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface.
    Interface(E),
    /// The identity register returned a byte matching no supported model.
    UnknownDevice(u8),
    /// A register write failed while programming the configuration.
    ProgrammingFailed {
        /// Address of the register whose write failed.
        register: u8,
        /// Error reported by the bus for that write.
        source: E,
    },
    /// The operation is not valid for the handle's lifecycle state or
    /// detected model.
    InvalidState,
    /// The provided configuration descriptor is invalid.
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}
