//! Logging shims forwarding to `defmt` when the `defmt` feature is enabled.
//!
//! Declared with `#[macro_use]` ahead of every other module so the macros are
//! in textual scope crate-wide.

macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)*);
    }};
}

macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::info!($($arg)*);
    }};
}

macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::warn!($($arg)*);
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn shims_accept_format_arguments() {
        let value = 0x2Du8;
        log_debug!("reg {=u8:#x}", value);
        log_info!("plain message");
        log_warn!("two {} {}", value, value);
        assert_eq!(value, 0x2D);
    }
}
