#![no_std]

#[cfg(test)]
extern crate std;

#[macro_use]
mod log;
mod error;

pub mod config;
pub mod device;
pub mod fifo;
pub mod interface;
pub mod orientation;
pub mod params;
pub mod registers;

pub use crate::config::{Config, DEFAULT_CONFIG};
pub use crate::device::{Adxl34x, State};
pub use crate::error::{Error, Result};
pub use crate::params::Model;
