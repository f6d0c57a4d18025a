//! Register-backed transport used by the unit tests.

use std::vec::Vec;

use super::Adxl34xInterface;

/// Bus error raised by [`FakeBus`] on injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

/// One recorded bus transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Read(u8),
    Write(u8, u8),
}

/// Simulated register file recording every transaction.
///
/// Burst reads use the trait's byte-wise fallback, so they show up as one
/// `Op::Read` per byte.
pub struct FakeBus {
    pub registers: [u8; 0x40],
    pub ops: Vec<Op>,
    /// Index (0-based) of the write that fails.
    pub fail_write_at: Option<usize>,
    pub fail_reads: bool,
    writes_seen: usize,
}

impl FakeBus {
    pub fn new(device_id: u8) -> Self {
        let mut registers = [0u8; 0x40];
        registers[0] = device_id;
        Self {
            registers,
            ops: Vec::new(),
            fail_write_at: None,
            fail_reads: false,
            writes_seen: 0,
        }
    }

    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                Op::Write(register, value) => Some((register, value)),
                Op::Read(_) => None,
            })
            .collect()
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }
}

impl Adxl34xInterface for FakeBus {
    type Error = BusFault;

    fn read_register(&mut self, register: u8) -> Result<u8, BusFault> {
        self.ops.push(Op::Read(register));
        if self.fail_reads {
            return Err(BusFault);
        }
        Ok(self.registers[usize::from(register & 0x3F)])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), BusFault> {
        self.ops.push(Op::Write(register, value));
        let index = self.writes_seen;
        self.writes_seen += 1;
        if self.fail_write_at == Some(index) {
            return Err(BusFault);
        }
        self.registers[usize::from(register & 0x3F)] = value;
        Ok(())
    }
}
