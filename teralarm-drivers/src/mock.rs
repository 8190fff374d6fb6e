//! Recording I²C bus for driver tests

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};

/// Bus that records every write and serves reads from a register file
///
/// A write sets the register pointer to its first byte and stores the
/// rest from there on, which is how register-mapped chips like the DS3231
/// behave. Reads continue from the pointer.
#[derive(Default)]
pub struct MockI2c {
    pub writes: Vec<(u8, Vec<u8>)>,
    pub registers: Vec<u8>,
    pub pointer: usize,
    pub fail: bool,
}

impl MockI2c {
    pub fn with_registers(len: usize) -> Self {
        Self {
            registers: vec![0; len],
            ..Self::default()
        }
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), ErrorKind> {
        if self.fail {
            return Err(ErrorKind::Other);
        }
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    self.writes.push((address, bytes.to_vec()));
                    if let Some((&reg, data)) = bytes.split_first() {
                        self.pointer = usize::from(reg);
                        for (i, &b) in data.iter().enumerate() {
                            if let Some(slot) = self.registers.get_mut(self.pointer + i) {
                                *slot = b;
                            }
                        }
                    }
                }
                Operation::Read(buf) => {
                    for (i, b) in buf.iter_mut().enumerate() {
                        *b = self.registers.get(self.pointer + i).copied().unwrap_or(0);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Delay that returns at once and counts the time requested
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
