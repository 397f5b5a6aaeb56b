use crate::common::*;
use crate::errors::Fault;
use std::convert::TryFrom;
use std::io::{self, Write};

/// Fixed-size, zero-initialized memory bank.
pub struct Memory {
    cells: Words,
}

impl Memory {
    pub fn new(size: usize) -> Memory {
        Memory { cells: vec![0; size] }
    }

    pub fn load(&self, address: Word) -> Result<Word, Fault> {
        let index = self.index(address)?;
        Ok(self.cells[index])
    }

    pub fn store(&mut self, address: Word, value: Word) -> Result<(), Fault> {
        let index = self.index(address)?;
        debug!("store address={} value={}", to_addr!(address), value);
        self.cells[index] = value;
        Ok(())
    }

    pub fn cells(&self) -> WordsSlice {
        &self.cells
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Writes the `DATA:` block, one line per cell in address order.
    pub fn dump<W: Write>(&self, output: &mut W) -> io::Result<()> {
        writeln!(output, "DATA:")?;
        for (address, value) in self.cells.iter().enumerate() {
            writeln!(output, "{}: {}", to_addr!(address), value)?;
        }
        Ok(())
    }

    fn index(&self, address: Word) -> Result<usize, Fault> {
        match usize::try_from(address) {
            Ok(index) if index < self.cells.len() => Ok(index),
            _ => {
                Err(Fault::InvalidMemoryAddress {
                    address: address,
                    capacity: self.cells.len(),
                })
            }
        }
    }
}
