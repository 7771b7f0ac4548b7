//! Interfaces shared across the crate

use crate::hardware::{IRQ_VECTOR, RESET_VECTOR};
use crate::utils;

/// Subsystem issuing a bus access.
///
/// The CPU and the PPU drive two different address-space layouts over the
/// same 16-bit numeric range, so every access carries its origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessSource {
    Cpu,
    Ppu,
}

/// Memory bus as seen by the CPU and the PPU register shim.
///
/// The bus is the single authority for address decoding. Unmapped accesses
/// never fail: reads return `0x00` and writes are dropped, both reported.
pub trait Bus {
    /// Read a byte from whatever backs `address` in the `source` address
    /// space
    fn read(&mut self, source: AccessSource, address: u16) -> u8;

    /// Write a byte to whatever backs `address` in the `source` address
    /// space
    fn write(&mut self, source: AccessSource, address: u16, data: u8);

    /// Entry point stored at the top of the CPU address space, read at
    /// power-on to seed the program counter
    fn reset_vector(&mut self) -> u16 {
        let low = self.read(AccessSource::Cpu, RESET_VECTOR);
        let high = self.read(AccessSource::Cpu, RESET_VECTOR + 1);
        utils::combine_le(low, high)
    }

    /// Handler address used by BRK and hardware IRQs
    fn irq_vector(&mut self) -> u16 {
        let low = self.read(AccessSource::Cpu, IRQ_VECTOR);
        let high = self.read(AccessSource::Cpu, IRQ_VECTOR + 1);
        utils::combine_le(low, high)
    }
}
