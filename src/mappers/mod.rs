//! Mappers
//!
//! NES mappers are circuits found in cartridges that decide how the
//! cartridge memories appear in the CPU and PPU address spaces, including
//! bank switching on the larger boards.
//!
//! A mapper never owns memory. It translates addresses into offsets within
//! the cartridge storage (and the bus's video RAM for nametables) that are
//! borrowed per call.

mod mapper_000;

use log::warn;

use crate::cartridge::{CartridgeStorage, Mirroring};
use crate::hardware::{NAMETABLE_SIZE, NAMETABLES_START, VRAM_SIZE};
use mapper_000::Nrom;

pub trait Mapper {
    fn id(&self) -> u8;

    fn name(&self) -> &'static str;

    /// CPU-side access to the cartridge window ($4020-$FFFF)
    fn read_cpu(&mut self, storage: &CartridgeStorage, address: u16) -> u8;

    fn write_cpu(&mut self, storage: &mut CartridgeStorage, address: u16, value: u8);

    /// PPU-side access to pattern tables ($0000-$1FFF) and the canonical
    /// nametable range ($2000-$2FFF); the bus folds mirrors down before
    /// calling in
    fn read_ppu(&mut self, storage: &CartridgeStorage, vram: &[u8; VRAM_SIZE], address: u16)
        -> u8;

    fn write_ppu(
        &mut self,
        storage: &mut CartridgeStorage,
        vram: &mut [u8; VRAM_SIZE],
        address: u16,
        value: u8,
    );

    /// Per-instruction tick for mappers with counters. Most boards have
    /// none.
    fn step(&mut self) {}
}

/// Mapper factory keyed by the iNES mapper identifier. Unknown identifiers
/// yield no mapper; the driver treats that as an unsupported cartridge.
pub fn create(id: u8) -> Option<Box<dyn Mapper>> {
    match id {
        0 => Some(Box::new(Nrom::new())),
        _ => None,
    }
}

/// Fold the four logical 1 kB nametable quadrants into the two physical
/// banks of internal video RAM, per the cartridge's mirroring mode.
///
/// FourScreen would need extra cartridge VRAM that no implemented mapper
/// provides, so it degrades to a reported unmapped access.
fn nametable_offset(mirroring: Mirroring, address: u16) -> Option<usize> {
    let offset = (address - NAMETABLES_START) as usize % NAMETABLE_SIZE;
    let quadrant = (address - NAMETABLES_START) as usize / NAMETABLE_SIZE;

    let bank = match (mirroring, quadrant) {
        (Mirroring::Horizontal, 0 | 1) => 0,
        (Mirroring::Horizontal, _) => 1,
        (Mirroring::Vertical, 0 | 2) => 0,
        (Mirroring::Vertical, _) => 1,
        (Mirroring::FourScreen, _) => {
            warn!(
                "This mapper does not support four-screen mode, \
                 yet the cartridge requires it!"
            );
            return None;
        }
    };

    Some(bank * NAMETABLE_SIZE + offset)
}

pub(crate) fn nametable_read(mirroring: Mirroring, vram: &[u8; VRAM_SIZE], address: u16) -> u8 {
    match nametable_offset(mirroring, address) {
        Some(offset) => vram[offset],
        None => 0x00,
    }
}

pub(crate) fn nametable_write(
    mirroring: Mirroring,
    vram: &mut [u8; VRAM_SIZE],
    address: u16,
    value: u8,
) {
    if let Some(offset) = nametable_offset(mirroring, address) {
        vram[offset] = value;
    }
}
