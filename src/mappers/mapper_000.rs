//! Mapper 0 (NROM)
//!
//! The simplest board: no bank switching at all. PRG ROM sits fixed in the
//! CPU's cartridge ROM window, work RAM in the cartridge RAM window and CHR
//! in the PPU's pattern table range.

use log::warn;

use crate::cartridge::CartridgeStorage;
use crate::hardware::{
    CARTRIDGE_RAM_END, CARTRIDGE_RAM_START, CARTRIDGE_ROM_START, NAMETABLES_END, NAMETABLES_START,
    PATTERN_TABLES_END, PATTERN_TABLES_START, VRAM_SIZE,
};
use crate::mappers::{nametable_read, nametable_write, Mapper};

pub struct Nrom;

impl Nrom {
    pub fn new() -> Self {
        Self
    }
}

impl Mapper for Nrom {
    fn id(&self) -> u8 {
        0
    }

    fn name(&self) -> &'static str {
        "NROM"
    }

    fn read_cpu(&mut self, storage: &CartridgeStorage, address: u16) -> u8 {
        match address {
            CARTRIDGE_RAM_START..=CARTRIDGE_RAM_END => {
                let offset = (address - CARTRIDGE_RAM_START) as usize % storage.prg_ram.len();
                storage.prg_ram[offset]
            }
            // modulo over the total PRG size: a single 16 kB bank mirrors
            // into both halves of the window, a 32 kB image maps flat
            CARTRIDGE_ROM_START.. => {
                let offset = (address - CARTRIDGE_ROM_START) as usize % storage.prg_rom.len();
                storage.prg_rom[offset]
            }
            _ => {
                warn!("NROM maps nothing at CPU address ${address:0>4X}! Assuming $00.");
                0x00
            }
        }
    }

    fn write_cpu(&mut self, storage: &mut CartridgeStorage, address: u16, value: u8) {
        match address {
            CARTRIDGE_RAM_START..=CARTRIDGE_RAM_END => {
                let offset = (address - CARTRIDGE_RAM_START) as usize % storage.prg_ram.len();
                storage.prg_ram[offset] = value;
            }
            CARTRIDGE_ROM_START.. => {
                warn!("Dropping write to NROM PRG ROM address ${address:0>4X}");
            }
            _ => {
                warn!("NROM maps nothing at CPU address ${address:0>4X}! Dropping write.");
            }
        }
    }

    fn read_ppu(
        &mut self,
        storage: &CartridgeStorage,
        vram: &[u8; VRAM_SIZE],
        address: u16,
    ) -> u8 {
        match address {
            PATTERN_TABLES_START..=PATTERN_TABLES_END => storage.chr[address as usize],
            NAMETABLES_START..=NAMETABLES_END => {
                nametable_read(storage.mirroring, vram, address)
            }
            _ => {
                warn!("NROM maps nothing at PPU address ${address:0>4X}! Assuming $00.");
                0x00
            }
        }
    }

    fn write_ppu(
        &mut self,
        storage: &mut CartridgeStorage,
        vram: &mut [u8; VRAM_SIZE],
        address: u16,
        value: u8,
    ) {
        match address {
            PATTERN_TABLES_START..=PATTERN_TABLES_END => {
                if storage.chr_ram {
                    storage.chr[address as usize] = value;
                } else {
                    warn!("Dropping write to NROM CHR ROM address ${address:0>4X}");
                }
            }
            NAMETABLES_START..=NAMETABLES_END => {
                nametable_write(storage.mirroring, vram, address, value);
            }
            _ => {
                warn!("NROM maps nothing at PPU address ${address:0>4X}! Dropping write.");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::Mirroring;

    fn storage(prg_banks: usize, chr_ram: bool) -> CartridgeStorage {
        CartridgeStorage {
            prg_rom: vec![0; prg_banks * 16 * 1024],
            chr: vec![0; 8 * 1024],
            chr_ram,
            prg_ram: vec![0; 8 * 1024],
            mirroring: Mirroring::Horizontal,
        }
    }

    #[test]
    fn test_single_prg_bank_mirrors_into_both_halves() {
        let mut storage = storage(1, false);
        storage.prg_rom[0x0000] = 0x11;
        storage.prg_rom[0x3FFF] = 0x22;
        let mut nrom = Nrom::new();

        assert_eq!(nrom.read_cpu(&storage, 0x8000), 0x11);
        assert_eq!(nrom.read_cpu(&storage, 0xC000), 0x11);
        assert_eq!(nrom.read_cpu(&storage, 0xBFFF), 0x22);
        assert_eq!(nrom.read_cpu(&storage, 0xFFFF), 0x22);
    }

    #[test]
    fn test_two_prg_banks_map_flat() {
        let mut storage = storage(2, false);
        storage.prg_rom[0x0000] = 0x11;
        storage.prg_rom[0x4000] = 0x22;
        let mut nrom = Nrom::new();

        assert_eq!(nrom.read_cpu(&storage, 0x8000), 0x11);
        assert_eq!(nrom.read_cpu(&storage, 0xC000), 0x22);
    }

    #[test]
    fn test_prg_ram_window_is_writable() {
        let mut storage = storage(1, false);
        let mut nrom = Nrom::new();

        nrom.write_cpu(&mut storage, 0x6000, 0x42);
        assert_eq!(nrom.read_cpu(&storage, 0x6000), 0x42);
        assert_eq!(storage.prg_ram[0], 0x42);
    }

    #[test]
    fn test_prg_rom_writes_are_dropped() {
        let mut storage = storage(1, false);
        let mut nrom = Nrom::new();

        nrom.write_cpu(&mut storage, 0x8000, 0x42);
        assert_eq!(nrom.read_cpu(&storage, 0x8000), 0x00);
    }

    #[test]
    fn test_chr_writes_respect_the_ram_flag() {
        let mut vram = [0u8; VRAM_SIZE];
        let mut nrom = Nrom::new();

        let mut rom = storage(1, false);
        nrom.write_ppu(&mut rom, &mut vram, 0x0010, 0x42);
        assert_eq!(nrom.read_ppu(&rom, &vram, 0x0010), 0x00);

        let mut ram = storage(1, true);
        nrom.write_ppu(&mut ram, &mut vram, 0x0010, 0x42);
        assert_eq!(nrom.read_ppu(&ram, &vram, 0x0010), 0x42);
    }

    #[test]
    fn test_nametables_resolve_through_bus_vram() {
        let mut vram = [0u8; VRAM_SIZE];
        let mut storage = storage(1, false);
        let mut nrom = Nrom::new();

        nrom.write_ppu(&mut storage, &mut vram, 0x2005, 0x99);
        assert_eq!(nrom.read_ppu(&storage, &vram, 0x2005), 0x99);
        assert_eq!(vram[5], 0x99);
    }
}
