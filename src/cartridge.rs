//! NES cartridge
//!
//! A cartridge owns the PRG/CHR data blobs parsed from an iNES file plus an
//! optional battery-backed PRG RAM, and carries the mapper circuit that
//! decides how those memories appear in the CPU and PPU address spaces.

use log::{debug, warn};

use crate::hardware::VRAM_SIZE;
use crate::ines::{CHR_ROM_BANK_SIZE, InesFile};
use crate::mappers::{self, Mapper};

/// Nametable layout scheme, fixed by the cartridge circuit board
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

/// The memories a mapper translates addresses into. Split out of
/// [`Cartridge`] so the mapper can borrow them while the cartridge holds the
/// mapper itself.
pub struct CartridgeStorage {
    pub prg_rom: Vec<u8>,

    /// Pattern data. ROM on most boards, RAM when the header declares zero
    /// CHR banks
    pub chr: Vec<u8>,
    pub chr_ram: bool,

    /// Battery/work RAM mapped into the CPU's cartridge RAM window
    pub prg_ram: Vec<u8>,

    pub mirroring: Mirroring,
}

pub struct Cartridge {
    storage: CartridgeStorage,
    mapper_id: u8,
    mapper: Option<Box<dyn Mapper>>,
}

impl Cartridge {
    /// Build a cartridge from an ingested iNES file, taking ownership of its
    /// data blobs. The mapper is not created here; it is instantiated when
    /// the cartridge is inserted into a machine.
    pub fn new(ines: InesFile) -> Self {
        let header = ines.header;

        let chr_ram = header.chr_rom_banks == 0;
        let chr = if chr_ram {
            vec![0; CHR_ROM_BANK_SIZE]
        } else {
            ines.chr_rom
        };

        let mirroring = if header.four_screen() {
            Mirroring::FourScreen
        } else if header.vertical_mirroring() {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        debug!(
            "Cartridge: mapper {}, {} mirroring, {} PRG bytes, {} CHR bytes (RAM: {})",
            header.mapper_id(),
            match mirroring {
                Mirroring::Horizontal => "horizontal",
                Mirroring::Vertical => "vertical",
                Mirroring::FourScreen => "four-screen",
            },
            ines.prg_rom.len(),
            chr.len(),
            chr_ram,
        );

        Self {
            storage: CartridgeStorage {
                prg_rom: ines.prg_rom,
                chr,
                chr_ram,
                prg_ram: vec![0; header.prg_ram_size()],
                mirroring,
            },
            mapper_id: header.mapper_id(),
            mapper: None,
        }
    }

    pub fn mapper_id(&self) -> u8 {
        self.mapper_id
    }

    pub fn mirroring(&self) -> Mirroring {
        self.storage.mirroring
    }

    pub fn is_chr_ram(&self) -> bool {
        self.storage.chr_ram
    }

    /// Instantiate the mapper circuit for this cartridge's id. Returns false
    /// when no implementation exists for it.
    pub fn init_mapper(&mut self) -> bool {
        self.mapper = mappers::create(self.mapper_id);
        self.mapper.is_some()
    }

    pub fn has_mapper(&self) -> bool {
        self.mapper.is_some()
    }

    /// CPU-side read through the mapper; `None` when no mapper is attached
    pub fn read_cpu(&mut self, address: u16) -> Option<u8> {
        let mapper = self.mapper.as_mut()?;
        Some(mapper.read_cpu(&self.storage, address))
    }

    /// CPU-side write through the mapper; `None` when no mapper is attached
    pub fn write_cpu(&mut self, address: u16, value: u8) -> Option<()> {
        let mapper = self.mapper.as_mut()?;
        mapper.write_cpu(&mut self.storage, address, value);
        Some(())
    }

    /// PPU-side read through the mapper. Nametable addresses resolve into
    /// the bus-owned video RAM passed in.
    pub fn read_ppu(&mut self, vram: &[u8; VRAM_SIZE], address: u16) -> Option<u8> {
        let mapper = self.mapper.as_mut()?;
        Some(mapper.read_ppu(&self.storage, vram, address))
    }

    /// PPU-side write through the mapper
    pub fn write_ppu(&mut self, vram: &mut [u8; VRAM_SIZE], address: u16, value: u8) -> Option<()> {
        let mapper = self.mapper.as_mut()?;
        mapper.write_ppu(&mut self.storage, vram, address, value);
        Some(())
    }

    /// Give the mapper circuit its per-instruction tick
    pub fn step_mapper(&mut self) {
        if let Some(mapper) = self.mapper.as_mut() {
            mapper.step();
        } else {
            warn!("Cartridge stepped without a mapper!");
        }
    }
}
