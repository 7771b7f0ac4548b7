//! NES main memory bus
//!
//! Single authority for address decoding. Every access is tagged with the
//! requesting subsystem, because the CPU and the PPU have different address
//! space layouts over the same 16-bit range.
//!
//! CPU side: internal RAM mirrored across the low 8 kB, the PPU register
//! file at $2000-$2007 plus OAMDMA at $4014, palette RAM, and the cartridge
//! window delegated to the mapper.
//!
//! PPU side: palette RAM, the nametable mirror range folded down to its
//! canonical window, everything else delegated to the mapper.
//!
//! An address nothing claims is never fatal: reads report and return $00,
//! writes report and are dropped.

use log::warn;

use crate::graphics::ppu_registers::PpuRegisters;
use crate::hardware::{
    CARTRIDGE_SPACE_START, NAMETABLE_MIRRORS_END, NAMETABLE_MIRRORS_START, OAMADDR, OAMDATA,
    OAMDMA, OAM_SIZE, PALETTE_END, PALETTE_SIZE, PALETTE_START, PPUADDR, PPUCTRL, PPUDATA,
    PPUMASK, PPUSCROLL, PPUSTATUS, PPU_ADDRESS_MASK, RAM_END, RAM_SIZE, RAM_START, VRAM_SIZE,
};
use crate::interfaces::{AccessSource, Bus};
use crate::types::SharedCartridge;

pub struct MainBus {
    ram: [u8; RAM_SIZE],
    vram: [u8; VRAM_SIZE],
    palette: [u8; PALETTE_SIZE],
    ppu_registers: PpuRegisters,
    cartridge: Option<SharedCartridge>,
}

impl MainBus {
    pub fn new() -> Self {
        Self {
            ram: [0; RAM_SIZE],
            vram: [0; VRAM_SIZE],
            palette: [0; PALETTE_SIZE],
            ppu_registers: PpuRegisters::default(),
            cartridge: None,
        }
    }

    pub fn attach_cartridge(&mut self, cartridge: SharedCartridge) {
        self.cartridge = Some(cartridge);
    }

    pub fn ppu_registers(&self) -> &PpuRegisters {
        &self.ppu_registers
    }

    pub fn ppu_registers_mut(&mut self) -> &mut PpuRegisters {
        &mut self.ppu_registers
    }

    fn read_cpu(&mut self, address: u16) -> u8 {
        match address {
            RAM_START..=RAM_END => self.ram[address as usize % RAM_SIZE],
            PPUCTRL..=PPUDATA => self.read_ppu_register(address),
            OAMDMA => self.ppu_registers.read_write_only(),
            PALETTE_START..=PALETTE_END => {
                self.palette[(address - PALETTE_START) as usize % PALETTE_SIZE]
            }
            CARTRIDGE_SPACE_START.. => self.mapper_read_cpu(address),
            _ => {
                warn!("Could not read from unmapped address ${address:0>4X}!!! Assuming $00.");
                0x00
            }
        }
    }

    fn write_cpu(&mut self, address: u16, data: u8) {
        match address {
            RAM_START..=RAM_END => self.ram[address as usize % RAM_SIZE] = data,
            PPUCTRL..=PPUDATA => self.write_ppu_register(address, data),
            OAMDMA => self.oam_dma(data),
            PALETTE_START..=PALETTE_END => {
                self.palette[(address - PALETTE_START) as usize % PALETTE_SIZE] = data
            }
            CARTRIDGE_SPACE_START.. => self.mapper_write_cpu(address, data),
            _ => {
                warn!("Could not write to unmapped address ${address:0>4X}!!!");
            }
        }
    }

    fn read_ppu(&mut self, address: u16) -> u8 {
        let address = address & PPU_ADDRESS_MASK;
        match address {
            PALETTE_START..=PALETTE_END => {
                self.palette[(address - PALETTE_START) as usize % PALETTE_SIZE]
            }
            // fold the mirror range down so mappers only see the canonical
            // nametable window
            NAMETABLE_MIRRORS_START..=NAMETABLE_MIRRORS_END => self.mapper_read_ppu(address - 0x1000),
            _ => self.mapper_read_ppu(address),
        }
    }

    fn write_ppu(&mut self, address: u16, data: u8) {
        let address = address & PPU_ADDRESS_MASK;
        match address {
            PALETTE_START..=PALETTE_END => {
                self.palette[(address - PALETTE_START) as usize % PALETTE_SIZE] = data
            }
            NAMETABLE_MIRRORS_START..=NAMETABLE_MIRRORS_END => {
                self.mapper_write_ppu(address - 0x1000, data)
            }
            _ => self.mapper_write_ppu(address, data),
        }
    }

    // PPU register file routing

    fn read_ppu_register(&mut self, address: u16) -> u8 {
        match address {
            PPUSTATUS => self.ppu_registers.read_status(),
            OAMDATA => self.ppu_registers.read_oam_data(),
            PPUDATA => {
                let vram_address = self.ppu_registers.address();
                let fresh = self.read_ppu(vram_address);
                let value = self.ppu_registers.data_buffer_swap(fresh);
                self.ppu_registers.increment_address();
                value
            }
            // PPUCTRL, PPUMASK, OAMADDR, PPUSCROLL, PPUADDR are write-only
            _ => self.ppu_registers.read_write_only(),
        }
    }

    fn write_ppu_register(&mut self, address: u16, data: u8) {
        match address {
            PPUCTRL => self.ppu_registers.write_ctrl(data),
            PPUMASK => self.ppu_registers.write_mask(data),
            PPUSTATUS => {
                warn!("Dropping write to read-only register PPUSTATUS");
                self.ppu_registers.note_write(data);
            }
            OAMADDR => self.ppu_registers.write_oam_addr(data),
            OAMDATA => self.ppu_registers.write_oam_data(data),
            PPUSCROLL => self.ppu_registers.write_scroll(data),
            PPUADDR => self.ppu_registers.write_address(data),
            PPUDATA => {
                self.ppu_registers.note_write(data);
                let vram_address = self.ppu_registers.address();
                self.write_ppu(vram_address, data);
                self.ppu_registers.increment_address();
            }
            _ => unreachable!("address ${address:0>4X} is not a PPU register"),
        }
    }

    /// 256-byte block copy from CPU page `page` into OAM
    fn oam_dma(&mut self, page: u8) {
        let base = (page as u16) << 8;
        let mut block = [0u8; OAM_SIZE];
        for (offset, byte) in block.iter_mut().enumerate() {
            *byte = self.read_cpu(base + offset as u16);
        }
        self.ppu_registers.dma_load(&block);
    }

    // Cartridge window delegation

    fn mapper_read_cpu(&mut self, address: u16) -> u8 {
        let value = match &self.cartridge {
            Some(cartridge) => cartridge.borrow_mut().read_cpu(address),
            None => None,
        };
        value.unwrap_or_else(|| {
            warn!(
                "Could not read from address ${address:0>4X}, \
                 because the cartridge has no mapper! Assuming $00."
            );
            0x00
        })
    }

    fn mapper_write_cpu(&mut self, address: u16, data: u8) {
        let written = match &self.cartridge {
            Some(cartridge) => cartridge.borrow_mut().write_cpu(address, data),
            None => None,
        };
        if written.is_none() {
            warn!(
                "Could not write to address ${address:0>4X}, \
                 because the cartridge has no mapper!"
            );
        }
    }

    fn mapper_read_ppu(&mut self, address: u16) -> u8 {
        let value = match &self.cartridge {
            Some(cartridge) => cartridge.borrow_mut().read_ppu(&self.vram, address),
            None => None,
        };
        value.unwrap_or_else(|| {
            warn!(
                "Could not read from PPU address ${address:0>4X}, \
                 because the cartridge has no mapper! Assuming $00."
            );
            0x00
        })
    }

    fn mapper_write_ppu(&mut self, address: u16, data: u8) {
        let written = match &self.cartridge {
            Some(cartridge) => cartridge.borrow_mut().write_ppu(&mut self.vram, address, data),
            None => None,
        };
        if written.is_none() {
            warn!(
                "Could not write to PPU address ${address:0>4X}, \
                 because the cartridge has no mapper!"
            );
        }
    }
}

impl Default for MainBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for MainBus {
    fn read(&mut self, source: AccessSource, address: u16) -> u8 {
        match source {
            AccessSource::Cpu => self.read_cpu(address),
            AccessSource::Ppu => self.read_ppu(address),
        }
    }

    fn write(&mut self, source: AccessSource, address: u16, data: u8) {
        match source {
            AccessSource::Cpu => self.write_cpu(address, data),
            AccessSource::Ppu => self.write_ppu(address, data),
        }
    }
}
