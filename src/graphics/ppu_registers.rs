//! PPU registers
//!
//! Only the register file the CPU sees at $2000-$2007 (plus OAMDMA at $4014)
//! is modelled here. Rendering is out of scope; the bus routes reads and
//! writes into this state and drives VRAM traffic for the data register.

use bitflags::bitflags;

use crate::hardware::OAM_SIZE;

pub struct PpuRegisters {
    pub ctrl: PpuCtrl,
    pub mask: PpuMask,
    pub status: PpuStatus,
    pub oam_addr: u8,
    pub oam: [u8; OAM_SIZE],
    pub scroll_x: u8,
    pub scroll_y: u8,
    address: u16,
    // first/second write toggle shared by PPUSCROLL and PPUADDR
    write_latch: bool,
    // last value driven on the register bus, read back through the
    // write-only registers
    bus_latch: u8,
    data_buffer: u8,
}

impl Default for PpuRegisters {
    fn default() -> Self {
        Self {
            ctrl: PpuCtrl::empty(),
            mask: PpuMask::empty(),
            status: PpuStatus::empty(),
            oam_addr: 0,
            oam: [0; OAM_SIZE],
            scroll_x: 0,
            scroll_y: 0,
            address: 0,
            write_latch: false,
            bus_latch: 0,
            data_buffer: 0,
        }
    }
}

impl PpuRegisters {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // PPUCTRL / PPUMASK

    pub fn write_ctrl(&mut self, value: u8) {
        self.bus_latch = value;
        self.ctrl = PpuCtrl::from_bits_truncate(value);
    }

    pub fn write_mask(&mut self, value: u8) {
        self.bus_latch = value;
        self.mask = PpuMask::from_bits_truncate(value);
    }

    /// VRAM address step per data register access, selected by PPUCTRL bit 2
    #[inline]
    pub fn vram_address_increment(&self) -> u16 {
        match self.ctrl.contains(PpuCtrl::VRAM_ADDRESS_INCREMENT) {
            false => 1, // going across
            true => 32, // going down
        }
    }

    // PPUSTATUS

    /// Status bits in the high part, stale bus latch in the low five bits
    pub fn read_status(&self) -> u8 {
        self.status.bits() | (self.bus_latch & 0b0001_1111)
    }

    // OAMADDR / OAMDATA

    pub fn write_oam_addr(&mut self, value: u8) {
        self.bus_latch = value;
        self.oam_addr = value;
    }

    pub fn write_oam_data(&mut self, value: u8) {
        self.bus_latch = value;
        self.oam[self.oam_addr as usize] = value;
        self.oam_addr = self.oam_addr.wrapping_add(1);
    }

    pub fn read_oam_data(&self) -> u8 {
        self.oam[self.oam_addr as usize]
    }

    /// Block load into OAM starting at the current OAM address, wrapping
    /// around the 256-byte table
    pub fn dma_load(&mut self, data: &[u8; OAM_SIZE]) {
        for (offset, byte) in data.iter().enumerate() {
            self.oam[self.oam_addr.wrapping_add(offset as u8) as usize] = *byte;
        }
    }

    // PPUSCROLL / PPUADDR

    pub fn write_scroll(&mut self, value: u8) {
        self.bus_latch = value;
        if !self.write_latch {
            self.scroll_x = value;
        } else {
            self.scroll_y = value;
        }
        self.write_latch = !self.write_latch;
    }

    /// High byte on the first write, low byte on the second
    pub fn write_address(&mut self, value: u8) {
        self.bus_latch = value;
        if !self.write_latch {
            self.address = (value as u16) << 8;
        } else {
            self.address |= value as u16;
        }
        self.write_latch = !self.write_latch;
    }

    pub fn address(&self) -> u16 {
        self.address
    }

    pub fn increment_address(&mut self) {
        self.address = self.address.wrapping_add(self.vram_address_increment());
    }

    // PPUDATA

    /// Data register reads are buffered: each read returns the previous
    /// VRAM fetch and stores the fresh one
    pub fn data_buffer_swap(&mut self, fresh: u8) -> u8 {
        let stale = self.data_buffer;
        self.data_buffer = fresh;
        stale
    }

    /// Record a write that lands outside this register file's own state
    /// (data register traffic, writes to read-only registers)
    pub fn note_write(&mut self, value: u8) {
        self.bus_latch = value;
    }

    /// What the CPU sees when reading a write-only register
    pub fn read_write_only(&self) -> u8 {
        self.bus_latch
    }
}

bitflags! {
    pub struct PpuCtrl: u8 {
        /// Generate an NMI at the start of the vertical blanking interval
        const NMI_ENABLE = 0b1000_0000;

        /// 0: 8x8 pixels; 1: 8x16 pixels
        const SPRITE_SIZE = 0b0010_0000;

        /// Background pattern table address (0 = $0000; 1 = $1000)
        const BACKGROUND_PATTERN_TABLE = 0b0001_0000;

        /// Sprite pattern table address for 8x8 sprites (0: $0000; 1: $1000)
        const SPRITE_PATTERN_TABLE = 0b0000_1000;

        /// VRAM address increment per CPU read/write of PPUDATA (0: add 1,
        /// going across; 1: add 32, going down)
        const VRAM_ADDRESS_INCREMENT = 0b0000_0100;

        /// Base nametable address (0 = $2000; 1 = $2400; 2 = $2800; 3 = $2C00)
        const BASE_NAMETABLE_ADDRESS = 0b0000_0011;
    }
}

bitflags! {
    pub struct PpuMask: u8 {
        const SHOW_BACKGROUND_IN_LEFTMOST_8_PIXELS = 0b0000_0010;

        const SHOW_SPRITES_IN_LEFTMOST_8_PIXELS = 0b0000_0100;

        const BACKGROUND_RENDERING_ENABLE = 0b0000_1000;

        const SPRITE_RENDERING_ENABLE = 0b0001_0000;
    }
}

bitflags! {
    pub struct PpuStatus: u8 {
        /// PPU is in vertical blank (VBL)
        const VERTICAL_BLANK = 0b1000_0000;

        const SPRITE_0_HIT = 0b0100_0000;

        const SPRITE_OVERFLOW = 0b0010_0000;
    }
}
