//! NES hardware constants

// CPU address space
// -----------------
//
// Main 16-bit address space. Internal RAM, PPU registers and the cartridge
// PRG memories are mapped here.

// Internal memory - 2 kB RAM mirrored across the low 8 kB (used by the CPU)
pub const RAM_START: u16 = 0x0000;
pub const RAM_END: u16 = 0x1FFF;
pub const RAM_SIZE: usize = 0x0800;

// 256-byte stack page
pub const STACK_PAGE: u16 = 0x0100;

// PPU registers
pub const PPUCTRL: u16 = 0x2000;
pub const PPUMASK: u16 = 0x2001;
pub const PPUSTATUS: u16 = 0x2002;
pub const OAMADDR: u16 = 0x2003;
pub const OAMDATA: u16 = 0x2004;
pub const PPUSCROLL: u16 = 0x2005;
pub const PPUADDR: u16 = 0x2006;
pub const PPUDATA: u16 = 0x2007;
pub const OAMDMA: u16 = 0x4014;

pub const OAM_SIZE: usize = 256;

// Cartridge space, delegated to the mapper
pub const CARTRIDGE_SPACE_START: u16 = 0x4020;
pub const CARTRIDGE_SPACE_END: u16 = 0xFFFF;

pub const CARTRIDGE_RAM_START: u16 = 0x6000;
pub const CARTRIDGE_RAM_END: u16 = 0x7FFF;

pub const CARTRIDGE_ROM_START: u16 = 0x8000;
pub const CARTRIDGE_ROM_END: u16 = 0xFFFF;

// Interrupt vectors at the top of the CPU address space
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

// PPU address space
// -----------------
//
// 14-bit address space used by the pixel processor. Cartridge CHR memory is
// mapped to its bottom, internal video memory holds the nametables.

pub const PPU_ADDRESS_MASK: u16 = 0x3FFF;

pub const PATTERN_TABLES_START: u16 = 0x0000;
pub const PATTERN_TABLES_END: u16 = 0x1FFF;

// Nametables - laid out by the PPU to describe backgrounds. Backed by 2 kB of
// internal video RAM, aliased over four logical 1 kB quadrants
pub const NAMETABLES_START: u16 = 0x2000;
pub const NAMETABLES_END: u16 = 0x2FFF;
pub const NAMETABLE_SIZE: usize = 0x0400;
pub const VRAM_SIZE: usize = 0x0800;

// Mirror of the nametables, folded down before reaching the mapper
pub const NAMETABLE_MIRRORS_START: u16 = 0x3000;
pub const NAMETABLE_MIRRORS_END: u16 = 0x3EFF;

// Palette RAM - 32 bytes, aliased across its whole window
pub const PALETTE_START: u16 = 0x3F00;
pub const PALETTE_END: u16 = 0x3FFF;
pub const PALETTE_SIZE: usize = 32;
