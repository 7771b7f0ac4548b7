//! NES graphics hardware state
//!
//! The rendering pipeline is out of scope; only the CPU-facing PPU register
//! file lives here.

pub mod ppu_registers;
