/// NES emulation core: CPU, memory bus, cartridge and mappers

mod cartridge;
mod graphics;
mod hardware;
mod mappers;
mod nes;
mod processor;
mod types;
mod utils;

pub mod errors;
pub mod ines;
pub mod interfaces;

pub use cartridge::{Cartridge, Mirroring};
pub use nes::Nes;
pub use processor::cpu::Cpu;
