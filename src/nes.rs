/// Nintendo Entertainment System (NES) abstraction.
///
/// This module defines the higher level abstraction to run the emulation
/// core. Create a `Nes` instance, build a `Cartridge` from an iNES file,
/// insert it into the machine and `run` to start playing!
///
///
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log::info;

use crate::cartridge::Cartridge;
use crate::errors::NesError;
use crate::interfaces::{AccessSource, Bus};
use crate::processor::bus::MainBus;
use crate::processor::cpu::Cpu;
use crate::types::{SharedBus, SharedCartridge};

/// Approximate wall-clock duration of one CPU cycle (~1.66 MHz)
const NANOSECONDS_PER_CYCLE: u64 = 602;

pub struct Nes {
    cpu: Cpu,
    bus: Rc<RefCell<MainBus>>,
    cartridge: Option<SharedCartridge>,
}

impl Nes {
    pub fn new() -> Self {
        let bus = Rc::new(RefCell::new(MainBus::new()));
        let cpu = Cpu::new(Rc::clone(&bus) as SharedBus);

        Self {
            cpu,
            bus,
            cartridge: None,
        }
    }

    /// Insert a cartridge: build its mapper, wire it to the bus and reset
    /// the CPU through the now-readable reset vector.
    ///
    /// Fails when no mapper implementation exists for the cartridge's
    /// declared mapper identifier.
    pub fn insert_cartridge(&mut self, mut cartridge: Cartridge) -> Result<(), NesError> {
        if !cartridge.init_mapper() {
            return Err(NesError::UnsupportedMapper {
                mapper: cartridge.mapper_id(),
            });
        }
        info!("Cartridge inserted, using mapper {}", cartridge.mapper_id());

        let cartridge = Rc::new(RefCell::new(cartridge));
        self.bus.borrow_mut().attach_cartridge(Rc::clone(&cartridge));
        self.cartridge = Some(cartridge);
        self.cpu.reset();
        Ok(())
    }

    /// Run one instruction and tick the mapper. Returns the elapsed CPU
    /// cycles.
    pub fn step(&mut self) -> Result<u8, NesError> {
        let cartridge = self
            .cartridge
            .as_ref()
            .ok_or(NesError::NoCartridgeInserted)?;

        let cycles = self.cpu.step();
        cartridge.borrow_mut().step_mapper();
        Ok(cycles)
    }

    /// Blocking run, pacing each instruction proportionally to its cycle
    /// cost
    pub fn run(&mut self) -> Result<(), NesError> {
        info!("NES running game indefinitely");

        loop {
            let cycles = self.step()?;
            std::thread::sleep(Duration::from_nanos(cycles as u64 * NANOSECONDS_PER_CYCLE));
        }
    }

    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// Read a byte the way the CPU would see it
    pub fn read(&mut self, address: u16) -> u8 {
        self.bus.borrow_mut().read(AccessSource::Cpu, address)
    }

    /// Write a byte the way the CPU would
    pub fn write(&mut self, address: u16, data: u8) {
        self.bus.borrow_mut().write(AccessSource::Cpu, address, data)
    }
}

impl Default for Nes {
    fn default() -> Self {
        Self::new()
    }
}
