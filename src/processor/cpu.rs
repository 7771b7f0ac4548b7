use log::{debug, trace, warn};

use crate::hardware::STACK_PAGE;
use crate::interfaces::AccessSource;
use crate::processor::instruction::{AddressingMode, Instruction, InstructionKind};
use crate::processor::instruction_set;
use crate::processor::status_register::StatusRegister;
use crate::types::SharedBus;
use crate::utils;

/// MOS 6502 CPU (Ricoh 2A03 variant, no decimal mode)
///
/// The CPU only talks to the outside world through its bus handle. One call
/// to [`Cpu::step`] runs exactly one instruction to completion, including
/// all of its bus accesses, and returns the elapsed cycle count.
pub struct Cpu {
    pub(crate) acc: u8,
    pub(crate) x_reg: u8,
    pub(crate) y_reg: u8,
    pub(crate) sp: u8,
    pub(crate) pc: u16,
    pub(crate) sr: StatusRegister,
    pub(crate) bus: SharedBus,
}

impl Cpu {
    pub fn new(bus: SharedBus) -> Self {
        Self {
            acc: 0,
            x_reg: 0,
            y_reg: 0,
            sp: 0xFF,
            pc: 0,
            sr: StatusRegister::new(),
            bus,
        }
    }

    /// Power-on state: registers cleared, stack pointer at the top of the
    /// stack page, program counter seeded from the reset vector
    pub fn reset(&mut self) {
        self.acc = 0;
        self.x_reg = 0;
        self.y_reg = 0;
        self.sp = 0xFF;
        self.sr.reset();
        self.pc = self.bus.borrow_mut().reset_vector();
        debug!("CPU reset, execution starts at ${:0>4X}", self.pc);
    }

    pub fn accumulator(&self) -> u8 {
        self.acc
    }

    pub fn x_index(&self) -> u8 {
        self.x_reg
    }

    pub fn y_index(&self) -> u8 {
        self.y_reg
    }

    pub fn stack_pointer(&self) -> u8 {
        self.sp
    }

    pub fn program_counter(&self) -> u16 {
        self.pc
    }

    pub fn status(&self) -> u8 {
        self.sr.into()
    }

    /// Redirect execution, bypassing the reset vector
    pub fn jump(&mut self, address: u16) {
        self.pc = address;
    }

    /// Fetch, decode and execute a single instruction. Returns the number
    /// of cycles the instruction took.
    ///
    /// Operand resolution and any write-back happen before this returns;
    /// an instruction is never left half executed.
    pub fn step(&mut self) -> u8 {
        let instruction_address = self.pc;

        let opcode = self.read(self.pc);
        self.pc = self.pc.wrapping_add(1);

        let instruction = instruction_set::decode(opcode);

        let mut operands = [0u8; 2];
        let operand_count = instruction.addressing_mode.operand_count() as usize;
        for operand in operands.iter_mut().take(operand_count) {
            *operand = self.read(self.pc);
            self.pc = self.pc.wrapping_add(1);
        }

        trace!(
            "${:0>4X}  {} {:<10} A:${:0>2X} X:${:0>2X} Y:${:0>2X} SP:${:0>2X} SR:${:0>2X}",
            instruction_address,
            instruction.name,
            instruction.addressing_mode.format_operands(operands),
            self.acc,
            self.x_reg,
            self.y_reg,
            self.sp,
            u8::from(self.sr),
        );

        self.exec(instruction, operands);

        instruction.cycles
    }

    fn exec(&mut self, instruction: &Instruction, operands: [u8; 2]) {
        use crate::processor::instruction::MiscInstructionKind::*;
        use InstructionKind::*;

        let mode = instruction.addressing_mode;

        match &instruction.kind {
            SingleByte(f) => f(self),
            InternalExecOnMemoryData(f) => {
                let operand = self.operand_value(mode, operands);
                f(self, operand);
            }
            StoreOp(f) => {
                let value = f(self);
                self.operand_write(mode, operands, value);
            }
            ReadModifyWrite(f) => {
                let operand = self.operand_value(mode, operands);
                let result = f(self, operand);
                self.operand_write(mode, operands, result);
            }
            Misc(Push(f)) | Misc(Pull(f)) | Misc(Return(f)) | Misc(Break(f))
            | Misc(ReturnFromInterrupt(f)) => f(self),
            Misc(Jump(f)) | Misc(Call(f)) | Misc(Branch(f)) => {
                let address = self.operand_address(mode, operands);
                f(self, address);
            }
            Unsupported => {
                warn!(
                    "Opcode ${:0>2X} ({}) is not supported!",
                    instruction.opcode, instruction.name
                );
            }
        }
    }

    /// Resolve the effective address an instruction operates on.
    ///
    /// The indirect pointer reads do not reproduce the original silicon's
    /// page-wrap quirk: a pointer ending in 0xFF reads its high byte from
    /// the next page, not from the start of the same page.
    fn operand_address(&mut self, mode: AddressingMode, operands: [u8; 2]) -> u16 {
        use AddressingMode::*;

        match mode {
            Implicit | Accumulator | Immediate => 0,
            ZeroPage => operands[0] as u16,
            ZeroPageX => operands[0].wrapping_add(self.x_reg) as u16,
            ZeroPageY => operands[0].wrapping_add(self.y_reg) as u16,
            Relative => self.pc.wrapping_add_signed(operands[0] as i8 as i16),
            Absolute => utils::combine_le(operands[0], operands[1]),
            AbsoluteX => {
                utils::combine_le(operands[0], operands[1]).wrapping_add(self.x_reg as u16)
            }
            AbsoluteY => {
                utils::combine_le(operands[0], operands[1]).wrapping_add(self.y_reg as u16)
            }
            Indirect => {
                let pointer = utils::combine_le(operands[0], operands[1]);
                let low = self.read(pointer);
                let high = self.read(pointer.wrapping_add(1));
                utils::combine_le(low, high)
            }
            IndexedIndirect => {
                let pointer = operands[0].wrapping_add(self.x_reg);
                let low = self.read(pointer as u16);
                let high = self.read(pointer.wrapping_add(1) as u16);
                utils::combine_le(low, high)
            }
            IndirectIndexed => {
                let pointer = operands[0];
                let low = self.read(pointer as u16);
                let high = self.read(pointer.wrapping_add(1) as u16);
                utils::combine_le(low, high).wrapping_add(self.y_reg as u16)
            }
        }
    }

    fn operand_value(&mut self, mode: AddressingMode, operands: [u8; 2]) -> u8 {
        use AddressingMode::*;

        match mode {
            Implicit => 0,
            Accumulator => self.acc,
            Immediate => operands[0],
            _ => {
                let address = self.operand_address(mode, operands);
                self.read(address)
            }
        }
    }

    fn operand_write(&mut self, mode: AddressingMode, operands: [u8; 2], value: u8) {
        use AddressingMode::*;

        match mode {
            Implicit | Immediate => {}
            Accumulator => self.acc = value,
            _ => {
                let address = self.operand_address(mode, operands);
                self.write(address, value);
            }
        }
    }

    pub(crate) fn read(&mut self, address: u16) -> u8 {
        self.bus.borrow_mut().read(AccessSource::Cpu, address)
    }

    pub(crate) fn write(&mut self, address: u16, data: u8) {
        self.bus.borrow_mut().write(AccessSource::Cpu, address, data)
    }

    /// Write at the stack pointer, then decrement it. Wraps modulo 256.
    pub(crate) fn push(&mut self, data: u8) {
        let address = STACK_PAGE + self.sp as u16;
        self.write(address, data);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Increment the stack pointer, then read at it. Wraps modulo 256.
    pub(crate) fn pull(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        let address = STACK_PAGE + self.sp as u16;
        self.read(address)
    }
}

#[cfg(test)]
mod tests;
