use crate::processor::cpu::Cpu;
use crate::utils;

pub type Opcode = u8;

#[derive(Clone)]
pub struct Instruction {
    pub opcode: Opcode,
    pub name: &'static str,
    pub kind: InstructionKind,
    pub addressing_mode: AddressingMode,
    // base cycle cost, charged on every execution
    pub cycles: u8,
}

#[derive(Clone)]
pub enum InstructionKind {
    SingleByte(fn(&mut Cpu)),
    InternalExecOnMemoryData(fn(&mut Cpu, u8)),
    StoreOp(fn(&mut Cpu) -> u8),
    ReadModifyWrite(fn(&mut Cpu, u8) -> u8),
    Misc(MiscInstructionKind),
    // decoded and charged but executes as a no-op
    Unsupported,
}

#[derive(Clone)]
pub enum MiscInstructionKind {
    Push(fn(&mut Cpu)),
    Pull(fn(&mut Cpu)),
    Jump(fn(&mut Cpu, u16)),
    Branch(fn(&mut Cpu, u16)),
    Call(fn(&mut Cpu, u16)),
    Return(fn(&mut Cpu)),
    Break(fn(&mut Cpu)),
    ReturnFromInterrupt(fn(&mut Cpu)),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    Implicit,        // Implied Addressing
    Accumulator,     // Accumulator Addressing
    Immediate,       // Immediate Addressing
    ZeroPage,        // Zero Page Addressing
    ZeroPageX,       // Zero Page Indexed Addressing (X)
    ZeroPageY,       // Zero Page Indexed Addressing (Y)
    Relative,        // Relative Addressing (branch operations)
    Absolute,        // Absolute Addressing
    AbsoluteX,       // Absolute Indexed Addressing (X)
    AbsoluteY,       // Absolute Indexed Addressing (Y)
    Indirect,        // Indirect Addressing (jump operations)
    IndexedIndirect, // Zero Page Indexed Indirect Addressing (X)
    IndirectIndexed, // Zero Page Indirect Indexed Addressing (Y)
}

impl AddressingMode {
    /// Number of operand bytes following the opcode
    pub fn operand_count(&self) -> u8 {
        use AddressingMode::*;

        match self {
            Implicit | Accumulator => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | Relative | IndexedIndirect
            | IndirectIndexed => 1,
            Absolute | AbsoluteX | AbsoluteY | Indirect => 2,
        }
    }

    /// Render the operand bytes in conventional 6502 assembly notation
    pub fn format_operands(&self, operands: [u8; 2]) -> String {
        use AddressingMode::*;

        let byte = operands[0];
        let word = utils::combine_le(operands[0], operands[1]);

        match self {
            Implicit | Accumulator => String::new(),
            Immediate => format!("#${byte:02X}"),
            ZeroPage => format!("${byte:02X}"),
            ZeroPageX => format!("${byte:02X}, X"),
            ZeroPageY => format!("${byte:02X}, Y"),
            Relative => format!("*{:+}", byte as i8),
            Absolute => format!("${word:04X}"),
            AbsoluteX => format!("${word:04X}, X"),
            AbsoluteY => format!("${word:04X}, Y"),
            Indirect => format!("(${word:04X})"),
            IndexedIndirect => format!("(${byte:02X}, X)"),
            IndirectIndexed => format!("(${byte:02X}), Y"),
        }
    }
}
