use once_cell::sync::Lazy;

use crate::processor::cpu::Cpu;
use crate::processor::instruction::{
    AddressingMode, Instruction, InstructionKind, MiscInstructionKind, Opcode,
};
use crate::processor::status_register::{StatusRegister, StatusRegisterFlag};
use crate::utils;

use AddressingMode::*;
use InstructionKind::*;
use MiscInstructionKind::*;
use StatusRegisterFlag::*;

/// Full opcode table, total over 0x00-0xFF.
///
/// Undocumented opcodes keep their historical mnemonics, addressing modes
/// and base cycle costs, but execute as reporting no-ops. The KIL rows
/// would halt real silicon and are charged zero cycles.
pub static INSTRUCTION_SET: Lazy<[Instruction; 256]> = Lazy::new(build_instruction_set);

pub fn decode(opcode: Opcode) -> &'static Instruction {
    &INSTRUCTION_SET[opcode as usize]
}

fn op(
    opcode: Opcode,
    name: &'static str,
    kind: InstructionKind,
    addressing_mode: AddressingMode,
    cycles: u8,
) -> Instruction {
    Instruction {
        opcode,
        name,
        kind,
        addressing_mode,
        cycles,
    }
}

#[rustfmt::skip]
fn build_instruction_set() -> [Instruction; 256] {
    [
        // 0x00 - 0x0F
        // Break is also a status flag name, so it stays qualified here
        op(0x00, "BRK", Misc(MiscInstructionKind::Break(brk)), Implicit, 7),
        op(0x01, "ORA", InternalExecOnMemoryData(ora), IndexedIndirect, 6),
        op(0x02, "KIL", Unsupported, Implicit, 0),
        op(0x03, "SLO", Unsupported, IndexedIndirect, 8),
        op(0x04, "NOP", Unsupported, ZeroPage, 3),
        op(0x05, "ORA", InternalExecOnMemoryData(ora), ZeroPage, 3),
        op(0x06, "ASL", ReadModifyWrite(asl), ZeroPage, 5),
        op(0x07, "SLO", Unsupported, ZeroPage, 5),
        op(0x08, "PHP", Misc(Push(php)), Implicit, 3),
        op(0x09, "ORA", InternalExecOnMemoryData(ora), Immediate, 2),
        op(0x0A, "ASL", SingleByte(asl_acc), Accumulator, 2),
        op(0x0B, "ANC", Unsupported, Immediate, 2),
        op(0x0C, "NOP", Unsupported, Absolute, 4),
        op(0x0D, "ORA", InternalExecOnMemoryData(ora), Absolute, 4),
        op(0x0E, "ASL", ReadModifyWrite(asl), Absolute, 6),
        op(0x0F, "SLO", Unsupported, Absolute, 6),

        // 0x10 - 0x1F
        op(0x10, "BPL", Misc(Branch(bpl)), Relative, 2),
        op(0x11, "ORA", InternalExecOnMemoryData(ora), IndirectIndexed, 5),
        op(0x12, "KIL", Unsupported, Implicit, 0),
        op(0x13, "SLO", Unsupported, IndirectIndexed, 8),
        op(0x14, "NOP", Unsupported, ZeroPageX, 4),
        op(0x15, "ORA", InternalExecOnMemoryData(ora), ZeroPageX, 4),
        op(0x16, "ASL", ReadModifyWrite(asl), ZeroPageX, 6),
        op(0x17, "SLO", Unsupported, ZeroPageX, 6),
        op(0x18, "CLC", SingleByte(clc), Implicit, 2),
        op(0x19, "ORA", InternalExecOnMemoryData(ora), AbsoluteY, 4),
        op(0x1A, "NOP", Unsupported, Implicit, 2),
        op(0x1B, "SLO", Unsupported, AbsoluteY, 7),
        op(0x1C, "NOP", Unsupported, AbsoluteX, 4),
        op(0x1D, "ORA", InternalExecOnMemoryData(ora), AbsoluteX, 4),
        op(0x1E, "ASL", ReadModifyWrite(asl), AbsoluteX, 7),
        op(0x1F, "SLO", Unsupported, AbsoluteX, 7),

        // 0x20 - 0x2F
        op(0x20, "JSR", Misc(Call(jsr)), Absolute, 6),
        op(0x21, "AND", InternalExecOnMemoryData(and), IndexedIndirect, 6),
        op(0x22, "KIL", Unsupported, Implicit, 0),
        op(0x23, "RLA", Unsupported, IndexedIndirect, 8),
        op(0x24, "BIT", InternalExecOnMemoryData(bit), ZeroPage, 3),
        op(0x25, "AND", InternalExecOnMemoryData(and), ZeroPage, 3),
        op(0x26, "ROL", ReadModifyWrite(rol), ZeroPage, 5),
        op(0x27, "RLA", Unsupported, ZeroPage, 5),
        op(0x28, "PLP", Misc(Pull(plp)), Implicit, 4),
        op(0x29, "AND", InternalExecOnMemoryData(and), Immediate, 2),
        op(0x2A, "ROL", SingleByte(rol_acc), Accumulator, 2),
        op(0x2B, "ANC", Unsupported, Immediate, 2),
        op(0x2C, "BIT", InternalExecOnMemoryData(bit), Absolute, 4),
        op(0x2D, "AND", InternalExecOnMemoryData(and), Absolute, 4),
        op(0x2E, "ROL", ReadModifyWrite(rol), Absolute, 6),
        op(0x2F, "RLA", Unsupported, Absolute, 6),

        // 0x30 - 0x3F
        op(0x30, "BMI", Misc(Branch(bmi)), Relative, 2),
        op(0x31, "AND", InternalExecOnMemoryData(and), IndirectIndexed, 5),
        op(0x32, "KIL", Unsupported, Implicit, 0),
        op(0x33, "RLA", Unsupported, IndirectIndexed, 8),
        op(0x34, "NOP", Unsupported, ZeroPageX, 4),
        op(0x35, "AND", InternalExecOnMemoryData(and), ZeroPageX, 4),
        op(0x36, "ROL", ReadModifyWrite(rol), ZeroPageX, 6),
        op(0x37, "RLA", Unsupported, ZeroPageX, 6),
        op(0x38, "SEC", SingleByte(sec), Implicit, 2),
        op(0x39, "AND", InternalExecOnMemoryData(and), AbsoluteY, 4),
        op(0x3A, "NOP", Unsupported, Implicit, 2),
        op(0x3B, "RLA", Unsupported, AbsoluteY, 7),
        op(0x3C, "NOP", Unsupported, AbsoluteX, 4),
        op(0x3D, "AND", InternalExecOnMemoryData(and), AbsoluteX, 4),
        op(0x3E, "ROL", ReadModifyWrite(rol), AbsoluteX, 7),
        op(0x3F, "RLA", Unsupported, AbsoluteX, 7),

        // 0x40 - 0x4F
        op(0x40, "RTI", Misc(ReturnFromInterrupt(rti)), Implicit, 6),
        op(0x41, "EOR", InternalExecOnMemoryData(eor), IndexedIndirect, 6),
        op(0x42, "KIL", Unsupported, Implicit, 0),
        op(0x43, "SRE", Unsupported, IndexedIndirect, 8),
        op(0x44, "NOP", Unsupported, ZeroPage, 3),
        op(0x45, "EOR", InternalExecOnMemoryData(eor), ZeroPage, 3),
        op(0x46, "LSR", ReadModifyWrite(lsr), ZeroPage, 5),
        op(0x47, "SRE", Unsupported, ZeroPage, 5),
        op(0x48, "PHA", Misc(Push(pha)), Implicit, 3),
        op(0x49, "EOR", InternalExecOnMemoryData(eor), Immediate, 2),
        op(0x4A, "LSR", SingleByte(lsr_acc), Accumulator, 2),
        op(0x4B, "ALR", Unsupported, Immediate, 2),
        op(0x4C, "JMP", Misc(Jump(jmp)), Absolute, 3),
        op(0x4D, "EOR", InternalExecOnMemoryData(eor), Absolute, 4),
        op(0x4E, "LSR", ReadModifyWrite(lsr), Absolute, 6),
        op(0x4F, "SRE", Unsupported, Absolute, 6),

        // 0x50 - 0x5F
        op(0x50, "BVC", Misc(Branch(bvc)), Relative, 2),
        op(0x51, "EOR", InternalExecOnMemoryData(eor), IndirectIndexed, 5),
        op(0x52, "KIL", Unsupported, Implicit, 0),
        op(0x53, "SRE", Unsupported, IndirectIndexed, 8),
        op(0x54, "NOP", Unsupported, ZeroPageX, 4),
        op(0x55, "EOR", InternalExecOnMemoryData(eor), ZeroPageX, 4),
        op(0x56, "LSR", ReadModifyWrite(lsr), ZeroPageX, 6),
        op(0x57, "SRE", Unsupported, ZeroPageX, 6),
        op(0x58, "CLI", SingleByte(cli), Implicit, 2),
        op(0x59, "EOR", InternalExecOnMemoryData(eor), AbsoluteY, 4),
        op(0x5A, "NOP", Unsupported, Implicit, 2),
        op(0x5B, "SRE", Unsupported, AbsoluteY, 7),
        op(0x5C, "NOP", Unsupported, AbsoluteX, 4),
        op(0x5D, "EOR", InternalExecOnMemoryData(eor), AbsoluteX, 4),
        op(0x5E, "LSR", ReadModifyWrite(lsr), AbsoluteX, 7),
        op(0x5F, "SRE", Unsupported, AbsoluteX, 7),

        // 0x60 - 0x6F
        op(0x60, "RTS", Misc(Return(rts)), Implicit, 6),
        op(0x61, "ADC", InternalExecOnMemoryData(adc), IndexedIndirect, 6),
        op(0x62, "KIL", Unsupported, Implicit, 0),
        op(0x63, "RRA", Unsupported, IndexedIndirect, 8),
        op(0x64, "NOP", Unsupported, ZeroPage, 3),
        op(0x65, "ADC", InternalExecOnMemoryData(adc), ZeroPage, 3),
        op(0x66, "ROR", ReadModifyWrite(ror), ZeroPage, 5),
        op(0x67, "RRA", Unsupported, ZeroPage, 5),
        op(0x68, "PLA", Misc(Pull(pla)), Implicit, 4),
        op(0x69, "ADC", InternalExecOnMemoryData(adc), Immediate, 2),
        op(0x6A, "ROR", SingleByte(ror_acc), Accumulator, 2),
        op(0x6B, "ARR", Unsupported, Immediate, 2),
        op(0x6C, "JMP", Misc(Jump(jmp)), Indirect, 5),
        op(0x6D, "ADC", InternalExecOnMemoryData(adc), Absolute, 4),
        op(0x6E, "ROR", ReadModifyWrite(ror), Absolute, 6),
        op(0x6F, "RRA", Unsupported, Absolute, 6),

        // 0x70 - 0x7F
        op(0x70, "BVS", Misc(Branch(bvs)), Relative, 2),
        op(0x71, "ADC", InternalExecOnMemoryData(adc), IndirectIndexed, 5),
        op(0x72, "KIL", Unsupported, Implicit, 0),
        op(0x73, "RRA", Unsupported, IndirectIndexed, 8),
        op(0x74, "NOP", Unsupported, ZeroPageX, 4),
        op(0x75, "ADC", InternalExecOnMemoryData(adc), ZeroPageX, 4),
        op(0x76, "ROR", ReadModifyWrite(ror), ZeroPageX, 6),
        op(0x77, "RRA", Unsupported, ZeroPageX, 6),
        op(0x78, "SEI", SingleByte(sei), Implicit, 2),
        op(0x79, "ADC", InternalExecOnMemoryData(adc), AbsoluteY, 4),
        op(0x7A, "NOP", Unsupported, Implicit, 2),
        op(0x7B, "RRA", Unsupported, AbsoluteY, 7),
        op(0x7C, "NOP", Unsupported, AbsoluteX, 4),
        op(0x7D, "ADC", InternalExecOnMemoryData(adc), AbsoluteX, 4),
        op(0x7E, "ROR", ReadModifyWrite(ror), AbsoluteX, 7),
        op(0x7F, "RRA", Unsupported, AbsoluteX, 7),

        // 0x80 - 0x8F
        op(0x80, "NOP", Unsupported, Immediate, 2),
        op(0x81, "STA", StoreOp(sta), IndexedIndirect, 6),
        op(0x82, "NOP", Unsupported, Immediate, 2),
        op(0x83, "SAX", Unsupported, IndexedIndirect, 6),
        op(0x84, "STY", StoreOp(sty), ZeroPage, 3),
        op(0x85, "STA", StoreOp(sta), ZeroPage, 3),
        op(0x86, "STX", StoreOp(stx), ZeroPage, 3),
        op(0x87, "SAX", Unsupported, ZeroPage, 3),
        op(0x88, "DEY", SingleByte(dey), Implicit, 2),
        op(0x89, "NOP", Unsupported, Immediate, 2),
        op(0x8A, "TXA", SingleByte(txa), Implicit, 2),
        op(0x8B, "XAA", Unsupported, Immediate, 2),
        op(0x8C, "STY", StoreOp(sty), Absolute, 4),
        op(0x8D, "STA", StoreOp(sta), Absolute, 4),
        op(0x8E, "STX", StoreOp(stx), Absolute, 4),
        op(0x8F, "SAX", Unsupported, Absolute, 4),

        // 0x90 - 0x9F
        op(0x90, "BCC", Misc(Branch(bcc)), Relative, 2),
        op(0x91, "STA", StoreOp(sta), IndirectIndexed, 6),
        op(0x92, "KIL", Unsupported, Implicit, 0),
        op(0x93, "AHX", Unsupported, IndirectIndexed, 6),
        op(0x94, "STY", StoreOp(sty), ZeroPageX, 4),
        op(0x95, "STA", StoreOp(sta), ZeroPageX, 4),
        op(0x96, "STX", StoreOp(stx), ZeroPageY, 4),
        op(0x97, "SAX", Unsupported, ZeroPageY, 4),
        op(0x98, "TYA", SingleByte(tya), Implicit, 2),
        op(0x99, "STA", StoreOp(sta), AbsoluteY, 5),
        op(0x9A, "TXS", SingleByte(txs), Implicit, 2),
        op(0x9B, "TAS", Unsupported, AbsoluteY, 5),
        op(0x9C, "SHY", Unsupported, AbsoluteX, 5),
        op(0x9D, "STA", StoreOp(sta), AbsoluteX, 5),
        op(0x9E, "SHX", Unsupported, AbsoluteY, 5),
        op(0x9F, "AHX", Unsupported, AbsoluteY, 5),

        // 0xA0 - 0xAF
        op(0xA0, "LDY", InternalExecOnMemoryData(ldy), Immediate, 2),
        op(0xA1, "LDA", InternalExecOnMemoryData(lda), IndexedIndirect, 6),
        op(0xA2, "LDX", InternalExecOnMemoryData(ldx), Immediate, 2),
        op(0xA3, "LAX", Unsupported, IndexedIndirect, 6),
        op(0xA4, "LDY", InternalExecOnMemoryData(ldy), ZeroPage, 3),
        op(0xA5, "LDA", InternalExecOnMemoryData(lda), ZeroPage, 3),
        op(0xA6, "LDX", InternalExecOnMemoryData(ldx), ZeroPage, 3),
        op(0xA7, "LAX", Unsupported, ZeroPage, 3),
        op(0xA8, "TAY", SingleByte(tay), Implicit, 2),
        op(0xA9, "LDA", InternalExecOnMemoryData(lda), Immediate, 2),
        op(0xAA, "TAX", SingleByte(tax), Implicit, 2),
        op(0xAB, "LAX", Unsupported, Immediate, 2),
        op(0xAC, "LDY", InternalExecOnMemoryData(ldy), Absolute, 4),
        op(0xAD, "LDA", InternalExecOnMemoryData(lda), Absolute, 4),
        op(0xAE, "LDX", InternalExecOnMemoryData(ldx), Absolute, 4),
        op(0xAF, "LAX", Unsupported, Absolute, 4),

        // 0xB0 - 0xBF
        op(0xB0, "BCS", Misc(Branch(bcs)), Relative, 2),
        op(0xB1, "LDA", InternalExecOnMemoryData(lda), IndirectIndexed, 5),
        op(0xB2, "KIL", Unsupported, Implicit, 0),
        op(0xB3, "LAX", Unsupported, IndirectIndexed, 5),
        op(0xB4, "LDY", InternalExecOnMemoryData(ldy), ZeroPageX, 4),
        op(0xB5, "LDA", InternalExecOnMemoryData(lda), ZeroPageX, 4),
        op(0xB6, "LDX", InternalExecOnMemoryData(ldx), ZeroPageY, 4),
        op(0xB7, "LAX", Unsupported, ZeroPageY, 4),
        op(0xB8, "CLV", SingleByte(clv), Implicit, 2),
        op(0xB9, "LDA", InternalExecOnMemoryData(lda), AbsoluteY, 4),
        op(0xBA, "TSX", SingleByte(tsx), Implicit, 2),
        op(0xBB, "LAS", Unsupported, AbsoluteY, 4),
        op(0xBC, "LDY", InternalExecOnMemoryData(ldy), AbsoluteX, 4),
        op(0xBD, "LDA", InternalExecOnMemoryData(lda), AbsoluteX, 4),
        op(0xBE, "LDX", InternalExecOnMemoryData(ldx), AbsoluteY, 4),
        op(0xBF, "LAX", Unsupported, AbsoluteY, 4),

        // 0xC0 - 0xCF
        op(0xC0, "CPY", InternalExecOnMemoryData(cpy), Immediate, 2),
        op(0xC1, "CMP", InternalExecOnMemoryData(cmp), IndexedIndirect, 6),
        op(0xC2, "NOP", Unsupported, Immediate, 2),
        op(0xC3, "DCP", Unsupported, IndexedIndirect, 8),
        op(0xC4, "CPY", InternalExecOnMemoryData(cpy), ZeroPage, 3),
        op(0xC5, "CMP", InternalExecOnMemoryData(cmp), ZeroPage, 3),
        op(0xC6, "DEC", ReadModifyWrite(dec), ZeroPage, 5),
        op(0xC7, "DCP", Unsupported, ZeroPage, 5),
        op(0xC8, "INY", SingleByte(iny), Implicit, 2),
        op(0xC9, "CMP", InternalExecOnMemoryData(cmp), Immediate, 2),
        op(0xCA, "DEX", SingleByte(dex), Implicit, 2),
        op(0xCB, "AXS", Unsupported, Immediate, 2),
        op(0xCC, "CPY", InternalExecOnMemoryData(cpy), Absolute, 4),
        op(0xCD, "CMP", InternalExecOnMemoryData(cmp), Absolute, 4),
        op(0xCE, "DEC", ReadModifyWrite(dec), Absolute, 6),
        op(0xCF, "DCP", Unsupported, Absolute, 6),

        // 0xD0 - 0xDF
        op(0xD0, "BNE", Misc(Branch(bne)), Relative, 2),
        op(0xD1, "CMP", InternalExecOnMemoryData(cmp), IndirectIndexed, 5),
        op(0xD2, "KIL", Unsupported, Implicit, 0),
        op(0xD3, "DCP", Unsupported, IndirectIndexed, 8),
        op(0xD4, "NOP", Unsupported, ZeroPageX, 4),
        op(0xD5, "CMP", InternalExecOnMemoryData(cmp), ZeroPageX, 4),
        op(0xD6, "DEC", ReadModifyWrite(dec), ZeroPageX, 6),
        op(0xD7, "DCP", Unsupported, ZeroPageX, 6),
        op(0xD8, "CLD", SingleByte(cld), Implicit, 2),
        op(0xD9, "CMP", InternalExecOnMemoryData(cmp), AbsoluteY, 4),
        op(0xDA, "NOP", Unsupported, Implicit, 2),
        op(0xDB, "DCP", Unsupported, AbsoluteY, 7),
        op(0xDC, "NOP", Unsupported, AbsoluteX, 4),
        op(0xDD, "CMP", InternalExecOnMemoryData(cmp), AbsoluteX, 4),
        op(0xDE, "DEC", ReadModifyWrite(dec), AbsoluteX, 7),
        op(0xDF, "DCP", Unsupported, AbsoluteX, 7),

        // 0xE0 - 0xEF
        op(0xE0, "CPX", InternalExecOnMemoryData(cpx), Immediate, 2),
        op(0xE1, "SBC", InternalExecOnMemoryData(sbc), IndexedIndirect, 6),
        op(0xE2, "NOP", Unsupported, Immediate, 2),
        op(0xE3, "ISC", Unsupported, IndexedIndirect, 8),
        op(0xE4, "CPX", InternalExecOnMemoryData(cpx), ZeroPage, 3),
        op(0xE5, "SBC", InternalExecOnMemoryData(sbc), ZeroPage, 3),
        op(0xE6, "INC", ReadModifyWrite(inc), ZeroPage, 5),
        op(0xE7, "ISC", Unsupported, ZeroPage, 5),
        op(0xE8, "INX", SingleByte(inx), Implicit, 2),
        op(0xE9, "SBC", InternalExecOnMemoryData(sbc), Immediate, 2),
        op(0xEA, "NOP", SingleByte(nop), Implicit, 2),
        op(0xEB, "SBC", Unsupported, Immediate, 2),
        op(0xEC, "CPX", InternalExecOnMemoryData(cpx), Absolute, 4),
        op(0xED, "SBC", InternalExecOnMemoryData(sbc), Absolute, 4),
        op(0xEE, "INC", ReadModifyWrite(inc), Absolute, 6),
        op(0xEF, "ISC", Unsupported, Absolute, 6),

        // 0xF0 - 0xFF
        op(0xF0, "BEQ", Misc(Branch(beq)), Relative, 2),
        op(0xF1, "SBC", InternalExecOnMemoryData(sbc), IndirectIndexed, 5),
        op(0xF2, "KIL", Unsupported, Implicit, 0),
        op(0xF3, "ISC", Unsupported, IndirectIndexed, 8),
        op(0xF4, "NOP", Unsupported, ZeroPageX, 4),
        op(0xF5, "SBC", InternalExecOnMemoryData(sbc), ZeroPageX, 4),
        op(0xF6, "INC", ReadModifyWrite(inc), ZeroPageX, 6),
        op(0xF7, "ISC", Unsupported, ZeroPageX, 6),
        op(0xF8, "SED", SingleByte(sed), Implicit, 2),
        op(0xF9, "SBC", InternalExecOnMemoryData(sbc), AbsoluteY, 4),
        op(0xFA, "NOP", Unsupported, Implicit, 2),
        op(0xFB, "ISC", Unsupported, AbsoluteX, 7),
        op(0xFC, "NOP", Unsupported, AbsoluteX, 4),
        op(0xFD, "SBC", InternalExecOnMemoryData(sbc), AbsoluteX, 4),
        op(0xFE, "INC", ReadModifyWrite(inc), AbsoluteX, 7),
        op(0xFF, "ISC", Unsupported, AbsoluteX, 7),
    ]
}

// Instruction Set
// ---------------

// Transfer instructions

/// LDA - Load Accumulator with Memory
///
/// Operation:
/// M -> A
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn lda(cpu: &mut Cpu, operand: u8) {
    cpu.acc = operand;
    cpu.sr.auto_set(Negative, cpu.acc);
    cpu.sr.auto_set(Zero, cpu.acc);
}

/// LDX - Load Index X with Memory
///
/// Operation:
/// M -> X
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn ldx(cpu: &mut Cpu, operand: u8) {
    cpu.x_reg = operand;
    cpu.sr.auto_set(Negative, cpu.x_reg);
    cpu.sr.auto_set(Zero, cpu.x_reg);
}

/// LDY - Load Index Y with Memory
///
/// Operation:
/// M -> Y
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn ldy(cpu: &mut Cpu, operand: u8) {
    cpu.y_reg = operand;
    cpu.sr.auto_set(Negative, cpu.y_reg);
    cpu.sr.auto_set(Zero, cpu.y_reg);
}

/// STA - Store Accumulator in Memory
///
/// Operation:
/// A -> M
///
/// Status Register
/// N Z C I D V
/// - - - - - -
pub fn sta(cpu: &mut Cpu) -> u8 {
    cpu.acc
}

/// STX - Store Index X in Memory
///
/// Operation:
/// X -> M
///
/// Status Register
/// N Z C I D V
/// - - - - - -
pub fn stx(cpu: &mut Cpu) -> u8 {
    cpu.x_reg
}

/// STY - Store Index Y in Memory
///
/// Operation:
/// Y -> M
///
/// Status Register
/// N Z C I D V
/// - - - - - -
pub fn sty(cpu: &mut Cpu) -> u8 {
    cpu.y_reg
}

/// TAX - Transfer Accumulator to Index X
///
/// Operation:
/// A -> X
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn tax(cpu: &mut Cpu) {
    cpu.x_reg = cpu.acc;
    cpu.sr.auto_set(Negative, cpu.x_reg);
    cpu.sr.auto_set(Zero, cpu.x_reg);
}

/// TAY - Transfer Accumulator to Index Y
///
/// Operation:
/// A -> Y
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn tay(cpu: &mut Cpu) {
    cpu.y_reg = cpu.acc;
    cpu.sr.auto_set(Negative, cpu.y_reg);
    cpu.sr.auto_set(Zero, cpu.y_reg);
}

/// TSX - Transfer Stack Pointer to Index X
///
/// Operation:
/// SP -> X
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn tsx(cpu: &mut Cpu) {
    cpu.x_reg = cpu.sp;
    cpu.sr.auto_set(Negative, cpu.x_reg);
    cpu.sr.auto_set(Zero, cpu.x_reg);
}

/// TXA - Transfer Index X to Accumulator
///
/// Operation:
/// X -> A
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn txa(cpu: &mut Cpu) {
    cpu.acc = cpu.x_reg;
    cpu.sr.auto_set(Negative, cpu.acc);
    cpu.sr.auto_set(Zero, cpu.acc);
}

/// TXS - Transfer Index X to Stack Pointer
///
/// Operation:
/// X -> SP
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn txs(cpu: &mut Cpu) {
    cpu.sp = cpu.x_reg;
}

/// TYA - Transfer Index Y to Accumulator
///
/// Operation:
/// Y -> A
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn tya(cpu: &mut Cpu) {
    cpu.acc = cpu.y_reg;
    cpu.sr.auto_set(Negative, cpu.acc);
    cpu.sr.auto_set(Zero, cpu.acc);
}

// Stack instructions

/// PHA - Push Accumulator on Stack
///
/// Operation:
/// push A
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn pha(cpu: &mut Cpu) {
    cpu.push(cpu.acc);
}

/// PHP - Push Processor Status on Stack
///
/// The status byte is pushed as-is. Bit 5 is always set in the
/// register itself, so it travels along naturally.
///
/// Operation:
/// push SR
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn php(cpu: &mut Cpu) {
    cpu.push(cpu.sr.into());
}

/// PLA - Pull Accumulator from Stack
///
/// Operation:
/// pull A
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn pla(cpu: &mut Cpu) {
    cpu.acc = cpu.pull();
    cpu.sr.auto_set(Negative, cpu.acc);
    cpu.sr.auto_set(Zero, cpu.acc);
}

/// PLP - Pull Processor Status from Stack
///
/// The status byte is restored verbatim, except bit 5 which is
/// forced back to 1.
///
/// Operation:
/// pull SR
///
/// Status Register
/// N Z C I D V
/// from stack
pub fn plp(cpu: &mut Cpu) {
    cpu.sr = StatusRegister::from(cpu.pull());
}

// Decrements and increments

/// DEC - Decrement Memory by One
///
/// Operation:
/// M - 1 -> M
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn dec(cpu: &mut Cpu, operand: u8) -> u8 {
    let res = operand.wrapping_sub(1);
    cpu.sr.auto_set(Negative, res);
    cpu.sr.auto_set(Zero, res);
    res
}

/// DEX - Decrement Index X by One
///
/// Operation:
/// X - 1 -> X
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn dex(cpu: &mut Cpu) {
    cpu.x_reg = cpu.x_reg.wrapping_sub(1);
    cpu.sr.auto_set(Negative, cpu.x_reg);
    cpu.sr.auto_set(Zero, cpu.x_reg);
}

/// DEY - Decrement Index Y by One
///
/// Operation:
/// Y - 1 -> Y
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn dey(cpu: &mut Cpu) {
    cpu.y_reg = cpu.y_reg.wrapping_sub(1);
    cpu.sr.auto_set(Negative, cpu.y_reg);
    cpu.sr.auto_set(Zero, cpu.y_reg);
}

/// INC - Increment Memory by One
///
/// Operation:
/// M + 1 -> M
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn inc(cpu: &mut Cpu, operand: u8) -> u8 {
    let res = operand.wrapping_add(1);
    cpu.sr.auto_set(Negative, res);
    cpu.sr.auto_set(Zero, res);
    res
}

/// INX - Increment Index X by One
///
/// Operation:
/// X + 1 -> X
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn inx(cpu: &mut Cpu) {
    cpu.x_reg = cpu.x_reg.wrapping_add(1);
    cpu.sr.auto_set(Negative, cpu.x_reg);
    cpu.sr.auto_set(Zero, cpu.x_reg);
}

/// INY - Increment Index Y by One
///
/// Operation:
/// Y + 1 -> Y
///
/// Status Register
/// N Z C I D V
/// + + - - - -
pub fn iny(cpu: &mut Cpu) {
    cpu.y_reg = cpu.y_reg.wrapping_add(1);
    cpu.sr.auto_set(Negative, cpu.y_reg);
    cpu.sr.auto_set(Zero, cpu.y_reg);
}

// Arithmetic operations

/// ADC - Add Memory to Accumulator with Carry
///
/// Operation:
/// A + M + C -> A, C
///
/// Status Register:
/// N Z C I D V
/// + + + - - +
pub fn adc(cpu: &mut Cpu, operand: u8) {
    let carry = if cpu.sr.get(Carry) { 1 } else { 0 };
    let res = cpu.acc as u16 + operand as u16 + carry;
    let carry = (res & (1 << 8)) != 0;
    let res = res as u8;
    let overflow = utils::bv(cpu.acc, 7) == utils::bv(operand, 7)
        && utils::bv(operand, 7) != utils::bv(res, 7);

    cpu.acc = res;
    cpu.sr.auto_set(Negative, cpu.acc);
    cpu.sr.auto_set(Zero, cpu.acc);
    cpu.sr.set_value(Carry, carry);
    cpu.sr.set_value(Overflow, overflow);
}

/// SBC - Subtract Memory from Accumulator with Borrow
///
/// Equivalent to adding the one's complement of the operand, so the
/// carry flag acts as an inverted borrow.
///
/// Operation:
/// A - M - (1 - C) -> A
///
/// Status Register:
/// N Z C I D V
/// + + + - - +
pub fn sbc(cpu: &mut Cpu, operand: u8) {
    adc(cpu, !operand);
}

// Logic operations

/// AND - AND Memory with Accumulator
///
/// Operation:
/// A AND M -> A
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn and(cpu: &mut Cpu, operand: u8) {
    cpu.acc &= operand;
    cpu.sr.auto_set(Negative, cpu.acc);
    cpu.sr.auto_set(Zero, cpu.acc);
}

/// EOR - Exclusive-OR Memory with Accumulator
///
/// Operation:
/// A EOR M -> A
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn eor(cpu: &mut Cpu, operand: u8) {
    cpu.acc ^= operand;
    cpu.sr.auto_set(Negative, cpu.acc);
    cpu.sr.auto_set(Zero, cpu.acc);
}

/// ORA - OR Memory with Accumulator
///
/// Operation:
/// A OR M -> A
///
/// Status Register:
/// N Z C I D V
/// + + - - - -
pub fn ora(cpu: &mut Cpu, operand: u8) {
    cpu.acc |= operand;
    cpu.sr.auto_set(Negative, cpu.acc);
    cpu.sr.auto_set(Zero, cpu.acc);
}

// Shift & Rotate instructions

/// ASL - Shift Left One Bit (Memory or Accumulator)
///
/// Operation:
/// C <- [76543210] <- 0
///
/// Status Register:
/// N Z C I D V
/// + + + - - -
pub fn asl_acc(cpu: &mut Cpu) {
    cpu.acc = asl(cpu, cpu.acc);
}

pub fn asl(cpu: &mut Cpu, operand: u8) -> u8 {
    let result = operand << 1;
    let carry = utils::bv(operand, 7) != 0;
    cpu.sr.auto_set(Negative, result);
    cpu.sr.auto_set(Zero, result);
    cpu.sr.set_value(Carry, carry);
    result
}

/// LSR - Shift One Bit Right (Memory or Accumulator)
///
/// Operation:
/// 0 -> [76543210] -> C
///
/// Status Register:
/// N Z C I D V
/// 0 + + - - -
pub fn lsr_acc(cpu: &mut Cpu) {
    cpu.acc = lsr(cpu, cpu.acc);
}

pub fn lsr(cpu: &mut Cpu, operand: u8) -> u8 {
    let result = operand >> 1;
    let carry = utils::bv(operand, 0) != 0;
    cpu.sr.clear(Negative);
    cpu.sr.auto_set(Zero, result);
    cpu.sr.set_value(Carry, carry);
    result
}

/// ROL - Rotate One Bit Left (Memory or Accumulator)
///
/// Operation:
/// C <- [76543210] <- C
///
/// Status Register:
/// N Z C I D V
/// + + + - - -
pub fn rol_acc(cpu: &mut Cpu) {
    cpu.acc = rol(cpu, cpu.acc);
}

pub fn rol(cpu: &mut Cpu, operand: u8) -> u8 {
    let new_carry = utils::bv(operand, 7) != 0;
    let curr_carry = if cpu.sr.get(Carry) { 1 } else { 0 };
    let result = operand << 1 | curr_carry;
    cpu.sr.auto_set(Negative, result);
    cpu.sr.auto_set(Zero, result);
    cpu.sr.set_value(Carry, new_carry);
    result
}

/// ROR - Rotate One Bit Right (Memory or Accumulator)
///
/// Operation:
/// C -> [76543210] -> C
///
/// Status Register:
/// N Z C I D V
/// + + + - - -
pub fn ror_acc(cpu: &mut Cpu) {
    cpu.acc = ror(cpu, cpu.acc);
}

pub fn ror(cpu: &mut Cpu, operand: u8) -> u8 {
    let new_carry = utils::bv(operand, 0) != 0;
    let curr_carry = if cpu.sr.get(Carry) { 1 } else { 0 };
    let result = operand >> 1 | (curr_carry << 7);
    cpu.sr.auto_set(Negative, result);
    cpu.sr.auto_set(Zero, result);
    cpu.sr.set_value(Carry, new_carry);
    result
}

// Flag instructions

/// CLC - Clear Carry Flag
///
/// Operation:
/// 0 -> C
///
/// Status Register:
/// N Z C I D V
/// - - 0 - - -
pub fn clc(cpu: &mut Cpu) {
    cpu.sr.clear(Carry);
}

/// CLD - Clear Decimal Mode
///
/// Operation:
/// 0 -> D
///
/// Status Register:
/// N Z C I D V
/// - - - - 0 -
pub fn cld(cpu: &mut Cpu) {
    cpu.sr.clear(Decimal);
}

/// CLI - Clear Interrupt Disable Bit
///
/// Operation:
/// 0 -> I
///
/// Status Register:
/// N Z C I D V
/// - - - 0 - -
pub fn cli(cpu: &mut Cpu) {
    cpu.sr.clear(InterruptDisable);
}

/// CLV - Clear Overflow Flag
///
/// Operation:
/// 0 -> V
///
/// Status Register:
/// N Z C I D V
/// - - - - - 0
pub fn clv(cpu: &mut Cpu) {
    cpu.sr.clear(Overflow);
}

/// SEC - Set Carry Flag
///
/// Operation:
/// 1 -> C
///
/// Status Register:
/// N Z C I D V
/// - - 1 - - -
pub fn sec(cpu: &mut Cpu) {
    cpu.sr.set(Carry);
}

/// SED - Set Decimal Flag
///
/// The flag is tracked but decimal mode has no effect on arithmetic,
/// matching the NES CPU.
///
/// Operation:
/// 1 -> D
///
/// Status Register:
/// N Z C I D V
/// - - - - 1 -
pub fn sed(cpu: &mut Cpu) {
    cpu.sr.set(Decimal);
}

/// SEI - Set Interrupt Disable Status
///
/// Operation:
/// 1 -> I
///
/// Status Register:
/// N Z C I D V
/// - - - 1 - -
pub fn sei(cpu: &mut Cpu) {
    cpu.sr.set(InterruptDisable);
}

// Comparisons

pub fn generic_cmp(cpu: &mut Cpu, a: u8, b: u8) {
    let res = a.wrapping_sub(b);
    cpu.sr.auto_set(Negative, res);
    cpu.sr.auto_set(Zero, res);
    cpu.sr.set_value(Carry, a >= b);
}

/// CMP - Compare Memory with Accumulator
///
/// Operation:
/// A - M
///
/// Status Register:
/// N Z C I D V
/// + + + - - -
pub fn cmp(cpu: &mut Cpu, operand: u8) {
    generic_cmp(cpu, cpu.acc, operand);
}

/// CPX - Compare Memory and Index X
///
/// Operation:
/// X - M
///
/// Status Register:
/// N Z C I D V
/// + + + - - -
pub fn cpx(cpu: &mut Cpu, operand: u8) {
    generic_cmp(cpu, cpu.x_reg, operand);
}

/// CPY - Compare Memory and Index Y
///
/// Operation:
/// Y - M
///
/// Status Register:
/// N Z C I D V
/// + + + - - -
pub fn cpy(cpu: &mut Cpu, operand: u8) {
    generic_cmp(cpu, cpu.y_reg, operand);
}

// Conditional branch

pub fn branch(cpu: &mut Cpu, condition: bool, target: u16) {
    if condition {
        cpu.pc = target;
    }
}

/// BCC - Branch on Carry Clear
///
/// Operation:
/// branch on C = 0
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn bcc(cpu: &mut Cpu, target: u16) {
    branch(cpu, !cpu.sr.get(Carry), target);
}

/// BCS - Branch on Carry Set
///
/// Operation:
/// branch on C = 1
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn bcs(cpu: &mut Cpu, target: u16) {
    branch(cpu, cpu.sr.get(Carry), target);
}

/// BEQ - Branch on Result Zero
///
/// Operation:
/// branch on Z = 1
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn beq(cpu: &mut Cpu, target: u16) {
    branch(cpu, cpu.sr.get(Zero), target);
}

/// BMI - Branch on Result Minus
///
/// Operation:
/// branch on N = 1
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn bmi(cpu: &mut Cpu, target: u16) {
    branch(cpu, cpu.sr.get(Negative), target);
}

/// BNE - Branch on Result not Zero
///
/// Operation:
/// branch on Z = 0
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn bne(cpu: &mut Cpu, target: u16) {
    branch(cpu, !cpu.sr.get(Zero), target);
}

/// BPL - Branch on Result Plus
///
/// Operation:
/// branch on N = 0
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn bpl(cpu: &mut Cpu, target: u16) {
    branch(cpu, !cpu.sr.get(Negative), target);
}

/// BVC - Branch on Overflow Clear
///
/// Operation:
/// branch on V = 0
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn bvc(cpu: &mut Cpu, target: u16) {
    branch(cpu, !cpu.sr.get(Overflow), target);
}

/// BVS - Branch on Overflow Set
///
/// Operation:
/// branch on V = 1
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn bvs(cpu: &mut Cpu, target: u16) {
    branch(cpu, cpu.sr.get(Overflow), target);
}

// Jumps and subroutines

/// JMP - Jump to New Location
///
/// Operation:
/// (PC+1) -> PCL
/// (PC+2) -> PCH
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn jmp(cpu: &mut Cpu, address: u16) {
    cpu.pc = address;
}

/// JSR - Jump to New Location Saving Return Address
///
/// The address of the last byte of the JSR itself is pushed, high
/// byte first; RTS compensates by adding one.
///
/// Operation:
/// push (PC+2)
/// (PC+1) -> PCL
/// (PC+2) -> PCH
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn jsr(cpu: &mut Cpu, address: u16) {
    let (pcl, pch) = utils::split_le(cpu.pc.wrapping_sub(1));
    cpu.push(pch);
    cpu.push(pcl);
    cpu.pc = address;
}

/// RTS - Return from Subroutine
///
/// Operation:
/// pull PC, PC+1 -> PC
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn rts(cpu: &mut Cpu) {
    let pcl = cpu.pull();
    let pch = cpu.pull();
    cpu.pc = utils::combine_le(pcl, pch).wrapping_add(1);
}

// Interrupts

/// BRK - Force Break
///
/// BRK initiates a software interrupt similar to a hardware
/// interrupt (IRQ): the return address and the status byte are
/// pushed, interrupts are disabled, and control transfers to the
/// handler installed at the IRQ vector.
///
/// Operation:
/// interrupt, push PC, push SR
///
/// Status Register:
/// N Z C I D V
/// - - - 1 - -
pub fn brk(cpu: &mut Cpu) {
    let (pcl, pch) = utils::split_le(cpu.pc);
    cpu.push(pch);
    cpu.push(pcl);
    cpu.push(cpu.sr.into());
    cpu.sr.set(InterruptDisable);
    cpu.pc = cpu.bus.borrow_mut().irq_vector();
}

/// RTI - Return from Interrupt
///
/// Exact inverse of BRK's three pushes: the status byte comes off
/// the stack first, then the return address.
///
/// Operation:
/// pull SR, pull PC
///
/// Status Register:
///  N Z C I D V
///  from stack
pub fn rti(cpu: &mut Cpu) {
    cpu.sr = StatusRegister::from(cpu.pull());
    let pcl = cpu.pull();
    let pch = cpu.pull();
    cpu.pc = utils::combine_le(pcl, pch);
}

// Other

/// BIT - Test Bits in Memory with Accumulator
///
/// bits 7 and 6 of operand are transferred to bit 7 and 6 of SR
/// (N,V); the zero-flag is set to the result of operand AND
/// accumulator.
///
/// Operation:
/// A AND M, M7 -> N, M6 -> V
///
/// Status Register:
///  N Z C I D V
/// M7 + - - - M6
pub fn bit(cpu: &mut Cpu, operand: u8) {
    cpu.sr.set_value(Negative, utils::bv(operand, 7) != 0);
    cpu.sr.set_value(Overflow, utils::bv(operand, 6) != 0);
    cpu.sr.auto_set(Zero, cpu.acc & operand);
}

/// NOP - No Operation
///
/// Operation:
/// ---
///
/// Status Register:
/// N Z C I D V
/// - - - - - -
pub fn nop(_: &mut Cpu) {}
