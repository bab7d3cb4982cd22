use serde::{Deserialize, Serialize};

use crate::operand::Register;

/// Operand pattern of an instruction; decides the byte layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Implied,
    RegReg,
    RegImm,
    MemStore, // [addr], reg
    MemLoad,  // reg, [addr]
    PortIn,   // reg, port
    PortOut,  // port, reg
    Addr,
}

impl Shape {
    /// Total encoded size in bytes.
    pub fn size(self) -> u16 {
        match self {
            Shape::Implied | Shape::RegReg => 1,
            Shape::RegImm | Shape::PortIn | Shape::PortOut => 2,
            Shape::MemStore | Shape::MemLoad | Shape::Addr => 3,
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Shape::Implied => 0,
            Shape::Addr => 1,
            _ => 2,
        }
    }
}

/// How register indices merge into the opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Packing {
    Fixed,
    Reg,    // opcode | reg
    DstSrc, // opcode | dst << 2 | src
}

impl Packing {
    /// Bits of the opcode byte owned by the base opcode.
    pub fn mask(self) -> u8 {
        match self {
            Packing::Fixed => 0xFF,
            Packing::Reg => 0xFC,
            Packing::DstSrc => 0xF0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mnemonic {
    Nop,
    Mov,
    Add,
    Sub,
    And,
    Or,
    Xor,
    In,
    Out,
    Ret,
    Reti,
    Halt,
    Jmp,
    Jz,
    Jc,
    Call,
    Ei,
    Di,
}

const MNEMONICS: &[Mnemonic] = &[
    Mnemonic::Nop,
    Mnemonic::Mov,
    Mnemonic::Add,
    Mnemonic::Sub,
    Mnemonic::And,
    Mnemonic::Or,
    Mnemonic::Xor,
    Mnemonic::In,
    Mnemonic::Out,
    Mnemonic::Ret,
    Mnemonic::Reti,
    Mnemonic::Halt,
    Mnemonic::Jmp,
    Mnemonic::Jz,
    Mnemonic::Jc,
    Mnemonic::Call,
    Mnemonic::Ei,
    Mnemonic::Di,
];

impl Mnemonic {
    pub fn name(self) -> &'static str {
        match self {
            Mnemonic::Nop => "NOP",
            Mnemonic::Mov => "MOV",
            Mnemonic::Add => "ADD",
            Mnemonic::Sub => "SUB",
            Mnemonic::And => "AND",
            Mnemonic::Or => "OR",
            Mnemonic::Xor => "XOR",
            Mnemonic::In => "IN",
            Mnemonic::Out => "OUT",
            Mnemonic::Ret => "RET",
            Mnemonic::Reti => "RETI",
            Mnemonic::Halt => "HALT",
            Mnemonic::Jmp => "JMP",
            Mnemonic::Jz => "JZ",
            Mnemonic::Jc => "JC",
            Mnemonic::Call => "CALL",
            Mnemonic::Ei => "EI",
            Mnemonic::Di => "DI",
        }
    }

    /// Case-insensitive lookup.
    pub fn parse(s: &str) -> Option<Self> {
        MNEMONICS
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstrDesc {
    pub mnemonic: Mnemonic,
    pub shape: Shape,
    pub opcode: u8,
    pub packing: Packing,
}

impl InstrDesc {
    /// Merge register indices into the opcode byte per the packing rule.
    pub fn pack(&self, regs: &[Register]) -> u8 {
        match (self.packing, regs) {
            (Packing::Reg, [r, ..]) => self.opcode | r.index(),
            (Packing::DstSrc, [dst, src, ..]) => self.opcode | (dst.index() << 2) | src.index(),
            _ => self.opcode,
        }
    }
}

const fn desc(mnemonic: Mnemonic, shape: Shape, opcode: u8, packing: Packing) -> InstrDesc {
    InstrDesc {
        mnemonic,
        shape,
        opcode,
        packing,
    }
}

// JMP sits at 0xF0 next to CALL so it stays clear of IN (0xD0..=0xD3).
// Memory moves use the upper half of the 0x9x/0xAx rows, away from SUB/AND immediates.
pub const TABLE: &[InstrDesc] = &[
    desc(Mnemonic::Nop, Shape::Implied, 0x00, Packing::Fixed),
    desc(Mnemonic::Mov, Shape::RegReg, 0x10, Packing::DstSrc),
    desc(Mnemonic::Add, Shape::RegReg, 0x20, Packing::DstSrc),
    desc(Mnemonic::Sub, Shape::RegReg, 0x30, Packing::DstSrc),
    desc(Mnemonic::And, Shape::RegReg, 0x40, Packing::DstSrc),
    desc(Mnemonic::Or, Shape::RegReg, 0x50, Packing::DstSrc),
    desc(Mnemonic::Xor, Shape::RegReg, 0x60, Packing::DstSrc),
    desc(Mnemonic::Mov, Shape::RegImm, 0x70, Packing::Reg),
    desc(Mnemonic::Add, Shape::RegImm, 0x80, Packing::Reg),
    desc(Mnemonic::Sub, Shape::RegImm, 0x90, Packing::Reg),
    desc(Mnemonic::Mov, Shape::MemStore, 0x94, Packing::Reg),
    desc(Mnemonic::And, Shape::RegImm, 0xA0, Packing::Reg),
    desc(Mnemonic::Mov, Shape::MemLoad, 0xA4, Packing::Reg),
    desc(Mnemonic::Or, Shape::RegImm, 0xB0, Packing::Reg),
    desc(Mnemonic::Xor, Shape::RegImm, 0xC0, Packing::Reg),
    desc(Mnemonic::In, Shape::PortIn, 0xD0, Packing::Reg),
    desc(Mnemonic::Out, Shape::PortOut, 0xE0, Packing::Reg),
    desc(Mnemonic::Ret, Shape::Implied, 0xE4, Packing::Fixed),
    desc(Mnemonic::Reti, Shape::Implied, 0xE5, Packing::Fixed),
    desc(Mnemonic::Halt, Shape::Implied, 0xEF, Packing::Fixed),
    desc(Mnemonic::Jmp, Shape::Addr, 0xF0, Packing::Fixed),
    desc(Mnemonic::Jz, Shape::Addr, 0xF1, Packing::Fixed),
    desc(Mnemonic::Jc, Shape::Addr, 0xF2, Packing::Fixed),
    desc(Mnemonic::Call, Shape::Addr, 0xF3, Packing::Fixed),
    desc(Mnemonic::Ei, Shape::Implied, 0xF4, Packing::Fixed),
    desc(Mnemonic::Di, Shape::Implied, 0xF5, Packing::Fixed),
];

pub fn lookup(mnemonic: Mnemonic, shape: Shape) -> Option<&'static InstrDesc> {
    TABLE
        .iter()
        .find(|d| d.mnemonic == mnemonic && d.shape == shape)
}

/// All table entries for one mnemonic, in table order.
pub fn shapes(mnemonic: Mnemonic) -> impl Iterator<Item = &'static InstrDesc> {
    TABLE.iter().filter(move |d| d.mnemonic == mnemonic)
}
