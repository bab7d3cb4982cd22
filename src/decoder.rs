use crate::instructions::{InstrDesc, Packing, Shape, TABLE};
use crate::operand::Register;

/// Result of a reverse table lookup on one opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    pub desc: &'static InstrDesc,
    pub dst: Option<Register>,
    pub src: Option<Register>,
}

pub trait Decoder {
    fn decode(&self, opcode: u8) -> Option<Decoded>;
}

/// Decoder backed by the static opcode table.
pub struct TableDecoder;

impl TableDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TableDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for TableDecoder {
    fn decode(&self, opcode: u8) -> Option<Decoded> {
        let desc = TABLE
            .iter()
            .find(|d| opcode & d.packing.mask() == d.opcode)?;
        let (dst, src) = match desc.packing {
            Packing::Fixed => (None, None),
            Packing::Reg => {
                let reg = Register::from_index(opcode & 0x03);
                match desc.shape {
                    Shape::MemStore | Shape::PortOut => (None, Some(reg)),
                    _ => (Some(reg), None),
                }
            }
            Packing::DstSrc => (
                Some(Register::from_index((opcode >> 2) & 0x03)),
                Some(Register::from_index(opcode & 0x03)),
            ),
        };
        Some(Decoded { desc, dst, src })
    }
}
