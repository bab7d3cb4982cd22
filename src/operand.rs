use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};

use crate::error::AsmError;
use crate::symbols::SymbolTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Register {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
}

impl Register {
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Only the low two bits of `idx` are used.
    pub fn from_index(idx: u8) -> Self {
        match idx & 0x03 {
            0 => Register::A,
            1 => Register::B,
            2 => Register::C,
            _ => Register::D,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Some(Register::A),
            "B" => Some(Register::B),
            "C" => Some(Register::C),
            "D" => Some(Register::D),
            _ => None,
        }
    }
}

/// Target of a `[...]` memory reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    Known(u16),
    Unresolved(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    Immediate(u16),
    Memory(Address),
    /// A label that could not be resolved yet (first pass only).
    Unresolved(String),
}

pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '.' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Classify one operand token.
///
/// With `symbols` present every identifier must name a known label; without
/// it identifiers come back as [`Operand::Unresolved`].
pub fn parse_operand(token: &str, symbols: Option<&SymbolTable>) -> Result<Operand, AsmError> {
    let t = token.trim();
    if let Some(rest) = t.strip_prefix('[') {
        let inner = rest
            .strip_suffix(']')
            .ok_or_else(|| AsmError::MalformedLiteral(t.to_string()))?
            .trim();
        if inner.is_empty() {
            return Err(AsmError::EmptyBracket);
        }
        return match parse_operand(inner, symbols)? {
            Operand::Immediate(v) => Ok(Operand::Memory(Address::Known(v))),
            Operand::Unresolved(name) => Ok(Operand::Memory(Address::Unresolved(name))),
            Operand::Register(_) | Operand::Memory(_) => {
                Err(AsmError::InvalidAddress(t.to_string()))
            }
        };
    }
    if let Some(reg) = Register::parse(t) {
        return Ok(Operand::Register(reg));
    }
    if let Some(addr) = symbols.and_then(|s| s.get(t)) {
        return Ok(Operand::Immediate(addr));
    }
    if is_identifier(t) {
        return match symbols {
            Some(_) => Err(AsmError::UnknownLabel(t.to_string())),
            None => Ok(Operand::Unresolved(t.to_string())),
        };
    }
    parse_literal(t).map(Operand::Immediate)
}

/// Parse a decimal, `0x` hex, `0b` binary or `'c'` character literal.
pub fn parse_literal(token: &str) -> Result<u16, AsmError> {
    let t = token.trim();
    let malformed = || AsmError::MalformedLiteral(t.to_string());
    let too_wide = || AsmError::OutOfRange {
        token: t.to_string(),
        bits: 16,
    };

    if let Some(body) = t.strip_prefix('\'') {
        let inner = body
            .strip_suffix('\'')
            .ok_or_else(|| AsmError::UnterminatedString(t.to_string()))?;
        let mut chars = inner.chars();
        let c = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(malformed()),
        };
        return u16::try_from(u32::from(c)).map_err(|_| too_wide());
    }

    let (digits, radix) = if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        (hex, 16)
    } else if let Some(bin) = t.strip_prefix("0b").or_else(|| t.strip_prefix("0B")) {
        (bin, 2)
    } else {
        (t, 10)
    };
    // from_str_radix accepts a leading '+'; literals here never carry a sign.
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(malformed());
    }
    u16::from_str_radix(digits, radix).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => too_wide(),
        _ => malformed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(is_identifier("loop"));
        assert!(is_identifier("_start"));
        assert!(is_identifier(".L1"));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn signs_are_not_literals() {
        assert!(matches!(parse_literal("+5"), Err(AsmError::MalformedLiteral(_))));
        assert!(matches!(parse_literal("-5"), Err(AsmError::MalformedLiteral(_))));
    }
}
