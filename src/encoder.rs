use crate::config::AsmConfig;
use crate::error::AsmError;
use crate::instructions::{shapes, InstrDesc, Mnemonic, Shape};
use crate::lexer::parse_statement;
use crate::operand::{is_identifier, parse_operand, Address, Operand, Register};
use crate::symbols::SymbolTable;

/// Which traversal of the source is running.
///
/// `Collect` has no symbol table yet, so labels stay unresolved and take a
/// zero placeholder. `Emit` carries the finished table and every label must
/// resolve.
#[derive(Debug, Clone, Copy)]
pub enum Pass<'a> {
    Collect,
    Emit(&'a SymbolTable),
}

impl<'a> Pass<'a> {
    pub fn symbols(self) -> Option<&'a SymbolTable> {
        match self {
            Pass::Collect => None,
            Pass::Emit(symbols) => Some(symbols),
        }
    }
}

/// One past the last addressable byte. The cursor may rest here but nothing
/// can be emitted from it.
pub const ADDRESS_SPACE: u32 = 0x1_0000;

/// Output of one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    pub next: u32,
    pub label: Option<String>,
}

impl Encoded {
    fn at(cursor: u32) -> Self {
        Self {
            bytes: Vec::new(),
            next: cursor,
            label: None,
        }
    }

    fn advance(cursor: u32, bytes: Vec<u8>) -> Result<Self, AsmError> {
        let len = u32::try_from(bytes.len()).map_err(|_| AsmError::AddressOverflow)?;
        let next = cursor.saturating_add(len);
        if next > ADDRESS_SPACE {
            return Err(AsmError::AddressOverflow);
        }
        Ok(Self {
            bytes,
            next,
            label: None,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct Encoder {
    cfg: AsmConfig,
}

impl Encoder {
    pub fn new(cfg: AsmConfig) -> Self {
        Self { cfg }
    }

    /// Encode one raw source line, including an optional leading `NAME:`.
    pub fn encode_line(&self, line: &str, cursor: u32, pass: Pass<'_>) -> Result<Encoded, AsmError> {
        let stmt = parse_statement(line)?;
        if stmt.is_empty() {
            return Ok(Encoded::at(cursor));
        }
        if let Some(name) = &stmt.label {
            check_label(name)?;
        }
        let mut out = match &stmt.mnemonic {
            Some(m) => self.encode(m, &stmt.operands, cursor, pass)?,
            None => Encoded::at(cursor),
        };
        out.label = stmt.label;
        Ok(out)
    }

    pub fn encode<S: AsRef<str>>(
        &self,
        mnemonic: &str,
        operands: &[S],
        cursor: u32,
        pass: Pass<'_>,
    ) -> Result<Encoded, AsmError> {
        if mnemonic.eq_ignore_ascii_case("ORG") {
            return self.origin(operands, cursor, pass);
        }
        if mnemonic.eq_ignore_ascii_case("DB") {
            return Encoded::advance(cursor, define_bytes(operands, pass)?);
        }
        let m = Mnemonic::parse(mnemonic)
            .ok_or_else(|| AsmError::UnknownMnemonic(mnemonic.to_string()))?;
        Encoded::advance(cursor, encode_instr(m, operands, pass)?)
    }

    fn origin<S: AsRef<str>>(
        &self,
        operands: &[S],
        cursor: u32,
        pass: Pass<'_>,
    ) -> Result<Encoded, AsmError> {
        let [token] = operands else {
            return Err(AsmError::OperandCount {
                mnemonic: "ORG".into(),
                expected: 1,
                found: operands.len(),
            });
        };
        let token = token.as_ref();
        let target = match parse_operand(token, pass.symbols())? {
            Operand::Immediate(v) => v,
            Operand::Unresolved(name) => return Err(AsmError::UnresolvedOrigin(name)),
            Operand::Register(_) | Operand::Memory(_) => {
                return Err(unsupported("ORG", &[token]));
            }
        };
        if u32::from(target) < cursor {
            return match pass {
                Pass::Emit(_) => Err(AsmError::BackwardOrigin { target, cursor }),
                Pass::Collect => Ok(Encoded::at(u32::from(target))),
            };
        }
        Ok(Encoded {
            bytes: vec![self.cfg.fill; usize::from(target) - cursor as usize],
            next: u32::from(target),
            label: None,
        })
    }
}

fn check_label(name: &str) -> Result<(), AsmError> {
    if is_identifier(name) && Register::parse(name).is_none() {
        Ok(())
    } else {
        Err(AsmError::InvalidLabel(name.to_string()))
    }
}

fn unsupported<S: AsRef<str>>(mnemonic: &str, operands: &[S]) -> AsmError {
    AsmError::UnsupportedShape {
        mnemonic: mnemonic.to_string(),
        operands: operands
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn byte(op: &Operand, token: &str) -> Result<u8, AsmError> {
    match op {
        Operand::Immediate(v) => u8::try_from(*v).map_err(|_| AsmError::OutOfRange {
            token: token.to_string(),
            bits: 8,
        }),
        _ => Ok(0),
    }
}

fn word(op: &Operand) -> [u8; 2] {
    match op {
        Operand::Immediate(v) | Operand::Memory(Address::Known(v)) => v.to_be_bytes(),
        _ => [0, 0],
    }
}

fn is_value(op: &Operand) -> bool {
    matches!(op, Operand::Immediate(_) | Operand::Unresolved(_))
}

/// Bytes for `desc` if `ops` fit its shape, `None` otherwise.
fn pack(desc: &InstrDesc, ops: &[Operand], tokens: &[&str]) -> Option<Result<Vec<u8>, AsmError>> {
    use Operand::{Memory, Register as Reg};

    let bytes = match (desc.shape, ops) {
        (Shape::Implied, []) => Ok(vec![desc.opcode]),
        (Shape::RegReg, [Reg(dst), Reg(src)]) => Ok(vec![desc.pack(&[*dst, *src])]),
        (Shape::RegImm | Shape::PortIn, [Reg(r), v]) if is_value(v) => {
            byte(v, tokens[1]).map(|b| vec![desc.pack(&[*r]), b])
        }
        (Shape::PortOut, [v, Reg(r)]) if is_value(v) => {
            byte(v, tokens[0]).map(|b| vec![desc.pack(&[*r]), b])
        }
        (Shape::MemStore, [m @ Memory(_), Reg(r)]) | (Shape::MemLoad, [Reg(r), m @ Memory(_)]) => {
            let [hi, lo] = word(m);
            Ok(vec![desc.pack(&[*r]), hi, lo])
        }
        (Shape::Addr, [v]) if is_value(v) => {
            let [hi, lo] = word(v);
            Ok(vec![desc.opcode, hi, lo])
        }
        _ => return None,
    };
    Some(bytes)
}

fn encode_instr<S: AsRef<str>>(m: Mnemonic, operands: &[S], pass: Pass<'_>) -> Result<Vec<u8>, AsmError> {
    let tokens: Vec<&str> = operands.iter().map(|s| s.as_ref()).collect();
    // every entry of a mnemonic shares one arity
    let expected = shapes(m).next().map_or(0, |d| d.shape.arity());
    if tokens.len() != expected {
        return Err(AsmError::OperandCount {
            mnemonic: m.name().to_string(),
            expected,
            found: tokens.len(),
        });
    }
    let ops = tokens
        .iter()
        .map(|t| parse_operand(t, pass.symbols()))
        .collect::<Result<Vec<_>, _>>()?;
    shapes(m)
        .find_map(|d| pack(d, &ops, &tokens))
        .unwrap_or_else(|| Err(unsupported(m.name(), &tokens[..])))
}

fn define_bytes<S: AsRef<str>>(operands: &[S], pass: Pass<'_>) -> Result<Vec<u8>, AsmError> {
    if operands.is_empty() {
        return Err(AsmError::MissingOperands("DB".into()));
    }
    let mut bytes = Vec::new();
    for token in operands.iter().map(|s| s.as_ref()) {
        if let Some(body) = token.strip_prefix('"') {
            let text = body
                .strip_suffix('"')
                .ok_or_else(|| AsmError::UnterminatedString(token.to_string()))?;
            for c in text.chars() {
                let b = u8::try_from(u32::from(c)).map_err(|_| AsmError::OutOfRange {
                    token: c.to_string(),
                    bits: 8,
                })?;
                bytes.push(b);
            }
            continue;
        }
        let op = parse_operand(token, pass.symbols())?;
        if !is_value(&op) {
            return Err(unsupported("DB", &[token]));
        }
        bytes.push(byte(&op, token)?);
    }
    Ok(bytes)
}
