use crate::assembler::Phase;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("malformed literal `{0}`")]
    MalformedLiteral(String),
    #[error("`{token}` does not fit in {bits} bits")]
    OutOfRange { token: String, bits: u8 },
    #[error("empty memory reference `[]`")]
    EmptyBracket,
    #[error("invalid memory address `{0}`")]
    InvalidAddress(String),
    #[error("unterminated string or character literal in `{0}`")]
    UnterminatedString(String),
    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),
    #[error("{mnemonic} expects {expected} operand(s), found {found}")]
    OperandCount {
        mnemonic: String,
        expected: usize,
        found: usize,
    },
    #[error("{0} requires at least one operand")]
    MissingOperands(String),
    #[error("{mnemonic} does not accept operands `{operands}`")]
    UnsupportedShape { mnemonic: String, operands: String },
    #[error("invalid label name `{0}`")]
    InvalidLabel(String),
    #[error("duplicate label `{0}`")]
    DuplicateLabel(String),
    #[error("unknown label `{0}`")]
    UnknownLabel(String),
    #[error("ORG target `{0}` must be known on the first pass")]
    UnresolvedOrigin(String),
    #[error("ORG {target:#06x} is behind the current address {cursor:#06x}")]
    BackwardOrigin { target: u16, cursor: u32 },
    #[error("no room left in the 64K address space")]
    AddressOverflow,
}

/// An [`AsmError`] pinned to the source line that caused it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line} ({phase}): `{text}`: {source}")]
pub struct LineError {
    pub line: usize,
    pub text: String,
    pub phase: Phase,
    #[source]
    pub source: AsmError,
}
