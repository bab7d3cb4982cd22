pub mod assembler;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod instructions;
pub mod lexer;
pub mod operand;
pub mod symbols;

pub use assembler::{assemble_str, Assembler, Phase, Program};
pub use config::AsmConfig;
pub use encoder::{Encoded, Encoder, Pass};
pub use error::{AsmError, LineError};
pub use symbols::{Label, SymbolTable};
