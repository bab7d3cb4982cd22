use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::AsmConfig;
use crate::encoder::{Encoder, Pass};
use crate::error::{AsmError, LineError};
use crate::symbols::SymbolTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    CollectingSymbols,
    Emitting,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::CollectingSymbols => "pass 1",
            Phase::Emitting => "pass 2",
            Phase::Done => "done",
        };
        f.write_str(s)
    }
}

/// A finished assembly run.
#[derive(Debug, Clone)]
pub struct Program {
    pub image: Vec<u8>,
    pub symbols: SymbolTable,
}

/// Two-pass driver. Pass 1 binds labels to addresses, pass 2 emits bytes
/// with the frozen table. The first failing line aborts the run.
#[derive(Debug, Clone)]
pub struct Assembler {
    encoder: Encoder,
    phase: Phase,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new(AsmConfig::default())
    }
}

impl Assembler {
    pub fn new(cfg: AsmConfig) -> Self {
        Self {
            encoder: Encoder::new(cfg),
            phase: Phase::CollectingSymbols,
        }
    }

    /// Phase reached by the last run; a failed run stays in the phase that failed.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn assemble<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<Program, LineError> {
        self.phase = Phase::CollectingSymbols;
        let symbols = self.collect_symbols(lines)?;
        debug!(labels = symbols.len(), "symbol table complete");

        self.phase = Phase::Emitting;
        let image = self.emit(lines, &symbols)?;
        debug!(bytes = image.len(), "image complete");

        self.phase = Phase::Done;
        Ok(Program { image, symbols })
    }

    fn collect_symbols<S: AsRef<str>>(&self, lines: &[S]) -> Result<SymbolTable, LineError> {
        let mut symbols = SymbolTable::new();
        let mut cursor = 0u32;
        for (idx, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let out = self
                .encoder
                .encode_line(line, cursor, Pass::Collect)
                .map_err(|e| self.fail(idx, line, e))?;
            if let Some(name) = &out.label {
                let addr = u16::try_from(cursor)
                    .map_err(|_| self.fail(idx, line, AsmError::AddressOverflow))?;
                symbols
                    .define(name, addr)
                    .map_err(|e| self.fail(idx, line, e))?;
                debug!(label = %name, addr, "label defined");
            }
            cursor = out.next;
        }
        Ok(symbols)
    }

    fn emit<S: AsRef<str>>(&self, lines: &[S], symbols: &SymbolTable) -> Result<Vec<u8>, LineError> {
        let mut image = Vec::new();
        let mut cursor = 0u32;
        for (idx, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let out = self
                .encoder
                .encode_line(line, cursor, Pass::Emit(symbols))
                .map_err(|e| self.fail(idx, line, e))?;
            if !out.bytes.is_empty() {
                trace!(addr = cursor, bytes = ?out.bytes, "{}", line.trim());
            }
            image.extend_from_slice(&out.bytes);
            cursor = out.next;
        }
        Ok(image)
    }

    fn fail(&self, idx: usize, line: &str, source: AsmError) -> LineError {
        LineError {
            line: idx + 1,
            text: line.trim().to_string(),
            phase: self.phase,
            source,
        }
    }
}

/// Assemble a whole source text with the default configuration.
pub fn assemble_str(source: &str) -> Result<Program, LineError> {
    let lines: Vec<&str> = source.lines().collect();
    Assembler::default().assemble(&lines)
}
