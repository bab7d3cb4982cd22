use anyhow::{Context, Result};
use asm8::SymbolTable;
use std::path::Path;

/// Read a source file as lines; line numbers in errors index into this.
pub fn load_source(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(text.lines().map(str::to_owned).collect())
}

pub fn load_raw_bin(path: &Path, skip: usize, len: Option<usize>) -> Result<Vec<u8>> {
    let file = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    anyhow::ensure!(skip <= file.len(), "--skip exceeds file size");
    let mut payload = &file[skip..];
    if let Some(lim) = len {
        anyhow::ensure!(lim <= payload.len(), "--len exceeds remaining file size after skip");
        payload = &payload[..lim];
    }
    Ok(payload.to_vec())
}

pub fn write_image(path: &Path, image: &[u8]) -> Result<()> {
    std::fs::write(path, image).with_context(|| format!("writing {}", path.display()))
}

/// Labels as a JSON array of `{ addr, name }`, ordered by address.
pub fn write_symbols(path: &Path, symbols: &SymbolTable) -> Result<()> {
    let json = serde_json::to_string_pretty(&symbols.labels())?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

pub fn parse_u8(s: &str) -> Result<u8> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u8::from_str_radix(hex, 16)?)
    } else {
        Ok(s.parse::<u8>()?)
    }
}
