use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::AsmError;

/// Exported form of one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub addr: u16,
    pub name: String,
}

/// Label → address map. Names compare case-insensitively; the spelling of
/// the first definition is kept for export.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: HashMap<String, Label>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(name: &str) -> String {
        name.to_ascii_uppercase()
    }

    pub fn define(&mut self, name: &str, addr: u16) -> Result<(), AsmError> {
        let key = Self::key(name);
        if self.entries.contains_key(&key) {
            return Err(AsmError::DuplicateLabel(name.to_string()));
        }
        self.entries.insert(
            key,
            Label {
                addr,
                name: name.to_string(),
            },
        );
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.entries.get(&Self::key(name)).map(|l| l.addr)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels ordered by address, then name.
    pub fn labels(&self) -> Vec<Label> {
        let mut out: Vec<Label> = self.entries.values().cloned().collect();
        out.sort_by(|a, b| a.addr.cmp(&b.addr).then_with(|| a.name.cmp(&b.name)));
        out
    }
}
