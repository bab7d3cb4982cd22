use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsmConfig {
    pub fill: u8, // padding byte emitted by ORG
}

impl Default for AsmConfig {
    fn default() -> Self {
        Self { fill: 0x00 }
    }
}
