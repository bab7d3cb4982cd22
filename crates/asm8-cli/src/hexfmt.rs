#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Radix {
    #[default]
    Hex,
    Dec,
}

/// Render bytes as space-separated values: two-digit upper-case hex or plain decimal.
pub fn format_bytes(bytes: &[u8], radix: Radix) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        match radix {
            Radix::Hex => out.push_str(&format!("{b:02X}")),
            Radix::Dec => out.push_str(&b.to_string()),
        }
    }
    out
}
