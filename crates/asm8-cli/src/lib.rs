pub mod hexfmt;
pub mod model;

// Re-export commonly used types/functions for the binary and tests
pub use hexfmt::{format_bytes, Radix};
pub use model::{load_raw_bin, load_source, parse_u8, write_image, write_symbols};
