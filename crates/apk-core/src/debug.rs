//! Debug utilities for validation
//!
//! Enable with `--features debug`

extern crate alloc;

use crate::arith::word_to_be_bytes;
use crate::types::{FieldElement, SERIALIZED_SIZE};

/// Format a field element as a big-endian hex string
pub fn fe_to_hex(fe: &FieldElement) -> alloc::string::String {
    use alloc::format;
    let bytes = fe.to_be_bytes();
    // values below r never use the top 16 bytes
    let mut s = alloc::string::String::from("0x");
    for byte in bytes[16..].iter() {
        s.push_str(&format!("{:02x}", byte));
    }
    s
}

/// Raw limb dump: the low word then the bottom half of the high word, both
/// big-endian. Unlike [`FieldElement::serialize`] nothing is byte-reversed.
pub fn fe_to_raw_bytes(fe: &FieldElement) -> [u8; SERIALIZED_SIZE] {
    let mut out = [0u8; SERIALIZED_SIZE];
    out[..32].copy_from_slice(&word_to_be_bytes(fe.low()));
    out[32..].copy_from_slice(&word_to_be_bytes(fe.high())[16..]);
    out
}

/// Debug print for a field element (only when debug feature enabled)
#[cfg(feature = "debug")]
#[macro_export]
macro_rules! dbg_fe {
    ($name:expr, $fe:expr) => {
        #[cfg(test)]
        {
            extern crate std;
            std::println!("{} = {}", $name, $crate::debug::fe_to_hex($fe));
        }
    };
}

/// Debug print for a field element (noop when debug feature disabled)
#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! dbg_fe {
    ($name:expr, $fe:expr) => {};
}

/// Debug trace macro
#[cfg(feature = "debug")]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(test)]
        {
            extern crate std;
            std::println!($($arg)*);
        }
    };
}

/// Debug trace macro (noop when debug feature disabled)
#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {};
}
