//! Byte rendering helpers shared by value formatting.

use std::fmt::Write;

/// `0x` followed by two lowercase hex digits per byte.
pub fn hex_string(data: &[u8]) -> String {
    let mut out = String::with_capacity(2 + data.len() * 2);
    out.push_str("0x");
    for b in data {
        let _ = write!(out, "{:02x}", b);
    }
    out
}

/// Text with control characters (below 0x20, and DEL) shown as `{XX}`.
pub fn escape(data: &[u8]) -> String {
    let text = String::from_utf8_lossy(data);
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if (c as u32) < 32 || c == '\x7f' {
            let _ = write!(out, "{{{:02X}}}", c as u32);
        } else {
            out.push(c);
        }
    }
    out
}
