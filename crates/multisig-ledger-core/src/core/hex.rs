// crates/multisig-ledger-core/src/core/hex.rs
// ============================================================================
// Module: Multisig Ledger Hex Encoding
// Description: Lowercase hex codec shared by addresses and payloads.
// Dependencies: none
// ============================================================================

//! Hex encoding for `0x`-prefixed textual forms.

/// Lowercase hex alphabet.
const HEX: &[u8; 16] = b"0123456789abcdef";

/// Encodes bytes as a lowercase hex string.
pub(crate) fn hex_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(char::from(HEX[usize::from(byte >> 4)]));
        out.push(char::from(HEX[usize::from(byte & 0x0f)]));
    }
    out
}

/// Decodes an even-length hex string; `None` on any invalid digit.
pub(crate) fn hex_decode(text: &str) -> Option<Vec<u8>> {
    let digits = text.as_bytes();
    if digits.len() % 2 != 0 {
        return None;
    }
    digits
        .chunks_exact(2)
        .map(|pair| Some((hex_nibble(pair[0])? << 4) | hex_nibble(pair[1])?))
        .collect()
}

/// Decodes a single ASCII hex digit (either case).
pub(crate) const fn hex_nibble(digit: u8) -> Option<u8> {
    match digit {
        b'0' ..= b'9' => Some(digit - b'0'),
        b'a' ..= b'f' => Some(digit - b'a' + 10),
        b'A' ..= b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}
