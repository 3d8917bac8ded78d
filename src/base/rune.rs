//! UTF-8 rune decoding
//!
//! Decodes exactly one Unicode scalar value from the front of a byte slice.
//! Malformed input never yields a zero width, so a caller looping over
//! [`decode`] always makes progress. The decoder rejects overlong forms,
//! UTF-16 surrogates (U+D800..=U+DFFF) and anything above U+10FFFF.
//!
//! On a malformed sequence the reported width covers the maximal valid
//! prefix of the sequence (at least one byte), matching the usual
//! "substitution of maximal subparts" practice.

/// The result of decoding the front of a byte slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rune {
    /// A scalar value and the number of bytes it occupied
    Valid { ch: char, width: usize },
    /// A malformed sequence; skip `width` bytes to continue
    Invalid { width: usize },
    /// The slice ends partway through an otherwise well-formed sequence
    Truncated,
}

/// Decode one rune from the front of `bytes`
///
/// An empty slice decodes as [`Rune::Truncated`].
pub fn decode(bytes: &[u8]) -> Rune {
    let Some(&lead) = bytes.first() else {
        return Rune::Truncated;
    };

    if lead < 0x80 {
        return Rune::Valid {
            ch: char::from(lead),
            width: 1,
        };
    }

    let (len, mut value) = match lead {
        0xC2..=0xDF => (2, u32::from(lead & 0x1F)),
        0xE0..=0xEF => (3, u32::from(lead & 0x0F)),
        0xF0..=0xF4 => (4, u32::from(lead & 0x07)),
        // stray continuation bytes, overlong two-byte leads, and leads past U+10FFFF
        _ => return Rune::Invalid { width: 1 },
    };

    for i in 1..len {
        let Some(&byte) = bytes.get(i) else {
            return Rune::Truncated;
        };
        let (lo, hi) = if i == 1 { second_byte_range(lead) } else { (0x80, 0xBF) };
        if !(lo..=hi).contains(&byte) {
            return Rune::Invalid { width: i };
        }
        value = (value << 6) | u32::from(byte & 0x3F);
    }

    match char::from_u32(value) {
        Some(ch) => Rune::Valid { ch, width: len },
        None => Rune::Invalid { width: len },
    }
}

/// Allowed range of the byte following `lead`, which excludes overlong
/// encodings, surrogates, and values beyond U+10FFFF
fn second_byte_range(lead: u8) -> (u8, u8) {
    match lead {
        0xE0 => (0xA0, 0xBF),
        0xED => (0x80, 0x9F),
        0xF0 => (0x90, 0xBF),
        0xF4 => (0x80, 0x8F),
        _ => (0x80, 0xBF),
    }
}
