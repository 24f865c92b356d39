//! Byte streams in, code points out
//!
//! Text reaches the engine as raw bytes: single-byte ASCII mixed with
//! multi-byte UTF-8, terminated by a NUL or by the end of the slice.
//! [`CodePoints`] walks that sequence lazily, applying a caller-selected
//! [`DecodePolicy`] to malformed input instead of aborting the whole string.

/// The stand-in code point emitted for undecodable input
pub const SUBSTITUTE: u32 = '?' as u32;

/// What to do when the bytes don't decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodePolicy {
    /// Advance past the malformed run and produce nothing
    Skip,
    /// Emit [`SUBSTITUTE`] and resume at the first byte after the malformed run
    Substitute,
}

/// Outcome of decoding one code point at the head of a byte sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// One well-formed code point
    Scalar { value: u32, len: usize },
    /// A malformed run of `len` bytes; the byte after it starts fresh
    Malformed { len: usize },
    /// A multi-byte sequence cut short by the terminator
    Truncated,
    /// NUL terminator or end of slice
    End,
}

/// Decode one code point from the head of `bytes`
///
/// A `0x00` byte terminates the sequence. Continuation bytes must match
/// `10xxxxxx`; the code point accumulates as `(acc << 6) | (byte & 0x3F)`.
/// The value is returned as a raw `u32` — overlong encodings and surrogate
/// values pass through undisturbed, exactly as the cache addresses them.
pub fn decode_one(bytes: &[u8]) -> Decoded {
    let Some(&lead) = bytes.first() else {
        return Decoded::End;
    };
    if lead == 0 {
        return Decoded::End;
    }
    if lead < 0x80 {
        return Decoded::Scalar {
            value: lead as u32,
            len: 1,
        };
    }

    // Classify the lead byte: continuation count and initial value mask.
    let (continuations, mask) = if lead & 0xE0 == 0xC0 {
        (1, 0x1F)
    } else if lead & 0xF0 == 0xE0 {
        (2, 0x0F)
    } else if lead & 0xF8 == 0xF0 {
        (3, 0x07)
    } else {
        // 10xxxxxx or 11111xxx cannot start a sequence.
        return Decoded::Malformed { len: 1 };
    };

    let mut value = (lead & mask) as u32;
    for i in 1..=continuations {
        match bytes.get(i) {
            None | Some(0) => return Decoded::Truncated,
            Some(&byte) if byte & 0xC0 == 0x80 => {
                value = (value << 6) | (byte & 0x3F) as u32;
            }
            // The offending byte is not consumed; it may start a new sequence.
            Some(_) => return Decoded::Malformed { len: i },
        }
    }

    Decoded::Scalar {
        value,
        len: 1 + continuations,
    }
}

/// Lazy code-point iterator over a NUL- or slice-terminated byte sequence
#[derive(Debug, Clone)]
pub struct CodePoints<'a> {
    bytes: &'a [u8],
    pos: usize,
    policy: DecodePolicy,
}

impl<'a> CodePoints<'a> {
    pub fn new(bytes: &'a [u8], policy: DecodePolicy) -> Self {
        Self {
            bytes,
            pos: 0,
            policy,
        }
    }

    /// Byte position of the next undecoded byte
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Iterator for CodePoints<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        loop {
            match decode_one(&self.bytes[self.pos..]) {
                Decoded::Scalar { value, len } => {
                    self.pos += len;
                    return Some(value);
                }
                Decoded::Malformed { len } => {
                    self.pos += len;
                    match self.policy {
                        DecodePolicy::Skip => continue,
                        DecodePolicy::Substitute => return Some(SUBSTITUTE),
                    }
                }
                Decoded::Truncated => {
                    // The truncated tail is never resumable; end the walk,
                    // emitting one stand-in when the policy asks for it.
                    self.pos = self.bytes.len();
                    return match self.policy {
                        DecodePolicy::Skip => None,
                        DecodePolicy::Substitute => Some(SUBSTITUTE),
                    };
                }
                Decoded::End => return None,
            }
        }
    }
}

/// Decode a whole sequence with the given policy
pub fn code_points(bytes: &[u8], policy: DecodePolicy) -> CodePoints<'_> {
    CodePoints::new(bytes, policy)
}
