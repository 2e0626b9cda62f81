//! Error types for OSC encoding, decoding and address matching

use thiserror::Error;

/// Result type alias for OSC operations
pub type Result<T> = std::result::Result<T, Error>;

/// OSC error types
#[derive(Error, Debug)]
pub enum Error {
    /// Typed read against the wrong variant, or an unrecognized tag byte
    #[error("invalid type tag: {}", describe_tag_mismatch(.expected, .found))]
    InvalidTypeTag {
        /// Tag the caller asked for (`None` when decoding an unknown tag byte)
        expected: Option<u8>,
        /// Tag actually present
        found: u8,
    },

    /// Value cannot be represented on the wire
    #[error("encode error: {0}")]
    Encode(String),

    /// Malformed wire buffer
    #[error("parse error at byte {offset}: {reason}")]
    Parse { offset: usize, reason: String },

    /// Positional argument access past the end of the argument list
    #[error("index out of bounds: {index} (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Output sink is unusable or failed mid-write
    #[error("writer unavailable: {0}")]
    Writer(#[from] std::io::Error),

    /// Address pattern could not be compiled
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Invalid message address
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Packet exceeds the configured size limit
    #[error("packet too large: {size} bytes (max {max})")]
    PacketTooLarge { size: usize, max: usize },
}

impl Error {
    pub(crate) fn parse(offset: usize, reason: impl Into<String>) -> Self {
        Error::Parse {
            offset,
            reason: reason.into(),
        }
    }

    /// True for structural wire-format errors
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }

    /// True for type tag mismatches, which callers probing arguments should expect
    pub fn is_invalid_type_tag(&self) -> bool {
        matches!(self, Error::InvalidTypeTag { .. })
    }

    /// Shift the offset of a parse error by `base` bytes.
    ///
    /// Primitives report offsets relative to the slice they were given; the
    /// message decoder rebases them onto the whole packet.
    pub(crate) fn at_offset(self, base: usize) -> Self {
        match self {
            Error::Parse { offset, reason } => Error::Parse {
                offset: base + offset,
                reason,
            },
            other => other,
        }
    }
}

fn describe_tag_mismatch(expected: &Option<u8>, found: &u8) -> String {
    match expected {
        Some(e) => format!("expected '{}', found '{}'", *e as char, *found as char),
        None => format!("unknown tag 0x{:02x}", found),
    }
}
