//! OSC arguments
//!
//! An [`Argument`] is one of the five OSC 1.0 atomic types this crate
//! supports. Its type tag is derived from the variant and never stored.
//!
//! | Variant   | Tag       | Wire payload                               |
//! |-----------|-----------|--------------------------------------------|
//! | `Int32`   | `i`       | 4 bytes, big-endian                        |
//! | `Float32` | `f`       | 4 bytes, big-endian IEEE-754               |
//! | `Bool`    | `T` / `F` | none                                       |
//! | `String`  | `s`       | NUL-terminated, padded to 4 bytes          |
//! | `Blob`    | `b`       | 4-byte length, data, padded to 4 bytes     |

use crate::wire;
use crate::{Error, Result};
use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// Type tag bytes
pub mod tag {
    pub const INT32: u8 = b'i';
    pub const FLOAT32: u8 = b'f';
    pub const TRUE: u8 = b'T';
    pub const FALSE: u8 = b'F';
    pub const STRING: u8 = b's';
    pub const BLOB: u8 = b'b';

    /// Whether `byte` is a tag this crate can decode
    pub fn is_supported(byte: u8) -> bool {
        matches!(byte, INT32 | FLOAT32 | TRUE | FALSE | STRING | BLOB)
    }
}

/// A single OSC message argument.
///
/// Equality is variant-sensitive: `Int32(5) != Float32(5.0)`. Both boolean
/// tags map onto [`Argument::Bool`], so `T` and `F` compare by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Argument {
    Int32(i32),
    Float32(f32),
    Bool(bool),
    String(String),
    Blob(Vec<u8>),
}

impl Argument {
    /// The one-byte OSC type tag for this value
    #[inline]
    pub fn type_tag(&self) -> u8 {
        match self {
            Argument::Int32(_) => tag::INT32,
            Argument::Float32(_) => tag::FLOAT32,
            Argument::Bool(true) => tag::TRUE,
            Argument::Bool(false) => tag::FALSE,
            Argument::String(_) => tag::STRING,
            Argument::Blob(_) => tag::BLOB,
        }
    }

    fn mismatch(&self, expected: u8) -> Error {
        Error::InvalidTypeTag {
            expected: Some(expected),
            found: self.type_tag(),
        }
    }

    pub fn read_int32(&self) -> Result<i32> {
        match self {
            Argument::Int32(i) => Ok(*i),
            _ => Err(self.mismatch(tag::INT32)),
        }
    }

    pub fn read_float32(&self) -> Result<f32> {
        match self {
            Argument::Float32(f) => Ok(*f),
            _ => Err(self.mismatch(tag::FLOAT32)),
        }
    }

    pub fn read_bool(&self) -> Result<bool> {
        match self {
            Argument::Bool(b) => Ok(*b),
            _ => Err(self.mismatch(tag::TRUE)),
        }
    }

    pub fn read_string(&self) -> Result<&str> {
        match self {
            Argument::String(s) => Ok(s),
            _ => Err(self.mismatch(tag::STRING)),
        }
    }

    pub fn read_blob(&self) -> Result<&[u8]> {
        match self {
            Argument::Blob(b) => Ok(b),
            _ => Err(self.mismatch(tag::BLOB)),
        }
    }

    /// Number of payload bytes this argument occupies on the wire
    pub fn encoded_size(&self) -> usize {
        match self {
            Argument::Int32(_) | Argument::Float32(_) => 4,
            Argument::Bool(_) => 0,
            Argument::String(s) => wire::string_size(s),
            Argument::Blob(b) => wire::blob_size(b.len()),
        }
    }

    /// Append the binary payload (not the tag) to `buf`
    pub fn encode(&self, buf: &mut BytesMut) -> Result<()> {
        match self {
            Argument::Int32(i) => buf.put_i32(*i),
            Argument::Float32(f) => buf.put_f32(*f),
            Argument::Bool(_) => {} // carried by the tag
            Argument::String(s) => wire::write_string(buf, s)?,
            Argument::Blob(b) => wire::write_blob(buf, b)?,
        }
        Ok(())
    }

    /// Decode one argument payload for `type_tag` from the start of `data`.
    ///
    /// Returns the argument and the number of bytes consumed. An unknown tag
    /// consumes nothing and fails with [`Error::InvalidTypeTag`].
    pub fn decode(type_tag: u8, data: &[u8]) -> Result<(Argument, usize)> {
        match type_tag {
            tag::INT32 => Ok((Argument::Int32(wire::read_i32(data)?), 4)),
            tag::FLOAT32 => Ok((Argument::Float32(wire::read_f32(data)?), 4)),
            tag::TRUE => Ok((Argument::Bool(true), 0)),
            tag::FALSE => Ok((Argument::Bool(false), 0)),
            tag::STRING => {
                let (s, consumed) = wire::read_string(data)?;
                Ok((Argument::String(s.to_string()), consumed))
            }
            tag::BLOB => {
                let (b, consumed) = wire::read_blob_field(data)?;
                Ok((Argument::Blob(b.to_vec()), consumed))
            }
            other => Err(Error::InvalidTypeTag {
                expected: None,
                found: other,
            }),
        }
    }

    /// Write the diagnostic text form to `w`, returning the bytes written.
    ///
    /// This is not the wire encoding. Blobs are written as raw bytes.
    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> Result<usize> {
        match self {
            Argument::Blob(b) => {
                w.write_all(b)?;
                Ok(b.len())
            }
            other => {
                let text = other.to_string();
                w.write_all(text.as_bytes())?;
                Ok(text.len())
            }
        }
    }
}

/// Diagnostic rendering: decimal numbers, `true`/`false`, raw text.
/// Floats use six fractional digits.
impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Int32(i) => write!(f, "{}", i),
            Argument::Float32(v) => write!(f, "{:.6}", v),
            Argument::Bool(b) => write!(f, "{}", b),
            Argument::String(s) => f.write_str(s),
            Argument::Blob(b) => f.write_str(&String::from_utf8_lossy(b)),
        }
    }
}

/// Decode one argument; see [`Argument::decode`]
pub fn parse_argument(type_tag: u8, data: &[u8]) -> Result<(Argument, usize)> {
    Argument::decode(type_tag, data)
}

impl From<i32> for Argument {
    fn from(v: i32) -> Self {
        Argument::Int32(v)
    }
}

impl From<f32> for Argument {
    fn from(v: f32) -> Self {
        Argument::Float32(v)
    }
}

impl From<bool> for Argument {
    fn from(v: bool) -> Self {
        Argument::Bool(v)
    }
}

impl From<&str> for Argument {
    fn from(v: &str) -> Self {
        Argument::String(v.to_string())
    }
}

impl From<String> for Argument {
    fn from(v: String) -> Self {
        Argument::String(v)
    }
}

impl From<Vec<u8>> for Argument {
    fn from(v: Vec<u8>) -> Self {
        Argument::Blob(v)
    }
}

impl From<&[u8]> for Argument {
    fn from(v: &[u8]) -> Self {
        Argument::Blob(v.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_variants() -> Vec<Argument> {
        vec![
            Argument::Int32(-7),
            Argument::Float32(0.25),
            Argument::Bool(true),
            Argument::Bool(false),
            Argument::String("hello".to_string()),
            Argument::Blob(vec![1, 2, 3]),
        ]
    }

    #[test]
    fn test_type_tags() {
        let tags: Vec<u8> = all_variants().iter().map(Argument::type_tag).collect();
        assert_eq!(tags, b"ifTFsb");
    }

    #[test]
    fn test_exactly_one_reader_succeeds() {
        for arg in all_variants() {
            let results = [
                arg.read_int32().is_ok(),
                arg.read_float32().is_ok(),
                arg.read_bool().is_ok(),
                arg.read_string().is_ok(),
                arg.read_blob().is_ok(),
            ];
            assert_eq!(results.iter().filter(|ok| **ok).count(), 1, "{:?}", arg);
        }
    }

    #[test]
    fn test_failed_read_reports_tags() {
        let err = Argument::String("x".into()).read_int32().unwrap_err();
        match err {
            Error::InvalidTypeTag { expected, found } => {
                assert_eq!(expected, Some(tag::INT32));
                assert_eq!(found, tag::STRING);
            }
            e => panic!("Expected InvalidTypeTag, got {:?}", e),
        }
    }

    #[test]
    fn test_equality_is_variant_sensitive() {
        assert_eq!(Argument::Int32(5), Argument::Int32(5));
        assert_ne!(Argument::Int32(5), Argument::Int32(6));
        assert_ne!(Argument::Int32(5), Argument::Float32(5.0));
        assert_ne!(Argument::Bool(true), Argument::Bool(false));
        assert_ne!(Argument::String("a".into()), Argument::Blob(b"a".to_vec()));
    }

    #[test]
    fn test_decode_encoded() {
        for arg in all_variants() {
            let mut buf = BytesMut::new();
            arg.encode(&mut buf).unwrap();
            assert_eq!(buf.len(), arg.encoded_size());
            assert_eq!(buf.len() % 4, 0);

            let (decoded, consumed) = Argument::decode(arg.type_tag(), &buf).unwrap();
            assert_eq!(decoded, arg);
            assert_eq!(decoded.type_tag(), arg.type_tag());
            assert_eq!(consumed, buf.len());
        }
    }

    #[test]
    fn test_decode_unknown_tag() {
        let err = Argument::decode(b'x', &[0, 0, 0, 1]).unwrap_err();
        assert!(err.is_invalid_type_tag());
    }

    #[test]
    fn test_decode_truncated_int() {
        assert!(Argument::decode(tag::INT32, &[0, 0]).unwrap_err().is_parse());
    }

    #[test]
    fn test_bool_has_no_payload() {
        let (arg, consumed) = Argument::decode(tag::TRUE, &[]).unwrap();
        assert_eq!(arg, Argument::Bool(true));
        assert_eq!(consumed, 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Argument::Int32(42).to_string(), "42");
        assert_eq!(Argument::Float32(1.5).to_string(), "1.500000");
        assert_eq!(Argument::Bool(false).to_string(), "false");
        assert_eq!(Argument::String("abc".into()).to_string(), "abc");
    }

    #[test]
    fn test_write_to() {
        let mut out = Vec::new();
        let n = Argument::Blob(vec![0xff, 0x00]).write_to(&mut out).unwrap();
        assert_eq!(n, 2);
        assert_eq!(out, vec![0xff, 0x00]);

        let mut out = Vec::new();
        Argument::Int32(-3).write_to(&mut out).unwrap();
        assert_eq!(out, b"-3");
    }
}
