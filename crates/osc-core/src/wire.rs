//! Binary primitives for the OSC wire format
//!
//! Every OSC field starts on a 4-byte boundary. Strings are NUL-terminated
//! and zero-padded, blobs carry a 4-byte length prefix and are zero-padded,
//! and all numeric fields are big-endian (network byte order). The `bytes`
//! crate's `put_*`/`get_*` accessors are big-endian, which fixes the byte
//! order at compile time.
//!
//! Readers take a slice positioned at the start of a field and report how
//! many bytes the whole padded field occupies, so callers can advance past it
//! in one step. Parse error offsets are relative to that slice.

use crate::{Error, Result};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Field alignment in bytes
pub const ALIGNMENT: usize = 4;

/// Round `len` up to the next multiple of [`ALIGNMENT`]
#[inline(always)]
pub const fn padded_len(len: usize) -> usize {
    (len + ALIGNMENT - 1) & !(ALIGNMENT - 1)
}

/// Copy `bytes` and append zeros until the length is a multiple of 4
pub fn pad(bytes: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(padded_len(bytes.len()));
    buf.extend_from_slice(bytes);
    pad_to_alignment(&mut buf);
    buf.freeze()
}

/// Append zeros until `buf.len()` is a multiple of 4
#[inline]
pub fn pad_to_alignment(buf: &mut BytesMut) {
    let padding = padded_len(buf.len()) - buf.len();
    buf.put_bytes(0, padding);
}

/// Size of `s` once written as an OSC string (terminator and padding included)
#[inline(always)]
pub const fn string_size(s: &str) -> usize {
    padded_len(s.len() + 1)
}

/// Size of a blob field (length prefix and padding included)
#[inline(always)]
pub const fn blob_size(len: usize) -> usize {
    4 + padded_len(len)
}

/// Write a NUL-terminated, zero-padded string
pub fn write_string(buf: &mut BytesMut, s: &str) -> Result<()> {
    if let Some(pos) = s.bytes().position(|b| b == 0) {
        return Err(Error::Encode(format!(
            "string contains NUL at byte {}: {:?}",
            pos, s
        )));
    }
    let start = buf.len();
    buf.extend_from_slice(s.as_bytes());
    // At least one NUL, then up to the boundary
    buf.put_bytes(0, string_size(s) - s.len());
    debug_assert_eq!((buf.len() - start) % ALIGNMENT, 0);
    Ok(())
}

/// Write a length-prefixed, zero-padded blob
pub fn write_blob(buf: &mut BytesMut, data: &[u8]) -> Result<()> {
    if data.len() > i32::MAX as usize {
        return Err(Error::Encode(format!(
            "blob too large: {} bytes (max {})",
            data.len(),
            i32::MAX
        )));
    }
    buf.put_i32(data.len() as i32);
    buf.extend_from_slice(data);
    buf.put_bytes(0, padded_len(data.len()) - data.len());
    Ok(())
}

/// Read a NUL-terminated string at the start of `buf`.
///
/// Returns the string and the padded length of the whole field. Fails when no
/// terminator is found, when the padding runs past the end of `buf`, or when
/// the bytes are not UTF-8.
pub fn read_string(buf: &[u8]) -> Result<(&str, usize)> {
    let nul = buf
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| Error::parse(buf.len(), "string is missing its NUL terminator"))?;

    let consumed = padded_len(nul + 1);
    if consumed > buf.len() {
        return Err(Error::parse(
            buf.len(),
            format!(
                "string padding truncated: need {} bytes, have {}",
                consumed,
                buf.len()
            ),
        ));
    }

    let s = std::str::from_utf8(&buf[..nul])
        .map_err(|e| Error::parse(e.valid_up_to(), format!("invalid UTF-8 in string: {}", e)))?;
    Ok((s, consumed))
}

/// Take exactly `declared_len` bytes from the start of `buf`.
///
/// Returns the bytes and the padded length consumed; padding bytes are
/// skipped, not returned.
pub fn read_blob(declared_len: usize, buf: &[u8]) -> Result<(&[u8], usize)> {
    let consumed = padded_len(declared_len);
    if consumed > buf.len() {
        return Err(Error::parse(
            buf.len(),
            format!(
                "blob truncated: declared {} bytes (padded {}), have {}",
                declared_len,
                consumed,
                buf.len()
            ),
        ));
    }
    Ok((&buf[..declared_len], consumed))
}

#[inline]
fn ensure(buf: &[u8], needed: usize, what: &str) -> Result<()> {
    if buf.len() < needed {
        return Err(Error::parse(
            buf.len(),
            format!("{} truncated: need {} bytes, have {}", what, needed, buf.len()),
        ));
    }
    Ok(())
}

/// Read a big-endian `i32`
#[inline]
pub fn read_i32(buf: &[u8]) -> Result<i32> {
    ensure(buf, 4, "int32")?;
    let mut b = buf;
    Ok(b.get_i32())
}

/// Read a big-endian IEEE-754 `f32`
#[inline]
pub fn read_f32(buf: &[u8]) -> Result<f32> {
    ensure(buf, 4, "float32")?;
    let mut b = buf;
    Ok(b.get_f32())
}

/// Read a blob field: 4-byte length prefix, data and padding.
///
/// Returns the data and the total bytes consumed including the prefix.
pub fn read_blob_field(buf: &[u8]) -> Result<(&[u8], usize)> {
    ensure(buf, 4, "blob length")?;
    let declared = read_i32(buf)?;
    if declared < 0 {
        return Err(Error::parse(0, format!("negative blob length: {}", declared)));
    }
    let (data, consumed) = read_blob(declared as usize, &buf[4..]).map_err(|e| e.at_offset(4))?;
    Ok((data, 4 + consumed))
}
