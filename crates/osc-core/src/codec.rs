//! OSC message codec
//!
//! Message layout:
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │ Address       NUL-terminated string, padded to 4       │
//! ├────────────────────────────────────────────────────────┤
//! │ Type tags     ',' + one tag per argument, NUL, padded  │
//! ├────────────────────────────────────────────────────────┤
//! │ Arguments     payload per tag, in tag order            │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! Decoding is strictly sequential: address, tag string, then one payload per
//! tag. Any structural problem fails the whole packet; no partial message is
//! returned.

use crate::argument::tag;
use crate::wire;
use crate::{Argument, Error, Message, Result};
use bytes::{Bytes, BytesMut};
use std::io::Write;
use std::net::SocketAddr;
use tracing::{debug, trace};

/// Prefix byte of the type tag string
pub const TYPE_TAG_PREFIX: u8 = b',';

/// Address that introduces an OSC bundle
pub const BUNDLE_ADDRESS: &str = "#bundle";

/// Largest payload a single IPv4 UDP datagram can carry.
///
/// Not applied by default; transports over UDP opt in with
/// [`CodecConfig::with_max_packet_size`].
pub const UDP_MAX_PACKET_SIZE: usize = 65_507;

/// Codec configuration
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Prepend ',' to the type tag string when encoding
    pub emit_type_tag_comma: bool,
    /// Reject packets without a ',' prefixed tag string or with trailing bytes
    pub strict: bool,
    /// Maximum packet size accepted by decode and produced by encode.
    /// Unlimited by default.
    pub max_packet_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            emit_type_tag_comma: true,
            strict: false,
            max_packet_size: usize::MAX,
        }
    }
}

impl CodecConfig {
    pub fn with_type_tag_comma(mut self, emit: bool) -> Self {
        self.emit_type_tag_comma = emit;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_max_packet_size(mut self, max: usize) -> Self {
        self.max_packet_size = max;
        self
    }
}

/// Message encoder/decoder bound to a [`CodecConfig`]
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Exact encoded size of `msg` under this configuration
    pub fn encoded_size(&self, msg: &Message) -> usize {
        wire::string_size(&msg.address)
            + wire::padded_len(self.tag_string_len(msg) + 1)
            + msg.arguments.iter().map(Argument::encoded_size).sum::<usize>()
    }

    fn tag_string_len(&self, msg: &Message) -> usize {
        msg.arguments.len() + usize::from(self.config.emit_type_tag_comma)
    }

    /// Encode a message to a complete packet
    pub fn encode(&self, msg: &Message) -> Result<Bytes> {
        if msg.address.is_empty() {
            return Err(Error::InvalidAddress("empty address".to_string()));
        }

        let size = self.encoded_size(msg);
        if size > self.config.max_packet_size {
            return Err(Error::PacketTooLarge {
                size,
                max: self.config.max_packet_size,
            });
        }

        let mut buf = BytesMut::with_capacity(size);
        wire::write_string(&mut buf, &msg.address)?;

        let mut tags = String::with_capacity(self.tag_string_len(msg));
        if self.config.emit_type_tag_comma {
            tags.push(TYPE_TAG_PREFIX as char);
        }
        tags.push_str(&msg.type_tags());
        wire::write_string(&mut buf, &tags)?;

        for arg in &msg.arguments {
            arg.encode(&mut buf)?;
        }

        debug_assert_eq!(buf.len(), size);
        Ok(buf.freeze())
    }

    /// Encode a message and write the packet to `w`, returning the bytes written.
    /// Nothing is written if encoding fails.
    pub fn encode_to<W: Write + ?Sized>(&self, msg: &Message, w: &mut W) -> Result<usize> {
        let bytes = self.encode(msg)?;
        w.write_all(&bytes)?;
        w.flush()?;
        Ok(bytes.len())
    }

    /// Decode a packet received from `sender`
    pub fn decode(&self, bytes: &[u8], sender: Option<SocketAddr>) -> Result<Message> {
        self.decode_inner(bytes, sender).map_err(|e| {
            debug!("OSC decode error ({} bytes from {:?}): {}", bytes.len(), sender, e);
            e
        })
    }

    fn decode_inner(&self, bytes: &[u8], sender: Option<SocketAddr>) -> Result<Message> {
        if bytes.len() > self.config.max_packet_size {
            return Err(Error::PacketTooLarge {
                size: bytes.len(),
                max: self.config.max_packet_size,
            });
        }

        let (address, mut cursor) = wire::read_string(bytes)?;
        if address.is_empty() {
            return Err(Error::parse(0, "empty address"));
        }
        if address == BUNDLE_ADDRESS {
            return Err(Error::parse(0, "OSC bundles are not supported"));
        }

        let mut msg = Message {
            address: address.to_string(),
            arguments: Vec::new(),
            sender,
        };

        // Pre-1.0 senders may omit the tag string entirely
        if cursor == bytes.len() {
            if self.config.strict {
                return Err(Error::parse(cursor, "missing type tag string"));
            }
            return Ok(msg);
        }

        let tag_offset = cursor;
        let (tags, consumed) =
            wire::read_string(&bytes[cursor..]).map_err(|e| e.at_offset(cursor))?;
        cursor += consumed;

        let (tags, first_tag) = match tags.as_bytes().split_first() {
            Some((&TYPE_TAG_PREFIX, rest)) => (rest, tag_offset + 1),
            _ if self.config.strict => {
                return Err(Error::parse(tag_offset, "type tag string must start with ','"));
            }
            _ => (tags.as_bytes(), tag_offset),
        };

        msg.arguments.reserve(tags.len());
        for (i, &type_tag) in tags.iter().enumerate() {
            if !tag::is_supported(type_tag) {
                return Err(Error::parse(
                    first_tag + i,
                    format!("unknown type tag '{}'", type_tag.escape_ascii()),
                ));
            }
            let (arg, consumed) =
                Argument::decode(type_tag, &bytes[cursor..]).map_err(|e| e.at_offset(cursor))?;
            trace!("OSC arg {} at byte {}: {:?}", i, cursor, arg);
            cursor += consumed;
            msg.arguments.push(arg);
        }

        if self.config.strict && cursor != bytes.len() {
            return Err(Error::parse(
                cursor,
                format!("{} trailing bytes after arguments", bytes.len() - cursor),
            ));
        }

        Ok(msg)
    }
}

/// Encode a message with the default configuration
#[inline]
pub fn encode(msg: &Message) -> Result<Bytes> {
    Codec::default().encode(msg)
}

/// Encode a message with the default configuration and write it to `w`
pub fn encode_to<W: Write + ?Sized>(msg: &Message, w: &mut W) -> Result<usize> {
    Codec::default().encode_to(msg, w)
}

/// Decode a packet with the default configuration
#[inline]
pub fn decode(bytes: &[u8], sender: Option<SocketAddr>) -> Result<Message> {
    Codec::default().decode(bytes, sender)
}
