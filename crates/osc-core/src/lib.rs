//! OSC Core
//!
//! Open Sound Control message model: typed arguments, the binary message
//! codec, and address pattern matching.
//!
//! This crate provides:
//! - Typed message arguments ([`Argument`])
//! - Message values ([`Message`]) and the wire codec ([`codec`])
//! - Binary primitives for padded OSC fields ([`wire`])
//! - Address pattern matching ([`Pattern`], [`address::matches`])
//!
//! Transport, bundles and dispatch live outside this crate.
//!
//! ```
//! use osc_core::{decode, encode, Message};
//!
//! let msg = Message::new("/synth/1/freq").unwrap().with_arg(440.0f32);
//! let bytes = encode(&msg).unwrap();
//! let decoded = decode(&bytes, None).unwrap();
//! assert_eq!(decoded.arguments, msg.arguments);
//! assert!(osc_core::address::matches(&decoded.address, "/synth/*/freq").unwrap());
//! ```

pub mod address;
pub mod argument;
pub mod codec;
pub mod error;
pub mod message;
pub mod wire;

pub use address::{Pattern, PatternCache};
pub use argument::{parse_argument, Argument};
pub use codec::{decode, encode, encode_to, Codec, CodecConfig};
pub use error::{Error, Result};
pub use message::Message;
