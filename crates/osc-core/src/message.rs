//! OSC message value type

use crate::address;
use crate::{Argument, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::net::SocketAddr;

/// An OSC message: an address followed by positional arguments.
///
/// `sender` is transport metadata. It is set by [`crate::decode`] for inbound
/// packets, left `None` for locally built messages, and never encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub address: String,
    #[serde(default)]
    pub arguments: Vec<Argument>,
    #[serde(skip)]
    pub sender: Option<SocketAddr>,
}

impl Message {
    /// Create a message with no arguments. The address must be non-empty.
    pub fn new(address: impl Into<String>) -> Result<Self> {
        let address = address.into();
        if address.is_empty() {
            return Err(Error::InvalidAddress("empty address".to_string()));
        }
        Ok(Self {
            address,
            arguments: Vec::new(),
            sender: None,
        })
    }

    /// Append an argument (builder style)
    pub fn with_arg(mut self, arg: impl Into<Argument>) -> Self {
        self.arguments.push(arg.into());
        self
    }

    /// Replace the argument list (builder style)
    pub fn with_args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Argument>,
    {
        self.arguments = args.into_iter().map(Into::into).collect();
        self
    }

    /// Attach the transport origin
    pub fn with_sender(mut self, sender: SocketAddr) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn push(&mut self, arg: impl Into<Argument>) {
        self.arguments.push(arg.into());
    }

    /// Argument at `index`
    pub fn argument(&self, index: usize) -> Result<&Argument> {
        self.arguments.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            len: self.arguments.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// One tag character per argument, in order, without the leading comma
    pub fn type_tags(&self) -> String {
        self.arguments
            .iter()
            .map(|a| a.type_tag() as char)
            .collect()
    }

    /// Treat this message's address as a pattern and test `address` against it
    pub fn matches(&self, address: &str) -> Result<bool> {
        address::matches(address, &self.address)
    }

    /// Write the diagnostic form (address, tags, then each argument) to `w`
    pub fn print<W: Write + ?Sized>(&self, w: &mut W) -> Result<()> {
        write!(w, "{} ,{}", self.address, self.type_tags())?;
        for arg in &self.arguments {
            w.write_all(b" ")?;
            arg.write_to(w)?;
        }
        Ok(())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ,{}", self.address, self.type_tags())?;
        for arg in &self.arguments {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
