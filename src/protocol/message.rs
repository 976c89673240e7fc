//! Decoded OSC message shapes.

/// A single typed OSC argument.
#[derive(Debug, Clone, PartialEq)]
pub enum OscArg {
    /// 32-bit big-endian integer (`i`)
    Int(i32),
    /// 32-bit IEEE 754 float (`f`)
    Float(f32),
    /// NUL terminated, 4-byte padded string (`s`)
    String(String),
    /// Size-prefixed, 4-byte padded byte array (`b`)
    Blob(Vec<u8>),
}

impl OscArg {
    /// OSC type tag character for this argument.
    pub fn type_tag(&self) -> char {
        match self {
            OscArg::Int(_) => 'i',
            OscArg::Float(_) => 'f',
            OscArg::String(_) => 's',
            OscArg::Blob(_) => 'b',
        }
    }

    /// Human readable type name, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            OscArg::Int(_) => "int",
            OscArg::Float(_) => "float",
            OscArg::String(_) => "string",
            OscArg::Blob(_) => "blob",
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            OscArg::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            OscArg::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Byte-string view: both strings and blobs qualify.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            OscArg::String(s) => Some(s.as_bytes()),
            OscArg::Blob(b) => Some(b),
            _ => None,
        }
    }
}

impl From<i32> for OscArg {
    fn from(v: i32) -> Self {
        OscArg::Int(v)
    }
}

impl From<f32> for OscArg {
    fn from(v: f32) -> Self {
        OscArg::Float(v)
    }
}

impl From<&str> for OscArg {
    fn from(v: &str) -> Self {
        OscArg::String(v.to_owned())
    }
}

/// An address pattern plus its ordered argument list.
#[derive(Debug, Clone, PartialEq)]
pub struct OscMessage {
    pub address: String,
    pub args: Vec<OscArg>,
}

impl OscMessage {
    pub fn new(address: impl Into<String>, args: Vec<OscArg>) -> Self {
        Self {
            address: address.into(),
            args,
        }
    }
}

/// One datagram's worth of OSC content.
#[derive(Debug, Clone, PartialEq)]
pub enum OscPacket {
    Message(OscMessage),
    Bundle { timetag: u64, content: Vec<OscPacket> },
}

impl OscPacket {
    /// Flatten nested bundles into their messages, in wire order.
    pub fn into_messages(self) -> Vec<OscMessage> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into(self, out: &mut Vec<OscMessage>) {
        match self {
            OscPacket::Message(msg) => out.push(msg),
            OscPacket::Bundle { content, .. } => {
                for packet in content {
                    packet.collect_into(out);
                }
            }
        }
    }
}
