//! OSC 1.0 binary encoder, the sender-side counterpart of the decoder.

use crate::protocol::decoder::pad4;
use crate::protocol::message::{OscArg, OscMessage, OscPacket};

/// Encode a packet into a single datagram.
pub fn encode(packet: &OscPacket) -> Vec<u8> {
    let mut out = Vec::new();
    write_packet(&mut out, packet);
    out
}

/// Encode a bare message.
pub fn encode_message(msg: &OscMessage) -> Vec<u8> {
    let mut out = Vec::new();
    write_message(&mut out, msg);
    out
}

fn write_packet(out: &mut Vec<u8>, packet: &OscPacket) {
    match packet {
        OscPacket::Message(msg) => write_message(out, msg),
        OscPacket::Bundle { timetag, content } => {
            out.extend_from_slice(b"#bundle\0");
            out.extend_from_slice(&timetag.to_be_bytes());
            for element in content {
                let mut buf = Vec::new();
                write_packet(&mut buf, element);
                out.extend_from_slice(&(buf.len() as i32).to_be_bytes());
                out.extend_from_slice(&buf);
            }
        }
    }
}

fn write_message(out: &mut Vec<u8>, msg: &OscMessage) {
    write_string(out, &msg.address);

    let tags: String = std::iter::once(',')
        .chain(msg.args.iter().map(OscArg::type_tag))
        .collect();
    write_string(out, &tags);

    for arg in &msg.args {
        match arg {
            OscArg::Int(v) => out.extend_from_slice(&v.to_be_bytes()),
            OscArg::Float(v) => out.extend_from_slice(&v.to_be_bytes()),
            OscArg::String(s) => write_string(out, s),
            OscArg::Blob(b) => {
                out.extend_from_slice(&(b.len() as i32).to_be_bytes());
                out.extend_from_slice(b);
                out.resize(out.len() + pad4(b.len()) - b.len(), 0);
            }
        }
    }
}

fn write_string(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(s.as_bytes());
    let padding = pad4(s.len() + 1) - s.len();
    out.resize(out.len() + padding, 0);
}
