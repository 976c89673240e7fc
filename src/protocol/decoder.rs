//! OSC 1.0 binary decoder.
//!
//! # Wire format
//!
//! ```text
//! Message:  address (OSC string) | type tags (OSC string, ",...") | arguments
//! Bundle:   "#bundle\0" | timetag (u64) | { size (i32) | element }*
//!
//! OSC string: UTF-8 bytes, NUL terminated, padded with NULs to a multiple of 4
//! i: i32 big-endian    f: f32 big-endian
//! s: OSC string        b: i32 size | bytes | padding to a multiple of 4
//! ```
//!
//! The decoder either returns a complete packet or a specific `DecodeError`;
//! it never panics on arbitrary input.

use std::io::Cursor;

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::DecodeError;
use crate::protocol::message::{OscArg, OscMessage, OscPacket};

const BUNDLE_TAG: &[u8; 8] = b"#bundle\0";

/// Bundles nested deeper than this are rejected.
const MAX_BUNDLE_DEPTH: usize = 16;

/// Decode one datagram into a bundle or a bare message.
pub fn decode(data: &[u8]) -> Result<OscPacket, DecodeError> {
    decode_packet(data, 0)
}

fn decode_packet(data: &[u8], depth: usize) -> Result<OscPacket, DecodeError> {
    if data.starts_with(BUNDLE_TAG) {
        decode_bundle(data, depth)
    } else {
        decode_message(data).map(OscPacket::Message)
    }
}

fn decode_bundle(data: &[u8], depth: usize) -> Result<OscPacket, DecodeError> {
    if depth >= MAX_BUNDLE_DEPTH {
        return Err(DecodeError::NestingTooDeep {
            max: MAX_BUNDLE_DEPTH,
        });
    }

    let mut cursor = Cursor::new(data);
    cursor.set_position(BUNDLE_TAG.len() as u64);
    let timetag = cursor
        .read_u64::<BigEndian>()
        .map_err(|_| insufficient(data, BUNDLE_TAG.len(), 8))?;

    let mut content = Vec::new();
    while (cursor.position() as usize) < data.len() {
        let offset = cursor.position() as usize;
        let size = cursor
            .read_i32::<BigEndian>()
            .map_err(|_| insufficient(data, offset, 4))?;
        let start = offset + 4;
        if size < 0 || size % 4 != 0 || start + size as usize > data.len() {
            return Err(DecodeError::InvalidSize { size, offset });
        }
        let end = start + size as usize;
        content.push(decode_packet(&data[start..end], depth + 1)?);
        cursor.set_position(end as u64);
    }

    Ok(OscPacket::Bundle { timetag, content })
}

fn decode_message(data: &[u8]) -> Result<OscMessage, DecodeError> {
    let mut cursor = Cursor::new(data);

    let address = read_string(&mut cursor)?;
    if !address.starts_with('/') {
        return Err(DecodeError::InvalidAddress(address));
    }

    // A message without a type tag string is legal in old OSC senders and
    // simply carries no arguments.
    if cursor.position() as usize == data.len() {
        return Ok(OscMessage::new(address, Vec::new()));
    }

    let tags_offset = cursor.position() as usize;
    let tags = read_string(&mut cursor)?;
    let Some(tags) = tags.strip_prefix(',') else {
        return Err(DecodeError::MissingTypeTags {
            offset: tags_offset,
        });
    };

    let mut args = Vec::with_capacity(tags.len());
    for tag in tags.chars() {
        let offset = cursor.position() as usize;
        let arg = match tag {
            'i' => OscArg::Int(
                cursor
                    .read_i32::<BigEndian>()
                    .map_err(|_| insufficient(data, offset, 4))?,
            ),
            'f' => OscArg::Float(
                cursor
                    .read_f32::<BigEndian>()
                    .map_err(|_| insufficient(data, offset, 4))?,
            ),
            's' => OscArg::String(read_string(&mut cursor)?),
            'b' => OscArg::Blob(read_blob(&mut cursor)?),
            other => {
                return Err(DecodeError::UnsupportedTypeTag { tag: other, offset });
            }
        };
        args.push(arg);
    }

    let consumed = cursor.position() as usize;
    if consumed != data.len() {
        return Err(DecodeError::TrailingBytes(data.len() - consumed));
    }

    Ok(OscMessage::new(address, args))
}

fn read_string(cursor: &mut Cursor<&[u8]>) -> Result<String, DecodeError> {
    let data = *cursor.get_ref();
    let offset = cursor.position() as usize;
    let rest = data.get(offset..).unwrap_or_default();

    let nul = rest
        .iter()
        .position(|&b| b == 0)
        .ok_or(DecodeError::UnterminatedString { offset })?;
    let padded = pad4(nul + 1);
    if padded > rest.len() {
        return Err(insufficient(data, offset, padded));
    }

    let s = std::str::from_utf8(&rest[..nul])
        .map_err(|_| DecodeError::InvalidString { offset })?
        .to_owned();
    cursor.set_position((offset + padded) as u64);
    Ok(s)
}

fn read_blob(cursor: &mut Cursor<&[u8]>) -> Result<Vec<u8>, DecodeError> {
    let data = *cursor.get_ref();
    let offset = cursor.position() as usize;
    let size = cursor
        .read_i32::<BigEndian>()
        .map_err(|_| insufficient(data, offset, 4))?;
    if size < 0 {
        return Err(DecodeError::InvalidSize { size, offset });
    }

    let start = offset + 4;
    let padded = pad4(size as usize);
    if start + padded > data.len() {
        return Err(insufficient(data, start, padded));
    }

    let bytes = data[start..start + size as usize].to_vec();
    cursor.set_position((start + padded) as u64);
    Ok(bytes)
}

fn insufficient(data: &[u8], offset: usize, needed: usize) -> DecodeError {
    DecodeError::InsufficientData {
        offset,
        needed,
        got: data.len().saturating_sub(offset),
    }
}

#[inline]
pub(crate) fn pad4(len: usize) -> usize {
    (len + 3) & !3
}
