//! TLV codec for TLS extension byte sequences.
//!
//! An extension record is `type (u16) || length (u16) || payload[length]`,
//! big-endian. A sequence of records is an extensions block; on the wire the
//! block itself is prefixed with its total length (see [`decode_block`]).

use crate::registry::ExtensionType;
use std::collections::BTreeSet;

/// Size of the type and length header of one record.
pub const RECORD_HEADER_LEN: usize = 4;

/// Errors from decoding or encoding an extensions block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtensionError {
    #[error("extensions value too short: {len} bytes")]
    TooShort { len: usize },

    #[error("extensions value truncated at offset {offset}: record needs {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("extension payload of {len} bytes does not fit a 16-bit length")]
    PayloadTooLarge { len: usize },

    #[error("extensions block declares {declared} bytes but carries {actual}")]
    BlockLengthMismatch { declared: usize, actual: usize },
}

/// One decoded extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtensionRecord {
    pub extension_type: u16,
    pub payload: Vec<u8>,
}

impl ExtensionRecord {
    pub fn new(extension_type: u16, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            extension_type,
            payload: payload.into(),
        }
    }

    /// Value of the record's length field.
    pub fn length(&self) -> usize {
        self.payload.len()
    }

    pub fn known_type(&self) -> Option<ExtensionType> {
        ExtensionType::from_code(self.extension_type)
    }

    /// Lowercase hex of the encoded record: `tttt` `llll` payload.
    pub fn to_hex(&self) -> String {
        format!(
            "{:04x}{:04x}{}",
            self.extension_type,
            self.payload.len(),
            hex::encode(&self.payload)
        )
    }
}

fn read_u16(bytes: &[u8], offset: usize) -> Option<u16> {
    let pair = bytes.get(offset..offset.checked_add(2)?)?;
    Some(u16::from_be_bytes([*pair.first()?, *pair.get(1)?]))
}

/// Decode a sequence of extension records.
///
/// The records must cover the buffer exactly; a header or payload running
/// past the end is [`ExtensionError::Truncated`], and any buffer shorter than
/// one header is [`ExtensionError::TooShort`].
pub fn decode(bytes: &[u8]) -> Result<Vec<ExtensionRecord>, ExtensionError> {
    if bytes.len() < RECORD_HEADER_LEN {
        return Err(ExtensionError::TooShort { len: bytes.len() });
    }

    let mut records = Vec::new();
    let mut offset = 0;
    while offset < bytes.len() {
        let available = bytes.len() - offset;
        let truncated = |needed| ExtensionError::Truncated {
            offset,
            needed,
            available,
        };
        let (Some(extension_type), Some(length)) =
            (read_u16(bytes, offset), read_u16(bytes, offset + 2))
        else {
            return Err(truncated(RECORD_HEADER_LEN));
        };
        let needed = RECORD_HEADER_LEN + usize::from(length);
        let payload = bytes
            .get(offset + RECORD_HEADER_LEN..offset + needed)
            .ok_or_else(|| truncated(needed))?;
        records.push(ExtensionRecord::new(extension_type, payload));
        offset += needed;
    }
    Ok(records)
}

/// Encode records back to their wire form.
pub fn encode(records: &[ExtensionRecord]) -> Result<Vec<u8>, ExtensionError> {
    let mut out = Vec::with_capacity(
        records
            .iter()
            .map(|r| RECORD_HEADER_LEN + r.payload.len())
            .sum(),
    );
    for record in records {
        let length = u16::try_from(record.payload.len()).map_err(|_| {
            ExtensionError::PayloadTooLarge {
                len: record.payload.len(),
            }
        })?;
        out.extend_from_slice(&record.extension_type.to_be_bytes());
        out.extend_from_slice(&length.to_be_bytes());
        out.extend_from_slice(&record.payload);
    }
    Ok(out)
}

/// Decode a length-prefixed extensions block, as found at the end of a
/// ClientHello or ServerHello. The prefix must equal the remaining length.
pub fn decode_block(bytes: &[u8]) -> Result<Vec<ExtensionRecord>, ExtensionError> {
    let declared = read_u16(bytes, 0).ok_or(ExtensionError::TooShort { len: bytes.len() })?;
    let body = bytes.get(2..).unwrap_or_default();
    if usize::from(declared) != body.len() {
        return Err(ExtensionError::BlockLengthMismatch {
            declared: usize::from(declared),
            actual: body.len(),
        });
    }
    if body.is_empty() {
        return Ok(Vec::new());
    }
    decode(body)
}

/// Encode records with the 2-byte block length prefix.
pub fn encode_block(records: &[ExtensionRecord]) -> Result<Vec<u8>, ExtensionError> {
    let body = encode(records)?;
    let declared = u16::try_from(body.len())
        .map_err(|_| ExtensionError::PayloadTooLarge { len: body.len() })?;
    let mut out = Vec::with_capacity(2 + body.len());
    out.extend_from_slice(&declared.to_be_bytes());
    out.extend_from_slice(&body);
    Ok(out)
}

/// Payload of the first record of `extension_type`, if any.
pub fn find_first(bytes: &[u8], extension_type: u16) -> Result<Option<Vec<u8>>, ExtensionError> {
    Ok(decode(bytes)?
        .into_iter()
        .find(|r| r.extension_type == extension_type)
        .map(|r| r.payload))
}

/// Distinct extension types present in the buffer.
pub fn types_present(bytes: &[u8]) -> Result<BTreeSet<u16>, ExtensionError> {
    Ok(decode(bytes)?
        .into_iter()
        .map(|r| r.extension_type)
        .collect())
}
