//! Clarity value wire codec.
//!
//! The Stacks read-only call endpoint exchanges values in the SIP-005
//! binary serialization, hex-encoded. Only the types that faucet probes
//! and transaction arguments actually use are implemented; lists, tuples
//! and strings are rejected as unsupported.

use thiserror::Error;

/// Type prefix bytes from the SIP-005 serialization.
const PREFIX_INT: u8 = 0x00;
const PREFIX_UINT: u8 = 0x01;
const PREFIX_BUFFER: u8 = 0x02;
const PREFIX_BOOL_TRUE: u8 = 0x03;
const PREFIX_BOOL_FALSE: u8 = 0x04;
const PREFIX_PRINCIPAL: u8 = 0x05;
const PREFIX_CONTRACT_PRINCIPAL: u8 = 0x06;
const PREFIX_RESPONSE_OK: u8 = 0x07;
const PREFIX_RESPONSE_ERR: u8 = 0x08;
const PREFIX_OPTIONAL_NONE: u8 = 0x09;
const PREFIX_OPTIONAL_SOME: u8 = 0x0a;

/// Nesting limit for optional/response wrappers.
const MAX_DEPTH: usize = 16;

/// A deserialized Clarity value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClarityValue {
    Int(i128),
    UInt(u128),
    Bool(bool),
    Buffer(Vec<u8>),
    /// Standard principal: address version byte + hash160.
    Principal { version: u8, hash: [u8; 20] },
    /// Contract principal: standard principal + contract name.
    ContractPrincipal {
        version: u8,
        hash: [u8; 20],
        name: String,
    },
    OptionalNone,
    OptionalSome(Box<ClarityValue>),
    ResponseOk(Box<ClarityValue>),
    ResponseErr(Box<ClarityValue>),
}

/// Errors from decoding a serialized Clarity value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Input was not valid hex.
    #[error("invalid hex at byte {0}")]
    InvalidHex(usize),

    /// Serialized value ended before its payload was complete.
    #[error("truncated value: needed {needed} more bytes")]
    Truncated { needed: usize },

    /// Type prefix is valid Clarity but not supported by this client.
    #[error("unsupported clarity type prefix 0x{0:02x}")]
    Unsupported(u8),

    /// Type prefix is not defined by the serialization at all.
    #[error("unknown clarity type prefix 0x{0:02x}")]
    UnknownPrefix(u8),

    /// Wrappers nested deeper than any real probe result.
    #[error("value nesting exceeds depth limit")]
    TooDeep,

    /// Bytes left over after a complete value was read.
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),
}

impl ClarityValue {
    /// Decode a single value from a hex string, with or without a `0x`
    /// prefix. Trailing bytes are an error: probe results are exactly one
    /// value.
    pub fn from_hex(hex: &str) -> Result<Self, DecodeError> {
        let bytes = hex_to_bytes(hex)?;
        let mut cursor = Cursor::new(&bytes);
        let value = decode_value(&mut cursor, 0)?;
        if cursor.remaining() != 0 {
            return Err(DecodeError::TrailingBytes(cursor.remaining()));
        }
        Ok(value)
    }

    /// Serialize to the hex form the API and wallets expect (`0x`-prefixed).
    pub fn to_hex(&self) -> String {
        let mut out = Vec::new();
        encode_value(self, &mut out);
        let mut hex = String::with_capacity(2 + out.len() * 2);
        hex.push_str("0x");
        for b in &out {
            hex.push_str(&format!("{:02x}", b));
        }
        hex
    }

    /// Unwrap `(ok …)` and `(some …)` layers down to the payload value.
    pub fn unwrap_ok_some(&self) -> &ClarityValue {
        match self {
            ClarityValue::ResponseOk(inner) | ClarityValue::OptionalSome(inner) => {
                inner.unwrap_ok_some()
            }
            other => other,
        }
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < n {
            return Err(DecodeError::Truncated {
                needed: n - self.remaining(),
            });
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn take_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    fn take_u32(&mut self) -> Result<u32, DecodeError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }
}

fn decode_value(cursor: &mut Cursor<'_>, depth: usize) -> Result<ClarityValue, DecodeError> {
    if depth > MAX_DEPTH {
        return Err(DecodeError::TooDeep);
    }

    let prefix = cursor.take_u8()?;
    match prefix {
        PREFIX_INT => Ok(ClarityValue::Int(i128::from_be_bytes(
            cursor.take_array()?,
        ))),
        PREFIX_UINT => Ok(ClarityValue::UInt(u128::from_be_bytes(
            cursor.take_array()?,
        ))),
        PREFIX_BUFFER => {
            let len = cursor.take_u32()? as usize;
            Ok(ClarityValue::Buffer(cursor.take(len)?.to_vec()))
        }
        PREFIX_BOOL_TRUE => Ok(ClarityValue::Bool(true)),
        PREFIX_BOOL_FALSE => Ok(ClarityValue::Bool(false)),
        PREFIX_PRINCIPAL => {
            let version = cursor.take_u8()?;
            let hash = cursor.take_array()?;
            Ok(ClarityValue::Principal { version, hash })
        }
        PREFIX_CONTRACT_PRINCIPAL => {
            let version = cursor.take_u8()?;
            let hash = cursor.take_array()?;
            let name_len = cursor.take_u8()? as usize;
            let name = String::from_utf8_lossy(cursor.take(name_len)?).into_owned();
            Ok(ClarityValue::ContractPrincipal {
                version,
                hash,
                name,
            })
        }
        PREFIX_RESPONSE_OK => Ok(ClarityValue::ResponseOk(Box::new(decode_value(
            cursor,
            depth + 1,
        )?))),
        PREFIX_RESPONSE_ERR => Ok(ClarityValue::ResponseErr(Box::new(decode_value(
            cursor,
            depth + 1,
        )?))),
        PREFIX_OPTIONAL_NONE => Ok(ClarityValue::OptionalNone),
        PREFIX_OPTIONAL_SOME => Ok(ClarityValue::OptionalSome(Box::new(decode_value(
            cursor,
            depth + 1,
        )?))),
        0x0b..=0x0e => Err(DecodeError::Unsupported(prefix)),
        other => Err(DecodeError::UnknownPrefix(other)),
    }
}

fn encode_value(value: &ClarityValue, out: &mut Vec<u8>) {
    match value {
        ClarityValue::Int(i) => {
            out.push(PREFIX_INT);
            out.extend_from_slice(&i.to_be_bytes());
        }
        ClarityValue::UInt(u) => {
            out.push(PREFIX_UINT);
            out.extend_from_slice(&u.to_be_bytes());
        }
        ClarityValue::Buffer(bytes) => {
            out.push(PREFIX_BUFFER);
            out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
            out.extend_from_slice(bytes);
        }
        ClarityValue::Bool(true) => out.push(PREFIX_BOOL_TRUE),
        ClarityValue::Bool(false) => out.push(PREFIX_BOOL_FALSE),
        ClarityValue::Principal { version, hash } => {
            out.push(PREFIX_PRINCIPAL);
            out.push(*version);
            out.extend_from_slice(hash);
        }
        ClarityValue::ContractPrincipal {
            version,
            hash,
            name,
        } => {
            out.push(PREFIX_CONTRACT_PRINCIPAL);
            out.push(*version);
            out.extend_from_slice(hash);
            out.push(name.len() as u8);
            out.extend_from_slice(name.as_bytes());
        }
        ClarityValue::OptionalNone => out.push(PREFIX_OPTIONAL_NONE),
        ClarityValue::OptionalSome(inner) => {
            out.push(PREFIX_OPTIONAL_SOME);
            encode_value(inner, out);
        }
        ClarityValue::ResponseOk(inner) => {
            out.push(PREFIX_RESPONSE_OK);
            encode_value(inner, out);
        }
        ClarityValue::ResponseErr(inner) => {
            out.push(PREFIX_RESPONSE_ERR);
            encode_value(inner, out);
        }
    }
}

fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, DecodeError> {
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    if hex.len() % 2 != 0 {
        return Err(DecodeError::InvalidHex(hex.len()));
    }
    let mut out = Vec::with_capacity(hex.len() / 2);
    for i in (0..hex.len()).step_by(2) {
        let byte = u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|_| DecodeError::InvalidHex(i / 2))?;
        out.push(byte);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_uint() {
        let value = ClarityValue::from_hex("0x0100000000000000000000000000000005").unwrap();
        assert_eq!(value, ClarityValue::UInt(5));
    }

    #[test]
    fn test_decode_bool() {
        assert_eq!(ClarityValue::from_hex("0x03").unwrap(), ClarityValue::Bool(true));
        assert_eq!(ClarityValue::from_hex("04").unwrap(), ClarityValue::Bool(false));
    }

    #[test]
    fn test_decode_ok_wrapped_uint() {
        // (ok u144)
        let value = ClarityValue::from_hex("0x070100000000000000000000000000000090").unwrap();
        assert_eq!(
            value,
            ClarityValue::ResponseOk(Box::new(ClarityValue::UInt(144)))
        );
        assert_eq!(value.unwrap_ok_some(), &ClarityValue::UInt(144));
    }

    #[test]
    fn test_decode_optional_none() {
        assert_eq!(
            ClarityValue::from_hex("0x09").unwrap(),
            ClarityValue::OptionalNone
        );
    }

    #[test]
    fn test_roundtrip_uint_arg() {
        let value = ClarityValue::UInt(50_000_000);
        let hex = value.to_hex();
        assert_eq!(ClarityValue::from_hex(&hex).unwrap(), value);
    }

    #[test]
    fn test_roundtrip_nested() {
        let value = ClarityValue::OptionalSome(Box::new(ClarityValue::ResponseOk(Box::new(
            ClarityValue::Int(-42),
        ))));
        assert_eq!(ClarityValue::from_hex(&value.to_hex()).unwrap(), value);
    }

    #[test]
    fn test_roundtrip_principal() {
        let value = ClarityValue::Principal {
            version: 22,
            hash: [0xab; 20],
        };
        assert_eq!(ClarityValue::from_hex(&value.to_hex()).unwrap(), value);
    }

    #[test]
    fn test_truncated_uint() {
        let err = ClarityValue::from_hex("0x0100ff").unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { .. }));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let err = ClarityValue::from_hex("0x0303").unwrap_err();
        assert_eq!(err, DecodeError::TrailingBytes(1));
    }

    #[test]
    fn test_unsupported_list() {
        let err = ClarityValue::from_hex("0x0b00000000").unwrap_err();
        assert_eq!(err, DecodeError::Unsupported(0x0b));
    }

    #[test]
    fn test_invalid_hex() {
        assert!(ClarityValue::from_hex("0xzz").is_err());
        assert!(ClarityValue::from_hex("0x0").is_err());
    }
}
