//! Protocol name header

use std::{
    fmt::Display,
    io::{self, Read, Write},
};

use crate::common::{Decodable, Encodable, ErrorKind};

pub const PROTOCOL_NAME: &str = "MQTT";

/// `PROTOCOL_NAME` with its big-endian length prefix, as it appears on the wire
pub const PROTOCOL_NAME_BYTES: [u8; 6] = [0x00, 0x04, b'M', b'Q', b'T', b'T'];

/// Protocol name in `CONNECT`, always `"MQTT"` in v3.1.1
#[derive(Debug, Eq, PartialEq, Copy, Clone, Default)]
pub struct ProtocolName;

impl ProtocolName {
    pub fn as_str(&self) -> &'static str {
        PROTOCOL_NAME
    }
}

impl Encodable for ProtocolName {
    fn encode<W: Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        writer.write_all(&PROTOCOL_NAME_BYTES)
    }

    fn encoded_length(&self) -> u32 {
        PROTOCOL_NAME_BYTES.len() as u32
    }
}

impl Decodable for ProtocolName {
    type Error = ProtocolNameError;
    type Cond = ();

    fn decode_with<R: Read>(reader: &mut R, _rest: ()) -> Result<Self, Self::Error> {
        let mut buf = [0u8; 6];
        reader.read_exact(&mut buf)?;
        if buf != PROTOCOL_NAME_BYTES {
            return Err(ProtocolNameError::InvalidProtocolName(buf));
        }
        Ok(ProtocolName)
    }
}

impl Display for ProtocolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", PROTOCOL_NAME)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProtocolNameError {
    #[error(transparent)]
    IoError(#[from] io::Error),
    #[error("invalid protocol name ({0:02X?})")]
    InvalidProtocolName([u8; 6]),
}

impl ProtocolNameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProtocolNameError::IoError(_) => ErrorKind::Structural,
            ProtocolNameError::InvalidProtocolName(_) => ErrorKind::ProtocolViolation,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_protocol_name() {
        let (name, rest) = ProtocolName::decode_slice(b"\x00\x04MQTT\x04").unwrap();
        assert_eq!(name.as_str(), "MQTT");
        assert_eq!(rest, b"\x04");
        assert_eq!(name.to_bytes().unwrap(), PROTOCOL_NAME_BYTES.to_vec());
    }

    #[test]
    fn test_invalid_protocol_name() {
        for stream in [
            &b"\x00\x04MQTt"[..],
            &b"\x00\x06MQIsdp"[..],
            &b"\x00\x03MQTT"[..],
        ] {
            let err = ProtocolName::decode_slice(stream).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ProtocolViolation, "{stream:?}");
        }
    }

    #[test]
    fn test_truncated_protocol_name() {
        let err = ProtocolName::decode_slice(b"\x00\x04MQ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);
    }
}
