//! CONNACK variable header

use std::{
    fmt::Display,
    io::{self, Read, Write},
};

use crate::{
    common::{ConnackFlags, Decodable, Encodable},
    v4::control::{FixedHeader, PacketType},
};

use super::{ConnectReturnCode, VariableHeaderError};

/// Variable header of `CONNACK`: the session present flag, then the return code
#[derive(Debug, Eq, PartialEq, Copy, Clone, Default)]
pub struct ConnAckVariableHeader {
    pub session_present: bool,
    pub return_code: ConnectReturnCode,
}

impl ConnAckVariableHeader {
    pub fn new(session_present: bool, return_code: ConnectReturnCode) -> Self {
        Self {
            session_present,
            return_code,
        }
    }

    pub fn from_slice<'a>(
        fixed_header: &FixedHeader,
        buf: &'a [u8],
    ) -> Result<(Self, &'a [u8]), VariableHeaderError> {
        Self::decode_slice_with(buf, *fixed_header)
    }
}

impl Encodable for ConnAckVariableHeader {
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        ConnackFlags {
            session_present: self.session_present,
        }
        .encode(writer)?;
        self.return_code.encode(writer)
    }

    fn encoded_length(&self) -> u32 {
        2
    }
}

impl Decodable for ConnAckVariableHeader {
    type Error = VariableHeaderError;
    type Cond = FixedHeader;

    fn decode_with<R: Read>(
        reader: &mut R,
        fixed_header: FixedHeader,
    ) -> Result<Self, Self::Error> {
        if fixed_header.packet_type != PacketType::ConnectAcknowledgement {
            return Err(VariableHeaderError::UnexpectedPacketType {
                expected: PacketType::ConnectAcknowledgement,
                got: fixed_header.packet_type,
            });
        }

        let flags: ConnackFlags = Decodable::decode(reader)?;
        let return_code: ConnectReturnCode = Decodable::decode(reader)?;

        Ok(Self {
            session_present: flags.session_present,
            return_code,
        })
    }
}

impl Display for ConnAckVariableHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{session_present: {}, return_code: {}}}",
            self.session_present, self.return_code
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::common::ErrorKind;

    #[test]
    fn test_connack_encode() {
        let header = ConnAckVariableHeader::new(true, ConnectReturnCode::ConnectionAccepted);
        assert_eq!(header.to_bytes().unwrap(), vec![0x01, 0x00]);

        let header = ConnAckVariableHeader::new(false, ConnectReturnCode::from(0x05));
        assert_eq!(header.to_bytes().unwrap(), vec![0x00, 0x05]);
    }

    #[test]
    fn test_connack_decode() {
        let fixed_header = FixedHeader::new(PacketType::ConnectAcknowledgement, 2);
        let (header, rest) = ConnAckVariableHeader::from_slice(&fixed_header, b"\x01\x02").unwrap();
        assert!(header.session_present);
        assert_eq!(header.return_code, ConnectReturnCode::IdentifierRejected);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_connack_decode_errors() {
        let fixed_header = FixedHeader::new(PacketType::ConnectAcknowledgement, 2);
        let err = ConnAckVariableHeader::from_slice(&fixed_header, b"\x03\x00").unwrap_err();
        assert!(matches!(err, VariableHeaderError::ConnackFlagsError(_)));
        assert_eq!(err.kind(), ErrorKind::ProtocolViolation);

        let err = ConnAckVariableHeader::from_slice(&fixed_header, b"\x01").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structural);

        let fixed_header = FixedHeader::new(PacketType::Connect, 2);
        let err = ConnAckVariableHeader::from_slice(&fixed_header, b"\x01\x00").unwrap_err();
        assert!(matches!(err, VariableHeaderError::UnexpectedPacketType { .. }));
    }
}
