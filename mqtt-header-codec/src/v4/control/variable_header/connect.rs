//! CONNECT variable header

use std::{
    fmt::Display,
    io::{self, Read, Write},
};

use crate::{
    common::{
        ConnectFlags, ConnectFlagsPolicy, Decodable, Encodable, KeepAlive, ProtocolLevel,
        ProtocolName,
    },
    v4::control::{FixedHeader, PacketType},
};

use super::VariableHeaderError;

/// Variable header of `CONNECT`
///
/// ```plain
/// +------+------+-----+-----+-----+-----+----------------+---------------+------------+------------+
/// | 0x00 | 0x04 | 'M' | 'Q' | 'T' | 'T' | Protocol Level | Connect Flags | Keep Alive | Keep Alive |
/// |      |      |     |     |     |     |     (0x04)     |               |    MSB     |    LSB     |
/// +------+------+-----+-----+-----+-----+----------------+---------------+------------+------------+
/// ```
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct ConnectVariableHeader {
    pub protocol_name: ProtocolName,
    pub protocol_level: ProtocolLevel,
    pub flags: ConnectFlags,
    pub keep_alive: KeepAlive,
}

impl ConnectVariableHeader {
    pub fn new(flags: ConnectFlags, keep_alive: u16) -> Self {
        Self {
            protocol_name: ProtocolName,
            protocol_level: ProtocolLevel::Version311,
            flags,
            keep_alive: KeepAlive(keep_alive),
        }
    }

    /// Decodes the variable header that follows `fixed_header`, accepting only the connect
    /// flags of [`ConnectFlagsPolicy::Restricted`].
    pub fn from_slice<'a>(
        fixed_header: &FixedHeader,
        buf: &'a [u8],
    ) -> Result<(Self, &'a [u8]), VariableHeaderError> {
        Self::from_slice_with(fixed_header, buf, ConnectFlagsPolicy::Restricted)
    }

    pub fn from_slice_with<'a>(
        fixed_header: &FixedHeader,
        buf: &'a [u8],
        policy: ConnectFlagsPolicy,
    ) -> Result<(Self, &'a [u8]), VariableHeaderError> {
        Self::decode_slice_with(buf, (*fixed_header, policy))
    }
}

impl Encodable for ConnectVariableHeader {
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.protocol_name.encode(writer)?;
        self.protocol_level.encode(writer)?;
        self.flags.encode(writer)?;
        self.keep_alive.encode(writer)
    }

    fn encoded_length(&self) -> u32 {
        self.protocol_name.encoded_length()
            + self.protocol_level.encoded_length()
            + self.flags.encoded_length()
            + self.keep_alive.encoded_length()
    }
}

impl Decodable for ConnectVariableHeader {
    type Error = VariableHeaderError;
    type Cond = (FixedHeader, ConnectFlagsPolicy);

    fn decode_with<R: Read>(
        reader: &mut R,
        (fixed_header, policy): Self::Cond,
    ) -> Result<Self, Self::Error> {
        if fixed_header.packet_type != PacketType::Connect {
            return Err(VariableHeaderError::UnexpectedPacketType {
                expected: PacketType::Connect,
                got: fixed_header.packet_type,
            });
        }

        let protocol_name: ProtocolName = Decodable::decode(reader)?;
        let protocol_level: ProtocolLevel = Decodable::decode(reader)?;
        if protocol_level != ProtocolLevel::Version311 {
            return Err(VariableHeaderError::UnsupportedProtocolLevel(protocol_level));
        }
        let flags = ConnectFlags::decode_with(reader, policy)?;
        let keep_alive: KeepAlive = Decodable::decode(reader)?;

        Ok(Self {
            protocol_name,
            protocol_level,
            flags,
            keep_alive,
        })
    }
}

impl Display for ConnectVariableHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{protocol_name: {}, protocol_level: {}, flags: {}, keep_alive: {}}}",
            self.protocol_name, self.protocol_level, self.flags, self.keep_alive
        )
    }
}
