//! Two stage header decoding: the fixed header, then the variable header its packet type selects

use std::{
    fmt::Display,
    io::{self, Write},
};

use crate::{
    common::{ConnectFlagsPolicy, Encodable, ErrorKind},
    v4::control::{
        ConnAckVariableHeader, ConnectVariableHeader, FixedHeader, FixedHeaderError, PacketType,
        VariableHeaderError,
    },
};

/// Variable headers this crate can decode
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum VariableHeader {
    Connect(ConnectVariableHeader),
    ConnAck(ConnAckVariableHeader),
}

impl VariableHeader {
    pub fn packet_type(&self) -> PacketType {
        match self {
            VariableHeader::Connect(_) => PacketType::Connect,
            VariableHeader::ConnAck(_) => PacketType::ConnectAcknowledgement,
        }
    }
}

impl Encodable for VariableHeader {
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        match self {
            VariableHeader::Connect(header) => header.encode(writer),
            VariableHeader::ConnAck(header) => header.encode(writer),
        }
    }

    fn encoded_length(&self) -> u32 {
        match self {
            VariableHeader::Connect(header) => header.encoded_length(),
            VariableHeader::ConnAck(header) => header.encoded_length(),
        }
    }
}

impl From<ConnectVariableHeader> for VariableHeader {
    fn from(header: ConnectVariableHeader) -> Self {
        VariableHeader::Connect(header)
    }
}

impl From<ConnAckVariableHeader> for VariableHeader {
    fn from(header: ConnAckVariableHeader) -> Self {
        VariableHeader::ConnAck(header)
    }
}

impl Display for VariableHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableHeader::Connect(header) => write!(f, "{}", header),
            VariableHeader::ConnAck(header) => write!(f, "{}", header),
        }
    }
}

/// Decodes the fixed header and variable header of one complete packet at the front of `buf`.
///
/// `buf` must hold the whole packet. The returned slice is what follows the variable header
/// within the packet, i.e. the payload; bytes past the end of the packet are not part of it.
/// The packet spans `fixed_header.encoded_length() + fixed_header.remaining_length` bytes.
pub fn decode_header(
    buf: &[u8],
) -> Result<(FixedHeader, VariableHeader, &[u8]), HeaderError> {
    decode_header_with(buf, ConnectFlagsPolicy::default())
}

pub fn decode_header_with(
    buf: &[u8],
    policy: ConnectFlagsPolicy,
) -> Result<(FixedHeader, VariableHeader, &[u8]), HeaderError> {
    let (fixed_header, rest) = FixedHeader::from_slice(buf).inspect_err(|_err| {
        debug!("reject fixed header: {}", _err);
    })?;
    trace!("decoded fixed header {}", fixed_header);

    let length = fixed_header.remaining_length as usize;
    let body = rest.get(..length).ok_or(HeaderError::Incomplete {
        expected: fixed_header.remaining_length,
        available: rest.len(),
    })?;

    let (variable_header, payload) = decode_variable_header(&fixed_header, body, policy)?;
    Ok((fixed_header, variable_header, payload))
}

/// Runs the variable header decoder selected by `fixed_header.packet_type` over `body`.
pub fn decode_variable_header<'a>(
    fixed_header: &FixedHeader,
    body: &'a [u8],
    policy: ConnectFlagsPolicy,
) -> Result<(VariableHeader, &'a [u8]), HeaderError> {
    let result = match fixed_header.packet_type {
        PacketType::Connect => ConnectVariableHeader::from_slice_with(fixed_header, body, policy)
            .map(|(header, rest)| (header.into(), rest)),
        PacketType::ConnectAcknowledgement => ConnAckVariableHeader::from_slice(fixed_header, body)
            .map(|(header, rest)| (header.into(), rest)),
        packet_type @ (PacketType::Reserved0 | PacketType::Reserved15) => {
            debug!("reject reserved packet type {}", packet_type);
            return Err(HeaderError::ReservedPacketType(packet_type.to_nibble()));
        }
        packet_type => {
            debug!("no variable header decoder for {}", packet_type);
            return Err(HeaderError::UnsupportedPacketType(packet_type));
        }
    };

    let (variable_header, rest) = result.inspect_err(|_err| {
        debug!("reject {} variable header: {}", fixed_header.packet_type, _err);
    })?;
    trace!("decoded variable header {}", variable_header);

    Ok((variable_header, rest))
}

#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    #[error(transparent)]
    FixedHeaderError(#[from] FixedHeaderError),
    #[error(transparent)]
    VariableHeaderError(#[from] VariableHeaderError),
    #[error("incomplete packet: remaining length {expected}, {available} bytes available")]
    Incomplete { expected: u32, available: usize },
    #[error("packet of {size} bytes exceeds maximum {max}")]
    PacketTooLarge { size: u32, max: u32 },
    #[error("reserved packet type {0}")]
    ReservedPacketType(u8),
    #[error("no variable header decoder for {0}")]
    UnsupportedPacketType(PacketType),
    /// Transport failure, or a stream that ended inside a packet
    #[cfg(feature = "tokio-codec")]
    #[error(transparent)]
    IoError(#[from] io::Error),
}

impl HeaderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HeaderError::FixedHeaderError(err) => err.kind(),
            HeaderError::VariableHeaderError(err) => err.kind(),
            HeaderError::Incomplete { .. } | HeaderError::PacketTooLarge { .. } => {
                ErrorKind::Structural
            }
            #[cfg(feature = "tokio-codec")]
            HeaderError::IoError(_) => ErrorKind::Structural,
            HeaderError::ReservedPacketType(_) => ErrorKind::ProtocolViolation,
            HeaderError::UnsupportedPacketType(_) => ErrorKind::UnsupportedFeature,
        }
    }
}
