//! Fixed header in MQTT

use std::{
    fmt::Display,
    io::{self, Read, Write},
};

use byteorder::{ReadBytesExt, WriteBytesExt};
#[cfg(feature = "parse")]
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::common::{
    bits::{get_bit, set_bit},
    remaining_length::MAX_REMAINING_LENGTH,
    Decodable, Encodable, ErrorKind, QualityOfService, RemainingLength, RemainingLengthError,
};

use super::PacketType;

const DUP_BIT: u8 = 3;
const QOS_HIGH_BIT: u8 = 2;
const QOS_LOW_BIT: u8 = 1;
const RETAIN_BIT: u8 = 0;

/// Fixed header for each MQTT control packet
///
/// Format:
///
/// ```plain
/// 7                          3     2     1       0
/// +--------------------------+-----+-----------+--------+
/// | MQTT Control Packet Type | DUP | QoS level | RETAIN |
/// +--------------------------+-----+-----------+--------+
/// | Remaining Length ...                                |
/// +-----------------------------------------------------+
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FixedHeader {
    /// Packet Type
    pub packet_type: PacketType,

    /// Duplicate delivery, only meaningful for `PUBLISH`
    pub dup: bool,

    pub qos: QualityOfService,

    pub retain: bool,

    /// The Remaining Length is the number of bytes remaining within the current packet,
    /// including data in the variable header and the payload. The Remaining Length does
    /// not include the bytes used to encode the Remaining Length.
    pub remaining_length: u32,
}

impl FixedHeader {
    /// Creates a header with the flag bits `packet_type` requires
    ///
    /// Encoding fails if `remaining_length` is above 268,435,455.
    pub fn new(packet_type: PacketType, remaining_length: u32) -> Self {
        let mut header = Self {
            packet_type,
            dup: false,
            qos: QualityOfService::Level0,
            retain: false,
            remaining_length,
        };
        header.set_flags(packet_type.default_flags());
        header
    }

    /// The low nibble of the first byte
    pub fn flags(&self) -> u8 {
        let (qos_high, qos_low) = self.qos.to_bits();

        let mut flags = 0;
        flags = set_bit(flags, DUP_BIT, self.dup);
        flags = set_bit(flags, QOS_HIGH_BIT, qos_high);
        flags = set_bit(flags, QOS_LOW_BIT, qos_low);
        flags = set_bit(flags, RETAIN_BIT, self.retain);
        flags
    }

    fn set_flags(&mut self, flags: u8) {
        self.dup = get_bit(flags, DUP_BIT);
        // default flags never carry the reserved QoS
        self.qos = QualityOfService::from_bits(
            get_bit(flags, QOS_HIGH_BIT),
            get_bit(flags, QOS_LOW_BIT),
        )
        .unwrap_or_default();
        self.retain = get_bit(flags, RETAIN_BIT);
    }

    /// Whether the flag bits are the ones MQTT v3.1.1 mandates for this packet type. `PUBLISH`
    /// uses them as real flags, so any value is accepted there.
    pub fn has_default_flags(&self) -> bool {
        match self.packet_type {
            PacketType::Publish => true,
            packet_type => self.flags() == packet_type.default_flags(),
        }
    }

    /// Decodes a fixed header from the front of `buf`, returning it with the bytes after it.
    pub fn from_slice(buf: &[u8]) -> Result<(Self, &[u8]), FixedHeaderError> {
        if buf.len() < 2 {
            return Err(FixedHeaderError::TooShort(buf.len()));
        }
        Self::decode_slice(buf)
    }

    fn from_parts(type_val: u8, remaining_length: u32) -> Result<Self, FixedHeaderError> {
        let qos = QualityOfService::from_bits(
            get_bit(type_val, QOS_HIGH_BIT),
            get_bit(type_val, QOS_LOW_BIT),
        )
        .map_err(|_| FixedHeaderError::ReservedQoS)?;

        Ok(Self {
            packet_type: PacketType::from_nibble(type_val >> 4),
            dup: get_bit(type_val, DUP_BIT),
            qos,
            retain: get_bit(type_val, RETAIN_BIT),
            remaining_length,
        })
    }

    /// Asynchronously parse a single fixed header from an AsyncRead type, such as a network
    /// socket.
    #[cfg(feature = "parse")]
    pub async fn parse<A: AsyncRead + Unpin>(rdr: &mut A) -> Result<Self, FixedHeaderError> {
        let type_val = rdr.read_u8().await?;

        let mut remaining_len = 0u32;
        let mut multiplier = 1u32;
        let mut terminated = false;
        for _ in 0..crate::common::remaining_length::MAX_ENCODED_BYTES {
            let byte = rdr.read_u8().await?;
            remaining_len += u32::from(byte & 0x7F) * multiplier;
            if byte & 0x80 == 0 {
                terminated = true;
                break;
            }
            multiplier *= 128;
        }

        if !terminated {
            return Err(RemainingLengthError::Malformed.into());
        }

        Self::from_parts(type_val, remaining_len)
    }
}

impl Encodable for FixedHeader {
    fn encode<W: Write>(&self, wr: &mut W) -> Result<(), io::Error> {
        if self.remaining_length > MAX_REMAINING_LENGTH {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                RemainingLengthError::TooLarge(self.remaining_length),
            ));
        }

        wr.write_u8(self.packet_type.to_nibble() << 4 | self.flags())?;
        RemainingLength(self.remaining_length).encode(wr)
    }

    fn encoded_length(&self) -> u32 {
        1 + RemainingLength::encoded_length_of(self.remaining_length)
    }
}

impl Decodable for FixedHeader {
    type Error = FixedHeaderError;
    type Cond = ();

    fn decode_with<R: Read>(rdr: &mut R, _rest: ()) -> Result<Self, Self::Error> {
        let type_val = rdr.read_u8()?;
        let RemainingLength(remaining_len) = RemainingLength::decode(rdr)?;

        Self::from_parts(type_val, remaining_len)
    }
}

impl Display for FixedHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{packet_type: {}, dup: {}, qos: {}, retain: {}, remaining_length: {}}}",
            self.packet_type, self.dup, self.qos, self.retain, self.remaining_length
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FixedHeaderError {
    #[error("fixed header needs at least 2 bytes, got {0}")]
    TooShort(usize),
    #[error("reserved QoS in fixed header")]
    ReservedQoS,
    #[error(transparent)]
    RemainingLengthError(#[from] RemainingLengthError),
    #[error(transparent)]
    IoError(#[from] io::Error),
}

impl FixedHeaderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FixedHeaderError::ReservedQoS => ErrorKind::ProtocolViolation,
            _ => ErrorKind::Structural,
        }
    }

    /// The input ended before the header did; more bytes may complete it
    pub fn is_incomplete(&self) -> bool {
        let io_err = match self {
            FixedHeaderError::IoError(err) => err,
            FixedHeaderError::RemainingLengthError(RemainingLengthError::IoError(err)) => err,
            _ => return false,
        };
        io_err.kind() == io::ErrorKind::UnexpectedEof
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_encode_fixed_header() {
        let header = FixedHeader::new(PacketType::Connect, 321);
        let mut buf = Vec::new();
        header.encode(&mut buf).unwrap();

        let expected = b"\x10\xc1\x02";
        assert_eq!(&expected[..], &buf[..]);
        assert_eq!(header.encoded_length(), 3);
    }

    #[test]
    fn test_decode_fixed_header() {
        let stream = b"\x10\xc1\x02";
        let mut cursor = Cursor::new(&stream[..]);
        let header = FixedHeader::decode(&mut cursor).unwrap();
        assert_eq!(header.packet_type, PacketType::Connect);
        assert_eq!(header.remaining_length, 321);
        assert!(!header.dup);
        assert_eq!(header.qos, QualityOfService::Level0);
        assert!(!header.retain);
    }

    #[test]
    fn test_decode_flag_bits() {
        // PUBLISH, dup, QoS 2, retain
        let (header, rest) = FixedHeader::from_slice(b"\x3d\x00\xff").unwrap();
        assert_eq!(header.packet_type, PacketType::Publish);
        assert!(header.dup);
        assert_eq!(header.qos, QualityOfService::Level2);
        assert!(header.retain);
        assert_eq!(header.remaining_length, 0);
        assert_eq!(rest, b"\xff");

        // QoS 1 is the low bit
        let (header, _) = FixedHeader::from_slice(b"\x32\x00").unwrap();
        assert_eq!(header.qos, QualityOfService::Level1);
        assert!(!header.dup && !header.retain);
    }

    #[test]
    fn test_decode_reserved_qos() {
        let err = FixedHeader::from_slice(b"\x36\x00").unwrap_err();
        assert!(matches!(err, FixedHeaderError::ReservedQoS));
        assert_eq!(err.kind(), ErrorKind::ProtocolViolation);
    }

    #[test]
    fn test_decode_too_short() {
        for stream in [&b""[..], &b"\x10"[..]] {
            let err = FixedHeader::from_slice(stream).unwrap_err();
            assert!(matches!(err, FixedHeaderError::TooShort(n) if n == stream.len()));
            assert_eq!(err.kind(), ErrorKind::Structural);
        }
    }

    #[test]
    fn test_decode_too_long_fixed_header() {
        let stream = b"\x10\x80\x80\x80\x80\x02";
        let err = FixedHeader::from_slice(&stream[..]).unwrap_err();
        assert!(matches!(
            err,
            FixedHeaderError::RemainingLengthError(RemainingLengthError::Malformed)
        ));
        assert_eq!(err.kind(), ErrorKind::Structural);
        assert!(!err.is_incomplete());
    }

    #[test]
    fn test_decode_truncated_remaining_length() {
        let err = FixedHeader::from_slice(b"\x10\x80").unwrap_err();
        assert!(err.is_incomplete());
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn test_decode_reserved_packet_type() {
        let (header, _) = FixedHeader::from_slice(b"\xf0\x00").unwrap();
        assert_eq!(header.packet_type, PacketType::Reserved15);
        let (header, _) = FixedHeader::from_slice(b"\x00\x00").unwrap();
        assert_eq!(header.packet_type, PacketType::Reserved0);
    }

    #[test]
    fn test_round_trip() {
        let qos_levels = [
            QualityOfService::Level0,
            QualityOfService::Level1,
            QualityOfService::Level2,
        ];

        for type_val in 0..16u8 {
            for qos in qos_levels {
                for (dup, retain) in [(false, false), (true, false), (false, true), (true, true)] {
                    for remaining_length in [0, 127, 128, 16_384, MAX_REMAINING_LENGTH] {
                        let header = FixedHeader {
                            packet_type: PacketType::from_nibble(type_val),
                            dup,
                            qos,
                            retain,
                            remaining_length,
                        };
                        let buf = header.to_bytes().unwrap();
                        assert_eq!(buf.len() as u32, header.encoded_length());

                        let (decoded, rest) = FixedHeader::from_slice(&buf).unwrap();
                        assert_eq!(decoded, header);
                        assert!(rest.is_empty());
                    }
                }
            }
        }
    }

    #[test]
    fn test_round_trip_every_packet_type() {
        let packet_types = [
            PacketType::Reserved0,
            PacketType::Connect,
            PacketType::ConnectAcknowledgement,
            PacketType::Publish,
            PacketType::PublishAcknowledgement,
            PacketType::PublishReceived,
            PacketType::PublishRelease,
            PacketType::PublishComplete,
            PacketType::Subscribe,
            PacketType::SubscribeAcknowledgement,
            PacketType::Unsubscribe,
            PacketType::UnsubscribeAcknowledgement,
            PacketType::PingRequest,
            PacketType::PingResponse,
            PacketType::Disconnect,
            PacketType::Reserved15,
        ];

        for (nibble, packet_type) in packet_types.into_iter().enumerate() {
            assert_eq!(packet_type.to_nibble() as usize, nibble);

            let header = FixedHeader::new(packet_type, 2);
            let buf = header.to_bytes().unwrap();
            let (decoded, _) = FixedHeader::from_slice(&buf).unwrap();
            assert_eq!(decoded, header);
        }
    }

    #[test]
    fn test_encode_too_large_writes_nothing() {
        let header = FixedHeader::new(PacketType::Connect, MAX_REMAINING_LENGTH + 1);
        let mut buf = Vec::new();
        let err = header.encode(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_default_flags() {
        let header = FixedHeader::new(PacketType::Subscribe, 0);
        assert_eq!(header.qos, QualityOfService::Level1);
        assert_eq!(header.to_bytes().unwrap(), b"\x82\x00");
        assert!(header.has_default_flags());

        let (header, _) = FixedHeader::from_slice(b"\x12\x00").unwrap();
        assert!(!header.has_default_flags());

        let (header, _) = FixedHeader::from_slice(b"\x3b\x00").unwrap();
        assert!(header.has_default_flags());
    }

    #[test]
    fn test_display_fixed_header() {
        let header = FixedHeader::new(PacketType::Connect, 321);

        assert_eq!(
            header.to_string(),
            "{packet_type: CONNECT, dup: false, qos: 0, retain: false, remaining_length: 321}"
        );
    }

    #[cfg(feature = "parse")]
    #[tokio::test]
    async fn test_parse_fixed_header() {
        let mut stream = &b"\x10\xc1\x02\xaa"[..];
        let header = FixedHeader::parse(&mut stream).await.unwrap();
        assert_eq!(header, FixedHeader::new(PacketType::Connect, 321));
        assert_eq!(stream, b"\xaa");

        let mut stream = &b"\x10\x80\x80\x80\x80\x02"[..];
        let err = FixedHeader::parse(&mut stream).await.unwrap_err();
        assert!(matches!(
            err,
            FixedHeaderError::RemainingLengthError(RemainingLengthError::Malformed)
        ));

        let mut stream = &b"\x36\x00"[..];
        let err = FixedHeader::parse(&mut stream).await.unwrap_err();
        assert!(matches!(err, FixedHeaderError::ReservedQoS));
    }
}
