//! Framing over a byte stream with [`tokio_util::codec`]

use std::io;

use bytes::{Buf as _, BufMut as _, Bytes, BytesMut};
use tokio_util::codec;

use crate::{
    common::{remaining_length::MAX_REMAINING_LENGTH, ConnectFlagsPolicy, Encodable},
    v4::{
        control::{FixedHeader, FixedHeaderError},
        header::{decode_variable_header, HeaderError, VariableHeader},
    },
};

/// One packet split into its headers and the opaque payload that follows them
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Frame {
    pub fixed_header: FixedHeader,
    pub variable_header: VariableHeader,
    pub payload: Bytes,
}

impl Frame {
    /// Builds a frame whose fixed header fits `variable_header` and `payload`
    pub fn new(variable_header: VariableHeader, payload: impl Into<Bytes>) -> io::Result<Self> {
        let payload = payload.into();
        let remaining_length = remaining_length_of(&variable_header, payload.len())?;
        Ok(Self {
            fixed_header: FixedHeader::new(variable_header.packet_type(), remaining_length),
            variable_header,
            payload,
        })
    }
}

fn remaining_length_of(variable_header: &VariableHeader, payload_len: usize) -> io::Result<u32> {
    let length = (variable_header.encoded_length() as usize).saturating_add(payload_len);
    u32::try_from(length)
        .ok()
        .filter(|length| *length <= MAX_REMAINING_LENGTH)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("packet of {length} bytes exceeds {MAX_REMAINING_LENGTH}"),
            )
        })
}

enum DecodeState {
    Start,
    Packet(FixedHeader),
}

pub struct HeaderCodec {
    state: DecodeState,
    max_packet_size: u32,
    policy: ConnectFlagsPolicy,
}

impl HeaderCodec {
    pub const fn new() -> Self {
        HeaderCodec {
            state: DecodeState::Start,
            max_packet_size: MAX_REMAINING_LENGTH,
            policy: ConnectFlagsPolicy::Restricted,
        }
    }

    /// Rejects packets whose remaining length is above `max_packet_size`
    pub fn with_max_packet_size(mut self, max_packet_size: u32) -> Self {
        self.max_packet_size = max_packet_size;
        self
    }

    pub fn with_policy(mut self, policy: ConnectFlagsPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for HeaderCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl codec::Decoder for HeaderCodec {
    type Item = Frame;
    type Error = HeaderError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            match self.state {
                DecodeState::Start => {
                    let (fixed_header, header_size) = match FixedHeader::from_slice(&src[..]) {
                        Ok((fixed_header, rest)) => (fixed_header, src.len() - rest.len()),
                        Err(FixedHeaderError::TooShort(_)) => return Ok(None),
                        Err(err) if err.is_incomplete() => return Ok(None),
                        Err(err) => return Err(err.into()),
                    };

                    if fixed_header.remaining_length > self.max_packet_size {
                        debug!(
                            "reject packet of {} bytes, max {}",
                            fixed_header.remaining_length, self.max_packet_size
                        );
                        return Err(HeaderError::PacketTooLarge {
                            size: fixed_header.remaining_length,
                            max: self.max_packet_size,
                        });
                    }

                    trace!("decoded fixed header {}", fixed_header);
                    src.advance(header_size);
                    self.state = DecodeState::Packet(fixed_header);
                }
                DecodeState::Packet(fixed_header) => {
                    let length = fixed_header.remaining_length as usize;
                    if src.remaining() < length {
                        src.reserve(length - src.remaining());
                        return Ok(None);
                    }

                    self.state = DecodeState::Start;

                    let body = src.split_to(length).freeze();
                    let (variable_header, rest) =
                        decode_variable_header(&fixed_header, &body, self.policy)?;
                    let payload = body.slice(length - rest.len()..);

                    return Ok(Some(Frame {
                        fixed_header,
                        variable_header,
                        payload,
                    }));
                }
            }
        }
    }
}

impl codec::Encoder<Frame> for HeaderCodec {
    type Error = io::Error;

    fn encode(&mut self, frame: Frame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let remaining_length = remaining_length_of(&frame.variable_header, frame.payload.len())?;
        let fixed_header = FixedHeader {
            packet_type: frame.variable_header.packet_type(),
            remaining_length,
            ..frame.fixed_header
        };

        dst.reserve((fixed_header.encoded_length() + remaining_length) as usize);
        let mut writer = dst.writer();
        fixed_header.encode(&mut writer)?;
        frame.variable_header.encode(&mut writer)?;
        dst.put_slice(&frame.payload);
        Ok(())
    }
}
