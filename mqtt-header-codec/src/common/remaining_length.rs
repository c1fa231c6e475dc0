//! Remaining Length, the variable length integer that closes every fixed header

use std::{
    fmt::Display,
    io::{self, Read, Write},
};

use byteorder::{ReadBytesExt, WriteBytesExt};

use crate::common::{Decodable, Encodable, ErrorKind};

/// Largest value a Remaining Length can carry (`0xFF, 0xFF, 0xFF, 0x7F` on the wire)
pub const MAX_REMAINING_LENGTH: u32 = 268_435_455;

/// Upper bound on the number of bytes a Remaining Length takes on the wire
pub const MAX_ENCODED_BYTES: usize = 4;

/// Remaining Length
///
/// Each byte carries a base-128 digit in its low 7 bits, least significant digit first. The high
/// bit says whether another byte follows.
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Default)]
pub struct RemainingLength(pub u32);

impl RemainingLength {
    pub fn new(value: u32) -> Result<Self, RemainingLengthError> {
        if value > MAX_REMAINING_LENGTH {
            return Err(RemainingLengthError::TooLarge(value));
        }
        Ok(Self(value))
    }

    /// Number of bytes `value` takes once encoded
    #[inline]
    pub const fn encoded_length_of(value: u32) -> u32 {
        if value >= 2_097_152 {
            4
        } else if value >= 16_384 {
            3
        } else if value >= 128 {
            2
        } else {
            1
        }
    }
}

impl Encodable for RemainingLength {
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        if self.0 > MAX_REMAINING_LENGTH {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                RemainingLengthError::TooLarge(self.0),
            ));
        }

        let mut value = self.0;
        loop {
            let mut byte = (value % 128) as u8;
            value /= 128;
            if value > 0 {
                byte |= 0x80;
            }
            writer.write_u8(byte)?;
            if value == 0 {
                break;
            }
        }
        Ok(())
    }

    fn encoded_length(&self) -> u32 {
        Self::encoded_length_of(self.0)
    }
}

impl Decodable for RemainingLength {
    type Error = RemainingLengthError;
    type Cond = ();

    fn decode_with<R: Read>(reader: &mut R, _cond: Self::Cond) -> Result<Self, Self::Error> {
        let mut value = 0u32;
        let mut multiplier = 1u32;
        for _ in 0..MAX_ENCODED_BYTES {
            let byte = reader.read_u8()?;
            value += u32::from(byte & 0x7F) * multiplier;
            if byte & 0x80 == 0 {
                return Ok(Self(value));
            }
            multiplier *= 128;
        }
        Err(RemainingLengthError::Malformed)
    }
}

impl Display for RemainingLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Decodes a Remaining Length from the front of `buf`, returning the value and the number of
/// bytes it took.
pub fn decode_remaining_length(buf: &[u8]) -> Result<(u32, usize), RemainingLengthError> {
    let (RemainingLength(value), rest) = RemainingLength::decode_slice(buf)?;
    Ok((value, buf.len() - rest.len()))
}

/// Encodes `value` as a Remaining Length.
pub fn encode_remaining_length(value: u32) -> Result<Vec<u8>, RemainingLengthError> {
    let length = RemainingLength::new(value)?;
    let mut buf = Vec::with_capacity(length.encoded_length() as usize);
    length.encode(&mut buf)?;
    Ok(buf)
}

#[derive(Debug, thiserror::Error)]
pub enum RemainingLengthError {
    #[error("malformed remaining length")]
    Malformed,
    #[error("remaining length {0} exceeds 268435455")]
    TooLarge(u32),
    #[error(transparent)]
    IoError(#[from] io::Error),
}

impl RemainingLengthError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Structural
    }
}
