//! Keep Alive, the last two bytes of the `CONNECT` variable header

use std::{
    fmt::Display,
    io::{self, Read, Write},
};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::common::{Decodable, Encodable};

/// Longest interval between two control packets from the client, in seconds
///
/// Sent big endian. `0` turns the mechanism off.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Default)]
pub struct KeepAlive(pub u16);

impl KeepAlive {
    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.0 == 0
    }
}

impl Encodable for KeepAlive {
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u16::<BigEndian>(self.0)
    }

    fn encoded_length(&self) -> u32 {
        2
    }
}

impl Decodable for KeepAlive {
    type Error = io::Error;
    type Cond = ();

    fn decode_with<R: Read>(reader: &mut R, _cond: ()) -> Result<Self, Self::Error> {
        Ok(KeepAlive(reader.read_u16::<BigEndian>()?))
    }
}

impl Display for KeepAlive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_disabled() {
            write!(f, "disabled")
        } else {
            write!(f, "{}s", self.0)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_keep_alive_big_endian() {
        assert_eq!(KeepAlive(0x013c).to_bytes().unwrap(), b"\x01\x3c");

        let (keep_alive, rest) = KeepAlive::decode_slice(b"\x00\x0a\xff").unwrap();
        assert_eq!(keep_alive, KeepAlive(10));
        assert_eq!(rest, b"\xff");
    }

    #[test]
    fn test_keep_alive_truncated() {
        let err = KeepAlive::decode_slice(b"\x00").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_keep_alive_display() {
        assert_eq!(KeepAlive(60).to_string(), "60s");
        assert_eq!(KeepAlive(0).to_string(), "disabled");
        assert!(KeepAlive::default().is_disabled());
    }
}
