use std::{
    error::Error,
    io::{self, Read, Write},
    marker::Sized,
};

pub trait Encodable {
    /// Encodes to writer
    fn encode<W: Write>(&self, writer: &mut W) -> io::Result<()>;
    /// Length of bytes after encoded
    fn encoded_length(&self) -> u32;

    /// Encodes into a freshly allocated buffer
    fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.encoded_length() as usize);
        self.encode(&mut buf)?;
        Ok(buf)
    }
}

/// Methods for decoding bytes to an Object according to MQTT specification
pub trait Decodable: Sized {
    type Error: Error;
    type Cond;

    /// Decodes object from reader
    fn decode<R: Read>(reader: &mut R) -> Result<Self, Self::Error>
    where
        Self::Cond: Default,
    {
        Self::decode_with(reader, Default::default())
    }

    /// Decodes object with additional data (or hints)
    fn decode_with<R: Read>(reader: &mut R, cond: Self::Cond) -> Result<Self, Self::Error>;

    /// Decodes object from the front of `buf`, returning it with the bytes it did not consume
    fn decode_slice(buf: &[u8]) -> Result<(Self, &[u8]), Self::Error>
    where
        Self::Cond: Default,
    {
        Self::decode_slice_with(buf, Default::default())
    }

    /// Like [`Decodable::decode_slice`], with additional data (or hints)
    fn decode_slice_with(buf: &[u8], cond: Self::Cond) -> Result<(Self, &[u8]), Self::Error> {
        let mut rest = buf;
        let value = Self::decode_with(&mut rest, cond)?;
        Ok((value, rest))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct Pair(u8, u8);

    impl Decodable for Pair {
        type Error = io::Error;
        type Cond = ();

        fn decode_with<R: Read>(reader: &mut R, _cond: ()) -> Result<Self, Self::Error> {
            let mut buf = [0u8; 2];
            reader.read_exact(&mut buf)?;
            Ok(Pair(buf[0], buf[1]))
        }
    }

    #[test]
    fn test_decode_slice_returns_rest() {
        let (pair, rest) = Pair::decode_slice(&[1, 2, 3, 4]).unwrap();
        assert_eq!((pair.0, pair.1), (1, 2));
        assert_eq!(rest, &[3, 4]);
    }

    #[test]
    fn test_decode_slice_short_input() {
        let err = Pair::decode_slice(&[1]).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
