//! MQTT 3.1.1 header codec
//!
//! Strictly implements the header layout of [MQTT v3.1.1](http://docs.oasis-open.org/mqtt/mqtt/v3.1.1/os/mqtt-v3.1.1-os.html)
//!
//! ## Usage
//!
//! ```rust
//! use mqtt_header_codec::common::{ConnectFlags, ConnectFlagsPolicy, Encodable};
//! use mqtt_header_codec::v4::{
//!     decode_header_with, ConnectVariableHeader, FixedHeader, PacketType, VariableHeader,
//! };
//!
//! let variable_header = ConnectVariableHeader::new(ConnectFlags::clean_session(), 30);
//! let fixed_header = FixedHeader::new(PacketType::Connect, variable_header.encoded_length());
//!
//! // Encode
//! let mut buf = fixed_header.to_bytes().unwrap();
//! variable_header.encode(&mut buf).unwrap();
//!
//! // Decode both stages at once
//! let (decoded, header, payload) = decode_header_with(&buf, ConnectFlagsPolicy::Full).unwrap();
//! assert_eq!(decoded, fixed_header);
//! assert_eq!(header, VariableHeader::Connect(variable_header));
//! assert!(payload.is_empty());
//! ```

pub use self::{
    control::*,
    header::{
        decode_header, decode_header_with, decode_variable_header, HeaderError, VariableHeader,
    },
};

#[cfg(feature = "tokio-codec")]
pub use self::codec::{Frame, HeaderCodec};

#[cfg(feature = "tokio-codec")]
pub mod codec;
pub mod control;
pub mod header;
