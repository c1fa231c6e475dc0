//! MQTT Control Packet header codec
//!
//! Encodes and decodes the parts of an [MQTT v3.1.1] packet that come before the payload: the
//! fixed header shared by every control packet, and the variable headers of `CONNECT` and
//! `CONNACK`.
//!
//! Decoding runs in two stages. The fixed header is always decoded first; its packet type then
//! selects the variable header decoder that runs over the rest of the buffer.
//!
//! ```rust
//! use mqtt_header_codec::v4::{decode_header, VariableHeader};
//!
//! let bytes = [
//!     0x10, 0x0c, // CONNECT, remaining length 12
//!     0x00, 0x04, b'M', b'Q', b'T', b'T', 0x04, 0x02, 0x00, 0x3c, // variable header
//!     0x00, 0x00, // payload
//! ];
//!
//! let (fixed_header, variable_header, payload) = decode_header(&bytes).unwrap();
//! assert_eq!(fixed_header.remaining_length, 12);
//! match variable_header {
//!     VariableHeader::Connect(connect) => assert_eq!(connect.keep_alive.0, 60),
//!     VariableHeader::ConnAck(_) => unreachable!(),
//! }
//! assert_eq!(payload, &[0x00, 0x00]);
//! ```
//!
//! [MQTT v3.1.1]: http://docs.oasis-open.org/mqtt/mqtt/v3.1.1/os/mqtt-v3.1.1-os.html

#[allow(unused_macros)]
macro_rules! trace { ($($x:tt)*) => (
    #[cfg(feature = "log")] {
        log::trace!($($x)*)
    }
) }

#[allow(unused_macros)]
macro_rules! debug { ($($x:tt)*) => (
    #[cfg(feature = "log")] {
        log::debug!($($x)*)
    }
) }

pub mod common;
#[cfg(feature = "v4")]
pub mod v4;
