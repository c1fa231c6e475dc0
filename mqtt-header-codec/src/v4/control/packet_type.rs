//! Packet types

use std::fmt::Display;

/// Control packet type, the high nibble of the first fixed header byte
///
/// `0` and `15` are reserved in v3.1.1. They are kept as [`PacketType::Reserved0`] and
/// [`PacketType::Reserved15`] so the fixed header can still be decoded; decoders that expect a
/// specific type reject them.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum PacketType {
    /// Client request to connect to Server
    Connect,
    /// Connect acknowledgment
    ConnectAcknowledgement,
    /// Publish message
    Publish,
    /// Publish acknowledgment
    PublishAcknowledgement,
    /// Publish received (assured delivery part 1)
    PublishReceived,
    /// Publish release (assured delivery part 2)
    PublishRelease,
    /// Publish complete (assured delivery part 3)
    PublishComplete,
    /// Client subscribe request
    Subscribe,
    /// Subscribe acknowledgment
    SubscribeAcknowledgement,
    /// Unsubscribe request
    Unsubscribe,
    /// Unsubscribe acknowledgment
    UnsubscribeAcknowledgement,
    /// PING request
    PingRequest,
    /// PING response
    PingResponse,
    /// Client is disconnecting
    Disconnect,
    /// Reserved, `0`
    Reserved0,
    /// Reserved, `15`
    Reserved15,
}

impl PacketType {
    /// Packet type from the low 4 bits of `val`
    #[inline]
    pub fn from_nibble(val: u8) -> Self {
        match val & 0x0F {
            value::CONNECT => PacketType::Connect,
            value::CONNACK => PacketType::ConnectAcknowledgement,
            value::PUBLISH => PacketType::Publish,
            value::PUBACK => PacketType::PublishAcknowledgement,
            value::PUBREC => PacketType::PublishReceived,
            value::PUBREL => PacketType::PublishRelease,
            value::PUBCOMP => PacketType::PublishComplete,
            value::SUBSCRIBE => PacketType::Subscribe,
            value::SUBACK => PacketType::SubscribeAcknowledgement,
            value::UNSUBSCRIBE => PacketType::Unsubscribe,
            value::UNSUBACK => PacketType::UnsubscribeAcknowledgement,
            value::PINGREQ => PacketType::PingRequest,
            value::PINGRESP => PacketType::PingResponse,
            value::DISCONNECT => PacketType::Disconnect,
            value::RESERVED_0 => PacketType::Reserved0,
            _ => PacketType::Reserved15,
        }
    }

    #[inline]
    pub fn to_nibble(self) -> u8 {
        match self {
            PacketType::Connect => value::CONNECT,
            PacketType::ConnectAcknowledgement => value::CONNACK,
            PacketType::Publish => value::PUBLISH,
            PacketType::PublishAcknowledgement => value::PUBACK,
            PacketType::PublishReceived => value::PUBREC,
            PacketType::PublishRelease => value::PUBREL,
            PacketType::PublishComplete => value::PUBCOMP,
            PacketType::Subscribe => value::SUBSCRIBE,
            PacketType::SubscribeAcknowledgement => value::SUBACK,
            PacketType::Unsubscribe => value::UNSUBSCRIBE,
            PacketType::UnsubscribeAcknowledgement => value::UNSUBACK,
            PacketType::PingRequest => value::PINGREQ,
            PacketType::PingResponse => value::PINGRESP,
            PacketType::Disconnect => value::DISCONNECT,
            PacketType::Reserved0 => value::RESERVED_0,
            PacketType::Reserved15 => value::RESERVED_15,
        }
    }

    #[inline]
    pub fn is_reserved(self) -> bool {
        matches!(self, PacketType::Reserved0 | PacketType::Reserved15)
    }

    /// Flag bits the fixed header of this packet type must carry
    ///
    /// <http://docs.oasis-open.org/mqtt/mqtt/v3.1.1/os/mqtt-v3.1.1-os.html#_Table_2.2_->
    #[inline]
    pub(crate) fn default_flags(self) -> u8 {
        match self {
            PacketType::PublishRelease | PacketType::Subscribe | PacketType::Unsubscribe => 0b0010,
            _ => 0,
        }
    }
}

impl From<PacketType> for u8 {
    fn from(value: PacketType) -> Self {
        value.to_nibble()
    }
}

impl Display for PacketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PacketType::Connect => write!(f, "CONNECT"),
            PacketType::ConnectAcknowledgement => write!(f, "CONNACK"),
            PacketType::Publish => write!(f, "PUBLISH"),
            PacketType::PublishAcknowledgement => write!(f, "PUBACK"),
            PacketType::PublishReceived => write!(f, "PUBREC"),
            PacketType::PublishRelease => write!(f, "PUBREL"),
            PacketType::PublishComplete => write!(f, "PUBCOMP"),
            PacketType::Subscribe => write!(f, "SUBSCRIBE"),
            PacketType::SubscribeAcknowledgement => write!(f, "SUBACK"),
            PacketType::Unsubscribe => write!(f, "UNSUBSCRIBE"),
            PacketType::UnsubscribeAcknowledgement => write!(f, "UNSUBACK"),
            PacketType::PingRequest => write!(f, "PINGREQ"),
            PacketType::PingResponse => write!(f, "PINGRESP"),
            PacketType::Disconnect => write!(f, "DISCONNECT"),
            PacketType::Reserved0 => write!(f, "RESERVED(0)"),
            PacketType::Reserved15 => write!(f, "RESERVED(15)"),
        }
    }
}

mod value {
    pub const RESERVED_0: u8 = 0;
    pub const CONNECT: u8 = 1;
    pub const CONNACK: u8 = 2;
    pub const PUBLISH: u8 = 3;
    pub const PUBACK: u8 = 4;
    pub const PUBREC: u8 = 5;
    pub const PUBREL: u8 = 6;
    pub const PUBCOMP: u8 = 7;
    pub const SUBSCRIBE: u8 = 8;
    pub const SUBACK: u8 = 9;
    pub const UNSUBSCRIBE: u8 = 10;
    pub const UNSUBACK: u8 = 11;
    pub const PINGREQ: u8 = 12;
    pub const PINGRESP: u8 = 13;
    pub const DISCONNECT: u8 = 14;
    pub const RESERVED_15: u8 = 15;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_nibble_mapping() {
        for val in 0..16u8 {
            let packet_type = PacketType::from_nibble(val);
            assert_eq!(packet_type.to_nibble(), val);
            assert_eq!(packet_type.is_reserved(), val == 0 || val == 15);
        }
        assert_eq!(PacketType::from_nibble(1), PacketType::Connect);
        assert_eq!(PacketType::from_nibble(2), PacketType::ConnectAcknowledgement);
        assert_eq!(PacketType::from_nibble(14), PacketType::Disconnect);
    }

    #[test]
    fn test_display() {
        assert_eq!(PacketType::Connect.to_string(), "CONNECT");
        assert_eq!(PacketType::Reserved0.to_string(), "RESERVED(0)");
        assert_eq!(PacketType::Reserved15.to_string(), "RESERVED(15)");
    }
}
