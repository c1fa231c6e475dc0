pub use self::{
    connect_ack_flags::{ConnackFlags, ConnectAckFlagsError},
    connect_flags::{ConnectFlags, ConnectFlagsError, ConnectFlagsPolicy, UnsupportedConnectFlag},
    keep_alive::KeepAlive,
    protocol_level::{ProtocolLevel, ProtocolLevelError},
    protocol_name::{ProtocolName, ProtocolNameError},
};

pub mod connect_ack_flags;
pub mod connect_flags;
pub mod keep_alive;
pub mod protocol_level;
pub mod protocol_name;
