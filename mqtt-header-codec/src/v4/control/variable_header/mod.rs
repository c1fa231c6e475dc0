//! Variable header in MQTT
use std::io;

use crate::{
    common::{
        ConnectAckFlagsError, ConnectFlagsError, ErrorKind, ProtocolLevel, ProtocolLevelError,
        ProtocolNameError,
    },
    v4::control::PacketType,
};

pub use self::{
    connack::ConnAckVariableHeader, connect::ConnectVariableHeader,
    connect_ret_code::ConnectReturnCode,
};

pub mod connack;
pub mod connect;
mod connect_ret_code;

/// Errors while decoding variable header
#[derive(Debug, thiserror::Error)]
pub enum VariableHeaderError {
    #[error(transparent)]
    IoError(#[from] io::Error),
    #[error("expected {expected} packet, got {got}")]
    UnexpectedPacketType {
        expected: PacketType,
        got: PacketType,
    },
    #[error(transparent)]
    InvalidProtocolName(#[from] ProtocolNameError),
    #[error(transparent)]
    InvalidProtocolLevel(#[from] ProtocolLevelError),
    #[error("unsupported protocol level ({0})")]
    UnsupportedProtocolLevel(ProtocolLevel),
    #[error(transparent)]
    ConnectFlagsError(#[from] ConnectFlagsError),
    #[error(transparent)]
    ConnackFlagsError(#[from] ConnectAckFlagsError),
}

impl VariableHeaderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VariableHeaderError::IoError(_) => ErrorKind::Structural,
            VariableHeaderError::UnexpectedPacketType { .. }
            | VariableHeaderError::UnsupportedProtocolLevel(_) => ErrorKind::ProtocolViolation,
            VariableHeaderError::InvalidProtocolName(err) => err.kind(),
            VariableHeaderError::InvalidProtocolLevel(err) => err.kind(),
            VariableHeaderError::ConnectFlagsError(err) => err.kind(),
            VariableHeaderError::ConnackFlagsError(err) => err.kind(),
        }
    }
}
