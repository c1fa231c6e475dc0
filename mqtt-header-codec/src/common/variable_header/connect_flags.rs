//! Flags in `CONNECT`

use std::{
    fmt::Display,
    io::{self, Read, Write},
};

use byteorder::{ReadBytesExt, WriteBytesExt};

use crate::common::{
    bits::{get_bit, set_bit},
    Decodable, Encodable, ErrorKind, QualityOfService,
};

const RESERVED_BIT: u8 = 0;
const CLEAN_SESSION_BIT: u8 = 1;
const WILL_FLAG_BIT: u8 = 2;
const WILL_QOS_LOW_BIT: u8 = 3;
const WILL_QOS_HIGH_BIT: u8 = 4;
const WILL_RETAIN_BIT: u8 = 5;
const PASSWORD_BIT: u8 = 6;
const USERNAME_BIT: u8 = 7;

/// Which `CONNECT` flag combinations the decoder accepts
///
/// Will messages and authentication are not handled downstream yet, so by default only a clean
/// session without will, user name or password gets through. `Full` accepts every flag byte
/// the protocol allows.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Default)]
pub enum ConnectFlagsPolicy {
    #[default]
    Restricted,
    Full,
}

/// Flags for `CONNECT` packet
///
/// ```plain
///      7          6           5         4   3       2            1           0
/// +-----------+----------+-------------+----------+-----------+---------------+----------+
/// | User Name | Password | Will Retain | Will QoS | Will Flag | Clean Session | Reserved |
/// +-----------+----------+-------------+----------+-----------+---------------+----------+
/// ```
#[derive(Debug, Eq, PartialEq, Copy, Clone, Default)]
pub struct ConnectFlags {
    pub username: bool,
    pub password: bool,
    pub will_retain: bool,
    pub will_qos: QualityOfService,
    pub will_flag: bool,
    pub clean_session: bool,
}

impl ConnectFlags {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The only combination the `Restricted` policy accepts
    pub fn clean_session() -> Self {
        Self {
            clean_session: true,
            ..Self::default()
        }
    }

    /// Unpacks a flags byte, then checks it against `policy`
    pub fn from_u8(code: u8, policy: ConnectFlagsPolicy) -> Result<Self, ConnectFlagsError> {
        if get_bit(code, RESERVED_BIT) {
            return Err(ConnectFlagsError::InvalidReservedFlag);
        }

        let will_qos = QualityOfService::from_bits(
            get_bit(code, WILL_QOS_HIGH_BIT),
            get_bit(code, WILL_QOS_LOW_BIT),
        )
        .map_err(|_| ConnectFlagsError::ReservedWillQoS)?;

        let flags = Self {
            username: get_bit(code, USERNAME_BIT),
            password: get_bit(code, PASSWORD_BIT),
            will_retain: get_bit(code, WILL_RETAIN_BIT),
            will_qos,
            will_flag: get_bit(code, WILL_FLAG_BIT),
            clean_session: get_bit(code, CLEAN_SESSION_BIT),
        };

        match policy {
            ConnectFlagsPolicy::Restricted => flags.check_supported()?,
            ConnectFlagsPolicy::Full => flags.check_consistent()?,
        }

        Ok(flags)
    }

    /// Packs the flags into one byte. Every combination is accepted.
    pub fn to_u8(&self) -> u8 {
        let (qos_high, qos_low) = self.will_qos.to_bits();

        let mut code = 0;
        code = set_bit(code, CLEAN_SESSION_BIT, self.clean_session);
        code = set_bit(code, WILL_FLAG_BIT, self.will_flag);
        code = set_bit(code, WILL_QOS_LOW_BIT, qos_low);
        code = set_bit(code, WILL_QOS_HIGH_BIT, qos_high);
        code = set_bit(code, WILL_RETAIN_BIT, self.will_retain);
        code = set_bit(code, PASSWORD_BIT, self.password);
        code = set_bit(code, USERNAME_BIT, self.username);
        code
    }

    fn check_supported(&self) -> Result<(), UnsupportedConnectFlag> {
        if !self.clean_session {
            return Err(UnsupportedConnectFlag::CleanSessionRequired);
        }
        if self.will_flag {
            return Err(UnsupportedConnectFlag::WillFlag);
        }
        if self.will_qos != QualityOfService::Level0 {
            return Err(UnsupportedConnectFlag::WillQoS(self.will_qos));
        }
        if self.will_retain {
            return Err(UnsupportedConnectFlag::WillRetain);
        }
        if self.password {
            return Err(UnsupportedConnectFlag::Password);
        }
        if self.username {
            return Err(UnsupportedConnectFlag::UserName);
        }
        Ok(())
    }

    // MQTT-3.1.2-13, MQTT-3.1.2-15, MQTT-3.1.2-22
    fn check_consistent(&self) -> Result<(), ConnectFlagsError> {
        if !self.will_flag && self.will_qos != QualityOfService::Level0 {
            return Err(ConnectFlagsError::WillQoSWithoutWill);
        }
        if !self.will_flag && self.will_retain {
            return Err(ConnectFlagsError::WillRetainWithoutWill);
        }
        if self.password && !self.username {
            return Err(ConnectFlagsError::PasswordWithoutUserName);
        }
        Ok(())
    }
}

impl Encodable for ConnectFlags {
    fn encode<W: Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        writer.write_u8(self.to_u8())
    }

    fn encoded_length(&self) -> u32 {
        1
    }
}

impl Decodable for ConnectFlags {
    type Error = ConnectFlagsError;
    type Cond = ConnectFlagsPolicy;

    fn decode_with<R: Read>(
        reader: &mut R,
        policy: ConnectFlagsPolicy,
    ) -> Result<Self, Self::Error> {
        let code = reader.read_u8()?;
        Self::from_u8(code, policy)
    }
}

impl Display for ConnectFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{username: {}, password: {}, will_retain: {}, will_qos: {}, will_flag: {}, clean_session: {}}}",
            self.username,
            self.password,
            self.will_retain,
            self.will_qos,
            self.will_flag,
            self.clean_session
        )
    }
}

/// A well formed flag the `Restricted` policy does not accept yet
#[derive(Debug, Eq, PartialEq, Copy, Clone, thiserror::Error)]
pub enum UnsupportedConnectFlag {
    #[error("clean session must be set")]
    CleanSessionRequired,
    #[error("will flag must be unset")]
    WillFlag,
    #[error("will QoS must be 0 (got {0})")]
    WillQoS(QualityOfService),
    #[error("will retain must be unset")]
    WillRetain,
    #[error("password flag must be unset")]
    Password,
    #[error("user name flag must be unset")]
    UserName,
}

#[derive(Debug, thiserror::Error)]
pub enum ConnectFlagsError {
    #[error(transparent)]
    IoError(#[from] io::Error),
    #[error("invalid reserved flag")]
    InvalidReservedFlag,
    #[error("reserved will QoS")]
    ReservedWillQoS,
    #[error("will QoS set without will flag")]
    WillQoSWithoutWill,
    #[error("will retain set without will flag")]
    WillRetainWithoutWill,
    #[error("password flag set without user name flag")]
    PasswordWithoutUserName,
    #[error(transparent)]
    Unsupported(#[from] UnsupportedConnectFlag),
}

impl ConnectFlagsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConnectFlagsError::IoError(_) => ErrorKind::Structural,
            ConnectFlagsError::Unsupported(_) => ErrorKind::UnsupportedFeature,
            _ => ErrorKind::ProtocolViolation,
        }
    }
}
