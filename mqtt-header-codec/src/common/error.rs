//! Error classification shared by every codec

use std::fmt::Display;

/// What went wrong while decoding, independent of which field failed.
///
/// The transport layer decides what to do with each kind (answer with a `CONNACK` return code,
/// or just close the connection); the codecs only report it.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum ErrorKind {
    /// The input is too short, too long, or the remaining length does not terminate
    Structural,
    /// The bytes are well formed but break a rule of the protocol
    ProtocolViolation,
    /// Valid protocol usage that this codec does not handle yet
    UnsupportedFeature,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Structural => write!(f, "structural error"),
            ErrorKind::ProtocolViolation => write!(f, "protocol violation"),
            ErrorKind::UnsupportedFeature => write!(f, "unsupported feature"),
        }
    }
}
