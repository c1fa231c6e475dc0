//! QoS (Quality of Services)

use std::fmt::Display;

use crate::common::ErrorKind;

#[repr(u8)]
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Default)]
pub enum QualityOfService {
    #[default]
    Level0 = 0,
    Level1 = 1,
    Level2 = 2,
}

impl QualityOfService {
    /// Builds a QoS from its two wire bits. `(true, true)` is reserved.
    #[inline]
    pub fn from_bits(high: bool, low: bool) -> Result<Self, QoSError> {
        match (high, low) {
            (false, false) => Ok(QualityOfService::Level0),
            (false, true) => Ok(QualityOfService::Level1),
            (true, false) => Ok(QualityOfService::Level2),
            (true, true) => Err(QoSError::Reserved),
        }
    }

    /// The `(high, low)` wire bits of this QoS
    #[inline]
    pub fn to_bits(self) -> (bool, bool) {
        match self {
            QualityOfService::Level0 => (false, false),
            QualityOfService::Level1 => (false, true),
            QualityOfService::Level2 => (true, false),
        }
    }
}

impl TryFrom<u8> for QualityOfService {
    type Error = QoSError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(QualityOfService::Level0),
            1 => Ok(QualityOfService::Level1),
            2 => Ok(QualityOfService::Level2),
            3 => Err(QoSError::Reserved),
            v => Err(QoSError::Invalid(v)),
        }
    }
}

impl From<QualityOfService> for u8 {
    fn from(qos: QualityOfService) -> Self {
        qos as u8
    }
}

impl Display for QualityOfService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, thiserror::Error)]
pub enum QoSError {
    #[error("reserved quality of service")]
    Reserved,
    #[error("invalid quality of service ({0})")]
    Invalid(u8),
}

impl QoSError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::ProtocolViolation
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cmp::min;

    #[test]
    fn min_qos() {
        let q1 = QualityOfService::Level1;
        let q2 = QualityOfService::Level2;
        assert_eq!(min(q1, q2), q1);
        assert_eq!(min(QualityOfService::Level0, q2), QualityOfService::Level0);
    }

    #[test]
    fn test_qos_bits() {
        for qos in [
            QualityOfService::Level0,
            QualityOfService::Level1,
            QualityOfService::Level2,
        ] {
            let (high, low) = qos.to_bits();
            assert_eq!(QualityOfService::from_bits(high, low), Ok(qos));
        }

        assert_eq!(
            QualityOfService::from_bits(true, true),
            Err(QoSError::Reserved)
        );
    }

    #[test]
    fn test_qos_from_u8() {
        assert_eq!(QualityOfService::try_from(2), Ok(QualityOfService::Level2));
        assert_eq!(QualityOfService::try_from(3), Err(QoSError::Reserved));
        assert_eq!(QualityOfService::try_from(7), Err(QoSError::Invalid(7)));
        assert_eq!(u8::from(QualityOfService::Level1), 1);
    }
}
