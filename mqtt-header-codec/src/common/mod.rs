pub use self::{
    encodable::{Decodable, Encodable},
    error::ErrorKind,
    qos::{QoSError, QualityOfService},
    remaining_length::{RemainingLength, RemainingLengthError},
    variable_header::*,
};

pub mod bits;
pub mod encodable;
pub mod error;
pub mod qos;
pub mod remaining_length;
pub mod variable_header;
