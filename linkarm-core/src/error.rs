use std::{error, fmt};

use crate::robot::JointId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// Link length is negative or not a finite number.
    InvalidLength(f32),
    /// A chain needs at least one link.
    EmptyChain,
    /// The joint is not part of the chain.
    NoSuchJoint(JointId),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidLength(length) => write!(f, "invalid link length: {}", length),
            Error::EmptyChain => write!(f, "chain has no links"),
            Error::NoSuchJoint(id) => write!(f, "no such joint: {}", id),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}
