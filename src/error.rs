use thiserror::Error;

use crate::addr::Address;
use crate::net::Network;


/// Describes why a piece of text is not a valid IP address.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum AddressParseError {
    #[error("unknown IP address type")]
    UnknownAddressType,

    #[error("IP address has {0} chunk(s); expected {1}")]
    IncorrectChunkCount(usize, usize),

    #[error("IP address chunk with index {0} is empty")]
    EmptyChunk(usize),

    #[error("IP address chunk with index {0} ({1:?}) is not a valid number")]
    InvalidChunk(usize, String),

    #[error("IP address chunk with index {0} ({1}) is out of range 0 <= n <= {2}")]
    ChunkOutOfRange(usize, u32, u32),

    #[error("IP address has {0} shortening elements; expected maximum {1}")]
    TooManyShorteningElements(usize, usize),
}

/// Describes why a prefix length or netmask is unusable.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MaskError {
    #[error("prefix length {0:?} is not a decimal number")]
    NotNumeric(String),

    #[error("prefix length {0} is greater than the maximum ({1})")]
    PrefixOutOfRange(u64, u32),

    #[error("netmask {0} is not contiguous")]
    NonContiguous(String),

    #[error("netmask is IPv{mask} but the address is IPv{addr}")]
    FamilyMismatch { addr: u32, mask: u32 },
}

/// The errors produced by address parsing and route resolution.
///
/// Each variant carries the offending value so that it can be shown to the user.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error("{text:?}: invalid IP address: {source}")]
    InvalidAddress { text: String, source: AddressParseError },

    #[error("{text:?}: invalid netmask: {source}")]
    InvalidMask { text: String, source: MaskError },

    #[error("{0}: network unreachable")]
    NetworkUnreachable(Network),

    #[error("{0}: router not found")]
    RouterNotFound(Address),

    #[error("{0}: routing loop detected")]
    RoutingLoopDetected(Address),
}

impl Error {
    pub(crate) fn invalid_address<S: Into<String>>(text: S, source: AddressParseError) -> Error {
        Error::InvalidAddress { text: text.into(), source }
    }

    pub(crate) fn invalid_mask<S: Into<String>>(text: S, source: MaskError) -> Error {
        Error::InvalidMask { text: text.into(), source }
    }
}
