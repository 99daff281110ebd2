use alloc::collections::TryReserveError;
use core::fmt;

use smallvec::CollectionAllocErr;

/// Failures surfaced by [`BSet`](crate::BSet) construction and fallible insertion.
///
/// Inserting an element that is already present, or looking up one that is absent, is not an
/// error; those outcomes are reported through ordinary return values.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The requested order is below 2, so nodes could not hold a single key.
    InvalidOrder(usize),
    /// Storage for a node, or for the node arena, could not be allocated.
    AllocFailed,
    /// The node arena has run out of handles.
    CapacityExceeded,
}

/// A specialized `Result` for set operations.
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidOrder(order) => write!(f, "invalid B-tree order {order}, must be at least 2"),
            Error::AllocFailed => f.write_str("memory allocation failed"),
            Error::CapacityExceeded => f.write_str("node arena is at maximum capacity"),
        }
    }
}

impl core::error::Error for Error {}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::AllocFailed
    }
}

impl From<CollectionAllocErr> for Error {
    fn from(_: CollectionAllocErr) -> Self {
        Error::AllocFailed
    }
}
