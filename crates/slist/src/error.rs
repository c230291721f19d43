use alloc_binding::Slot;
use snafu::{Location, Snafu};

/// The error type returned by list and cursor operations.
///
/// No operation that returns an error has modified the list.
#[derive(Debug, Snafu, derive_more::IsVariant)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum ListError {
    #[snafu(display("allocator has no {slot} function registered"))]
    Unbound {
        slot: Slot,
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("allocator refused {size} bytes (align {align})"))]
    AllocationFailed {
        size: usize,
        align: usize,
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("index {index} is out of bounds for a list of length {len}"))]
    OutOfBounds {
        index: usize,
        len: usize,
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("list is empty"))]
    Empty {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("value {value} is not in the list"))]
    NotFound {
        value: u32,
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("cursor at index {index} is already on the last element"))]
    EndOfList {
        index: usize,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ListError {
    /// Returns where the error was raised.
    #[must_use]
    pub fn location(&self) -> &Location {
        match self {
            Self::Unbound { location, .. }
            | Self::AllocationFailed { location, .. }
            | Self::OutOfBounds { location, .. }
            | Self::Empty { location }
            | Self::NotFound { location, .. }
            | Self::EndOfList { location, .. } => location,
        }
    }
}
