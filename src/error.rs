use thiserror::Error;

/// Errors returned by the index-based operations of a [ConcurrentList](crate::ConcurrentList).
///
/// A failed operation leaves the list unmodified and its lock released.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListError {
    /// The index is outside `[0, len)`, or `[0, len]` for an insertion.
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The destination of a copy has a valid offset but not enough room after it.
    #[error("destination has room for {available} elements but {required} are required")]
    DestinationTooSmall { required: usize, available: usize },
}

pub type Result<T, E = ListError> = std::result::Result<T, E>;

impl ListError {
    pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
        if index < len {
            Ok(())
        } else {
            Err(ListError::IndexOutOfRange { index, len })
        }
    }

    pub(crate) fn check_insert_index(index: usize, len: usize) -> Result<()> {
        if index <= len {
            Ok(())
        } else {
            Err(ListError::IndexOutOfRange { index, len })
        }
    }
}
