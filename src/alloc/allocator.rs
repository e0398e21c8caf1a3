//! Error reporting shared by the block allocators and the graph.

use core::alloc::Layout;

/// Callback invoked with a human-readable message when the graph or one of
/// its block allocators hits a fatal condition.
///
/// A plain function pointer is `Copy + Send`, so the same handler can be
/// handed to every allocator owned by a graph without shared ownership.
pub type ErrorHandler = fn(&str);

/// The error type for block allocation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// The global allocator could not provide the requested records.
    OutOfMemory {
        /// Records requested.
        records: usize,
        /// Size of one record in bytes.
        record_size: usize,
    },
    /// A single request asked for more contiguous records than a block holds.
    RunTooLong {
        /// Records requested.
        requested: usize,
        /// Records per block.
        block_size: usize,
    },
}

impl core::fmt::Display for AllocError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfMemory { records, record_size } => match records.checked_mul(*record_size) {
                Some(bytes) => write!(f, "Not enough memory! ({bytes} bytes requested)"),
                None => write!(
                    f,
                    "Not enough memory! ({records} records of {record_size} bytes requested)"
                ),
            },
            Self::RunTooLong { requested, block_size } => write!(
                f,
                "cannot allocate {requested} contiguous records from blocks of {block_size}"
            ),
        }
    }
}

impl std::error::Error for AllocError {}

/// Reports an exhausted allocator.
///
/// With a handler installed the handler sees the message and the error is
/// returned to the caller. Without one the process is terminated through
/// [`std::alloc::handle_alloc_error`].
pub(crate) fn out_of_memory<T>(handler: Option<ErrorHandler>, records: usize) -> AllocError {
    let err = AllocError::OutOfMemory {
        records,
        record_size: core::mem::size_of::<T>(),
    };
    match handler {
        Some(report) => {
            report(&err.to_string());
            err
        }
        // An unrepresentable request has no layout of its own.
        None => std::alloc::handle_alloc_error(
            Layout::array::<T>(records).unwrap_or_else(|_| Layout::new::<T>()),
        ),
    }
}
