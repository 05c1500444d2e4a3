//! Error handling for RIFF parsing and serialization

use std::io;
use thiserror::Error;

use crate::fourcc::FourCc;

/// Errors that can occur when working with RIFF chunk trees
#[derive(Debug, Error)]
pub enum RiffError {
    /// An I/O error occurred while writing to a sink or reading a stream
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The buffer ended before a required field, payload, or pad byte
    #[error("truncated data at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        /// Byte offset where the read was attempted
        offset: usize,
        /// Number of bytes the read required
        needed: usize,
        /// Number of bytes actually remaining
        available: usize,
    },

    /// A container's subchunk stream does not tile its declared length
    #[error(
        "malformed container '{id}' at offset {offset}: subchunks do not tile declared length {declared}"
    )]
    MalformedContainer {
        /// Framing keyword of the offending container
        id: FourCc,
        /// Byte offset of the container's header
        offset: usize,
        /// Length declared in the container's length field
        declared: u32,
    },

    /// A chunk identifier was not exactly four bytes
    #[error("chunk identifier must be exactly 4 bytes, got {len}")]
    InvalidId {
        /// Length of the rejected value
        len: usize,
    },

    /// Subchunk index out of range
    #[error("subchunk index {index} out of range for container with {len} children")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Number of children in the container
        len: usize,
    },

    /// No subchunk matched the requested identifier or list type
    #[error("no subchunk named '{id}'")]
    ChildNotFound {
        /// Identifier that was looked up
        id: FourCc,
    },

    /// Chunk payload does not fit the 32-bit length field
    #[error("chunk payload of {len} bytes exceeds the u32 length field")]
    ChunkTooLarge {
        /// Computed payload length
        len: u64,
    },
}

/// Type alias for results from RIFF operations
pub type Result<T> = std::result::Result<T, RiffError>;
