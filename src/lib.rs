//! Parser and writer for RIFF-family container files.
//!
//! RIFF files (WAVE, AVI, WebP, and relatives) are a recursive tree of
//! typed, length-prefixed byte regions called chunks. A chunk is either a
//! leaf carrying opaque application bytes, or a container carrying an
//! ordered list of child chunks behind a framing keyword such as `RIFF` or
//! `LIST`. This crate parses such a buffer into a [`Chunk`] tree, lets
//! callers navigate and mutate it, and serializes it back with lengths and
//! padding recomputed bottom-up.
//!
//! Payload bytes are never interpreted: leaf data stays an opaque,
//! zero-copy [`bytes::Bytes`] view into the input buffer.
//!
//! # Examples
//!
//! ```
//! use bytes::Bytes;
//! use riff_tree::{Chunk, FourCc, Parser};
//!
//! // Build a tree by hand, serialize it, parse it back.
//! let tree = Chunk::container(
//!     FourCc::RIFF,
//!     FourCc::new(*b"WAVE"),
//!     vec![Chunk::data(FourCc::new(*b"fmt "), &b"\x01\x00"[..])],
//! );
//!
//! let bytes = Bytes::from(tree.to_vec()?);
//! let parsed = Parser::new().parse(&bytes)?;
//! assert_eq!(parsed, tree);
//!
//! // Navigate by index, identifier, or a container's list type.
//! let wave = parsed.as_container().unwrap();
//! assert_eq!(wave.child(b"fmt ")?.id(), FourCc::new(*b"fmt "));
//! # Ok::<(), riff_tree::RiffError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod chunk;
pub mod error;
pub mod fourcc;
pub mod parser;
pub mod writer;

pub use chunk::{ChildKey, Chunk, ContainerChunk, DataChunk};
pub use error::{Result, RiffError};
pub use fourcc::FourCc;
pub use parser::Parser;
