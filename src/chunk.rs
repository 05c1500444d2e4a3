//! Chunk tree model for RIFF containers
//!
//! A RIFF file is a tree of chunks. Leaves carry opaque application bytes;
//! containers carry an ordered list of child chunks. Both kinds share a
//! 4-byte identifier, and containers carry a second identifier (the list
//! type) because their own identifier slot is taken by the framing keyword.

use std::fmt::Write as _;

use bytes::Bytes;

use crate::error::{Result, RiffError};
use crate::fourcc::FourCc;

/// A leaf chunk holding opaque application bytes
///
/// The payload is a [`Bytes`] handle: parsing produces a zero-copy view
/// into the input buffer, and callers replace it wholesale to mutate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataChunk {
    /// Chunk identifier
    pub id: FourCc,
    /// Application payload; this crate never interprets it
    pub data: Bytes,
}

impl DataChunk {
    /// Creates a leaf chunk
    pub fn new(id: FourCc, data: impl Into<Bytes>) -> Self {
        Self {
            id,
            data: data.into(),
        }
    }
}

/// A container chunk holding an ordered list of subchunks
///
/// `id` is the framing keyword (conventionally `RIFF` or `LIST`); the
/// container's logical identity lives in `list_type`. Child order is
/// significant and preserved, duplicate identifiers are permitted, and the
/// container exclusively owns its children — there are no parent
/// back-references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerChunk {
    /// Framing keyword
    pub id: FourCc,
    /// Logical identity of the container
    pub list_type: FourCc,
    /// Ordered subchunks
    pub children: Vec<Chunk>,
}

impl ContainerChunk {
    /// Creates a container chunk
    #[must_use]
    pub fn new(id: FourCc, list_type: FourCc, children: Vec<Chunk>) -> Self {
        Self {
            id,
            list_type,
            children,
        }
    }

    /// Looks up a subchunk by positional index or 4-byte identifier
    ///
    /// Identifier lookup returns the first child whose `id` matches. If no
    /// child matches by `id`, it returns the first container child whose
    /// `list_type` matches, so a nested list can be addressed by its
    /// logical identity as well as its framing keyword.
    ///
    /// # Errors
    ///
    /// [`RiffError::IndexOutOfBounds`] for an out-of-range index,
    /// [`RiffError::ChildNotFound`] when nothing matches an identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use riff_tree::{Chunk, ContainerChunk, FourCc};
    ///
    /// let info = ContainerChunk::new(
    ///     FourCc::RIFF,
    ///     FourCc::new(*b"WAVE"),
    ///     vec![Chunk::container(FourCc::LIST, FourCc::new(*b"INFO"), vec![])],
    /// );
    ///
    /// // The nested list answers to both its keyword and its list type
    /// assert!(info.child(b"LIST").is_ok());
    /// assert!(info.child(b"INFO").is_ok());
    /// assert!(info.child(0).is_ok());
    /// ```
    pub fn child<K: Into<ChildKey>>(&self, key: K) -> Result<&Chunk> {
        match self.locate(key.into()) {
            Ok(index) => Ok(&self.children[index]),
            Err(error) => Err(error),
        }
    }

    /// Mutable variant of [`child`](Self::child); same lookup rules
    pub fn child_mut<K: Into<ChildKey>>(&mut self, key: K) -> Result<&mut Chunk> {
        match self.locate(key.into()) {
            Ok(index) => Ok(&mut self.children[index]),
            Err(error) => Err(error),
        }
    }

    /// Resolves a key to a child position
    ///
    /// Identifier resolution is two linear passes: every child by `id`
    /// first, then container children by `list_type`. Chunk counts are
    /// small and lists mutate often, so no index is maintained.
    fn locate(&self, key: ChildKey) -> Result<usize> {
        match key {
            ChildKey::Index(index) => {
                if index < self.children.len() {
                    Ok(index)
                } else {
                    Err(RiffError::IndexOutOfBounds {
                        index,
                        len: self.children.len(),
                    })
                }
            }
            ChildKey::Id(id) => self
                .children
                .iter()
                .position(|child| child.id() == id)
                .or_else(|| {
                    self.children.iter().position(
                        |child| matches!(child, Chunk::Container(inner) if inner.list_type == id),
                    )
                })
                .ok_or(RiffError::ChildNotFound { id }),
        }
    }
}

/// Key for subchunk lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKey {
    /// Positional index into the subchunk list
    Index(usize),
    /// 4-byte identifier, matched against child ids and container list types
    Id(FourCc),
}

impl From<usize> for ChildKey {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<FourCc> for ChildKey {
    fn from(id: FourCc) -> Self {
        Self::Id(id)
    }
}

impl From<[u8; 4]> for ChildKey {
    fn from(bytes: [u8; 4]) -> Self {
        Self::Id(FourCc::new(bytes))
    }
}

impl From<&[u8; 4]> for ChildKey {
    fn from(bytes: &[u8; 4]) -> Self {
        Self::Id(FourCc::new(*bytes))
    }
}

/// A node in a RIFF tree: either a leaf holding bytes or a container
/// holding subchunks
///
/// The two kinds are a closed sum type rather than a trait hierarchy;
/// shared behavior (identifier access, sizes, rendering) is expressed as
/// operations over the variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    /// Leaf chunk with an opaque payload
    Data(DataChunk),
    /// Container chunk with ordered subchunks
    Container(ContainerChunk),
}

impl Chunk {
    /// Creates a leaf chunk
    pub fn data(id: FourCc, data: impl Into<Bytes>) -> Self {
        Self::Data(DataChunk::new(id, data))
    }

    /// Creates a container chunk
    #[must_use]
    pub fn container(id: FourCc, list_type: FourCc, children: Vec<Chunk>) -> Self {
        Self::Container(ContainerChunk::new(id, list_type, children))
    }

    /// The chunk identifier (the framing keyword for containers)
    #[must_use]
    pub fn id(&self) -> FourCc {
        match self {
            Self::Data(chunk) => chunk.id,
            Self::Container(chunk) => chunk.id,
        }
    }

    /// Returns `true` if this chunk is a container
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Container(_))
    }

    /// Borrows the leaf variant, if this is a leaf
    #[must_use]
    pub fn as_data(&self) -> Option<&DataChunk> {
        match self {
            Self::Data(chunk) => Some(chunk),
            Self::Container(_) => None,
        }
    }

    /// Mutable variant of [`as_data`](Self::as_data)
    pub fn as_data_mut(&mut self) -> Option<&mut DataChunk> {
        match self {
            Self::Data(chunk) => Some(chunk),
            Self::Container(_) => None,
        }
    }

    /// Borrows the container variant, if this is a container
    #[must_use]
    pub fn as_container(&self) -> Option<&ContainerChunk> {
        match self {
            Self::Container(chunk) => Some(chunk),
            Self::Data(_) => None,
        }
    }

    /// Mutable variant of [`as_container`](Self::as_container)
    pub fn as_container_mut(&mut self) -> Option<&mut ContainerChunk> {
        match self {
            Self::Container(chunk) => Some(chunk),
            Self::Data(_) => None,
        }
    }

    /// Payload length as written in the chunk's length field
    ///
    /// Leaves report their data length. Containers report 4 bytes for the
    /// list type plus the encoded size of every child — a bottom-up fold
    /// over the subtree, recomputed on each call so edits never leave a
    /// stale length behind.
    #[must_use]
    pub fn payload_len(&self) -> u64 {
        match self {
            Self::Data(chunk) => chunk.data.len() as u64,
            Self::Container(chunk) => {
                4 + chunk
                    .children
                    .iter()
                    .map(Chunk::encoded_size)
                    .sum::<u64>()
            }
        }
    }

    /// Total encoded size: the 8-byte header, the payload, and the trailing
    /// pad byte when the payload length is odd
    #[must_use]
    pub fn encoded_size(&self) -> u64 {
        let len = self.payload_len();
        8 + len + (len & 1)
    }

    /// Renders the tree structure (identifiers, kinds, sizes, nesting) for
    /// diagnostics
    ///
    /// The output is not part of the binary contract and may change.
    #[must_use]
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        // Writing to a String cannot fail
        match self {
            Self::Data(chunk) => {
                let _ = writeln!(out, "{} [{} bytes]", chunk.id, self.encoded_size());
            }
            Self::Container(chunk) => {
                let _ = writeln!(
                    out,
                    "{} ({}) [{} bytes, {} subchunks]",
                    chunk.id,
                    chunk.list_type,
                    self.encoded_size(),
                    chunk.children.len()
                );
                for child in &chunk.children {
                    child.render_into(out, depth + 1);
                }
            }
        }
    }
}
