//! Recursive-descent parser for RIFF chunk trees
//!
//! The [`Parser`] walks a contiguous byte buffer and produces a [`Chunk`]
//! tree. Whether a chunk is a container or a leaf is a keyword convention,
//! not a property of the byte layout, so the recognized container keywords
//! are parser configuration rather than a hardcoded rule.

use std::io::Read;

use bytes::Bytes;

use crate::chunk::{Chunk, ContainerChunk, DataChunk};
use crate::error::{Result, RiffError};
use crate::fourcc::FourCc;

/// Parser for RIFF-family container files
///
/// Parsing is a pure function over the input buffer: no I/O, no mutation
/// of the input, one pass front to back. Leaf payloads are zero-copy
/// views into the buffer.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use riff_tree::Parser;
///
/// let buf = Bytes::from_static(b"RIFF\x04\x00\x00\x00WAVE");
/// let chunk = Parser::new().parse(&buf)?;
/// assert!(chunk.is_container());
/// # Ok::<(), riff_tree::RiffError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    /// Identifiers classified as containers
    container_ids: Vec<FourCc>,
    /// Tolerate a missing pad byte at the very end of the buffer
    allow_missing_final_pad: bool,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Creates a parser recognizing the standard `RIFF` and `LIST` keywords
    #[must_use]
    pub fn new() -> Self {
        Self {
            container_ids: vec![FourCc::RIFF, FourCc::LIST],
            allow_missing_final_pad: false,
        }
    }

    /// Creates a parser with a custom container keyword set
    ///
    /// Derived formats introduce their own container keywords, and an
    /// unrecognized keyword parses as a leaf, so the set must match the
    /// format at hand.
    #[must_use]
    pub fn with_container_ids(container_ids: Vec<FourCc>) -> Self {
        Self {
            container_ids,
            allow_missing_final_pad: false,
        }
    }

    /// Tolerates a missing mandatory pad byte at the very end of the buffer
    ///
    /// The format requires the pad even after the last chunk, but some
    /// encoders omit it. Strict by default.
    #[must_use]
    pub fn allow_missing_final_pad(mut self, allow: bool) -> Self {
        self.allow_missing_final_pad = allow;
        self
    }

    /// The container keywords this parser recognizes
    #[must_use]
    pub fn container_ids(&self) -> &[FourCc] {
        &self.container_ids
    }

    /// Parses a single root chunk from the start of the buffer
    ///
    /// Bytes beyond the root chunk are ignored. A canonical file holds
    /// exactly one top-level `RIFF` container.
    pub fn parse(&self, buf: &Bytes) -> Result<Chunk> {
        let (chunk, _consumed) = self.parse_at(buf, 0)?;
        Ok(chunk)
    }

    /// Reads a stream to its end and parses a single root chunk
    pub fn parse_reader<R: Read>(&self, reader: &mut R) -> Result<Chunk> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        self.parse(&Bytes::from(buf))
    }

    /// Parses exactly one chunk, and all its descendants, starting at
    /// `offset`
    ///
    /// Returns the chunk and the number of bytes consumed: header, payload,
    /// and the chunk's own trailing pad byte when its length is odd. Bytes
    /// beyond that are untouched — the caller decides whether siblings
    /// follow.
    ///
    /// # Errors
    ///
    /// [`RiffError::Truncated`] when the buffer ends inside a required
    /// field, payload, or pad byte; [`RiffError::MalformedContainer`] when
    /// a container's subchunks do not exactly tile its declared length.
    pub fn parse_at(&self, buf: &Bytes, offset: usize) -> Result<(Chunk, usize)> {
        let id = FourCc::new(read_bytes4(buf, offset)?);
        let length = u32::from_le_bytes(read_bytes4(buf, offset + 4)?);

        let chunk = if self.container_ids.contains(&id) {
            self.parse_container(buf, offset, id, length)?
        } else {
            let data = slice_payload(buf, offset + 8, length as usize)?;
            Chunk::Data(DataChunk { id, data })
        };

        let mut consumed = 8 + length as usize;
        if length % 2 == 1 {
            let pad_offset = offset + consumed;
            if pad_offset == buf.len() && self.allow_missing_final_pad {
                // Lenient mode: the pad would be the last byte of the file
                // and the encoder dropped it.
            } else {
                // The pad value itself is unconstrained; only its presence
                // matters.
                require(buf, pad_offset, 1)?;
                consumed += 1;
            }
        }

        Ok((chunk, consumed))
    }

    /// Parses the list type and subchunk stream of a container whose header
    /// sits at `offset` and declares `length` payload bytes
    fn parse_container(
        &self,
        buf: &Bytes,
        offset: usize,
        id: FourCc,
        length: u32,
    ) -> Result<Chunk> {
        // A container payload holds at least its 4-byte list type
        if length < 4 {
            return Err(RiffError::MalformedContainer {
                id,
                offset,
                declared: length,
            });
        }
        let list_type = FourCc::new(read_bytes4(buf, offset + 8)?);

        let end = offset + 8 + length as usize;
        let mut cursor = offset + 12;
        let mut children = Vec::new();
        while cursor < end {
            if end - cursor < 8 {
                // Leftover bytes too short to hold a subchunk header
                return Err(RiffError::MalformedContainer {
                    id,
                    offset,
                    declared: length,
                });
            }
            let (child, used) = self.parse_at(buf, cursor)?;
            cursor += used;
            if cursor > end {
                // The subchunk ran past the container's declared payload:
                // the length field lied.
                return Err(RiffError::MalformedContainer {
                    id,
                    offset,
                    declared: length,
                });
            }
            children.push(child);
        }

        Ok(Chunk::Container(ContainerChunk {
            id,
            list_type,
            children,
        }))
    }
}

/// Checks that `needed` bytes are available at `offset`
fn require(buf: &Bytes, offset: usize, needed: usize) -> Result<()> {
    let available = buf.len().saturating_sub(offset);
    if available < needed {
        return Err(RiffError::Truncated {
            offset,
            needed,
            available,
        });
    }
    Ok(())
}

/// Reads a 4-byte field at `offset`
fn read_bytes4(buf: &Bytes, offset: usize) -> Result<[u8; 4]> {
    require(buf, offset, 4)?;
    let mut out = [0u8; 4];
    out.copy_from_slice(&buf[offset..offset + 4]);
    Ok(out)
}

/// Slices `count` payload bytes at `offset` without copying
fn slice_payload(buf: &Bytes, offset: usize, count: usize) -> Result<Bytes> {
    require(buf, offset, count)?;
    Ok(buf.slice(offset..offset + count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_leaf_with_even_payload() {
        let buf = Bytes::from_static(b"data\x04\x00\x00\x00wxyz");
        let (chunk, consumed) = Parser::new().parse_at(&buf, 0).expect("leaf");

        assert_eq!(consumed, 12);
        let leaf = chunk.as_data().expect("leaf variant");
        assert_eq!(leaf.id, FourCc::new(*b"data"));
        assert_eq!(leaf.data.as_ref(), b"wxyz");
    }

    #[test]
    fn parse_leaf_consumes_pad_byte() {
        let buf = Bytes::from_static(b"data\x03\x00\x00\x00odd\x00next");
        let (chunk, consumed) = Parser::new().parse_at(&buf, 0).expect("leaf");

        // 8-byte header + 3 payload + 1 pad; "next" is not ours
        assert_eq!(consumed, 12);
        assert_eq!(chunk.as_data().expect("leaf").data.as_ref(), b"odd");
    }

    #[test]
    fn parse_zero_length_leaf() {
        let buf = Bytes::from_static(b"data\x00\x00\x00\x00");
        let (chunk, consumed) = Parser::new().parse_at(&buf, 0).expect("empty leaf");

        assert_eq!(consumed, 8);
        assert!(chunk.as_data().expect("leaf").data.is_empty());
    }

    #[test]
    fn parse_container_with_list_type_only() {
        let buf = Bytes::from_static(b"RIFF\x04\x00\x00\x00WAVE");
        let (chunk, consumed) = Parser::new().parse_at(&buf, 0).expect("empty container");

        assert_eq!(consumed, 12);
        let container = chunk.as_container().expect("container variant");
        assert_eq!(container.list_type, FourCc::new(*b"WAVE"));
        assert!(container.children.is_empty());
    }

    #[test]
    fn parse_at_nonzero_offset() {
        let buf = Bytes::from_static(b"skipdata\x02\x00\x00\x00hi");
        let (chunk, consumed) = Parser::new().parse_at(&buf, 4).expect("offset parse");

        assert_eq!(consumed, 10);
        assert_eq!(chunk.as_data().expect("leaf").data.as_ref(), b"hi");
    }

    #[test]
    fn leaf_payload_is_zero_copy() {
        let buf = Bytes::from_static(b"data\x04\x00\x00\x00wxyz");
        let (chunk, _) = Parser::new().parse_at(&buf, 0).expect("leaf");

        let data = &chunk.as_data().expect("leaf").data;
        // The payload points into the input buffer, not a copy of it
        assert_eq!(data.as_ptr(), buf[8..].as_ptr());
    }

    #[test]
    fn truncated_header_fails() {
        let buf = Bytes::from_static(b"da");
        assert!(matches!(
            Parser::new().parse_at(&buf, 0),
            Err(RiffError::Truncated {
                offset: 0,
                needed: 4,
                available: 2,
            })
        ));
    }

    #[test]
    fn truncated_length_field_fails() {
        let buf = Bytes::from_static(b"data\x04\x00");
        assert!(matches!(
            Parser::new().parse_at(&buf, 0),
            Err(RiffError::Truncated { offset: 4, .. })
        ));
    }

    #[test]
    fn truncated_payload_fails() {
        let buf = Bytes::from_static(b"data\x08\x00\x00\x00wx");
        assert!(matches!(
            Parser::new().parse_at(&buf, 0),
            Err(RiffError::Truncated { offset: 8, .. })
        ));
    }

    #[test]
    fn missing_final_pad_is_strict_by_default() {
        let buf = Bytes::from_static(b"data\x03\x00\x00\x00odd");
        assert!(matches!(
            Parser::new().parse_at(&buf, 0),
            Err(RiffError::Truncated {
                offset: 11,
                needed: 1,
                available: 0,
            })
        ));
    }

    #[test]
    fn missing_final_pad_accepted_in_lenient_mode() {
        let buf = Bytes::from_static(b"data\x03\x00\x00\x00odd");
        let parser = Parser::new().allow_missing_final_pad(true);
        let (chunk, consumed) = parser.parse_at(&buf, 0).expect("lenient parse");

        assert_eq!(consumed, 11);
        assert_eq!(chunk.as_data().expect("leaf").data.as_ref(), b"odd");
    }

    #[test]
    fn lenient_mode_only_applies_at_end_of_buffer() {
        // The pad position is not the end of the buffer, so it is still
        // required even in lenient mode.
        let buf = Bytes::from_static(b"RIFF\x10\x00\x00\x00JUNKC0  \x03\x00\x00\x00odd");
        let parser = Parser::new().allow_missing_final_pad(true);
        assert!(matches!(
            parser.parse(&buf),
            Err(RiffError::MalformedContainer { .. })
        ));
    }

    #[test]
    fn container_length_below_list_type_is_malformed() {
        let buf = Bytes::from_static(b"RIFF\x02\x00\x00\x00WAVE");
        assert!(matches!(
            Parser::new().parse_at(&buf, 0),
            Err(RiffError::MalformedContainer { declared: 2, .. })
        ));
    }

    #[test]
    fn unrecognized_keyword_parses_as_leaf() {
        let buf = Bytes::from_static(b"LIST\x04\x00\x00\x00INFO");
        let parser = Parser::with_container_ids(vec![FourCc::RIFF]);
        let chunk = parser.parse(&buf).expect("leaf parse");

        assert!(!chunk.is_container());
        assert_eq!(chunk.as_data().expect("leaf").data.as_ref(), b"INFO");
    }

    #[test]
    fn custom_keyword_parses_as_container() {
        let buf = Bytes::from_static(b"CAT \x04\x00\x00\x00sub ");
        let parser = Parser::with_container_ids(vec![FourCc::new(*b"CAT ")]);
        let chunk = parser.parse(&buf).expect("container parse");

        let container = chunk.as_container().expect("container variant");
        assert_eq!(container.list_type, FourCc::new(*b"sub "));
    }

    #[test]
    fn parse_reader_reads_to_end() {
        let mut cursor = std::io::Cursor::new(b"RIFF\x04\x00\x00\x00WAVE".to_vec());
        let chunk = Parser::new().parse_reader(&mut cursor).expect("reader parse");
        assert!(chunk.is_container());
    }

    #[test]
    fn trailing_bytes_after_root_are_ignored() {
        let buf = Bytes::from_static(b"RIFF\x04\x00\x00\x00WAVEtrailing garbage");
        let chunk = Parser::new().parse(&buf).expect("root parse");
        assert!(chunk.as_container().expect("container").children.is_empty());
    }
}
