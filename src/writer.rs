//! Serialization of chunk trees back to bytes
//!
//! Lengths are computed bottom-up on every write, so edits to payloads or
//! subchunk lists never leave stale length fields behind. The emitted
//! layout is bit-exact: identifier, little-endian u32 length, payload, and
//! a `0x00` pad byte after every odd-length payload.

use std::io::Write;

use crate::chunk::Chunk;
use crate::error::{Result, RiffError};

impl Chunk {
    /// Writes the chunk, and all descendants depth-first, to a sink
    ///
    /// The sink only needs to accept sequential appends; a growable buffer
    /// and a file handle behave identically.
    ///
    /// # Errors
    ///
    /// [`RiffError::ChunkTooLarge`] when a payload does not fit the 32-bit
    /// length field, [`RiffError::Io`] when the sink fails.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        let len = self.payload_len();
        let length = u32::try_from(len).map_err(|_| RiffError::ChunkTooLarge { len })?;

        writer.write_all(self.id().as_bytes())?;
        writer.write_all(&length.to_le_bytes())?;

        match self {
            Self::Data(chunk) => writer.write_all(&chunk.data)?,
            Self::Container(chunk) => {
                writer.write_all(chunk.list_type.as_bytes())?;
                for child in &chunk.children {
                    child.write(writer)?;
                }
            }
        }

        if length % 2 == 1 {
            writer.write_all(&[0])?;
        }

        Ok(())
    }

    /// Serializes the chunk into a fresh byte vector
    ///
    /// # Errors
    ///
    /// Same conditions as [`write`](Self::write).
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.encoded_size() as usize);
        self.write(&mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fourcc::FourCc;

    #[test]
    fn leaf_layout_is_exact() {
        let leaf = Chunk::data(FourCc::new(*b"data"), &b"wxyz"[..]);
        assert_eq!(leaf.to_vec().expect("serialize"), b"data\x04\x00\x00\x00wxyz");
    }

    #[test]
    fn odd_leaf_gets_zero_pad() {
        let leaf = Chunk::data(FourCc::new(*b"data"), &b"odd"[..]);
        assert_eq!(leaf.to_vec().expect("serialize"), b"data\x03\x00\x00\x00odd\x00");
    }

    #[test]
    fn container_layout_is_exact() {
        let tree = Chunk::container(
            FourCc::RIFF,
            FourCc::new(*b"WAVE"),
            vec![Chunk::data(FourCc::new(*b"fmt "), &b"ab"[..])],
        );
        // Payload: 4 (list type) + 10 (child) = 14
        assert_eq!(
            tree.to_vec().expect("serialize"),
            b"RIFF\x0e\x00\x00\x00WAVEfmt \x02\x00\x00\x00ab"
        );
    }

    #[test]
    fn empty_container_is_header_plus_list_type() {
        let tree = Chunk::container(FourCc::LIST, FourCc::new(*b"INFO"), vec![]);
        assert_eq!(tree.to_vec().expect("serialize"), b"LIST\x04\x00\x00\x00INFO");
    }

    #[test]
    fn emitted_length_matches_encoded_size() {
        let tree = Chunk::container(
            FourCc::RIFF,
            FourCc::new(*b"JUNK"),
            vec![
                Chunk::data(FourCc::new(*b"C0  "), &b"odd"[..]),
                Chunk::container(FourCc::LIST, FourCc::new(*b"INFO"), vec![]),
            ],
        );
        let bytes = tree.to_vec().expect("serialize");
        assert_eq!(bytes.len() as u64, tree.encoded_size());
    }
}
