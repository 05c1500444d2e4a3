//! Four-character chunk identifiers

use std::fmt;

use crate::error::{Result, RiffError};

/// 4-byte chunk identifier (FourCC)
///
/// RIFF chunk names are raw bytes: conventionally printable ASCII such as
/// `RIFF` or `fmt `, but the format does not require it. The only invariant
/// is the length, and the type enforces it — a `FourCc` that exists is
/// always exactly four bytes, so a wrong-length identifier can never be
/// assigned to a chunk field.
///
/// # Examples
///
/// ```
/// use riff_tree::FourCc;
///
/// let id = FourCc::new(*b"fmt ");
/// assert_eq!(id.to_string(), "fmt ");
///
/// // Fallible construction from a slice fails fast on bad lengths
/// assert!(FourCc::from_bytes(b"AB").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCc(pub [u8; 4]);

impl FourCc {
    /// The `RIFF` framing keyword used by top-level containers
    pub const RIFF: Self = Self(*b"RIFF");

    /// The `LIST` framing keyword used by nested containers
    pub const LIST: Self = Self(*b"LIST");

    /// Creates an identifier from exactly four bytes
    #[must_use]
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Creates an identifier from a byte slice
    ///
    /// Fails with [`RiffError::InvalidId`] unless the slice is exactly four
    /// bytes. This is the fail-fast point for the length invariant.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match <[u8; 4]>::try_from(bytes) {
            Ok(array) => Ok(Self(array)),
            Err(_) => Err(RiffError::InvalidId { len: bytes.len() }),
        }
    }

    /// Returns the raw identifier bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<[u8; 4]> for FourCc {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl From<&[u8; 4]> for FourCc {
    fn from(bytes: &[u8; 4]) -> Self {
        Self(*bytes)
    }
}

impl TryFrom<&[u8]> for FourCc {
    type Error = RiffError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in &self.0 {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{byte:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCc(\"{self}\")")
    }
}
