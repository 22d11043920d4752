// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Bit-Packed Vectors** - *Immutable Document and Query Buffer Views*
//!
//! Read-only views over caller-owned byte buffers. A document packs one bit
//! per quantised dimension; a query packs four planes of the same bit-length,
//! laid out contiguously with plane `i` at byte offset `i * plane_len`.
//!
//! The views never copy or mutate: both borrow the caller's buffer for the
//! duration of a call (the kernels only read). Construction validates the
//! length contract once so the packed entry points can skip per-call checks.

use crate::errors::KernelError;

/// Number of query bit-planes. A protocol constant of the kernel, not a
/// runtime parameter: plane `i` carries weight `2^i`.
pub const QUERY_PLANES: usize = 4;

/// Immutable view over a 1-bit-quantised document vector.
///
/// The buffer holds `ceil(D / 8)` bytes for dimensionality `D`.
#[derive(Debug, Clone, Copy)]
pub struct BitDocument<'a> {
    bytes: &'a [u8],
}

impl<'a> BitDocument<'a> {
    /// Wraps a packed document buffer. Fails on an empty buffer.
    pub fn new(bytes: &'a [u8]) -> Result<Self, KernelError> {
        if bytes.is_empty() {
            return Err(KernelError::LengthMismatch(
                "document buffer must hold at least one byte".to_string(),
            ));
        }
        Ok(Self { bytes })
    }

    /// Length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false: construction rejects empty buffers.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The underlying packed bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Checked byte read at `offset`.
    pub fn byte(&self, offset: usize) -> Result<u8, KernelError> {
        self.bytes.get(offset).copied().ok_or_else(|| {
            KernelError::OutOfBounds(format!(
                "document byte offset {} outside length {}",
                offset,
                self.bytes.len()
            ))
        })
    }
}

/// Immutable view over a 4-plane bit-quantised query vector.
///
/// The buffer holds `QUERY_PLANES * plane_len` bytes; plane `i` occupies
/// `[i * plane_len, (i + 1) * plane_len)`.
#[derive(Debug, Clone, Copy)]
pub struct BitQuery<'a> {
    bytes: &'a [u8],
    plane_len: usize,
}

impl<'a> BitQuery<'a> {
    /// Wraps a packed query buffer of `QUERY_PLANES` planes of `plane_len`
    /// bytes each. Fails unless `bytes.len() == QUERY_PLANES * plane_len`
    /// with `plane_len >= 1`.
    pub fn new(bytes: &'a [u8], plane_len: usize) -> Result<Self, KernelError> {
        if plane_len == 0 {
            return Err(KernelError::LengthMismatch(
                "query plane must hold at least one byte".to_string(),
            ));
        }
        if bytes.len() != QUERY_PLANES * plane_len {
            return Err(KernelError::LengthMismatch(format!(
                "query buffer holds {} bytes, expected {} ({} planes of {})",
                bytes.len(),
                QUERY_PLANES * plane_len,
                QUERY_PLANES,
                plane_len
            )));
        }
        Ok(Self { bytes, plane_len })
    }

    /// Length of one plane, in bytes. Equals the matching document length.
    #[inline]
    #[must_use]
    pub fn plane_len(&self) -> usize {
        self.plane_len
    }

    /// The underlying packed bytes, all planes contiguous.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Checked view of plane `plane`.
    pub fn plane(&self, plane: usize) -> Result<&'a [u8], KernelError> {
        if plane >= QUERY_PLANES {
            return Err(KernelError::OutOfBounds(format!(
                "plane index {} outside {} planes",
                plane, QUERY_PLANES
            )));
        }
        let start = plane * self.plane_len;
        Ok(&self.bytes[start..start + self.plane_len])
    }

    /// Checked byte read at `offset` within plane `plane`.
    pub fn byte(&self, plane: usize, offset: usize) -> Result<u8, KernelError> {
        let plane = self.plane(plane)?;
        plane.get(offset).copied().ok_or_else(|| {
            KernelError::OutOfBounds(format!(
                "query byte offset {} outside plane length {}",
                offset, self.plane_len
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_rejects_empty() {
        assert!(matches!(
            BitDocument::new(&[]),
            Err(KernelError::LengthMismatch(_))
        ));
    }

    #[test]
    fn document_checked_access() {
        let buf = [0xF0u8, 0x0F];
        let doc = BitDocument::new(&buf).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.byte(1).unwrap(), 0x0F);
        assert!(matches!(doc.byte(2), Err(KernelError::OutOfBounds(_))));
    }

    #[test]
    fn query_length_contract() {
        let buf = [0u8; 8];
        assert!(BitQuery::new(&buf, 2).is_ok());
        assert!(matches!(
            BitQuery::new(&buf, 3),
            Err(KernelError::LengthMismatch(_))
        ));
        assert!(matches!(
            BitQuery::new(&buf, 0),
            Err(KernelError::LengthMismatch(_))
        ));
    }

    #[test]
    fn query_plane_addressing() {
        let buf: Vec<u8> = (0u8..12).collect();
        let q = BitQuery::new(&buf, 3).unwrap();
        assert_eq!(q.plane(0).unwrap(), &[0, 1, 2]);
        assert_eq!(q.plane(3).unwrap(), &[9, 10, 11]);
        assert_eq!(q.byte(2, 1).unwrap(), 7);
        assert!(matches!(q.plane(4), Err(KernelError::OutOfBounds(_))));
        assert!(matches!(q.byte(0, 3), Err(KernelError::OutOfBounds(_))));
    }
}
