// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Error Types** - *Kernel Operation Error Handling*
//!
//! Error types for kernel operations with structured error reporting.
//!
//! ## Error Categories
//! - **Dimension Errors**: query/document length mismatches and empty buffers
//! - **Boundary Errors**: out-of-bounds plane or byte access
//! - **Validation Errors**: a kernel variant disagreeing with the scalar reference
//!
//! All errors include contextual message space for debugging.

use core::fmt;
use std::error::Error;

/// Error type for kernel entry points and buffer views.
///
/// Each variant includes a contextual message string providing specific details
/// about the error condition, enabling precise debugging and error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// Query/document byte-length mismatch or empty buffer.
    LengthMismatch(String),

    /// Plane index or byte offset outside the buffer.
    OutOfBounds(String),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::LengthMismatch(msg) => write!(f, "Length mismatch: {}", msg),
            KernelError::OutOfBounds(msg) => write!(f, "Out of bounds: {}", msg),
        }
    }
}

impl Error for KernelError {}

/// A kernel variant disagreed with the scalar reference during validation.
///
/// Produced only by the differential harness in [`crate::validate`]. Callers
/// must treat this as a fatal configuration/build defect: a lane-width path
/// that fails validation must never be used for measurement or production
/// scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchError {
    /// Registry name of the disagreeing variant.
    pub variant: &'static str,
    /// Dimensionality (in bits per plane) the mismatch was observed at.
    pub dims: usize,
    /// Score produced by the scalar reference.
    pub expected: u64,
    /// Score produced by the variant.
    pub actual: u64,
}

impl fmt::Display for MismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "kernel variant `{}` disagrees with scalar reference at dims={}: expected {}, got {}",
            self.variant, self.dims, self.expected, self.actual
        )
    }
}

impl Error for MismatchError {}
