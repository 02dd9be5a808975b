// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Kernel-wide error type.
//!
//! Almost everything in the kernel is either infallible or fatal (see
//! the panic sink in [`crate::console`]). `process_create` against a
//! full process table is the one operation a caller can sensibly
//! recover from, so it is the only thing that returns a `Result`.

use core::fmt;

/// The single recoverable failure mode exposed by this kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    /// `process_create` was called with no free process-table slot.
    ProcessTableFull,
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::ProcessTableFull => write!(f, "process table full"),
        }
    }
}

/// Shorthand for this kernel's one fallible result shape.
pub type KernelResult<T> = Result<T, KernelError>;
