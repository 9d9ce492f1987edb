// Copyright (c) 2025 SAFE contributors
// This file is part of the SAFE library.

// You should have received a copy of the MIT License
// along with the SAFE library. If not, see <https://mit-license.org/>.

//! Error types.

// using `displaydoc` instead of `thiserror`, see
// https://github.com/dtolnay/thiserror/pull/64#issuecomment-735805334
// `thiserror` does not support #![no_std]

use displaydoc::Display;

/// Failure modes of a SAFE transcript.
///
/// Both variants signal a protocol-implementation bug rather than a
/// transient condition: every sponge operation is deterministic, so
/// retrying reproduces the same error. An engine that has returned an
/// error must be discarded.
#[derive(Debug, Display, Eq, PartialEq)]
pub enum SafeError {
    /// call length {got} differs from declared length {declared} at IO step {step}
    PatternMismatch {
        /// Index of the offending call in the IO pattern
        step: usize,
        /// Length declared for this step at `start`
        declared: usize,
        /// Length actually supplied by the caller
        got: usize,
    },
    /// IO pattern exhausted: all {declared} declared calls already made
    PatternExhausted {
        /// Total number of calls declared at `start`
        declared: usize,
    },
}

impl ark_std::error::Error for SafeError {}
