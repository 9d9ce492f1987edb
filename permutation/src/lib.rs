// Copyright (c) 2025 SAFE contributors
// This file is part of the SAFE library.

// You should have received a copy of the MIT License
// along with the SAFE library. If not, see <https://mit-license.org/>.

//! Trait definition for the permutation underlying a SAFE sponge.
//!
//! The sponge treats the permutation as an opaque, fixed-width mixing
//! function over field elements; its internal algebra (S-boxes, MDS
//! matrices, round constants) lives in instantiation crates such as
//! `safe-poseidon2`. Self-declared here for minimal dependency and easier
//! future upgradability.
#![no_std]
#![deny(missing_docs)]

use ark_ff::PrimeField;

/// A fixed-width, deterministic permutation over `N` field elements.
///
/// Implementations must be pure: the output state is a function of the
/// input state alone. For the security properties SAFE relies on, the
/// permutation is assumed collision-resistant and indistinguishable from a
/// random permutation.
pub trait SpongePermutation<F: PrimeField, const N: usize> {
    /// Apply the permutation to `state` in place.
    fn permute(state: &mut [F; N]);
}
