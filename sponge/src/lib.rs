// Copyright (c) 2025 SAFE contributors
// This file is part of the SAFE library.

// You should have received a copy of the MIT License
// along with the SAFE library. If not, see <https://mit-license.org/>.

//! SAFE (Sponge API for Field Elements)
//!
//! A generic protocol for turning a fixed-width permutation over
//! finite-field elements into a transcript-based absorb/squeeze primitive,
//! suitable for commitments, Fiat-Shamir challenge derivation and PRF-style
//! output generation in proof systems whose inputs and outputs are native
//! field elements.
//!
//! The caller declares the full transcript shape (the IO pattern) up front,
//! then drives the [`SpongeEngine`] through `absorb`/`squeeze` calls that
//! must follow the declared pattern exactly; any divergence is a protocol
//! bug and is reported as an error. See the SAFE paper
//! <https://eprint.iacr.org/2023/522> for the security rationale.

#![no_std]
#![deny(missing_docs)]

mod engine;
pub mod errors;
pub mod tag;

pub use engine::SpongeEngine;
