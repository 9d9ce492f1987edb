// Copyright (c) 2025 SAFE contributors
// This file is part of the SAFE library.

// You should have received a copy of the MIT License
// along with the SAFE library. If not, see <https://mit-license.org/>.

//! SAFE tag derivation.
//!
//! The domain-separation tag fed to [`SpongeEngine::start`] binds a
//! transcript to both its IO pattern and a protocol-level domain
//! separator: two sponge instances with different patterns or different
//! domains behave like unrelated functions. Following SAFE spec 2.3, the
//! tag is the first 128 bits of a Keccak-256 digest over the aggregated,
//! big-endian-encoded IO pattern followed by a 64-byte domain separator.
//!
//! [`SpongeEngine::start`]: crate::SpongeEngine::start

use ark_ff::PrimeField;
use ark_std::vec::Vec;
use sha3::{Digest, Keccak256};

/// Length in bytes of the protocol domain separator.
pub const DOMAIN_SEPARATOR_LEN: usize = 64;

/// MSB flag marking an absorb word in the 32-bit encoding.
const ABSORB_FLAG: u32 = 0x8000_0000;
/// Call lengths occupy the low 31 bits of an encoded word.
const LEN_MASK: u32 = 0x7fff_ffff;

/// One declared call of an IO pattern, with its element count.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IoCall {
    /// Absorb this many field elements.
    Absorb(u32),
    /// Squeeze this many field elements.
    Squeeze(u32),
}

impl IoCall {
    /// Number of field elements moved by this call.
    pub fn len(&self) -> usize {
        match self {
            Self::Absorb(n) | Self::Squeeze(n) => *n as usize,
        }
    }

    /// Whether this call moves no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 32-bit wire encoding: MSB set for absorb, length in the low bits.
    fn encoded(&self) -> u32 {
        match self {
            Self::Absorb(n) => ABSORB_FLAG | (n & LEN_MASK),
            Self::Squeeze(n) => n & LEN_MASK,
        }
    }
}

/// Derive the per-call engine pattern from a call sequence, for feeding to
/// [`SpongeEngine::start`](crate::SpongeEngine::start).
pub fn lengths(calls: &[IoCall]) -> Vec<usize> {
    calls.iter().map(IoCall::len).collect()
}

/// Compute the domain-separation tag for a call sequence and a 64-byte
/// protocol domain separator.
///
/// Consecutive calls of the same kind are aggregated before hashing, so
/// e.g. `Absorb(1), Absorb(1), Squeeze(1)` and `Absorb(2), Squeeze(1)`
/// yield the same tag (they describe the same sponge behavior). The
/// 128-bit digest prefix is interpreted as a big-endian integer and
/// reduced into `F`.
pub fn compute_tag<F: PrimeField>(
    calls: &[IoCall],
    domain_separator: &[u8; DOMAIN_SEPARATOR_LEN],
) -> F {
    let words = aggregate(calls);

    let mut bytes = Vec::with_capacity(4 * words.len() + DOMAIN_SEPARATOR_LEN);
    for word in &words {
        bytes.extend_from_slice(&word.encoded().to_be_bytes());
    }
    bytes.extend_from_slice(domain_separator);

    let digest = Keccak256::digest(&bytes);
    F::from_be_bytes_mod_order(&digest[..16])
}

/// Merge runs of same-kind calls, dropping empty ones.
fn aggregate(calls: &[IoCall]) -> Vec<IoCall> {
    let mut words = Vec::new();
    let mut absorb_sum = 0u32;
    let mut squeeze_sum = 0u32;
    let mut last_was_absorb = false;

    for call in calls {
        match call {
            IoCall::Absorb(n) => {
                if last_was_absorb {
                    absorb_sum += n;
                } else {
                    if squeeze_sum > 0 {
                        words.push(IoCall::Squeeze(squeeze_sum));
                        squeeze_sum = 0;
                    }
                    absorb_sum = *n;
                }
                last_was_absorb = true;
            },
            // The all-zero word is not part of the encoding.
            IoCall::Squeeze(0) => {},
            IoCall::Squeeze(n) => {
                if last_was_absorb {
                    if absorb_sum > 0 {
                        words.push(IoCall::Absorb(absorb_sum));
                        absorb_sum = 0;
                    }
                    squeeze_sum = *n;
                } else {
                    squeeze_sum += n;
                }
                last_was_absorb = false;
            },
        }
    }

    if absorb_sum > 0 {
        words.push(IoCall::Absorb(absorb_sum));
    }
    if squeeze_sum > 0 {
        words.push(IoCall::Squeeze(squeeze_sum));
    }
    words
}
