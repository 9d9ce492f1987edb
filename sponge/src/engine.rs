// Copyright (c) 2025 SAFE contributors
// This file is part of the SAFE library.

// You should have received a copy of the MIT License
// along with the SAFE library. If not, see <https://mit-license.org/>.

//! The SAFE absorb/squeeze state machine.

use ark_ff::PrimeField;
use ark_std::vec::Vec;
use core::marker::PhantomData;
use safe_permutation::SpongePermutation;
use zeroize::Zeroize;

use crate::errors::SafeError;

/// A SAFE sponge engine.
///
/// # Generic parameters
/// - `F`: field choice
/// - `P`: the underlying permutation
/// - `N`: state size = rate + capacity
/// - `R`: rate (number of field elements absorbed/squeezed per permutation)
///
/// The capacity occupies the first `N - R` state lanes and is never written
/// by message data; the rate occupies the remaining `R` lanes. The
/// reference SAFE configuration over a 254-bit field is `N = 4`, `R = 3`.
///
/// The engine is a value-type state machine with a single logical owner:
/// all mutation goes through `&mut self`, so two call sites can never
/// operate on divergent views of the same transcript. It holds no shared
/// state and does no locking; concurrent use requires one engine per
/// thread.
#[derive(Clone, Debug)]
pub struct SpongeEngine<F, P, const N: usize, const R: usize>
where
    F: PrimeField,
    P: SpongePermutation<F, N>,
{
    /// Permutation state, capacity lanes first.
    state: [F; N],
    /// Declared length of every absorb/squeeze call, in call order.
    io_pattern: Vec<usize>,
    /// Number of absorb/squeeze calls made so far.
    io_count: usize,
    /// Write cursor into the rate region, in `[0, R]`.
    absorb_pos: usize,
    /// Read cursor into the rate region; `R` forces a permutation before
    /// the next read.
    squeeze_pos: usize,
    /// All elements squeezed over the engine's lifetime.
    out: Vec<F>,
    _perm: PhantomData<P>,
}

impl<F, P, const N: usize, const R: usize> SpongeEngine<F, P, N, R>
where
    F: PrimeField,
    P: SpongePermutation<F, N>,
{
    const CAPACITY: usize = N - R;

    /// Start a transcript with the given IO pattern and domain-separation
    /// tag.
    ///
    /// `io_pattern` declares the exact length of every subsequent absorb or
    /// squeeze call, in call order; it is fixed for the life of the engine.
    /// `tag` is written into capacity lane 0, so engines started with
    /// different tags (or patterns hashed into different tags, see
    /// [`crate::tag::compute_tag`]) produce unrelated transcripts for the
    /// same message content.
    pub fn start(io_pattern: Vec<usize>, tag: F) -> Self {
        assert!(N >= 2 && R > 0 && N > R);
        // For b-bit security the capacity must satisfy C*|F| >= 2b;
        // require at least 100-bit security, as in the Poseidon2 paper.
        assert!((N - R) as u32 * F::MODULUS_BIT_SIZE >= 200);

        let mut state = [F::zero(); N];
        state[0] = tag;
        Self {
            state,
            io_pattern,
            io_count: 0,
            absorb_pos: 0,
            squeeze_pos: 0,
            out: Vec::new(),
            _perm: PhantomData,
        }
    }

    /// Absorb `input` into the rate region, permuting whenever the rate is
    /// exhausted mid-call.
    ///
    /// `input.len()` must equal the length declared for this step of the IO
    /// pattern; this is the enforcement mechanism preventing two parties'
    /// transcripts from silently diverging in shape. Elements are added
    /// into the existing rate lanes rather than overwriting them, so
    /// absorption composes with whatever permutation output already
    /// occupies the state.
    pub fn absorb(&mut self, input: &[F]) -> Result<(), SafeError> {
        let declared = self.declared_len()?;
        if input.len() != declared {
            return Err(SafeError::PatternMismatch {
                step: self.io_count,
                declared,
                got: input.len(),
            });
        }

        for elem in input {
            if self.absorb_pos == R {
                P::permute(&mut self.state);
                self.absorb_pos = 0;
            }
            self.state[Self::CAPACITY + self.absorb_pos] += elem;
            self.absorb_pos += 1;
        }

        self.io_count += 1;
        // Duplexing rule: absorbed data must pass through one permutation
        // before it can be read back out.
        self.squeeze_pos = R;
        Ok(())
    }

    /// Squeeze the number of elements declared for this step of the IO
    /// pattern.
    ///
    /// Returns the cumulative output accumulator: every element squeezed
    /// since `start`, not just this call's batch. Callers wanting only the
    /// latest batch must slice the tail themselves. (Kept deliberately for
    /// parity with the reference SAFE behavior.)
    pub fn squeeze(&mut self) -> Result<Vec<F>, SafeError> {
        let declared = self.declared_len()?;

        for _ in 0..declared {
            if self.squeeze_pos == R {
                P::permute(&mut self.state);
                self.squeeze_pos = 0;
                // Writes after a squeeze must also land on a freshly
                // permuted state.
                self.absorb_pos = 0;
            }
            self.out.push(self.state[Self::CAPACITY + self.squeeze_pos]);
            self.squeeze_pos += 1;
        }

        self.io_count += 1;
        Ok(self.out.clone())
    }

    /// Sanitize the engine: zeroize the state, drop the output accumulator
    /// and the pattern, and reset all cursors.
    ///
    /// Idempotent. After `finish` the pattern length is zero, so any
    /// further absorb or squeeze fails with
    /// [`SafeError::PatternExhausted`].
    pub fn finish(&mut self) {
        self.zeroize();
    }

    fn declared_len(&self) -> Result<usize, SafeError> {
        self.io_pattern
            .get(self.io_count)
            .copied()
            .ok_or(SafeError::PatternExhausted {
                declared: self.io_pattern.len(),
            })
    }
}

impl<F, P, const N: usize, const R: usize> Zeroize for SpongeEngine<F, P, N, R>
where
    F: PrimeField,
    P: SpongePermutation<F, N>,
{
    fn zeroize(&mut self) {
        self.state.zeroize();
        self.io_pattern.zeroize();
        self.out.zeroize();
        self.io_count = 0;
        self.absorb_pos = 0;
        self.squeeze_pos = 0;
    }
}
