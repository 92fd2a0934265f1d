//! Fast Hadamard Transform (FHT) module
//! Walsh-Hadamard butterfly with plain and unitary normalization for f32/f64
//! no_std + alloc compatible

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::num::Float;

/// Errors that can occur while planning or executing a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FhtError {
    /// The length is zero, not a power of two, or its exponent overflowed.
    InvalidLength,
    /// Source or destination buffer length differs from the planned length.
    MismatchedLengths,
    /// A plan's scratch buffer no longer matches its bound length.
    ScratchSizeMismatch,
}

/// Display implementation for [`FhtError`] providing human-readable messages.
impl core::fmt::Display for FhtError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FhtError::InvalidLength => write!(f, "length is not a power of two"),
            FhtError::MismatchedLengths => {
                write!(f, "buffer length does not match transform length")
            }
            FhtError::ScratchSizeMismatch => {
                write!(f, "scratch buffer does not match transform length")
            }
        }
    }
}

/// Implement the standard error trait when the `std` feature is enabled so
/// errors can seamlessly integrate with typical Rust error handling.
#[cfg(feature = "std")]
impl std::error::Error for FhtError {}

/// Smallest exponent `n` with `2^n >= sz`, or `None` when `2^n` would not
/// fit in `usize`.
pub fn ceil_log2(sz: usize) -> Option<u32> {
    if sz <= 1 {
        return Some(0);
    }
    let n = usize::BITS - (sz - 1).leading_zeros();
    if n < usize::BITS {
        Some(n)
    } else {
        None
    }
}

/// Exponent `n` with `2^n == sz` exactly, or `None` for lengths the
/// transform rejects (zero, non-powers of two, exponent overflow).
pub fn exponent_for(sz: usize) -> Option<u32> {
    let n = ceil_log2(sz)?;
    if 1usize << n == sz {
        Some(n)
    } else {
        None
    }
}

/// `2^(-n/2)`, the scale that makes the transform self-inverse.
fn unitary_scale<T: Float>(exponent: u32) -> T {
    let inv_sqrt2 = T::one() / (T::one() + T::one()).sqrt();
    let mut scale = T::one();
    for _ in 0..exponent {
        scale = scale * inv_sqrt2;
    }
    scale
}

/// `1/N` as `(1/2)^n`, exact for power-of-two lengths.
fn inverse_scale<T: Float>(exponent: u32) -> T {
    let half = T::from_f32(0.5);
    let mut scale = T::one();
    for _ in 0..exponent {
        scale = scale * half;
    }
    scale
}

/// Core butterfly over caller-provided storage.
///
/// Runs `exponent` sum/difference stages ping-ponged between the two scratch
/// buffers, then writes the (optionally unitary-scaled) result into `dst`.
/// Allocates nothing; all four buffers must share one length.
fn butterfly<T: Float>(
    dst: &mut [T],
    src: &[T],
    exponent: u32,
    scratch0: &mut [T],
    scratch1: &mut [T],
    unitary: bool,
) -> Result<(), FhtError> {
    let sz = scratch0.len();
    if scratch1.len() != sz {
        return Err(FhtError::ScratchSizeMismatch);
    }
    if src.len() != sz || dst.len() != sz {
        return Err(FhtError::MismatchedLengths);
    }
    debug_assert_eq!(1usize << exponent, sz);

    scratch0.copy_from_slice(src);
    let mut front: &mut [T] = scratch0;
    let mut back: &mut [T] = scratch1;

    // Writes go to the other buffer, so reads within a stage never observe
    // that stage's results.
    let mut step = sz / 2;
    while step > 0 {
        let skip = step * 2;
        let mut base = 0;
        while base < sz {
            for j in 0..step {
                let a = front[base + j];
                let b = front[base + step + j];
                back[base + j] = a + b;
                back[base + step + j] = a - b;
            }
            base += skip;
        }
        core::mem::swap(&mut front, &mut back);
        step /= 2;
    }

    if unitary {
        let scale = unitary_scale::<T>(exponent);
        for (out, &val) in dst.iter_mut().zip(front.iter()) {
            *out = val * scale;
        }
    } else {
        dst.copy_from_slice(front);
    }
    Ok(())
}

/// Execution plan bound to one transform length.
///
/// Owns the two scratch buffers the butterfly ping-pongs between, so repeated
/// transforms at the same length never reallocate. Construction never fails:
/// an invalid length is recorded and reported by the first call instead.
pub struct FhtPlan<T: Float> {
    size: usize,
    exponent: Option<u32>,
    scratch0: Vec<T>,
    scratch1: Vec<T>,
}

impl<T: Float> FhtPlan<T> {
    pub fn new(size: usize) -> Self {
        let exponent = exponent_for(size);
        #[cfg(feature = "verbose-logging")]
        log::trace!("fht plan: size={} exponent={:?}", size, exponent);
        Self {
            size,
            exponent,
            scratch0: vec![T::zero(); size],
            scratch1: vec![T::zero(); size],
        }
    }

    /// Length this plan is bound to.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the bound length is an exact power of two.
    pub fn is_valid(&self) -> bool {
        self.exponent.is_some()
    }

    fn run(&mut self, dst: &mut [T], src: &[T], unitary: bool) -> Result<(), FhtError> {
        let exponent = self.exponent.ok_or(FhtError::InvalidLength)?;
        if self.scratch0.len() != self.size || self.scratch1.len() != self.size {
            return Err(FhtError::ScratchSizeMismatch);
        }
        butterfly(
            dst,
            src,
            exponent,
            &mut self.scratch0,
            &mut self.scratch1,
            unitary,
        )
    }

    /// Forward transform of `src` into `dst`.
    pub fn fht(&mut self, dst: &mut [T], src: &[T], unitary: bool) -> Result<(), FhtError> {
        self.run(dst, src, unitary)
    }

    /// Inverse transform of `src` into `dst`.
    ///
    /// The unitary transform is its own inverse; the plain inverse divides
    /// the plain forward result by the transform length.
    pub fn ifht(&mut self, dst: &mut [T], src: &[T], unitary: bool) -> Result<(), FhtError> {
        if unitary {
            return self.run(dst, src, true);
        }
        let exponent = self.exponent.ok_or(FhtError::InvalidLength)?;
        self.run(dst, src, false)?;
        let scale = inverse_scale::<T>(exponent);
        for out in dst.iter_mut() {
            *out = *out * scale;
        }
        Ok(())
    }
}

/// Planner caching one [`FhtPlan`] per requested length.
///
/// The multi-length counterpart of a single plan: mixed workloads keep their
/// scratch buffers across calls once each length has been planned.
pub struct FhtPlanner<T: Float> {
    plans: HashMap<usize, FhtPlan<T>>,
}

impl<T: Float> Default for FhtPlanner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> FhtPlanner<T> {
    pub fn new() -> Self {
        Self {
            plans: HashMap::new(),
        }
    }

    /// Retrieve the cached plan for `size`, creating it on first request.
    pub fn plan(&mut self, size: usize) -> &mut FhtPlan<T> {
        self.plans.entry(size).or_insert_with(|| FhtPlan::new(size))
    }

    /// Forward transform routed through the cached plan for `src.len()`.
    pub fn fht(&mut self, dst: &mut [T], src: &[T], unitary: bool) -> Result<(), FhtError> {
        self.plan(src.len()).fht(dst, src, unitary)
    }

    /// Inverse transform routed through the cached plan for `src.len()`.
    pub fn ifht(&mut self, dst: &mut [T], src: &[T], unitary: bool) -> Result<(), FhtError> {
        self.plan(src.len()).ifht(dst, src, unitary)
    }
}

/// Forward Fast Hadamard Transform of `src` into `dst`.
///
/// Builds a one-shot [`FhtPlan`] per call; hold a plan (or a [`FhtPlanner`])
/// instead when transforming the same length repeatedly.
pub fn fht<T: Float>(dst: &mut [T], src: &[T], unitary: bool) -> Result<(), FhtError> {
    FhtPlan::new(src.len()).fht(dst, src, unitary)
}

/// Inverse Fast Hadamard Transform of `src` into `dst`.
pub fn ifht<T: Float>(dst: &mut [T], src: &[T], unitary: bool) -> Result<(), FhtError> {
    FhtPlan::new(src.len()).ifht(dst, src, unitary)
}

/// Zero-pad `input` up to the next power-of-two length.
///
/// The transform itself rejects other lengths; padding is the caller's
/// explicit choice. An empty input pads to a single zero.
pub fn fht_pad<T: Float>(input: &[T]) -> Result<Vec<T>, FhtError> {
    let n = ceil_log2(input.len()).ok_or(FhtError::InvalidLength)?;
    let mut padded = vec![T::zero(); 1usize << n];
    padded[..input.len()].copy_from_slice(input);
    Ok(padded)
}

/// Batch forward transform, in place over each buffer.
pub fn batch<T: Float>(
    planner: &mut FhtPlanner<T>,
    batches: &mut [Vec<T>],
    unitary: bool,
) -> Result<(), FhtError> {
    let mut out: Vec<T> = Vec::new();
    for buf in batches.iter_mut() {
        out.resize(buf.len(), T::zero());
        planner.fht(&mut out, buf, unitary)?;
        buf.copy_from_slice(&out);
    }
    Ok(())
}

/// Batch inverse transform, in place over each buffer.
pub fn batch_inverse<T: Float>(
    planner: &mut FhtPlanner<T>,
    batches: &mut [Vec<T>],
    unitary: bool,
) -> Result<(), FhtError> {
    let mut out: Vec<T> = Vec::new();
    for buf in batches.iter_mut() {
        out.resize(buf.len(), T::zero());
        planner.ifht(&mut out, buf, unitary)?;
        buf.copy_from_slice(&out);
    }
    Ok(())
}

/// Multi-channel forward transform.
pub fn multi_channel<T: Float>(
    planner: &mut FhtPlanner<T>,
    channels: &mut [Vec<T>],
    unitary: bool,
) -> Result<(), FhtError> {
    batch(planner, channels, unitary)
}

/// Multi-channel inverse transform.
pub fn multi_channel_inverse<T: Float>(
    planner: &mut FhtPlanner<T>,
    channels: &mut [Vec<T>],
    unitary: bool,
) -> Result<(), FhtError> {
    batch_inverse(planner, channels, unitary)
}

/// MCU/stack-only, const-generic forward transform (no heap, no alloc).
///
/// Copies `input` into `output` and butterflies it in place; each pairwise
/// exchange reads both elements before writing either, so no scratch is
/// needed. `N` must be a power of two.
pub fn fht_inplace_stack<const N: usize>(
    input: &[f32; N],
    output: &mut [f32; N],
    unitary: bool,
) -> Result<(), FhtError> {
    let exponent = exponent_for(N).ok_or(FhtError::InvalidLength)?;
    output.copy_from_slice(input);
    let mut half = 1;
    while half < N {
        let mut base = 0;
        while base < N {
            for j in base..base + half {
                let a = output[j];
                let b = output[j + half];
                output[j] = a + b;
                output[j + half] = a - b;
            }
            base += half * 2;
        }
        half *= 2;
    }
    if unitary {
        let scale = unitary_scale::<f32>(exponent);
        for out in output.iter_mut() {
            *out *= scale;
        }
    }
    Ok(())
}

/// MCU/stack-only, const-generic inverse transform (no heap, no alloc).
pub fn ifht_inplace_stack<const N: usize>(
    input: &[f32; N],
    output: &mut [f32; N],
    unitary: bool,
) -> Result<(), FhtError> {
    if unitary {
        return fht_inplace_stack(input, output, true);
    }
    let exponent = exponent_for(N).ok_or(FhtError::InvalidLength)?;
    fht_inplace_stack(input, output, false)?;
    let scale = inverse_scale::<f32>(exponent);
    for out in output.iter_mut() {
        *out *= scale;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponent_for_accepts_exact_powers() {
        assert_eq!(exponent_for(1), Some(0));
        assert_eq!(exponent_for(2), Some(1));
        assert_eq!(exponent_for(8), Some(3));
        assert_eq!(exponent_for(1 << 20), Some(20));
    }

    #[test]
    fn exponent_for_rejects_everything_else() {
        for sz in [0usize, 3, 5, 6, 7, 9, 100] {
            assert_eq!(exponent_for(sz), None, "sz = {}", sz);
        }
        // Largest representable power and the first length past it.
        assert_eq!(exponent_for(1usize << (usize::BITS - 1)), Some(usize::BITS - 1));
        assert_eq!(exponent_for((1usize << (usize::BITS - 1)) + 1), None);
        assert_eq!(exponent_for(usize::MAX), None);
    }

    #[test]
    fn known_vector_plain() {
        let x = [1.0f32, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0];
        let mut y = [0.0f32; 8];
        fht(&mut y, &x, false).unwrap();
        assert_eq!(y, [4.0, 2.0, 0.0, -2.0, 0.0, 2.0, 0.0, 2.0]);
    }

    #[test]
    fn plain_double_application_scales_by_len() {
        let x = [1.0f32, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0];
        let mut y = [0.0f32; 8];
        let mut z = [0.0f32; 8];
        fht(&mut y, &x, false).unwrap();
        fht(&mut z, &y, false).unwrap();
        for (a, b) in x.iter().zip(z.iter()) {
            assert!((a * 8.0 - b).abs() < 1e-5, "{} vs {}", a, b);
        }
    }

    #[test]
    fn plain_roundtrip() {
        let x = [1.0f32, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0];
        let mut y = [0.0f32; 8];
        let mut z = [0.0f32; 8];
        fht(&mut y, &x, false).unwrap();
        ifht(&mut z, &y, false).unwrap();
        for (a, b) in x.iter().zip(z.iter()) {
            assert!((a - b).abs() < 1e-6, "{} vs {}", a, b);
        }
    }

    #[test]
    fn unitary_is_involution() {
        let x = [1.0f32, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0];
        let mut y = [0.0f32; 8];
        let mut z = [0.0f32; 8];
        fht(&mut y, &x, true).unwrap();
        fht(&mut z, &y, true).unwrap();
        for (a, b) in x.iter().zip(z.iter()) {
            assert!((a - b).abs() < 1e-6, "{} vs {}", a, b);
        }
    }

    #[test]
    fn single_element_is_identity() {
        let x = [42.0f32];
        let mut y = [0.0f32];
        fht(&mut y, &x, false).unwrap();
        assert_eq!(y, x);
        fht(&mut y, &x, true).unwrap();
        assert_eq!(y, x);
    }
}



#[cfg(all(feature = "internal-tests", test))]
mod coverage_tests {
    use super::*;
    use alloc::format;
    use proptest::prelude::*;

    #[test]
    fn random_roundtrip_seeded() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};
        let mut rng = StdRng::seed_from_u64(42);
        for exp in 0..12u32 {
            let n = 1usize << exp;
            let x: Vec<f64> = (0..n).map(|_| rng.gen_range(-10.0..10.0)).collect();
            let mut y = vec![0.0f64; n];
            let mut z = vec![0.0f64; n];
            fht(&mut y, &x, false).unwrap();
            ifht(&mut z, &y, false).unwrap();
            for (a, b) in x.iter().zip(z.iter()) {
                assert!((a - b).abs() < 1e-9, "n = {}: {} vs {}", n, a, b);
            }
            fht(&mut y, &x, true).unwrap();
            fht(&mut z, &y, true).unwrap();
            for (a, b) in x.iter().zip(z.iter()) {
                assert!((a - b).abs() < 1e-9, "n = {}: {} vs {}", n, a, b);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_plain_roundtrip_f32(exp in 0u32..9, ref signal in proptest::collection::vec(-100.0f32..100.0, 256)) {
            let n = 1usize << exp;
            let x: Vec<f32> = signal.iter().take(n).cloned().collect();
            let mut y = vec![0.0f32; n];
            let mut z = vec![0.0f32; n];
            fht(&mut y, &x, false).unwrap();
            ifht(&mut z, &y, false).unwrap();
            for (a, b) in x.iter().zip(z.iter()) {
                prop_assert!((a - b).abs() < 1e-1);
            }
        }

        #[test]
        fn prop_unitary_involution_f64(exp in 0u32..11, ref signal in proptest::collection::vec(-1000.0f64..1000.0, 1024)) {
            let n = 1usize << exp;
            let x: Vec<f64> = signal.iter().take(n).cloned().collect();
            let mut y = vec![0.0f64; n];
            let mut z = vec![0.0f64; n];
            fht(&mut y, &x, true).unwrap();
            fht(&mut z, &y, true).unwrap();
            for (a, b) in x.iter().zip(z.iter()) {
                prop_assert!((a - b).abs() < 1e-8);
            }
        }

        #[test]
        fn prop_pad_then_transform_succeeds(ref signal in proptest::collection::vec(-100.0f32..100.0, 1..100)) {
            let padded = fht_pad(signal).unwrap();
            prop_assert!(padded.len().is_power_of_two());
            prop_assert!(padded.len() >= signal.len());
            let mut y = vec![0.0f32; padded.len()];
            prop_assert!(fht(&mut y, &padded, false).is_ok());
        }
    }
}
