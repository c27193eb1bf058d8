use crate::Error;
use arbitrary::Unstructured;
use rand::TryRngCore;

/// A source of uniformly distributed choices.
///
/// Every random decision made during generation goes through [`Selector::uniform`].
/// This is implemented for
/// - every `rand` generator, e.g. `OsRng` (fallible OS entropy), `ThreadRng`, or a
///   seeded `StdRng` for reproducible output,
/// - [`FromUnstructured`], to drive generation from fuzzer input.
pub trait Selector {
    /// Returns a uniformly chosen value in `[0, n)`, or `0` when `n <= 1`.
    ///
    /// Implementations never consult their source for `n <= 1`.
    fn below(&mut self, n: u64) -> Result<u64, Error>;

    /// Returns a uniformly chosen value in `[0, n)`.
    ///
    /// `n` of 0 or 1 has only one answer, so `0` is returned without consuming any entropy.
    fn uniform(&mut self, n: u64) -> Result<u64, Error> {
        if n <= 1 {
            return Ok(0);
        }
        self.below(n)
    }

    /// Returns `true` with probability 1/2.
    fn coin(&mut self) -> Result<bool, Error> {
        Ok(self.uniform(2)? == 1)
    }
}

impl<R: TryRngCore + ?Sized> Selector for R {
    fn below(&mut self, n: u64) -> Result<u64, Error> {
        if n <= 1 {
            return Ok(0);
        }
        // Draws under `2^64 % n` would favour the low residues.
        let threshold = n.wrapping_neg() % n;
        loop {
            let x = self.try_next_u64().map_err(Error::entropy)?;
            if x >= threshold {
                return Ok(x % n);
            }
        }
    }
}

/// Makes choices from the bytes of an [`Unstructured`](https://docs.rs/arbitrary/latest/arbitrary/struct.Unstructured.html).
///
/// Once the data runs out every choice is `0`, so generation always terminates.
#[derive(Debug)]
pub struct FromUnstructured<'a, 'b>(pub &'b mut Unstructured<'a>);

impl Selector for FromUnstructured<'_, '_> {
    fn below(&mut self, n: u64) -> Result<u64, Error> {
        if n <= 1 {
            return Ok(0);
        }
        self.0.int_in_range(0..=n - 1).map_err(Error::entropy)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ErrorKind;
    use rand::{rngs::StdRng, SeedableRng};
    use std::io;

    /// A generator whose entropy source is always unavailable.
    pub(crate) struct Broken;

    impl TryRngCore for Broken {
        type Error = io::Error;

        fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
            Err(io::Error::other("no entropy"))
        }
        fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
            Err(io::Error::other("no entropy"))
        }
        fn try_fill_bytes(&mut self, _: &mut [u8]) -> Result<(), Self::Error> {
            Err(io::Error::other("no entropy"))
        }
    }

    #[test]
    fn trivial_bounds_skip_source() {
        assert_eq!(Broken.uniform(0), Ok(0));
        assert_eq!(Broken.uniform(1), Ok(0));
    }

    #[test]
    fn below_trivial_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(rng.below(0), Ok(0));
        assert_eq!(rng.below(1), Ok(0));
        assert_eq!(Broken.below(0), Ok(0));

        let mut u = Unstructured::new(&[0xff; 8]);
        let mut s = FromUnstructured(&mut u);
        assert_eq!(s.below(0), Ok(0));
        assert_eq!(s.below(1), Ok(0));
    }

    #[test]
    fn broken_source_fails() {
        let err = Broken.uniform(2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EntropyUnavailable);
        assert_eq!(err.to_string(), "Entropy unavailable: no entropy");
        assert_eq!(Broken.coin().unwrap_err().kind(), ErrorKind::EntropyUnavailable);
    }

    #[test]
    fn in_range_and_covers_all() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in [2u64, 3, 7, 10, 95, 96] {
            let mut seen = vec![false; n as usize];
            for _ in 0..100 * n {
                let x = rng.uniform(n).unwrap();
                assert!(x < n);
                seen[x as usize] = true;
            }
            assert!(seen.iter().all(|&s| s), "n = {}", n);
        }
        assert!(rng.uniform(u64::MAX).unwrap() < u64::MAX);
    }

    #[test]
    fn roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; 5];
        let trials = 50_000;
        for _ in 0..trials {
            counts[rng.uniform(5).unwrap() as usize] += 1;
        }
        for c in counts {
            let freq = c as f64 / trials as f64;
            assert!((freq - 0.2).abs() < 0.02, "freq = {}", freq);
        }
    }

    #[test]
    fn os_rng() {
        let mut rng = rand::rngs::OsRng;
        for _ in 0..100 {
            assert!(rng.uniform(10).unwrap() < 10);
        }
    }

    #[test]
    fn unstructured_is_deterministic() {
        let data = b"qwertyqwertyqwertyqwertyqwerty";
        let first: Vec<u64> = {
            let mut u = Unstructured::new(data);
            let mut s = FromUnstructured(&mut u);
            (0..10).map(|_| s.uniform(100).unwrap()).collect()
        };
        let mut u = Unstructured::new(data);
        let mut s = FromUnstructured(&mut u);
        let second: Vec<u64> = (0..10).map(|_| s.uniform(100).unwrap()).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|&x| x < 100));
    }

    #[test]
    fn unstructured_exhausted_picks_zero() {
        let mut u = Unstructured::new(&[]);
        let mut s = FromUnstructured(&mut u);
        assert_eq!(s.uniform(100), Ok(0));
    }
}
