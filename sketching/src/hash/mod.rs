// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Pluggable hashing and fingerprinting capabilities.
//!
//! Sketches never hash items themselves. They are generic over a [`Hashing`] type (and the
//! cuckoo filter additionally over a [`Fingerprinting`] type) whose associated functions map a
//! byte sequence to deterministic digests. Both capabilities are stateless: the same input yields
//! the same digests for the lifetime of the process.
//!
//! # Lanes
//!
//! Sketches that need several independent hash functions derive them from two base digests
//! `a, b` with enhanced double hashing (Dillinger and Manolios). Each 64-bit lane digest is
//! mixed and then scaled into range with a multiply-shift instead of a modulo, so a bound that
//! shares factors with `b` does not make the lanes cycle:
//!
//! ```text
//! x(i)    = a + i * b + (i^3 - i) / 6            (mod 2^64)
//! lane(i) = (fmix64(x(i)) * upper_bound) >> 64,  i = 1, 2, 3, ...
//! ```
//!
//! # Examples
//!
//! ```
//! # use sketching::hash::Hashing;
//! # use sketching::hash::Murmur3;
//! let lanes: Vec<u64> = Murmur3::lanes(b"apple", 1024).take(4).collect();
//! assert_eq!(lanes.len(), 4);
//! assert!(lanes.iter().all(|&lane| lane < 1024));
//! assert_eq!(lanes, Murmur3::lanes(b"apple", 1024).take(4).collect::<Vec<_>>());
//! ```

mod murmurhash;

pub use self::murmurhash::Murmur3;
use self::murmurhash::fmix64;

/// The seed 9001 used by [`Murmur3`] is a prime number that was chosen very early on in
/// experimental testing of the DataSketches library.
///
/// In order to merge two sketches it is critical that the same hash function and seed are used
/// for both, otherwise the assumed 1:1 relationship between the source item and the hashed bit
/// string would be violated.
pub(crate) const DEFAULT_UPDATE_SEED: u64 = 9001;

/// Maps a byte sequence to deterministic 64-bit digests.
pub trait Hashing {
    /// Returns two independent base digests of `bytes`.
    fn hash_pair(bytes: &[u8]) -> (u64, u64);

    /// Returns a single digest of `bytes`.
    fn hash(bytes: &[u8]) -> u64 {
        Self::hash_pair(bytes).0
    }

    /// Returns an unbounded iterator over the lanes of `bytes`, each in `[0, upper_bound)`.
    ///
    /// # Panics
    ///
    /// Panics if `upper_bound` is zero.
    fn lanes(bytes: &[u8], upper_bound: u64) -> Lanes {
        let (a, b) = Self::hash_pair(bytes);
        Lanes::new(a, b, upper_bound)
    }
}

/// Maps a byte sequence to a short fixed-size fingerprint.
pub trait Fingerprinting {
    /// Number of meaningful bytes produced by [`Fingerprinting::fingerprint`], at most 8.
    const MAX_FINGERPRINT_SIZE: usize;

    /// Returns the fingerprint of `bytes`.
    ///
    /// The fingerprint bytes are the little-endian bytes of the returned value. Only the lowest
    /// [`Fingerprinting::MAX_FINGERPRINT_SIZE`] bytes are meaningful.
    fn fingerprint(bytes: &[u8]) -> u64;
}

/// Iterator over the lanes derived from two base digests.
///
/// Created by [`Hashing::lanes`]. The iterator never ends; callers take as many lanes as they
/// have hash functions. Lanes of one item may repeat; callers that need distinct positions
/// resolve the repeats themselves.
#[derive(Debug, Clone)]
pub struct Lanes {
    x: u64,
    step: u64,
    upper_bound: u64,
    i: u64,
}

impl Lanes {
    /// Creates the lane iterator for base digests `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if `upper_bound` is zero.
    pub fn new(a: u64, b: u64, upper_bound: u64) -> Self {
        assert!(upper_bound > 0, "upper_bound must be at least 1");
        Self {
            x: a,
            step: b,
            upper_bound,
            i: 0,
        }
    }
}

impl Iterator for Lanes {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        // x(i) = x(i-1) + step(i-1) and step(i) = step(i-1) + i, which unrolls to
        // a + i*b + (i^3 - i)/6.
        self.i = self.i.wrapping_add(1);
        self.x = self.x.wrapping_add(self.step);
        self.step = self.step.wrapping_add(self.i);
        Some(scale(fmix64(self.x), self.upper_bound))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// Maps a uniform 64-bit value onto `[0, upper_bound)` by taking the high word of the product.
#[inline]
fn scale(hash: u64, upper_bound: u64) -> u64 {
    ((u128::from(hash) * u128::from(upper_bound)) >> 64) as u64
}

/// Reads an u64 from a byte slice in little-endian order.
///
/// # Panics
///
/// Panics if `bytes.len()` is greater than 8.
fn read_u64_le(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf[..bytes.len()].copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lanes_follow_enhanced_double_hashing() {
        let lanes: Vec<u64> = Lanes::new(3, 5, 7).take(4).collect();
        let expected: Vec<u64> = (1u64..=4)
            .map(|i| scale(fmix64(3 + 5 * i + (i * i * i - i) / 6), 7))
            .collect();
        assert_eq!(lanes, expected);
        assert_eq!(lanes, vec![1, 5, 4, 3]);
    }

    #[test]
    fn test_lanes_wrap_instead_of_overflowing() {
        let mut lanes = Lanes::new(u64::MAX, u64::MAX, 10);
        let expected = scale(fmix64(u64::MAX.wrapping_add(u64::MAX)), 10);
        assert_eq!(lanes.next(), Some(expected));
    }

    #[test]
    fn test_lanes_do_not_cycle_on_composite_bound() {
        // a + i*b mod 96 alternates between 48 and 0 for these digests
        let lanes: Vec<u64> = Lanes::new(0, 48, 96).take(7).collect();
        assert_eq!(lanes, vec![60, 39, 89, 49, 24, 44, 54]);
    }

    #[test]
    fn test_lanes_advance_with_zero_step() {
        let lanes: Vec<u64> = Lanes::new(1, 0, 1000).take(7).collect();
        assert_eq!(lanes, vec![704, 229, 837, 936, 226, 856, 813]);
    }

    #[test]
    fn test_scale_stays_in_range() {
        assert_eq!(scale(0, 96), 0);
        assert_eq!(scale(u64::MAX, 96), 95);
        assert_eq!(scale(u64::MAX, 1), 0);
    }

    #[test]
    #[should_panic(expected = "upper_bound must be at least 1")]
    fn test_lanes_reject_zero_bound() {
        Lanes::new(1, 2, 0);
    }

    #[test]
    fn test_read_u64_le_pads_short_input() {
        assert_eq!(read_u64_le(&[0x01, 0x02]), 0x0201);
        assert_eq!(read_u64_le(&[]), 0);
    }
}
