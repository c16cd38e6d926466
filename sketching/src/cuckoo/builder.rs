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

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::CuckooFilter;
use crate::hash::Fingerprinting;
use crate::hash::Hashing;

/// Default number of fingerprints per bucket.
pub const DEFAULT_BUCKET_SIZE: usize = 4;
/// Default fingerprint size in bytes.
pub const DEFAULT_FINGERPRINT_SIZE: usize = 1;
/// Default bound on the number of relocations attempted by a single insertion.
pub const DEFAULT_EVICTIONS_LIMIT: usize = 500;

/// Builder for creating [`CuckooFilter`] instances.
///
/// # Examples
///
/// ```
/// # use sketching::cuckoo::CuckooFilterBuilder;
/// # use sketching::hash::Murmur3;
/// let filter = CuckooFilterBuilder::new(1000)
///     .bucket_size(2)
///     .fingerprint_size(2)
///     .build_with_seed::<Murmur3, Murmur3>(42);
///
/// assert_eq!(filter.capacity(), 1000);
/// assert_eq!(filter.bucket_size(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuckooFilterBuilder {
    capacity: usize,
    bucket_size: usize,
    fingerprint_size: usize,
    evictions_limit: usize,
}

impl CuckooFilterBuilder {
    /// Creates a builder for a filter of exactly `capacity` buckets.
    pub fn new(capacity: usize) -> Self {
        CuckooFilterBuilder {
            capacity,
            bucket_size: DEFAULT_BUCKET_SIZE,
            fingerprint_size: DEFAULT_FINGERPRINT_SIZE,
            evictions_limit: DEFAULT_EVICTIONS_LIMIT,
        }
    }

    /// Sets the number of fingerprints per bucket (default: 4).
    pub fn bucket_size(mut self, bucket_size: usize) -> Self {
        self.bucket_size = bucket_size;
        self
    }

    /// Sets the fingerprint size in bytes (default: 1).
    ///
    /// Smaller fingerprints save space but raise the false positive rate.
    pub fn fingerprint_size(mut self, fingerprint_size: usize) -> Self {
        self.fingerprint_size = fingerprint_size;
        self
    }

    /// Sets the bound on relocations per insertion (default: 500).
    pub fn evictions_limit(mut self, evictions_limit: usize) -> Self {
        self.evictions_limit = evictions_limit;
        self
    }

    /// Builds the filter with a [`StdRng`] seeded from the operating system.
    ///
    /// # Panics
    ///
    /// See [`build_with_rng()`](Self::build_with_rng).
    pub fn build<H: Hashing, F: Fingerprinting>(self) -> CuckooFilter<H, F> {
        self.build_with_rng(StdRng::from_os_rng())
    }

    /// Builds the filter with a [`StdRng`] seeded from `seed`, making evictions reproducible.
    ///
    /// # Panics
    ///
    /// See [`build_with_rng()`](Self::build_with_rng).
    pub fn build_with_seed<H: Hashing, F: Fingerprinting>(self, seed: u64) -> CuckooFilter<H, F> {
        self.build_with_rng(StdRng::seed_from_u64(seed))
    }

    /// Builds the filter with the given entropy source for eviction choices.
    ///
    /// # Panics
    ///
    /// Panics if any of:
    /// - `capacity` is 0
    /// - `bucket_size` is 0
    /// - `F::MAX_FINGERPRINT_SIZE` is greater than 8
    /// - `fingerprint_size` is 0 or greater than `F::MAX_FINGERPRINT_SIZE`
    pub fn build_with_rng<H: Hashing, F: Fingerprinting, R: Rng>(
        self,
        rng: R,
    ) -> CuckooFilter<H, F, R> {
        assert!(self.capacity > 0, "capacity must be at least 1");
        assert!(self.bucket_size > 0, "bucket_size must be at least 1");
        assert!(
            F::MAX_FINGERPRINT_SIZE <= 8,
            "MAX_FINGERPRINT_SIZE must be at most 8, got {}",
            F::MAX_FINGERPRINT_SIZE
        );
        assert!(
            self.fingerprint_size > 0 && self.fingerprint_size <= F::MAX_FINGERPRINT_SIZE,
            "fingerprint_size must be between 1 and {}, got {}",
            F::MAX_FINGERPRINT_SIZE,
            self.fingerprint_size
        );
        CuckooFilter::make(
            self.capacity,
            self.bucket_size,
            self.fingerprint_size,
            self.evictions_limit,
            rng,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Murmur3;

    #[test]
    fn test_defaults() {
        let filter = CuckooFilterBuilder::new(100).build_with_seed::<Murmur3, Murmur3>(1);
        assert_eq!(filter.capacity(), 100);
        assert_eq!(filter.bucket_size(), DEFAULT_BUCKET_SIZE);
        assert_eq!(filter.fingerprint_size(), DEFAULT_FINGERPRINT_SIZE);
        assert_eq!(filter.evictions_limit(), DEFAULT_EVICTIONS_LIMIT);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_capacity_is_exact() {
        for capacity in [1, 64, 1000] {
            let filter = CuckooFilterBuilder::new(capacity).build::<Murmur3, Murmur3>();
            assert_eq!(filter.capacity(), capacity);
        }
    }

    struct WideFingerprint;

    impl Fingerprinting for WideFingerprint {
        const MAX_FINGERPRINT_SIZE: usize = 9;

        fn fingerprint(bytes: &[u8]) -> u64 {
            Murmur3::fingerprint(bytes)
        }
    }

    #[test]
    #[should_panic(expected = "MAX_FINGERPRINT_SIZE must be at most 8, got 9")]
    fn test_rejects_fingerprinting_wider_than_u64() {
        CuckooFilterBuilder::new(16)
            .fingerprint_size(1)
            .build_with_seed::<Murmur3, WideFingerprint>(1);
    }

    #[test]
    #[should_panic(expected = "fingerprint_size must be between 1 and 8, got 9")]
    fn test_rejects_oversized_fingerprints() {
        CuckooFilterBuilder::new(16)
            .fingerprint_size(9)
            .build_with_seed::<Murmur3, Murmur3>(1);
    }

    #[test]
    #[should_panic(expected = "capacity must be at least 1")]
    fn test_rejects_zero_capacity() {
        CuckooFilterBuilder::new(0).build_with_seed::<Murmur3, Murmur3>(1);
    }

    #[test]
    #[should_panic(expected = "bucket_size must be at least 1")]
    fn test_rejects_zero_bucket_size() {
        CuckooFilterBuilder::new(8)
            .bucket_size(0)
            .build_with_seed::<Murmur3, Murmur3>(1);
    }
}
