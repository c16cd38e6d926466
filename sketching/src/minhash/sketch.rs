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

use std::fmt;
use std::marker::PhantomData;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::Permutation;
use crate::hash::Hashing;
use crate::hash::Murmur3;

/// MinHash signature over `k` permutation lanes.
pub struct MinHash<H = Murmur3> {
    permutations: Vec<Permutation>,
    min_hashes: Vec<u64>,
    _hasher: PhantomData<H>,
}

impl<H: Hashing> MinHash<H> {
    /// Creates an empty sketch with `num_permutations` lanes drawn from an OS-seeded generator.
    ///
    /// # Panics
    ///
    /// Panics if `num_permutations` is 0.
    pub fn new(num_permutations: usize) -> Self {
        Self::with_rng(num_permutations, &mut StdRng::from_os_rng())
    }

    /// Creates an empty sketch whose lanes are drawn from a generator seeded with `seed`.
    ///
    /// Sketches created with the same seed and lane count can be compared.
    ///
    /// # Panics
    ///
    /// Panics if `num_permutations` is 0.
    pub fn with_seed(num_permutations: usize, seed: u64) -> Self {
        Self::with_rng(num_permutations, &mut StdRng::seed_from_u64(seed))
    }

    /// Creates an empty sketch whose lanes are drawn from `rng`.
    ///
    /// # Panics
    ///
    /// Panics if `num_permutations` is 0.
    pub fn with_rng<R: Rng + ?Sized>(num_permutations: usize, rng: &mut R) -> Self {
        assert!(num_permutations > 0, "num_permutations must be at least 1");
        let permutations = (0..num_permutations)
            .map(|_| Permutation::random(rng))
            .collect();
        Self::with_permutations(permutations)
    }

    /// Creates an empty sketch over the given lanes.
    ///
    /// # Panics
    ///
    /// Panics if `permutations` is empty.
    pub fn with_permutations(permutations: Vec<Permutation>) -> Self {
        assert!(!permutations.is_empty(), "num_permutations must be at least 1");
        let min_hashes = vec![u64::MAX; permutations.len()];
        MinHash {
            permutations,
            min_hashes,
            _hasher: PhantomData,
        }
    }

    /// Creates an empty sketch sharing this sketch's lanes.
    pub fn empty_like(&self) -> Self {
        Self::with_permutations(self.permutations.clone())
    }

    /// Adds an item to the sketch.
    pub fn insert(&mut self, item: impl AsRef<[u8]>) {
        let x = H::hash(item.as_ref());
        for (min, permutation) in self.min_hashes.iter_mut().zip(&self.permutations) {
            *min = (*min).min(permutation.apply(x));
        }
    }

    /// Estimates the Jaccard index of the sets behind `self` and `other`: the fraction of lanes
    /// holding equal minima.
    ///
    /// # Panics
    ///
    /// Panics if the sketches do not share the same lanes.
    pub fn jaccard(&self, other: &Self) -> f64 {
        self.check_compatible(other);
        let equal = self
            .min_hashes
            .iter()
            .zip(&other.min_hashes)
            .filter(|(a, b)| a == b)
            .count();
        equal as f64 / self.min_hashes.len() as f64
    }

    /// Merges another sketch into this one by taking the lanewise minimum.
    ///
    /// The result is the sketch of the union of both input sets.
    ///
    /// # Panics
    ///
    /// Panics if the sketches do not share the same lanes.
    pub fn form_union(&mut self, other: &Self) {
        self.check_compatible(other);
        for (dst, src) in self.min_hashes.iter_mut().zip(&other.min_hashes) {
            *dst = (*dst).min(*src);
        }
    }

    /// Returns a new sketch holding the union of `self` and `other`.
    ///
    /// # Panics
    ///
    /// Panics if the sketches do not share the same lanes.
    pub fn union(&self, other: &Self) -> Self {
        let mut union = self.clone();
        union.form_union(other);
        union
    }

    /// Returns the number of lanes.
    pub fn num_permutations(&self) -> usize {
        self.permutations.len()
    }

    /// Returns the lanes' permutations.
    pub fn permutations(&self) -> &[Permutation] {
        &self.permutations
    }

    /// Returns the current minimum of every lane.
    pub fn min_hashes(&self) -> &[u64] {
        &self.min_hashes
    }

    /// Returns true if no item has been inserted.
    pub fn is_empty(&self) -> bool {
        self.min_hashes.iter().all(|min| *min == u64::MAX)
    }

    fn check_compatible(&self, other: &Self) {
        assert!(
            self.permutations == other.permutations,
            "both MinHash sketches must share the same permutations"
        );
    }
}

impl<H> Clone for MinHash<H> {
    fn clone(&self) -> Self {
        MinHash {
            permutations: self.permutations.clone(),
            min_hashes: self.min_hashes.clone(),
            _hasher: PhantomData,
        }
    }
}

impl<H> PartialEq for MinHash<H> {
    fn eq(&self, other: &Self) -> bool {
        self.permutations == other.permutations && self.min_hashes == other.min_hashes
    }
}

impl<H> Eq for MinHash<H> {}

impl<H> fmt::Debug for MinHash<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinHash")
            .field("num_permutations", &self.permutations.len())
            .field("min_hashes", &self.min_hashes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let minhash = MinHash::<Murmur3>::with_seed(16, 1);
        assert!(minhash.is_empty());
        assert_eq!(minhash.num_permutations(), 16);
        assert!(minhash.min_hashes().iter().all(|m| *m == u64::MAX));
    }

    #[test]
    fn test_insert_keeps_minimum() {
        let permutations = vec![Permutation::new(1, 0), Permutation::new(2, 7)];
        let mut minhash = MinHash::<Murmur3>::with_permutations(permutations.clone());
        minhash.insert("a");
        minhash.insert("b");

        let expected: Vec<u64> = permutations
            .iter()
            .map(|p| p.apply(Murmur3::hash(b"a")).min(p.apply(Murmur3::hash(b"b"))))
            .collect();
        assert_eq!(minhash.min_hashes(), expected.as_slice());
        assert!(!minhash.is_empty());
    }

    #[test]
    fn test_same_seed_same_lanes() {
        let a = MinHash::<Murmur3>::with_seed(8, 99);
        let b = MinHash::<Murmur3>::with_seed(8, 99);
        assert_eq!(a.permutations(), b.permutations());
        assert_eq!(a.empty_like().permutations(), a.permutations());
    }

    #[test]
    fn test_empty_sketches_are_identical() {
        let a = MinHash::<Murmur3>::with_seed(8, 99);
        assert_eq!(a.jaccard(&a.empty_like()), 1.0);
    }

    #[test]
    #[should_panic(expected = "both MinHash sketches must share the same permutations")]
    fn test_jaccard_rejects_different_lanes() {
        let a = MinHash::<Murmur3>::with_seed(8, 1);
        let b = MinHash::<Murmur3>::with_seed(8, 2);
        a.jaccard(&b);
    }

    #[test]
    #[should_panic(expected = "num_permutations must be at least 1")]
    fn test_rejects_zero_lanes() {
        MinHash::<Murmur3>::with_seed(0, 1);
    }
}
