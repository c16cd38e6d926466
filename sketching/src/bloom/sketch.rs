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

use crate::bitvec::BitVector;
use crate::hash::Hashing;
use crate::hash::Murmur3;

/// A Bloom filter for probabilistic set membership testing.
///
/// Provides membership queries with:
/// - No false negatives (inserted items always return `true`)
/// - Tunable false positive rate
/// - Constant space usage
///
/// Use [`super::BloomFilterBuilder`] or [`BloomFilter::new`] to construct instances.
pub struct BloomFilter<H = Murmur3> {
    bits: BitVector,
    num_hashes: u16,
    _hasher: PhantomData<H>,
}

impl<H: Hashing> BloomFilter<H> {
    /// Creates an empty filter of `num_bits` bits using `num_hashes` hash functions.
    ///
    /// # Panics
    ///
    /// Panics if `num_bits` or `num_hashes` is 0.
    pub fn new(num_bits: usize, num_hashes: u16) -> Self {
        Self::from_bit_vector(BitVector::new(num_bits), num_hashes)
    }

    /// Restores a filter from its bit vector, for example one read back with
    /// [`BitVector::deserialize`].
    ///
    /// The hash count and the [`Hashing`] implementation must be the ones the bits were written
    /// with; neither is recorded in the bit vector.
    ///
    /// # Panics
    ///
    /// Panics if the bit vector is zero bits wide or `num_hashes` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sketching::bitvec::BitVector;
    /// # use sketching::bloom::BloomFilter;
    /// # use sketching::hash::Murmur3;
    /// let mut filter = BloomFilter::<Murmur3>::new(128, 3);
    /// filter.insert("apple");
    ///
    /// let bytes = filter.as_bit_vector().serialize();
    /// let bits = BitVector::deserialize(&bytes).unwrap();
    /// let restored = BloomFilter::<Murmur3>::from_bit_vector(bits, 3);
    /// assert!(restored.contains("apple"));
    /// ```
    pub fn from_bit_vector(bits: BitVector, num_hashes: u16) -> Self {
        assert!(bits.bit_width() > 0, "num_bits must be at least 1");
        assert!(num_hashes > 0, "num_hashes must be at least 1");
        Self {
            bits,
            num_hashes,
            _hasher: PhantomData,
        }
    }

    /// Inserts an item into the filter.
    ///
    /// After insertion, `contains(item)` will always return `true`.
    pub fn insert(&mut self, item: impl AsRef<[u8]>) {
        for index in self.positions(item.as_ref()) {
            self.bits.set(index, true);
        }
    }

    /// Tests whether an item is possibly in the set.
    ///
    /// Returns:
    /// - `true`: Item was **possibly** inserted (or false positive)
    /// - `false`: Item was **definitely not** inserted
    pub fn contains(&self, item: impl AsRef<[u8]>) -> bool {
        self.positions(item.as_ref())
            .into_iter()
            .all(|index| self.bits.get(index))
    }

    /// Tests and inserts an item in a single operation.
    ///
    /// Returns whether the item was possibly already in the set before insertion.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sketching::bloom::BloomFilter;
    /// # use sketching::hash::Murmur3;
    /// let mut filter = BloomFilter::<Murmur3>::new(1024, 5);
    /// assert!(!filter.contains_and_insert("apple"));
    /// assert!(filter.contains_and_insert("apple"));
    /// ```
    pub fn contains_and_insert(&mut self, item: impl AsRef<[u8]>) -> bool {
        let mut was_present = true;
        for index in self.positions(item.as_ref()) {
            was_present &= self.bits.get(index);
            self.bits.set(index, true);
        }
        was_present
    }

    /// Clears all bits while preserving capacity and configuration.
    pub fn reset(&mut self) {
        self.bits.clear_all();
    }

    /// Merges another filter into this one via bitwise OR.
    ///
    /// After merging, this filter recognizes items from either filter.
    ///
    /// # Panics
    ///
    /// Panics if the filters are not compatible (different size or hash count).
    /// Use [`is_compatible()`](Self::is_compatible) to check first.
    pub fn form_union(&mut self, other: &Self) {
        assert!(
            self.is_compatible(other),
            "cannot union incompatible Bloom filters"
        );
        self.bits.form_disjunction(&other.bits);
    }

    /// Intersects this filter with another via bitwise AND.
    ///
    /// After intersection, this filter recognizes items present in both filters, plus false
    /// positives.
    ///
    /// # Panics
    ///
    /// Panics if the filters are not compatible (different size or hash count).
    pub fn form_intersection(&mut self, other: &Self) {
        assert!(
            self.is_compatible(other),
            "cannot intersect incompatible Bloom filters"
        );
        self.bits.form_conjunction(&other.bits);
    }

    /// Returns a new filter holding the union of `self` and `other`.
    ///
    /// # Panics
    ///
    /// Panics if the filters are not compatible.
    pub fn union(&self, other: &Self) -> Self {
        let mut union = self.clone();
        union.form_union(other);
        union
    }

    /// Returns a new filter holding the intersection of `self` and `other`.
    ///
    /// # Panics
    ///
    /// Panics if the filters are not compatible.
    pub fn intersection(&self, other: &Self) -> Self {
        let mut intersection = self.clone();
        intersection.form_intersection(other);
        intersection
    }

    /// Estimates the number of distinct items inserted.
    ///
    /// Uses `-(m / k) * ln(1 - x / m)` where `x` is the number of set bits. An empty filter
    /// estimates 0, a saturated one estimates infinity.
    pub fn estimate_cardinality(&self) -> f64 {
        let set = self.bits.cardinality();
        if set == 0 {
            return 0.0;
        }
        let m = self.capacity() as f64;
        let k = self.num_hashes as f64;
        -(m / k) * (1.0 - set as f64 / m).ln()
    }

    /// Estimates the false positive probability after `num_items` distinct insertions.
    ///
    /// Uses `(1 - e^(-k * n / m))^k`. With `None`, `n` is the live
    /// [`estimate_cardinality()`](Self::estimate_cardinality).
    pub fn estimate_fpp(&self, num_items: Option<u64>) -> f64 {
        let n = match num_items {
            Some(n) => n as f64,
            None => self.estimate_cardinality(),
        };
        let m = self.capacity() as f64;
        let k = self.num_hashes as f64;
        (1.0 - (-k * n / m).exp()).powf(k)
    }

    /// Returns whether no bit is set.
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Returns the number of bits set to 1.
    pub fn bits_used(&self) -> usize {
        self.bits.cardinality()
    }

    /// Returns the total number of bits in the filter.
    pub fn capacity(&self) -> usize {
        self.bits.bit_width()
    }

    /// Returns the number of hash functions used.
    pub fn num_hashes(&self) -> u16 {
        self.num_hashes
    }

    /// Returns the fraction of bits set.
    ///
    /// Values above 0.5 indicate degraded false positive rates.
    pub fn load_factor(&self) -> f64 {
        self.bits_used() as f64 / self.capacity() as f64
    }

    /// Checks if two filters can be merged: same capacity and same number of hash functions.
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.capacity() == other.capacity() && self.num_hashes == other.num_hashes
    }

    /// Returns the underlying bit vector.
    pub fn as_bit_vector(&self) -> &BitVector {
        &self.bits
    }

    /// Returns `min(k, m)` distinct bit positions for `bytes`, one per lane.
    ///
    /// A lane that lands on a position already taken moves forward to the next free one.
    fn positions(&self, bytes: &[u8]) -> Vec<usize> {
        let num_bits = self.capacity();
        let wanted = usize::from(self.num_hashes).min(num_bits);
        let mut positions = Vec::with_capacity(wanted);
        for lane in H::lanes(bytes, num_bits as u64).take(wanted) {
            let mut index = lane as usize;
            while positions.contains(&index) {
                index = (index + 1) % num_bits;
            }
            positions.push(index);
        }
        positions
    }
}

impl<H> Clone for BloomFilter<H> {
    fn clone(&self) -> Self {
        Self {
            bits: self.bits.clone(),
            num_hashes: self.num_hashes,
            _hasher: PhantomData,
        }
    }
}

impl<H> PartialEq for BloomFilter<H> {
    fn eq(&self, other: &Self) -> bool {
        self.num_hashes == other.num_hashes && self.bits == other.bits
    }
}

impl<H> Eq for BloomFilter<H> {}

impl<H> fmt::Debug for BloomFilter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BloomFilter")
            .field("num_bits", &self.bits.bit_width())
            .field("num_hashes", &self.num_hashes)
            .field("bits_used", &self.bits.cardinality())
            .finish()
    }
}
