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

use super::DEFAULT_PRECISION;
use super::MAX_PRECISION;
use super::MIN_PRECISION;
use super::estimator;
use crate::hash::Hashing;
use crate::hash::Murmur3;

/// HyperLogLog sketch for estimating the number of distinct items.
///
/// Register `i` is addressed by the low `p` bits of the item's 32-bit digest, counting from
/// zero.
pub struct HyperLogLog<H = Murmur3> {
    precision: u8,
    registers: Box<[u8]>,
    _hasher: PhantomData<H>,
}

impl<H: Hashing> HyperLogLog<H> {
    /// Creates an empty sketch with `2^precision` registers.
    ///
    /// # Panics
    ///
    /// Panics if `precision` is not in `[4, 16]`.
    pub fn new(precision: u8) -> Self {
        assert!(
            (MIN_PRECISION..=MAX_PRECISION).contains(&precision),
            "precision must be between {MIN_PRECISION} and {MAX_PRECISION}, got {precision}"
        );
        HyperLogLog {
            precision,
            registers: vec![0; 1 << precision].into_boxed_slice(),
            _hasher: PhantomData,
        }
    }

    /// Adds an item to the sketch.
    pub fn insert(&mut self, item: impl AsRef<[u8]>) {
        let (index, rank) = self.locate(H::hash(item.as_ref()) as u32);
        let register = &mut self.registers[index];
        *register = (*register).max(rank);
    }

    /// Estimates the number of distinct items inserted.
    pub fn estimate(&self) -> f64 {
        estimator::estimate(&self.registers)
    }

    /// Returns the precision `p`.
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Returns the number of registers, `2^p`.
    pub fn num_registers(&self) -> usize {
        self.registers.len()
    }

    /// Returns the register values.
    pub fn registers(&self) -> &[u8] {
        &self.registers
    }

    /// Returns true if no item has been inserted.
    pub fn is_empty(&self) -> bool {
        self.registers.iter().all(|r| *r == 0)
    }

    /// Zeroes every register.
    pub fn reset(&mut self) {
        self.registers.fill(0);
    }

    /// Merges another sketch into this one by taking the registerwise maximum.
    ///
    /// # Panics
    ///
    /// Panics if the sketches have a different number of registers.
    pub fn form_union(&mut self, other: &Self) {
        assert_eq!(
            self.registers.len(),
            other.registers.len(),
            "to form a union both HyperLogLog sketches must have the same number of registers"
        );
        for (dst, src) in self.registers.iter_mut().zip(&other.registers) {
            *dst = (*dst).max(*src);
        }
    }

    /// Returns a new sketch holding the union of `self` and `other`.
    ///
    /// # Panics
    ///
    /// Panics if the sketches have a different number of registers.
    pub fn union(&self, other: &Self) -> Self {
        let mut union = self.clone();
        union.form_union(other);
        union
    }

    /// Splits a digest into its register index and rank.
    fn locate(&self, digest: u32) -> (usize, u8) {
        let p = u32::from(self.precision);
        let index = (digest & ((1 << p) - 1)) as usize;
        let w = digest >> p;
        // w has 32 - p significant bits; its own leading zeros follow the p shifted-in ones.
        let rank = if w == 0 {
            0
        } else {
            (w.leading_zeros() - p + 1) as u8
        };
        (index, rank)
    }
}

impl<H: Hashing> Default for HyperLogLog<H> {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

impl<H> Clone for HyperLogLog<H> {
    fn clone(&self) -> Self {
        HyperLogLog {
            precision: self.precision,
            registers: self.registers.clone(),
            _hasher: PhantomData,
        }
    }
}

impl<H> PartialEq for HyperLogLog<H> {
    fn eq(&self, other: &Self) -> bool {
        self.precision == other.precision && self.registers == other.registers
    }
}

impl<H> Eq for HyperLogLog<H> {}

impl<H> fmt::Debug for HyperLogLog<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HyperLogLog")
            .field("precision", &self.precision)
            .field("num_registers", &self.registers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate() {
        let hll = HyperLogLog::<Murmur3>::new(4);
        assert_eq!(hll.locate(0), (0, 0));
        assert_eq!(hll.locate(0b1_0011), (3, 28));
        assert_eq!(hll.locate(0x8000_000f), (15, 1));
        assert_eq!(hll.locate(0x0800_0000), (0, 5));
    }

    #[test]
    fn test_insert_keeps_max_rank() {
        let mut hll = HyperLogLog::<Murmur3>::new(4);
        hll.insert("apple");
        let (index, rank) = hll.locate(Murmur3::hash(b"apple") as u32);
        assert_eq!(hll.registers()[index], rank);
        assert_eq!(hll.registers().iter().filter(|r| **r != 0).count(), (rank > 0) as usize);

        hll.insert("apple");
        assert_eq!(hll.registers()[index], rank);
    }

    #[test]
    fn test_default_precision() {
        let hll = HyperLogLog::<Murmur3>::default();
        assert_eq!(hll.precision(), DEFAULT_PRECISION);
        assert_eq!(hll.num_registers(), 256);
        assert!(hll.is_empty());
        assert_eq!(hll.estimate(), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut hll = HyperLogLog::<Murmur3>::new(10);
        for i in 0u32..100 {
            hll.insert(i.to_le_bytes());
        }
        assert!(!hll.is_empty());
        hll.reset();
        assert!(hll.is_empty());
        assert_eq!(hll.estimate(), 0.0);
    }

    #[test]
    #[should_panic(expected = "precision must be between 4 and 16, got 3")]
    fn test_rejects_small_precision() {
        HyperLogLog::<Murmur3>::new(3);
    }

    #[test]
    #[should_panic(expected = "precision must be between 4 and 16, got 17")]
    fn test_rejects_large_precision() {
        HyperLogLog::<Murmur3>::new(17);
    }

    #[test]
    #[should_panic(expected = "same number of registers")]
    fn test_union_rejects_mismatch() {
        let mut a = HyperLogLog::<Murmur3>::new(4);
        let b = HyperLogLog::<Murmur3>::new(5);
        a.form_union(&b);
    }
}
