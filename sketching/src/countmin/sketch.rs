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

use std::f64::consts::LN_2;
use std::fmt;
use std::marker::PhantomData;

use super::CountMinValue;
use crate::hash::Hashing;
use crate::hash::Murmur3;

/// Count-Min sketch for estimating item frequencies.
///
/// Counters are stored row-major in a single flat table. Row `r` addresses its column with lane
/// `r + 1` of the key.
pub struct CountMinSketch<H = Murmur3, C = u64> {
    depth: usize,
    width: usize,
    total_weight: u64,
    counts: Vec<C>,
    _hasher: PhantomData<H>,
}

impl<H: Hashing, C: CountMinValue> CountMinSketch<H, C> {
    /// Creates a new Count-Min sketch of `depth` rows and `width` columns.
    ///
    /// # Panics
    ///
    /// Panics if `depth` or `width` is 0, or the table size overflows `usize`.
    pub fn new(depth: usize, width: usize) -> Self {
        assert!(depth > 0, "depth must be at least 1");
        assert!(width > 0, "width must be at least 1");
        let Some(entries) = depth.checked_mul(width) else {
            panic!("depth * width overflows usize");
        };
        CountMinSketch {
            depth,
            width,
            total_weight: 0,
            counts: vec![C::ZERO; entries],
            _hasher: PhantomData,
        }
    }

    /// Creates a sketch whose estimates exceed the true count by at most `epsilon` times the
    /// total weight, with probability `delta`.
    ///
    /// # Panics
    ///
    /// Panics if `epsilon` or `delta` is not in (0, 1).
    pub fn with_accuracy(epsilon: f64, delta: f64) -> Self {
        let (depth, width) = Self::ideal_parameters(epsilon, delta);
        Self::new(depth, width)
    }

    /// Computes `(depth, width)` for relative error `epsilon` and confidence `delta`.
    ///
    /// Formulas: `depth = ceil(ln(1 - delta) / ln(0.5))` and `width = ceil(2 / epsilon)`.
    ///
    /// # Panics
    ///
    /// Panics if `epsilon` or `delta` is not in (0, 1).
    pub fn ideal_parameters(epsilon: f64, delta: f64) -> (usize, usize) {
        assert!(
            epsilon > 0.0 && epsilon < 1.0,
            "epsilon must be between 0 and 1 (exclusive), got {epsilon}"
        );
        assert!(
            delta > 0.0 && delta < 1.0,
            "delta must be between 0 and 1 (exclusive), got {delta}"
        );
        let depth = ((1.0 - delta).ln() / -LN_2).ceil().max(1.0);
        let width = (2.0 / epsilon).ceil();
        (depth as usize, width as usize)
    }

    /// Returns the number of rows.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the number of columns per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the total weight inserted into the sketch.
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Returns true if the sketch has not seen any weight.
    pub fn is_empty(&self) -> bool {
        self.total_weight == 0
    }

    /// Adds a single occurrence of the key.
    ///
    /// # Panics
    ///
    /// Panics if a counter of the key would overflow `C`.
    pub fn increment(&mut self, key: impl AsRef<[u8]>) {
        self.update(key, C::ONE);
    }

    /// Adds `value` occurrences of the key.
    ///
    /// # Panics
    ///
    /// Panics if a counter of the key would overflow `C`, or the total weight would overflow
    /// `u64`. The sketch is left unchanged in that case.
    pub fn update(&mut self, key: impl AsRef<[u8]>, value: C) {
        if value == C::ZERO {
            return;
        }
        let key = key.as_ref();
        let Some(total_weight) = self.total_weight.checked_add(value.to_u64()) else {
            panic!("total weight overflows u64");
        };
        assert!(
            self.cells(key)
                .all(|index| self.counts[index].checked_add(value).is_some()),
            "counter overflow: adding {value:?} exceeds {:?}",
            C::MAX
        );
        self.total_weight = total_weight;
        for index in self.cells(key) {
            self.counts[index] = self.counts[index].add(value);
        }
    }

    /// Returns the estimated count of the key, never below the true count.
    pub fn estimate(&self, key: impl AsRef<[u8]>) -> C {
        self.cells(key.as_ref())
            .map(|index| self.counts[index])
            .min()
            .unwrap_or(C::ZERO)
    }

    /// Merges another sketch into this one by cellwise addition.
    ///
    /// # Panics
    ///
    /// Panics if the sketches have different shapes, or a merged counter or the total weight
    /// would overflow. The sketch is left unchanged in that case.
    pub fn form_union(&mut self, other: &Self) {
        assert!(
            self.depth == other.depth && self.width == other.width,
            "incompatible sketch shapes: {}x{} vs {}x{}",
            self.depth,
            self.width,
            other.depth,
            other.width
        );
        let Some(total_weight) = self.total_weight.checked_add(other.total_weight) else {
            panic!("total weight overflows u64");
        };
        assert!(
            self.counts
                .iter()
                .zip(&other.counts)
                .all(|(dst, src)| dst.checked_add(*src).is_some()),
            "counter overflow while merging sketches"
        );
        for (dst, src) in self.counts.iter_mut().zip(&other.counts) {
            *dst = dst.add(*src);
        }
        self.total_weight = total_weight;
    }

    /// Returns a new sketch holding the merge of `self` and `other`.
    ///
    /// # Panics
    ///
    /// Panics if the sketches have different shapes.
    pub fn union(&self, other: &Self) -> Self {
        let mut union = self.clone();
        union.form_union(other);
        union
    }

    /// Zeroes every counter and the total weight.
    pub fn reset(&mut self) {
        self.counts.fill(C::ZERO);
        self.total_weight = 0;
    }

    /// Returns the flat table index of the key's counter in each row.
    fn cells(&self, key: &[u8]) -> impl Iterator<Item = usize> + use<H, C> {
        let width = self.width;
        H::lanes(key, width as u64)
            .take(self.depth)
            .enumerate()
            .map(move |(row, column)| row * width + column as usize)
    }
}

impl<H, C: Clone> Clone for CountMinSketch<H, C> {
    fn clone(&self) -> Self {
        CountMinSketch {
            depth: self.depth,
            width: self.width,
            total_weight: self.total_weight,
            counts: self.counts.clone(),
            _hasher: PhantomData,
        }
    }
}

impl<H, C: PartialEq> PartialEq for CountMinSketch<H, C> {
    fn eq(&self, other: &Self) -> bool {
        self.depth == other.depth
            && self.width == other.width
            && self.total_weight == other.total_weight
            && self.counts == other.counts
    }
}

impl<H, C> fmt::Debug for CountMinSketch<H, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountMinSketch")
            .field("depth", &self.depth)
            .field("width", &self.width)
            .field("total_weight", &self.total_weight)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::panic;
    use std::panic::AssertUnwindSafe;

    use super::*;

    #[test]
    fn test_rows_use_consecutive_lanes() {
        let mut sketch = CountMinSketch::<Murmur3, u32>::new(3, 17);
        sketch.update("x", 5);

        let lanes: Vec<u64> = Murmur3::lanes(b"x", 17).take(3).collect();
        for (row, column) in lanes.into_iter().enumerate() {
            assert_eq!(sketch.counts[row * 17 + column as usize], 5);
        }
        assert_eq!(sketch.counts.iter().map(|c| *c as u64).sum::<u64>(), 15);
    }

    #[test]
    fn test_zero_update_is_ignored() {
        let mut sketch = CountMinSketch::<Murmur3>::new(2, 8);
        sketch.update("x", 0);
        assert!(sketch.is_empty());
        assert!(sketch.counts.iter().all(|c| *c == 0));
    }

    #[test]
    fn test_small_counters_count_up_to_their_max() {
        let mut sketch = CountMinSketch::<Murmur3, u8>::new(2, 8);
        sketch.update("x", 200);
        sketch.update("x", 55);
        assert_eq!(sketch.estimate("x"), u8::MAX);
        assert_eq!(sketch.total_weight(), 255);
    }

    #[test]
    #[should_panic(expected = "counter overflow: adding 200 exceeds 255")]
    fn test_counter_overflow_panics() {
        let mut sketch = CountMinSketch::<Murmur3, u8>::new(2, 8);
        sketch.update("x", 200);
        sketch.update("x", 200);
    }

    #[test]
    fn test_rejected_update_leaves_sketch_unchanged() {
        let mut sketch = CountMinSketch::<Murmur3, u8>::new(2, 8);
        sketch.update("x", 200);
        let before = sketch.clone();

        let result = panic::catch_unwind(AssertUnwindSafe(|| sketch.update("x", 100)));
        assert!(result.is_err());
        assert_eq!(sketch, before);
        assert_eq!(sketch.estimate("x"), 200);
    }

    #[test]
    #[should_panic(expected = "counter overflow while merging sketches")]
    fn test_union_overflow_panics() {
        let mut a = CountMinSketch::<Murmur3, u8>::new(2, 8);
        let mut b = CountMinSketch::<Murmur3, u8>::new(2, 8);
        a.update("x", 200);
        b.update("x", 100);
        a.form_union(&b);
    }

    #[test]
    #[should_panic(expected = "total weight overflows u64")]
    fn test_total_weight_overflow_panics() {
        let mut sketch = CountMinSketch::<Murmur3>::new(1, 4);
        sketch.update("x", u64::MAX);
        sketch.increment("y");
    }

    #[test]
    fn test_reset() {
        let mut sketch = CountMinSketch::<Murmur3>::new(3, 16);
        sketch.update("x", 7);
        sketch.reset();
        assert!(sketch.is_empty());
        assert_eq!(sketch.estimate("x"), 0);
        assert_eq!((sketch.depth(), sketch.width()), (3, 16));
    }

    #[test]
    #[should_panic(expected = "width must be at least 1")]
    fn test_rejects_zero_width() {
        CountMinSketch::<Murmur3>::new(3, 0);
    }

    #[test]
    #[should_panic(expected = "incompatible sketch shapes: 3x16 vs 3x32")]
    fn test_union_rejects_shape_mismatch() {
        let mut a = CountMinSketch::<Murmur3>::new(3, 16);
        let b = CountMinSketch::<Murmur3>::new(3, 32);
        a.form_union(&b);
    }
}
