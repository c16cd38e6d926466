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

use super::BloomFilter;
use crate::hash::Hashing;

/// Builder for creating [`BloomFilter`] instances.
///
/// Provides two construction modes:
/// - [`with_accuracy()`](Self::with_accuracy): Specify expected items and false positive rate
/// - [`with_size()`](Self::with_size): Specify bit count and hash functions directly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BloomFilterBuilder {
    num_bits: usize,
    num_hashes: u16,
}

impl BloomFilterBuilder {
    /// Creates a builder sized for `expected_items` distinct items at false positive
    /// probability `fpp`.
    ///
    /// # Panics
    ///
    /// Panics if `expected_items` is 0 or `fpp` is not in (0.0, 1.0).
    ///
    /// # Examples
    ///
    /// ```
    /// # use sketching::bloom::BloomFilterBuilder;
    /// # use sketching::hash::Murmur3;
    /// let filter = BloomFilterBuilder::with_accuracy(10_000, 0.01).build::<Murmur3>();
    /// assert_eq!(filter.num_hashes(), 7);
    /// ```
    pub fn with_accuracy(expected_items: u64, fpp: f64) -> Self {
        let (num_bits, num_hashes) = Self::ideal_parameters(expected_items, fpp);
        Self {
            num_bits,
            num_hashes,
        }
    }

    /// Creates a builder with an explicit number of bits and hash functions.
    ///
    /// # Panics
    ///
    /// Panics if `num_bits` or `num_hashes` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sketching::bloom::BloomFilterBuilder;
    /// # use sketching::hash::Murmur3;
    /// let filter = BloomFilterBuilder::with_size(10_000, 7).build::<Murmur3>();
    /// assert_eq!(filter.capacity(), 10_000);
    /// ```
    pub fn with_size(num_bits: usize, num_hashes: u16) -> Self {
        assert!(num_bits > 0, "num_bits must be at least 1");
        assert!(num_hashes > 0, "num_hashes must be at least 1");
        Self {
            num_bits,
            num_hashes,
        }
    }

    /// Returns the number of bits the filter will have.
    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    /// Returns the number of hash functions the filter will use.
    pub fn num_hashes(&self) -> u16 {
        self.num_hashes
    }

    /// Builds an empty filter hashing with `H`.
    pub fn build<H: Hashing>(self) -> BloomFilter<H> {
        BloomFilter::new(self.num_bits, self.num_hashes)
    }

    /// Computes the bit count and hash count that minimize the false positive probability for
    /// `expected_items` items at target probability `fpp`.
    ///
    /// Formulas: `m = ceil(-n * ln(p) / ln(2)^2)` and `k = ceil(m / n * ln(2))`.
    ///
    /// # Panics
    ///
    /// Panics if `expected_items` is 0 or `fpp` is not in (0.0, 1.0).
    ///
    /// # Examples
    ///
    /// ```
    /// # use sketching::bloom::BloomFilterBuilder;
    /// let (bits, hashes) = BloomFilterBuilder::ideal_parameters(1000, 0.01);
    /// assert_eq!(bits, 9586);
    /// assert_eq!(hashes, 7);
    /// ```
    pub fn ideal_parameters(expected_items: u64, fpp: f64) -> (usize, u16) {
        assert!(expected_items > 0, "expected_items must be greater than 0");
        assert!(
            fpp > 0.0 && fpp < 1.0,
            "fpp must be between 0.0 and 1.0 (exclusive), got {fpp}"
        );

        let n = expected_items as f64;
        let num_bits = (-n * fpp.ln() / (LN_2 * LN_2)).ceil().max(1.0);
        let num_hashes = (num_bits / n * LN_2).ceil().clamp(1.0, u16::MAX as f64);
        (num_bits as usize, num_hashes as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ideal_parameters_for_ten_items() {
        assert_eq!(BloomFilterBuilder::ideal_parameters(10, 0.01), (96, 7));
        assert_eq!(BloomFilterBuilder::ideal_parameters(10, 0.1), (48, 4));
    }

    #[test]
    fn test_with_accuracy_matches_ideal_parameters() {
        let builder = BloomFilterBuilder::with_accuracy(500, 0.001);
        let (bits, hashes) = BloomFilterBuilder::ideal_parameters(500, 0.001);
        assert_eq!(builder.num_bits(), bits);
        assert_eq!(builder.num_hashes(), hashes);
    }

    #[test]
    #[should_panic(expected = "fpp must be between 0.0 and 1.0")]
    fn test_rejects_certain_false_positives() {
        BloomFilterBuilder::with_accuracy(10, 1.0);
    }

    #[test]
    #[should_panic(expected = "expected_items must be greater than 0")]
    fn test_rejects_zero_items() {
        BloomFilterBuilder::ideal_parameters(0, 0.5);
    }

    #[test]
    #[should_panic(expected = "num_hashes must be at least 1")]
    fn test_rejects_zero_hashes() {
        BloomFilterBuilder::with_size(64, 0);
    }
}
