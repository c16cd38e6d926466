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
use std::ops::BitAnd;
use std::ops::BitAndAssign;
use std::ops::BitOr;
use std::ops::BitOrAssign;
use std::ops::Not;

const WORD_BITS: usize = u64::BITS as usize;

/// Fixed-width bit storage packed into `u64` words.
///
/// The number of words is always `ceil(bit_width / 64)`. Bits beyond `bit_width` in the last
/// word are padding: they are never read by queries, but [`BitVector::negate`] flips them along
/// with the rest of the word. Two vectors are equal when their widths and words are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitVector {
    bit_width: usize,
    words: Vec<u64>,
}

impl BitVector {
    /// Creates a vector of `bit_width` bits, all cleared.
    pub fn new(bit_width: usize) -> Self {
        Self {
            bit_width,
            words: vec![0; bit_width.div_ceil(WORD_BITS)],
        }
    }

    /// Rebuilds a vector from its width and raw words.
    ///
    /// # Panics
    ///
    /// Panics if `words.len()` is not `ceil(bit_width / 64)`.
    pub fn from_words(bit_width: usize, words: Vec<u64>) -> Self {
        assert_eq!(
            words.len(),
            bit_width.div_ceil(WORD_BITS),
            "word count does not match bit_width {bit_width}"
        );
        Self { bit_width, words }
    }

    /// Returns the number of addressable bits.
    pub fn bit_width(&self) -> usize {
        self.bit_width
    }

    /// Returns the storage words, least significant bits first.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Returns the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= bit_width`.
    pub fn get(&self, index: usize) -> bool {
        self.check_index(index);
        let (word, mask) = locate(index);
        self.words[word] & mask != 0
    }

    /// Sets the bit at `index` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= bit_width`.
    pub fn set(&mut self, index: usize, value: bool) {
        self.check_index(index);
        let (word, mask) = locate(index);
        if value {
            self.words[word] |= mask;
        } else {
            self.words[word] &= !mask;
        }
    }

    /// Clears every bit, padding included.
    pub fn clear_all(&mut self) {
        self.words.fill(0);
    }

    /// Performs a bitwise AND with `other` in place.
    ///
    /// # Panics
    ///
    /// Panics if the two vectors have different widths.
    pub fn form_conjunction(&mut self, other: &BitVector) {
        assert_eq!(
            self.bit_width, other.bit_width,
            "to form a conjunction both bit vectors must have the same bit_width"
        );
        for (word, other_word) in self.words.iter_mut().zip(&other.words) {
            *word &= *other_word;
        }
    }

    /// Performs a bitwise OR with `other` in place.
    ///
    /// # Panics
    ///
    /// Panics if the two vectors have different widths.
    pub fn form_disjunction(&mut self, other: &BitVector) {
        assert_eq!(
            self.bit_width, other.bit_width,
            "to form a disjunction both bit vectors must have the same bit_width"
        );
        for (word, other_word) in self.words.iter_mut().zip(&other.words) {
            *word |= *other_word;
        }
    }

    /// Flips every storage word, padding bits included.
    pub fn negate(&mut self) {
        for word in &mut self.words {
            *word = !*word;
        }
    }

    /// Returns the number of set bits among the first `bit_width` bits.
    ///
    /// Padding bits in the last word are not counted, even after [`BitVector::negate`] set them,
    /// so the result never exceeds `bit_width`.
    pub fn cardinality(&self) -> usize {
        let full_words = self.bit_width / WORD_BITS;
        let mut count: usize = self.words[..full_words]
            .iter()
            .map(|word| word.count_ones() as usize)
            .sum();
        let tail_bits = self.bit_width % WORD_BITS;
        if tail_bits != 0 {
            count += (self.words[full_words] & low_mask(tail_bits)).count_ones() as usize;
        }
        count
    }

    /// Returns true if no addressable bit is set.
    pub fn is_clear(&self) -> bool {
        self.first().is_none()
    }

    /// Returns the index of the lowest set bit, if any.
    pub fn first(&self) -> Option<usize> {
        self.iter_ones().next()
    }

    /// Returns an iterator over the indices of set bits, in increasing order.
    pub fn iter_ones(&self) -> Ones<'_> {
        Ones {
            words: &self.words,
            bit_width: self.bit_width,
            word_index: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }

    fn check_index(&self, index: usize) {
        assert!(
            index < self.bit_width,
            "bit index {index} out of range for bit_width {}",
            self.bit_width
        );
    }
}

/// Iterator over the indices of set bits of a [`BitVector`].
///
/// Created by [`BitVector::iter_ones`].
#[derive(Debug, Clone)]
pub struct Ones<'a> {
    words: &'a [u64],
    bit_width: usize,
    word_index: usize,
    current: u64,
}

impl Iterator for Ones<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != 0 {
                let offset = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                let index = self.word_index * WORD_BITS + offset;
                if index < self.bit_width {
                    return Some(index);
                }
                // Only padding remains.
                self.current = 0;
                self.word_index = self.words.len();
                return None;
            }
            self.word_index += 1;
            if self.word_index >= self.words.len() {
                return None;
            }
            self.current = self.words[self.word_index];
        }
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitVector(width={}, value=", self.bit_width)?;
        match self.iter_ones().last() {
            None => write!(f, "0")?,
            Some(highest) => {
                for index in (0..=highest).rev() {
                    f.write_str(if self.get(index) { "1" } else { "0" })?;
                }
            }
        }
        write!(f, ")")
    }
}

impl BitAnd<&BitVector> for &BitVector {
    type Output = BitVector;

    fn bitand(self, rhs: &BitVector) -> BitVector {
        let mut conjunction = self.clone();
        conjunction.form_conjunction(rhs);
        conjunction
    }
}

impl BitAnd for BitVector {
    type Output = BitVector;

    fn bitand(mut self, rhs: BitVector) -> BitVector {
        self.form_conjunction(&rhs);
        self
    }
}

impl BitAndAssign<&BitVector> for BitVector {
    fn bitand_assign(&mut self, rhs: &BitVector) {
        self.form_conjunction(rhs);
    }
}

impl BitOr<&BitVector> for &BitVector {
    type Output = BitVector;

    fn bitor(self, rhs: &BitVector) -> BitVector {
        let mut disjunction = self.clone();
        disjunction.form_disjunction(rhs);
        disjunction
    }
}

impl BitOr for BitVector {
    type Output = BitVector;

    fn bitor(mut self, rhs: BitVector) -> BitVector {
        self.form_disjunction(&rhs);
        self
    }
}

impl BitOrAssign<&BitVector> for BitVector {
    fn bitor_assign(&mut self, rhs: &BitVector) {
        self.form_disjunction(rhs);
    }
}

impl Not for &BitVector {
    type Output = BitVector;

    fn not(self) -> BitVector {
        let mut negation = self.clone();
        negation.negate();
        negation
    }
}

impl Not for BitVector {
    type Output = BitVector;

    fn not(mut self) -> BitVector {
        self.negate();
        self
    }
}

/// Returns the word index and the single-bit mask for `index`.
#[inline]
fn locate(index: usize) -> (usize, u64) {
    (index / WORD_BITS, 1u64 << (index % WORD_BITS))
}

/// Mask with the lowest `bits` bits set, for `0 < bits < 64`.
#[inline]
fn low_mask(bits: usize) -> u64 {
    (1u64 << bits) - 1
}
