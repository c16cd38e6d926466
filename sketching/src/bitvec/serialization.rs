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

use super::BitVector;
use crate::codec::SketchBytes;
use crate::codec::SketchSlice;
use crate::codec::assert::ensure_payload_len;
use crate::codec::assert::insufficient_data;
use crate::error::Error;

const WORD_BYTES: usize = size_of::<u64>();

impl BitVector {
    /// Serializes the vector to bytes.
    ///
    /// The bit width comes first as a little-endian `u64`, followed by each storage word as a
    /// little-endian `u64`.
    pub fn serialize(&self) -> Vec<u8> {
        let mut bytes = SketchBytes::with_capacity(WORD_BYTES * (1 + self.words().len()));
        bytes.write_u64_le(self.bit_width() as u64);
        for word in self.words() {
            bytes.write_u64_le(*word);
        }
        bytes.into_bytes()
    }

    /// Deserializes a vector from bytes written by [`BitVector::serialize`].
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is truncated, carries trailing bytes, or declares a width
    /// that does not fit in memory.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        let mut cursor = SketchSlice::new(bytes);
        let bit_width = cursor
            .read_u64_le()
            .map_err(insufficient_data("bit_width"))?;
        let bit_width = usize::try_from(bit_width).map_err(|_| {
            Error::deserial("bit_width does not fit in usize").with_context("bit_width", bit_width)
        })?;

        let num_words = bit_width.div_ceil(u64::BITS as usize);
        let expected_len = (num_words as u64).saturating_mul(WORD_BYTES as u64);
        ensure_payload_len("words", expected_len, cursor.remaining())?;

        let mut words = Vec::with_capacity(num_words);
        for _ in 0..num_words {
            words.push(cursor.read_u64_le().map_err(insufficient_data("words"))?);
        }
        Ok(BitVector::from_words(bit_width, words))
    }
}
