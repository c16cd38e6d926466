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

use std::hash::Hasher;

use super::DEFAULT_UPDATE_SEED;
use super::Fingerprinting;
use super::Hashing;
use super::read_u64_le;

const C1: u64 = 0x87c37b91114253d5;
const C2: u64 = 0x4cf5ad432745937f;

/// Seed for fingerprints. Differs from [`DEFAULT_UPDATE_SEED`].
const FINGERPRINT_SEED: u64 = 7919;

/// Hashing and fingerprinting capability backed by MurmurHash3 (x64, 128-bit).
///
/// The two 64-bit halves of the 128-bit digest are the base digests for lanes.
///
/// # Examples
///
/// ```
/// # use sketching::hash::Fingerprinting;
/// # use sketching::hash::Hashing;
/// # use sketching::hash::Murmur3;
/// let (a, b) = Murmur3::hash_pair(b"apple");
/// assert_ne!(a, b);
/// assert_eq!(Murmur3::hash(b"apple"), a);
/// assert_eq!(Murmur3::MAX_FINGERPRINT_SIZE, 8);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Murmur3;

impl Hashing for Murmur3 {
    fn hash_pair(bytes: &[u8]) -> (u64, u64) {
        let mut hasher = MurmurHash3X64128::default();
        hasher.write(bytes);
        hasher.finish128()
    }
}

impl Fingerprinting for Murmur3 {
    const MAX_FINGERPRINT_SIZE: usize = 8;

    fn fingerprint(bytes: &[u8]) -> u64 {
        let mut hasher = MurmurHash3X64128::with_seed(FINGERPRINT_SEED);
        hasher.write(bytes);
        hasher.finish128().0
    }
}

/// The MurmurHash3 is a fast, non-cryptographic, 128-bit hash function that has
/// excellent avalanche and 2-way bit independence properties.
#[derive(Debug)]
pub(crate) struct MurmurHash3X64128 {
    h1: u64,
    h2: u64,
    total: u64,
    buf: [u8; 16],
    buf_len: usize,
}

impl MurmurHash3X64128 {
    pub fn with_seed(seed: u64) -> Self {
        MurmurHash3X64128 {
            h1: seed,
            h2: seed,
            total: 0,
            buf: [0; 16],
            buf_len: 0,
        }
    }

    pub fn finish128(&self) -> (u64, u64) {
        let mut h1 = self.h1;
        let mut h2 = self.h2;

        let total = self.total + self.buf_len as u64;
        let rem = self.buf_len;

        // tail
        if rem > 0 {
            if rem > 8 {
                let mut k2 = read_u64_le(&self.buf[8..rem]);
                k2 = k2.wrapping_mul(C2);
                k2 = k2.rotate_left(33);
                k2 = k2.wrapping_mul(C1);
                h2 ^= k2;
            }

            let mut k1 = read_u64_le(&self.buf[..rem.min(8)]);
            k1 = k1.wrapping_mul(C1);
            k1 = k1.rotate_left(31);
            k1 = k1.wrapping_mul(C2);
            h1 ^= k1;
        }

        h1 ^= total;
        h2 ^= total;
        h1 = h1.wrapping_add(h2);
        h2 = h2.wrapping_add(h1);
        h1 = fmix64(h1);
        h2 = fmix64(h2);
        h1 = h1.wrapping_add(h2);
        h2 = h2.wrapping_add(h1);
        (h1, h2)
    }

    #[inline]
    fn update(&mut self, mut k1: u64, mut k2: u64) {
        k1 = k1.wrapping_mul(C1);
        k1 = k1.rotate_left(31);
        k1 = k1.wrapping_mul(C2);
        self.h1 ^= k1;

        self.h1 = self.h1.rotate_left(27);
        self.h1 = self.h1.wrapping_add(self.h2);
        self.h1 = self.h1.wrapping_mul(5).wrapping_add(0x52dce729);

        k2 = k2.wrapping_mul(C2);
        k2 = k2.rotate_left(33);
        k2 = k2.wrapping_mul(C1);
        self.h2 ^= k2;

        self.h2 = self.h2.rotate_left(31);
        self.h2 = self.h2.wrapping_add(self.h1);
        self.h2 = self.h2.wrapping_mul(5).wrapping_add(0x38495ab5);

        self.total += 16;
    }
}

impl Default for MurmurHash3X64128 {
    fn default() -> Self {
        Self::with_seed(DEFAULT_UPDATE_SEED)
    }
}

impl Hasher for MurmurHash3X64128 {
    fn finish(&self) -> u64 {
        self.finish128().0
    }

    fn write(&mut self, mut bytes: &[u8]) {
        if self.buf_len + bytes.len() < 16 {
            self.buf[self.buf_len..self.buf_len + bytes.len()].copy_from_slice(bytes);
            self.buf_len += bytes.len();
            return;
        }

        if self.buf_len != 0 {
            let wanted = 16 - self.buf_len;
            self.buf[self.buf_len..].copy_from_slice(&bytes[..wanted]);

            let k1 = read_u64_le(&self.buf[0..8]);
            let k2 = read_u64_le(&self.buf[8..16]);
            self.update(k1, k2);

            bytes = &bytes[wanted..];
            self.buf_len = 0;
        }

        // Full 16-byte blocks; up to 15 trailing bytes are buffered.
        let blocks = bytes.len() >> 4;
        for i in 0..blocks {
            let lo = i << 4;
            let mi = lo + 8;
            let hi = mi + 8;
            let k1 = read_u64_le(&bytes[lo..mi]);
            let k2 = read_u64_le(&bytes[mi..hi]);
            self.update(k1, k2);
        }

        let len = bytes.len() % 16;
        if len > 0 {
            self.buf[0..len].copy_from_slice(&bytes[blocks << 4..]);
            self.buf_len = len;
        }
    }
}

/// Finalization mix: force all bits of a hash block to avalanche.
#[inline]
pub(crate) fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51afd7ed558ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ceb9fe1a85ec53);
    k ^ (k >> 33)
}
