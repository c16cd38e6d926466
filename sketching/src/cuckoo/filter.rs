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
use rand::rngs::StdRng;

use super::bucket::Bucket;
use crate::hash::Fingerprinting;
use crate::hash::Hashing;
use crate::hash::Murmur3;

/// A cuckoo filter for probabilistic set membership with deletion.
///
/// Each item is reduced to a short fingerprint stored in one of two candidate buckets. The
/// primary bucket is `H::hash(item) mod capacity`. The alternate one is
/// `(H::hash(fingerprint bytes) - index) mod capacity`, so the alternate of the alternate is the
/// primary again and relocated fingerprints stay findable for any number of buckets.
///
/// Use [`super::CuckooFilterBuilder`] to construct instances.
pub struct CuckooFilter<H = Murmur3, F = Murmur3, R = StdRng> {
    buckets: Vec<Bucket>,
    bucket_size: usize,
    fingerprint_size: usize,
    evictions_limit: usize,
    len: usize,
    rng: R,
    _hashers: PhantomData<(H, F)>,
}

impl<H: Hashing, F: Fingerprinting, R: Rng> CuckooFilter<H, F, R> {
    pub(super) fn make(
        capacity: usize,
        bucket_size: usize,
        fingerprint_size: usize,
        evictions_limit: usize,
        rng: R,
    ) -> Self {
        CuckooFilter {
            buckets: vec![Bucket::new(bucket_size); capacity],
            bucket_size,
            fingerprint_size,
            evictions_limit,
            len: 0,
            rng,
            _hashers: PhantomData,
        }
    }

    /// Inserts an item into the filter.
    ///
    /// Returns `false` when no slot could be found within `evictions_limit` relocations. The
    /// filter is then full: every fingerprint stored before the call is still in place, and the
    /// caller must rebuild a larger filter from its own copy of the items.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sketching::cuckoo::CuckooFilterBuilder;
    /// # use sketching::hash::Murmur3;
    /// let mut filter = CuckooFilterBuilder::new(64).build_with_seed::<Murmur3, Murmur3>(7);
    /// assert!(filter.insert("apple"));
    /// assert!(filter.contains("apple"));
    /// assert_eq!(filter.len(), 1);
    /// ```
    pub fn insert(&mut self, item: impl AsRef<[u8]>) -> bool {
        let bytes = item.as_ref();
        let mut fingerprint = self.fingerprint(bytes);
        let i = self.index(bytes);
        let j = self.alt_index(i, fingerprint);

        if self.buckets[i].insert(fingerprint) || self.buckets[j].insert(fingerprint) {
            self.len += 1;
            return true;
        }

        // Both candidates are full: kick out random residents until one lands in a free slot.
        let mut index = if self.rng.random_bool(0.5) { i } else { j };
        let mut swaps = Vec::new();
        for _ in 0..self.evictions_limit {
            let slot = self.rng.random_range(0..self.bucket_size);
            let victim = self.buckets[index].replace(slot, fingerprint);
            swaps.push((index, slot, victim));

            fingerprint = victim;
            index = self.alt_index(index, fingerprint);
            if self.buckets[index].insert(fingerprint) {
                self.len += 1;
                return true;
            }
        }

        for (index, slot, victim) in swaps.into_iter().rev() {
            self.buckets[index].replace(slot, victim);
        }
        false
    }

    /// Inserts an item unless it is already reported as present.
    ///
    /// Returns `true` if the item was inserted or was already present.
    pub fn insert_if_not_present(&mut self, item: impl AsRef<[u8]>) -> bool {
        let bytes = item.as_ref();
        self.contains(bytes) || self.insert(bytes)
    }

    /// Tests whether an item is possibly in the filter.
    pub fn contains(&self, item: impl AsRef<[u8]>) -> bool {
        let bytes = item.as_ref();
        let fingerprint = self.fingerprint(bytes);
        let i = self.index(bytes);
        self.buckets[i].contains(fingerprint)
            || self.buckets[self.alt_index(i, fingerprint)].contains(fingerprint)
    }

    /// Removes one occurrence of an item's fingerprint.
    ///
    /// Returns `false` if neither candidate bucket holds it. Removing an item that was never
    /// inserted may delete the fingerprint of a colliding item.
    pub fn remove(&mut self, item: impl AsRef<[u8]>) -> bool {
        let bytes = item.as_ref();
        let fingerprint = self.fingerprint(bytes);
        let i = self.index(bytes);
        let j = self.alt_index(i, fingerprint);
        if self.buckets[i].remove(fingerprint) || self.buckets[j].remove(fingerprint) {
            self.len -= 1;
            return true;
        }
        false
    }

    /// Removes every fingerprint.
    pub fn reset(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Returns the number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of stored fingerprints.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no fingerprint is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of fingerprints per bucket.
    pub fn bucket_size(&self) -> usize {
        self.bucket_size
    }

    /// Returns the fingerprint size in bytes.
    pub fn fingerprint_size(&self) -> usize {
        self.fingerprint_size
    }

    /// Returns the bound on relocations per insertion.
    pub fn evictions_limit(&self) -> usize {
        self.evictions_limit
    }

    /// Returns the fraction of slots in use.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / (self.capacity() * self.bucket_size) as f64
    }

    fn fingerprint(&self, bytes: &[u8]) -> u64 {
        let fingerprint = F::fingerprint(bytes);
        match self.fingerprint_size {
            8 => fingerprint,
            size => fingerprint & ((1u64 << (8 * size)) - 1),
        }
    }

    fn index(&self, bytes: &[u8]) -> usize {
        (H::hash(bytes) % self.capacity() as u64) as usize
    }

    fn alt_index(&self, index: usize, fingerprint: u64) -> usize {
        let bytes = fingerprint.to_le_bytes();
        let capacity = self.capacity();
        let hash = (H::hash(&bytes[..self.fingerprint_size]) % capacity as u64) as usize;
        if hash >= index {
            hash - index
        } else {
            hash + capacity - index
        }
    }

    #[cfg(test)]
    fn bucket_lens(&self) -> usize {
        self.buckets.iter().map(Bucket::len).sum()
    }
}

impl<H, F, R: Clone> Clone for CuckooFilter<H, F, R> {
    fn clone(&self) -> Self {
        CuckooFilter {
            buckets: self.buckets.clone(),
            bucket_size: self.bucket_size,
            fingerprint_size: self.fingerprint_size,
            evictions_limit: self.evictions_limit,
            len: self.len,
            rng: self.rng.clone(),
            _hashers: PhantomData,
        }
    }
}

impl<H, F, R> fmt::Debug for CuckooFilter<H, F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CuckooFilter")
            .field("capacity", &self.buckets.len())
            .field("bucket_size", &self.bucket_size)
            .field("fingerprint_size", &self.fingerprint_size)
            .field("evictions_limit", &self.evictions_limit)
            .field("len", &self.len)
            .finish()
    }
}
