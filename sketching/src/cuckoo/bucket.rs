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

/// Fixed-capacity unordered multiset of fingerprints.
///
/// Live fingerprints occupy `slots[..len]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Bucket {
    slots: Box<[u64]>,
    len: usize,
}

impl Bucket {
    pub fn new(size: usize) -> Self {
        Bucket {
            slots: vec![0; size].into_boxed_slice(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn contains(&self, fingerprint: u64) -> bool {
        self.slots[..self.len].contains(&fingerprint)
    }

    /// Stores `fingerprint` if a slot is free.
    pub fn insert(&mut self, fingerprint: u64) -> bool {
        if self.len == self.slots.len() {
            return false;
        }
        self.slots[self.len] = fingerprint;
        self.len += 1;
        true
    }

    /// Removes one copy of `fingerprint`.
    pub fn remove(&mut self, fingerprint: u64) -> bool {
        match self.slots[..self.len].iter().position(|fp| *fp == fingerprint) {
            Some(slot) => {
                self.len -= 1;
                self.slots.swap(slot, self.len);
                true
            }
            None => false,
        }
    }

    /// Puts `fingerprint` into the occupied `slot` and returns the fingerprint it held.
    pub fn replace(&mut self, slot: usize, fingerprint: u64) -> u64 {
        debug_assert!(slot < self.len, "slot {slot} is not occupied");
        std::mem::replace(&mut self.slots[slot], fingerprint)
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }
}
