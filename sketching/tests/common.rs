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

use rand::Rng;
use sketching::hash::Fingerprinting;
use sketching::hash::Hashing;

const FNV_PRIME: u32 = 16777619;
const FNV_OFFSET_BASIS: u32 = 2166136261;
const FNV_ALT_OFFSET_BASIS: u32 = 3560826425;

fn fnv1a(bytes: &[u8], basis: u32) -> u32 {
    bytes
        .iter()
        .fold(basis, |hash, byte| (hash ^ u32::from(*byte)).wrapping_mul(FNV_PRIME))
}

/// 32-bit FNV-1a over two offset bases, standing in for a caller-provided hash.
#[allow(dead_code)] // false-positive
pub struct Fnv1a;

impl Hashing for Fnv1a {
    fn hash_pair(bytes: &[u8]) -> (u64, u64) {
        (
            u64::from(fnv1a(bytes, FNV_OFFSET_BASIS)),
            u64::from(fnv1a(bytes, FNV_ALT_OFFSET_BASIS)),
        )
    }
}

impl Fingerprinting for Fnv1a {
    const MAX_FINGERPRINT_SIZE: usize = 4;

    fn fingerprint(bytes: &[u8]) -> u64 {
        u64::from(fnv1a(bytes, FNV_ALT_OFFSET_BASIS))
    }
}

#[allow(dead_code)] // false-positive
pub fn random_bytes(rng: &mut impl Rng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.random()).collect()
}

#[allow(dead_code)] // false-positive
pub fn random_items(rng: &mut impl Rng, count: usize) -> Vec<Vec<u8>> {
    (0..count).map(|_| random_bytes(rng, 16)).collect()
}
