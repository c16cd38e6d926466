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

//! MinHash estimator of Jaccard similarity.
//!
//! A [`MinHash`] keeps, for each of `k` random affine permutations of the digest space, the
//! smallest permuted digest seen so far. Two sketches built with the same permutations agree on a
//! lane with probability equal to the Jaccard index of their input sets, so the fraction of equal
//! lanes estimates it.
//!
//! Permutations are drawn once, from the operating system or from an injected [`rand::Rng`].
//! Only sketches sharing the same permutations can be compared or merged; use
//! [`MinHash::empty_like`] to create one.
//!
//! # Usage
//!
//! ```rust
//! # use sketching::minhash::MinHash;
//! # use sketching::hash::Murmur3;
//! let mut left = MinHash::<Murmur3>::with_seed(256, 42);
//! let mut right = left.empty_like();
//!
//! for value in 0u64..10_000 {
//!     left.insert(value.to_le_bytes());
//! }
//! for value in 5_000u64..15_000 {
//!     right.insert(value.to_le_bytes());
//! }
//!
//! // the true Jaccard index is 1/3
//! let jaccard = left.jaccard(&right);
//! assert!((jaccard - 1.0 / 3.0).abs() < 0.1);
//! ```

mod permutation;
mod sketch;

pub use self::permutation::MERSENNE_PRIME;
pub use self::permutation::Permutation;
pub use self::sketch::MinHash;
