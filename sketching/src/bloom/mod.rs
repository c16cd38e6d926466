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

//! Bloom filter for approximate set membership.
//!
//! A [`BloomFilter`] sets `k` bits of a [`BitVector`](crate::bitvec::BitVector) for every
//! inserted item and reports an item as present only when all of its `k` bits are set. It never
//! produces false negatives; the false positive rate grows as the filter fills up.
//!
//! The `k` bit positions of an item come from the first `k` lanes of the filter's [`Hashing`]
//! implementation. Positions are distinct: a lane that repeats an earlier one moves forward to
//! the next free bit.
//!
//! [`Hashing`]: crate::hash::Hashing
//!
//! # Usage
//!
//! ```rust
//! # use sketching::bloom::BloomFilterBuilder;
//! # use sketching::hash::Murmur3;
//! let mut filter = BloomFilterBuilder::with_accuracy(1_000, 0.01).build::<Murmur3>();
//! filter.insert("apple");
//!
//! assert!(filter.contains("apple"));
//! assert!(filter.estimate_cardinality() > 0.5);
//! ```
//!
//! # Set Operations
//!
//! Filters with the same number of bits and hash functions can be combined:
//!
//! ```rust
//! # use sketching::bloom::BloomFilter;
//! # use sketching::hash::Murmur3;
//! let mut a = BloomFilter::<Murmur3>::new(256, 4);
//! let mut b = BloomFilter::<Murmur3>::new(256, 4);
//! a.insert("x");
//! b.insert("y");
//!
//! let union = a.union(&b);
//! assert!(union.contains("x") && union.contains("y"));
//! ```

mod builder;
mod sketch;

pub use self::builder::BloomFilterBuilder;
pub use self::sketch::BloomFilter;
