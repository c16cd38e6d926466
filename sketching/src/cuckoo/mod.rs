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

//! Cuckoo filter for approximate set membership with deletion.
//!
//! A [`CuckooFilter`] stores a short fingerprint of each item in one of two candidate buckets.
//! When both are full, insertion relocates random residents to their alternate bucket, up to a
//! bounded number of evictions. Unlike a Bloom filter, items can be removed.
//!
//! Fingerprints come from a [`Fingerprinting`] implementation and bucket indices from a
//! [`Hashing`] implementation. Eviction choices are drawn from an injectable [`rand::Rng`], so a
//! seeded filter behaves the same on every run.
//!
//! [`Fingerprinting`]: crate::hash::Fingerprinting
//! [`Hashing`]: crate::hash::Hashing
//!
//! # Usage
//!
//! ```rust
//! # use sketching::cuckoo::CuckooFilterBuilder;
//! # use sketching::hash::Murmur3;
//! let mut filter = CuckooFilterBuilder::new(1024)
//!     .fingerprint_size(2)
//!     .build::<Murmur3, Murmur3>();
//!
//! assert!(filter.insert("apple"));
//! assert!(filter.contains("apple"));
//! assert!(filter.remove("apple"));
//! assert!(!filter.contains("apple"));
//! ```

mod bucket;
mod builder;
mod filter;

pub use self::builder::CuckooFilterBuilder;
pub use self::builder::DEFAULT_BUCKET_SIZE;
pub use self::builder::DEFAULT_EVICTIONS_LIMIT;
pub use self::builder::DEFAULT_FINGERPRINT_SIZE;
pub use self::filter::CuckooFilter;
