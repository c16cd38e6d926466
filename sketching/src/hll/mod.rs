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

//! HyperLogLog cardinality estimator.
//!
//! A [`HyperLogLog`] keeps `m = 2^p` one-byte registers. Each item's 32-bit digest picks a
//! register with its low `p` bits, and the register remembers the longest run of leading zeros
//! seen in the remaining `32 - p` bits. The harmonic mean of the registers yields an estimate of
//! the number of distinct items, with a relative standard error of about `1.04 / sqrt(m)`.
//!
//! Small estimates switch to linear counting over the empty registers, and estimates close to
//! the 32-bit digest space get a large-range correction.
//!
//! # Usage
//!
//! ```rust
//! # use sketching::hll::HyperLogLog;
//! # use sketching::hash::Murmur3;
//! let mut hll = HyperLogLog::<Murmur3>::new(12);
//! for i in 0u32..10_000 {
//!     hll.insert(i.to_le_bytes());
//! }
//! let estimate = hll.estimate();
//! assert!((estimate - 10_000.0).abs() < 500.0);
//! ```
//!
//! # Union
//!
//! ```rust
//! # use sketching::hll::HyperLogLog;
//! # use sketching::hash::Murmur3;
//! let mut a = HyperLogLog::<Murmur3>::default();
//! let mut b = HyperLogLog::<Murmur3>::default();
//! a.insert("x");
//! b.insert("y");
//!
//! let union = a.union(&b);
//! assert!(union.estimate() > a.estimate());
//! ```

mod estimator;
mod sketch;

pub use self::sketch::HyperLogLog;

/// Minimum supported precision.
pub const MIN_PRECISION: u8 = 4;
/// Maximum supported precision.
pub const MAX_PRECISION: u8 = 16;
/// Precision used by [`HyperLogLog::default`].
pub const DEFAULT_PRECISION: u8 = 8;
