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

//! Packed bit vector with bitwise algebra and population count.
//!
//! [`BitVector`] stores a fixed number of bits packed into `u64` words. It is the storage of the
//! Bloom filter, and the only structure in this crate with a persisted layout.
//!
//! # Usage
//!
//! ```rust
//! # use sketching::bitvec::BitVector;
//! let mut a = BitVector::new(100);
//! a.set(3, true);
//! a.set(64, true);
//!
//! let mut b = BitVector::new(100);
//! b.set(64, true);
//!
//! assert_eq!((&a & &b).cardinality(), 1);
//! assert_eq!((&a | &b).cardinality(), 2);
//! assert_eq!((!&a).cardinality(), 98);
//! assert_eq!(a.first(), Some(3));
//! ```
//!
//! # Serialization
//!
//! The layout is the bit width as a little-endian `u64`, followed by every storage word in index
//! order as a little-endian `u64`. Bit `n` of the vector is therefore bit `n % 8` of payload byte
//! `n / 8`.
//!
//! ```rust
//! # use sketching::bitvec::BitVector;
//! let mut bits = BitVector::new(10);
//! bits.set(9, true);
//!
//! let bytes = bits.serialize();
//! assert_eq!(bytes.len(), 16);
//! assert_eq!(BitVector::deserialize(&bytes).unwrap(), bits);
//! ```

mod serialization;
mod vector;

pub use self::vector::BitVector;
pub use self::vector::Ones;
