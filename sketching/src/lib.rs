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

//! # Sketching
//!
//! Approximate summary data structures ("sketches") that answer membership, cardinality,
//! frequency and similarity queries over large or unbounded streams using fixed memory.
//!
//! Every sketch consumes items as byte sequences and is generic over a hashing capability
//! (see [`hash::Hashing`]), so callers choose the hash function once, at the type level.
//!
//! This library is divided into modules that constitute distinct groups of functionality:
//!
//! - [`bitvec`]: packed bit storage with bitwise algebra and a raw persisted layout
//! - [`bloom`]: membership filter with no false negatives
//! - [`countmin`]: frequency estimation that never underestimates
//! - [`cuckoo`]: membership filter with deletion support
//! - [`hll`]: distinct-count estimation
//! - [`minhash`]: Jaccard similarity estimation
//!
//! None of the sketches synchronize internally. Mutation goes through `&mut self`, and merges
//! take the receiver mutably and the operand by shared reference.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod bitvec;
pub mod bloom;
pub mod countmin;
pub mod cuckoo;
pub mod error;
pub mod hash;
pub mod hll;
pub mod minhash;

mod codec;
