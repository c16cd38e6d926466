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

//! Count-Min sketch implementation for frequency estimation.
//!
//! The Count-Min sketch keeps a `depth x width` matrix of counters. Every update adds its value
//! to one counter per row, and the estimate of a key is the minimum of its counters, so it never
//! under-counts. Collisions only inflate estimates.
//!
//! Counters are unsigned. The counter type is a type parameter: `u8`, `u16`, `u32` or `u64` (the
//! default). An update or merge that would overflow a counter panics and leaves the sketch
//! unchanged, so a returned estimate is never clamped below the true count.
//!
//! # Usage
//!
//! ```rust
//! # use sketching::countmin::CountMinSketch;
//! # use sketching::hash::Murmur3;
//! let mut sketch = CountMinSketch::<Murmur3>::new(5, 256);
//! sketch.increment("apple");
//! sketch.update("banana", 3);
//! assert!(sketch.estimate("banana") >= 3);
//! ```
//!
//! # Configuration Helpers
//!
//! ```rust
//! # use sketching::countmin::CountMinSketch;
//! # use sketching::hash::Murmur3;
//! let (depth, width) = CountMinSketch::<Murmur3>::ideal_parameters(0.01, 0.99);
//! assert_eq!((depth, width), (7, 200));
//!
//! let sketch = CountMinSketch::<Murmur3, u32>::with_accuracy(0.01, 0.99);
//! assert_eq!(sketch.width(), 200);
//! ```

mod sketch;
pub use self::sketch::CountMinSketch;

mod value;
pub use self::value::CountMinValue;
