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

/// The Mersenne prime `2^61 - 1`, modulus of every [`Permutation`].
pub const MERSENNE_PRIME: u64 = (1 << 61) - 1;

/// A random affine permutation `x -> (a * x + b) mod P` with `P = 2^61 - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Permutation {
    a: u64,
    b: u64,
}

impl Permutation {
    /// Creates the permutation with multiplier `a` and offset `b`.
    ///
    /// # Panics
    ///
    /// Panics unless `1 <= a < P` and `b < P`.
    pub fn new(a: u64, b: u64) -> Self {
        assert!(
            (1..MERSENNE_PRIME).contains(&a),
            "multiplier must be in [1, 2^61 - 1), got {a}"
        );
        assert!(b < MERSENNE_PRIME, "offset must be below 2^61 - 1, got {b}");
        Permutation { a, b }
    }

    /// Draws a uniformly random permutation.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Permutation {
            a: rng.random_range(1..MERSENNE_PRIME),
            b: rng.random_range(0..MERSENNE_PRIME),
        }
    }

    /// Returns the multiplier.
    pub fn a(&self) -> u64 {
        self.a
    }

    /// Returns the offset.
    pub fn b(&self) -> u64 {
        self.b
    }

    /// Maps `x` through the permutation.
    pub fn apply(&self, x: u64) -> u64 {
        let value = u128::from(self.a) * u128::from(x) + u128::from(self.b);
        (value % u128::from(MERSENNE_PRIME)) as u64
    }
}
