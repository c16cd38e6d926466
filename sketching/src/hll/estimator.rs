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

//! Raw estimate and range corrections.

/// Size of the digest space.
const TWO_POW_32: f64 = (1u64 << 32) as f64;

/// Bias correction constant for `m` registers.
pub(super) fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / m as f64),
    }
}

/// Estimates the number of distinct items from register values.
pub(super) fn estimate(registers: &[u8]) -> f64 {
    let m = registers.len() as f64;
    let sum: f64 = registers.iter().map(|r| (-f64::from(*r)).exp2()).sum();
    let raw = alpha(registers.len()) * m * m / sum;

    if raw <= 2.5 * m {
        let empty = registers.iter().filter(|r| **r == 0).count();
        if empty > 0 {
            return linear_counting(m, empty as f64);
        }
        raw
    } else if raw <= TWO_POW_32 / 30.0 {
        raw
    } else {
        -TWO_POW_32 * (1.0 - raw / TWO_POW_32).ln()
    }
}

fn linear_counting(m: f64, empty: f64) -> f64 {
    m * (m / empty).ln()
}
