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

use std::fmt;

mod private {
    // Sealed trait to prevent external implementations of CountMinValue.
    pub trait Sealed {}
}

/// Counter type supported in a Count-Min sketch.
pub trait CountMinValue: private::Sealed + Copy + Ord + fmt::Debug {
    /// Zero value for counters and weights.
    const ZERO: Self;

    /// One value for unit updates.
    const ONE: Self;

    /// Maximum representable value.
    const MAX: Self;

    /// Performs the + operation, returning `None` on overflow.
    fn checked_add(self, other: Self) -> Option<Self>;

    /// Performs the + operation. Callers check for overflow first.
    fn add(self, other: Self) -> Self;

    /// Converts into `u64`.
    fn to_u64(self) -> u64;
}

macro_rules! impl_unsigned {
    ($name:ty) => {
        impl private::Sealed for $name {}

        impl CountMinValue for $name {
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MAX: Self = <$name>::MAX;

            #[inline(always)]
            fn checked_add(self, other: Self) -> Option<Self> {
                <$name>::checked_add(self, other)
            }

            #[inline(always)]
            fn add(self, other: Self) -> Self {
                self + other
            }

            #[inline(always)]
            fn to_u64(self) -> u64 {
                self as u64
            }
        }
    };
}

impl_unsigned!(u8);
impl_unsigned!(u16);
impl_unsigned!(u32);
impl_unsigned!(u64);

#[cfg(test)]
mod tests {
    use super::CountMinValue;

    #[test]
    fn test_checked_add() {
        assert_eq!(CountMinValue::checked_add(250u8, 10), None);
        assert_eq!(CountMinValue::checked_add(250u8, 5), Some(u8::MAX));
        assert_eq!(CountMinValue::checked_add(u16::MAX, <u16 as CountMinValue>::ONE), None);
        assert_eq!(CountMinValue::add(1u64, 2), 3);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(u8::MAX.to_u64(), 255);
        assert_eq!(<u32 as CountMinValue>::MAX.to_u64(), u64::from(u32::MAX));
        assert_eq!(<u64 as CountMinValue>::ZERO.to_u64(), 0);
    }
}
