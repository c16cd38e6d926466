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

use insta::assert_snapshot;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sketching::bitvec::BitVector;
use sketching::error::ErrorKind;

const WIDTHS: [usize; 6] = [1, 10, 63, 64, 65, 200];

fn random_vector(rng: &mut StdRng, width: usize) -> BitVector {
    let mut bits = BitVector::new(width);
    for i in 0..width {
        bits.set(i, rng.random_bool(0.5));
    }
    bits
}

#[test]
fn test_operators_match_boolean_semantics() {
    let mut rng = StdRng::seed_from_u64(7);
    for width in WIDTHS {
        for _ in 0..20 {
            let a = random_vector(&mut rng, width);
            let b = random_vector(&mut rng, width);
            let and = &a & &b;
            let or = &a | &b;
            let not = !&a;
            for i in 0..width {
                assert_eq!(and.get(i), a.get(i) && b.get(i), "and, width {width}, bit {i}");
                assert_eq!(or.get(i), a.get(i) || b.get(i), "or, width {width}, bit {i}");
                assert_eq!(not.get(i), !a.get(i), "not, width {width}, bit {i}");
            }
        }
    }
}

#[test]
fn test_algebraic_identities() {
    let mut rng = StdRng::seed_from_u64(11);
    for width in WIDTHS {
        let a = random_vector(&mut rng, width);
        assert_eq!(!!a.clone(), a);
        assert_eq!(&a & &a, a);
        assert_eq!(&a | &a, a);
        assert_eq!(a.clone() & a.clone(), a);
        assert_eq!(a.clone() | a.clone(), a);
    }
}

#[test]
fn test_assign_operators() {
    let mut rng = StdRng::seed_from_u64(13);
    let a = random_vector(&mut rng, 100);
    let b = random_vector(&mut rng, 100);

    let mut and = a.clone();
    and &= &b;
    assert_eq!(and, &a & &b);

    let mut or = a.clone();
    or |= &b;
    assert_eq!(or, &a | &b);
}

#[test]
fn test_cardinality_and_first_agree_with_get() {
    let mut rng = StdRng::seed_from_u64(17);
    for width in WIDTHS {
        let bits = random_vector(&mut rng, width);
        let ones: Vec<usize> = (0..width).filter(|i| bits.get(*i)).collect();
        assert_eq!(bits.cardinality(), ones.len());
        assert_eq!(bits.first(), ones.first().copied());
        assert_eq!(bits.iter_ones().collect::<Vec<_>>(), ones);

        let negated = !&bits;
        assert_eq!(negated.cardinality(), width - ones.len());
    }
}

#[test]
#[should_panic(expected = "to form a conjunction both bit vectors must have the same bit_width")]
fn test_conjunction_rejects_width_mismatch() {
    let _ = &BitVector::new(10) & &BitVector::new(11);
}

#[test]
#[should_panic(expected = "to form a disjunction both bit vectors must have the same bit_width")]
fn test_disjunction_rejects_width_mismatch() {
    let mut a = BitVector::new(64);
    a |= &BitVector::new(65);
}

#[test]
fn test_display() {
    let mut bits = BitVector::new(8);
    bits.set(1, true);
    bits.set(7, true);
    assert_snapshot!(bits, @"BitVector(width=8, value=10000010)");
    assert_snapshot!(!&bits, @"BitVector(width=8, value=1111101)");
}

#[test]
fn test_serialization_round_trip() {
    let mut rng = StdRng::seed_from_u64(19);
    for width in WIDTHS {
        let bits = random_vector(&mut rng, width);
        let bytes = bits.serialize();
        assert_eq!(bytes.len(), 8 + 8 * width.div_ceil(64));
        assert_eq!(&bytes[..8], &(width as u64).to_le_bytes());
        for i in 0..width {
            let byte = bytes[8 + i / 8];
            assert_eq!((byte >> (i % 8)) & 1 == 1, bits.get(i), "width {width}, bit {i}");
        }
        assert_eq!(BitVector::deserialize(&bytes).unwrap(), bits);
    }
}

#[test]
fn test_deserialize_rejects_every_truncation() {
    let mut rng = StdRng::seed_from_u64(23);
    let bytes = random_vector(&mut rng, 130).serialize();
    for len in 0..bytes.len() {
        let err = BitVector::deserialize(&bytes[..len]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData, "length {len}");
    }
}
