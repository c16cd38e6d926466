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

mod common;

use common::Fnv1a;
use common::random_items;
use googletest::assert_that;
use googletest::prelude::gt;
use googletest::prelude::lt;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sketching::cuckoo::CuckooFilter;
use sketching::cuckoo::CuckooFilterBuilder;
use sketching::hash::Murmur3;

fn filter(capacity: usize) -> CuckooFilter<Murmur3, Murmur3> {
    CuckooFilterBuilder::new(capacity)
        .fingerprint_size(4)
        .build_with_seed(2019)
}

#[test]
fn test_inserted_items_are_found_until_removed() {
    let mut rng = StdRng::seed_from_u64(1);
    let items = random_items(&mut rng, 500);
    let mut filter = filter(256);
    for item in &items {
        assert!(filter.insert(item));
    }
    assert_eq!(filter.len(), items.len());

    let (removed, kept) = items.split_at(250);
    for item in removed {
        assert!(filter.remove(item));
    }
    for item in removed {
        assert!(!filter.contains(item));
        assert!(!filter.remove(item));
    }
    for item in kept {
        assert!(filter.contains(item));
    }
    assert_eq!(filter.len(), kept.len());
}

#[test]
fn test_insert_if_not_present_twice() {
    let mut filter = filter(64);
    assert!(filter.insert_if_not_present("apple"));
    assert!(filter.insert_if_not_present("apple"));
    assert_eq!(filter.len(), 1);
    assert!(filter.contains("apple"));

    assert!(filter.remove("apple"));
    assert!(!filter.contains("apple"));
}

#[test]
fn test_duplicates_are_counted() {
    let mut filter = filter(64);
    assert!(filter.insert("apple"));
    assert!(filter.insert("apple"));
    assert_eq!(filter.len(), 2);

    assert!(filter.remove("apple"));
    assert!(filter.contains("apple"));
    assert!(filter.remove("apple"));
    assert!(!filter.contains("apple"));
}

#[test]
fn test_full_filter_rejects_without_losing_items() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut filter = CuckooFilterBuilder::new(16)
        .bucket_size(2)
        .fingerprint_size(4)
        .evictions_limit(50)
        .build_with_seed::<Murmur3, Murmur3>(5);

    let mut inserted = vec![];
    let mut rejected = 0;
    for item in random_items(&mut rng, 200) {
        if filter.insert(&item) {
            inserted.push(item);
        } else {
            rejected += 1;
        }
    }

    assert!(rejected > 0);
    assert!(inserted.len() <= 32);
    assert_eq!(filter.len(), inserted.len());
    for item in &inserted {
        assert!(filter.contains(item));
    }
}

#[test]
fn test_load_factor() {
    let mut filter = CuckooFilterBuilder::new(8)
        .bucket_size(4)
        .fingerprint_size(4)
        .build_with_seed::<Murmur3, Murmur3>(3);
    for i in 0u32..16 {
        assert!(filter.insert(i.to_le_bytes()));
    }
    assert_eq!(filter.load_factor(), 0.5);
}

#[test]
fn test_seeded_filters_are_reproducible() {
    let mut rng = StdRng::seed_from_u64(4);
    let items = random_items(&mut rng, 300);

    let mut results = vec![];
    for _ in 0..2 {
        let mut filter = CuckooFilterBuilder::new(64)
            .fingerprint_size(2)
            .build_with_seed::<Murmur3, Murmur3>(77);
        let outcomes: Vec<bool> = items.iter().map(|item| filter.insert(item)).collect();
        results.push(outcomes);
    }
    assert_eq!(results[0], results[1]);
}

#[test]
fn test_injected_rng() {
    let mut filter = CuckooFilterBuilder::new(32)
        .fingerprint_size(4)
        .build_with_rng::<Fnv1a, Fnv1a, _>(StdRng::seed_from_u64(8));
    for i in 0u32..40 {
        assert!(filter.insert(i.to_le_bytes()));
    }
    for i in 0u32..40 {
        assert!(filter.contains(i.to_le_bytes()));
    }
}

#[test]
fn test_false_positive_rate() {
    let mut rng = StdRng::seed_from_u64(6);
    let mut filter = CuckooFilterBuilder::new(1024)
        .fingerprint_size(1)
        .build_with_seed::<Murmur3, Murmur3>(11);
    for item in random_items(&mut rng, 2000) {
        filter.insert(item);
    }

    let false_positives = random_items(&mut rng, 10_000)
        .iter()
        .filter(|item| filter.contains(item))
        .count();
    // two buckets of four one-byte fingerprints each: at most 8/256
    assert_that!(false_positives as f64 / 10_000.0, lt(8.0 / 256.0));
}

#[test]
fn test_exact_capacity_reaches_high_load() {
    let mut rng = StdRng::seed_from_u64(12);
    let mut filter = CuckooFilterBuilder::new(1000)
        .fingerprint_size(4)
        .build_with_seed::<Murmur3, Murmur3>(13);
    assert_eq!(filter.capacity(), 1000);

    let mut inserted = vec![];
    for item in random_items(&mut rng, 3400) {
        if filter.insert(&item) {
            inserted.push(item);
        }
    }
    assert_that!(filter.load_factor(), gt(0.8));
    for item in &inserted {
        assert!(filter.contains(item));
    }
}
