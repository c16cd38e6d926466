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

use std::cmp::Ordering;

use crate::error::Error;

pub(crate) fn insufficient_data(tag: &'static str) -> impl FnOnce(std::io::Error) -> Error {
    move |_| Error::insufficient_data(tag)
}

/// Checks that exactly `expected` payload bytes remain.
pub(crate) fn ensure_payload_len(tag: &'static str, expected: u64, actual: usize) -> Result<(), Error> {
    match (actual as u64).cmp(&expected) {
        Ordering::Equal => Ok(()),
        Ordering::Less => Err(Error::insufficient_data(tag)
            .with_context("expected", expected)
            .with_context("actual", actual)),
        Ordering::Greater => Err(Error::deserial(format!(
            "unexpected trailing data after {tag}"
        ))
        .with_context("expected", expected)
        .with_context("actual", actual)),
    }
}
