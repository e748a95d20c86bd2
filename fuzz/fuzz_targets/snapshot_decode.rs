// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for JSON snapshot restore.

#![no_main]

use libfuzzer_sys::fuzz_target;
use quarry::persist::Snapshot;
use quarry::verify::{check_author_index, check_tree};

fuzz_target!(|data: &[u8]| {
    let Ok(snapshot) = serde_json::from_slice::<Snapshot>(data) else {
        return;
    };
    let (words, authors) = snapshot.restore(31);
    check_tree(&words).expect("snapshot tree must be balanced and ordered");
    check_author_index(&authors).expect("snapshot author index must be consistent");
});
