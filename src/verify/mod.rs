// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verification layer: structural checks and runtime contracts.
//!
//! Two complementary tools:
//!
//! 1. **Full checks** (`check_tree`, `check_author_index`) walk an entire
//!    structure and report the first violated invariant as an `InvariantError`.
//!    Tests and `quarry inspect` use them; they are O(n).
//!
//! 2. **Runtime contracts** (`contracts`) are O(1) `debug_assert!`s on the hot
//!    path. Free in release builds, loud in tests.

pub mod contracts;
mod types;

pub use types::*;
