// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verification layer: type-level invariants and runtime contracts.
//!
//! Two complementary approaches to catching bugs:
//!
//! 1. **Type-level wrappers** (`SortedKeys`, `WellFormedTree`) that make
//!    invalid states unrepresentable. The tree builder only accepts input
//!    that already passed the ordering check.
//!
//! 2. **Runtime contracts** that panic in debug builds when invariants are violated.
//!    Zero-cost in release, but catch bugs during development.

mod types;
pub mod contracts;

pub use types::*;
