// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Lease store implementations
//!
//! [`MemoryLeaseStore`] gives tests and single-process deployments real
//! compare-and-swap semantics; [`TracedLeaseStore`] wraps any store with
//! tracing spans.

pub mod memory;
pub mod traced;

pub use memory::{MemoryLeaseStore, ScriptedFailure, StoreCall};
pub use traced::TracedLeaseStore;
