// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the platform collaborators
//!
//! The OS scheduling primitive and the diagnostics sink are external
//! collaborators; these traits are the narrow surfaces the lifecycle
//! manager needs from them.

pub mod platform;
pub mod record;
pub mod traced;

pub use platform::{NoOpPlatform, PlatformAdapter, PlatformError};
pub use record::{EventRecorder, NoOpRecorder};
pub use traced::TracedPlatform;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakePlatform, PlatformCall};
#[cfg(any(test, feature = "test-support"))]
pub use record::{MemoryRecorder, RecordedFetch};
