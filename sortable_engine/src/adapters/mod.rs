// Copyright 2025 the Sortable Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host implementations for concrete document models.
//!
//! Enabled via feature flags to keep the core small and `no_std`.

#[cfg(feature = "dom_adapter")]
pub mod dom;
