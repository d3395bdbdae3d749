// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.

mod fixtures;

pub use fixtures::{FakeRemote, RecordingSink, clinics, fill_to_summary, specialists};
