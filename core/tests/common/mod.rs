// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Calendar, registration and plan fixtures
//! - Mock service setup pointing a [`wire_core::Config`] at a wiremock server

mod fixtures;
mod services;

#[allow(unused_imports)]
pub use fixtures::{TEMPLATE, ics_calendar, signups_body, sunday_morning};
#[allow(unused_imports)]
pub use services::{MockServices, mock_config};
