// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the wire-core crate.
//!
//! These tests run the whole gather-render-publish flow against mocked
//! services, including the degraded paths where a service is missing or fails.

mod calendar_feed;
mod degraded;
mod newsletter_pipeline;
mod publish;
