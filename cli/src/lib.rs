// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface of the Wire newsletter builder.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value
)]

mod cli;
mod cmd_calendar;
mod cmd_publish;
mod config;

pub use crate::cli::{Cli, Commands, run};
pub use crate::cmd_calendar::CmdCalendar;
pub use crate::cmd_publish::CmdPublish;
pub use crate::config::parse_config;
