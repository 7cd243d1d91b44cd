// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Wire - the weekly church newsletter, built from the calendar, sign-ups and
//! the latest sermon.

use std::error::Error;

use wire_cli::run;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    run().await
}
