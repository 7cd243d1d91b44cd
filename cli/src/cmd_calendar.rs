// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use wire_core::{CalendarEvent, Wire, format_date};

#[derive(Debug, Default, Clone, Copy)]
pub struct CmdCalendar {
    pub json: bool,
}

impl CmdCalendar {
    pub const NAME: &str = "calendar";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("cal")
            .about("Show the events the newsletter would list")
            .arg(arg!(--json "Print the events as JSON"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            json: matches.get_flag("json"),
        }
    }

    pub async fn run(self, wire: &Wire) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing calendar events...");

        let events = wire.calendar_events(&wire.now()).await?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&events)?);
        } else if events.is_empty() {
            println!("No upcoming events.");
        } else {
            println!("🗓️ {}", "Events".bold());
            for event in &events {
                println!("{}", Self::format_line(event));
            }
        }
        Ok(())
    }

    fn format_line(event: &CalendarEvent) -> String {
        format!(
            " {} {} {} {}",
            "►".green(),
            format_date(&event.start).italic(),
            event.title.bold(),
            format!("@ {}", event.location).dimmed(),
        )
    }
}
