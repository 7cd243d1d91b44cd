// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    error::Error,
    path::{Path, PathBuf},
};

use clap::{Arg, ArgMatches, Command, ValueHint, arg, value_parser};
use colored::Colorize;
use tokio::fs;
use wire_core::{Newsletter, Wire};

/// Build the newsletter and create the campaign draft.
#[derive(Debug, Default, Clone)]
pub struct CmdPublish {
    /// Write the HTML to a file instead of creating the draft
    pub dry: bool,

    /// Where a dry run writes the HTML
    pub output: Option<PathBuf>,

    /// Template overriding the configured one
    pub template: Option<PathBuf>,
}

impl CmdPublish {
    pub const NAME: &str = "publish";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Build the newsletter and create the campaign draft")
            .args(Self::args())
    }

    /// Arguments shared with the top-level command, which publishes by
    /// default.
    pub fn args() -> [Arg; 3] {
        [
            arg!(--dry "Write the HTML to the output file instead of creating a draft"),
            arg!(-o --output [OUTPUT] "Where a dry run writes the HTML")
                .value_parser(value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
            arg!(-t --template [TEMPLATE] "HTML template to fill")
                .value_parser(value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        ]
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            dry: matches.get_flag("dry"),
            output: matches.get_one("output").cloned(),
            template: matches.get_one("template").cloned(),
        }
    }

    pub async fn run(self, wire: &Wire) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "building newsletter...");

        let template = match &self.template {
            Some(path) => fs::read_to_string(path)
                .await
                .map_err(|e| format!("Failed to read template at {}: {}", path.display(), e))?,
            None => wire.read_template().await?,
        };

        let now = wire.now();
        let newsletter = wire.build_newsletter(&template, &now).await?;

        if self.dry {
            let output = self
                .output
                .unwrap_or_else(|| wire.config().newsletter.output.clone());
            Self::write_dry_run(&newsletter, &output).await
        } else {
            let created = wire.publish(&newsletter).await?;
            println!(
                "{} {} (web id {})",
                "Draft created:".green(),
                created.id,
                created.web_id
            );
            Ok(())
        }
    }

    async fn write_dry_run(newsletter: &Newsletter, output: &Path) -> Result<(), Box<dyn Error>> {
        fs::write(output, &newsletter.html)
            .await
            .map_err(|e| format!("Failed to write {}: {}", output.display(), e))?;

        let summary = serde_json::json!({
            "subject": newsletter.subject,
            "calendar": newsletter.content.calendar.len(),
            "registrations": newsletter.content.registrations.len(),
            "videoId": newsletter.content.sermon.as_ref().map(|v| &v.video_id),
        });
        println!("{} Would create Mailchimp draft with:", "[DRY RUN]".yellow());
        println!("{}", serde_json::to_string_pretty(&summary)?);
        println!("HTML written to {}", output.display());
        Ok(())
    }
}
