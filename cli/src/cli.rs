// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{ArgAction, ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use wire_core::{APP_NAME, Wire};

use crate::cmd_calendar::CmdCalendar;
use crate::cmd_publish::CmdPublish;
use crate::config::parse_config;

/// Run the Wire command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    // A missing .env file is fine.
    dotenvy::dotenv().ok();

    match Cli::parse() {
        Ok(cli) => {
            init_tracing(cli.verbose);
            if let Err(e) = cli.run().await {
                eprintln!("{} {}", "Error:".red(), e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            std::process::exit(2);
        }
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// Log verbosity, raised by each `-v`
    pub verbose: u8,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Assemble the weekly church newsletter and create it as a campaign draft.")
            .author("Cana Church Communications <wire@canachurch.com>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // publish by default
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $WIRE_CONFIG, then $XDG_CONFIG_HOME/wire/config.toml on \
Linux and MacOS, %LOCALAPPDATA%/wire/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath)
                    .global(true),
            )
            .arg(
                arg!(-v --verbose "Increase log verbosity, may be repeated")
                    .action(ArgAction::Count)
                    .global(true),
            )
            .args(CmdPublish::args())
            .subcommand(CmdPublish::command())
            .subcommand(CmdCalendar::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Ok(Self::from(&matches))
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Ok(Self::from(&matches))
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: &ArgMatches) -> Self {
        let command = match matches.subcommand() {
            Some((CmdPublish::NAME, sub)) => Commands::Publish(CmdPublish::from(sub)),
            Some((CmdCalendar::NAME, sub)) => Commands::Calendar(CmdCalendar::from(sub)),
            _ => Commands::Publish(CmdPublish::from(matches)),
        };

        let (config, verbose) = match matches.subcommand() {
            Some((_, sub)) => (sub.get_one("config").cloned(), sub.get_count("verbose")),
            None => (matches.get_one("config").cloned(), matches.get_count("verbose")),
        };
        Cli {
            config,
            verbose,
            command,
        }
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Build and publish the newsletter
    Publish(CmdPublish),

    /// Show the calendar events
    Calendar(CmdCalendar),
}

impl Commands {
    /// Run the command with the given configuration
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        tracing::debug!("parsing configuration...");
        let config = parse_config(config).await?;
        let wire = Wire::new(config)?;

        match self {
            Commands::Publish(a) => a.run(&wire).await,
            Commands::Calendar(a) => a.run(&wire).await,
        }
    }
}
