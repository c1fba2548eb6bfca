use clap::{Arg, ArgAction, ArgMatches, ColorChoice, Command};

use brdc2agnss::prelude::{Duration, Settings};

use std::{path::PathBuf, str::FromStr};

pub struct Cli {
    /// Arguments passed by user
    matches: ArgMatches,
}

impl Cli {
    /// Build new command line interface
    pub fn new() -> Self {
        Self {
            matches: {
                Command::new("brdc2agnss")
                    .author("Guillaume W. Bres, <guillaume.bressaix@gmail.com>")
                    .version(env!("CARGO_PKG_VERSION"))
                    .about("Broadcast RINEX navigation to A-GNSS ephemeris decoder")
                    .color(ColorChoice::Always)
                    .arg_required_else_help(true)
                    .next_help_heading("Input files")
                    .arg(
                        Arg::new("file")
                            .long("file")
                            .short('f')
                            .value_name("FILENAME")
                            .action(ArgAction::Append)
                            .required_unless_present_any(["data-dir"])
                            .help("Load a single RINEX navigation file. Use as many as needed.
Files are decoded concurrently and their ephemerides are released in command line order.
Gzip compressed files are detected automatically."),
                    )
                    .next_help_heading("Daily file (local catalog)")
                    .arg(
                        Arg::new("data-dir")
                            .long("data-dir")
                            .short('d')
                            .value_name("DIRECTORY")
                            .action(ArgAction::Set)
                            .conflicts_with("file")
                            .help("Resolve today's broadcast navigation file from this directory.
Long (V3) vendor names are preferred over the legacy (V2) name.
When nothing is available, a synthetic single record file is created and served."),
                    )
                    .arg(
                        Arg::new("freshness")
                            .long("freshness")
                            .value_name("DURATION")
                            .action(ArgAction::Set)
                            .requires("data-dir")
                            .help("Cached files younger than this are used as is. Default is \"1 h\"."),
                    )
                    .next_help_heading("Output")
                    .arg(
                        Arg::new("output")
                            .long("output")
                            .short('o')
                            .value_name("FILENAME")
                            .action(ArgAction::Set)
                            .help("Write JSON output to this file. Default is stdout."),
                    )
                    .arg(
                        Arg::new("pretty")
                            .long("pretty")
                            .action(ArgAction::SetTrue)
                            .help("Pretty JSON formatting"),
                    )
                    .arg(
                        Arg::new("envelope")
                            .long("envelope")
                            .action(ArgAction::SetTrue)
                            .help("Wrap the ephemerides into a {\"status\", \"data\"} envelope.
Unavailable inputs are then reported as {\"status\": \"error\"} instead of failing."),
                    )
                    .get_matches()
            },
        }
    }

    /// Input file paths
    pub fn filepaths(&self) -> Vec<&String> {
        if let Some(fp) = self.matches.get_many::<String>("file") {
            fp.collect()
        } else {
            Vec::new()
        }
    }

    /// Local catalog [Settings], if user requested the daily file
    pub fn catalog_settings(&self) -> Option<Settings> {
        let data_dir = self.matches.get_one::<String>("data-dir")?;

        let mut settings = Settings {
            data_dir: PathBuf::from(data_dir),
            ..Default::default()
        };

        if let Some(freshness) = self.matches.get_one::<String>("freshness") {
            settings.freshness = Duration::from_str(freshness.trim())
                .unwrap_or_else(|e| panic!("Invalid freshness duration: {}", e));
        }

        Some(settings)
    }

    /// Output file path
    pub fn output(&self) -> Option<&String> {
        self.matches.get_one::<String>("output")
    }

    pub fn pretty(&self) -> bool {
        self.matches.get_flag("pretty")
    }

    pub fn envelope(&self) -> bool {
        self.matches.get_flag("envelope")
    }
}
