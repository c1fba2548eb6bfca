/*
 * BRDC2AGNSS is part of the nav-solutions framework.
 * Authors: Guillaume W. Bres <guillaume.bressaix@gmail.com> et al,
 * (cf. https://github.com/nav-solutions/brdc2agnss/graphs/contributors)
 * This framework is shipped under Mozilla Public V2 license.
 *
 * Documentation: https://github.com/nav-solutions/brdc2agnss
 */

use itertools::Itertools;

use env_logger::{Builder, Target};

use log::{error, info};

use std::{fs::File, io::Write, path::PathBuf};

use brdc2agnss::prelude::{
    Catalog, Duration, Epoch, Error, GpsEphemeris, Payload, Report, TimeScale, parse_file_report,
};

mod cli;

use crate::cli::Cli;

/// Decodes all files concurrently, releases the reports in input order
async fn decode_all(paths: Vec<PathBuf>) -> Vec<(PathBuf, Result<Report, Error>)> {
    let tasks = paths
        .into_iter()
        .map(|path| {
            let task_path = path.clone();
            (
                path,
                tokio::task::spawn_blocking(move || parse_file_report(&task_path)),
            )
        })
        .collect::<Vec<_>>();

    let mut reports = Vec::with_capacity(tasks.len());

    for (path, task) in tasks {
        let report = task
            .await
            .unwrap_or_else(|e| panic!("decoding task failure ({}): {}", path.display(), e));
        reports.push((path, report));
    }

    reports
}

fn release(cli: &Cli, content: &str) -> std::io::Result<()> {
    match cli.output() {
        Some(output) => {
            let mut fd = File::create(output)?;
            writeln!(fd, "{}", content)
        },
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", content)
        },
    }
}

fn release_payload(cli: &Cli, payload: &Payload) {
    let json = payload
        .to_json(cli.pretty())
        .unwrap_or_else(|e| panic!("payload serialization: {}", e));

    release(cli, &json).unwrap_or_else(|e| panic!("failed to release output: {}", e));
}

#[tokio::main]
pub async fn main() {
    let mut builder = Builder::from_default_env();

    // stdout is reserved to the JSON output
    builder
        .target(Target::Stderr)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let cfg_precision = Duration::from_seconds(1.0);

    let t_utc = Epoch::now()
        .unwrap_or_else(|e| panic!("Failed to determine system time: {}", e))
        .to_time_scale(TimeScale::UTC);

    // cli
    let cli = Cli::new();

    let paths = if let Some(settings) = cli.catalog_settings() {
        let catalog = Catalog::offline(settings);

        match catalog.resolve(t_utc) {
            Ok(resolution) => {
                info!(
                    "{} - daily file: {:?}",
                    t_utc.round(cfg_precision),
                    resolution
                );
                vec![resolution.path().to_path_buf()]
            },
            Err(e) => {
                error!("{} - catalog error: {}", t_utc.round(cfg_precision), e);
                if cli.envelope() {
                    release_payload(&cli, &Payload::unavailable());
                }
                std::process::exit(1);
            },
        }
    } else {
        cli.filepaths().into_iter().map(PathBuf::from).collect()
    };

    let mut ephemerides = Vec::<GpsEphemeris>::new();

    for (path, result) in decode_all(paths).await {
        match result {
            Ok(report) => {
                info!(
                    "{} - {}: {} ephemerides [{}]",
                    t_utc.round(cfg_precision),
                    path.display(),
                    report.records.len(),
                    report.satellites().iter().join(" ")
                );

                if !report.failures.is_empty() {
                    error!(
                        "{} - {}: {} corrupt record(s)",
                        t_utc.round(cfg_precision),
                        path.display(),
                        report.failures.len()
                    );
                }

                ephemerides.extend(report.into_records());
            },
            Err(e) => {
                error!("{} - {}", t_utc.round(cfg_precision), e);

                if cli.envelope() {
                    release_payload(&cli, &Payload::unavailable());
                    return;
                }

                std::process::exit(1);
            },
        }
    }

    if cli.envelope() {
        release_payload(&cli, &Payload::Success { data: ephemerides });
    } else {
        let json = if cli.pretty() {
            serde_json::to_string_pretty(&ephemerides)
        } else {
            serde_json::to_string(&ephemerides)
        }
        .unwrap_or_else(|e| panic!("serialization: {}", e));

        release(&cli, &json).unwrap_or_else(|e| panic!("failed to release output: {}", e));
    }
}
