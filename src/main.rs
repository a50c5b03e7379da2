use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tvgrid::config::{parse_timezone, Config};
use tvgrid::listings::{FileListing, ListingRules, ListingSource};
use tvgrid::{store, Normalizer, Schedule, ScheduleIndex};

#[derive(Parser)]
#[command(name = "tvgrid", about = "tvgrid: per-channel TV schedules from listing text")]
struct Cli {
    /// Write debug logs to /tmp/tvgrid-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    /// Broadcast time zone (IANA name). Overrides the config file.
    #[arg(long, global = true)]
    tz: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pair clock and title lines in saved page text; prints a raw batch as JSON.
    Extract {
        #[arg(long)]
        channel: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Turn a raw batch into a dated, gapless schedule.
    Normalize {
        /// Day the listing was published for (YYYY-MM-DD).
        #[arg(long)]
        day: NaiveDate,
        /// Raw batch JSON; read from stdin when omitted.
        #[arg(long)]
        input: Option<PathBuf>,
        /// Schedule JSON; written to stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show what airs on each channel at one instant.
    Lookup {
        #[arg(long)]
        schedule: PathBuf,
        /// RFC 3339 instant, e.g. 2024-01-01T20:15:00+02:00.
        #[arg(long)]
        at: DateTime<Utc>,
        /// Channels to show; defaults to the configured lineup.
        #[arg(long = "channel")]
        channels: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/tvgrid-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("tvgrid debug log started, tail -f /tmp/tvgrid-debug.log");
    }

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "config unreadable, using defaults");
        Config::defaults()
    });
    let tz = match cli.tz.as_deref() {
        Some(name) => parse_timezone(name)?,
        None => config.timezone()?,
    };

    match cli.command {
        Command::Extract { channel, files } => extract(&config, &channel, &files),
        Command::Normalize { day, input, output } => {
            normalize(tz, day, input.as_deref(), output.as_deref())
        }
        Command::Lookup {
            schedule,
            at,
            channels,
        } => {
            let channels = if channels.is_empty() {
                config.broadcast.channels.clone()
            } else {
                channels
            };
            lookup(tz, &schedule, at, &channels)
        }
    }
}

fn extract(config: &Config, channel: &str, files: &[PathBuf]) -> anyhow::Result<()> {
    let rules = ListingRules::for_channel(&config.listing, channel);
    let mut raw = Vec::new();
    for path in files {
        let found = FileListing::new(channel, path.as_path(), rules.clone()).raw_entries()?;
        eprintln!("{}: found {} programs", path.display(), found.len());
        raw.extend(found);
    }

    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &raw)?;
    writeln!(out)?;
    Ok(())
}

fn normalize(
    tz: Tz,
    day: NaiveDate,
    input: Option<&Path>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let json = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading raw batch {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading raw batch from stdin")?;
            buf
        }
    };

    let batch = store::parse_raw_batch(&json)?;
    let report = Normalizer::new(tz).normalize_with_report(&batch.entries, day);

    match output {
        Some(path) => store::save(path, &report.entries)?,
        None => {
            let mut out = std::io::stdout().lock();
            writeln!(out, "{}", store::to_json(&report.entries)?)?;
        }
    }

    let skipped = batch.rejected.len() + report.rejected.len();
    eprintln!("saved {} programs, skipped {}", report.entries.len(), skipped);
    for (channel, count) in Schedule::from_entries(report.entries).channel_counts() {
        eprintln!("  channel {channel}: {count} programs");
    }
    Ok(())
}

fn lookup(tz: Tz, schedule: &Path, at: DateTime<Utc>, channels: &[String]) -> anyhow::Result<()> {
    let index = ScheduleIndex::from_entries(store::load(schedule)?);

    let mut out = std::io::stdout().lock();
    for row in index.lineup(channels.iter().map(String::as_str), at) {
        match row.program {
            Some(p) => writeln!(
                out,
                "{}\t{}-{}\t{}",
                row.channel,
                p.start_time.with_timezone(&tz).format("%H:%M"),
                p.end_time.with_timezone(&tz).format("%H:%M"),
                p.title
            )?,
            None => writeln!(out, "{}\t-\tno program", row.channel)?,
        }
    }
    Ok(())
}
