mod settings;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use notice_render::feed::WeekendFeed;
use notice_render::pipeline::{sanitize, translate, typography};
use notice_render::station::{station_page, StationDirectory};
use notice_render::{render, render_notice, render_notices, RawNotice};
use settings::{OutputFormat, Settings};

#[derive(Parser)]
#[command(name = "notice_render", about = "Render legacy transit service notices")]
struct Cli {
    /// Output format (default: NOTICE_FORMAT or text)
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one notice from its raw fields
    Notice {
        #[arg(long)]
        id: Option<u64>,
        #[arg(short, long)]
        summary: Option<String>,
        #[arg(short, long)]
        details: Option<String>,
    },
    /// Render a JSON array of notices
    Batch {
        /// Path to the notices file
        path: PathBuf,
    },
    /// Weekend service panel for one station
    Station {
        /// Numeric station id
        id: u32,
        /// Legacy weekender feed (default: NOTICE_FEED)
        #[arg(long)]
        feed: Option<PathBuf>,
        /// Station directory (default: NOTICE_STATIONS)
        #[arg(long)]
        stations: Option<PathBuf>,
    },
    /// Print the placeholder-annotated text for a raw string
    Tokens {
        text: String,
        /// Run the summary sanitizer first
        #[arg(long)]
        sanitize: bool,
        /// Use the detail-level typography rules
        #[arg(long)]
        detail: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to load settings")?;
    let format = cli.format.unwrap_or(settings.format);

    match cli.command {
        Commands::Notice {
            id,
            summary,
            details,
        } => {
            let rendered = render_notice(&RawNotice {
                id,
                summary,
                details,
            });
            match format {
                OutputFormat::Json => print_json(&rendered)?,
                OutputFormat::Text => print!("{}", render::notice_text(&rendered)),
            }
        }
        Commands::Batch { path } => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let notices: Vec<RawNotice> = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            info!("Rendering {} notices", notices.len());

            let rendered = render_notices(&notices);
            match format {
                OutputFormat::Json => print_json(&rendered)?,
                OutputFormat::Text => {
                    for notice in &rendered {
                        println!("{}", render::notice_text(notice));
                    }
                }
            }
        }
        Commands::Station {
            id,
            feed,
            stations,
        } => {
            let feed_path = feed
                .or(settings.feed)
                .context("No feed given (use --feed or NOTICE_FEED)")?;
            let stations_path = stations
                .or(settings.stations)
                .context("No station directory given (use --stations or NOTICE_STATIONS)")?;

            let feed = WeekendFeed::load(&feed_path)?;
            let directory = StationDirectory::load(&stations_path)?;
            info!(
                "Loaded {} stations, {} feed records",
                directory.len(),
                feed.records().len()
            );

            let page = station_page(&directory, &feed, id)?;
            match format {
                OutputFormat::Json => print_json(&page)?,
                OutputFormat::Text => print!("{}", render::station_text(&page)),
            }
        }
        Commands::Tokens {
            text,
            sanitize: run_sanitizer,
            detail,
        } => {
            let text = if run_sanitizer {
                sanitize::sanitize(&text)
            } else {
                text
            };
            let normalized = typography::normalize_with(&text, detail);
            println!("{}", translate::translate(&normalized));
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        info!("Done in {:.1}s", elapsed.as_secs_f64());
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
