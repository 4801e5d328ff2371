use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chromasort::models::AppConfig;
use chromasort::services::{loader, BatchRunner};
use hue_classify::{analyze, select, ColorCategory};

#[derive(Parser)]
#[command(name = "chromasort")]
#[command(about = "Sorts image collections into weighted color categories")]
struct Cli {
    /// JSON configuration file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single image and print percentages and categories
    Analyze {
        /// Image file to analyze
        image: PathBuf,

        /// Emit the full analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Analyze every image under a directory tree
    Scan {
        /// Directory to scan recursively
        dir: PathBuf,

        /// Number of parallel workers (default: CPU count)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a configuration file and exit
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { image, json } => run_analyze(cli.config.as_deref(), &image, json),
        Commands::Scan { dir, workers, json } => {
            run_scan(cli.config.as_deref(), &dir, workers, json).await
        }
        Commands::CheckConfig => run_check_config(cli.config.as_deref()),
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chromasort=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn run_analyze(config: Option<&Path>, image: &Path, json: bool) -> anyhow::Result<()> {
    let config = AppConfig::load_or_default(config)?;
    let buffer = loader::load_pixels(image)?;
    let result = analyze(&buffer, config.resize_dims(), &config.parameters)?;
    let selection = select(&result.percentages, &config.thresholds, &config.limits);

    if json {
        let output = serde_json::json!({
            "image": image,
            "categories": selection.to_vec(),
            "analysis": result,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", image.display());
        for (category, pct) in result.percentages.iter() {
            if *pct > 0.0 {
                println!("  {:>10}  {:6.2}%", category.name(), pct);
            }
        }
        println!("  categories: {selection}");
    }
    Ok(())
}

async fn run_scan(
    config: Option<&Path>,
    dir: &Path,
    workers: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let config = AppConfig::load_or_default(config)?;
    let paths = loader::collect_image_paths(dir)?;
    if paths.is_empty() {
        tracing::warn!(dir = %dir.display(), "No images found");
    }

    let mut runner = BatchRunner::new(&config);
    if let Some(workers) = workers {
        runner = runner.with_workers(workers);
    }

    // Ctrl-C stops dispatching new images; in-flight analyses finish.
    let cancel = runner.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing in-flight images");
            cancel.cancel();
        }
    });

    let report = runner.run(paths).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for outcome in &report.outcomes {
            match outcome {
                chromasort::models::ImageOutcome::Analyzed {
                    path, categories, ..
                } => {
                    let names: Vec<&str> = categories.iter().map(|c| c.name()).collect();
                    println!("{}: {}", path.display(), names.join(", "));
                }
                chromasort::models::ImageOutcome::Failed { path, error } => {
                    println!("{}: FAILED ({error})", path.display());
                }
            }
        }
        println!();
        println!("processed {} images, {} errors", report.processed, report.errors);
        for category in ColorCategory::ALL {
            let count = report.tallies[category];
            if count > 0 {
                println!("  {:>10}  {count}", category.name());
            }
        }
    }
    Ok(())
}

fn run_check_config(config: Option<&Path>) -> anyhow::Result<()> {
    match config {
        Some(path) => {
            AppConfig::load(path)?;
            println!("{}: configuration OK", path.display());
        }
        None => {
            AppConfig::default().validate()?;
            println!("no config file given; defaults OK");
        }
    }
    Ok(())
}
