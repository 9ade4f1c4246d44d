mod audit;

use anyhow::{Context, Result};
use boodschappen_core::{default_classifier, is_fruit, next_correction_factor, Classifier};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "boodschappen")]
#[command(about = "Boodschappen product tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Load the classifier tables from disk instead of the bundled ones.
#[derive(Args)]
struct TableArgs {
    /// Category concept table (JSON)
    #[arg(long, requires = "emoji")]
    concepts: Option<PathBuf>,
    /// Emoji picker table (JSON)
    #[arg(long, requires = "concepts")]
    emoji: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict category and emoji for one or more product names
    Predict {
        /// Product names
        #[arg(required = true)]
        names: Vec<String>,
        #[command(flatten)]
        tables: TableArgs,
    },
    /// Classify a file of product names (one per line) and write a CSV report
    Audit {
        /// Input file with one product name per line
        #[arg(long)]
        input: PathBuf,
        /// Output CSV path
        #[arg(long, default_value = "audit.csv")]
        output: PathBuf,
        #[command(flatten)]
        tables: TableArgs,
    },
    /// Show how the correction factor grows with repeated snoozes
    SnoozeCurve {
        /// Number of consecutive snoozes
        #[arg(long, default_value_t = 15)]
        times: u32,
    },
}

fn load_classifier(tables: &TableArgs) -> Result<Option<Classifier>> {
    let (Some(concepts), Some(emoji)) = (&tables.concepts, &tables.emoji) else {
        return Ok(None);
    };
    let concepts_json = fs::read_to_string(concepts)
        .with_context(|| format!("Failed to read {}", concepts.display()))?;
    let emoji_json = fs::read_to_string(emoji)
        .with_context(|| format!("Failed to read {}", emoji.display()))?;
    let classifier = Classifier::from_json(&concepts_json, &emoji_json)
        .context("Invalid classifier tables")?;
    Ok(Some(classifier))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Predict { names, tables } => {
            let custom = load_classifier(&tables)?;
            let classifier = custom.as_ref().unwrap_or_else(|| default_classifier());
            for name in &names {
                let prediction = classifier.predict(name);
                let fruit = if is_fruit(name) { " (fruit)" } else { "" };
                println!(
                    "{} {} -> {}{}",
                    prediction.emoji, name, prediction.category_name, fruit
                );
            }
        }
        Commands::Audit {
            input,
            output,
            tables,
        } => {
            let custom = load_classifier(&tables)?;
            let classifier = custom.as_ref().unwrap_or_else(|| default_classifier());
            audit::run(classifier, &input, &output)?;
        }
        Commands::SnoozeCurve { times } => {
            let mut factor = None;
            for n in 1..=times {
                let next = next_correction_factor(factor);
                println!("{:>3}  {:.5}", n, next);
                factor = Some(next);
            }
        }
    }

    Ok(())
}
