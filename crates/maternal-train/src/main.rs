use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;
use maternal_tracking::LocalTracker;
use maternal_train::{TrainConfig, compare_all, train_one};

#[derive(Parser)]
#[command(name = "maternal-risk")]
#[command(about = "Train and compare maternal health risk classifiers", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Train one model, save it and record a tracking run
    Train {
        /// Path to configs/train.yaml
        #[arg(long)]
        config: PathBuf,

        /// Model key (dummy, logreg, rf, extratrees, mlp)
        #[arg(long)]
        model: String,
    },

    /// Train every registered model on one split and rank them by macro-F1
    Compare {
        /// Path to configs/train.yaml
        #[arg(long)]
        config: PathBuf,

        /// Also save each trained model into the model directory
        #[arg(long)]
        save_models: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Command::Train { config, model } => {
            let config = TrainConfig::load(&config)?;
            let mut tracker = LocalTracker::new(&config.tracking.dir, &config.tracking.experiment);
            let outcome = train_one(&config, &model, &mut tracker)?;

            if let Some(path) = &outcome.artifacts.model {
                println!("Model saved to: {}", path.display());
            }
            println!("Metrics saved to: {}", outcome.artifacts.metrics.display());
            println!("\nMetrics:\n{}", serde_json::to_string_pretty(&outcome.metrics)?);
            println!("\nClassification Report:\n{}", outcome.classification_report);
        }
        Command::Compare {
            config,
            save_models,
        } => {
            let config = TrainConfig::load(&config)?;
            let report = compare_all(&config, save_models)?;

            println!("\nTop models:");
            println!("{:<12} {:>9} {:>9}", "model_key", "f1_macro", "accuracy");
            for row in report.top(5) {
                println!(
                    "{:<12} {:>9.4} {:>9.4}",
                    row.model_key, row.f1_macro, row.accuracy
                );
            }
        }
    }

    Ok(())
}
