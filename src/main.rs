use clap::Parser;
use dataset_translator::utils::logger::{self, LogFormat};
use dataset_translator::utils::validation::Validate;
use dataset_translator::{translate_dataset, CliArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let format = if args.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(args.verbose, format);

    tracing::info!("Starting dataset translation");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    let config = match args.into_config().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    if config.monitor {
        tracing::info!("🔍 Decoder monitoring enabled");
    }

    match translate_dataset(&config).await {
        Ok(summary) => {
            tracing::info!("📁 Output saved to: {}", config.output_path.display());
            println!(
                "✅ Done! {} lines translated in {:.1}s",
                summary.lines_translated,
                summary.elapsed_ms as f64 / 1000.0
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Translation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
