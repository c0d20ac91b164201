//! Bisub - Bilingual Subtitle Generation
//!
//! Entry point for the bisub application: transcribes spoken audio with a
//! whisper recognizer, translates each segment with the Microsoft Translator
//! API, and writes bilingual SRT subtitle files.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bisub::cli::{Args, Commands};
use bisub::config::Config;
use bisub::workflow::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.verbose)?;
    info!("Starting bisub - bilingual subtitle generation");

    let mut config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            if std::path::Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };

    config.translator.apply_env_overrides();

    if let Err(e) = run_command(args.command, config).await {
        error!("Run failed: {}", e);
        return Err(e.into());
    }

    info!("bisub completed successfully");
    Ok(())
}

async fn run_command(command: Commands, mut config: Config) -> bisub::error::Result<()> {
    match command {
        Commands::Generate {
            input,
            output,
            source_lang,
            target_lang,
        } => {
            if let Some(lang) = source_lang {
                config.translator.source_lang = lang;
            }
            if let Some(lang) = target_lang {
                config.translator.target_lang = lang;
            }

            // Missing credentials are fatal before any processing begins.
            config.translator.validate()?;

            let workflow = Workflow::new(config);
            workflow.generate(&input, output).await?;
        }
        Commands::Batch {
            input_dir,
            output_dir,
            target_lang,
        } => {
            if let Some(lang) = target_lang {
                config.translator.target_lang = lang;
            }

            config.translator.validate()?;

            let workflow = Workflow::new(config);
            workflow.generate_batch(&input_dir, output_dir).await?;
        }
        Commands::Transcribe {
            input,
            output,
            language,
        } => {
            let workflow = Workflow::new(config);
            workflow
                .transcribe_only(&input, &output, language.as_deref())
                .await?;
        }
    }

    Ok(())
}

/// Setup logging to both console and a daily-rolling file under .bisub/log
fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = std::env::current_dir()?.join(".bisub").join("log");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = rolling::daily(&log_dir, "bisub.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer().with_target(false);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
