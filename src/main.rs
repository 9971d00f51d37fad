//! Phrasebook command line.
//!
//! Translate phrases word by word, and manage the offline language packs
//! that make translation work without a connection.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use phrasebook::downloads::DownloadOutcome;
use phrasebook::store::UpsertRequest;
use phrasebook::{App, Config, TranslationEntry, languages};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Debug, Parser)]
#[command(name = "phrasebook", version, about = "Word-by-word phrase translation with offline packs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Translate text word by word
    Translate {
        /// Source language (defaults to the saved app language)
        #[arg(long)]
        from: Option<String>,
        /// Target language (defaults to the saved target language)
        #[arg(long)]
        to: Option<String>,
        /// Text to translate
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Download a pack (or every pack) for offline use
    Download {
        /// Package name; all registry packages when omitted
        package: Option<String>,
        /// Language (defaults to the saved target language)
        #[arg(long)]
        language: Option<String>,
    },
    /// Remove a downloaded pack
    Remove {
        package: String,
        #[arg(long)]
        language: Option<String>,
    },
    /// Remove every downloaded pack
    Clear,
    /// Show which packs are saved for a language
    Status {
        #[arg(long)]
        language: Option<String>,
    },
    /// List packages available on the translation store
    Packages,
    /// Upload a JSON file of `{key, text}` entries, replacing one language of a package
    Push {
        package: String,
        #[arg(long)]
        language: String,
        file: PathBuf,
    },
    /// List supported languages
    Languages,
    /// Show or change saved language preferences
    Prefs {
        #[arg(long)]
        app: Option<String>,
        #[arg(long)]
        target: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, only our own info logs are shown
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("phrasebook=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::from_env();
    let app = App::from_config(&config).context("failed to initialize phrasebook")?;

    run(&app, cli.command).await
}

async fn run(app: &App, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Translate { from, to, text } => {
            let pair = app.preferences.language_pair()?;
            let from = from.unwrap_or_else(|| pair.top().to_string());
            let to = to.unwrap_or_else(|| pair.bottom().to_string());
            let text = text.join(" ");

            println!("{}", app.translator.translate_or_fallback(&from, &to, &text).await);
        }

        Command::Download { package, language } => {
            let language = language_or_target(app, language)?;
            let outcomes = match package {
                Some(package) => {
                    let outcome = app
                        .downloads
                        .download(&package, &language)
                        .await
                        .with_context(|| format!("download of {package} failed, try again"))?;
                    vec![(package, outcome)]
                }
                None => app
                    .downloads
                    .download_all(&language)
                    .await
                    .context("download failed, try again")?,
            };

            for (package, outcome) in outcomes {
                match outcome {
                    DownloadOutcome::AlreadySaved => println!("{package} ({language}): already saved"),
                    DownloadOutcome::Downloaded(n) => {
                        println!("{package} ({language}): downloaded {n} entries")
                    }
                }
            }
        }

        Command::Remove { package, language } => {
            let language = language_or_target(app, language)?;
            app.downloads.remove(&package, &language);
            println!("{package} ({language}): removed");
        }

        Command::Clear => {
            app.downloads.clear_all();
            println!("All downloaded packs removed");
        }

        Command::Status { language } => {
            let language = language_or_target(app, language)?;
            for status in app.downloads.statuses(&language) {
                let state = if status.saved { "saved" } else { "not saved" };
                println!("{:<28} {} {}", status.package, status.language, state);
            }
        }

        Command::Packages => {
            for package in app.store.list_packages().await? {
                let marker = if app.registry.contains(&package) { "*" } else { " " };
                println!("{marker} {package}");
            }
        }

        Command::Push {
            package,
            language,
            file,
        } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let translations: Vec<TranslationEntry> = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a list of {{key, text}}", file.display()))?;

            let request = UpsertRequest {
                language: language.to_lowercase(),
                translations,
            };
            let message = app.store.upsert_translations(&package, &request).await?;
            info!("Pushed {} entries to {}/{}", request.translations.len(), package, request.language);
            println!("{message}");
        }

        Command::Languages => {
            for language in languages::LANGUAGES {
                println!("{}  {}", language.code.to_uppercase(), language.label);
            }
        }

        Command::Prefs { app: app_language, target } => {
            if let Some(code) = app_language {
                app.preferences.set_app_language(&code)?;
            }
            if let Some(code) = target {
                app.preferences.set_target_language(&code)?;
            }

            let pair = app.preferences.language_pair()?;
            println!("app language:    {}", pair.top());
            println!("target language: {}", pair.bottom());
        }
    }

    Ok(())
}

fn language_or_target(app: &App, language: Option<String>) -> anyhow::Result<String> {
    match language {
        Some(language) => Ok(language.to_uppercase()),
        None => Ok(app.preferences.target_language()?),
    }
}
