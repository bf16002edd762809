use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use gocomplete::config::PluginConfig;
use gocomplete::editor::MemoryEditor;
use gocomplete::engine::CompletionEngine;

/// Run one completion round-trip against a file and print the suggestions.
#[derive(Parser)]
#[command(name = "gocomplete", about = "Go code completion via the gocode daemon.")]
struct Cli {
    /// Source file to complete against.
    file: PathBuf,

    /// Caret byte offset (defaults to end of file).
    #[arg(short, long)]
    offset: Option<usize>,

    /// Path to the gocode executable (overrides config).
    #[arg(long)]
    daemon: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gocomplete=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let mut config = PluginConfig::load();
    if let Some(daemon) = cli.daemon {
        config.daemon_path = daemon;
    }

    let bytes = std::fs::read(&cli.file)?;
    let caret = cli.offset.unwrap_or(bytes.len()).min(bytes.len());
    let editor = MemoryEditor::new(&cli.file, bytes, caret);

    let mut engine = CompletionEngine::new(config);
    if let Err(e) = engine.startup().await {
        eprintln!("warning: {e}");
    }

    match engine.trigger(&editor).await? {
        None => info!("{} is not a supported document", cli.file.display()),
        Some(session) => {
            if session.suggestions().is_empty() {
                info!("no suggestions");
            }
            for s in session.suggestions() {
                println!("{}\t{}\t{}", s.kind, s.text, s.description);
            }
        }
    }

    engine.shutdown().await;
    Ok(())
}
