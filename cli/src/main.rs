//! CLI entrypoint for paperchat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use paperchat_application::{
    DocumentSessionUseCase, IngestOutcome, NoProgress, SendOutcome, SessionProgressNotifier,
};
use paperchat_infrastructure::{
    ConfigLoader, FileConfig, GeminiModelClient, JsonlConversationLogger, LopdfTextExtractor,
};
use paperchat_presentation::{
    ChatRepl, Cli, OutputConfig, ProgressReporter, ReplConfig, read_upload,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting paperchat");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    report_config_issues(&config);

    OutputConfig {
        color: config.output.color,
    }
    .apply();

    // === Dependency Injection ===
    let (settings, _) = config.gemini.to_settings();
    let (api_key_env, _) = config.gemini.parse_api_key_env();
    let model_name = settings.model.clone();
    let client = Arc::new(GeminiModelClient::from_env(settings, &api_key_env));
    let extractor = Arc::new(LopdfTextExtractor::new());

    let mut use_case = DocumentSessionUseCase::new(extractor, client);
    if let Some(dir) = &config.logging.transcript_dir
        && let Some(logger) = JsonlConversationLogger::in_dir(ConfigLoader::expand_home(dir))
    {
        info!("Writing transcript to {}", logger.path().display());
        use_case = use_case.with_conversation_logger(Arc::new(logger));
    }
    let use_case = Arc::new(use_case);

    let show_progress = config.repl.show_progress && !cli.quiet;

    // One-shot mode
    if let Some((document, question)) = cli.one_shot() {
        return run_one_shot(&use_case, document, question, show_progress).await;
    }

    // Chat mode
    let history_file = config
        .repl
        .history_file
        .as_deref()
        .map(ConfigLoader::expand_home)
        .or_else(ConfigLoader::default_history_path);
    let repl = ChatRepl::new(use_case, model_name).with_config(ReplConfig {
        show_progress,
        history_file,
    });

    if let Some(document) = &cli.document {
        repl.load_document(document).await;
    }

    repl.run().await.context("Chat input failed")?;
    Ok(())
}

/// Install the tracing subscriber; `-v` count selects the level.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

fn report_config_issues(config: &FileConfig) {
    for issue in config.validate() {
        warn!("{}", issue.message);
        eprintln!("Config warning: {}", issue.message);
    }
}

/// Ingest `document`, ask `question`, print the answer.
async fn run_one_shot(
    use_case: &DocumentSessionUseCase,
    document: &Path,
    question: &str,
    show_progress: bool,
) -> Result<()> {
    let progress: Box<dyn SessionProgressNotifier> = if show_progress {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(NoProgress)
    };

    let upload = read_upload(document).await?;
    match use_case
        .ingest_with_progress(&upload, progress.as_ref())
        .await?
    {
        IngestOutcome::Ingested(report) => {
            info!(
                "Loaded {} ({} pages, {} characters)",
                report.document_name, report.pages, report.characters
            );
        }
        IngestOutcome::Ignored => bail!("Document ingestion was skipped"),
    }

    match use_case.send_with_progress(question, progress.as_ref()).await {
        SendOutcome::Answered(message) => {
            println!("{}", message.text());
            Ok(())
        }
        SendOutcome::Failed(message) => bail!("{}", message.text()),
        SendOutcome::Ignored(reason) => bail!("Question was not sent: {:?}", reason),
    }
}
