mod cli;

use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use aqua_verify::commands;
use aqua_verify::models::settings::SettingsUpdate;
use aqua_verify::render::{render_chat_entry, render_report, render_staged};
use aqua_verify::services::MarkdownStyle;
use aqua_verify::state::AppState;
use aqua_verify::storage::ConfigService;

use crate::cli::{AnalyzeArgs, Cli, Commands, ConfigAction};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = ConfigService::new();
    let log_level = config
        .as_ref()
        .map(|c| c.get_config().log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_tracing(&log_level);

    let result = match config.context("failed to load configuration") {
        Ok(config) => run(cli, config).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "command failed");
            for cause in err.chain().skip(1) {
                error!(cause = %cause, "caused by");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(fallback_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli, config: ConfigService) -> Result<ExitCode> {
    let state = AppState::from_config(config, cli.base_url.as_deref())
        .context("failed to build backend client")?;

    match cli.command {
        Commands::Analyze(args) => analyze(&state, args).await,
        Commands::Chat(args) => {
            let reply = commands::send_chat_message(&state, &args.message)
                .await
                .into_result()
                .map_err(|e| anyhow!(e))?;
            println!("{}", render_chat_entry(&reply, MarkdownStyle::Terminal));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Health => {
            let health = commands::get_health(&state)
                .await
                .into_result()
                .map_err(|e| anyhow!(e))?;
            println!("{} : {}", health.api_base_url, health.status);
            Ok(if health.backend {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Config(args) => {
            let config = match args.action {
                ConfigAction::Show => commands::get_settings(&state).await,
                ConfigAction::SetBaseUrl { url } => {
                    let update = SettingsUpdate {
                        api_base_url: Some(url),
                        ..Default::default()
                    };
                    commands::update_settings(&state, update).await
                }
            }
            .into_result()
            .map_err(|e| anyhow!(e))?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn analyze(state: &AppState, args: AnalyzeArgs) -> Result<ExitCode> {
    let staged = commands::stage_files(state, &args.files)
        .await
        .into_result()
        .map_err(|e| anyhow!(e))
        .context("failed to stage files")?;
    for name in &staged.rejected {
        warn!(file = %name, "unsupported file type, skipped");
    }
    if staged.session.files.is_empty() {
        return Err(anyhow!("no supported documents to analyze (.pdf, .docx, .doc)"));
    }
    let case_type = match args.case_type {
        Some(arg) => arg.into(),
        None => state.get_config().await.default_case_type,
    };
    eprintln!("Dossier : {}", case_type.label());
    eprint!("{}", render_staged(&staged.session));

    let view = commands::analyze(state, Some(case_type))
        .await
        .into_result()
        .map_err(|e| anyhow!(e))
        .context("analysis failed")?;

    if args.json {
        let report = commands::get_report(state)
            .await
            .into_result()
            .map_err(|e| anyhow!(e))?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&view));
    }

    if args.chat {
        chat_loop(state).await?;
    }
    Ok(ExitCode::SUCCESS)
}

async fn chat_loop(state: &AppState) -> Result<()> {
    print_transcript(state).await;
    let suggestions = state.chat().suggestions().await;
    if !suggestions.is_empty() {
        println!("Suggestions : {}", suggestions.join(" | "));
    }
    println!("(/reset pour une nouvelle analyse, /quit pour quitter)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => continue,
            "/quit" => break,
            "/reset" => {
                commands::reset_session(state).await;
                print_transcript(state).await;
            }
            _ => match commands::send_chat_message(state, &line).await.into_result() {
                Ok(reply) => println!("{}", render_chat_entry(&reply, MarkdownStyle::Terminal)),
                Err(e) => warn!(error = %e, "message not sent"),
            },
        }
    }
    Ok(())
}

async fn print_transcript(state: &AppState) {
    for entry in state.chat().transcript().await {
        println!("{}", render_chat_entry(&entry, MarkdownStyle::Terminal));
    }
}
