use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ministry_path::answers::AnswerSet;
use ministry_path::catalog::{load_catalog, Gift};
use ministry_path::config::{Config, ConfigOverrides};
use ministry_path::notify::{dispatch, sinks_from_config};
use ministry_path::output::csv::{gifts_to_csv, matches_to_csv};
use ministry_path::output::json::render_json;
use ministry_path::output::table::{
    render_gifts_table, render_history_table, render_matches_table, render_ministries_table,
    render_personality_table, render_progress_table, render_questions_table,
};
use ministry_path::scoring::{ScoringEngine, ScoringOutcome};
use ministry_path::server::run_server;
use ministry_path::snapshot::{summarize_history, SurveyStore};
use ministry_path::survey::{self, ProgressView};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "ministry-path",
    about = "Spiritual gifts survey scoring and ministry matching"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// JSON catalog replacing the built-in question bank.
    #[arg(long)]
    catalog: Option<String>,
    #[arg(long)]
    db: Option<String>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Questions,
    Ministries {
        /// Only list ministries linked to this gift, e.g. `mercy` or `helps`.
        #[arg(long)]
        gift: Option<Gift>,
    },
    Score {
        #[arg(long)]
        answers: PathBuf,
    },
    Progress {
        #[arg(long)]
        member: String,
        #[arg(long)]
        answers: Option<PathBuf>,
    },
    Retake {
        #[arg(long)]
        member: String,
    },
    Submit {
        #[arg(long)]
        member: String,
        #[arg(long)]
        allow_incomplete: bool,
    },
    History {
        #[arg(long)]
        member: String,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(ConfigOverrides {
        db_path: cli.db.clone(),
        catalog_path: cli.catalog.clone(),
    });

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if matches!(cli.command, Commands::Config { .. }) {
        return handle_config_command(&cli.command, &config, &config_path);
    }

    let catalog = load_catalog(config.resolved_catalog_path().as_deref())?;
    let engine = ScoringEngine::new(catalog, config.scoring.clone());

    if let Commands::Serve { host, port } = &cli.command {
        let host = host.clone().unwrap_or_else(|| config.server.host.clone());
        let port = port.unwrap_or(config.server.port);
        let bind = format!("{host}:{port}");
        let addr: SocketAddr = bind
            .parse()
            .map_err(|e| anyhow!("invalid bind address {bind}: {e}"))?;
        return run_server(config, engine, addr).await;
    }

    match &cli.command {
        Commands::Questions => {
            let questions = &engine.catalog().questions;
            match cli.output {
                OutputFormat::Table => println!("{}", render_questions_table(questions)),
                OutputFormat::Json => println!("{}", render_json(questions)?),
                OutputFormat::Csv => {
                    warn!("CSV output for questions not implemented, using JSON");
                    println!("{}", render_json(questions)?);
                }
            }
        }
        Commands::Ministries { gift } => {
            let ministries = engine.catalog().ministries_with_gift(*gift);
            match cli.output {
                OutputFormat::Table => println!("{}", render_ministries_table(&ministries)),
                OutputFormat::Json => println!("{}", render_json(&ministries)?),
                OutputFormat::Csv => {
                    warn!("CSV output for ministries not implemented, using JSON");
                    println!("{}", render_json(&ministries)?);
                }
            }
        }
        Commands::Score { answers } => {
            let answers = read_answers(answers)?;
            let outcome = engine.score(&answers);
            print_outcome(&outcome, cli.output)?;
        }
        Commands::Progress { member, answers } => {
            let store = SurveyStore::open(&config.resolved_db_path())?;
            let view = match answers {
                Some(path) => survey::save_progress(&store, &engine, member, read_answers(path)?)?,
                None => survey::load_progress(&store, &engine, member)?,
            };
            print_progress(&view, cli.output)?;
        }
        Commands::Retake { member } => {
            let store = SurveyStore::open(&config.resolved_db_path())?;
            if store.reset_progress(member)? {
                println!("Cleared saved answers for {member}; the survey starts fresh.");
            } else {
                println!("No saved answers for {member}.");
            }
        }
        Commands::Submit {
            member,
            allow_incomplete,
        } => {
            let submission = {
                let store = SurveyStore::open(&config.resolved_db_path())?;
                survey::submit(
                    &store,
                    &engine,
                    member,
                    *allow_incomplete,
                    &config.notifications.rules,
                )?
            };
            let sinks = sinks_from_config(&config.notifications);
            dispatch(&sinks, &submission.notifications).await;
            print_outcome(&submission.record.outcome, cli.output)?;
        }
        Commands::History { member, limit } => {
            let store = SurveyStore::open(&config.resolved_db_path())?;
            let records = store.load_history(member, (*limit).max(1))?;
            let summary = summarize_history(&records);
            match cli.output {
                OutputFormat::Table => {
                    println!("{}", render_history_table(&records));
                    println!("{}", summary.describe());
                }
                OutputFormat::Json => println!("{}", render_json(&records)?),
                OutputFormat::Csv => {
                    warn!("CSV output for history not implemented, using JSON");
                    println!("{}", render_json(&records)?);
                }
            }
        }
        Commands::Config { .. } => {}
        Commands::Serve { .. } => unreachable!("serve command handled before dispatch"),
    }

    Ok(())
}

fn handle_config_command(command: &Commands, config: &Config, config_path: &Path) -> Result<()> {
    let Commands::Config { init, show } = command else {
        return Ok(());
    };
    if *init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if *show || !*init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

fn read_answers(path: &Path) -> Result<AnswerSet> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed reading answers: {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("answers file is not a JSON object: {}", path.display()))
}

fn print_outcome(outcome: &ScoringOutcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", render_gifts_table(&outcome.gifts));
            println!("{}", render_personality_table(&outcome.personality));
            println!("{}", render_matches_table(&outcome.ministries));
        }
        OutputFormat::Json => println!("{}", render_json(outcome)?),
        OutputFormat::Csv => {
            print!("{}", gifts_to_csv(&outcome.gifts)?);
            println!();
            print!("{}", matches_to_csv(&outcome.ministries)?);
        }
    }
    Ok(())
}

fn print_progress(view: &ProgressView, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_progress_table(&view.report)),
        OutputFormat::Json => println!("{}", render_json(view)?),
        OutputFormat::Csv => {
            warn!("CSV output for progress not implemented, using JSON");
            println!("{}", render_json(view)?);
        }
    }
    Ok(())
}
