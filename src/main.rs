use crate::config::{Config, ConfigError};
use crate::db::{init_db, Database};
use crate::mailer::{BrevoMailer, LogMailer, Mailer};
use crate::state::AppState;
use astra::Server;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod db;
mod digest;
mod domain;
mod errors;
mod events;
mod handlers;
mod mailer;
mod responses;
mod router;
mod state;
mod templates;

#[cfg(test)]
mod tests;

#[derive(Parser)]
#[command(name = "choresync", version, about = "Household chore tracker")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Send an email digest once, then exit. Meant to be run from cron.
    Digest {
        #[arg(value_enum)]
        kind: DigestKind,
        /// Evaluate as of this date instead of today (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Log the emails instead of sending them
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DigestKind {
    /// Chores due today
    Daily,
    /// Chores coming due in the next seven days
    Weekly,
}

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("choresync=info")),
        )
        .init();

    let cli = Cli::parse();

    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run_server(&cfg),
        Command::Digest {
            kind,
            date,
            dry_run,
        } => run_digest(&cfg, kind, date, dry_run),
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run_server(cfg: &Config) -> Result<(), Box<dyn Error>> {
    let state = AppState::from_config(cfg);
    init_db(&state.db)?;

    info!(addr = %cfg.addr, workers = cfg.max_workers, "Starting server at http://{}", cfg.addr);

    let server = Server::bind(cfg.addr).max_workers(cfg.max_workers);
    server.serve(move |req, _info| router::serve(req, &state))?;

    info!("Server shut down cleanly.");
    Ok(())
}

fn run_digest(
    cfg: &Config,
    kind: DigestKind,
    date: Option<NaiveDate>,
    dry_run: bool,
) -> Result<(), Box<dyn Error>> {
    let db = Database::new(cfg.db_path.clone());
    init_db(&db)?;

    let today = date.unwrap_or_else(|| Utc::now().with_timezone(&cfg.utc_offset).date_naive());

    let mailer: Box<dyn Mailer> = if dry_run {
        Box::new(LogMailer)
    } else {
        let api_key = cfg
            .mail
            .api_key
            .clone()
            .ok_or(ConfigError::Missing("BREVO_API_KEY"))?;
        Box::new(BrevoMailer::new(
            api_key,
            cfg.mail.sender_email.clone(),
            cfg.mail.sender_name.clone(),
        ))
    };

    let outcome = match kind {
        DigestKind::Daily => {
            digest::send_daily_digest(&db, mailer.as_ref(), today, &cfg.utc_offset, &cfg.app_url)?
        }
        DigestKind::Weekly => {
            digest::send_weekly_preview(&db, mailer.as_ref(), today, &cfg.utc_offset, &cfg.app_url)?
        }
    };

    if outcome.failed > 0 {
        warn!(sent = outcome.sent, failed = outcome.failed, "some digest emails failed");
        return Err(format!("{} of {} digest emails failed", outcome.failed, outcome.sent + outcome.failed).into());
    }
    Ok(())
}
