//! cli-quiz: command-line usage quiz with durable per-tier results.

use std::io::Write;

use clap::Parser;
use services::{AppServices, Clock};
use tracing_subscriber::EnvFilter;
use ui::{QuizVm, load_stats, load_tier_cards};

mod config;
mod driver;

use config::{Cli, Command, normalize_sqlite_url, prepare_sqlite_file};

async fn run(cli: Cli) -> anyhow::Result<()> {
    let db_url = normalize_sqlite_url(&cli.db);
    // Keep file creation in the binary glue so the library crates stay pure.
    prepare_sqlite_file(&db_url)?;
    let services = AppServices::new_sqlite(&db_url, Clock::default_clock(), cli.policy).await?;
    tracing::debug!(db = %db_url, policy = %cli.policy, "services ready");

    match cli.command {
        None => driver::run_menu(&services).await,
        Some(Command::Play { tier }) => {
            let mut terminal = driver::Terminal::new();
            let mut vm = QuizVm::new(services.quiz_engine());
            driver::play(&mut terminal, &mut vm, tier).await
        }
        Some(Command::Tiers) => {
            driver::print_tiers(&load_tier_cards(&services.bank(), &services.stats()).await);
            Ok(())
        }
        Some(Command::Stats) => {
            driver::print_stats(&load_stats(&services.stats()).await);
            Ok(())
        }
        Some(Command::Clear { yes }) => {
            if !yes && !confirm("Erase all saved results? [y/N]")? {
                return Ok(());
            }
            services.stats().clear_all().await?;
            println!("All results cleared.");
            Ok(())
        }
    }
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    print!("{question} ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("warn,services=info,storage=info,quiz_core=info,ui=info")
            }),
        )
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
