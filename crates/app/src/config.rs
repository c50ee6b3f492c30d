use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use quiz_core::model::Difficulty;
use services::SavePolicy;

#[derive(Debug, Parser)]
#[command(
    name = "cli-quiz",
    version,
    about = "Learn the command line one quiz at a time"
)]
pub struct Cli {
    /// SQLite URL or file path for saved results ("sqlite::memory:" keeps nothing)
    #[arg(
        long,
        env = "CLI_QUIZ_DB_URL",
        default_value = "sqlite://cli-quiz.sqlite3",
        global = true
    )]
    pub db: String,

    /// Which result to keep when a tier is replayed: "last" or "best"
    #[arg(long, env = "CLI_QUIZ_SAVE_POLICY", default_value = "last", global = true)]
    pub policy: SavePolicy,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Play one tier (easy, medium, hard, expert)
    Play { tier: Difficulty },
    /// List tiers with their saved results
    Tiers,
    /// Show aggregate statistics
    Stats,
    /// Erase every saved result
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid database url: {raw}")]
    InvalidDbUrl { raw: String },
}

/// Turn a bare path or relative `sqlite:` URL into an absolute `sqlite://` URL.
#[must_use]
pub fn normalize_sqlite_url(raw: &str) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw.to_owned();
    }

    let trimmed = raw.trim();
    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Make sure the database file and its parent directory exist.
///
/// # Errors
///
/// Returns an error if the URL has no path or the file cannot be created.
pub fn prepare_sqlite_file(db_url: &str) -> anyhow::Result<()> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ConfigError::InvalidDbUrl {
            raw: db_url.to_owned(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ConfigError::InvalidDbUrl {
            raw: db_url.to_owned(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_memory_and_absolute_urls() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/quiz.db"),
            "sqlite:///tmp/quiz.db"
        );
        assert_eq!(normalize_sqlite_url("/tmp/quiz.db"), "sqlite:///tmp/quiz.db");
    }

    #[test]
    fn relative_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:data/quiz.db");
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/quiz.db"));
    }

    #[test]
    fn parses_play_subcommand_with_policy() {
        let cli = Cli::try_parse_from(["cli-quiz", "--policy", "best", "play", "hard"]).unwrap();
        assert_eq!(cli.policy, SavePolicy::BestScore);
        assert!(matches!(
            cli.command,
            Some(Command::Play {
                tier: Difficulty::Hard
            })
        ));
    }

    #[test]
    fn rejects_unknown_tier() {
        assert!(Cli::try_parse_from(["cli-quiz", "play", "legendary"]).is_err());
    }
}
