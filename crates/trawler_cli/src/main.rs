//! Trawler CLI - command-line interface for the GitHub cache.

mod commands;
mod config;
mod shutdown;

use clap::{Parser, Subcommand, ValueEnum};
use console::Term;
use tracing_subscriber::EnvFilter;

use crate::commands::show::OutputFormat;

#[derive(Parser)]
#[command(name = "trawler")]
#[command(version)]
#[command(about = "A local cache of GitHub pull requests, checks, reviews, issues and releases")]
#[command(
    long_about = "Trawler keeps a local database of the GitHub repositories you follow and \
records notifications when a pull request's checks fail or pass, or when it gets a new review."
)]
#[command(after_long_help = r#"EXAMPLES
    Sync a repository with its pull requests, issues and releases:
        $ trawler sync repo rust-lang/rust

    Sync the open pull requests you authored, across all repositories:
        $ trawler sync mine

    Show undelivered notifications from the last day and mark them delivered:
        $ trawler notifications --since-hours 24 --mark-toasted

    Generate shell completions:
        $ trawler completions bash > ~/.local/share/bash-completion/completions/trawler

CONFIGURATION
    Trawler reads configuration from:
      1. ~/.config/trawler/config.toml (or $XDG_CONFIG_HOME/trawler/config.toml)
      2. ./trawler.toml
      3. Environment variables (TRAWLER_* prefix, e.g., TRAWLER_GITHUB_TOKEN)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    TRAWLER_DATABASE_URL      Database connection string (default: ~/.local/state/trawler/trawler.db)
    TRAWLER_GITHUB_TOKEN      GitHub personal access token
"#)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Refresh the cache from GitHub
    Sync {
        #[command(subcommand)]
        action: SyncAction,
    },
    /// List cached repositories
    Repos {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// List cached pull requests of a repository
    Pulls {
        /// Repository as owner/name
        repo: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// List notifications
    Notifications {
        /// Include notifications already delivered
        #[arg(short, long)]
        all: bool,

        /// Only notifications created within this many hours
        #[arg(short, long)]
        since_hours: Option<i64>,

        /// Mark the listed notifications as delivered
        #[arg(short, long)]
        mark_toasted: bool,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// List the GitHub users trawler has synced on behalf of
    Developers {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// Show when the cache was last updated
    Status,
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum MigrateAction {
    /// Apply all pending migrations
    Up,
    /// Rollback the last migration
    Down,
    /// Show migration status
    Status,
    /// Fresh install - drop all tables and reapply migrations
    Fresh,
}

/// Options shared by the repository sync commands.
#[derive(Debug, Clone, clap::Args)]
struct RepoSyncArgs {
    /// Repository as owner/name
    repo: String,

    /// Fall back to anonymous access when no token can see the repository
    #[arg(short, long)]
    public: bool,

    /// Items per page (default from config or 50)
    #[arg(long)]
    per_page: Option<u32>,

    /// Pages fetched per listing (default from config or 2)
    #[arg(long)]
    max_pages: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum PullState {
    #[default]
    Open,
    Closed,
    All,
}

#[derive(Subcommand)]
enum SyncAction {
    /// Sync a repository with its pull requests, issues and releases
    Repo {
        #[command(flatten)]
        args: RepoSyncArgs,
    },
    /// Sync a repository's pull requests with their checks and reviews
    Pulls {
        #[command(flatten)]
        args: RepoSyncArgs,

        /// Which pull requests to list
        #[arg(long, value_enum, default_value_t = PullState::Open)]
        state: PullState,
    },
    /// Sync a repository's issues
    Issues {
        #[command(flatten)]
        args: RepoSyncArgs,

        /// Only issues matching this search
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Sync a repository's releases
    Releases {
        #[command(flatten)]
        args: RepoSyncArgs,

        /// Only the most recent releases
        #[arg(short, long)]
        recent: bool,
    },
    /// Sync the open pull requests authored by each configured token's user
    Mine,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "trawler=debug,trawler_cli=debug"
    } else {
        "trawler=info,trawler_cli=info"
    };
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(default_filter),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Structured logging when piped or asked for; plain output otherwise.
    if cli.verbose || !Term::stdout().is_term() {
        init_tracing(cli.verbose);
    }

    if let Commands::Completions { shell } = &cli.command {
        commands::meta::handle_completions(*shell)?;
        return Ok(());
    }

    // Load configuration (config file -> env vars -> defaults)
    let config = config::Config::load()?;
    let database_url = config
        .database_url()
        .ok_or("could not determine a database location; set TRAWLER_DATABASE_URL")?;
    config::ensure_sqlite_parent(&database_url)?;

    let outcome = match cli.command {
        Commands::Migrate { action } => {
            commands::migrate::handle_migrate(action, &database_url).await
        }
        Commands::Sync { action } => {
            commands::sync::handle_sync(action, &config, &database_url).await
        }
        Commands::Repos { output } => commands::show::handle_repos(&database_url, output).await,
        Commands::Pulls { repo, output } => {
            commands::show::handle_pulls(&database_url, &repo, output).await
        }
        Commands::Notifications {
            all,
            since_hours,
            mark_toasted,
            output,
        } => {
            let filter = commands::show::NotificationFilter {
                all,
                since_hours,
                mark_toasted,
            };
            commands::show::handle_notifications(&database_url, filter, output).await
        }
        Commands::Developers { output } => {
            commands::show::handle_developers(&database_url, output).await
        }
        Commands::Status => commands::show::handle_status(&database_url).await,
        Commands::Completions { .. } => Ok(()),
    };

    match outcome {
        Err(e) if e.is::<shutdown::Interrupted>() => {
            eprintln!("{e}");
            std::process::exit(130);
        }
        other => other,
    }
}
