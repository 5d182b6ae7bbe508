//! Read-only views of the cache.

use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, Utc};
use clap::ValueEnum;
use serde::Serialize;
use tabled::Tabled;

use trawler::{Orchestrator, StaticIdentityProvider};

use crate::config::Config;

/// Output format for cache listings.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Display as a formatted table (default)
    #[default]
    Table,
    /// Display as JSON
    Json,
}

/// Which notifications to list.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct NotificationFilter {
    /// Include notifications already delivered.
    pub all: bool,
    /// Only notifications created within this many hours.
    pub since_hours: Option<i64>,
    /// Mark the listed notifications delivered.
    pub mark_toasted: bool,
}

async fn open(database_url: &str) -> Result<Orchestrator, Box<dyn std::error::Error>> {
    let db = trawler::connect_and_migrate(database_url).await?;
    // Reads never reach the remote, so no identities are needed.
    Ok(Orchestrator::new(
        db,
        Config::default().sync,
        Arc::new(StaticIdentityProvider::default()),
    ))
}

fn print_items<T: Serialize + Tabled>(
    items: Vec<T>,
    format: OutputFormat,
    empty: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Table if items.is_empty() => println!("{empty}"),
        OutputFormat::Table => {
            let mut table = tabled::Table::new(items);
            table.with(tabled::settings::Style::rounded());
            println!("{}", table);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&items)?),
    }
    Ok(())
}

fn format_time(at: &DateTime<FixedOffset>) -> String {
    at.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string()
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct RepositoryRow {
    #[tabled(rename = "Repository")]
    repository: String,
    #[tabled(rename = "Default Branch")]
    default_branch: String,
    #[tabled(rename = "Private")]
    private: bool,
    #[tabled(rename = "Synced At")]
    synced_at: String,
}

pub(crate) async fn handle_repos(
    database_url: &str,
    output: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let orchestrator = open(database_url).await?;
    let rows: Vec<RepositoryRow> = orchestrator
        .list_repositories()
        .await?
        .into_iter()
        .map(|repo| RepositoryRow {
            repository: repo.full_name(),
            default_branch: repo.default_branch,
            private: repo.is_private,
            synced_at: format_time(&repo.synced_at),
        })
        .collect();
    print_items(rows, output, "No repositories cached. Run `trawler sync repo owner/name`.")
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct PullRequestRow {
    #[tabled(rename = "#")]
    number: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Checks")]
    checks: String,
    #[tabled(rename = "Updated")]
    updated_at: String,
}

pub(crate) async fn handle_pulls(
    database_url: &str,
    repo: &str,
    output: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let (owner, name) = trawler::access::parse_full_name(repo)?;
    let orchestrator = open(database_url).await?;

    let mut rows = Vec::new();
    for pr in orchestrator.list_pull_requests(&owner, &name).await? {
        let checks = match orchestrator.pull_request_status(&pr).await? {
            Some(status) => status.state.to_string(),
            None => "-".to_string(),
        };
        let state = if pr.is_draft {
            format!("{} (draft)", pr.state)
        } else {
            pr.state.clone()
        };
        rows.push(PullRequestRow {
            number: pr.number,
            title: pr.title,
            author: pr.author_login,
            state,
            checks,
            updated_at: format_time(&pr.updated_at),
        });
    }
    print_items(rows, output, &format!("No pull requests cached for {repo}."))
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct NotificationRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Repository")]
    repository: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Created")]
    created_at: String,
    #[tabled(rename = "Delivered")]
    toasted: bool,
    #[tabled(skip)]
    url: String,
}

pub(crate) async fn handle_notifications(
    database_url: &str,
    filter: NotificationFilter,
    output: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let orchestrator = open(database_url).await?;
    let since = filter.since_hours.map(|h| Utc::now() - Duration::hours(h));
    let notifications = orchestrator.list_notifications(since, filter.all).await?;

    let rows: Vec<NotificationRow> = notifications
        .iter()
        .map(|n| NotificationRow {
            kind: n.kind.to_string(),
            repository: n.repository_full_name.clone(),
            title: n.title.clone(),
            description: n.description.clone(),
            created_at: format_time(&n.created_at),
            toasted: n.toasted,
            url: n.url.clone(),
        })
        .collect();
    print_items(rows, output, "No notifications.")?;

    if filter.mark_toasted {
        let mut marked = 0;
        for n in notifications.iter().filter(|n| !n.toasted) {
            if orchestrator.mark_notification_toasted(n.id).await? {
                marked += 1;
            }
        }
        tracing::debug!(marked, "Marked notifications delivered");
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct DeveloperRow {
    #[tabled(rename = "Login")]
    login: String,
    #[tabled(rename = "Last Seen")]
    last_seen_at: String,
}

pub(crate) async fn handle_developers(
    database_url: &str,
    output: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let orchestrator = open(database_url).await?;
    let rows: Vec<DeveloperRow> = orchestrator
        .list_developer_users()
        .await?
        .into_iter()
        .map(|d| DeveloperRow {
            login: d.login,
            last_seen_at: format_time(&d.last_seen_at),
        })
        .collect();
    print_items(rows, output, "No developers synced. Run `trawler sync mine`.")
}

pub(crate) async fn handle_status(database_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let orchestrator = open(database_url).await?;

    match orchestrator.last_updated().await? {
        Some(at) => println!("Last updated:  {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("Last updated:  never"),
    }
    println!(
        "Repositories:  {}",
        orchestrator.list_repositories().await?.len()
    );
    println!(
        "Developers:    {}",
        orchestrator.list_developer_users().await?.len()
    );
    println!(
        "Undelivered:   {}",
        orchestrator.list_notifications(None, false).await?.len()
    );
    Ok(())
}
