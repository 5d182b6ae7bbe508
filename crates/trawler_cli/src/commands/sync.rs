//! Sync commands.
//!
//! Each command runs one orchestrator operation. Ctrl+C drops the running
//! operation, which rolls back its transaction.

use std::sync::Arc;

use console::{Term, style};

use trawler::access::parse_full_name;
use trawler::github::TokenIdentityProvider;
use trawler::platform::StateFilter;
use trawler::{Orchestrator, PageOptions, SyncOptions, SyncResult};

use crate::config::Config;
use crate::shutdown;
use crate::{PullState, RepoSyncArgs, SyncAction};

impl From<PullState> for StateFilter {
    fn from(state: PullState) -> Self {
        match state {
            PullState::Open => StateFilter::Open,
            PullState::Closed => StateFilter::Closed,
            PullState::All => StateFilter::All,
        }
    }
}

/// Handle sync commands.
pub(crate) async fn handle_sync(
    action: SyncAction,
    config: &Config,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let tokens = config.github_tokens();
    if tokens.is_empty() {
        tracing::warn!("No GitHub token configured; only public repositories can be synced");
    }

    let db = trawler::connect_and_migrate(database_url).await?;
    let provider = TokenIdentityProvider::new(tokens, true)?;
    let orchestrator = Orchestrator::new(db, config.sync.clone(), Arc::new(provider));

    match action {
        SyncAction::Repo { args } => {
            let (owner, name) = parse_full_name(&args.repo)?;
            let options = sync_options(&args, config);
            let result =
                shutdown::until_interrupted(orchestrator.sync_repository(&owner, &name, &options))
                    .await??;
            report(&args.repo, &result);
        }
        SyncAction::Pulls { args, state } => {
            let (owner, name) = parse_full_name(&args.repo)?;
            let options = SyncOptions {
                pull_request_state: state.into(),
                ..sync_options(&args, config)
            };
            let result = shutdown::until_interrupted(
                orchestrator.sync_pull_requests(&owner, &name, &options),
            )
            .await??;
            report(&args.repo, &result);
        }
        SyncAction::Issues { args, search } => {
            let (owner, name) = parse_full_name(&args.repo)?;
            let options = SyncOptions {
                search_term: search,
                ..sync_options(&args, config)
            };
            let result =
                shutdown::until_interrupted(orchestrator.sync_issues(&owner, &name, &options))
                    .await??;
            report(&args.repo, &result);
        }
        SyncAction::Releases { args, recent } => {
            let (owner, name) = parse_full_name(&args.repo)?;
            let options = sync_options(&args, config);
            let result = if recent {
                shutdown::until_interrupted(
                    orchestrator.sync_recent_releases(&owner, &name, &options),
                )
                .await??
            } else {
                shutdown::until_interrupted(orchestrator.sync_releases(&owner, &name, &options))
                    .await??
            };
            report(&args.repo, &result);
        }
        SyncAction::Mine => {
            let options = SyncOptions {
                page: Some(config.sync.page),
                ..SyncOptions::default()
            };
            let result =
                shutdown::until_interrupted(orchestrator.sync_my_pull_requests(&options)).await??;
            report("authored pull requests", &result);
        }
    }

    Ok(())
}

fn sync_options(args: &RepoSyncArgs, config: &Config) -> SyncOptions {
    SyncOptions {
        use_public_fallback: args.public || config.github.public_fallback,
        page: Some(page_options(args, config.sync.page)),
        ..SyncOptions::default()
    }
}

fn page_options(args: &RepoSyncArgs, defaults: PageOptions) -> PageOptions {
    PageOptions {
        per_page: args.per_page.unwrap_or(defaults.per_page),
        max_pages: args.max_pages.unwrap_or(defaults.max_pages),
    }
}

fn report(scope: &str, result: &SyncResult) {
    if !Term::stdout().is_term() {
        tracing::info!(
            scope,
            repositories = result.repositories,
            pull_requests = result.pull_requests,
            issues = result.issues,
            releases = result.releases,
            reviews = result.reviews,
            notifications = result.notifications,
            unobserved_deleted = result.unobserved_deleted,
            pruned = result.pruned,
            errors = result.errors.len(),
            "Sync complete"
        );
        for error in &result.errors {
            tracing::warn!(scope, "{}", error);
        }
        return;
    }

    println!("\n{} {}", style("Synced").green().bold(), style(scope).bold());
    println!("  Repositories:  {}", result.repositories);
    println!("  Pull requests: {}", result.pull_requests);
    println!("  Reviews:       {}", result.reviews);
    println!("  Issues:        {}", result.issues);
    println!("  Releases:      {}", result.releases);
    if result.notifications > 0 {
        println!(
            "  Notifications: {}",
            style(result.notifications).yellow().bold()
        );
    } else {
        println!("  Notifications: 0");
    }
    if result.unobserved_deleted > 0 || result.pruned > 0 {
        println!(
            "  Removed:       {} no longer listed, {} past retention",
            result.unobserved_deleted, result.pruned
        );
    }

    if result.has_errors() {
        println!(
            "\n{} {} item(s) skipped:",
            style("Warning:").yellow().bold(),
            result.errors.len()
        );
        for error in &result.errors {
            println!("  {} {}", style("-").dim(), error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(per_page: Option<u32>, max_pages: Option<u32>, public: bool) -> RepoSyncArgs {
        RepoSyncArgs {
            repo: "octo/hello".to_string(),
            public,
            per_page,
            max_pages,
        }
    }

    #[test]
    fn page_options_fall_back_to_configured_defaults() {
        let defaults = PageOptions {
            per_page: 30,
            max_pages: 4,
        };
        let page = page_options(&args(Some(100), None, false), defaults);
        assert_eq!(page.per_page, 100);
        assert_eq!(page.max_pages, 4);
    }

    #[test]
    fn public_fallback_from_flag_or_config() {
        let mut config = Config::default();
        assert!(!sync_options(&args(None, None, false), &config).use_public_fallback);
        assert!(sync_options(&args(None, None, true), &config).use_public_fallback);

        config.github.public_fallback = true;
        assert!(sync_options(&args(None, None, false), &config).use_public_fallback);
    }

    #[test]
    fn pull_state_maps_to_state_filter() {
        assert_eq!(StateFilter::from(PullState::Open), StateFilter::Open);
        assert_eq!(StateFilter::from(PullState::Closed), StateFilter::Closed);
        assert_eq!(StateFilter::from(PullState::All), StateFilter::All);
    }
}
