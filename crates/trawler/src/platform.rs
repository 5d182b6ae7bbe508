//! Interfaces to the remote hosting service.
//!
//! The sync engine only talks to the remote through [`RemoteClient`] and gets
//! its credentials from an [`IdentityProvider`]. The `github` feature ships
//! an implementation of both.

mod errors;
mod identity;
mod types;

pub use errors::{RemoteError, Result, short_error_message};
pub use identity::{Identity, IdentityProvider, StaticIdentityProvider};
pub use types::{
    PageOptions, RemoteCheckRun, RemoteCheckSuite, RemoteClient, RemoteCombinedStatus,
    RemoteIssue, RemotePullRequest, RemotePullRequestHit, RemoteRelease, RemoteRepository,
    RemoteReview, RemoteUser, StateFilter,
};

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn remote_error_display() {
        assert_eq!(
            RemoteError::not_found("octo/repo").to_string(),
            "Not found: octo/repo"
        );
        assert!(RemoteError::forbidden("nope").to_string().contains("Forbidden"));
        assert!(
            RemoteError::network("connection reset")
                .to_string()
                .contains("connection reset")
        );
        assert_eq!(
            RemoteError::RateLimited { reset_at: None }.to_string(),
            "Rate limit exceeded"
        );
        assert!(
            RemoteError::RateLimited {
                reset_at: Some(Utc::now())
            }
            .to_string()
            .contains("Resets at")
        );
    }

    #[test]
    fn remote_error_predicates() {
        assert!(RemoteError::not_found("x").is_not_found());
        assert!(!RemoteError::forbidden("x").is_not_found());
        assert!(RemoteError::forbidden("x").is_forbidden());
        assert!(RemoteError::RateLimited { reset_at: None }.is_rate_limited());
        assert!(RemoteError::network("x").is_transient());
        assert!(!RemoteError::api("x").is_transient());
        assert!(!RemoteError::RateLimited { reset_at: None }.is_transient());
    }

    #[test]
    fn short_error_message_takes_first_line() {
        let err = RemoteError::api("bad request\n{\"message\": \"details\"}");
        assert_eq!(short_error_message(&err), "API error: bad request");
    }

    #[test]
    fn page_options_first_is_single_page() {
        let page = PageOptions::first(10);
        assert_eq!(page.per_page, 10);
        assert_eq!(page.max_pages, 1);
        assert_eq!(PageOptions::first(0).per_page, 1);
    }

    #[test]
    fn state_filter_wire_values() {
        assert_eq!(StateFilter::default().as_str(), "open");
        assert_eq!(StateFilter::All.as_str(), "all");
    }

    #[test]
    fn remote_repository_full_name() {
        let repo = RemoteRepository {
            platform_id: 1,
            owner: "rust-lang".to_string(),
            name: "rust".to_string(),
            description: None,
            default_branch: "master".to_string(),
            is_private: false,
            is_fork: false,
            html_url: "https://github.com/rust-lang/rust".to_string(),
            updated_at: None,
        };
        assert_eq!(repo.full_name(), "rust-lang/rust");
    }
}
