//! Options and results of orchestrator operations.

use crate::platform::{PageOptions, StateFilter};

/// Options for a sync operation.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Which pull requests to list for a repository.
    pub pull_request_state: StateFilter,
    /// Restrict an issue sync to a free-text search within the repository.
    pub search_term: Option<String>,
    /// Try the anonymous public identity after every logged-in one.
    pub use_public_fallback: bool,
    /// Pagination override; the configured default is used when unset.
    pub page: Option<PageOptions>,
}

impl SyncOptions {
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    #[must_use]
    pub fn with_public_fallback(mut self) -> Self {
        self.use_public_fallback = true;
        self
    }
}

/// Result of a sync operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncResult {
    /// Repositories fetched and upserted.
    pub repositories: usize,
    pub pull_requests: usize,
    pub issues: usize,
    pub releases: usize,
    pub reviews: usize,
    /// Notifications derived during the operation.
    pub notifications: usize,
    /// Rows removed by the scoped observed-window deletes.
    pub unobserved_deleted: u64,
    /// Rows removed by retention pruning.
    pub pruned: u64,
    /// Per-item failures that were logged and skipped.
    pub errors: Vec<String>,
}

impl SyncResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_options_default() {
        let options = SyncOptions::default();
        assert_eq!(options.pull_request_state, StateFilter::Open);
        assert!(options.search_term.is_none());
        assert!(!options.use_public_fallback);
        assert!(options.page.is_none());
    }

    #[test]
    fn sync_options_builders() {
        let options = SyncOptions::default()
            .with_search("crash on start")
            .with_public_fallback();
        assert_eq!(options.search_term.as_deref(), Some("crash on start"));
        assert!(options.use_public_fallback);
    }

    #[test]
    fn sync_result_errors() {
        let mut result = SyncResult::default();
        assert!(!result.has_errors());
        result.errors.push("octo/repo#1 checks: Network error".to_string());
        assert!(result.has_errors());
    }
}
