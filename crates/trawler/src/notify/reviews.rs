//! Review-state transitions.

use chrono::{DateTime, Duration, Utc};

use crate::platform::RemoteReview;

/// Review states that never notify.
const SILENT_STATES: [&str; 1] = ["COMMENTED"];

/// Whether a review in this state is worth telling the pull request author about.
pub fn is_notifiable_state(state: &str) -> bool {
    let state = state.trim();
    !state.is_empty() && !SILENT_STATES.iter().any(|s| s.eq_ignore_ascii_case(state))
}

/// Whether a review was submitted within `max_age` of `now`.
pub fn is_recent(review: &RemoteReview, now: DateTime<Utc>, max_age: Duration) -> bool {
    review
        .submitted_at
        .is_some_and(|submitted| submitted >= now - max_age)
}

/// Decide whether a fetched review warrants a `NewReview` notification.
///
/// `prior_state` is the state cached for the same remote review before this
/// sync, if the review was cached at all.
pub fn review_transition(
    prior_state: Option<&str>,
    review: &RemoteReview,
    now: DateTime<Utc>,
    max_age: Duration,
) -> bool {
    if !is_recent(review, now, max_age) || !is_notifiable_state(&review.state) {
        return false;
    }
    prior_state.is_none_or(|prior| prior != review.state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(state: &str, submitted_at: Option<DateTime<Utc>>) -> RemoteReview {
        RemoteReview {
            platform_id: 1,
            author_login: "reviewer".to_string(),
            state: state.to_string(),
            body: None,
            html_url: "https://github.com/o/r/pull/1#pullrequestreview-1".to_string(),
            submitted_at,
        }
    }

    #[test]
    fn commented_and_empty_states_are_silent() {
        let now = Utc::now();
        let week = Duration::days(7);
        assert!(!review_transition(None, &review("COMMENTED", Some(now)), now, week));
        assert!(!review_transition(None, &review("", Some(now)), now, week));
    }

    #[test]
    fn first_sighting_notifies() {
        let now = Utc::now();
        assert!(review_transition(
            None,
            &review("APPROVED", Some(now - Duration::hours(1))),
            now,
            Duration::days(7)
        ));
    }

    #[test]
    fn state_change_notifies_once() {
        let now = Utc::now();
        let week = Duration::days(7);
        let changed = review("CHANGES_REQUESTED", Some(now));
        assert!(review_transition(Some("APPROVED"), &changed, now, week));
        assert!(!review_transition(
            Some("CHANGES_REQUESTED"),
            &changed,
            now,
            week
        ));
    }

    #[test]
    fn stale_or_unsubmitted_reviews_are_silent() {
        let now = Utc::now();
        let week = Duration::days(7);
        assert!(!review_transition(
            None,
            &review("APPROVED", Some(now - Duration::days(8))),
            now,
            week
        ));
        assert!(!review_transition(None, &review("PENDING", None), now, week));
    }
}
