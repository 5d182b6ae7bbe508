//! Sync engine configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::platform::PageOptions;

/// Application id GitHub uses for Dependabot check suites.
pub const DEPENDABOT_APP_ID: i64 = 29110;

/// Tunables for retention, notification staleness and remote paging.
///
/// Every field has a default, so a partial `[sync]` table deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Pull requests, issues and releases not seen for this long are dropped
    /// from the scope a sync just refreshed. Must exceed one sync pass.
    pub observed_window_minutes: i64,
    /// Search results not returned again within this window are unlinked.
    pub search_link_window_minutes: i64,
    pub notification_retention_days: i64,
    pub search_retention_days: i64,
    pub release_retention_days: i64,
    /// Reviews submitted longer ago than this never notify.
    pub review_staleness_days: i64,
    /// Pull requests idle longer than this never get check notifications.
    pub check_staleness_hours: i64,
    pub recent_release_limit: u32,
    pub dependabot_app_id: i64,
    pub page: PageOptions,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            observed_window_minutes: 6,
            search_link_window_minutes: 1,
            notification_retention_days: 7,
            search_retention_days: 7,
            release_retention_days: 7,
            review_staleness_days: 7,
            check_staleness_hours: 24,
            recent_release_limit: 10,
            dependabot_app_id: DEPENDABOT_APP_ID,
            page: PageOptions::default(),
        }
    }
}

/// Longest span any window setting may cover.
const MAX_WINDOW_DAYS: i64 = 36_500;

/// A `[sync]` setting outside its accepted range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sync.{field} = {value} is out of range (expected {min}..={max})")]
pub struct InvalidSyncConfig {
    pub field: &'static str,
    pub value: i64,
    pub min: i64,
    pub max: i64,
}

impl SyncConfig {
    /// Check every setting against its accepted range.
    ///
    /// The accessors below clamp into the same ranges, so an unchecked
    /// config never panics or deletes rows a sync just wrote.
    pub fn validate(&self) -> Result<(), InvalidSyncConfig> {
        let max_minutes = MAX_WINDOW_DAYS * 24 * 60;
        let max_hours = MAX_WINDOW_DAYS * 24;
        let checks = [
            ("observed_window_minutes", self.observed_window_minutes, max_minutes),
            ("search_link_window_minutes", self.search_link_window_minutes, max_minutes),
            ("notification_retention_days", self.notification_retention_days, MAX_WINDOW_DAYS),
            ("search_retention_days", self.search_retention_days, MAX_WINDOW_DAYS),
            ("release_retention_days", self.release_retention_days, MAX_WINDOW_DAYS),
            ("review_staleness_days", self.review_staleness_days, MAX_WINDOW_DAYS),
            ("check_staleness_hours", self.check_staleness_hours, max_hours),
            ("recent_release_limit", i64::from(self.recent_release_limit), i64::from(u32::MAX)),
            ("page.per_page", i64::from(self.page.per_page), i64::from(u32::MAX)),
            ("page.max_pages", i64::from(self.page.max_pages), i64::from(u32::MAX)),
        ];
        for (field, value, max) in checks {
            if !(1..=max).contains(&value) {
                return Err(InvalidSyncConfig {
                    field,
                    value,
                    min: 1,
                    max,
                });
            }
        }
        Ok(())
    }

    /// At least one minute, so rows upserted by the running sync survive it.
    pub fn observed_window(&self) -> Duration {
        window(self.observed_window_minutes, Duration::try_minutes)
    }

    pub fn search_link_window(&self) -> Duration {
        window(self.search_link_window_minutes, Duration::try_minutes)
    }

    pub fn notification_retention(&self) -> Duration {
        window(self.notification_retention_days, Duration::try_days)
    }

    pub fn search_retention(&self) -> Duration {
        window(self.search_retention_days, Duration::try_days)
    }

    pub fn release_retention(&self) -> Duration {
        window(self.release_retention_days, Duration::try_days)
    }

    pub fn review_staleness(&self) -> Duration {
        window(self.review_staleness_days, Duration::try_days)
    }

    pub fn check_staleness(&self) -> Duration {
        window(self.check_staleness_hours, Duration::try_hours)
    }
}

/// Clamp `value` units into `1..=MAX_WINDOW_DAYS` days worth of time.
fn window(value: i64, unit: fn(i64) -> Option<Duration>) -> Duration {
    let max = Duration::days(MAX_WINDOW_DAYS);
    unit(value.max(1)).map_or(max, |d| d.min(max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.observed_window(), Duration::minutes(6));
        assert_eq!(config.search_link_window(), Duration::minutes(1));
        assert_eq!(config.notification_retention(), Duration::days(7));
        assert_eq!(config.check_staleness(), Duration::days(1));
        assert_eq!(config.recent_release_limit, 10);
        assert_eq!(config.dependabot_app_id, 29110);
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SyncConfig::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_out_of_range_windows() {
        let config = SyncConfig {
            observed_window_minutes: -1,
            ..SyncConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "observed_window_minutes");
        assert_eq!(err.value, -1);
        assert!(err.to_string().contains("sync.observed_window_minutes"));

        let config = SyncConfig {
            notification_retention_days: i64::MAX,
            ..SyncConfig::default()
        };
        assert_eq!(
            config.validate().unwrap_err().field,
            "notification_retention_days"
        );

        let config = SyncConfig {
            page: PageOptions {
                per_page: 0,
                max_pages: 2,
            },
            ..SyncConfig::default()
        };
        assert_eq!(config.validate().unwrap_err().field, "page.per_page");
    }

    #[test]
    fn windows_are_clamped_instead_of_panicking() {
        let config = SyncConfig {
            observed_window_minutes: -1,
            search_link_window_minutes: 0,
            notification_retention_days: i64::MAX,
            check_staleness_hours: i64::MIN,
            ..SyncConfig::default()
        };
        assert_eq!(config.observed_window(), Duration::minutes(1));
        assert_eq!(config.search_link_window(), Duration::minutes(1));
        assert_eq!(
            config.notification_retention(),
            Duration::days(MAX_WINDOW_DAYS)
        );
        assert_eq!(config.check_staleness(), Duration::hours(1));

        let config = SyncConfig {
            observed_window_minutes: i64::MAX,
            ..SyncConfig::default()
        };
        assert_eq!(config.observed_window(), Duration::days(MAX_WINDOW_DAYS));
    }

    #[test]
    fn partial_table_keeps_defaults() {
        let config: SyncConfig =
            serde_json::from_str(r#"{"observed_window_minutes": 10, "page": {"per_page": 100}}"#)
                .expect("partial config should deserialize");
        assert_eq!(config.observed_window_minutes, 10);
        assert_eq!(config.page.per_page, 100);
        assert_eq!(config.page.max_pages, PageOptions::default().max_pages);
        assert_eq!(config.release_retention_days, 7);
    }
}
