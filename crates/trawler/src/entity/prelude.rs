//! Common re-exports for convenient entity usage.

pub use super::check_conclusion::CheckConclusion;
pub use super::check_run::{
    ActiveModel as CheckRunActiveModel, Column as CheckRunColumn, Entity as CheckRun,
    Model as CheckRunModel,
};
pub use super::check_run_status::CheckRunStatus;
pub use super::check_suite::{
    ActiveModel as CheckSuiteActiveModel, Column as CheckSuiteColumn, Entity as CheckSuite,
    Model as CheckSuiteModel,
};
pub use super::commit_combined_status::{
    ActiveModel as CommitCombinedStatusActiveModel, Column as CommitCombinedStatusColumn,
    Entity as CommitCombinedStatus, Model as CommitCombinedStatusModel,
};
pub use super::commit_state::CommitState;
pub use super::developer::{
    ActiveModel as DeveloperActiveModel, Column as DeveloperColumn, Entity as Developer,
    Model as DeveloperModel,
};
pub use super::issue::{
    ActiveModel as IssueActiveModel, Column as IssueColumn, Entity as Issue, Model as IssueModel,
};
pub use super::meta_data::{
    ActiveModel as MetaDataActiveModel, Column as MetaDataColumn, Entity as MetaData,
    Model as MetaDataModel,
};
pub use super::notification::{
    ActiveModel as NotificationActiveModel, Column as NotificationColumn, Entity as Notification,
    Model as NotificationModel,
};
pub use super::notification_kind::NotificationKind;
pub use super::pull_request::{
    ActiveModel as PullRequestActiveModel, Column as PullRequestColumn, Entity as PullRequest,
    Model as PullRequestModel,
};
pub use super::pull_request_status::{
    ActiveModel as PullRequestStatusActiveModel, Column as PullRequestStatusColumn,
    Entity as PullRequestStatus, Model as PullRequestStatusModel,
};
pub use super::release::{
    ActiveModel as ReleaseActiveModel, Column as ReleaseColumn, Entity as Release,
    Model as ReleaseModel,
};
pub use super::repository::{
    ActiveModel as RepositoryActiveModel, Column as RepositoryColumn, Entity as Repository,
    Model as RepositoryModel,
};
pub use super::review::{
    ActiveModel as ReviewActiveModel, Column as ReviewColumn, Entity as Review,
    Model as ReviewModel,
};
pub use super::search::{
    ActiveModel as SearchActiveModel, Column as SearchColumn, Entity as Search,
    Model as SearchModel,
};
pub use super::search_issue::{
    ActiveModel as SearchIssueActiveModel, Column as SearchIssueColumn, Entity as SearchIssue,
    Model as SearchIssueModel,
};
pub use super::status_state::StatusState;
