//! Initial migration to create the trawler cache schema.
//!
//! Tables carry no foreign key constraints: children are removed by the
//! retention pruner after their parents, inside the same transaction.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        self.create_repositories(manager).await?;
        self.create_pull_requests(manager).await?;
        self.create_pull_request_statuses(manager).await?;
        self.create_checks(manager).await?;
        self.create_commit_combined_statuses(manager).await?;
        self.create_reviews(manager).await?;
        self.create_issues(manager).await?;
        self.create_searches(manager).await?;
        self.create_releases(manager).await?;
        self.create_notifications(manager).await?;
        self.create_developers(manager).await?;
        self.create_meta_data(manager).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MetaData::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Developers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Releases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SearchIssues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Searches::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Issues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CommitCombinedStatuses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CheckSuites::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CheckRuns::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PullRequestStatuses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PullRequests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Repositories::Table).to_owned())
            .await?;
        Ok(())
    }
}

impl Migration {
    async fn create_repositories(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Repositories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Repositories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Repositories::PlatformId)
                            .big_integer()
                            .not_null(),
                    )
                    // Naming
                    .col(ColumnDef::new(Repositories::Owner).string().not_null())
                    .col(ColumnDef::new(Repositories::Name).string().not_null())
                    // Content
                    .col(ColumnDef::new(Repositories::Description).text().null())
                    .col(
                        ColumnDef::new(Repositories::DefaultBranch)
                            .string()
                            .not_null()
                            .default("main"),
                    )
                    .col(
                        ColumnDef::new(Repositories::IsPrivate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Repositories::IsFork)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Repositories::HtmlUrl).text().not_null())
                    // Tracking
                    .col(
                        ColumnDef::new(Repositories::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Repositories::SyncedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_repositories_platform_id")
                    .table(Repositories::Table)
                    .col(Repositories::PlatformId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Lookup by owner/name
        manager
            .create_index(
                Index::create()
                    .name("idx_repositories_owner_name")
                    .table(Repositories::Table)
                    .col(Repositories::Owner)
                    .col(Repositories::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_pull_requests(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PullRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PullRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PullRequests::PlatformId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PullRequests::RepositoryId).uuid().not_null())
                    .col(ColumnDef::new(PullRequests::Number).big_integer().not_null())
                    .col(ColumnDef::new(PullRequests::Title).text().not_null())
                    .col(ColumnDef::new(PullRequests::State).string().not_null())
                    .col(
                        ColumnDef::new(PullRequests::IsDraft)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(PullRequests::AuthorLogin).string().not_null())
                    .col(ColumnDef::new(PullRequests::HeadSha).string().not_null())
                    .col(ColumnDef::new(PullRequests::HeadRef).string().not_null())
                    .col(ColumnDef::new(PullRequests::BaseRef).string().not_null())
                    .col(ColumnDef::new(PullRequests::HtmlUrl).text().not_null())
                    .col(ColumnDef::new(PullRequests::StatusId).uuid().null())
                    .col(
                        ColumnDef::new(PullRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PullRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PullRequests::LastObservedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pull_requests_platform_id")
                    .table(PullRequests::Table)
                    .col(PullRequests::PlatformId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pull_requests_repository")
                    .table(PullRequests::Table)
                    .col(PullRequests::RepositoryId)
                    .col(PullRequests::LastObservedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pull_requests_author")
                    .table(PullRequests::Table)
                    .col(PullRequests::AuthorLogin)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_pull_request_statuses(
        &self,
        manager: &SchemaManager<'_>,
    ) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PullRequestStatuses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PullRequestStatuses::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PullRequestStatuses::PullRequestId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PullRequestStatuses::PreviousStatusId)
                            .uuid()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PullRequestStatuses::HeadSha)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PullRequestStatuses::State)
                            .string()
                            .not_null()
                            .default("none"),
                    )
                    .col(
                        ColumnDef::new(PullRequestStatuses::Conclusion)
                            .string()
                            .not_null()
                            .default("none"),
                    )
                    .col(
                        ColumnDef::new(PullRequestStatuses::CommitState)
                            .string()
                            .not_null()
                            .default("none"),
                    )
                    .col(
                        ColumnDef::new(PullRequestStatuses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pull_request_statuses_pull_request")
                    .table(PullRequestStatuses::Table)
                    .col(PullRequestStatuses::PullRequestId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_checks(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CheckRuns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CheckRuns::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CheckRuns::PlatformId).big_integer().not_null())
                    .col(ColumnDef::new(CheckRuns::PullRequestId).uuid().not_null())
                    .col(ColumnDef::new(CheckRuns::CheckSuiteId).big_integer().null())
                    .col(ColumnDef::new(CheckRuns::AppId).big_integer().null())
                    .col(ColumnDef::new(CheckRuns::Name).string().not_null())
                    .col(ColumnDef::new(CheckRuns::HeadSha).string().not_null())
                    .col(ColumnDef::new(CheckRuns::Status).string().not_null())
                    .col(ColumnDef::new(CheckRuns::Conclusion).string().not_null())
                    .col(ColumnDef::new(CheckRuns::HtmlUrl).text().null())
                    .col(
                        ColumnDef::new(CheckRuns::StartedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CheckRuns::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_check_runs_pull_request_platform_id")
                    .table(CheckRuns::Table)
                    .col(CheckRuns::PullRequestId)
                    .col(CheckRuns::PlatformId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CheckSuites::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CheckSuites::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CheckSuites::PlatformId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CheckSuites::PullRequestId).uuid().not_null())
                    .col(ColumnDef::new(CheckSuites::AppId).big_integer().null())
                    .col(ColumnDef::new(CheckSuites::AppName).string().null())
                    .col(ColumnDef::new(CheckSuites::HeadSha).string().not_null())
                    .col(ColumnDef::new(CheckSuites::Status).string().not_null())
                    .col(ColumnDef::new(CheckSuites::Conclusion).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_check_suites_pull_request_platform_id")
                    .table(CheckSuites::Table)
                    .col(CheckSuites::PullRequestId)
                    .col(CheckSuites::PlatformId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_commit_combined_statuses(
        &self,
        manager: &SchemaManager<'_>,
    ) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CommitCombinedStatuses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommitCombinedStatuses::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CommitCombinedStatuses::RepositoryId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommitCombinedStatuses::Sha)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommitCombinedStatuses::State)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommitCombinedStatuses::TotalCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CommitCombinedStatuses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_commit_combined_statuses_repository_sha")
                    .table(CommitCombinedStatuses::Table)
                    .col(CommitCombinedStatuses::RepositoryId)
                    .col(CommitCombinedStatuses::Sha)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_reviews(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Reviews::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Reviews::PlatformId).big_integer().not_null())
                    .col(ColumnDef::new(Reviews::PullRequestId).uuid().not_null())
                    .col(ColumnDef::new(Reviews::AuthorLogin).string().not_null())
                    .col(ColumnDef::new(Reviews::State).string().not_null())
                    .col(ColumnDef::new(Reviews::Body).text().null())
                    .col(ColumnDef::new(Reviews::HtmlUrl).text().not_null())
                    .col(
                        ColumnDef::new(Reviews::SubmittedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Reviews::LastObservedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_platform_id")
                    .table(Reviews::Table)
                    .col(Reviews::PlatformId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_pull_request")
                    .table(Reviews::Table)
                    .col(Reviews::PullRequestId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_issues(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Issues::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Issues::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Issues::PlatformId).big_integer().not_null())
                    .col(ColumnDef::new(Issues::RepositoryId).uuid().not_null())
                    .col(ColumnDef::new(Issues::Number).big_integer().not_null())
                    .col(ColumnDef::new(Issues::Title).text().not_null())
                    .col(ColumnDef::new(Issues::State).string().not_null())
                    .col(ColumnDef::new(Issues::AuthorLogin).string().not_null())
                    .col(
                        ColumnDef::new(Issues::Labels)
                            .json()
                            .not_null()
                            .default(Expr::cust("'[]'")),
                    )
                    .col(ColumnDef::new(Issues::HtmlUrl).text().not_null())
                    .col(
                        ColumnDef::new(Issues::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Issues::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Issues::LastObservedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_issues_platform_id")
                    .table(Issues::Table)
                    .col(Issues::PlatformId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_issues_repository")
                    .table(Issues::Table)
                    .col(Issues::RepositoryId)
                    .col(Issues::LastObservedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_searches(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Searches::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Searches::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Searches::RepositoryId).uuid().not_null())
                    .col(ColumnDef::new(Searches::Query).text().not_null())
                    .col(
                        ColumnDef::new(Searches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Searches::SearchedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_searches_repository_query")
                    .table(Searches::Table)
                    .col(Searches::RepositoryId)
                    .col(Searches::Query)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SearchIssues::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SearchIssues::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SearchIssues::SearchId).uuid().not_null())
                    .col(ColumnDef::new(SearchIssues::IssueId).uuid().not_null())
                    .col(
                        ColumnDef::new(SearchIssues::LinkedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_search_issues_search_issue")
                    .table(SearchIssues::Table)
                    .col(SearchIssues::SearchId)
                    .col(SearchIssues::IssueId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_releases(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Releases::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Releases::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Releases::PlatformId).big_integer().not_null())
                    .col(ColumnDef::new(Releases::RepositoryId).uuid().not_null())
                    .col(ColumnDef::new(Releases::Name).string().not_null())
                    .col(ColumnDef::new(Releases::TagName).string().not_null())
                    .col(
                        ColumnDef::new(Releases::IsPrerelease)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Releases::HtmlUrl).text().not_null())
                    .col(
                        ColumnDef::new(Releases::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Releases::PublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Releases::LastObservedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_releases_platform_id")
                    .table(Releases::Table)
                    .col(Releases::PlatformId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_releases_repository")
                    .table(Releases::Table)
                    .col(Releases::RepositoryId)
                    .col(Releases::LastObservedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_notifications(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notifications::Kind).string().not_null())
                    .col(
                        ColumnDef::new(Notifications::RepositoryFullName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::PullRequestId).uuid().null())
                    .col(
                        ColumnDef::new(Notifications::PullRequestNumber)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Notifications::UserLogin).string().not_null())
                    .col(ColumnDef::new(Notifications::Title).text().not_null())
                    .col(ColumnDef::new(Notifications::Description).text().not_null())
                    .col(ColumnDef::new(Notifications::Url).text().not_null())
                    .col(ColumnDef::new(Notifications::ReviewId).uuid().null())
                    .col(ColumnDef::new(Notifications::StatusId).uuid().null())
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Notifications::Toasted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_created_at")
                    .table(Notifications::Table)
                    .col(Notifications::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_developers(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Developers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Developers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Developers::PlatformId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Developers::Login).string().not_null())
                    .col(ColumnDef::new(Developers::AvatarUrl).text().null())
                    .col(
                        ColumnDef::new(Developers::LastSeenAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_developers_login")
                    .table(Developers::Table)
                    .col(Developers::Login)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_meta_data(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MetaData::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MetaData::Key)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MetaData::Value).text().not_null())
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Repositories {
    Table,
    Id,
    PlatformId,
    Owner,
    Name,
    Description,
    DefaultBranch,
    IsPrivate,
    IsFork,
    HtmlUrl,
    UpdatedAt,
    SyncedAt,
}

#[derive(DeriveIden)]
enum PullRequests {
    Table,
    Id,
    PlatformId,
    RepositoryId,
    Number,
    Title,
    State,
    IsDraft,
    AuthorLogin,
    HeadSha,
    HeadRef,
    BaseRef,
    HtmlUrl,
    StatusId,
    CreatedAt,
    UpdatedAt,
    LastObservedAt,
}

#[derive(DeriveIden)]
enum PullRequestStatuses {
    Table,
    Id,
    PullRequestId,
    PreviousStatusId,
    HeadSha,
    State,
    Conclusion,
    CommitState,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CheckRuns {
    Table,
    Id,
    PlatformId,
    PullRequestId,
    CheckSuiteId,
    AppId,
    Name,
    HeadSha,
    Status,
    Conclusion,
    HtmlUrl,
    StartedAt,
    CompletedAt,
}

#[derive(DeriveIden)]
enum CheckSuites {
    Table,
    Id,
    PlatformId,
    PullRequestId,
    AppId,
    AppName,
    HeadSha,
    Status,
    Conclusion,
}

#[derive(DeriveIden)]
enum CommitCombinedStatuses {
    Table,
    Id,
    RepositoryId,
    Sha,
    State,
    TotalCount,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    Id,
    PlatformId,
    PullRequestId,
    AuthorLogin,
    State,
    Body,
    HtmlUrl,
    SubmittedAt,
    LastObservedAt,
}

#[derive(DeriveIden)]
enum Issues {
    Table,
    Id,
    PlatformId,
    RepositoryId,
    Number,
    Title,
    State,
    AuthorLogin,
    Labels,
    HtmlUrl,
    CreatedAt,
    UpdatedAt,
    LastObservedAt,
}

#[derive(DeriveIden)]
enum Searches {
    Table,
    Id,
    RepositoryId,
    Query,
    CreatedAt,
    SearchedAt,
}

#[derive(DeriveIden)]
enum SearchIssues {
    Table,
    Id,
    SearchId,
    IssueId,
    LinkedAt,
}

#[derive(DeriveIden)]
enum Releases {
    Table,
    Id,
    PlatformId,
    RepositoryId,
    Name,
    TagName,
    IsPrerelease,
    HtmlUrl,
    CreatedAt,
    PublishedAt,
    LastObservedAt,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    Id,
    Kind,
    RepositoryFullName,
    PullRequestId,
    PullRequestNumber,
    UserLogin,
    Title,
    Description,
    Url,
    ReviewId,
    StatusId,
    CreatedAt,
    Toasted,
}

#[derive(DeriveIden)]
enum Developers {
    Table,
    Id,
    PlatformId,
    Login,
    AvatarUrl,
    LastSeenAt,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "meta_data")]
enum MetaData {
    Table,
    Key,
    Value,
}
