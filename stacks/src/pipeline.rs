use crate::config::FinderSettings;
use crate::expiry::find_expired_at;
use crate::grouping::group_by_environment;
use crate::lister::StackLister;
use crate::provider::{ProviderResult, StackProvider};
use crate::report::Report;
use crate::types::StackSummary;
use chrono::{DateTime, Utc};
use tracing::info;

/// Lists stacks from every configured provider, keeps the expired ones and
/// groups them by environment.
pub struct StackFinder {
    providers: Vec<Box<dyn StackProvider>>,
    settings: FinderSettings,
}

impl StackFinder {
    pub fn new(settings: FinderSettings) -> Self {
        Self {
            providers: Vec::new(),
            settings,
        }
    }

    pub fn with_provider(mut self, provider: Box<dyn StackProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Stacks from all providers, in provider order.
    pub async fn list_stacks(&self) -> ProviderResult<Vec<StackSummary>> {
        let mut stacks = Vec::new();
        for provider in &self.providers {
            stacks.extend(StackLister::new(provider.as_ref()).list_stacks().await?);
        }
        Ok(stacks)
    }

    pub async fn run(&self) -> ProviderResult<Report> {
        self.run_at(Utc::now()).await
    }

    pub async fn run_at(&self, now: DateTime<Utc>) -> ProviderResult<Report> {
        let stacks = self.list_stacks().await?;
        let expired = find_expired_at(&stacks, self.settings.expiry_days, now);
        let environments = group_by_environment(
            &expired,
            self.settings.position,
            self.settings.delimiter.as_str(),
            &self.settings.excluded,
        );

        info!(
            listed = stacks.len(),
            expired = expired.len(),
            environments = environments.len(),
            expiry_days = self.settings.expiry_days,
            position = %self.settings.position,
            delimiter = %self.settings.delimiter,
            "Finished expired stack search"
        );

        Ok(Report::new(expired, environments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderError;
    use crate::types::{StackPage, StackStatus};
    use async_trait::async_trait;

    struct FixedProvider(Vec<StackSummary>);

    #[async_trait]
    impl StackProvider for FixedProvider {
        async fn list_stacks_page(
            &self,
            _status_filter: &[StackStatus],
            _next_token: Option<String>,
        ) -> ProviderResult<StackPage> {
            Ok(StackPage::new(self.0.clone()))
        }

        fn provider_name(&self) -> &'static str {
            "fixed"
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl StackProvider for FailingProvider {
        async fn list_stacks_page(
            &self,
            _status_filter: &[StackStatus],
            _next_token: Option<String>,
        ) -> ProviderResult<StackPage> {
            Err(ProviderError::Authentication {
                message: "The security token included in the request is expired".to_string(),
            })
        }

        fn provider_name(&self) -> &'static str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_providers_are_listed_in_order() {
        let finder = StackFinder::new(FinderSettings::default())
            .with_provider(Box::new(FixedProvider(vec![StackSummary::new(
                "dev-api",
                StackStatus::CreateComplete,
            )])))
            .with_provider(Box::new(FixedProvider(vec![StackSummary::new(
                "qa-api",
                StackStatus::CreateComplete,
            )])));

        let names: Vec<_> = finder
            .list_stacks()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.stack_name)
            .collect();
        assert_eq!(names, vec!["dev-api", "qa-api"]);
    }

    #[tokio::test]
    async fn test_failing_provider_aborts_run() {
        let finder = StackFinder::new(FinderSettings::default())
            .with_provider(Box::new(FixedProvider(Vec::new())))
            .with_provider(Box::new(FailingProvider));

        let result = finder.run().await;
        assert!(matches!(result, Err(ProviderError::Authentication { .. })));
    }

    #[tokio::test]
    async fn test_no_providers_yields_empty_report() {
        let report = StackFinder::new(FinderSettings::default()).run().await.unwrap();
        assert_eq!(report, Report::default());
    }
}
