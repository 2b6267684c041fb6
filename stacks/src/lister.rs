use crate::provider::{ProviderResult, StackProvider};
use crate::types::{StackStatus, StackSummary};
use tracing::{debug, info};

/// Walks every page of a provider's stack listing.
pub struct StackLister<'a> {
    provider: &'a dyn StackProvider,
}

impl<'a> StackLister<'a> {
    pub fn new(provider: &'a dyn StackProvider) -> Self {
        Self { provider }
    }

    /// Fetches pages, filtered to [`StackStatus::ALL`], until the provider
    /// stops returning a continuation token.
    ///
    /// The first failing page aborts the listing; pages already fetched are
    /// discarded.
    pub async fn list_stacks(&self) -> ProviderResult<Vec<StackSummary>> {
        let mut stacks = Vec::new();
        let mut next_token = None;
        let mut pages = 0usize;

        loop {
            let page = self
                .provider
                .list_stacks_page(&StackStatus::ALL, next_token)
                .await?;
            pages += 1;

            debug!(
                provider = self.provider.provider_name(),
                page = pages,
                stacks = page.summaries.len(),
                "Fetched stack page"
            );

            stacks.extend(page.summaries);

            next_token = page.next_token;
            if next_token.is_none() {
                break;
            }
        }

        info!(
            provider = self.provider.provider_name(),
            pages,
            stacks = stacks.len(),
            "Listed stacks"
        );

        Ok(stacks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderError;
    use crate::types::StackPage;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct PagedProvider {
        pages: Vec<StackPage>,
        requests: Mutex<Vec<(usize, Option<String>)>>,
    }

    impl PagedProvider {
        fn new(pages: Vec<StackPage>) -> Self {
            Self {
                pages,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl StackProvider for PagedProvider {
        async fn list_stacks_page(
            &self,
            status_filter: &[StackStatus],
            next_token: Option<String>,
        ) -> ProviderResult<StackPage> {
            let mut requests = self.requests.lock().unwrap();
            let index = requests.len();
            requests.push((status_filter.len(), next_token));
            self.pages
                .get(index)
                .cloned()
                .ok_or_else(|| ProviderError::Api {
                    operation: "ListStacks",
                    message: "no more pages".to_string(),
                })
        }

        fn provider_name(&self) -> &'static str {
            "paged"
        }
    }

    fn page(names: &[&str]) -> StackPage {
        StackPage::new(
            names
                .iter()
                .map(|name| StackSummary::new(*name, StackStatus::CreateComplete))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_three_pages_are_concatenated_in_order() {
        let provider = PagedProvider::new(vec![
            page(&["a", "b"]).with_next_token("t1"),
            page(&["c"]).with_next_token("t2"),
            page(&["d", "e"]),
        ]);

        let stacks = StackLister::new(&provider).list_stacks().await.unwrap();
        let names: Vec<_> = stacks.iter().map(|s| s.stack_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d", "e"]);

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 3);
        assert_eq!(
            requests.iter().map(|(_, t)| t.clone()).collect::<Vec<_>>(),
            vec![None, Some("t1".to_string()), Some("t2".to_string())]
        );
        assert!(requests.iter().all(|(filter_len, _)| *filter_len == 12));
    }

    #[test]
    fn test_single_page_without_token() {
        let provider = PagedProvider::new(vec![page(&["only"])]);

        let stacks = tokio_test::block_on(StackLister::new(&provider).list_stacks()).unwrap();
        assert_eq!(stacks.len(), 1);
        assert_eq!(provider.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_pages_still_follow_tokens() {
        let provider = PagedProvider::new(vec![
            page(&[]).with_next_token("t1"),
            page(&[]).with_next_token("t2"),
            page(&["late"]),
        ]);

        let stacks = StackLister::new(&provider).list_stacks().await.unwrap();
        assert_eq!(stacks.len(), 1);
        assert_eq!(provider.requests.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_error_aborts_listing() {
        let provider = PagedProvider::new(vec![page(&["a"]).with_next_token("t1")]);

        let result = StackLister::new(&provider).list_stacks().await;
        assert!(matches!(result, Err(ProviderError::Api { .. })));
        assert_eq!(provider.requests.lock().unwrap().len(), 2);
    }
}
