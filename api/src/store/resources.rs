//! Legal resource library: guides and templates with view/download counters.

use std::collections::HashMap;

use async_trait::async_trait;
use lawsphere_shared::Resource;
use serde::Deserialize;
use tokio::sync::RwLock;

use super::StoreError;

/// Query filters for the resource list. `"all"` disables a filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceFilter {
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub search: Option<String>,
}

impl ResourceFilter {
    pub fn matches(&self, resource: &Resource) -> bool {
        if let Some(category) = active(&self.category) {
            if resource.category != category {
                return false;
            }
        }
        if let Some(kind) = active(&self.kind) {
            if resource.kind.as_str() != kind {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                [&resource.title, &resource.description, &resource.category]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&term))
            }
            _ => true,
        }
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty() && *v != "all")
}

#[async_trait]
pub trait ResourceRepository: Send + Sync {
    async fn list(&self, filter: &ResourceFilter) -> Result<Vec<Resource>, StoreError>;

    async fn find(&self, id: &str) -> Result<Resource, StoreError>;

    async fn record_view(&self, id: &str) -> Result<u64, StoreError>;

    async fn record_download(&self, id: &str) -> Result<u64, StoreError>;

    /// External URL of the resource's hosted file.
    async fn file_url(&self, id: &str) -> Result<String, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryResourceRepository {
    resources: RwLock<Vec<Resource>>,
    hosted_files: HashMap<String, String>,
}

impl InMemoryResourceRepository {
    pub fn new(resources: Vec<Resource>, hosted_files: HashMap<String, String>) -> Self {
        Self {
            resources: RwLock::new(resources),
            hosted_files,
        }
    }

    async fn bump(
        &self,
        id: &str,
        counter: fn(&mut Resource) -> &mut u64,
    ) -> Result<u64, StoreError> {
        let mut resources = self.resources.write().await;
        let resource = resources
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::ResourceNotFound(id.to_string()))?;
        let value = counter(resource);
        *value = value.saturating_add(1);
        Ok(*value)
    }
}

#[async_trait]
impl ResourceRepository for InMemoryResourceRepository {
    async fn list(&self, filter: &ResourceFilter) -> Result<Vec<Resource>, StoreError> {
        Ok(self
            .resources
            .read()
            .await
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn find(&self, id: &str) -> Result<Resource, StoreError> {
        self.resources
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| StoreError::ResourceNotFound(id.to_string()))
    }

    async fn record_view(&self, id: &str) -> Result<u64, StoreError> {
        self.bump(id, |r| &mut r.views).await
    }

    async fn record_download(&self, id: &str) -> Result<u64, StoreError> {
        self.bump(id, |r| &mut r.downloads).await
    }

    async fn file_url(&self, id: &str) -> Result<String, StoreError> {
        let resource = self.find(id).await?;
        resource
            .file
            .and_then(|file| self.hosted_files.get(&file).cloned())
            .ok_or_else(|| StoreError::FileNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lawsphere_shared::ResourceType;
    use rstest::{fixture, rstest};

    fn resource(id: &str, title: &str, kind: ResourceType, category: &str) -> Resource {
        Resource {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("About {title}"),
            kind,
            category: category.to_string(),
            file: Some(format!("{id}.pdf")),
            views: 0,
            downloads: 0,
        }
    }

    #[fixture]
    fn repo() -> InMemoryResourceRepository {
        let resources = vec![
            resource("1", "Tenant Basics", ResourceType::Guide, "Housing & Tenant Rights"),
            resource("2", "Power of Attorney Form", ResourceType::Template, "Family Law"),
            resource("3", "Privacy Law Guide", ResourceType::Guide, "Consumer Rights"),
        ];
        let hosted = HashMap::from([("1.pdf".to_string(), "https://cdn.test/1.pdf".to_string())]);
        InMemoryResourceRepository::new(resources, hosted)
    }

    fn filter(category: Option<&str>, kind: Option<&str>, search: Option<&str>) -> ResourceFilter {
        ResourceFilter {
            category: category.map(str::to_string),
            kind: kind.map(str::to_string),
            search: search.map(str::to_string),
        }
    }

    #[rstest]
    #[case::no_filters(filter(None, None, None), &["1", "2", "3"])]
    #[case::all_is_unfiltered(filter(Some("all"), Some("all"), None), &["1", "2", "3"])]
    #[case::by_category(filter(Some("Family Law"), None, None), &["2"])]
    #[case::by_type(filter(None, Some("Guide"), None), &["1", "3"])]
    #[case::search_title_any_case(filter(None, None, Some("  TENANT ")), &["1"])]
    #[case::search_category(filter(None, None, Some("consumer")), &["3"])]
    #[case::search_description(filter(None, None, Some("about power")), &["2"])]
    #[case::blank_search(filter(None, None, Some("   ")), &["1", "2", "3"])]
    #[case::combined(filter(Some("all"), Some("Guide"), Some("privacy")), &["3"])]
    #[tokio::test]
    async fn list_applies_filters(
        repo: InMemoryResourceRepository,
        #[case] filter: ResourceFilter,
        #[case] expected: &[&str],
    ) {
        let ids: Vec<_> = repo
            .list(&filter)
            .await
            .expect("list")
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn counters_increment_independently(repo: InMemoryResourceRepository) {
        assert_eq!(repo.record_view("1").await, Ok(1));
        assert_eq!(repo.record_view("1").await, Ok(2));
        assert_eq!(repo.record_download("1").await, Ok(1));

        let stored = repo.find("1").await.expect("find");
        assert_eq!((stored.views, stored.downloads), (2, 1));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_resource_is_not_found(repo: InMemoryResourceRepository) {
        let missing = Err(StoreError::ResourceNotFound("99".to_string()));
        assert_eq!(repo.record_view("99").await, missing);
        assert_eq!(repo.record_download("99").await, missing);
        assert_eq!(repo.file_url("99").await, Err(StoreError::ResourceNotFound("99".to_string())));
    }

    #[rstest]
    #[tokio::test]
    async fn file_url_requires_mapped_file(repo: InMemoryResourceRepository) {
        assert_eq!(repo.file_url("1").await.as_deref(), Ok("https://cdn.test/1.pdf"));
        assert_eq!(
            repo.file_url("2").await,
            Err(StoreError::FileNotFound("2".to_string()))
        );
    }
}
