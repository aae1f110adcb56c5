use futures_util::future::join_all;

use crate::scrapbox::PageStore;

/// A search hit labeled with the project it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub project: String,
    pub title: String,
}

impl std::fmt::Display for SearchHit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.project, self.title)
    }
}

/// Run `query` against every project concurrently and merge the hits in
/// project order.
///
/// A project whose query fails is logged and contributes nothing.
pub async fn fan_out<'a, I>(store: &dyn PageStore, projects: I, query: &str) -> Vec<SearchHit>
where
    I: IntoIterator<Item = &'a str>,
{
    let searches = projects.into_iter().map(|project| async move {
        match store.query(project, query).await {
            Ok(titles) => titles
                .into_iter()
                .map(|title| SearchHit {
                    project: project.to_string(),
                    title,
                })
                .collect::<Vec<_>>(),
            Err(e) => {
                log::warn!("Search: query failed for project \"{}\": {:#}", project, e);
                Vec::new()
            }
        }
    });

    let hits: Vec<SearchHit> = join_all(searches).await.into_iter().flatten().collect();
    log::info!("Search: {} hit(s) for {:?}", hits.len(), query);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, MemoryStore};

    #[tokio::test]
    async fn test_merges_in_project_order() {
        let store = MemoryStore::new()
            .with_search_results("b", &["B1"])
            .with_search_results("a", &["A1", "A2"]);

        let hits = fan_out(&store, ["a", "b"], "q").await;
        let rendered: Vec<String> = hits.iter().map(|h| h.to_string()).collect();
        assert_eq!(rendered, vec!["[a] A1", "[a] A2", "[b] B1"]);
    }

    #[tokio::test]
    async fn test_failing_project_degrades_to_empty() {
        let store = MemoryStore::new()
            .with_search_results("a", &["A1"])
            .with_search_results("c", &["C1"])
            .with_failing_project("b");

        let hits = fan_out(&store, ["a", "b", "c"], "q").await;
        let rendered: Vec<String> = hits.iter().map(|h| h.to_string()).collect();
        assert_eq!(rendered, vec!["[a] A1", "[c] C1"]);

        let queried: Vec<Call> = store.calls();
        assert_eq!(queried.len(), 3);
    }

    #[tokio::test]
    async fn test_no_hits_is_empty() {
        let store = MemoryStore::new();
        assert!(fan_out(&store, ["a"], "nothing").await.is_empty());
    }
}
