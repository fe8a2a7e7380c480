//! Keyword retrieval over the knowledge index.
//!
//! The query is lower-cased and split on whitespace into a set of terms. A
//! segment matches when its lower-cased content contains any term as a
//! substring. There is no scoring: matches come back in index order (the
//! order documents were ingested) and the list is cut at [`MAX_RESULTS`].
//!
//! The `language` of a request is carried for callers to echo back; it does
//! not filter matches.

use crate::error::KnowledgeError;
use crate::models::Segment;
use crate::store::Store;

/// Hard upper bound on the number of segments a search returns.
pub const MAX_RESULTS: usize = 5;

/// Bundles all inputs for a single search invocation.
#[derive(Debug, Clone)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub language: &'a str,
    /// Requested result count, clamped to [`MAX_RESULTS`].
    pub limit: usize,
}

impl<'a> SearchRequest<'a> {
    pub fn new(query: &'a str, language: &'a str) -> Self {
        Self {
            query,
            language,
            limit: MAX_RESULTS,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Run a keyword search against a [`Store`] backend.
///
/// An empty or whitespace-only query has no terms and matches nothing.
pub async fn search<S: Store + ?Sized>(
    store: &S,
    req: &SearchRequest<'_>,
) -> Result<Vec<Segment>, KnowledgeError> {
    let terms = query_terms(req.query);
    if terms.is_empty() {
        return Ok(Vec::new());
    }

    let limit = req.limit.min(MAX_RESULTS);
    let results = store.keyword_search(&terms, limit).await?;

    tracing::debug!(
        query = req.query,
        language = req.language,
        terms = terms.len(),
        results = results.len(),
        "keyword search"
    );
    Ok(results)
}

/// Lower-cased, de-duplicated whitespace-separated terms of `query`.
pub fn query_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for term in query.to_lowercase().split_whitespace() {
        if !terms.iter().any(|t| t == term) {
            terms.push(term.to_string());
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkParams;
    use crate::registry::ingest_document;
    use crate::store::memory::InMemoryStore;

    async fn store_with(docs: &[(&str, &str)]) -> InMemoryStore {
        let store = InMemoryStore::new();
        for (name, text) in docs {
            ingest_document(&store, name, text, &ChunkParams::default())
                .await
                .unwrap();
        }
        store
    }

    #[test]
    fn test_query_terms() {
        assert_eq!(query_terms("  Rust  rust CARGO "), vec!["rust", "cargo"]);
        assert!(query_terms("").is_empty());
        assert!(query_terms(" \t\n").is_empty());
    }

    #[tokio::test]
    async fn test_empty_query_matches_nothing() {
        let store = store_with(&[("a.txt", "anything at all")]).await;
        assert!(search(&store, &SearchRequest::new("", "en")).await.unwrap().is_empty());
        assert!(search(&store, &SearchRequest::new("   ", "en")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_case_insensitive_substring() {
        let store = store_with(&[("a.txt", "Deploying with KUBERNETES")]).await;
        let hits = search(&store, &SearchRequest::new("kubernetes", "en")).await.unwrap();
        assert_eq!(hits.len(), 1);
        let hits = search(&store, &SearchRequest::new("PLOY", "en")).await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_any_term_matches() {
        let store = store_with(&[
            ("a.txt", "cats only"),
            ("b.txt", "dogs only"),
            ("c.txt", "fish"),
        ])
        .await;
        let hits = search(&store, &SearchRequest::new("cats dogs", "en")).await.unwrap();
        let sources: Vec<&str> = hits.iter().map(|s| s.source.as_str()).collect();
        assert_eq!(sources, vec!["a.txt", "b.txt"]);
    }

    #[tokio::test]
    async fn test_results_bounded_and_ordered() {
        let docs: Vec<(String, String)> = (0..8)
            .map(|i| (format!("doc{}.txt", i), format!("shared term number {}", i)))
            .collect();
        let refs: Vec<(&str, &str)> = docs.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        let store = store_with(&refs).await;

        let hits = search(&store, &SearchRequest::new("shared", "en")).await.unwrap();
        assert_eq!(hits.len(), MAX_RESULTS);
        let sources: Vec<&str> = hits.iter().map(|s| s.source.as_str()).collect();
        assert_eq!(sources, vec!["doc0.txt", "doc1.txt", "doc2.txt", "doc3.txt", "doc4.txt"]);

        let hits = search(&store, &SearchRequest::new("shared", "en").with_limit(50))
            .await
            .unwrap();
        assert_eq!(hits.len(), MAX_RESULTS);

        let hits = search(&store, &SearchRequest::new("shared", "en").with_limit(2))
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn test_every_hit_contains_a_term() {
        let store = store_with(&[
            ("a.txt", "Alpha paragraph mentioning the Orchard at length, well past fifty.\n\nBeta paragraph about something else entirely, also past fifty."),
            ("b.txt", "orchards and vineyards"),
        ])
        .await;
        let query = "ORCHARD vineyard";
        let terms = query_terms(query);
        let hits = search(&store, &SearchRequest::new(query, "en")).await.unwrap();
        assert_eq!(hits.len(), 2);
        for hit in hits {
            let content = hit.content.to_lowercase();
            assert!(terms.iter().any(|t| content.contains(t.as_str())));
        }
    }

    #[tokio::test]
    async fn test_language_does_not_filter() {
        let store = store_with(&[("a.txt", "hola mundo")]).await;
        let en = search(&store, &SearchRequest::new("hola", "en")).await.unwrap();
        let fr = search(&store, &SearchRequest::new("hola", "fr")).await.unwrap();
        assert_eq!(en, fr);
        assert_eq!(en.len(), 1);
    }

    #[tokio::test]
    async fn test_no_match_is_empty_not_error() {
        let store = store_with(&[("a.txt", "hello")]).await;
        assert!(search(&store, &SearchRequest::new("absent", "en")).await.unwrap().is_empty());
    }
}
