//! Append-only interaction log.

use chrono::Utc;

use crate::error::KnowledgeError;
use crate::models::Interaction;
use crate::store::Store;

/// Append an exchange to the log and return the stored record.
pub async fn record_interaction<S: Store + ?Sized>(
    store: &S,
    message: &str,
    language: &str,
    reply: &str,
) -> Result<Interaction, KnowledgeError> {
    let interaction = Interaction {
        id: store.new_interaction_id(),
        message: message.to_string(),
        language: language.to_string(),
        reply: reply.to_string(),
        timestamp: Utc::now(),
    };
    store.append_interaction(&interaction).await?;
    tracing::debug!(interaction_id = %interaction.id, language, "recorded interaction");
    Ok(interaction)
}

/// The log, most recent first.
///
/// Storage keeps insertion order; ordering is applied here at read time.
/// Records with equal timestamps come back latest-inserted first.
pub async fn list_interactions<S: Store + ?Sized>(
    store: &S,
) -> Result<Vec<Interaction>, KnowledgeError> {
    let mut log = store.interactions().await?;
    log.reverse();
    log.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use chrono::{Duration, TimeZone};

    fn at(id: &str, secs: i64) -> Interaction {
        Interaction {
            id: id.to_string(),
            message: format!("message {}", id),
            language: "en".to_string(),
            reply: "ok".to_string(),
            timestamp: Utc.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(secs),
        }
    }

    #[tokio::test]
    async fn test_record_returns_stored_record() {
        let store = InMemoryStore::new();
        let recorded = record_interaction(&store, "hello", "es", "hola").await.unwrap();
        assert!(recorded.id.starts_with("chat-"));
        let log = list_interactions(&store).await.unwrap();
        assert_eq!(log, vec![recorded]);
    }

    #[tokio::test]
    async fn test_sorted_most_recent_first() {
        let store = InMemoryStore::new();
        for record in [at("b", 20), at("a", 10), at("c", 30)] {
            store.append_interaction(&record).await.unwrap();
        }
        let ids: Vec<String> = list_interactions(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec!["c", "b", "a"]);

        let stored: Vec<String> = store
            .interactions()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(stored, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_equal_timestamps_latest_insert_first() {
        let store = InMemoryStore::new();
        for record in [at("first", 0), at("second", 0)] {
            store.append_interaction(&record).await.unwrap();
        }
        let ids: Vec<String> = list_interactions(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec!["second", "first"]);
    }
}
