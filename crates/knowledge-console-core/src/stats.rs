//! Dashboard overview: collection totals and a short recent-activity feed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::KnowledgeError;
use crate::interactions::list_interactions;
use crate::store::Store;

const RECENT_CHATS: usize = 3;
const RECENT_UPLOADS: usize = 2;
const RECENT_ACTIVITY: usize = 5;
const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Chat,
    Upload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleStats {
    pub total_documents: usize,
    pub total_segments: usize,
    pub total_interactions: usize,
    pub recent_activity: Vec<Activity>,
}

/// Totals plus the latest chats and uploads, newest first.
///
/// Document and segment totals come from one catalog snapshot, the
/// interaction total from one log snapshot; the activity feed is built from
/// those same snapshots. The two snapshots are taken separately, so a write
/// landing between them can show up in one and not the other.
pub async fn console_stats<S: Store + ?Sized>(store: &S) -> Result<ConsoleStats, KnowledgeError> {
    let documents = store.list_documents().await?;
    let chats = list_interactions(store).await?;

    let mut activity: Vec<Activity> = chats
        .iter()
        .take(RECENT_CHATS)
        .map(|chat| Activity {
            id: chat.id.clone(),
            kind: ActivityKind::Chat,
            description: format!("Chat: \"{}\"", preview(&chat.message)),
            timestamp: chat.timestamp,
        })
        .collect();

    activity.extend(documents.iter().rev().take(RECENT_UPLOADS).map(|doc| Activity {
        id: doc.id.clone(),
        kind: ActivityKind::Upload,
        description: format!("Uploaded: {}", doc.filename),
        timestamp: doc.uploaded_at,
    }));

    activity.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    activity.truncate(RECENT_ACTIVITY);

    Ok(ConsoleStats {
        total_documents: documents.len(),
        total_segments: documents.iter().map(|d| d.segment_count).sum(),
        total_interactions: chats.len(),
        recent_activity: activity,
    })
}

fn preview(message: &str) -> String {
    if message.chars().count() > PREVIEW_CHARS {
        let head: String = message.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkParams;
    use crate::interactions::record_interaction;
    use crate::registry::ingest_document;
    use crate::store::memory::InMemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_empty_store() {
        let stats = console_stats(&InMemoryStore::new()).await.unwrap();
        assert_eq!(stats.total_documents, 0);
        assert_eq!(stats.total_segments, 0);
        assert_eq!(stats.total_interactions, 0);
        assert!(stats.recent_activity.is_empty());
    }

    #[tokio::test]
    async fn test_totals_and_activity_cap() {
        let store = InMemoryStore::new();
        for name in ["a.txt", "b.txt", "c.txt"] {
            ingest_document(&store, name, &"z".repeat(600), &ChunkParams::default())
                .await
                .unwrap();
        }
        for i in 0..4 {
            record_interaction(&store, &format!("question {}", i), "en", "answer")
                .await
                .unwrap();
        }

        let stats = console_stats(&store).await.unwrap();
        assert_eq!(stats.total_documents, 3);
        assert_eq!(stats.total_segments, 6);
        assert_eq!(stats.total_interactions, 4);
        assert_eq!(stats.recent_activity.len(), 5);

        let chats = stats
            .recent_activity
            .iter()
            .filter(|a| a.kind == ActivityKind::Chat)
            .count();
        assert_eq!(chats, 3);
        assert!(stats
            .recent_activity
            .windows(2)
            .all(|w| w[0].timestamp >= w[1].timestamp));
        assert!(!stats
            .recent_activity
            .iter()
            .any(|a| a.description == "Uploaded: a.txt"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_totals_agree_with_catalog_under_concurrent_ingest() {
        let store = Arc::new(InMemoryStore::new());
        let text = format!("{}\n\n{}", "alpha ".repeat(20), "bravo ".repeat(20));

        let writers: Vec<_> = (0..4)
            .map(|w| {
                let store = Arc::clone(&store);
                let text = text.clone();
                tokio::spawn(async move {
                    for i in 0..25 {
                        let name = format!("w{}-{}.txt", w, i);
                        ingest_document(store.as_ref(), &name, &text, &ChunkParams::default())
                            .await
                            .unwrap();
                    }
                })
            })
            .collect();

        for _ in 0..50 {
            let stats = console_stats(store.as_ref()).await.unwrap();
            assert_eq!(stats.total_segments, 2 * stats.total_documents);
            tokio::task::yield_now().await;
        }
        for writer in writers {
            writer.await.unwrap();
        }

        let stats = console_stats(store.as_ref()).await.unwrap();
        assert_eq!(stats.total_documents, 100);
        assert_eq!(stats.total_segments, 200);
    }

    #[test]
    fn test_preview_truncates_long_messages() {
        assert_eq!(preview("short"), "short");
        let long = "m".repeat(60);
        assert_eq!(preview(&long), format!("{}...", "m".repeat(50)));
    }
}
