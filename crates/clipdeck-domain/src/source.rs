use crate::clip::{ClipId, ClipItem, ClipType};
use crate::folder::ContainerId;
use async_trait::async_trait;
use clipdeck_core::{EngineError, EngineResult};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Backend queries behind a clip list.
///
/// Results come in display order: pinned clips first, then newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClipSource: Send + Sync {
    /// At most `limit` clips of `container`, starting at `offset`.
    async fn fetch_page(
        &self,
        container: &ContainerId,
        offset: usize,
        limit: usize,
    ) -> EngineResult<Vec<ClipItem>>;

    /// At most `limit` clips across all containers matching `query`. Not
    /// paginated.
    async fn search(&self, query: &str, limit: usize) -> EngineResult<Vec<ClipItem>>;
}

#[async_trait]
impl<T: ClipSource + ?Sized> ClipSource for Arc<T> {
    async fn fetch_page(
        &self,
        container: &ContainerId,
        offset: usize,
        limit: usize,
    ) -> EngineResult<Vec<ClipItem>> {
        (**self).fetch_page(container, offset, limit).await
    }

    async fn search(&self, query: &str, limit: usize) -> EngineResult<Vec<ClipItem>> {
        (**self).search(query, limit).await
    }
}

/// Clip store held in memory, for fixtures and offline replays.
#[derive(Debug, Default)]
pub struct InMemoryClipSource {
    clips: RwLock<Vec<ClipItem>>,
}

impl InMemoryClipSource {
    pub fn new(clips: Vec<ClipItem>) -> Self {
        Self {
            clips: RwLock::new(clips),
        }
    }

    /// `count` unfiled text clips with ids `c1..=c{count}`.
    pub fn synthetic(count: usize) -> Self {
        let clips = (1..=count)
            .map(|n| {
                ClipItem::new(
                    ClipId::new(format!("c{}", n)),
                    ClipType::Text,
                    format!("clip {}", n),
                )
            })
            .collect();
        Self::new(clips)
    }

    pub async fn len(&self) -> usize {
        self.clips.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.clips.read().await.is_empty()
    }

    /// Record a committed drop: `target` becomes the clip's folder.
    pub async fn move_clip(&self, id: &ClipId, target: &ContainerId) -> EngineResult<()> {
        let mut clips = self.clips.write().await;
        let clip = clips
            .iter_mut()
            .find(|clip| &clip.id == id)
            .ok_or_else(|| EngineError::NotFound(format!("clip {}", id)))?;
        clip.folder_id = target.clone();
        Ok(())
    }

    pub async fn set_pinned(&self, id: &ClipId, pinned: bool) -> EngineResult<()> {
        let mut clips = self.clips.write().await;
        let clip = clips
            .iter_mut()
            .find(|clip| &clip.id == id)
            .ok_or_else(|| EngineError::NotFound(format!("clip {}", id)))?;
        clip.is_pinned = pinned;
        Ok(())
    }

    pub async fn delete_clip(&self, id: &ClipId) -> EngineResult<()> {
        let mut clips = self.clips.write().await;
        let before = clips.len();
        clips.retain(|clip| &clip.id != id);
        if clips.len() == before {
            return Err(EngineError::NotFound(format!("clip {}", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl ClipSource for InMemoryClipSource {
    async fn fetch_page(
        &self,
        container: &ContainerId,
        offset: usize,
        limit: usize,
    ) -> EngineResult<Vec<ClipItem>> {
        let clips = self.clips.read().await;
        let mut listed: Vec<&ClipItem> = clips
            .iter()
            .filter(|clip| clip.belongs_to(container))
            .collect();
        listed.sort_by_key(|clip| !clip.is_pinned);
        Ok(listed
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    /// Case-insensitive substring match on the preview text.
    async fn search(&self, query: &str, limit: usize) -> EngineResult<Vec<ClipItem>> {
        let needle = query.to_lowercase();
        let clips = self.clips.read().await;
        let mut found: Vec<&ClipItem> = clips
            .iter()
            .filter(|clip| clip.preview.to_lowercase().contains(&needle))
            .collect();
        found.sort_by_key(|clip| !clip.is_pinned);
        Ok(found.into_iter().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folder::FolderId;

    fn ids(clips: &[ClipItem]) -> Vec<&str> {
        clips.iter().map(|clip| clip.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_pages_in_order() {
        let source = InMemoryClipSource::synthetic(5);
        let first = source.fetch_page(&None, 0, 2).await.unwrap();
        let second = source.fetch_page(&None, 2, 2).await.unwrap();
        let last = source.fetch_page(&None, 4, 2).await.unwrap();

        assert_eq!(ids(&first), vec!["c1", "c2"]);
        assert_eq!(ids(&second), vec!["c3", "c4"]);
        assert_eq!(ids(&last), vec!["c5"]);
        assert!(source.fetch_page(&None, 10, 2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_folder_filter_and_move() {
        let source = InMemoryClipSource::synthetic(4);
        let work: ContainerId = Some(FolderId::from("work"));
        assert!(source.fetch_page(&work, 0, 10).await.unwrap().is_empty());

        source.move_clip(&ClipId::from("c3"), &work).await.unwrap();
        let page = source.fetch_page(&work, 0, 10).await.unwrap();
        assert_eq!(ids(&page), vec!["c3"]);

        // The all-items container still lists every clip.
        assert_eq!(source.fetch_page(&None, 0, 10).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_move_unknown_clip() {
        let source = InMemoryClipSource::synthetic(1);
        let err = source
            .move_clip(&ClipId::from("nope"), &None)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_clip() {
        let source = InMemoryClipSource::synthetic(3);
        source.delete_clip(&ClipId::from("c2")).await.unwrap();
        assert_eq!(source.len().await, 2);
        assert!(source.delete_clip(&ClipId::from("c2")).await.is_err());
    }

    #[tokio::test]
    async fn test_pinned_clips_listed_first() {
        let source = InMemoryClipSource::synthetic(4);
        source.set_pinned(&ClipId::from("c3"), true).await.unwrap();

        let page = source.fetch_page(&None, 0, 10).await.unwrap();
        assert_eq!(ids(&page), vec!["c3", "c1", "c2", "c4"]);

        let pinned = source
            .fetch_page(&Some(FolderId::pinned()), 0, 10)
            .await
            .unwrap();
        assert_eq!(ids(&pinned), vec!["c3"]);
    }

    #[tokio::test]
    async fn test_search_matches_preview() {
        let source = InMemoryClipSource::synthetic(12);
        let found = source.search("CLIP 1", 10).await.unwrap();
        assert_eq!(ids(&found), vec!["c1", "c10", "c11", "c12"]);
        assert_eq!(source.search("clip", 3).await.unwrap().len(), 3);
        assert!(source.search("nothing", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_shared_source_through_arc() {
        let source = Arc::new(InMemoryClipSource::synthetic(3));
        let page = source.fetch_page(&None, 1, 5).await.unwrap();
        assert_eq!(ids(&page), vec!["c2", "c3"]);
    }
}
