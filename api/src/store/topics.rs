//! Repository seam between the community service and topic storage.

use async_trait::async_trait;
use lawsphere_shared::{Reply, Topic, TopicSummary};
use tokio::sync::RwLock;

use super::{ReplyDraft, ReplyForest, StoreError, TopicDraft, VoteDelta};

#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// Every topic, newest first.
    async fn list(&self) -> Result<Vec<TopicSummary>, StoreError>;

    async fn find(&self, topic_id: &str) -> Result<Topic, StoreError>;

    async fn create(&self, draft: TopicDraft) -> Result<Topic, StoreError>;

    /// Appends a reply at the top level or under `parent_id`, which must be
    /// a reply of the same topic.
    async fn add_reply(
        &self,
        topic_id: &str,
        parent_id: Option<&str>,
        draft: ReplyDraft,
    ) -> Result<Reply, StoreError>;

    /// Applies one vote and returns the new score.
    async fn vote_topic(&self, topic_id: &str, delta: VoteDelta) -> Result<i64, StoreError>;

    async fn vote_reply(
        &self,
        topic_id: &str,
        reply_id: &str,
        delta: VoteDelta,
    ) -> Result<i64, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryTopicRepository {
    forest: RwLock<ReplyForest>,
}

impl InMemoryTopicRepository {
    pub fn new(forest: ReplyForest) -> Self {
        Self {
            forest: RwLock::new(forest),
        }
    }
}

#[async_trait]
impl TopicRepository for InMemoryTopicRepository {
    async fn list(&self) -> Result<Vec<TopicSummary>, StoreError> {
        Ok(self.forest.read().await.summaries())
    }

    async fn find(&self, topic_id: &str) -> Result<Topic, StoreError> {
        self.forest.read().await.topic(topic_id)
    }

    async fn create(&self, draft: TopicDraft) -> Result<Topic, StoreError> {
        self.forest.write().await.insert_topic(draft)
    }

    async fn add_reply(
        &self,
        topic_id: &str,
        parent_id: Option<&str>,
        draft: ReplyDraft,
    ) -> Result<Reply, StoreError> {
        self.forest
            .write()
            .await
            .insert_reply(topic_id, parent_id, draft)
    }

    async fn vote_topic(&self, topic_id: &str, delta: VoteDelta) -> Result<i64, StoreError> {
        self.forest.write().await.vote_topic(topic_id, delta)
    }

    async fn vote_reply(
        &self,
        topic_id: &str,
        reply_id: &str,
        delta: VoteDelta,
    ) -> Result<i64, StoreError> {
        self.forest
            .write()
            .await
            .vote_reply(topic_id, reply_id, delta)
    }
}
