//! Topic and reply lifecycle plus vote handling for the community forum.
//!
//! Handlers call into [`Community`]; it assigns identifiers, snapshots the
//! author, writes through the [`TopicRepository`] and reports each
//! successful mutation to the injected [`Notifier`].

use std::sync::Arc;

use chrono::Utc;
use lawsphere_shared::{
    Author, CommunityEvent, CreateReply, CreateTopic, Reply, Topic, TopicSummary,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::Identity,
    error::ApiError,
    notify::{Notification, Notifier},
    store::{ProfileStore, ReplyDraft, TopicDraft, TopicRepository, VoteDelta},
};

#[derive(Clone)]
pub struct Community {
    topics: Arc<dyn TopicRepository>,
    profiles: Arc<ProfileStore>,
    notifier: Arc<dyn Notifier>,
}

impl Community {
    pub fn new(
        topics: Arc<dyn TopicRepository>,
        profiles: Arc<ProfileStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            topics,
            profiles,
            notifier,
        }
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Topics newest first, optionally restricted to one category.
    pub async fn list_topics(&self, category: Option<&str>) -> Result<Vec<TopicSummary>, ApiError> {
        let topics = self
            .topics
            .list()
            .await
            .map_err(|e| ApiError::internal("retrieving topics", e))?;
        Ok(match category.filter(|c| !c.is_empty() && *c != "all") {
            Some(category) => {
                // new topics store the sanitised name, seeded ones the raw name
                let cleaned = ammonia::clean(category);
                topics
                    .into_iter()
                    .filter(|t| t.category == category || t.category == cleaned)
                    .collect()
            }
            None => topics,
        })
    }

    pub async fn topic(&self, topic_id: &str) -> Result<Topic, ApiError> {
        Ok(self.topics.find(topic_id).await?)
    }

    pub async fn create_topic(
        &self,
        identity: &Identity,
        input: CreateTopic,
    ) -> Result<Topic, ApiError> {
        let title = ammonia::clean(&input.title);
        let content = ammonia::clean(&input.content);
        let category = ammonia::clean(&input.category).trim().to_string();
        if title.trim().is_empty() || content.trim().is_empty() || category.is_empty() {
            return Err(ApiError::InvalidRequest(
                "Title, category and content are required".to_string(),
            ));
        }

        let draft = TopicDraft {
            id: Uuid::new_v4().to_string(),
            title: title.trim().to_string(),
            category,
            content: content.trim().to_string(),
            // anonymity is a display flag; the stored author stays intact
            author: self.author_of(identity).await,
            anonymous: input.anonymous,
            created_at: Utc::now(),
        };
        let topic = self.topics.create(draft).await?;
        info!(topic_id = %topic.id, category = %topic.category, "topic created");

        self.notifier.publish(Notification::broadcast(CommunityEvent::NewTopic(
            summarize(&topic),
        )));
        Ok(topic)
    }

    pub async fn add_reply(
        &self,
        topic_id: &str,
        identity: &Identity,
        input: CreateReply,
    ) -> Result<Reply, ApiError> {
        let content = ammonia::clean(&input.content);
        if content.trim().is_empty() {
            return Err(ApiError::InvalidRequest("Reply content is required".to_string()));
        }
        let parent_id = input.parent_id.filter(|p| !p.is_empty());

        let author = if input.anonymous {
            Author::anonymous()
        } else {
            self.author_of(identity).await
        };
        let draft = ReplyDraft {
            id: Uuid::new_v4().to_string(),
            content: content.trim().to_string(),
            author,
            anonymous: input.anonymous,
            created_at: Utc::now(),
        };
        let reply = self
            .topics
            .add_reply(topic_id, parent_id.as_deref(), draft)
            .await?;
        info!(topic_id, reply_id = %reply.id, ?parent_id, "reply added");

        self.notifier.publish(Notification::to_topic(
            topic_id,
            CommunityEvent::NewReply {
                topic_id: topic_id.to_string(),
                reply: reply.clone(),
                parent_id,
            },
        ));
        Ok(reply)
    }

    pub async fn vote_topic(&self, topic_id: &str, delta: VoteDelta) -> Result<i64, ApiError> {
        let vote_score = self.topics.vote_topic(topic_id, delta).await?;
        info!(topic_id, vote = delta.label(), vote_score, "topic vote registered");

        // list pages show topic scores, so this one goes to everybody
        self.notifier.publish(Notification::broadcast(
            CommunityEvent::TopicVoteUpdate {
                topic_id: topic_id.to_string(),
                vote_score,
            },
        ));
        Ok(vote_score)
    }

    pub async fn vote_reply(
        &self,
        topic_id: &str,
        reply_id: &str,
        delta: VoteDelta,
    ) -> Result<i64, ApiError> {
        let vote_score = self.topics.vote_reply(topic_id, reply_id, delta).await?;
        info!(topic_id, reply_id, vote = delta.label(), vote_score, "reply vote registered");

        self.notifier.publish(Notification::to_topic(
            topic_id,
            CommunityEvent::ReplyVoteUpdate {
                topic_id: topic_id.to_string(),
                reply_id: reply_id.to_string(),
                vote_score,
            },
        ));
        Ok(vote_score)
    }

    async fn author_of(&self, identity: &Identity) -> Author {
        self.profiles.get_or_create(identity).await.author()
    }
}

fn summarize(topic: &Topic) -> TopicSummary {
    TopicSummary {
        id: topic.id.clone(),
        title: topic.title.clone(),
        category: topic.category.clone(),
        content: topic.content.clone(),
        author: topic.author.clone(),
        anonymous: topic.anonymous,
        replies: topic.replies.len(),
        total_replies: topic.replies.len(),
        views: topic.views,
        vote_score: topic.vote_score,
        created_at: topic.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use lawsphere_shared::UpdateProfile;
    use tokio::sync::broadcast;

    use crate::store::{InMemoryTopicRepository, ReplyForest};

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<Notification>>,
    }

    impl RecordingNotifier {
        fn names(&self) -> Vec<(&'static str, Option<String>)> {
            self.sent
                .lock()
                .expect("lock")
                .iter()
                .map(|n| (n.name(), n.channel.clone()))
                .collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn publish(&self, notification: Notification) {
            self.sent.lock().expect("lock").push(notification);
        }

        fn subscribe(&self) -> Option<broadcast::Receiver<Notification>> {
            None
        }
    }

    fn identity() -> Identity {
        Identity {
            id: "u-1".to_string(),
            name: "Meera Krishnan".to_string(),
            email: None,
            profile_image: None,
        }
    }

    fn community() -> (Community, Arc<RecordingNotifier>, Arc<ProfileStore>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let profiles = Arc::new(ProfileStore::new());
        let community = Community::new(
            Arc::new(InMemoryTopicRepository::new(ReplyForest::new())),
            profiles.clone(),
            notifier.clone(),
        );
        (community, notifier, profiles)
    }

    fn new_topic(title: &str) -> CreateTopic {
        CreateTopic {
            title: title.to_string(),
            category: "Family Law".to_string(),
            content: "C".to_string(),
            anonymous: false,
        }
    }

    fn reply(content: &str, parent_id: Option<&str>) -> CreateReply {
        CreateReply {
            content: content.to_string(),
            parent_id: parent_id.map(str::to_string),
            anonymous: false,
        }
    }

    #[tokio::test]
    async fn nested_reply_vote_scenario() {
        let (community, notifier, _) = community();
        let me = identity();

        let topic = community.create_topic(&me, new_topic("T1")).await.expect("topic");
        let r1 = community
            .add_reply(&topic.id, &me, reply("R1", None))
            .await
            .expect("r1");
        let r2 = community
            .add_reply(&topic.id, &me, reply("R2", Some(&r1.id)))
            .await
            .expect("r2");
        assert_eq!(
            community.vote_reply(&topic.id, &r2.id, VoteDelta::Up).await.expect("vote"),
            1
        );

        let stored = community.topic(&topic.id).await.expect("detail");
        assert_eq!(stored.replies[0].vote_score, 0);
        assert_eq!(stored.replies[0].replies[0].vote_score, 1);

        let channel = Some(format!("topic-{}", topic.id));
        assert_eq!(
            notifier.names(),
            vec![
                ("new-topic", None),
                ("new-reply", channel.clone()),
                ("new-reply", channel.clone()),
                ("reply-vote-update", channel),
            ]
        );
    }

    #[tokio::test]
    async fn failed_mutations_publish_nothing() {
        let (community, notifier, _) = community();
        let me = identity();

        let err = community
            .add_reply("missing", &me, reply("R", None))
            .await
            .expect_err("unknown topic");
        assert!(matches!(err, ApiError::NotFound(_)));
        assert!(community.vote_topic("missing", VoteDelta::Up).await.is_err());
        assert!(notifier.names().is_empty());
    }

    #[tokio::test]
    async fn blank_content_is_rejected() {
        let (community, _, _) = community();
        let err = community
            .create_topic(&identity(), new_topic("   "))
            .await
            .expect_err("blank title");
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn author_is_a_snapshot_of_the_profile() {
        let (community, _, profiles) = community();
        let me = identity();

        let topic = community.create_topic(&me, new_topic("T1")).await.expect("topic");
        profiles
            .update(
                &me,
                UpdateProfile {
                    name: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await;
        let later = community.create_topic(&me, new_topic("T2")).await.expect("topic");

        assert_eq!(community.topic(&topic.id).await.expect("t1").author.name, "Meera Krishnan");
        assert_eq!(later.author.name, "Renamed");
    }

    #[tokio::test]
    async fn anonymous_reply_hides_author_but_topic_keeps_it() {
        let (community, _, _) = community();
        let me = identity();

        let mut input = new_topic("T1");
        input.anonymous = true;
        let topic = community.create_topic(&me, input).await.expect("topic");
        assert!(topic.anonymous);
        assert_eq!(topic.author.name, "Meera Krishnan");

        let mut input = reply("quiet", None);
        input.anonymous = true;
        let reply = community.add_reply(&topic.id, &me, input).await.expect("reply");
        assert_eq!(reply.author, Author::anonymous());
    }

    #[tokio::test]
    async fn category_filter_narrows_list() {
        let (community, _, _) = community();
        let me = identity();
        community.create_topic(&me, new_topic("T1")).await.expect("t1");
        let mut other = new_topic("T2");
        other.category = "Small Claims".to_string();
        community.create_topic(&me, other).await.expect("t2");

        assert_eq!(community.list_topics(None).await.expect("all").len(), 2);
        assert_eq!(community.list_topics(Some("all")).await.expect("all").len(), 2);
        let claims = community.list_topics(Some("Small Claims")).await.expect("claims");
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].title, "T2");
    }

    #[tokio::test]
    async fn category_markup_is_stripped() {
        let (community, _, _) = community();
        let mut input = new_topic("T1");
        input.category = "<script>alert(1)</script>Small Claims".to_string();

        let topic = community.create_topic(&identity(), input).await.expect("topic");
        assert_eq!(topic.category, "Small Claims");

        let mut input = new_topic("T2");
        input.category = "<script></script>".to_string();
        let err = community
            .create_topic(&identity(), input)
            .await
            .expect_err("category empty once cleaned");
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }
}
