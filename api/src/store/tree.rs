//! Arena holding every topic and reply of the community forum.
//!
//! Nodes live in flat maps keyed by identifier. Each topic and reply keeps
//! the ordered ids of its direct children, so a nested reply is reached in
//! one index lookup instead of a descent from the root. Ownership is checked
//! against the node's recorded topic, which keeps a parent id from another
//! topic from ever matching.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use lawsphere_shared::{Author, Reply, Topic, TopicSummary};

use super::StoreError;

/// Deepest allowed reply; top-level replies sit at depth 1. Reads rebuild
/// and serialise the tree recursively, so nesting has to stay bounded.
pub const MAX_REPLY_DEPTH: usize = 64;

/// Direction of a single vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDelta {
    Up,
    Down,
}

impl VoteDelta {
    pub fn value(self) -> i64 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Up => "Upvote",
            Self::Down => "Downvote",
        }
    }
}

/// Fields of a topic fixed at creation.
#[derive(Debug, Clone)]
pub struct TopicDraft {
    pub id: String,
    pub title: String,
    pub category: String,
    pub content: String,
    pub author: Author,
    pub anonymous: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields of a reply fixed at creation.
#[derive(Debug, Clone)]
pub struct ReplyDraft {
    pub id: String,
    pub content: String,
    pub author: Author,
    pub anonymous: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct TopicNode {
    draft: TopicDraft,
    views: u64,
    vote_score: i64,
    children: Vec<String>,
}

#[derive(Debug, Clone)]
struct ReplyNode {
    draft: ReplyDraft,
    topic_id: String,
    depth: usize,
    vote_score: i64,
    children: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ReplyForest {
    // newest first
    order: VecDeque<String>,
    topics: HashMap<String, TopicNode>,
    replies: HashMap<String, ReplyNode>,
}

impl ReplyForest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a forest from fully materialised topics, keeping the given
    /// order for listing and the stored counters.
    pub fn load(topics: Vec<Topic>) -> Result<Self, StoreError> {
        let mut forest = Self::new();
        for topic in topics {
            if forest.topics.contains_key(&topic.id) {
                return Err(StoreError::DuplicateId(topic.id));
            }
            let mut children = Vec::with_capacity(topic.replies.len());
            for reply in topic.replies {
                children.push(forest.load_reply(&topic.id, 1, reply)?);
            }
            forest.order.push_back(topic.id.clone());
            forest.topics.insert(
                topic.id.clone(),
                TopicNode {
                    draft: TopicDraft {
                        id: topic.id,
                        title: topic.title,
                        category: topic.category,
                        content: topic.content,
                        author: topic.author,
                        anonymous: topic.anonymous,
                        created_at: topic.created_at,
                    },
                    views: topic.views,
                    vote_score: topic.vote_score,
                    children,
                },
            );
        }
        Ok(forest)
    }

    fn load_reply(
        &mut self,
        topic_id: &str,
        depth: usize,
        reply: Reply,
    ) -> Result<String, StoreError> {
        if depth > MAX_REPLY_DEPTH {
            return Err(StoreError::TooDeep {
                max: MAX_REPLY_DEPTH,
            });
        }
        if self.replies.contains_key(&reply.id) {
            return Err(StoreError::DuplicateId(reply.id));
        }
        let mut children = Vec::with_capacity(reply.replies.len());
        for nested in reply.replies {
            children.push(self.load_reply(topic_id, depth + 1, nested)?);
        }
        let id = reply.id.clone();
        self.replies.insert(
            id.clone(),
            ReplyNode {
                draft: ReplyDraft {
                    id: reply.id,
                    content: reply.content,
                    author: reply.author,
                    anonymous: reply.anonymous,
                    created_at: reply.created_at,
                },
                topic_id: topic_id.to_string(),
                depth,
                vote_score: reply.vote_score,
                children,
            },
        );
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// List view of every topic, newest first.
    pub fn summaries(&self) -> Vec<TopicSummary> {
        self.order
            .iter()
            .filter_map(|id| self.topics.get(id))
            .map(|node| self.summarize(node))
            .collect()
    }

    fn summarize(&self, node: &TopicNode) -> TopicSummary {
        let draft = &node.draft;
        TopicSummary {
            id: draft.id.clone(),
            title: draft.title.clone(),
            category: draft.category.clone(),
            content: draft.content.clone(),
            author: draft.author.clone(),
            anonymous: draft.anonymous,
            replies: node.children.len(),
            total_replies: Preorder::new(self, &node.children).count(),
            views: node.views,
            vote_score: node.vote_score,
            created_at: draft.created_at,
        }
    }

    /// Full topic with its reply tree in insertion order at every level.
    pub fn topic(&self, topic_id: &str) -> Result<Topic, StoreError> {
        let node = self.topic_node(topic_id)?;
        let draft = &node.draft;
        Ok(Topic {
            id: draft.id.clone(),
            title: draft.title.clone(),
            category: draft.category.clone(),
            content: draft.content.clone(),
            author: draft.author.clone(),
            anonymous: draft.anonymous,
            replies: node
                .children
                .iter()
                .filter_map(|id| self.materialize(id))
                .collect(),
            views: node.views,
            vote_score: node.vote_score,
            created_at: draft.created_at,
        })
    }

    /// Materialised reply subtree rooted at `reply_id`.
    pub fn reply(&self, topic_id: &str, reply_id: &str) -> Result<Reply, StoreError> {
        self.topic_node(topic_id)?;
        self.replies
            .get(reply_id)
            .filter(|node| node.topic_id == topic_id)
            .and_then(|_| self.materialize(reply_id))
            .ok_or_else(|| StoreError::ReplyNotFound {
                topic_id: topic_id.to_string(),
                reply_id: reply_id.to_string(),
            })
    }

    fn materialize(&self, reply_id: &str) -> Option<Reply> {
        let node = self.replies.get(reply_id)?;
        let draft = &node.draft;
        Some(Reply {
            id: draft.id.clone(),
            content: draft.content.clone(),
            author: draft.author.clone(),
            anonymous: draft.anonymous,
            vote_score: node.vote_score,
            created_at: draft.created_at,
            replies: node
                .children
                .iter()
                .filter_map(|id| self.materialize(id))
                .collect(),
        })
    }

    /// Adds a topic in front of every existing one.
    pub fn insert_topic(&mut self, draft: TopicDraft) -> Result<Topic, StoreError> {
        if self.topics.contains_key(&draft.id) {
            return Err(StoreError::DuplicateId(draft.id));
        }
        let id = draft.id.clone();
        self.topics.insert(
            id.clone(),
            TopicNode {
                draft,
                views: 0,
                vote_score: 0,
                children: Vec::new(),
            },
        );
        self.order.push_front(id.clone());
        self.topic(&id)
    }

    /// Appends a reply to the topic, or to `parent_id` when given. The parent
    /// must belong to `topic_id` and sit above [`MAX_REPLY_DEPTH`].
    pub fn insert_reply(
        &mut self,
        topic_id: &str,
        parent_id: Option<&str>,
        draft: ReplyDraft,
    ) -> Result<Reply, StoreError> {
        self.topic_node(topic_id)?;
        if parent_id == Some(draft.id.as_str()) {
            return Err(StoreError::SelfParent(draft.id));
        }
        if self.replies.contains_key(&draft.id) {
            return Err(StoreError::DuplicateId(draft.id));
        }

        let id = draft.id.clone();
        let (siblings, depth) = match parent_id {
            Some(parent_id) => {
                let parent = self.owned_reply_mut(topic_id, parent_id).ok_or_else(|| {
                    StoreError::ParentNotFound {
                        topic_id: topic_id.to_string(),
                        parent_id: parent_id.to_string(),
                    }
                })?;
                if parent.depth >= MAX_REPLY_DEPTH {
                    return Err(StoreError::TooDeep {
                        max: MAX_REPLY_DEPTH,
                    });
                }
                (&mut parent.children, parent.depth + 1)
            }
            None => (&mut self.topic_node_mut(topic_id)?.children, 1),
        };
        siblings.push(id.clone());

        self.replies.insert(
            id.clone(),
            ReplyNode {
                draft,
                topic_id: topic_id.to_string(),
                depth,
                vote_score: 0,
                children: Vec::new(),
            },
        );
        self.reply(topic_id, &id)
    }

    /// Applies one vote. The score is unbounded in practice; `saturating_add`
    /// only pins it at the `i64` limits instead of wrapping.
    pub fn vote_topic(&mut self, topic_id: &str, delta: VoteDelta) -> Result<i64, StoreError> {
        let node = self.topic_node_mut(topic_id)?;
        node.vote_score = node.vote_score.saturating_add(delta.value());
        Ok(node.vote_score)
    }

    /// Same as [`Self::vote_topic`] for a reply of `topic_id`.
    pub fn vote_reply(
        &mut self,
        topic_id: &str,
        reply_id: &str,
        delta: VoteDelta,
    ) -> Result<i64, StoreError> {
        self.topic_node(topic_id)?;
        let node = self
            .owned_reply_mut(topic_id, reply_id)
            .ok_or_else(|| StoreError::ReplyNotFound {
                topic_id: topic_id.to_string(),
                reply_id: reply_id.to_string(),
            })?;
        node.vote_score = node.vote_score.saturating_add(delta.value());
        Ok(node.vote_score)
    }

    /// Depth-first pre-order walk over a topic's replies: siblings in
    /// insertion order, each node's children before its next sibling.
    #[cfg(test)]
    pub fn preorder(&self, topic_id: &str) -> Result<Preorder<'_>, StoreError> {
        let node = self.topic_node(topic_id)?;
        Ok(Preorder::new(self, &node.children))
    }

    fn topic_node(&self, topic_id: &str) -> Result<&TopicNode, StoreError> {
        self.topics
            .get(topic_id)
            .ok_or_else(|| StoreError::TopicNotFound(topic_id.to_string()))
    }

    fn topic_node_mut(&mut self, topic_id: &str) -> Result<&mut TopicNode, StoreError> {
        self.topics
            .get_mut(topic_id)
            .ok_or_else(|| StoreError::TopicNotFound(topic_id.to_string()))
    }

    fn owned_reply_mut(&mut self, topic_id: &str, reply_id: &str) -> Option<&mut ReplyNode> {
        self.replies
            .get_mut(reply_id)
            .filter(|node| node.topic_id == topic_id)
    }
}

/// Iterator returned by [`ReplyForest::preorder`], yielding reply ids.
pub struct Preorder<'a> {
    forest: &'a ReplyForest,
    stack: Vec<&'a str>,
}

impl<'a> Preorder<'a> {
    fn new(forest: &'a ReplyForest, roots: &'a [String]) -> Self {
        Self {
            forest,
            stack: roots.iter().rev().map(String::as_str).collect(),
        }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        if let Some(node) = self.forest.replies.get(id) {
            self.stack
                .extend(node.children.iter().rev().map(String::as_str));
        }
        Some(id)
    }
}
