//! In-memory data stores backing the API.
//!
//! Each store sits behind its own `tokio::sync::RwLock`; every mutation runs
//! to completion inside one write guard.

pub mod lawyers;
pub mod profiles;
pub mod resources;
pub mod topics;
pub mod tree;

pub use lawyers::{LawyerDirectory, LawyerFilter};
pub use profiles::ProfileStore;
pub use resources::{InMemoryResourceRepository, ResourceFilter, ResourceRepository};
pub use topics::{InMemoryTopicRepository, TopicRepository};
pub use tree::{ReplyDraft, ReplyForest, TopicDraft, VoteDelta, MAX_REPLY_DEPTH};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("topic {0} not found")]
    TopicNotFound(String),
    #[error("reply {reply_id} not found in topic {topic_id}")]
    ReplyNotFound { topic_id: String, reply_id: String },
    #[error("parent reply {parent_id} not found in topic {topic_id}")]
    ParentNotFound { topic_id: String, parent_id: String },
    #[error("reply {0} cannot be its own parent")]
    SelfParent(String),
    #[error("replies cannot nest deeper than {max} levels")]
    TooDeep { max: usize },
    #[error("identifier {0} is already in use")]
    DuplicateId(String),
    #[error("resource {0} not found")]
    ResourceNotFound(String),
    #[error("no hosted file for resource {0}")]
    FileNotFound(String),
    #[error("lawyer {0} not found")]
    LawyerNotFound(String),
}
