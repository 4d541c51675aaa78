use std::collections::HashMap;

use lawsphere_shared::{ForumCategory, Lawyer, Resource, Topic};
use serde::Deserialize;

use crate::store::{ReplyForest, StoreError};

const TOPICS: &str = include_str!("../seed/topics.json");
const RESOURCES: &str = include_str!("../seed/resources.json");
const LAWYERS: &str = include_str!("../seed/lawyers.json");
const CATEGORIES: &str = include_str!("../seed/categories.json");

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("malformed {file} seed: {source}")]
    Malformed {
        file: &'static str,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceSeed {
    resources: Vec<Resource>,
    hosted_files: HashMap<String, String>,
}

#[derive(Deserialize)]
struct CategorySeed {
    forum: Vec<ForumCategory>,
    resources: Vec<String>,
}

/// Everything the stores start with. Nothing is written back; a restart
/// returns to this state.
#[derive(Debug)]
pub struct Database {
    pub topics: ReplyForest,
    pub resources: Vec<Resource>,
    pub hosted_files: HashMap<String, String>,
    pub lawyers: Vec<Lawyer>,
    pub forum_categories: Vec<ForumCategory>,
    pub resource_categories: Vec<String>,
}

impl Database {
    pub fn seeded() -> Result<Self, SeedError> {
        let topics: Vec<Topic> = parse("topics", TOPICS)?;
        let resources: ResourceSeed = parse("resources", RESOURCES)?;
        let categories: CategorySeed = parse("categories", CATEGORIES)?;

        Ok(Self {
            topics: ReplyForest::load(topics)?,
            resources: resources.resources,
            hosted_files: resources.hosted_files,
            lawyers: parse("lawyers", LAWYERS)?,
            forum_categories: categories.forum,
            resource_categories: categories.resources,
        })
    }
}

fn parse<T: serde::de::DeserializeOwned>(file: &'static str, raw: &str) -> Result<T, SeedError> {
    serde_json::from_str(raw).map_err(|source| SeedError::Malformed { file, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_files_load() {
        let db = Database::seeded().expect("seed");
        assert_eq!(db.topics.len(), 4);
        assert_eq!(db.resources.len(), 11);
        assert_eq!(db.lawyers.len(), 5);
        assert_eq!(db.forum_categories.len(), 4);
        assert!(db.resource_categories.contains(&"Civil Rights".to_string()));

        let first = db.topics.topic("1").expect("topic 1");
        assert_eq!(first.replies.len(), 2);
        assert_eq!(first.vote_score, 12);
    }
}
