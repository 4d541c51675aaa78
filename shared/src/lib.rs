use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Avatar used whenever an author has not set a profile image.
pub const DEFAULT_PROFILE_IMAGE: &str = "/lawyer.png";

// ── Envelopes ──

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            count: None,
            data,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn list(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(data.len()),
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ── Authors ──

/// Display name and avatar copied onto a post when it is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    pub profile_image: String,
}

impl Author {
    pub fn anonymous() -> Self {
        Self {
            name: "Anonymous".to_string(),
            profile_image: DEFAULT_PROFILE_IMAGE.to_string(),
        }
    }
}

// ── Forum ──

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumCategory {
    pub name: String,
    pub icon: String,
    pub topics: u64,
    pub posts: u64,
}

/// Topic as it appears in the list view: `replies` is the number of
/// top-level replies only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    pub id: String,
    pub title: String,
    pub category: String,
    pub content: String,
    #[serde(rename = "user")]
    pub author: Author,
    pub anonymous: bool,
    pub replies: usize,
    pub total_replies: usize,
    pub views: u64,
    pub vote_score: i64,
    pub created_at: DateTime<Utc>,
}

/// Topic detail with the full reply tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub category: String,
    pub content: String,
    #[serde(rename = "user")]
    pub author: Author,
    pub anonymous: bool,
    pub replies: Vec<Reply>,
    pub views: u64,
    pub vote_score: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub id: String,
    pub content: String,
    #[serde(rename = "user")]
    pub author: Author,
    #[serde(default)]
    pub anonymous: bool,
    pub vote_score: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTopic {
    pub title: String,
    pub category: String,
    pub content: String,
    #[serde(default)]
    pub anonymous: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReply {
    pub content: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub anonymous: bool,
}

// ── Votes ──

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub message: String,
    pub vote_score: i64,
}

// ── Notifications ──

/// State change pushed to WebSocket subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum CommunityEvent {
    NewTopic(TopicSummary),
    #[serde(rename_all = "camelCase")]
    NewReply {
        topic_id: String,
        reply: Reply,
        parent_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    TopicVoteUpdate { topic_id: String, vote_score: i64 },
    #[serde(rename_all = "camelCase")]
    ReplyVoteUpdate {
        topic_id: String,
        reply_id: String,
        vote_score: i64,
    },
}

// ── Resources ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceType {
    Guide,
    Template,
    Article,
}

impl ResourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Guide => "Guide",
            Self::Template => "Template",
            Self::Article => "Article",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    pub category: String,
    pub file: Option<String>,
    pub views: u64,
    pub downloads: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewCount {
    pub views: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadCount {
    pub downloads: u64,
}

// ── Lawyers ──

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub graduation_year: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lawyer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub practice_areas: Vec<String>,
    pub service_types: Vec<String>,
    pub education: Vec<Education>,
    pub languages: Vec<String>,
    pub office_address: OfficeAddress,
    pub consultation_fee: u32,
    pub availability: Vec<Availability>,
    pub is_verified: bool,
}

// ── Profiles ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub profile_image: String,
}

impl UserProfile {
    pub fn author(&self) -> Author {
        Author {
            name: self.name.clone(),
            profile_image: self.profile_image.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}
