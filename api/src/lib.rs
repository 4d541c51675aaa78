pub mod auth;
pub mod community;
pub mod config;
pub mod db;
pub mod error;
pub mod forum;
pub mod lawyers;
pub mod notify;
pub mod profile;
pub mod resources;
pub mod store;
pub mod votes;
pub mod ws;

use std::sync::Arc;

use axum::{
    http::{header::InvalidHeaderValue, HeaderValue},
    routing::{get, post, put},
    Router,
};
use lawsphere_shared::ForumCategory;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::TraceLayer,
};

use community::Community;
use config::Config;
use db::Database;
use notify::{BroadcastNotifier, NoopNotifier, Notifier};
use store::{
    InMemoryResourceRepository, InMemoryTopicRepository, LawyerDirectory, ProfileStore,
    ResourceRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub community: Community,
    pub resources: Arc<dyn ResourceRepository>,
    pub lawyers: Arc<LawyerDirectory>,
    pub profiles: Arc<ProfileStore>,
    pub forum_categories: Arc<Vec<ForumCategory>>,
    pub resource_categories: Arc<Vec<String>>,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Self {
        let notifier: Arc<dyn Notifier> = if config.notifications {
            Arc::new(BroadcastNotifier::default())
        } else {
            Arc::new(NoopNotifier)
        };
        let profiles = Arc::new(ProfileStore::new());
        let community = Community::new(
            Arc::new(InMemoryTopicRepository::new(db.topics)),
            profiles.clone(),
            notifier,
        );

        Self {
            config: Arc::new(config),
            community,
            resources: Arc::new(InMemoryResourceRepository::new(
                db.resources,
                db.hosted_files,
            )),
            lawyers: Arc::new(LawyerDirectory::new(db.lawyers)),
            profiles,
            forum_categories: Arc::new(db.forum_categories),
            resource_categories: Arc::new(db.resource_categories),
        }
    }
}

/// Every route, without transport layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(|| async { "ok" }))
        // Community
        .route("/api/community/categories", get(forum::list_categories))
        .route(
            "/api/community/topics",
            get(forum::list_topics).post(forum::create_topic),
        )
        .route("/api/community/topics/{id}", get(forum::get_topic))
        .route(
            "/api/community/topics/{id}/replies",
            post(forum::create_reply),
        )
        .route("/api/community/topics/{id}/upvote", put(votes::upvote_topic))
        .route(
            "/api/community/topics/{id}/downvote",
            put(votes::downvote_topic),
        )
        .route(
            "/api/community/topics/{id}/replies/{reply_id}/upvote",
            put(votes::upvote_reply),
        )
        .route(
            "/api/community/topics/{id}/replies/{reply_id}/downvote",
            put(votes::downvote_reply),
        )
        .route("/api/community/ws", get(ws::subscribe))
        // Resources
        .route("/api/resources", get(resources::list_resources))
        .route("/api/resources/categories", get(resources::list_categories))
        .route("/api/resources/{id}", get(resources::get_resource))
        .route("/api/resources/{id}/view", put(resources::record_view))
        .route(
            "/api/resources/{id}/download",
            put(resources::record_download),
        )
        .route("/api/resources/{id}/file", get(resources::resource_file))
        // Lawyers
        .route("/api/lawyers", get(lawyers::list_lawyers))
        .route("/api/lawyers/{id}", get(lawyers::get_lawyer))
        // Profile
        .route(
            "/api/users/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .with_state(state)
}

/// The served application: routes plus CORS and request tracing.
pub fn app(state: AppState) -> Result<Router, InvalidHeaderValue> {
    let cors = CorsLayer::new()
        .allow_origin(state.config.cors_origin.parse::<HeaderValue>()?)
        .allow_methods(AllowMethods::any())
        .allow_headers(AllowHeaders::any());

    Ok(router(state).layer(cors).layer(TraceLayer::new_for_http()))
}
