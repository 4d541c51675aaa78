//! User profiles keyed by the token subject.

use std::collections::HashMap;

use lawsphere_shared::{UpdateProfile, UserProfile, DEFAULT_PROFILE_IMAGE};
use tokio::sync::RwLock;

use crate::auth::Identity;

#[derive(Debug, Default)]
pub struct ProfileStore {
    profiles: RwLock<HashMap<String, UserProfile>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored profile, creating it from the token identity on
    /// first access.
    pub async fn get_or_create(&self, identity: &Identity) -> UserProfile {
        if let Some(profile) = self.profiles.read().await.get(&identity.id) {
            return profile.clone();
        }
        self.profiles
            .write()
            .await
            .entry(identity.id.clone())
            .or_insert_with(|| from_identity(identity))
            .clone()
    }

    /// Applies the fields present in `update`; blank optional fields clear
    /// the stored value.
    pub async fn update(&self, identity: &Identity, update: UpdateProfile) -> UserProfile {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .entry(identity.id.clone())
            .or_insert_with(|| from_identity(identity));

        if let Some(name) = update.name {
            profile.name = name;
        }
        if let Some(mobile) = update.mobile {
            profile.mobile = non_blank(mobile);
        }
        if let Some(location) = update.location {
            profile.location = non_blank(location);
        }
        if let Some(bio) = update.bio {
            profile.bio = non_blank(bio);
        }
        if let Some(image) = update.profile_image {
            profile.profile_image =
                non_blank(image).unwrap_or_else(|| DEFAULT_PROFILE_IMAGE.to_string());
        }
        profile.clone()
    }
}

fn from_identity(identity: &Identity) -> UserProfile {
    UserProfile {
        id: identity.id.clone(),
        name: identity.name.clone(),
        email: identity.email.clone(),
        mobile: None,
        location: None,
        bio: None,
        profile_image: identity
            .profile_image
            .clone()
            .unwrap_or_else(|| DEFAULT_PROFILE_IMAGE.to_string()),
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
