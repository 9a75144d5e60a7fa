//! In-memory store for tests and offline use.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ProfileStore, RecommendationStore, StoreError, StoreResult};
use crate::models::{
    timestamp_now, NewRecommendation, ProfileUpdate, StoredRecommendation, UserProfile,
};

#[derive(Default)]
struct MemoryState {
    /// Records in insertion order
    records: Vec<StoredRecommendation>,
    profiles: HashMap<String, UserProfile>,
}

/// Store that keeps everything in process memory.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a profile.
    pub fn insert_profile(&self, profile: UserProfile) -> StoreResult<()> {
        let mut state = self.state.lock()?;
        state.profiles.insert(profile.id.clone(), profile);
        Ok(())
    }

    /// Total records across all users.
    pub fn len(&self) -> usize {
        self.state.lock().map(|s| s.records.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecommendationStore for MemoryStore {
    async fn save(&self, user_id: &str, input: &NewRecommendation) -> StoreResult<String> {
        let record = StoredRecommendation::from_new(
            uuid::Uuid::new_v4().to_string(),
            user_id.to_string(),
            timestamp_now(),
            input.clone(),
        );
        let id = record.id.clone();

        let mut state = self.state.lock()?;
        state.records.push(record);
        Ok(id)
    }

    async fn list_by_user(&self, user_id: &str) -> StoreResult<Vec<StoredRecommendation>> {
        let state = self.state.lock()?;
        let mut records: Vec<StoredRecommendation> = state
            .records
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        // Stable sort keeps later inserts first on equal timestamps.
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn get_by_id(
        &self,
        id: &str,
        user_id: &str,
    ) -> StoreResult<Option<StoredRecommendation>> {
        let state = self.state.lock()?;
        Ok(state
            .records
            .iter()
            .find(|r| r.id == id && r.user_id == user_id)
            .cloned())
    }

    async fn delete_by_id(&self, id: &str, user_id: &str) -> StoreResult<bool> {
        let mut state = self.state.lock()?;
        let before = state.records.len();
        state.records.retain(|r| !(r.id == id && r.user_id == user_id));
        Ok(state.records.len() < before)
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get_profile(&self, user_id: &str) -> StoreResult<Option<UserProfile>> {
        let state = self.state.lock()?;
        Ok(state.profiles.get(user_id).cloned())
    }

    async fn update_profile(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> StoreResult<UserProfile> {
        let mut state = self.state.lock()?;
        let profile = state
            .profiles
            .get_mut(user_id)
            .ok_or_else(|| StoreError::NotFound(format!("profile {}", user_id)))?;
        profile.apply(update);
        Ok(profile.clone())
    }
}
