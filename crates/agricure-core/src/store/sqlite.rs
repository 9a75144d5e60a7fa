//! SQLite-backed store.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{ProfileStore, RecommendationStore, StoreError, StoreResult};
use crate::db::Database;
use crate::models::{
    timestamp_now, NewRecommendation, ProfileUpdate, StoredRecommendation, UserProfile,
};

/// Store backed by the shared SQLite database.
#[derive(Clone)]
pub struct SqliteStore {
    db: Arc<Mutex<Database>>,
}

impl SqliteStore {
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecommendationStore for SqliteStore {
    async fn save(&self, user_id: &str, input: &NewRecommendation) -> StoreResult<String> {
        let record = StoredRecommendation::from_new(
            uuid::Uuid::new_v4().to_string(),
            user_id.to_string(),
            timestamp_now(),
            input.clone(),
        );

        let db = self.db.lock()?;
        db.insert_recommendation(&record)?;
        tracing::info!(
            id = %record.id,
            user_id,
            field = %record.field_name,
            "Saved recommendation"
        );
        Ok(record.id)
    }

    async fn list_by_user(&self, user_id: &str) -> StoreResult<Vec<StoredRecommendation>> {
        let db = self.db.lock()?;
        Ok(db.list_recommendations_for_user(user_id)?)
    }

    async fn get_by_id(
        &self,
        id: &str,
        user_id: &str,
    ) -> StoreResult<Option<StoredRecommendation>> {
        let db = self.db.lock()?;
        Ok(db.get_recommendation(id, user_id)?)
    }

    async fn delete_by_id(&self, id: &str, user_id: &str) -> StoreResult<bool> {
        let db = self.db.lock()?;
        let deleted = db.delete_recommendation(id, user_id)?;
        if deleted {
            tracing::info!(id, user_id, "Deleted recommendation");
        } else {
            tracing::debug!(id, user_id, "No owned recommendation to delete");
        }
        Ok(deleted)
    }
}

#[async_trait]
impl ProfileStore for SqliteStore {
    async fn get_profile(&self, user_id: &str) -> StoreResult<Option<UserProfile>> {
        let db = self.db.lock()?;
        Ok(db.get_profile(user_id)?)
    }

    async fn update_profile(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> StoreResult<UserProfile> {
        let db = self.db.lock()?;
        let mut profile = db
            .get_profile(user_id)?
            .ok_or_else(|| StoreError::NotFound(format!("profile {}", user_id)))?;
        profile.apply(update);
        db.update_profile(&profile)?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::UserCredentials;
    use crate::models::AuthUser;
    use crate::fixtures::sample_input;

    fn setup_store() -> SqliteStore {
        let mut db = Database::open_in_memory().unwrap();
        let creds = UserCredentials {
            user: AuthUser {
                id: "u1".into(),
                email: "devi@example.com".into(),
            },
            password_hash: "h".into(),
        };
        let profile = UserProfile::new(&creds.user, "Devi".into(), None);
        db.insert_user(&creds, &profile).unwrap();
        SqliteStore::new(Arc::new(Mutex::new(db)))
    }

    #[tokio::test]
    async fn test_save_list_delete() {
        let store = setup_store();
        let input = sample_input("Tank field");

        let first = store.save("u1", &input).await.unwrap();
        let second = store.save("u1", &input).await.unwrap();
        assert_ne!(first, second);

        let listed = store.list_by_user("u1").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second);
        assert_eq!(listed[0].recommendations, input.recommendations);

        assert!(store.get_by_id(&first, "u1").await.unwrap().is_some());
        assert!(store.delete_by_id(&first, "u1").await.unwrap());
        assert!(!store.delete_by_id(&first, "u1").await.unwrap());
        assert_eq!(store.list_by_user("u1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_profile_update() {
        let store = setup_store();
        let updated = store
            .update_profile(
                "u1",
                ProfileUpdate {
                    full_name: "Devi R".into(),
                    farm_size: Some(3.0),
                    farm_size_unit: Some("hectares".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.full_name, "Devi R");

        let fetched = store.get_profile("u1").await.unwrap().unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_profile_update_missing() {
        let store = setup_store();
        let result = store.update_profile("nobody", ProfileUpdate::default()).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }
}
