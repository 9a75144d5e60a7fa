//! Persistence gateway.
//!
//! The service layer talks to storage only through [`RecommendationStore`]
//! and [`ProfileStore`], so the advisor and service can be exercised against
//! [`MemoryStore`] without a database.

mod memory;
mod sqlite;

pub use memory::*;
pub use sqlite::*;

use async_trait::async_trait;
use thiserror::Error;

use crate::db::DbError;
use crate::models::{NewRecommendation, ProfileUpdate, StoredRecommendation, UserProfile};

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        StoreError::Unavailable(format!("Lock poisoned: {}", e))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed store for recommendation history.
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    /// Save a recommendation for a user and return its new ID.
    async fn save(&self, user_id: &str, input: &NewRecommendation) -> StoreResult<String>;

    /// A user's recommendations, newest first.
    async fn list_by_user(&self, user_id: &str) -> StoreResult<Vec<StoredRecommendation>>;

    /// One of a user's recommendations.
    async fn get_by_id(&self, id: &str, user_id: &str) -> StoreResult<Option<StoredRecommendation>>;

    /// Delete one of a user's recommendations. Returns false (no-op) when the
    /// user owns no record with that ID.
    async fn delete_by_id(&self, id: &str, user_id: &str) -> StoreResult<bool>;
}

/// Keyed store for user profiles.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, user_id: &str) -> StoreResult<Option<UserProfile>>;

    /// Apply an update and return the stored profile.
    async fn update_profile(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> StoreResult<UserProfile>;
}
