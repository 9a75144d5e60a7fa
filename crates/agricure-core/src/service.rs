//! Form → compose → save orchestration.
//!
//! Failures surface to front-ends as fixed, user-facing messages; the
//! underlying cause is logged and kept as the error source.

use std::sync::Arc;

use thiserror::Error;

use crate::advisor::{Advisor, AdvisorError};
use crate::form::{FormError, RecommendationForm};
use crate::models::{AuthUser, ProfileUpdate, Recommendation, StoredRecommendation, UserProfile};
use crate::store::{ProfileStore, RecommendationStore, StoreError};

/// Shown when a recommendation was produced but could not be stored.
pub const NOT_SAVED_WARNING: &str = "Recommendation generated but not saved to history.";

/// Service errors.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error("Failed to generate recommendations. Please try again.")]
    Generation(#[source] AdvisorError),

    #[error("Failed to load recommendation history")]
    History(#[source] StoreError),

    #[error("Failed to delete recommendation")]
    Delete(#[source] StoreError),

    #[error("Failed to load profile data")]
    ProfileLoad(#[source] StoreError),

    #[error("Failed to update profile. Please try again.")]
    ProfileUpdate(#[source] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Whether a generated recommendation reached history.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveStatus {
    Saved { id: String },
    Failed { reason: String },
}

impl SaveStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveStatus::Saved { .. })
    }

    /// User-facing warning, if any.
    pub fn warning(&self) -> Option<&'static str> {
        match self {
            SaveStatus::Saved { .. } => None,
            SaveStatus::Failed { .. } => Some(NOT_SAVED_WARNING),
        }
    }
}

/// Result of a form submission.
#[derive(Debug, Clone)]
pub struct Submission {
    pub recommendation: Recommendation,
    pub saved: SaveStatus,
}

/// Farm operations for a signed-in user.
#[derive(Clone)]
pub struct FarmService {
    advisor: Advisor,
    recommendations: Arc<dyn RecommendationStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl FarmService {
    pub fn new(
        advisor: Advisor,
        recommendations: Arc<dyn RecommendationStore>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            advisor,
            recommendations,
            profiles,
        }
    }

    /// Parse a form, compose a recommendation and save it to history.
    ///
    /// Nothing is stored when composing fails. A failed save still returns
    /// the recommendation, flagged with [`SaveStatus::Failed`].
    pub async fn submit(
        &self,
        user: &AuthUser,
        form: &RecommendationForm,
    ) -> ServiceResult<Submission> {
        let parsed = form.parse()?;

        let recommendation = self
            .advisor
            .compose(&parsed.field, &parsed.soil, parsed.crop_type_code, parsed.soil_type_code)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, user_id = %user.id, "Recommendation generation failed");
                ServiceError::Generation(e)
            })?;

        let input = parsed.to_new_recommendation(recommendation.clone());
        let saved = match self.recommendations.save(&user.id, &input).await {
            Ok(id) => SaveStatus::Saved { id },
            Err(e) => {
                tracing::warn!(error = %e, user_id = %user.id, "Recommendation not saved");
                SaveStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };

        Ok(Submission {
            recommendation,
            saved,
        })
    }

    /// The user's history, newest first.
    pub async fn history(&self, user: &AuthUser) -> ServiceResult<Vec<StoredRecommendation>> {
        self.recommendations
            .list_by_user(&user.id)
            .await
            .map_err(ServiceError::History)
    }

    pub async fn recommendation(
        &self,
        user: &AuthUser,
        id: &str,
    ) -> ServiceResult<Option<StoredRecommendation>> {
        self.recommendations
            .get_by_id(id, &user.id)
            .await
            .map_err(ServiceError::History)
    }

    /// Delete a history record. Returns false when the user owns no such record.
    pub async fn delete(&self, user: &AuthUser, id: &str) -> ServiceResult<bool> {
        self.recommendations
            .delete_by_id(id, &user.id)
            .await
            .map_err(ServiceError::Delete)
    }

    pub async fn profile(&self, user: &AuthUser) -> ServiceResult<Option<UserProfile>> {
        self.profiles
            .get_profile(&user.id)
            .await
            .map_err(ServiceError::ProfileLoad)
    }

    pub async fn update_profile(
        &self,
        user: &AuthUser,
        update: ProfileUpdate,
    ) -> ServiceResult<UserProfile> {
        self.profiles
            .update_profile(&user.id, update)
            .await
            .map_err(ServiceError::ProfileUpdate)
    }
}
