//! AgriCure Core Library
//!
//! Local-first farm management: accounts, farmer profiles, fertilizer
//! recommendations and their history.
//!
//! # Architecture
//!
//! ```text
//! Recommendation form (raw strings)
//!            │
//!            ▼
//!       Form parsing ──────────────► FormError
//!            │
//!            ▼
//!   ┌────────────────────────────────────────────┐
//!   │                 Advisor                    │
//!   │  Unit Conversion → Prediction ──► Predictor│ (rule table / HTTP endpoint)
//!   │        → Soil Classification               │
//!   │        → Plan Composition                  │
//!   └────────────────────┬───────────────────────┘
//!                        │ Recommendation
//!                        ▼
//!             RecommendationStore::save ──► failure = warning only
//!                        │
//!                        ▼
//!                 History (per user)
//! ```
//!
//! Prediction failure aborts the submission before anything is stored. A
//! failed save still hands the recommendation back to the caller.
//!
//! # Modules
//!
//! - [`models`]: Domain types (FieldSpec, SoilSample, Recommendation, etc.)
//! - [`advisor`]: Unit converter, soil classifier and recommendation composer
//! - [`predict`]: Predictor seam and the built-in rule predictor
//! - [`db`]: SQLite database layer
//! - [`store`]: Persistence gateway traits with SQLite and in-memory stores
//! - [`auth`]: Local accounts, sessions and the session context
//! - [`form`]: Raw form parsing
//! - [`service`]: Submission and history orchestration
//! - [`config`]: TOML configuration

pub mod advisor;
pub mod auth;
pub mod config;
pub mod db;
pub mod form;
pub mod models;
pub mod predict;
pub mod service;
pub mod store;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export commonly used types
pub use advisor::{Advisor, AdvisorError};
pub use auth::{AuthError, Authenticator, SessionContext, SignInData, SignUpData};
pub use config::AppConfig;
pub use db::Database;
pub use form::{FormError, ParsedForm, RecommendationForm};
pub use models::{
    AuthUser, ConfidenceBand, CropType, FieldSpec, NewRecommendation, ProfileUpdate,
    Recommendation, Session, SizeUnit, SoilCondition, SoilSample, SoilType,
    StoredRecommendation, UserProfile,
};
pub use predict::{PredictionError, PredictionFeatures, Predictor, RulePredictor};
pub use service::{FarmService, SaveStatus, ServiceError, Submission};
pub use store::{MemoryStore, ProfileStore, RecommendationStore, SqliteStore, StoreError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum AgriCureError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Not signed in")]
    NotSignedIn,

    #[error("{0}")]
    ServiceError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

impl From<db::DbError> for AgriCureError {
    fn from(e: db::DbError) -> Self {
        AgriCureError::DatabaseError(e.to_string())
    }
}

impl From<AuthError> for AgriCureError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidEmail(_) | AuthError::WeakPassword => {
                AgriCureError::InvalidInput(e.to_string())
            }
            AuthError::EmailTaken | AuthError::InvalidCredentials => {
                AgriCureError::AuthFailed(e.to_string())
            }
            AuthError::Database(_) | AuthError::LockPoisoned(_) => {
                AgriCureError::DatabaseError(e.to_string())
            }
            AuthError::Hash(_) => AgriCureError::RuntimeError(e.to_string()),
        }
    }
}

impl From<ServiceError> for AgriCureError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Form(form) => AgriCureError::InvalidInput(form.to_string()),
            other => AgriCureError::ServiceError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AgriCureError {
    fn from(e: serde_json::Error) -> Self {
        AgriCureError::SerializationError(e.to_string())
    }
}

impl From<std::io::Error> for AgriCureError {
    fn from(e: std::io::Error) -> Self {
        AgriCureError::RuntimeError(e.to_string())
    }
}

// =========================================================================
// Pure Functions (exported to FFI)
// =========================================================================

/// Convert a field size to hectares. Unknown units are returned unchanged.
#[uniffi::export]
pub fn to_hectares(size: f64, unit: String) -> f64 {
    advisor::to_hectares(size, &unit)
}

/// Classify soil readings into pH/moisture status and nutrient deficiencies.
#[uniffi::export]
pub fn classify_soil(
    ph: f64,
    moisture: f64,
    nitrogen: f64,
    phosphorus: f64,
    potassium: f64,
) -> FfiSoilCondition {
    advisor::classify(ph, moisture, nitrogen, phosphorus, potassium).into()
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<AgriCureCore>, AgriCureError> {
    let db = Database::open(&path)?;
    AgriCureCore::with_database(db).map(Arc::new)
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<AgriCureCore>, AgriCureError> {
    let db = Database::open_in_memory()?;
    AgriCureCore::with_database(db).map(Arc::new)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe entry point for native front-ends.
///
/// Every call is synchronous; async service calls are driven on an owned
/// single-threaded runtime. Recommendations use the built-in rule predictor.
#[derive(uniffi::Object)]
pub struct AgriCureCore {
    auth: Authenticator,
    service: FarmService,
    session: SessionContext,
    runtime: tokio::runtime::Runtime,
}

impl AgriCureCore {
    fn with_database(db: Database) -> Result<Self, AgriCureError> {
        Self::with_database_and_cost(db, bcrypt::DEFAULT_COST)
    }

    fn with_database_and_cost(db: Database, bcrypt_cost: u32) -> Result<Self, AgriCureError> {
        let db = Arc::new(Mutex::new(db));
        let store = Arc::new(SqliteStore::new(db.clone()));
        let advisor = Advisor::new(Arc::new(RulePredictor::new()));
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            auth: Authenticator::with_cost(db, bcrypt_cost),
            service: FarmService::new(advisor, store.clone(), store),
            session: SessionContext::new(),
            runtime,
        })
    }

    fn require_user(&self, token: &str) -> Result<AuthUser, AgriCureError> {
        self.auth.current_user(token)?.ok_or(AgriCureError::NotSignedIn)
    }
}

#[uniffi::export]
impl AgriCureCore {
    // =========================================================================
    // Auth Operations
    // =========================================================================

    /// Register a new account.
    pub fn sign_up(
        &self,
        email: String,
        password: String,
        full_name: String,
        farm_location: Option<String>,
    ) -> Result<FfiUser, AgriCureError> {
        let user = self.auth.sign_up(SignUpData {
            email,
            password,
            full_name,
            farm_location,
        })?;
        Ok(user.into())
    }

    /// Sign in and return a session token.
    pub fn sign_in(&self, email: String, password: String) -> Result<FfiSession, AgriCureError> {
        let session = self.auth.sign_in(SignInData { email, password })?;
        self.session.set_user(Some(session.user.clone()));
        Ok(session.into())
    }

    pub fn sign_out(&self, token: String) -> Result<(), AgriCureError> {
        self.auth.sign_out(&token)?;
        self.session.set_user(None);
        Ok(())
    }

    /// User behind a token, if the session is still open.
    pub fn current_user(&self, token: String) -> Result<Option<FfiUser>, AgriCureError> {
        Ok(self.auth.current_user(&token)?.map(|u| u.into()))
    }

    /// Whether any user is signed in through this object.
    pub fn is_signed_in(&self) -> bool {
        self.session.is_signed_in()
    }

    // =========================================================================
    // Profile Operations
    // =========================================================================

    pub fn get_profile(&self, token: String) -> Result<Option<FfiProfile>, AgriCureError> {
        let user = self.require_user(&token)?;
        let profile = self.runtime.block_on(self.service.profile(&user))?;
        Ok(profile.map(|p| p.into()))
    }

    pub fn update_profile(
        &self,
        token: String,
        update: FfiProfileUpdate,
    ) -> Result<FfiProfile, AgriCureError> {
        let user = self.require_user(&token)?;
        let profile = self
            .runtime
            .block_on(self.service.update_profile(&user, update.into()))?;
        Ok(profile.into())
    }

    // =========================================================================
    // Recommendation Operations
    // =========================================================================

    /// Generate a recommendation from the raw form and save it to history.
    pub fn generate_recommendation(
        &self,
        token: String,
        form: FfiRecommendationForm,
    ) -> Result<FfiSubmission, AgriCureError> {
        let user = self.require_user(&token)?;
        let submission = self.runtime.block_on(self.service.submit(&user, &form.into()))?;
        FfiSubmission::try_from(submission)
    }

    /// The user's history, newest first.
    pub fn list_history(&self, token: String) -> Result<Vec<FfiHistoryItem>, AgriCureError> {
        let user = self.require_user(&token)?;
        let records = self.runtime.block_on(self.service.history(&user))?;
        records.into_iter().map(FfiHistoryItem::try_from).collect()
    }

    pub fn get_recommendation(
        &self,
        token: String,
        id: String,
    ) -> Result<Option<FfiHistoryItem>, AgriCureError> {
        let user = self.require_user(&token)?;
        let record = self.runtime.block_on(self.service.recommendation(&user, &id))?;
        record.map(FfiHistoryItem::try_from).transpose()
    }

    /// Delete a history record. Returns false if the user owns no such record.
    pub fn delete_recommendation(&self, token: String, id: String) -> Result<bool, AgriCureError> {
        let user = self.require_user(&token)?;
        Ok(self.runtime.block_on(self.service.delete(&user, &id))?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe soil condition.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiSoilCondition {
    pub ph_status: String,
    pub moisture_status: String,
    pub deficiencies: Vec<String>,
}

impl From<SoilCondition> for FfiSoilCondition {
    fn from(condition: SoilCondition) -> Self {
        Self {
            ph_status: condition.ph_status.to_string(),
            moisture_status: condition.moisture_status.to_string(),
            deficiencies: condition.deficiencies.iter().map(|n| n.to_string()).collect(),
        }
    }
}

/// FFI-safe user.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiUser {
    pub id: String,
    pub email: String,
}

impl From<AuthUser> for FfiUser {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// FFI-safe session.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSession {
    pub token: String,
    pub user: FfiUser,
    pub created_at: String,
}

impl From<Session> for FfiSession {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            user: session.user.into(),
            created_at: session.created_at,
        }
    }
}

/// FFI-safe profile.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiProfile {
    pub id: String,
    pub full_name: String,
    pub display_name: String,
    pub email: String,
    pub farm_location: Option<String>,
    pub phone: Option<String>,
    pub farm_size: Option<f64>,
    pub farm_size_unit: Option<String>,
    pub updated_at: String,
}

impl From<UserProfile> for FfiProfile {
    fn from(profile: UserProfile) -> Self {
        Self {
            display_name: profile.display_name().to_string(),
            id: profile.id,
            full_name: profile.full_name,
            email: profile.email,
            farm_location: profile.farm_location,
            phone: profile.phone,
            farm_size: profile.farm_size,
            farm_size_unit: profile.farm_size_unit,
            updated_at: profile.updated_at,
        }
    }
}

/// FFI-safe profile update.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiProfileUpdate {
    pub full_name: String,
    pub farm_location: Option<String>,
    pub phone: Option<String>,
    pub farm_size: Option<f64>,
    pub farm_size_unit: Option<String>,
}

impl From<FfiProfileUpdate> for ProfileUpdate {
    fn from(update: FfiProfileUpdate) -> Self {
        ProfileUpdate {
            full_name: update.full_name,
            farm_location: update.farm_location,
            phone: update.phone,
            farm_size: update.farm_size,
            farm_size_unit: update.farm_size_unit,
        }
    }
}

/// FFI-safe recommendation form, fields exactly as typed.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecommendationForm {
    pub field_name: String,
    pub field_size: String,
    pub size_unit: String,
    pub crop_type: String,
    pub soil_type: String,
    pub soil_ph: String,
    pub nitrogen: String,
    pub phosphorus: String,
    pub potassium: String,
    pub temperature: String,
    pub humidity: String,
    pub soil_moisture: String,
}

impl From<FfiRecommendationForm> for RecommendationForm {
    fn from(form: FfiRecommendationForm) -> Self {
        RecommendationForm {
            field_name: form.field_name,
            field_size: form.field_size,
            size_unit: form.size_unit,
            crop_type: form.crop_type,
            soil_type: form.soil_type,
            soil_ph: form.soil_ph,
            nitrogen: form.nitrogen,
            phosphorus: form.phosphorus,
            potassium: form.potassium,
            temperature: form.temperature,
            humidity: form.humidity,
            soil_moisture: form.soil_moisture,
        }
    }
}

/// FFI-safe submission result. The full recommendation travels as JSON.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSubmission {
    pub fertilizer: String,
    pub confidence: f64,
    pub total_cost: String,
    pub recommendation_json: String,
    /// History ID when the save succeeded
    pub saved_id: Option<String>,
    pub warning: Option<String>,
}

impl TryFrom<Submission> for FfiSubmission {
    type Error = AgriCureError;

    fn try_from(submission: Submission) -> Result<Self, Self::Error> {
        let Submission {
            recommendation,
            saved,
        } = submission;
        let saved_id = match &saved {
            SaveStatus::Saved { id } => Some(id.clone()),
            SaveStatus::Failed { .. } => None,
        };
        Ok(Self {
            recommendation_json: serde_json::to_string(&recommendation)?,
            fertilizer: recommendation.ml_prediction.fertilizer,
            confidence: recommendation.ml_prediction.confidence,
            total_cost: recommendation.cost_estimate.total,
            saved_id,
            warning: saved.warning().map(str::to_string),
        })
    }
}

/// FFI-safe history record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHistoryItem {
    pub id: String,
    pub field_name: String,
    pub field_size: f64,
    pub field_size_unit: String,
    pub crop_type: String,
    pub soil_type: String,
    pub fertilizer: String,
    pub confidence: f64,
    /// "high", "medium" or "low"
    pub confidence_band: String,
    pub total_cost: String,
    pub recommendation_json: String,
    pub created_at: String,
}

impl TryFrom<StoredRecommendation> for FfiHistoryItem {
    type Error = AgriCureError;

    fn try_from(record: StoredRecommendation) -> Result<Self, Self::Error> {
        Ok(Self {
            confidence_band: record.confidence_band().as_str().to_string(),
            recommendation_json: serde_json::to_string(&record.recommendations)?,
            id: record.id,
            field_name: record.field_name,
            field_size: record.field_size,
            field_size_unit: record.field_size_unit,
            crop_type: record.crop_type,
            soil_type: record.soil_type,
            fertilizer: record.ml_prediction.fertilizer,
            confidence: record.ml_prediction.confidence,
            total_cost: record.recommendations.cost_estimate.total,
            created_at: record.created_at,
        })
    }
}
