//! User, session and profile models.

use serde::{Deserialize, Serialize};

/// An authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    /// User ID (UUID)
    pub id: String,
    pub email: String,
}

/// A signed-in session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// Opaque session token
    pub token: String,
    pub user: AuthUser,
    pub created_at: String,
}

/// A farmer's profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    /// Same as the user ID
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub farm_location: Option<String>,
    pub phone: Option<String>,
    pub farm_size: Option<f64>,
    pub farm_size_unit: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl UserProfile {
    /// Create a profile for a freshly registered user.
    pub fn new(user: &AuthUser, full_name: String, farm_location: Option<String>) -> Self {
        let now = super::timestamp_now();
        Self {
            id: user.id.clone(),
            full_name,
            email: user.email.clone(),
            farm_location,
            phone: None,
            farm_size: None,
            farm_size_unit: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Name shown in the dashboard header.
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            "User"
        } else {
            &self.full_name
        }
    }

    /// Apply an update, leaving the email and timestamps of creation intact.
    pub fn apply(&mut self, update: ProfileUpdate) {
        self.full_name = update.full_name;
        self.farm_location = update.farm_location;
        self.phone = update.phone;
        self.farm_size = update.farm_size;
        self.farm_size_unit = update.farm_size_unit;
        self.updated_at = super::timestamp_now();
    }
}

/// Editable profile fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub farm_location: Option<String>,
    pub phone: Option<String>,
    pub farm_size: Option<f64>,
    pub farm_size_unit: Option<String>,
}
